#[cfg(test)]
mod tests {
    use crate::errors::LoadError;
    use crate::loader::EntityLoader;
    use crate::tests::common::{
        chain_link, level_detail, move_json, pokemon_json, test_config, MockApi,
    };
    use crate::view::{Section, SpeciesInfo, TypeTag};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{PokemonData, StatKind, STAT_CHART_MAX};
    use serde_json::{json, Value};

    fn pikachu_line() -> Value {
        chain_link(
            172,
            "pichu",
            vec![],
            vec![chain_link(
                25,
                "pikachu",
                vec![level_detail(10)],
                vec![chain_link(26, "raichu", vec![], vec![])],
            )],
        )
    }

    fn full_api() -> MockApi {
        MockApi::new()
            .with_response(
                "pokemon/25",
                pokemon_json(
                    25,
                    "pikachu",
                    &["electric"],
                    vec![move_json("thunder-shock", &[("level-up", 1)])],
                ),
            )
            .with_species(25, "pikachu", Some(10))
            .with_chain(10, pikachu_line())
    }

    fn pokemon(value: Value) -> PokemonData {
        serde_json::from_value(value).expect("pokemon fixture should deserialize")
    }

    #[tokio::test]
    async fn test_load_assembles_every_section() {
        // Arrange
        let loader = EntityLoader::new(full_api().shared(), test_config());

        // Act
        let ticket = loader.begin(25);
        let view = loader.load(&ticket).await.expect("pikachu should load");

        // Assert
        assert_eq!(view.id, 25);
        assert_eq!(view.display_name(), "PIKACHU");
        assert_eq!(view.display_id(), "#025");
        assert_eq!(
            view.types,
            vec![TypeTag {
                api_name: "electric".to_string(),
                label: "Eléctrico".to_string(),
            }]
        );
        assert_eq!(view.measures.to_string(), "ALT: 0.4m / PESO: 6.0kg");
        assert_eq!(view.stats.get(StatKind::Speed), 90);
        assert_eq!(view.stats.total(), 320);
        assert_eq!(view.abilities_line(), "Static, Lightning rod");
        assert_eq!(view.moves.by_level.len(), 1);
        assert_eq!(
            view.species,
            Section::Ready(SpeciesInfo {
                description: "Cuando se enfadan, liberan electricidad.".to_string(),
                category: "Pokémon Ratón".to_string(),
            })
        );
        let chain = view.evolution.as_ready().expect("evolution should be ready");
        let chain_ids: Vec<u16> = chain.iter().map(|node| node.species_id).collect();
        assert_eq!(chain_ids, vec![172, 25, 26]);
    }

    #[tokio::test]
    async fn test_species_failure_keeps_primary_fields() {
        // Arrange
        let api = MockApi::new()
            .with_response(
                "pokemon/25",
                pokemon_json(
                    25,
                    "pikachu",
                    &["electric"],
                    vec![
                        move_json("thunder-shock", &[("level-up", 1)]),
                        move_json("thunderbolt", &[("machine", 0)]),
                    ],
                ),
            )
            .shared();
        let loader = EntityLoader::new(api, test_config());

        // Act
        let view = loader
            .load(&loader.begin(25))
            .await
            .expect("entity alone is enough to load");

        // Assert
        assert_eq!(view.name, "pikachu");
        assert_eq!(view.types.len(), 1);
        assert_eq!(view.stat_bars.len(), 6);
        assert_eq!(view.abilities.len(), 2);
        assert_eq!(view.moves.by_level.len(), 1);
        assert_eq!(view.moves.by_machine.len(), 1);
        assert_eq!(view.species, Section::Unavailable);
        assert_eq!(view.evolution, Section::Unavailable);
    }

    #[tokio::test]
    async fn test_chain_failure_only_affects_evolution() {
        // Arrange
        let api = MockApi::new()
            .with_entity(25, "pikachu", &["electric"])
            .with_species(25, "pikachu", Some(99))
            .shared();
        let loader = EntityLoader::new(api, test_config());

        // Act
        let view = loader.load(&loader.begin(25)).await.expect("pikachu should load");

        // Assert
        assert!(view.species.is_available());
        assert_eq!(view.evolution, Section::Unavailable);
    }

    #[tokio::test]
    async fn test_entity_failure_is_not_found() {
        // Arrange
        let api = MockApi::new().shared();
        let loader = EntityLoader::new(api.clone(), test_config());

        // Act
        let ticket = loader.begin(9999);
        let result = loader.load(&ticket).await;

        // Assert
        assert_eq!(ticket.requested_id, 1025, "requests are clamped before fetching");
        assert_eq!(result, Err(LoadError::NotFound { id: 1025 }));
        assert_eq!(api.requests(), vec![MockApi::url("pokemon/1025")]);
    }

    #[tokio::test]
    async fn test_stale_ticket_is_superseded() {
        // Arrange
        let api = MockApi::new()
            .with_entity(25, "pikachu", &["electric"])
            .with_entity(26, "raichu", &["electric"])
            .shared();
        let loader = EntityLoader::new(api, test_config());

        // Act
        let older = loader.begin(25);
        let newer = loader.begin(26);
        let stale = loader.load(&older).await;
        let fresh = loader.load(&newer).await;

        // Assert
        assert_eq!(stale, Err(LoadError::Superseded { generation: newer.generation }));
        assert_eq!(fresh.map(|view| view.id), Ok(26));
        assert!(!loader.is_current(&older));
        assert!(loader.is_current(&newer));
    }

    #[rstest]
    #[case(
        "artwork preferred for main image, front for mini sprite",
        json!({ "front_default": "front.png", "other": { "official-artwork": { "front_default": "art.png" } } }),
        "art.png",
        "front.png"
    )]
    #[case(
        "no artwork: both use the front sprite",
        json!({ "front_default": "front.png", "other": null }),
        "front.png",
        "front.png"
    )]
    #[case(
        "no front sprite: both use the artwork",
        json!({ "front_default": null, "other": { "official-artwork": { "front_default": "art.png" } } }),
        "art.png",
        "art.png"
    )]
    #[case(
        "nothing available: placeholder",
        json!({ "front_default": null, "other": { "official-artwork": null } }),
        "placeholder.png",
        "placeholder.png"
    )]
    fn test_sprite_fallbacks(
        #[case] desc: &str,
        #[case] sprites: Value,
        #[case] expected_artwork: &str,
        #[case] expected_mini: &str,
    ) {
        // Arrange
        let mut body = pokemon_json(25, "pikachu", &["electric"], vec![]);
        body["sprites"] = sprites;
        let loader = EntityLoader::new(MockApi::new().shared(), test_config());

        // Act
        let view = loader.primary_view(&pokemon(body));

        // Assert
        assert_eq!(view.artwork_url, expected_artwork, "{}", desc);
        assert_eq!(view.mini_sprite_url, expected_mini, "{}", desc);
    }

    #[test]
    fn test_types_follow_slot_order_and_stats_saturate() {
        // Arrange
        let mut body = pokemon_json(6, "charizard", &["fire", "flying"], vec![]);
        body["types"] = json!([
            { "slot": 2, "type": { "name": "flying", "url": "" } },
            { "slot": 1, "type": { "name": "fire", "url": "" } }
        ]);
        body["stats"][0]["base_stat"] = json!(300);
        let loader = EntityLoader::new(MockApi::new().shared(), test_config());

        // Act
        let view = loader.primary_view(&pokemon(body));

        // Assert
        let labels: Vec<&str> = view.types.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Fuego", "Volador"]);
        assert_eq!(view.stats.get(StatKind::Hp), STAT_CHART_MAX);
    }

    #[tokio::test]
    async fn test_english_preference_selects_english_text() {
        // Arrange
        let config = test_config().with_primary_language("en");
        let loader = EntityLoader::new(full_api().shared(), config);

        // Act
        let view = loader.load(&loader.begin(25)).await.expect("pikachu should load");

        // Assert
        assert_eq!(view.types[0].label, "Electric");
        assert_eq!(
            view.species,
            Section::Ready(SpeciesInfo {
                description: "When several of these POKéMON gather, their electricity".to_string(),
                category: "Mouse Pokémon".to_string(),
            })
        );
    }
}
