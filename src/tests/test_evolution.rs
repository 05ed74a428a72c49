#[cfg(test)]
mod tests {
    use crate::errors::ResolveError;
    use crate::evolution::{first_branch_path, resolve_chain, EvolutionNode};
    use crate::tests::common::{
        chain_link, item_detail, level_detail, species_json, test_config, MockApi,
    };
    use pretty_assertions::assert_eq;
    use schema::{ChainLink, SpeciesData};
    use serde_json::{json, Value};

    fn link(value: Value) -> ChainLink {
        serde_json::from_value(value).expect("chain fixture should deserialize")
    }

    fn ids(path: &[EvolutionNode]) -> Vec<u16> {
        path.iter().map(|node| node.species_id).collect()
    }

    fn bulbasaur_line() -> Value {
        chain_link(
            1,
            "bulbasaur",
            vec![],
            vec![chain_link(
                2,
                "ivysaur",
                vec![level_detail(16)],
                vec![chain_link(3, "venusaur", vec![level_detail(32)], vec![])],
            )],
        )
    }

    #[test]
    fn test_linear_chain_yields_every_stage() {
        // Arrange
        let config = test_config();
        let root = link(bulbasaur_line());

        // Act
        let path = first_branch_path(&root, &config).expect("linear chain should resolve");

        // Assert
        assert_eq!(ids(&path), vec![1, 2, 3]);
        assert_eq!(path[0].requirement, None, "the root stage has no requirement");
        assert_eq!(path[1].species_name, "ivysaur");
        assert_eq!(path[1].sprite_url, config.sprite_url(2));
        let requirement = path[2].requirement.as_ref().expect("venusaur has a requirement");
        assert_eq!(requirement.min_level, Some(32));
        assert_eq!(requirement.to_string(), "Nv. 32");
    }

    #[test]
    fn test_branching_chain_follows_first_child_only() {
        // Arrange
        let root = link(chain_link(
            133,
            "eevee",
            vec![],
            vec![
                chain_link(134, "vaporeon", vec![item_detail("water-stone")], vec![]),
                chain_link(135, "jolteon", vec![item_detail("thunder-stone")], vec![]),
            ],
        ));

        // Act
        let path = first_branch_path(&root, &test_config()).expect("branching chain should resolve");

        // Assert
        assert_eq!(ids(&path), vec![133, 134]);
        let requirement = path[1].requirement.as_ref().expect("vaporeon has a requirement");
        assert_eq!(requirement.item.as_deref(), Some("water-stone"));
        assert_eq!(requirement.time_of_day, None, "empty time of day is dropped");
        assert_eq!(requirement.to_string(), "Water stone");
    }

    #[test]
    fn test_single_stage_chain() {
        let root = link(chain_link(128, "tauros", vec![], vec![]));

        let path = first_branch_path(&root, &test_config()).expect("single stage should resolve");

        assert_eq!(ids(&path), vec![128]);
    }

    #[test]
    fn test_malformed_species_url_fails_the_whole_chain() {
        // Arrange
        let root = link(json!({
            "species": { "name": "charmander", "url": "https://pokeapi.test/api/v2/pokemon-species/4/" },
            "evolves_to": [{
                "species": { "name": "charmeleon", "url": "https://pokeapi.test/api/v2/pokemon-species/charmeleon/" },
                "evolves_to": []
            }]
        }));

        // Act
        let result = first_branch_path(&root, &test_config());

        // Assert
        assert_eq!(
            result,
            Err(ResolveError::MalformedIdentifierUrl(
                "https://pokeapi.test/api/v2/pokemon-species/charmeleon/".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_resolve_chain_fetches_the_referenced_chain() {
        // Arrange
        let api = MockApi::new().with_chain(1, bulbasaur_line());
        let species: SpeciesData = serde_json::from_value(species_json(1, "bulbasaur", Some(1)))
            .expect("species fixture should deserialize");

        // Act
        let path = resolve_chain(&api, &species, &test_config()).await;

        // Assert
        assert_eq!(path.map(|p| ids(&p)), Ok(vec![1, 2, 3]));
        assert_eq!(api.requests(), vec![MockApi::url("evolution-chain/1/")]);
    }

    #[tokio::test]
    async fn test_resolve_chain_fails_when_chain_is_missing() {
        // Arrange
        let api = MockApi::new();
        let with_dangling_ref: SpeciesData =
            serde_json::from_value(species_json(1, "bulbasaur", Some(1)))
                .expect("species fixture should deserialize");
        let without_ref: SpeciesData = serde_json::from_value(species_json(1, "bulbasaur", None))
            .expect("species fixture should deserialize");

        // Act
        let dangling = resolve_chain(&api, &with_dangling_ref, &test_config()).await;
        let absent = resolve_chain(&api, &without_ref, &test_config()).await;

        // Assert
        assert!(matches!(dangling, Err(ResolveError::Api(_))));
        assert_eq!(absent, Err(ResolveError::NoChain("bulbasaur".to_string())));
    }
}
