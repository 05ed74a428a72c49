use crate::api::PokeApi;
use crate::config::PokedexConfig;
use crate::errors::{ApiError, ApiResult, UnavailableReason};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const TEST_BASE_URL: &str = "https://pokeapi.test/api/v2";

/// An in-memory data service. Unregistered URLs answer 404.
///
/// # Example
/// ```
/// let api = MockApi::new()
///     .with_entity(25, "pikachu", &["electric"])
///     .with_species(25, "pikachu", Some(10));
/// ```
#[derive(Default)]
pub struct MockApi {
    responses: HashMap<String, Value>,
    requests: Mutex<Vec<String>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(path: &str) -> String {
        format!("{}/{}", TEST_BASE_URL, path)
    }

    /// Registers a raw response for `{base}/{path}`.
    pub fn with_response(mut self, path: &str, body: Value) -> Self {
        self.responses.insert(Self::url(path), body);
        self
    }

    /// Registers `/pokemon/{id}` with no moves.
    pub fn with_entity(self, id: u16, name: &str, types: &[&str]) -> Self {
        self.with_response(&format!("pokemon/{}", id), pokemon_json(id, name, types, vec![]))
    }

    /// Registers `/pokemon-species/{id}/` (the URL embedded in the entity)
    /// with Spanish and English text.
    pub fn with_species(self, id: u16, name: &str, chain_id: Option<u32>) -> Self {
        self.with_response(
            &format!("pokemon-species/{}/", id),
            species_json(id, name, chain_id),
        )
    }

    pub fn with_chain(self, chain_id: u32, chain: Value) -> Self {
        self.with_response(
            &format!("evolution-chain/{}/", chain_id),
            json!({ "id": chain_id, "chain": chain }),
        )
    }

    pub fn with_type_listing(self, type_name: &str, ids: &[u32]) -> Self {
        self.with_response(&format!("type/{}", type_name), type_json(type_name, ids))
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Every URL requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|log| log.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PokeApi for MockApi {
    fn base_url(&self) -> &str {
        TEST_BASE_URL
    }

    async fn get_json(&self, url: &str) -> ApiResult<Value> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(url.to_string());
        }
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| ApiError::new(url, UnavailableReason::Status(404)))
    }
}

pub fn test_config() -> PokedexConfig {
    PokedexConfig::default()
        .with_api_base_url(TEST_BASE_URL)
        .with_request_timeout(1)
}

pub fn named(name: &str, path: &str) -> Value {
    json!({ "name": name, "url": MockApi::url(path) })
}

pub fn species_ref(id: u16, name: &str) -> Value {
    named(name, &format!("pokemon-species/{}/", id))
}

pub fn pokemon_json(id: u16, name: &str, types: &[&str], moves: Vec<Value>) -> Value {
    let types: Vec<Value> = types
        .iter()
        .enumerate()
        .map(|(index, type_name)| {
            json!({ "slot": index + 1, "type": named(type_name, &format!("type/{}/", type_name)) })
        })
        .collect();

    let stats: Vec<Value> = [
        ("hp", 35),
        ("attack", 55),
        ("defense", 40),
        ("special-attack", 50),
        ("special-defense", 50),
        ("speed", 90),
    ]
    .iter()
    .map(|(stat, value)| {
        json!({ "base_stat": value, "effort": 0, "stat": named(stat, &format!("stat/{}/", stat)) })
    })
    .collect();

    json!({
        "id": id,
        "name": name,
        "height": 4,
        "weight": 60,
        "sprites": {
            "front_default": format!("https://sprites.test/{}.png", id),
            "other": {
                "official-artwork": {
                    "front_default": format!("https://sprites.test/artwork/{}.png", id)
                }
            }
        },
        "types": types,
        "stats": stats,
        "abilities": [
            { "ability": named("static", "ability/9/"), "is_hidden": false, "slot": 1 },
            { "ability": named("lightning-rod", "ability/31/"), "is_hidden": true, "slot": 3 }
        ],
        "moves": moves,
        "species": species_ref(id, name)
    })
}

pub fn species_json(id: u16, name: &str, chain_id: Option<u32>) -> Value {
    let chain = chain_id.map(|chain_id| json!({ "url": MockApi::url(&format!("evolution-chain/{}/", chain_id)) }));
    json!({
        "id": id,
        "name": name,
        "flavor_text_entries": [
            {
                "flavor_text": "When several of\nthese POKéMON gather,\u{000c}their electricity",
                "language": named("en", "language/9/"),
                "version": named("red", "version/1/")
            },
            {
                "flavor_text": "Cuando se enfadan,\nliberan  electricidad.",
                "language": named("es", "language/7/"),
                "version": named("x", "version/23/")
            }
        ],
        "genera": [
            { "genus": "Mouse Pokémon", "language": named("en", "language/9/") },
            { "genus": "Pokémon Ratón", "language": named("es", "language/7/") }
        ],
        "evolution_chain": chain
    })
}

/// One stage of a chain. `details` describes how the previous stage evolves
/// into this one.
pub fn chain_link(id: u16, name: &str, details: Vec<Value>, evolves_to: Vec<Value>) -> Value {
    json!({
        "species": species_ref(id, name),
        "is_baby": false,
        "evolution_details": details,
        "evolves_to": evolves_to
    })
}

pub fn level_detail(level: u32) -> Value {
    json!({
        "trigger": named("level-up", "evolution-trigger/1/"),
        "min_level": level,
        "item": null,
        "held_item": null,
        "known_move": null,
        "min_happiness": null,
        "time_of_day": ""
    })
}

pub fn item_detail(item: &str) -> Value {
    json!({
        "trigger": named("use-item", "evolution-trigger/3/"),
        "min_level": null,
        "item": named(item, "item/83/"),
        "time_of_day": ""
    })
}

pub fn type_json(type_name: &str, ids: &[u32]) -> Value {
    let pokemon: Vec<Value> = ids
        .iter()
        .enumerate()
        .map(|(index, id)| {
            json!({
                "slot": 1,
                "pokemon": named(&format!("mon-{}", index), &format!("pokemon/{}/", id))
            })
        })
        .collect();
    json!({ "id": 11, "name": type_name, "pokemon": pokemon })
}

/// A learnable move with one version-group detail per `(method, level)`.
pub fn move_json(name: &str, details: &[(&str, u32)]) -> Value {
    let details: Vec<Value> = details
        .iter()
        .map(|(method, level)| {
            json!({
                "level_learned_at": level,
                "move_learn_method": named(method, "move-learn-method/1/"),
                "version_group": named("red-blue", "version-group/1/")
            })
        })
        .collect();
    json!({ "move": named(name, "move/1/"), "version_group_details": details })
}
