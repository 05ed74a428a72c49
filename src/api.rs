//! Client for the remote Pokedex data service.
//!
//! Every failure (non-2xx status, transport error, unparsable body) is folded
//! into one [`ApiError`]; callers treat it as "not available" and fall back.

use crate::config::PokedexConfig;
use crate::errors::{ApiError, ApiResult, UnavailableReason};
use async_trait::async_trait;
use schema::{EvolutionChainData, PokemonData, PokemonType, SpeciesData, TypeData};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// A JSON-over-HTTP data source. Implemented by [`HttpApi`] for the real
/// service and by in-memory fakes in tests.
#[async_trait]
pub trait PokeApi: Send + Sync {
    /// Base URL that relative lookups are appended to, without trailing `/`.
    fn base_url(&self) -> &str;

    /// GET an absolute URL and parse the body as JSON.
    async fn get_json(&self, url: &str) -> ApiResult<Value>;

    /// GET `{base_url}/{path}`. Lookups are case-insensitive on the service
    /// side only for lowercase input, so the path is lower-cased first.
    async fn fetch_json(&self, path: &str) -> ApiResult<Value> {
        let url = resource_url(self.base_url(), path);
        self.get_json(&url).await
    }
}

/// Joins a base URL and a relative lookup path.
pub fn resource_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/').to_lowercase()
    )
}

/// reqwest-backed client for the public service.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(config: &PokedexConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PokeApi for HttpApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(&self, url: &str) -> ApiResult<Value> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::new(url, UnavailableReason::Transport(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(url, UnavailableReason::Status(status.as_u16())));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::new(url, UnavailableReason::Decode(e.to_string())))
    }
}

fn decode<T: DeserializeOwned>(url: &str, value: Value) -> ApiResult<T> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::new(url, UnavailableReason::Decode(e.to_string())))
}

/// Fetch an absolute URL (as embedded in another payload) into a typed shape.
pub async fn fetch_as<T, A>(api: &A, url: &str) -> ApiResult<T>
where
    T: DeserializeOwned,
    A: PokeApi + ?Sized,
{
    let value = api.get_json(url).await?;
    decode(url, value)
}

/// `GET /pokemon/{idOrName}`
pub async fn fetch_pokemon<A: PokeApi + ?Sized>(api: &A, id_or_name: &str) -> ApiResult<PokemonData> {
    let path = format!("pokemon/{}", id_or_name);
    let value = api.fetch_json(&path).await?;
    decode(&resource_url(api.base_url(), &path), value)
}

/// `GET /pokemon-species/{id}`, following the URL embedded in the entity.
pub async fn fetch_species<A: PokeApi + ?Sized>(api: &A, url: &str) -> ApiResult<SpeciesData> {
    fetch_as(api, url).await
}

/// `GET /evolution-chain/{id}`, following the URL embedded in the species.
pub async fn fetch_evolution_chain<A: PokeApi + ?Sized>(
    api: &A,
    url: &str,
) -> ApiResult<EvolutionChainData> {
    fetch_as(api, url).await
}

/// `GET /type/{name}`
pub async fn fetch_type<A: PokeApi + ?Sized>(api: &A, kind: PokemonType) -> ApiResult<TypeData> {
    let path = format!("type/{}", kind.api_name());
    let value = api.fetch_json(&path).await?;
    decode(&resource_url(api.base_url(), &path), value)
}
