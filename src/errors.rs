use schema::PokemonType;
use std::fmt;

/// Why a request to the data service produced no usable payload.
///
/// Callers never branch on the reason: every variant means "not available".
/// It is carried so logs can tell a 404 from a dropped connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    /// The service answered with a non-2xx status
    Status(u16),
    /// The request never produced a response (DNS, TLS, timeout, ...)
    Transport(String),
    /// The body was not the JSON shape we expected
    Decode(String),
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::Status(code) => write!(f, "HTTP status {}", code),
            UnavailableReason::Transport(details) => write!(f, "transport failure: {}", details),
            UnavailableReason::Decode(details) => write!(f, "malformed payload: {}", details),
        }
    }
}

/// The single failure signal of the API client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("resource not available at {url} ({reason})")]
pub struct ApiError {
    pub url: String,
    pub reason: UnavailableReason,
}

impl ApiError {
    pub fn new(url: impl Into<String>, reason: UnavailableReason) -> Self {
        Self {
            url: url.into(),
            reason,
        }
    }
}

/// Errors while resolving an evolution chain. The chain fails as a unit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Fetching the chain failed
    #[error("evolution chain unavailable: {0}")]
    Api(#[from] ApiError),
    /// The species payload carries no evolution chain reference
    #[error("species '{0}' has no evolution chain")]
    NoChain(String),
    /// A stage referenced a species URL without a numeric id
    #[error("malformed species url in evolution chain: {0}")]
    MalformedIdentifierUrl(String),
}

/// Errors that end a load without producing a view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The entity itself could not be fetched; terminal for this load
    #[error("Pokémon #{id} not found")]
    NotFound { id: u16 },
    /// A newer load was started before this one finished
    #[error("load superseded by request generation {generation}")]
    Superseded { generation: u64 },
}

/// Errors from applying a type filter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// The requested name is not one of the eighteen elemental types
    #[error("unknown type: {0}")]
    UnknownType(String),
    /// The type exists but no entity within range carries it
    #[error("no Pokémon of type {0}")]
    NoMatches(PokemonType),
    /// The type listing could not be fetched; filter state is unchanged
    #[error("could not apply filter: {0}")]
    Unavailable(#[from] ApiError),
}

/// Umbrella error for session operations that can fail in more than one way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PokedexError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Filter(#[from] FilterError),
}

/// Errors while reading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config file: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Type alias for Results using ApiError
pub type ApiResult<T> = Result<T, ApiError>;

/// Type alias for Results using ResolveError
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Type alias for Results using LoadError
pub type LoadResult<T> = Result<T, LoadError>;

/// Type alias for Results using FilterError
pub type FilterResult<T> = Result<T, FilterError>;

/// Type alias for Results using PokedexError
pub type PokedexResult<T> = Result<T, PokedexError>;
