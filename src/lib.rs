// In: src/lib.rs

//! Pokedex Browsing Engine
//!
//! Resolves creatures from the public Pokedex REST service into complete
//! view models (stats, description, evolution line, move lists) and keeps
//! the navigation state of a browsing session: sequential steps with
//! wraparound, direct number entry, and type filters.

// --- MODULE DECLARATIONS ---
pub mod api;
pub mod config;
pub mod errors;
pub mod evolution;
pub mod ids;
pub mod loader;
pub mod locale;
pub mod mcp_interface;
pub mod moves;
pub mod navigation;
pub mod pokedex;
pub mod view;

#[cfg(test)]
mod tests;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
// Re-export the payload shapes and the closed enums.
pub use schema::{
    type_label, BaseStats, ChainLink, EvolutionChainData, MoveEntry, PokemonData, PokemonType,
    SpeciesData, StatKind, TypeData, STAT_CHART_MAX,
};

// --- From this crate's modules (`src/`) ---

// The session facade and its building blocks.
pub use loader::{EntityLoader, LoadTicket};
pub use navigation::{DigitBuffer, FilterState, NavigationState, NumPadKey};
pub use pokedex::Pokedex;

// Data access.
pub use api::{HttpApi, PokeApi};
pub use config::{LanguagePreference, PokedexConfig};

// Pure helpers.
pub use evolution::{first_branch_path, resolve_chain, EvolutionNode, EvolutionRequirement};
pub use ids::{clamp_id, clamp_id_input, id_from_resource_url, MAX_ID};
pub use locale::{pick_localized, LocalizedText, UNKNOWN_TEXT};
pub use moves::{classify_moves, LearnMethod, MoveLearnRecord, MoveSets};
pub use view::{Section, ViewModel};

// Crate-specific error and result types.
pub use errors::{
    ApiError, ApiResult, ConfigError, FilterError, FilterResult, LoadError, LoadResult,
    PokedexError, PokedexResult, ResolveError, ResolveResult, UnavailableReason,
};
