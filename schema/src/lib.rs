// Pokedex Schema - Shared type definitions
// This crate contains the payload shapes served by the remote Pokedex data
// service and the closed enums (elemental types, stats) that the browsing
// engine translates for display.

// Re-export the main types
pub use pokemon_data::*;
pub use pokemon_types::*;
pub use species_data::*;
pub use stats::*;

pub mod pokemon_data;
pub mod pokemon_types;
pub mod species_data;
pub mod stats;
