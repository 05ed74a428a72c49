//! First-branch evolution path extraction.
//!
//! The service models a lineage as a tree. The browser shows a single line,
//! so at every fork only the first child is followed: for A -> {B, C} the
//! path is [A, B]. Showing every branch would need a different result type
//! (a tree), not a tweak to this walk.

use crate::api::{fetch_evolution_chain, PokeApi};
use crate::config::PokedexConfig;
use crate::errors::{ResolveError, ResolveResult};
use crate::ids::id_from_resource_url;
use schema::{ChainLink, EvolutionDetail, SpeciesData};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// The first condition listed for reaching a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionRequirement {
    pub trigger: Option<String>,
    pub min_level: Option<u32>,
    pub item: Option<String>,
    pub held_item: Option<String>,
    pub known_move: Option<String>,
    pub min_happiness: Option<u32>,
    pub time_of_day: Option<String>,
}

impl From<&EvolutionDetail> for EvolutionRequirement {
    fn from(detail: &EvolutionDetail) -> Self {
        let name = |resource: &Option<schema::NamedResource>| {
            resource.as_ref().map(|r| r.name.clone())
        };
        Self {
            trigger: name(&detail.trigger),
            min_level: detail.min_level,
            item: name(&detail.item),
            held_item: name(&detail.held_item),
            known_move: name(&detail.known_move),
            min_happiness: detail.min_happiness,
            time_of_day: detail.time_of_day.clone().filter(|t| !t.is_empty()),
        }
    }
}

impl fmt::Display for EvolutionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(level) = self.min_level {
            write!(f, "Nv. {}", level)?;
        } else if let Some(item) = &self.item {
            write!(f, "{}", crate::view::format_label(item))?;
        } else if let Some(happiness) = self.min_happiness {
            write!(f, "Amistad {}", happiness)?;
        } else if let Some(known_move) = &self.known_move {
            write!(f, "{}", crate::view::format_label(known_move))?;
        } else if let Some(trigger) = &self.trigger {
            write!(f, "{}", crate::view::format_label(trigger))?;
        } else {
            write!(f, "?")?;
        }

        if let Some(held) = &self.held_item {
            write!(f, " + {}", crate::view::format_label(held))?;
        }
        if let Some(time) = &self.time_of_day {
            write!(f, " ({})", time)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionNode {
    pub species_id: u16,
    pub species_name: String,
    pub sprite_url: String,
    /// `None` for the root stage.
    pub requirement: Option<EvolutionRequirement>,
}

/// Walks `root` along the first child of every stage.
pub fn first_branch_path(root: &ChainLink, config: &PokedexConfig) -> ResolveResult<Vec<EvolutionNode>> {
    let mut path = Vec::new();
    let mut stage = Some(root);

    while let Some(link) = stage {
        let species_id = id_from_resource_url(&link.species.url)
            .and_then(|id| u16::try_from(id).ok())
            .ok_or_else(|| ResolveError::MalformedIdentifierUrl(link.species.url.clone()))?;

        path.push(EvolutionNode {
            species_id,
            species_name: link.species.name.clone(),
            sprite_url: config.sprite_url(species_id),
            requirement: link.evolution_details.first().map(EvolutionRequirement::from),
        });

        stage = link.evolves_to.first();
    }

    Ok(path)
}

/// Fetches the chain referenced by `species` and extracts its first-branch
/// path. Any failure fails the whole resolution; no partial path is returned.
pub async fn resolve_chain<A: PokeApi + ?Sized>(
    api: &A,
    species: &SpeciesData,
    config: &PokedexConfig,
) -> ResolveResult<Vec<EvolutionNode>> {
    let url = species
        .evolution_chain
        .as_ref()
        .map(|resource| resource.url.as_str())
        .ok_or_else(|| ResolveError::NoChain(species.name.clone()))?;

    let chain = fetch_evolution_chain(api, url).await?;
    let path = first_branch_path(&chain.chain, config)?;
    debug!(species = %species.name, stages = path.len(), "resolved evolution chain");
    Ok(path)
}
