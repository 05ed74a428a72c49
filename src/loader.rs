//! Entity loader: turns a requested id into a complete [`ViewModel`].
//!
//! Only the entity fetch is fatal. Species metadata and the evolution chain
//! are dependent data; when they fail the view is still produced with those
//! sections marked [`Section::Unavailable`].

use crate::api::{fetch_pokemon, fetch_species, PokeApi};
use crate::config::PokedexConfig;
use crate::errors::{LoadError, LoadResult};
use crate::evolution::{resolve_chain, EvolutionNode};
use crate::ids::clamp_id;
use crate::locale::{normalize_flavor_text, pick_localized};
use crate::moves::classify_moves;
use crate::view::{Measures, Section, SpeciesInfo, StatBar, TypeTag, ViewModel};
use schema::{type_label, BaseStats, PokemonData, StatKind, STAT_CHART_MAX};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Identifies one load. Issued by [`EntityLoader::begin`]; a ticket whose
/// generation is no longer the newest yields [`LoadError::Superseded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub requested_id: u16,
}

pub struct EntityLoader<A: ?Sized> {
    api: Arc<A>,
    config: PokedexConfig,
    generation: AtomicU64,
}

/// First non-empty candidate, else `fallback`.
fn first_available<'a>(candidates: &[Option<&'a str>], fallback: &'a str) -> &'a str {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|url| !url.is_empty())
        .unwrap_or(fallback)
}

impl<A: PokeApi + ?Sized> EntityLoader<A> {
    pub fn new(api: Arc<A>, config: PokedexConfig) -> Self {
        Self {
            api,
            config,
            generation: AtomicU64::new(0),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn config(&self) -> &PokedexConfig {
        &self.config
    }

    /// Starts a new request generation. Every ticket issued earlier becomes
    /// stale.
    pub fn begin(&self, requested: i64) -> LoadTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket {
            generation,
            requested_id: clamp_id(requested),
        }
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.current_generation()
    }

    /// Loads the ticket's entity, discarding the result if a newer
    /// generation started while it was in flight.
    pub async fn load(&self, ticket: &LoadTicket) -> LoadResult<ViewModel> {
        let view = self.assemble(ticket.requested_id).await;

        if !self.is_current(ticket) {
            let newest = self.current_generation();
            warn!(
                requested = ticket.requested_id,
                generation = ticket.generation,
                newest,
                "discarding stale load result"
            );
            return Err(LoadError::Superseded { generation: newest });
        }
        view
    }

    /// Fetches and assembles the view for `id` without generation checks.
    pub async fn assemble(&self, id: u16) -> LoadResult<ViewModel> {
        let pokemon = fetch_pokemon(self.api(), &id.to_string())
            .await
            .map_err(|e| {
                warn!(id, error = %e, "entity fetch failed");
                LoadError::NotFound { id }
            })?;

        let mut view = self.primary_view(&pokemon);
        let (species, evolution) = self.dependent_sections(&pokemon).await;
        view.species = species;
        view.evolution = evolution;
        Ok(view)
    }

    /// Everything derivable from the entity payload alone, including the
    /// move lists. Dependent sections start out unavailable.
    pub fn primary_view(&self, pokemon: &PokemonData) -> ViewModel {
        let language = self.config.languages.primary.as_str();
        let placeholder = self.config.placeholder_sprite.as_str();
        let artwork = pokemon.sprites.official_artwork();
        let front = pokemon.sprites.front_default();

        let mut slots: Vec<_> = pokemon.types.iter().collect();
        slots.sort_by_key(|slot| slot.slot);
        let types = slots
            .into_iter()
            .map(|slot| TypeTag {
                api_name: slot.type_.name.clone(),
                label: type_label(&slot.type_.name, language),
            })
            .collect();

        let mut stats = BaseStats::default();
        for entry in &pokemon.stats {
            match entry.stat.name.parse::<StatKind>() {
                Ok(kind) => stats.set(kind, u8::try_from(entry.base_stat).unwrap_or(STAT_CHART_MAX)),
                Err(_) => debug!(stat = %entry.stat.name, "ignoring unknown stat"),
            }
        }
        let stat_bars = stats
            .iter()
            .map(|(kind, value)| StatBar {
                kind,
                label: kind.label(language).to_string(),
                value,
            })
            .collect();

        let moves = classify_moves(&pokemon.moves);
        if moves.is_empty() {
            debug!(id = pokemon.id, "no level-up or machine moves");
        }

        ViewModel {
            id: clamp_id(i64::from(pokemon.id)),
            name: pokemon.name.clone(),
            artwork_url: first_available(&[artwork, front], placeholder).to_string(),
            mini_sprite_url: first_available(&[front, artwork], placeholder).to_string(),
            types,
            measures: Measures::from_api_units(pokemon.height, pokemon.weight),
            stats,
            stat_bars,
            abilities: pokemon
                .abilities
                .iter()
                .map(|slot| slot.ability.name.clone())
                .collect(),
            moves,
            species: Section::Unavailable,
            evolution: Section::Unavailable,
        }
    }

    async fn dependent_sections(
        &self,
        pokemon: &PokemonData,
    ) -> (Section<SpeciesInfo>, Section<Vec<EvolutionNode>>) {
        let species = match fetch_species(self.api(), &pokemon.species.url).await {
            Ok(species) => species,
            Err(e) => {
                warn!(id = pokemon.id, error = %e, "species metadata unavailable");
                return (Section::Unavailable, Section::Unavailable);
            }
        };

        let preference = self.config.languages.order();
        let info = SpeciesInfo {
            description: normalize_flavor_text(&pick_localized(
                &species.flavor_text_entries,
                &preference,
            )),
            category: pick_localized(&species.genera, &preference),
        };

        let evolution: Section<Vec<EvolutionNode>> = resolve_chain(self.api(), &species, &self.config)
            .await
            .inspect_err(|e| warn!(id = pokemon.id, error = %e, "evolution chain unavailable"))
            .into();

        (Section::Ready(info), evolution)
    }
}
