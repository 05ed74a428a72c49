//! The assembled view of one entity, and its terminal rendering.

use crate::evolution::EvolutionNode;
use crate::locale::UNKNOWN_TEXT;
use crate::moves::MoveSets;
use schema::{BaseStats, StatKind, STAT_CHART_MAX};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A section whose data comes from a dependent request that may fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Section<T> {
    Ready(T),
    Unavailable,
}

impl<T> Section<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Section::Ready(_))
    }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Section::Ready(value) => Some(value),
            Section::Unavailable => None,
        }
    }
}

impl<T, E> From<Result<T, E>> for Section<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Section::Ready(value),
            Err(_) => Section::Unavailable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeTag {
    /// Name as served by the API, e.g. `"electric"`.
    pub api_name: String,
    /// Translated display name, e.g. `"Eléctrico"`.
    pub label: String,
}

/// Height and weight converted from decimetres and hectograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measures {
    pub height_m: f64,
    pub weight_kg: f64,
}

impl Measures {
    pub fn from_api_units(height_dm: u32, weight_hg: u32) -> Self {
        Self {
            height_m: f64::from(height_dm) / 10.0,
            weight_kg: f64::from(weight_hg) / 10.0,
        }
    }
}

impl fmt::Display for Measures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ALT: {:.1}m / PESO: {:.1}kg", self.height_m, self.weight_kg)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBar {
    pub kind: StatKind,
    pub label: String,
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesInfo {
    pub description: String,
    pub category: String,
}

/// Everything the display needs for one entity. Built fresh on every load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub id: u16,
    pub name: String,
    /// Official artwork, else default sprite, else placeholder.
    pub artwork_url: String,
    /// Default sprite, else official artwork, else placeholder.
    pub mini_sprite_url: String,
    pub types: Vec<TypeTag>,
    pub measures: Measures,
    pub stats: BaseStats,
    pub stat_bars: Vec<StatBar>,
    pub abilities: Vec<String>,
    pub moves: MoveSets,
    pub species: Section<SpeciesInfo>,
    pub evolution: Section<Vec<EvolutionNode>>,
}

impl ViewModel {
    pub fn display_name(&self) -> String {
        self.name.to_uppercase()
    }

    pub fn display_id(&self) -> String {
        format!("#{:03}", self.id)
    }

    pub fn abilities_line(&self) -> String {
        if self.abilities.is_empty() {
            return UNKNOWN_TEXT.to_string();
        }
        self.abilities
            .iter()
            .map(|ability| format_label(ability))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Turns an API slug into a label: the first hyphen becomes a space and the
/// first letter is upper-cased (`"thunder-shock"` -> `"Thunder shock"`).
pub fn format_label(slug: &str) -> String {
    let spaced = slug.replacen('-', " ", 1);
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

const LABEL_WIDTH: usize = 12;
const BAR_WIDTH: usize = 20;

/// Main screen: name, number, types, measures, sprite.
pub fn render_main(view: &ViewModel, f: &mut impl fmt::Write) -> fmt::Result {
    writeln!(f, "{} ({})", view.display_name(), view.display_id())?;
    writeln!(f, "--------------------")?;
    let types: Vec<String> = view.types.iter().map(|t| t.label.to_uppercase()).collect();
    writeln!(f, "Tipo: {}", types.join(" / "))?;
    writeln!(f, "{}", view.measures)?;
    write!(f, "Imagen: {}", view.artwork_url)
}

/// Species section: category, description and abilities.
pub fn render_species(view: &ViewModel, f: &mut impl fmt::Write) -> fmt::Result {
    match &view.species {
        Section::Ready(info) => {
            writeln!(f, "{:<LABEL_WIDTH$} : {}", "Categoría", info.category)?;
            writeln!(f, "{:<LABEL_WIDTH$} : {}", "Habilidad", view.abilities_line())?;
            write!(f, "{}", info.description)
        }
        Section::Unavailable => {
            writeln!(f, "{:<LABEL_WIDTH$} : {}", "Habilidad", view.abilities_line())?;
            write!(f, "Descripción no disponible.")
        }
    }
}

/// Stats screen: a bar per stat, scaled to the chart maximum.
pub fn render_stats(view: &ViewModel, f: &mut impl fmt::Write) -> fmt::Result {
    writeln!(f, "{} {}", view.display_id(), view.display_name())?;
    writeln!(f, "Sprite: {}", view.mini_sprite_url)?;
    for bar in &view.stat_bars {
        let filled = usize::from(bar.value) * BAR_WIDTH / usize::from(STAT_CHART_MAX);
        writeln!(
            f,
            "{:<LABEL_WIDTH$} : {:>3} {}",
            bar.label,
            bar.value,
            "#".repeat(filled)
        )?;
    }
    write!(f, "{:<LABEL_WIDTH$} : {:>3}", "Total", view.stats.total())
}

pub fn render_moves(view: &ViewModel, f: &mut impl fmt::Write) -> fmt::Result {
    writeln!(f, "--- Por nivel ---")?;
    if view.moves.by_level.is_empty() {
        writeln!(f, "No hay movimientos por nivel")?;
    }
    for record in &view.moves.by_level {
        writeln!(f, "Nv.{} {}", record.level, format_label(&record.move_name))?;
    }

    write!(f, "--- TM/MT ---")?;
    if view.moves.by_machine.is_empty() {
        write!(f, "\nNo hay movimientos TM/MT")?;
    }
    for record in &view.moves.by_machine {
        write!(f, "\n{}", format_label(&record.move_name))?;
    }
    Ok(())
}

pub fn render_evolution(view: &ViewModel, f: &mut impl fmt::Write) -> fmt::Result {
    let Section::Ready(chain) = &view.evolution else {
        return write!(f, "No se pudo cargar la cadena evolutiva.");
    };

    let stages: Vec<String> = chain
        .iter()
        .map(|node| match &node.requirement {
            Some(requirement) => format!(
                "[{}] {} #{:03}",
                requirement,
                format_label(&node.species_name),
                node.species_id
            ),
            None => format!("{} #{:03}", format_label(&node.species_name), node.species_id),
        })
        .collect();
    write!(f, "{}", stages.join(" → "))
}

impl fmt::Display for ViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render_main(self, f)?;
        if f.alternate() {
            writeln!(f)?;
            writeln!(f, "--------------------")?;
            render_species(self, f)?;
            writeln!(f)?;
            writeln!(f, "--------------------")?;
            render_stats(self, f)?;
            writeln!(f)?;
            writeln!(f, "--------------------")?;
            render_evolution(self, f)?;
            writeln!(f)?;
            writeln!(f, "--------------------")?;
            render_moves(self, f)?;
        }
        Ok(())
    }
}
