use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The eighteen elemental types a creature (and a type filter) can carry.
///
/// Parsing is case-insensitive and accepts the service's lowercase names,
/// so `"Water".parse::<PokemonType>()` and `"water".parse()` both succeed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum PokemonType {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
    Fairy,
}

impl PokemonType {
    /// Path segment used by the `/type/{name}` endpoint.
    pub fn api_name(self) -> &'static str {
        self.into()
    }

    pub fn english_name(self) -> &'static str {
        use PokemonType::*;

        match self {
            Normal => "Normal",
            Fighting => "Fighting",
            Flying => "Flying",
            Poison => "Poison",
            Ground => "Ground",
            Rock => "Rock",
            Bug => "Bug",
            Ghost => "Ghost",
            Steel => "Steel",
            Fire => "Fire",
            Water => "Water",
            Grass => "Grass",
            Electric => "Electric",
            Psychic => "Psychic",
            Ice => "Ice",
            Dragon => "Dragon",
            Dark => "Dark",
            Fairy => "Fairy",
        }
    }

    pub fn spanish_name(self) -> &'static str {
        use PokemonType::*;

        match self {
            Normal => "Normal",
            Fighting => "Lucha",
            Flying => "Volador",
            Poison => "Veneno",
            Ground => "Tierra",
            Rock => "Roca",
            Bug => "Bicho",
            Ghost => "Fantasma",
            Steel => "Acero",
            Fire => "Fuego",
            Water => "Agua",
            Grass => "Planta",
            Electric => "Eléctrico",
            Psychic => "Psíquico",
            Ice => "Hielo",
            Dragon => "Dragón",
            Dark => "Siniestro",
            Fairy => "Hada",
        }
    }

    /// Display name for the given language code. Only Spanish has its own
    /// table; every other language gets the English name.
    pub fn display_name(self, language: &str) -> &'static str {
        match language {
            "es" => self.spanish_name(),
            _ => self.english_name(),
        }
    }
}

/// Translates a raw type name as served by the API. Names outside the
/// eighteen known types (e.g. `"stellar"`) are returned unchanged.
pub fn type_label(raw: &str, language: &str) -> String {
    match raw.parse::<PokemonType>() {
        Ok(kind) => kind.display_name(language).to_string(),
        Err(_) => raw.to_string(),
    }
}
