//! Runtime configuration for the data service and display locale.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_SPRITE_URL_TEMPLATE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/{id}.png";
pub const DEFAULT_PLACEHOLDER_SPRITE: &str = "placeholder.png";

/// Ordered language preference used by every localized lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePreference {
    pub primary: String,
    pub fallback: String,
}

impl LanguagePreference {
    pub fn new(primary: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            fallback: fallback.into(),
        }
    }

    /// Preference order, most preferred first.
    pub fn order(&self) -> [&str; 2] {
        [self.primary.as_str(), self.fallback.as_str()]
    }
}

impl Default for LanguagePreference {
    fn default() -> Self {
        Self::new("es", "en")
    }
}

/// Configuration for a Pokedex session.
///
/// Read from a RON file; every field is optional there:
///
/// ```ron
/// (
///     api_base_url: "https://pokeapi.co/api/v2",
///     languages: (primary: "en", fallback: "es"),
///     request_timeout_secs: 5,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PokedexConfig {
    /// Base URL every relative lookup is appended to.
    pub api_base_url: String,
    /// Evolution stage sprites; `{id}` is replaced by the species id.
    pub sprite_url_template: String,
    /// Last entry of every sprite fallback list.
    pub placeholder_sprite: String,
    pub languages: LanguagePreference,
    /// Upper bound on a single request, so a load never hangs.
    pub request_timeout_secs: u64,
}

impl Default for PokedexConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            sprite_url_template: DEFAULT_SPRITE_URL_TEMPLATE.to_string(),
            placeholder_sprite: DEFAULT_PLACEHOLDER_SPRITE.to_string(),
            languages: LanguagePreference::default(),
            request_timeout_secs: 10,
        }
    }
}

impl PokedexConfig {
    /// Load a configuration from a RON file on disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(content)?)
    }

    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_languages(mut self, languages: LanguagePreference) -> Self {
        self.languages = languages;
        self
    }

    /// Makes `language` the primary language. If it was the fallback, the
    /// previous primary becomes the fallback.
    #[must_use]
    pub fn with_primary_language(self, language: impl Into<String>) -> Self {
        let language = language.into();
        if language == self.languages.primary {
            return self;
        }
        let fallback = if self.languages.fallback == language {
            self.languages.primary.clone()
        } else {
            self.languages.fallback.clone()
        };
        self.with_languages(LanguagePreference::new(language, fallback))
    }

    /// Configuration for a binary: the file at `path` if given (defaults
    /// otherwise), then a language override.
    pub fn resolve(path: Option<&Path>, language: Option<&str>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(match language {
            Some(language) => config.with_primary_language(language),
            None => config,
        })
    }

    #[must_use]
    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Sprite URL of an evolution stage.
    pub fn sprite_url(&self, species_id: u16) -> String {
        self.sprite_url_template
            .replace("{id}", &species_id.to_string())
    }
}
