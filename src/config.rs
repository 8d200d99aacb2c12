//! Tool configuration, persisted as TOML.
//!
//! Every field has a default, so a partial file (or none at all) is valid.
//! Command-line flags override whatever is loaded here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::paths::{self, PrunePaths};

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
}

/// Defaults for the keyword property search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Case-insensitive keyword matched against property annotations.
    #[serde(default = "default_keyword")]
    pub keyword: String,
    /// Also match IRI local names.
    #[serde(default = "default_true")]
    pub match_iri: bool,
    /// Also match `rdfs:comment` text. Labels are always matched.
    #[serde(default = "default_true")]
    pub match_comments: bool,
}

/// Defaults for module extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Copy annotation triples of module entities into the module.
    #[serde(default = "default_true")]
    pub include_annotations: bool,
}

fn default_keyword() -> String {
    "cause".into()
}
fn default_true() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            keyword: default_keyword(),
            match_iri: true,
            match_comments: true,
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            include_annotations: true,
        }
    }
}

impl PruneConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Save to a TOML file, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit path must load. Otherwise the per-user file is used when
    /// present, and the defaults when it is not (or no home is known).
    pub fn resolve(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let Ok(paths) = PrunePaths::resolve() else {
            return Ok(Self::default());
        };
        Self::load_or_default(&paths.config_file())
    }

    /// Load `path` if it is a file, else return the defaults.
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if paths::is_file(path) {
            tracing::debug!(path = %path.display(), "loading config");
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
