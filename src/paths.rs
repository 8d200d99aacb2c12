//! XDG-compliant path resolution for causal-prune.
//!
//! Only the configuration directory is needed: the tool keeps no data or
//! state between runs.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Name of the per-user configuration directory.
const APP_DIR: &str = "causal-prune";

/// Name of the configuration file inside it.
pub const CONFIG_FILE: &str = "config.toml";

/// Global directories for causal-prune.
#[derive(Debug, Clone)]
pub struct PrunePaths {
    /// `$XDG_CONFIG_HOME/causal-prune/`
    pub config_dir: PathBuf,
}

impl PrunePaths {
    /// Resolve directories from the environment with the standard fallbacks.
    pub fn resolve() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var_os("HOME").map(PathBuf::from),
            std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        )
    }

    /// Resolve from explicit `HOME` / `XDG_CONFIG_HOME` values.
    ///
    /// An empty `XDG_CONFIG_HOME` counts as unset.
    pub fn from_vars(
        home: Option<PathBuf>,
        xdg_config: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let base = match xdg_config.filter(|p| !p.as_os_str().is_empty()) {
            Some(dir) => dir,
            None => home.ok_or(ConfigError::NoHome)?.join(".config"),
        };
        Ok(Self {
            config_dir: base.join(APP_DIR),
        })
    }

    /// `$XDG_CONFIG_HOME/causal-prune/config.toml`
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }
}

/// Whether `path` exists and is a regular file.
pub(crate) fn is_file(path: &Path) -> bool {
    path.metadata().map(|m| m.is_file()).unwrap_or(false)
}
