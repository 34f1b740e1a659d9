//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/brokerhub/brokerhub.toml`
//! 3. Environment variables: `BROKERHUB_*` prefix
//! 4. Command line overrides (applied by the CLI layer)

use std::path::PathBuf;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, ApplicationResult};

/// Application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the JSON table files
    pub data_dir: PathBuf,
    /// Directory holding uploaded document files
    pub uploads_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        let base = ProjectDirs::from("com", "brokerhub", "brokerhub")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".brokerhub"));
        Self {
            uploads_dir: base.join("uploads"),
            data_dir: base,
        }
    }
}

impl Settings {
    /// Load settings with layered precedence.
    pub fn load() -> ApplicationResult<Self> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("data_dir", defaults.data_dir.to_string_lossy().to_string())
            .map_err(config_err)?
            .set_default(
                "uploads_dir",
                defaults.uploads_dir.to_string_lossy().to_string(),
            )
            .map_err(config_err)?;

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                builder = builder.add_source(File::from(path));
            }
        }

        builder = builder.add_source(Environment::with_prefix("BROKERHUB"));

        builder
            .build()
            .map_err(config_err)?
            .try_deserialize()
            .map_err(config_err)
    }

    /// Path of the global config file, if a home directory can be found.
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "brokerhub", "brokerhub")
            .map(|dirs| dirs.config_dir().join("brokerhub.toml"))
    }

    /// TOML template with the compiled defaults, for `config init`.
    pub fn template() -> ApplicationResult<String> {
        let body = toml::to_string_pretty(&Settings::default()).map_err(|e| {
            ApplicationError::Config {
                message: e.to_string(),
            }
        })?;
        Ok(format!(
            "# brokerhub configuration\n# Values can also be set via BROKERHUB_* environment variables.\n{body}"
        ))
    }
}

fn config_err(e: config::ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_sources_when_loading_then_defaults_apply() {
        let settings = Settings::default();
        assert_eq!(settings.uploads_dir, settings.data_dir.join("uploads"));
    }

    #[test]
    fn given_template_when_rendering_then_it_parses_back() {
        let template = Settings::template().unwrap();
        let parsed: Settings = toml::from_str(&template).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}
