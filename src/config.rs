//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/catval/catval.toml`
//! 3. Local config: `--config <file>`, else `./.catval.toml` if present
//! 4. Environment variables: `CATVAL__*` (e.g. `CATVAL__VALIDATION__CASCADE=stop`)

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::value::{self, StrDeserializer};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{CascadeMode, ValidatorOptions};

/// Name of the local config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".catval.toml";

/// How validation results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `path: message` line per failure
    #[default]
    Text,
    /// Serialized validation result
    Json,
}

/// Validation rule settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Per-field rule chain behavior
    pub cascade: CascadeMode,
    /// Maximum length of name fields (unset: no limit)
    pub max_name_length: Option<usize>,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
    /// Colored terminal output (NO_COLOR is honoured regardless)
    pub color: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
        }
    }
}

/// Raw settings for intermediate parsing (every field optional to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub validation: RawValidationSettings,
    pub output: RawOutputSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawValidationSettings {
    pub cascade: Option<CascadeMode>,
    pub max_name_length: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawOutputSettings {
    pub format: Option<OutputFormat>,
    pub color: Option<bool>,
}

/// Unified configuration for catval.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub validation: ValidationSettings,
    pub output: OutputSettings,
}

/// Get the XDG config directory for catval.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "catval").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("catval.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a path argument.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay scalars from a raw layer; unspecified fields keep their value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            validation: ValidationSettings {
                cascade: overlay
                    .validation
                    .cascade
                    .unwrap_or(self.validation.cascade),
                max_name_length: overlay
                    .validation
                    .max_name_length
                    .or(self.validation.max_name_length),
            },
            output: OutputSettings {
                format: overlay.output.format.unwrap_or(self.output.format),
                color: overlay.output.color.unwrap_or(self.output.color),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Explicit local config file; must exist if given. Without it,
    ///   `./.catval.toml` is used when present.
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path();
        Self::load_from(global.as_deref(), local, None)
    }

    /// Layered loading with every source injectable.
    ///
    /// `env` replaces the process environment when given.
    pub fn load_from(
        global: Option<&Path>,
        local: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Local config
        match local {
            Some(path) => {
                let path = expand_path(path);
                if !path.is_file() {
                    return Err(ApplicationError::Config {
                        message: format!("config file not found: {}", path.display()),
                    });
                }
                debug!("local config: {}", path.display());
                current = current.merge_with(&load_raw_settings(&path)?);
            }
            None => {
                let path = Path::new(LOCAL_CONFIG_FILE);
                if path.is_file() {
                    debug!("local config: {}", path.display());
                    current = current.merge_with(&load_raw_settings(path)?);
                }
            }
        }

        // 4. Environment variables (explicit override)
        Self::apply_env_overrides(current, env)
    }

    /// Apply CATVAL__* environment variables as explicit overrides.
    fn apply_env_overrides(
        mut settings: Self,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let builder = Config::builder().add_source(
            Environment::with_prefix("CATVAL")
                .separator("__")
                .source(env),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("validation.cascade") {
            settings.validation.cascade = parse_value("validation.cascade", &val)?;
        }
        if let Ok(val) = config.get_string("validation.max_name_length") {
            let max = val.parse::<usize>().map_err(|e| ApplicationError::Config {
                message: format!("validation.max_name_length: {}: {}", val, e),
            })?;
            settings.validation.max_name_length = Some(max);
        }
        if let Ok(val) = config.get_string("output.format") {
            settings.output.format = parse_value("output.format", &val)?;
        }
        if let Ok(val) = config.get_string("output.color") {
            settings.output.color = val.parse::<bool>().map_err(|e| ApplicationError::Config {
                message: format!("output.color: {}: {}", val, e),
            })?;
        }

        Ok(settings)
    }

    /// Options handed to the validator.
    pub fn validator_options(&self) -> ValidatorOptions {
        ValidatorOptions {
            cascade: self.validation.cascade,
            max_name_length: self.validation.max_name_length,
        }
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }
}

/// Parse a lowercase enum value the same way the TOML layers do.
fn parse_value<T: DeserializeOwned>(key: &str, val: &str) -> Result<T, ApplicationError> {
    let lowered = val.to_lowercase();
    T::deserialize(StrDeserializer::<value::Error>::new(&lowered)).map_err(|e| {
        ApplicationError::Config {
            message: format!("{}: {}", key, e),
        }
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn given_no_sources_when_loading_then_uses_defaults() {
        let settings = Settings::load_from(None, None, env(&[])).expect("load defaults");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.validator_options(), ValidatorOptions::default());
    }

    #[test]
    fn given_env_overrides_when_loading_then_replace_defaults() {
        let settings = Settings::load_from(
            None,
            None,
            env(&[
                ("CATVAL__VALIDATION__CASCADE", "Stop"),
                ("CATVAL__VALIDATION__MAX_NAME_LENGTH", "12"),
                ("CATVAL__OUTPUT__FORMAT", "json"),
                ("CATVAL__OUTPUT__COLOR", "false"),
            ]),
        )
        .expect("load with env");

        assert_eq!(settings.validation.cascade, CascadeMode::Stop);
        assert_eq!(settings.validation.max_name_length, Some(12));
        assert_eq!(settings.output.format, OutputFormat::Json);
        assert!(!settings.output.color);
    }

    #[test]
    fn given_bad_env_value_when_loading_then_config_error() {
        let err = Settings::load_from(
            None,
            None,
            env(&[("CATVAL__VALIDATION__CASCADE", "sometimes")]),
        )
        .unwrap_err();
        assert!(matches!(err, ApplicationError::Config { .. }));
    }

    #[test]
    fn given_settings_when_serialized_then_round_trips_through_raw_layer() {
        let settings = Settings {
            validation: ValidationSettings {
                cascade: CascadeMode::Stop,
                max_name_length: Some(5),
            },
            output: OutputSettings::default(),
        };

        let raw: RawSettings = toml::from_str(&settings.to_toml().unwrap()).unwrap();

        assert_eq!(Settings::default().merge_with(&raw), settings);
    }
}
