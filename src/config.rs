//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/gencli/gencli.toml`
//! 3. Environment variables: `GENCLI_*` prefix (`__` separates sections)
//!
//! These are the dispatcher's own settings. The *project* configuration that
//! sub-commands need is loaded separately, see
//! [`crate::application::project_config`].

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::util::path::expand_env_vars;

/// Where to find the code-generation library.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Library directory, relative to the working directory
    pub library_dir: PathBuf,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            library_dir: PathBuf::from("node_modules/ramster"),
        }
    }
}

/// How to reach the migrations server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MigrationsSettings {
    /// Host of the migrations server; the port comes from the project config
    pub host: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for MigrationsSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            timeout_secs: 30,
        }
    }
}

/// Raw settings for intermediate parsing (`None` = not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub project_config: Option<PathBuf>,
    pub generator: RawGeneratorSettings,
    pub migrations: RawMigrationsSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawGeneratorSettings {
    pub library_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawMigrationsSettings {
    pub host: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Unified configuration for gencli.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Project config location without extension, relative to the working directory
    pub project_config: PathBuf,
    pub generator: GeneratorSettings,
    pub migrations: MigrationsSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_config: PathBuf::from("config/index"),
            generator: GeneratorSettings::default(),
            migrations: MigrationsSettings::default(),
        }
    }
}

/// Get the XDG config directory for gencli.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "gencli").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("gencli.toml"))
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
    /// Library directory resolved against `working_dir`.
    pub fn library_root(&self, working_dir: &Path) -> PathBuf {
        working_dir.join(&self.generator.library_dir)
    }

    /// Project config stem resolved against `working_dir`.
    pub fn project_config_stem(&self, working_dir: &Path) -> PathBuf {
        working_dir.join(&self.project_config)
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        self.project_config =
            PathBuf::from(expand_env_vars(self.project_config.to_string_lossy().as_ref()));
        self.generator.library_dir = PathBuf::from(expand_env_vars(
            self.generator.library_dir.to_string_lossy().as_ref(),
        ));
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            project_config: overlay
                .project_config
                .clone()
                .unwrap_or_else(|| self.project_config.clone()),
            generator: GeneratorSettings {
                library_dir: overlay
                    .generator
                    .library_dir
                    .clone()
                    .unwrap_or_else(|| self.generator.library_dir.clone()),
            },
            migrations: MigrationsSettings {
                host: overlay
                    .migrations
                    .host
                    .clone()
                    .unwrap_or_else(|| self.migrations.host.clone()),
                timeout_secs: overlay
                    .migrations
                    .timeout_secs
                    .unwrap_or(self.migrations.timeout_secs),
            },
        }
    }

    /// Load settings with layered precedence.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings using `global_path` in place of the XDG location.
    pub fn load_from(global_path: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_path {
            if global_path.exists() {
                let raw = load_raw_settings(global_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply GENCLI_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("GENCLI").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("project_config") {
            settings.project_config = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("generator.library_dir") {
            settings.generator.library_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("migrations.host") {
            settings.migrations.host = val;
        }
        if let Ok(val) = config.get_string("migrations.timeout_secs") {
            settings.migrations.timeout_secs = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("GENCLI_MIGRATIONS__TIMEOUT_SECS: {e}"),
            })?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
