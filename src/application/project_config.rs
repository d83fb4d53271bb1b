//! Project configuration
//!
//! Loaded from `<cwd>/config/index.{toml,json,yaml,yml}`, first match wins.
//! Only `migrations.serverPort` is interpreted here; everything else is
//! passed through to the code generator with its keys as written.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, instrument};

/// Extensions probed next to the config stem, in order.
const EXTENSIONS: &[&str] = &["toml", "json", "yaml", "yml"];

/// Loaded project configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectConfig {
    raw: Value,
}

/// Why the project configuration could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ProjectConfigError {
    #[error("no config file found for {}", .stem.display())]
    NotFound { stem: PathBuf },

    #[error("read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("migrations.serverPort is missing or not a valid port")]
    MissingServerPort,
}

impl ProjectConfig {
    /// Load from `stem` (a path without extension); the format follows the
    /// extension of whichever file exists.
    #[instrument(level = "debug")]
    pub fn load(stem: &Path) -> Result<Self, ProjectConfigError> {
        let (path, ext) = EXTENSIONS
            .iter()
            .map(|ext| (stem.with_extension(ext), *ext))
            .find(|(path, _)| path.is_file())
            .ok_or_else(|| ProjectConfigError::NotFound {
                stem: stem.to_path_buf(),
            })?;

        let content =
            std::fs::read_to_string(&path).map_err(|source| ProjectConfigError::Read {
                path: path.clone(),
                source,
            })?;
        let raw = parse(ext, &content).map_err(|message| ProjectConfigError::Parse {
            path: path.clone(),
            message,
        })?;
        debug!("loaded project config from {}", path.display());
        Ok(Self { raw })
    }

    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    /// `migrations.serverPort`, accepting a number or a numeric string.
    pub fn migrations_server_port(&self) -> Result<u16, ProjectConfigError> {
        let port = self
            .raw
            .pointer("/migrations/serverPort")
            .ok_or(ProjectConfigError::MissingServerPort)?;

        match port {
            Value::Number(n) => n.as_u64().and_then(|p| u16::try_from(p).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
        .ok_or(ProjectConfigError::MissingServerPort)
    }
}

fn parse(ext: &str, content: &str) -> Result<Value, String> {
    match ext {
        "toml" => toml::from_str(content).map_err(|e| e.to_string()),
        "json" => serde_json::from_str(content).map_err(|e| e.to_string()),
        _ => serde_yaml::from_str(content).map_err(|e| e.to_string()),
    }
}
