//! Process-backed code generator
//!
//! The generation library lives inside the project (by default
//! `node_modules/ramster`) and describes itself with a `codegen.json`
//! manifest. Each method call runs the library's entrypoint once:
//!
//! ```text
//! <library>/<entrypoint> <methodName>   < {"method": ..., "arguments": [...], "config": ...}
//! ```
//!
//! Exit status 0 means success; otherwise stderr is the failure message.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::GeneratorMethod;
use crate::infrastructure::traits::{CodeGenerator, CommandRunner, FileSystem};

/// Manifest file name inside the library directory.
pub const MANIFEST_FILE: &str = "codegen.json";

fn default_entrypoint() -> PathBuf {
    PathBuf::from("bin/codegen")
}

/// Contents of `codegen.json`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LibraryManifest {
    /// Executable, relative to the library directory
    #[serde(default = "default_entrypoint")]
    pub entrypoint: PathBuf,
    /// Exposed method names; `None` exposes every known method
    #[serde(default)]
    pub methods: Option<Vec<String>>,
    /// Methods that need the project configuration
    #[serde(default)]
    pub config_required_for_methods: Vec<String>,
}

/// A located generation library.
#[derive(Debug, Clone)]
pub struct GeneratorLibrary {
    pub root: PathBuf,
    pub manifest: LibraryManifest,
}

impl GeneratorLibrary {
    /// Find the library at `root` and read its manifest.
    ///
    /// A missing directory or manifest is `LibraryNotFound`; an unreadable
    /// manifest is a config error.
    #[instrument(level = "debug", skip(fs))]
    pub fn locate(fs: &dyn FileSystem, root: &Path) -> ApplicationResult<Self> {
        let manifest_path = root.join(MANIFEST_FILE);
        if !fs.is_dir(root) || !fs.is_file(&manifest_path) {
            return Err(ApplicationError::LibraryNotFound(root.to_path_buf()));
        }

        let content = fs
            .read_to_string(&manifest_path)
            .map_err(|e| ApplicationError::Config {
                message: format!("read {}: {}", manifest_path.display(), e),
            })?;
        let manifest: LibraryManifest =
            serde_json::from_str(&content).map_err(|e| ApplicationError::Config {
                message: format!("parse {}: {}", manifest_path.display(), e),
            })?;
        debug!("library manifest: {:?}", manifest);

        Ok(Self {
            root: root.to_path_buf(),
            manifest,
        })
    }

    pub fn entrypoint(&self) -> PathBuf {
        self.root.join(&self.manifest.entrypoint)
    }
}

#[derive(Serialize)]
struct GeneratorRequest<'a> {
    method: &'a str,
    arguments: &'a [Option<String>],
    config: Option<&'a Value>,
}

/// [`CodeGenerator`] that shells out to the library entrypoint.
pub struct ProcessCodeGenerator {
    library: GeneratorLibrary,
    cmd: Arc<dyn CommandRunner>,
    working_dir: PathBuf,
}

impl ProcessCodeGenerator {
    pub fn new(library: GeneratorLibrary, cmd: Arc<dyn CommandRunner>, working_dir: PathBuf) -> Self {
        Self {
            library,
            cmd,
            working_dir,
        }
    }
}

impl CodeGenerator for ProcessCodeGenerator {
    fn exposes(&self, method: GeneratorMethod) -> bool {
        match &self.library.manifest.methods {
            Some(methods) => methods.iter().any(|m| m == method.as_str()),
            None => true,
        }
    }

    fn requires_config(&self, method: GeneratorMethod) -> bool {
        self.library
            .manifest
            .config_required_for_methods
            .iter()
            .any(|m| m == method.as_str())
    }

    fn invoke(
        &self,
        method: GeneratorMethod,
        arguments: &[Option<String>],
        config: Option<&Value>,
    ) -> Result<(), String> {
        let request = serde_json::to_string(&GeneratorRequest {
            method: method.as_str(),
            arguments,
            config,
        })
        .map_err(|e| e.to_string())?;

        let entrypoint = self.library.entrypoint();
        debug!("invoke: {} {}", entrypoint.display(), method);
        let output = self
            .cmd
            .run_with_stdin(&entrypoint, &[method.as_str()], &request, &self.working_dir)
            .map_err(|e| format!("failed to run {}: {}", entrypoint.display(), e))?;

        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if stderr.is_empty() {
            Err(match output.status.code() {
                Some(code) => format!("exited with status {code}"),
                None => "terminated by signal".to_string(),
            })
        } else {
            Err(stderr)
        }
    }
}
