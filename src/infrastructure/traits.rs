//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io;
use std::path::Path;
use std::process::Output;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::domain::GeneratorMethod;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;
}

/// External command runner abstraction.
pub trait CommandRunner: Send + Sync {
    /// Run `cmd` in `cwd`, feed `stdin`, and capture stdout/stderr.
    fn run_with_stdin(
        &self,
        cmd: &Path,
        args: &[&str],
        stdin: &str,
        cwd: &Path,
    ) -> io::Result<Output>;
}

/// Outbound HTTP abstraction.
pub trait HttpClient: Send + Sync {
    /// Issue a GET with `query` appended as a query string.
    /// Returns the response status code; transport failures are `Err`.
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<u16, String>;
}

/// The external code-generation library.
pub trait CodeGenerator: Send + Sync {
    /// Whether the library provides `method` at all.
    fn exposes(&self, method: GeneratorMethod) -> bool;

    /// Whether `method` needs the project configuration.
    fn requires_config(&self, method: GeneratorMethod) -> bool;

    /// Run `method` to completion. `Err` carries the library's failure message.
    fn invoke(
        &self,
        method: GeneratorMethod,
        arguments: &[Option<String>],
        config: Option<&Value>,
    ) -> Result<(), String>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Real command runner implementation.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run_with_stdin(
        &self,
        cmd: &Path,
        args: &[&str],
        stdin: &str,
        cwd: &Path,
    ) -> io::Result<Output> {
        use std::io::Write;
        use std::process::Stdio;

        let mut child = std::process::Command::new(cmd)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Feed stdin from its own thread so a child that writes before it
        // finishes reading cannot fill the output pipes and stall us both.
        let writer = child.stdin.take().map(|mut child_stdin| {
            let input = stdin.to_owned();
            std::thread::spawn(move || child_stdin.write_all(input.as_bytes()))
        });

        let output = child.wait_with_output()?;

        if let Some(writer) = writer {
            let written = writer
                .join()
                .map_err(|_| io::Error::other("stdin writer panicked"))?;
            // A child that never reads its input is not an error.
            match written {
                Err(e) if e.kind() != io::ErrorKind::BrokenPipe => return Err(e),
                _ => {}
            }
        }
        Ok(output)
    }
}

/// Real HTTP client backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::blocking::Client,
}

impl ReqwestHttpClient {
    /// Every request is bounded by `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| reqwest::blocking::Client::new()),
        }
    }
}

impl HttpClient for ReqwestHttpClient {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<u16, String> {
        debug!("GET {} query={:?}", url, query);
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| e.to_string())?;
        Ok(response.status().as_u16())
    }
}
