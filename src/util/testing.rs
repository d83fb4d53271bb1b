//! Shared test helpers: logging setup and project fixtures

use std::path::{Path, PathBuf};
use std::sync::Once;

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

static LOGGING: Once = Once::new();

/// Route `tracing` output to the test harness, once per test binary.
///
/// `RUST_LOG` wins over the `gencli=trace` default.
pub fn init_test_setup() {
    LOGGING.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gencli=trace"));
        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_span_events(FmtSpan::CLOSE)
            .try_init();
        if let Err(e) = installed {
            eprintln!("test logging not installed: {e}");
        }
    });
}

/// Write `<root>/config/<file_name>` and return the config stem (`<root>/config/index`).
///
/// Panics on I/O failure; only for tests.
pub fn write_project_config(root: &Path, file_name: &str, content: &str) -> PathBuf {
    let dir = root.join("config");
    std::fs::create_dir_all(&dir).expect("create config dir");
    std::fs::write(dir.join(file_name), content).expect("write project config");
    dir.join("index")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn given_repeated_calls_when_initializing_then_idempotent() {
        init_test_setup();
        init_test_setup();
    }

    #[test]
    fn given_root_when_writing_project_config_then_returns_stem() {
        let temp = TempDir::new().unwrap();
        let stem = write_project_config(temp.path(), "index.toml", "a = 1\n");
        assert_eq!(stem, temp.path().join("config/index"));
        assert!(temp.path().join("config/index.toml").is_file());
    }
}
