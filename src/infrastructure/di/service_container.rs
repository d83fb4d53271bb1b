//! Service container for dependency injection
//!
//! Wires up both dispatch services with their dependencies.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{GeneratorService, MigrationsService};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::generator::{GeneratorLibrary, ProcessCodeGenerator};
use crate::infrastructure::traits::{
    CodeGenerator, CommandRunner, FileSystem, HttpClient, RealCommandRunner, RealFileSystem,
    ReqwestHttpClient,
};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Directory every relative path is resolved against
    pub working_dir: PathBuf,

    pub generator: GeneratorService,
    pub migrations: MigrationsService,
}

impl ServiceContainer {
    /// Create a container with real implementations.
    ///
    /// Fails with `LibraryNotFound` when the generation library is missing
    /// from `working_dir`.
    pub fn new(settings: &Settings, working_dir: PathBuf) -> ApplicationResult<Self> {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        let cmd: Arc<dyn CommandRunner> = Arc::new(RealCommandRunner);

        let library = GeneratorLibrary::locate(fs.as_ref(), &settings.library_root(&working_dir))?;
        let generator: Arc<dyn CodeGenerator> = Arc::new(ProcessCodeGenerator::new(
            library,
            cmd,
            working_dir.clone(),
        ));
        let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new(Duration::from_secs(
            settings.migrations.timeout_secs,
        )));

        Ok(Self::with_deps(settings, working_dir, generator, http))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: &Settings,
        working_dir: PathBuf,
        generator: Arc<dyn CodeGenerator>,
        http: Arc<dyn HttpClient>,
    ) -> Self {
        let project_config = settings.project_config_stem(&working_dir);
        let generator = GeneratorService::new(generator, project_config.clone());
        let migrations =
            MigrationsService::new(http, settings.migrations.host.clone(), project_config);

        Self {
            working_dir,
            generator,
            migrations,
        }
    }
}
