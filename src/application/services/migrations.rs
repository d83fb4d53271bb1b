//! Migrations dispatch
//!
//! Forwards a `migrations <task>` invocation to the project's migrations
//! server as `GET http://<host>:<serverPort>/<task>?<arguments>`.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::DispatchRequest;
use crate::application::project_config::{ProjectConfig, ProjectConfigError};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{build_arguments, MethodKey, MigrationTask};
use crate::infrastructure::traits::HttpClient;

/// Service for dispatch path B.
pub struct MigrationsService {
    http: Arc<dyn HttpClient>,
    host: String,
    project_config: PathBuf,
}

impl MigrationsService {
    pub fn new(http: Arc<dyn HttpClient>, host: impl Into<String>, project_config: PathBuf) -> Self {
        Self {
            http,
            host: host.into(),
            project_config,
        }
    }

    #[instrument(level = "debug", skip(self), fields(sub_command = %request.invocation.sub_command))]
    pub fn run(&self, request: &DispatchRequest) -> ApplicationResult<()> {
        let task = MigrationTask::parse(&request.invocation.sub_command)?;
        let key = MethodKey::Migration(task);

        let port = ProjectConfig::load(&self.project_config)
            .and_then(|config| config.migrations_server_port())
            .map_err(|e| missing_config(key, request, e))?;

        let arguments = build_arguments(key, &request.flags, &request.working_dir)?;

        let url = format!("http://{}:{}/{}", self.host, port, task);
        debug!("migrations request: {} {:?}", url, arguments.query_pairs());

        let status = self
            .http
            .get(&url, &arguments.query_pairs())
            .map_err(|message| ApplicationError::Transport { message })?;
        if status != 200 {
            return Err(ApplicationError::UnexpectedStatus { code: status });
        }

        info!("{} completed", task);
        Ok(())
    }

}

fn missing_config(key: MethodKey, request: &DispatchRequest, e: ProjectConfigError) -> ApplicationError {
    ApplicationError::MissingProjectConfig {
        sub_command: request.invocation.sub_command.clone(),
        module: key.module(),
        source: Box::new(e),
    }
}
