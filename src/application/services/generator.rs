//! Code generation dispatch
//!
//! Resolves a `generate`/`build` invocation to a generator method, loads the
//! project config when the library asks for it, and runs the method once.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::DispatchRequest;
use crate::application::project_config::ProjectConfig;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{build_arguments, DomainError, GeneratorMethod, MethodKey};
use crate::infrastructure::traits::CodeGenerator;

/// Service for dispatch path A.
pub struct GeneratorService {
    generator: Arc<dyn CodeGenerator>,
    project_config: PathBuf,
}

impl GeneratorService {
    /// `project_config` is the config stem (path without extension).
    pub fn new(generator: Arc<dyn CodeGenerator>, project_config: PathBuf) -> Self {
        Self {
            generator,
            project_config,
        }
    }

    #[instrument(level = "debug", skip(self), fields(sub_command = %request.invocation.sub_command))]
    pub fn run(&self, request: &DispatchRequest) -> ApplicationResult<()> {
        let method = GeneratorMethod::resolve(&request.invocation)?;
        if !self.generator.exposes(method) {
            return Err(DomainError::UnknownSubCommand {
                module: request.invocation.command.module(),
                sub_command: request.invocation.sub_command.clone(),
            }
            .into());
        }

        let key = MethodKey::Generator(method);
        let config = if self.generator.requires_config(method) {
            let config = ProjectConfig::load(&self.project_config).map_err(|e| {
                ApplicationError::MissingProjectConfig {
                    sub_command: request.invocation.sub_command.clone(),
                    module: key.module(),
                    source: Box::new(e),
                }
            })?;
            Some(config)
        } else {
            None
        };

        let arguments = build_arguments(key, &request.flags, &request.working_dir)?.positional();
        debug!("{} arguments: {:?}", method, arguments);

        self.generator
            .invoke(method, &arguments, config.as_ref().map(ProjectConfig::as_value))
            .map_err(|message| ApplicationError::GeneratorFailed { message })?;

        info!("{} completed", method);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::write_project_config;
    use crate::domain::Command;
    use serde_json::Value;
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use tempfile::TempDir;

    type Call = (GeneratorMethod, Vec<Option<String>>, Option<Value>);

    /// In-memory generator that records every invocation.
    #[derive(Default)]
    struct FakeGenerator {
        hidden: Vec<GeneratorMethod>,
        needs_config: Vec<GeneratorMethod>,
        failure: Option<String>,
        calls: Mutex<Vec<Call>>,
    }

    impl CodeGenerator for FakeGenerator {
        fn exposes(&self, method: GeneratorMethod) -> bool {
            !self.hidden.contains(&method)
        }

        fn requires_config(&self, method: GeneratorMethod) -> bool {
            self.needs_config.contains(&method)
        }

        fn invoke(
            &self,
            method: GeneratorMethod,
            arguments: &[Option<String>],
            config: Option<&Value>,
        ) -> Result<(), String> {
            self.calls
                .lock()
                .unwrap()
                .push((method, arguments.to_vec(), config.cloned()));
            match &self.failure {
                Some(msg) => Err(msg.clone()),
                None => Ok(()),
            }
        }
    }

    fn request(command: Command, sub: &str, flags: &[(&str, &str)], wd: &TempDir) -> DispatchRequest {
        DispatchRequest {
            invocation: crate::domain::Invocation {
                command,
                sub_command: sub.to_string(),
            },
            flags: flags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
            working_dir: wd.path().to_path_buf(),
        }
    }

    fn service(gen: Arc<FakeGenerator>, wd: &TempDir) -> GeneratorService {
        GeneratorService::new(gen, wd.path().join("config/index"))
    }

    #[test]
    fn given_unknown_sub_command_when_running_then_unknown_and_not_invoked() {
        let wd = TempDir::new().unwrap();
        let gen = Arc::new(FakeGenerator::default());
        let err = service(gen.clone(), &wd)
            .run(&request(Command::Generate, "invalidSubCommand", &[], &wd))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid codeGenerator subCommand - \"invalidSubCommand\"."
        );
        assert!(gen.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn given_method_hidden_by_library_when_running_then_unknown() {
        let wd = TempDir::new().unwrap();
        let gen = Arc::new(FakeGenerator {
            hidden: vec![GeneratorMethod::GenerateBasicProject],
            ..Default::default()
        });
        let err = service(gen, &wd)
            .run(&request(Command::Generate, "basicProject", &[], &wd))
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::UnknownSubCommand { .. })
        ));
    }

    #[test]
    fn given_config_required_and_absent_when_running_then_missing_project_config() {
        let wd = TempDir::new().unwrap();
        let gen = Arc::new(FakeGenerator {
            needs_config: vec![GeneratorMethod::BuildLayoutFile],
            ..Default::default()
        });
        let err = service(gen.clone(), &wd)
            .run(&request(Command::Build, "layoutFile", &[], &wd))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not find a valid config in this directory when loading ./config/index. \
             A project config is required for executing the \"layoutFile\" codeGenerator subCommand. \
             Please run this command from the project root directory."
        );
        assert!(gen.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn given_config_present_but_argument_missing_when_running_then_missing_argument() {
        let wd = TempDir::new().unwrap();
        write_project_config(wd.path(), "index.json", r#"{"name": "demo"}"#);
        let gen = Arc::new(FakeGenerator {
            needs_config: vec![GeneratorMethod::BuildLayoutFile],
            ..Default::default()
        });
        let err = service(gen, &wd)
            .run(&request(Command::Build, "layoutFile", &[], &wd))
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing required argument \"clientModuleName\".");
    }

    #[test]
    fn given_config_required_and_present_when_running_then_passes_config() {
        let wd = TempDir::new().unwrap();
        write_project_config(wd.path(), "index.json", r#"{"name": "demo"}"#);
        let gen = Arc::new(FakeGenerator {
            needs_config: vec![GeneratorMethod::BuildLayoutFile],
            ..Default::default()
        });

        service(gen.clone(), &wd)
            .run(&request(
                Command::Build,
                "layoutFile",
                &[("clientModuleName", "site")],
                &wd,
            ))
            .unwrap();

        let calls = gen.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, GeneratorMethod::BuildLayoutFile);
        assert_eq!(calls[0].1, vec![Some("site".to_string())]);
        assert_eq!(calls[0].2.as_ref().unwrap()["name"], "demo");
    }

    #[test]
    fn given_config_not_required_when_running_then_no_config_passed() {
        let wd = TempDir::new().unwrap();
        let gen = Arc::new(FakeGenerator::default());
        service(gen.clone(), &wd)
            .run(&request(
                Command::Generate,
                "layoutFile",
                &[("outputPath", "test/clients/site")],
                &wd,
            ))
            .unwrap();

        let calls = gen.calls.lock().unwrap();
        let expected = wd.path().join("test/clients/site");
        assert_eq!(
            calls[0].1,
            vec![Some(expected.to_string_lossy().into_owned()), None]
        );
        assert!(calls[0].2.is_none());
    }

    #[test]
    fn given_generator_failure_when_running_then_message_verbatim() {
        let wd = TempDir::new().unwrap();
        let gen = Arc::new(FakeGenerator {
            failure: Some("template not found".into()),
            ..Default::default()
        });
        let err = service(gen, &wd)
            .run(&request(Command::Generate, "blankProject", &[], &wd))
            .unwrap_err();
        assert_eq!(err.to_string(), "template not found");
    }
}
