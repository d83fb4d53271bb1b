//! Argument Schema Table
//!
//! Declares, per method, the ordered flags the method accepts. Read-only;
//! consumed by [`super::resolver::build_arguments`].

use super::command::{GeneratorMethod, MigrationTask, Module};

/// Default applied when a flag is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgDefault {
    /// The process working directory itself.
    WorkingDir,
    /// A path; joined under the working directory when the spec has `add_cwd`.
    Path(&'static str),
}

/// Declarative description of one expected flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgSpec {
    pub name: &'static str,
    pub optional: bool,
    pub default: Option<ArgDefault>,
    pub add_cwd: bool,
}

impl ArgSpec {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            optional: false,
            default: None,
            add_cwd: false,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            optional: true,
            ..Self::required(name)
        }
    }

    pub const fn with_default(self, default: ArgDefault) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    pub const fn cwd_relative(self) -> Self {
        Self {
            add_cwd: true,
            ..self
        }
    }

    /// A defaulted argument is implicitly optional.
    pub fn is_required(&self) -> bool {
        !self.optional && self.default.is_none()
    }
}

/// Key into the schema table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKey {
    Generator(GeneratorMethod),
    Migration(MigrationTask),
}

impl MethodKey {
    pub fn module(self) -> Module {
        match self {
            MethodKey::Generator(_) => Module::CodeGenerator,
            MethodKey::Migration(_) => Module::Migrations,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MethodKey::Generator(m) => m.as_str(),
            MethodKey::Migration(t) => t.as_str(),
        }
    }
}

const BUILD_LAYOUT_FILE: &[ArgSpec] = &[ArgSpec::required("clientModuleName")];

const GENERATE_IMAGES_REDIRECT_NGINX_CONFIG: &[ArgSpec] = &[ArgSpec::required("outputPath")
    .with_default(ArgDefault::Path("config/nginx"))
    .cwd_relative()];

const GENERATE_NGINX_CONFIG: &[ArgSpec] = &[ArgSpec::required("clientModuleName")];

const GENERATE_LAYOUT_FILE: &[ArgSpec] = &[
    ArgSpec::required("outputPath").cwd_relative(),
    ArgSpec::optional("configProfile"),
];

const GENERATE_PROJECT: &[ArgSpec] = &[
    ArgSpec::required("outputPath").with_default(ArgDefault::WorkingDir),
    ArgSpec::optional("configProfile"),
];

const SEED: &[ArgSpec] = &[ArgSpec::optional("seedFolder"), ArgSpec::optional("seedFile")];

const GENERATE_SEED: &[ArgSpec] = &[ArgSpec::optional("seedFile")];

const INSERT_STATIC_DATA: &[ArgSpec] = &[ArgSpec::optional("fileName")];

/// Ordered argument specs for a method.
pub fn schema_for(key: MethodKey) -> &'static [ArgSpec] {
    match key {
        MethodKey::Generator(method) => match method {
            GeneratorMethod::BuildLayoutFile => BUILD_LAYOUT_FILE,
            GeneratorMethod::GenerateImagesRedirectNginxConfig => {
                GENERATE_IMAGES_REDIRECT_NGINX_CONFIG
            }
            GeneratorMethod::GenerateNginxConfig => GENERATE_NGINX_CONFIG,
            GeneratorMethod::GenerateLayoutFile => GENERATE_LAYOUT_FILE,
            GeneratorMethod::GenerateBlankProject | GeneratorMethod::GenerateBasicProject => {
                GENERATE_PROJECT
            }
        },
        MethodKey::Migration(task) => match task {
            MigrationTask::Seed => SEED,
            MigrationTask::Sync | MigrationTask::GenerateBackup => &[],
            MigrationTask::GenerateSeed => GENERATE_SEED,
            MigrationTask::InsertStaticData => INSERT_STATIC_DATA,
        },
    }
}
