//! Argument resolution against the schema table
//!
//! One resolved structure, two projections: positional (what the code
//! generator receives) and query pairs (what the migrations server receives).

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, instrument};

use super::error::DomainError;
use super::schema::{schema_for, ArgDefault, ArgSpec, MethodKey};
use crate::util::path::join_under;

/// One argument after defaults and path resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArgument {
    pub name: &'static str,
    /// `None` for an omitted optional argument.
    pub value: Option<String>,
}

/// Resolved Argument Set, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArguments {
    pub key: MethodKey,
    pub arguments: Vec<ResolvedArgument>,
}

impl ResolvedArguments {
    /// Array form: one slot per spec, `None` as the absent placeholder.
    pub fn positional(&self) -> Vec<Option<String>> {
        self.arguments.iter().map(|a| a.value.clone()).collect()
    }

    /// Object form for a query string: absent optionals are omitted.
    pub fn query_pairs(&self) -> Vec<(&str, &str)> {
        self.arguments
            .iter()
            .filter_map(|a| a.value.as_deref().map(|v| (a.name, v)))
            .collect()
    }
}

/// Build the argument set for `key` from parsed flags.
///
/// Fails on the first required argument that is neither supplied nor
/// defaulted; nothing is returned for a partial set.
#[instrument(level = "debug", skip(flags))]
pub fn build_arguments(
    key: MethodKey,
    flags: &BTreeMap<String, String>,
    cwd: &Path,
) -> Result<ResolvedArguments, DomainError> {
    let arguments = schema_for(key)
        .iter()
        .map(|spec| resolve_one(spec, flags, cwd))
        .collect::<Result<Vec<_>, _>>()?;
    debug!("resolved {} argument(s) for {}", arguments.len(), key.name());
    Ok(ResolvedArguments { key, arguments })
}

fn resolve_one(
    spec: &ArgSpec,
    flags: &BTreeMap<String, String>,
    cwd: &Path,
) -> Result<ResolvedArgument, DomainError> {
    let value = match (flags.get(spec.name), spec.default) {
        (Some(given), _) if spec.add_cwd => Some(path_string(&join_under(cwd, given))),
        (Some(given), _) => Some(given.clone()),
        (None, Some(ArgDefault::WorkingDir)) => Some(path_string(cwd)),
        (None, Some(ArgDefault::Path(p))) if spec.add_cwd => {
            Some(path_string(&join_under(cwd, p)))
        }
        (None, Some(ArgDefault::Path(p))) => Some(p.to_string()),
        (None, None) if spec.is_required() => {
            return Err(DomainError::MissingRequiredArgument {
                name: spec.name.to_string(),
            })
        }
        (None, None) => None,
    };
    Ok(ResolvedArgument {
        name: spec.name,
        value,
    })
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::command::{GeneratorMethod, MigrationTask};
    use std::path::PathBuf;

    fn flags(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn cwd() -> PathBuf {
        PathBuf::from("/work/project")
    }

    #[test]
    fn given_no_output_path_when_resolving_images_redirect_then_uses_cwd_default() {
        let key = MethodKey::Generator(GeneratorMethod::GenerateImagesRedirectNginxConfig);
        let resolved = build_arguments(key, &flags(&[]), &cwd()).unwrap();
        assert_eq!(
            resolved.positional(),
            vec![Some("/work/project/config/nginx".to_string())]
        );
    }

    #[test]
    fn given_relative_output_path_when_resolving_then_joined_onto_cwd() {
        let key = MethodKey::Generator(GeneratorMethod::GenerateImagesRedirectNginxConfig);
        let resolved =
            build_arguments(key, &flags(&[("outputPath", "test/config/nginx")]), &cwd()).unwrap();
        assert_eq!(
            resolved.positional(),
            vec![Some("/work/project/test/config/nginx".to_string())]
        );
    }

    #[test]
    fn given_blank_project_without_flags_when_resolving_then_cwd_and_absent_profile() {
        let key = MethodKey::Generator(GeneratorMethod::GenerateBlankProject);
        let resolved = build_arguments(key, &flags(&[]), &cwd()).unwrap();
        assert_eq!(
            resolved.positional(),
            vec![Some("/work/project".to_string()), None]
        );
    }

    #[test]
    fn given_blank_project_output_path_when_resolving_then_kept_verbatim() {
        let key = MethodKey::Generator(GeneratorMethod::GenerateBlankProject);
        let resolved = build_arguments(
            key,
            &flags(&[("outputPath", "test"), ("configProfile", "local")]),
            &cwd(),
        )
        .unwrap();
        assert_eq!(
            resolved.positional(),
            vec![Some("test".to_string()), Some("local".to_string())]
        );
    }

    #[test]
    fn given_missing_required_when_resolving_then_names_argument() {
        let key = MethodKey::Generator(GeneratorMethod::GenerateLayoutFile);
        let err = build_arguments(key, &flags(&[("configProfile", "local")]), &cwd()).unwrap_err();
        assert_eq!(
            err,
            DomainError::MissingRequiredArgument {
                name: "outputPath".into()
            }
        );
        assert_eq!(err.to_string(), "Missing required argument \"outputPath\".");
    }

    #[test]
    fn given_unrelated_flags_when_resolving_then_ignored() {
        let key = MethodKey::Generator(GeneratorMethod::BuildLayoutFile);
        let resolved = build_arguments(
            key,
            &flags(&[("clientModuleName", "site"), ("verbose", "true")]),
            &cwd(),
        )
        .unwrap();
        assert_eq!(resolved.positional(), vec![Some("site".to_string())]);
    }

    #[test]
    fn given_seed_with_file_only_when_projecting_then_absent_kept_positionally_but_not_in_query() {
        let key = MethodKey::Migration(MigrationTask::Seed);
        let resolved = build_arguments(key, &flags(&[("seedFile", "base")]), &cwd()).unwrap();

        assert_eq!(resolved.positional(), vec![None, Some("base".to_string())]);
        assert_eq!(resolved.query_pairs(), vec![("seedFile", "base")]);
    }

    #[test]
    fn given_sync_when_resolving_then_empty_set() {
        let key = MethodKey::Migration(MigrationTask::Sync);
        let resolved = build_arguments(key, &flags(&[("x", "y")]), &cwd()).unwrap();
        assert!(resolved.arguments.is_empty());
        assert!(resolved.query_pairs().is_empty());
    }
}
