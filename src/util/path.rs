use std::path::{Component, Path, PathBuf};

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string.
///
/// Falls back to the input when a variable is undefined.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Join `relative` under `base`, lexically.
///
/// Unlike `Path::join`, a leading root in `relative` does not replace `base`:
/// the result always stays rooted at `base`. `.` is dropped and `..` pops a
/// component, but never above `base`'s own root.
pub fn join_under(base: &Path, relative: &str) -> PathBuf {
    let mut out = base.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::ParentDir => {
                out.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    out
}
