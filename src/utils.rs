//! Small helpers shared across the crate.

use std::env;
use std::path::{Component, Path, PathBuf};

pub fn version() -> String {
    format!("steiner {}", env!("CARGO_PKG_VERSION"))
}

/// Resolve a path to a stable absolute form for identity comparisons.
///
/// Canonicalizes when the path exists; otherwise absolutizes against the
/// current directory and normalizes `.` and `..` lexically, so differently
/// spelled paths to the same file still compare equal.
pub fn resolve_path(path: &Path) -> PathBuf {
    if let Ok(resolved) = path.canonicalize() {
        return resolved;
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => (),
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}
