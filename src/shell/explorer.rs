//! Workspace root folders shown by the file explorer.
//!
//! The tree widget itself is presentation; the shell only tracks which
//! folders are roots. Enumerating their contents is the host's job.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::utils::resolve_path;

/// Ordered set of root folders, deduplicated by resolved path in
/// first-added order.
#[derive(Debug, Default)]
pub struct RootFolders {
    folders: Vec<PathBuf>,
}

impl RootFolders {
    /// Adds a root folder. Non-directories and duplicates are ignored;
    /// returns whether the folder was added.
    pub fn add(&mut self, path: &Path) -> bool {
        if !path.is_dir() {
            debug!("not adding root folder {path:?}: not a directory");
            return false;
        }

        let resolved = resolve_path(path);
        if self.folders.contains(&resolved) {
            return false;
        }

        self.folders.push(resolved);
        true
    }

    /// Replaces the root set, silently skipping folders that no longer
    /// exist.
    pub fn set(&mut self, paths: &[PathBuf]) {
        self.folders.clear();
        for path in paths {
            self.add(path);
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.folders
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}
