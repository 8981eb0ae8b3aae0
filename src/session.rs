//! Session persistence.
//!
//! The panel arrangement and the open-document set survive restarts. Live
//! state is snapshotted into a [`Session`] at shutdown and written to a
//! key-value store, one key per field; at startup the stored session is read
//! back and replayed through the engine's setter methods.
//!
//! Restore never fails outright: every field degrades individually to its
//! default when missing or malformed, and paths that no longer exist on disk
//! are skipped silently, since session data legitimately drifts from disk
//! between runs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::layout::{DocumentArea, DocumentBuffer, Layout, PanelId, RegionId, Visibility};

const KEY_FOLDERS: &str = "session/folders";
const KEY_OPEN_FILES: &str = "session/open_files";
const KEY_ACTIVE_FILE: &str = "session/active_file";
const KEY_TOP_SIZES: &str = "session/top_splitter_sizes";
const KEY_MAIN_SIZES: &str = "session/main_splitter_sizes";

fn key_visible(panel: PanelId) -> String {
    format!("session/{panel}_visible")
}

fn key_minimized(panel: PanelId) -> String {
    format!("session/{panel}_minimized")
}

/// Opaque persistent key-value store.
///
/// Writes are buffered until [`KvStore::sync`].
pub trait KvStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value);
    fn sync(&mut self) -> anyhow::Result<()>;
}

/// In-memory store, used by tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemStore {
    values: BTreeMap<String, Value>,
}

#[cfg(test)]
impl KvStore for MemStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_owned(), value);
    }

    fn sync(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Store backed by a single JSON document on disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl FileStore {
    /// Loads the store at `path`. A missing file starts empty; a corrupt one
    /// is discarded with a warning rather than failing startup.
    pub fn load(path: PathBuf) -> Self {
        let values = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(values) => values,
                Err(err) => {
                    warn!("discarding corrupt session store at {path:?}: {err}");
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };

        Self { path, values }
    }

    /// Default store location under the user's local data directory.
    pub fn default_path() -> Option<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "steiner")?;
        Some(dirs.data_local_dir().join("session.json"))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_owned(), value);
    }

    fn sync(&mut self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("error creating {parent:?}"))?;
        }

        let contents = serde_json::to_string_pretty(&self.values).unwrap();
        fs::write(&self.path, contents)
            .with_context(|| format!("error writing session store to {:?}", self.path))?;

        debug!("session store written to {:?}", self.path);
        Ok(())
    }
}

/// Stored visibility of one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelState {
    pub visible: bool,
    pub minimized: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            visible: true,
            minimized: false,
        }
    }
}

impl PanelState {
    fn of(visibility: Visibility) -> Self {
        // A minimized panel's container is effectively invisible, and that is
        // what the store records.
        Self {
            visible: visibility.is_visible(),
            minimized: visibility == Visibility::Minimized,
        }
    }

    pub fn visibility(self) -> Visibility {
        if self.minimized {
            Visibility::Minimized
        } else if self.visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    }
}

/// Snapshot of layout and open-document state across restarts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub folders: Vec<PathBuf>,
    pub open_files: Vec<PathBuf>,
    pub active_file: Option<PathBuf>,
    pub explorer: PanelState,
    pub analysis: PanelState,
    pub console: PanelState,
    /// Stored region size vectors; empty means "keep engine defaults".
    pub top_sizes: Vec<u32>,
    pub main_sizes: Vec<u32>,
}

impl Session {
    /// Captures a session from live state.
    ///
    /// Open files are filtered down to paths that still exist, so stale
    /// entries don't accumulate in the store.
    pub fn capture<B: DocumentBuffer>(
        layout: &Layout,
        docs: &DocumentArea<B>,
        folders: &[PathBuf],
    ) -> Self {
        let open_files: Vec<PathBuf> = docs
            .iter()
            .filter_map(|doc| doc.path())
            .filter(|path| path.is_file())
            .map(Path::to_path_buf)
            .collect();

        let active_file = docs
            .active_path()
            .filter(|path| path.is_file())
            .map(Path::to_path_buf);

        Self {
            folders: folders.to_vec(),
            open_files,
            active_file,
            explorer: PanelState::of(layout.visibility(PanelId::Explorer)),
            analysis: PanelState::of(layout.visibility(PanelId::Analysis)),
            console: PanelState::of(layout.visibility(PanelId::Console)),
            top_sizes: layout.region(RegionId::Top).sizes().to_vec(),
            main_sizes: layout.region(RegionId::Main).sizes().to_vec(),
        }
    }

    pub fn panel_state(&self, panel: PanelId) -> PanelState {
        match panel {
            PanelId::Explorer => self.explorer,
            PanelId::Analysis => self.analysis,
            PanelId::Console => self.console,
        }
    }

    fn write_to(&self, store: &mut impl KvStore) {
        store.set(KEY_FOLDERS, json!(path_strings(&self.folders)));
        store.set(KEY_OPEN_FILES, json!(path_strings(&self.open_files)));
        store.set(
            KEY_ACTIVE_FILE,
            json!(self
                .active_file
                .as_deref()
                .map(|path| path.to_string_lossy())
                .unwrap_or_default()),
        );

        for panel in PanelId::ALL {
            let state = self.panel_state(panel);
            store.set(&key_visible(panel), json!(state.visible));
            store.set(&key_minimized(panel), json!(state.minimized));
        }

        store.set(KEY_TOP_SIZES, json!(self.top_sizes));
        store.set(KEY_MAIN_SIZES, json!(self.main_sizes));
    }

    /// Reads a session, defaulting every missing or malformed field
    /// individually.
    fn read_from(store: &impl KvStore) -> Self {
        let defaults = Self::default();

        let panel = |id: PanelId| PanelState {
            visible: store
                .get(&key_visible(id))
                .and_then(|v| v.as_bool())
                .unwrap_or(true),
            minimized: store
                .get(&key_minimized(id))
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
        };

        Self {
            folders: path_list(store.get(KEY_FOLDERS)),
            open_files: path_list(store.get(KEY_OPEN_FILES)),
            active_file: store
                .get(KEY_ACTIVE_FILE)
                .as_ref()
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            explorer: panel(PanelId::Explorer),
            analysis: panel(PanelId::Analysis),
            console: panel(PanelId::Console),
            top_sizes: size_list(store.get(KEY_TOP_SIZES)).unwrap_or(defaults.top_sizes),
            main_sizes: size_list(store.get(KEY_MAIN_SIZES)).unwrap_or(defaults.main_sizes),
        }
    }
}

fn path_strings(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|path| path.to_string_lossy().into_owned())
        .collect()
}

fn path_list(value: Option<Value>) -> Vec<PathBuf> {
    value
        .and_then(|v| serde_json::from_value::<Vec<String>>(v).ok())
        .unwrap_or_default()
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .collect()
}

fn size_list(value: Option<Value>) -> Option<Vec<u32>> {
    value.and_then(|v| serde_json::from_value(v).ok())
}

/// Reads live state into the store on save and hands back the stored
/// [`Session`] on load; the shell replays it through engine setters.
///
/// Constructed once at startup and passed by reference to whoever needs
/// save or restore.
#[derive(Debug)]
pub struct SessionStore<S> {
    store: S,
}

impl<S: KvStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn save(&mut self, session: &Session) -> anyhow::Result<()> {
        session.write_to(&mut self.store);
        self.store.sync()
    }

    pub fn load(&self) -> Session {
        Session::read_from(&self.store)
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }
}
