//! The editor shell.
//!
//! [`Shell`] owns the layout engine, the open documents, the output
//! surfaces, and the session store, and mutates them only through the
//! synchronous [`Action`] dispatch in [`Shell::handle`]. Frontends translate
//! toolkit events (menu items, shortcuts, panel header buttons) into actions
//! and read state back through the accessors; none of them get to mutate
//! shell state directly.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::compiler::{self, Phase};
use crate::layout::{DocumentArea, DocumentBuffer, Layout, Options, PanelId, RegionId};
use crate::session::{KvStore, Session, SessionStore};

mod analysis;
mod console;
mod editor;
mod explorer;
mod host;
pub mod repl;

pub use analysis::{AnalysisOutputs, AnalysisTab};
pub use console::{ConsoleOutputs, OutputLog};
pub use editor::EditorBuffer;
pub use explorer::RootFolders;
pub use host::{LayoutHost, NullHost};

/// Embedded example program, opened when a session restores no documents.
const EXAMPLE_PROGRAM: &str = "\
// Skuld hello world

gate {
    dmail(\"El Psy Kongroo\");
}
";

/// A user-initiated command, dispatched synchronously.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    NewFile,
    OpenFile(PathBuf),
    OpenFolder(PathBuf),
    CloseActiveFile,
    CloseSlot(usize),
    ActivateSlot(usize),
    SaveFile,
    SaveFileAs(PathBuf),
    TogglePanel(PanelId),
    ShowPanel(PanelId),
    ClosePanel(PanelId),
    ToggleMinimize(PanelId),
    FitLayoutToContent,
    RunPhase(Phase),
    ClearOutputs,
}

pub struct Shell<S> {
    config: steiner_config::Config,
    layout: Layout,
    docs: DocumentArea<EditorBuffer>,
    console: ConsoleOutputs,
    analysis: AnalysisOutputs,
    folders: RootFolders,
    session: SessionStore<S>,
}

impl<S: KvStore> Shell<S> {
    pub fn new(config: steiner_config::Config, store: S) -> Self {
        let layout = Layout::new(Options::from_config(&config.layout));
        Self {
            config,
            layout,
            docs: DocumentArea::new(),
            console: ConsoleOutputs::new(),
            analysis: AnalysisOutputs::new(),
            folders: RootFolders::default(),
            session: SessionStore::new(store),
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn docs(&self) -> &DocumentArea<EditorBuffer> {
        &self.docs
    }

    pub fn docs_mut(&mut self) -> &mut DocumentArea<EditorBuffer> {
        &mut self.docs
    }

    pub fn console(&self) -> &ConsoleOutputs {
        &self.console
    }

    pub fn analysis(&self) -> &AnalysisOutputs {
        &self.analysis
    }

    pub fn folders(&self) -> &RootFolders {
        &self.folders
    }

    #[cfg(test)]
    pub(crate) fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    /// Dispatches one action. Every transition either completes or degrades
    /// to a logged no-op; nothing here panics on bad input.
    pub fn handle(&mut self, action: Action) {
        match action {
            Action::NewFile => self.new_file(false),
            Action::OpenFile(path) => self.open_path(&path, true),
            Action::OpenFolder(path) => self.open_folder(&path),
            Action::CloseActiveFile => {
                if let Some(slot) = self.docs.active_index() {
                    self.docs.close_slot(slot);
                    self.console.append_console("File closed.");
                }
            }
            Action::CloseSlot(slot) => self.docs.close_slot(slot),
            Action::ActivateSlot(slot) => {
                self.docs.activate(slot);
            }
            Action::SaveFile => self.save_active(),
            Action::SaveFileAs(path) => self.save_active_as(&path),
            Action::TogglePanel(panel) => self.layout.toggle_panel(panel),
            Action::ShowPanel(panel) => self.layout.show_panel(panel),
            Action::ClosePanel(panel) => self.layout.hide_panel(panel),
            Action::ToggleMinimize(panel) => self.layout.toggle_minimize(panel),
            Action::FitLayoutToContent => self.fit_layout_to_content(),
            Action::RunPhase(phase) => self.run_phase(phase),
            Action::ClearOutputs => {
                self.analysis.clear_all();
                self.console.clear_all();
            }
        }
    }

    /// Reports a host drag-resize of a split region.
    pub fn region_resized(&mut self, region: RegionId, sizes: &[u32]) {
        self.layout.set_region_sizes(region, sizes);
    }

    fn new_file(&mut self, with_example: bool) {
        let buffer = if with_example {
            EditorBuffer::from_text(EXAMPLE_PROGRAM)
        } else {
            EditorBuffer::default()
        };
        self.docs.new_untitled(buffer);
        self.console.append_console("New file created.");
    }

    /// Opens `path`, reusing an existing tab when the file is already open.
    /// Decoding and I/O failures surface as error text; no tab is created.
    pub fn open_path(&mut self, path: &Path, log: bool) {
        if !path.is_file() {
            self.console
                .append_errors(&format!("Cannot open {}: no such file.", path.display()));
            return;
        }

        let name = display_name(path);

        if let Some(slot) = self.docs.find(path) {
            self.docs.activate(slot);
            if log {
                self.console.append_console(&format!("File opened: {name}"));
            }
            return;
        }

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::InvalidData => {
                warn!("refusing to open {path:?}: not valid UTF-8");
                self.console
                    .append_errors(&format!("Cannot open {name}: the file is not UTF-8."));
                return;
            }
            Err(err) => {
                warn!("error opening {path:?}: {err}");
                self.console
                    .append_errors(&format!("Cannot open {name}: {err}"));
                return;
            }
        };

        self.docs.open(path, EditorBuffer::from_text(&text));
        if log {
            self.console.append_console(&format!("File opened: {name}"));
        }
    }

    fn open_folder(&mut self, path: &Path) {
        if self.folders.add(path) {
            self.console
                .append_console(&format!("Folder added: {}", display_name(path)));
        } else {
            self.console
                .append_errors(&format!("Cannot add folder {}.", path.display()));
        }
    }

    fn save_active(&mut self) {
        let Some(doc) = self.docs.active() else {
            return;
        };
        let Some(path) = doc.path().map(Path::to_path_buf) else {
            self.console
                .append_errors("The document has no file yet; use save-as with a path.");
            return;
        };
        self.write_active_to(&path, false);
    }

    fn save_active_as(&mut self, path: &Path) {
        if self.docs.active().is_none() {
            return;
        }
        self.write_active_to(path, true);
    }

    fn write_active_to(&mut self, path: &Path, rebind: bool) {
        let Some(doc) = self.docs.active_mut() else {
            return;
        };

        if let Err(err) = fs::write(path, doc.buffer().text()) {
            warn!("error saving {path:?}: {err}");
            self.console
                .append_errors(&format!("Cannot save {}: {err}", path.display()));
            return;
        }

        if rebind {
            doc.bind_path(path);
        }
        self.console
            .append_console(&format!("File saved: {}", display_name(path)));
    }

    fn run_phase(&mut self, phase: Phase) {
        let Some(doc) = self.docs.active() else {
            return;
        };
        let Some(path) = doc.path().map(Path::to_path_buf) else {
            self.console
                .append_errors("Save the document to a file before compiling.");
            return;
        };

        // The compiler reads from disk, so persist the buffer first.
        self.write_active_to(&path, false);

        let output = match compiler::run_phase(&self.config.compiler, phase, &path) {
            Ok(output) => output,
            Err(err) => {
                self.console.append_errors(&format!("{err:#}"));
                return;
            }
        };

        if !output.success {
            let message = if output.stderr.is_empty() {
                "Error running the compiler.".to_owned()
            } else {
                output.stderr
            };
            self.console.append_errors(&message);
            return;
        }

        let text = if output.stdout.is_empty() {
            "(no output)".to_owned()
        } else {
            output.stdout
        };

        match AnalysisTab::for_phase(phase) {
            Some(tab) => self.analysis.set(tab, text),
            None => self.console.append_execution(&text),
        }

        self.console
            .append_console(&format!("Phase executed: {}", phase.name()));
    }

    /// Widens (or narrows) the document area to the widest open document.
    fn fit_layout_to_content(&mut self) {
        let widest = self
            .docs
            .iter()
            .map(|doc| {
                let buffer = doc.buffer();
                (buffer.max_line_width(), buffer.gutter_width())
            })
            .max_by_key(|(content, gutter)| content + gutter)
            .unwrap_or((0, 0));

        self.layout.fit_document_area(widest.0, widest.1);
    }

    /// Status line data: active document and 1-based cursor position.
    pub fn status_line(&self) -> String {
        match self.docs.active() {
            Some(doc) => {
                let (line, column) = doc.buffer().cursor();
                format!("{} · line {line}, col {column}", doc.title())
            }
            None => "No file".to_owned(),
        }
    }

    /// Pushes the full engine state to a host toolkit.
    pub fn sync_host(&self, host: &mut impl LayoutHost) {
        for region in [RegionId::Top, RegionId::Main] {
            host.apply_region_sizes(region, self.layout.region(region).sizes());
        }
        for panel in PanelId::ALL {
            host.apply_panel_visible(panel, self.layout.visibility(panel).is_visible());
        }
    }

    /// Replays the stored session, then guarantees a non-empty document
    /// area: with nothing restored, a bootstrap document with the example
    /// program is opened and becomes active.
    pub fn restore_session(&mut self) {
        let session = self.session.load();

        self.folders.set(&session.folders);

        for path in &session.open_files {
            if path.is_file() {
                self.open_path(path, false);
            }
        }

        if let Some(active) = &session.active_file {
            if let Some(slot) = self.docs.find(active) {
                self.docs.activate(slot);
            }
        }

        if !session.top_sizes.is_empty() {
            self.layout.set_region_sizes(RegionId::Top, &session.top_sizes);
        }
        if !session.main_sizes.is_empty() {
            self.layout.set_region_sizes(RegionId::Main, &session.main_sizes);
        }

        for panel in PanelId::ALL {
            self.layout
                .restore_visibility(panel, session.panel_state(panel).visibility());
        }

        if self.docs.is_empty() {
            self.new_file(true);
        }
    }

    /// Captures and persists the session. Called once, at shutdown.
    pub fn save_session(&mut self) -> anyhow::Result<()> {
        let session = Session::capture(&self.layout, &self.docs, self.folders.paths());
        self.session.save(&session)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
