//! Document tabs in the central document area.

use std::path::{Path, PathBuf};

use crate::utils::resolve_path;

/// Content provider for a document slot.
///
/// The layout core never reads buffer contents for its own logic; it tracks
/// slot assignment and path identity, and consults the measurement methods
/// only for fit-to-content. The shell's editor widget implements this; tests
/// substitute a trivial buffer.
pub trait DocumentBuffer: Default {
    fn text(&self) -> String;

    fn set_text(&mut self, text: &str);

    /// 1-based cursor position as (line, column).
    fn cursor(&self) -> (u32, u32);

    /// Width of the widest line, in abstract width units.
    fn max_line_width(&self) -> u32;

    /// Width of the line-number gutter, in the same units.
    fn gutter_width(&self) -> u32;
}

/// One open document.
#[derive(Debug)]
pub struct Document<B> {
    /// Backing file, resolved to an absolute path. `None` for an unsaved
    /// untitled document.
    path: Option<PathBuf>,
    title: String,
    buffer: B,
}

impl<B> Document<B> {
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut B {
        &mut self.buffer
    }

    /// Binds an untitled document to a file (save-as), updating the title.
    pub fn bind_path(&mut self, path: &Path) {
        let resolved = resolve_path(path);
        self.title = display_title(&resolved);
        self.path = Some(resolved);
    }
}

fn display_title(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// The open documents of the central area, in tab order.
///
/// Documents are unique per resolved path: opening an already-open path
/// activates the existing slot instead of creating a second one. Once the
/// first document exists, the list never becomes empty again; closing the
/// last slot synthesizes a fresh untitled document.
#[derive(Debug)]
pub struct DocumentArea<B> {
    documents: Vec<Document<B>>,
    active: usize,
    /// Next untitled display number. Monotonic for the whole process, never
    /// reused even when earlier untitled documents are closed.
    untitled_counter: u64,
}

impl<B: DocumentBuffer> DocumentArea<B> {
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            active: 0,
            untitled_counter: 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document<B>> + '_ {
        self.documents.iter()
    }

    pub fn active_index(&self) -> Option<usize> {
        (!self.documents.is_empty()).then_some(self.active)
    }

    pub fn active(&self) -> Option<&Document<B>> {
        self.documents.get(self.active)
    }

    pub fn active_mut(&mut self) -> Option<&mut Document<B>> {
        self.documents.get_mut(self.active)
    }

    pub fn active_path(&self) -> Option<&Path> {
        self.active().and_then(Document::path)
    }

    /// Slot currently holding `path`, if it is open.
    pub fn find(&self, path: &Path) -> Option<usize> {
        let resolved = resolve_path(path);
        self.documents
            .iter()
            .position(|doc| doc.path.as_deref() == Some(resolved.as_path()))
    }

    pub fn activate(&mut self, slot: usize) -> bool {
        if slot >= self.documents.len() {
            return false;
        }
        self.active = slot;
        true
    }

    /// Opens `path` with the given buffer and activates it.
    ///
    /// When the resolved path is already open, the existing slot is
    /// activated instead and `buffer` is discarded. Returns the slot index.
    pub fn open(&mut self, path: &Path, buffer: B) -> usize {
        if let Some(slot) = self.find(path) {
            self.active = slot;
            return slot;
        }

        let resolved = resolve_path(path);
        self.documents.push(Document {
            title: display_title(&resolved),
            path: Some(resolved),
            buffer,
        });
        self.active = self.documents.len() - 1;
        self.active
    }

    /// Creates a new untitled document and activates it.
    pub fn new_untitled(&mut self, buffer: B) -> usize {
        let title = format!("Untitled {}", self.untitled_counter);
        self.untitled_counter += 1;

        self.documents.push(Document {
            path: None,
            title,
            buffer,
        });
        self.active = self.documents.len() - 1;
        self.active
    }

    /// Closes the slot at `index`.
    ///
    /// Closing the last remaining slot immediately synthesizes a fresh
    /// untitled document so the area never shows zero tabs.
    pub fn close_slot(&mut self, index: usize) {
        if index >= self.documents.len() {
            return;
        }

        self.documents.remove(index);

        if self.documents.is_empty() {
            self.new_untitled(B::default());
            return;
        }

        if index < self.active {
            self.active -= 1;
        } else {
            self.active = self.active.min(self.documents.len() - 1);
        }
    }

    #[cfg(test)]
    pub(crate) fn verify_invariants(&self) {
        if !self.documents.is_empty() {
            assert!(
                self.active < self.documents.len(),
                "active slot {} out of bounds ({} documents)",
                self.active,
                self.documents.len(),
            );
        }

        let mut seen = Vec::new();
        for doc in &self.documents {
            if let Some(path) = doc.path() {
                assert!(
                    !seen.contains(&path),
                    "duplicate document for path {path:?}",
                );
                seen.push(path);
            }
        }
    }
}
