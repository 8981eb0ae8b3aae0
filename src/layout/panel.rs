//! Dockable side panels and their visibility state.

use std::fmt;

use super::split::RegionId;

/// Identity of a dockable side panel.
///
/// The set is fixed: one file explorer, one analysis tab stack, one console.
/// Panels live for the whole process; only their visibility changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Explorer,
    Analysis,
    Console,
}

impl PanelId {
    pub const ALL: [PanelId; 3] = [PanelId::Explorer, PanelId::Analysis, PanelId::Console];

    pub fn title(self) -> &'static str {
        match self {
            PanelId::Explorer => "File Explorer",
            PanelId::Analysis => "Analyzers",
            PanelId::Console => "Terminal",
        }
    }

    /// Region hosting this panel and the slot index it occupies there.
    pub fn slot(self) -> (RegionId, usize) {
        match self {
            PanelId::Explorer => (RegionId::Top, 0),
            PanelId::Analysis => (RegionId::Top, 2),
            PanelId::Console => (RegionId::Main, 1),
        }
    }

    fn index(self) -> usize {
        match self {
            PanelId::Explorer => 0,
            PanelId::Analysis => 1,
            PanelId::Console => 2,
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PanelId::Explorer => "explorer",
            PanelId::Analysis => "analysis",
            PanelId::Console => "console",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
    Minimized,
}

impl Visibility {
    pub fn is_visible(self) -> bool {
        self == Visibility::Visible
    }
}

/// One dockable panel.
#[derive(Debug)]
pub struct Panel {
    id: PanelId,
    title: String,
    visibility: Visibility,
    /// Full size vector of the owning region, captured when the panel was
    /// hidden.
    ///
    /// A full snapshot rather than the panel's own entry: restoring it
    /// brings back the sibling proportions too.
    pub(super) pre_hide_sizes: Option<Vec<u32>>,
    /// Full size vector of the owning region, captured when the panel was
    /// minimized.
    pub(super) pre_minimize_sizes: Option<Vec<u32>>,
}

impl Panel {
    fn new(id: PanelId) -> Self {
        Self {
            id,
            title: id.title().to_owned(),
            visibility: Visibility::Visible,
            pre_hide_sizes: None,
            pre_minimize_sizes: None,
        }
    }

    pub fn id(&self) -> PanelId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub(super) fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }
}

/// Fixed registry of the three dockable panels.
#[derive(Debug)]
pub struct PanelRegistry {
    panels: [Panel; 3],
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self {
            panels: PanelId::ALL.map(Panel::new),
        }
    }

    pub fn get(&self, id: PanelId) -> &Panel {
        &self.panels[id.index()]
    }

    pub(super) fn get_mut(&mut self, id: PanelId) -> &mut Panel {
        &mut self.panels[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Panel> + '_ {
        self.panels.iter()
    }
}
