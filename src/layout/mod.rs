//! Dockable panel layout engine.
//!
//! Tracks which side panels are visible, hidden, or minimized, and keeps the
//! proportional sizes of the two split regions consistent across those
//! transitions. The top region holds the explorer, the document area, and
//! the analysis tabs side by side; the main region stacks the top region
//! above the console.
//!
//! Hiding or minimizing a panel snapshots the owning region's whole size
//! vector, so the opposite transition restores sibling proportions exactly.
//! When a remembered vector would bring a panel back at or below the
//! visibility floor, the slot's default size is substituted instead.
//!
//! Sizes are abstract integer weights. Mapping weights to pixels, and
//! actually showing or hiding widgets, is the host toolkit's job; the engine
//! is purely a state machine over panels and regions.

use tracing::debug;

mod panel;
mod split;
mod tabs;
#[cfg(test)]
mod tests;

pub use panel::{Panel, PanelId, PanelRegistry, Visibility};
pub use split::{RegionId, SlotId, SplitRegion};
pub use tabs::{Document, DocumentArea, DocumentBuffer};

/// Margin added on top of the measured content width by fit-to-content.
const FIT_MARGIN: u32 = 80;

/// Bounds for the fitted document area width.
const FIT_MIN_WIDTH: u32 = 420;
const FIT_MAX_WIDTH: u32 = 1600;

/// Layout tunables, derived from the config.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub explorer_width: u32,
    pub document_width: u32,
    pub analysis_width: u32,
    pub top_height: u32,
    pub console_height: u32,
    /// Restored slot sizes at or below this weight get the slot's default
    /// substituted instead.
    pub visibility_floor: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self::from_config(&steiner_config::Layout::default())
    }
}

impl Options {
    pub fn from_config(config: &steiner_config::Layout) -> Self {
        Self {
            explorer_width: config.explorer_width,
            document_width: config.document_width,
            analysis_width: config.analysis_width,
            top_height: config.top_height,
            console_height: config.console_height,
            visibility_floor: config.visibility_floor,
        }
    }

    /// Default size vector for a region.
    pub fn default_sizes(&self, region: RegionId) -> Vec<u32> {
        match region {
            RegionId::Top => vec![
                self.explorer_width,
                self.document_width,
                self.analysis_width,
            ],
            RegionId::Main => vec![self.top_height, self.console_height],
        }
    }
}

/// The layout engine: exclusive owner of the panels and both split regions.
#[derive(Debug)]
pub struct Layout {
    panels: PanelRegistry,
    top: SplitRegion,
    main: SplitRegion,
    options: Options,
}

impl Layout {
    pub fn new(options: Options) -> Self {
        let top = SplitRegion::new(RegionId::Top, options.default_sizes(RegionId::Top));
        let main = SplitRegion::new(RegionId::Main, options.default_sizes(RegionId::Main));
        Self {
            panels: PanelRegistry::new(),
            top,
            main,
            options,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn visibility(&self, id: PanelId) -> Visibility {
        self.panels.get(id).visibility()
    }

    pub fn panels(&self) -> impl Iterator<Item = &Panel> + '_ {
        self.panels.iter()
    }

    pub fn region(&self, id: RegionId) -> &SplitRegion {
        match id {
            RegionId::Top => &self.top,
            RegionId::Main => &self.main,
        }
    }

    fn region_mut(&mut self, id: RegionId) -> &mut SplitRegion {
        match id {
            RegionId::Top => &mut self.top,
            RegionId::Main => &mut self.main,
        }
    }

    /// Applies a live drag-resize reported by the host.
    ///
    /// The vector is taken verbatim: explicit user intent wins over
    /// remembered defaults, so no floor or default substitution happens
    /// here. Length-mismatched input is rejected, and slots of non-visible
    /// panels stay at zero weight even if the host reports otherwise.
    pub fn set_region_sizes(&mut self, id: RegionId, sizes: &[u32]) {
        if self.region_mut(id).set_sizes(sizes.to_vec()) {
            self.enforce_collapsed(id);
        }
    }

    /// Re-collapses the slots of non-visible panels in `region`.
    ///
    /// Applied after every whole-vector write: a stored or remembered vector
    /// may predate the hide of a sibling panel.
    fn enforce_collapsed(&mut self, region: RegionId) {
        for panel in PanelId::ALL {
            let (region_id, slot) = panel.slot();
            if region_id == region && !self.visibility(panel).is_visible() {
                self.region_mut(region)
                    .collapse_into(slot, region.main_content_slot());
            }
        }
    }

    /// Shows a hidden or minimized panel, restoring the remembered region
    /// sizes.
    pub fn show_panel(&mut self, id: PanelId) {
        let panel = self.panels.get_mut(id);
        let remembered = match panel.visibility() {
            Visibility::Visible => return,
            Visibility::Hidden => panel.pre_hide_sizes.take(),
            Visibility::Minimized => panel.pre_minimize_sizes.take(),
        };
        panel.set_visibility(Visibility::Visible);
        debug!("showing {id}");

        self.apply_remembered(id, remembered);
    }

    /// Hides a panel: the slot stays in the region at weight zero and the
    /// main content absorbs the freed weight.
    pub fn hide_panel(&mut self, id: PanelId) {
        let (region_id, slot) = id.slot();

        match self.panels.get(id).visibility() {
            Visibility::Hidden => (),
            Visibility::Visible => {
                let snapshot = self.region(region_id).sizes().to_vec();
                self.region_mut(region_id)
                    .collapse_into(slot, region_id.main_content_slot());

                let panel = self.panels.get_mut(id);
                panel.pre_hide_sizes = Some(snapshot);
                panel.set_visibility(Visibility::Hidden);
                debug!("hiding {id}");
            }
            Visibility::Minimized => {
                // The slot is already collapsed; the snapshot from before the
                // minimize is the meaningful restore point.
                let panel = self.panels.get_mut(id);
                panel.pre_hide_sizes = panel.pre_minimize_sizes.take();
                panel.set_visibility(Visibility::Hidden);
                debug!("hiding minimized {id}");
            }
        }
    }

    /// Collapses a visible panel, remembering the current sizes for the
    /// matching restore.
    ///
    /// Minimizing a hidden panel is a no-op; callers show the panel first.
    pub fn minimize_panel(&mut self, id: PanelId) {
        if self.panels.get(id).visibility() != Visibility::Visible {
            return;
        }

        let (region_id, slot) = id.slot();
        let snapshot = self.region(region_id).sizes().to_vec();
        self.region_mut(region_id)
            .collapse_into(slot, region_id.main_content_slot());

        let panel = self.panels.get_mut(id);
        panel.pre_minimize_sizes = Some(snapshot);
        panel.set_visibility(Visibility::Minimized);
        debug!("minimizing {id}");
    }

    /// Hidden ⇄ Visible. A minimized panel counts as not visible, so the
    /// toggle restores it.
    pub fn toggle_panel(&mut self, id: PanelId) {
        if self.visibility(id).is_visible() {
            self.hide_panel(id);
        } else {
            self.show_panel(id);
        }
    }

    /// Visible ⇄ Minimized. No-op while the panel is hidden.
    pub fn toggle_minimize(&mut self, id: PanelId) {
        match self.visibility(id) {
            Visibility::Hidden => (),
            Visibility::Visible => self.minimize_panel(id),
            Visibility::Minimized => self.show_panel(id),
        }
    }

    /// Applies a visibility state directly, without size bookkeeping.
    ///
    /// Used by session restore, where the region sizes arrive separately:
    /// only the invariant that non-visible slots stay at zero weight is
    /// enforced on top of the stored vectors.
    pub fn restore_visibility(&mut self, id: PanelId, visibility: Visibility) {
        let (region_id, slot) = id.slot();

        let panel = self.panels.get_mut(id);
        panel.set_visibility(visibility);
        // Remembered vectors from before the restore are meaningless now.
        panel.pre_hide_sizes = None;
        panel.pre_minimize_sizes = None;

        if !visibility.is_visible() && self.region(region_id).size(slot) != 0 {
            self.region_mut(region_id)
                .collapse_into(slot, region_id.main_content_slot());
        }
    }

    /// Re-derives the top region around a desired document-area width of
    /// `content_width + gutter_width` plus a fixed margin, clamped to a sane
    /// range. Slots of non-visible panels stay at zero.
    pub fn fit_document_area(&mut self, content_width: u32, gutter_width: u32) {
        let desired = content_width
            .saturating_add(gutter_width)
            .saturating_add(FIT_MARGIN)
            .clamp(FIT_MIN_WIDTH, FIT_MAX_WIDTH);

        let floor = self.options.visibility_floor;
        let defaults = self.options.default_sizes(RegionId::Top);
        let current = self.top.sizes();

        let side = |slot: usize, visible: bool| {
            if !visible {
                0
            } else if current[slot] > floor {
                current[slot]
            } else {
                defaults[slot]
            }
        };

        let left = side(0, self.visibility(PanelId::Explorer).is_visible());
        let right = side(2, self.visibility(PanelId::Analysis).is_visible());

        debug!("fitting document area to width {desired}");
        self.top.set_sizes(vec![left, desired, right]);
    }

    /// Applies a remembered (or default) size vector for a panel that just
    /// became visible, bumping floor-level entries back to usable defaults.
    fn apply_remembered(&mut self, id: PanelId, remembered: Option<Vec<u32>>) {
        let (region_id, slot) = id.slot();
        let defaults = self.options.default_sizes(region_id);

        let mut sizes = match remembered {
            Some(sizes) if sizes.len() == defaults.len() => sizes,
            _ => defaults.clone(),
        };

        if sizes[slot] <= self.options.visibility_floor {
            sizes[slot] = defaults[slot];
            let main = region_id.main_content_slot();
            if main != slot {
                sizes[main] = sizes[main].max(defaults[main]);
            }
        }

        self.region_mut(region_id).set_sizes(sizes);
        self.enforce_collapsed(region_id);
    }

    #[cfg(test)]
    pub(crate) fn verify_invariants(&self) {
        for region in [&self.top, &self.main] {
            assert_eq!(
                region.sizes().len(),
                region.slots().len(),
                "size vector length must match slot count in {:?}",
                region.id(),
            );
        }

        for panel in self.panels.iter() {
            let (region_id, slot) = panel.id().slot();
            let region = self.region(region_id);

            if !panel.visibility().is_visible() {
                assert_eq!(
                    region.size(slot),
                    0,
                    "{} is {:?} but occupies weight {}",
                    panel.id(),
                    panel.visibility(),
                    region.size(slot),
                );
            }

            if panel.pre_hide_sizes.is_some() {
                assert_eq!(
                    panel.visibility(),
                    Visibility::Hidden,
                    "{} remembers pre-hide sizes while {:?}",
                    panel.id(),
                    panel.visibility(),
                );
            }
            if panel.pre_minimize_sizes.is_some() {
                assert_eq!(
                    panel.visibility(),
                    Visibility::Minimized,
                    "{} remembers pre-minimize sizes while {:?}",
                    panel.id(),
                    panel.visibility(),
                );
            }

            for snapshot in [&panel.pre_hide_sizes, &panel.pre_minimize_sizes]
                .into_iter()
                .flatten()
            {
                assert_eq!(snapshot.len(), region.len());
            }
        }
    }
}
