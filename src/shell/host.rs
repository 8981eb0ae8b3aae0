//! Host windowing toolkit capability interface.

use crate::layout::{PanelId, RegionId};

/// What the shell needs from the host toolkit: split containers whose
/// proportional sizes can be set, and panel widgets that can be shown or
/// hidden. The concrete toolkit type never appears in the core.
pub trait LayoutHost {
    fn apply_region_sizes(&mut self, region: RegionId, sizes: &[u32]);
    fn apply_panel_visible(&mut self, panel: PanelId, visible: bool);
}

/// Host that ignores every application; used for headless runs.
#[derive(Debug, Default)]
pub struct NullHost;

impl LayoutHost for NullHost {
    fn apply_region_sizes(&mut self, _region: RegionId, _sizes: &[u32]) {}

    fn apply_panel_visible(&mut self, _panel: PanelId, _visible: bool) {}
}
