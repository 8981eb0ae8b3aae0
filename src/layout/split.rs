//! Split regions: ordered slots sharing a proportional size budget.

use tracing::warn;

/// Identity of a split region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionId {
    /// Horizontal region: explorer, document area, analysis.
    Top,
    /// Vertical region: the top region, console.
    Main,
}

impl RegionId {
    /// Slot of the region's main content, which absorbs the weight freed by
    /// collapsing a sibling panel.
    pub fn main_content_slot(self) -> usize {
        match self {
            RegionId::Top => 1,
            RegionId::Main => 0,
        }
    }
}

/// What occupies a slot within a split region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotId {
    Explorer,
    DocumentArea,
    Analysis,
    TopRegion,
    Console,
}

/// An ordered sequence of slots with a parallel vector of proportional
/// sizes.
///
/// Sizes are abstract non-negative weights. The host toolkit distributes its
/// actual pixel budget proportionally to them; nothing here is tied to a
/// pixel model. The slot list is fixed per region; hiding a panel keeps its
/// slot in place at weight zero.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitRegion {
    id: RegionId,
    slots: &'static [SlotId],
    sizes: Vec<u32>,
}

const TOP_SLOTS: &[SlotId] = &[SlotId::Explorer, SlotId::DocumentArea, SlotId::Analysis];
const MAIN_SLOTS: &[SlotId] = &[SlotId::TopRegion, SlotId::Console];

impl SplitRegion {
    pub fn new(id: RegionId, sizes: Vec<u32>) -> Self {
        let slots = match id {
            RegionId::Top => TOP_SLOTS,
            RegionId::Main => MAIN_SLOTS,
        };
        assert_eq!(sizes.len(), slots.len());
        Self { id, slots, sizes }
    }

    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn slots(&self) -> &[SlotId] {
        self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn sizes(&self) -> &[u32] {
        &self.sizes
    }

    pub fn size(&self, slot: usize) -> u32 {
        self.sizes[slot]
    }

    /// Replaces the whole size vector.
    ///
    /// Returns `false` (and leaves the region unchanged) when the vector
    /// length doesn't match the slot count.
    pub(super) fn set_sizes(&mut self, sizes: Vec<u32>) -> bool {
        if sizes.len() != self.len() {
            warn!(
                "ignoring size vector of length {} for {:?} ({} slots)",
                sizes.len(),
                self.id,
                self.len(),
            );
            return false;
        }
        self.sizes = sizes;
        true
    }

    /// Zeroes `slot`, adding the freed weight to `absorber`.
    pub(super) fn collapse_into(&mut self, slot: usize, absorber: usize) {
        if slot == absorber {
            return;
        }
        let freed = self.sizes[slot];
        self.sizes[slot] = 0;
        self.sizes[absorber] = self.sizes[absorber].saturating_add(freed);
    }
}
