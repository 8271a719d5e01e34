/// Identity of a rendered slot.
///
/// Minted once per logical window position from [`crate::ViewModel::next_id`] and never reused
/// while that position stays in the window. Adapters use it as the render key.
pub type SlotId = u64;

/// One logical rendered position: a stable identity plus an index into the source items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot {
    pub id: SlotId,
    /// Position in the source item array, always in `0..total_items`.
    pub index: usize,
}

/// Horizontal extent of a box in viewport coordinates (a bounding client rect reduced to the
/// scroll axis).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub left: f64,
    pub width: f64,
}

impl Bounds {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn center(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// A rendered slot together with its live geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemGeometry {
    pub id: SlotId,
    pub bounds: Bounds,
}

/// Anchor geometry captured right before a window replacement.
///
/// It is consumed exactly once, on the next frame after the new window is rendered, to nudge the
/// scroll offset so the anchor does not move on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyncBeacon {
    pub id: SlotId,
    pub bounds: Bounds,
    pub scroll_left: f64,
}

impl SyncBeacon {
    /// Scroll delta that puts the anchor back where it was captured, given its current bounds.
    pub fn correction(&self, current: Bounds) -> f64 {
        current.left - self.bounds.left
    }
}

/// Styling factors for an item relative to the viewport centre.
///
/// - `pos` rises from 0 to 1 between the start of the hot zone and the centre, then falls back
///   to 0 at the end of the hot zone.
/// - `full_pos` rises from 0 to 1 across the whole hot zone.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemPosition {
    pub pos: f64,
    pub full_pos: f64,
}
