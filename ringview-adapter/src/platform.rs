use ringview::geometry::{centroid_anchor, leading_anchor};
use ringview::{Bounds, ItemGeometry, SeedLayout, SlotId};

/// Interaction policy family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlatformMode {
    /// Precision pointer: free scrolling, edge-triggered rebalancing, delayed auto-centering.
    #[default]
    Standard,
    /// Coarse pointer / narrow viewport: rebalance only once scrolling and touch have stopped,
    /// one indicator dot per source item.
    Compact,
}

impl PlatformMode {
    pub fn detect(viewport_width: f64, compact_breakpoint: f64) -> Self {
        if viewport_width < compact_breakpoint {
            Self::Compact
        } else {
            Self::Standard
        }
    }

    /// Uses `mode_override` when set, otherwise [`PlatformMode::detect`].
    pub fn resolve(
        mode_override: Option<PlatformMode>,
        viewport_width: f64,
        compact_breakpoint: f64,
    ) -> Self {
        mode_override.unwrap_or_else(|| Self::detect(viewport_width, compact_breakpoint))
    }

    pub fn is_compact(self) -> bool {
        matches!(self, Self::Compact)
    }

    pub fn seed_layout(self) -> SeedLayout {
        match self {
            Self::Standard => SeedLayout::Full,
            Self::Compact => SeedLayout::Single,
        }
    }

    pub fn anchor_policy(self) -> AnchorPolicy {
        match self {
            Self::Standard => AnchorPolicy::Leading,
            Self::Compact => AnchorPolicy::Centroid,
        }
    }

    pub fn trigger_policy(self) -> TriggerPolicy {
        match self {
            Self::Standard => TriggerPolicy::Edge,
            Self::Compact => TriggerPolicy::ScrollEnd,
        }
    }
}

/// How the anchor slot is picked from live geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnchorPolicy {
    /// First at least partially visible item.
    Leading,
    /// Item whose centre is closest to the viewport centre.
    Centroid,
}

impl AnchorPolicy {
    pub fn select(self, viewport: Bounds, items: &[ItemGeometry]) -> Option<SlotId> {
        match self {
            Self::Leading => leading_anchor(viewport, items),
            Self::Centroid => centroid_anchor(viewport, items),
        }
    }
}

/// When a rebalance is attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerPolicy {
    /// On scroll, when the offset is near either extent and no animation runs.
    Edge,
    /// After scrolling and touch contact have both been quiet for the scroll-end delay.
    ScrollEnd,
}
