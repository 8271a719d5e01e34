use alloc::vec::Vec;

use crate::{Error, Result, Slot, SlotId, ViewModel};

/// How a by-size window is distributed around its anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizeLayout {
    /// The anchor is the leftmost visible item: the right side covers the visible width plus the
    /// overscroll, the left side only the overscroll.
    #[default]
    Leading,
    /// The anchor sits in the middle of the viewport: both sides cover half the visible width plus
    /// the overscroll.
    Centered,
}

/// Decides how many slots surround the anchor after a rebalance.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RebalanceStrategy {
    /// `n` slots on each side of the anchor.
    ByCount(usize),
    /// Enough fixed-size items to fill the container plus one container width of overscroll.
    BySize {
        container_width: f64,
        item_size: f64,
        layout: SizeLayout,
    },
}

impl RebalanceStrategy {
    /// Upper bound on the number of slots one window may hold.
    pub const MAX_WINDOW: usize = 1 << 16;

    /// Returns `(left, right)`: slots before the anchor, and slots from the anchor onwards (the
    /// anchor itself included). `right` is never zero.
    ///
    /// Fails with [`Error::WindowTooLarge`] when the window would exceed
    /// [`RebalanceStrategy::MAX_WINDOW`] slots.
    pub fn counts(&self) -> Result<(usize, usize)> {
        match *self {
            Self::ByCount(n) => {
                if n > (Self::MAX_WINDOW - 1) / 2 {
                    return Err(Error::WindowTooLarge(n as f64 * 2.0 + 1.0));
                }
                Ok((n, n + 1))
            }
            Self::BySize {
                container_width,
                item_size,
                layout,
            } => {
                if !(item_size > 0.0 && item_size.is_finite()) {
                    return Err(Error::InvalidItemSize(item_size));
                }
                let base = container_width.max(0.0);
                let overscroll = base;
                let (left, right) = match layout {
                    SizeLayout::Leading => (
                        (overscroll / item_size).ceil(),
                        ((base + overscroll) / item_size).ceil(),
                    ),
                    SizeLayout::Centered => {
                        let n = ((base / 2.0 + overscroll) / item_size).ceil();
                        (n, n)
                    }
                };
                let requested = left + right.max(1.0);
                if !(requested <= Self::MAX_WINDOW as f64) {
                    return Err(Error::WindowTooLarge(requested));
                }
                Ok((left as usize, (right as usize).max(1)))
            }
        }
    }

    /// Total window length this strategy produces.
    pub fn window_len(&self) -> Result<usize> {
        let (left, right) = self.counts()?;
        Ok(left.saturating_add(right))
    }
}

/// Maps `anchor_index + offset` onto `0..total`, wrapping in both directions.
pub fn wrap_index(anchor_index: usize, offset: isize, total: usize) -> usize {
    debug_assert!(total > 0);
    let total = total as i64;
    (anchor_index as i64 + offset as i64).rem_euclid(total) as usize
}

/// Computes a new window around `anchor`.
///
/// Slots already present at a given offset from the anchor are reused (same identity), missing
/// ones are minted from `model.next_id` with a wrapped source index. The model's slots are not
/// touched; only its identity counter advances. Feed the result to
/// [`ViewModel::replace_slots`], or use [`ViewModel::rebalance`] to do both.
///
/// Fails with [`Error::EmptyView`] when there are no source items, and with
/// [`Error::AnchorNotFound`] when `anchor` is not in the current window.
pub fn rebalance(
    model: &mut ViewModel,
    anchor: SlotId,
    strategy: RebalanceStrategy,
) -> Result<Vec<Slot>> {
    if model.total_items == 0 {
        return Err(Error::EmptyView);
    }
    let Some(anchor_pos) = model.position_of(anchor) else {
        vwarn!(anchor, window = model.len(), "rebalance: anchor not in window");
        return Err(Error::AnchorNotFound(anchor));
    };
    let (left, right) = strategy.counts()?;
    let total = model.total_items;
    let anchor_index = model.slots[anchor_pos].index;

    let mut out = Vec::with_capacity(left.saturating_add(right));

    // Left side is filled outwards from the anchor, then reversed into visual order.
    for i in 1..=left {
        let existing = anchor_pos
            .checked_sub(i)
            .and_then(|p| model.slots.get(p))
            .copied();
        let slot = match existing {
            Some(slot) => slot,
            None => model.mint(wrap_index(anchor_index, -(i as isize), total)),
        };
        out.push(slot);
    }
    out.reverse();

    for i in 0..right {
        let existing = anchor_pos
            .checked_add(i)
            .and_then(|p| model.slots.get(p))
            .copied();
        let slot = match existing {
            Some(slot) => slot,
            None => model.mint(wrap_index(anchor_index, i as isize, total)),
        };
        out.push(slot);
    }

    vtrace!(
        anchor,
        left,
        right,
        next_id = model.next_id,
        "rebalance"
    );
    Ok(out)
}

impl ViewModel {
    /// Rebalances around `anchor` and replaces the window.
    ///
    /// Returns `true` when the slot sequence changed. On error the model is left untouched.
    pub fn rebalance(&mut self, anchor: SlotId, strategy: RebalanceStrategy) -> Result<bool> {
        let slots = rebalance(self, anchor, strategy)?;
        if slots == self.slots {
            return Ok(false);
        }
        self.replace_slots(slots);
        Ok(true)
    }
}
