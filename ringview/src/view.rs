use alloc::vec::Vec;

use crate::{Slot, SlotId};

/// Initial window shape for a fresh [`ViewModel`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SeedLayout {
    /// One slot per source item (`0..total_items`).
    #[default]
    Full,
    /// A single slot pointing at the first item; the first rebalance grows it.
    Single,
}

/// The rendered window of logical slots.
///
/// Slots are ordered left to right. The model is replaced wholesale on each rebalance; slots are
/// never edited in place. `next_id` is the identity counter owned by this generation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewModel {
    pub(crate) slots: Vec<Slot>,
    pub(crate) total_items: usize,
    pub(crate) next_id: SlotId,
}

impl ViewModel {
    /// Starts a new generation for `total_items` source items. Identities restart at 1.
    pub fn new(total_items: usize, seed: SeedLayout) -> Self {
        let len = match seed {
            SeedLayout::Full => total_items,
            SeedLayout::Single => total_items.min(1),
        };
        let slots: Vec<Slot> = (0..len)
            .map(|index| Slot {
                id: index as SlotId + 1,
                index,
            })
            .collect();
        let next_id = slots.len() as SlotId + 1;
        vdebug!(total_items, window = slots.len(), "ViewModel::new");
        Self {
            slots,
            total_items,
            next_id,
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// The identity the next minted slot will receive.
    pub fn next_id(&self) -> SlotId {
        self.next_id
    }

    /// Position of `id` within the window.
    pub fn position_of(&self, id: SlotId) -> Option<usize> {
        self.slots.iter().position(|s| s.id == id)
    }

    pub fn slot(&self, id: SlotId) -> Option<Slot> {
        self.slots.iter().copied().find(|s| s.id == id)
    }

    /// Returns the slot `offset` positions away from `id` in the current window, if any.
    ///
    /// No wrapping: asking past either end returns `None`.
    pub fn neighbor(&self, id: SlotId, offset: isize) -> Option<Slot> {
        let pos = self.position_of(id)?;
        let target = pos.checked_add_signed(offset)?;
        self.slots.get(target).copied()
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.position_of(id).is_some()
    }

    /// Whether `slots` lists the same source indexes, in the same order, as this window.
    pub fn same_indexes(&self, slots: &[Slot]) -> bool {
        self.slots.len() == slots.len()
            && self
                .slots
                .iter()
                .zip(slots)
                .all(|(a, b)| a.index == b.index)
    }

    /// Replaces the whole window. Used with the output of [`crate::rebalance`].
    pub fn replace_slots(&mut self, slots: Vec<Slot>) {
        debug_assert!(
            slots.iter().all(|s| s.index < self.total_items),
            "slot index out of range"
        );
        debug_assert!(slots.iter().all(|s| s.id < self.next_id), "unminted slot id");
        vtrace!(
            old = self.slots.len(),
            new = slots.len(),
            "ViewModel::replace_slots"
        );
        self.slots = slots;
    }

    pub(crate) fn mint(&mut self, index: usize) -> Slot {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        Slot { id, index }
    }
}

/// Creates a fresh view over `items` with one slot per item.
pub fn create_view<T>(items: &[T]) -> ViewModel {
    ViewModel::new(items.len(), SeedLayout::Full)
}
