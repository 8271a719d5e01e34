//! Keyboard navigation: roving tabindex, arrow-key stepping and focus restoration.

use ringview::{SlotId, ViewModel};

/// Where keyboard focus sits, from the engine's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FocusTarget {
    /// The scroller root element.
    Root,
    /// A slot's wrapper element.
    Slot(SlotId),
    /// The first focusable element inside a slot (link, button, ...).
    SlotContent(SlotId),
}

impl FocusTarget {
    pub fn slot(self) -> Option<SlotId> {
        match self {
            Self::Root => None,
            Self::Slot(id) | Self::SlotContent(id) => Some(id),
        }
    }
}

/// Focus queries and commands on the UI side.
///
/// All methods have no-op defaults so hosts without keyboard support can opt out with an empty
/// `impl`.
pub trait FocusHost {
    /// The focused element, when focus is inside the scroller.
    fn focused(&self) -> Option<FocusTarget> {
        None
    }

    /// Whether the focused element shows a keyboard focus ring (`:focus-visible`).
    fn is_focus_visible(&self) -> bool {
        false
    }

    fn focus(&mut self, _target: FocusTarget) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Enter,
    Space,
    Other,
}

impl Key {
    /// Activation offset for arrow keys.
    pub fn step(self) -> Option<isize> {
        match self {
            Self::ArrowLeft => Some(-1),
            Self::ArrowRight => Some(1),
            _ => None,
        }
    }
}

/// What a key press did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    /// Focus moved to `focus`; `activated` tells whether the active slot moved along.
    Moved { focus: SlotId, activated: bool },
    /// Focus entered the given slot's content from the root.
    Entered(SlotId),
}

/// `tabIndex` for a slot: only the focusable slot gets `0`.
///
/// The focusable slot is the active one, or the first slot when nothing is active yet.
pub fn slot_tab_index(model: &ViewModel, active: Option<SlotId>, id: SlotId) -> i32 {
    let focusable = active
        .filter(|a| model.contains(*a))
        .or_else(|| model.slots().first().map(|s| s.id));
    if focusable == Some(id) { 0 } else { -1 }
}

pub fn root_tab_index(allow_root_focus: bool) -> i32 {
    if allow_root_focus { 0 } else { -1 }
}

/// The slot `step` positions away from `from`, wrapping inside the current window.
pub fn focus_step(model: &ViewModel, from: SlotId, step: isize) -> Option<SlotId> {
    let pos = model.position_of(from)?;
    let len = model.len() as isize;
    let target = (pos as isize + step).rem_euclid(len) as usize;
    model.slots().get(target).map(|s| s.id)
}

/// Whether focus should be put back after the window is replaced: only keyboard-driven focus
/// inside the scroller is tracked.
pub(crate) fn capture_focus<H: FocusHost + ?Sized>(host: &H) -> bool {
    host.is_focus_visible() && host.focused().is_some()
}

/// Refocuses `anchor` when the window replacement dropped focus.
pub(crate) fn restore_focus<H: FocusHost + ?Sized>(host: &mut H, anchor: SlotId) -> bool {
    if host.focused().is_some() {
        return false;
    }
    vdebug!(anchor, "restoring focus lost during window replacement");
    host.focus(FocusTarget::Slot(anchor));
    true
}
