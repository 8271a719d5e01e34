//! A headless windowing engine for horizontally scrolling circular lists.
//!
//! Given a finite set of source items, the engine keeps a small window of logical slots around
//! the user's scroll position and lets the UI present them as an endless strip. It provides:
//! - the view model (slots with stable identities pointing into the source items)
//! - rebalancing of that window around an anchor slot, with index wraparound
//! - anchor selection and other geometry helpers over live element bounds
//! - a frame-driven scroll animator with distance clamping and cancellation
//!
//! It is UI-agnostic. The UI layer implements [`ScrollContainer`] and renders one element per
//! slot, keyed by [`Slot::id`].
//!
//! For the scroll synchronisation state machine and platform policies, see the
//! `ringview-adapter` crate.
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod macros;

mod animator;
mod container;
mod easing;
mod error;
pub mod geometry;
mod rebalance;
mod types;
mod view;


pub use animator::{
    AnimateScrollOptions, Animator, Completion, CompletionCallback, ScrollAnimation,
    animate_scroll, clamp_travel,
};
pub use container::ScrollContainer;
pub use easing::Easing;
pub use error::{Error, Result};
pub use rebalance::{RebalanceStrategy, SizeLayout, rebalance, wrap_index};
pub use types::{Bounds, ItemGeometry, ItemPosition, Slot, SlotId, SyncBeacon};
pub use view::{SeedLayout, ViewModel, create_view};
