//! Scroll synchronisation for the `ringview` windowing engine.
//!
//! [`Synchronizer`] owns a [`ringview::ViewModel`] and serialises the three writers of a scroll
//! container's offset: native scrolling, the scroll animator and the post-rebalance correction.
//! Platform policies ([`PlatformMode`]) decide when rebalancing happens and how the anchor is
//! picked; the [`a11y`] module provides roving-tabindex keyboard navigation.
//!
//! It is UI-agnostic. Adapters implement [`ringview::ScrollContainer`] and [`FocusHost`] for
//! their scroll element and forward UI events and animation frames.
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod a11y;
mod config;
mod platform;
mod synchronizer;

#[cfg(test)]
mod tests;

pub use a11y::{FocusHost, FocusTarget, Key, KeyOutcome};
pub use config::{OnWindowChangeCallback, Options};
pub use platform::{AnchorPolicy, PlatformMode, TriggerPolicy};
pub use synchronizer::{ScrollHost, SyncState, Synchronizer};
