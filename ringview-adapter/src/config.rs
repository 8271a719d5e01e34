use alloc::string::String;
use alloc::sync::Arc;

use ringview::ViewModel;

use crate::PlatformMode;

/// A callback fired whenever the window of slots is replaced (reset or rebalance).
///
/// Adapters re-render from the passed view model and report back through
/// [`crate::Synchronizer::on_materialized`] / [`crate::Synchronizer::on_frame`].
pub type OnWindowChangeCallback = Arc<dyn Fn(&ViewModel) + Send + Sync>;

/// Configuration for [`crate::Synchronizer`].
///
/// Distances are in the container's scroll units (CSS pixels for a DOM adapter), durations in
/// milliseconds.
pub struct Options {
    /// Standard mode: rebalance once the scroll offset is this close to either scroll extent.
    pub edge_size: f64,
    /// Standard mode: delay after the last scroll event before the closest item is centred.
    pub autocenter_delay_ms: u64,
    /// Caps the travel of animated scrolls. `None` or a non-positive value disables the cap.
    pub max_animated_scroll_size: Option<f64>,
    /// Standard mode: fraction of the viewport width, from each side, outside which items get
    /// zero position factors.
    pub hot_zone_size: f64,
    /// Compact mode: slots kept on each side of the anchor.
    pub offscreen_items: usize,
    /// Forces a platform mode instead of detecting it from the viewport width.
    pub mode_override: Option<PlatformMode>,
    /// Viewport widths below this select [`PlatformMode::Compact`].
    pub compact_breakpoint: f64,
    /// Compact mode: quiet period after the last scroll/touch event that counts as "stopped".
    pub scroll_end_delay_ms: u64,
    /// Scroll events ignored right after a scroll correction.
    pub skip_after_sync: u32,
    /// Duration of the recentring animation in standard mode (incremental writes).
    pub recenter_duration_ms: u64,
    /// Duration of the recentring animation in compact mode (absolute writes).
    pub compact_recenter_duration_ms: u64,
    /// Lets the scroller root take keyboard focus. When `false`, focus lands on the active slot.
    pub allow_root_focus: bool,
    /// Accessible label for the scroller root.
    pub aria_label: Option<String>,
    pub on_window_change: Option<OnWindowChangeCallback>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            edge_size: 200.0,
            autocenter_delay_ms: 500,
            max_animated_scroll_size: Some(400.0),
            hot_zone_size: 0.4,
            offscreen_items: 1,
            mode_override: None,
            compact_breakpoint: 640.0,
            scroll_end_delay_ms: 200,
            skip_after_sync: 3,
            recenter_duration_ms: 300,
            compact_recenter_duration_ms: 350,
            allow_root_focus: false,
            aria_label: None,
            on_window_change: None,
        }
    }
}

impl Clone for Options {
    fn clone(&self) -> Self {
        Self {
            edge_size: self.edge_size,
            autocenter_delay_ms: self.autocenter_delay_ms,
            max_animated_scroll_size: self.max_animated_scroll_size,
            hot_zone_size: self.hot_zone_size,
            offscreen_items: self.offscreen_items,
            mode_override: self.mode_override,
            compact_breakpoint: self.compact_breakpoint,
            scroll_end_delay_ms: self.scroll_end_delay_ms,
            skip_after_sync: self.skip_after_sync,
            recenter_duration_ms: self.recenter_duration_ms,
            compact_recenter_duration_ms: self.compact_recenter_duration_ms,
            allow_root_focus: self.allow_root_focus,
            aria_label: self.aria_label.clone(),
            on_window_change: self.on_window_change.clone(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_edge_size(mut self, edge_size: f64) -> Self {
        self.edge_size = edge_size;
        self
    }

    pub fn with_autocenter_delay_ms(mut self, delay_ms: u64) -> Self {
        self.autocenter_delay_ms = delay_ms;
        self
    }

    pub fn with_max_animated_scroll_size(mut self, size: Option<f64>) -> Self {
        self.max_animated_scroll_size = size;
        self
    }

    pub fn with_hot_zone_size(mut self, hot_zone_size: f64) -> Self {
        self.hot_zone_size = hot_zone_size;
        self
    }

    pub fn with_offscreen_items(mut self, offscreen_items: usize) -> Self {
        self.offscreen_items = offscreen_items;
        self
    }

    pub fn with_mode_override(mut self, mode: Option<PlatformMode>) -> Self {
        self.mode_override = mode;
        self
    }

    pub fn with_compact_breakpoint(mut self, width: f64) -> Self {
        self.compact_breakpoint = width;
        self
    }

    pub fn with_scroll_end_delay_ms(mut self, delay_ms: u64) -> Self {
        self.scroll_end_delay_ms = delay_ms;
        self
    }

    pub fn with_skip_after_sync(mut self, skip: u32) -> Self {
        self.skip_after_sync = skip;
        self
    }

    pub fn with_recenter_durations(mut self, standard_ms: u64, compact_ms: u64) -> Self {
        self.recenter_duration_ms = standard_ms;
        self.compact_recenter_duration_ms = compact_ms;
        self
    }

    pub fn with_allow_root_focus(mut self, allow: bool) -> Self {
        self.allow_root_focus = allow;
        self
    }

    pub fn with_aria_label(mut self, label: Option<impl Into<String>>) -> Self {
        self.aria_label = label.map(Into::into);
        self
    }

    pub fn with_on_window_change(
        mut self,
        on_window_change: Option<impl Fn(&ViewModel) + Send + Sync + 'static>,
    ) -> Self {
        self.on_window_change = on_window_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for Options {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Options")
            .field("edge_size", &self.edge_size)
            .field("autocenter_delay_ms", &self.autocenter_delay_ms)
            .field("max_animated_scroll_size", &self.max_animated_scroll_size)
            .field("hot_zone_size", &self.hot_zone_size)
            .field("offscreen_items", &self.offscreen_items)
            .field("mode_override", &self.mode_override)
            .field("compact_breakpoint", &self.compact_breakpoint)
            .field("scroll_end_delay_ms", &self.scroll_end_delay_ms)
            .field("skip_after_sync", &self.skip_after_sync)
            .field("recenter_duration_ms", &self.recenter_duration_ms)
            .field(
                "compact_recenter_duration_ms",
                &self.compact_recenter_duration_ms,
            )
            .field("allow_root_focus", &self.allow_root_focus)
            .field("aria_label", &self.aria_label)
            .finish_non_exhaustive()
    }
}
