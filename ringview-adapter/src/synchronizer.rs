use alloc::vec::Vec;

use ringview::geometry::{
    at_viewport_edge, closest_to_center, collect_items, item_position, measure_item_size,
};
use ringview::{
    AnimateScrollOptions, Animator, Completion, ItemPosition, RebalanceStrategy, Result,
    ScrollContainer, SizeLayout, SlotId, SyncBeacon, ViewModel,
};

use crate::a11y::{self, FocusHost, FocusTarget, Key, KeyOutcome};
use crate::{Options, PlatformMode, TriggerPolicy};

/// The UI side the synchronizer drives: a scroll container that can also report and move
/// keyboard focus.
pub trait ScrollHost: ScrollContainer + FocusHost {}
impl<T: ScrollContainer + FocusHost + ?Sized> ScrollHost for T {}

/// Observable phase of the synchronizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SyncState {
    /// No window has been laid out for the current generation yet.
    Unmounted,
    /// The initial window was computed; waiting for the host to render it.
    Mounting,
    Idle,
    AnimatingScroll,
    /// A window was replaced and the scroll correction waits for the next frame.
    PendingSync,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mount {
    Unmounted,
    Mounting(SlotId),
    Mounted,
}

#[derive(Clone, Copy, Debug)]
struct PendingSync {
    beacon: SyncBeacon,
    restore_focus: bool,
}

/// Serialises every writer of the container's scroll offset: native scrolling, the animator and
/// the post-rebalance correction.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `mount` once the seed window is rendered, then `on_materialized` once the rebalanced window
///   is rendered
/// - `on_scroll`, `on_touch_start`, `on_touch_end`, `on_key` when UI events occur
/// - `on_frame(now_ms)` on every animation frame (corrections, animation, debounce timers)
///
/// Every window replacement is reported through `Options::on_window_change`; the host re-renders
/// one element per slot before the next `on_frame`.
#[derive(Debug)]
pub struct Synchronizer {
    options: Options,
    mode: PlatformMode,
    model: ViewModel,
    mount: Mount,
    generation: u64,

    active_id: Option<SlotId>,
    anchor_id: Option<SlotId>,
    item_size: Option<f64>,

    animator: Animator,
    pending: Option<PendingSync>,
    recenter_after_sync: bool,
    snap_disabled: bool,
    skip: u32,

    is_scrolling: bool,
    is_touching: bool,
    scroll_end_at: Option<u64>,
    autocenter_at: Option<u64>,
}

impl Synchronizer {
    pub fn new(total_items: usize, viewport_width: f64, options: Options) -> Self {
        let mode = PlatformMode::resolve(
            options.mode_override,
            viewport_width,
            options.compact_breakpoint,
        );
        vdebug!(total_items, viewport_width, ?mode, "Synchronizer::new");
        Self {
            model: ViewModel::new(total_items, mode.seed_layout()),
            options,
            mode,
            mount: Mount::Unmounted,
            generation: 0,
            active_id: None,
            anchor_id: None,
            item_size: None,
            animator: Animator::new(),
            pending: None,
            recenter_after_sync: false,
            snap_disabled: false,
            skip: 0,
            is_scrolling: false,
            is_touching: false,
            scroll_end_at: None,
            autocenter_at: None,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn mode(&self) -> PlatformMode {
        self.mode
    }

    pub fn view(&self) -> &ViewModel {
        &self.model
    }

    /// Incremented on every window replacement, including resets.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn active_id(&self) -> Option<SlotId> {
        self.active_id
    }

    pub fn anchor_id(&self) -> Option<SlotId> {
        self.anchor_id
    }

    pub fn item_size(&self) -> Option<f64> {
        self.item_size
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_active()
    }

    /// Where the running animation is headed, before travel clamping.
    pub fn animation_target(&self) -> Option<f64> {
        self.animator
            .current()
            .filter(|anim| anim.is_active())
            .map(|anim| anim.target())
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn is_touching(&self) -> bool {
        self.is_touching
    }

    pub fn pending_beacon(&self) -> Option<SyncBeacon> {
        self.pending.map(|p| p.beacon)
    }

    pub fn state(&self) -> SyncState {
        match self.mount {
            Mount::Unmounted => SyncState::Unmounted,
            Mount::Mounting(_) => SyncState::Mounting,
            Mount::Mounted if self.pending.is_some() => SyncState::PendingSync,
            Mount::Mounted if self.animator.is_active() => SyncState::AnimatingScroll,
            Mount::Mounted => SyncState::Idle,
        }
    }

    fn notify(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(cb) = &self.options.on_window_change {
            cb(&self.model);
        }
    }

    /// Starts a new generation for a new source item list.
    ///
    /// Cancels any animation, drops a pending correction and timers. The host renders the seed
    /// window and calls [`Synchronizer::mount`] again.
    pub fn reset(&mut self, total_items: usize) {
        vdebug!(total_items, mode = ?self.mode, "Synchronizer::reset");
        self.animator.stop();
        self.model = ViewModel::new(total_items, self.mode.seed_layout());
        self.mount = Mount::Unmounted;
        self.active_id = None;
        self.anchor_id = None;
        self.item_size = None;
        self.pending = None;
        self.recenter_after_sync = false;
        self.skip = 0;
        self.is_scrolling = false;
        self.scroll_end_at = None;
        self.autocenter_at = None;
        self.notify();
    }

    /// Re-evaluates the platform mode for a new viewport width.
    ///
    /// Returns `true` when the mode changed, in which case the view was reset.
    pub fn on_viewport_resize(&mut self, viewport_width: f64) -> bool {
        self.item_size = None;
        let mode = PlatformMode::resolve(
            self.options.mode_override,
            viewport_width,
            self.options.compact_breakpoint,
        );
        if mode == self.mode {
            return false;
        }
        vdebug!(from = ?self.mode, to = ?mode, viewport_width, "platform mode changed");
        self.mode = mode;
        let total = self.model.total_items();
        self.reset(total);
        true
    }

    /// Builds the first real window from the rendered seed window.
    ///
    /// No-op until the host has laid out at least one item.
    pub fn mount<H: ScrollHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        if self.mount != Mount::Unmounted {
            return Ok(());
        }
        if self.snap_disabled {
            host.set_scroll_snap(true);
            self.snap_disabled = false;
        }
        let Some(anchor) = self.rebalance_window(&mut *host)? else {
            vtrace!("mount: container not laid out yet");
            return Ok(());
        };
        // The mount path centres the anchor instead of applying a correction.
        self.pending = None;
        self.release_snap(&mut *host);
        self.mount = Mount::Mounting(anchor);
        Ok(())
    }

    /// The host reports that every slot of the current window has an element.
    ///
    /// Completes mounting: centres the anchor in the viewport and makes it active.
    pub fn on_materialized<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        let Mount::Mounting(anchor) = self.mount else {
            return;
        };
        let Some(bounds) = host.item_bounds(anchor) else {
            vtrace!(anchor, "on_materialized: anchor element not rendered yet");
            return;
        };
        let delta = bounds.center() - host.bounds().center();
        if delta != 0.0 {
            let at = host.scroll_left();
            host.set_scroll_left(at + delta);
        }
        self.active_id = Some(anchor);
        self.anchor_id = Some(anchor);
        self.mount = Mount::Mounted;
        vdebug!(anchor, delta, "mounted");
    }

    /// Handles a scroll event of the container (user, momentum or programmatic).
    pub fn on_scroll<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        now_ms: u64,
    ) -> Result<()> {
        if self.mount != Mount::Mounted {
            return Ok(());
        }

        let items = collect_items(&*host);
        self.anchor_id = self.mode.anchor_policy().select(host.bounds(), &items);

        match self.mode.trigger_policy() {
            TriggerPolicy::Edge => {
                self.autocenter_at =
                    Some(now_ms.saturating_add(self.options.autocenter_delay_ms));
                if self.skip > 0 {
                    // Scroll events queued right before the correction still carry the old
                    // offset against the new window.
                    self.skip -= 1;
                    vtrace!(skip = self.skip, "on_scroll: skipped after sync");
                    return Ok(());
                }
                self.rebalance_when_needed(host)
            }
            TriggerPolicy::ScrollEnd => {
                self.is_scrolling = true;
                self.scroll_end_at =
                    Some(now_ms.saturating_add(self.options.scroll_end_delay_ms));
                Ok(())
            }
        }
    }

    pub fn on_touch_start(&mut self) {
        self.is_touching = true;
    }

    pub fn on_touch_end(&mut self, now_ms: u64) {
        self.is_touching = false;
        if self.mode.trigger_policy() == TriggerPolicy::ScrollEnd {
            self.scroll_end_at = Some(now_ms.saturating_add(self.options.scroll_end_delay_ms));
        }
    }

    /// Runs one rendering opportunity: applies a pending scroll correction, advances the
    /// animation, and fires due debounce timers, in that order.
    pub fn on_frame<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        now_ms: u64,
    ) -> Result<()> {
        if self.mount != Mount::Mounted {
            return Ok(());
        }

        if self.pending.is_some() && !self.apply_correction(&mut *host) {
            return Ok(());
        }
        let recenter = core::mem::take(&mut self.recenter_after_sync);
        if let Some(id) = self.active_id.filter(|_| recenter) {
            self.set_active(&mut *host, id, now_ms);
        }

        if let Some(done) = self.animator.tick(&mut *host, now_ms) {
            self.on_animation_end(&mut *host, done)?;
        }

        if self.scroll_end_at.is_some_and(|at| now_ms >= at) {
            self.scroll_end_at = None;
            self.is_scrolling = false;
            vtrace!(now_ms, "scroll end");
            self.rebalance_when_needed(&mut *host)?;
        }

        if self.autocenter_at.is_some_and(|at| now_ms >= at) && self.pending.is_none() {
            self.autocenter_at = None;
            self.autocenter(host, now_ms);
        }

        Ok(())
    }

    /// Moves the active slot by `offset` positions and animates it to the viewport centre.
    ///
    /// Dropped (returns `false`) while an animation, a pending correction or, in compact mode, a
    /// scroll/touch gesture is in progress, and when the target lies past either end of the
    /// current window.
    pub fn activate_with_offset<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        offset: isize,
        now_ms: u64,
    ) -> bool {
        if self.mount != Mount::Mounted || self.pending.is_some() || self.animator.is_active() {
            vtrace!(offset, "activate: busy");
            return false;
        }
        if self.mode.is_compact() && (self.is_scrolling || self.is_touching) {
            vtrace!(offset, "activate: gesture in progress");
            return false;
        }
        let Some(active) = self.active_id else {
            return false;
        };
        let Some(next) = self.model.neighbor(active, offset) else {
            vdebug!(active, offset, "activate: past the end of the window");
            return false;
        };
        self.stop_animation(&mut *host);
        self.set_active(host, next.id, now_ms);
        true
    }

    /// Makes `id` active and animates it to the viewport centre.
    ///
    /// While a scroll correction is pending, the animation starts on the frame that applies it.
    pub fn set_active<H: ScrollHost + ?Sized>(&mut self, host: &mut H, id: SlotId, now_ms: u64) {
        self.active_id = Some(id);
        if self.pending.is_some() {
            vtrace!(id, "set_active: recentring after the pending correction");
            self.recenter_after_sync = true;
            return;
        }
        let Some(bounds) = host.item_bounds(id) else {
            vtrace!(id, "set_active: element not rendered");
            return;
        };
        let delta = bounds.center() - host.bounds().center();
        if delta != 0.0 {
            let to = host.scroll_left() + delta;
            self.start_animation(host, to, now_ms);
        }
    }

    /// Cancels the running animation, if any.
    pub fn stop_animation<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        if self.animator.stop() {
            self.release_snap(host);
        }
    }

    /// Handles a key press while focus is inside the scroller (standard mode only).
    ///
    /// Arrow keys move focus to the neighbouring slot, wrapping inside the window, and step the
    /// active slot the same way. Enter/Space on the root moves focus into the active slot.
    pub fn on_key<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        key: Key,
        now_ms: u64,
    ) -> KeyOutcome {
        if self.mode.is_compact() || self.mount != Mount::Mounted {
            return KeyOutcome::Ignored;
        }
        let focused = host.focused();

        if let Some(step) = key.step() {
            let Some(from) = focused.and_then(FocusTarget::slot) else {
                return KeyOutcome::Ignored;
            };
            let Some(to) = a11y::focus_step(&self.model, from, step) else {
                return KeyOutcome::Ignored;
            };
            host.focus(FocusTarget::Slot(to));
            let activated = self.activate_with_offset(&mut *host, step, now_ms);
            return KeyOutcome::Moved {
                focus: to,
                activated,
            };
        }

        match (focused, key) {
            (Some(FocusTarget::Root), Key::Enter | Key::Space) => {
                let Some(target) = self.active_id.or(self.anchor_id) else {
                    return KeyOutcome::Ignored;
                };
                host.focus(FocusTarget::SlotContent(target));
                KeyOutcome::Entered(target)
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// `tabIndex` for the element rendering `id`.
    pub fn slot_tab_index(&self, id: SlotId) -> i32 {
        a11y::slot_tab_index(&self.model, self.active_id, id)
    }

    pub fn root_tab_index(&self) -> i32 {
        a11y::root_tab_index(self.options.allow_root_focus)
    }

    pub fn aria_label(&self) -> Option<&str> {
        self.options.aria_label.as_deref()
    }

    /// Calls `render(item, active, compact, id)` once per slot, in window order.
    pub fn for_each_rendered<T>(
        &self,
        items: &[T],
        mut render: impl FnMut(&T, bool, bool, SlotId),
    ) {
        let compact = self.mode.is_compact();
        for slot in self.model.slots() {
            let Some(item) = items.get(slot.index) else {
                vwarn!(index = slot.index, len = items.len(), "slot index past item list");
                continue;
            };
            render(item, self.active_id == Some(slot.id), compact, slot.id);
        }
    }

    /// Collects the output of `render` for every slot. See [`Synchronizer::for_each_rendered`].
    pub fn render<T, R>(
        &self,
        items: &[T],
        mut render: impl FnMut(&T, bool, bool, SlotId) -> R,
    ) -> Vec<R> {
        let mut out = Vec::with_capacity(self.model.len());
        self.for_each_rendered(items, |item, active, compact, id| {
            out.push(render(item, active, compact, id));
        });
        out
    }

    /// Source index highlighted by the indicator dots: the anchor slot's index.
    pub fn indicator_index(&self) -> Option<usize> {
        self.anchor_id
            .and_then(|id| self.model.slot(id))
            .map(|s| s.index)
    }

    /// Visits one indicator per source item with its active flag.
    pub fn for_each_indicator(&self, mut f: impl FnMut(usize, bool)) {
        let active = self.indicator_index();
        for index in 0..self.model.total_items() {
            f(index, active == Some(index));
        }
    }

    /// Position styling factors for every rendered item.
    pub fn for_each_item_position<H: ScrollHost + ?Sized>(
        &self,
        host: &H,
        mut f: impl FnMut(SlotId, ItemPosition),
    ) {
        let hot_zone = if self.mode.is_compact() {
            0.0
        } else {
            self.options.hot_zone_size
        };
        let viewport = host.bounds();
        // Read all geometry first, then hand out results.
        let items = collect_items(host);
        for item in &items {
            f(item.id, item_position(viewport, item.bounds, hot_zone));
        }
    }

    fn rebalance_when_needed<H: ScrollHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        if self.pending.is_some() {
            vtrace!("rebalance dropped: correction pending");
            return Ok(());
        }
        if self.animator.is_active() {
            return Ok(());
        }
        let due = match self.mode.trigger_policy() {
            TriggerPolicy::Edge => at_viewport_edge(
                host.scroll_left(),
                host.scroll_width(),
                host.client_width(),
                self.options.edge_size,
            ),
            TriggerPolicy::ScrollEnd => !self.is_scrolling && !self.is_touching,
        };
        if due {
            self.rebalance_window(&mut *host)?;
        }
        Ok(())
    }

    /// Picks the anchor from live geometry and replaces the window around it.
    ///
    /// Returns the anchor, or `None` when there is nothing laid out to anchor on. A changed
    /// window leaves a pending correction behind.
    fn rebalance_window<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Result<Option<SlotId>> {
        let viewport = host.bounds();
        let items = collect_items(&*host);
        let Some(anchor) = self.mode.anchor_policy().select(viewport, &items) else {
            return Ok(None);
        };
        let Some(strategy) = self.strategy(&*host, &items) else {
            vtrace!("rebalance: item size unknown");
            return Ok(None);
        };
        let Some(bounds) = items.iter().find(|it| it.id == anchor).map(|it| it.bounds) else {
            return Ok(None);
        };

        let scroll_left = host.scroll_left();
        let restore_focus = a11y::capture_focus(&*host);
        let slots = ringview::rebalance(&mut self.model, anchor, strategy)?;
        // Compact windows compare by content: the same items in the same order keep the
        // current slots.
        let changed = if self.mode.is_compact() {
            !self.model.same_indexes(&slots)
        } else {
            slots != self.model.slots()
        };
        if changed {
            self.model.replace_slots(slots);
        }

        self.anchor_id = Some(anchor);
        if self.mode.is_compact() || !self.active_id.is_some_and(|id| self.model.contains(id)) {
            self.active_id = Some(anchor);
        }
        if !changed {
            vtrace!(anchor, "rebalance: window unchanged");
            return Ok(Some(anchor));
        }

        self.hold_snap(host);
        self.pending = Some(PendingSync {
            beacon: SyncBeacon {
                id: anchor,
                bounds,
                scroll_left,
            },
            restore_focus,
        });
        vdebug!(anchor, window = self.model.len(), scroll_left, "rebalanced");
        self.notify();
        Ok(Some(anchor))
    }

    fn strategy<H: ScrollHost + ?Sized>(
        &mut self,
        host: &H,
        items: &[ringview::ItemGeometry],
    ) -> Option<RebalanceStrategy> {
        match self.mode {
            PlatformMode::Compact => {
                Some(RebalanceStrategy::ByCount(self.options.offscreen_items))
            }
            PlatformMode::Standard => {
                let item_size = match self.item_size {
                    Some(size) => size,
                    None => {
                        let size = measure_item_size(host.bounds(), host.scroll_left(), items)
                            .filter(|s| *s > 0.0)?;
                        vdebug!(size, "measured item size");
                        *self.item_size.insert(size)
                    }
                };
                Some(RebalanceStrategy::BySize {
                    container_width: host.client_width(),
                    item_size,
                    layout: SizeLayout::Leading,
                })
            }
        }
    }

    /// Nudges the scroll offset so the anchor is back where the beacon saw it.
    ///
    /// Returns `false` while the anchor element is not rendered yet; the correction stays pending.
    fn apply_correction<H: ScrollHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let Some(pending) = self.pending else {
            return true;
        };
        let Some(bounds) = host.item_bounds(pending.beacon.id) else {
            vtrace!(anchor = pending.beacon.id, "correction deferred: anchor not rendered");
            return false;
        };
        let delta = pending.beacon.correction(bounds);
        if delta != 0.0 {
            // Relative: the container may have kept scrolling since the capture.
            let at = host.scroll_left();
            host.set_scroll_left(at + delta);
        }
        self.pending = None;
        if self.mode.trigger_policy() == TriggerPolicy::Edge {
            self.skip = self.options.skip_after_sync;
        }
        self.release_snap(&mut *host);
        if pending.restore_focus {
            a11y::restore_focus(&mut *host, pending.beacon.id);
        }
        vtrace!(anchor = pending.beacon.id, delta, "scroll corrected");
        true
    }

    fn autocenter<H: ScrollHost + ?Sized>(&mut self, host: &mut H, now_ms: u64) {
        if self.animator.is_active() {
            return;
        }
        let items = collect_items(&*host);
        let Some((id, distance)) = closest_to_center(host.bounds(), &items) else {
            return;
        };
        self.active_id = Some(id);
        if distance.abs() > 1.0 {
            let to = host.scroll_left() + distance;
            self.start_animation(host, to, now_ms);
        }
    }

    fn start_animation<H: ScrollHost + ?Sized>(&mut self, host: &mut H, to: f64, now_ms: u64) {
        let compact = self.mode.is_compact();
        let duration_ms = if compact {
            self.options.compact_recenter_duration_ms
        } else {
            self.options.recenter_duration_ms
        };
        let options = AnimateScrollOptions::new(to, duration_ms)
            .with_absolute(compact)
            .with_max_distance(self.options.max_animated_scroll_size);
        self.animator.start(&*host, options, now_ms);
        if compact {
            // Snapping keeps the offset from animating.
            self.hold_snap(host);
        }
    }

    fn on_animation_end<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        done: Completion,
    ) -> Result<()> {
        self.release_snap(&mut *host);
        if done.is_cancelled() {
            return Ok(());
        }
        if self.mode.is_compact() {
            self.is_scrolling = false;
        }
        self.rebalance_when_needed(host)
    }

    fn hold_snap<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        if !self.snap_disabled {
            host.set_scroll_snap(false);
            self.snap_disabled = true;
        }
    }

    fn release_snap<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        if self.snap_disabled && self.pending.is_none() && !self.animator.is_active() {
            host.set_scroll_snap(true);
            self.snap_disabled = false;
        }
    }
}
