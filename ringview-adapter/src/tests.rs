use crate::*;

use alloc::vec::Vec;
use ringview::{Bounds, ScrollContainer, SlotId, ViewModel};
use std::sync::{Arc, Mutex};

/// A horizontal strip of equally sized slot elements, rendered from a view model.
#[derive(Debug)]
struct Strip {
    slots: Vec<SlotId>,
    item_width: f64,
    client_width: f64,
    scroll_left: f64,
    snap: bool,
    focused: Option<FocusTarget>,
    focus_visible: bool,
}

impl Strip {
    fn new(item_width: f64, client_width: f64) -> Self {
        Self {
            slots: Vec::new(),
            item_width,
            client_width,
            scroll_left: 0.0,
            snap: true,
            focused: None,
            focus_visible: false,
        }
    }

    /// Re-renders keyed by slot id: elements of retained slots survive, focus on a removed slot
    /// is lost, and the offset is clamped to the new content width.
    fn render(&mut self, model: &ViewModel) {
        self.slots = model.slots().iter().map(|s| s.id).collect();
        let lost = self
            .focused
            .and_then(FocusTarget::slot)
            .is_some_and(|id| !self.slots.contains(&id));
        if lost {
            self.focused = None;
        }
        let max = (self.scroll_width() - self.client_width).max(0.0);
        self.scroll_left = self.scroll_left.clamp(0.0, max);
    }
}

impl ScrollContainer for Strip {
    fn scroll_left(&self) -> f64 {
        self.scroll_left
    }

    fn set_scroll_left(&mut self, offset: f64) {
        let max = (self.scroll_width() - self.client_width).max(0.0);
        self.scroll_left = offset.clamp(0.0, max);
    }

    fn client_width(&self) -> f64 {
        self.client_width
    }

    fn scroll_width(&self) -> f64 {
        (self.slots.len() as f64 * self.item_width).max(self.client_width)
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(0.0, self.client_width)
    }

    fn for_each_item(&self, f: &mut dyn FnMut(SlotId, Bounds)) {
        for (i, id) in self.slots.iter().enumerate() {
            let left = i as f64 * self.item_width - self.scroll_left;
            f(*id, Bounds::new(left, self.item_width));
        }
    }

    fn set_scroll_snap(&mut self, enabled: bool) {
        self.snap = enabled;
    }
}

impl FocusHost for Strip {
    fn focused(&self) -> Option<FocusTarget> {
        self.focused
    }

    fn is_focus_visible(&self) -> bool {
        self.focus_visible
    }

    fn focus(&mut self, target: FocusTarget) {
        self.focused = Some(target);
    }
}

fn ids(model: &ViewModel) -> Vec<SlotId> {
    model.slots().iter().map(|s| s.id).collect()
}

fn indexes(model: &ViewModel) -> Vec<usize> {
    model.slots().iter().map(|s| s.index).collect()
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-6, "{a} != {b}");
}

/// Renders the seed window, mounts, renders the first real window and completes mounting.
fn mounted(sync: &mut Synchronizer, strip: &mut Strip) {
    strip.render(sync.view());
    sync.mount(strip).unwrap();
    assert_eq!(sync.state(), SyncState::Mounting);
    strip.render(sync.view());
    sync.on_materialized(strip);
    assert_eq!(sync.state(), SyncState::Idle);
}

/// 10 items of 100 units in a 300 unit wide container.
fn standard() -> (Synchronizer, Strip) {
    let mut sync = Synchronizer::new(10, 1024.0, Options::new());
    let mut strip = Strip::new(100.0, 300.0);
    mounted(&mut sync, &mut strip);
    (sync, strip)
}

/// 5 full-width items of 300 units.
fn compact() -> (Synchronizer, Strip) {
    let mut sync = Synchronizer::new(5, 320.0, Options::new());
    let mut strip = Strip::new(300.0, 300.0);
    mounted(&mut sync, &mut strip);
    (sync, strip)
}

/// Ticks frames every 16ms until the running animation ends. Returns the last frame time.
fn run_animation(sync: &mut Synchronizer, strip: &mut Strip, start_ms: u64) -> u64 {
    let mut now = start_ms;
    while sync.is_animating() {
        now += 16;
        sync.on_frame(strip, now).unwrap();
        assert!(now < start_ms + 10_000, "animation did not finish");
    }
    now
}

#[test]
fn options_defaults() {
    let options = Options::default();
    assert_eq!(options.edge_size, 200.0);
    assert_eq!(options.autocenter_delay_ms, 500);
    assert_eq!(options.max_animated_scroll_size, Some(400.0));
    assert_eq!(options.hot_zone_size, 0.4);
    assert_eq!(options.offscreen_items, 1);
    assert_eq!(options.scroll_end_delay_ms, 200);
    assert_eq!(options.skip_after_sync, 3);
    assert!(!options.allow_root_focus);

    let options = Options::new()
        .with_edge_size(50.0)
        .with_recenter_durations(100, 400)
        .with_aria_label(Some("Gallery"));
    assert_eq!(options.edge_size, 50.0);
    assert_eq!(options.recenter_duration_ms, 100);
    assert_eq!(options.compact_recenter_duration_ms, 400);
    assert_eq!(options.aria_label.as_deref(), Some("Gallery"));
}

#[test]
fn platform_mode_detection() {
    assert_eq!(PlatformMode::detect(320.0, 640.0), PlatformMode::Compact);
    assert_eq!(PlatformMode::detect(640.0, 640.0), PlatformMode::Standard);
    assert_eq!(
        PlatformMode::resolve(Some(PlatformMode::Standard), 320.0, 640.0),
        PlatformMode::Standard
    );
    assert_eq!(PlatformMode::Compact.trigger_policy(), TriggerPolicy::ScrollEnd);
    assert_eq!(PlatformMode::Standard.anchor_policy(), AnchorPolicy::Leading);
}

#[test]
fn mount_waits_for_layout() {
    let mut sync = Synchronizer::new(10, 1024.0, Options::new());
    let mut strip = Strip::new(100.0, 300.0);
    assert_eq!(sync.state(), SyncState::Unmounted);

    sync.mount(&mut strip).unwrap();
    assert_eq!(sync.state(), SyncState::Unmounted);
    assert_eq!(sync.view().len(), 10);

    let mut empty = Synchronizer::new(0, 1024.0, Options::new());
    strip.render(empty.view());
    empty.mount(&mut strip).unwrap();
    assert_eq!(empty.state(), SyncState::Unmounted);
}

#[test]
fn standard_mount_builds_window_and_centres_anchor() {
    let (sync, strip) = standard();
    assert_eq!(sync.mode(), PlatformMode::Standard);
    assert_eq!(sync.item_size(), Some(100.0));
    assert_eq!(ids(sync.view()), [13, 12, 11, 1, 2, 3, 4, 5, 6]);
    assert_eq!(indexes(sync.view()), [7, 8, 9, 0, 1, 2, 3, 4, 5]);
    assert_eq!(sync.active_id(), Some(1));
    assert_eq!(sync.generation(), 1);
    assert_close(strip.scroll_left, 200.0);
    assert!(strip.snap);
}

#[test]
fn edge_rebalance_preserves_visual_position() {
    let (mut sync, mut strip) = standard();

    strip.set_scroll_left(50.0);
    sync.on_scroll(&mut strip, 1_000).unwrap();
    assert_eq!(sync.state(), SyncState::PendingSync);
    assert_eq!(ids(sync.view()), [16, 15, 14, 13, 12, 11, 1, 2, 3]);
    assert_eq!(indexes(sync.view()), [4, 5, 6, 7, 8, 9, 0, 1, 2]);
    assert_eq!(sync.active_id(), Some(1));
    assert!(!strip.snap);

    let beacon = sync.pending_beacon().unwrap();
    assert_eq!(beacon.id, 13);
    assert_close(beacon.bounds.left, -50.0);
    assert_close(beacon.scroll_left, 50.0);

    strip.render(sync.view());
    sync.on_frame(&mut strip, 1_016).unwrap();
    assert_eq!(sync.state(), SyncState::Idle);
    assert_close(strip.scroll_left, 350.0);
    assert_close(strip.item_bounds(13).unwrap().left, -50.0);
    assert!(strip.snap);
}

#[test]
fn scroll_events_after_correction_are_skipped() {
    let (mut sync, mut strip) = standard();
    strip.set_scroll_left(50.0);
    sync.on_scroll(&mut strip, 0).unwrap();
    strip.render(sync.view());
    sync.on_frame(&mut strip, 16).unwrap();
    let generation = sync.generation();

    strip.set_scroll_left(10.0);
    for _ in 0..3 {
        sync.on_scroll(&mut strip, 32).unwrap();
        assert_eq!(sync.generation(), generation);
        assert!(sync.pending_beacon().is_none());
    }
    sync.on_scroll(&mut strip, 48).unwrap();
    assert_eq!(sync.generation(), generation + 1);
    assert_eq!(sync.pending_beacon().map(|b| b.id), Some(sync.anchor_id().unwrap()));
}

#[test]
fn set_active_waits_for_the_pending_correction() {
    let (mut sync, mut strip) = standard();
    strip.set_scroll_left(50.0);
    sync.on_scroll(&mut strip, 1_000).unwrap();
    assert_eq!(sync.state(), SyncState::PendingSync);

    sync.set_active(&mut strip, 2, 1_000);
    assert_eq!(sync.active_id(), Some(2));
    assert!(!sync.is_animating());
    assert_eq!(sync.state(), SyncState::PendingSync);

    strip.render(sync.view());
    sync.on_frame(&mut strip, 1_016).unwrap();
    assert_close(strip.scroll_left, 350.0);
    assert_close(strip.item_bounds(13).unwrap().left, -50.0);
    assert_eq!(sync.state(), SyncState::AnimatingScroll);
    assert_eq!(sync.animation_target(), Some(600.0));

    run_animation(&mut sync, &mut strip, 1_016);
    assert_close(strip.scroll_left, 600.0);
    assert_close(strip.item_bounds(2).unwrap().center(), 150.0);
}

#[test]
fn rebalance_requests_are_coalesced_while_a_correction_is_pending() {
    let (mut sync, mut strip) = standard();
    strip.set_scroll_left(50.0);
    sync.on_scroll(&mut strip, 0).unwrap();
    let window = ids(sync.view());
    let generation = sync.generation();

    strip.set_scroll_left(20.0);
    sync.on_scroll(&mut strip, 8).unwrap();
    assert_eq!(ids(sync.view()), window);
    assert_eq!(sync.generation(), generation);
    assert_close(sync.pending_beacon().unwrap().scroll_left, 50.0);
}

#[test]
fn correction_waits_for_the_anchor_element() {
    let (mut sync, mut strip) = standard();
    strip.set_scroll_left(50.0);
    sync.on_scroll(&mut strip, 0).unwrap();

    strip.slots.clear();
    sync.on_frame(&mut strip, 16).unwrap();
    assert_eq!(sync.state(), SyncState::PendingSync);
    assert!(!sync.activate_with_offset(&mut strip, 1, 16));

    strip.render(sync.view());
    strip.scroll_left = 50.0;
    sync.on_frame(&mut strip, 32).unwrap();
    assert_eq!(sync.state(), SyncState::Idle);
    assert_close(strip.scroll_left, 350.0);
}

#[test]
fn autocenter_after_scroll_settles() {
    let (mut sync, mut strip) = standard();
    strip.set_scroll_left(240.0);
    sync.on_scroll(&mut strip, 0).unwrap();
    assert_eq!(sync.state(), SyncState::Idle);

    sync.on_frame(&mut strip, 400).unwrap();
    assert!(!sync.is_animating());

    sync.on_frame(&mut strip, 500).unwrap();
    assert_eq!(sync.state(), SyncState::AnimatingScroll);
    assert_eq!(sync.active_id(), Some(1));
    assert_eq!(sync.animation_target(), Some(200.0));

    run_animation(&mut sync, &mut strip, 500);
    assert_close(strip.scroll_left, 200.0);
    assert_eq!(sync.state(), SyncState::Idle);
    assert_eq!(sync.generation(), 1);
}

#[test]
fn activation_past_the_window_end_is_dropped() {
    let options = Options::new().with_edge_size(0.0);
    let mut sync = Synchronizer::new(3, 1024.0, options);
    let mut strip = Strip::new(100.0, 300.0);
    mounted(&mut sync, &mut strip);
    assert_eq!(ids(sync.view()), [6, 5, 4, 1, 2, 3, 7, 8, 9]);
    assert_eq!(indexes(sync.view()), [2, 1, 0, 0, 1, 2, 0, 1, 2]);

    sync.set_active(&mut strip, 9, 0);
    assert!(sync.is_animating());
    assert!(!sync.activate_with_offset(&mut strip, -1, 0));
    run_animation(&mut sync, &mut strip, 0);
    assert_close(strip.scroll_left, 600.0);

    assert!(!sync.activate_with_offset(&mut strip, 1, 1_000));
    assert_eq!(sync.active_id(), Some(9));
    assert!(sync.activate_with_offset(&mut strip, -1, 1_000));
    assert_eq!(sync.active_id(), Some(8));
}

#[test]
fn compact_mount_starts_from_a_single_slot() {
    let mut sync = Synchronizer::new(5, 320.0, Options::new());
    assert_eq!(sync.mode(), PlatformMode::Compact);
    assert_eq!(ids(sync.view()), [1]);

    let mut strip = Strip::new(300.0, 300.0);
    mounted(&mut sync, &mut strip);
    assert_eq!(ids(sync.view()), [2, 1, 3]);
    assert_eq!(indexes(sync.view()), [4, 0, 1]);
    assert_eq!(sync.active_id(), Some(1));
    assert_close(strip.scroll_left, 300.0);
}

#[test]
fn compact_activation_animates_then_rebalances() {
    let (mut sync, mut strip) = compact();

    assert!(sync.activate_with_offset(&mut strip, 1, 0));
    assert_eq!(sync.active_id(), Some(3));
    assert_eq!(sync.state(), SyncState::AnimatingScroll);
    assert!(!strip.snap);
    assert!(!sync.activate_with_offset(&mut strip, 1, 0));

    run_animation(&mut sync, &mut strip, 0);
    assert_close(strip.scroll_left, 600.0);
    assert_eq!(sync.state(), SyncState::PendingSync);
    assert_eq!(ids(sync.view()), [1, 3, 4]);
    assert_eq!(indexes(sync.view()), [0, 1, 2]);
    assert_eq!(sync.active_id(), Some(3));

    strip.render(sync.view());
    sync.on_frame(&mut strip, 1_000).unwrap();
    assert_eq!(sync.state(), SyncState::Idle);
    assert_close(strip.scroll_left, 300.0);
    assert_close(strip.item_bounds(3).unwrap().left, 0.0);
    assert!(strip.snap);

    assert!(sync.activate_with_offset(&mut strip, 1, 1_000));
    assert_eq!(sync.view().slot(sync.active_id().unwrap()).unwrap().index, 2);
}

#[test]
fn compact_rebalances_once_scrolling_stops() {
    let (mut sync, mut strip) = compact();

    strip.set_scroll_left(600.0);
    sync.on_scroll(&mut strip, 0).unwrap();
    assert!(sync.is_scrolling());
    assert_eq!(sync.anchor_id(), Some(3));
    assert!(!sync.activate_with_offset(&mut strip, 1, 0));

    sync.on_frame(&mut strip, 100).unwrap();
    assert_eq!(sync.state(), SyncState::Idle);
    assert_eq!(ids(sync.view()), [2, 1, 3]);

    sync.on_frame(&mut strip, 200).unwrap();
    assert!(!sync.is_scrolling());
    assert_eq!(sync.state(), SyncState::PendingSync);
    assert_eq!(ids(sync.view()), [1, 3, 4]);

    strip.render(sync.view());
    sync.on_frame(&mut strip, 216).unwrap();
    assert_close(strip.scroll_left, 300.0);

    // Nothing moved: the same window comes out and no correction is scheduled.
    let generation = sync.generation();
    sync.on_scroll(&mut strip, 300).unwrap();
    sync.on_frame(&mut strip, 500).unwrap();
    assert_eq!(sync.generation(), generation);
    assert_eq!(sync.state(), SyncState::Idle);
}

#[test]
fn compact_touch_blocks_activation_and_rebalancing() {
    let (mut sync, mut strip) = compact();

    sync.on_touch_start();
    assert!(sync.is_touching());
    assert!(!sync.activate_with_offset(&mut strip, 1, 0));

    strip.set_scroll_left(600.0);
    sync.on_scroll(&mut strip, 0).unwrap();
    sync.on_frame(&mut strip, 300).unwrap();
    assert_eq!(sync.state(), SyncState::Idle);
    assert_eq!(ids(sync.view()), [2, 1, 3]);

    sync.on_touch_end(400);
    sync.on_frame(&mut strip, 500).unwrap();
    assert_eq!(sync.state(), SyncState::Idle);
    sync.on_frame(&mut strip, 600).unwrap();
    assert_eq!(sync.state(), SyncState::PendingSync);
}

#[test]
fn stop_animation_cancels_and_releases_snap() {
    let (mut sync, mut strip) = compact();
    assert!(sync.activate_with_offset(&mut strip, -1, 0));
    sync.on_frame(&mut strip, 16).unwrap();
    assert!(!strip.snap);

    sync.stop_animation(&mut strip);
    assert!(!sync.is_animating());
    assert!(strip.snap);
    assert_eq!(sync.state(), SyncState::Idle);
    assert_eq!(ids(sync.view()), [2, 1, 3]);
}

#[test]
fn window_changes_are_reported() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let options = Options::new().with_on_window_change(Some(move |model: &ViewModel| {
        sink.lock().unwrap().push(model.len());
    }));
    let mut sync = Synchronizer::new(10, 1024.0, options);
    let mut strip = Strip::new(100.0, 300.0);
    mounted(&mut sync, &mut strip);
    assert_eq!(*seen.lock().unwrap(), [9]);

    sync.reset(4);
    assert_eq!(*seen.lock().unwrap(), [9, 4]);
    assert_eq!(sync.state(), SyncState::Unmounted);
}

#[test]
fn resize_across_the_breakpoint_resets_the_view() {
    let (mut sync, _strip) = standard();
    let generation = sync.generation();

    assert!(!sync.on_viewport_resize(900.0));
    assert_eq!(sync.item_size(), None);
    assert_eq!(sync.state(), SyncState::Idle);

    assert!(sync.on_viewport_resize(400.0));
    assert_eq!(sync.mode(), PlatformMode::Compact);
    assert_eq!(sync.state(), SyncState::Unmounted);
    assert_eq!(ids(sync.view()), [1]);
    assert_eq!(sync.view().total_items(), 10);
    assert_eq!(sync.generation(), generation + 1);

    let options = Options::new().with_mode_override(Some(PlatformMode::Standard));
    let mut forced = Synchronizer::new(10, 320.0, options);
    assert_eq!(forced.mode(), PlatformMode::Standard);
    assert!(!forced.on_viewport_resize(1200.0));
}

#[test]
fn arrow_keys_move_focus_and_activation() {
    let (mut sync, mut strip) = standard();
    strip.focused = Some(FocusTarget::Slot(1));
    strip.focus_visible = true;

    assert_eq!(
        sync.on_key(&mut strip, Key::ArrowRight, 0),
        KeyOutcome::Moved {
            focus: 2,
            activated: true
        }
    );
    assert_eq!(strip.focused, Some(FocusTarget::Slot(2)));
    assert_eq!(sync.active_id(), Some(2));

    assert_eq!(
        sync.on_key(&mut strip, Key::ArrowLeft, 8),
        KeyOutcome::Moved {
            focus: 1,
            activated: false
        }
    );
    run_animation(&mut sync, &mut strip, 8);

    strip.focused = Some(FocusTarget::Slot(13));
    let outcome = sync.on_key(&mut strip, Key::ArrowLeft, 1_000);
    assert!(matches!(outcome, KeyOutcome::Moved { focus: 6, .. }));
    assert_eq!(sync.on_key(&mut strip, Key::Other, 1_000), KeyOutcome::Ignored);
}

#[test]
fn enter_on_root_focuses_the_active_slot() {
    let (mut sync, mut strip) = standard();
    strip.focused = Some(FocusTarget::Root);
    assert_eq!(sync.on_key(&mut strip, Key::ArrowRight, 0), KeyOutcome::Ignored);
    assert_eq!(sync.on_key(&mut strip, Key::Enter, 0), KeyOutcome::Entered(1));
    assert_eq!(strip.focused, Some(FocusTarget::SlotContent(1)));

    let (mut small, mut strip) = compact();
    strip.focused = Some(FocusTarget::Root);
    assert_eq!(small.on_key(&mut strip, Key::Space, 0), KeyOutcome::Ignored);
}

#[test]
fn roving_tab_index() {
    let mut sync = Synchronizer::new(10, 1024.0, Options::new());
    assert_eq!(sync.slot_tab_index(1), 0);
    assert_eq!(sync.slot_tab_index(2), -1);
    assert_eq!(sync.root_tab_index(), -1);

    let mut strip = Strip::new(100.0, 300.0);
    mounted(&mut sync, &mut strip);
    assert_eq!(sync.slot_tab_index(13), -1);
    assert_eq!(sync.slot_tab_index(1), 0);

    let options = Options::new()
        .with_allow_root_focus(true)
        .with_aria_label(Some("Products"));
    let sync = Synchronizer::new(3, 1024.0, options);
    assert_eq!(sync.root_tab_index(), 0);
    assert_eq!(sync.aria_label(), Some("Products"));
}

#[test]
fn keyboard_focus_survives_window_replacement() {
    let (mut sync, mut strip) = standard();
    strip.focused = Some(FocusTarget::Slot(6));
    strip.focus_visible = true;

    strip.set_scroll_left(50.0);
    sync.on_scroll(&mut strip, 0).unwrap();
    strip.render(sync.view());
    assert_eq!(strip.focused, None);

    sync.on_frame(&mut strip, 16).unwrap();
    assert_eq!(strip.focused, Some(FocusTarget::Slot(13)));

    // Pointer focus is left alone.
    let (mut sync, mut strip) = standard();
    strip.focused = Some(FocusTarget::Slot(6));
    strip.set_scroll_left(50.0);
    sync.on_scroll(&mut strip, 0).unwrap();
    strip.render(sync.view());
    sync.on_frame(&mut strip, 16).unwrap();
    assert_eq!(strip.focused, None);
}

#[test]
fn render_pairs_slots_with_items() {
    let (sync, strip) = compact();
    let items = ["a", "b", "c", "d", "e"];
    let rendered = sync.render(&items, |item, active, compact, id| (*item, active, compact, id));
    assert_eq!(
        rendered,
        [
            ("e", false, true, 2),
            ("a", true, true, 1),
            ("b", false, true, 3)
        ]
    );

    assert_eq!(sync.indicator_index(), Some(0));
    let mut dots = Vec::new();
    sync.for_each_indicator(|index, active| dots.push((index, active)));
    assert_eq!(dots.len(), 5);
    assert_eq!(dots.iter().filter(|(_, active)| *active).count(), 1);
    assert_eq!(dots[0], (0, true));

    let mut positions = Vec::new();
    sync.for_each_item_position(&strip, |id, pos| positions.push((id, pos)));
    assert_eq!(positions.len(), 3);
    let (id, centred) = positions[1];
    assert_eq!(id, 1);
    assert_close(centred.pos, 1.0);
    assert_close(centred.full_pos, 1.0);
    assert_close(positions[0].1.pos, 0.0);
    assert_close(positions[2].1.pos, 0.0);
}

#[test]
fn standard_positions_use_the_hot_zone() {
    let (sync, strip) = standard();
    let mut positions = Vec::new();
    sync.for_each_item_position(&strip, |id, pos| positions.push((id, pos)));
    let centred = positions.iter().find(|(id, _)| *id == 1).unwrap().1;
    assert_close(centred.pos, 1.0);
    assert_close(centred.full_pos, 0.5);
    let outside = positions.iter().find(|(id, _)| *id == 2).unwrap().1;
    assert_close(outside.pos, 0.0);
}
