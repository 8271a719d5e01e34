use ringview::{Bounds, ScrollContainer, SlotId, ViewModel};
use ringview_adapter::{FocusHost, Options, Synchronizer};

// Example: a simulated strip of 100-unit items in a 300-unit viewport.
//
// An adapter would:
// - render one element per slot, keyed by slot id, whenever the window changes
// - forward scroll events to on_scroll and call on_frame once per animation frame
// - let the synchronizer write the scroll offset through ScrollContainer
struct Strip {
    slots: Vec<SlotId>,
    scroll_left: f64,
}

impl Strip {
    const ITEM: f64 = 100.0;
    const VIEWPORT: f64 = 300.0;

    fn render(&mut self, view: &ViewModel) {
        self.slots = view.slots().iter().map(|s| s.id).collect();
    }
}

impl ScrollContainer for Strip {
    fn scroll_left(&self) -> f64 {
        self.scroll_left
    }

    fn set_scroll_left(&mut self, offset: f64) {
        let max = (self.scroll_width() - Self::VIEWPORT).max(0.0);
        self.scroll_left = offset.clamp(0.0, max);
    }

    fn client_width(&self) -> f64 {
        Self::VIEWPORT
    }

    fn scroll_width(&self) -> f64 {
        self.slots.len() as f64 * Self::ITEM
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(0.0, Self::VIEWPORT)
    }

    fn for_each_item(&self, f: &mut dyn FnMut(SlotId, Bounds)) {
        for (i, id) in self.slots.iter().enumerate() {
            f(*id, Bounds::new(i as f64 * Self::ITEM - self.scroll_left, Self::ITEM));
        }
    }
}

impl FocusHost for Strip {}

fn main() -> ringview::Result<()> {
    let items: Vec<String> = (0..10).map(|i| format!("card-{i}")).collect();
    let mut sync = Synchronizer::new(items.len(), 1280.0, Options::new());
    let mut strip = Strip {
        slots: Vec::new(),
        scroll_left: 0.0,
    };

    strip.render(sync.view());
    sync.mount(&mut strip)?;
    strip.render(sync.view());
    sync.on_materialized(&mut strip);
    println!("mounted: offset={} state={:?}", strip.scroll_left, sync.state());

    // The user drags towards the left edge.
    let mut now_ms = 0u64;
    strip.set_scroll_left(40.0);
    sync.on_scroll(&mut strip, now_ms)?;
    println!("rebalanced: state={:?} beacon={:?}", sync.state(), sync.pending_beacon());

    strip.render(sync.view());
    loop {
        now_ms += 16;
        sync.on_frame(&mut strip, now_ms)?;
        if now_ms % 160 == 0 {
            println!("t={now_ms} offset={:.1} state={:?}", strip.scroll_left, sync.state());
        }
        if now_ms > 1_200 && !sync.is_animating() {
            break;
        }
    }

    let labels = sync.render(&items, |item, active, _, _| {
        if active { format!("[{item}]") } else { item.clone() }
    });
    println!("done: {}", labels.join(" "));
    Ok(())
}
