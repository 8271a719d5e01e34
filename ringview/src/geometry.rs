//! Pure geometry helpers over live element bounds.

use alloc::vec::Vec;

use crate::{Bounds, ItemGeometry, ItemPosition, ScrollContainer, SlotId};

/// Reads every rendered item with its current bounds, in window order.
pub fn collect_items<C: ScrollContainer + ?Sized>(container: &C) -> Vec<ItemGeometry> {
    let mut out = Vec::new();
    container.for_each_item(&mut |id, bounds| out.push(ItemGeometry { id, bounds }));
    out
}

/// Horizontal centre of the container in viewport coordinates.
pub fn center<C: ScrollContainer + ?Sized>(container: &C) -> f64 {
    container.bounds().center()
}

/// The item whose centre is closest to `viewport`'s centre. Ties keep the leftmost item.
pub fn centroid_anchor(viewport: Bounds, items: &[ItemGeometry]) -> Option<SlotId> {
    closest_to_center(viewport, items).map(|(id, _)| id)
}

/// Like [`centroid_anchor`], but also returns the signed distance (item centre minus viewport
/// centre).
pub fn closest_to_center(viewport: Bounds, items: &[ItemGeometry]) -> Option<(SlotId, f64)> {
    let target = viewport.center();
    let mut best: Option<(SlotId, f64)> = None;
    for item in items {
        let distance = item.bounds.center() - target;
        match best {
            Some((_, d)) if d.abs() <= distance.abs() => {}
            _ => best = Some((item.id, distance)),
        }
    }
    best
}

/// The first item whose right edge is strictly past the viewport's left edge, i.e. the first
/// item that is at least partially visible.
pub fn leading_anchor(viewport: Bounds, items: &[ItemGeometry]) -> Option<SlotId> {
    items
        .iter()
        .find(|item| item.bounds.right() > viewport.left)
        .map(|item| item.id)
}

/// Whether the scroll offset is within `edge` of either scroll extent.
pub fn at_viewport_edge(
    scroll_left: f64,
    scroll_width: f64,
    client_width: f64,
    edge: f64,
) -> bool {
    scroll_left < edge || scroll_width - client_width - scroll_left < edge
}

/// Measures the item pitch (size plus any gap) from the first two rendered items.
///
/// Uses the distance from the container's left edge to the second item's left edge, corrected
/// by the scroll offset; with a single item, its right edge. Returns `None` with no items.
pub fn measure_item_size(
    viewport: Bounds,
    scroll_left: f64,
    items: &[ItemGeometry],
) -> Option<f64> {
    if let Some(second) = items.get(1) {
        return Some(second.bounds.left - viewport.left + scroll_left);
    }
    items
        .first()
        .map(|first| first.bounds.right() - viewport.left + scroll_left)
}

/// Styling factors for one item.
///
/// With `hot_zone > 0`, the hot zone spans from `hot_zone * width` to `(1 - hot_zone) * width`
/// inside the viewport and items outside of it get zeros. With `hot_zone == 0`, both factors are
/// `1 - distance / width`, reaching zero one viewport width away from the centre.
pub fn item_position(viewport: Bounds, item: Bounds, hot_zone: f64) -> ItemPosition {
    let center = viewport.center();
    let item_center = item.center();

    if hot_zone == 0.0 {
        let distance = (item_center - center).abs();
        if viewport.width <= 0.0 || distance >= viewport.width {
            return ItemPosition::default();
        }
        let pos = 1.0 - distance / viewport.width;
        return ItemPosition { pos, full_pos: pos };
    }

    let z1 = viewport.left + viewport.width * hot_zone;
    let z2 = viewport.left + viewport.width * (1.0 - hot_zone);
    let (min, max) = if z1 <= z2 { (z1, z2) } else { (z2, z1) };

    if !(item_center > min && item_center < max) {
        return ItemPosition::default();
    }

    let full_pos = (item_center - min) / (max - min);
    let pos = if item_center <= center {
        (item_center - min) / (center - min)
    } else {
        1.0 - (item_center - center) / (max - center)
    };
    ItemPosition { pos, full_pos }
}
