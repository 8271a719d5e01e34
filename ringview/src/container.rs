use crate::{Bounds, SlotId};

/// The scroll container the engine drives: a horizontally scrolling box whose children are the
/// rendered slots, in window order.
///
/// Implemented by the UI layer (DOM element, native scroll view, test double). The engine never
/// keeps references to UI objects between calls; it reads geometry fresh each time.
pub trait ScrollContainer {
    /// Current horizontal scroll offset.
    fn scroll_left(&self) -> f64;

    /// Writes the horizontal scroll offset. Implementations may clamp to the scrollable range.
    fn set_scroll_left(&mut self, offset: f64);

    /// Visible width of the container.
    fn client_width(&self) -> f64;

    /// Total scrollable content width.
    fn scroll_width(&self) -> f64;

    /// The container's own bounds in viewport coordinates.
    fn bounds(&self) -> Bounds;

    /// Visits every rendered slot element, left to right, with its current bounds.
    fn for_each_item(&self, f: &mut dyn FnMut(SlotId, Bounds));

    /// Bounds of the element rendering `id`, if it is currently present.
    fn item_bounds(&self, id: SlotId) -> Option<Bounds> {
        let mut found = None;
        self.for_each_item(&mut |item, bounds| {
            if found.is_none() && item == id {
                found = Some(bounds);
            }
        });
        found
    }

    /// Turns native scroll snapping on or off. Snapping fights programmatic offset corrections.
    fn set_scroll_snap(&mut self, _enabled: bool) {}
}
