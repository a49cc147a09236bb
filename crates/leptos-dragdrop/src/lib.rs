//! Leptos DragDrop Utilities
//!
//! HTML5 drag-and-drop for boards made of fixed drop columns.
//! Columns count nested dragenter/dragleave events so the highlight
//! does not flicker while the pointer crosses child elements.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Element};

/// Format used for the drag payload
pub const TRANSFER_FORMAT: &str = "text/plain";

/// Nested dragenter/dragleave bookkeeping for one column
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnterCounter {
    depth: u32,
}

impl EnterCounter {
    pub fn enter(&mut self) {
        self.depth += 1;
    }

    /// Returns true once the pointer has left the column and all of its children.
    pub fn leave(&mut self) -> bool {
        self.depth = self.depth.saturating_sub(1);
        self.depth == 0
    }

    pub fn reset(&mut self) {
        self.depth = 0;
    }

    pub fn is_inside(&self) -> bool {
        self.depth > 0
    }
}

/// A column is highlighted while the pointer is inside it, unless the drag started there.
pub fn should_highlight(counter: EnterCounter, origin: Option<usize>, column: usize) -> bool {
    counter.is_inside() && origin != Some(column)
}

/// Strip the element-id prefix from a transfer payload (`task-42` -> `42`).
pub fn payload_key<'a>(raw: &'a str, prefix: &str) -> &'a str {
    raw.strip_prefix(prefix).unwrap_or(raw)
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    /// Element id of the card being dragged
    pub dragging_id_read: ReadSignal<Option<String>>,
    pub dragging_id_write: WriteSignal<Option<String>>,
    /// Column the drag started from
    pub origin_read: ReadSignal<Option<usize>>,
    pub origin_write: WriteSignal<Option<usize>>,
    /// One enter counter per column
    pub counters_read: ReadSignal<Vec<EnterCounter>>,
    pub counters_write: WriteSignal<Vec<EnterCounter>>,
}

pub fn create_dnd_signals(columns: usize) -> DndSignals {
    let (dragging_id_read, dragging_id_write) = signal(None::<String>);
    let (origin_read, origin_write) = signal(None::<usize>);
    let (counters_read, counters_write) = signal(vec![EnterCounter::default(); columns]);
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        origin_read,
        origin_write,
        counters_read,
        counters_write,
    }
}

/// End drag operation and clear every column highlight
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_id_write.set(None);
    dnd.origin_write.set(None);
    dnd.counters_write.update(|counters| counters.iter_mut().for_each(EnterCounter::reset));
}

/// Whether `element_id` is the card currently in flight (tracked)
pub fn is_dragging(dnd: &DndSignals, element_id: &str) -> bool {
    dnd.dragging_id_read.with(|id| id.as_deref() == Some(element_id))
}

/// Whether `column` should show its drop highlight (tracked)
pub fn is_highlighted(dnd: &DndSignals, column: usize) -> bool {
    let counter = dnd
        .counters_read
        .with(|counters| counters.get(column).copied().unwrap_or_default());
    should_highlight(counter, dnd.origin_read.get(), column)
}

/// Create dragstart handler for a draggable card
/// Records the payload and the origin column
pub fn make_on_dragstart(dnd: DndSignals, element_id: String, column: usize) -> impl Fn(DragEvent) + Clone + 'static {
    move |ev: DragEvent| {
        if let Some(dt) = ev.data_transfer() {
            let _ = dt.set_data(TRANSFER_FORMAT, &element_id);
            dt.set_effect_allowed("move");
        }
        dnd.dragging_id_write.set(Some(element_id.clone()));
        dnd.origin_write.set(Some(column));
    }
}

/// Create dragend handler; fires on the source card whether or not a drop happened
pub fn make_on_dragend(dnd: DndSignals) -> impl Fn(DragEvent) + Copy + 'static {
    move |_ev: DragEvent| end_drag(&dnd)
}

/// Dragover handler for drop columns; suppressing the default is what allows a drop
pub fn on_dragover(ev: DragEvent) {
    ev.prevent_default();
    if let Some(dt) = ev.data_transfer() {
        dt.set_drop_effect("move");
    }
}

/// Create dragenter handler for a column
pub fn make_on_dragenter(dnd: DndSignals, column: usize) -> impl Fn(DragEvent) + Copy + 'static {
    move |_ev: DragEvent| {
        dnd.counters_write.update(|counters| {
            if let Some(counter) = counters.get_mut(column) {
                counter.enter();
            }
        });
    }
}

/// Create dragleave handler for a column
pub fn make_on_dragleave(dnd: DndSignals, column: usize) -> impl Fn(DragEvent) + Copy + 'static {
    move |_ev: DragEvent| {
        dnd.counters_write.update(|counters| {
            if let Some(counter) = counters.get_mut(column) {
                counter.leave();
            }
        });
    }
}

/// Create drop handler for a column container
/// Calls `on_drop(payload, container_id)`: the raw transfer payload and the
/// DOM id of the element the handler is attached to.
pub fn make_on_drop<F>(dnd: DndSignals, on_drop: F) -> impl Fn(DragEvent) + Clone + 'static
where
    F: Fn(String, String) + Clone + 'static,
{
    move |ev: DragEvent| {
        ev.prevent_default();
        let payload = ev
            .data_transfer()
            .and_then(|dt| dt.get_data(TRANSFER_FORMAT).ok())
            .filter(|raw| !raw.is_empty())
            .or_else(|| dnd.dragging_id_read.get_untracked());
        let container_id = ev
            .current_target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .map(|el| el.id())
            .unwrap_or_default();

        end_drag(&dnd);

        if let Some(payload) = payload {
            on_drop(payload, container_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_enter_leave_keeps_highlight() {
        let mut counter = EnterCounter::default();
        counter.enter(); // column
        counter.enter(); // child card
        assert!(!counter.leave()); // left the child, still in column
        assert!(counter.is_inside());
        assert!(counter.leave());
        assert!(!counter.is_inside());
    }

    #[test]
    fn test_leave_without_enter_saturates() {
        let mut counter = EnterCounter::default();
        assert!(counter.leave());
        counter.enter();
        assert!(counter.is_inside());
    }

    #[test]
    fn test_origin_column_never_highlights() {
        let mut counter = EnterCounter::default();
        counter.enter();
        assert!(!should_highlight(counter, Some(1), 1));
        assert!(should_highlight(counter, Some(0), 1));
        assert!(should_highlight(counter, None, 1));
        assert!(!should_highlight(EnterCounter::default(), Some(0), 1));
    }

    #[test]
    fn test_payload_key() {
        assert_eq!(payload_key("task-Nabc", "task"), "-Nabc");
        assert_eq!(payload_key("task42", "task"), "42");
        assert_eq!(payload_key("42", "task"), "42");
    }
}
