//! Browser event extraction for menu handlers.
//!
//! Turns raw DOM events into the plain values the engine consumes.

use wasm_bindgen::JsCast;
use web_sys::{Event, FocusEvent, KeyboardEvent, Node};

use menu_designer_core::RelatedTarget;

/// Classify where focus went on a `focusout` inside the menu.
///
/// `root` is the menu root; the toggle and the panel both live under it.
pub fn classify_focus_out(event: &FocusEvent, root: &Node) -> RelatedTarget {
    let Some(target) = event.related_target() else {
        return RelatedTarget::None;
    };
    match target.dyn_ref::<Node>() {
        Some(node) if root.contains(Some(node)) => RelatedTarget::InsideMenu,
        _ => RelatedTarget::OutsideMenu,
    }
}

/// The `key` of a keyboard event, or None for any other event.
pub fn keydown_key(event: &Event) -> Option<String> {
    event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key)
}
