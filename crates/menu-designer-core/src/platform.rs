//! Platform abstraction traits for menu operations.
//!
//! These traits define the interface between the engine and a concrete UI
//! (the browser DOM in practice, an in-memory fake in tests). The engine only
//! reads measurements and writes typed mutations through them, so the same
//! state machine and layout logic run unchanged on either side.

use crate::types::{HoverAction, Justification, Rect, StyleProp};

/// Error type for platform operations.
#[derive(Debug, Clone)]
pub struct PlatformError(pub String);

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for PlatformError {}

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError(s)
    }
}

/// The DOM contract of a single menu instance.
///
/// The surface owns lookups of the toggle, panel, enclosing navigation block
/// and responsive container. Measurements are live: the engine re-reads the
/// panel rectangle after writing styles and expects the new geometry.
pub trait MenuSurface {
    /// Current viewport width in px.
    fn viewport_width(&self) -> f64;

    /// Whether the panel element exists in the menu subtree.
    fn has_panel(&self) -> bool;

    /// Whether the menu sits inside a navigation block.
    fn has_nav_block(&self) -> bool;

    /// Rendered width of the panel (`offsetWidth`).
    fn panel_natural_width(&self) -> f64;

    /// Bounding rectangle of the panel.
    fn panel_rect(&self) -> Rect;

    /// Bounding rectangle of the enclosing navigation block.
    fn nav_rect(&self) -> Rect;

    /// Item justification of the enclosing navigation block, if it sets one.
    fn nav_justification(&self) -> Option<Justification>;

    /// Computed background colour of the responsive container.
    ///
    /// Returns None when the menu is not inside a responsive container.
    fn responsive_background(&self) -> Option<String>;

    /// Current inline value of a panel style property.
    fn panel_style(&self, prop: StyleProp) -> Option<String>;

    /// Set (or clear, with `None`) an inline panel style property.
    fn set_panel_style(&mut self, prop: StyleProp, value: Option<&str>);

    /// Whether the focused element is inside the menu root.
    fn focus_within(&self) -> bool;

    /// Move focus to the toggle control unless it already has it.
    fn focus_toggle(&mut self);

    /// Mirror the open state on the toggle (`aria-expanded`).
    fn set_expanded(&mut self, expanded: bool);

    /// Replace the panel's `menu-justified-*` class.
    fn set_justification_class(&mut self, justification: Option<Justification>);

    /// Toggle the rendering-only "justification swapped" marker.
    fn set_swapped_marker(&mut self, swapped: bool);
}

/// Single-shot timer facility for hover intent.
///
/// A scheduled action is delivered back to the engine through
/// `MenuEngine::fire_hover` once the delay elapses, unless its handle was
/// cancelled first.
pub trait HoverScheduler {
    type Handle;

    /// Schedule `action` to fire after `delay_ms`.
    fn schedule(&mut self, action: HoverAction, delay_ms: u32) -> Self::Handle;

    /// Cancel a pending timer. Cancelling an already-fired handle is a no-op.
    fn cancel(&mut self, handle: Self::Handle);
}
