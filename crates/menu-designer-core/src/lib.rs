//! menu-designer-core: dropdown menu behaviour without a DOM.
//!
//! This crate provides:
//! - `MenuEngine` - open/close state machine, hover intent, focus return
//! - `Layout` - width clamping, justification and edge-avoidance positioning
//! - `MenuSurface` / `HoverScheduler` - the platform seams the engine runs against
//! - `MenuConfig` - typed configuration read from the rendered markup

pub mod color;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod hover;
pub mod layout;
pub mod platform;
pub mod style;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use color::{Rgba, parse_rgb};
pub use config::{MenuConfig, MenuContext, PanelMarkup};
pub use engine::MenuEngine;
pub use error::MenuError;
pub use hover::HoverTimer;
pub use layout::{Layout, LayoutMeasurement, LayoutReport, clamp_width, is_desktop};
pub use platform::{HoverScheduler, MenuSurface, PlatformError};
pub use style::MobileIconStyles;
pub use types::{
    HoverAction, Justification, LeftOffset, OpenState, Rect, RelatedTarget, StyleProp, Trigger,
    WidthMode,
};
