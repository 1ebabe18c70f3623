//! Browser DOM layer for menu designer dropdowns.
//!
//! This crate implements the core's platform traits over `web-sys` and wires
//! DOM events to a `MenuEngine`. It assumes a `wasm32-unknown-unknown` target
//! environment.
//!
//! # Architecture
//!
//! - `dom`: `DomSurface`, the `MenuSurface` over one menu's markup
//! - `timer`: `TimeoutScheduler`, hover intent on `setTimeout`
//! - `events`: focusout / keydown extraction
//! - `instance`: `attach` / `attach_all` and listener ownership
//! - `style_tag`: the injected mobile icon stylesheet
//!
//! # Re-exports
//!
//! This crate re-exports `menu-designer-core` for convenience, so consumers
//! only need to depend on `menu-designer-browser`.

// Re-export core crate
pub use menu_designer_core;
pub use menu_designer_core::*;

pub mod dom;
pub mod events;
pub mod instance;
pub mod style_tag;
pub mod timer;

pub use dom::DomSurface;
pub use events::{classify_focus_out, keydown_key};
pub use instance::{DomEngine, MenuInstance, attach, attach_all};
pub use style_tag::apply_mobile_icon_styles;
pub use timer::TimeoutScheduler;

/// Convert a thrown JS value into a platform error with context.
pub(crate) fn js_error(context: &str, err: wasm_bindgen::JsValue) -> PlatformError {
    PlatformError(format!("{context}: {err:?}"))
}
