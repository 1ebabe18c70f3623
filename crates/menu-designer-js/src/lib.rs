//! WASM bindings for menu designer dropdowns.
//!
//! Attaches the interaction engine to server-rendered menus and exposes a
//! small handle API to page scripts.

mod menu;
mod types;

pub use menu::*;
pub use types::*;

use menu_designer_core::MobileIconStyles;
use wasm_bindgen::prelude::*;

/// Install the panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    // Another bundle on the page may have installed one already.
    let _ = set_global_default(Registry::default().with(wasm_layer));
}

/// Override the navigation's mobile menu icon colours.
///
/// Empty or missing values drop the corresponding rule.
#[wasm_bindgen(js_name = setMobileIconStyles)]
pub fn set_mobile_icon_styles(
    background: Option<String>,
    fill: Option<String>,
) -> Result<(), JsError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsError::new("no document available"))?;
    let styles = MobileIconStyles::new(background, fill);
    menu_designer_browser::apply_mobile_icon_styles(&document, &styles)?;
    Ok(())
}
