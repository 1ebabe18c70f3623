//! MenuHandle - one attached menu, as seen from JavaScript.

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use menu_designer_browser::MenuInstance;

use crate::types::JsLayoutReport;

/// A live menu. Call `destroy()` to detach its listeners.
#[wasm_bindgen]
pub struct MenuHandle {
    instance: Option<MenuInstance>,
}

impl MenuHandle {
    fn new(instance: MenuInstance) -> Self {
        Self {
            instance: Some(instance),
        }
    }
}

#[wasm_bindgen]
impl MenuHandle {
    /// Whether any trigger holds the menu open. False once destroyed.
    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.instance.as_ref().is_some_and(MenuInstance::is_open)
    }

    /// The open flags as `{ click, focus, hover }`.
    #[wasm_bindgen(js_name = openedBy)]
    pub fn opened_by(&self) -> Result<JsValue, JsError> {
        let state = self
            .instance
            .as_ref()
            .map(MenuInstance::opened_by)
            .unwrap_or_default();
        serde_wasm_bindgen::to_value(&state)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Close the menu regardless of what opened it.
    pub fn close(&self) {
        if let Some(ref instance) = self.instance {
            instance.close();
        }
    }

    /// Re-run the layout pass.
    pub fn relayout(&self) -> Option<JsLayoutReport> {
        self.instance
            .as_ref()?
            .relayout()
            .map(JsLayoutReport::from)
    }

    /// Remove every listener and cancel pending timers.
    pub fn destroy(&mut self) {
        if self.instance.take().is_some() {
            tracing::debug!("menu detached");
        }
    }
}

/// Attach the engine to one `.wp-block-ollie-mega-menu` root.
#[wasm_bindgen]
pub fn attach(root: HtmlElement) -> Result<MenuHandle, JsError> {
    let instance = menu_designer_browser::attach(root)?;
    Ok(MenuHandle::new(instance))
}

/// Attach every menu on the page.
#[wasm_bindgen(js_name = attachAll)]
pub fn attach_all() -> Result<Vec<MenuHandle>, JsError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsError::new("no document available"))?;
    let instances = menu_designer_browser::attach_all(&document)?;
    Ok(instances.into_iter().map(MenuHandle::new).collect())
}
