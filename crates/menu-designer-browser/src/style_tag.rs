//! The injected mobile icon stylesheet.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use menu_designer_core::constants::STYLE_ELEMENT_ID;
use menu_designer_core::{MobileIconStyles, PlatformError};

use crate::js_error;

/// Write `styles` into the page's single icon `<style>` element.
///
/// The element is created in `<head>` on first use and its text is replaced
/// wholesale afterwards, so repeated calls never stack rules.
pub fn apply_mobile_icon_styles(
    document: &Document,
    styles: &MobileIconStyles,
) -> Result<(), PlatformError> {
    let element = match document.get_element_by_id(STYLE_ELEMENT_ID) {
        Some(element) => element,
        None => {
            let element = document
                .create_element("style")
                .map_err(|e| js_error("create style element", e))?;
            element.set_id(STYLE_ELEMENT_ID);
            let head: HtmlElement = match document.head() {
                Some(head) => head.unchecked_into(),
                None => document
                    .body()
                    .ok_or_else(|| PlatformError::from("document has no head or body"))?,
            };
            head.append_child(&element)
                .map_err(|e| js_error("append style element", e))?;
            element
        }
    };

    let css = styles.to_css();
    tracing::debug!(bytes = css.len(), "mobile icon styles updated");
    element.set_text_content(Some(&css));
    Ok(())
}
