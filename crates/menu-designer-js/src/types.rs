//! Types exposed to JavaScript via wasm-bindgen.

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

use menu_designer_core::{Justification, LayoutReport};

/// Result of a layout pass.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsLayoutReport {
    /// Passes run (2 after a justification swap).
    pub passes: u8,
    pub swapped: bool,
    /// "left", "center" or "right".
    pub justification: String,
    /// Panel width in px.
    pub width: f64,
}

impl From<LayoutReport> for JsLayoutReport {
    fn from(report: LayoutReport) -> Self {
        let justification = match report.justification {
            Justification::Left => "left",
            Justification::Center => "center",
            Justification::Right => "right",
        };
        Self {
            passes: report.passes,
            swapped: report.swapped,
            justification: justification.to_string(),
            width: report.width,
        }
    }
}
