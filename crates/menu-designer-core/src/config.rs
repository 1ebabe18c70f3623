//! Menu configuration snapshot.
//!
//! The server renderer encodes a menu's configuration in three places: the
//! interactivity context JSON on the root element, the panel's class list,
//! and two `data-*` attributes on the panel. `MenuConfig::from_markup` folds
//! them into one typed, read-only value.

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{DEFAULT_CUSTOM_WIDTH, HOVER_BASE_DELAY_MS, HOVER_DELAY_PER_PX_MS};
use crate::error::MenuError;
use crate::types::{Justification, OpenState, WidthMode};

/// Read-only configuration of one menu instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuConfig {
    pub width: WidthMode,
    /// Configured width in px, used when `width` is `custom`.
    pub custom_width: u32,
    /// Menu-level justification. None defers to the navigation block.
    #[serde(deserialize_with = "deserialize_justification")]
    pub justify_menu: Option<Justification>,
    /// Vertical gap between toggle and panel in px.
    pub top_spacing: u32,
    pub show_on_hover: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            width: WidthMode::Content,
            custom_width: DEFAULT_CUSTOM_WIDTH,
            justify_menu: None,
            top_spacing: 0,
            show_on_hover: false,
        }
    }
}

impl MenuConfig {
    /// Build the configuration from the rendered markup.
    pub fn from_markup(context: &MenuContext, panel: &PanelMarkup<'_>) -> Self {
        let classes = || panel.class_name.split_whitespace();
        let top_spacing = panel
            .top_spacing
            .and_then(parse_positive)
            .unwrap_or(context.top_spacing);

        Self {
            width: WidthMode::from_classes(classes()).unwrap_or_default(),
            custom_width: panel
                .custom_width
                .and_then(parse_positive)
                .unwrap_or(DEFAULT_CUSTOM_WIDTH),
            justify_menu: Justification::from_menu_classes(classes()),
            top_spacing,
            show_on_hover: context.show_on_hover,
        }
    }

    /// Close delay after the pointer leaves the toggle.
    ///
    /// A larger gap between toggle and panel gets proportionally more time.
    pub fn hover_close_delay_ms(&self) -> u32 {
        HOVER_BASE_DELAY_MS.saturating_add(self.top_spacing.saturating_mul(HOVER_DELAY_PER_PX_MS))
    }
}

/// Interactivity context rendered on the menu root (`data-wp-context`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuContext {
    pub menu_opened_by: OpenState,
    pub show_on_hover: bool,
    pub top_spacing: u32,
}

impl MenuContext {
    pub fn from_json(json: &str) -> Result<Self, MenuError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }
}

/// Raw panel attributes as found in the DOM.
#[derive(Clone, Debug, Default)]
pub struct PanelMarkup<'a> {
    pub class_name: &'a str,
    pub custom_width: Option<&'a str>,
    pub top_spacing: Option<&'a str>,
}

/// Read an integer attribute, accepting a trailing `px`. Non-positive values are ignored.
fn parse_positive(value: &str) -> Option<u32> {
    let value = value.trim();
    let value = value.strip_suffix("px").unwrap_or(value);
    value.trim().parse::<u32>().ok().filter(|v| *v > 0)
}

fn deserialize_justification<'de, D>(deserializer: D) -> Result<Option<Justification>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(Justification::parse))
}
