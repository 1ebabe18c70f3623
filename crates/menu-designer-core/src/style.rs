//! CSS for the navigation's mobile icon overrides.
//!
//! Rendered into a single `<style>` element that is overwritten wholesale on
//! every update.

/// Selector of the overlay menu icon inside the navigation block.
const ICON_SELECTOR: &str = ".wp-block-navigation__overlay-menu-preview svg";

/// Colour overrides for the mobile menu icon.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MobileIconStyles {
    pub background: Option<String>,
    pub fill: Option<String>,
}

impl MobileIconStyles {
    pub fn new(background: Option<String>, fill: Option<String>) -> Self {
        // Empty strings come from cleared colour pickers.
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Self {
            background: non_empty(background),
            fill: non_empty(fill),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.background.is_none() && self.fill.is_none()
    }

    /// Render the stylesheet text.
    pub fn to_css(&self) -> String {
        let mut rules = Vec::new();
        if let Some(ref background) = self.background {
            rules.push(format!(
                "{ICON_SELECTOR} {{ background-color: {background} !important; }}"
            ));
        }
        if let Some(ref fill) = self.fill {
            rules.push(format!("{ICON_SELECTOR} {{ fill: {fill} !important; }}"));
        }
        rules.join("\n")
    }
}
