//! Core menu types: triggers, open state, width modes, justification and geometry.
//!
//! These types are DOM-agnostic. Class names and inline style strings only
//! appear at the edges (`from_*_classes`, `to_css`) so the browser layer can
//! translate markup into typed values and back.

use serde::{Deserialize, Serialize};

/// Interaction kind that can hold a menu open.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    Click,
    Focus,
    Hover,
}

impl Trigger {
    /// All triggers, in the order `close_all` releases them.
    pub const ALL: [Trigger; 3] = [Trigger::Click, Trigger::Focus, Trigger::Hover];
}

/// Which triggers currently hold the menu open.
///
/// The menu is open iff at least one flag is set. Closing one trigger never
/// closes a menu that another trigger still holds.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenState {
    pub click: bool,
    pub focus: bool,
    pub hover: bool,
}

impl OpenState {
    /// Check if any trigger holds the menu open.
    pub fn is_open(&self) -> bool {
        self.click || self.focus || self.hover
    }

    pub fn set(&mut self, trigger: Trigger, value: bool) {
        match trigger {
            Trigger::Click => self.click = value,
            Trigger::Focus => self.focus = value,
            Trigger::Hover => self.hover = value,
        }
    }
}

/// Sizing strategy for the panel.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidthMode {
    /// Sized by its content (stylesheet driven).
    #[default]
    Content,
    /// Theme wide size.
    Wide,
    /// Full viewport.
    Full,
    /// Explicit pixel width from configuration.
    Custom,
}

impl WidthMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "content" => Some(Self::Content),
            "wide" => Some(Self::Wide),
            "full" => Some(Self::Full),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    /// Find the width mode encoded in a panel's class list.
    pub fn from_classes<'a>(classes: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        classes
            .into_iter()
            .find_map(|class| class.strip_prefix("menu-width-").and_then(Self::parse))
    }

    /// Wide and full panels already span most of the viewport and skip edge detection.
    pub fn spans_viewport(self) -> bool {
        matches!(self, Self::Wide | Self::Full)
    }
}

/// Horizontal alignment of the panel relative to its trigger.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justification {
    #[default]
    Left,
    Center,
    Right,
}

impl Justification {
    /// Parse a configured value. `none` and the empty string mean "not set".
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    /// Left and right swap; center has no opposite.
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Center => Self::Center,
        }
    }

    /// The `menu-justified-*` class for this justification.
    pub fn menu_class(self) -> &'static str {
        match self {
            Self::Left => "menu-justified-left",
            Self::Center => "menu-justified-center",
            Self::Right => "menu-justified-right",
        }
    }

    /// Menu-level justification from a panel's classes (center > right > left).
    pub fn from_menu_classes<'a>(classes: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let classes: Vec<&str> = classes.into_iter().collect();
        [Self::Center, Self::Right, Self::Left]
            .into_iter()
            .find(|j| classes.contains(&j.menu_class()))
    }

    /// Item justification of the enclosing navigation block.
    ///
    /// Left is never reported: it is the default and is resolved by the caller.
    pub fn from_nav_classes<'a>(classes: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let classes: Vec<&str> = classes.into_iter().collect();
        if classes.contains(&"items-justified-center")
            || classes.contains(&"items-justified-space-between")
        {
            Some(Self::Center)
        } else if classes.contains(&"items-justified-right") {
            Some(Self::Right)
        } else {
            None
        }
    }
}

/// Axis-aligned rectangle in viewport coordinates (px).
#[derive(Clone, Debug, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// Inline style properties the engine writes on the panel.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash)]
pub enum StyleProp {
    Top,
    Left,
    Width,
    MaxWidth,
    BackgroundColor,
}

impl StyleProp {
    /// CSS property name, as passed to `style.setProperty`.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Left => "left",
            Self::Width => "width",
            Self::MaxWidth => "max-width",
            Self::BackgroundColor => "background-color",
        }
    }
}

/// Horizontal offset written to the panel's `left` property.
#[derive(Clone, Debug, Copy, PartialEq)]
pub enum LeftOffset {
    /// Plain pixel offset.
    Px(f64),
    /// Centered on the trigger: `-width / 2 + 50%`, corrected by `overflow` px.
    Centered { width: f64, overflow: f64 },
}

impl LeftOffset {
    pub fn to_css(self) -> String {
        match self {
            Self::Px(px) => px_value(px),
            Self::Centered { width, overflow } if overflow == 0.0 => {
                format!("calc( ( -1 * {}px / 2 ) + 50% )", width)
            }
            Self::Centered { width, overflow } => {
                format!("calc( ( -1 * {}px / 2 ) + 50% + {}px )", width, overflow)
            }
        }
    }

    /// Parse a value produced by [`LeftOffset::to_css`].
    pub fn parse_css(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(inner) = s.strip_prefix("calc(") {
            let inner = inner.strip_suffix(')')?.trim();
            let rest = inner.strip_prefix("( -1 * ")?;
            let (width, rest) = rest.split_once("px / 2 )")?;
            let rest = rest.trim().strip_prefix("+ 50%")?.trim();
            let overflow = if rest.is_empty() {
                0.0
            } else {
                rest.strip_prefix('+')?
                    .trim()
                    .strip_suffix("px")?
                    .trim()
                    .parse()
                    .ok()?
            };
            return Some(Self::Centered {
                width: width.trim().parse().ok()?,
                overflow,
            });
        }
        parse_px(s).map(Self::Px)
    }
}

/// Action a hover-intent timer performs when it fires.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum HoverAction {
    Open,
    Close,
}

/// Where focus went when it left an element inside the menu.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum RelatedTarget {
    /// No related target. Treated as "focus left the document".
    None,
    /// Focus moved to another element inside the menu root.
    InsideMenu,
    /// Focus moved somewhere else in the document.
    OutsideMenu,
}

/// Format a pixel value for an inline style.
pub fn px_value(px: f64) -> String {
    format!("{}px", px)
}

/// Parse a leading pixel number the way `parseFloat` reads `"12.5px"`.
pub fn parse_px(s: &str) -> Option<f64> {
    let s = s.trim();
    let number = s.strip_suffix("px").unwrap_or(s).trim();
    number.parse().ok()
}
