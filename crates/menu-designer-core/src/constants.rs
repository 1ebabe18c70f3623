//! Fixed thresholds, delays and DOM names shared by the engine and the browser layer.

/// Viewports narrower than this use the mobile presentation (px).
pub const MOBILE_BREAKPOINT: f64 = 600.0;

/// Base hover-intent delay for opening and for leaving the panel (ms).
pub const HOVER_BASE_DELAY_MS: u32 = 300;

/// Extra close delay per pixel of top spacing when leaving the toggle (ms).
pub const HOVER_DELAY_PER_PX_MS: u32 = 2;

/// Absolute floor for the panel width (px).
pub const MIN_WIDTH: f64 = 200.0;

/// Below this width a left/right anchored panel swaps sides instead of shrinking (px).
pub const MIN_WIDTH_BEFORE_ANCHOR: f64 = 400.0;

/// Opacity applied to the sampled mobile overlay colour.
pub const MOBILE_BG_OPACITY: f32 = 0.75;

/// Tint used when the mobile overlay has no usable background colour.
pub const MOBILE_BG_FALLBACK: &str = "rgba(255, 255, 255, 0.75)";

/// Custom width used when the markup does not carry a usable one (px).
pub const DEFAULT_CUSTOM_WIDTH: u32 = 600;

/// Upper bound on layout passes: the initial pass plus at most one re-run after a swap.
pub const MAX_LAYOUT_PASSES: u8 = 2;

// Markup contract.
pub const ROOT_CLASS: &str = "wp-block-ollie-mega-menu";
pub const PANEL_CLASS: &str = "wp-block-ollie-mega-menu__menu-container";
pub const TOGGLE_CLASS: &str = "wp-block-ollie-mega-menu__toggle";
pub const CLOSE_BUTTON_CLASS: &str = "menu-container__close-button";
pub const NAV_BLOCK_CLASS: &str = "wp-block-navigation";
pub const RESPONSIVE_CONTAINER_CLASS: &str = "wp-block-navigation__responsive-container";

/// Attribute holding the interactivity context JSON on the menu root.
pub const CONTEXT_ATTRIBUTE: &str = "data-wp-context";
pub const CUSTOM_WIDTH_ATTRIBUTE: &str = "data-custom-width";
pub const TOP_SPACING_ATTRIBUTE: &str = "data-top-spacing";

/// Rendering-only marker for a panel whose justification was swapped this cycle.
pub const SWAPPED_ATTRIBUTE: &str = "data-justification-swapped";

/// Id of the single injected `<style>` element.
pub const STYLE_ELEMENT_ID: &str = "menu-designer-mobile-icon-styles";
