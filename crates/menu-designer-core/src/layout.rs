//! Panel positioning: width constraint, justification and edge avoidance.
//!
//! A layout pass is a function of the configuration and live measurements.
//! Re-running it without a configuration or viewport change leaves the panel
//! where it is.
//!
//! # Pass order
//!
//! 1. Top spacing (desktop only)
//! 2. Mobile background tint
//! 3. Base width for the width mode
//! 4. Justification: menu level, then navigation level, then left
//! 5. Measurement
//! 6. Clamp to the viewport, never below [`MIN_WIDTH`]
//! 7. Positioning by width mode, with edge detection for content/custom panels
//!
//! A left/right anchored panel that would have to shrink below
//! [`MIN_WIDTH_BEFORE_ANCHOR`] flips to the opposite side and the pass runs
//! again. The flip happens at most once until `reset_swap` is called (resize
//! or close), which bounds the loop at [`MAX_LAYOUT_PASSES`].

use crate::color::parse_rgb;
use crate::config::MenuConfig;
use crate::constants::{
    MAX_LAYOUT_PASSES, MIN_WIDTH, MIN_WIDTH_BEFORE_ANCHOR, MOBILE_BG_FALLBACK, MOBILE_BG_OPACITY,
    MOBILE_BREAKPOINT,
};
use crate::platform::MenuSurface;
use crate::types::{Justification, LeftOffset, Rect, StyleProp, WidthMode, parse_px, px_value};

/// Outcome of a layout call, for callers and tests that need to observe termination.
#[derive(Clone, Debug, Copy, PartialEq)]
pub struct LayoutReport {
    /// Passes run by this call (1, or 2 after a swap).
    pub passes: u8,
    /// Whether this call flipped the justification.
    pub swapped: bool,
    /// Justification used by the final pass.
    pub justification: Justification,
    /// Effective panel width after clamping (px).
    pub width: f64,
}

/// Measurements captured once per pass.
#[derive(Clone, Debug, Copy, PartialEq)]
pub struct LayoutMeasurement {
    pub viewport_width: f64,
    /// Configured width for custom panels, rendered width otherwise.
    pub menu_width: f64,
    pub menu_rect: Rect,
    pub nav_rect: Rect,
}

enum PassOutcome {
    Done,
    Swapped,
}

/// Per-instance layout state.
///
/// Holds the effective menu-level justification (which a swap rewrites) and
/// the "already swapped this cycle" flag.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    justify_menu: Option<Justification>,
    swapped: bool,
}

impl Layout {
    pub fn new(config: &MenuConfig) -> Self {
        Self {
            justify_menu: config.justify_menu,
            swapped: false,
        }
    }

    /// Whether the justification was swapped since the last reset.
    pub fn is_swapped(&self) -> bool {
        self.swapped
    }

    /// Allow the next pass to evaluate (and possibly swap) from scratch.
    pub fn reset_swap<S: MenuSurface>(&mut self, surface: &mut S) {
        self.swapped = false;
        surface.set_swapped_marker(false);
    }

    /// Run a full layout pass.
    ///
    /// Returns None when the panel or navigation block is missing.
    pub fn adjust<S: MenuSurface>(
        &mut self,
        surface: &mut S,
        config: &MenuConfig,
        open: bool,
    ) -> Option<LayoutReport> {
        let mut swapped = false;
        let mut passes = 0;

        while passes < MAX_LAYOUT_PASSES {
            if !surface.has_panel() || !surface.has_nav_block() {
                tracing::trace!("layout skipped, panel or navigation block missing");
                return None;
            }
            passes += 1;

            let desktop = is_desktop(surface.viewport_width());
            apply_top_spacing(surface, config, desktop);
            apply_mobile_background(surface, desktop, open);
            apply_base_width(surface, config);

            let justification = self.resolve_justification(surface);
            let measurement = measure(surface, config);
            let width = clamp_width(measurement.menu_width, measurement.viewport_width);
            if width != measurement.menu_width {
                surface.set_panel_style(StyleProp::Width, Some(&px_value(width)));
            }

            match self.position(surface, config, justification, width, &measurement) {
                PassOutcome::Done => {
                    tracing::debug!(
                        passes,
                        swapped,
                        ?justification,
                        width,
                        viewport = measurement.viewport_width,
                        "menu layout applied"
                    );
                    return Some(LayoutReport {
                        passes,
                        swapped,
                        justification,
                        width,
                    });
                }
                PassOutcome::Swapped => swapped = true,
            }
        }

        // Only reachable if a swap happened on the last permitted pass, which
        // the swap flag rules out. Report the state we ended in.
        Some(LayoutReport {
            passes,
            swapped,
            justification: self.resolve_justification(surface),
            width: surface.panel_rect().width,
        })
    }

    fn resolve_justification<S: MenuSurface>(&self, surface: &S) -> Justification {
        self.justify_menu
            .or_else(|| surface.nav_justification())
            .unwrap_or_default()
    }

    fn position<S: MenuSurface>(
        &mut self,
        surface: &mut S,
        config: &MenuConfig,
        justification: Justification,
        width: f64,
        measurement: &LayoutMeasurement,
    ) -> PassOutcome {
        let viewport = measurement.viewport_width;

        if config.width.spans_viewport() {
            if justification == Justification::Center {
                let target_left = viewport / 2.0 - width / 2.0;
                let offset = target_left - measurement.menu_rect.left;
                let current = surface
                    .panel_style(StyleProp::Left)
                    .and_then(|left| parse_px(&left))
                    .unwrap_or(0.0);
                let left = LeftOffset::Px(current + offset);
                surface.set_panel_style(StyleProp::Left, Some(&left.to_css()));
            }
            return PassOutcome::Done;
        }

        if justification == Justification::Center {
            let left = LeftOffset::Centered {
                width,
                overflow: 0.0,
            };
            surface.set_panel_style(StyleProp::Left, Some(&left.to_css()));
        }

        let rect = surface.panel_rect();
        if rect.left >= 0.0 && rect.right() <= viewport {
            return PassOutcome::Done;
        }

        if justification == Justification::Center {
            let overflow = if rect.left < 0.0 {
                -rect.left
            } else {
                -(rect.right() - viewport)
            };
            let left = LeftOffset::Centered { width, overflow };
            surface.set_panel_style(StyleProp::Left, Some(&left.to_css()));
            return PassOutcome::Done;
        }

        let fitted = fitted_width(width, rect, viewport);
        let too_small = fitted < MIN_WIDTH_BEFORE_ANCHOR;

        if too_small && !self.swapped {
            let next = justification.opposite();
            tracing::debug!(from = ?justification, to = ?next, fitted, "swapping menu justification");
            // Flag first: the re-run must not be able to swap back.
            self.swapped = true;
            self.justify_menu = Some(next);
            surface.set_swapped_marker(true);
            surface.set_justification_class(Some(next));
            surface.set_panel_style(StyleProp::Width, None);
            surface.set_panel_style(StyleProp::Left, None);
            surface.set_panel_style(StyleProp::MaxWidth, None);
            return PassOutcome::Swapped;
        }

        if !too_small {
            let width = fitted.max(MIN_WIDTH);
            surface.set_panel_style(StyleProp::Width, Some(&px_value(width)));
        }
        PassOutcome::Done
    }
}

/// Whether a viewport gets the desktop presentation.
pub fn is_desktop(viewport_width: f64) -> bool {
    viewport_width >= MOBILE_BREAKPOINT
}

/// Shrink a width that exceeds the viewport, never going below [`MIN_WIDTH`].
pub fn clamp_width(width: f64, viewport_width: f64) -> f64 {
    if width > viewport_width {
        viewport_width.max(MIN_WIDTH)
    } else {
        width
    }
}

/// Width left after trimming whatever overflows either viewport edge.
fn fitted_width(width: f64, rect: Rect, viewport_width: f64) -> f64 {
    let mut fitted = width;
    if rect.left < 0.0 {
        fitted = fitted.min(width + rect.left);
    }
    if rect.right() > viewport_width {
        fitted = fitted.min(width - (rect.right() - viewport_width));
    }
    fitted
}

/// Desktop panels sit `top_spacing` px below the toggle; mobile panels are not offset.
pub fn apply_top_spacing<S: MenuSurface>(surface: &mut S, config: &MenuConfig, desktop: bool) {
    if desktop {
        if config.top_spacing > 0 {
            let top = px_value(f64::from(config.top_spacing));
            surface.set_panel_style(StyleProp::Top, Some(&top));
        }
    } else {
        surface.set_panel_style(StyleProp::Top, None);
    }
}

/// Tint an open mobile panel with the responsive container's background.
///
/// Outside a responsive container nothing is changed. On desktop, or while
/// closed, any tint is cleared.
pub fn apply_mobile_background<S: MenuSurface>(surface: &mut S, desktop: bool, open: bool) {
    if desktop || !open {
        surface.set_panel_style(StyleProp::BackgroundColor, None);
        return;
    }

    let Some(background) = surface.responsive_background() else {
        return;
    };
    let tint = match parse_rgb(&background) {
        Some(color) => color.to_css_with_alpha(MOBILE_BG_OPACITY),
        None => MOBILE_BG_FALLBACK.to_string(),
    };
    surface.set_panel_style(StyleProp::BackgroundColor, Some(&tint));
}

/// Custom panels get their configured width; other modes defer to the stylesheet.
pub fn apply_base_width<S: MenuSurface>(surface: &mut S, config: &MenuConfig) {
    match config.width {
        WidthMode::Custom => {
            if config.custom_width > 0 {
                let width = px_value(f64::from(config.custom_width));
                surface.set_panel_style(StyleProp::Width, Some(&width));
                surface.set_panel_style(StyleProp::MaxWidth, Some(&width));
            }
        }
        WidthMode::Content | WidthMode::Wide | WidthMode::Full => {
            surface.set_panel_style(StyleProp::Width, None);
            surface.set_panel_style(StyleProp::MaxWidth, None);
        }
    }
}

/// Capture the measurements for one pass.
///
/// Custom panels are measured by their configured width rather than the
/// rendered one, so a clamp from a previous pass does not feed back.
pub fn measure<S: MenuSurface>(surface: &S, config: &MenuConfig) -> LayoutMeasurement {
    let menu_width = if config.width == WidthMode::Custom && config.custom_width > 0 {
        f64::from(config.custom_width)
    } else {
        surface.panel_natural_width()
    };

    LayoutMeasurement {
        viewport_width: surface.viewport_width(),
        menu_width,
        menu_rect: surface.panel_rect(),
        nav_rect: surface.nav_rect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSurface;

    fn custom(width: u32, justify: Option<Justification>) -> MenuConfig {
        MenuConfig {
            width: WidthMode::Custom,
            custom_width: width,
            justify_menu: justify,
            ..Default::default()
        }
    }

    #[test]
    fn test_clamp_width() {
        assert_eq!(clamp_width(800.0, 500.0), 500.0);
        assert_eq!(clamp_width(800.0, 150.0), MIN_WIDTH);
        assert_eq!(clamp_width(300.0, 500.0), 300.0);
        for viewport in [0.0, 50.0, 199.0, 200.0, 350.0, 1000.0] {
            assert!(clamp_width(5000.0, viewport) >= MIN_WIDTH);
            assert_eq!(clamp_width(5000.0, viewport), viewport.max(MIN_WIDTH));
        }
    }

    #[test]
    fn test_content_panel_wider_than_viewport_is_clamped() {
        let config = MenuConfig::default();
        let mut surface = FakeSurface::new(500.0, Rect::new(0.0, 0.0, 80.0, 40.0), 800.0);
        let mut layout = Layout::new(&config);

        let report = layout.adjust(&mut surface, &config, true).unwrap();
        assert_eq!(report.width, 500.0);
        assert_eq!(surface.style(StyleProp::Width), Some("500px"));
    }

    #[test]
    fn test_custom_width_sets_width_and_max_width() {
        let config = custom(420, Some(Justification::Left));
        let mut surface = FakeSurface::new(1200.0, Rect::new(100.0, 0.0, 80.0, 40.0), 300.0)
            .with_menu_class(Some(Justification::Left));
        let mut layout = Layout::new(&config);

        layout.adjust(&mut surface, &config, true).unwrap();
        assert_eq!(surface.style(StyleProp::Width), Some("420px"));
        assert_eq!(surface.style(StyleProp::MaxWidth), Some("420px"));
        assert_eq!(surface.panel_rect().left, 100.0);
    }

    #[test]
    fn test_content_mode_clears_inline_width() {
        let config = MenuConfig::default();
        let mut surface = FakeSurface::new(1200.0, Rect::new(100.0, 0.0, 80.0, 40.0), 300.0);
        surface.set_panel_style(StyleProp::Width, Some("999px"));
        surface.set_panel_style(StyleProp::MaxWidth, Some("999px"));
        let mut layout = Layout::new(&config);

        layout.adjust(&mut surface, &config, false).unwrap();
        assert_eq!(surface.style(StyleProp::Width), None);
        assert_eq!(surface.style(StyleProp::MaxWidth), None);
    }

    #[test]
    fn test_left_swaps_to_right_near_right_edge() {
        // 400px custom panel anchored left on an item at 300..400 in a 500px viewport.
        let config = custom(400, Some(Justification::Left));
        let mut surface = FakeSurface::new(500.0, Rect::new(300.0, 0.0, 100.0, 40.0), 250.0)
            .with_menu_class(Some(Justification::Left));
        let mut layout = Layout::new(&config);

        let report = layout.adjust(&mut surface, &config, true).unwrap();
        assert_eq!(report.passes, 2);
        assert!(report.swapped);
        assert_eq!(report.justification, Justification::Right);
        assert!(report.width <= 500.0);
        assert_eq!(surface.menu_class(), Some(Justification::Right));
        assert!(surface.swapped_marker());
        assert_eq!(surface.panel_rect().left, 0.0);
        assert_eq!(surface.panel_rect().right(), 400.0);
    }

    #[test]
    fn test_swap_happens_once_per_cycle() {
        // Overflows on both sides: the swap is tried once and never undone.
        let config = custom(450, Some(Justification::Left));
        let mut surface = FakeSurface::new(500.0, Rect::new(200.0, 0.0, 50.0, 40.0), 250.0)
            .with_menu_class(Some(Justification::Left));
        let mut layout = Layout::new(&config);

        let first = layout.adjust(&mut surface, &config, true).unwrap();
        assert_eq!(first.passes, 2);
        assert!(first.swapped);
        assert_eq!(first.justification, Justification::Right);

        // Without a reset the panel stays put, even though it still overflows.
        let second = layout.adjust(&mut surface, &config, true).unwrap();
        assert_eq!(second.passes, 1);
        assert!(!second.swapped);
        assert_eq!(second.justification, Justification::Right);

        // A reset lets the next cycle swap exactly once more.
        layout.reset_swap(&mut surface);
        let third = layout.adjust(&mut surface, &config, true).unwrap();
        assert_eq!(third.passes, 2);
        assert_eq!(third.justification, Justification::Left);
    }

    #[test]
    fn test_left_panel_shrinks_when_fit_is_wide_enough() {
        // 700px content panel at 100 in a 750px viewport: 650px still fits.
        let config = MenuConfig {
            justify_menu: Some(Justification::Left),
            ..Default::default()
        };
        let mut surface = FakeSurface::new(750.0, Rect::new(100.0, 0.0, 80.0, 40.0), 700.0)
            .with_menu_class(Some(Justification::Left));
        let mut layout = Layout::new(&config);

        let report = layout.adjust(&mut surface, &config, true).unwrap();
        assert_eq!(report.passes, 1);
        assert!(!report.swapped);
        assert_eq!(surface.style(StyleProp::Width), Some("650px"));
        assert_eq!(surface.panel_rect().right(), 750.0);
    }

    #[test]
    fn test_centered_custom_panel_is_nudged_on_screen() {
        // Centered on an item at 0..40: half of the 300px panel hangs off the left edge.
        let config = custom(300, Some(Justification::Center));
        let mut surface = FakeSurface::new(1000.0, Rect::new(0.0, 0.0, 40.0, 40.0), 250.0)
            .with_menu_class(Some(Justification::Center));
        let mut layout = Layout::new(&config);

        layout.adjust(&mut surface, &config, true).unwrap();
        assert_eq!(
            surface.style(StyleProp::Left),
            Some("calc( ( -1 * 300px / 2 ) + 50% + 130px )")
        );
        let rect = surface.panel_rect();
        assert_eq!(rect.left, 0.0);
        assert!(rect.right() <= 1000.0);
    }

    #[test]
    fn test_centered_right_overflow_is_nudged_left() {
        let config = MenuConfig {
            justify_menu: Some(Justification::Center),
            ..Default::default()
        };
        let mut surface = FakeSurface::new(800.0, Rect::new(740.0, 0.0, 60.0, 40.0), 400.0)
            .with_menu_class(Some(Justification::Center));
        let mut layout = Layout::new(&config);

        layout.adjust(&mut surface, &config, true).unwrap();
        assert_eq!(surface.panel_rect().right(), 800.0);
    }

    #[test]
    fn test_wide_and_full_center_on_viewport() {
        for (width, item_left) in [WidthMode::Wide, WidthMode::Full]
            .into_iter()
            .flat_map(|mode| [0.0, 120.0, 640.0, 1100.0].map(|left| (mode, left)))
        {
            let config = MenuConfig {
                width,
                ..Default::default()
            };
            let mut surface =
                FakeSurface::new(1280.0, Rect::new(item_left, 0.0, 90.0, 40.0), 960.0)
                    .with_nav_justification(Some(Justification::Center));
            let mut layout = Layout::new(&config);

            layout.adjust(&mut surface, &config, true).unwrap();
            let center = surface.panel_rect().center_x();
            assert!(
                (center - 640.0).abs() < 0.5,
                "{width:?} item at {item_left}: center {center}"
            );

            // Idempotent: a second pass does not move it.
            let before = surface.style(StyleProp::Left).map(str::to_string);
            layout.adjust(&mut surface, &config, true).unwrap();
            assert_eq!(surface.style(StyleProp::Left).map(str::to_string), before);
        }
    }

    #[test]
    fn test_full_width_skips_edge_detection() {
        let config = MenuConfig {
            width: WidthMode::Full,
            justify_menu: Some(Justification::Left),
            ..Default::default()
        };
        let mut surface = FakeSurface::new(900.0, Rect::new(600.0, 0.0, 90.0, 40.0), 800.0)
            .with_menu_class(Some(Justification::Left));
        let mut layout = Layout::new(&config);

        let report = layout.adjust(&mut surface, &config, true).unwrap();
        assert_eq!(report.passes, 1);
        assert!(!layout.is_swapped());
        assert_eq!(surface.style(StyleProp::Left), None);
    }

    #[test]
    fn test_menu_justification_beats_nav() {
        let config = MenuConfig {
            justify_menu: Some(Justification::Right),
            ..Default::default()
        };
        let mut surface = FakeSurface::new(1200.0, Rect::new(600.0, 0.0, 80.0, 40.0), 300.0)
            .with_menu_class(Some(Justification::Right))
            .with_nav_justification(Some(Justification::Center));
        let mut layout = Layout::new(&config);

        let report = layout.adjust(&mut surface, &config, true).unwrap();
        assert_eq!(report.justification, Justification::Right);

        let mut layout = Layout::new(&MenuConfig::default());
        let mut surface = FakeSurface::new(1200.0, Rect::new(600.0, 0.0, 80.0, 40.0), 300.0);
        let report = layout
            .adjust(&mut surface, &MenuConfig::default(), true)
            .unwrap();
        assert_eq!(report.justification, Justification::Left);
    }

    #[test]
    fn test_top_spacing_desktop_only() {
        let config = MenuConfig {
            top_spacing: 24,
            ..Default::default()
        };
        let mut surface = FakeSurface::new(1200.0, Rect::new(0.0, 0.0, 80.0, 40.0), 300.0);
        let mut layout = Layout::new(&config);

        layout.adjust(&mut surface, &config, false).unwrap();
        assert_eq!(surface.style(StyleProp::Top), Some("24px"));

        surface.viewport = 480.0;
        layout.adjust(&mut surface, &config, false).unwrap();
        assert_eq!(surface.style(StyleProp::Top), None);
    }

    #[test]
    fn test_mobile_background_tint() {
        let mut surface = FakeSurface::new(480.0, Rect::new(0.0, 0.0, 80.0, 40.0), 300.0)
            .with_responsive_background(Some("rgb(10, 20, 30)"));
        apply_mobile_background(&mut surface, false, true);
        assert_eq!(
            surface.style(StyleProp::BackgroundColor),
            Some("rgba(10, 20, 30, 0.75)")
        );

        surface.responsive_background = Some("rgba(0, 0, 0, 0)".into());
        apply_mobile_background(&mut surface, false, true);
        assert_eq!(
            surface.style(StyleProp::BackgroundColor),
            Some(MOBILE_BG_FALLBACK)
        );

        // Closed or desktop clears it.
        apply_mobile_background(&mut surface, false, false);
        assert_eq!(surface.style(StyleProp::BackgroundColor), None);
    }

    #[test]
    fn test_mobile_background_without_container_is_untouched() {
        let mut surface = FakeSurface::new(480.0, Rect::new(0.0, 0.0, 80.0, 40.0), 300.0);
        apply_mobile_background(&mut surface, false, true);
        assert_eq!(surface.style(StyleProp::BackgroundColor), None);
    }

    #[test]
    fn test_measure_custom_panel() {
        let config = custom(420, Some(Justification::Left));
        let mut surface = FakeSurface::new(1000.0, Rect::new(150.0, 10.0, 80.0, 40.0), 250.0);
        surface.nav = Rect::new(20.0, 10.0, 960.0, 40.0);

        let measurement = measure(&surface, &config);
        assert_eq!(measurement.viewport_width, 1000.0);
        // Configured width, not the rendered one.
        assert_eq!(measurement.menu_width, 420.0);
        assert_eq!(measurement.menu_rect.width, 250.0);
        assert_eq!(measurement.nav_rect, Rect::new(20.0, 10.0, 960.0, 40.0));
    }

    #[test]
    fn test_missing_panel_is_a_no_op() {
        let config = MenuConfig::default();
        let mut surface = FakeSurface::new(1200.0, Rect::new(0.0, 0.0, 80.0, 40.0), 300.0);
        surface.panel_present = false;
        let mut layout = Layout::new(&config);

        assert_eq!(layout.adjust(&mut surface, &config, true), None);
        assert_eq!(surface.writes, 0);
    }
}
