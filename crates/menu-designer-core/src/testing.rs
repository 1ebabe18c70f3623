//! In-memory surface and scheduler for exercising the engine without a DOM.

use std::collections::HashMap;

use crate::platform::{HoverScheduler, MenuSurface};
use crate::types::{HoverAction, Justification, LeftOffset, Rect, StyleProp, parse_px};

/// Geometry model of one menu.
///
/// The panel hangs below `item` (the navigation item that owns it). Without
/// an inline `left` it is placed the way the stylesheet would for its
/// justification; a pixel `left` shifts that position, and a centered calc
/// replaces it.
#[derive(Debug, Clone)]
pub struct FakeSurface {
    pub viewport: f64,
    pub item: Rect,
    pub nav: Rect,
    pub natural_width: f64,
    pub panel_present: bool,
    pub nav_present: bool,
    pub nav_justification: Option<Justification>,
    pub responsive_background: Option<String>,
    pub styles: HashMap<StyleProp, String>,
    pub menu_class: Option<Justification>,
    pub swapped_marker: bool,
    /// Number of swap marker writes.
    pub marker_writes: usize,
    pub expanded: bool,
    pub focus_inside: bool,
    pub toggle_focus_calls: usize,
    /// Number of inline style writes.
    pub writes: usize,
}

impl FakeSurface {
    pub fn new(viewport: f64, item: Rect, natural_width: f64) -> Self {
        Self {
            viewport,
            item,
            nav: Rect::new(0.0, item.top, viewport, item.height),
            natural_width,
            panel_present: true,
            nav_present: true,
            nav_justification: None,
            responsive_background: None,
            styles: HashMap::new(),
            menu_class: None,
            swapped_marker: false,
            marker_writes: 0,
            expanded: false,
            focus_inside: false,
            toggle_focus_calls: 0,
            writes: 0,
        }
    }

    pub fn with_menu_class(mut self, justification: Option<Justification>) -> Self {
        self.menu_class = justification;
        self
    }

    pub fn with_nav_justification(mut self, justification: Option<Justification>) -> Self {
        self.nav_justification = justification;
        self
    }

    pub fn with_responsive_background(mut self, background: Option<&str>) -> Self {
        self.responsive_background = background.map(str::to_string);
        self
    }

    pub fn style(&self, prop: StyleProp) -> Option<&str> {
        self.styles.get(&prop).map(String::as_str)
    }

    pub fn menu_class(&self) -> Option<Justification> {
        self.menu_class
    }

    pub fn swapped_marker(&self) -> bool {
        self.swapped_marker
    }

    fn style_px(&self, prop: StyleProp) -> Option<f64> {
        self.style(prop).and_then(parse_px)
    }
}

impl MenuSurface for FakeSurface {
    fn viewport_width(&self) -> f64 {
        self.viewport
    }

    fn has_panel(&self) -> bool {
        self.panel_present
    }

    fn has_nav_block(&self) -> bool {
        self.nav_present
    }

    fn panel_natural_width(&self) -> f64 {
        self.panel_rect().width
    }

    fn panel_rect(&self) -> Rect {
        let mut width = self
            .style_px(StyleProp::Width)
            .unwrap_or(self.natural_width);
        if let Some(max) = self.style_px(StyleProp::MaxWidth) {
            width = width.min(max);
        }

        let justification = self
            .menu_class
            .or(self.nav_justification)
            .unwrap_or_default();
        let stylesheet_left = match justification {
            Justification::Left => self.item.left,
            Justification::Center => self.item.center_x() - width / 2.0,
            Justification::Right => self.item.right() - width,
        };
        let left = match self.style(StyleProp::Left).and_then(LeftOffset::parse_css) {
            Some(LeftOffset::Px(px)) => stylesheet_left + px,
            Some(LeftOffset::Centered {
                width: calc_width,
                overflow,
            }) => self.item.center_x() - calc_width / 2.0 + overflow,
            None => stylesheet_left,
        };
        let top = self.item.bottom() + self.style_px(StyleProp::Top).unwrap_or(0.0);

        Rect::new(left, top, width, 320.0)
    }

    fn nav_rect(&self) -> Rect {
        self.nav
    }

    fn nav_justification(&self) -> Option<Justification> {
        self.nav_justification
    }

    fn responsive_background(&self) -> Option<String> {
        self.responsive_background.clone()
    }

    fn panel_style(&self, prop: StyleProp) -> Option<String> {
        self.styles.get(&prop).cloned()
    }

    fn set_panel_style(&mut self, prop: StyleProp, value: Option<&str>) {
        self.writes += 1;
        match value {
            Some(value) => {
                self.styles.insert(prop, value.to_string());
            }
            None => {
                self.styles.remove(&prop);
            }
        }
    }

    fn focus_within(&self) -> bool {
        self.focus_inside
    }

    fn focus_toggle(&mut self) {
        self.toggle_focus_calls += 1;
        self.focus_inside = true;
    }

    fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    fn set_justification_class(&mut self, justification: Option<Justification>) {
        self.menu_class = justification;
    }

    fn set_swapped_marker(&mut self, swapped: bool) {
        self.marker_writes += 1;
        self.swapped_marker = swapped;
    }
}

/// One scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub id: u64,
    pub action: HoverAction,
    pub delay_ms: u32,
}

/// Scheduler that only records; tests fire timers by hand.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pub scheduled: Vec<Scheduled>,
    pub cancelled: Vec<u64>,
    pub fired: Vec<u64>,
}

impl ManualScheduler {
    /// Timers that are neither cancelled nor fired.
    pub fn live(&self) -> Vec<Scheduled> {
        self.scheduled
            .iter()
            .filter(|s| !self.cancelled.contains(&s.id) && !self.fired.contains(&s.id))
            .copied()
            .collect()
    }

    /// Mark the most recent live timer as fired and return it.
    pub fn fire_latest(&mut self) -> Option<Scheduled> {
        let latest = *self.live().last()?;
        self.fired.push(latest.id);
        Some(latest)
    }
}

impl HoverScheduler for ManualScheduler {
    type Handle = u64;

    fn schedule(&mut self, action: HoverAction, delay_ms: u32) -> u64 {
        self.next_id += 1;
        self.scheduled.push(Scheduled {
            id: self.next_id,
            action,
            delay_ms,
        });
        self.next_id
    }

    fn cancel(&mut self, handle: u64) {
        self.cancelled.push(handle);
    }
}
