//! Per-menu interaction engine.
//!
//! `MenuEngine` owns everything one dropdown needs: its configuration, which
//! triggers hold it open, its hover-intent slot, its layout state and the
//! surface it draws on. Instances never share mutable state, so any number of
//! menus on a page run side by side.
//!
//! Every public action is infallible. Missing DOM pieces make the affected
//! step a silent no-op.

use crate::config::MenuConfig;
use crate::constants::HOVER_BASE_DELAY_MS;
use crate::hover::HoverTimer;
use crate::layout::{self, Layout, LayoutReport};
use crate::platform::{HoverScheduler, MenuSurface};
use crate::types::{HoverAction, OpenState, RelatedTarget, Trigger};


pub struct MenuEngine<S: MenuSurface, H: HoverScheduler> {
    config: MenuConfig,
    opened_by: OpenState,
    surface: S,
    hover: HoverTimer<H>,
    layout: Layout,
    /// Return focus to the toggle when the menu closes with focus inside it.
    restore_focus: bool,
    /// Set while the menu is open, cleared by the close cleanup.
    active: bool,
}

impl<S: MenuSurface, H: HoverScheduler> MenuEngine<S, H> {
    pub fn new(config: MenuConfig, surface: S, scheduler: H) -> Self {
        let layout = Layout::new(&config);
        Self {
            config,
            opened_by: OpenState::default(),
            surface,
            hover: HoverTimer::new(scheduler),
            layout,
            restore_focus: false,
            active: false,
        }
    }

    /// Seed the open flags, e.g. from the rendered context.
    pub fn with_open_state(mut self, opened_by: OpenState) -> Self {
        self.opened_by = opened_by;
        self
    }

    /// Initial pass once the markup is live.
    pub fn init(&mut self) -> Option<LayoutReport> {
        let open = self.is_open();
        self.active = open;
        self.surface.set_expanded(open);
        self.relayout()
    }

    // === State ===

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn opened_by(&self) -> OpenState {
        self.opened_by
    }

    pub fn is_open(&self) -> bool {
        self.opened_by.is_open()
    }

    pub fn is_desktop(&self) -> bool {
        layout::is_desktop(self.surface.viewport_width())
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn pending_hover(&self) -> Option<HoverAction> {
        self.hover.pending()
    }

    pub fn scheduler(&self) -> &H {
        self.hover.scheduler()
    }

    pub fn scheduler_mut(&mut self) -> &mut H {
        self.hover.scheduler_mut()
    }

    // === Transitions ===

    pub fn open(&mut self, trigger: Trigger) {
        self.transition(trigger, true);
    }

    pub fn close(&mut self, trigger: Trigger) {
        self.transition(trigger, false);
    }

    /// Release every trigger (Escape, focus leaving, resize to mobile).
    pub fn close_all(&mut self) {
        for trigger in Trigger::ALL {
            self.close(trigger);
        }
    }

    fn transition(&mut self, trigger: Trigger, value: bool) {
        let was_open = self.is_open();
        self.opened_by.set(trigger, value);
        tracing::trace!(?trigger, value, opened_by = ?self.opened_by, "menu trigger updated");

        if was_open && !self.is_open() {
            self.close_cleanup();
        }
        if was_open != self.is_open() {
            self.sync_open_state();
        }
    }

    /// Cleanup when the last trigger releases an open menu.
    fn close_cleanup(&mut self) {
        if self.active && self.restore_focus && self.surface.focus_within() {
            self.surface.focus_toggle();
        }
        self.restore_focus = false;
        self.hover.clear();
        self.layout.reset_swap(&mut self.surface);
        self.active = false;
    }

    /// Mirror an Open/Closed change on the DOM and lay the panel out again.
    pub fn sync_open_state(&mut self) {
        let open = self.is_open();
        tracing::debug!(open, opened_by = ?self.opened_by, "menu open state changed");
        if open {
            self.active = true;
        }
        self.surface.set_expanded(open);
        self.relayout();
    }

    // === Click, focus and keyboard ===

    /// Toggle from the toggle control.
    ///
    /// Focus is placed on the toggle first: some browsers do not focus a
    /// clicked button, which would break focus-out detection.
    pub fn toggle_on_click(&mut self) {
        self.surface.focus_toggle();

        if self.opened_by.click || self.opened_by.focus {
            self.close(Trigger::Click);
            self.close(Trigger::Focus);
        } else {
            self.restore_focus = true;
            self.open(Trigger::Click);
        }
    }

    /// The panel's close button.
    pub fn close_on_click(&mut self) {
        self.close(Trigger::Click);
        self.close(Trigger::Focus);
    }

    /// Focus left an element inside the menu.
    ///
    /// A missing related target is read as "focus left the document". That
    /// heuristic is known to be imprecise on WebKit, where some in-document
    /// moves also report no related target.
    pub fn handle_focus_out(&mut self, related: RelatedTarget) {
        match related {
            RelatedTarget::None | RelatedTarget::OutsideMenu => self.close_all(),
            RelatedTarget::InsideMenu => {}
        }
    }

    /// Escape closes a click-opened menu. Returns whether the key was consumed.
    pub fn handle_keydown(&mut self, key: &str) -> bool {
        if self.opened_by.click && key == "Escape" {
            self.close(Trigger::Click);
            self.close(Trigger::Focus);
            return true;
        }
        false
    }

    // === Hover intent ===

    /// Hover only applies when enabled for this menu and on desktop viewports.
    pub fn should_activate_hover(&self) -> bool {
        self.config.show_on_hover && self.is_desktop()
    }

    /// Pointer entered the toggle.
    pub fn handle_mouse_enter(&mut self) {
        if !self.should_activate_hover() {
            return;
        }
        self.hover.set(HoverAction::Open, HOVER_BASE_DELAY_MS);
    }

    /// Pointer left the toggle.
    pub fn handle_mouse_leave(&mut self) {
        if !self.should_activate_hover() {
            return;
        }
        let delay = self.config.hover_close_delay_ms();
        self.hover.set(HoverAction::Close, delay);
    }

    /// Pointer entered the panel: keep the menu open.
    pub fn handle_menu_mouse_enter(&mut self) {
        if !self.should_activate_hover() {
            return;
        }
        self.hover.clear();
    }

    /// Pointer left the panel.
    pub fn handle_menu_mouse_leave(&mut self) {
        if !self.should_activate_hover() {
            return;
        }
        self.hover.set(HoverAction::Close, HOVER_BASE_DELAY_MS);
    }

    /// A hover timer fired.
    ///
    /// Runs outside the event that scheduled it, so hover eligibility is
    /// checked again. Stale deliveries (the slot moved on) are ignored.
    pub fn fire_hover(&mut self, action: HoverAction) {
        if self.hover.pending() != Some(action) {
            tracing::trace!(?action, "ignoring stale hover timer");
            return;
        }
        self.hover.release();
        if !self.should_activate_hover() {
            return;
        }
        match action {
            // Never interfere with a click-opened menu.
            HoverAction::Open if !self.opened_by.click => self.open(Trigger::Hover),
            HoverAction::Open => {}
            HoverAction::Close => self.close(Trigger::Hover),
        }
    }

    // === Layout ===

    /// Run a layout pass without resetting the swap flag.
    pub fn relayout(&mut self) -> Option<LayoutReport> {
        let open = self.is_open();
        self.layout.adjust(&mut self.surface, &self.config, open)
    }

    /// Window resize.
    pub fn handle_resize(&mut self) -> Option<LayoutReport> {
        if !self.surface.has_panel() {
            return None;
        }

        self.hover.clear();
        if !self.is_desktop() && self.opened_by.hover {
            self.close(Trigger::Hover);
        }

        self.layout.reset_swap(&mut self.surface);
        let report = self.relayout();

        if self.is_open() {
            let desktop = self.is_desktop();
            layout::apply_mobile_background(&mut self.surface, desktop, true);
        }
        report
    }
}
