//! `MenuSurface` over the rendered menu markup.
//!
//! The surface is built once per menu root. Element lookups happen at
//! construction; geometry and computed styles are read live on every call.

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Node, Window};

use menu_designer_core::constants::{
    CLOSE_BUTTON_CLASS, CONTEXT_ATTRIBUTE, CUSTOM_WIDTH_ATTRIBUTE, NAV_BLOCK_CLASS, PANEL_CLASS,
    RESPONSIVE_CONTAINER_CLASS, SWAPPED_ATTRIBUTE, TOGGLE_CLASS, TOP_SPACING_ATTRIBUTE,
};
use menu_designer_core::{
    Justification, MenuConfig, MenuContext, MenuError, MenuSurface, OpenState, PanelMarkup, Rect,
    StyleProp,
};

/// One menu's DOM: the root `<li>`, its toggle and panel, and the enclosing
/// navigation block and responsive container.
pub struct DomSurface {
    window: Window,
    root: HtmlElement,
    toggle: Option<HtmlElement>,
    panel: Option<HtmlElement>,
    nav_block: Option<Element>,
    responsive_container: Option<Element>,
}

impl DomSurface {
    pub fn new(root: HtmlElement) -> Result<Self, MenuError> {
        let window = web_sys::window().ok_or(MenuError::MissingElement("window"))?;
        let toggle = find_html(&root, TOGGLE_CLASS);
        let panel = find_html(&root, PANEL_CLASS);
        let nav_block = closest(&root, NAV_BLOCK_CLASS);
        let responsive_container = closest(&root, RESPONSIVE_CONTAINER_CLASS);

        if panel.is_none() {
            tracing::warn!("menu has no panel element");
        }
        if nav_block.is_none() {
            tracing::debug!("menu is not inside a navigation block, layout disabled");
        }

        Ok(Self {
            window,
            root,
            toggle,
            panel,
            nav_block,
            responsive_container,
        })
    }

    pub fn root(&self) -> &HtmlElement {
        &self.root
    }

    pub fn toggle(&self) -> Option<&HtmlElement> {
        self.toggle.as_ref()
    }

    pub fn panel(&self) -> Option<&HtmlElement> {
        self.panel.as_ref()
    }

    pub fn close_button(&self) -> Option<HtmlElement> {
        self.panel
            .as_ref()
            .and_then(|panel| find_html(panel, CLOSE_BUTTON_CLASS))
    }

    /// Whether `node` is the root or one of its descendants.
    pub fn contains(&self, node: &Node) -> bool {
        self.root.contains(Some(node))
    }

    /// Read the menu configuration and initial open flags from the markup.
    pub fn read_config(&self) -> Result<(MenuConfig, OpenState), MenuError> {
        let context = MenuContext::from_json(
            &self
                .root
                .get_attribute(CONTEXT_ATTRIBUTE)
                .unwrap_or_default(),
        )?;

        let (class_name, custom_width, top_spacing) = match self.panel {
            Some(ref panel) => (
                panel.class_name(),
                panel.get_attribute(CUSTOM_WIDTH_ATTRIBUTE),
                panel.get_attribute(TOP_SPACING_ATTRIBUTE),
            ),
            None => (String::new(), None, None),
        };
        let markup = PanelMarkup {
            class_name: &class_name,
            custom_width: custom_width.as_deref(),
            top_spacing: top_spacing.as_deref(),
        };

        let config = MenuConfig::from_markup(&context, &markup);
        tracing::debug!(?config, "menu configuration read");
        Ok((config, context.menu_opened_by))
    }

    fn active_element(&self) -> Option<Element> {
        self.window.document()?.active_element()
    }
}

impl MenuSurface for DomSurface {
    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or(0.0)
    }

    fn has_panel(&self) -> bool {
        self.panel.is_some()
    }

    fn has_nav_block(&self) -> bool {
        self.nav_block.is_some()
    }

    fn panel_natural_width(&self) -> f64 {
        self.panel
            .as_ref()
            .map(|panel| f64::from(panel.offset_width()))
            .unwrap_or(0.0)
    }

    fn panel_rect(&self) -> Rect {
        self.panel
            .as_ref()
            .map(|panel| bounding_rect(panel))
            .unwrap_or_default()
    }

    fn nav_rect(&self) -> Rect {
        self.nav_block
            .as_ref()
            .map(bounding_rect)
            .unwrap_or_default()
    }

    fn nav_justification(&self) -> Option<Justification> {
        let class_name = self.nav_block.as_ref()?.class_name();
        Justification::from_nav_classes(class_name.split_whitespace())
    }

    fn responsive_background(&self) -> Option<String> {
        let container = self.responsive_container.as_ref()?;
        let style = self.window.get_computed_style(container).ok().flatten()?;
        style.get_property_value("background-color").ok()
    }

    fn panel_style(&self, prop: StyleProp) -> Option<String> {
        self.panel
            .as_ref()?
            .style()
            .get_property_value(prop.css_name())
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn set_panel_style(&mut self, prop: StyleProp, value: Option<&str>) {
        let Some(ref panel) = self.panel else {
            return;
        };
        let style = panel.style();
        let result = match value {
            Some(value) => style.set_property(prop.css_name(), value),
            None => style.remove_property(prop.css_name()).map(|_| ()),
        };
        if let Err(err) = result {
            tracing::warn!(property = prop.css_name(), ?err, "failed to write panel style");
        }
    }

    fn focus_within(&self) -> bool {
        self.active_element().is_some_and(|active| {
            let active: &Node = &active;
            self.root.contains(Some(active))
        })
    }

    fn focus_toggle(&mut self) {
        let Some(ref toggle) = self.toggle else {
            return;
        };
        let already_focused = self.active_element().is_some_and(|active| {
            let toggle: &Node = toggle;
            active.is_same_node(Some(toggle))
        });
        if already_focused {
            return;
        }
        if let Err(err) = toggle.focus() {
            tracing::warn!(?err, "failed to focus menu toggle");
        }
    }

    fn set_expanded(&mut self, expanded: bool) {
        let Some(ref toggle) = self.toggle else {
            return;
        };
        let value = if expanded { "true" } else { "false" };
        if let Err(err) = toggle.set_attribute("aria-expanded", value) {
            tracing::warn!(?err, "failed to set aria-expanded");
        }
    }

    fn set_justification_class(&mut self, justification: Option<Justification>) {
        let Some(ref panel) = self.panel else {
            return;
        };
        let classes = panel.class_list();
        for side in [
            Justification::Left,
            Justification::Center,
            Justification::Right,
        ] {
            let _ = classes.remove_1(side.menu_class());
        }
        if let Some(justification) = justification {
            let _ = classes.add_1(justification.menu_class());
        }
    }

    fn set_swapped_marker(&mut self, swapped: bool) {
        let Some(ref panel) = self.panel else {
            return;
        };
        let result = if swapped {
            panel.set_attribute(SWAPPED_ATTRIBUTE, "true")
        } else {
            panel.remove_attribute(SWAPPED_ATTRIBUTE)
        };
        if let Err(err) = result {
            tracing::warn!(?err, "failed to update swap marker");
        }
    }
}

fn find_html(parent: &Element, class: &str) -> Option<HtmlElement> {
    parent
        .query_selector(&format!(".{class}"))
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

fn closest(element: &Element, class: &str) -> Option<Element> {
    element.closest(&format!(".{class}")).ok().flatten()
}

fn bounding_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}
