//! Attaching engines to menu roots.
//!
//! Each attached menu owns its engine and every DOM listener wired to it.
//! Listeners borrow the engine for the duration of one event. An event fired
//! synchronously from inside another handler (focus moving while the toggle
//! is focused, for example) finds the engine busy and is dropped. Page
//! scripts reacting to such events read the open state recorded after the
//! last completed handler.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget, FocusEvent, HtmlElement};

use menu_designer_core::constants::ROOT_CLASS;
use menu_designer_core::{LayoutReport, MenuEngine, MenuError, OpenState};

use crate::dom::DomSurface;
use crate::events::{classify_focus_out, keydown_key};
use crate::js_error;
use crate::timer::TimeoutScheduler;

pub type DomEngine = MenuEngine<DomSurface, TimeoutScheduler>;

type SharedEngine = Rc<RefCell<DomEngine>>;

/// Open flags as of the last completed handler.
type LastState = Rc<Cell<OpenState>>;

/// A live menu: its engine plus the listeners driving it.
///
/// Dropping the instance removes every listener and cancels a pending hover
/// timer.
pub struct MenuInstance {
    root: HtmlElement,
    engine: SharedEngine,
    last_state: LastState,
    _listeners: Vec<EventListener>,
}

impl MenuInstance {
    pub fn root(&self) -> HtmlElement {
        self.root.clone()
    }

    pub fn is_open(&self) -> bool {
        self.opened_by().is_open()
    }

    /// Current open flags, or the last recorded ones while a handler runs.
    pub fn opened_by(&self) -> OpenState {
        match self.engine.try_borrow() {
            Ok(engine) => engine.opened_by(),
            Err(_) => self.last_state.get(),
        }
    }

    /// Release every trigger.
    pub fn close(&self) {
        self.with_engine(DomEngine::close_all);
    }

    /// Re-run the layout pass, e.g. after the panel content changed.
    pub fn relayout(&self) -> Option<LayoutReport> {
        self.with_engine(DomEngine::relayout).flatten()
    }

    /// Run `f` against the engine unless a handler currently holds it.
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut DomEngine) -> R) -> Option<R> {
        let mut engine = self.engine.try_borrow_mut().ok()?;
        let result = f(&mut engine);
        self.last_state.set(engine.opened_by());
        Some(result)
    }
}

/// Build and wire the engine for one `.wp-block-ollie-mega-menu` root.
pub fn attach(root: HtmlElement) -> Result<MenuInstance, MenuError> {
    let surface = DomSurface::new(root)?;
    if surface.toggle().is_none() {
        return Err(MenuError::MissingElement("toggle"));
    }
    let (config, opened_by) = surface.read_config()?;
    let root = surface.root().clone();
    let last_state: LastState = Rc::new(Cell::new(opened_by));

    let engine: SharedEngine = Rc::new_cyclic(|weak: &Weak<RefCell<DomEngine>>| {
        let scheduler =
            TimeoutScheduler::new(hover_delivery(weak.clone(), Rc::clone(&last_state)));
        RefCell::new(MenuEngine::new(config, surface, scheduler).with_open_state(opened_by))
    });

    {
        let mut engine = engine.borrow_mut();
        let report = engine.init();
        last_state.set(engine.opened_by());
        tracing::debug!(?report, "menu attached");
    }

    let listeners = wire_listeners(&engine, &last_state)?;
    Ok(MenuInstance {
        root,
        engine,
        last_state,
        _listeners: listeners,
    })
}

/// Attach every menu root in `document`.
///
/// A root that fails to attach is logged and skipped.
pub fn attach_all(document: &Document) -> Result<Vec<MenuInstance>, MenuError> {
    let roots = document
        .query_selector_all(&format!(".{ROOT_CLASS}"))
        .map_err(|e| js_error("query menu roots", e))?;

    let mut instances = Vec::with_capacity(roots.length() as usize);
    for i in 0..roots.length() {
        let Some(root) = roots
            .item(i)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        match attach(root) {
            Ok(instance) => instances.push(instance),
            Err(err) => tracing::warn!(%err, index = i, "skipping menu"),
        }
    }
    tracing::info!(count = instances.len(), "menus attached");
    Ok(instances)
}

/// Timer callbacks hold the engine weakly: the engine owns the scheduler.
fn hover_delivery(
    engine: Weak<RefCell<DomEngine>>,
    last_state: LastState,
) -> impl Fn(menu_designer_core::HoverAction) + 'static {
    move |action| {
        let Some(engine) = engine.upgrade() else {
            return;
        };
        let Ok(mut engine) = engine.try_borrow_mut() else {
            tracing::trace!(?action, "menu busy, hover timer dropped");
            return;
        };
        engine.fire_hover(action);
        last_state.set(engine.opened_by());
    }
}

fn listen(
    target: &EventTarget,
    event_type: &'static str,
    engine: &SharedEngine,
    last_state: &LastState,
    handler: impl Fn(&mut DomEngine, &Event) + 'static,
) -> EventListener {
    let engine = Rc::clone(engine);
    let last_state = Rc::clone(last_state);
    EventListener::new(target, event_type, move |event| {
        let Ok(mut engine) = engine.try_borrow_mut() else {
            tracing::trace!(event_type, "menu busy, nested event dropped");
            return;
        };
        handler(&mut engine, event);
        last_state.set(engine.opened_by());
    })
}

fn wire_listeners(
    engine: &SharedEngine,
    last_state: &LastState,
) -> Result<Vec<EventListener>, MenuError> {
    let (root, toggle, panel, close_button) = {
        let engine = engine.borrow();
        let surface = engine.surface();
        (
            surface.root().clone(),
            surface.toggle().cloned(),
            surface.panel().cloned(),
            surface.close_button(),
        )
    };
    let toggle = toggle.ok_or(MenuError::MissingElement("toggle"))?;
    let window = web_sys::window().ok_or(MenuError::MissingElement("window"))?;

    let mut listeners = vec![
        listen(&toggle, "click", engine, last_state, |engine, _| engine.toggle_on_click()),
        listen(&toggle, "mouseenter", engine, last_state, |engine, _| {
            engine.handle_mouse_enter()
        }),
        listen(&toggle, "mouseleave", engine, last_state, |engine, _| {
            engine.handle_mouse_leave()
        }),
        listen(&root, "keydown", engine, last_state, |engine, event| {
            if let Some(key) = keydown_key(event) {
                engine.handle_keydown(&key);
            }
        }),
        listen(&window, "resize", engine, last_state, |engine, _| {
            engine.handle_resize();
        }),
    ];

    let focus_root = root.clone();
    listeners.push(listen(&root, "focusout", engine, last_state, move |engine, event| {
        let Some(event) = event.dyn_ref::<FocusEvent>() else {
            return;
        };
        let related = classify_focus_out(event, &focus_root);
        tracing::trace!(?related, "menu focusout");
        engine.handle_focus_out(related);
    }));

    if let Some(ref panel) = panel {
        listeners.push(listen(panel, "mouseenter", engine, last_state, |engine, _| {
            engine.handle_menu_mouse_enter()
        }));
        listeners.push(listen(panel, "mouseleave", engine, last_state, |engine, _| {
            engine.handle_menu_mouse_leave()
        }));
    }
    if let Some(ref close_button) = close_button {
        listeners.push(listen(close_button, "click", engine, last_state, |engine, _| {
            engine.close_on_click()
        }));
    }

    Ok(listeners)
}
