//! Mobile menu: trigger, link, Escape and resize wiring

use crate::dom::DomDocument;
use crate::hooks::listen;
use leptos::ev;
use leptos::leptos_dom::helpers::{set_timeout_with_handle, window_event_listener, TimeoutHandle};
use sitechrome_core::{
    Capabilities, ChromeConfig, LayoutSource, MenuController, MenuEvent, StyleTarget,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

struct Menu {
    controller: MenuController,
    dom: DomDocument,
    resize_debounce: Option<TimeoutHandle>,
    settle: Option<TimeoutHandle>,
}

type Shared = Rc<RefCell<Menu>>;

pub fn install_menu(config: &ChromeConfig, capabilities: Capabilities, dom: DomDocument) {
    let trigger = dom
        .menu_trigger()
        .cloned()
        .filter(|_| dom.has_element(StyleTarget::NavPanel));
    let Some(trigger) = trigger else {
        tracing::debug!("menu trigger or nav panel missing, menu disabled");
        return;
    };

    let controller = MenuController::new(config, capabilities, dom.viewport_width());
    let links = dom.menu_links().to_vec();
    let debounce = Duration::from_millis(u64::from(config.timing.resize_debounce_ms));
    let shared: Shared = Rc::new(RefCell::new(Menu {
        controller,
        dom,
        resize_debounce: None,
        settle: None,
    }));

    {
        let shared = shared.clone();
        listen(&trigger, "click", move |event| {
            event.prevent_default();
            dispatch(&shared, MenuEvent::TriggerActivated);
        });
    }

    for link in &links {
        let shared = shared.clone();
        listen(link, "click", move |_| dispatch(&shared, MenuEvent::LinkActivated));
    }

    {
        let shared = shared.clone();
        window_event_listener(ev::keydown, move |event| {
            if event.key() == "Escape" {
                dispatch(&shared, MenuEvent::EscapePressed);
            }
        });
    }

    window_event_listener(ev::resize, move |_| schedule_resize(&shared, debounce));
}

fn schedule_resize(shared: &Shared, debounce: Duration) {
    if let Some(pending) = shared.borrow_mut().resize_debounce.take() {
        pending.clear();
    }
    let handler = shared.clone();
    match set_timeout_with_handle(
        move || {
            handler.borrow_mut().resize_debounce = None;
            let viewport_width = handler.borrow().dom.viewport_width();
            dispatch(&handler, MenuEvent::Resized { viewport_width });
            handler.borrow().dom.flush_layout(StyleTarget::NavPanel);
        },
        debounce,
    ) {
        Ok(handle) => shared.borrow_mut().resize_debounce = Some(handle),
        Err(e) => leptos::logging::warn!("Failed to schedule resize handling: {:?}", e),
    }
}

fn dispatch(shared: &Shared, event: MenuEvent) {
    let settle = {
        let mut menu = shared.borrow_mut();
        let Menu { controller, dom, .. } = &mut *menu;
        controller.handle(event, dom)
    };
    if let Some(delay) = settle {
        schedule_settle(shared, delay);
    }
}

/// Restarts the settle timer; only the last resize in a burst restores transitions
fn schedule_settle(shared: &Shared, delay: Duration) {
    if let Some(pending) = shared.borrow_mut().settle.take() {
        pending.clear();
    }
    let handler = shared.clone();
    match set_timeout_with_handle(
        move || {
            handler.borrow_mut().settle = None;
            dispatch(&handler, MenuEvent::ResizeSettled);
        },
        delay,
    ) {
        Ok(handle) => shared.borrow_mut().settle = Some(handle),
        Err(e) => {
            leptos::logging::warn!("Failed to schedule resize settle: {:?}", e);
            dispatch(shared, MenuEvent::ResizeSettled);
        }
    }
}
