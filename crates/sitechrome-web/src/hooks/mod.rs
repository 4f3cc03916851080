//! Event wiring between the browser and the core controllers
//!
//! Each installer owns its controller plus a [`DomDocument`](crate::dom::DomDocument)
//! handle in an `Rc<RefCell<_>>`; listeners live for the lifetime of the page.

mod menu;
mod sections;
mod theme;

pub use menu::install_menu;
pub use sections::install_section_tracking;
pub use theme::{apply_initial_theme, install_theme_toggle, release_root_transitions};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

/// Attach a page-lifetime listener to an element
pub(crate) fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    let callback = closure.as_ref().unchecked_ref();
    if let Err(e) = target.add_event_listener_with_callback(event, callback) {
        leptos::logging::warn!("Failed to attach {} listener: {:?}", event, e);
    }
    closure.forget();
}

/// `performance.now()`, or wall clock when the Performance API is absent
pub(crate) fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
        .unwrap_or_else(js_sys::Date::now)
}
