//! Active-section tracking, header palette and nav underline

use crate::capabilities::media_matches;
use crate::dom::DomDocument;
use crate::hooks::listen;
use leptos::ev;
use leptos::leptos_dom::helpers::{request_animation_frame, window_event_listener};
use sitechrome_core::chrome::ChromeOutcome;
use sitechrome_core::throttle::FrameThrottle;
use sitechrome_core::{
    ChromeConfig, ChromeEvent, CommitTicket, LayoutSource, PageChrome, StyleTarget,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    FocusEvent, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Node,
};

struct Tracking {
    chrome: PageChrome,
    dom: DomDocument,
    throttle: FrameThrottle,
    observer: Option<IntersectionObserver>,
    observer_callback: Option<js_sys::Function>,
}

type Shared = Rc<RefCell<Tracking>>;

/// Wire scroll, resize, load, intersection and underline pointer events
pub fn install_section_tracking(config: &ChromeConfig, dom: DomDocument) {
    let desktop_query = config.breakpoints.desktop_media_query();
    let desktop = media_matches(dom.window(), &desktop_query);
    let underline_enabled =
        desktop && dom.has_element(StyleTarget::Underline) && !dom.underline_links().is_empty();

    let mut chrome = PageChrome::new(config, underline_enabled);
    let mut dom = dom;
    if underline_enabled {
        chrome.prepare_underline(&mut dom);
    }

    let shared: Shared = Rc::new(RefCell::new(Tracking {
        chrome,
        dom,
        throttle: FrameThrottle::new(),
        observer: None,
        observer_callback: None,
    }));

    install_observer_callback(&shared);
    dispatch(&shared, ChromeEvent::Load);

    {
        let shared = shared.clone();
        window_event_listener(ev::scroll, move |_| {
            if !shared.borrow_mut().throttle.request() {
                return;
            }
            let shared = shared.clone();
            request_animation_frame(move || {
                shared.borrow_mut().throttle.complete();
                dispatch(&shared, ChromeEvent::ScrollTick);
            });
        });
    }

    {
        let shared = shared.clone();
        window_event_listener(ev::resize, move |_| dispatch(&shared, ChromeEvent::Resize));
    }

    {
        // Fonts and images shift section offsets after first paint
        let shared = shared.clone();
        window_event_listener(ev::load, move |_| dispatch(&shared, ChromeEvent::Load));
    }

    if underline_enabled {
        install_underline_pointer(&shared);
    }

    watch_desktop_breakpoint(&shared, &desktop_query);
}

fn dispatch(shared: &Shared, event: ChromeEvent) {
    let outcome = {
        let mut tracking = shared.borrow_mut();
        let Tracking { chrome, dom, .. } = &mut *tracking;
        chrome.handle(event, dom)
    };
    follow_up(shared, outcome);
}

fn follow_up(shared: &Shared, outcome: ChromeOutcome) {
    let needs_observer = outcome.offset_changed || shared.borrow().observer.is_none();
    if needs_observer {
        rebuild_observer(shared);
    }
    if let Some(ticket) = outcome.commit {
        schedule_commit(shared, ticket);
    }
}

/// Re-enable underline transitions two frames after the snap placement
fn schedule_commit(shared: &Shared, ticket: CommitTicket) {
    let shared = shared.clone();
    request_animation_frame(move || {
        request_animation_frame(move || {
            let mut tracking = shared.borrow_mut();
            let Tracking { chrome, dom, .. } = &mut *tracking;
            chrome.commit_underline(ticket, dom);
        });
    });
}

fn install_observer_callback(shared: &Shared) {
    let weak = Rc::downgrade(shared);
    let closure = Closure::wrap(Box::new(move |entries: js_sys::Array, _: IntersectionObserver| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let is_intersecting = entries.iter().any(|entry| {
            entry
                .unchecked_into::<IntersectionObserverEntry>()
                .is_intersecting()
        });
        dispatch(&shared, ChromeEvent::Intersection { is_intersecting });
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);
    shared.borrow_mut().observer_callback = Some(closure.into_js_value().unchecked_into());
}

/// Observer margins depend on the header offset, so a new offset means a new observer
fn rebuild_observer(shared: &Shared) {
    let mut tracking = shared.borrow_mut();
    if let Some(old) = tracking.observer.take() {
        old.disconnect();
    }
    let Some(callback) = tracking.observer_callback.as_ref() else {
        return;
    };

    let root_margin = tracking.chrome.observer_root_margin();
    let init = IntersectionObserverInit::new();
    init.set_root_margin(&root_margin);

    match IntersectionObserver::new_with_options(callback, &init) {
        Ok(observer) => {
            for section in tracking.dom.section_elements() {
                observer.observe(section);
            }
            tracing::debug!(%root_margin, "section observer rebuilt");
            tracking.observer = Some(observer);
        }
        Err(e) => leptos::logging::warn!("IntersectionObserver unavailable: {:?}", e),
    }
}

fn install_underline_pointer(shared: &Shared) {
    let (links, nav) = {
        let tracking = shared.borrow();
        (
            tracking.dom.underline_links().to_vec(),
            tracking.dom.underline_nav().cloned(),
        )
    };

    for (index, link) in links.iter().enumerate() {
        for event in ["mouseenter", "focus"] {
            let shared = shared.clone();
            listen(link, event, move |_| {
                dispatch(&shared, ChromeEvent::LinkPointed { index })
            });
        }
    }

    let Some(nav) = nav else {
        return;
    };
    {
        let shared = shared.clone();
        listen(&nav, "mouseleave", move |_| dispatch(&shared, ChromeEvent::NavLeft));
    }
    {
        let shared = shared.clone();
        let group = nav.clone();
        listen(&nav, "focusout", move |event| {
            let next = event
                .dyn_ref::<FocusEvent>()
                .and_then(FocusEvent::related_target);
            let inside = next
                .as_ref()
                .and_then(|target| target.dyn_ref::<Node>())
                .is_some_and(|node| group.contains(Some(node)));
            if !inside {
                dispatch(&shared, ChromeEvent::NavLeft);
            }
        });
    }
}

/// Crossing the desktop breakpoint swaps the whole nav layout; start over
fn watch_desktop_breakpoint(shared: &Shared, query: &str) {
    let window = shared.borrow().dom.window().clone();
    let Some(list) = window.match_media(query).ok().flatten() else {
        return;
    };
    listen(&list, "change", move |_| {
        tracing::info!("desktop breakpoint crossed, reloading");
        if let Err(e) = window.location().reload() {
            leptos::logging::warn!("Reload failed: {:?}", e);
        }
    });
}
