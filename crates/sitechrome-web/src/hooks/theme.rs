//! Theme bootstrap, toggle button and system preference tracking

use crate::capabilities::{media_matches, DARK_SCHEME_QUERY};
use crate::dom::DomDocument;
use crate::hooks::{listen, now_ms};
use crate::storage::LocalStorage;
use leptos::leptos_dom::helpers::{request_animation_frame, set_timeout};
use sitechrome_core::config::{ThemeConfig, Timing};
use sitechrome_core::icon::{apply_icon_frame, AnimationStrategy, IconAnimation, IconPaths};
use sitechrome_core::theme::{ThemeChange, NO_TRANSITION_CLASS};
use sitechrome_core::{
    Capabilities, ChromeConfig, StyleSink, StyleTarget, ThemeController, ThemeEvent,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::JsCast;
use web_sys::MediaQueryListEvent;

struct ThemeRuntime {
    controller: ThemeController,
    dom: DomDocument,
    store: LocalStorage,
    strategy: AnimationStrategy,
    paths: IconPaths,
    duration_ms: u32,
    /// Bumped per animation; older frame loops stop when they see a newer value
    generation: u64,
}

type Shared = Rc<RefCell<ThemeRuntime>>;

/// Resolve and apply the theme to the document root
pub fn apply_initial_theme(
    config: &ThemeConfig,
    dom: &mut DomDocument,
    store: &LocalStorage,
) -> ThemeController {
    let system_dark = media_matches(dom.window(), DARK_SCHEME_QUERY);
    let controller = ThemeController::initialize(config, store, system_dark);
    controller.apply(dom);
    controller
}

/// Drop the root `no-transition` class once the parsed page has had time to paint
pub fn release_root_transitions(dom: &DomDocument, timing: &Timing) {
    let mut release = dom.clone();
    set_timeout(
        move || release.set_class(StyleTarget::Root, NO_TRANSITION_CLASS, false),
        Duration::from_millis(u64::from(timing.root_transition_release_ms)),
    );
}

/// Wire the toggle button and the `prefers-color-scheme` listener
pub fn install_theme_toggle(
    config: &ChromeConfig,
    capabilities: Capabilities,
    dom: DomDocument,
    store: LocalStorage,
    controller: ThemeController,
) {
    let strategy = AnimationStrategy::select(config.theme.animate_icon, capabilities);
    let paths = IconPaths::from_config(&config.theme);

    // The markup may ship either icon; match it to the resolved theme
    let mut dom = dom;
    let applied = controller.applied();
    apply_icon_frame(
        &IconAnimation::new(AnimationStrategy::Instant, &paths, applied, applied, 0).final_frame(),
        &mut dom,
    );
    tracing::debug!(?strategy, theme = %applied, "theme toggle installed");

    let toggle = dom.theme_toggle().cloned();
    let window = dom.window().clone();
    let shared: Shared = Rc::new(RefCell::new(ThemeRuntime {
        controller,
        dom,
        store,
        strategy,
        paths,
        duration_ms: config.theme.icon_duration_ms,
        generation: 0,
    }));

    if let Some(toggle) = toggle {
        let shared = shared.clone();
        listen(&toggle, "click", move |_| dispatch(&shared, ThemeEvent::Toggled));
    }

    if let Some(list) = window.match_media(DARK_SCHEME_QUERY).ok().flatten() {
        listen(&list, "change", move |event| {
            let Some(event) = event.dyn_ref::<MediaQueryListEvent>() else {
                return;
            };
            dispatch(
                &shared,
                ThemeEvent::SystemChanged {
                    prefers_dark: event.matches(),
                },
            );
        });
    }
}

fn dispatch(shared: &Shared, event: ThemeEvent) {
    let change = {
        let mut runtime = shared.borrow_mut();
        let ThemeRuntime {
            controller,
            dom,
            store,
            ..
        } = &mut *runtime;
        controller.handle(event, dom, store)
    };
    if let Some(change) = change {
        animate_icon(shared, change);
    }
}

fn animate_icon(shared: &Shared, change: ThemeChange) {
    let (animation, generation) = {
        let mut runtime = shared.borrow_mut();
        runtime.generation += 1;
        let animation = IconAnimation::new(
            runtime.strategy,
            &runtime.paths,
            change.from,
            change.to,
            runtime.duration_ms,
        );
        (Rc::new(animation), runtime.generation)
    };
    step(shared.clone(), animation, now_ms(), generation);
}

fn step(shared: Shared, animation: Rc<IconAnimation>, started: f64, generation: u64) {
    request_animation_frame(move || {
        let done = {
            let mut runtime = shared.borrow_mut();
            if runtime.generation != generation {
                return;
            }
            animation.render(now_ms() - started, &mut runtime.dom)
        };
        if !done {
            step(shared, animation, started, generation);
        }
    });
}
