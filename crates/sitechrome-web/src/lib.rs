//! sitechrome-web - Browser adapter for sitechrome using Leptos + web-sys
//!
//! Binds the core controllers to a live document: [`dom::DomDocument`]
//! implements the layout and style traits, [`storage::LocalStorage`] the
//! preference store, and [`hooks`] connects browser events to each controller.

pub mod capabilities;
pub mod components;
pub mod dom;
pub mod hooks;
pub mod storage;

pub use components::{SiteChrome, ThemeToggle};

use anyhow::{Context, Result};
use dom::DomDocument;
use sitechrome_core::ChromeConfig;
use storage::LocalStorage;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Document;

/// Read the page's JSON config script, falling back to defaults
///
/// While the document is still loading the script may not exist yet.
pub fn load_config(document: &Document) -> ChromeConfig {
    let script_id = ChromeConfig::default().selectors.config_script_id;
    let text = document
        .get_element_by_id(&script_id)
        .and_then(|script| script.text_content());
    ChromeConfig::from_script(text.as_deref())
}

/// Apply the theme immediately, then install every controller once the
/// document has been parsed
pub fn start() -> Result<()> {
    let window = web_sys::window().context("no window")?;
    let document = window.document().context("no document")?;
    let store = LocalStorage::from_window(&window);

    // Only the theme is needed before first paint
    let early_config = load_config(&document);
    let mut early = DomDocument::new(window.clone(), document.clone(), &early_config);
    hooks::apply_initial_theme(&early_config.theme, &mut early, &store);

    let install = move || {
        let config = load_config(&document);
        let capabilities = capabilities::detect(&window);
        let mut dom = DomDocument::new(window.clone(), document.clone(), &config);
        let theme = hooks::apply_initial_theme(&config.theme, &mut dom, &store);
        hooks::release_root_transitions(&dom, &config.timing);
        hooks::install_section_tracking(&config, dom.clone());
        hooks::install_menu(&config, capabilities, dom.clone());
        hooks::install_theme_toggle(&config, capabilities, dom, store, theme);
        tracing::info!("page chrome installed");
    };

    if early.document().ready_state() == "loading" {
        let closure = Closure::once(install);
        early
            .document()
            .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("failed to wait for DOMContentLoaded: {:?}", e))?;
        closure.forget();
    } else {
        install();
    }

    Ok(())
}
