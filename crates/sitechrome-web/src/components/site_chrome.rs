//! Mount point that installs the chrome behavior

use leptos::prelude::*;

/// Renders `children` and wires the page chrome once they are in the DOM
#[component]
pub fn SiteChrome(children: Children) -> impl IntoView {
    Effect::new(move |_| {
        if let Err(e) = crate::start() {
            leptos::logging::error!("Failed to start page chrome: {:#}", e);
        }
    });

    children()
}
