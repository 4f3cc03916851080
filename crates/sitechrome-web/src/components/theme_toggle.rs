//! Theme toggle button

use leptos::prelude::*;
use sitechrome_core::config::Selectors;
use sitechrome_core::icon::SUN_PATHS;

/// Toggle button with the morphable sun/moon icon
///
/// Renders markup only. Behavior is attached by [`crate::start`], which also
/// swaps the icon paths to match the resolved theme.
#[component]
pub fn ThemeToggle() -> impl IntoView {
    let selectors = Selectors::default();

    view! {
        <button
            id=selectors.theme_toggle_id
            class="theme-toggle"
            type="button"
            aria-label="Toggle theme"
        >
            <svg
                id=selectors.theme_icon_id
                viewBox="0 0 24 24"
                width="24"
                height="24"
                fill="none"
                stroke="currentColor"
                stroke-width="2"
                stroke-linecap="round"
                aria-hidden="true"
            >
                {SUN_PATHS
                    .iter()
                    .map(|d| view! { <path class="theme-icon-path" d={*d} /> })
                    .collect_view()}
            </svg>
        </button>
    }
}
