//! Leptos components for pages that render their chrome with Leptos

mod site_chrome;
mod theme_toggle;

pub use site_chrome::SiteChrome;
pub use theme_toggle::ThemeToggle;
