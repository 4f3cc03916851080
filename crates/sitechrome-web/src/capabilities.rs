//! Browser feature detection

use sitechrome_core::Capabilities;
use web_sys::Window;

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// Whether `query` currently matches; false when `matchMedia` is missing
pub fn media_matches(window: &Window, query: &str) -> bool {
    window
        .match_media(query)
        .ok()
        .flatten()
        .map(|list| list.matches())
        .unwrap_or(false)
}

pub fn detect(window: &Window) -> Capabilities {
    let path_morph = web_sys::css::supports_with_value("d", "path('M0 0')").unwrap_or(false);
    let capabilities = Capabilities {
        path_morph,
        reduced_motion: media_matches(window, REDUCED_MOTION_QUERY),
        // Engines without CSS `d` are the ones that flash the drawer on breakpoint jumps
        hide_nav_on_breakpoint: !path_morph,
    };
    tracing::debug!(?capabilities, "browser capabilities detected");
    capabilities
}
