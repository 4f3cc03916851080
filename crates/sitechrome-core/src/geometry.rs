//! Viewport geometry helpers
//!
//! Header offset, observer margins, scrollbar compensation and breakpoint
//! classification. Nothing here is cached; callers recompute after every
//! layout-affecting event.

use crate::config::{Breakpoints, HeaderConfig};
use crate::env::LayoutSource;

/// Header offset used when the page has no header element
pub const FALLBACK_HEADER_OFFSET: u32 = 98;

/// Header height rounded up plus the configured margin, or the fallback
///
/// Rounding up keeps fractional heights from landing one pixel short of a
/// section boundary.
pub fn compute_header_offset(header_height: Option<f64>, config: &HeaderConfig) -> u32 {
    match header_height {
        Some(height) if height.is_finite() && height >= 0.0 => {
            height.ceil() as u32 + config.offset_margin
        }
        _ => config.fallback_offset,
    }
}

/// Read the header from live layout and compute its offset
pub fn header_offset<L: LayoutSource + ?Sized>(layout: &L, config: &HeaderConfig) -> u32 {
    compute_header_offset(layout.header_height(), config)
}

/// `rootMargin` for the section intersection observer
///
/// The top edge sits under the header; the bottom edge is pulled up so only
/// the upper part of the viewport counts as "entered".
pub fn observer_root_margin(header_offset: u32, bottom_percent: u8) -> String {
    format!("-{header_offset}px 0px -{bottom_percent}% 0px")
}

/// Width taken by the vertical scrollbar
pub fn scrollbar_width(viewport_width: f64, client_width: f64) -> f64 {
    (viewport_width - client_width).max(0.0)
}

/// Format a pixel length the way inline styles expect it
pub fn px(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}px", value as i64)
    } else {
        format!("{value}px")
    }
}

impl Breakpoints {
    /// Mobile layout (drawer navigation)
    pub fn is_mobile(&self, viewport_width: f64) -> bool {
        viewport_width <= self.mobile_max
    }

    /// Desktop layout (underline indicator active)
    pub fn is_desktop(&self, viewport_width: f64) -> bool {
        viewport_width >= self.desktop_min
    }

    /// Media query matching the desktop layout
    pub fn desktop_media_query(&self) -> String {
        format!("(min-width: {}px)", self.desktop_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_offset_rounds_up_plus_margin() {
        let config = HeaderConfig::default();
        assert_eq!(compute_header_offset(Some(96.2), &config), 98);
        assert_eq!(compute_header_offset(Some(80.0), &config), 81);
    }

    #[test]
    fn test_header_offset_fallback_without_header() {
        let config = HeaderConfig::default();
        assert_eq!(compute_header_offset(None, &config), FALLBACK_HEADER_OFFSET);
        assert_eq!(
            compute_header_offset(Some(f64::NAN), &config),
            FALLBACK_HEADER_OFFSET
        );
    }

    #[test]
    fn test_observer_root_margin() {
        assert_eq!(observer_root_margin(98, 80), "-98px 0px -80% 0px");
    }

    #[test]
    fn test_scrollbar_width_never_negative() {
        assert_eq!(scrollbar_width(1280.0, 1265.0), 15.0);
        assert_eq!(scrollbar_width(390.0, 400.0), 0.0);
    }

    #[test]
    fn test_px_formatting() {
        assert_eq!(px(15.0), "15px");
        assert_eq!(px(12.5), "12.5px");
        assert_eq!(px(0.0), "0px");
    }

    #[test]
    fn test_breakpoints() {
        let bp = Breakpoints::default();
        assert!(bp.is_mobile(768.0));
        assert!(!bp.is_mobile(769.0));
        assert!(bp.is_desktop(769.0));
        assert!(!bp.is_desktop(768.0));
        assert_eq!(bp.desktop_media_query(), "(min-width: 769px)");
    }
}
