//! Header palette per section
//!
//! Writes the header custom properties consumed by the stylesheet. Change
//! gating happens upstream in the section tracker, so applying the same
//! section twice here simply rewrites the same values.

use crate::config::ChromeConfig;
use crate::env::{StyleSink, StyleTarget};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

pub const VAR_HEADER_BG: &str = "--color-header-bg";
pub const VAR_HEADER_LOGO: &str = "--color-header-logo";
pub const VAR_HEADER_NAME: &str = "--color-header-name";
pub const VAR_HEADER_ROLE: &str = "--color-header-role";
pub const VAR_HEADER_UNDERLINE: &str = "--color-header-underline";

/// Underline color when neither the section nor the defaults name one
pub const DEFAULT_ACCENT: &str = "var(--color-accent)";

/// Header colors for one section
///
/// Any field left `None` falls back to the configured defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SectionPalette {
    pub header_bg: Option<String>,
    pub header_logo: Option<String>,
    pub header_name: Option<String>,
    pub header_role: Option<String>,
    pub header_underline: Option<String>,
}

impl SectionPalette {
    /// Stock fallback palette
    pub fn defaults() -> Self {
        Self {
            header_bg: Some("oklch(from var(--color-background) l c h / 0.8)".to_string()),
            header_logo: Some("var(--color-logo)".to_string()),
            header_name: Some("var(--color-text)".to_string()),
            header_role: Some("var(--color-text-meta)".to_string()),
            header_underline: Some(DEFAULT_ACCENT.to_string()),
        }
    }

    /// Palette with stock name/role colors
    pub fn accented(bg: &str, logo: &str, underline: &str) -> Self {
        Self {
            header_bg: Some(bg.to_string()),
            header_logo: Some(logo.to_string()),
            header_name: Some("var(--color-text)".to_string()),
            header_role: Some("var(--color-text-meta)".to_string()),
            header_underline: Some(underline.to_string()),
        }
    }

    /// `(custom property, value)` pairs, filling gaps from `defaults`
    pub fn resolved<'a>(&'a self, defaults: &'a SectionPalette) -> [(&'static str, &'a str); 5] {
        fn pick<'a>(
            own: &'a Option<String>,
            fallback: &'a Option<String>,
            last: &'a str,
        ) -> &'a str {
            own.as_deref().or(fallback.as_deref()).unwrap_or(last)
        }

        [
            (VAR_HEADER_BG, pick(&self.header_bg, &defaults.header_bg, "transparent")),
            (VAR_HEADER_LOGO, pick(&self.header_logo, &defaults.header_logo, DEFAULT_ACCENT)),
            (VAR_HEADER_NAME, pick(&self.header_name, &defaults.header_name, DEFAULT_ACCENT)),
            (VAR_HEADER_ROLE, pick(&self.header_role, &defaults.header_role, DEFAULT_ACCENT)),
            (
                VAR_HEADER_UNDERLINE,
                pick(&self.header_underline, &defaults.header_underline, DEFAULT_ACCENT),
            ),
        ]
    }
}

/// Writes header custom properties for the active section
#[derive(Debug, Clone)]
pub struct HeaderColorController {
    palettes: BTreeMap<String, SectionPalette>,
    defaults: SectionPalette,
}

impl HeaderColorController {
    pub fn new(palettes: BTreeMap<String, SectionPalette>, defaults: SectionPalette) -> Self {
        Self { palettes, defaults }
    }

    pub fn from_config(config: &ChromeConfig) -> Self {
        Self::new(config.palettes.clone(), config.palette_defaults.clone())
    }

    /// Apply the palette for `section_id` to the document root
    ///
    /// Returns `false` (and writes nothing) for an unknown section.
    pub fn apply<S: StyleSink + ?Sized>(&self, section_id: &str, sink: &mut S) -> bool {
        let Some(palette) = self.palettes.get(section_id) else {
            trace!(section = section_id, "no header palette, keeping current colors");
            return false;
        };

        for (property, value) in palette.resolved(&self.defaults) {
            sink.set_style(StyleTarget::Root, property, value);
        }
        debug!(section = section_id, "header palette applied");
        true
    }
}
