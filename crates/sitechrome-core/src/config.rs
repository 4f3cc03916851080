//! Page chrome configuration
//!
//! Every field has a default matching the stock site markup, so a page only
//! needs to embed the values it wants to change.

use crate::error::ChromeError;
use crate::header_colors::SectionPalette;
use crate::path::PathData;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Root configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChromeConfig {
    pub selectors: Selectors,
    pub breakpoints: Breakpoints,
    pub timing: Timing,
    pub header: HeaderConfig,
    pub theme: ThemeConfig,
    /// Fallback values for palette fields a section leaves out
    pub palette_defaults: SectionPalette,
    /// Header palette per section id
    pub palettes: BTreeMap<String, SectionPalette>,
}

/// Element ids and selectors the chrome binds to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selectors {
    pub header_id: String,
    pub menu_trigger_id: String,
    pub nav_panel_id: String,
    pub menu_links: String,
    pub underline_nav: String,
    pub underline: String,
    pub underline_links: String,
    pub sections: String,
    pub theme_toggle_id: String,
    pub theme_icon_id: String,
    pub theme_icon_paths: String,
    pub config_script_id: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            header_id: "global-header".to_string(),
            menu_trigger_id: "menu-trigger".to_string(),
            nav_panel_id: "main-nav".to_string(),
            menu_links: ".header-nav a".to_string(),
            underline_nav: "#main-nav ul.nav-links".to_string(),
            underline: ".nav-underline".to_string(),
            underline_links: "a[href^=\"#\"]".to_string(),
            sections: "main section[id], footer[id]".to_string(),
            theme_toggle_id: "theme-toggle".to_string(),
            theme_icon_id: "theme-icon".to_string(),
            theme_icon_paths: ".theme-icon-path".to_string(),
            config_script_id: "sitechrome-config".to_string(),
        }
    }
}

/// Viewport width thresholds in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Breakpoints {
    /// Widths at or below this use the drawer menu
    pub mobile_max: f64,
    /// Widths at or above this show the nav underline
    pub desktop_min: f64,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            mobile_max: 768.0,
            desktop_min: 769.0,
        }
    }
}

/// Delays and durations in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Timing {
    /// Collapses resize bursts into one evaluation
    pub resize_debounce_ms: u32,
    /// How long panel transitions stay off after a breakpoint jump
    pub resize_settle_ms: u32,
    /// Delay before the root `no-transition` class is dropped
    pub root_transition_release_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            resize_debounce_ms: 10,
            resize_settle_ms: 200,
            root_transition_release_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeaderConfig {
    pub fallback_offset: u32,
    /// Added to the rounded-up header height
    pub offset_margin: u32,
    /// Bottom inset of the intersection observer, percent of viewport
    pub observer_bottom_percent: u8,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            fallback_offset: crate::geometry::FALLBACK_HEADER_OFFSET,
            offset_margin: 1,
            observer_bottom_percent: 80,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeConfig {
    /// `localStorage` key for the explicit preference
    pub storage_key: String,
    pub animate_icon: bool,
    pub icon_duration_ms: u32,
    /// Icon path data shown in the light theme
    pub light_icon_paths: Vec<String>,
    /// Icon path data shown in the dark theme
    pub dark_icon_paths: Vec<String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            animate_icon: true,
            icon_duration_ms: 400,
            light_icon_paths: crate::icon::SUN_PATHS.iter().map(|p| p.to_string()).collect(),
            dark_icon_paths: crate::icon::MOON_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            breakpoints: Breakpoints::default(),
            timing: Timing::default(),
            header: HeaderConfig::default(),
            theme: ThemeConfig::default(),
            palette_defaults: SectionPalette::defaults(),
            palettes: default_palettes(),
        }
    }
}

fn default_palettes() -> BTreeMap<String, SectionPalette> {
    let mut palettes = BTreeMap::new();
    palettes.insert(
        "hero".to_string(),
        SectionPalette::accented(
            "oklch(from var(--color-background-accent-hero) l c h / 0.8)",
            "var(--color-accent-hero)",
            "var(--color-accent-hero)",
        ),
    );
    palettes.insert(
        "work".to_string(),
        SectionPalette::accented(
            "oklch(from var(--color-background) l c h / 0.8)",
            "var(--color-logo)",
            "var(--color-accent-work)",
        ),
    );
    palettes.insert(
        "about".to_string(),
        SectionPalette::accented(
            "oklch(from var(--color-background-accent-about) l c h / 0.8)",
            "var(--color-accent-about)",
            "var(--color-accent-about)",
        ),
    );
    palettes.insert(
        "contact".to_string(),
        SectionPalette::accented(
            "oklch(from var(--color-background) l c h / 0.8)",
            "var(--color-logo)",
            "var(--color-accent-contact)",
        ),
    );
    palettes.insert(
        "footer".to_string(),
        SectionPalette::accented(
            "oklch(from var(--color-background-footer) l c h / 0.8)",
            "var(--color-logo)",
            "var(--color-accent)",
        ),
    );
    palettes
}

impl ChromeConfig {
    /// Config from the page's embedded script text
    ///
    /// A missing script or an invalid document yields the defaults.
    pub fn from_script(text: Option<&str>) -> Self {
        let Some(json) = text else {
            debug!("no embedded config found, using defaults");
            return Self::default();
        };
        Self::from_json(json).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring invalid embedded config");
            Self::default()
        })
    }

    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, ChromeError> {
        let config: Self = serde_json::from_str(json).map_err(|source| ChromeError::ConfigParse {
            message: source.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<(), ChromeError> {
        if self.breakpoints.desktop_min <= self.breakpoints.mobile_max {
            return Err(ChromeError::invalid_config(format!(
                "desktopMin ({}) must exceed mobileMax ({})",
                self.breakpoints.desktop_min, self.breakpoints.mobile_max
            )));
        }

        if self.timing.resize_settle_ms == 0 {
            return Err(ChromeError::invalid_config("resizeSettleMs must be non-zero"));
        }

        if self.theme.storage_key.is_empty() {
            return Err(ChromeError::invalid_config("theme storageKey must not be empty"));
        }

        let theme = &self.theme;
        if theme.animate_icon && theme.icon_duration_ms == 0 {
            return Err(ChromeError::invalid_config(
                "iconDurationMs must be non-zero when animateIcon is set",
            ));
        }
        if theme.light_icon_paths.len() != theme.dark_icon_paths.len() {
            return Err(ChromeError::invalid_config(format!(
                "icon path sets differ in length: {} light, {} dark",
                theme.light_icon_paths.len(),
                theme.dark_icon_paths.len()
            )));
        }
        for (light, dark) in theme.light_icon_paths.iter().zip(&theme.dark_icon_paths) {
            let light = PathData::parse(light)?;
            let dark = PathData::parse(dark)?;
            if !light.is_compatible(&dark) {
                return Err(ChromeError::invalid_config(
                    "light and dark icon paths must share the same command structure",
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ChromeConfig::default();
        config.validate().unwrap();
        assert_eq!(config.selectors.header_id, "global-header");
        assert_eq!(config.timing.resize_settle_ms, 200);
        assert_eq!(config.header.fallback_offset, 98);
        assert!(config.palettes.contains_key("footer"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ChromeConfig::from_json(
            r#"{ "theme": { "storageKey": "site-theme" }, "timing": { "resizeSettleMs": 300 } }"#,
        )
        .unwrap();

        assert_eq!(config.theme.storage_key, "site-theme");
        assert!(config.theme.animate_icon);
        assert_eq!(config.timing.resize_settle_ms, 300);
        assert_eq!(config.timing.resize_debounce_ms, 10);
        assert_eq!(config.breakpoints, Breakpoints::default());
    }

    #[test]
    fn test_default_sections_include_footer() {
        let selectors = Selectors::default();
        let parts: Vec<&str> = selectors.sections.split(',').map(str::trim).collect();
        assert!(parts.contains(&"main section[id]"));
        assert!(parts.contains(&"footer[id]"));
    }

    #[test]
    fn test_script_fallbacks() {
        assert_eq!(ChromeConfig::from_script(None), ChromeConfig::default());
        assert_eq!(ChromeConfig::from_script(Some("not json")), ChromeConfig::default());

        let config = ChromeConfig::from_script(Some(r#"{ "timing": { "resizeSettleMs": 250 } }"#));
        assert_eq!(config.timing.resize_settle_ms, 250);
    }

    #[test]
    fn test_empty_object_equals_default() {
        let config = ChromeConfig::from_json("{}").unwrap();
        assert_eq!(config, ChromeConfig::default());
    }

    #[test]
    fn test_rejects_inverted_breakpoints() {
        let err = ChromeConfig::from_json(
            r#"{ "breakpoints": { "mobileMax": 900, "desktopMin": 800 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ChromeError::InvalidConfig { .. }));
    }

    #[test]
    fn test_rejects_mismatched_icon_paths() {
        let err = ChromeConfig::from_json(
            r#"{ "theme": { "lightIconPaths": ["M0 0 L1 1"], "darkIconPaths": ["M0 0 C1 1 2 2 3 3"] } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ChromeError::InvalidConfig { .. }));

        let err = ChromeConfig::from_json(
            r#"{ "theme": { "lightIconPaths": ["M0 0"], "darkIconPaths": [] } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ChromeError::InvalidConfig { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = ChromeConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ChromeError::ConfigParse { .. }));
    }
}
