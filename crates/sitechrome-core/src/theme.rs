//! Light/dark theme preference
//!
//! Resolution order at startup: persisted value, then the system dark-mode
//! preference, then light. A manual toggle is persisted and from then on
//! system changes are ignored.

use crate::config::ThemeConfig;
use crate::env::{LayoutSource, PreferenceStore, StyleSink, StyleTarget};
use crate::error::ChromeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Root attribute the stylesheet keys off
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Root class present until the initial theme has settled
pub const NO_TRANSITION_CLASS: &str = "no-transition";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl FromStr for Theme {
    type Err = ChromeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ChromeError::InvalidTheme {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeEvent {
    /// User pressed the theme toggle
    Toggled,
    /// `prefers-color-scheme` media query changed
    SystemChanged { prefers_dark: bool },
}

/// Applied theme transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeChange {
    pub from: Theme,
    pub to: Theme,
}

#[derive(Debug, Clone)]
pub struct ThemeController {
    storage_key: String,
    applied: Theme,
    explicit: bool,
}

impl ThemeController {
    /// Resolve the initial theme; does not touch the document
    pub fn initialize<P: PreferenceStore + ?Sized>(
        config: &ThemeConfig,
        store: &P,
        system_prefers_dark: bool,
    ) -> Self {
        let stored = Self::stored(store, &config.storage_key);
        let applied = stored.unwrap_or_else(|| Theme::from_system(system_prefers_dark));
        debug!(theme = %applied, explicit = stored.is_some(), "initial theme resolved");
        Self {
            storage_key: config.storage_key.clone(),
            applied,
            explicit: stored.is_some(),
        }
    }

    /// Persisted preference, ignoring unrecognized values
    pub fn stored<P: PreferenceStore + ?Sized>(store: &P, key: &str) -> Option<Theme> {
        let raw = store.load(key)?;
        match raw.parse() {
            Ok(theme) => Some(theme),
            Err(e) => {
                warn!(key, error = %e, "ignoring stored theme");
                None
            }
        }
    }

    pub fn applied(&self) -> Theme {
        self.applied
    }

    /// Whether the user has ever chosen a theme explicitly
    pub fn has_explicit(&self) -> bool {
        self.explicit
    }

    /// Write the applied theme to the document root
    pub fn apply<S: StyleSink + ?Sized>(&self, sink: &mut S) {
        sink.set_attribute(StyleTarget::Root, THEME_ATTRIBUTE, self.applied.as_str());
    }

    pub fn handle<D, P>(
        &mut self,
        event: ThemeEvent,
        doc: &mut D,
        store: &mut P,
    ) -> Option<ThemeChange>
    where
        D: LayoutSource + StyleSink + ?Sized,
        P: PreferenceStore + ?Sized,
    {
        match event {
            ThemeEvent::Toggled => Some(self.toggle(doc, store)),
            ThemeEvent::SystemChanged { prefers_dark } => {
                if self.explicit || Self::stored(store, &self.storage_key).is_some() {
                    debug!(prefers_dark, "system theme change ignored, explicit preference set");
                    self.explicit = true;
                    return None;
                }
                let theme = Theme::from_system(prefers_dark);
                if theme == self.applied {
                    return None;
                }
                let change = ThemeChange {
                    from: self.applied,
                    to: theme,
                };
                self.applied = theme;
                self.apply(doc);
                debug!(theme = %theme, "system theme applied");
                Some(change)
            }
        }
    }

    fn toggle<D, P>(&mut self, doc: &mut D, store: &mut P) -> ThemeChange
    where
        D: LayoutSource + StyleSink + ?Sized,
        P: PreferenceStore + ?Sized,
    {
        // The document is the source of truth; something else may have
        // rewritten the attribute since startup.
        let current = doc
            .attribute(StyleTarget::Root, THEME_ATTRIBUTE)
            .and_then(|value| value.parse().ok())
            .unwrap_or(self.applied);
        let next = current.toggled();

        self.applied = next;
        self.explicit = true;
        self.apply(doc);
        if let Err(e) = store.save(&self.storage_key, next.as_str()) {
            warn!(error = %e, "theme applied but not persisted");
        }
        debug!(from = %current, to = %next, "theme toggled");

        ThemeChange {
            from: current,
            to: next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDocument;

    fn config() -> ThemeConfig {
        ThemeConfig::default()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(Theme::Light.to_string(), "light");
        assert!("Dark".parse::<Theme>().is_err());
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn test_initial_resolution_order() {
        let mut doc = MemoryDocument::new();
        assert_eq!(ThemeController::initialize(&config(), &doc, false).applied(), Theme::Light);
        assert_eq!(ThemeController::initialize(&config(), &doc, true).applied(), Theme::Dark);

        doc.save("theme", "light").unwrap();
        let controller = ThemeController::initialize(&config(), &doc, true);
        assert_eq!(controller.applied(), Theme::Light);
        assert!(controller.has_explicit());
    }

    #[test]
    fn test_garbage_stored_value_is_ignored() {
        let mut doc = MemoryDocument::new();
        doc.save("theme", "solarized").unwrap();
        let controller = ThemeController::initialize(&config(), &doc, true);
        assert_eq!(controller.applied(), Theme::Dark);
        assert!(!controller.has_explicit());
    }

    #[test]
    fn test_toggle_reads_document_attribute() {
        let mut doc = MemoryDocument::new();
        let mut store = MemoryDocument::new();
        let mut controller = ThemeController::initialize(&config(), &store, false);
        controller.apply(&mut doc);

        doc.set_attribute(StyleTarget::Root, THEME_ATTRIBUTE, "dark");
        let change = controller.handle(ThemeEvent::Toggled, &mut doc, &mut store).unwrap();
        assert_eq!(change, ThemeChange { from: Theme::Dark, to: Theme::Light });
        assert_eq!(store.load("theme").as_deref(), Some("light"));
    }

    #[test]
    fn test_toggle_survives_storage_failure() {
        let mut doc = MemoryDocument::new();
        let mut store = MemoryDocument::new().with_failing_storage();
        let mut controller = ThemeController::initialize(&config(), &store, false);
        controller.apply(&mut doc);

        controller.handle(ThemeEvent::Toggled, &mut doc, &mut store);
        assert_eq!(doc.attribute_value(StyleTarget::Root, THEME_ATTRIBUTE), Some("dark"));
        assert_eq!(store.load("theme"), None);

        let ignored = controller.handle(
            ThemeEvent::SystemChanged { prefers_dark: false },
            &mut doc,
            &mut store,
        );
        assert!(ignored.is_none());
    }
}
