//! In-memory document for tests and non-browser hosts
//!
//! Implements every capability trait against plain maps. All elements exist
//! unless removed with [`MemoryDocument::without`].

use crate::env::{LayoutSource, PreferenceStore, StyleSink, StyleTarget};
use crate::error::ChromeError;
use crate::section::{NavLink, Section};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
pub struct MemoryDocument {
    missing: BTreeSet<StyleTarget>,
    header_height: Option<f64>,
    scroll_y: f64,
    viewport_width: f64,
    client_width: f64,
    sections: Vec<Section>,
    nav_links: Vec<NavLink>,
    styles: BTreeMap<(StyleTarget, String), String>,
    classes: BTreeSet<(StyleTarget, String)>,
    attributes: BTreeMap<(StyleTarget, String), String>,
    storage: BTreeMap<String, String>,
    fail_saves: bool,
    style_writes: usize,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Desktop-sized viewport with a 15px scrollbar, no header, no sections
    pub fn new() -> Self {
        Self {
            missing: BTreeSet::new(),
            header_height: None,
            scroll_y: 0.0,
            viewport_width: 1280.0,
            client_width: 1265.0,
            sections: Vec::new(),
            nav_links: Vec::new(),
            styles: BTreeMap::new(),
            classes: BTreeSet::new(),
            attributes: BTreeMap::new(),
            storage: BTreeMap::new(),
            fail_saves: false,
            style_writes: 0,
        }
    }

    pub fn with_header(mut self, height: f64) -> Self {
        self.header_height = Some(height);
        self
    }

    pub fn with_sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = sections;
        self
    }

    pub fn with_nav_links(mut self, links: Vec<NavLink>) -> Self {
        self.nav_links = links;
        self
    }

    pub fn with_viewport(mut self, viewport_width: f64, client_width: f64) -> Self {
        self.viewport_width = viewport_width;
        self.client_width = client_width;
        self
    }

    /// Every `save` fails, like a full or disabled `localStorage`
    pub fn with_failing_storage(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    /// Remove an element from the document
    pub fn without(mut self, target: StyleTarget) -> Self {
        self.missing.insert(target);
        self
    }

    pub fn scroll_to(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }

    pub fn set_header_height(&mut self, height: Option<f64>) {
        self.header_height = height;
    }

    pub fn resize(&mut self, viewport_width: f64, client_width: f64) {
        self.viewport_width = viewport_width;
        self.client_width = client_width;
    }

    pub fn set_nav_links(&mut self, links: Vec<NavLink>) {
        self.nav_links = links;
    }

    pub fn style(&self, target: StyleTarget, property: &str) -> Option<&str> {
        self.styles
            .get(&(target, property.to_string()))
            .map(String::as_str)
    }

    /// All inline style properties set on `target`
    pub fn inline_styles(&self, target: StyleTarget) -> Vec<(&str, &str)> {
        self.styles
            .iter()
            .filter(|((t, _), _)| *t == target)
            .map(|((_, property), value)| (property.as_str(), value.as_str()))
            .collect()
    }

    pub fn has_class(&self, target: StyleTarget, class: &str) -> bool {
        self.classes.contains(&(target, class.to_string()))
    }

    pub fn attribute_value(&self, target: StyleTarget, name: &str) -> Option<&str> {
        self.attributes
            .get(&(target, name.to_string()))
            .map(String::as_str)
    }

    /// Number of `set_style` / `clear_style` calls that reached an element
    pub fn style_writes(&self) -> usize {
        self.style_writes
    }

    fn exists(&self, target: StyleTarget) -> bool {
        !self.missing.contains(&target)
    }
}

impl LayoutSource for MemoryDocument {
    fn has_element(&self, target: StyleTarget) -> bool {
        self.exists(target)
    }

    fn header_height(&self) -> Option<f64> {
        if self.exists(StyleTarget::Header) {
            self.header_height
        } else {
            None
        }
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn client_width(&self) -> f64 {
        self.client_width
    }

    fn sections(&self) -> Vec<Section> {
        self.sections.clone()
    }

    fn nav_links(&self) -> Vec<NavLink> {
        self.nav_links.clone()
    }

    fn attribute(&self, target: StyleTarget, name: &str) -> Option<String> {
        self.attribute_value(target, name).map(str::to_string)
    }
}

impl StyleSink for MemoryDocument {
    fn set_style(&mut self, target: StyleTarget, property: &str, value: &str) {
        if !self.exists(target) {
            return;
        }
        self.style_writes += 1;
        self.styles
            .insert((target, property.to_string()), value.to_string());
    }

    fn clear_style(&mut self, target: StyleTarget, property: &str) {
        if !self.exists(target) {
            return;
        }
        self.style_writes += 1;
        self.styles.remove(&(target, property.to_string()));
    }

    fn set_class(&mut self, target: StyleTarget, class: &str, enabled: bool) {
        if !self.exists(target) {
            return;
        }
        let key = (target, class.to_string());
        if enabled {
            self.classes.insert(key);
        } else {
            self.classes.remove(&key);
        }
    }

    fn set_attribute(&mut self, target: StyleTarget, name: &str, value: &str) {
        if !self.exists(target) {
            return;
        }
        self.attributes
            .insert((target, name.to_string()), value.to_string());
    }
}

impl PreferenceStore for MemoryDocument {
    fn load(&self, key: &str) -> Option<String> {
        self.storage.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), ChromeError> {
        if self.fail_saves {
            return Err(ChromeError::storage(key, "storage unavailable"));
        }
        self.storage.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
