//! `web-sys` implementation of the core capability traits
//!
//! Element handles are looked up once (the page markup is static); every
//! geometry read goes to live layout.

use sitechrome_core::env::{LayoutSource, StyleSink, StyleTarget};
use sitechrome_core::section::{NavLink, Section};
use sitechrome_core::ChromeConfig;
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement, NodeList, SvgElement, Window};

/// Live view of the page elements the chrome touches
#[derive(Clone)]
pub struct DomDocument {
    window: Window,
    document: Document,
    root: Option<Element>,
    body: Option<Element>,
    header: Option<Element>,
    nav_panel: Option<Element>,
    menu_trigger: Option<Element>,
    menu_links: Vec<Element>,
    underline_nav: Option<Element>,
    underline: Option<Element>,
    underline_links: Vec<Element>,
    sections: Vec<Element>,
    theme_toggle: Option<Element>,
    icon: Option<Element>,
    icon_paths: Vec<Element>,
}

fn collect_elements(list: Option<NodeList>) -> Vec<Element> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn style_of(element: &Element) -> Option<CssStyleDeclaration> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        Some(html.style())
    } else {
        element.dyn_ref::<SvgElement>().map(SvgElement::style)
    }
}

fn as_html(element: &Element) -> Option<&HtmlElement> {
    element.dyn_ref::<HtmlElement>()
}

impl DomDocument {
    pub fn new(window: Window, document: Document, config: &ChromeConfig) -> Self {
        let selectors = &config.selectors;
        let by_id = |id: &str| document.get_element_by_id(id);
        let query_all =
            |selector: &str| collect_elements(document.query_selector_all(selector).ok());

        let underline_nav = document
            .query_selector(&selectors.underline_nav)
            .ok()
            .flatten();
        let underline = underline_nav
            .as_ref()
            .and_then(|nav| nav.query_selector(&selectors.underline).ok().flatten());
        let underline_links = underline_nav
            .as_ref()
            .map(|nav| collect_elements(nav.query_selector_all(&selectors.underline_links).ok()))
            .unwrap_or_default();

        let icon = by_id(&selectors.theme_icon_id);
        let icon_paths = icon
            .as_ref()
            .map(|icon| collect_elements(icon.query_selector_all(&selectors.theme_icon_paths).ok()))
            .unwrap_or_default();

        Self {
            root: document.document_element(),
            body: document.body().map(Element::from),
            header: by_id(&selectors.header_id),
            nav_panel: by_id(&selectors.nav_panel_id),
            menu_trigger: by_id(&selectors.menu_trigger_id),
            menu_links: query_all(&selectors.menu_links),
            underline_nav,
            underline,
            underline_links,
            sections: query_all(&selectors.sections),
            theme_toggle: by_id(&selectors.theme_toggle_id),
            icon,
            icon_paths,
            window,
            document,
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn menu_trigger(&self) -> Option<&Element> {
        self.menu_trigger.as_ref()
    }

    pub fn menu_links(&self) -> &[Element] {
        &self.menu_links
    }

    pub fn underline_nav(&self) -> Option<&Element> {
        self.underline_nav.as_ref()
    }

    pub fn underline_links(&self) -> &[Element] {
        &self.underline_links
    }

    pub fn section_elements(&self) -> &[Element] {
        &self.sections
    }

    pub fn theme_toggle(&self) -> Option<&Element> {
        self.theme_toggle.as_ref()
    }

    /// Force a synchronous layout so a just-written `transition: none`
    /// applies before the next style change
    pub fn flush_layout(&self, target: StyleTarget) {
        if let Some(element) = self.element(target).and_then(as_html) {
            let _ = element.offset_height();
        }
    }

    fn element(&self, target: StyleTarget) -> Option<&Element> {
        match target {
            StyleTarget::Root => self.root.as_ref(),
            StyleTarget::Body => self.body.as_ref(),
            StyleTarget::Header => self.header.as_ref(),
            StyleTarget::NavPanel => self.nav_panel.as_ref(),
            StyleTarget::MenuTrigger => self.menu_trigger.as_ref(),
            StyleTarget::Underline => self.underline.as_ref(),
            StyleTarget::Icon => self.icon.as_ref(),
            StyleTarget::IconPath(index) => self.icon_paths.get(index),
        }
    }
}

impl LayoutSource for DomDocument {
    fn has_element(&self, target: StyleTarget) -> bool {
        self.element(target).is_some()
    }

    fn header_height(&self) -> Option<f64> {
        self.header
            .as_ref()
            .map(|header| header.get_bounding_client_rect().height())
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or(0.0)
    }

    fn client_width(&self) -> f64 {
        self.root
            .as_ref()
            .map(|root| f64::from(root.client_width()))
            .unwrap_or_else(|| self.viewport_width())
    }

    fn sections(&self) -> Vec<Section> {
        self.sections
            .iter()
            .filter(|element| !element.id().is_empty())
            .filter_map(|element| {
                let html = as_html(element)?;
                Some(Section::new(
                    element.id(),
                    f64::from(html.offset_top()),
                    f64::from(html.offset_height()),
                ))
            })
            .collect()
    }

    fn nav_links(&self) -> Vec<NavLink> {
        self.underline_links
            .iter()
            .filter_map(|element| {
                let html = as_html(element)?;
                Some(NavLink::new(
                    element.get_attribute("href").unwrap_or_default(),
                    f64::from(html.offset_left()),
                    f64::from(html.offset_width()),
                ))
            })
            .collect()
    }

    fn attribute(&self, target: StyleTarget, name: &str) -> Option<String> {
        self.element(target)?.get_attribute(name)
    }
}

impl StyleSink for DomDocument {
    fn set_style(&mut self, target: StyleTarget, property: &str, value: &str) {
        if let Some(style) = self.element(target).and_then(style_of) {
            let _ = style.set_property(property, value);
        }
    }

    fn clear_style(&mut self, target: StyleTarget, property: &str) {
        if let Some(style) = self.element(target).and_then(style_of) {
            let _ = style.remove_property(property);
        }
    }

    fn set_class(&mut self, target: StyleTarget, class: &str, enabled: bool) {
        if let Some(element) = self.element(target) {
            let _ = element.class_list().toggle_with_force(class, enabled);
        }
    }

    fn set_attribute(&mut self, target: StyleTarget, name: &str, value: &str) {
        if let Some(element) = self.element(target) {
            let _ = element.set_attribute(name, value);
        }
    }
}
