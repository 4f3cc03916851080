//! Capability traits the controllers depend on
//!
//! The browser adapter implements these with `web-sys`; tests use
//! [`crate::memory::MemoryDocument`]. Reads are always live: implementations
//! must not cache layout between calls.

use crate::error::ChromeError;
use crate::section::{NavLink, Section};

/// Elements the controllers write to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleTarget {
    /// `document.documentElement`
    Root,
    /// `document.body`
    Body,
    /// Fixed page header
    Header,
    /// Mobile navigation drawer
    NavPanel,
    /// Button that opens the drawer
    MenuTrigger,
    /// Animated nav underline indicator
    Underline,
    /// Theme toggle icon container
    Icon,
    /// N-th path element inside the theme icon
    IconPath(usize),
}

/// Read access to live layout
pub trait LayoutSource {
    /// Whether the element backing `target` exists in the document
    fn has_element(&self, target: StyleTarget) -> bool;

    /// Rendered header height in CSS pixels, `None` if there is no header
    fn header_height(&self) -> Option<f64>;

    /// Current vertical scroll position
    fn scroll_y(&self) -> f64;

    /// `window.innerWidth`
    fn viewport_width(&self) -> f64;

    /// `document.documentElement.clientWidth` (viewport minus scrollbar)
    fn client_width(&self) -> f64;

    /// Tracked sections in document order
    fn sections(&self) -> Vec<Section>;

    /// Underline-tracked nav links in document order
    fn nav_links(&self) -> Vec<NavLink>;

    /// Value of an attribute on `target`
    fn attribute(&self, target: StyleTarget, name: &str) -> Option<String>;
}

/// Write access to inline styles, classes and attributes
///
/// Writes to a missing element are silently dropped.
pub trait StyleSink {
    fn set_style(&mut self, target: StyleTarget, property: &str, value: &str);

    fn clear_style(&mut self, target: StyleTarget, property: &str);

    fn set_class(&mut self, target: StyleTarget, class: &str, enabled: bool);

    fn set_attribute(&mut self, target: StyleTarget, name: &str, value: &str);
}

/// Persisted string preferences (`localStorage` in the browser)
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Option<String>;

    fn save(&mut self, key: &str, value: &str) -> Result<(), ChromeError>;
}

/// Host capabilities resolved once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Host can animate SVG path data frame by frame
    pub path_morph: bool,
    /// User asked for reduced motion
    pub reduced_motion: bool,
    /// Nav panel must be fully hidden while a breakpoint jump settles
    pub hide_nav_on_breakpoint: bool,
}

impl Capabilities {
    pub fn full() -> Self {
        Self {
            path_morph: true,
            reduced_motion: false,
            hide_nav_on_breakpoint: false,
        }
    }
}
