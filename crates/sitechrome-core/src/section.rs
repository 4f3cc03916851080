//! Active section resolution
//!
//! Maps the header-adjusted scroll position to exactly one section id and
//! gates downstream writes on actual changes.

use crate::config::HeaderConfig;
use crate::env::LayoutSource;
use crate::geometry;
use tracing::{debug, trace};

/// A tracked page region, read from layout on demand
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// Half-open `[top, top + height)` containment
    pub fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

/// A nav link with its layout-box geometry
#[derive(Debug, Clone, PartialEq)]
pub struct NavLink {
    pub href: String,
    /// `offsetLeft` relative to the nav list
    pub left: f64,
    /// `offsetWidth`
    pub width: f64,
}

impl NavLink {
    pub fn new(href: impl Into<String>, left: f64, width: f64) -> Self {
        Self {
            href: href.into(),
            left,
            width,
        }
    }

    /// Whether this link is the in-page anchor for `section_id`
    pub fn targets(&self, section_id: &str) -> bool {
        self.href
            .strip_prefix('#')
            .is_some_and(|anchor| anchor == section_id)
    }
}

/// Resolve the active section id
///
/// First section containing `scroll_y + header_offset` wins; if none does,
/// the first section is active. `None` only when there are no sections.
pub fn resolve_active(sections: &[Section], scroll_y: f64, header_offset: u32) -> Option<&str> {
    let position = scroll_y + f64::from(header_offset);
    sections
        .iter()
        .find(|section| section.contains(position))
        .or_else(|| sections.first())
        .map(|section| section.id.as_str())
}

/// Transition of the active section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionChange {
    pub previous: Option<String>,
    pub current: String,
}

/// Events that trigger a re-resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerEvent {
    /// Initial load or asset load; recomputes the header offset
    Load,
    /// One coalesced scroll frame
    ScrollTick,
    /// Viewport resize; recomputes the header offset
    Resize,
    /// Intersection observer entry for a section
    Intersection { is_intersecting: bool },
}

impl TrackerEvent {
    fn affects_layout(self) -> bool {
        matches!(self, Self::Load | Self::Resize)
    }
}

/// Owns the active section state and the latest header offset
#[derive(Debug, Clone)]
pub struct SectionTracker {
    header: HeaderConfig,
    header_offset: u32,
    current: Option<String>,
}

impl SectionTracker {
    pub fn new(header: HeaderConfig) -> Self {
        Self {
            header_offset: header.fallback_offset,
            header,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn header_offset(&self) -> u32 {
        self.header_offset
    }

    /// Recompute the header offset from live layout
    ///
    /// Returns `true` when the value changed (the intersection observer
    /// margin must then be rebuilt).
    pub fn refresh_offset<L: LayoutSource + ?Sized>(&mut self, layout: &L) -> bool {
        let offset = geometry::header_offset(layout, &self.header);
        let changed = offset != self.header_offset;
        if changed {
            debug!(from = self.header_offset, to = offset, "header offset changed");
        }
        self.header_offset = offset;
        changed
    }

    /// Record `id` as active; `true` only if it differs from the current one
    pub fn set_active(&mut self, id: &str) -> Option<SectionChange> {
        if self.current.as_deref() == Some(id) {
            return None;
        }
        let previous = self.current.replace(id.to_string());
        Some(SectionChange {
            previous,
            current: id.to_string(),
        })
    }

    /// Re-resolve against live layout
    ///
    /// Returns the change, if any. Non-intersecting observer entries are
    /// ignored entirely.
    pub fn handle<L: LayoutSource + ?Sized>(
        &mut self,
        event: TrackerEvent,
        layout: &L,
    ) -> Option<SectionChange> {
        if let TrackerEvent::Intersection {
            is_intersecting: false,
        } = event
        {
            return None;
        }

        if event.affects_layout() {
            self.refresh_offset(layout);
        }

        let sections = layout.sections();
        let active = resolve_active(&sections, layout.scroll_y(), self.header_offset)?;
        let change = self.set_active(active);
        match &change {
            Some(change) => debug!(
                from = ?change.previous,
                to = %change.current,
                ?event,
                "active section changed"
            ),
            None => trace!(section = active, ?event, "active section unchanged"),
        }
        change
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDocument;

    fn page() -> Vec<Section> {
        vec![
            Section::new("hero", 0.0, 800.0),
            Section::new("work", 800.0, 1000.0),
            Section::new("about", 1800.0, 800.0),
        ]
    }

    #[test]
    fn test_resolve_reference_positions() {
        let sections = page();
        assert_eq!(resolve_active(&sections, 0.0, 98), Some("hero"));
        assert_eq!(resolve_active(&sections, 750.0, 98), Some("work"));
        assert_eq!(resolve_active(&sections, 1650.0, 98), Some("work"));
        assert_eq!(resolve_active(&sections, 1800.0, 98), Some("about"));
    }

    #[test]
    fn test_resolve_boundaries_are_half_open() {
        let sections = page();
        assert_eq!(resolve_active(&sections, 702.0, 98), Some("work"));
        assert_eq!(resolve_active(&sections, 701.0, 98), Some("hero"));
    }

    #[test]
    fn test_resolve_falls_back_to_first() {
        let sections = page();
        assert_eq!(resolve_active(&sections, 5000.0, 98), Some("hero"));
        assert_eq!(resolve_active(&[], 0.0, 98), None);
    }

    #[test]
    fn test_resolve_every_position_inside_range() {
        let sections = page();
        for section in &sections {
            let mut position = section.top;
            while position < section.top + section.height {
                let scroll = position - 98.0;
                assert_eq!(
                    resolve_active(&sections, scroll, 98),
                    Some(section.id.as_str()),
                    "scroll {scroll}"
                );
                position += 25.0;
            }
        }
    }

    #[test]
    fn test_nav_link_targets() {
        let link = NavLink::new("#work", 10.0, 40.0);
        assert!(link.targets("work"));
        assert!(!link.targets("about"));
        assert!(!NavLink::new("work", 0.0, 0.0).targets("work"));
    }

    #[test]
    fn test_tracker_gates_on_change() {
        let mut doc = MemoryDocument::new().with_sections(page()).with_header(97.0);
        let mut tracker = SectionTracker::new(HeaderConfig::default());

        let change = tracker.handle(TrackerEvent::Load, &doc).unwrap();
        assert_eq!(change.previous, None);
        assert_eq!(change.current, "hero");
        assert_eq!(tracker.header_offset(), 98);

        assert!(tracker.handle(TrackerEvent::ScrollTick, &doc).is_none());

        doc.scroll_to(750.0);
        let change = tracker.handle(TrackerEvent::ScrollTick, &doc).unwrap();
        assert_eq!(change.previous.as_deref(), Some("hero"));
        assert_eq!(tracker.current(), Some("work"));
    }

    #[test]
    fn test_tracker_ignores_non_intersecting_entries() {
        let mut doc = MemoryDocument::new().with_sections(page());
        let mut tracker = SectionTracker::new(HeaderConfig::default());
        tracker.handle(TrackerEvent::Load, &doc);

        doc.scroll_to(1900.0);
        assert!(tracker
            .handle(TrackerEvent::Intersection { is_intersecting: false }, &doc)
            .is_none());
        let change = tracker
            .handle(TrackerEvent::Intersection { is_intersecting: true }, &doc)
            .unwrap();
        assert_eq!(change.current, "about");
    }

    #[test]
    fn test_resize_uses_fresh_header_offset() {
        let mut doc = MemoryDocument::new().with_sections(page()).with_header(97.0);
        let mut tracker = SectionTracker::new(HeaderConfig::default());
        tracker.handle(TrackerEvent::Load, &doc);

        // 720 + 98 = 818 lands in work; with a 60px header it stays in hero.
        doc.set_header_height(Some(60.0));
        doc.scroll_to(720.0);
        assert!(tracker.handle(TrackerEvent::Resize, &doc).is_none());
        assert_eq!(tracker.header_offset(), 61);
        assert_eq!(tracker.current(), Some("hero"));
    }
}
