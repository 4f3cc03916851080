//! Page chrome coordinator
//!
//! Fans one active-section resolution out to the header palette and the nav
//! underline so both always agree on the current section.

use crate::config::ChromeConfig;
use crate::env::{LayoutSource, StyleSink};
use crate::geometry::observer_root_margin;
use crate::header_colors::HeaderColorController;
use crate::section::{SectionTracker, TrackerEvent};
use crate::underline::{CommitTicket, UnderlineController};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeEvent {
    /// Initial load, `load` event, font/asset settling
    Load,
    /// One coalesced scroll frame
    ScrollTick,
    /// Viewport resize
    Resize,
    /// Intersection observer entry for a section
    Intersection { is_intersecting: bool },
    /// Pointer entered or focus moved to the n-th underline link
    LinkPointed { index: usize },
    /// Pointer or focus left the nav group
    NavLeft,
}

/// What the host has to follow up on after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChromeOutcome {
    /// Active section changed
    pub section_changed: bool,
    /// Header offset changed; the intersection observer must be rebuilt
    pub offset_changed: bool,
    /// Underline placed for the first time this cycle; commit after two frames
    pub commit: Option<CommitTicket>,
}

#[derive(Debug, Clone)]
pub struct PageChrome {
    tracker: SectionTracker,
    colors: HeaderColorController,
    underline: UnderlineController,
    observer_bottom_percent: u8,
}

impl PageChrome {
    pub fn new(config: &ChromeConfig, underline_enabled: bool) -> Self {
        Self {
            tracker: SectionTracker::new(config.header),
            colors: HeaderColorController::from_config(config),
            underline: UnderlineController::new(underline_enabled),
            observer_bottom_percent: config.header.observer_bottom_percent,
        }
    }

    pub fn active_section(&self) -> Option<&str> {
        self.tracker.current()
    }

    pub fn header_offset(&self) -> u32 {
        self.tracker.header_offset()
    }

    /// Margin for a freshly built intersection observer
    pub fn observer_root_margin(&self) -> String {
        observer_root_margin(self.tracker.header_offset(), self.observer_bottom_percent)
    }

    /// Put the underline into its snap-first state; call once at startup
    pub fn prepare_underline<S: StyleSink + ?Sized>(&mut self, sink: &mut S) {
        self.underline.suppress(sink);
    }

    pub fn handle<D>(&mut self, event: ChromeEvent, doc: &mut D) -> ChromeOutcome
    where
        D: LayoutSource + StyleSink + ?Sized,
    {
        let mut outcome = ChromeOutcome::default();
        let offset_before = self.tracker.header_offset();

        let tracker_event = match event {
            ChromeEvent::Load => Some(TrackerEvent::Load),
            ChromeEvent::ScrollTick => Some(TrackerEvent::ScrollTick),
            ChromeEvent::Resize => {
                // Link positions jump with layout: snap, do not animate
                self.underline.suppress(doc);
                Some(TrackerEvent::Resize)
            }
            ChromeEvent::Intersection { is_intersecting } => {
                Some(TrackerEvent::Intersection { is_intersecting })
            }
            ChromeEvent::LinkPointed { index } => {
                if let Some(link) = doc.nav_links().get(index) {
                    self.underline.point_at(link, doc);
                }
                None
            }
            ChromeEvent::NavLeft => None,
        };

        if let Some(tracker_event) = tracker_event {
            if let Some(change) = self.tracker.handle(tracker_event, doc) {
                outcome.section_changed = true;
                self.colors.apply(&change.current, doc);
            }
            outcome.offset_changed = self.tracker.header_offset() != offset_before;
        }

        let resync = outcome.section_changed
            || matches!(
                event,
                ChromeEvent::Load | ChromeEvent::Resize | ChromeEvent::NavLeft
            );
        if resync {
            if let Some(section) = self.tracker.current() {
                let links = doc.nav_links();
                outcome.commit = self.underline.sync_to_section(section, &links, doc);
            }
        }

        trace!(?event, ?outcome, "chrome event handled");
        outcome
    }

    /// Second animation frame after a first placement
    pub fn commit_underline<S: StyleSink + ?Sized>(
        &mut self,
        ticket: CommitTicket,
        sink: &mut S,
    ) -> bool {
        self.underline.commit_transitions(ticket, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::StyleTarget;
    use crate::header_colors::VAR_HEADER_BG;
    use crate::memory::MemoryDocument;
    use crate::section::{NavLink, Section};
    use crate::underline::NO_TRANSITION_CLASS;

    fn document() -> MemoryDocument {
        MemoryDocument::new()
            .with_header(97.0)
            .with_sections(vec![
                Section::new("hero", 0.0, 800.0),
                Section::new("work", 800.0, 1000.0),
                Section::new("about", 1800.0, 800.0),
            ])
            .with_nav_links(vec![
                NavLink::new("#work", 0.0, 48.0),
                NavLink::new("#about", 72.0, 56.0),
            ])
    }

    #[test]
    fn test_load_applies_palette_and_initial_placement() {
        let mut doc = document();
        doc.scroll_to(900.0);
        let mut chrome = PageChrome::new(&ChromeConfig::default(), true);
        chrome.prepare_underline(&mut doc);

        let outcome = chrome.handle(ChromeEvent::Load, &mut doc);
        assert!(outcome.section_changed);
        assert_eq!(chrome.active_section(), Some("work"));
        assert!(doc.style(StyleTarget::Root, VAR_HEADER_BG).is_some());
        assert_eq!(doc.style(StyleTarget::Underline, "width"), Some("48px"));

        let ticket = outcome.commit.unwrap();
        assert!(chrome.commit_underline(ticket, &mut doc));
        assert!(!doc.has_class(StyleTarget::Underline, NO_TRANSITION_CLASS));
    }

    #[test]
    fn test_scroll_without_change_writes_nothing() {
        let mut doc = document();
        let mut chrome = PageChrome::new(&ChromeConfig::default(), true);
        chrome.handle(ChromeEvent::Load, &mut doc);
        let writes = doc.style_writes();

        let outcome = chrome.handle(ChromeEvent::ScrollTick, &mut doc);
        assert_eq!(outcome, ChromeOutcome::default());
        assert_eq!(doc.style_writes(), writes);
    }

    #[test]
    fn test_hover_then_leave_reverts_to_active_link() {
        let mut doc = document();
        doc.scroll_to(900.0);
        let mut chrome = PageChrome::new(&ChromeConfig::default(), true);
        chrome.handle(ChromeEvent::Load, &mut doc);

        chrome.handle(ChromeEvent::LinkPointed { index: 1 }, &mut doc);
        assert_eq!(
            doc.style(StyleTarget::Underline, "transform"),
            Some("translateX(72px)")
        );

        chrome.handle(ChromeEvent::NavLeft, &mut doc);
        assert_eq!(
            doc.style(StyleTarget::Underline, "transform"),
            Some("translateX(0px)")
        );
    }

    #[test]
    fn test_resize_resnaps_underline() {
        let mut doc = document();
        doc.scroll_to(900.0);
        let mut chrome = PageChrome::new(&ChromeConfig::default(), true);
        chrome.prepare_underline(&mut doc);
        let first = chrome.handle(ChromeEvent::Load, &mut doc).commit.unwrap();
        let _ = chrome.commit_underline(first, &mut doc);

        doc.set_nav_links(vec![
            NavLink::new("#work", 10.0, 40.0),
            NavLink::new("#about", 70.0, 50.0),
        ]);
        doc.set_header_height(Some(60.0));
        let outcome = chrome.handle(ChromeEvent::Resize, &mut doc);

        assert!(outcome.offset_changed);
        assert!(doc.has_class(StyleTarget::Underline, NO_TRANSITION_CLASS));
        assert_eq!(
            doc.style(StyleTarget::Underline, "transform"),
            Some("translateX(10px)")
        );
        assert!(outcome.commit.is_some());
        assert_eq!(chrome.observer_root_margin(), "-61px 0px -80% 0px");
    }

    #[test]
    fn test_no_sections_is_noop() {
        let mut doc = MemoryDocument::new();
        let mut chrome = PageChrome::new(&ChromeConfig::default(), true);
        let outcome = chrome.handle(ChromeEvent::Load, &mut doc);
        assert!(!outcome.section_changed);
        assert_eq!(chrome.active_section(), None);
        assert_eq!(doc.style_writes(), 0);
    }
}
