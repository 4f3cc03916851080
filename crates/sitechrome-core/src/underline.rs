//! Animated nav underline
//!
//! The underline starts with transitions disabled so its first placement
//! snaps instead of sliding in from x=0. Once placed, the host waits two
//! animation frames and hands the returned [`CommitTicket`] back to
//! [`UnderlineController::commit_transitions`]. A resize starts a new
//! suppressed cycle; tickets from an older cycle are ignored.

use crate::env::{StyleSink, StyleTarget};
use crate::geometry::px;
use crate::section::NavLink;
use tracing::{debug, trace};

/// Class that disables the underline transition
pub const NO_TRANSITION_CLASS: &str = "no-underline-transition";

/// Proof that a placement happened during a given suppression cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "hand the ticket back after two animation frames"]
pub struct CommitTicket(u64);

#[derive(Debug, Clone)]
pub struct UnderlineController {
    enabled: bool,
    initialized: bool,
    suppressed: bool,
    generation: u64,
}

impl UnderlineController {
    /// `enabled` is false below the desktop breakpoint or when the nav
    /// markup is missing; every method is then a no-op.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            initialized: false,
            suppressed: false,
            generation: 0,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Disable transitions until the next placement is committed
    pub fn suppress<S: StyleSink + ?Sized>(&mut self, sink: &mut S) {
        if !self.enabled {
            return;
        }
        self.generation += 1;
        self.initialized = false;
        self.suppressed = true;
        sink.set_class(StyleTarget::Underline, NO_TRANSITION_CLASS, true);
        trace!(generation = self.generation, "underline transitions suppressed");
    }

    /// Move the underline under the link for `section_id`
    ///
    /// Returns a ticket on the first placement of a suppression cycle.
    pub fn sync_to_section<S: StyleSink + ?Sized>(
        &mut self,
        section_id: &str,
        links: &[NavLink],
        sink: &mut S,
    ) -> Option<CommitTicket> {
        if !self.enabled {
            return None;
        }
        let Some(link) = links.iter().find(|link| link.targets(section_id)) else {
            trace!(section = section_id, "no nav link for section");
            return None;
        };
        self.place(link, sink);

        if self.initialized {
            return None;
        }
        self.initialized = true;
        Some(CommitTicket(self.generation))
    }

    /// Hover or focus on a specific link
    pub fn point_at<S: StyleSink + ?Sized>(&mut self, link: &NavLink, sink: &mut S) {
        if !self.enabled {
            return;
        }
        self.place(link, sink);
    }

    /// Re-enable transitions if `ticket` belongs to the current cycle
    pub fn commit_transitions<S: StyleSink + ?Sized>(
        &mut self,
        ticket: CommitTicket,
        sink: &mut S,
    ) -> bool {
        if !self.enabled || !self.suppressed || ticket.0 != self.generation {
            trace!(ticket = ticket.0, generation = self.generation, "stale underline ticket");
            return false;
        }
        self.suppressed = false;
        sink.set_class(StyleTarget::Underline, NO_TRANSITION_CLASS, false);
        debug!("underline transitions enabled");
        true
    }

    fn place<S: StyleSink + ?Sized>(&self, link: &NavLink, sink: &mut S) {
        sink.set_style(
            StyleTarget::Underline,
            "transform",
            &format!("translateX({})", px(link.left)),
        );
        sink.set_style(StyleTarget::Underline, "width", &px(link.width));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDocument;

    fn links() -> Vec<NavLink> {
        vec![
            NavLink::new("#work", 0.0, 48.0),
            NavLink::new("#about", 72.0, 56.0),
            NavLink::new("#contact", 152.0, 64.0),
        ]
    }

    #[test]
    fn test_first_placement_snaps_then_commits() {
        let mut doc = MemoryDocument::new();
        let mut underline = UnderlineController::new(true);
        underline.suppress(&mut doc);
        assert!(doc.has_class(StyleTarget::Underline, NO_TRANSITION_CLASS));

        let ticket = underline.sync_to_section("about", &links(), &mut doc).unwrap();
        assert_eq!(
            doc.style(StyleTarget::Underline, "transform"),
            Some("translateX(72px)")
        );
        assert_eq!(doc.style(StyleTarget::Underline, "width"), Some("56px"));
        // Still suppressed until the frames have passed
        assert!(doc.has_class(StyleTarget::Underline, NO_TRANSITION_CLASS));

        assert!(underline.commit_transitions(ticket, &mut doc));
        assert!(!doc.has_class(StyleTarget::Underline, NO_TRANSITION_CLASS));
        assert!(underline.sync_to_section("work", &links(), &mut doc).is_none());
    }

    #[test]
    fn test_stale_ticket_after_resize() {
        let mut doc = MemoryDocument::new();
        let mut underline = UnderlineController::new(true);
        underline.suppress(&mut doc);
        let stale = underline.sync_to_section("work", &links(), &mut doc).unwrap();

        underline.suppress(&mut doc);
        let fresh = underline.sync_to_section("work", &links(), &mut doc).unwrap();

        assert!(!underline.commit_transitions(stale, &mut doc));
        assert!(doc.has_class(StyleTarget::Underline, NO_TRANSITION_CLASS));
        assert!(underline.commit_transitions(fresh, &mut doc));
    }

    #[test]
    fn test_hover_then_revert() {
        let mut doc = MemoryDocument::new();
        let mut underline = UnderlineController::new(true);
        let links = links();
        let _ = underline.sync_to_section("work", &links, &mut doc);

        underline.point_at(&links[2], &mut doc);
        assert_eq!(
            doc.style(StyleTarget::Underline, "transform"),
            Some("translateX(152px)")
        );

        let _ = underline.sync_to_section("work", &links, &mut doc);
        assert_eq!(
            doc.style(StyleTarget::Underline, "transform"),
            Some("translateX(0px)")
        );
    }

    #[test]
    fn test_unknown_section_leaves_underline() {
        let mut doc = MemoryDocument::new();
        let mut underline = UnderlineController::new(true);
        assert!(underline.sync_to_section("hero", &links(), &mut doc).is_none());
        assert!(!underline.is_initialized());
        assert_eq!(doc.style_writes(), 0);
    }

    #[test]
    fn test_disabled_is_inert() {
        let mut doc = MemoryDocument::new();
        let mut underline = UnderlineController::new(false);
        underline.suppress(&mut doc);
        assert!(underline.sync_to_section("work", &links(), &mut doc).is_none());
        underline.point_at(&links()[0], &mut doc);
        assert_eq!(doc.style_writes(), 0);
        assert!(!doc.has_class(StyleTarget::Underline, NO_TRANSITION_CLASS));
    }
}
