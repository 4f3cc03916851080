//! Mobile navigation drawer
//!
//! [`MenuState`] is the pure state machine (Closed / Open plus a transient
//! Resizing flag); [`MenuController`] turns its effects into document writes.
//!
//! | event                              | effect                                      |
//! |------------------------------------|---------------------------------------------|
//! | trigger, not resizing              | toggle                                      |
//! | nav link / Escape while open       | close                                       |
//! | resize crossing the breakpoint     | suppress transitions, close if now desktop, |
//! |                                    | schedule settle                             |
//! | resize within mobile while open    | close                                       |
//! | settle                             | restore transitions                         |

use crate::config::{Breakpoints, ChromeConfig};
use crate::env::{Capabilities, LayoutSource, StyleSink, StyleTarget};
use crate::geometry::{px, scrollbar_width};
use std::time::Duration;
use tracing::{debug, trace};

/// Root class while the drawer is open
pub const MENU_OPEN_CLASS: &str = "menu-open";
/// Root class while a breakpoint jump settles
pub const RESIZING_CLASS: &str = "resizing";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuEvent {
    TriggerActivated,
    LinkActivated,
    EscapePressed,
    /// Debounced resize with the new `window.innerWidth`
    Resized { viewport_width: f64 },
    /// Settle timer fired
    ResizeSettled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEffect {
    Open,
    Close,
    SuppressTransitions,
    RestoreTransitions,
    /// Cancel any pending settle timer and arm a new one
    ScheduleSettle(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
    resizing: bool,
    mobile: bool,
}

impl MenuState {
    pub fn new(mobile: bool) -> Self {
        Self {
            open: false,
            resizing: false,
            mobile,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_resizing(&self) -> bool {
        self.resizing
    }

    pub fn is_mobile(&self) -> bool {
        self.mobile
    }

    /// Apply one event, returning the effects in the order to perform them
    pub fn handle(
        &mut self,
        event: MenuEvent,
        breakpoints: &Breakpoints,
        settle: Duration,
    ) -> Vec<MenuEffect> {
        let mut effects = Vec::new();

        match event {
            MenuEvent::TriggerActivated => {
                if self.resizing {
                    trace!("menu trigger ignored while resizing");
                } else {
                    self.open = !self.open;
                    effects.push(if self.open {
                        MenuEffect::Open
                    } else {
                        MenuEffect::Close
                    });
                }
            }
            MenuEvent::LinkActivated | MenuEvent::EscapePressed => {
                if self.open {
                    self.open = false;
                    effects.push(MenuEffect::Close);
                }
            }
            MenuEvent::Resized { viewport_width } => {
                let was_mobile = self.mobile;
                self.mobile = breakpoints.is_mobile(viewport_width);

                if was_mobile != self.mobile {
                    self.resizing = true;
                    effects.push(MenuEffect::SuppressTransitions);
                    if !self.mobile && self.open {
                        self.open = false;
                        effects.push(MenuEffect::Close);
                    }
                    effects.push(MenuEffect::ScheduleSettle(settle));
                } else if self.mobile && self.open {
                    self.open = false;
                    effects.push(MenuEffect::Close);
                }
            }
            MenuEvent::ResizeSettled => {
                if self.resizing {
                    self.resizing = false;
                    effects.push(MenuEffect::RestoreTransitions);
                }
            }
        }

        if !effects.is_empty() {
            debug!(?event, ?effects, open = self.open, "menu transition");
        }
        effects
    }
}

/// Applies [`MenuState`] effects to the document
#[derive(Debug, Clone)]
pub struct MenuController {
    state: MenuState,
    breakpoints: Breakpoints,
    settle: Duration,
    capabilities: Capabilities,
}

impl MenuController {
    pub fn new(config: &ChromeConfig, capabilities: Capabilities, viewport_width: f64) -> Self {
        Self {
            state: MenuState::new(config.breakpoints.is_mobile(viewport_width)),
            breakpoints: config.breakpoints,
            settle: Duration::from_millis(u64::from(config.timing.resize_settle_ms)),
            capabilities,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Handle an event and perform the document side of it
    ///
    /// Timer effects are returned so the host can (re)arm its settle timer.
    pub fn handle<D>(&mut self, event: MenuEvent, doc: &mut D) -> Option<Duration>
    where
        D: LayoutSource + StyleSink + ?Sized,
    {
        let mut settle = None;
        for effect in self.state.handle(event, &self.breakpoints, self.settle) {
            match effect {
                MenuEffect::Open => self.open(doc),
                MenuEffect::Close => self.close(doc),
                MenuEffect::SuppressTransitions => self.suppress_transitions(doc),
                MenuEffect::RestoreTransitions => self.restore_transitions(doc),
                MenuEffect::ScheduleSettle(delay) => settle = Some(delay),
            }
        }
        settle
    }

    fn open<D: LayoutSource + StyleSink + ?Sized>(&self, doc: &mut D) {
        let gutter = px(scrollbar_width(doc.viewport_width(), doc.client_width()));
        doc.set_class(StyleTarget::Root, MENU_OPEN_CLASS, true);
        doc.set_attribute(StyleTarget::MenuTrigger, "aria-expanded", "true");
        doc.set_style(StyleTarget::Body, "padding-right", &gutter);
        doc.set_style(StyleTarget::Header, "padding-right", &gutter);
        doc.set_style(StyleTarget::Body, "overflow", "hidden");
    }

    fn close<D: StyleSink + ?Sized>(&self, doc: &mut D) {
        doc.set_class(StyleTarget::Root, MENU_OPEN_CLASS, false);
        doc.set_attribute(StyleTarget::MenuTrigger, "aria-expanded", "false");
        doc.clear_style(StyleTarget::Body, "overflow");
        doc.clear_style(StyleTarget::Body, "padding-right");
        doc.clear_style(StyleTarget::Header, "padding-right");
    }

    fn suppress_transitions<D: StyleSink + ?Sized>(&self, doc: &mut D) {
        doc.set_class(StyleTarget::Root, RESIZING_CLASS, true);
        doc.set_style(StyleTarget::NavPanel, "transition", "none");
        if self.capabilities.hide_nav_on_breakpoint {
            doc.set_style(StyleTarget::NavPanel, "opacity", "0");
            doc.set_style(StyleTarget::NavPanel, "visibility", "hidden");
            doc.set_style(StyleTarget::NavPanel, "transform", "translateX(100%)");
        }
    }

    fn restore_transitions<D: StyleSink + ?Sized>(&self, doc: &mut D) {
        doc.set_class(StyleTarget::Root, RESIZING_CLASS, false);
        doc.clear_style(StyleTarget::NavPanel, "transition");
        if self.capabilities.hide_nav_on_breakpoint {
            doc.clear_style(StyleTarget::NavPanel, "opacity");
            doc.clear_style(StyleTarget::NavPanel, "visibility");
            doc.clear_style(StyleTarget::NavPanel, "transform");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTLE: Duration = Duration::from_millis(200);

    fn handle(state: &mut MenuState, event: MenuEvent) -> Vec<MenuEffect> {
        state.handle(event, &Breakpoints::default(), SETTLE)
    }

    #[test]
    fn test_trigger_toggles() {
        let mut state = MenuState::new(true);
        assert_eq!(handle(&mut state, MenuEvent::TriggerActivated), vec![MenuEffect::Open]);
        assert!(state.is_open());
        assert_eq!(handle(&mut state, MenuEvent::TriggerActivated), vec![MenuEffect::Close]);
        assert!(!state.is_open());
    }

    #[test]
    fn test_link_and_escape_close_only_when_open() {
        let mut state = MenuState::new(true);
        assert!(handle(&mut state, MenuEvent::EscapePressed).is_empty());
        assert!(handle(&mut state, MenuEvent::LinkActivated).is_empty());

        handle(&mut state, MenuEvent::TriggerActivated);
        assert_eq!(handle(&mut state, MenuEvent::EscapePressed), vec![MenuEffect::Close]);

        handle(&mut state, MenuEvent::TriggerActivated);
        assert_eq!(handle(&mut state, MenuEvent::LinkActivated), vec![MenuEffect::Close]);
    }

    #[test]
    fn test_crossing_to_desktop_closes() {
        let mut state = MenuState::new(true);
        handle(&mut state, MenuEvent::TriggerActivated);

        let effects = handle(&mut state, MenuEvent::Resized { viewport_width: 1024.0 });
        assert_eq!(
            effects,
            vec![
                MenuEffect::SuppressTransitions,
                MenuEffect::Close,
                MenuEffect::ScheduleSettle(SETTLE),
            ]
        );
        assert!(!state.is_open());
        assert!(state.is_resizing());
        assert!(!state.is_mobile());
    }

    #[test]
    fn test_trigger_blocked_while_resizing() {
        let mut state = MenuState::new(false);
        handle(&mut state, MenuEvent::Resized { viewport_width: 600.0 });
        assert!(state.is_resizing());
        assert!(handle(&mut state, MenuEvent::TriggerActivated).is_empty());

        assert_eq!(
            handle(&mut state, MenuEvent::ResizeSettled),
            vec![MenuEffect::RestoreTransitions]
        );
        assert_eq!(handle(&mut state, MenuEvent::TriggerActivated), vec![MenuEffect::Open]);
    }

    #[test]
    fn test_mobile_resize_closes_open_menu() {
        let mut state = MenuState::new(true);
        handle(&mut state, MenuEvent::TriggerActivated);
        assert_eq!(
            handle(&mut state, MenuEvent::Resized { viewport_width: 420.0 }),
            vec![MenuEffect::Close]
        );
        assert!(!state.is_resizing());
    }

    #[test]
    fn test_desktop_resize_without_crossing_is_quiet() {
        let mut state = MenuState::new(false);
        assert!(handle(&mut state, MenuEvent::Resized { viewport_width: 1440.0 }).is_empty());
        assert!(handle(&mut state, MenuEvent::ResizeSettled).is_empty());
    }

    #[test]
    fn test_crossing_back_while_resizing_rearms_settle() {
        let mut state = MenuState::new(true);
        assert_eq!(
            handle(&mut state, MenuEvent::Resized { viewport_width: 1024.0 }),
            vec![MenuEffect::SuppressTransitions, MenuEffect::ScheduleSettle(SETTLE)]
        );

        assert_eq!(
            handle(&mut state, MenuEvent::Resized { viewport_width: 500.0 }),
            vec![MenuEffect::SuppressTransitions, MenuEffect::ScheduleSettle(SETTLE)]
        );
        assert!(state.is_resizing());
        assert!(state.is_mobile());

        assert_eq!(
            handle(&mut state, MenuEvent::ResizeSettled),
            vec![MenuEffect::RestoreTransitions]
        );
        assert!(!state.is_resizing());
        assert!(handle(&mut state, MenuEvent::ResizeSettled).is_empty());
    }
}
