//! sitechrome-core - Core library for sitechrome
//!
//! Host-independent page chrome logic: header geometry, active section
//! resolution, header palettes, nav underline, mobile menu and theme state
//! machines. All environment access goes through the traits in [`env`], so
//! everything here runs natively against [`memory::MemoryDocument`].

pub mod chrome;
pub mod config;
pub mod env;
pub mod error;
pub mod geometry;
pub mod header_colors;
pub mod icon;
pub mod memory;
pub mod menu;
pub mod path;
pub mod section;
pub mod theme;
pub mod throttle;
pub mod underline;

pub use chrome::{ChromeEvent, PageChrome};
pub use config::ChromeConfig;
pub use env::{Capabilities, LayoutSource, PreferenceStore, StyleSink, StyleTarget};
pub use error::ChromeError;
pub use menu::{MenuController, MenuEffect, MenuEvent, MenuState};
pub use section::{NavLink, Section, SectionTracker};
pub use theme::{Theme, ThemeController, ThemeEvent};
pub use underline::{CommitTicket, UnderlineController};
