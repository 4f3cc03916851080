//! Theme icon animation
//!
//! The icon is a fixed set of `<path>` elements whose `d` data morphs between
//! a sun (light theme) and a moon (dark theme). Three strategies:
//!
//! - [`AnimationStrategy::Morph`]: interpolate path data with ease-in-out
//! - [`AnimationStrategy::Crossfade`]: fade out, swap at the midpoint, fade in
//! - [`AnimationStrategy::Instant`]: write the final paths directly
//!
//! The last frame of every strategy writes the target strings verbatim, so
//! toggling twice restores the original attributes exactly.

use crate::config::ThemeConfig;
use crate::env::{Capabilities, StyleSink, StyleTarget};
use crate::error::ChromeError;
use crate::path::interpolate_path;
use crate::theme::Theme;
use tracing::warn;

/// Sun: round body plus eight rays
pub const SUN_PATHS: [&str; 2] = [
    "M12 7 C14.76 7 17 9.24 17 12 C17 14.76 14.76 17 12 17 C9.24 17 7 14.76 7 12 C7 9.24 9.24 7 12 7 Z",
    "M12 1 L12 3 M12 21 L12 23 M4.22 4.22 L5.64 5.64 M18.36 18.36 L19.78 19.78 M1 12 L3 12 M21 12 L23 12 M4.22 19.78 L5.64 18.36 M18.36 5.64 L19.78 4.22",
];

/// Moon: crescent body, rays collapsed into the center
pub const MOON_PATHS: [&str; 2] = [
    "M12 3 C7.03 3 3 7.03 3 12 C3 16.97 7.03 21 12 21 C16.97 21 21 16.97 21 12 C17.5 14.5 9.5 12.5 12 3 Z",
    "M12 12 L12 12 M12 12 L12 12 M12 12 L12 12 M12 12 L12 12 M12 12 L12 12 M12 12 L12 12 M12 12 L12 12 M12 12 L12 12",
];

/// Cubic ease-in-out over `[0, 1]`
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStrategy {
    Morph,
    Crossfade,
    Instant,
}

impl AnimationStrategy {
    /// Pick once at startup from host capabilities
    pub fn select(enabled: bool, capabilities: Capabilities) -> Self {
        if !enabled || capabilities.reduced_motion {
            Self::Instant
        } else if capabilities.path_morph {
            Self::Morph
        } else {
            Self::Crossfade
        }
    }
}

/// One rendered animation step
#[derive(Debug, Clone, PartialEq)]
pub struct IconFrame {
    pub paths: Vec<String>,
    /// Icon opacity, `None` leaves the inline style cleared
    pub opacity: Option<f64>,
    pub done: bool,
}

/// Path sets per theme
#[derive(Debug, Clone, PartialEq)]
pub struct IconPaths {
    pub light: Vec<String>,
    pub dark: Vec<String>,
}

impl IconPaths {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            light: config.light_icon_paths.clone(),
            dark: config.dark_icon_paths.clone(),
        }
    }

    pub fn for_theme(&self, theme: Theme) -> &[String] {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }
}

/// A single icon transition between two themes
#[derive(Debug, Clone)]
pub struct IconAnimation {
    strategy: AnimationStrategy,
    from: Vec<String>,
    to: Vec<String>,
    duration_ms: f64,
}

impl IconAnimation {
    pub fn new(
        strategy: AnimationStrategy,
        paths: &IconPaths,
        from: Theme,
        to: Theme,
        duration_ms: u32,
    ) -> Self {
        Self {
            strategy,
            from: paths.for_theme(from).to_vec(),
            to: paths.for_theme(to).to_vec(),
            duration_ms: f64::from(duration_ms),
        }
    }

    /// Final state, used directly when animation fails
    pub fn final_frame(&self) -> IconFrame {
        IconFrame {
            paths: self.to.clone(),
            opacity: None,
            done: true,
        }
    }

    /// Frame at `elapsed_ms` since the animation started
    pub fn frame(&self, elapsed_ms: f64) -> Result<IconFrame, ChromeError> {
        if self.strategy == AnimationStrategy::Instant
            || self.duration_ms <= 0.0
            || elapsed_ms >= self.duration_ms
        {
            return Ok(self.final_frame());
        }
        let progress = (elapsed_ms / self.duration_ms).max(0.0);

        match self.strategy {
            AnimationStrategy::Morph => {
                if self.from.len() != self.to.len() {
                    return Err(ChromeError::PathMismatch {
                        message: format!(
                            "{} source paths vs {} target paths",
                            self.from.len(),
                            self.to.len()
                        ),
                    });
                }
                let eased = ease_in_out(progress);
                let paths = self
                    .from
                    .iter()
                    .zip(&self.to)
                    .map(|(from, to)| interpolate_path(from, to, eased))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(IconFrame {
                    paths,
                    opacity: None,
                    done: false,
                })
            }
            AnimationStrategy::Crossfade => {
                let (paths, opacity) = if progress < 0.5 {
                    (&self.from, 1.0 - ease_in_out(progress * 2.0))
                } else {
                    (&self.to, ease_in_out((progress - 0.5) * 2.0))
                };
                Ok(IconFrame {
                    paths: paths.clone(),
                    opacity: Some(opacity),
                    done: false,
                })
            }
            AnimationStrategy::Instant => Ok(self.final_frame()),
        }
    }

    /// Compute and apply the frame, falling back to the final paths on error
    ///
    /// Returns `true` once the animation is finished.
    pub fn render<S: StyleSink + ?Sized>(&self, elapsed_ms: f64, sink: &mut S) -> bool {
        let frame = self.frame(elapsed_ms).unwrap_or_else(|e| {
            warn!(error = %e, "icon animation failed, applying final paths");
            self.final_frame()
        });
        apply_icon_frame(&frame, sink);
        frame.done
    }
}

/// Write a frame to the icon elements
pub fn apply_icon_frame<S: StyleSink + ?Sized>(frame: &IconFrame, sink: &mut S) {
    for (index, d) in frame.paths.iter().enumerate() {
        sink.set_attribute(StyleTarget::IconPath(index), "d", d);
    }
    match frame.opacity {
        Some(opacity) => sink.set_style(StyleTarget::Icon, "opacity", &format!("{opacity:.3}")),
        None => sink.clear_style(StyleTarget::Icon, "opacity"),
    }
}
