//! SVG path data tokenizing and interpolation
//!
//! Interpolation only works between structurally identical paths: the same
//! command letters in the same order with the same number of parameters.
//! Arc flags are switched at the midpoint instead of blended.

use crate::error::ChromeError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathToken {
    Command(char),
    Number(f64),
}

/// Parsed `d` attribute
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathData {
    tokens: Vec<PathToken>,
}

fn is_command(c: char) -> bool {
    matches!(
        c,
        'M' | 'm' | 'L' | 'l' | 'H' | 'h' | 'V' | 'v' | 'C' | 'c' | 'S' | 's' | 'Q' | 'q' | 'T'
            | 't' | 'A' | 'a' | 'Z' | 'z'
    )
}

impl PathData {
    pub fn parse(input: &str) -> Result<Self, ChromeError> {
        let bytes = input.as_bytes();
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < bytes.len() {
            let c = bytes[pos] as char;
            if c.is_ascii_whitespace() || c == ',' {
                pos += 1;
            } else if is_command(c) {
                tokens.push(PathToken::Command(c));
                pos += 1;
            } else if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') {
                if tokens.is_empty() {
                    return Err(ChromeError::PathParse {
                        position: pos,
                        message: "path data must start with a command".to_string(),
                    });
                }
                let end = scan_number(bytes, pos);
                let text = &input[pos..end];
                let value = text.parse::<f64>().map_err(|e| ChromeError::PathParse {
                    position: pos,
                    message: format!("invalid number {text:?}: {e}"),
                })?;
                tokens.push(PathToken::Number(value));
                pos = end;
            } else {
                return Err(ChromeError::PathParse {
                    position: pos,
                    message: format!("unexpected character {c:?}"),
                });
            }
        }

        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[PathToken] {
        &self.tokens
    }

    /// Same commands at the same positions, numbers everywhere else
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.tokens.len() == other.tokens.len()
            && self.tokens.iter().zip(&other.tokens).all(|pair| match pair {
                (PathToken::Command(a), PathToken::Command(b)) => a == b,
                (PathToken::Number(_), PathToken::Number(_)) => true,
                _ => false,
            })
    }

    /// Blend toward `other` at `t` in `[0, 1]`
    pub fn interpolate(&self, other: &Self, t: f64) -> Result<Self, ChromeError> {
        if !self.is_compatible(other) {
            return Err(ChromeError::PathMismatch {
                message: format!(
                    "{} tokens vs {} tokens or differing commands",
                    self.tokens.len(),
                    other.tokens.len()
                ),
            });
        }

        let t = t.clamp(0.0, 1.0);
        let mut command = 'M';
        let mut param = 0usize;
        let tokens = self
            .tokens
            .iter()
            .zip(&other.tokens)
            .map(|pair| match pair {
                (PathToken::Command(c), _) => {
                    command = *c;
                    param = 0;
                    PathToken::Command(*c)
                }
                (PathToken::Number(a), PathToken::Number(b)) => {
                    let is_flag = matches!(command, 'A' | 'a') && matches!(param % 7, 3 | 4);
                    param += 1;
                    let value = if is_flag {
                        if t < 0.5 { *a } else { *b }
                    } else {
                        a + (b - a) * t
                    };
                    PathToken::Number(value)
                }
                // Compatibility was checked above
                (PathToken::Number(a), PathToken::Command(_)) => PathToken::Number(*a),
            })
            .collect();

        Ok(Self { tokens })
    }
}

fn scan_number(bytes: &[u8], start: usize) -> usize {
    let mut pos = start;
    if matches!(bytes.get(pos), Some(b'-' | b'+')) {
        pos += 1;
    }
    let mut seen_dot = false;
    while let Some(&b) = bytes.get(pos) {
        match b {
            b'0'..=b'9' => pos += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                pos += 1;
            }
            b'e' | b'E' => {
                pos += 1;
                if matches!(bytes.get(pos), Some(b'-' | b'+')) {
                    pos += 1;
                }
                while matches!(bytes.get(pos), Some(b'0'..=b'9')) {
                    pos += 1;
                }
                break;
            }
            _ => break,
        }
    }
    pos
}

fn format_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{rounded}")
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut after_command = false;
        for (i, token) in self.tokens.iter().enumerate() {
            match token {
                PathToken::Command(c) => {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{c}")?;
                    after_command = true;
                }
                PathToken::Number(n) => {
                    if !after_command {
                        f.write_str(" ")?;
                    }
                    f.write_str(&format_number(*n))?;
                    after_command = false;
                }
            }
        }
        Ok(())
    }
}

/// Interpolate two `d` strings
pub fn interpolate_path(from: &str, to: &str, t: f64) -> Result<String, ChromeError> {
    let from = PathData::parse(from)?;
    let to = PathData::parse(to)?;
    Ok(from.interpolate(&to, t)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compact_numbers() {
        let path = PathData::parse("M10-5.5.5L1e2,3z").unwrap();
        assert_eq!(
            path.tokens(),
            &[
                PathToken::Command('M'),
                PathToken::Number(10.0),
                PathToken::Number(-5.5),
                PathToken::Number(0.5),
                PathToken::Command('L'),
                PathToken::Number(100.0),
                PathToken::Number(3.0),
                PathToken::Command('z'),
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            PathData::parse("10 10"),
            Err(ChromeError::PathParse { position: 0, .. })
        ));
        assert!(matches!(
            PathData::parse("M0 0 X"),
            Err(ChromeError::PathParse { position: 5, .. })
        ));
    }

    #[test]
    fn test_display_normalizes() {
        let path = PathData::parse("M 12,7 C14.76 7 17 9.24 17 12 Z").unwrap();
        assert_eq!(path.to_string(), "M12 7 C14.76 7 17 9.24 17 12 Z");
    }

    #[test]
    fn test_interpolate_midpoint() {
        let mid = interpolate_path("M0 0 L10 20", "M10 10 L20 40", 0.5).unwrap();
        assert_eq!(mid, "M5 5 L15 30");
    }

    #[test]
    fn test_interpolate_endpoints_and_clamp() {
        assert_eq!(interpolate_path("M0 0", "M4 8", 0.0).unwrap(), "M0 0");
        assert_eq!(interpolate_path("M0 0", "M4 8", 1.0).unwrap(), "M4 8");
        assert_eq!(interpolate_path("M0 0", "M4 8", 7.0).unwrap(), "M4 8");
    }

    #[test]
    fn test_arc_flags_switch_at_midpoint() {
        let from = "M0 0 A5 5 0 0 1 10 10";
        let to = "M0 0 A7 7 0 1 0 20 20";
        assert_eq!(interpolate_path(from, to, 0.25).unwrap(), "M0 0 A5.5 5.5 0 0 1 12.5 12.5");
        assert_eq!(interpolate_path(from, to, 0.75).unwrap(), "M0 0 A6.5 6.5 0 1 0 17.5 17.5");
    }

    #[test]
    fn test_mismatch_is_error() {
        let err = interpolate_path("M0 0 L1 1", "M0 0 C1 1 2 2 3 3", 0.5).unwrap_err();
        assert!(matches!(err, ChromeError::PathMismatch { .. }));
    }
}
