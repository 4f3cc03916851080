//! Frame throttle for scroll handling
//!
//! A pending-flag guard: the first scroll event schedules a frame callback,
//! later ones are dropped until that callback runs.

#[derive(Debug, Default, Clone, Copy)]
pub struct FrameThrottle {
    pending: bool,
}

impl FrameThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the caller should schedule a frame callback
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Called from the frame callback before doing the work
    pub fn complete(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coalesces_until_frame_runs() {
        let mut throttle = FrameThrottle::new();
        assert!(throttle.request());
        assert!(!throttle.request());
        assert!(!throttle.request());
        assert!(throttle.is_pending());

        throttle.complete();
        assert!(!throttle.is_pending());
        assert!(throttle.request());
    }
}
