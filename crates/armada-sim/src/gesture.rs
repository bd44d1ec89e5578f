//! Tap gesture recognition: single vs double taps with a debounced reset.
//!
//! A tap is a double tap iff it lands within `threshold` seconds of the
//! previous tap. The first tap ever is always single. Every tap re-arms a
//! reset timer that clears the tap parity after `threshold` seconds of
//! inactivity.

use armada_core::error::{require_positive, ConfigError};
use tracing::trace;

use crate::timer::DebounceTimer;

/// Classification of one tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapKind {
    Single,
    Double,
}

impl TapKind {
    pub fn is_double(self) -> bool {
        self == TapKind::Double
    }
}

#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    threshold: f64,
    last_tap: Option<f64>,
    /// Toggles 0/1 per tap and is zeroed by the reset timer. Nothing reads it
    /// for classification; it is kept for gesture extensions.
    parity: u8,
    reset_timer: DebounceTimer,
}

impl GestureRecognizer {
    pub fn new(threshold: f64) -> Result<Self, ConfigError> {
        require_positive("double_tap_threshold", threshold)?;
        Ok(Self {
            threshold,
            last_tap: None,
            parity: 0,
            reset_timer: DebounceTimer::new(),
        })
    }

    /// Classify a tap at `now` against the previous tap, then record it.
    /// Timestamps must be non-decreasing.
    pub fn classify(&mut self, now: f64) -> TapKind {
        let kind = match self.last_tap {
            Some(last) if last + self.threshold >= now => TapKind::Double,
            _ => TapKind::Single,
        };

        self.parity += 1;
        if self.parity == 2 {
            self.parity = 0;
        }

        self.reset_timer.schedule(now, self.threshold);
        self.last_tap = Some(now);

        trace!(now, ?kind, parity = self.parity, "tap classified");
        kind
    }

    /// Advance the reset timer to `now`.
    pub fn update(&mut self, now: f64) {
        if self.reset_timer.poll(now) {
            self.parity = 0;
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn parity(&self) -> u8 {
        self.parity
    }

    pub fn last_tap(&self) -> Option<f64> {
        self.last_tap
    }

    pub fn reset_pending(&self) -> bool {
        self.reset_timer.is_pending()
    }
}
