//! Single-slot scheduled callback driven by the simulation clock.
//!
//! Scheduling replaces any pending deadline, so at most one is outstanding.
//! Cancellation removes the deadline; a cancelled timer never fires.

#[derive(Debug, Clone, Default)]
pub struct DebounceTimer {
    deadline: Option<f64>,
}

impl DebounceTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the pending deadline (if any) and arm a new one `delay` seconds from `now`.
    pub fn schedule(&mut self, now: f64, delay: f64) {
        self.cancel();
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
