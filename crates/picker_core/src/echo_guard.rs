//! Short-lived flag marking "the picker is applying its own update".
//!
//! While armed, programmatic writes are applied but the change-detection
//! paths that would call the parent back are skipped. It clears itself once
//! the window elapses; no timer task is involved.

use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug, Default)]
pub struct EchoGuard {
    suppressed_until: Option<Instant>,
}

impl EchoGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms suppression for `duration`. Never shortens an already longer window.
    pub fn suppress(&mut self, duration: Duration) {
        let until = Instant::now() + duration;
        self.suppressed_until = match self.suppressed_until {
            Some(current) if current > until => Some(current),
            _ => Some(until),
        };
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed_until
            .is_some_and(|until| Instant::now() < until)
    }

    pub fn remaining(&self) -> Option<Duration> {
        let until = self.suppressed_until?;
        let now = Instant::now();
        (now < until).then(|| until - now)
    }

    pub fn release(&mut self) {
        self.suppressed_until = None;
    }
}
