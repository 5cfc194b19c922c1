//! Single-timer buffer for free-text edits. The newest keystroke wins.

use std::time::Duration;

use tokio::task::JoinHandle;

struct PendingText {
    generation: u64,
    text: String,
    timer: Option<JoinHandle<()>>,
}

pub struct DebouncedTextChannel {
    delay: Duration,
    generation: u64,
    pending: Option<PendingText>,
}

impl DebouncedTextChannel {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records `text`, cancels the live timer and returns the generation the
    /// next timer must present on expiry.
    pub fn keystroke(&mut self, text: impl Into<String>) -> u64 {
        self.cancel_timer();
        self.generation += 1;
        self.pending = Some(PendingText {
            generation: self.generation,
            text: text.into(),
            timer: None,
        });
        self.generation
    }

    /// Attaches the timer task spawned for `generation`. A superseded timer is aborted.
    pub fn arm(&mut self, generation: u64, timer: JoinHandle<()>) {
        match self.pending.as_mut() {
            Some(pending) if pending.generation == generation => pending.timer = Some(timer),
            _ => timer.abort(),
        }
    }

    /// Called by a timer on expiry; yields the text only if nothing superseded it.
    pub fn take_if_current(&mut self, generation: u64) -> Option<String> {
        match &self.pending {
            Some(pending) if pending.generation == generation => {
                self.pending.take().map(|pending| pending.text)
            }
            _ => None,
        }
    }

    /// Takes the buffered text right away (blur / Enter), cancelling the timer.
    pub fn flush(&mut self) -> Option<String> {
        self.cancel_timer();
        self.pending.take().map(|pending| pending.text)
    }

    /// Drops buffered text; any timer still running becomes stale.
    pub fn invalidate(&mut self) {
        self.cancel_timer();
        self.generation += 1;
        self.pending = None;
    }

    pub fn pending_text(&self) -> Option<&str> {
        self.pending.as_ref().map(|pending| pending.text.as_str())
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.pending.as_mut().and_then(|pending| pending.timer.take()) {
            timer.abort();
        }
    }
}

impl Drop for DebouncedTextChannel {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
