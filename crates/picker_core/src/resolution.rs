use tokio::task::AbortHandle;

/// Tracks the one asynchronous resolution allowed to commit.
///
/// Starting a resolution aborts the previous task and bumps the generation;
/// results carrying an older generation are discarded.
#[derive(Debug, Default)]
pub(crate) struct ResolutionSlot {
    generation: u64,
    inflight: Option<AbortHandle>,
}

impl ResolutionSlot {
    pub(crate) fn begin(&mut self) -> u64 {
        self.supersede();
        self.generation
    }

    pub(crate) fn supersede(&mut self) {
        self.generation += 1;
        if let Some(task) = self.inflight.take() {
            task.abort();
        }
    }

    pub(crate) fn track(&mut self, generation: u64, task: AbortHandle) {
        if generation == self.generation {
            self.inflight = Some(task);
        } else {
            task.abort();
        }
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Marks the resolution done. Returns false when it was superseded.
    pub(crate) fn finish(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.inflight = None;
        true
    }

    pub(crate) fn is_inflight(&self) -> bool {
        self.inflight.is_some()
    }
}
