//! Single-slot request coalescing.
//!
//! Hosts trigger renders on discrete events (settings edits, image loads) and
//! drain one request per display-refresh opportunity, so rapid successive
//! edits collapse into a single render. The coalescer is generic: it knows
//! nothing about drawing, only about superseding.

/// Holds at most one pending request; a new one supersedes (cancels) any
/// request that has not been taken yet.
#[derive(Clone, Debug)]
pub struct Coalescer<T> {
    slot: Option<T>,
}

impl<T> Default for Coalescer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Coalescer<T> {
    pub fn new() -> Self {
        Self { slot: None }
    }

    /// Queue `request`, returning the superseded one if any.
    pub fn schedule(&mut self, request: T) -> Option<T> {
        self.slot.replace(request)
    }

    /// Drain the pending request for execution.
    pub fn take(&mut self) -> Option<T> {
        self.slot.take()
    }

    /// Drop the pending request without executing it.
    pub fn cancel(&mut self) {
        self.slot = None;
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }
}
