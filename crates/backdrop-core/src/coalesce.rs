//! Resize burst coalescing
//!
//! Counts resize notifications between frames. Only the first notification
//! of a burst asks for a deferred render; the rest ride along with it.

use std::cell::Cell;

#[derive(Debug, Default)]
pub struct ResizeCoalescer {
    in_progress: Cell<u32>,
}

impl ResizeCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a notification. Returns true when the caller must schedule the
    /// deferred render (first notification since the last `complete`).
    pub fn notify(&self) -> bool {
        let count = self.in_progress.get().saturating_add(1);
        self.in_progress.set(count);
        count == 1
    }

    /// Mark the deferred render as finished
    pub fn complete(&self) {
        self.in_progress.set(0);
    }

    /// Notifications seen since the last `complete`
    pub fn pending(&self) -> u32 {
        self.in_progress.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_notification_schedules() {
        let c = ResizeCoalescer::new();
        assert_eq!(c.pending(), 0);
        assert!(c.notify());
        assert_eq!(c.pending(), 1);
    }

    #[test]
    fn test_burst_schedules_once() {
        let c = ResizeCoalescer::new();
        let scheduled = (0..50).filter(|_| c.notify()).count();
        assert_eq!(scheduled, 1);
        assert_eq!(c.pending(), 50);
    }

    #[test]
    fn test_complete_rearms() {
        let c = ResizeCoalescer::new();
        c.notify();
        c.notify();
        c.complete();
        assert_eq!(c.pending(), 0);
        assert!(c.notify());
    }
}
