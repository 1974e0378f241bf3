//! Busy state of the submit trigger.
//!
//! The trigger is disabled and relabelled while a request is in flight. The
//! flag lives behind an `Arc<AtomicBool>` so the guard returned by
//! [`SubmitTrigger::begin`] can clear it from whatever scope the request ends
//! in, including a dropped task.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const SUBMIT_LABEL: &str = "Submit";
pub const BUSY_LABEL: &str = "Submitting...";

#[derive(Debug, Clone, Default)]
pub struct SubmitTrigger {
    busy: Arc<AtomicBool>,
}

impl SubmitTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn is_enabled(&self) -> bool {
        !self.is_busy()
    }

    pub fn label(&self) -> &'static str {
        if self.is_busy() {
            BUSY_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Mark the trigger busy. Returns `None` if a submission already holds it.
    pub fn begin(&self) -> Option<BusyGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| BusyGuard {
                busy: Arc::clone(&self.busy),
            })
    }

    /// Force the trigger back to its idle state
    pub fn restore(&self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}

/// Holds the trigger busy until dropped
#[derive(Debug)]
pub struct BusyGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_trigger() {
        let trigger = SubmitTrigger::new();
        assert!(trigger.is_enabled());
        assert_eq!(trigger.label(), "Submit");
    }

    #[test]
    fn test_begin_marks_busy_until_guard_drops() {
        let trigger = SubmitTrigger::new();
        let guard = trigger.begin().unwrap();
        assert!(trigger.is_busy());
        assert_eq!(trigger.label(), "Submitting...");

        drop(guard);
        assert!(trigger.is_enabled());
        assert_eq!(trigger.label(), "Submit");
    }

    #[test]
    fn test_second_begin_is_refused() {
        let trigger = SubmitTrigger::new();
        let _guard = trigger.begin().unwrap();
        assert!(trigger.begin().is_none());
        assert!(trigger.clone().begin().is_none());
    }

    #[test]
    fn test_guard_released_on_panic_unwind() {
        let trigger = SubmitTrigger::new();
        let shared = trigger.clone();
        let result = std::panic::catch_unwind(move || {
            let _guard = shared.begin().unwrap();
            panic!("request handler blew up");
        });
        assert!(result.is_err());
        assert!(trigger.is_enabled());
    }

    #[test]
    fn test_restore() {
        let trigger = SubmitTrigger::new();
        let guard = trigger.begin().unwrap();
        trigger.restore();
        assert!(trigger.is_enabled());
        drop(guard);
        assert!(trigger.is_enabled());
    }
}
