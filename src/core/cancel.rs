/// Cooperative cancellation shared across discovery, coordinator, and workers
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cheaply cloneable cancellation flag. Set once, observed everywhere:
/// the walker aborts, the coordinator stops submitting, and workers bail
/// between detectors.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Error marker recorded when a scan is cut short
pub const CANCELLED: &str = "scan cancelled";
