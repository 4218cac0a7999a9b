use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// a shared flag used to stop long-running loops between iterations. clones
/// share the same underlying flag, so one clone can be handed to a worker while
/// another is kept by the caller to request cancellation.
#[derive(Debug, Clone, Default)]
pub struct CancellationSignal(Arc<AtomicBool>);

impl CancellationSignal {
    pub fn new() -> CancellationSignal {
        CancellationSignal::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let signal = CancellationSignal::new();
        let worker_copy = signal.clone();
        assert!(!worker_copy.is_cancelled());
        signal.cancel();
        assert!(worker_copy.is_cancelled());
    }
}
