use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Shared "please stop" switch. Long runs poll it between steps, so
/// stopping never leaves a half-carved wall or a half-visited node.
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_flag() {
        let flag = StopFlag::new();
        let handle = flag.clone();
        assert!(!flag.is_requested());

        handle.request();
        assert!(flag.is_requested());
        assert!(!StopFlag::new().is_requested());
    }

    #[test]
    fn test_request_from_another_thread() {
        let flag = StopFlag::new();
        let handle = flag.clone();

        std::thread::spawn(move || handle.request())
            .join()
            .expect("thread should not panic");

        assert!(flag.is_requested());
    }
}
