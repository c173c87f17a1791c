use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::TerminationCondition;

/// A [`TerminationCondition`] which triggers once the wrapped flag is raised, typically from
/// a signal handler.
#[derive(Clone, Debug)]
pub struct SignalFlag {
    flag: Arc<AtomicBool>,
}

impl SignalFlag {
    pub fn new(flag: Arc<AtomicBool>) -> SignalFlag {
        SignalFlag { flag }
    }
}

impl TerminationCondition for SignalFlag {
    fn should_stop(&mut self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
