use std::sync::{Arc, Mutex};
use std::task::Wake;

use super::SlotReadiness;

/// A waker which marks its slot as ready and wakes the parent task.
#[derive(Debug)]
pub(crate) struct SlotWaker {
    pub(crate) index: usize,
    pub(crate) readiness: Arc<Mutex<SlotReadiness>>,
}

impl Wake for SlotWaker {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref()
    }

    fn wake_by_ref(self: &Arc<Self>) {
        // A poisoned lock means the combinator panicked while polling; there
        // is no task left to wake.
        let Ok(mut readiness) = self.readiness.lock() else {
            return;
        };
        if !readiness.set_ready(self.index) {
            if let Some(parent) = readiness.parent_waker() {
                parent.wake_by_ref();
            }
        }
    }
}
