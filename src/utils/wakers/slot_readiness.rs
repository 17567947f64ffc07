use core::task::Waker;
use fixedbitset::FixedBitSet;

/// Tracks which slots have been woken since they were last polled.
#[derive(Debug)]
pub(crate) struct SlotReadiness {
    ready_count: usize,
    ready: FixedBitSet,
    parent_waker: Option<Waker>,
}

impl SlotReadiness {
    /// Create a new instance with every slot marked ready, so the first poll
    /// starts all of them.
    pub(crate) fn new(len: usize) -> Self {
        let mut ready = FixedBitSet::with_capacity(len);
        ready.insert_range(..);
        Self {
            ready_count: len,
            ready,
            parent_waker: None,
        }
    }

    /// Mark `index` as ready.
    ///
    /// Returns whether it was already ready.
    pub(crate) fn set_ready(&mut self, index: usize) -> bool {
        if self.ready.put(index) {
            true
        } else {
            self.ready_count += 1;
            false
        }
    }

    /// Clear the ready mark of `index`.
    ///
    /// Returns whether it was ready.
    pub(crate) fn clear_ready(&mut self, index: usize) -> bool {
        if self.ready[index] {
            self.ready.set(index, false);
            self.ready_count -= 1;
            true
        } else {
            false
        }
    }

    /// Returns `true` if any slot is ready.
    pub(crate) fn any_ready(&self) -> bool {
        self.ready_count > 0
    }

    /// The waker of the task polling the combinator.
    pub(crate) fn parent_waker(&self) -> Option<&Waker> {
        self.parent_waker.as_ref()
    }

    /// Set the parent `Waker`. This needs to be called at the start of every
    /// `poll` function.
    pub(crate) fn set_waker(&mut self, parent_waker: &Waker) {
        match &mut self.parent_waker {
            Some(prev) => prev.clone_from(parent_waker),
            None => self.parent_waker = Some(parent_waker.clone()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn starts_all_ready() {
        let mut readiness = SlotReadiness::new(3);
        assert!(readiness.any_ready());
        assert!(readiness.clear_ready(0));
        assert!(readiness.clear_ready(1));
        assert!(readiness.clear_ready(2));
        assert!(!readiness.any_ready());
        assert!(!readiness.clear_ready(1));
    }

    #[test]
    fn set_ready_is_idempotent() {
        let mut readiness = SlotReadiness::new(2);
        readiness.clear_ready(0);
        readiness.clear_ready(1);
        assert!(!readiness.set_ready(1));
        assert!(readiness.set_ready(1));
        assert!(readiness.clear_ready(1));
        assert!(!readiness.any_ready());
    }

    #[test]
    fn empty() {
        assert!(!SlotReadiness::new(0).any_ready());
    }
}
