use std::sync::{Arc, Mutex};
use std::task::Waker;

use super::{SlotReadiness, SlotWaker};

/// One waker per slot, all reporting into a shared `SlotReadiness`.
pub(crate) struct SlotWakers {
    wakers: Vec<Waker>,
    readiness: Arc<Mutex<SlotReadiness>>,
}

impl SlotWakers {
    pub(crate) fn new(len: usize) -> Self {
        let readiness = Arc::new(Mutex::new(SlotReadiness::new(len)));
        let wakers = (0..len)
            .map(|index| {
                Arc::new(SlotWaker {
                    index,
                    readiness: readiness.clone(),
                })
                .into()
            })
            .collect();
        Self { wakers, readiness }
    }

    /// The waker of the slot at `index`.
    pub(crate) fn get(&self, index: usize) -> &Waker {
        &self.wakers[index]
    }

    /// Access the `SlotReadiness`.
    pub(crate) fn readiness(&self) -> &Mutex<SlotReadiness> {
        self.readiness.as_ref()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::task::Wake;

    struct CountingWaker(AtomicUsize);

    impl Wake for CountingWaker {
        fn wake(self: Arc<Self>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn wakes_parent_once_per_readiness_change() {
        let wakers = SlotWakers::new(2);
        let parent = Arc::new(CountingWaker(AtomicUsize::new(0)));
        {
            let mut readiness = wakers.readiness().lock().unwrap();
            readiness.set_waker(&parent.clone().into());
            readiness.clear_ready(0);
            readiness.clear_ready(1);
        }

        wakers.get(1).wake_by_ref();
        wakers.get(1).wake_by_ref();
        assert_eq!(parent.0.load(Ordering::SeqCst), 1);

        let mut readiness = wakers.readiness().lock().unwrap();
        assert!(!readiness.clear_ready(0));
        assert!(readiness.clear_ready(1));
    }
}
