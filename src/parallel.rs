//! Concurrent mapping on OS threads.
//!
//! [`try_map`] has the same contract as [`concurrent_map`] but calls a
//! blocking iterator on one thread per element. Because the slots are shared
//! between threads, the outstanding count is an atomic and settlement is
//! claimed with a compare-and-set, so exactly one thread publishes the
//! outcome.
//!
//! [`concurrent_map`]: crate::future::concurrent_map

use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

type Panic = Box<dyn Any + Send + 'static>;

/// The outcome published by the thread which settles the map.
enum Settlement<U, E> {
    Done(Vec<U>),
    Failed(E),
    Panicked(Panic),
}

struct Shared<U> {
    slots: Vec<Mutex<Option<U>>>,
    outstanding: AtomicUsize,
    settled: AtomicBool,
}

impl<U> Shared<U> {
    fn new(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| Mutex::new(None)).collect(),
            outstanding: AtomicUsize::new(len),
            settled: AtomicBool::new(false),
        }
    }

    /// Claim the right to publish the outcome. Only the first caller wins.
    fn claim(&self) -> bool {
        self.settled
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Write the output of `index`.
    ///
    /// Returns `true` if this was the last outstanding slot.
    fn fill(&self, index: usize, value: U) -> bool {
        *lock(&self.slots[index]) = Some(value);
        self.outstanding.fetch_sub(1, Ordering::AcqRel) == 1
    }

    fn take_all(&self) -> Vec<U> {
        self.slots
            .iter()
            .filter_map(|slot| lock(slot).take())
            .collect()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A unit of work handed to a spawner.
type Work = Box<dyn FnOnce() + Send + 'static>;

/// Map every element on its own thread, keeping input order.
///
/// Returns as soon as every element has been mapped, or as soon as the first
/// element fails. Threads still running after a failure are not interrupted:
/// they run to completion and their results are discarded. If the first
/// thread to settle panicked, the panic is resumed on the calling thread.
///
/// # Errors
///
/// The outer `io::Error` is returned if the OS refuses to start a worker
/// thread. Workers that were already started keep running and their results
/// are discarded. If one of them had already failed, that failure is
/// returned instead.
///
/// # Examples
///
/// ```
/// use flatline::parallel::try_map;
///
/// # fn main() -> std::io::Result<()> {
/// let lengths = try_map(vec!["one", "three"], |s| Ok::<_, ()>(s.len()))?;
/// assert_eq!(lengths, Ok(vec![3, 5]));
///
/// let res = try_map(vec![1, 2, 3], |n| if n == 2 { Err("boom") } else { Ok(n) })?;
/// assert_eq!(res, Err("boom"));
/// # Ok(())
/// # }
/// ```
pub fn try_map<I, T, U, E, F>(collection: I, iterator: F) -> io::Result<Result<Vec<U>, E>>
where
    I: IntoIterator<Item = T>,
    T: Send + 'static,
    U: Send + 'static,
    E: Send + 'static,
    F: Fn(T) -> Result<U, E> + Send + Sync + 'static,
{
    try_map_with(collection, iterator, |index, work| {
        thread::Builder::new()
            .name(format!("flatline-map-{index}"))
            .spawn(work)
            .map(drop)
    })
}

fn try_map_with<I, T, U, E, F, S>(
    collection: I,
    iterator: F,
    mut spawn: S,
) -> io::Result<Result<Vec<U>, E>>
where
    I: IntoIterator<Item = T>,
    T: Send + 'static,
    U: Send + 'static,
    E: Send + 'static,
    F: Fn(T) -> Result<U, E> + Send + Sync + 'static,
    S: FnMut(usize, Work) -> io::Result<()>,
{
    let elements: Vec<T> = collection.into_iter().collect();
    if elements.is_empty() {
        return Ok(Ok(Vec::new()));
    }

    let shared = Arc::new(Shared::new(elements.len()));
    let iterator = Arc::new(iterator);
    let (sender, receiver) = mpsc::sync_channel(1);

    for (index, element) in elements.into_iter().enumerate() {
        let worker_shared = shared.clone();
        let iterator = iterator.clone();
        let sender = sender.clone();
        let work = move || {
            let shared = worker_shared;
            let settlement = match panic::catch_unwind(AssertUnwindSafe(|| iterator(element))) {
                Ok(Ok(value)) => {
                    if !shared.fill(index, value) || !shared.claim() {
                        return;
                    }
                    Settlement::Done(shared.take_all())
                }
                Ok(Err(err)) => {
                    if !shared.claim() {
                        trace!("slot {} failed after settling, ignored", index);
                        return;
                    }
                    debug!("slot {} failed, settling with its error", index);
                    Settlement::Failed(err)
                }
                Err(payload) => {
                    if !shared.claim() {
                        trace!("slot {} panicked after settling, ignored", index);
                        return;
                    }
                    debug!("slot {} panicked, settling with its panic", index);
                    Settlement::Panicked(payload)
                }
            };
            // Only the winner of `claim` gets here, so the channel never fills.
            let _ = sender.send(settlement);
        };

        if let Err(err) = spawn(index, Box::new(work)) {
            if shared.claim() {
                debug!("failed to spawn worker {}: {}", index, err);
                return Err(err);
            }
            // A started worker has already settled the map; its outcome wins.
            trace!("failed to spawn worker {} after settling", index);
            break;
        }
    }
    drop(sender);

    match receiver.recv() {
        Ok(Settlement::Done(values)) => Ok(Ok(values)),
        Ok(Settlement::Failed(err)) => Ok(Err(err)),
        Ok(Settlement::Panicked(payload)) => panic::resume_unwind(payload),
        // Every started thread either fills its slot or claims settlement,
        // and whoever claims it always sends.
        Err(mpsc::RecvError) => unreachable!("all workers exited without settling"),
    }
}
