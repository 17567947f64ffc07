use super::stage::Stage;
use super::ConcurrentMap as ConcurrentMapTrait;
use crate::utils::{iter_pin_mut, SlotWakers};

use core::fmt;
use core::future::{Future, IntoFuture};
use core::mem;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures_core::future::FusedFuture;
use futures_core::TryFuture;
use pin_project::pin_project;

/// A future which maps every element concurrently and resolves to the
/// outputs in input order, or to the first error.
///
/// This `struct` is created by the [`concurrent_map`] method on the
/// [`ConcurrentMap`] trait. See its documentation for more.
///
/// [`concurrent_map`]: crate::future::ConcurrentMap::concurrent_map
/// [`ConcurrentMap`]: crate::future::ConcurrentMap
#[must_use = "futures do nothing unless you `.await` or poll them"]
#[pin_project]
pub struct ConcurrentMap<Fut, F, R>
where
    Fut: TryFuture,
    R: IntoFuture,
    R::IntoFuture: TryFuture<Error = Fut::Error>,
{
    /// Whether the future has resolved or failed
    settled: bool,
    /// The number of slots which have not produced their output yet
    outstanding: usize,
    /// The output of each slot, written exactly once
    slots: Vec<Option<<R::IntoFuture as TryFuture>::Ok>>,
    /// The waker passed to the future, and one sub-waker per slot.
    wakers: SlotWakers,
    /// The state machine of each slot.
    stages: Pin<Box<[Stage<Fut, R::IntoFuture>]>>,
    iterator: F,
}

impl<Fut, F, R> ConcurrentMap<Fut, F, R>
where
    Fut: TryFuture,
    R: IntoFuture,
    R::IntoFuture: TryFuture<Error = Fut::Error>,
{
    pub(crate) fn new(elements: Vec<Fut>, iterator: F) -> Self {
        let len = elements.len();
        let stages: Box<[_]> = elements.into_iter().map(Stage::Resolving).collect();
        Self {
            settled: false,
            outstanding: len,
            slots: (0..len).map(|_| None).collect(),
            wakers: SlotWakers::new(len),
            stages: Box::into_pin(stages),
            iterator,
        }
    }
}

impl<I> ConcurrentMapTrait for I
where
    I: IntoIterator,
    I::Item: IntoFuture,
    <I::Item as IntoFuture>::IntoFuture: TryFuture,
{
    type Element = <I::Item as IntoFuture>::IntoFuture;

    fn concurrent_map<F, R>(self, iterator: F) -> ConcurrentMap<Self::Element, F, R>
    where
        F: FnMut(<Self::Element as TryFuture>::Ok) -> R,
        R: IntoFuture,
        R::IntoFuture: TryFuture<Error = <Self::Element as TryFuture>::Error>,
    {
        let elements = self.into_iter().map(IntoFuture::into_future).collect();
        ConcurrentMap::new(elements, iterator)
    }
}

impl<Fut, F, R> fmt::Debug for ConcurrentMap<Fut, F, R>
where
    Fut: TryFuture,
    R: IntoFuture,
    R::IntoFuture: TryFuture<Error = Fut::Error>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentMap")
            .field("outstanding", &self.outstanding)
            .field("settled", &self.settled)
            .finish_non_exhaustive()
    }
}

impl<Fut, F, R> Future for ConcurrentMap<Fut, F, R>
where
    Fut: TryFuture,
    F: FnMut(Fut::Ok) -> R,
    R: IntoFuture,
    R::IntoFuture: TryFuture<Error = Fut::Error>,
{
    type Output = Result<Vec<<R::IntoFuture as TryFuture>::Ok>, Fut::Error>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        assert!(
            !*this.settled,
            "`ConcurrentMap` must not be polled after it has settled"
        );

        if *this.outstanding == 0 {
            // Nothing to map
            *this.settled = true;
            return Poll::Ready(Ok(Vec::new()));
        }

        let mut readiness = this.wakers.readiness().lock().unwrap();
        readiness.set_waker(cx.waker());
        if !readiness.any_ready() {
            // Nothing is ready yet
            return Poll::Pending;
        }

        // Poll every slot which was woken since the last poll. On the first
        // poll that is every slot, so all elements start resolving together,
        // even when an earlier slot fails during the same pass.
        let mut failure = None;
        for (index, stage) in iter_pin_mut(this.stages.as_mut()).enumerate() {
            if !readiness.clear_ready(index) || stage.is_settled() {
                continue;
            }

            // unlock readiness so we don't deadlock when polling
            drop(readiness);

            let mut cx = Context::from_waker(this.wakers.get(index));
            match stage.poll_settle(&mut cx, &mut *this.iterator) {
                Poll::Ready(Ok(value)) => {
                    debug_assert!(this.slots[index].is_none(), "slot written twice");
                    this.slots[index] = Some(value);
                    *this.outstanding -= 1;
                    trace!("slot {} settled, {} outstanding", index, this.outstanding);
                }
                Poll::Ready(Err(err)) => {
                    // First failure wins; later ones in this pass are discarded.
                    if failure.is_none() {
                        debug!("slot {} failed, settling with its error", index);
                        failure = Some(err);
                    } else {
                        trace!("slot {} failed after settling, ignored", index);
                    }
                }
                Poll::Pending => {}
            }

            // Lock readiness so we can use it again
            readiness = this.wakers.readiness().lock().unwrap();
        }
        drop(readiness);

        if let Some(err) = failure {
            *this.settled = true;
            return Poll::Ready(Err(err));
        }

        if *this.outstanding == 0 {
            *this.settled = true;
            debug!("all {} slots settled", this.slots.len());
            debug_assert!(this.slots.iter().all(Option::is_some));
            let values = mem::take(this.slots).into_iter().flatten().collect();
            Poll::Ready(Ok(values))
        } else {
            Poll::Pending
        }
    }
}

impl<Fut, F, R> FusedFuture for ConcurrentMap<Fut, F, R>
where
    Fut: TryFuture,
    F: FnMut(Fut::Ok) -> R,
    R: IntoFuture,
    R::IntoFuture: TryFuture<Error = Fut::Error>,
{
    fn is_terminated(&self) -> bool {
        self.settled
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::future::Eventual;
    use futures::channel::oneshot;
    use std::cell::RefCell;
    use std::future;
    use std::io::{self, Error, ErrorKind};
    use std::pin::pin;

    fn poll_once<F: Future + Unpin>(fut: &mut F) -> Poll<F::Output> {
        let waker = futures::task::noop_waker();
        let mut cx = Context::from_waker(&waker);
        Pin::new(fut).poll(&mut cx)
    }

    #[test]
    fn empty_resolves_without_calling_iterator() {
        futures_lite::future::block_on(async {
            let mut calls = 0;
            let elements: Vec<future::Ready<io::Result<u8>>> = vec![];
            let res = elements
                .concurrent_map(|n| {
                    calls += 1;
                    future::ready(io::Result::Ok(n))
                })
                .await;
            assert_eq!(res.unwrap(), Vec::<u8>::new());
            assert_eq!(calls, 0);
        })
    }

    #[test]
    fn all_ok() {
        futures_lite::future::block_on(async {
            let res: io::Result<_> = vec![future::ready(Ok("hello")), future::ready(Ok("world"))]
                .concurrent_map(|s| future::ready(Ok(s.to_uppercase())))
                .await;
            assert_eq!(res.unwrap(), ["HELLO", "WORLD"]);
        })
    }

    #[test]
    fn iterator_error() {
        futures_lite::future::block_on(async {
            let res: io::Result<Vec<&str>> = vec![
                future::ready(Ok("ok")),
                future::ready(Ok("bad")),
                future::ready(Ok("ok")),
            ]
            .concurrent_map(|s| {
                if s == "bad" {
                    Eventual::<future::Pending<_>>::ready(Err(Error::new(ErrorKind::Other, "boom")))
                } else {
                    Eventual::ready(Ok(s))
                }
            })
            .await;
            assert_eq!(res.unwrap_err().to_string(), "boom");
        })
    }

    #[test]
    fn element_error_still_starts_other_slots() {
        futures_lite::future::block_on(async {
            let calls = RefCell::new(Vec::new());
            let res = vec![future::ready(Ok(1)), future::ready(Err("rejected")), future::ready(Ok(3))]
                .concurrent_map(|n: i32| {
                    calls.borrow_mut().push(n);
                    future::ready(Ok(n))
                })
                .await;
            assert_eq!(res, Err("rejected"));
            // The failed element never reaches the iterator; the others do.
            assert_eq!(*calls.borrow(), [1, 3]);
        })
    }

    #[test]
    fn lowest_index_wins_within_one_pass() {
        futures_lite::future::block_on(async {
            let res = vec![future::ready(Ok(1)), future::ready(Err("a")), future::ready(Err("b"))]
                .concurrent_map(|n: i32| future::ready(Ok(n)))
                .await;
            assert_eq!(res, Err("a"));
        })
    }

    #[test]
    fn out_of_order_completion_keeps_positions() {
        let (tx0, rx0) = oneshot::channel::<u32>();
        let (tx1, rx1) = oneshot::channel::<u32>();
        let (tx2, rx2) = oneshot::channel::<u32>();
        let started = RefCell::new(Vec::new());

        let elements = [rx0, rx1, rx2].map(|rx| async move { rx.await.map_err(|_| "canceled") });
        let mut fut = pin!(elements.concurrent_map(|n| {
            started.borrow_mut().push(n);
            future::ready(Ok(n * 10))
        }));

        assert!(poll_once(&mut fut).is_pending());
        assert!(started.borrow().is_empty());

        tx2.send(3).unwrap();
        assert!(poll_once(&mut fut).is_pending());
        tx0.send(1).unwrap();
        assert!(poll_once(&mut fut).is_pending());
        tx1.send(2).unwrap();

        assert_eq!(poll_once(&mut fut), Poll::Ready(Ok(vec![10, 20, 30])));
        assert_eq!(*started.borrow(), [3, 1, 2]);
        assert!(fut.is_terminated());
    }

    #[test]
    fn first_failure_wins() {
        let (tx0, rx0) = oneshot::channel::<Result<u32, &str>>();
        let (tx1, rx1) = oneshot::channel::<Result<u32, &str>>();
        let (tx2, rx2) = oneshot::channel::<Result<u32, &str>>();

        let elements = [rx0, rx1, rx2].map(|rx| async move { rx.await.unwrap_or(Err("canceled")) });
        let mut fut = pin!(elements.concurrent_map(|n| future::ready(Ok(n))));

        assert!(poll_once(&mut fut).is_pending());
        tx0.send(Ok(1)).unwrap();
        tx2.send(Err("second")).unwrap();
        assert_eq!(poll_once(&mut fut), Poll::Ready(Err("second")));

        // Nothing is observed once settled.
        let _ = tx1.send(Err("late"));
        assert!(fut.is_terminated());
    }

    #[test]
    #[should_panic(expected = "must not be polled after it has settled")]
    fn polled_after_settling() {
        let mut fut = vec![future::ready(Ok::<_, ()>(1))].concurrent_map(|n| future::ready(Ok(n)));
        assert_eq!(poll_once(&mut fut), Poll::Ready(Ok(vec![1])));
        let _ = poll_once(&mut fut);
    }
}
