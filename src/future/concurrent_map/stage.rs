use core::future::IntoFuture;
use core::pin::Pin;
use core::task::{ready, Context, Poll};

use futures_core::TryFuture;
use pin_project::pin_project;

/// The state machine of a single slot.
///
/// A slot first resolves its input element, then runs the iterator on the
/// resolved value and resolves whatever it returned.
#[pin_project(project = StageProj)]
pub(crate) enum Stage<Fut, Mapped> {
    /// Waiting for the input element.
    Resolving(#[pin] Fut),
    /// Waiting for the value returned by the iterator.
    Mapping(#[pin] Mapped),
    /// The slot produced its output, or failed.
    Settled,
}

impl<Fut, Mapped> Stage<Fut, Mapped>
where
    Fut: TryFuture,
    Mapped: TryFuture<Error = Fut::Error>,
{
    pub(crate) fn is_settled(&self) -> bool {
        matches!(self, Self::Settled)
    }

    /// Drive the slot as far as it can go without blocking.
    ///
    /// An element which resolves during this call is handed to `iterator`
    /// right away, and the iterator's result is polled in the same call.
    pub(crate) fn poll_settle<F, R>(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        iterator: &mut F,
    ) -> Poll<Result<Mapped::Ok, Fut::Error>>
    where
        F: FnMut(Fut::Ok) -> R,
        R: IntoFuture<IntoFuture = Mapped>,
    {
        loop {
            match self.as_mut().project() {
                StageProj::Resolving(element) => match ready!(element.try_poll(cx)) {
                    Ok(value) => self.set(Stage::Mapping(iterator(value).into_future())),
                    Err(err) => {
                        self.set(Stage::Settled);
                        return Poll::Ready(Err(err));
                    }
                },
                StageProj::Mapping(mapped) => {
                    let output = ready!(mapped.try_poll(cx));
                    self.set(Stage::Settled);
                    return Poll::Ready(output);
                }
                StageProj::Settled => panic!("slot polled after it settled"),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use core::future::{self, Ready};
    use std::pin::pin;

    type Element = Ready<Result<u8, &'static str>>;

    #[test]
    fn resolves_then_maps_in_one_poll() {
        let waker = futures::task::noop_waker();
        let mut cx = Context::from_waker(&waker);
        let mut stage = pin!(Stage::<Element, Element>::Resolving(future::ready(Ok(2))));

        let mut calls = 0;
        let mut double = |n: u8| {
            calls += 1;
            future::ready(Ok(n * 2))
        };
        let res = stage.as_mut().poll_settle(&mut cx, &mut double);
        assert_eq!(res, Poll::Ready(Ok(4)));
        assert!(stage.is_settled());
        assert_eq!(calls, 1);
    }

    #[test]
    fn failed_element_skips_iterator() {
        let waker = futures::task::noop_waker();
        let mut cx = Context::from_waker(&waker);
        let mut stage = pin!(Stage::<Element, Element>::Resolving(future::ready(Err("nope"))));

        let mut called = false;
        let mut iterator = |n: u8| {
            called = true;
            future::ready(Ok(n))
        };
        let res = stage.as_mut().poll_settle(&mut cx, &mut iterator);
        assert_eq!(res, Poll::Ready(Err("nope")));
        assert!(stage.is_settled());
        assert!(!called);
    }

    #[test]
    fn pending_element_waits() {
        let waker = futures::task::noop_waker();
        let mut cx = Context::from_waker(&waker);
        let mut stage = pin!(Stage::<future::Pending<Result<u8, ()>>, Ready<Result<u8, ()>>>::Resolving(
            future::pending()
        ));

        let mut iterator = |n: u8| future::ready(Ok(n));
        assert!(stage.as_mut().poll_settle(&mut cx, &mut iterator).is_pending());
        assert!(!stage.is_settled());
    }
}
