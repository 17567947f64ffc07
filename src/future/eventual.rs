use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use pin_project::pin_project;

/// A value which is either already available or still being computed.
///
/// Use this to put plain values and pending futures into one collection, or
/// to return either from a [`concurrent_map`] iterator.
///
/// [`concurrent_map`]: crate::future::concurrent_map
///
/// # Examples
///
/// ```
/// use flatline::future::Eventual;
/// use futures_lite::future::block_on;
/// use std::future::Future;
/// use std::pin::Pin;
///
/// type Boxed = Pin<Box<dyn Future<Output = u8>>>;
///
/// let values: Vec<Eventual<Boxed>> = vec![
///     Eventual::ready(1),
///     Eventual::pending(Box::pin(async { 2 })),
/// ];
///
/// block_on(async {
///     let mut sum = 0;
///     for value in values {
///         sum += value.await;
///     }
///     assert_eq!(sum, 3);
/// });
/// ```
#[must_use = "futures do nothing unless you `.await` or poll them"]
#[pin_project]
pub struct Eventual<Fut: Future> {
    #[pin]
    state: State<Fut>,
}

/// The output is taken out of `Value` on the poll which returns it.
#[pin_project(project = StateProj)]
enum State<Fut: Future> {
    Value(Option<Fut::Output>),
    Future(#[pin] Fut),
}

impl<Fut: Future> Eventual<Fut> {
    /// Create an `Eventual` whose output is already available.
    pub fn ready(output: Fut::Output) -> Self {
        Self {
            state: State::Value(Some(output)),
        }
    }

    /// Create an `Eventual` which completes when `future` does.
    pub fn pending(future: Fut) -> Self {
        Self {
            state: State::Future(future),
        }
    }

    /// Returns `true` if the output is available without polling.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Value(Some(_)))
    }
}

impl<Fut> fmt::Debug for Eventual<Fut>
where
    Fut: Future + fmt::Debug,
    Fut::Output: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::Value(Some(output)) => f.debug_tuple("Ready").field(output).finish(),
            State::Value(None) => f.write_str("Taken"),
            State::Future(fut) => f.debug_tuple("Pending").field(fut).finish(),
        }
    }
}

impl<Fut: Future> Future for Eventual<Fut> {
    type Output = Fut::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.project().state.project() {
            StateProj::Value(output) => Poll::Ready(
                output
                    .take()
                    .expect("`Eventual` must not be polled after completing"),
            ),
            StateProj::Future(fut) => fut.poll(cx),
        }
    }
}
