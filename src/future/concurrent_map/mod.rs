use core::future::IntoFuture;

use futures_core::TryFuture;

pub(crate) mod stage;
pub(crate) mod vec;

/// Map every element of a collection concurrently, keeping input order.
///
/// Each element is itself a future. Once element `i` resolves, the iterator
/// is called with its value, and whatever the iterator returns is resolved in
/// turn. All elements start resolving at the same time; output `i` is always
/// the mapped value of element `i`, regardless of which finished first.
///
/// If any element or any iterator result fails, the whole operation fails
/// with that error. Only the first failure is returned. Failures are seen
/// when the future is polled, and each poll visits the woken slots in index
/// order, so among failures which became ready between the same two polls
/// the one with the lowest index wins, not the one which happened first.
///
/// Settling does not signal the remaining slots. Futures only make progress
/// while polled, so the elements and iterator futures still in flight are
/// dropped with the map instead of running to completion. Use
/// [`parallel::try_map`] when stragglers must keep running.
///
/// [`parallel::try_map`]: crate::parallel::try_map
pub trait ConcurrentMap {
    /// The future each element is turned into.
    type Element: TryFuture;

    /// Map every element concurrently.
    ///
    /// # Examples
    ///
    /// ```
    /// use flatline::prelude::*;
    /// use futures_lite::future::block_on;
    /// use std::future;
    ///
    /// block_on(async {
    ///     let names = vec![future::ready(Ok("a.txt")), future::ready(Ok("b.txt"))];
    ///     let upper: Result<_, ()> = names
    ///         .concurrent_map(|name| future::ready(Ok(name.to_uppercase())))
    ///         .await;
    ///     assert_eq!(upper.unwrap(), ["A.TXT", "B.TXT"]);
    /// })
    /// ```
    fn concurrent_map<F, R>(self, iterator: F) -> vec::ConcurrentMap<Self::Element, F, R>
    where
        F: FnMut(<Self::Element as TryFuture>::Ok) -> R,
        R: IntoFuture,
        R::IntoFuture: TryFuture<Error = <Self::Element as TryFuture>::Error>;
}

/// Map every element of `collection` concurrently, keeping input order.
///
/// This is a free-function form of [`ConcurrentMap::concurrent_map`].
///
/// # Examples
///
/// ```
/// use flatline::future::{concurrent_map, Eventual};
/// use futures_lite::future::block_on;
/// use std::future::{self, Ready};
///
/// block_on(async {
///     let res = concurrent_map([1, 2, 3].map(|n| future::ready(Ok(n))), |n| {
///         if n == 2 {
///             Eventual::<Ready<_>>::ready(Err("boom"))
///         } else {
///             Eventual::ready(Ok(n))
///         }
///     })
///     .await;
///     assert_eq!(res, Err("boom"));
/// })
/// ```
pub fn concurrent_map<I, F, R>(
    collection: I,
    iterator: F,
) -> vec::ConcurrentMap<<I::Item as IntoFuture>::IntoFuture, F, R>
where
    I: IntoIterator,
    I::Item: IntoFuture,
    <I::Item as IntoFuture>::IntoFuture: TryFuture,
    F: FnMut(<<I::Item as IntoFuture>::IntoFuture as TryFuture>::Ok) -> R,
    R: IntoFuture,
    R::IntoFuture: TryFuture<Error = <<I::Item as IntoFuture>::IntoFuture as TryFuture>::Error>,
{
    collection.concurrent_map(iterator)
}
