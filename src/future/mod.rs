//! Concurrent, order-preserving, fail-fast mapping over futures.
//!
//! # Examples
//!
//! ```
//! use flatline::prelude::*;
//! use futures_lite::future::block_on;
//! use std::future;
//!
//! block_on(async {
//!     // Every element is a future; plain values are already-settled futures.
//!     let files = vec![future::ready(Ok("a.txt")), future::ready(Ok("b.txt"))];
//!
//!     // The iterator runs once per resolved element and may return a future.
//!     let contents: Result<_, std::io::Error> = files
//!         .concurrent_map(|name| async move {
//!             Ok(format!("{}-CONTENTS", name.trim_end_matches(".txt").to_uppercase()))
//!         })
//!         .await;
//!
//!     assert_eq!(contents.unwrap(), ["A-CONTENTS", "B-CONTENTS"]);
//! })
//! ```
//!
//! # Semantics
//!
//! | Situation                               | Outcome |
//! | ---                                     | ---     |
//! | empty input                             | `Ok(vec![])`, iterator never called |
//! | every element and iterator result `Ok`  | `Ok(outputs)` in input order |
//! | any element or iterator result `Err`    | the first `Err` observed |
//!
//! Elements are driven by per-slot wakers: after the first poll only slots
//! which were woken are polled again. Output order comes from writing each
//! slot's value at its own index, never from sequencing the work.
//!
//! Once settled the future must not be polled again. Nothing is sent to the
//! slots which were still in flight, but since a future only runs while it is
//! polled, their remaining work is dropped with the map rather than finishing
//! in the background. [`parallel::try_map`] runs each element on its own
//! thread, where that work does run to completion and is then ignored.
//!
//! [`parallel::try_map`]: crate::parallel::try_map

pub use concurrent_map::{concurrent_map, ConcurrentMap};
pub use eventual::Eventual;

pub(crate) mod concurrent_map;
mod eventual;
