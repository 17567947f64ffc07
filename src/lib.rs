//! Function composition, grouping, and an order-preserving concurrent map.
//!
//! # Operations
//!
//! - [`compose::flow_right`]: Compose functions right-to-left.
//! - [`group::group_by`]: Partition a collection into ordered buckets by key.
//! - [`group::group_by_field`]: Partition records by the value of a named field.
//! - [`future::ConcurrentMap`]: Map every element concurrently, keep input
//!   order, fail on the first error.
//! - [`parallel::try_map`]: The same, on one OS thread per element.
//!
//! # Examples
//!
//! Compose functions, group their results, and map over them concurrently:
//! ```rust
//! use flatline::compose::flow_right;
//! use flatline::group::group_by;
//! use flatline::prelude::*;
//! use futures_lite::future::block_on;
//! use std::future;
//!
//! let describe = flow_right((|n: u32| n % 2 == 0, |a: u32, b: u32| a + b));
//! assert!(describe.call((1, 3)));
//!
//! let parity = group_by(1..=5, |n| n % 2 == 0);
//! assert_eq!(parity[&false], [1, 3, 5]);
//!
//! block_on(async {
//!     let odds = parity[&false].iter().map(|n| future::ready(Ok::<_, ()>(*n)));
//!     let squares = odds.concurrent_map(|n| future::ready(Ok(n * n))).await;
//!     assert_eq!(squares, Ok(vec![1, 9, 25]));
//! })
//! ```
//!
//! # Cargo features
//!
//! - `tracing`: emit `trace`/`debug` events through the [`tracing`] crate
//!   when slots settle and when a failure settles a map.
//!
//! [`tracing`]: https://docs.rs/tracing

#![deny(missing_debug_implementations, nonstandard_style)]
#![warn(missing_docs, unreachable_pub)]
#![allow(non_snake_case)]

#[macro_use]
mod logging;
mod utils;

/// The flatline prelude.
pub mod prelude {
    pub use super::future::ConcurrentMap as _;
}

pub mod compose;
pub mod future;
pub mod group;
pub mod parallel;

/// Helper types for contiguous growable array type with heap-allocated contents,
/// written `Vec<T>`.
pub mod vec {
    pub use crate::future::concurrent_map::vec::ConcurrentMap;
}
