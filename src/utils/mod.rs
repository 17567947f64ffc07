//! Utilities to implement the futures of this crate.

mod pin;
mod wakers;

pub(crate) use pin::iter_pin_mut;
pub(crate) use wakers::SlotWakers;
