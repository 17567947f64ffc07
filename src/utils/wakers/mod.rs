mod slot_readiness;
mod slot_waker;
mod slot_wakers;

pub(crate) use slot_readiness::SlotReadiness;
pub(crate) use slot_waker::SlotWaker;
pub(crate) use slot_wakers::SlotWakers;
