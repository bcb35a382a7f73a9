//! Hardware abstraction layer
//!
//! The only hardware dependency of this driver is 32-bit register access to
//! the per-port window, abstracted by [`bus::RegisterBus`]. Delays come from
//! `embedded_hal::delay::DelayNs`, injected by the caller.

pub mod bus;

pub use bus::{Mmio32, RegisterBus};
