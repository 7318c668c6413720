//! Core traits and types for cycle-accurate emulation.
//!
//! A machine is a set of devices behind an address bus, driven one discrete
//! tick at a time. This crate holds the chip-agnostic pieces: the device
//! capability surface, the mapped bus, the interrupt-request line, and the
//! tick plumbing. CPU cores build on top of these.

mod bus;
mod device;
mod error;
mod irq;
mod tickable;
mod ticks;

pub use bus::Bus;
pub use device::{Device, Ram, Rom};
pub use error::BusError;
pub use irq::IrqLine;
pub use tickable::Tickable;
pub use ticks::Ticks;
