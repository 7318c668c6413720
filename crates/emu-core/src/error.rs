//! Bus and device failure taxonomy.

use thiserror::Error;

/// Errors raised by the address bus and the devices behind it.
///
/// All failures are abort-style: no retries, no clamping. A failed access
/// may leave earlier side effects in place (one byte of a word access, say);
/// callers treat any failure as fatal to the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BusError {
    /// No device is mapped over the address.
    #[error("unmapped address ${0:04X}")]
    Unmapped(u16),

    /// A new mapping intersects an existing one.
    #[error("mapping ${base:04X}+{size:#X} overlaps an existing mapping")]
    Overlap { base: u16, size: u32 },

    /// The resolved device has no write capability.
    #[error("address ${0:04X} is not writable")]
    NotWritable(u16),

    /// A device was asked for an offset outside its declared range.
    #[error("offset ${0:04X} out of range for device")]
    OutOfRange(u16),

    /// A backing-store size of zero, or one past the 64K address space.
    #[error("invalid memory size {0:#X}")]
    InvalidSize(u32),
}
