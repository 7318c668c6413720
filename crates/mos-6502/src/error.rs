//! CPU failure taxonomy.

use emu_core::BusError;
use thiserror::Error;

/// Errors surfaced by decode and execution.
///
/// Every one of these is fatal to the current run: the sequencer never
/// retries or skips, and partial mutation before the failure (one byte of a
/// two-byte push, say) is left in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CpuError {
    /// The byte at PC does not decode to a documented instruction.
    #[error("unknown opcode ${opcode:02X} at ${pc:04X}")]
    UnknownOpcode { opcode: u8, pc: u16 },

    /// An operand accessor was used in a way its addressing mode does not
    /// support (writing an immediate, reading an implied operand, ...).
    #[error("addressing mode does not support {0} access")]
    InvalidOperandAccess(&'static str),

    /// An indexed or indirect address computation left the 16-bit address
    /// space. Never silently wrapped or clamped.
    #[error("effective address computation overflowed the 16-bit address space")]
    AddressOverflow,

    /// A bus or device failure during operand or memory access.
    #[error(transparent)]
    Bus(#[from] BusError),
}
