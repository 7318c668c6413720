//! Static instruction catalog.
//!
//! One descriptor per documented opcode: mnemonic, addressing mode, encoded
//! size, base cycle count, page-cross penalty policy, and the semantic
//! handler. The 256-entry lookup table is built once at compile time and is
//! immutable; [`lookup`] exposes it read-only so an external disassembler
//! can render listings from the same data the core executes.
//!
//! The 105 undocumented encodings have no entry — decoding one is fatal.

use crate::addressing::Mode;
use crate::instructions::{self, Handler};

/// Instruction mnemonics, as they appear in assembly listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
}

impl Mnemonic {
    /// The listing form of the mnemonic.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Mnemonic::Adc => "ADC",
            Mnemonic::And => "AND",
            Mnemonic::Asl => "ASL",
            Mnemonic::Bcc => "BCC",
            Mnemonic::Bcs => "BCS",
            Mnemonic::Beq => "BEQ",
            Mnemonic::Bit => "BIT",
            Mnemonic::Bmi => "BMI",
            Mnemonic::Bne => "BNE",
            Mnemonic::Bpl => "BPL",
            Mnemonic::Brk => "BRK",
            Mnemonic::Bvc => "BVC",
            Mnemonic::Bvs => "BVS",
            Mnemonic::Clc => "CLC",
            Mnemonic::Cld => "CLD",
            Mnemonic::Cli => "CLI",
            Mnemonic::Clv => "CLV",
            Mnemonic::Cmp => "CMP",
            Mnemonic::Cpx => "CPX",
            Mnemonic::Cpy => "CPY",
            Mnemonic::Dec => "DEC",
            Mnemonic::Dex => "DEX",
            Mnemonic::Dey => "DEY",
            Mnemonic::Eor => "EOR",
            Mnemonic::Inc => "INC",
            Mnemonic::Inx => "INX",
            Mnemonic::Iny => "INY",
            Mnemonic::Jmp => "JMP",
            Mnemonic::Jsr => "JSR",
            Mnemonic::Lda => "LDA",
            Mnemonic::Ldx => "LDX",
            Mnemonic::Ldy => "LDY",
            Mnemonic::Lsr => "LSR",
            Mnemonic::Nop => "NOP",
            Mnemonic::Ora => "ORA",
            Mnemonic::Pha => "PHA",
            Mnemonic::Php => "PHP",
            Mnemonic::Pla => "PLA",
            Mnemonic::Plp => "PLP",
            Mnemonic::Rol => "ROL",
            Mnemonic::Ror => "ROR",
            Mnemonic::Rti => "RTI",
            Mnemonic::Rts => "RTS",
            Mnemonic::Sbc => "SBC",
            Mnemonic::Sec => "SEC",
            Mnemonic::Sed => "SED",
            Mnemonic::Sei => "SEI",
            Mnemonic::Sta => "STA",
            Mnemonic::Stx => "STX",
            Mnemonic::Sty => "STY",
            Mnemonic::Tax => "TAX",
            Mnemonic::Tay => "TAY",
            Mnemonic::Tsx => "TSX",
            Mnemonic::Txa => "TXA",
            Mnemonic::Txs => "TXS",
            Mnemonic::Tya => "TYA",
        }
    }
}

/// One row of the instruction catalog.
#[derive(Debug, Clone, Copy)]
pub struct Instruction {
    /// The opcode byte.
    pub opcode: u8,
    /// Instruction mnemonic.
    pub mnemonic: Mnemonic,
    /// Addressing mode.
    pub mode: Mode,
    /// Total encoded size in bytes (opcode plus operands).
    pub size: u8,
    /// Base cycle count, before page-cross or branch penalties.
    pub cycles: u8,
    /// Charge one extra cycle when the access crosses a page boundary.
    pub page_penalty: bool,
    /// Semantic handler.
    pub(crate) handler: Handler,
}

const fn op(
    opcode: u8,
    mnemonic: Mnemonic,
    mode: Mode,
    cycles: u8,
    page_penalty: bool,
    handler: Handler,
) -> Instruction {
    Instruction {
        opcode,
        mnemonic,
        mode,
        size: 1 + mode.operand_len(),
        cycles,
        page_penalty,
        handler,
    }
}

#[rustfmt::skip]
const CATALOG: &[Instruction] = &[
    // Load/store
    op(0xA9, Mnemonic::Lda, Mode::Immediate,       2, false, instructions::lda),
    op(0xA5, Mnemonic::Lda, Mode::ZeroPage,        3, false, instructions::lda),
    op(0xB5, Mnemonic::Lda, Mode::ZeroPageX,       4, false, instructions::lda),
    op(0xAD, Mnemonic::Lda, Mode::Absolute,        4, false, instructions::lda),
    op(0xBD, Mnemonic::Lda, Mode::AbsoluteX,       4, true,  instructions::lda),
    op(0xB9, Mnemonic::Lda, Mode::AbsoluteY,       4, true,  instructions::lda),
    op(0xA1, Mnemonic::Lda, Mode::IndexedIndirect, 6, false, instructions::lda),
    op(0xB1, Mnemonic::Lda, Mode::IndirectIndexed, 5, true,  instructions::lda),
    op(0xA2, Mnemonic::Ldx, Mode::Immediate,       2, false, instructions::ldx),
    op(0xA6, Mnemonic::Ldx, Mode::ZeroPage,        3, false, instructions::ldx),
    op(0xB6, Mnemonic::Ldx, Mode::ZeroPageY,       4, false, instructions::ldx),
    op(0xAE, Mnemonic::Ldx, Mode::Absolute,        4, false, instructions::ldx),
    op(0xBE, Mnemonic::Ldx, Mode::AbsoluteY,       4, true,  instructions::ldx),
    op(0xA0, Mnemonic::Ldy, Mode::Immediate,       2, false, instructions::ldy),
    op(0xA4, Mnemonic::Ldy, Mode::ZeroPage,        3, false, instructions::ldy),
    op(0xB4, Mnemonic::Ldy, Mode::ZeroPageX,       4, false, instructions::ldy),
    op(0xAC, Mnemonic::Ldy, Mode::Absolute,        4, false, instructions::ldy),
    op(0xBC, Mnemonic::Ldy, Mode::AbsoluteX,       4, true,  instructions::ldy),
    op(0x85, Mnemonic::Sta, Mode::ZeroPage,        3, false, instructions::sta),
    op(0x95, Mnemonic::Sta, Mode::ZeroPageX,       4, false, instructions::sta),
    op(0x8D, Mnemonic::Sta, Mode::Absolute,        4, false, instructions::sta),
    op(0x9D, Mnemonic::Sta, Mode::AbsoluteX,       5, false, instructions::sta),
    op(0x99, Mnemonic::Sta, Mode::AbsoluteY,       5, false, instructions::sta),
    op(0x81, Mnemonic::Sta, Mode::IndexedIndirect, 6, false, instructions::sta),
    op(0x91, Mnemonic::Sta, Mode::IndirectIndexed, 6, false, instructions::sta),
    op(0x86, Mnemonic::Stx, Mode::ZeroPage,        3, false, instructions::stx),
    op(0x96, Mnemonic::Stx, Mode::ZeroPageY,       4, false, instructions::stx),
    op(0x8E, Mnemonic::Stx, Mode::Absolute,        4, false, instructions::stx),
    op(0x84, Mnemonic::Sty, Mode::ZeroPage,        3, false, instructions::sty),
    op(0x94, Mnemonic::Sty, Mode::ZeroPageX,       4, false, instructions::sty),
    op(0x8C, Mnemonic::Sty, Mode::Absolute,        4, false, instructions::sty),

    // Transfers
    op(0xAA, Mnemonic::Tax, Mode::Implied,         2, false, instructions::tax),
    op(0xA8, Mnemonic::Tay, Mode::Implied,         2, false, instructions::tay),
    op(0x8A, Mnemonic::Txa, Mode::Implied,         2, false, instructions::txa),
    op(0x98, Mnemonic::Tya, Mode::Implied,         2, false, instructions::tya),
    op(0xBA, Mnemonic::Tsx, Mode::Implied,         2, false, instructions::tsx),
    op(0x9A, Mnemonic::Txs, Mode::Implied,         2, false, instructions::txs),

    // Stack
    op(0x48, Mnemonic::Pha, Mode::Implied,         3, false, instructions::pha),
    op(0x08, Mnemonic::Php, Mode::Implied,         3, false, instructions::php),
    op(0x68, Mnemonic::Pla, Mode::Implied,         4, false, instructions::pla),
    op(0x28, Mnemonic::Plp, Mode::Implied,         4, false, instructions::plp),

    // Arithmetic
    op(0x69, Mnemonic::Adc, Mode::Immediate,       2, false, instructions::adc),
    op(0x65, Mnemonic::Adc, Mode::ZeroPage,        3, false, instructions::adc),
    op(0x75, Mnemonic::Adc, Mode::ZeroPageX,       4, false, instructions::adc),
    op(0x6D, Mnemonic::Adc, Mode::Absolute,        4, false, instructions::adc),
    op(0x7D, Mnemonic::Adc, Mode::AbsoluteX,       4, true,  instructions::adc),
    op(0x79, Mnemonic::Adc, Mode::AbsoluteY,       4, true,  instructions::adc),
    op(0x61, Mnemonic::Adc, Mode::IndexedIndirect, 6, false, instructions::adc),
    op(0x71, Mnemonic::Adc, Mode::IndirectIndexed, 5, true,  instructions::adc),
    op(0xE9, Mnemonic::Sbc, Mode::Immediate,       2, false, instructions::sbc),
    op(0xE5, Mnemonic::Sbc, Mode::ZeroPage,        3, false, instructions::sbc),
    op(0xF5, Mnemonic::Sbc, Mode::ZeroPageX,       4, false, instructions::sbc),
    op(0xED, Mnemonic::Sbc, Mode::Absolute,        4, false, instructions::sbc),
    op(0xFD, Mnemonic::Sbc, Mode::AbsoluteX,       4, true,  instructions::sbc),
    op(0xF9, Mnemonic::Sbc, Mode::AbsoluteY,       4, true,  instructions::sbc),
    op(0xE1, Mnemonic::Sbc, Mode::IndexedIndirect, 6, false, instructions::sbc),
    op(0xF1, Mnemonic::Sbc, Mode::IndirectIndexed, 5, true,  instructions::sbc),

    // Compares
    op(0xC9, Mnemonic::Cmp, Mode::Immediate,       2, false, instructions::cmp),
    op(0xC5, Mnemonic::Cmp, Mode::ZeroPage,        3, false, instructions::cmp),
    op(0xD5, Mnemonic::Cmp, Mode::ZeroPageX,       4, false, instructions::cmp),
    op(0xCD, Mnemonic::Cmp, Mode::Absolute,        4, false, instructions::cmp),
    op(0xDD, Mnemonic::Cmp, Mode::AbsoluteX,       4, true,  instructions::cmp),
    op(0xD9, Mnemonic::Cmp, Mode::AbsoluteY,       4, true,  instructions::cmp),
    op(0xC1, Mnemonic::Cmp, Mode::IndexedIndirect, 6, false, instructions::cmp),
    op(0xD1, Mnemonic::Cmp, Mode::IndirectIndexed, 5, true,  instructions::cmp),
    op(0xE0, Mnemonic::Cpx, Mode::Immediate,       2, false, instructions::cpx),
    op(0xE4, Mnemonic::Cpx, Mode::ZeroPage,        3, false, instructions::cpx),
    op(0xEC, Mnemonic::Cpx, Mode::Absolute,        4, false, instructions::cpx),
    op(0xC0, Mnemonic::Cpy, Mode::Immediate,       2, false, instructions::cpy),
    op(0xC4, Mnemonic::Cpy, Mode::ZeroPage,        3, false, instructions::cpy),
    op(0xCC, Mnemonic::Cpy, Mode::Absolute,        4, false, instructions::cpy),

    // Logical
    op(0x29, Mnemonic::And, Mode::Immediate,       2, false, instructions::and),
    op(0x25, Mnemonic::And, Mode::ZeroPage,        3, false, instructions::and),
    op(0x35, Mnemonic::And, Mode::ZeroPageX,       4, false, instructions::and),
    op(0x2D, Mnemonic::And, Mode::Absolute,        4, false, instructions::and),
    op(0x3D, Mnemonic::And, Mode::AbsoluteX,       4, true,  instructions::and),
    op(0x39, Mnemonic::And, Mode::AbsoluteY,       4, true,  instructions::and),
    op(0x21, Mnemonic::And, Mode::IndexedIndirect, 6, false, instructions::and),
    op(0x31, Mnemonic::And, Mode::IndirectIndexed, 5, true,  instructions::and),
    op(0x49, Mnemonic::Eor, Mode::Immediate,       2, false, instructions::eor),
    op(0x45, Mnemonic::Eor, Mode::ZeroPage,        3, false, instructions::eor),
    op(0x55, Mnemonic::Eor, Mode::ZeroPageX,       4, false, instructions::eor),
    op(0x4D, Mnemonic::Eor, Mode::Absolute,        4, false, instructions::eor),
    op(0x5D, Mnemonic::Eor, Mode::AbsoluteX,       4, true,  instructions::eor),
    op(0x59, Mnemonic::Eor, Mode::AbsoluteY,       4, true,  instructions::eor),
    op(0x41, Mnemonic::Eor, Mode::IndexedIndirect, 6, false, instructions::eor),
    op(0x51, Mnemonic::Eor, Mode::IndirectIndexed, 5, true,  instructions::eor),
    op(0x09, Mnemonic::Ora, Mode::Immediate,       2, false, instructions::ora),
    op(0x05, Mnemonic::Ora, Mode::ZeroPage,        3, false, instructions::ora),
    op(0x15, Mnemonic::Ora, Mode::ZeroPageX,       4, false, instructions::ora),
    op(0x0D, Mnemonic::Ora, Mode::Absolute,        4, false, instructions::ora),
    op(0x1D, Mnemonic::Ora, Mode::AbsoluteX,       4, true,  instructions::ora),
    op(0x19, Mnemonic::Ora, Mode::AbsoluteY,       4, true,  instructions::ora),
    op(0x01, Mnemonic::Ora, Mode::IndexedIndirect, 6, false, instructions::ora),
    op(0x11, Mnemonic::Ora, Mode::IndirectIndexed, 5, true,  instructions::ora),
    op(0x24, Mnemonic::Bit, Mode::ZeroPage,        3, false, instructions::bit),
    op(0x2C, Mnemonic::Bit, Mode::Absolute,        4, false, instructions::bit),

    // Shifts and rotates
    op(0x0A, Mnemonic::Asl, Mode::Accumulator,     2, false, instructions::asl),
    op(0x06, Mnemonic::Asl, Mode::ZeroPage,        5, false, instructions::asl),
    op(0x16, Mnemonic::Asl, Mode::ZeroPageX,       6, false, instructions::asl),
    op(0x0E, Mnemonic::Asl, Mode::Absolute,        6, false, instructions::asl),
    op(0x1E, Mnemonic::Asl, Mode::AbsoluteX,       7, false, instructions::asl),
    op(0x4A, Mnemonic::Lsr, Mode::Accumulator,     2, false, instructions::lsr),
    op(0x46, Mnemonic::Lsr, Mode::ZeroPage,        5, false, instructions::lsr),
    op(0x56, Mnemonic::Lsr, Mode::ZeroPageX,       6, false, instructions::lsr),
    op(0x4E, Mnemonic::Lsr, Mode::Absolute,        6, false, instructions::lsr),
    op(0x5E, Mnemonic::Lsr, Mode::AbsoluteX,       7, false, instructions::lsr),
    op(0x2A, Mnemonic::Rol, Mode::Accumulator,     2, false, instructions::rol),
    op(0x26, Mnemonic::Rol, Mode::ZeroPage,        5, false, instructions::rol),
    op(0x36, Mnemonic::Rol, Mode::ZeroPageX,       6, false, instructions::rol),
    op(0x2E, Mnemonic::Rol, Mode::Absolute,        6, false, instructions::rol),
    op(0x3E, Mnemonic::Rol, Mode::AbsoluteX,       7, false, instructions::rol),
    op(0x6A, Mnemonic::Ror, Mode::Accumulator,     2, false, instructions::ror),
    op(0x66, Mnemonic::Ror, Mode::ZeroPage,        5, false, instructions::ror),
    op(0x76, Mnemonic::Ror, Mode::ZeroPageX,       6, false, instructions::ror),
    op(0x6E, Mnemonic::Ror, Mode::Absolute,        6, false, instructions::ror),
    op(0x7E, Mnemonic::Ror, Mode::AbsoluteX,       7, false, instructions::ror),

    // Increment/decrement
    op(0xE6, Mnemonic::Inc, Mode::ZeroPage,        5, false, instructions::inc),
    op(0xF6, Mnemonic::Inc, Mode::ZeroPageX,       6, false, instructions::inc),
    op(0xEE, Mnemonic::Inc, Mode::Absolute,        6, false, instructions::inc),
    op(0xFE, Mnemonic::Inc, Mode::AbsoluteX,       7, false, instructions::inc),
    op(0xC6, Mnemonic::Dec, Mode::ZeroPage,        5, false, instructions::dec),
    op(0xD6, Mnemonic::Dec, Mode::ZeroPageX,       6, false, instructions::dec),
    op(0xCE, Mnemonic::Dec, Mode::Absolute,        6, false, instructions::dec),
    op(0xDE, Mnemonic::Dec, Mode::AbsoluteX,       7, false, instructions::dec),
    op(0xE8, Mnemonic::Inx, Mode::Implied,         2, false, instructions::inx),
    op(0xC8, Mnemonic::Iny, Mode::Implied,         2, false, instructions::iny),
    op(0xCA, Mnemonic::Dex, Mode::Implied,         2, false, instructions::dex),
    op(0x88, Mnemonic::Dey, Mode::Implied,         2, false, instructions::dey),

    // Jumps and calls
    op(0x4C, Mnemonic::Jmp, Mode::Absolute,        3, false, instructions::jmp),
    op(0x6C, Mnemonic::Jmp, Mode::Indirect,        5, false, instructions::jmp),
    op(0x20, Mnemonic::Jsr, Mode::Absolute,        6, false, instructions::jsr),
    op(0x60, Mnemonic::Rts, Mode::Implied,         6, false, instructions::rts),
    op(0x40, Mnemonic::Rti, Mode::Implied,         6, false, instructions::rti),
    op(0x00, Mnemonic::Brk, Mode::Implied,         7, false, instructions::brk),

    // Branches: base 2, +1 taken, +1 page cross (charged by the handler)
    op(0x90, Mnemonic::Bcc, Mode::Relative,        2, false, instructions::bcc),
    op(0xB0, Mnemonic::Bcs, Mode::Relative,        2, false, instructions::bcs),
    op(0xF0, Mnemonic::Beq, Mode::Relative,        2, false, instructions::beq),
    op(0xD0, Mnemonic::Bne, Mode::Relative,        2, false, instructions::bne),
    op(0x30, Mnemonic::Bmi, Mode::Relative,        2, false, instructions::bmi),
    op(0x10, Mnemonic::Bpl, Mode::Relative,        2, false, instructions::bpl),
    op(0x70, Mnemonic::Bvs, Mode::Relative,        2, false, instructions::bvs),
    op(0x50, Mnemonic::Bvc, Mode::Relative,        2, false, instructions::bvc),

    // Flag instructions
    op(0x18, Mnemonic::Clc, Mode::Implied,         2, false, instructions::clc),
    op(0x38, Mnemonic::Sec, Mode::Implied,         2, false, instructions::sec),
    op(0xD8, Mnemonic::Cld, Mode::Implied,         2, false, instructions::cld),
    op(0xF8, Mnemonic::Sed, Mode::Implied,         2, false, instructions::sed),
    op(0x58, Mnemonic::Cli, Mode::Implied,         2, false, instructions::cli),
    op(0x78, Mnemonic::Sei, Mode::Implied,         2, false, instructions::sei),
    op(0xB8, Mnemonic::Clv, Mode::Implied,         2, false, instructions::clv),

    // Misc
    op(0xEA, Mnemonic::Nop, Mode::Implied,         2, false, instructions::nop),
];

const fn build_table() -> [Option<Instruction>; 256] {
    let mut table = [None; 256];
    let mut i = 0;
    while i < CATALOG.len() {
        let instr = CATALOG[i];
        table[instr.opcode as usize] = Some(instr);
        i += 1;
    }
    table
}

static OPCODES: [Option<Instruction>; 256] = build_table();

/// Look up the catalog row for an opcode byte.
///
/// Returns `None` for the undocumented encodings; the sequencer treats
/// that as a fatal decode failure.
#[must_use]
pub fn lookup(opcode: u8) -> Option<&'static Instruction> {
    OPCODES[opcode as usize].as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_the_151_documented_opcodes() {
        let count = (0..=0xFF_u16).filter(|op| lookup(*op as u8).is_some()).count();
        assert_eq!(count, 151);
    }

    #[test]
    fn descriptors_expose_decode_data_for_disassemblers() {
        let lda = lookup(0xA9).expect("LDA # is documented");
        assert_eq!(lda.mnemonic.name(), "LDA");
        assert_eq!(lda.mode, Mode::Immediate);
        assert_eq!(lda.size, 2);
        assert_eq!(lda.cycles, 2);
        assert!(!lda.page_penalty);

        let sta = lookup(0x9D).expect("STA abs,X is documented");
        assert_eq!(sta.size, 3);
        assert_eq!(sta.cycles, 5);
        assert!(!sta.page_penalty, "stores never charge for page crossing");

        let lda_abs_x = lookup(0xBD).expect("LDA abs,X is documented");
        assert!(lda_abs_x.page_penalty);
    }

    #[test]
    fn undocumented_encodings_are_absent() {
        for opcode in [0x02, 0x3F, 0x80, 0xFF] {
            assert!(lookup(opcode).is_none(), "${opcode:02X} must not decode");
        }
    }

    #[test]
    fn sizes_follow_the_addressing_mode() {
        for instr in (0..=0xFF_u16).filter_map(|op| lookup(op as u8)) {
            assert_eq!(instr.size, 1 + instr.mode.operand_len());
        }
    }
}
