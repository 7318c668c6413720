//! Instruction semantics.
//!
//! One handler per mnemonic. Each mutates registers and memory through the
//! resolved operand and returns any cycles beyond the catalog's base count
//! — taken branches are the only source of those. Instructions that do not
//! affect a flag leave it bit-for-bit unchanged.

use crate::IRQ_VECTOR;
use crate::addressing::Operand;
use crate::cpu::Cpu;
use crate::error::CpuError;
use crate::flags;
use crate::flags::Status;

pub(crate) type Handler = fn(&mut Cpu, Operand) -> Result<u8, CpuError>;

// =========================================================================
// Load/store
// =========================================================================

pub(crate) fn lda(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let value = operand.read(&cpu.regs, &mut cpu.bus)?;
    cpu.regs.a = value;
    cpu.regs.p.update_nz(value);
    Ok(0)
}

pub(crate) fn ldx(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let value = operand.read(&cpu.regs, &mut cpu.bus)?;
    cpu.regs.x = value;
    cpu.regs.p.update_nz(value);
    Ok(0)
}

pub(crate) fn ldy(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let value = operand.read(&cpu.regs, &mut cpu.bus)?;
    cpu.regs.y = value;
    cpu.regs.p.update_nz(value);
    Ok(0)
}

pub(crate) fn sta(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    operand.write(cpu.regs.a, &mut cpu.regs, &mut cpu.bus)?;
    Ok(0)
}

pub(crate) fn stx(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    operand.write(cpu.regs.x, &mut cpu.regs, &mut cpu.bus)?;
    Ok(0)
}

pub(crate) fn sty(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    operand.write(cpu.regs.y, &mut cpu.regs, &mut cpu.bus)?;
    Ok(0)
}

// =========================================================================
// Transfers
// =========================================================================

pub(crate) fn tax(cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    cpu.regs.x = cpu.regs.a;
    cpu.regs.p.update_nz(cpu.regs.x);
    Ok(0)
}

pub(crate) fn tay(cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    cpu.regs.y = cpu.regs.a;
    cpu.regs.p.update_nz(cpu.regs.y);
    Ok(0)
}

pub(crate) fn txa(cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    cpu.regs.a = cpu.regs.x;
    cpu.regs.p.update_nz(cpu.regs.a);
    Ok(0)
}

pub(crate) fn tya(cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    cpu.regs.a = cpu.regs.y;
    cpu.regs.p.update_nz(cpu.regs.a);
    Ok(0)
}

pub(crate) fn tsx(cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    cpu.regs.x = cpu.regs.s;
    cpu.regs.p.update_nz(cpu.regs.x);
    Ok(0)
}

/// TXS is the one transfer that sets no flags.
pub(crate) fn txs(cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    cpu.regs.s = cpu.regs.x;
    Ok(0)
}

// =========================================================================
// Stack
// =========================================================================

pub(crate) fn pha(cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    let value = cpu.regs.a;
    cpu.push(value)?;
    Ok(0)
}

pub(crate) fn php(cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    let value = cpu.regs.p.to_byte();
    cpu.push(value)?;
    Ok(0)
}

pub(crate) fn pla(cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    let value = cpu.pull()?;
    cpu.regs.a = value;
    cpu.regs.p.update_nz(value);
    Ok(0)
}

pub(crate) fn plp(cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    let value = cpu.pull()?;
    cpu.regs.p = Status::from_byte(value);
    Ok(0)
}

// =========================================================================
// Arithmetic
// =========================================================================

/// Shared ADC/SBC core: 9-bit add of A + value + carry.
///
/// Overflow uses the classic two's-complement test on bit 7 of the three
/// participants.
fn add_with_carry(cpu: &mut Cpu, value: u8) {
    let a = cpu.regs.a;
    let carry_in = u16::from(cpu.regs.p.is_set(flags::C));
    let sum = u16::from(a) + u16::from(value) + carry_in;
    let result = sum as u8;

    cpu.regs.p.set_if(flags::C, sum > 0xFF);
    cpu.regs
        .p
        .set_if(flags::V, (a ^ result) & (value ^ result) & 0x80 != 0);
    cpu.regs.p.update_nz(result);
    cpu.regs.a = result;
}

pub(crate) fn adc(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let value = operand.read(&cpu.regs, &mut cpu.bus)?;
    add_with_carry(cpu, value);
    Ok(0)
}

/// SBC is ADC of the operand's one's complement; carry and overflow fall
/// out of the same formulas.
pub(crate) fn sbc(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let value = operand.read(&cpu.regs, &mut cpu.bus)?;
    add_with_carry(cpu, !value);
    Ok(0)
}

/// Compare core: register - operand without storing the difference.
fn compare(cpu: &mut Cpu, register: u8, operand: Operand) -> Result<u8, CpuError> {
    let value = operand.read(&cpu.regs, &mut cpu.bus)?;
    let diff = register.wrapping_sub(value);
    cpu.regs.p.set_if(flags::C, register >= value);
    cpu.regs.p.update_nz(diff);
    Ok(0)
}

pub(crate) fn cmp(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let register = cpu.regs.a;
    compare(cpu, register, operand)
}

pub(crate) fn cpx(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let register = cpu.regs.x;
    compare(cpu, register, operand)
}

pub(crate) fn cpy(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let register = cpu.regs.y;
    compare(cpu, register, operand)
}

// =========================================================================
// Logical
// =========================================================================

pub(crate) fn and(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let value = operand.read(&cpu.regs, &mut cpu.bus)?;
    cpu.regs.a &= value;
    cpu.regs.p.update_nz(cpu.regs.a);
    Ok(0)
}

pub(crate) fn eor(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let value = operand.read(&cpu.regs, &mut cpu.bus)?;
    cpu.regs.a ^= value;
    cpu.regs.p.update_nz(cpu.regs.a);
    Ok(0)
}

pub(crate) fn ora(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let value = operand.read(&cpu.regs, &mut cpu.bus)?;
    cpu.regs.a |= value;
    cpu.regs.p.update_nz(cpu.regs.a);
    Ok(0)
}

/// BIT: Z from A & M; N and V copied from bits 7 and 6 of the operand.
pub(crate) fn bit(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let value = operand.read(&cpu.regs, &mut cpu.bus)?;
    cpu.regs.p.set_if(flags::Z, cpu.regs.a & value == 0);
    cpu.regs.p.set_if(flags::N, value & 0x80 != 0);
    cpu.regs.p.set_if(flags::V, value & 0x40 != 0);
    Ok(0)
}

// =========================================================================
// Shifts and rotates
// =========================================================================
//
// All four operate through the operand accessor, so the same handler covers
// the accumulator and memory forms. Carry receives the shifted-out bit;
// ROL/ROR also consume the previous carry.

pub(crate) fn asl(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let value = operand.read(&cpu.regs, &mut cpu.bus)?;
    let result = value << 1;
    cpu.regs.p.set_if(flags::C, value & 0x80 != 0);
    cpu.regs.p.update_nz(result);
    operand.write(result, &mut cpu.regs, &mut cpu.bus)?;
    Ok(0)
}

pub(crate) fn lsr(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let value = operand.read(&cpu.regs, &mut cpu.bus)?;
    let result = value >> 1;
    cpu.regs.p.set_if(flags::C, value & 0x01 != 0);
    cpu.regs.p.update_nz(result);
    operand.write(result, &mut cpu.regs, &mut cpu.bus)?;
    Ok(0)
}

pub(crate) fn rol(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let value = operand.read(&cpu.regs, &mut cpu.bus)?;
    let carry_in = u8::from(cpu.regs.p.is_set(flags::C));
    let result = (value << 1) | carry_in;
    cpu.regs.p.set_if(flags::C, value & 0x80 != 0);
    cpu.regs.p.update_nz(result);
    operand.write(result, &mut cpu.regs, &mut cpu.bus)?;
    Ok(0)
}

pub(crate) fn ror(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let value = operand.read(&cpu.regs, &mut cpu.bus)?;
    let carry_in = if cpu.regs.p.is_set(flags::C) { 0x80 } else { 0 };
    let result = (value >> 1) | carry_in;
    cpu.regs.p.set_if(flags::C, value & 0x01 != 0);
    cpu.regs.p.update_nz(result);
    operand.write(result, &mut cpu.regs, &mut cpu.bus)?;
    Ok(0)
}

// =========================================================================
// Increment/decrement
// =========================================================================

pub(crate) fn inc(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let result = operand.read(&cpu.regs, &mut cpu.bus)?.wrapping_add(1);
    cpu.regs.p.update_nz(result);
    operand.write(result, &mut cpu.regs, &mut cpu.bus)?;
    Ok(0)
}

pub(crate) fn dec(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let result = operand.read(&cpu.regs, &mut cpu.bus)?.wrapping_sub(1);
    cpu.regs.p.update_nz(result);
    operand.write(result, &mut cpu.regs, &mut cpu.bus)?;
    Ok(0)
}

pub(crate) fn inx(cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    cpu.regs.x = cpu.regs.x.wrapping_add(1);
    cpu.regs.p.update_nz(cpu.regs.x);
    Ok(0)
}

pub(crate) fn iny(cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    cpu.regs.y = cpu.regs.y.wrapping_add(1);
    cpu.regs.p.update_nz(cpu.regs.y);
    Ok(0)
}

pub(crate) fn dex(cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    cpu.regs.x = cpu.regs.x.wrapping_sub(1);
    cpu.regs.p.update_nz(cpu.regs.x);
    Ok(0)
}

pub(crate) fn dey(cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    cpu.regs.y = cpu.regs.y.wrapping_sub(1);
    cpu.regs.p.update_nz(cpu.regs.y);
    Ok(0)
}

// =========================================================================
// Jumps and calls
// =========================================================================

pub(crate) fn jmp(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    cpu.regs.pc = operand.address()?;
    Ok(0)
}

/// JSR pushes the return address minus one; RTS adds it back.
pub(crate) fn jsr(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let target = operand.address()?;
    let ret = cpu.regs.pc.wrapping_sub(1);
    cpu.push_word(ret)?;
    cpu.regs.pc = target;
    Ok(0)
}

pub(crate) fn rts(cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    cpu.regs.pc = cpu.pull_word()?.wrapping_add(1);
    Ok(0)
}

/// RTI pulls status (all eight bits round-trip), then PC. No +1.
pub(crate) fn rti(cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    let status = cpu.pull()?;
    cpu.regs.p = Status::from_byte(status);
    cpu.regs.pc = cpu.pull_word()?;
    Ok(0)
}

/// BRK pushes the address two past the opcode (skipping the padding byte),
/// then status with the break flag set, and enters the IRQ vector.
pub(crate) fn brk(cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    let ret = cpu.regs.pc.wrapping_add(1);
    cpu.push_word(ret)?;
    let status = cpu.regs.p.with_break_set();
    cpu.push(status)?;
    cpu.regs.p.set(flags::I);
    cpu.regs.pc = cpu.bus.read_word(IRQ_VECTOR)?;
    Ok(0)
}

// =========================================================================
// Branches
// =========================================================================

/// Shared branch core: +1 cycle when taken, +1 more when the target page
/// differs from the page of the following instruction.
fn branch(cpu: &mut Cpu, operand: Operand, taken: bool) -> Result<u8, CpuError> {
    let offset = operand.offset()?;
    if !taken {
        return Ok(0);
    }
    let target = cpu.regs.pc.wrapping_add(offset as u16);
    let crossed = (target & 0xFF00) != (cpu.regs.pc & 0xFF00);
    cpu.regs.pc = target;
    Ok(1 + u8::from(crossed))
}

pub(crate) fn bcc(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let taken = !cpu.regs.p.is_set(flags::C);
    branch(cpu, operand, taken)
}

pub(crate) fn bcs(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let taken = cpu.regs.p.is_set(flags::C);
    branch(cpu, operand, taken)
}

pub(crate) fn beq(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let taken = cpu.regs.p.is_set(flags::Z);
    branch(cpu, operand, taken)
}

pub(crate) fn bne(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let taken = !cpu.regs.p.is_set(flags::Z);
    branch(cpu, operand, taken)
}

pub(crate) fn bmi(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let taken = cpu.regs.p.is_set(flags::N);
    branch(cpu, operand, taken)
}

pub(crate) fn bpl(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let taken = !cpu.regs.p.is_set(flags::N);
    branch(cpu, operand, taken)
}

pub(crate) fn bvs(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let taken = cpu.regs.p.is_set(flags::V);
    branch(cpu, operand, taken)
}

pub(crate) fn bvc(cpu: &mut Cpu, operand: Operand) -> Result<u8, CpuError> {
    let taken = !cpu.regs.p.is_set(flags::V);
    branch(cpu, operand, taken)
}

// =========================================================================
// Flag instructions
// =========================================================================
//
// Each touches exactly the named flag; everything else is untouched.

pub(crate) fn clc(cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    cpu.regs.p.clear(flags::C);
    Ok(0)
}

pub(crate) fn sec(cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    cpu.regs.p.set(flags::C);
    Ok(0)
}

pub(crate) fn cld(cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    cpu.regs.p.clear(flags::D);
    Ok(0)
}

pub(crate) fn sed(cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    cpu.regs.p.set(flags::D);
    Ok(0)
}

pub(crate) fn cli(cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    cpu.regs.p.clear(flags::I);
    Ok(0)
}

pub(crate) fn sei(cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    cpu.regs.p.set(flags::I);
    Ok(0)
}

pub(crate) fn clv(cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    cpu.regs.p.clear(flags::V);
    Ok(0)
}

// =========================================================================
// Misc
// =========================================================================

pub(crate) fn nop(_cpu: &mut Cpu, _operand: Operand) -> Result<u8, CpuError> {
    Ok(0)
}
