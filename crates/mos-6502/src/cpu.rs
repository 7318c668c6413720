//! Cycle sequencer and interrupt controller.
//!
//! The sequencer has two states: idle (ready to decode) and counting down
//! the remainder of an instruction. A tick in the countdown decrements and
//! returns; a tick at an instruction boundary services pending interrupts,
//! decodes through the bus, resolves the addressing mode, runs the
//! handler, and charges the remaining `base + extra - 1` cycles to the
//! countdown.

use emu_core::{Bus, Tickable, Ticks};

use crate::addressing;
use crate::error::CpuError;
use crate::flags;
use crate::flags::Status;
use crate::hooks::{HookContext, Hooks, TraceEvent};
use crate::opcode;
use crate::registers::Registers;
use crate::{IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};

/// The MOS 6502 CPU: register file plus sequencer, driving the bus it owns.
///
/// The CPU is a pure state machine over discrete ticks; pacing against
/// wall-clock time, if wanted, belongs to whatever loop calls
/// [`tick`](Cpu::tick). Any error aborts the current run and is surfaced
/// unchanged — there is no retry and no skipping.
pub struct Cpu {
    /// Register file.
    pub regs: Registers,
    pub(crate) bus: Bus,
    /// Cycles left in the current instruction; 0 means ready to decode.
    cycles_remaining: u8,
    total_cycles: Ticks,
    /// Latched non-maskable interrupt, serviced at the next boundary.
    nmi_pending: bool,
    hooks: Hooks,
}

impl Cpu {
    /// Create a CPU over a configured bus. Call [`reset`](Cpu::reset)
    /// before executing.
    #[must_use]
    pub fn new(bus: Bus) -> Self {
        Self {
            regs: Registers::new(),
            bus,
            cycles_remaining: 0,
            total_cycles: Ticks::ZERO,
            nmi_pending: false,
            hooks: Hooks::default(),
        }
    }

    /// The bus this CPU drives.
    #[must_use]
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Mutable bus access, for setup and for external consumers
    /// (debugger memory views). Not intended for use while mid-instruction.
    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    /// Total ticks consumed since construction or the last reset.
    #[must_use]
    pub fn total_cycles(&self) -> Ticks {
        self.total_cycles
    }

    /// True when the next tick will decode a new instruction.
    #[must_use]
    pub fn at_instruction_boundary(&self) -> bool {
        self.cycles_remaining == 0
    }

    /// Observer hook registration surface.
    pub fn hooks_mut(&mut self) -> &mut Hooks {
        &mut self.hooks
    }

    /// Latch a non-maskable interrupt. Serviced at the next instruction
    /// boundary regardless of the interrupt-disable flag.
    pub fn nmi(&mut self) {
        self.nmi_pending = true;
    }

    fn context(&self) -> HookContext {
        HookContext {
            registers: self.regs,
            cycles: self.total_cycles,
        }
    }

    /// Reset sequence.
    ///
    /// Loads PC from the reset vector, clears A/X/Y, sets S to 0 and the
    /// status to interrupt-disable only, then pushes PC and status to the
    /// stack — the documented, if unusual, startup convention of this
    /// design, which leaves S at `$FD`. The stack page must be mapped.
    pub fn reset(&mut self) -> Result<(), CpuError> {
        self.regs.pc = self.bus.read_word(RESET_VECTOR)?;
        self.regs.a = 0;
        self.regs.x = 0;
        self.regs.y = 0;
        self.regs.s = 0;
        self.regs.p = Status::from_byte(flags::I);
        let pc = self.regs.pc;
        self.push_word(pc)?;
        let status = self.regs.p.to_byte();
        self.push(status)?;

        self.cycles_remaining = 0;
        self.total_cycles = Ticks::ZERO;
        self.nmi_pending = false;

        log::debug!("reset: PC=${:04X}", self.regs.pc);
        let ctx = self.context();
        self.hooks.fire_reset(&ctx);
        Ok(())
    }

    /// Advance the CPU by one clock tick.
    ///
    /// Mid-instruction this only counts down. At a boundary it fires the
    /// before-instruction notification, services at most one pending
    /// interrupt batch, then decodes and executes the instruction at PC.
    /// Decode failure on an unrecognized opcode is fatal.
    pub fn tick(&mut self) -> Result<(), CpuError> {
        self.total_cycles += Ticks::ONE;
        if self.cycles_remaining > 0 {
            self.cycles_remaining -= 1;
            return Ok(());
        }

        let ctx = self.context();
        self.hooks.fire_before_instruction(&ctx);

        self.service_interrupts()?;

        let consumed = self.execute_next()?;
        // This tick is the first of the instruction.
        self.cycles_remaining = consumed - 1;

        let ctx = self.context();
        self.hooks.fire_after_instruction(&ctx);
        Ok(())
    }

    /// Execute one complete instruction, finishing any in-flight countdown
    /// first.
    pub fn step(&mut self) -> Result<(), CpuError> {
        while self.cycles_remaining > 0 {
            self.tick()?;
        }
        self.tick()?;
        while self.cycles_remaining > 0 {
            self.tick()?;
        }
        Ok(())
    }

    /// Execute exactly `count` instructions.
    pub fn run_instructions(&mut self, count: u64) -> Result<(), CpuError> {
        for _ in 0..count {
            self.step()?;
        }
        Ok(())
    }

    /// Execute indefinitely.
    ///
    /// Returns only when an error aborts the run. Cancellation is
    /// coarse-grained: a caller that needs to pause drives
    /// [`step`](Cpu::step) or [`tick`](Cpu::tick) itself.
    pub fn run(&mut self) -> Result<(), CpuError> {
        loop {
            self.step()?;
        }
    }

    /// Service pending interrupts at an instruction boundary.
    ///
    /// NMI first, unconditionally; then at most one IRQ batch, and only
    /// while the interrupt-disable flag is clear. Requests raised
    /// mid-instruction wait here until the next boundary.
    fn service_interrupts(&mut self) -> Result<(), CpuError> {
        if self.nmi_pending {
            self.nmi_pending = false;
            log::debug!("nmi: entering handler, PC was ${:04X}", self.regs.pc);
            self.enter_interrupt(NMI_VECTOR)?;
        }
        if !self.regs.p.is_set(flags::I) && self.bus.irq_line().pending() > 0 {
            let batch = self.bus.irq_line().drain();
            log::debug!(
                "irq: servicing batch of {batch}, PC was ${:04X}",
                self.regs.pc
            );
            self.enter_interrupt(IRQ_VECTOR)?;
        }
        Ok(())
    }

    /// Push PC and status (break clear), mask interrupts, enter the vector.
    fn enter_interrupt(&mut self, vector: u16) -> Result<(), CpuError> {
        let pc = self.regs.pc;
        self.push_word(pc)?;
        let status = self.regs.p.with_break_clear();
        self.push(status)?;
        self.regs.p.set(flags::I);
        self.regs.pc = self.bus.read_word(vector)?;
        Ok(())
    }

    /// Decode and execute the instruction at PC; returns total cycles
    /// consumed (base + page-cross + branch penalties).
    fn execute_next(&mut self) -> Result<u8, CpuError> {
        let pc = self.regs.pc;
        let regs_before = self.regs;
        let opcode = self.bus.read_byte(pc)?;
        let instr =
            opcode::lookup(opcode).ok_or(CpuError::UnknownOpcode { opcode, pc })?;
        self.regs.pc = self.regs.pc.wrapping_add(1);

        let resolved =
            addressing::resolve(instr.mode, instr.page_penalty, &mut self.regs, &mut self.bus)?;

        log::trace!("${pc:04X}: {} ({opcode:02X})", instr.mnemonic.name());
        let event = TraceEvent {
            address: pc,
            bytes: [opcode, resolved.raw[0], resolved.raw[1]],
            instruction: instr,
            registers: regs_before,
            cycles: self.total_cycles,
        };
        self.hooks.fire_trace(&event);

        let branch_cycles = (instr.handler)(self, resolved.operand)?;
        Ok(instr.cycles + resolved.extra_cycles + branch_cycles)
    }

    /// Push one byte through the stack page.
    pub(crate) fn push(&mut self, value: u8) -> Result<(), CpuError> {
        let addr = self.regs.push_addr();
        Ok(self.bus.write_byte(value, addr)?)
    }

    /// Pull one byte from the stack page.
    pub(crate) fn pull(&mut self) -> Result<u8, CpuError> {
        let addr = self.regs.pull_addr();
        Ok(self.bus.read_byte(addr)?)
    }

    /// Push a word, high byte first, so it pulls back low-then-high.
    pub(crate) fn push_word(&mut self, value: u16) -> Result<(), CpuError> {
        self.push((value >> 8) as u8)?;
        self.push(value as u8)
    }

    /// Pull a word pushed by [`push_word`](Cpu::push_word).
    pub(crate) fn pull_word(&mut self) -> Result<u16, CpuError> {
        let low = self.pull()?;
        let high = self.pull()?;
        Ok(u16::from_le_bytes([low, high]))
    }
}

impl Tickable for Cpu {
    type Error = CpuError;

    fn tick(&mut self) -> Result<(), CpuError> {
        Cpu::tick(self)
    }
}
