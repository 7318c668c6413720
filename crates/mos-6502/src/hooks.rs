//! Observer hooks for external debuggers.
//!
//! A short list of optional callback registrations, invoked synchronously
//! and in registration order. The core behaves identically whether or not
//! any hook is attached. Callbacks receive value snapshots — never a borrow
//! of the CPU — so observing can never perturb execution.

use emu_core::Ticks;

use crate::opcode::Instruction;
use crate::registers::Registers;

/// State snapshot passed to reset and instruction-boundary notifications.
#[derive(Debug, Clone, Copy)]
pub struct HookContext {
    /// Register file at the time of the event.
    pub registers: Registers,
    /// Clock count at the time of the event.
    pub cycles: Ticks,
}

/// Structured record of one decoded instruction.
///
/// Emitted after decode and addressing resolution, before the semantic
/// handler runs. Consumers (debugger, tracing disassembler) render text
/// from this; the core hands out data only.
#[derive(Debug, Clone, Copy)]
pub struct TraceEvent {
    /// Address the opcode byte was fetched from.
    pub address: u16,
    /// Raw instruction bytes; only the first `instruction.size` are valid.
    pub bytes: [u8; 3],
    /// Catalog row for the decoded opcode.
    pub instruction: &'static Instruction,
    /// Registers as they stood before this instruction.
    pub registers: Registers,
    /// Clock count at decode.
    pub cycles: Ticks,
}

type Callback = Box<dyn FnMut(&HookContext)>;
type TraceCallback = Box<dyn FnMut(&TraceEvent)>;

/// Registered observers. Obtained through [`crate::Cpu::hooks_mut`].
#[derive(Default)]
pub struct Hooks {
    reset: Vec<Callback>,
    before_instruction: Vec<Callback>,
    after_instruction: Vec<Callback>,
    trace: Vec<TraceCallback>,
}

impl Hooks {
    /// Register a callback for the reset notification.
    pub fn on_reset(&mut self, callback: impl FnMut(&HookContext) + 'static) {
        self.reset.push(Box::new(callback));
    }

    /// Register a callback fired at each instruction boundary, before
    /// interrupt service and decode.
    pub fn on_before_instruction(&mut self, callback: impl FnMut(&HookContext) + 'static) {
        self.before_instruction.push(Box::new(callback));
    }

    /// Register a callback fired after an instruction completes execution.
    pub fn on_after_instruction(&mut self, callback: impl FnMut(&HookContext) + 'static) {
        self.after_instruction.push(Box::new(callback));
    }

    /// Register a structured trace callback.
    pub fn on_trace(&mut self, callback: impl FnMut(&TraceEvent) + 'static) {
        self.trace.push(Box::new(callback));
    }

    pub(crate) fn fire_reset(&mut self, ctx: &HookContext) {
        for callback in &mut self.reset {
            callback(ctx);
        }
    }

    pub(crate) fn fire_before_instruction(&mut self, ctx: &HookContext) {
        for callback in &mut self.before_instruction {
            callback(ctx);
        }
    }

    pub(crate) fn fire_after_instruction(&mut self, ctx: &HookContext) {
        for callback in &mut self.after_instruction {
            callback(ctx);
        }
    }

    pub(crate) fn fire_trace(&mut self, event: &TraceEvent) {
        for callback in &mut self.trace {
            callback(event);
        }
    }
}
