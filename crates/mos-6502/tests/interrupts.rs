//! Interrupt servicing, masking, and the reset sequence.

use emu_core::{Bus, Ram};
use mos_6502::{Cpu, Status, flags};

fn cpu_with_ram() -> Cpu {
    let mut bus = Bus::new();
    bus.map(Box::new(Ram::new(0x1_0000).unwrap()), 0x0000, 0x1_0000)
        .unwrap();
    let mut cpu = Cpu::new(bus);
    cpu.regs.pc = 0x0200;
    cpu.regs.s = 0xFD;
    cpu
}

fn load(cpu: &mut Cpu, base: u16, bytes: &[u8]) {
    for (i, &byte) in bytes.iter().enumerate() {
        cpu.bus_mut().write_byte(byte, base + i as u16).unwrap();
    }
}

fn peek(cpu: &mut Cpu, addr: u16) -> u8 {
    cpu.bus_mut().read_byte(addr).unwrap()
}

#[test]
fn irq_stays_pending_while_interrupts_are_disabled() {
    let mut cpu = cpu_with_ram();
    load(&mut cpu, 0xFFFE, &[0x00, 0x03]); // IRQ vector -> $0300
    load(&mut cpu, 0x0200, &[0xEA, 0xEA, 0x58, 0xEA]); // NOP; NOP; CLI; NOP
    load(&mut cpu, 0x0300, &[0xEA]); // handler: NOP
    cpu.regs.p = Status::from_byte(flags::I);

    let irq = cpu.bus().irq_line();
    irq.raise();

    cpu.run_instructions(2).unwrap();
    assert_eq!(cpu.regs.pc, 0x0202, "masked: both NOPs ran normally");
    assert_eq!(irq.pending(), 1, "request is still queued");

    cpu.step().unwrap(); // CLI
    cpu.step().unwrap(); // next boundary services the IRQ, then runs one
    // instruction of the handler

    assert_eq!(irq.pending(), 0, "batch drained");
    assert!(cpu.regs.p.is_set(flags::I), "service masks further IRQs");
    // Return address on the stack is the pre-service PC ($0203).
    assert_eq!(peek(&mut cpu, 0x01FD), 0x02);
    assert_eq!(peek(&mut cpu, 0x01FC), 0x03);
    let pushed_p = peek(&mut cpu, 0x01FB);
    assert_eq!(pushed_p & flags::B, 0, "IRQ pushes status with break clear");
}

#[test]
fn irq_raised_mid_instruction_waits_for_the_boundary() {
    let mut cpu = cpu_with_ram();
    load(&mut cpu, 0xFFFE, &[0x00, 0x03]);
    load(&mut cpu, 0x0200, &[0xE6, 0x10, 0xEA]); // INC $10 (5 cycles); NOP
    load(&mut cpu, 0x0300, &[0xEA]); // handler: NOP
    cpu.regs.p = Status::from_byte(0); // interrupts enabled

    cpu.tick().unwrap(); // INC decoded and executed, counting down
    cpu.bus().irq_line().raise();

    for _ in 0..4 {
        cpu.tick().unwrap();
        assert_ne!(cpu.regs.pc, 0x0300, "never serviced mid-instruction");
    }

    cpu.tick().unwrap(); // boundary: service, then decode handler NOP
    assert_eq!(cpu.regs.pc, 0x0301, "handler's first instruction ran");
}

#[test]
fn one_batch_of_requests_is_serviced_per_boundary() {
    let mut cpu = cpu_with_ram();
    load(&mut cpu, 0xFFFE, &[0x00, 0x03]);
    load(&mut cpu, 0x0200, &[0xEA]);
    load(&mut cpu, 0x0300, &[0xEA]);
    cpu.regs.p = Status::from_byte(0);

    let irq = cpu.bus().irq_line();
    irq.raise();
    irq.raise();
    irq.raise();

    cpu.step().unwrap();

    assert_eq!(irq.pending(), 0, "the whole batch drains at once");
    assert_eq!(cpu.regs.pc, 0x0301, "exactly one service sequence ran");
}

#[test]
fn nmi_is_serviced_even_with_interrupts_disabled() {
    let mut cpu = cpu_with_ram();
    load(&mut cpu, 0xFFFA, &[0x00, 0x04]); // NMI vector -> $0400
    load(&mut cpu, 0x0200, &[0xEA]);
    load(&mut cpu, 0x0400, &[0xEA]);
    cpu.regs.p = Status::from_byte(flags::I);

    cpu.nmi();
    cpu.step().unwrap();

    assert_eq!(cpu.regs.pc, 0x0401, "NMI ignores the interrupt-disable flag");
}

#[test]
fn nmi_wins_over_a_pending_irq() {
    let mut cpu = cpu_with_ram();
    load(&mut cpu, 0xFFFA, &[0x00, 0x04]);
    load(&mut cpu, 0xFFFE, &[0x00, 0x03]);
    load(&mut cpu, 0x0200, &[0xEA]);
    load(&mut cpu, 0x0400, &[0xEA]);
    cpu.regs.p = Status::from_byte(0);

    cpu.bus().irq_line().raise();
    cpu.nmi();
    cpu.step().unwrap();

    assert_eq!(cpu.regs.pc, 0x0401, "NMI handler entered");
    assert_eq!(
        cpu.bus().irq_line().pending(),
        1,
        "IRQ still queued: NMI service set the disable flag first"
    );
}

#[test]
fn reset_follows_the_documented_startup_convention() {
    let mut cpu = cpu_with_ram();
    load(&mut cpu, 0xFFFC, &[0x00, 0xF0]); // reset vector -> $F000
    cpu.regs.a = 0x11;
    cpu.regs.x = 0x22;
    cpu.regs.y = 0x33;

    cpu.reset().unwrap();

    assert_eq!(cpu.regs.pc, 0xF000);
    assert_eq!((cpu.regs.a, cpu.regs.x, cpu.regs.y), (0, 0, 0));
    assert_eq!(cpu.regs.p.to_byte(), flags::I, "interrupt-disable only");
    assert_eq!(cpu.regs.s, 0xFD, "S = 0, then three pushes");
    assert_eq!(cpu.total_cycles().get(), 0);

    // The pushes: PCH at $0100 (S wrapped under the page), PCL at $01FF,
    // status at $01FE.
    assert_eq!(peek(&mut cpu, 0x0100), 0xF0);
    assert_eq!(peek(&mut cpu, 0x01FF), 0x00);
    assert_eq!(peek(&mut cpu, 0x01FE), flags::I);
}

#[test]
fn run_surfaces_the_first_error_unchanged() {
    let mut cpu = cpu_with_ram();
    // NOPs, then an undocumented byte: the indefinite run aborts there.
    load(&mut cpu, 0x0200, &[0xEA, 0xEA, 0x02]);

    let err = cpu.run().unwrap_err();

    assert_eq!(
        err,
        mos_6502::CpuError::UnknownOpcode {
            opcode: 0x02,
            pc: 0x0202
        }
    );
    assert_eq!(cpu.regs.pc, 0x0202, "PC parked at the failing opcode");
}

#[test]
fn reset_fails_without_a_mapped_stack() {
    // ROM with vectors only, high memory; no RAM for the stack page.
    let mut image = vec![0xEA; 0x1000];
    image[0x0FFC] = 0x00; // $FFFC
    image[0x0FFD] = 0xF0;
    let rom = emu_core::Rom::new(image).unwrap();

    let mut bus = Bus::new();
    bus.map(Box::new(rom), 0xF000, 0x1000).unwrap();
    let mut cpu = Cpu::new(bus);

    let err = cpu.reset().unwrap_err();
    assert_eq!(
        err,
        mos_6502::CpuError::Bus(emu_core::BusError::Unmapped(0x0100))
    );
}
