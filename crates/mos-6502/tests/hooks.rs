//! Observer hook behavior: ordering, snapshots, and trace records.

use std::cell::RefCell;
use std::rc::Rc;

use emu_core::{Bus, Ram};
use mos_6502::{Cpu, Mnemonic};

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

#[test]
fn hooks_fire_in_registration_order() {
    let mut cpu = cpu_with_ram();
    load(&mut cpu, 0x0200, &[0xEA]);

    let order = Rc::new(RefCell::new(Vec::new()));
    for tag in ["first", "second", "third"] {
        let order = Rc::clone(&order);
        cpu.hooks_mut()
            .on_before_instruction(move |_ctx| order.borrow_mut().push(tag));
    }

    cpu.step().unwrap();

    assert_eq!(*order.borrow(), ["first", "second", "third"]);
}

#[test]
fn before_and_after_bracket_each_instruction() {
    let mut cpu = cpu_with_ram();
    load(&mut cpu, 0x0200, &[0xA9, 0x42, 0xEA]); // LDA #$42; NOP

    let log = Rc::new(RefCell::new(Vec::new()));
    {
        let log = Rc::clone(&log);
        cpu.hooks_mut()
            .on_before_instruction(move |ctx| log.borrow_mut().push(("before", ctx.registers.pc)));
    }
    {
        let log = Rc::clone(&log);
        cpu.hooks_mut()
            .on_after_instruction(move |ctx| log.borrow_mut().push(("after", ctx.registers.pc)));
    }

    cpu.run_instructions(2).unwrap();

    assert_eq!(
        *log.borrow(),
        [
            ("before", 0x0200),
            ("after", 0x0202),
            ("before", 0x0202),
            ("after", 0x0203),
        ],
        "snapshots show PC before decode and after execution"
    );
}

#[test]
fn reset_notification_sees_the_post_reset_state() {
    let mut cpu = cpu_with_ram();
    load(&mut cpu, 0xFFFC, &[0x00, 0x02]);

    let seen = Rc::new(RefCell::new(None));
    {
        let seen = Rc::clone(&seen);
        cpu.hooks_mut()
            .on_reset(move |ctx| *seen.borrow_mut() = Some(ctx.registers.pc));
    }

    cpu.reset().unwrap();

    assert_eq!(*seen.borrow(), Some(0x0200));
}

#[test]
fn trace_records_carry_the_decoded_instruction() {
    let mut cpu = cpu_with_ram();
    load(&mut cpu, 0x0200, &[0xBD, 0x34, 0x12]); // LDA $1234,X
    cpu.regs.x = 0x05;

    let events = Rc::new(RefCell::new(Vec::new()));
    {
        let events = Rc::clone(&events);
        cpu.hooks_mut().on_trace(move |event| {
            events
                .borrow_mut()
                .push((event.address, event.bytes, event.instruction.mnemonic, event.registers));
        });
    }

    cpu.step().unwrap();

    let events = events.borrow();
    let (address, bytes, mnemonic, registers) = events[0];
    assert_eq!(address, 0x0200);
    assert_eq!(bytes, [0xBD, 0x34, 0x12], "opcode plus raw operand bytes");
    assert_eq!(mnemonic, Mnemonic::Lda);
    assert_eq!(registers.pc, 0x0200, "registers as of the fetch");
    assert_eq!(registers.x, 0x05);
}

#[test]
fn execution_is_identical_with_no_hooks_attached() {
    let program = [0xA9, 0x37, 0x48, 0xA9, 0x00, 0x68]; // LDA; PHA; LDA; PLA

    let mut silent = cpu_with_ram();
    load(&mut silent, 0x0200, &program);
    silent.run_instructions(4).unwrap();

    let mut observed = cpu_with_ram();
    load(&mut observed, 0x0200, &program);
    observed.hooks_mut().on_before_instruction(|_ctx| {});
    observed.hooks_mut().on_trace(|_event| {});
    observed.run_instructions(4).unwrap();

    assert_eq!(silent.regs, observed.regs);
    assert_eq!(silent.total_cycles(), observed.total_cycles());
}
