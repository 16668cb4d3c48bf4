//! Memory-mapped console port semantics: FIFO input, blocking reads, and
//! the append-only output log.

use risc16_core::{
    addi, hlt, lw, sw, Fault, Machine, Reg, RunState, StepOutcome, INPUT_QUEUE_CAPACITY,
};

use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

fn imm(encoded: Result<u16, Fault>) -> u16 {
    encoded.expect("program immediates are in range")
}

#[test]
fn console_reads_drain_inputs_in_fifo_order() {
    let program = [
        imm(lw(Reg::R1, Reg::R0, 0)),
        imm(lw(Reg::R2, Reg::R0, 0)),
        imm(lw(Reg::R3, Reg::R0, 0)),
        hlt(),
    ];
    let mut machine = Machine::with_program(&program);
    for value in [5, 6, 7] {
        machine.push_input(value).expect("queue has capacity");
    }

    let outcome = machine.run_to_halt(16).expect("program runs clean");
    assert_eq!(outcome.outcome, StepOutcome::Halted);
    assert_eq!(machine.registers()[1], 5);
    assert_eq!(machine.registers()[2], 6);
    assert_eq!(machine.registers()[3], 7);
    assert!(machine.pending_inputs().is_empty());
}

#[test]
fn fourth_read_with_an_empty_queue_blocks_without_side_effects() {
    let program = [
        imm(lw(Reg::R1, Reg::R0, 0)),
        imm(lw(Reg::R2, Reg::R0, 0)),
        imm(lw(Reg::R3, Reg::R0, 0)),
        imm(lw(Reg::R4, Reg::R0, 0)),
        hlt(),
    ];
    let mut machine = Machine::with_program(&program);
    for value in [5, 6, 7] {
        machine.push_input(value).expect("queue has capacity");
    }

    let outcome = machine.run_to_halt(16).expect("no faults while blocking");
    assert_eq!(outcome.outcome, StepOutcome::BlockedOnInput);
    assert_eq!(outcome.steps, 3);
    assert_eq!(machine.pc(), 6, "blocked read must not advance pc");
    assert_eq!(machine.registers()[4], 0, "blocked read must not write");
    assert_eq!(machine.run_state(), RunState::BlockedOnInput);

    // the same instruction retries and completes once input arrives
    machine.push_input(9).expect("queue has capacity");
    let outcome = machine.run_to_halt(16).expect("program runs clean");
    assert_eq!(outcome.outcome, StepOutcome::Halted);
    assert_eq!(machine.registers()[4], 9);
}

#[test]
fn console_writes_append_without_touching_memory() {
    let program = [
        imm(addi(Reg::R1, Reg::R0, 42)),
        imm(sw(Reg::R1, Reg::R0, 0)),
        imm(addi(Reg::R1, Reg::R1, 1)),
        imm(sw(Reg::R1, Reg::R0, 0)),
        hlt(),
    ];
    let mut machine = Machine::with_program(&program);
    let word_zero = machine.memory.read(0).expect("aligned read");

    machine.run_to_halt(16).expect("program runs clean");
    assert_eq!(machine.outputs(), &[42, 43]);
    assert_eq!(machine.memory.read(0), Ok(word_zero));
}

#[test]
fn effective_address_zero_through_a_base_register_hits_the_port() {
    // base 2 with displacement -2 lands on the port, not memory
    let program = [
        imm(addi(Reg::R1, Reg::R0, 2)),
        imm(addi(Reg::R2, Reg::R0, 33)),
        imm(sw(Reg::R2, Reg::R1, -2)),
        hlt(),
    ];
    let mut machine = Machine::with_program(&program);
    machine.run_to_halt(16).expect("program runs clean");
    assert_eq!(machine.outputs(), &[33]);
}

#[test]
fn input_queue_capacity_is_enforced_at_ten() {
    let mut machine = Machine::new();
    for value in 0..10 {
        machine.push_input(value).expect("queue has capacity");
    }
    assert_eq!(machine.push_input(10), Err(Fault::InputQueueFull));
    assert_eq!(machine.pending_inputs().len(), INPUT_QUEUE_CAPACITY);
    assert_eq!(machine.diagnostics().input_overflows, 1);

    // earlier values survive the rejected push
    assert_eq!(machine.pending_inputs()[0], 0);
    assert_eq!(machine.pending_inputs()[9], 9);
}

#[test]
fn pending_inputs_is_a_non_destructive_view() {
    let program = [imm(lw(Reg::R1, Reg::R0, 0)), hlt()];
    let mut machine = Machine::with_program(&program);
    machine.push_input(11).expect("queue has capacity");
    machine.push_input(22).expect("queue has capacity");

    assert_eq!(machine.pending_inputs(), vec![11, 22]);
    assert_eq!(machine.pending_inputs(), vec![11, 22]);

    machine.run_to_halt(16).expect("program runs clean");
    assert_eq!(machine.registers()[1], 11);
    assert_eq!(machine.pending_inputs(), vec![22]);
}
