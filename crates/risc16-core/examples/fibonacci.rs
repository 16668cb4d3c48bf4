//! Runs the classic Fibonacci console program and prints the machine's
//! observable state.
//!
//! ```sh
//! cargo run -p risc16-core --example fibonacci -- 7
//! ```

use risc16_core::{
    add, addi, beq, hlt, lw, sw, Fault, Machine, Reg, StepOutcome, DEFAULT_STEP_BUDGET,
};

use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

fn imm(encoded: Result<u16, Fault>) -> u16 {
    encoded.expect("program immediates are in range")
}

fn fibonacci_program() -> [u16; 14] {
    [
        // init
        imm(lw(Reg::R1, Reg::R0, 0)),
        imm(addi(Reg::R1, Reg::R1, -1)),
        imm(addi(Reg::R2, Reg::R0, 1)),
        add(Reg::R3, Reg::R0, Reg::R0),
        // loop
        add(Reg::R4, Reg::R2, Reg::R0),
        add(Reg::R2, Reg::R2, Reg::R3),
        add(Reg::R3, Reg::R4, Reg::R0),
        imm(addi(Reg::R1, Reg::R1, -1)),
        imm(beq(Reg::R0, Reg::R1, 2)),
        imm(beq(Reg::R0, Reg::R0, -12)),
        // end
        add(Reg::R1, Reg::R3, Reg::R0),
        imm(sw(Reg::R1, Reg::R0, 0)),
        hlt(),
        imm(beq(Reg::R0, Reg::R0, -4)),
    ]
}

fn main() {
    let seed: u16 = std::env::args()
        .nth(1)
        .map_or(7, |arg| arg.parse().expect("seed must be a 16-bit integer"));

    let mut machine = Machine::with_program(&fibonacci_program());
    machine.push_input(seed).expect("queue has capacity");

    let outcome = machine
        .run_to_halt(DEFAULT_STEP_BUDGET)
        .expect("fibonacci program must not fault");

    match outcome.outcome {
        StepOutcome::Halted => println!("halted after {} steps", outcome.steps),
        StepOutcome::BlockedOnInput => println!("blocked on input"),
        StepOutcome::BudgetExhausted => println!("step budget exhausted"),
        StepOutcome::Continued => unreachable!("run loops do not stop mid-flight"),
    }

    println!("outputs: {:?}", machine.outputs());
    println!("registers: {:?}", machine.registers());
    println!("pc: {:#06x}", machine.pc());
    println!();
    println!("listing:");
    for row in machine.disassemble_window(7, 0) {
        println!("  {:#06x}: {}", row.addr, row.text);
    }
}
