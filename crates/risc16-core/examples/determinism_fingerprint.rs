//! Deterministic run fingerprint generator used for cross-host comparison.
//!
//! Runs a fixed console program and folds the observable machine state
//! into an FNV-1a hash. Two builds that print different fingerprints
//! diverge somewhere in decode, execution, or I/O ordering.

use risc16_core::{add, addi, beq, hlt, lw, sw, Fault, Machine, Reg, StepOutcome};

use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

fn imm(encoded: Result<u16, Fault>) -> u16 {
    encoded.expect("program immediates are in range")
}

fn hash_bytes(hash: &mut u64, bytes: &[u8]) {
    for byte in bytes {
        *hash ^= u64::from(*byte);
        *hash = hash.wrapping_mul(0x1000_0000_01B3);
    }
}

fn fingerprint() -> String {
    let program = [
        imm(lw(Reg::R1, Reg::R0, 0)),
        imm(addi(Reg::R2, Reg::R0, 1)),
        add(Reg::R2, Reg::R2, Reg::R1),
        imm(sw(Reg::R2, Reg::R0, 0)),
        imm(addi(Reg::R1, Reg::R1, -1)),
        imm(beq(Reg::R0, Reg::R1, 2)),
        imm(beq(Reg::R0, Reg::R0, -12)),
        hlt(),
    ];

    let mut machine = Machine::with_program(&program);
    for value in [3, 1, 4, 1] {
        machine.push_input(value).expect("queue has capacity");
    }

    let outcome = machine
        .run_to_halt(4_096)
        .expect("fingerprint program must not fault");

    let mut hash = 0xcbf2_9ce4_8422_2325_u64;
    hash_bytes(&mut hash, &outcome.steps.to_le_bytes());
    hash_bytes(
        &mut hash,
        &[match outcome.outcome {
            StepOutcome::Continued => 0x10,
            StepOutcome::Halted => 0x11,
            StepOutcome::BlockedOnInput => 0x12,
            StepOutcome::BudgetExhausted => 0x13,
        }],
    );

    hash_bytes(&mut hash, &machine.pc().to_le_bytes());
    for register in machine.registers() {
        hash_bytes(&mut hash, &register.to_le_bytes());
    }
    for value in machine.outputs() {
        hash_bytes(&mut hash, &value.to_le_bytes());
    }
    for value in machine.pending_inputs() {
        hash_bytes(&mut hash, &value.to_le_bytes());
    }
    for word in machine.memory.words() {
        hash_bytes(&mut hash, &word.to_le_bytes());
    }

    format!("{hash:016x}")
}

fn main() {
    println!("{}", fingerprint());
}
