//! Core emulator crate for the RiSC-16 console machine.
//!
//! A cycle-stepped emulator for a 16-bit RISC instruction set: eight
//! general registers, 64 KiB of word-addressed memory, and a memory-mapped
//! console port at address 0. The crate decodes fixed-width instruction
//! words into typed operations, executes them against an explicit owned
//! [`Machine`] state, and renders disassembly listings for display hosts.

/// Bit-field extraction and sign-extension primitives.
pub mod bits;
pub use bits::{field, sign_extend};

/// Primary opcode classification and instruction-word field layout.
pub mod encoding;
pub use encoding::{
    Opcode, LUI_IMM_WIDTH, OPCODE_SHIFT, REG_A_SHIFT, REG_B_SHIFT, REG_FIELD_WIDTH,
    RRR_RESERVED_SHIFT, RRR_RESERVED_WIDTH, SIMM_SIGN_BIT, SIMM_WIDTH,
};

/// Fault taxonomy for decode, memory, encoder, and console I/O failures.
pub mod fault;
pub use fault::{Fault, FaultClass, StepFault};

/// Architectural machine state primitives.
pub mod state;
pub use state::{
    InputQueue, OutputLog, Reg, RegisterFile, RunState, GENERAL_REGISTER_COUNT,
    INPUT_QUEUE_CAPACITY,
};

/// Word-addressed main memory model.
pub mod memory;
pub use memory::{
    validate_word_alignment, Memory, ADDRESS_SPACE_BYTES, TOTAL_WORDS, WORD_SIZE_BYTES,
};

/// Instruction decode pipeline with field extraction and validation.
pub mod decoder;
pub use decoder::{decode, Instruction};

/// Checked instruction-word constructors.
pub mod encoder;
pub use encoder::{
    add, addi, beq, hlt, jalr, lui, lw, nand, sw, LUI_IMM_MAX, SIMM_MAX, SIMM_MIN,
};

/// Core-owned execution diagnostics counters.
pub mod diag;
pub use diag::Diagnostics;

/// Public host-facing machine state and stepping API.
pub mod api;
pub use api::{Machine, RunOutcome, StepOutcome, DEFAULT_STEP_BUDGET};

/// Instruction execution engine.
pub mod execute;
pub use execute::{run_to_halt, step_one, CONSOLE_PORT};

/// Instruction display text and listing windows.
pub mod disasm;
pub use disasm::{disassemble_window, disassemble_word, DisasmRow};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
