//! Instruction execution engine: fetch, decode, dispatch, retire.
//!
//! Steps are precise. A step that raises a fault leaves architectural
//! state unchanged (only diagnostics record it), and a console read that
//! finds no input leaves PC and registers untouched so the same
//! instruction retries once the host supplies data.

use crate::api::{Machine, RunOutcome, StepOutcome};
use crate::decoder::{decode, Instruction};
use crate::fault::{Fault, StepFault};
use crate::memory::WORD_SIZE_BYTES;
use crate::state::RunState;

/// Byte address of the memory-mapped console port.
///
/// Loads from this address drain the input queue; stores append to the
/// output log. The backing memory word at address 0 is never touched by
/// port traffic.
pub const CONSOLE_PORT: u16 = 0x0000;

/// Executes one instruction against `machine`.
///
/// A halted machine stays halted and reports [`StepOutcome::Halted`]
/// without fetching. A blocked machine re-executes the stalled console
/// read.
///
/// # Errors
///
/// Returns a [`StepFault`] on an unaligned fetch or data access, or a
/// malformed instruction; architectural state is left unchanged.
pub fn step_one(machine: &mut Machine) -> Result<StepOutcome, StepFault> {
    if machine.run_state.is_halted() {
        return Ok(StepOutcome::Halted);
    }

    let pc = machine.pc;
    let mut next_pc = pc.wrapping_add(WORD_SIZE_BYTES);

    let word = match machine.memory.read(pc) {
        Ok(word) => word,
        Err(fault) => return Err(raise(machine, pc, fault)),
    };
    let instr = match decode(word) {
        Ok(instr) => instr,
        Err(fault) => return Err(raise(machine, pc, fault)),
    };

    match instr {
        Instruction::Add { a, b, c } => {
            let value = machine.regs.read(b).wrapping_add(machine.regs.read(c));
            machine.regs.write(a, value);
        }
        Instruction::Nand { a, b, c } => {
            let value = !(machine.regs.read(b) & machine.regs.read(c));
            machine.regs.write(a, value);
        }
        Instruction::Lui { a, imm } => {
            machine.regs.write(a, (imm << 6) & 0xFFC0);
        }
        Instruction::Addi { a, b, simm } => {
            let value = machine.regs.read(b).wrapping_add(as_word(simm));
            machine.regs.write(a, value);
        }
        Instruction::Sw { a, b, simm } => {
            let addr = machine.regs.read(b).wrapping_add(as_word(simm));
            if addr == CONSOLE_PORT {
                machine.outputs.append(machine.regs.read(a));
            } else {
                let value = machine.regs.read(a);
                if let Err(fault) = machine.memory.write(addr, value) {
                    return Err(raise(machine, pc, fault));
                }
            }
        }
        Instruction::Lw { a, b, simm } => {
            let addr = machine.regs.read(b).wrapping_add(as_word(simm));
            if addr == CONSOLE_PORT {
                let Some(value) = machine.inputs.pop() else {
                    machine.run_state = RunState::BlockedOnInput;
                    return Ok(StepOutcome::BlockedOnInput);
                };
                machine.run_state = RunState::Running;
                machine.regs.write(a, value);
            } else {
                let value = match machine.memory.read(addr) {
                    Ok(value) => value,
                    Err(fault) => return Err(raise(machine, pc, fault)),
                };
                machine.regs.write(a, value);
            }
        }
        Instruction::Beq { a, b, simm } => {
            if machine.regs.read(a) == machine.regs.read(b) {
                next_pc = next_pc.wrapping_add(as_word(simm));
            }
        }
        Instruction::Jalr { simm, .. } => {
            if simm & 1 != 0 {
                machine.run_state = RunState::Halted;
                machine.pc = next_pc;
                machine.diag.record_retired();
                return Ok(StepOutcome::Halted);
            }
            // register-indirect jump is architecturally unimplemented;
            // retire as a no-op and leave a diagnostic trace
            machine.diag.record_unimplemented_jalr();
        }
    }

    machine.pc = next_pc;
    machine.diag.record_retired();
    Ok(StepOutcome::Continued)
}

/// Steps repeatedly until a halt, blocked input, or `max_steps`
/// retirements.
///
/// The budget bounds runaway programs; exhausting it reports
/// [`StepOutcome::BudgetExhausted`] with the machine still runnable.
///
/// # Errors
///
/// Propagates the first fatal [`StepFault`] raised by a step.
pub fn run_to_halt(machine: &mut Machine, max_steps: u64) -> Result<RunOutcome, StepFault> {
    let start = machine.diag.instructions_retired;
    loop {
        let steps = machine.diag.instructions_retired - start;
        if steps >= max_steps {
            return Ok(RunOutcome {
                steps,
                outcome: StepOutcome::BudgetExhausted,
            });
        }
        match step_one(machine)? {
            StepOutcome::Continued | StepOutcome::BudgetExhausted => {}
            StepOutcome::Halted => {
                return Ok(RunOutcome {
                    steps: machine.diag.instructions_retired - start,
                    outcome: StepOutcome::Halted,
                });
            }
            StepOutcome::BlockedOnInput => {
                return Ok(RunOutcome {
                    steps: machine.diag.instructions_retired - start,
                    outcome: StepOutcome::BlockedOnInput,
                });
            }
        }
    }
}

#[allow(clippy::cast_sign_loss)]
const fn as_word(simm: i16) -> u16 {
    simm as u16
}

fn raise(machine: &mut Machine, pc: u16, fault: Fault) -> StepFault {
    machine.diag.record_fault(fault, pc);
    StepFault::new(pc, fault)
}
