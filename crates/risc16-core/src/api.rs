//! Public host-facing machine state and stepping surface.
//!
//! The whole architectural state lives in one explicit owned [`Machine`]
//! value; there are no process-wide singletons. Display hosts drive it
//! through [`Machine::step`] / [`Machine::run_to_halt`], feed console
//! input with [`Machine::push_input`], and render the accessor views.

use crate::diag::Diagnostics;
use crate::disasm::{self, DisasmRow};
use crate::fault::{Fault, StepFault};
use crate::memory::Memory;
use crate::state::{InputQueue, OutputLog, RegisterFile, RunState, GENERAL_REGISTER_COUNT};

/// Default step budget for run-to-halt loops.
pub const DEFAULT_STEP_BUDGET: u64 = 1_000_000;

/// Outcome of one instruction step (or of a bounded run).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum StepOutcome {
    /// Instruction retired; the machine is ready for the next step.
    Continued,
    /// A halt encoding retired; no further progress is possible.
    Halted,
    /// A console read found no buffered input. PC and registers are
    /// untouched; the same instruction retries once the host pushes data.
    BlockedOnInput,
    /// A bounded run consumed its entire step budget. Never produced by a
    /// single step.
    BudgetExhausted,
}

/// Aggregated outcome of a bounded run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RunOutcome {
    /// Instructions retired during this run call.
    pub steps: u64,
    /// Outcome that ended the run.
    pub outcome: StepOutcome,
}

/// Complete architectural state of one emulated machine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Machine {
    /// General-purpose register file (`R0` hard-wired to zero).
    pub regs: RegisterFile,
    /// Byte-addressed program counter.
    pub pc: u16,
    /// Main memory.
    pub memory: Memory,
    /// Console input queue.
    pub inputs: InputQueue,
    /// Console output log.
    pub outputs: OutputLog,
    /// Current execution state.
    pub run_state: RunState,
    /// Execution diagnostics.
    pub diag: Diagnostics,
}

impl Machine {
    /// Creates a machine with zeroed registers and memory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a machine with `image` installed at address 0.
    #[must_use]
    pub fn with_program(image: &[u16]) -> Self {
        let mut machine = Self::new();
        machine.load_program(image);
        machine
    }

    /// Installs a program image at address 0.
    ///
    /// Prior memory contents are discarded, PC returns to 0, registers are
    /// cleared, the halt/blocked conditions are lifted, and diagnostics
    /// reset. Buffered console I/O survives: it belongs to the machine
    /// instance, not to any one program.
    pub fn load_program(&mut self, image: &[u16]) {
        self.memory.load_image(image);
        self.regs.reset();
        self.pc = 0;
        self.run_state = RunState::Running;
        self.diag.reset();
    }

    /// Executes one instruction.
    ///
    /// # Errors
    ///
    /// Returns a [`StepFault`] on an unaligned access or a malformed
    /// instruction; architectural state is left unchanged.
    pub fn step(&mut self) -> Result<StepOutcome, StepFault> {
        crate::execute::step_one(self)
    }

    /// Steps until halt, blocked input, or `max_steps` retirements.
    ///
    /// # Errors
    ///
    /// Propagates the first fatal fault together with its PC.
    pub fn run_to_halt(&mut self, max_steps: u64) -> Result<RunOutcome, StepFault> {
        crate::execute::run_to_halt(self, max_steps)
    }

    /// Enqueues one console input word.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::InputQueueFull`] when the queue is at capacity; the
    /// value is dropped and may be retried once the program consumes data.
    pub fn push_input(&mut self, value: u16) -> Result<(), Fault> {
        match self.inputs.push(value) {
            Ok(()) => Ok(()),
            Err(fault) => {
                self.diag.record_input_overflow();
                Err(fault)
            }
        }
    }

    /// Buffered console input in FIFO order, without consuming it.
    #[must_use]
    pub fn pending_inputs(&self) -> Vec<u16> {
        self.inputs.pending()
    }

    /// Console output words in emission order.
    #[must_use]
    pub fn outputs(&self) -> &[u16] {
        self.outputs.as_slice()
    }

    /// Snapshot of the eight general-purpose registers.
    #[must_use]
    pub const fn registers(&self) -> [u16; GENERAL_REGISTER_COUNT] {
        self.regs.snapshot()
    }

    /// Current program counter.
    #[must_use]
    pub const fn pc(&self) -> u16 {
        self.pc
    }

    /// Current execution state.
    #[must_use]
    pub const fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Execution diagnostics.
    #[must_use]
    pub const fn diagnostics(&self) -> &Diagnostics {
        &self.diag
    }

    /// Renders the instruction at `addr` as display text.
    ///
    /// Malformed words render as `.word` rows rather than failing.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::UnalignedAccess`] when `addr` is odd.
    pub fn disassemble_at(&self, addr: u16) -> Result<String, Fault> {
        let word = self.memory.read(addr)?;
        Ok(disasm::disassemble_word(word))
    }

    /// Disassembles a listing window centered on the current PC.
    #[must_use]
    pub fn disassemble_window(&self, before: usize, after: usize) -> Vec<DisasmRow> {
        disasm::disassemble_window(&self.memory, self.pc, before, after)
    }
}
