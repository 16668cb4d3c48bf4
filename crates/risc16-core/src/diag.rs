//! Core-owned execution diagnostics counters.

use crate::fault::{Fault, FaultClass};

/// Diagnostics updated as the machine executes.
///
/// Fault counters saturate rather than wrap so long runs keep a stable
/// reading. The unimplemented-`jalr` counter records register-indirect
/// jump encodings that retired as no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Diagnostics {
    /// The last fault raised, if any.
    pub last_fault: Option<Fault>,
    /// Program counter at the time of the last fault.
    pub last_fault_pc: u16,
    /// Saturating counter for decode-class faults.
    pub fault_count_decode: u16,
    /// Saturating counter for memory-class faults.
    pub fault_count_memory: u16,
    /// Saturating counter for encoder-class faults.
    pub fault_count_encode: u16,
    /// Saturating counter for I/O-class faults.
    pub fault_count_io: u16,
    /// Number of retired instructions.
    pub instructions_retired: u64,
    /// Saturating counter for `jalr` encodings without the halt bit.
    pub unimplemented_jalr: u16,
    /// Saturating counter for input pushes rejected against a full queue.
    pub input_overflows: u16,
}

impl Diagnostics {
    /// Creates a zeroed diagnostics block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a fault with the PC active when it was raised.
    pub const fn record_fault(&mut self, fault: Fault, pc: u16) {
        self.last_fault = Some(fault);
        self.last_fault_pc = pc;
        match fault.class() {
            FaultClass::Decode => {
                self.fault_count_decode = self.fault_count_decode.saturating_add(1);
            }
            FaultClass::Memory => {
                self.fault_count_memory = self.fault_count_memory.saturating_add(1);
            }
            FaultClass::Encode => {
                self.fault_count_encode = self.fault_count_encode.saturating_add(1);
            }
            FaultClass::Io => {
                self.fault_count_io = self.fault_count_io.saturating_add(1);
            }
        }
    }

    /// Counts one retired instruction.
    pub const fn record_retired(&mut self) {
        self.instructions_retired = self.instructions_retired.saturating_add(1);
    }

    /// Counts one unimplemented register-indirect `jalr`.
    pub const fn record_unimplemented_jalr(&mut self) {
        self.unimplemented_jalr = self.unimplemented_jalr.saturating_add(1);
    }

    /// Counts one rejected input push.
    pub const fn record_input_overflow(&mut self) {
        self.input_overflows = self.input_overflows.saturating_add(1);
    }

    /// Resets every field to its default value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::Diagnostics;
    use crate::fault::Fault;

    #[test]
    fn record_fault_tracks_last_fault_and_class_counter() {
        let mut diag = Diagnostics::new();
        diag.record_fault(Fault::UnalignedAccess { addr: 0x0031 }, 0x0010);

        assert_eq!(diag.last_fault, Some(Fault::UnalignedAccess { addr: 0x0031 }));
        assert_eq!(diag.last_fault_pc, 0x0010);
        assert_eq!(diag.fault_count_memory, 1);
        assert_eq!(diag.fault_count_decode, 0);

        diag.record_fault(Fault::MalformedInstruction { word: 0x0008 }, 0x0012);
        assert_eq!(diag.fault_count_decode, 1);
        assert_eq!(diag.last_fault_pc, 0x0012);
    }

    #[test]
    fn counters_saturate_instead_of_wrapping() {
        let mut diag = Diagnostics {
            unimplemented_jalr: u16::MAX,
            ..Diagnostics::default()
        };
        diag.record_unimplemented_jalr();
        assert_eq!(diag.unimplemented_jalr, u16::MAX);
    }

    #[test]
    fn reset_returns_to_defaults() {
        let mut diag = Diagnostics::new();
        diag.record_retired();
        diag.record_input_overflow();
        diag.reset();
        assert_eq!(diag, Diagnostics::default());
    }
}
