use thiserror::Error;

/// Fault classes used for diagnostics aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum FaultClass {
    /// Decoder rejected an instruction encoding.
    Decode,
    /// Word access alignment violation.
    Memory,
    /// Encoder rejected an out-of-range operand.
    Encode,
    /// Console input queue violation.
    Io,
}

/// Stable fault taxonomy for decode, memory, encoder, and I/O failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Fault {
    /// 16-bit access used an odd byte address.
    #[error("unaligned word access at address {addr:#06x}")]
    UnalignedAccess {
        /// Offending byte address.
        addr: u16,
    },
    /// Register-register encoding with nonzero reserved bits 6-3.
    #[error("malformed register-register instruction {word:#06x}")]
    MalformedInstruction {
        /// Raw instruction word.
        word: u16,
    },
    /// Encoder operand does not fit its immediate field.
    #[error("{mnemonic} immediate {value} does not fit its field")]
    ImmediateOutOfRange {
        /// Mnemonic of the rejected constructor.
        mnemonic: &'static str,
        /// Requested immediate value.
        value: i32,
    },
    /// Host attempted to enqueue into a full console input queue.
    #[error("input queue is full")]
    InputQueueFull,
}

impl Fault {
    /// Returns the diagnostics fault class for this fault.
    #[must_use]
    pub const fn class(self) -> FaultClass {
        match self {
            Self::UnalignedAccess { .. } => FaultClass::Memory,
            Self::MalformedInstruction { .. } => FaultClass::Decode,
            Self::ImmediateOutOfRange { .. } => FaultClass::Encode,
            Self::InputQueueFull => FaultClass::Io,
        }
    }

    /// Faults that abort an executing step.
    ///
    /// The remaining kinds are host-side: they reject an operation before
    /// it reaches the machine and leave execution untouched.
    #[must_use]
    pub const fn is_fatal_to_step(self) -> bool {
        matches!(
            self,
            Self::UnalignedAccess { .. } | Self::MalformedInstruction { .. }
        )
    }
}

/// A fault paired with the program counter active when it was raised.
///
/// Fatal step faults propagate to the caller in this form so diagnostics
/// can point at the faulting instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[error("{fault} at pc {pc:#06x}")]
pub struct StepFault {
    /// Program counter of the faulting step.
    pub pc: u16,
    /// The underlying fault.
    pub fault: Fault,
}

impl StepFault {
    /// Pairs a fault with the program counter that raised it.
    #[must_use]
    pub const fn new(pc: u16, fault: Fault) -> Self {
        Self { pc, fault }
    }
}
