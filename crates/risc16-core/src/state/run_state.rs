/// Host-observable execution state of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum RunState {
    /// Ready to execute the next instruction.
    #[default]
    Running,
    /// A halt encoding retired; the machine makes no further progress.
    Halted,
    /// A console read found the input queue empty. The stalled instruction
    /// retries once the host pushes input.
    BlockedOnInput,
}

impl RunState {
    /// True when the machine has executed a halt encoding.
    #[must_use]
    pub const fn is_halted(self) -> bool {
        matches!(self, Self::Halted)
    }

    /// True when the machine is stalled on an empty input queue.
    #[must_use]
    pub const fn is_blocked(self) -> bool {
        matches!(self, Self::BlockedOnInput)
    }
}
