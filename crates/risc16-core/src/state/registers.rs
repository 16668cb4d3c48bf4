/// Number of architecturally visible general-purpose registers (`R0..R7`).
pub const GENERAL_REGISTER_COUNT: usize = 8;

/// Architecturally visible general-purpose register identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Reg {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
    R4 = 4,
    R5 = 5,
    R6 = 6,
    R7 = 7,
}

impl Reg {
    /// Ordered list of all architectural registers.
    pub const ALL: [Self; GENERAL_REGISTER_COUNT] = [
        Self::R0,
        Self::R1,
        Self::R2,
        Self::R3,
        Self::R4,
        Self::R5,
        Self::R6,
        Self::R7,
    ];

    /// Returns the array index for this register (`0..=7`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decodes a 3-bit register field into a register.
    #[must_use]
    pub const fn from_u3(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::R0),
            1 => Some(Self::R1),
            2 => Some(Self::R2),
            3 => Some(Self::R3),
            4 => Some(Self::R4),
            5 => Some(Self::R5),
            6 => Some(Self::R6),
            7 => Some(Self::R7),
            _ => None,
        }
    }

    /// Decodes an already-extracted register field value.
    ///
    /// The value is masked to 3 bits, making the conversion total over raw
    /// field contents.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        match bits & 0b111 {
            0 => Self::R0,
            1 => Self::R1,
            2 => Self::R2,
            3 => Self::R3,
            4 => Self::R4,
            5 => Self::R5,
            6 => Self::R6,
            _ => Self::R7,
        }
    }
}

/// General-purpose register file with `R0` hard-wired to zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RegisterFile {
    gpr: [u16; GENERAL_REGISTER_COUNT],
}

impl RegisterFile {
    /// Creates a zeroed register file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register. `R0` always yields zero.
    #[must_use]
    pub const fn read(&self, reg: Reg) -> u16 {
        self.gpr[reg.index()]
    }

    /// Writes a register. Writes to `R0` are silently discarded.
    pub const fn write(&mut self, reg: Reg, value: u16) {
        if !matches!(reg, Reg::R0) {
            self.gpr[reg.index()] = value;
        }
    }

    /// Clears every register.
    pub fn reset(&mut self) {
        self.gpr = [0; GENERAL_REGISTER_COUNT];
    }

    /// Snapshot of all eight registers in index order.
    #[must_use]
    pub const fn snapshot(&self) -> [u16; GENERAL_REGISTER_COUNT] {
        self.gpr
    }
}
