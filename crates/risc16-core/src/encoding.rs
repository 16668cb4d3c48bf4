//! Primary opcode classification and instruction-word field layout.
//!
//! The instruction word is 16 bits wide: a 3-bit primary opcode in bits
//! 15-13, regA in bits 12-10, regB in bits 9-7, and either a
//! register-register tail (reserved bits 6-3, regC in bits 2-0), a 7-bit
//! signed immediate in bits 6-0, or the 10-bit `lui` immediate in bits 9-0.

/// Bit position of the 3-bit primary opcode field.
pub const OPCODE_SHIFT: u8 = 13;
/// Bit position of the regA field.
pub const REG_A_SHIFT: u8 = 10;
/// Bit position of the regB field.
pub const REG_B_SHIFT: u8 = 7;
/// Width of a register field.
pub const REG_FIELD_WIDTH: u8 = 3;
/// Width of the signed immediate field of register-immediate forms.
pub const SIMM_WIDTH: u8 = 7;
/// Sign-bit index inside the signed immediate field.
pub const SIMM_SIGN_BIT: u8 = 6;
/// Width of the unsigned `lui` immediate field.
pub const LUI_IMM_WIDTH: u8 = 10;
/// Bit position of the reserved field of register-register forms.
pub const RRR_RESERVED_SHIFT: u8 = 3;
/// Width of the reserved field of register-register forms.
pub const RRR_RESERVED_WIDTH: u8 = 4;

/// Primary opcode values (instruction word bits 15-13).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum Opcode {
    /// Register-register add.
    Add = 0b000,
    /// Add signed 7-bit immediate.
    Addi = 0b001,
    /// Register-register not-and.
    Nand = 0b010,
    /// Load upper 10 bits of a register.
    Lui = 0b011,
    /// Load word; address 0 is the console input port.
    Lw = 0b100,
    /// Store word; address 0 is the console output port.
    Sw = 0b101,
    /// Branch by a signed byte offset when equal.
    Beq = 0b110,
    /// Jump-and-link-register slot; carries the halt encoding in its
    /// immediate low bit.
    Jalr = 0b111,
}

impl Opcode {
    /// Ordered list of all primary opcodes.
    pub const ALL: [Self; 8] = [
        Self::Add,
        Self::Addi,
        Self::Nand,
        Self::Lui,
        Self::Lw,
        Self::Sw,
        Self::Beq,
        Self::Jalr,
    ];

    /// Converts a 3-bit opcode field value into an opcode.
    #[must_use]
    pub const fn from_u3(bits: u8) -> Option<Self> {
        match bits {
            0b000 => Some(Self::Add),
            0b001 => Some(Self::Addi),
            0b010 => Some(Self::Nand),
            0b011 => Some(Self::Lui),
            0b100 => Some(Self::Lw),
            0b101 => Some(Self::Sw),
            0b110 => Some(Self::Beq),
            0b111 => Some(Self::Jalr),
            _ => None,
        }
    }

    /// Returns the 3-bit field value for this opcode.
    #[must_use]
    pub const fn as_u3(self) -> u8 {
        self as u8
    }

    /// Returns the assembler mnemonic.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Addi => "addi",
            Self::Nand => "nand",
            Self::Lui => "lui",
            Self::Lw => "lw",
            Self::Sw => "sw",
            Self::Beq => "beq",
            Self::Jalr => "jalr",
        }
    }

    /// True for the two register-register forms (`add`, `nand`).
    ///
    /// Their opcodes are exactly the values with bits 0 and 2 clear, which
    /// is what the decoder tests for.
    #[must_use]
    pub const fn is_register_register(self) -> bool {
        matches!(self, Self::Add | Self::Nand)
    }
}

#[cfg(test)]
mod tests {
    use super::Opcode;

    #[test]
    fn three_bit_roundtrip_is_bijective() {
        for bits in 0u8..=7 {
            let opcode = Opcode::from_u3(bits).expect("3-bit opcode space is fully assigned");
            assert_eq!(opcode.as_u3(), bits);
        }
        assert!(Opcode::from_u3(8).is_none());
    }

    #[test]
    fn register_register_forms_have_bits_zero_and_two_clear() {
        for opcode in Opcode::ALL {
            let bits = opcode.as_u3();
            assert_eq!(opcode.is_register_register(), bits & 0b101 == 0);
        }
    }

    #[test]
    fn mnemonics_are_distinct() {
        let mut seen: Vec<&str> = Opcode::ALL.iter().map(|op| op.mnemonic()).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), Opcode::ALL.len());
    }
}
