//! Instruction decoder for the RiSC-16 ISA.
//!
//! Classifies a raw 16-bit word into a typed instruction by its primary
//! opcode (bits 15-13). Decoding is total except for register-register
//! encodings whose reserved bits 6-3 are nonzero.

use crate::bits::{field, sign_extend};
use crate::encoding::{
    LUI_IMM_WIDTH, OPCODE_SHIFT, REG_A_SHIFT, REG_B_SHIFT, REG_FIELD_WIDTH, RRR_RESERVED_SHIFT,
    RRR_RESERVED_WIDTH, SIMM_SIGN_BIT, SIMM_WIDTH,
};
use crate::fault::Fault;
use crate::state::Reg;

/// A decoded instruction with all operand fields extracted.
///
/// `simm` operands are sign-extended 7-bit values in `[-64, 63]`. The
/// `lui` immediate is the raw 10-bit field, never sign-extended. `Jalr`
/// keeps its immediate: bit 0 set is the architectural halt signal, and
/// any other nonzero value is tolerated at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Instruction {
    /// `regA <- regB + regC` (wrapping).
    Add {
        /// Destination register.
        a: Reg,
        /// First source register.
        b: Reg,
        /// Second source register.
        c: Reg,
    },
    /// `regA <- !(regB & regC)`.
    Nand {
        /// Destination register.
        a: Reg,
        /// First source register.
        b: Reg,
        /// Second source register.
        c: Reg,
    },
    /// `regA <- imm << 6`, low six bits cleared.
    Lui {
        /// Destination register.
        a: Reg,
        /// Unsigned 10-bit immediate.
        imm: u16,
    },
    /// `regA <- regB + simm` (wrapping).
    Addi {
        /// Destination register.
        a: Reg,
        /// Source register.
        b: Reg,
        /// Signed 7-bit immediate.
        simm: i16,
    },
    /// Store `regA` at `regB + simm`; address 0 is the console output port.
    Sw {
        /// Source register.
        a: Reg,
        /// Base register.
        b: Reg,
        /// Signed 7-bit displacement.
        simm: i16,
    },
    /// Load `regA` from `regB + simm`; address 0 is the console input port.
    Lw {
        /// Destination register.
        a: Reg,
        /// Base register.
        b: Reg,
        /// Signed 7-bit displacement.
        simm: i16,
    },
    /// Branch by `simm` bytes past the next instruction when
    /// `regA == regB`.
    Beq {
        /// First compared register.
        a: Reg,
        /// Second compared register.
        b: Reg,
        /// Signed 7-bit byte offset.
        simm: i16,
    },
    /// Halt when immediate bit 0 is set. The true register-indirect jump
    /// is architecturally unimplemented and retires as a no-op.
    Jalr {
        /// Link register slot.
        a: Reg,
        /// Target register slot.
        b: Reg,
        /// Signed 7-bit immediate carrying the halt bit.
        simm: i16,
    },
}

impl Instruction {
    /// Returns the display mnemonic.
    #[must_use]
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Nand { .. } => "nand",
            Self::Lui { .. } => "lui",
            Self::Addi { .. } => "addi",
            Self::Sw { .. } => "sw",
            Self::Lw { .. } => "lw",
            Self::Beq { .. } => "beq",
            Self::Jalr { .. } => "jalr",
        }
    }

    /// True when this is the `jalr` halt encoding (immediate bit 0 set).
    #[must_use]
    pub const fn is_halt(&self) -> bool {
        match self {
            Self::Jalr { simm, .. } => *simm & 1 != 0,
            _ => false,
        }
    }

    /// Re-encodes this instruction into its 16-bit word.
    ///
    /// Fields are masked to their widths, so decoded instructions
    /// round-trip to their original bit pattern.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn encode(&self) -> u16 {
        match *self {
            Self::Add { a, b, c } => pack_rrr(0b000, a, b, c),
            Self::Nand { a, b, c } => pack_rrr(0b010, a, b, c),
            Self::Lui { a, imm } => {
                (0b011 << OPCODE_SHIFT) | ((a as u16) << REG_A_SHIFT) | (imm & 0x03FF)
            }
            Self::Addi { a, b, simm } => pack_ri(0b001, a, b, simm),
            Self::Sw { a, b, simm } => pack_ri(0b101, a, b, simm),
            Self::Lw { a, b, simm } => pack_ri(0b100, a, b, simm),
            Self::Beq { a, b, simm } => pack_ri(0b110, a, b, simm),
            Self::Jalr { a, b, simm } => pack_ri(0b111, a, b, simm),
        }
    }
}

const fn pack_rrr(opcode: u16, a: Reg, b: Reg, c: Reg) -> u16 {
    (opcode << OPCODE_SHIFT)
        | ((a as u16) << REG_A_SHIFT)
        | ((b as u16) << REG_B_SHIFT)
        | (c as u16)
}

#[allow(clippy::cast_sign_loss)]
const fn pack_ri(opcode: u16, a: Reg, b: Reg, simm: i16) -> u16 {
    (opcode << OPCODE_SHIFT)
        | ((a as u16) << REG_A_SHIFT)
        | ((b as u16) << REG_B_SHIFT)
        | (simm as u16 & 0x007F)
}

/// Decodes a raw 16-bit instruction word.
///
/// Every word maps to exactly one instruction, except register-register
/// encodings (`add`, `nand`) whose reserved bits 6-3 are nonzero.
///
/// # Errors
///
/// Returns [`Fault::MalformedInstruction`] for the nonzero-reserved-bits
/// case.
#[allow(clippy::cast_possible_wrap, clippy::missing_const_for_fn)]
pub fn decode(word: u16) -> Result<Instruction, Fault> {
    let opcode = field(word, OPCODE_SHIFT, 3);
    let a = Reg::from_bits(field(word, REG_A_SHIFT, REG_FIELD_WIDTH));
    let b = Reg::from_bits(field(word, REG_B_SHIFT, REG_FIELD_WIDTH));

    if opcode == 0b011 {
        return Ok(Instruction::Lui {
            a,
            imm: field(word, 0, LUI_IMM_WIDTH),
        });
    }

    if opcode & 0b101 == 0 {
        // register-register form: bits 6-3 are architecturally zero
        if field(word, RRR_RESERVED_SHIFT, RRR_RESERVED_WIDTH) != 0 {
            return Err(Fault::MalformedInstruction { word });
        }
        let c = Reg::from_bits(field(word, 0, REG_FIELD_WIDTH));
        return Ok(if opcode & 0b010 == 0 {
            Instruction::Add { a, b, c }
        } else {
            Instruction::Nand { a, b, c }
        });
    }

    let simm = sign_extend(field(word, 0, SIMM_WIDTH), SIMM_SIGN_BIT) as i16;
    Ok(match opcode {
        0b111 => Instruction::Jalr { a, b, simm },
        0b001 => Instruction::Addi { a, b, simm },
        0b101 => Instruction::Sw { a, b, simm },
        0b100 => Instruction::Lw { a, b, simm },
        _ => Instruction::Beq { a, b, simm },
    })
}
