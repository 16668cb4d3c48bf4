//! Instruction display text and listing windows.
//!
//! Rendering follows the `"<mnemonic> R<a>[, R<b>][, R<c>][, <imm>]"`
//! shape. Signed immediates print as two's-complement decimals; words that
//! fail to decode render as `.word` rows instead of erroring, so a listing
//! can cross data in memory.

use std::fmt;

use crate::decoder::{decode, Instruction};
use crate::memory::{Memory, WORD_SIZE_BYTES};

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Add { a, b, c } | Self::Nand { a, b, c } => write!(
                f,
                "{} R{}, R{}, R{}",
                self.mnemonic(),
                a.index(),
                b.index(),
                c.index()
            ),
            Self::Lui { a, imm } => write!(f, "lui R{}, {imm}", a.index()),
            Self::Addi { a, b, simm }
            | Self::Sw { a, b, simm }
            | Self::Lw { a, b, simm }
            | Self::Beq { a, b, simm }
            | Self::Jalr { a, b, simm } => write!(
                f,
                "{} R{}, R{}, {simm}",
                self.mnemonic(),
                a.index(),
                b.index()
            ),
        }
    }
}

/// One disassembled listing row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DisasmRow {
    /// Byte address of the instruction word.
    pub addr: u16,
    /// Raw instruction word.
    pub word: u16,
    /// Rendered display text.
    pub text: String,
    /// Whether the word failed to decode.
    pub is_illegal: bool,
}

/// Renders one instruction word as display text.
///
/// Malformed words render as `.word` rows.
#[must_use]
pub fn disassemble_word(word: u16) -> String {
    decode(word).map_or_else(|_| format!(".word {word:#06x}"), |instr| instr.to_string())
}

/// Disassembles `before + 1 + after` rows around `pc`.
///
/// Rows step by one word and wrap with the address space. Rows whose
/// address cannot be read (an odd `pc` makes every row odd) are omitted.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn disassemble_window(
    memory: &Memory,
    pc: u16,
    before: usize,
    after: usize,
) -> Vec<DisasmRow> {
    let total = before + 1 + after;
    let start = pc.wrapping_sub((before as u16).wrapping_mul(WORD_SIZE_BYTES));

    let mut rows = Vec::with_capacity(total);
    for k in 0..total {
        let addr = start.wrapping_add((k as u16).wrapping_mul(WORD_SIZE_BYTES));
        let Ok(word) = memory.read(addr) else {
            continue;
        };
        rows.push(DisasmRow {
            addr,
            word,
            text: disassemble_word(word),
            is_illegal: decode(word).is_err(),
        });
    }
    rows
}
