//! Checked instruction-word constructors.
//!
//! One constructor per mnemonic. Register operands are typed, so only
//! immediates need validation; out-of-range values are rejected before a
//! word is ever produced.

use crate::decoder::Instruction;
use crate::fault::Fault;
use crate::state::Reg;

/// Smallest encodable signed immediate.
pub const SIMM_MIN: i16 = -64;
/// Largest encodable signed immediate.
pub const SIMM_MAX: i16 = 63;
/// Largest encodable `lui` immediate (10 bits, unsigned).
pub const LUI_IMM_MAX: u16 = 0x03FF;

const fn check_simm(mnemonic: &'static str, imm: i16) -> Result<i16, Fault> {
    if imm < SIMM_MIN || imm > SIMM_MAX {
        return Err(Fault::ImmediateOutOfRange {
            mnemonic,
            value: imm as i32,
        });
    }
    Ok(imm)
}

/// Encodes `add regA, regB, regC`.
#[must_use]
pub const fn add(a: Reg, b: Reg, c: Reg) -> u16 {
    Instruction::Add { a, b, c }.encode()
}

/// Encodes `nand regA, regB, regC`.
#[must_use]
pub const fn nand(a: Reg, b: Reg, c: Reg) -> u16 {
    Instruction::Nand { a, b, c }.encode()
}

/// Encodes `addi regA, regB, imm`.
///
/// # Errors
///
/// Returns [`Fault::ImmediateOutOfRange`] unless `imm` is in `[-64, 63]`.
pub const fn addi(a: Reg, b: Reg, imm: i16) -> Result<u16, Fault> {
    match check_simm("addi", imm) {
        Ok(simm) => Ok(Instruction::Addi { a, b, simm }.encode()),
        Err(fault) => Err(fault),
    }
}

/// Encodes `lui regA, imm` with `imm` packed into bits 9-0.
///
/// # Errors
///
/// Returns [`Fault::ImmediateOutOfRange`] unless `imm` is in `[0, 1023]`.
pub const fn lui(a: Reg, imm: u16) -> Result<u16, Fault> {
    if imm > LUI_IMM_MAX {
        return Err(Fault::ImmediateOutOfRange {
            mnemonic: "lui",
            value: imm as i32,
        });
    }
    Ok(Instruction::Lui { a, imm }.encode())
}

/// Encodes `sw regA, regB, imm`.
///
/// # Errors
///
/// Returns [`Fault::ImmediateOutOfRange`] unless `imm` is in `[-64, 63]`.
pub const fn sw(a: Reg, b: Reg, imm: i16) -> Result<u16, Fault> {
    match check_simm("sw", imm) {
        Ok(simm) => Ok(Instruction::Sw { a, b, simm }.encode()),
        Err(fault) => Err(fault),
    }
}

/// Encodes `lw regA, regB, imm`.
///
/// # Errors
///
/// Returns [`Fault::ImmediateOutOfRange`] unless `imm` is in `[-64, 63]`.
pub const fn lw(a: Reg, b: Reg, imm: i16) -> Result<u16, Fault> {
    match check_simm("lw", imm) {
        Ok(simm) => Ok(Instruction::Lw { a, b, simm }.encode()),
        Err(fault) => Err(fault),
    }
}

/// Encodes `beq regA, regB, imm` with a byte offset relative to the next
/// instruction.
///
/// # Errors
///
/// Returns [`Fault::ImmediateOutOfRange`] unless `imm` is in `[-64, 63]`.
pub const fn beq(a: Reg, b: Reg, imm: i16) -> Result<u16, Fault> {
    match check_simm("beq", imm) {
        Ok(simm) => Ok(Instruction::Beq { a, b, simm }.encode()),
        Err(fault) => Err(fault),
    }
}

/// Encodes `jalr regA, regB` with a zero immediate.
#[must_use]
pub const fn jalr(a: Reg, b: Reg) -> u16 {
    Instruction::Jalr { a, b, simm: 0 }.encode()
}

/// Encodes the halt pseudo-instruction: `jalr R0, R0` with the halt bit
/// forced on.
#[must_use]
pub const fn hlt() -> u16 {
    jalr(Reg::R0, Reg::R0) | 1
}
