//! Property coverage: encode/decode round-trips, decode totality, and
//! machine invariants over arbitrary programs.

use proptest::prelude::*;
use risc16_core::{
    add, addi, beq, decode, field, jalr, lui, lw, nand, sign_extend, sw, Fault, Instruction,
    Machine, Reg, StepOutcome, INPUT_QUEUE_CAPACITY, SIMM_MAX, SIMM_MIN,
};

use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

fn any_reg() -> impl Strategy<Value = Reg> {
    (0u8..8).prop_map(|bits| Reg::from_u3(bits).expect("3-bit register encoding"))
}

fn any_simm() -> impl Strategy<Value = i16> {
    SIMM_MIN..=SIMM_MAX
}

proptest! {
    #[test]
    fn register_register_words_roundtrip(
        a in any_reg(),
        b in any_reg(),
        c in any_reg(),
        pick_nand in any::<bool>(),
    ) {
        let word = if pick_nand { nand(a, b, c) } else { add(a, b, c) };
        let instr = decode(word).expect("constructed word decodes");
        match instr {
            Instruction::Add { a: ra, b: rb, c: rc }
            | Instruction::Nand { a: ra, b: rb, c: rc } => {
                prop_assert_eq!((ra, rb, rc), (a, b, c));
            }
            other => prop_assert!(false, "unexpected instruction {:?}", other),
        }
        prop_assert_eq!(instr.encode(), word);
    }

    #[test]
    fn register_immediate_words_roundtrip(
        a in any_reg(),
        b in any_reg(),
        imm in any_simm(),
        opcode in 0u8..4,
    ) {
        let word = match opcode {
            0 => addi(a, b, imm),
            1 => sw(a, b, imm),
            2 => lw(a, b, imm),
            _ => beq(a, b, imm),
        }
        .expect("immediate in range");

        let instr = decode(word).expect("constructed word decodes");
        match instr {
            Instruction::Addi { a: ra, b: rb, simm }
            | Instruction::Sw { a: ra, b: rb, simm }
            | Instruction::Lw { a: ra, b: rb, simm }
            | Instruction::Beq { a: ra, b: rb, simm } => {
                prop_assert_eq!((ra, rb, simm), (a, b, imm));
            }
            other => prop_assert!(false, "unexpected instruction {:?}", other),
        }
        prop_assert_eq!(instr.encode(), word);
    }

    #[test]
    fn lui_words_roundtrip_with_the_corrected_encoder(
        a in any_reg(),
        imm in 0u16..=0x03FF,
    ) {
        let word = lui(a, imm).expect("immediate in range");
        let instr = decode(word).expect("constructed word decodes");
        prop_assert_eq!(instr, Instruction::Lui { a, imm });
        prop_assert_eq!(instr.encode(), word);
    }

    #[test]
    fn jalr_words_roundtrip(a in any_reg(), b in any_reg()) {
        let word = jalr(a, b);
        let instr = decode(word).expect("constructed word decodes");
        prop_assert_eq!(instr, Instruction::Jalr { a, b, simm: 0 });
        prop_assert!(!instr.is_halt());
        prop_assert_eq!(instr.encode(), word);
    }

    #[test]
    fn decode_is_total_outside_malformed_register_register_words(word in any::<u16>()) {
        let opcode = field(word, 13, 3);
        let reserved = field(word, 3, 4);
        match decode(word) {
            Ok(instr) => prop_assert_eq!(instr.encode(), word),
            Err(Fault::MalformedInstruction { word: raw }) => {
                prop_assert_eq!(raw, word);
                prop_assert!(opcode & 0b101 == 0 && reserved != 0);
            }
            Err(other) => prop_assert!(false, "unexpected fault {:?}", other),
        }
    }

    #[test]
    fn sign_extension_matches_twos_complement(value in 0u16..0x80) {
        // interpret the low 7 bits as a signed value by hand
        let reference = if value & 0x40 == 0 {
            i32::from(value)
        } else {
            i32::from(value) - 128
        };
        prop_assert_eq!(i32::from(sign_extend(value, 6) as i16), reference);
    }

    #[test]
    fn arbitrary_programs_never_break_machine_invariants(
        program in prop::collection::vec(any::<u16>(), 1..32),
        inputs in prop::collection::vec(any::<u16>(), 0..4),
    ) {
        let mut machine = Machine::with_program(&program);
        for value in inputs {
            let _ = machine.push_input(value);
        }

        for _ in 0..64 {
            match machine.step() {
                Ok(StepOutcome::Continued) => {}
                _ => break,
            }
        }

        prop_assert_eq!(machine.registers()[0], 0);
        prop_assert!(machine.pending_inputs().len() <= INPUT_QUEUE_CAPACITY);
    }
}
