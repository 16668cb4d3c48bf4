#![no_main]

use libfuzzer_sys::fuzz_target;
use risc16_core::{decode, validate_word_alignment, Machine, StepOutcome, INPUT_QUEUE_CAPACITY};

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let addr = u16::from_be_bytes([data[0], data[1]]);
    let _ = validate_word_alignment(addr);

    let mut words = Vec::with_capacity(data.len() / 2);
    for pair in data[2..].chunks_exact(2) {
        let word = u16::from_be_bytes([pair[0], pair[1]]);
        let _ = decode(word);
        words.push(word);
    }

    let mut machine = Machine::with_program(&words);
    for value in 0..u16::from(data[0] % 16) {
        let _ = machine.push_input(value);
    }

    for _ in 0..256 {
        match machine.step() {
            Ok(StepOutcome::Continued) => {}
            Ok(_) | Err(_) => break,
        }
        assert_eq!(machine.registers()[0], 0);
        assert!(machine.pending_inputs().len() <= INPUT_QUEUE_CAPACITY);
    }
});
