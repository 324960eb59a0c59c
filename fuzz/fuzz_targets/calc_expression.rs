#![no_main]

//! Fuzz target for timecode expression evaluation.
//!
//! Evaluation must fail cleanly on malformed or hostile input, including
//! deeply nested parentheses.

use libfuzzer_sys::fuzz_target;
use timecode_calc::{CalcConfig, Calculator};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let config = CalcConfig::default().with_max_depth(16).with_max_tokens(256);
    let Ok(calc) = Calculator::new(config) else {
        return;
    };

    // Should never panic
    if let Ok(value) = calc.evaluate(text) {
        let _ = value.to_string();
    }
});
