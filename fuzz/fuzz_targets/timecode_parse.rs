#![no_main]

//! Fuzz target for timecode text parsing.
//!
//! Feeds arbitrary text through every parser entry point. Whatever parses
//! must format and parse back to the same value.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use timecode_core::{FrameRate, Timecode};

/// Whole-number rates, where the canonical text is lossless.
const RATES: [u32; 7] = [10, 24, 25, 30, 48, 50, 60];

#[derive(Arbitrary, Debug)]
struct ParseInput {
    text: String,
    rate_index: u8,
}

fuzz_target!(|input: ParseInput| {
    // Limit input size
    if input.text.len() > 4 * 1024 {
        return;
    }

    let fps = RATES[input.rate_index as usize % RATES.len()];
    let Ok(rate) = FrameRate::try_from(fps) else {
        return;
    };

    // Should never panic
    let soft = timecode_core::soft_parse(&input.text, rate);
    assert_eq!(soft.frame_rate(), rate);
    let _ = timecode_core::parse_with_fractional_seconds(&input.text, rate);
    let _ = input.text.parse::<Timecode>();

    if let Ok(tc) = timecode_core::parse(&input.text, rate) {
        assert!(tc.hours() <= 99);
        assert!(tc.frames() < fps);

        let text = tc.to_string();
        let back = timecode_core::parse(&text, rate).expect("canonical text parses");
        assert_eq!(back, tc, "{:?} -> {}", input.text, text);
    }
});
