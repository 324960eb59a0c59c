#![no_main]

//! Fuzz target for the packed BCD timecode codec.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use timecode_core::{FrameRate, Timecode};

#[derive(Arbitrary, Debug)]
struct PackedInput {
    packed: u32,
    fps: u8,
}

fuzz_target!(|input: PackedInput| {
    let Ok(rate) = FrameRate::try_from(u32::from(input.fps.max(1))) else {
        return;
    };

    if let Ok(tc) = Timecode::from_packed(input.packed, rate) {
        // Valid BCD with in-range fields packs back to the same word
        let repacked = tc.to_packed().expect("unpacked timecode packs");
        assert_eq!(repacked, input.packed);
    }
});
