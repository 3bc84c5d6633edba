//! Fuzz target for the read parser.
//!
//! Arbitrary bytes are parsed as FASTQ under both layouts. Every yielded
//! read must be within the length bounds and must never contain a newline.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scram_profile::{
    format::{FastqLayout, FASTQ_MARKER},
    parser::{LengthBounds, ReadLines},
    reader::LineReader,
};

fuzz_target!(|data: &[u8]| {
    let bounds = LengthBounds::new(2, 40).unwrap();

    for layout in [FastqLayout::MarkerOnly, FastqLayout::FourLine] {
        let lines = LineReader::new(data, "fuzz.fq");
        for read in ReadLines::new(lines, FASTQ_MARKER, bounds, layout) {
            let read = read.unwrap();
            assert!(bounds.contains(read.len()));
            assert!(!read.contains(&b'\n'));
        }
    }
});
