//! Fuzz target for reference FASTA loading.
//!
//! For ASCII input, each record's reverse complement has the length of its
//! sequence and the combined length covers every record.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scram_profile::reference::read_reference;

fuzz_target!(|data: &[u8]| {
    if !data.is_ascii() {
        return;
    }
    let set = read_reference(data).unwrap();

    let mut record_bases = 0;
    for record in &set.records {
        assert_eq!(record.sequence.len(), record.reverse_complement.len());
        assert!(record.reverse_complement.bytes().all(|b| b"ACGTN?".contains(&b)));
        record_bases += record.sequence.len();
    }
    assert!(record_bases <= set.total_length);
});
