//! Reference FASTA loading.
//!
//! A single pass over the file collects each record's header (text after
//! `>`), its upper-cased sequence with line breaks removed, and the reverse
//! complement of that sequence.

use std::{io::BufRead, path::Path};

use tracing::{info, warn};

use crate::{
    error::ScramError,
    reader::{self, LineReader},
};

/// Written in place of any base outside `A`, `C`, `G`, `T`, `N` when
/// reverse complementing.
pub const UNKNOWN_BASE: u8 = b'?';

/// One reference sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReferenceRecord {
    pub header: String,
    pub sequence: String,
    pub reverse_complement: String,
}

/// All records of a reference file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReferenceSet {
    pub records: Vec<ReferenceRecord>,
    /// Combined length of every sequence line read, in nucleotides.
    pub total_length: usize,
}

impl ReferenceSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Reverse complements an upper-case DNA sequence.
///
/// Returns the complement along with the number of bytes that were not one
/// of `ACGTN` and were replaced by [`UNKNOWN_BASE`].
///
/// ```
/// use scram_profile::reference::reverse_complement;
///
/// assert_eq!(reverse_complement(b"AATTCCGG"), (b"CCGGAATT".to_vec(), 0));
/// assert_eq!(reverse_complement(b"ACRT"), (b"A?GT".to_vec(), 1));
/// ```
#[must_use]
pub fn reverse_complement(seq: &[u8]) -> (Vec<u8>, usize) {
    let mut unknown = 0;
    let rc = seq
        .iter()
        .rev()
        .map(|&base| {
            complement(base).unwrap_or_else(|| {
                unknown += 1;
                UNKNOWN_BASE
            })
        })
        .collect();
    (rc, unknown)
}

const fn complement(base: u8) -> Option<u8> {
    match base {
        b'A' => Some(b'T'),
        b'C' => Some(b'G'),
        b'G' => Some(b'C'),
        b'T' => Some(b'A'),
        b'N' => Some(b'N'),
        _ => None,
    }
}

/// Loads every record of the FASTA file at `path`.
///
/// Gzip input is decoded transparently, as for read files.
pub fn load_reference(path: &Path) -> Result<ReferenceSet, ScramError> {
    let lines = reader::open(path).map_err(into_reference_error)?;
    let set = read_lines(lines).map_err(into_reference_error)?;
    info!(
        records = set.len(),
        total_length = set.total_length,
        "loaded reference sequences"
    );
    Ok(set)
}

/// Loads reference records from an in-memory or already-open reader.
pub fn read_reference<R: BufRead>(reader: R) -> Result<ReferenceSet, ScramError> {
    read_lines(LineReader::new(reader, "<reader>")).map_err(into_reference_error)
}

#[derive(Default)]
struct Accumulator {
    header: String,
    sequence: Vec<u8>,
}

impl Accumulator {
    fn finalize(&mut self) -> ReferenceRecord {
        let header = std::mem::take(&mut self.header);
        let sequence = std::mem::take(&mut self.sequence);
        let (rc, unknown) = reverse_complement(&sequence);
        if unknown > 0 {
            warn!(
                header = %header,
                bases = unknown,
                "unrecognised bases in reference sequence, reverse complement uses '?'"
            );
        }
        ReferenceRecord {
            header,
            sequence: String::from_utf8_lossy(&sequence).into_owned(),
            reverse_complement: String::from_utf8_lossy(&rc).into_owned(),
        }
    }
}

fn read_lines<R: BufRead>(mut lines: LineReader<R>) -> Result<ReferenceSet, ScramError> {
    let mut set = ReferenceSet::default();
    let mut acc = Accumulator::default();
    // Anything before the first header belongs to no record.
    let mut in_record = false;

    while let Some(line) = lines.next_line()? {
        if let Some(header) = line.strip_prefix(b">") {
            if in_record {
                set.records.push(acc.finalize());
            } else {
                acc = Accumulator::default();
                in_record = true;
            }
            acc.header = String::from_utf8_lossy(header).into_owned();
        } else if !line.is_empty() {
            acc.sequence.extend(line.iter().map(u8::to_ascii_uppercase));
            set.total_length += line.len();
        }
    }
    if in_record {
        set.records.push(acc.finalize());
    }
    Ok(set)
}

fn into_reference_error(err: ScramError) -> ScramError {
    match err {
        ScramError::ReadFile { source, path }
        | ScramError::Decompress { source, path }
        | ScramError::LineRead { source, path } => ScramError::ReferenceRead { source, path },
        other => other,
    }
}
