//! Streaming extraction of read sequences from FASTA/FASTQ lines.
//!
//! Lines are classified by a single marker byte. A line starting with the
//! marker opens a record; the next line whose length falls within the
//! configured bounds is taken as that record's read. Nothing else about the
//! record is inspected: no alphabet check, no quality check.

use std::io::BufRead;

use bytes::Bytes;

use crate::{error::ScramError, format::FastqLayout, reader::LineReader};

/// Inclusive read length bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    min: usize,
    max: usize,
}

impl LengthBounds {
    /// Creates bounds covering `min..=max`.
    pub fn new(min: usize, max: usize) -> Result<Self, ScramError> {
        if min > max {
            return Err(ScramError::InvalidLengthBounds { min, max });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub const fn min(self) -> usize {
        self.min
    }

    #[must_use]
    pub const fn max(self) -> usize {
        self.max
    }

    #[must_use]
    pub const fn contains(self, len: usize) -> bool {
        len >= self.min && len <= self.max
    }
}

impl Default for LengthBounds {
    fn default() -> Self {
        Self { min: 18, max: 32 }
    }
}

/// Where the parser is within the current record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineState {
    /// Waiting for a marker line.
    Idle,
    /// A marker line was seen; the next in-bounds line is a read.
    ExpectSequence,
    /// Four-line FASTQ: skipping the `+` and quality lines.
    Skip(u8),
}

/// Iterator over the qualifying reads of one file.
///
/// Created by [`ReadLines::new`]. The iterator is single-pass and stops for
/// good after yielding an error.
pub struct ReadLines<R> {
    lines: LineReader<R>,
    classifier: Classifier,
    done: bool,
}

/// Line classification state, kept apart from the reader so a borrowed line
/// can be inspected before it is copied.
#[derive(Debug, Clone, Copy)]
struct Classifier {
    marker: u8,
    bounds: LengthBounds,
    layout: FastqLayout,
    state: LineState,
}

impl<R: BufRead> ReadLines<R> {
    /// Creates a parser over `lines`.
    ///
    /// `layout` is honored only when `marker` is the FASTQ marker; pass
    /// [`FastqLayout::MarkerOnly`] for FASTA.
    pub fn new(
        lines: LineReader<R>,
        marker: u8,
        bounds: LengthBounds,
        layout: FastqLayout,
    ) -> Self {
        Self {
            lines,
            classifier: Classifier {
                marker,
                bounds,
                layout,
                state: LineState::Idle,
            },
            done: false,
        }
    }
}

impl Classifier {
    /// Returns `true` if `line` is a read to emit.
    fn classify(&mut self, line: &[u8]) -> bool {
        match self.layout {
            FastqLayout::MarkerOnly => self.classify_marker(line),
            FastqLayout::FourLine => self.classify_four_line(line),
        }
    }

    fn classify_marker(&mut self, line: &[u8]) -> bool {
        if line.first() == Some(&self.marker) {
            self.state = LineState::ExpectSequence;
            false
        } else if self.state == LineState::ExpectSequence && self.bounds.contains(line.len()) {
            self.state = LineState::Idle;
            true
        } else {
            false
        }
    }

    fn classify_four_line(&mut self, line: &[u8]) -> bool {
        match self.state {
            LineState::Idle => {
                if line.first() == Some(&self.marker) {
                    self.state = LineState::ExpectSequence;
                }
                false
            }
            LineState::ExpectSequence => {
                self.state = LineState::Skip(2);
                self.bounds.contains(line.len())
            }
            LineState::Skip(n) => {
                self.state = if n > 1 {
                    LineState::Skip(n - 1)
                } else {
                    LineState::Idle
                };
                false
            }
        }
    }
}

impl<R: BufRead> Iterator for ReadLines<R> {
    type Item = Result<Bytes, ScramError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.lines.next_line() {
                Ok(Some(line)) => {
                    if self.classifier.classify(line) {
                        return Some(Ok(Bytes::copy_from_slice(line)));
                    }
                }
                Ok(None) => {
                    self.done = true;
                    return None;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
