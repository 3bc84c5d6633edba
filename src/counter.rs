//! Collapsing one file's reads into sequence counts.
//!
//! Counts are kept as `f64` because RPMR normalization produces fractional
//! values. The running total tracks retained reads only, so it is the
//! denominator used for normalization.

use std::{
    io::BufRead,
    path::{Path, PathBuf},
};

use bytes::Bytes;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{info, info_span};

use crate::{error::ScramError, parser::ReadLines};

/// Reads per million reads.
pub const RPMR_SCALE: f64 = 1_000_000.0;

/// Sequence to count map for a single file.
pub type SeqCounts = FxHashMap<Bytes, f64>;

/// Collapsed counts for one input file.
#[derive(Debug, Clone, Default)]
pub struct FileCounts {
    /// Path the counts were loaded from.
    pub path: PathBuf,
    /// Base name of `path`, used to label the file's column.
    pub name: String,
    /// Per-sequence counts, raw or RPMR-scaled.
    pub counts: SeqCounts,
    /// Number of reads retained after minimum-count filtering.
    pub total: f64,
}

impl FileCounts {
    /// Creates an empty count set for `path`.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            name: base_name(path),
            ..Self::default()
        }
    }

    /// Adds one observation of `read`.
    pub fn add(&mut self, read: Bytes) {
        *self.counts.entry(read).or_insert(0.0) += 1.0;
        self.total += 1.0;
    }

    /// Consumes every read from `reads`, stopping at the first error.
    pub fn extend_from<R: BufRead>(&mut self, reads: ReadLines<R>) -> Result<(), ScramError> {
        for read in reads {
            self.add(read?);
        }
        Ok(())
    }

    /// Drops sequences seen fewer than `min_count` times and removes their
    /// reads from the total. Thresholds of 1 or less keep everything.
    pub fn remove_below(&mut self, min_count: f64) {
        if min_count <= 1.0 {
            return;
        }
        let mut removed = 0.0;
        self.counts.retain(|_, count| {
            if *count < min_count {
                removed += *count;
                false
            } else {
                true
            }
        });
        self.total -= removed;
    }

    /// Rescales every count to reads per million retained reads.
    ///
    /// Fails with [`ScramError::ZeroTotalNormalization`] when no reads are
    /// retained.
    pub fn normalize_rpmr(&mut self) -> Result<(), ScramError> {
        if self.total <= 0.0 {
            return Err(ScramError::ZeroTotalNormalization {
                path: self.path.clone(),
            });
        }
        let total = self.total;
        self.counts
            .par_iter_mut()
            .for_each(|(_, count)| *count = RPMR_SCALE * *count / total);
        Ok(())
    }

    /// Sum of all counts currently held.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.counts.values().sum()
    }
}

/// Per-file processing settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountSettings {
    pub min_count: f64,
    pub normalize: bool,
}

/// Counts `reads`, then applies filtering and normalization, reporting the
/// retained total.
pub fn count_file<R: BufRead>(
    path: &Path,
    reads: ReadLines<R>,
    settings: CountSettings,
) -> Result<FileCounts, ScramError> {
    let _span = info_span!("count_file", path = %path.display()).entered();

    let mut counts = FileCounts::new(path);
    counts.extend_from(reads)?;
    counts.remove_below(settings.min_count);
    if settings.normalize {
        counts.normalize_rpmr()?;
    }

    info!(
        file = %path.display(),
        reads = counts.total,
        sequences = counts.counts.len(),
        "reads processed"
    );
    Ok(counts)
}

/// Final path component as a string, or the whole path if it has none.
pub(crate) fn base_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.to_string_lossy().into_owned(),
        |name| name.to_string_lossy().into_owned(),
    )
}
