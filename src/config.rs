use serde::Serialize;

use crate::{
    counter::CountSettings,
    error::ScramError,
    format::{FastqLayout, ReadFormat},
    parser::LengthBounds,
    pool::FileJob,
};

/// Settings for loading a set of replicate read files.
///
/// Defaults follow the command line: FASTQ input, reads of 18-32 nt, no
/// minimum count, RPMR normalization on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoadOptions {
    pub format: ReadFormat,
    pub min_len: usize,
    pub max_len: usize,
    pub min_count: f64,
    pub normalize: bool,
    pub fastq_layout: FastqLayout,
}

impl Default for LoadOptions {
    fn default() -> Self {
        let bounds = LengthBounds::default();
        Self {
            format: ReadFormat::Fastq,
            min_len: bounds.min(),
            max_len: bounds.max(),
            min_count: 1.0,
            normalize: true,
            fastq_layout: FastqLayout::MarkerOnly,
        }
    }
}

impl LoadOptions {
    /// Checks the options and converts them into the per-file job.
    pub fn validate(&self) -> Result<FileJob, ScramError> {
        let bounds = LengthBounds::new(self.min_len, self.max_len)?;
        if !self.min_count.is_finite() || self.min_count < 0.0 {
            return Err(ScramError::InvalidMinCount {
                value: self.min_count,
            });
        }
        Ok(FileJob {
            format: self.format,
            bounds,
            layout: self.fastq_layout,
            settings: CountSettings {
                min_count: self.min_count,
                normalize: self.normalize,
            },
        })
    }
}
