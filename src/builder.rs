//! Builder pattern API for configuring a read load.
//!
//! # Example
//!
//! ```rust,no_run
//! use scram_profile::builder::ReadLoader;
//! use scram_profile::format::ReadFormat;
//!
//! let (table, order) = ReadLoader::new()
//!     .format(ReadFormat::Fasta)
//!     .length_bounds(18, 32)?
//!     .min_count(2.0)?
//!     .load(&["rep1.fa", "rep2.fa", "rep3.fa"])?;
//!
//! println!("{} sequences across {} files", table.len(), order.len());
//! # Ok::<(), scram_profile::error::ScramError>(())
//! ```

use std::path::Path;

use crate::{
    aggregate::{AggregateTable, LoadOrder},
    config::LoadOptions,
    error::ScramError,
    format::{FastqLayout, ReadFormat},
    parser::LengthBounds,
    run::load_reads,
};

/// A builder for loading replicate read files.
///
/// Starts from [`LoadOptions::default`]. Setters that can be given invalid
/// values check them immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadLoader {
    options: LoadOptions,
}

impl ReadLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the input format. `ReadFormat::Auto` picks per file from the
    /// extension.
    #[must_use]
    pub const fn format(mut self, format: ReadFormat) -> Self {
        self.options.format = format;
        self
    }

    /// Sets the inclusive read length bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ScramError::InvalidLengthBounds`] if `min > max`.
    pub fn length_bounds(mut self, min: usize, max: usize) -> Result<Self, ScramError> {
        let bounds = LengthBounds::new(min, max)?;
        self.options.min_len = bounds.min();
        self.options.max_len = bounds.max();
        Ok(self)
    }

    /// Sets the minimum count a sequence needs in a file to be kept.
    ///
    /// Values above 1 also restrict the final table to sequences present in
    /// every file.
    ///
    /// # Errors
    ///
    /// Returns [`ScramError::InvalidMinCount`] for negative or non-finite
    /// values.
    pub fn min_count(mut self, min_count: f64) -> Result<Self, ScramError> {
        if !min_count.is_finite() || min_count < 0.0 {
            return Err(ScramError::InvalidMinCount { value: min_count });
        }
        self.options.min_count = min_count;
        Ok(self)
    }

    /// Turns RPMR normalization on or off.
    #[must_use]
    pub const fn normalize(mut self, normalize: bool) -> Self {
        self.options.normalize = normalize;
        self
    }

    /// Selects how FASTQ records are delimited.
    #[must_use]
    pub const fn fastq_layout(mut self, layout: FastqLayout) -> Self {
        self.options.fastq_layout = layout;
        self
    }

    /// The options the builder has collected.
    #[must_use]
    pub const fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Loads `paths` with the configured options.
    ///
    /// See [`load_reads`].
    pub fn load<P: AsRef<Path>>(
        &self,
        paths: &[P],
    ) -> Result<(AggregateTable, LoadOrder), ScramError> {
        load_reads(paths, &self.options)
    }
}

impl From<LoadOptions> for ReadLoader {
    fn from(options: LoadOptions) -> Self {
        Self { options }
    }
}
