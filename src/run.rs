//! Loading replicate read files into one aggregate table.

use std::path::{Path, PathBuf};

use tracing::info_span;

use crate::{
    aggregate::{AggregateTable, Aggregator, LoadOrder},
    config::LoadOptions,
    error::ScramError,
    pool::LoadPool,
};

/// Loads every file in `paths` concurrently and merges the counts.
///
/// Each file is parsed on its own thread. Columns of the returned table are
/// assigned in the order files finish loading, and the returned
/// [`LoadOrder`] names the file behind each column. The first failure aborts
/// the whole load.
///
/// # Errors
///
/// Returns an error if the options are invalid, any file cannot be opened or
/// decompressed, or normalization is requested for a file with no retained
/// reads.
///
/// # Example
///
/// ```rust,no_run
/// use scram_profile::{config::LoadOptions, run::load_reads};
///
/// let (table, order) = load_reads(&["rep1.fq.gz", "rep2.fq.gz"], &LoadOptions::default())?;
/// for (i, name) in order.names().iter().enumerate() {
///     println!("{name}: {}", table.column_sum(i));
/// }
/// # Ok::<(), scram_profile::error::ScramError>(())
/// ```
pub fn load_reads<P>(
    paths: &[P],
    options: &LoadOptions,
) -> Result<(AggregateTable, LoadOrder), ScramError>
where
    P: AsRef<Path>,
{
    let job = options.validate()?;
    let paths: Vec<PathBuf> = paths.iter().map(|p| p.as_ref().to_path_buf()).collect();

    let _span = info_span!("load_reads", files = paths.len(), format = %options.format).entered();

    let pool = LoadPool::spawn(&paths, job);
    let mut aggregator = Aggregator::new(paths.len());
    aggregator.extend(pool.results())?;
    Ok(aggregator.finish(options.min_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ReadFormat;

    #[test]
    fn no_files_gives_empty_table() {
        let paths: [&str; 0] = [];
        let (table, order) = load_reads(&paths, &LoadOptions::default()).unwrap();
        assert!(table.is_empty());
        assert!(order.is_empty());
    }

    #[test]
    fn invalid_options_fail_before_loading() {
        let opts = LoadOptions {
            format: ReadFormat::Fasta,
            min_len: 10,
            max_len: 5,
            ..LoadOptions::default()
        };
        let err = load_reads(&["/no/such/file.fa"], &opts).unwrap_err();
        assert!(matches!(err, ScramError::InvalidLengthBounds { .. }));
    }
}
