//! Async read loading using Tokio.
//!
//! Each file is parsed on Tokio's blocking thread pool and the results are
//! merged on the calling task as they complete, with the same column
//! assignment rules as [`load_reads`](crate::run::load_reads).
//!
//! # Feature Flag
//!
//! This module requires the `async` feature to be enabled:
//!
//! ```toml
//! [dependencies]
//! scram-profile = { version = "0.1", features = ["async"] }
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use scram_profile::{async_api::load_reads_async, config::LoadOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), scram_profile::error::ScramError> {
//!     let (table, order) = load_reads_async(&["rep1.fq", "rep2.fq"], &LoadOptions::default()).await?;
//!     println!("{} sequences in {:?}", table.len(), order.names());
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use tokio::{sync::mpsc, task};
use tracing::debug;

use crate::{
    aggregate::{AggregateTable, Aggregator, LoadOrder},
    builder::ReadLoader,
    config::LoadOptions,
    error::ScramError,
    pool::{load_file, LoadResult},
};

/// Async version of [`load_reads`](crate::run::load_reads).
///
/// # Errors
///
/// Same as [`load_reads`](crate::run::load_reads), plus
/// [`ScramError::WorkerPanicked`] if a blocking task panics.
pub async fn load_reads_async<P>(
    paths: &[P],
    options: &LoadOptions,
) -> Result<(AggregateTable, LoadOrder), ScramError>
where
    P: AsRef<Path>,
{
    let job = options.validate()?;
    let (tx, rx) = mpsc::unbounded_channel();
    debug!(files = paths.len(), "starting blocking load tasks");

    let handles: Vec<(PathBuf, task::JoinHandle<()>)> = paths
        .iter()
        .map(|p| {
            let path = p.as_ref().to_path_buf();
            let worker_path = path.clone();
            let tx = tx.clone();
            let handle = task::spawn_blocking(move || {
                let _ = tx.send(load_file(&worker_path, job));
            });
            (path, handle)
        })
        .collect();
    drop(tx);

    merge_tasks(rx, handles, options.min_count).await
}

/// Merges results as they arrive, then joins every task. A task that
/// panicked closes its sender without publishing.
async fn merge_tasks(
    mut rx: mpsc::UnboundedReceiver<LoadResult>,
    handles: Vec<(PathBuf, task::JoinHandle<()>)>,
    min_count: f64,
) -> Result<(AggregateTable, LoadOrder), ScramError> {
    let mut aggregator = Aggregator::new(handles.len());
    while let Some(result) = rx.recv().await {
        aggregator.push(&result?)?;
    }

    for (path, handle) in handles {
        if handle.await.is_err() {
            return Err(ScramError::WorkerPanicked { path });
        }
    }
    Ok(aggregator.finish(min_count))
}

impl ReadLoader {
    /// Async version of [`ReadLoader::load`].
    pub async fn load_async<P: AsRef<Path>>(
        &self,
        paths: &[P],
    ) -> Result<(AggregateTable, LoadOrder), ScramError> {
        load_reads_async(paths, self.options()).await
    }
}
