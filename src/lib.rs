//! # scram-profile
//!
//! Loading of replicate small RNA read files and reference sequences.
//!
//! Read files (FASTA or FASTQ, optionally gzipped) are parsed concurrently,
//! one thread per file. Identical reads are collapsed into counts, which can
//! be filtered by a minimum abundance and normalized to reads per million.
//! The per-file counts are merged into an [`AggregateTable`] with one column
//! per file; the accompanying [`LoadOrder`] says which file is in which
//! column.
//!
//! Reference FASTA files load into [`ReferenceRecord`]s carrying the
//! upper-cased sequence and its reverse complement.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scram_profile::{builder::ReadLoader, format::ReadFormat, reference::load_reference};
//! use std::path::Path;
//!
//! let (table, order) = ReadLoader::new()
//!     .format(ReadFormat::Fastq)
//!     .length_bounds(18, 32)?
//!     .load(&["rep1.fq.gz", "rep2.fq.gz"])?;
//!
//! if let Some(counts) = table.get(b"TCGGACCAGGCTTCATTCCCC") {
//!     for (name, rpmr) in order.names().iter().zip(counts) {
//!         println!("{name}\t{rpmr:.2}");
//!     }
//! }
//!
//! let reference = load_reference(Path::new("mirnas.fa"))?;
//! println!("{} reference sequences", reference.len());
//! # Ok::<(), scram_profile::error::ScramError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `async`: [`async_api::load_reads_async`] on Tokio's blocking pool

pub mod aggregate;
#[cfg(feature = "async")]
pub mod async_api;
pub mod builder;
pub mod cli;
pub mod config;
pub mod counter;
pub mod error;
pub mod format;
pub mod parser;
pub mod pool;
pub mod reader;
pub mod reference;
pub mod run;
pub mod summary;

pub use aggregate::{AggregateTable, LoadOrder};
pub use error::ScramError;
pub use reference::{ReferenceRecord, ReferenceSet};
