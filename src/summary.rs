//! Run summary printed by the command line tool.

use std::fmt;

use num_format::{Locale, ToFormattedString};
use serde::Serialize;

use crate::{
    aggregate::{AggregateTable, LoadOrder},
    config::LoadOptions,
    error::ScramError,
    reference::ReferenceSet,
};

/// Per-file line of the summary, in column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSummary {
    pub column: usize,
    pub name: String,
    pub retained_reads: u64,
}

/// What was loaded, without the data itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadSummary {
    pub options: LoadOptions,
    pub files: Vec<FileSummary>,
    pub distinct_sequences: usize,
    pub reference_records: usize,
    pub reference_length: usize,
}

impl LoadSummary {
    #[must_use]
    pub fn new(
        options: LoadOptions,
        table: &AggregateTable,
        order: &LoadOrder,
        reference: &ReferenceSet,
    ) -> Self {
        let files = order
            .names()
            .iter()
            .zip(order.totals())
            .enumerate()
            .map(|(column, (name, &retained_reads))| FileSummary {
                column,
                name: name.clone(),
                retained_reads: whole_reads(retained_reads),
            })
            .collect();
        Self {
            options,
            files,
            distinct_sequences: table.len(),
            reference_records: reference.len(),
            reference_length: reference.total_length,
        }
    }

    pub fn to_json(&self) -> Result<String, ScramError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "No. of reference sequences: {}", self.reference_records)?;
        writeln!(
            f,
            "Combined length of reference sequences: {} nt",
            self.reference_length.to_formatted_string(&Locale::en)
        )?;
        for file in &self.files {
            writeln!(
                f,
                "[{}] {} - {} reads processed",
                file.column,
                file.name,
                file.retained_reads.to_formatted_string(&Locale::en)
            )?;
        }
        write!(
            f,
            "Distinct read sequences: {}",
            self.distinct_sequences.to_formatted_string(&Locale::en)
        )
    }
}

/// Retained totals are whole read counts held as `f64`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_reads(total: f64) -> u64 {
    total.max(0.0).round() as u64
}
