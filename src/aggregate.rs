//! Merging per-file counts into one sequence-by-file table.
//!
//! Columns are handed out in arrival order. The same arrival event that
//! assigns a file its column also appends the file's name to the
//! [`LoadOrder`], so `load_order.names()[i]` always labels column `i`.
//!
//! Rows live in a single flat arena of `f64` with one slot per file; the
//! sequence index maps a sequence to its row number.

use bytes::Bytes;
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::debug;

use crate::{counter::FileCounts, error::ScramError};

/// Sequence by file count table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateTable {
    columns: usize,
    rows: FxHashMap<Bytes, usize>,
    keys: Vec<Bytes>,
    arena: Vec<f64>,
}

impl AggregateTable {
    /// Creates an empty table with one column per input file.
    #[must_use]
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    /// Number of columns (input files).
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Number of distinct sequences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Count vector for `seq`, one entry per column.
    #[must_use]
    pub fn get(&self, seq: &[u8]) -> Option<&[f64]> {
        self.rows.get(seq).map(|&row| self.row(row))
    }

    #[must_use]
    pub fn contains(&self, seq: &[u8]) -> bool {
        self.rows.contains_key(seq)
    }

    /// Iterates over `(sequence, counts)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&Bytes, &[f64])> + '_ {
        self.keys
            .iter()
            .enumerate()
            .map(move |(row, key)| (key, self.row(row)))
    }

    /// Sum of one column.
    #[must_use]
    pub fn column_sum(&self, column: usize) -> f64 {
        self.iter().map(|(_, counts)| counts[column]).sum()
    }

    /// Converts into a plain map, copying each row out of the arena.
    #[must_use]
    pub fn into_map(self) -> FxHashMap<Bytes, Vec<f64>> {
        let columns = self.columns;
        self.keys
            .into_iter()
            .zip(self.arena.chunks_exact(columns.max(1)))
            .map(|(key, counts)| (key, counts.to_vec()))
            .collect()
    }

    fn row(&self, row: usize) -> &[f64] {
        let start = row * self.columns;
        &self.arena[start..start + self.columns]
    }

    /// Writes `count` into `column` of `seq`'s row, allocating an all-zero
    /// row on first sight.
    fn set(&mut self, seq: &Bytes, column: usize, count: f64) {
        let row = match self.rows.get(seq.as_ref()) {
            Some(&row) => row,
            None => {
                let row = self.keys.len();
                self.rows.insert(seq.clone(), row);
                self.keys.push(seq.clone());
                self.arena.resize(self.arena.len() + self.columns, 0.0);
                row
            }
        };
        self.arena[row * self.columns + column] = count;
    }

    /// Drops every sequence that has a zero in any column, compacting the
    /// arena in place.
    pub fn retain_complete(&mut self) {
        let columns = self.columns;
        let mut write = 0;
        for read in 0..self.keys.len() {
            let start = read * columns;
            if self.arena[start..start + columns].contains(&0.0) {
                continue;
            }
            if write != read {
                self.arena.copy_within(start..start + columns, write * columns);
                self.keys.swap(write, read);
            }
            write += 1;
        }
        self.keys.truncate(write);
        self.arena.truncate(write * columns);
        self.rows = self
            .keys
            .iter()
            .enumerate()
            .map(|(row, key)| (key.clone(), row))
            .collect();
    }
}

/// File base names in column order, with each file's retained read total.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadOrder {
    names: Vec<String>,
    totals: Vec<f64>,
}

impl LoadOrder {
    /// `names()[i]` is the file occupying column `i`.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Retained read totals, aligned with [`names`](Self::names).
    #[must_use]
    pub fn totals(&self) -> &[f64] {
        &self.totals
    }

    /// Column index of the file named `name`.
    #[must_use]
    pub fn column_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Sole owner of the table while results arrive.
#[derive(Debug)]
pub struct Aggregator {
    table: AggregateTable,
    order: LoadOrder,
}

impl Aggregator {
    /// Creates an aggregator expecting `files` results.
    #[must_use]
    pub fn new(files: usize) -> Self {
        Self {
            table: AggregateTable::new(files),
            order: LoadOrder::default(),
        }
    }

    /// Merges one file's counts into the next free column and returns that
    /// column.
    ///
    /// Fails with [`ScramError::UnexpectedResult`] once every column is
    /// taken, leaving the table untouched.
    pub fn push(&mut self, file: &FileCounts) -> Result<usize, ScramError> {
        let column = self.order.names.len();
        if column >= self.table.columns {
            return Err(ScramError::UnexpectedResult {
                path: file.path.clone(),
                columns: self.table.columns,
            });
        }
        self.order.names.push(file.name.clone());
        self.order.totals.push(file.total);
        for (seq, &count) in &file.counts {
            self.table.set(seq, column, count);
        }
        debug!(file = %file.name, column, "merged file counts");
        Ok(column)
    }

    /// Drains `results`, failing on the first error.
    pub fn extend<I>(&mut self, results: I) -> Result<(), ScramError>
    where
        I: IntoIterator<Item = Result<FileCounts, ScramError>>,
    {
        for result in results {
            self.push(&result?)?;
        }
        Ok(())
    }

    /// Finishes the merge. With `min_count > 1` only sequences present in
    /// every file are kept.
    #[must_use]
    pub fn finish(mut self, min_count: f64) -> (AggregateTable, LoadOrder) {
        if min_count > 1.0 {
            self.table.retain_complete();
        }
        (self.table, self.order)
    }
}
