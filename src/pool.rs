//! One loader thread per input file.
//!
//! Every worker owns its [`FileCounts`] until it sends it. Results arrive on
//! a shared channel in completion order, which need not match the order the
//! files were given in.

use std::{
    path::{Path, PathBuf},
    thread::{self, JoinHandle},
};

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::debug;

use crate::{
    counter::{count_file, CountSettings, FileCounts},
    error::ScramError,
    format::{FastqLayout, ReadFormat},
    parser::{LengthBounds, ReadLines},
    reader,
};

/// Everything a worker needs to load one file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FileJob {
    pub format: ReadFormat,
    pub bounds: LengthBounds,
    pub layout: FastqLayout,
    pub settings: CountSettings,
}

/// Result published by a worker.
pub type LoadResult = Result<FileCounts, ScramError>;

/// Opens, parses and counts a single file on the current thread.
pub fn load_file(path: &Path, job: FileJob) -> LoadResult {
    let format = job.format.resolve(path);
    let layout = if format.is_fastq() {
        job.layout
    } else {
        FastqLayout::MarkerOnly
    };
    let lines = reader::open(path)?;
    let reads = ReadLines::new(lines, format.marker(), job.bounds, layout);
    count_file(path, reads, job.settings)
}

/// Running set of per-file workers.
pub struct LoadPool {
    rx: Receiver<LoadResult>,
    handles: Vec<(PathBuf, JoinHandle<()>)>,
}

impl LoadPool {
    /// Starts one worker per path.
    ///
    /// A thread that cannot be spawned is reported through the channel as
    /// [`ScramError::WorkerSpawn`], so the caller still receives exactly one
    /// result per file.
    pub fn spawn(paths: &[PathBuf], job: FileJob) -> Self {
        let (tx, rx) = unbounded();
        debug!(files = paths.len(), "starting file load workers");

        let handles = paths
            .iter()
            .enumerate()
            .filter_map(|(i, path)| {
                spawn_worker(i, path, job, &tx).map(|handle| (path.clone(), handle))
            })
            .collect();

        // Dropping the last sender closes the channel once all workers finish.
        drop(tx);
        Self { rx, handles }
    }

    /// Number of workers started.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Completion-ordered stream of worker results.
    ///
    /// A worker that panics drops its sender without publishing; the pool
    /// then yields a [`ScramError::WorkerPanicked`] for it once the channel
    /// closes, so every file is accounted for exactly once.
    pub fn results(self) -> Results {
        Results {
            rx: self.rx,
            handles: self.handles,
        }
    }
}

fn spawn_worker(
    index: usize,
    path: &Path,
    job: FileJob,
    tx: &Sender<LoadResult>,
) -> Option<JoinHandle<()>> {
    let owned = path.to_path_buf();
    let worker_tx = tx.clone();
    let spawned = thread::Builder::new()
        .name(format!("load-{index}"))
        .spawn(move || {
            let result = load_file(&owned, job);
            // The receiver is gone only when the caller already failed fast.
            let _ = worker_tx.send(result);
        });
    match spawned {
        Ok(handle) => Some(handle),
        Err(source) => {
            let _ = tx.send(Err(ScramError::WorkerSpawn {
                source,
                path: path.to_path_buf(),
            }));
            None
        }
    }
}

/// Iterator over the results of a [`LoadPool`].
pub struct Results {
    rx: Receiver<LoadResult>,
    handles: Vec<(PathBuf, JoinHandle<()>)>,
}

impl Iterator for Results {
    type Item = LoadResult;

    fn next(&mut self) -> Option<Self::Item> {
        if let Ok(result) = self.rx.recv() {
            return Some(result);
        }
        // Channel closed, so every worker has finished. Those that panicked
        // never sent anything.
        while let Some((path, handle)) = self.handles.pop() {
            if handle.join().is_err() {
                return Some(Err(ScramError::WorkerPanicked { path }));
            }
        }
        None
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn job() -> FileJob {
        FileJob {
            format: ReadFormat::Fasta,
            bounds: LengthBounds::new(1, 10).unwrap(),
            layout: FastqLayout::MarkerOnly,
            settings: CountSettings {
                min_count: 1.0,
                normalize: false,
            },
        }
    }

    fn temp_fasta(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn one_result_per_file() {
        let files: Vec<_> = (0..5).map(|_| temp_fasta(">r\nACGT\n")).collect();
        let paths: Vec<PathBuf> = files.iter().map(|f| f.path().to_path_buf()).collect();

        let pool = LoadPool::spawn(&paths, job());
        assert_eq!(pool.len(), 5);

        let mut seen: Vec<PathBuf> = pool.results().map(|r| r.unwrap().path).collect();
        seen.sort();
        let mut expected = paths.clone();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn empty_file_list() {
        let pool = LoadPool::spawn(&[], job());
        assert!(pool.is_empty());
        assert_eq!(pool.results().count(), 0);
    }

    #[test]
    fn missing_file_is_reported() {
        let good = temp_fasta(">r\nACGT\n");
        let paths = vec![good.path().to_path_buf(), PathBuf::from("/no/such/reads.fa")];
        let errors: Vec<_> = LoadPool::spawn(&paths, job())
            .results()
            .filter_map(Result::err)
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ScramError::ReadFile { .. }));
    }

    #[test]
    fn auto_format_resolves_per_file() {
        let mut fq = tempfile::Builder::new().suffix(".fq").tempfile().unwrap();
        fq.write_all(b"@r\nACGT\n+\nIIII\n").unwrap();
        fq.flush().unwrap();
        let counts = load_file(
            fq.path(),
            FileJob {
                format: ReadFormat::Auto,
                ..job()
            },
        )
        .unwrap();
        assert_eq!(counts.counts.get(b"ACGT".as_slice()), Some(&1.0));
        assert_eq!(counts.total, 1.0);
    }

    #[test]
    fn panicked_worker_yields_one_error() {
        let (tx, rx) = unbounded::<LoadResult>();
        let handle = thread::spawn(move || {
            let _tx = tx;
            panic!("worker failed");
        });
        let results = Results {
            rx,
            handles: vec![(PathBuf::from("x.fa"), handle)],
        };

        let errors: Vec<String> = results.map(|r| r.unwrap_err().to_string()).collect();
        assert_eq!(errors, ["worker loading 'x.fa' panicked"]);
    }

    #[test]
    fn panicked_worker_alongside_finished_ones() {
        let good = temp_fasta(">r\nACGT\n");
        let (tx, rx) = unbounded::<LoadResult>();
        let worker_tx = tx.clone();
        let path = good.path().to_path_buf();
        let ok = thread::spawn(move || {
            let _ = worker_tx.send(load_file(&path, job()));
        });
        let bad = thread::spawn(move || {
            let _tx = tx;
            panic!("worker failed");
        });
        let results = Results {
            rx,
            handles: vec![
                (good.path().to_path_buf(), ok),
                (PathBuf::from("bad.fa"), bad),
            ],
        };

        let (ok, err): (Vec<_>, Vec<_>) = results.partition(Result::is_ok);
        assert_eq!(ok.len(), 1);
        assert_eq!(err.len(), 1);
        assert!(matches!(err[0], Err(ScramError::WorkerPanicked { .. })));
    }
}
