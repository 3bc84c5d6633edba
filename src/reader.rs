//! Opening read and reference files as line streams.
//!
//! Files are read as raw bytes. A path whose last two bytes are `gz` is
//! wrapped in a multi-member gzip decoder; anything else is read as is.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use flate2::read::MultiGzDecoder;

use crate::error::ScramError;

/// Boxed line source shared by the read and reference loaders.
pub type DynBufRead = Box<dyn BufRead + Send>;

/// Check if a path names a gzip file: its last two bytes are `gz`.
#[must_use]
pub fn is_gzip_path(path: &Path) -> bool {
    path.as_os_str().as_encoded_bytes().ends_with(b"gz")
}

/// Opens `path`, transparently decompressing it when [`is_gzip_path`] holds.
///
/// Errors from [`File::open`] are reported as [`ScramError::ReadFile`].
pub fn open(path: &Path) -> Result<LineReader<DynBufRead>, ScramError> {
    let file = File::open(path).map_err(|source| ScramError::ReadFile {
        source,
        path: path.to_path_buf(),
    })?;

    let compressed = is_gzip_path(path);
    let inner: DynBufRead = if compressed {
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    Ok(LineReader {
        inner,
        path: path.to_path_buf(),
        compressed,
        buf: Vec::new(),
    })
}

/// Splits a byte stream into lines with the `\n` (and any `\r` before it)
/// removed.
pub struct LineReader<R> {
    inner: R,
    path: PathBuf,
    compressed: bool,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    /// Wraps an already-open, uncompressed reader. `path` is only used in
    /// error messages.
    pub fn new(inner: R, path: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            path: path.into(),
            compressed: false,
            buf: Vec::new(),
        }
    }

    /// The path this reader was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the next line, returning `None` at end of stream.
    pub fn next_line(&mut self) -> Result<Option<&[u8]>, ScramError> {
        self.buf.clear();
        let n = self
            .inner
            .read_until(b'\n', &mut self.buf)
            .map_err(|source| self.io_error(source))?;
        if n == 0 {
            return Ok(None);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }
        Ok(Some(&self.buf))
    }

    fn io_error(&self, source: io::Error) -> ScramError {
        let path = self.path.clone();
        if self.compressed {
            ScramError::Decompress { source, path }
        } else {
            ScramError::LineRead { source, path }
        }
    }
}
