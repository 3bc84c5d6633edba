//! Read file format selection.
//!
//! The format decides which byte marks the start of a record: `>` for FASTA
//! and `@` for FASTQ. `Auto` picks one per file from its extension.

use clap::ValueEnum;
use serde::Serialize;
use std::path::Path;

/// Record-start marker for FASTA files.
pub const FASTA_MARKER: u8 = b'>';

/// Record-start marker for FASTQ files.
pub const FASTQ_MARKER: u8 = b'@';

/// Input read file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadFormat {
    /// Auto-detect format from file extension.
    ///
    /// - `.fq`, `.fastq`, `.fq.gz`, `.fastq.gz` -> FASTQ
    /// - anything else -> FASTA
    Auto,
    /// FASTA format (`>` headers).
    Fasta,
    /// FASTQ format (`@` headers).
    #[default]
    Fastq,
}

impl ReadFormat {
    /// Detects the format from a file path's extension, looking through a
    /// trailing `.gz`.
    ///
    /// ```
    /// use scram_profile::format::ReadFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(ReadFormat::from_extension(Path::new("rep1.fq.gz")), ReadFormat::Fastq);
    /// assert_eq!(ReadFormat::from_extension(Path::new("rep1.fa")), ReadFormat::Fasta);
    /// ```
    #[must_use]
    pub fn from_extension(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        let name = name.strip_suffix(".gz").unwrap_or(&name);
        if name.ends_with(".fq") || name.ends_with(".fastq") {
            Self::Fastq
        } else {
            Self::Fasta
        }
    }

    /// Resolves `Auto` against a path; explicit formats are returned unchanged.
    #[must_use]
    pub fn resolve(self, path: &Path) -> Self {
        match self {
            Self::Auto => Self::from_extension(path),
            other => other,
        }
    }

    /// Record-start marker byte for a resolved format.
    ///
    /// `Auto` has no marker of its own and falls back to FASTA's; call
    /// [`resolve`](Self::resolve) first.
    #[must_use]
    pub const fn marker(self) -> u8 {
        match self {
            Self::Fastq => FASTQ_MARKER,
            Self::Fasta | Self::Auto => FASTA_MARKER,
        }
    }

    /// Returns `true` if this format is FASTQ.
    #[must_use]
    pub const fn is_fastq(self) -> bool {
        matches!(self, Self::Fastq)
    }
}

impl std::fmt::Display for ReadFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Fasta => write!(f, "fasta"),
            Self::Fastq => write!(f, "fastq"),
        }
    }
}

/// How FASTQ records are delimited.
///
/// `MarkerOnly` treats FASTQ exactly like FASTA: any line starting with `@`
/// opens a record and the next in-bounds line is its read. A quality line that
/// happens to begin with `@` is misread as a header under this layout.
/// `FourLine` tracks the header/sequence/plus/quality cycle instead and only
/// ever takes the line right after a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FastqLayout {
    #[default]
    MarkerOnly,
    FourLine,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_extension_fastq() {
        for name in ["r.fq", "r.fastq", "r.fq.gz", "r.FASTQ.gz"] {
            assert_eq!(
                ReadFormat::from_extension(Path::new(name)),
                ReadFormat::Fastq,
                "{name}"
            );
        }
    }

    #[test]
    fn from_extension_unknown_defaults_to_fasta() {
        for name in ["r.fa", "r.fasta.gz", "r.txt", "reads"] {
            assert_eq!(
                ReadFormat::from_extension(Path::new(name)),
                ReadFormat::Fasta,
                "{name}"
            );
        }
    }

    #[test]
    fn from_extension_checks_only_the_file_name_suffix() {
        assert_eq!(
            ReadFormat::from_extension(Path::new("/runs/fq/rep1.Fq.GZ")),
            ReadFormat::Fastq
        );
        for name in ["/data.fq/rep1.fa", "r.fqx", "r.fq.bz2", "fq"] {
            assert_eq!(
                ReadFormat::from_extension(Path::new(name)),
                ReadFormat::Fasta,
                "{name}"
            );
        }
    }

    #[test]
    fn resolve_explicit_format_unchanged() {
        assert_eq!(
            ReadFormat::Fasta.resolve(Path::new("r.fq")),
            ReadFormat::Fasta
        );
        assert_eq!(
            ReadFormat::Auto.resolve(Path::new("r.fq")),
            ReadFormat::Fastq
        );
    }

    #[test]
    fn markers() {
        assert_eq!(ReadFormat::Fasta.marker(), b'>');
        assert_eq!(ReadFormat::Fastq.marker(), b'@');
    }

    #[test]
    fn display() {
        assert_eq!(ReadFormat::Auto.to_string(), "auto");
        assert_eq!(ReadFormat::Fastq.to_string(), "fastq");
    }
}
