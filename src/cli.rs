//! Command-line interface definition.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

use crate::{
    config::LoadOptions,
    format::{FastqLayout, ReadFormat},
};

/// Load replicate small RNA read files and a reference for profiling.
#[derive(Parser, Debug)]
#[command(name = "scram-profile")]
#[command(version, author, about, long_about = None)]
pub struct Args {
    /// Path to target FASTA format reference file
    #[arg(long)]
    pub ref_file: PathBuf,

    /// Comma-separated read files
    #[arg(long, value_delimiter = ',', required = true)]
    pub read_files: Vec<PathBuf>,

    /// Output folder/file prefix
    #[arg(long)]
    pub out_prefix: String,

    /// Comma-separated small RNA lengths to exact match
    #[arg(long, value_delimiter = ',', default_value = "21,22,24")]
    pub align_lens: Vec<usize>,

    /// Read file type
    #[arg(long, value_enum, default_value_t = ReadFormat::Fastq)]
    pub read_file_type: ReadFormat,

    /// How FASTQ records are delimited
    #[arg(long, value_enum, default_value_t = FastqLayout::MarkerOnly)]
    pub fastq_layout: FastqLayout,

    /// Split alignment counts by the number of positions a read aligns to
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    pub split: bool,

    /// Normalise reads to Reads Per Million Reads (RPMR) for each input file
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    pub norm: bool,

    /// Minimum size read to include in total normalization counts
    #[arg(long, default_value_t = 18)]
    pub min_len_norm: usize,

    /// Maximum size read to include in total normalization counts
    #[arg(long, default_value_t = 32)]
    pub max_len_norm: usize,

    /// Minimum abundance of a read to include in total normalization counts
    #[arg(long, default_value_t = 1.0)]
    pub min_count_norm: f64,

    /// Summary output format
    #[arg(long, value_enum, default_value = "text")]
    pub summary: SummaryFormat,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Format of the summary written to stdout.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum SummaryFormat {
    #[default]
    Text,
    Json,
}

impl Args {
    /// Read loading options taken from the arguments.
    #[must_use]
    pub const fn load_options(&self) -> LoadOptions {
        LoadOptions {
            format: self.read_file_type,
            min_len: self.min_len_norm,
            max_len: self.max_len_norm,
            min_count: self.min_count_norm,
            normalize: self.norm,
            fastq_layout: self.fastq_layout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from([
            "scram-profile",
            "--ref-file",
            "ref.fa",
            "--read-files",
            "a.fq,b.fq",
            "--out-prefix",
            "out",
        ])
        .unwrap();
        assert_eq!(args.read_files, vec![PathBuf::from("a.fq"), PathBuf::from("b.fq")]);
        assert_eq!(args.align_lens, vec![21, 22, 24]);
        assert!(args.norm && args.split);
        assert_eq!(args.load_options(), LoadOptions::default());
    }

    #[test]
    fn overrides() {
        let args = Args::try_parse_from([
            "scram-profile",
            "--ref-file",
            "ref.fa",
            "--read-files",
            "a.fa",
            "--out-prefix",
            "out",
            "--read-file-type",
            "fasta",
            "--norm",
            "false",
            "--min-count-norm",
            "2",
            "--summary",
            "json",
        ])
        .unwrap();
        let opts = args.load_options();
        assert_eq!(opts.format, ReadFormat::Fasta);
        assert!(!opts.normalize);
        assert_eq!(opts.min_count, 2.0);
        assert_eq!(args.summary, SummaryFormat::Json);
    }

    #[test]
    fn read_files_required() {
        assert!(Args::try_parse_from(["scram-profile", "--ref-file", "r.fa", "--out-prefix", "o"]).is_err());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
