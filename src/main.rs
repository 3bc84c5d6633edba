use std::process;

use clap::Parser;
use colored::Colorize;
use scram_profile::{
    cli::{Args, SummaryFormat},
    error::ScramError,
    reference::load_reference,
    run::load_reads,
    summary::LoadSummary,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    init_tracing(args.quiet);

    debug!(
        out_prefix = %args.out_prefix,
        align_lens = ?args.align_lens,
        split = args.split,
        "profiling settings"
    );

    if let Err(e) = run(&args) {
        eprintln!(
            "{}\n {}",
            "Application error:".blue().bold(),
            e.to_string().blue()
        );
        eprintln!("\nExiting");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ScramError> {
    let reference = load_reference(&args.ref_file)?;

    let options = args.load_options();
    let (table, order) = load_reads(&args.read_files, &options)?;

    let summary = LoadSummary::new(options, &table, &order, &reference);
    match args.summary {
        SummaryFormat::Text => println!("{summary}"),
        SummaryFormat::Json => println!("{}", summary.to_json()?),
    }
    Ok(())
}

fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
