use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use sumkraken_rs::config::{SummaryConfig, DEFAULT_SIZE_CUTOFF, DEFAULT_TAX_DIVISION};
use sumkraken_rs::error::{SummaryError, SummaryResult};
use sumkraken_rs::summarize_assembly;

/// Summarize the kraken translate output taxon composition of an assembly
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Input kraken translate taxon file to process
    #[arg(long = "krakenfile")]
    krakenfile: PathBuf,

    /// Input fasta file to process
    #[arg(long = "fastafile")]
    fastafile: PathBuf,

    /// Minimum contig length (negative values keep every contig)
    #[arg(long = "size_cutoff", default_value_t = DEFAULT_SIZE_CUTOFF, allow_negative_numbers = true)]
    size_cutoff: i64,

    /// Taxon numerical rank to truncate at (-1 keeps the full lineage)
    #[arg(long = "tax_division", default_value_t = DEFAULT_TAX_DIVISION, allow_negative_numbers = true)]
    tax_division: i64,
}

fn spinner(color: &str, message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template(&format!("{{spinner:.{color}}} {{msg}}"))
    {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner
}

fn run(args: Args) -> SummaryResult<()> {
    let config = SummaryConfig::new(args.krakenfile, args.fastafile, args.size_cutoff, args.tax_division)?;
    log::info!(
        "summarizing {} with {} (cutoff {} bp, slice {})",
        config.fasta_file.display(),
        config.kraken_file.display(),
        config.size_cutoff,
        config.taxa_slice
    );

    let progress = spinner("green", "Summarizing taxa...");
    let results = summarize_assembly(&config);
    progress.finish_and_clear();
    let results = results?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_all(results.get_summary_report().as_bytes())
        .and_then(|_| out.flush())
        .map_err(|source| SummaryError::Io {
            path: PathBuf::from("<stdout>"),
            source,
        })?;

    log::info!(
        "{} taxa, {} of {} filtered bases assigned",
        results.rows.len(),
        results.assigned_bases,
        results.genome_sizes.filtered_genome_length
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    // Usage errors (missing flags, non-integer values) exit here, before any I/O
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("{err:?}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
