use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;
use anyhow::{Result, Context};

mod config;
mod commands;
mod error;

use config::Config;
use error::{print_error_and_exit, CliError};

#[derive(Parser)]
#[command(name = "primedist")]
#[command(about = "primedist - primer-anchored edit distances for sequencing reads")]
#[command(version)]
#[command(long_about = "
primedist computes Hamming, Levenshtein and bounded end-anchored edit
distances, and identifies which primer starts each read in a FASTA/FASTQ file.

Examples:
  primedist hamming AGCT AGGT
  primedist edit AGCT AGG
  primedist bounded ACGTACGT ACTTACGTGGCC -k 2 -m 3
  primedist scan --primers primers.fa --reads reads.fq.gz --out hits.tsv
  primedist scan --primers primers.fa --reads lib_R1.fq.gz --paired --trimmed-out trimmed/lib
  primedist config --example
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of threads to use
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Hamming distance between two equal-length sequences
    Hamming {
        a: String,
        b: String,
    },

    /// Levenshtein distance between two sequences
    Edit {
        a: String,
        b: String,
    },

    /// Bounded end-anchored distance of a query (primer) within a target (read)
    Bounded {
        query: String,
        target: String,

        /// Maximum tolerated edit distance
        #[arg(short = 'k', long)]
        max_edits: Option<usize>,

        /// Trailing query bases that must match exactly
        #[arg(short = 'm', long)]
        end_matches: Option<usize>,
    },

    /// Identify the primer at the start of every read
    Scan {
        /// Primer sequences (FASTA/FASTQ)
        #[arg(long, required = true)]
        primers: PathBuf,

        /// Reads (FASTA/FASTQ, optionally gzipped); read 1 of a paired run
        #[arg(long, required = true)]
        reads: PathBuf,

        /// Read 2 of a paired-end run
        #[arg(long)]
        reads2: Option<PathBuf>,

        /// Paired-end run; read 2 is found next to read 1 (R1 -> R2)
        #[arg(long)]
        paired: bool,

        /// Maximum tolerated edit distance
        #[arg(short = 'k', long)]
        max_edits: Option<usize>,

        /// Trailing primer bases that must match exactly
        #[arg(short = 'm', long)]
        end_matches: Option<usize>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Output format
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Write primer-trimmed reads to <PREFIX>.fastq.gz (or _R1/_R2 when paired)
        #[arg(long, value_name = "PREFIX")]
        trimmed_out: Option<PathBuf>,

        /// Write trimmed reads without gzip
        #[arg(long, requires = "trimmed_out")]
        uncompressed: bool,

        /// Write read 1 joined with reverse-complemented read 2 as FASTA
        #[arg(long)]
        joined_out: Option<PathBuf>,
    },

    /// Print or write the configuration
    Config {
        /// Use the built-in example instead of the loaded configuration
        #[arg(long)]
        example: bool,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Tsv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            other => Err(CliError::invalid_format(format!(
                "unknown output format '{}', expected tsv or json",
                other
            ))),
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    // Set global thread count, CLI flag first, then config
    let threads = cli.threads.unwrap_or(config.general.threads);
    if threads == 0 {
        return Err(CliError::validation("thread count must be at least 1").into());
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .context("Failed to set thread count")?;
    log::debug!("Using {} threads", threads);

    match cli.command {
        Commands::Hamming { a, b } => commands::distance::execute_hamming(&a, &b)?,
        Commands::Edit { a, b } => commands::distance::execute_edit(&a, &b)?,
        Commands::Bounded { query, target, max_edits, end_matches } => {
            commands::distance::execute_bounded(&config, &query, &target, max_edits, end_matches)?
        }
        Commands::Scan {
            primers,
            reads,
            reads2,
            paired,
            max_edits,
            end_matches,
            out,
            format,
            trimmed_out,
            uncompressed,
            joined_out,
        } => {
            let opts = commands::scan::ScanOptions {
                primers,
                reads,
                reads2,
                paired,
                max_edits,
                end_matches,
                output: out,
                format,
                trimmed_out,
                uncompressed,
                joined_out,
            };
            commands::scan::execute(&config, opts)?
        }
        Commands::Config { example, out } => commands::config::execute(&config, example, out)?,
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        match err.downcast_ref::<CliError>() {
            Some(cli_err) => print_error_and_exit(cli_err),
            None => {
                eprintln!("Error: {:#}", err);
                std::process::exit(1);
            }
        }
    }
}
