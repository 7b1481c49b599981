//! fixity - Collect file checksums into an append-only CSV ledger.
//!
//! Usage:
//!   fixity <PATH> [OUTPUT]        Append checksums to OUTPUT (default checksums.csv)
//!   fixity sizes <PATH>           Append file sizes to file_sizes.csv
//!   fixity --help                 Show help

mod console;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Context, Result};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use fixity_collect::{
    ChecksumAlgorithm, CollectConfig, Collector, DEFAULT_SIZES_OUTPUT, FilterPolicy, SizeLister,
};
use fixity_core::DEFAULT_CHUNK_SIZE;

use crate::console::ConsoleObserver;

#[derive(Parser)]
#[command(
    name = "fixity",
    version,
    about = "Collect file checksums into an append-only CSV ledger",
    long_about = "fixity walks a file or directory and appends one `<path>,<checksum>` row \
                  per file to a CSV ledger. Hidden and system files are skipped unless \
                  asked for. Existing ledgers are appended to, never rewritten.",
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
struct Cli {
    /// File or directory to process
    #[arg(required = true)]
    path: Option<PathBuf>,

    /// Ledger to append to
    #[arg(default_value = "checksums.csv")]
    output: PathBuf,

    #[command(flatten)]
    filter: FilterArgs,

    /// Checksum algorithm (md5, sha256, blake3)
    #[arg(short, long, default_value_t = ChecksumAlgorithm::Md5)]
    algorithm: ChecksumAlgorithm,

    /// Bytes read per chunk while hashing
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Digest threads (1 = sequential, 0 = one per CPU)
    #[arg(short = 'j', long, default_value_t = 1)]
    threads: usize,

    /// Only report failures
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args, Clone, Copy)]
struct FilterArgs {
    /// Record hidden files and descend into hidden directories
    #[arg(long)]
    include_hidden: bool,

    /// Record system files and descend into system directories
    #[arg(long)]
    include_system: bool,
}

impl FilterArgs {
    fn policy(self) -> FilterPolicy {
        FilterPolicy::new(!self.include_hidden, !self.include_system)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Append file sizes to a `File Path,Size` ledger
    Sizes {
        /// File or directory to process
        path: PathBuf,

        /// Ledger to append to
        #[arg(short, long, default_value = DEFAULT_SIZES_OUTPUT)]
        output: PathBuf,

        /// Write sizes in bytes instead of human-readable units
        #[arg(long)]
        raw: bool,

        #[command(flatten)]
        filter: FilterArgs,
    },
}

fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("error")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Some(Command::Sizes {
            path,
            output,
            raw,
            filter,
        }) => run_sizes(path, output, raw, filter.policy(), cli.quiet),
        None => {
            let path = cli.path.ok_or_else(|| color_eyre::eyre::eyre!("PATH is required"))?;
            let config = CollectConfig::builder()
                .root(path)
                .output(cli.output)
                .policy(cli.filter.policy())
                .algorithm(cli.algorithm)
                .chunk_size(cli.chunk_size)
                .threads(cli.threads)
                .build()
                .context("Invalid configuration")?;
            run_collect(config, cli.quiet)
        }
    }
}

/// Append checksums for every candidate under the configured root.
fn run_collect(config: CollectConfig, quiet: bool) -> Result<()> {
    debug!(?config, "starting checksum run");
    let mut observer = ConsoleObserver::checksums(config.algorithm, quiet);
    let root = config.root.clone();

    Collector::new(config)
        .run(&mut observer)
        .with_context(|| format!("Checksum run failed for {}", root.display()))?;

    Ok(())
}

/// Append sizes for every candidate under `path`.
fn run_sizes(
    path: PathBuf,
    output: PathBuf,
    raw: bool,
    policy: FilterPolicy,
    quiet: bool,
) -> Result<()> {
    let mut observer = ConsoleObserver::sizes(raw, quiet);

    SizeLister::new(&path, output)
        .with_policy(policy)
        .raw(raw)
        .run(&mut observer)
        .with_context(|| format!("Size listing failed for {}", path.display()))?;

    Ok(())
}
