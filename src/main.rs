//! Dendrophile CLI - run archon/gardener matches in the headless arena.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Dendrophile - tree-planting bot strategies in a deterministic arena
#[derive(Parser, Debug)]
#[command(name = "dendrophile")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single match between team A and team B
    Run {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum rounds (default: from config, 3000)
        #[arg(short, long)]
        rounds: Option<u32>,

        /// Arena config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Suppress the match banner
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run many matches in parallel and aggregate statistics
    Tournament {
        /// Number of matches to run
        #[arg(short, long, default_value = "100")]
        games: u64,

        /// Starting seed (increments for each match)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Maximum rounds per match (default: from config, 3000)
        #[arg(short, long)]
        rounds: Option<u32>,

        /// Arena config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::TournamentFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Print the default arena config as JSON
    Config,

    /// Check an arena config file
    Validate {
        /// Config file to validate
        #[arg(required = true)]
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match args.command {
        Commands::Run {
            seed,
            rounds,
            config,
            format,
            quiet,
        } => cli::run::execute(seed, rounds, config, format, quiet),

        Commands::Tournament {
            games,
            seed,
            threads,
            rounds,
            config,
            format,
            progress,
        } => cli::tournament::execute(games, seed, threads, rounds, config, format, progress),

        Commands::Config => cli::validate::print_default(),

        Commands::Validate { config } => cli::validate::execute(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
