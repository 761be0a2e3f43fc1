//! Tournament command implementation.

use super::output::{
    format_tournament_csv, format_tournament_text, JsonTournamentResult, TournamentStats,
};
use super::{load_config, seed_or_now, CliError, TournamentFormat};
use dendrophile::arena::run_match;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;
use tracing::warn;

/// Execute the tournament command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or output fails.
#[allow(clippy::too_many_arguments, clippy::needless_pass_by_value)]
pub(crate) fn execute(
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    rounds: Option<u32>,
    config: Option<PathBuf>,
    format: TournamentFormat,
    progress: bool,
) -> Result<(), CliError> {
    let config = load_config(config.as_deref(), rounds)?;

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed_or_now(seed);

    let pb = if progress {
        let pb = ProgressBar::new(games);
        let style = ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} matches ({per_sec})",
            )
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Each thread accumulates into its own TournamentStats, then we merge at the end
    let stats = (0..games)
        .into_par_iter()
        .fold(TournamentStats::default, |mut local_stats, i| {
            let match_seed = base_seed.wrapping_add(i);
            match run_match(match_seed, &config) {
                Ok(result) => local_stats.add_result(&result),
                Err(error) => warn!(seed = match_seed, %error, "match failed"),
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local_stats
        })
        .reduce(TournamentStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    #[allow(clippy::cast_precision_loss)]
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        TournamentFormat::Text => {
            println!();
            print!("{}", format_tournament_text(&stats));
            println!();
            println!(
                "Duration: {:.2}s ({:.0} matches/sec)",
                duration.as_secs_f64(),
                games_per_sec
            );
        }
        TournamentFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonTournamentResult::from_stats(&stats))?;
            println!("{json}");
        }
        TournamentFormat::Csv => {
            print!("{}", format_tournament_csv(&stats));
        }
    }

    Ok(())
}
