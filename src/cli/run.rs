//! Run command implementation.

use super::output::format_text;
use super::{load_config, seed_or_now, CliError, OutputFormat};
use dendrophile::arena::run_match;
use std::path::PathBuf;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the match fails.
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn execute(
    seed: Option<u64>,
    rounds: Option<u32>,
    config: Option<PathBuf>,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    let config = load_config(config.as_deref(), rounds)?;
    let seed = seed_or_now(seed);

    if !quiet && format == OutputFormat::Text {
        println!("Running match with seed {seed}...");
        println!(
            "Map: {}x{}, {} neutral trees, up to {} rounds",
            config.map_width, config.map_height, config.neutral_trees, config.max_rounds
        );
        println!();
    }

    let result = run_match(seed, &config)?;

    match format {
        OutputFormat::Text => print!("{}", format_text(&result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    Ok(())
}
