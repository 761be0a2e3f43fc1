//! Config validation and printing.

use super::CliError;
use dendrophile::arena::ArenaConfig;
use dendrophile::ConfigError;
use std::path::Path;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or validated.
pub(crate) fn execute(path: &Path) -> Result<(), CliError> {
    println!("Validating: {}", path.display());
    println!();

    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?;
    print_check("Readable", true);

    let config: ArenaConfig = match serde_json::from_str(&text) {
        Ok(config) => config,
        Err(e) => {
            print_check("JSON schema", false);
            return Err(ConfigError::Parse(e).into());
        }
    };
    print_check("JSON schema", true);

    if let Err(e) = config.validate() {
        print_check("Value ranges", false);
        return Err(e.into());
    }
    print_check("Value ranges", true);

    println!();
    println!("Summary:");
    println!("  Map:           {}x{}", config.map_width, config.map_height);
    println!("  Max rounds:    {}", config.max_rounds);
    println!("  Neutral trees: {}", config.neutral_trees);
    println!(
        "  Donate at:     {:.0} bullets",
        config.strategy.donation_threshold()
    );
    println!();
    println!("Validation successful!");

    Ok(())
}

/// Print the default arena config as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub(crate) fn print_default() -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(&ArenaConfig::default())?);
    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
