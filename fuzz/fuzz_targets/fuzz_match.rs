#![no_main]

use arbitrary::Arbitrary;
use dendrophile::arena::{run_match, ArenaConfig};
use dendrophile::StrategyConfig;
use libfuzzer_sys::fuzz_target;

/// Structured input for whole-match fuzzing.
#[derive(Arbitrary, Debug)]
struct MatchInput {
    /// Match seed.
    seed: u64,
    /// Round limit (capped to keep runs short).
    max_rounds: u16,
    /// Map width in tenths.
    width_tenths: u16,
    /// Map height in tenths.
    height_tenths: u16,
    /// Neutral trees to scatter.
    neutral_trees: u8,
    /// Victory points needed to win.
    victory_points_to_win: u16,
    /// Bullets per victory point, in tenths.
    exchange_rate_tenths: u16,
    /// Directions tried per build.
    build_attempts: u8,
    /// Spacing between build directions, in degrees.
    build_spacing_degrees: u8,
    /// Probes per side when a move is blocked.
    move_checks_per_side: u8,
}

fuzz_target!(|input: MatchInput| {
    let config = ArenaConfig {
        max_rounds: u32::from(input.max_rounds % 300),
        map_width: f32::from(input.width_tenths % 1000) / 10.0,
        map_height: f32::from(input.height_tenths % 1000) / 10.0,
        neutral_trees: u32::from(input.neutral_trees % 64),
        strategy: StrategyConfig {
            victory_points_to_win: u32::from(input.victory_points_to_win),
            bullet_exchange_rate: f32::from(input.exchange_rate_tenths) / 10.0,
            build_attempts: u32::from(input.build_attempts % 12),
            build_spacing_degrees: f32::from(input.build_spacing_degrees),
            move_checks_per_side: u32::from(input.move_checks_per_side % 8),
            ..StrategyConfig::default()
        },
    };

    // Invalid configs must be rejected, never panic.
    let Ok(result) = run_match(input.seed, &config) else {
        return;
    };

    assert!(result.rounds <= config.max_rounds);
    for team in &result.teams {
        assert!(team.bullets >= 0.0, "team overdrew: {team:?}");
        assert_eq!(team.recovered_faults, 0, "strategy faulted: {team:?}");
        assert!(team.trees_alive <= team.trees_planted as usize);
    }
    if result.won_by_points {
        assert!(result
            .teams
            .iter()
            .any(|t| t.victory_points >= config.strategy.victory_points_to_win));
    }
});
