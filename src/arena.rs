//! Headless arena for running matches between two teams.
//!
//! Provides a pure function interface: `(seed, config) -> MatchResult`
//!
//! The arena handles:
//! - Deterministic map generation
//! - Per-turn controllers that enforce legality and once-per-turn limits
//! - Round bookkeeping (income, tree decay, build cooldowns)
//! - Victory by donation or by the round limit

mod controller;
mod mapgen;
mod world;

pub use controller::ArenaController;
pub use mapgen::{generate_world, MapGenError, MIN_MAP_HEIGHT, MIN_MAP_WIDTH};
pub use world::{team_index, RobotBody, TeamState, Tree, World};

use std::path::Path;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{positive, ConfigError, StrategyConfig};
use crate::controller::{RobotId, Team};
use crate::strategy::Robot;
use crate::TurnOutcome;

/// Configuration for a match.
///
/// Missing fields take their default when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Rounds before the match is decided on points.
    pub max_rounds: u32,
    /// Map width.
    pub map_width: f32,
    /// Map height.
    pub map_height: f32,
    /// Neutral trees to scatter at the start.
    pub neutral_trees: u32,
    /// Parameters shared by every robot's strategy.
    pub strategy: StrategyConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            max_rounds: 3000,
            map_width: 60.0,
            map_height: 60.0,
            neutral_trees: 20,
            strategy: StrategyConfig::default(),
        }
    }
}

impl ArenaConfig {
    /// Check that every field is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rounds == 0 {
            return Err(ConfigError::Invalid {
                field: "max_rounds",
                reason: "must be at least 1",
            });
        }
        positive("map_width", self.map_width)?;
        positive("map_height", self.map_height)?;
        if self.map_width < MIN_MAP_WIDTH {
            return Err(ConfigError::Invalid {
                field: "map_width",
                reason: "must be at least 20",
            });
        }
        if self.map_height < MIN_MAP_HEIGHT {
            return Err(ConfigError::Invalid {
                field: "map_height",
                reason: "must be at least 10",
            });
        }
        self.strategy.validate()
    }

    /// Load and validate a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }
}

/// Error type for arena operations.
#[derive(Debug, Error)]
pub enum ArenaError {
    /// The configuration was rejected.
    #[error("invalid arena config: {0}")]
    InvalidConfig(#[from] ConfigError),
    /// Map generation failed.
    #[error(transparent)]
    MapGeneration(#[from] MapGenError),
}

/// End-of-match statistics for one team.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TeamStats {
    /// The team.
    pub team: Team,
    /// Victory points earned.
    pub victory_points: u32,
    /// Bullets held at the end.
    pub bullets: f32,
    /// Bullet trees still alive.
    pub trees_alive: usize,
    /// Bullet trees planted over the match.
    pub trees_planted: u32,
    /// Gardeners hired over the match.
    pub gardeners_hired: u32,
    /// Bullets collected by shaking neutral trees.
    pub bullets_shaken: u32,
    /// Bullets exchanged for victory points.
    pub bullets_donated: f32,
    /// Turns cut short by a fault.
    pub recovered_faults: u32,
}

/// Final result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchResult {
    /// The seed used for this match.
    pub seed: u64,
    /// Rounds played.
    pub rounds: u32,
    /// The winning team, or `None` for a draw.
    pub winner: Option<Team>,
    /// Whether the match ended by reaching the victory-point target.
    pub won_by_points: bool,
    /// Statistics for teams A and B, in that order.
    pub teams: [TeamStats; 2],
}

/// Run a complete match with the given seed.
///
/// This is the main entry point - a pure function from inputs to result.
///
/// # Determinism
///
/// Given the same seed and configuration, this function always produces
/// the same `MatchResult`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or map generation fails.
pub fn run_match(seed: u64, config: &ArenaConfig) -> Result<MatchResult, ArenaError> {
    let mut runner = MatchRunner::new(seed, config)?;
    while runner.step() {}
    let result = runner.result();
    info!(
        seed,
        rounds = result.rounds,
        winner = ?result.winner,
        "match finished"
    );
    Ok(result)
}

/// A robot scheduled by the arena.
#[derive(Debug)]
struct Unit {
    id: RobotId,
    team: Team,
    robot: Robot,
    rng: SmallRng,
}

/// Round-by-round match driver.
///
/// Robots act in spawn order. Robots hired during a round act from the
/// next round.
#[derive(Debug)]
pub struct MatchRunner {
    world: World,
    units: Vec<Unit>,
    config: ArenaConfig,
    seed: u64,
    faults: [u32; 2],
    won_by_points: bool,
}

impl MatchRunner {
    /// Validate the configuration and generate the starting world.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or map generation
    /// fails.
    pub fn new(seed: u64, config: &ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        let world = generate_world(
            seed,
            config.map_width,
            config.map_height,
            config.neutral_trees,
        )?;

        let mut runner = Self {
            world,
            units: Vec::new(),
            config: *config,
            seed,
            faults: [0; 2],
            won_by_points: false,
        };
        runner.activate_new_robots();
        Ok(runner)
    }

    /// The current world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Whether the match has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.won_by_points || self.world.round() >= self.config.max_rounds
    }

    /// Play one round. Returns `false` once the match is over.
    pub fn step(&mut self) -> bool {
        if self.is_over() {
            return false;
        }

        let exchange_rate = self.config.strategy.bullet_exchange_rate;
        for unit in &mut self.units {
            let Some(mut rc) = ArenaController::new(&mut self.world, unit.id, exchange_rate)
            else {
                continue;
            };
            if let TurnOutcome::Recovered(error) = unit.robot.take_turn(&mut rc, &mut unit.rng) {
                warn!(role = %unit.robot.role(), id = unit.id.0, %error, "turn aborted by fault");
                if let Some(index) = team_index(unit.team) {
                    self.faults[index] += 1;
                }
            }
        }

        self.activate_new_robots();
        self.world.end_round();

        let target = self.config.strategy.victory_points_to_win;
        self.won_by_points = [Team::A, Team::B].into_iter().any(|team| {
            self.world
                .team_state(team)
                .is_some_and(|state| state.victory_points >= target)
        });

        !self.is_over()
    }

    /// Schedule every robot spawned since the last call.
    fn activate_new_robots(&mut self) {
        let strategy = self.config.strategy;
        let seed = self.seed;
        let new_units: Vec<Unit> = self.world.robots()[self.units.len()..]
            .iter()
            .map(|body| Unit {
                id: body.id,
                team: body.team,
                robot: Robot::activate(body.robot_type, strategy),
                rng: SmallRng::seed_from_u64(unit_seed(seed, body.id)),
            })
            .collect();
        self.units.extend(new_units);
    }

    /// Summarize the match as it stands.
    #[must_use]
    pub fn result(&self) -> MatchResult {
        let stats = |team: Team, index: usize| {
            let state = self.world.team_state(team).copied().unwrap_or_default();
            TeamStats {
                team,
                victory_points: state.victory_points,
                bullets: state.bullets,
                trees_alive: self.world.count_trees(team),
                trees_planted: state.trees_planted,
                gardeners_hired: state.gardeners_hired,
                bullets_shaken: state.bullets_shaken,
                bullets_donated: state.bullets_donated,
                recovered_faults: self.faults[index],
            }
        };
        let teams = [stats(Team::A, 0), stats(Team::B, 1)];

        MatchResult {
            seed: self.seed,
            rounds: self.world.round(),
            winner: decide_winner(&teams),
            won_by_points: self.won_by_points,
            teams,
        }
    }
}

/// Highest victory points wins, then most bullets; otherwise a draw.
fn decide_winner(teams: &[TeamStats; 2]) -> Option<Team> {
    let [a, b] = teams;
    match a.victory_points.cmp(&b.victory_points) {
        std::cmp::Ordering::Greater => Some(a.team),
        std::cmp::Ordering::Less => Some(b.team),
        std::cmp::Ordering::Equal => match a.bullets.total_cmp(&b.bullets) {
            std::cmp::Ordering::Greater => Some(a.team),
            std::cmp::Ordering::Less => Some(b.team),
            std::cmp::Ordering::Equal => None,
        },
    }
}

/// Per-robot RNG seed derived from the match seed and robot identity.
fn unit_seed(seed: u64, id: RobotId) -> u64 {
    seed ^ u64::from(id.0).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
