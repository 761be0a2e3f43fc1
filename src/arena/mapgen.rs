//! Deterministic map generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use super::world::World;
use crate::controller::{RobotType, Team};
use crate::geometry::MapLocation;

/// Smallest playable map width.
pub const MIN_MAP_WIDTH: f32 = 20.0;

/// Smallest playable map height.
pub const MIN_MAP_HEIGHT: f32 = 10.0;

/// Neutral trees keep this far from either archon's center.
const ARCHON_CLEARANCE: f32 = 6.0;

/// Placement attempts per requested neutral tree.
const ATTEMPTS_PER_TREE: u32 = 20;

/// Error type for map generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("map generation failed: {reason}")]
pub struct MapGenError {
    /// Description of the error.
    pub reason: String,
}

/// Generate the starting world for a match.
///
/// Team A's archon starts in the left half and team B's in the right half,
/// mirrored through the map center. Neutral trees are scattered at random
/// and skipped where they would not fit.
///
/// # Errors
///
/// Returns an error if the map is smaller than 20×10 or its dimensions are
/// not finite.
pub fn generate_world(
    seed: u64,
    width: f32,
    height: f32,
    neutral_trees: u32,
) -> Result<World, MapGenError> {
    if !(width.is_finite() && height.is_finite()) {
        return Err(MapGenError {
            reason: format!("map dimensions must be finite, got {width}×{height}"),
        });
    }
    if width < MIN_MAP_WIDTH || height < MIN_MAP_HEIGHT {
        return Err(MapGenError {
            reason: format!(
                "map is {width}×{height}, minimum is {MIN_MAP_WIDTH}×{MIN_MAP_HEIGHT}"
            ),
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = World::new(width, height);

    let archons = place_archons(&mut world, &mut rng);
    scatter_neutral_trees(&mut world, &mut rng, neutral_trees, &archons);

    Ok(world)
}

/// Place one archon per team, mirrored through the center.
fn place_archons(world: &mut World, rng: &mut StdRng) -> [MapLocation; 2] {
    let margin = RobotType::Archon.body_radius() + 1.0;
    let x = world.width() * 0.25;
    let y = rng.gen_range(margin..world.height() - margin);

    let a = MapLocation::new(x, y);
    let b = MapLocation::new(world.width() - x, world.height() - y);
    world.spawn_robot(Team::A, RobotType::Archon, a);
    world.spawn_robot(Team::B, RobotType::Archon, b);
    [a, b]
}

fn scatter_neutral_trees(
    world: &mut World,
    rng: &mut StdRng,
    count: u32,
    archons: &[MapLocation; 2],
) {
    let mut placed = 0;
    for _ in 0..count.saturating_mul(ATTEMPTS_PER_TREE) {
        if placed >= count {
            break;
        }

        let radius = rng.gen_range(0.5..2.0);
        let location = MapLocation::new(
            rng.gen_range(radius..world.width() - radius),
            rng.gen_range(radius..world.height() - radius),
        );
        let bullets = rng.gen_range(0..=30);

        let crowds_archon = archons
            .iter()
            .any(|archon| archon.is_within_distance(location, ARCHON_CLEARANCE + radius));
        if crowds_archon || !world.can_place(location, radius, None) {
            continue;
        }

        world.spawn_tree(Team::Neutral, location, radius, radius * 25.0, bullets);
        placed += 1;
    }
}
