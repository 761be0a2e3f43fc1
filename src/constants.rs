//! Game constants shared by the strategy and the arena.

/// Bullets exchanged for one victory point when donating.
pub const BULLET_EXCHANGE_RATE: f32 = 10.0;

/// Victory points a team needs to win outright.
pub const VICTORY_POINTS_TO_WIN: u32 = 1000;

/// Maximum health of a planted bullet tree.
pub const BULLET_TREE_MAX_HEALTH: f32 = 50.0;

/// Body radius of a planted bullet tree.
pub const BULLET_TREE_RADIUS: f32 = 1.0;

/// Bullets it costs to plant a bullet tree.
pub const BULLET_TREE_COST: f32 = 50.0;

/// Health a bullet tree loses each round.
pub const BULLET_TREE_DECAY_RATE: f32 = 0.5;

/// Bullets each living bullet tree yields its team per round.
pub const BULLET_TREE_INCOME: f32 = 1.0;

/// Health restored by one watering.
pub const WATER_HEALTH_REGEN_RATE: f32 = 5.0;

/// Bullets every team earns per round regardless of trees.
pub const BASE_BULLET_INCOME: f32 = 2.0;

/// Bullets each team starts the match with.
pub const BULLETS_INITIAL_AMOUNT: f32 = 300.0;

/// Maximum edge-to-edge distance for shaking or watering a tree.
pub const INTERACTION_DIST_FROM_EDGE: f32 = 1.0;

/// Rounds a robot waits after planting or hiring before it may build again.
pub const BUILD_COOLDOWN_ROUNDS: u32 = 10;

/// Default radius used when sensing nearby trees.
pub const SENSE_RADIUS: f32 = 2.0;
