//! The sensing and action surface a host exposes to a running robot.
//!
//! Strategies never touch world state directly. Every query, legality check
//! and command goes through [`RobotController`], which lets the same turn
//! logic run against the arena, a real host bridge, or a scripted fake in
//! tests.

use std::ops::ControlFlow;

use serde::{Deserialize, Serialize};

use crate::error::GameActionResult;
use crate::geometry::{Direction, MapLocation};

/// Unique identifier for a robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RobotId(pub u32);

/// Unique identifier for a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreeId(pub u32);

impl std::fmt::Display for TreeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a bullet in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BulletId(pub u32);

/// Team affiliation of robots and trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// First team.
    A,
    /// Second team.
    B,
    /// Owned by neither team.
    Neutral,
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::A => "A",
            Self::B => "B",
            Self::Neutral => "Neutral",
        };
        f.write_str(name)
    }
}

/// The kind of a robot, which fixes its body and abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RobotType {
    /// Immobile-in-practice spawner of gardeners.
    Archon,
    /// Plants and tends bullet trees.
    Gardener,
    /// Melee unit that chops trees.
    Lumberjack,
    /// Basic ranged unit.
    Soldier,
    /// Heavy ranged unit.
    Tank,
    /// Fast scouting unit.
    Scout,
}

impl RobotType {
    /// Radius of the robot's circular body.
    #[must_use]
    pub const fn body_radius(self) -> f32 {
        match self {
            Self::Archon | Self::Tank => 2.0,
            Self::Gardener | Self::Lumberjack | Self::Soldier | Self::Scout => 1.0,
        }
    }

    /// Maximum distance the robot may travel in one move.
    #[must_use]
    pub const fn stride_radius(self) -> f32 {
        match self {
            Self::Archon | Self::Gardener | Self::Lumberjack => 1.0,
            Self::Soldier => 2.0,
            Self::Tank => 0.5,
            Self::Scout => 2.5,
        }
    }

    /// Bullets it costs to build a robot of this type.
    #[must_use]
    pub const fn bullet_cost(self) -> f32 {
        match self {
            Self::Archon => 0.0,
            Self::Gardener | Self::Lumberjack | Self::Soldier => 100.0,
            Self::Tank => 300.0,
            Self::Scout => 80.0,
        }
    }

    /// Lower-case name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Archon => "archon",
            Self::Gardener => "gardener",
            Self::Lumberjack => "lumberjack",
            Self::Soldier => "soldier",
            Self::Tank => "tank",
            Self::Scout => "scout",
        }
    }
}

impl std::fmt::Display for RobotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Snapshot of a sensed tree, valid only for the turn it was sensed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeInfo {
    /// Tree identity.
    pub id: TreeId,
    /// Owning team, or neutral.
    pub team: Team,
    /// Center of the tree.
    pub location: MapLocation,
    /// Radius of the tree's body.
    pub radius: f32,
    /// Current health.
    pub health: f32,
    /// Maximum health.
    pub max_health: f32,
    /// Bullets released when the tree is shaken.
    pub contained_bullets: u32,
}

/// Snapshot of a bullet in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletInfo {
    /// Bullet identity.
    pub id: BulletId,
    /// Current position.
    pub location: MapLocation,
    /// Direction of travel.
    pub dir: Direction,
}

/// Everything a robot can ask of, or tell, the host during its turn.
///
/// Each command has a matching predicate. Callers must check the predicate in
/// the same turn before issuing the command; a command whose predicate is
/// false fails with [`crate::GameActionError::IllegalAction`].
pub trait RobotController {
    /// This robot's type.
    fn robot_type(&self) -> RobotType;

    /// This robot's team.
    fn team(&self) -> Team;

    /// Center of this robot's body.
    fn location(&self) -> MapLocation;

    /// Bullets held by this robot's team.
    fn team_bullets(&self) -> f32;

    /// Victory points earned by this robot's team.
    fn team_victory_points(&self) -> u32;

    /// Trees of `team` with any part within `radius` of this robot's center,
    /// ordered by distance.
    fn sense_nearby_trees(&self, radius: f32, team: Team) -> Vec<TreeInfo>;

    /// Bullets within `radius` of this robot's center, ordered by distance.
    fn sense_nearby_bullets(&self, radius: f32) -> Vec<BulletInfo>;

    /// Whether a full-stride move in `dir` would currently succeed.
    fn can_move(&self, dir: Direction) -> bool;

    /// Move a full stride in `dir`.
    ///
    /// # Errors
    ///
    /// Fails if the move is not legal.
    fn move_in(&mut self, dir: Direction) -> GameActionResult<()>;

    /// Whether a bullet tree can be planted adjacent in `dir`.
    fn can_plant_tree(&self, dir: Direction) -> bool;

    /// Plant a bullet tree adjacent in `dir`.
    ///
    /// # Errors
    ///
    /// Fails if planting is not legal.
    fn plant_tree(&mut self, dir: Direction) -> GameActionResult<()>;

    /// Whether `tree` can be shaken this turn.
    ///
    /// # Errors
    ///
    /// Fails if no tree with that identity exists.
    fn can_shake(&self, tree: TreeId) -> GameActionResult<bool>;

    /// Shake `tree`, moving its bullets to this robot's team.
    ///
    /// # Errors
    ///
    /// Fails if the tree does not exist or shaking is not legal.
    fn shake(&mut self, tree: TreeId) -> GameActionResult<()>;

    /// Whether `tree` can be watered this turn.
    ///
    /// # Errors
    ///
    /// Fails if no tree with that identity exists.
    fn can_water(&self, tree: TreeId) -> GameActionResult<bool>;

    /// Water `tree`, restoring some of its health.
    ///
    /// # Errors
    ///
    /// Fails if the tree does not exist or watering is not legal.
    fn water(&mut self, tree: TreeId) -> GameActionResult<()>;

    /// Whether a gardener can be hired adjacent in `dir`.
    fn can_hire_gardener(&self, dir: Direction) -> bool;

    /// Hire a gardener adjacent in `dir`.
    ///
    /// # Errors
    ///
    /// Fails if hiring is not legal.
    fn hire_gardener(&mut self, dir: Direction) -> GameActionResult<()>;

    /// Donate `bullets` in exchange for victory points.
    ///
    /// # Errors
    ///
    /// Fails if the amount is non-positive or exceeds the team's bullets.
    fn donate(&mut self, bullets: f32) -> GameActionResult<()>;

    /// End this robot's turn.
    ///
    /// Returns [`ControlFlow::Continue`] once the next turn begins, or
    /// [`ControlFlow::Break`] if the host will not schedule this robot again.
    fn yield_turn(&mut self) -> ControlFlow<()>;
}
