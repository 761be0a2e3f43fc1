//! Arena world state and the rules that act on it.

use crate::constants::{
    BASE_BULLET_INCOME, BULLETS_INITIAL_AMOUNT, BULLET_TREE_DECAY_RATE, BULLET_TREE_INCOME,
};
use crate::controller::{BulletInfo, RobotId, RobotType, Team, TreeId, TreeInfo};
use crate::geometry::MapLocation;

/// Slack allowed when two bodies touch, so adjacent placement never counts
/// as overlap.
const TOUCH_EPSILON: f32 = 1e-3;

/// Gap left between a builder and what it builds.
pub(crate) const GENERAL_SPAWN_OFFSET: f32 = 0.01;

/// Index of a team's slot in per-team arrays.
#[must_use]
pub const fn team_index(team: Team) -> Option<usize> {
    match team {
        Team::A => Some(0),
        Team::B => Some(1),
        Team::Neutral => None,
    }
}

/// A robot's body in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobotBody {
    /// Robot identity.
    pub id: RobotId,
    /// Owning team.
    pub team: Team,
    /// Robot type.
    pub robot_type: RobotType,
    /// Center of the body.
    pub location: MapLocation,
    /// Rounds left before the robot may plant or hire again.
    pub build_cooldown: u32,
}

/// A tree in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tree {
    /// Tree identity.
    pub id: TreeId,
    /// Owning team, or neutral.
    pub team: Team,
    /// Center of the tree.
    pub location: MapLocation,
    /// Body radius.
    pub radius: f32,
    /// Current health.
    pub health: f32,
    /// Maximum health.
    pub max_health: f32,
    /// Bullets released on the next shake.
    pub contained_bullets: u32,
}

impl Tree {
    /// Snapshot for sensing.
    #[must_use]
    pub const fn info(&self) -> TreeInfo {
        TreeInfo {
            id: self.id,
            team: self.team,
            location: self.location,
            radius: self.radius,
            health: self.health,
            max_health: self.max_health,
            contained_bullets: self.contained_bullets,
        }
    }
}

/// Per-team resources and counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamState {
    /// Bullets held.
    pub bullets: f32,
    /// Victory points earned through donation.
    pub victory_points: u32,
    /// Bullets donated so far.
    pub bullets_donated: f32,
    /// Bullet trees planted so far.
    pub trees_planted: u32,
    /// Gardeners hired so far.
    pub gardeners_hired: u32,
    /// Bullets collected by shaking.
    pub bullets_shaken: u32,
}

impl Default for TeamState {
    fn default() -> Self {
        Self {
            bullets: BULLETS_INITIAL_AMOUNT,
            victory_points: 0,
            bullets_donated: 0.0,
            trees_planted: 0,
            gardeners_hired: 0,
            bullets_shaken: 0,
        }
    }
}

/// Complete arena state.
#[derive(Debug, Clone)]
pub struct World {
    width: f32,
    height: f32,
    round: u32,
    robots: Vec<RobotBody>,
    trees: Vec<Tree>,
    bullets: Vec<BulletInfo>,
    teams: [TeamState; 2],
    next_robot_id: u32,
    next_tree_id: u32,
}

impl World {
    /// Create an empty world of the given size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            round: 0,
            robots: Vec::new(),
            trees: Vec::new(),
            bullets: Vec::new(),
            teams: [TeamState::default(); 2],
            next_robot_id: 1,
            next_tree_id: 1,
        }
    }

    /// Map width.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Map height.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Current round number (0-indexed).
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// All robots, in spawn order.
    #[must_use]
    pub fn robots(&self) -> &[RobotBody] {
        &self.robots
    }

    /// All trees, in spawn order.
    #[must_use]
    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    /// All bullets in flight.
    #[must_use]
    pub fn bullets(&self) -> &[BulletInfo] {
        &self.bullets
    }

    /// Resources of a team. Neutral has none.
    #[must_use]
    pub fn team_state(&self, team: Team) -> Option<&TeamState> {
        team_index(team).map(|i| &self.teams[i])
    }

    /// Mutable resources of a team.
    pub fn team_state_mut(&mut self, team: Team) -> Option<&mut TeamState> {
        team_index(team).map(|i| &mut self.teams[i])
    }

    /// Look up a robot.
    #[must_use]
    pub fn robot(&self, id: RobotId) -> Option<&RobotBody> {
        self.robots.iter().find(|r| r.id == id)
    }

    /// Look up a robot mutably.
    pub fn robot_mut(&mut self, id: RobotId) -> Option<&mut RobotBody> {
        self.robots.iter_mut().find(|r| r.id == id)
    }

    /// Look up a tree.
    #[must_use]
    pub fn tree(&self, id: TreeId) -> Option<&Tree> {
        self.trees.iter().find(|t| t.id == id)
    }

    /// Look up a tree mutably.
    pub fn tree_mut(&mut self, id: TreeId) -> Option<&mut Tree> {
        self.trees.iter_mut().find(|t| t.id == id)
    }

    /// Add a robot. The caller is responsible for checking placement.
    pub fn spawn_robot(
        &mut self,
        team: Team,
        robot_type: RobotType,
        location: MapLocation,
    ) -> RobotId {
        let id = RobotId(self.next_robot_id);
        self.next_robot_id += 1;
        self.robots.push(RobotBody {
            id,
            team,
            robot_type,
            location,
            build_cooldown: 0,
        });
        id
    }

    /// Add a tree. The caller is responsible for checking placement.
    pub fn spawn_tree(
        &mut self,
        team: Team,
        location: MapLocation,
        radius: f32,
        max_health: f32,
        contained_bullets: u32,
    ) -> TreeId {
        let id = TreeId(self.next_tree_id);
        self.next_tree_id += 1;
        self.trees.push(Tree {
            id,
            team,
            location,
            radius,
            health: max_health,
            max_health,
            contained_bullets,
        });
        id
    }

    /// Add a bullet in flight.
    pub fn add_bullet(&mut self, bullet: BulletInfo) {
        self.bullets.push(bullet);
    }

    /// Whether a circle lies fully inside the map.
    #[must_use]
    pub fn on_map(&self, center: MapLocation, radius: f32) -> bool {
        center.x - radius >= 0.0
            && center.y - radius >= 0.0
            && center.x + radius <= self.width
            && center.y + radius <= self.height
    }

    /// Whether a circle overlaps any robot (other than `ignore`) or tree.
    #[must_use]
    pub fn is_circle_occupied(
        &self,
        center: MapLocation,
        radius: f32,
        ignore: Option<RobotId>,
    ) -> bool {
        let overlaps = |location: MapLocation, other_radius: f32| {
            center.distance_to(location) < radius + other_radius - TOUCH_EPSILON
        };

        self.robots
            .iter()
            .filter(|r| Some(r.id) != ignore)
            .any(|r| overlaps(r.location, r.robot_type.body_radius()))
            || self.trees.iter().any(|t| overlaps(t.location, t.radius))
    }

    /// Whether a body of `radius` can be placed at `center`.
    #[must_use]
    pub fn can_place(&self, center: MapLocation, radius: f32, ignore: Option<RobotId>) -> bool {
        self.on_map(center, radius) && !self.is_circle_occupied(center, radius, ignore)
    }

    /// Trees of `team` with any part within `radius` of `center`, nearest first.
    #[must_use]
    pub fn sense_trees(&self, center: MapLocation, radius: f32, team: Team) -> Vec<TreeInfo> {
        let mut sensed: Vec<(f32, TreeInfo)> = self
            .trees
            .iter()
            .filter(|t| t.team == team)
            .map(|t| (center.distance_to(t.location), t))
            .filter(|(distance, t)| distance - t.radius <= radius)
            .map(|(distance, t)| (distance, t.info()))
            .collect();
        sensed.sort_by(|a, b| a.0.total_cmp(&b.0));
        sensed.into_iter().map(|(_, info)| info).collect()
    }

    /// Bullets within `radius` of `center`, nearest first.
    #[must_use]
    pub fn sense_bullets(&self, center: MapLocation, radius: f32) -> Vec<BulletInfo> {
        let mut sensed: Vec<(f32, BulletInfo)> = self
            .bullets
            .iter()
            .map(|b| (center.distance_to(b.location), *b))
            .filter(|(distance, _)| *distance <= radius)
            .collect();
        sensed.sort_by(|a, b| a.0.total_cmp(&b.0));
        sensed.into_iter().map(|(_, bullet)| bullet).collect()
    }

    /// Number of living trees owned by `team`.
    #[must_use]
    pub fn count_trees(&self, team: Team) -> usize {
        self.trees.iter().filter(|t| t.team == team).count()
    }

    /// Close the round: pay income, then age trees and build cooldowns.
    #[allow(clippy::cast_precision_loss)]
    pub fn end_round(&mut self) {
        for team in [Team::A, Team::B] {
            let trees = self.count_trees(team) as f32;
            if let Some(state) = self.team_state_mut(team) {
                state.bullets += BASE_BULLET_INCOME + trees * BULLET_TREE_INCOME;
            }
        }

        for tree in &mut self.trees {
            if tree.team != Team::Neutral {
                tree.health -= BULLET_TREE_DECAY_RATE;
            }
        }
        self.trees.retain(|t| t.health > 0.0);

        for robot in &mut self.robots {
            robot.build_cooldown = robot.build_cooldown.saturating_sub(1);
        }

        self.round += 1;
    }
}
