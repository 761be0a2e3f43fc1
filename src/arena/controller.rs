//! The arena's implementation of [`RobotController`].

use std::ops::ControlFlow;

use super::world::{RobotBody, Tree, World, GENERAL_SPAWN_OFFSET};
use crate::constants::{
    BUILD_COOLDOWN_ROUNDS, BULLET_TREE_COST, BULLET_TREE_MAX_HEALTH, BULLET_TREE_RADIUS,
    INTERACTION_DIST_FROM_EDGE, WATER_HEALTH_REGEN_RATE,
};
use crate::controller::{BulletInfo, RobotController, RobotId, RobotType, Team, TreeId, TreeInfo};
use crate::error::{ActionKind, GameActionError, GameActionResult};
use crate::geometry::{Direction, MapLocation};

/// Relative slack when converting a donation to points. Covers the `f32`
/// rounding of `rate × points`, so donating that product buys every point.
const DONATION_SLACK: f64 = 1e-6;

/// One robot's view of the world for the duration of a single turn.
///
/// Tracks the once-per-turn actions, so a fresh controller must be created
/// for every turn.
#[derive(Debug)]
pub struct ArenaController<'w> {
    world: &'w mut World,
    body: RobotBody,
    exchange_rate: f32,
    moved: bool,
    shaken: bool,
    watered: bool,
}

impl<'w> ArenaController<'w> {
    /// Open a turn for robot `id`. Returns `None` if the robot does not exist.
    #[must_use]
    pub fn new(world: &'w mut World, id: RobotId, exchange_rate: f32) -> Option<Self> {
        let body = *world.robot(id)?;
        Some(Self {
            world,
            body,
            exchange_rate,
            moved: false,
            shaken: false,
            watered: false,
        })
    }

    /// Where a body of `radius` built by this robot in `dir` would stand.
    fn build_location(&self, dir: Direction, radius: f32) -> MapLocation {
        self.body.location.add(
            dir,
            self.body.robot_type.body_radius() + radius + GENERAL_SPAWN_OFFSET,
        )
    }

    fn can_build(&self, builder: RobotType, cost: f32) -> bool {
        self.body.robot_type == builder
            && self.body.build_cooldown == 0
            && self.team_bullets() >= cost
    }

    fn in_reach(&self, tree: &Tree) -> bool {
        let edge_distance = self.body.location.distance_to(tree.location)
            - self.body.robot_type.body_radius()
            - tree.radius;
        edge_distance <= INTERACTION_DIST_FROM_EDGE
    }

    fn find_tree(&self, id: TreeId) -> GameActionResult<&Tree> {
        self.world.tree(id).ok_or(GameActionError::NoSuchTree(id))
    }

    /// Spend `cost` bullets and start the build cooldown.
    fn pay_for_build(&mut self, cost: f32, action: ActionKind) -> GameActionResult<()> {
        let team = self
            .world
            .team_state_mut(self.body.team)
            .ok_or(GameActionError::illegal(action))?;
        team.bullets -= cost;
        match action {
            ActionKind::Plant => team.trees_planted += 1,
            ActionKind::Hire => team.gardeners_hired += 1,
            _ => {}
        }

        self.body.build_cooldown = BUILD_COOLDOWN_ROUNDS;
        if let Some(body) = self.world.robot_mut(self.body.id) {
            body.build_cooldown = BUILD_COOLDOWN_ROUNDS;
        }
        Ok(())
    }
}

impl RobotController for ArenaController<'_> {
    fn robot_type(&self) -> RobotType {
        self.body.robot_type
    }

    fn team(&self) -> Team {
        self.body.team
    }

    fn location(&self) -> MapLocation {
        self.body.location
    }

    fn team_bullets(&self) -> f32 {
        self.world
            .team_state(self.body.team)
            .map_or(0.0, |state| state.bullets)
    }

    fn team_victory_points(&self) -> u32 {
        self.world
            .team_state(self.body.team)
            .map_or(0, |state| state.victory_points)
    }

    fn sense_nearby_trees(&self, radius: f32, team: Team) -> Vec<TreeInfo> {
        self.world.sense_trees(self.body.location, radius, team)
    }

    fn sense_nearby_bullets(&self, radius: f32) -> Vec<BulletInfo> {
        self.world.sense_bullets(self.body.location, radius)
    }

    fn can_move(&self, dir: Direction) -> bool {
        let destination = self
            .body
            .location
            .add(dir, self.body.robot_type.stride_radius());
        !self.moved
            && self.world.can_place(
                destination,
                self.body.robot_type.body_radius(),
                Some(self.body.id),
            )
    }

    fn move_in(&mut self, dir: Direction) -> GameActionResult<()> {
        if !self.can_move(dir) {
            return Err(GameActionError::illegal(ActionKind::Move));
        }
        let destination = self
            .body
            .location
            .add(dir, self.body.robot_type.stride_radius());
        self.body.location = destination;
        if let Some(body) = self.world.robot_mut(self.body.id) {
            body.location = destination;
        }
        self.moved = true;
        Ok(())
    }

    fn can_plant_tree(&self, dir: Direction) -> bool {
        self.can_build(RobotType::Gardener, BULLET_TREE_COST)
            && self.world.can_place(
                self.build_location(dir, BULLET_TREE_RADIUS),
                BULLET_TREE_RADIUS,
                None,
            )
    }

    fn plant_tree(&mut self, dir: Direction) -> GameActionResult<()> {
        if !self.can_plant_tree(dir) {
            return Err(GameActionError::illegal(ActionKind::Plant));
        }
        let location = self.build_location(dir, BULLET_TREE_RADIUS);
        self.pay_for_build(BULLET_TREE_COST, ActionKind::Plant)?;
        self.world.spawn_tree(
            self.body.team,
            location,
            BULLET_TREE_RADIUS,
            BULLET_TREE_MAX_HEALTH,
            0,
        );
        Ok(())
    }

    fn can_shake(&self, tree: TreeId) -> GameActionResult<bool> {
        let tree = self.find_tree(tree)?;
        Ok(!self.shaken && self.in_reach(tree))
    }

    #[allow(clippy::cast_precision_loss)]
    fn shake(&mut self, tree: TreeId) -> GameActionResult<()> {
        if !self.can_shake(tree)? {
            return Err(GameActionError::illegal(ActionKind::Shake));
        }
        let bullets = self
            .world
            .tree_mut(tree)
            .map_or(0, |t| std::mem::take(&mut t.contained_bullets));
        let team = self
            .world
            .team_state_mut(self.body.team)
            .ok_or(GameActionError::illegal(ActionKind::Shake))?;
        team.bullets += bullets as f32;
        team.bullets_shaken += bullets;
        self.shaken = true;
        Ok(())
    }

    fn can_water(&self, tree: TreeId) -> GameActionResult<bool> {
        let tree = self.find_tree(tree)?;
        Ok(self.body.robot_type == RobotType::Gardener && !self.watered && self.in_reach(tree))
    }

    fn water(&mut self, tree: TreeId) -> GameActionResult<()> {
        if !self.can_water(tree)? {
            return Err(GameActionError::illegal(ActionKind::Water));
        }
        let tree = self
            .world
            .tree_mut(tree)
            .ok_or(GameActionError::NoSuchTree(tree))?;
        tree.health = (tree.health + WATER_HEALTH_REGEN_RATE).min(tree.max_health);
        self.watered = true;
        Ok(())
    }

    fn can_hire_gardener(&self, dir: Direction) -> bool {
        let radius = RobotType::Gardener.body_radius();
        self.can_build(RobotType::Archon, RobotType::Gardener.bullet_cost())
            && self
                .world
                .can_place(self.build_location(dir, radius), radius, None)
    }

    fn hire_gardener(&mut self, dir: Direction) -> GameActionResult<()> {
        if !self.can_hire_gardener(dir) {
            return Err(GameActionError::illegal(ActionKind::Hire));
        }
        let location = self.build_location(dir, RobotType::Gardener.body_radius());
        self.pay_for_build(RobotType::Gardener.bullet_cost(), ActionKind::Hire)?;
        self.world
            .spawn_robot(self.body.team, RobotType::Gardener, location);
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn donate(&mut self, bullets: f32) -> GameActionResult<()> {
        if !(bullets.is_finite() && bullets > 0.0) || bullets > self.team_bullets() {
            return Err(GameActionError::InvalidAmount);
        }
        let quotient = f64::from(bullets) / f64::from(self.exchange_rate);
        let points = (quotient * (1.0 + DONATION_SLACK)).floor() as u32;
        let team = self
            .world
            .team_state_mut(self.body.team)
            .ok_or(GameActionError::InvalidAmount)?;
        team.bullets -= bullets;
        team.bullets_donated += bullets;
        team.victory_points = team.victory_points.saturating_add(points);
        Ok(())
    }

    fn yield_turn(&mut self) -> ControlFlow<()> {
        ControlFlow::Break(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StrategyConfig;
    use crate::constants::BULLETS_INITIAL_AMOUNT;
    use crate::strategy::donate_to_win_if_possible;

    fn world_with(robot_type: RobotType) -> (World, RobotId) {
        let mut world = World::new(40.0, 40.0);
        let id = world.spawn_robot(Team::A, robot_type, MapLocation::new(20.0, 20.0));
        (world, id)
    }

    fn open(world: &mut World, id: RobotId) -> ArenaController<'_> {
        ArenaController::new(world, id, 10.0).unwrap()
    }

    #[test]
    fn test_missing_robot() {
        let mut world = World::new(40.0, 40.0);
        assert!(ArenaController::new(&mut world, RobotId(9), 10.0).is_none());
    }

    #[test]
    fn test_move_once_per_turn() {
        let (mut world, id) = world_with(RobotType::Gardener);
        let mut rc = open(&mut world, id);

        assert!(rc.can_move(Direction::east()));
        rc.move_in(Direction::east()).unwrap();
        assert!((rc.location().x - 21.0).abs() < 1e-4);
        assert!(!rc.can_move(Direction::east()));
        assert_eq!(
            rc.move_in(Direction::east()),
            Err(GameActionError::illegal(ActionKind::Move))
        );

        assert!((world.robot(id).unwrap().location.x - 21.0).abs() < 1e-4);
    }

    #[test]
    fn test_move_blocked_by_edge_and_trees() {
        let mut world = World::new(40.0, 40.0);
        let id = world.spawn_robot(Team::A, RobotType::Gardener, MapLocation::new(1.5, 20.0));
        world.spawn_tree(Team::Neutral, MapLocation::new(1.5, 22.5), 1.0, 25.0, 0);
        let rc = open(&mut world, id);

        assert!(!rc.can_move(Direction::west()));
        assert!(!rc.can_move(Direction::north()));
        assert!(rc.can_move(Direction::east()));
    }

    #[test]
    fn test_plant_costs_and_cools_down() {
        let (mut world, id) = world_with(RobotType::Gardener);
        let mut rc = open(&mut world, id);

        assert!(rc.can_plant_tree(Direction::north()));
        rc.plant_tree(Direction::north()).unwrap();
        assert!(!rc.can_plant_tree(Direction::south()));

        let team = world.team_state(Team::A).unwrap();
        assert!((team.bullets - (BULLETS_INITIAL_AMOUNT - BULLET_TREE_COST)).abs() < 1e-3);
        assert_eq!(team.trees_planted, 1);
        assert_eq!(world.count_trees(Team::A), 1);
        assert_eq!(world.robot(id).unwrap().build_cooldown, BUILD_COOLDOWN_ROUNDS);

        // The new tree touches the gardener and is within reach.
        let tree = world.trees()[0];
        let rc = open(&mut world, id);
        assert!(rc.can_water(tree.id).unwrap());
        assert!(!rc.can_move(Direction::north()));
    }

    #[test]
    fn test_archon_cannot_plant_and_gardener_cannot_hire() {
        let (mut world, archon) = world_with(RobotType::Archon);
        let gardener = world.spawn_robot(Team::A, RobotType::Gardener, MapLocation::new(5.0, 5.0));

        assert!(!open(&mut world, archon).can_plant_tree(Direction::west()));
        assert!(open(&mut world, archon).can_hire_gardener(Direction::west()));
        assert!(!open(&mut world, gardener).can_hire_gardener(Direction::east()));
    }

    #[test]
    fn test_hire_spawns_gardener() {
        let (mut world, id) = world_with(RobotType::Archon);
        let mut rc = open(&mut world, id);
        rc.hire_gardener(Direction::west()).unwrap();
        assert!(!rc.can_hire_gardener(Direction::east()));

        assert_eq!(world.robots().len(), 2);
        let hired = world.robots()[1];
        assert_eq!(hired.robot_type, RobotType::Gardener);
        assert_eq!(hired.team, Team::A);
        assert!((hired.location.distance_to(MapLocation::new(20.0, 20.0)) - 3.01).abs() < 1e-3);
        assert_eq!(world.team_state(Team::A).unwrap().gardeners_hired, 1);
    }

    #[test]
    fn test_hire_needs_bullets() {
        let (mut world, id) = world_with(RobotType::Archon);
        world.team_state_mut(Team::A).unwrap().bullets = 99.0;
        assert!(!open(&mut world, id).can_hire_gardener(Direction::west()));
    }

    #[test]
    fn test_shake_once_per_turn() {
        let (mut world, id) = world_with(RobotType::Gardener);
        let near = world.spawn_tree(Team::Neutral, MapLocation::new(22.5, 20.0), 1.0, 25.0, 12);
        let other = world.spawn_tree(Team::Neutral, MapLocation::new(17.5, 20.0), 1.0, 25.0, 4);
        let far = world.spawn_tree(Team::Neutral, MapLocation::new(30.0, 20.0), 1.0, 25.0, 4);
        let mut rc = open(&mut world, id);

        assert!(!rc.can_shake(far).unwrap());
        assert_eq!(rc.can_shake(TreeId(99)), Err(GameActionError::NoSuchTree(TreeId(99))));

        rc.shake(near).unwrap();
        assert!(!rc.can_shake(other).unwrap());
        assert!(rc.shake(other).is_err());

        let team = world.team_state(Team::A).unwrap();
        assert!((team.bullets - (BULLETS_INITIAL_AMOUNT + 12.0)).abs() < 1e-3);
        assert_eq!(team.bullets_shaken, 12);
        assert_eq!(world.tree(near).unwrap().contained_bullets, 0);
    }

    #[test]
    fn test_water_restores_up_to_max() {
        let (mut world, id) = world_with(RobotType::Gardener);
        let tree = world.spawn_tree(Team::A, MapLocation::new(22.01, 20.0), 1.0, 50.0, 0);
        world.tree_mut(tree).unwrap().health = 47.0;

        let mut rc = open(&mut world, id);
        rc.water(tree).unwrap();
        assert!(!rc.can_water(tree).unwrap());
        assert!((world.tree(tree).unwrap().health - 50.0).abs() < 1e-3);

        world.tree_mut(tree).unwrap().health = 30.0;
        open(&mut world, id).water(tree).unwrap();
        assert!((world.tree(tree).unwrap().health - 35.0).abs() < 1e-3);
    }

    #[test]
    fn test_archon_cannot_water() {
        let (mut world, id) = world_with(RobotType::Archon);
        let tree = world.spawn_tree(Team::A, MapLocation::new(23.5, 20.0), 1.0, 50.0, 0);
        let rc = open(&mut world, id);
        assert!(!rc.can_water(tree).unwrap());
    }

    #[test]
    fn test_donate() {
        let (mut world, id) = world_with(RobotType::Archon);
        let mut rc = open(&mut world, id);

        rc.donate(125.0).unwrap();
        assert_eq!(rc.team_victory_points(), 12);
        assert!((rc.team_bullets() - 175.0).abs() < 1e-3);

        assert_eq!(rc.donate(0.0), Err(GameActionError::InvalidAmount));
        assert_eq!(rc.donate(-5.0), Err(GameActionError::InvalidAmount));
        assert_eq!(rc.donate(f32::NAN), Err(GameActionError::InvalidAmount));
        assert_eq!(rc.donate(176.0), Err(GameActionError::InvalidAmount));
        assert_eq!(rc.team_victory_points(), 12);
    }

    #[test]
    fn test_donating_threshold_buys_every_point() {
        let rates = [0.3_f32, 0.6, 0.7, 1.2, 1.4, 2.3, 7.9, 13.7, 19.9];
        for rate in rates {
            for points in [7_u32, 13, 100, 333, 1000] {
                let config = StrategyConfig {
                    bullet_exchange_rate: rate,
                    victory_points_to_win: points,
                    ..StrategyConfig::default()
                };
                let (mut world, id) = world_with(RobotType::Archon);
                world.team_state_mut(Team::A).unwrap().bullets = config.donation_threshold();

                let mut rc = ArenaController::new(&mut world, id, rate).unwrap();
                assert!(donate_to_win_if_possible(&mut rc, &config).unwrap());
                assert_eq!(rc.team_victory_points(), points, "rate {rate}");
            }
        }
    }

    #[test]
    fn test_donation_rounds_down_partial_points() {
        let (mut world, id) = world_with(RobotType::Archon);
        let mut rc = ArenaController::new(&mut world, id, 0.7).unwrap();
        rc.donate(2.0).unwrap();
        assert_eq!(rc.team_victory_points(), 2);
    }

    #[test]
    fn test_yield_hands_back_control() {
        let (mut world, id) = world_with(RobotType::Scout);
        assert!(open(&mut world, id).yield_turn().is_break());
    }
}
