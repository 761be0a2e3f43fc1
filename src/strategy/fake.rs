//! Scripted controller for strategy unit tests.

use std::cell::RefCell;
use std::ops::ControlFlow;

use crate::constants::BULLET_TREE_MAX_HEALTH;
use crate::controller::{
    BulletInfo, RobotController, RobotType, Team, TreeId, TreeInfo,
};
use crate::error::{ActionKind, GameActionError, GameActionResult};
use crate::geometry::{Direction, MapLocation};

/// One interaction a strategy had with the controller, in call order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Call {
    CanMove(Direction),
    Move(Direction),
    CanPlant(Direction),
    Plant(Direction),
    CanShake(TreeId),
    Shake(TreeId),
    CanWater(TreeId),
    Water(TreeId),
    CanHire(Direction),
    Hire(Direction),
    Donate(f32),
    Yield,
}

/// Whether two headings agree to within a small tolerance.
pub(crate) fn same_direction(a: Direction, b: Direction) -> bool {
    a.radians_between(b).abs() < 1e-3
}

/// A controller whose world is a handful of scripted answers.
#[derive(Debug)]
pub(crate) struct FakeController {
    pub(crate) robot_type: RobotType,
    pub(crate) team: Team,
    pub(crate) location: MapLocation,
    pub(crate) bullets: f32,
    pub(crate) legal_moves: Vec<Direction>,
    pub(crate) legal_moves_everywhere: bool,
    pub(crate) legal_plants: Vec<Direction>,
    /// Plants accepted before every planting direction turns illegal.
    pub(crate) plant_capacity: usize,
    /// Hires accepted before every hiring direction turns illegal.
    pub(crate) hire_capacity: usize,
    pub(crate) trees: Vec<TreeInfo>,
    pub(crate) unshakeable: Vec<TreeId>,
    pub(crate) unwaterable: Vec<TreeId>,
    /// Make every shake and water predicate fault.
    pub(crate) fault_all_trees: bool,
    pub(crate) sensed_bullets: Vec<BulletInfo>,
    /// Turns left before `yield_turn` breaks.
    pub(crate) turns_remaining: u32,
    calls: RefCell<Vec<Call>>,
}

impl FakeController {
    pub(crate) fn new(robot_type: RobotType) -> Self {
        Self {
            robot_type,
            team: Team::A,
            location: MapLocation::new(10.0, 10.0),
            bullets: 0.0,
            legal_moves: Vec::new(),
            legal_moves_everywhere: false,
            legal_plants: Vec::new(),
            plant_capacity: usize::MAX,
            hire_capacity: 0,
            trees: Vec::new(),
            unshakeable: Vec::new(),
            unwaterable: Vec::new(),
            fault_all_trees: false,
            sensed_bullets: Vec::new(),
            turns_remaining: 1,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn next_tree_id(&self) -> TreeId {
        #[allow(clippy::cast_possible_truncation)]
        TreeId(self.trees.len() as u32 + 1)
    }

    /// Add a neutral tree holding `bullets`, sensed after existing trees.
    pub(crate) fn add_neutral_tree(&mut self, bullets: u32) -> TreeId {
        let id = self.next_tree_id();
        self.trees.push(TreeInfo {
            id,
            team: Team::Neutral,
            location: self.location.add(Direction::east(), 2.0),
            radius: 1.0,
            health: BULLET_TREE_MAX_HEALTH,
            max_health: BULLET_TREE_MAX_HEALTH,
            contained_bullets: bullets,
        });
        id
    }

    /// Add a friendly tree with `health`, sensed after existing trees.
    pub(crate) fn add_friendly_tree(&mut self, health: f32) -> TreeId {
        let id = self.next_tree_id();
        self.trees.push(TreeInfo {
            id,
            team: self.team,
            location: self.location.add(Direction::north(), 2.0),
            radius: 1.0,
            health,
            max_health: BULLET_TREE_MAX_HEALTH,
            contained_bullets: 0,
        });
        id
    }

    /// Every call made so far.
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Forget recorded calls.
    pub(crate) fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Amounts passed to `donate`.
    pub(crate) fn donations(&self) -> Vec<f32> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Donate(amount) => Some(*amount),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn tree_exists(&self, tree: TreeId) -> GameActionResult<()> {
        if self.fault_all_trees || !self.trees.iter().any(|t| t.id == tree) {
            return Err(GameActionError::NoSuchTree(tree));
        }
        Ok(())
    }

    fn move_legal(&self, dir: Direction) -> bool {
        self.legal_moves_everywhere || self.legal_moves.iter().any(|&d| same_direction(d, dir))
    }

    fn plant_legal(&self, dir: Direction) -> bool {
        self.plant_capacity > 0 && self.legal_plants.iter().any(|&d| same_direction(d, dir))
    }
}

impl RobotController for FakeController {
    fn robot_type(&self) -> RobotType {
        self.robot_type
    }

    fn team(&self) -> Team {
        self.team
    }

    fn location(&self) -> MapLocation {
        self.location
    }

    fn team_bullets(&self) -> f32 {
        self.bullets
    }

    fn team_victory_points(&self) -> u32 {
        0
    }

    fn sense_nearby_trees(&self, _radius: f32, team: Team) -> Vec<TreeInfo> {
        self.trees.iter().filter(|t| t.team == team).copied().collect()
    }

    fn sense_nearby_bullets(&self, _radius: f32) -> Vec<BulletInfo> {
        self.sensed_bullets.clone()
    }

    fn can_move(&self, dir: Direction) -> bool {
        self.record(Call::CanMove(dir));
        self.move_legal(dir)
    }

    fn move_in(&mut self, dir: Direction) -> GameActionResult<()> {
        if !self.move_legal(dir) {
            return Err(GameActionError::illegal(ActionKind::Move));
        }
        self.record(Call::Move(dir));
        self.location = self.location.add(dir, self.robot_type.stride_radius());
        Ok(())
    }

    fn can_plant_tree(&self, dir: Direction) -> bool {
        self.record(Call::CanPlant(dir));
        self.plant_legal(dir)
    }

    fn plant_tree(&mut self, dir: Direction) -> GameActionResult<()> {
        if !self.plant_legal(dir) {
            return Err(GameActionError::illegal(ActionKind::Plant));
        }
        self.record(Call::Plant(dir));
        self.plant_capacity -= 1;
        Ok(())
    }

    fn can_shake(&self, tree: TreeId) -> GameActionResult<bool> {
        self.record(Call::CanShake(tree));
        self.tree_exists(tree)?;
        Ok(!self.unshakeable.contains(&tree))
    }

    fn shake(&mut self, tree: TreeId) -> GameActionResult<()> {
        if !self.can_shake(tree)? {
            return Err(GameActionError::illegal(ActionKind::Shake));
        }
        self.calls.get_mut().pop();
        self.record(Call::Shake(tree));
        Ok(())
    }

    fn can_water(&self, tree: TreeId) -> GameActionResult<bool> {
        self.record(Call::CanWater(tree));
        self.tree_exists(tree)?;
        Ok(!self.unwaterable.contains(&tree))
    }

    fn water(&mut self, tree: TreeId) -> GameActionResult<()> {
        if !self.can_water(tree)? {
            return Err(GameActionError::illegal(ActionKind::Water));
        }
        self.calls.get_mut().pop();
        self.record(Call::Water(tree));
        Ok(())
    }

    fn can_hire_gardener(&self, dir: Direction) -> bool {
        self.record(Call::CanHire(dir));
        self.hire_capacity > 0
    }

    fn hire_gardener(&mut self, dir: Direction) -> GameActionResult<()> {
        if self.hire_capacity == 0 {
            return Err(GameActionError::illegal(ActionKind::Hire));
        }
        self.record(Call::Hire(dir));
        self.hire_capacity -= 1;
        Ok(())
    }

    fn donate(&mut self, bullets: f32) -> GameActionResult<()> {
        if bullets <= 0.0 || bullets > self.bullets {
            return Err(GameActionError::InvalidAmount);
        }
        self.record(Call::Donate(bullets));
        self.bullets -= bullets;
        Ok(())
    }

    fn yield_turn(&mut self) -> ControlFlow<()> {
        self.record(Call::Yield);
        self.turns_remaining = self.turns_remaining.saturating_sub(1);
        if self.turns_remaining == 0 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}
