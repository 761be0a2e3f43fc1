//! Gardener behaviour: wander, shake, plant, water.

use rand::Rng;
use tracing::debug;

use crate::config::StrategyConfig;
use crate::constants::BULLET_TREE_MAX_HEALTH;
use crate::controller::{RobotController, Team, TreeId};
use crate::error::GameActionResult;
use crate::geometry::Direction;
use crate::strategy::{donate_to_win_if_possible, random_direction, try_move_with};

/// State a gardener carries from turn to turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GardenerState {
    /// Set after the first planting pass with a legal direction. Never reset.
    pub planted_tree: bool,
}

/// Turn logic for a gardener.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gardener {
    config: StrategyConfig,
    state: GardenerState,
}

impl Gardener {
    /// Create a gardener behaviour with fresh state.
    #[must_use]
    pub fn new(config: StrategyConfig) -> Self {
        Self {
            config,
            state: GardenerState::default(),
        }
    }

    /// The state carried between turns.
    #[must_use]
    pub const fn state(&self) -> GardenerState {
        self.state
    }

    /// Play one turn.
    ///
    /// # Errors
    ///
    /// Propagates any fault raised by the controller. State changes made
    /// before the fault are kept.
    pub fn take_turn<C, R>(&mut self, rc: &mut C, rng: &mut R) -> GameActionResult<()>
    where
        C: RobotController + ?Sized,
        R: Rng + ?Sized,
    {
        donate_to_win_if_possible(rc, &self.config)?;

        if !self.state.planted_tree {
            try_move_with(
                rc,
                random_direction(rng),
                self.config.move_degree_offset,
                self.config.move_checks_per_side,
            )?;
        }

        self.shake_greatest_neutral_tree(rc)?;
        self.plant_new_tree(rc)?;
        self.water_lowest_tree(rc)?;
        Ok(())
    }

    /// Shake the nearby neutral tree holding the most bullets.
    ///
    /// Only trees that can be shaken are considered; ties go to the tree
    /// sensed first. Nothing is shaken if the best tree holds no bullets.
    /// Returns the shaken tree.
    ///
    /// # Errors
    ///
    /// Propagates any fault raised by the controller.
    pub fn shake_greatest_neutral_tree<C: RobotController + ?Sized>(
        &self,
        rc: &mut C,
    ) -> GameActionResult<Option<TreeId>> {
        let neutral_trees = rc.sense_nearby_trees(self.config.sense_radius, Team::Neutral);

        let mut greatest: Option<(TreeId, u32)> = None;
        for tree in &neutral_trees {
            if rc.can_shake(tree.id)?
                && greatest.is_none_or(|(_, bullets)| tree.contained_bullets > bullets)
            {
                greatest = Some((tree.id, tree.contained_bullets));
            }
        }

        match greatest {
            Some((id, bullets)) if bullets > 0 && rc.can_shake(id)? => {
                rc.shake(id)?;
                debug!(tree = %id, bullets, "shook neutral tree");
                Ok(Some(id))
            }
            _ => Ok(None),
        }
    }

    /// Plant bullet trees around the gardener.
    ///
    /// Collects the legal headings among [`StrategyConfig::build_attempts`]
    /// fixed headings counter-clockwise from east. If at least
    /// [`StrategyConfig::planting_threshold`] are legal, plants in every one
    /// of them that is still legal when its turn comes, then marks the
    /// gardener as planted whether or not any plant succeeded. Returns the
    /// number of trees planted.
    ///
    /// # Errors
    ///
    /// Propagates any fault raised by the controller.
    pub fn plant_new_tree<C: RobotController + ?Sized>(
        &mut self,
        rc: &mut C,
    ) -> GameActionResult<usize> {
        let mut plantable = Vec::new();
        let mut dir = Direction::east();
        for _ in 0..self.config.build_attempts {
            if rc.can_plant_tree(dir) {
                plantable.push(dir);
            }
            dir = dir.rotate_left_degrees(self.config.build_spacing_degrees);
        }

        if plantable.len() < self.config.planting_threshold {
            return Ok(0);
        }

        // TODO: plants in every legal heading; confirm whether one per pass was meant.
        let mut planted = 0;
        for &dir in &plantable {
            if rc.can_plant_tree(dir) {
                rc.plant_tree(dir)?;
                planted += 1;
                debug!(%dir, "planted tree");
            }
        }

        self.state.planted_tree = true;
        Ok(planted)
    }

    /// Water the nearby friendly tree with the least health.
    ///
    /// Only trees that can be watered are considered; ties go to the tree
    /// sensed first. Returns the watered tree.
    ///
    /// # Errors
    ///
    /// Propagates any fault raised by the controller.
    pub fn water_lowest_tree<C: RobotController + ?Sized>(
        &self,
        rc: &mut C,
    ) -> GameActionResult<Option<TreeId>> {
        let team = rc.team();
        let nearby_trees = rc.sense_nearby_trees(self.config.sense_radius, team);

        let mut lowest: Option<(TreeId, f32)> = None;
        for tree in &nearby_trees {
            let ceiling = lowest.map_or(BULLET_TREE_MAX_HEALTH + 1.0, |(_, health)| health);
            if rc.can_water(tree.id)? && tree.health < ceiling {
                lowest = Some((tree.id, tree.health));
            }
        }

        match lowest {
            Some((id, health)) if rc.can_water(id)? => {
                rc.water(id)?;
                debug!(tree = %id, health, "watered tree");
                Ok(Some(id))
            }
            _ => Ok(None),
        }
    }
}
