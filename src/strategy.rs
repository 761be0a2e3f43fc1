//! Per-robot turn strategies.
//!
//! A robot is activated once with its type, which selects its behaviour:
//! - Archons donate when the team can win outright, then hire gardeners
//! - Gardeners wander until they plant, shake neutral trees, plant bullet
//!   trees and water the weakest friendly tree
//! - Every other type idles
//!
//! Each turn is computed by [`Robot::take_turn`]. A fault raised part-way
//! through a turn ends that turn early and is reported as
//! [`TurnOutcome::Recovered`]; the robot keeps its state and plays the next
//! turn normally.

mod archon;
mod gardener;
mod navigation;

#[cfg(test)]
mod fake;

pub use archon::Archon;
pub use gardener::{Gardener, GardenerState};
pub use navigation::{
    incoming_bullets, try_move, try_move_with, will_collide, will_collide_with_me,
    DEFAULT_CHECKS_PER_SIDE, DEFAULT_DEGREE_OFFSET,
};

use std::f32::consts::TAU;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::StrategyConfig;
use crate::controller::{RobotController, RobotType};
use crate::error::GameActionResult;
use crate::geometry::Direction;
use crate::TurnOutcome;

/// A uniformly random heading.
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Direction {
    Direction::new(rng.gen_range(0.0..TAU))
}

/// Donate enough bullets to win if the team holds them.
///
/// Donates exactly [`StrategyConfig::donation_threshold`], never the whole
/// balance. Returns whether a donation was made.
///
/// # Errors
///
/// Propagates a fault raised by the donation command.
pub fn donate_to_win_if_possible<C: RobotController + ?Sized>(
    rc: &mut C,
    config: &StrategyConfig,
) -> GameActionResult<bool> {
    let threshold = config.donation_threshold();
    if rc.team_bullets() >= threshold {
        rc.donate(threshold)?;
        debug!(bullets = threshold, "donated to win");
        return Ok(true);
    }
    Ok(false)
}

/// The behaviour selected for a robot at activation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Robot {
    /// Hires gardeners.
    Archon(Archon),
    /// Plants and tends trees.
    Gardener(Gardener),
    /// A type with no behaviour; never acts.
    Idle(RobotType),
}

impl Robot {
    /// Select the behaviour for a robot of the given type.
    #[must_use]
    pub fn activate(robot_type: RobotType, config: StrategyConfig) -> Self {
        match robot_type {
            RobotType::Archon => Self::Archon(Archon::new(config)),
            RobotType::Gardener => Self::Gardener(Gardener::new(config)),
            other => Self::Idle(other),
        }
    }

    /// The robot type this behaviour was activated for.
    #[must_use]
    pub const fn role(&self) -> RobotType {
        match self {
            Self::Archon(_) => RobotType::Archon,
            Self::Gardener(_) => RobotType::Gardener,
            Self::Idle(robot_type) => *robot_type,
        }
    }

    /// Play one turn.
    ///
    /// Faults are contained here: the rest of the turn is skipped and the
    /// fault is returned as [`TurnOutcome::Recovered`].
    pub fn take_turn<C, R>(&mut self, rc: &mut C, rng: &mut R) -> TurnOutcome
    where
        C: RobotController + ?Sized,
        R: Rng + ?Sized,
    {
        let result = match self {
            Self::Archon(archon) => archon.take_turn(rc, rng),
            Self::Gardener(gardener) => gardener.take_turn(rc, rng),
            Self::Idle(_) => Ok(()),
        };
        match result {
            Ok(()) => TurnOutcome::Completed,
            Err(error) => TurnOutcome::Recovered(error),
        }
    }
}

/// Drive a robot until the host stops scheduling it.
///
/// Activates the robot from the controller's type, then plays a turn and
/// yields, forever or until [`RobotController::yield_turn`] breaks. Faulted
/// turns are logged and still end with a yield. Returns the number of turns
/// played.
pub fn run<C, R>(rc: &mut C, config: StrategyConfig, rng: &mut R) -> u32
where
    C: RobotController + ?Sized,
    R: Rng + ?Sized,
{
    let mut robot = Robot::activate(rc.robot_type(), config);
    info!(role = %robot.role(), team = %rc.team(), "robot activated");

    let mut turns = 0u32;
    loop {
        if let TurnOutcome::Recovered(error) = robot.take_turn(rc, rng) {
            warn!(role = %robot.role(), %error, "turn aborted by fault");
        }
        turns = turns.saturating_add(1);

        if rc.yield_turn().is_break() {
            return turns;
        }
    }
}
