// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Dendrophile: archon and gardener strategies for a tree-planting bot game.
//!
//! Each robot plays one turn at a time against a [`RobotController`], the
//! host's sensing and action surface. The crate provides:
//! - Turn strategies for archons (hire gardeners) and gardeners (wander,
//!   shake, plant, water), with donation to win when affordable
//! - Geometry helpers: obstacle-avoiding moves and a bullet collision test
//! - A deterministic headless arena for running matches and tournaments
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI (run, tournament, config)     │
//! ├─────────────────────────────────────┤
//! │   Arena (world rules, match runner) │
//! ├─────────────────────────────────────┤
//! │   RobotController trait             │
//! ├─────────────────────────────────────┤
//! │   Strategies (archon, gardener)     │
//! └─────────────────────────────────────┘
//! ```

pub mod arena;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod strategy;

pub use config::{ConfigError, StrategyConfig};
pub use controller::{BulletInfo, RobotController, RobotId, RobotType, Team, TreeId, TreeInfo};
pub use error::{ActionKind, GameActionError, GameActionResult};
pub use geometry::{Direction, MapLocation};
pub use strategy::{Robot, run};

/// Result of playing one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Every step of the turn ran.
    Completed,
    /// A fault ended the turn early. The robot plays its next turn normally.
    Recovered(GameActionError),
}

impl TurnOutcome {
    /// Whether the turn was cut short by a fault.
    #[must_use]
    pub const fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_outcome_debug() {
        let outcome = TurnOutcome::Recovered(GameActionError::NoSuchTree(TreeId(3)));
        let debug = format!("{outcome:?}");
        assert!(debug.contains("Recovered"));
        assert!(debug.contains("NoSuchTree"));
        assert!(!TurnOutcome::Completed.is_recovered());
    }
}
