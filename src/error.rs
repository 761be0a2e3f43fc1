//! Error types for controller actions.

use thiserror::Error;

use crate::controller::TreeId;

/// The kind of action a command performs, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Move the robot's body.
    Move,
    /// Plant a bullet tree.
    Plant,
    /// Shake a tree for its bullets.
    Shake,
    /// Water a friendly tree.
    Water,
    /// Hire a gardener.
    Hire,
    /// Donate bullets for victory points.
    Donate,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Move => "move",
            Self::Plant => "plant",
            Self::Shake => "shake",
            Self::Water => "water",
            Self::Hire => "hire",
            Self::Donate => "donate",
        };
        f.write_str(name)
    }
}

/// Faults raised by the host while a robot senses or acts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameActionError {
    /// A command was issued while its legality predicate was false.
    #[error("illegal {action} action")]
    IllegalAction {
        /// The rejected action.
        action: ActionKind,
    },
    /// A tree identity does not refer to any tree in the world.
    #[error("no tree with id {0}")]
    NoSuchTree(TreeId),
    /// A donation amount was non-positive or exceeded the team's bullets.
    #[error("invalid bullet amount")]
    InvalidAmount,
}

impl GameActionError {
    /// Shorthand for an [`GameActionError::IllegalAction`] of the given kind.
    #[must_use]
    pub const fn illegal(action: ActionKind) -> Self {
        Self::IllegalAction { action }
    }
}

/// Result type for controller actions.
pub type GameActionResult<T> = Result<T, GameActionError>;
