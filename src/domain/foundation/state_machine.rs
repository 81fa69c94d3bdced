//! Guarded status transitions.

use std::fmt::Debug;
use thiserror::Error;

/// A status move the lifecycle does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot move from {from:?} to {to:?}")]
pub struct IllegalTransition<S: Debug> {
    pub from: S,
    pub to: S,
}

/// Lifecycle statuses with an explicit transition table.
pub trait StateMachine: Sized + Copy + PartialEq + Debug + 'static {
    /// Allowed targets from this status, in preference order.
    fn successors(&self) -> &'static [Self];

    fn can_transition_to(&self, target: &Self) -> bool {
        self.successors().contains(target)
    }

    /// Returns `target` when the move is allowed.
    fn transition_to(&self, target: Self) -> Result<Self, IllegalTransition<Self>> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(IllegalTransition {
                from: *self,
                to: target,
            })
        }
    }

    fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }
}
