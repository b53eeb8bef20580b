use std::collections::BTreeSet;

use crate::Stage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Advance,
    Retreat,
}

impl Direction {
    pub fn offset(self) -> isize {
        match self {
            Direction::Advance => 1,
            Direction::Retreat => -1,
        }
    }
}

impl TryFrom<i8> for Direction {
    type Error = i8;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Direction::Advance),
            -1 => Ok(Direction::Retreat),
            other => Err(other),
        }
    }
}

/// Decides which stage changes need an explicit confirm before commit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConfirmationPolicy {
    /// Every stage change waits for confirmation.
    #[default]
    AllChanges,
    /// Confirmation when either side of the change is in the set.
    CriticalStages(BTreeSet<Stage>),
}

impl ConfirmationPolicy {
    pub fn critical_stages() -> Self {
        Self::CriticalStages(BTreeSet::from([
            Stage::Despacho,
            Stage::Transito,
            Stage::Entregado,
        ]))
    }

    pub fn requires_confirmation(&self, from: Stage, to: Stage) -> bool {
        match self {
            ConfirmationPolicy::AllChanges => from != to,
            ConfirmationPolicy::CriticalStages(stages) => {
                stages.contains(&from) || stages.contains(&to)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingTransition {
    pub id: u64,
    pub from: Stage,
    pub to: Stage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Quote already delivered, cannot go back")]
    AlreadyDelivered,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Unknown quote, pipeline boundary or stale confirmation.
    Unchanged,
    Rejected(Rejection),
    PendingConfirmation(PendingTransition),
    Applied { id: u64, stage: Stage },
}
