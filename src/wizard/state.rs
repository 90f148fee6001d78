//! Wizard position — top-level step and the sub-step state machine.

use serde::{Deserialize, Serialize};

use crate::error::TransitionError;

/// Top-level step shown in the header.
///
/// Only `First` is reachable through the normal flow; `Second` is kept as an
/// explicit, settable value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    First,
    Second,
}

impl Step {
    pub fn number(&self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }
}

impl TryFrom<u8> for Step {
    type Error = TransitionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            _ => Err(TransitionError::OutOfRange { kind: "step", value }),
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::First => "first",
            Self::Second => "second",
        };
        write!(f, "{s}")
    }
}

/// Screens within the first step.
///
/// Progresses Name → Phone → Confirmation; any later screen may restart at
/// Name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubStep {
    #[default]
    Name,
    Phone,
    Confirmation,
}

impl SubStep {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: SubStep) -> bool {
        use SubStep::*;
        matches!(
            (self, target),
            (Name, Phone) | (Phone, Confirmation) | (Phone, Name) | (Confirmation, Name)
        )
    }

    /// Whether this is the final screen.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmation)
    }

    /// The next screen in the forward progression, if any.
    pub fn next(&self) -> Option<SubStep> {
        match self {
            Self::Name => Some(Self::Phone),
            Self::Phone => Some(Self::Confirmation),
            Self::Confirmation => None,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Self::Name => 1,
            Self::Phone => 2,
            Self::Confirmation => 3,
        }
    }
}

impl TryFrom<u8> for SubStep {
    type Error = TransitionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Name),
            2 => Ok(Self::Phone),
            3 => Ok(Self::Confirmation),
            _ => Err(TransitionError::OutOfRange {
                kind: "sub-step",
                value,
            }),
        }
    }
}

impl std::fmt::Display for SubStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Confirmation => "confirmation",
        };
        write!(f, "{s}")
    }
}
