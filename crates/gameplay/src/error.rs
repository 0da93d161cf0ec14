use agp_core::Agent;
use agp_core::ID;

/// Engine rule violations.
///
/// Every variant carries a stable machine-readable code via [`code`];
/// the `Display` text is diagnostic only and not part of the contract.
/// These errors are deterministic and synchronous: the caller misused the
/// state machine, and retrying the identical call fails identically.
///
/// [`code`]: GameError::code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("hand cannot start: {0}")]
    CannotStart(String),
    #[error("hand is already complete")]
    HandAlreadyComplete,
    #[error("agent {0} is not the player to act")]
    NotYourTurn(ID<Agent>),
    #[error("action is not legal here: {0}")]
    InvalidAction(String),
    #[error("raise cap for this street has been reached")]
    RaiseCapReached,
}

impl GameError {
    /// Stable code crossing the API boundary.
    pub fn code(&self) -> &'static str {
        match self {
            Self::CannotStart(_) => "CANNOT_START_HAND",
            Self::HandAlreadyComplete => "HAND_ALREADY_COMPLETE",
            Self::NotYourTurn(_) => "NOT_YOUR_TURN",
            Self::InvalidAction(_) => "INVALID_ACTION",
            Self::RaiseCapReached => "RAISE_CAP_REACHED",
        }
    }
}
