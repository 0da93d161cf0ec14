use agp_core::Agent;
use agp_core::ID;
use agp_core::Seq;
use agp_gameplay::GameError;

/// Table-level failures, engine errors included by transparent wrapping.
///
/// As with [`GameError`], the stable contract is [`code`]; display text is
/// diagnostic only. Replay detection never mutates state, and seat
/// management errors are reported at seating time, never during play.
///
/// [`code`]: TableError::code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("sequence {got} does not advance past {seen}")]
    ReplayDetected { seen: Seq, got: Seq },
    #[error("no seats left at the table")]
    TableFull,
    #[error("agent {0} is already seated")]
    AgentAlreadySeated(ID<Agent>),
    #[error("agent {0} is not seated here")]
    AgentNotSeated(ID<Agent>),
    #[error("cannot start a hand: {0}")]
    CannotStart(String),
    #[error("table is closed")]
    TableClosed,
}

impl TableError {
    /// Stable code crossing the API boundary.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Game(e) => e.code(),
            Self::ReplayDetected { .. } => "REPLAY_DETECTED",
            Self::TableFull => "TABLE_FULL",
            Self::AgentAlreadySeated(_) => "AGENT_ALREADY_SEATED",
            Self::AgentNotSeated(_) => "AGENT_NOT_SEATED",
            Self::CannotStart(_) => "CANNOT_START_HAND",
            Self::TableClosed => "TABLE_CLOSED",
        }
    }
}
