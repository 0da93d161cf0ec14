use super::error::TableError;
use super::history::Record;
use agp_core::Agent;
use agp_core::Chips;
use agp_core::ID;
use agp_core::Position;
use agp_core::Seq;
use agp_gameplay::Action;
use agp_gameplay::Event;
use agp_gameplay::Game;
use tokio::sync::oneshot;

/// Result of a table request that touched the current hand.
///
/// `already_processed` marks a request replayed from the idempotency
/// cache: the events and state are the original outcome, re-delivered
/// without re-execution.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub already_processed: bool,
    pub events: Vec<Event>,
    pub state: Game,
}

impl Outcome {
    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }
    /// The cached outcome as delivered to a retried request.
    pub(crate) fn replayed(&self) -> Self {
        Self {
            already_processed: true,
            events: self.events.clone(),
            state: self.state.clone(),
        }
    }
}

/// The table's single inbox: every mutation of table state flows through
/// exactly one of these, so no two actions ever interleave.
pub(crate) enum Command {
    Seat {
        agent: ID<Agent>,
        token: String,
        buy_in: Chips,
        reply: oneshot::Sender<Result<Position, TableError>>,
    },
    Unseat {
        agent: ID<Agent>,
        reply: oneshot::Sender<Result<Chips, TableError>>,
    },
    Start {
        reply: oneshot::Sender<Result<Outcome, TableError>>,
    },
    Act {
        agent: ID<Agent>,
        action: Action,
        request: Option<String>,
        seq: Option<Seq>,
        reply: oneshot::Sender<Result<Outcome, TableError>>,
    },
    Snapshot {
        reply: oneshot::Sender<Option<Game>>,
    },
    History {
        reply: oneshot::Sender<Vec<Record>>,
    },
    Close {
        reply: oneshot::Sender<()>,
    },
}
