use super::table::Table;
use agp_core::Agent;
use agp_core::Chips;
use agp_core::ID;
use agp_gameplay::Event;

/// Party to a ledger transfer: the house side of a table, or an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Account {
    Table(ID<Table>),
    Agent(ID<Agent>),
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Account::Table(id) => write!(f, "table:{}", id),
            Account::Agent(id) => write!(f, "agent:{}", id),
        }
    }
}

/// Audit collaborator: consumes the per-hand event stream plus the seed
/// that produced the deal, enough to rebuild a tamper-evident log and
/// replay the hand deterministically.
///
/// Calls are fire-and-forget from the table's point of view: they run on
/// spawned tasks and must never block hand processing.
#[async_trait::async_trait]
pub trait Audit: Send + Sync {
    async fn record(&self, table: ID<Table>, hand: u64, seed: u64, events: Vec<Event>);
}

/// Ledger collaborator: applies chip movements idempotently, keyed by the
/// caller-supplied reference. Retrying a delivery re-sends the same
/// reference, so duplicates collapse on the ledger side.
#[async_trait::async_trait]
pub trait Ledger: Send + Sync {
    async fn transfer(
        &self,
        reference: String,
        from: Account,
        to: Account,
        amount: Chips,
        reason: String,
    );
}

/// Default audit sink: trace-logs and drops.
pub struct NoAudit;

#[async_trait::async_trait]
impl Audit for NoAudit {
    async fn record(&self, table: ID<Table>, hand: u64, seed: u64, events: Vec<Event>) {
        log::trace!(
            "[table {}] hand {} (seed {:016x}): {} events unrecorded",
            table,
            hand,
            seed,
            events.len()
        );
    }
}

/// Default ledger sink: trace-logs and drops.
pub struct NoLedger;

#[async_trait::async_trait]
impl Ledger for NoLedger {
    async fn transfer(
        &self,
        reference: String,
        from: Account,
        to: Account,
        amount: Chips,
        reason: String,
    ) {
        log::trace!(
            "[ledger] {} {} -> {} ({} chips, {})",
            reference,
            from,
            to,
            amount,
            reason
        );
    }
}
