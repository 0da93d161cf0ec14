use super::command::Command;
use super::command::Outcome;
use super::error::TableError;
use super::history::Record;
use super::hooks::Audit;
use super::hooks::Ledger;
use super::hooks::NoAudit;
use super::hooks::NoLedger;
use super::session::Session;
use super::timer::TimerConfig;
use agp_core::Agent;
use agp_core::Chips;
use agp_core::ID;
use agp_core::Position;
use agp_core::Seq;
use agp_core::Unique;
use agp_gameplay::Action;
use agp_gameplay::Config;
use agp_gameplay::Game;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::oneshot;

/// Handle to one live table.
///
/// Cloning is cheap; every clone feeds the same single-inbox [`Session`]
/// task, so requests against one table are always serialized. When the
/// last handle drops, the session task drains and exits.
#[derive(Debug, Clone)]
pub struct Table {
    id: ID<Table>,
    inbox: mpsc::UnboundedSender<Command>,
}

impl Table {
    /// Spawns a session with explicit timers and collaborators.
    pub fn open(
        config: Config,
        timers: TimerConfig,
        audit: Arc<dyn Audit>,
        ledger: Arc<dyn Ledger>,
    ) -> Self {
        let id = ID::default();
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Session::new(id, config, timers, audit, ledger);
        tokio::spawn(session.run(rx));
        Self { id, inbox: tx }
    }

    /// Spawns a session with default timers and no-op collaborators.
    pub fn with_defaults(config: Config) -> Self {
        Self::open(
            config,
            TimerConfig::default(),
            Arc::new(NoAudit),
            Arc::new(NoLedger),
        )
    }

    /// Seats an agent with a buy-in; their credential rides along unverified.
    pub async fn seat(
        &self,
        agent: ID<Agent>,
        token: &str,
        buy_in: Chips,
    ) -> Result<Position, TableError> {
        let token = token.to_string();
        self.call(|reply| Command::Seat {
            agent,
            token,
            buy_in,
            reply,
        })
        .await?
    }

    /// Soft-removes an agent, returning the stack they cash out.
    pub async fn unseat(&self, agent: ID<Agent>) -> Result<Chips, TableError> {
        self.call(|reply| Command::Unseat { agent, reply }).await?
    }

    /// Deals the next hand to every funded, present seat.
    pub async fn start_hand(&self) -> Result<Outcome, TableError> {
        self.call(|reply| Command::Start { reply }).await?
    }

    /// Routes one action for `agent` through idempotency and replay
    /// checks into the engine.
    pub async fn act(
        &self,
        agent: ID<Agent>,
        action: Action,
        request: Option<&str>,
        seq: Option<Seq>,
    ) -> Result<Outcome, TableError> {
        let request = request.map(str::to_string);
        self.call(|reply| Command::Act {
            agent,
            action,
            request,
            seq,
            reply,
        })
        .await?
    }

    /// The current hand's full state, if one is live. Redacting hole cards
    /// for non-owners is the caller's concern.
    pub async fn snapshot(&self) -> Result<Option<Game>, TableError> {
        self.call(|reply| Command::Snapshot { reply }).await
    }

    /// The retained window of completed hands.
    pub async fn history(&self) -> Result<Vec<Record>, TableError> {
        self.call(|reply| Command::History { reply }).await
    }

    /// Marks the table closed and cancels its timer. Idempotent.
    pub async fn close(&self) {
        let _ = self.call(|reply| Command::Close { reply }).await;
    }

    async fn call<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, TableError> {
        let (tx, rx) = oneshot::channel();
        self.inbox
            .send(make(tx))
            .map_err(|_| TableError::TableClosed)?;
        rx.await.map_err(|_| TableError::TableClosed)
    }
}

impl Unique for Table {
    fn id(&self) -> ID<Table> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::Account;
    use agp_cards::SeededRng;
    use agp_gameplay::Event;
    use std::sync::Mutex;
    use std::time::Duration;

    fn quick() -> TimerConfig {
        TimerConfig {
            decision: Duration::from_millis(40),
        }
    }

    async fn open_pair(config: Config, timers: TimerConfig) -> (Table, ID<Agent>, ID<Agent>) {
        let table = Table::open(config, timers, Arc::new(NoAudit), Arc::new(NoLedger));
        let a = ID::default();
        let b = ID::default();
        table.seat(a, "token-a", 100).await.unwrap();
        table.seat(b, "token-b", 100).await.unwrap();
        (table, a, b)
    }

    async fn actor_of(table: &Table) -> ID<Agent> {
        table
            .snapshot()
            .await
            .unwrap()
            .expect("live hand")
            .actor()
            .expect("live hand has an actor")
            .player()
    }

    #[tokio::test]
    async fn seating_and_capacity() {
        let table = Table::with_defaults(Config::default().with_seats(2));
        let a = ID::default();
        assert_eq!(table.seat(a, "ta", 100).await.unwrap(), 0);
        assert_eq!(
            table.seat(a, "ta", 100).await.unwrap_err().code(),
            "AGENT_ALREADY_SEATED"
        );
        table.seat(ID::default(), "tb", 100).await.unwrap();
        assert_eq!(
            table.seat(ID::default(), "tc", 100).await.unwrap_err().code(),
            "TABLE_FULL"
        );
        assert_eq!(table.unseat(a).await.unwrap(), 100);
        assert_eq!(
            table.unseat(a).await.unwrap_err().code(),
            "AGENT_NOT_SEATED"
        );
    }

    #[tokio::test]
    async fn lone_player_cannot_start() {
        let table = Table::with_defaults(Config::default());
        table.seat(ID::default(), "t", 100).await.unwrap();
        assert_eq!(
            table.start_hand().await.unwrap_err().code(),
            "CANNOT_START_HAND"
        );
        assert!(table.snapshot().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn start_while_hand_live_rejected() {
        let (table, _, _) = open_pair(Config::default(), TimerConfig::default()).await;
        table.start_hand().await.unwrap();
        assert_eq!(
            table.start_hand().await.unwrap_err().code(),
            "CANNOT_START_HAND"
        );
    }

    #[tokio::test]
    async fn full_hand_settles_into_roster_and_history() {
        let (table, a, b) = open_pair(Config::default(), TimerConfig::default()).await;
        let outcome = table.start_hand().await.unwrap();
        assert!(!outcome.already_processed);
        assert!(matches!(outcome.events[0], Event::HandStart { .. }));
        // seat 0 deals and owes the small blind; folding ends it
        assert_eq!(actor_of(&table).await, a);
        let outcome = table.act(a, Action::Fold, None, None).await.unwrap();
        assert!(outcome.is_complete());
        assert!(table.snapshot().await.unwrap().is_none());
        let history = table.history().await.unwrap();
        assert_eq!(history.len(), 1);
        let record = &history[0];
        assert_eq!(record.hand, 1);
        assert_eq!(record.winners, vec![b]);
        let mut deltas = record.deltas.clone();
        deltas.sort_by_key(|(agent, _)| (*agent != a) as u8);
        assert_eq!(deltas[0].1, -1);
        assert_eq!(deltas[1].1, 1);
    }

    /// Scenario C: a retried request replays the cached outcome with no
    /// second chip movement.
    #[tokio::test]
    async fn duplicate_request_is_idempotent() {
        let (table, a, _) = open_pair(Config::default(), TimerConfig::default()).await;
        table.start_hand().await.unwrap();
        let first = table
            .act(a, Action::Call, Some("r1"), None)
            .await
            .unwrap();
        assert!(!first.already_processed);
        let replay = table
            .act(a, Action::Call, Some("r1"), None)
            .await
            .unwrap();
        assert!(replay.already_processed);
        assert_eq!(replay.events, first.events);
        assert_eq!(replay.state.pot(), first.state.pot());
        // the live state did not move either
        let snapshot = table.snapshot().await.unwrap().unwrap();
        assert_eq!(snapshot.pot(), first.state.pot());
        // even an outright illegal retry returns the cached result
        let replay = table
            .act(a, Action::Raise(999), Some("r1"), None)
            .await
            .unwrap();
        assert!(replay.already_processed);
    }

    #[tokio::test]
    async fn idempotency_cache_resets_per_hand() {
        let (table, a, b) = open_pair(Config::default(), TimerConfig::default()).await;
        table.start_hand().await.unwrap();
        table.act(a, Action::Fold, Some("r1"), None).await.unwrap();
        table.start_hand().await.unwrap();
        // same key, new hand: this is a fresh request, not a replay
        let actor = actor_of(&table).await;
        assert_eq!(actor, b); // button rotated
        let outcome = table.act(b, Action::Fold, Some("r1"), None).await.unwrap();
        assert!(!outcome.already_processed);
    }

    #[tokio::test]
    async fn stale_sequence_rejected_and_persists_across_hands() {
        let (table, a, b) = open_pair(Config::default(), TimerConfig::default()).await;
        table.start_hand().await.unwrap();
        table.act(a, Action::Call, None, Some(7)).await.unwrap();
        // a stale number is rejected before the engine even sees the action
        let error = table.act(a, Action::Check, None, Some(7)).await.unwrap_err();
        assert_eq!(error.code(), "REPLAY_DETECTED");
        let outcome = table.act(b, Action::Fold, None, Some(3)).await.unwrap();
        assert!(outcome.is_complete());
        table.start_hand().await.unwrap();
        // second hand: both counters survive the hand boundary
        assert_eq!(actor_of(&table).await, b);
        let error = table.act(b, Action::Call, None, Some(3)).await.unwrap_err();
        assert_eq!(error.code(), "REPLAY_DETECTED");
        table.act(b, Action::Call, None, Some(4)).await.unwrap();
        let error = table.act(a, Action::Check, None, Some(7)).await.unwrap_err();
        assert_eq!(error.code(), "REPLAY_DETECTED");
        table.act(a, Action::Check, None, Some(8)).await.unwrap();
    }

    #[tokio::test]
    async fn replay_rejection_does_not_mutate() {
        let (table, a, _) = open_pair(Config::default(), TimerConfig::default()).await;
        table.start_hand().await.unwrap();
        table.act(a, Action::Call, None, Some(5)).await.unwrap();
        let before = table.snapshot().await.unwrap().unwrap();
        let error = table.act(a, Action::Call, None, Some(5)).await.unwrap_err();
        assert_eq!(error.code(), "REPLAY_DETECTED");
        let after = table.snapshot().await.unwrap().unwrap();
        assert_eq!(before.pot(), after.pot());
        assert_eq!(before.street(), after.street());
    }

    /// Scenario D: a stalled seat folds when facing a wager.
    #[tokio::test]
    async fn timeout_folds_facing_a_wager() {
        let (table, _a, b) = open_pair(Config::default(), quick()).await;
        table.start_hand().await.unwrap();
        // nobody acts; the dealer owes the blind difference and folds out
        for _ in 0..100 {
            if !table.history().await.unwrap().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        let history = table.history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].winners, vec![b]);
        let total: Chips = history[0].deltas.iter().map(|(_, d)| d).sum();
        assert_eq!(total, 0);
    }

    /// Scenario D: when checking is legal the stalled seat checks, and the
    /// hand still terminates.
    #[tokio::test]
    async fn timeout_checks_down_to_showdown() {
        let (table, a, _) = open_pair(Config::default(), quick()).await;
        table.start_hand().await.unwrap();
        // dealer completes the blind, then everyone sleeps on the clock
        table.act(a, Action::Call, None, None).await.unwrap();
        for _ in 0..200 {
            if !table.history().await.unwrap().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        let history = table.history().await.unwrap();
        assert_eq!(history.len(), 1);
        // no fold happened: the hand ran out to a full board
        assert_eq!(history[0].board.len(), 5);
        let total: Chips = history[0].deltas.iter().map(|(_, d)| d).sum();
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn dealer_rotates_between_hands() {
        let (table, a, b) = open_pair(Config::default(), TimerConfig::default()).await;
        table.start_hand().await.unwrap();
        table.act(a, Action::Fold, None, None).await.unwrap();
        table.start_hand().await.unwrap();
        table.act(b, Action::Fold, None, None).await.unwrap();
        let history = table.history().await.unwrap();
        let dealers: Vec<_> = history.iter().map(|r| r.dealer).collect();
        assert_eq!(dealers, vec![0, 1]);
    }

    #[tokio::test]
    async fn close_is_idempotent_and_final() {
        let (table, a, _) = open_pair(Config::default(), TimerConfig::default()).await;
        table.close().await;
        table.close().await;
        assert_eq!(
            table.start_hand().await.unwrap_err().code(),
            "TABLE_CLOSED"
        );
        assert_eq!(
            table.act(a, Action::Fold, None, None).await.unwrap_err().code(),
            "TABLE_CLOSED"
        );
        assert_eq!(
            table.seat(ID::default(), "t", 100).await.unwrap_err().code(),
            "TABLE_CLOSED"
        );
    }

    struct Probe {
        seeds: Mutex<Vec<u64>>,
        events: Mutex<Vec<Event>>,
        transfers: Mutex<Vec<(String, Account, Account, Chips)>>,
    }

    impl Probe {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                seeds: Mutex::new(Vec::new()),
                events: Mutex::new(Vec::new()),
                transfers: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait::async_trait]
    impl Audit for Probe {
        async fn record(&self, _: ID<Table>, _: u64, seed: u64, events: Vec<Event>) {
            self.seeds.lock().unwrap().push(seed);
            self.events.lock().unwrap().extend(events);
        }
    }

    #[async_trait::async_trait]
    impl Ledger for Probe {
        async fn transfer(
            &self,
            reference: String,
            from: Account,
            to: Account,
            amount: Chips,
            _: String,
        ) {
            self.transfers
                .lock()
                .unwrap()
                .push((reference, from, to, amount));
        }
    }

    #[tokio::test]
    async fn collaborators_hear_about_completed_hands() {
        let probe = Probe::new();
        let table = Table::open(
            Config::default(),
            TimerConfig::default(),
            Arc::clone(&probe) as Arc<dyn Audit>,
            Arc::clone(&probe) as Arc<dyn Ledger>,
        );
        let a = ID::default();
        let b = ID::default();
        table.seat(a, "ta", 100).await.unwrap();
        table.seat(b, "tb", 100).await.unwrap();
        table.start_hand().await.unwrap();
        table.act(a, Action::Fold, None, None).await.unwrap();
        for _ in 0..100 {
            if !probe.transfers.lock().unwrap().is_empty()
                && !probe.seeds.lock().unwrap().is_empty()
            {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let seeds = probe.seeds.lock().unwrap();
        assert_eq!(seeds.len(), 1);
        let events = probe.events.lock().unwrap();
        assert!(matches!(events.first(), Some(Event::HandStart { .. })));
        assert!(matches!(events.last(), Some(Event::HandEnd { .. })));
        for pair in events.windows(2) {
            assert!(pair[0].seq() < pair[1].seq());
        }
        let transfers = probe.transfers.lock().unwrap();
        assert_eq!(transfers.len(), 2);
        let net: Chips = transfers
            .iter()
            .map(|(_, from, _, amount)| match from {
                Account::Table(_) => *amount,
                Account::Agent(_) => -amount,
            })
            .sum();
        assert_eq!(net, 0);
        // references are distinct, so the ledger can deduplicate retries
        assert_ne!(transfers[0].0, transfers[1].0);
    }

    #[tokio::test]
    async fn recorded_seed_reproduces_the_deal() {
        let (table, a, _) = open_pair(Config::default(), TimerConfig::default()).await;
        let outcome = table.start_hand().await.unwrap();
        let dealt = outcome.state.clone();
        table.act(a, Action::Fold, None, None).await.unwrap();
        let record = &table.history().await.unwrap()[0];
        let players: Vec<(ID<Agent>, agp_core::Position, Chips)> = dealt
            .seats()
            .iter()
            .map(|s| (s.player(), s.position(), s.stack() + s.spent()))
            .collect();
        let mut rng = SeededRng::new(record.seed);
        let (replayed, _) = agp_gameplay::Game::deal(
            record.hand,
            &players,
            record.dealer,
            &mut rng,
            Config::default(),
        )
        .unwrap();
        for (original, again) in dealt.seats().iter().zip(replayed.seats()) {
            assert_eq!(original.hole(), again.hole());
        }
    }

    #[tokio::test]
    async fn snapshot_is_none_between_hands() {
        let (table, _, _) = open_pair(Config::default(), TimerConfig::default()).await;
        assert!(table.snapshot().await.unwrap().is_none());
    }
}
