use super::command::Command;
use super::command::Outcome;
use super::error::TableError;
use super::history::History;
use super::history::Record;
use super::hooks::Account;
use super::hooks::Audit;
use super::hooks::Ledger;
use super::roster::Roster;
use super::table::Table;
use super::timer::Timer;
use super::timer::TimerConfig;
use agp_cards::SeededRng;
use agp_core::Agent;
use agp_core::Chips;
use agp_core::ID;
use agp_core::Position;
use agp_core::Seq;
use agp_core::fnv1a;
use agp_gameplay::Action;
use agp_gameplay::Config;
use agp_gameplay::Event;
use agp_gameplay::Game;
use agp_gameplay::GameError;
use agp_gameplay::position;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::Instant;

/// How many completed hands the table keeps in memory.
const HISTORY_WINDOW: usize = 128;

/// Owns one table's live state and consumes its command inbox.
///
/// All state mutation happens on this task; the [`Table`] handle is just a
/// sender. The one asynchronous element is the inactivity deadline, which
/// shares the select loop with the inbox so a firing timer can never
/// interleave with a half-processed command.
///
/// Failure isolation: engine errors go back to the caller per request, and
/// because the engine is copy-on-write a failed call leaves the stored
/// state untouched. Nothing here can corrupt a neighboring table.
pub(crate) struct Session {
    id: ID<Table>,
    config: Config,
    roster: Roster,
    dealer: Option<Position>,
    game: Option<Game>,
    journal: Vec<Event>,
    entry: Vec<(ID<Agent>, Chips)>,
    seed: u64,
    hands: u64,
    nonce: u64,
    cache: HashMap<String, Outcome>,
    watermarks: HashMap<ID<Agent>, Seq>,
    history: History,
    timer: Timer,
    audit: Arc<dyn Audit>,
    ledger: Arc<dyn Ledger>,
    closed: bool,
}

impl Session {
    pub(crate) fn new(
        id: ID<Table>,
        config: Config,
        timers: TimerConfig,
        audit: Arc<dyn Audit>,
        ledger: Arc<dyn Ledger>,
    ) -> Self {
        Self {
            id,
            config,
            roster: Roster::new(config.max_players),
            dealer: None,
            game: None,
            journal: Vec::new(),
            entry: Vec::new(),
            seed: 0,
            hands: 0,
            nonce: 0,
            cache: HashMap::new(),
            watermarks: HashMap::new(),
            history: History::new(HISTORY_WINDOW),
            timer: Timer::new(timers),
            audit,
            ledger,
            closed: false,
        }
    }

    pub(crate) async fn run(mut self, mut inbox: UnboundedReceiver<Command>) {
        log::debug!("[table {}] session up", self.id);
        loop {
            let deadline = self.timer.deadline();
            tokio::select! {
                biased;
                command = inbox.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
                _ = Self::sleep(deadline), if deadline.is_some() => self.expire(),
            }
        }
        log::debug!("[table {}] session down", self.id);
    }

    async fn sleep(deadline: Option<Instant>) {
        match deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => tokio::time::sleep(Duration::from_secs(86400)).await,
        }
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Seat {
                agent,
                token,
                buy_in,
                reply,
            } => {
                let _ = reply.send(self.seat(agent, &token, buy_in));
            }
            Command::Unseat { agent, reply } => {
                let _ = reply.send(self.unseat(agent));
            }
            Command::Start { reply } => {
                let _ = reply.send(self.start());
            }
            Command::Act {
                agent,
                action,
                request,
                seq,
                reply,
            } => {
                let _ = reply.send(self.act(agent, action, request, seq));
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.game.clone());
            }
            Command::History { reply } => {
                let _ = reply.send(self.history.to_vec());
            }
            Command::Close { reply } => {
                self.close();
                let _ = reply.send(());
            }
        }
    }

    fn seat(
        &mut self,
        agent: ID<Agent>,
        token: &str,
        buy_in: Chips,
    ) -> Result<Position, TableError> {
        if self.closed {
            return Err(TableError::TableClosed);
        }
        let position = self.roster.seat(agent, token, buy_in)?;
        log::info!(
            "[table {}] agent {} takes seat {} ({} chips)",
            self.id,
            agent,
            position,
            buy_in
        );
        Ok(position)
    }

    fn unseat(&mut self, agent: ID<Agent>) -> Result<Chips, TableError> {
        let stack = self.roster.unseat(agent)?;
        log::info!("[table {}] agent {} leaves with {}", self.id, agent, stack);
        Ok(stack)
    }

    fn start(&mut self) -> Result<Outcome, TableError> {
        if self.closed {
            return Err(TableError::TableClosed);
        }
        if self.game.is_some() {
            return Err(TableError::CannotStart("hand in progress".into()));
        }
        if !self.roster.can_start() {
            return Err(TableError::CannotStart("need two funded seats".into()));
        }
        let players = self.roster.players();
        let order: Vec<Position> = players.iter().map(|(_, p, _)| *p).collect();
        let dealer = match self.dealer {
            Some(dealer) if order.contains(&dealer) => dealer,
            Some(stale) => {
                position::advance_dealer(&order, stale).expect("two funded seats")
            }
            None => order[0],
        };
        let seed = fnv1a(&format!("{}:{}:{}", self.id, self.hands, self.nonce));
        self.nonce += 1;
        let mut rng = SeededRng::new(seed);
        let (game, events) = Game::deal(self.hands + 1, &players, dealer, &mut rng, self.config)?;
        self.hands += 1;
        self.seed = seed;
        self.dealer = Some(dealer);
        self.entry = players.iter().map(|(agent, _, stack)| (*agent, *stack)).collect();
        self.cache.clear();
        self.journal = events.clone();
        log::info!(
            "[table {}] hand {} dealt to {} seats (seed {:016x})",
            self.id,
            game.hand(),
            players.len(),
            seed
        );
        let outcome = Outcome {
            already_processed: false,
            events,
            state: game.clone(),
        };
        self.game = Some(game);
        if outcome.is_complete() {
            self.conclude();
        } else {
            self.timer.arm();
        }
        Ok(outcome)
    }

    fn act(
        &mut self,
        agent: ID<Agent>,
        action: Action,
        request: Option<String>,
        seq: Option<Seq>,
    ) -> Result<Outcome, TableError> {
        if self.closed {
            return Err(TableError::TableClosed);
        }
        if let Some(key) = request.as_deref() {
            if let Some(hit) = self.cache.get(key) {
                log::debug!("[table {}] replaying cached request {}", self.id, key);
                return Ok(hit.replayed());
            }
        }
        if let Some(got) = seq {
            if let Some(seen) = self.watermarks.get(&agent).copied() {
                if got <= seen {
                    return Err(TableError::ReplayDetected { seen, got });
                }
            }
        }
        let game = self
            .game
            .as_ref()
            .ok_or(GameError::HandAlreadyComplete)?;
        let (next, events) = game.apply(agent, action)?;
        if let Some(seq) = seq {
            self.watermarks.insert(agent, seq);
        }
        self.journal.extend(events.iter().cloned());
        let outcome = Outcome {
            already_processed: false,
            events,
            state: next.clone(),
        };
        self.game = Some(next);
        if let Some(key) = request {
            self.cache.insert(key, outcome.clone());
        }
        if outcome.is_complete() {
            self.conclude();
        } else {
            self.timer.arm();
        }
        Ok(outcome)
    }

    /// Folds a finished hand into the roster, rotates the button, records
    /// history, and notifies collaborators off-task.
    fn conclude(&mut self) {
        let game = self.game.take().expect("hand to conclude");
        debug_assert!(game.is_complete());
        self.timer.clear();
        for seat in game.seats() {
            self.roster.settle(seat.player(), seat.stack());
        }
        let eligible: Vec<Position> = self
            .roster
            .players()
            .iter()
            .map(|(_, p, _)| *p)
            .collect();
        self.dealer = position::advance_dealer(&eligible, game.dealer());
        let deltas: Vec<(ID<Agent>, Chips)> = game
            .seats()
            .iter()
            .map(|seat| {
                let entry = self
                    .entry
                    .iter()
                    .find(|(agent, _)| *agent == seat.player())
                    .map(|(_, stack)| *stack)
                    .unwrap_or(0);
                (seat.player(), seat.stack() - entry)
            })
            .collect();
        let winners = game
            .summary()
            .map(|s| s.winners.clone())
            .unwrap_or_default();
        self.history.push(Record {
            hand: game.hand(),
            seed: self.seed,
            dealer: game.dealer(),
            board: game.board().to_vec(),
            winners,
            deltas: deltas.clone(),
        });
        log::info!("[table {}] hand {} complete", self.id, game.hand());
        self.notify(game.hand(), deltas);
    }

    /// Fire-and-forget collaborator deliveries; never blocks the inbox.
    fn notify(&mut self, hand: u64, deltas: Vec<(ID<Agent>, Chips)>) {
        let audit = Arc::clone(&self.audit);
        let events = std::mem::take(&mut self.journal);
        let (table, seed) = (self.id, self.seed);
        tokio::spawn(async move {
            audit.record(table, hand, seed, events).await;
        });
        let ledger = Arc::clone(&self.ledger);
        tokio::spawn(async move {
            for (agent, delta) in deltas.into_iter().filter(|(_, d)| *d != 0) {
                let reference = format!("{}:{}:{}", table, hand, agent);
                let (from, to) = if delta > 0 {
                    (Account::Table(table), Account::Agent(agent))
                } else {
                    (Account::Agent(agent), Account::Table(table))
                };
                ledger
                    .transfer(reference, from, to, delta.abs(), "hand settlement".into())
                    .await;
            }
        });
    }

    /// The inactivity deadline fired: act passively for the stalled seat.
    fn expire(&mut self) {
        self.timer.clear();
        let Some(game) = self.game.as_ref() else {
            return;
        };
        let Some(actor) = game.actor() else {
            return;
        };
        let (agent, position) = (actor.player(), actor.position());
        let action = game.passive();
        log::warn!(
            "[table {}] seat {} timed out, auto {}",
            self.id,
            position,
            action
        );
        if let Err(error) = self.act(agent, action, None, None) {
            log::error!("[table {}] timeout action failed: {}", self.id, error);
        }
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.timer.clear();
        log::info!("[table {}] closed after {} hands", self.id, self.hands);
    }
}
