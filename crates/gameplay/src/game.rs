use super::action::Action;
use super::config::Config;
use super::config::Mode;
use super::error::GameError;
use super::event::Event;
use super::position;
use super::pot::Pot;
use super::ranges::Ranges;
use super::ranges::Span;
use super::seat::Seat;
use super::seat::Status;
use super::showdown::PotAward;
use super::showdown::Showdown;
use super::showdown::Summary;
use agp_cards::Card;
use agp_cards::Deck;
use agp_cards::Hole;
use agp_cards::Rng;
use agp_cards::Street;
use agp_core::Agent;
use agp_core::Chips;
use agp_core::ID;
use agp_core::MAX_PLAYERS;
use agp_core::MIN_PLAYERS;
use agp_core::Position;
use agp_core::Seq;
use std::collections::BTreeMap;

/// The deterministic betting state machine for one hand.
///
/// `Game` is a value: [`apply`](Self::apply) never mutates the input, it
/// clones, transitions the clone, and hands it back with the events the
/// transition produced. A failed call therefore leaves the previous state
/// untouched, and snapshots are safe to hold across transitions.
///
/// The machine covers Limit, No-Limit, and Pot-Limit betting over 2-8
/// seats with arbitrary (non-contiguous) seat indices, multiway side pots,
/// and forced street advances when nobody is left to act.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Game {
    hand: u64,
    config: Config,
    street: Street,
    seats: Vec<Seat>,
    dealer: Position,
    actor: Option<Position>,
    board: Vec<Card>,
    #[serde(skip)]
    deck: Deck,
    pots: Vec<Pot>,
    bets: u32,
    last_raise: Chips,
    seq: Seq,
    complete: bool,
    summary: Option<Summary>,
}

/// Hand creation.
impl Game {
    /// Deals a fresh hand: shuffles, deals hole cards, posts antes and
    /// blinds, and computes the first player to act.
    ///
    /// Events come out in strict order: HandStart, AntesPosted (only when
    /// the config carries an ante), BlindsPosted, HoleCardsDealt. If the
    /// forced posts leave nobody able to act, the board runs out and the
    /// hand settles immediately, exactly as a forced street advance would.
    pub fn deal(
        hand: u64,
        players: &[(ID<Agent>, Position, Chips)],
        dealer: Position,
        rng: &mut dyn Rng,
        config: Config,
    ) -> Result<(Game, Vec<Event>), GameError> {
        Self::validate(players, dealer, &config)?;
        let mut deck = Deck::shuffled(rng);
        let order: Vec<Position> = {
            let mut order: Vec<Position> = players.iter().map(|(_, p, _)| *p).collect();
            order.sort_unstable();
            order
        };
        // two passes clockwise from the dealer's left, dealer last
        let mut dealt: BTreeMap<Position, Vec<Card>> =
            order.iter().map(|p| (*p, Vec::new())).collect();
        for _ in 0..2 {
            for pos in position::clockwise(&order, dealer) {
                dealt.get_mut(&pos).expect("position dealt in").push(deck.draw());
            }
        }
        let mut seats: Vec<Seat> = players
            .iter()
            .map(|(player, pos, stack)| {
                let cards = &dealt[pos];
                Seat::new(*player, *pos, *stack, Hole::from((cards[0], cards[1])))
            })
            .collect();
        seats.sort_by_key(Seat::position);
        let mut game = Game {
            hand,
            config,
            street: Street::Preflop,
            seats,
            dealer,
            actor: None,
            board: Vec::new(),
            deck,
            pots: Vec::new(),
            bets: 0,
            last_raise: config.big_blind,
            seq: 0,
            complete: false,
            summary: None,
        };
        let mut events = Vec::new();
        let stacks: Vec<(Position, Chips)> =
            game.seats.iter().map(|s| (s.position(), s.stack())).collect();
        let labels = position::labels(&order, dealer);
        game.emit(&mut events, |hand, seq| Event::HandStart {
            hand,
            seq,
            dealer,
            stacks,
            labels,
        });
        if config.ante > 0 {
            let mut antes = Vec::new();
            for pos in position::clockwise(&order, dealer) {
                let seat = game.seat_mut(pos);
                let ante = config.ante.min(seat.stack());
                seat.post(ante);
                antes.push((pos, ante));
            }
            game.emit(&mut events, |hand, seq| Event::AntesPosted { hand, seq, antes });
        }
        let (small, big) = position::blinds(&order, dealer);
        let paid_small = config.small_blind.min(game.seat(small).stack());
        let paid_big = config.big_blind.min(game.seat(big).stack());
        game.seat_mut(small).pay(paid_small);
        game.seat_mut(big).pay(paid_big);
        game.emit(&mut events, |hand, seq| Event::BlindsPosted {
            hand,
            seq,
            small: (small, paid_small),
            big: (big, paid_big),
        });
        let contributed: Chips = game.seats.iter().map(Seat::spent).sum();
        let eligible: Vec<ID<Agent>> = game.seats.iter().map(Seat::player).collect();
        game.pots = vec![Pot::new(contributed, eligible)];
        // the big blind is the opening wager of the preflop street
        game.bets = 1;
        let holes: Vec<(Position, Hole)> =
            game.seats.iter().map(|s| (s.position(), s.hole())).collect();
        game.emit(&mut events, |hand, seq| Event::HoleCardsDealt { hand, seq, holes });
        let first = position::first_preflop(&order, dealer);
        match game.scan_from(first) {
            Some(actor) => game.actor = Some(actor),
            None => game.advance(&mut events),
        }
        Ok((game, events))
    }

    fn validate(
        players: &[(ID<Agent>, Position, Chips)],
        dealer: Position,
        config: &Config,
    ) -> Result<(), GameError> {
        let n = players.len();
        if n < MIN_PLAYERS || n > MAX_PLAYERS || n > config.max_players {
            return Err(GameError::CannotStart(format!("{} players", n)));
        }
        let mut order: Vec<Position> = players.iter().map(|(_, p, _)| *p).collect();
        order.sort_unstable();
        order.dedup();
        if order.len() != n {
            return Err(GameError::CannotStart("duplicate seat index".into()));
        }
        if !order.contains(&dealer) {
            return Err(GameError::CannotStart("dealer not seated".into()));
        }
        if players.iter().any(|(_, _, stack)| *stack <= 0) {
            return Err(GameError::CannotStart("empty stack dealt in".into()));
        }
        if config.big_blind <= 0 || config.small_blind < 0 || config.ante < 0 {
            return Err(GameError::CannotStart("invalid stakes".into()));
        }
        Ok(())
    }
}

/// Public state accessors.
impl Game {
    pub fn hand(&self) -> u64 {
        self.hand
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }
    pub fn dealer(&self) -> Position {
        self.dealer
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }
    pub fn is_complete(&self) -> bool {
        self.complete
    }
    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }
    /// The seat whose turn it is, if the hand is live.
    pub fn actor(&self) -> Option<&Seat> {
        self.actor.map(|pos| self.seat(pos))
    }
    /// Total chips in the middle.
    pub fn pot(&self) -> Chips {
        self.pots.iter().map(Pot::amount).sum()
    }
    /// Chips the current actor owes to continue.
    pub fn to_call(&self) -> Chips {
        match self.actor {
            Some(pos) => self.high_stake() - self.seat(pos).stake(),
            None => 0,
        }
    }
    /// All chips on the table: stacks plus pots. Constant across a hand.
    pub fn total(&self) -> Chips {
        self.seats.iter().map(Seat::stack).sum::<Chips>() + self.pot()
    }
    fn seat(&self, pos: Position) -> &Seat {
        self.seats
            .iter()
            .find(|s| s.position() == pos)
            .expect("position is seated")
    }
    fn seat_mut(&mut self, pos: Position) -> &mut Seat {
        self.seats
            .iter_mut()
            .find(|s| s.position() == pos)
            .expect("position is seated")
    }
    fn order(&self) -> Vec<Position> {
        self.seats.iter().map(Seat::position).collect()
    }
    fn high_stake(&self) -> Chips {
        self.seats.iter().map(Seat::stake).max().unwrap_or(0)
    }
    fn live(&self) -> usize {
        self.seats
            .iter()
            .filter(|s| s.status() != Status::Folding)
            .count()
    }
    fn raise_capped(&self) -> bool {
        self.config.max_raises > 0 && self.bets >= self.config.max_raises
    }
}

/// Legal actions and wager ranges.
impl Game {
    /// Legal actions for the player to act; empty iff the hand is complete.
    ///
    /// Wagers appear at their minimum size; the full intervals come from
    /// [`ranges`](Self::ranges).
    pub fn legal(&self) -> Vec<Action> {
        let Some(pos) = self.actor else {
            return Vec::new();
        };
        let ranges = self.ranges();
        let mut actions = vec![Action::Fold];
        if self.to_call() == 0 {
            actions.push(Action::Check);
            if let Some(span) = ranges.bet {
                actions.push(Action::Bet(span.min));
            }
        } else {
            actions.push(Action::Call);
            if let Some(span) = ranges.raise {
                actions.push(Action::Raise(span.min));
            }
        }
        debug_assert!(self.seat(pos).can_act());
        actions
    }

    /// Wager intervals for the player to act, clamped to their stack.
    pub fn ranges(&self) -> Ranges {
        let Some(pos) = self.actor else {
            return Ranges::none();
        };
        let seat = self.seat(pos);
        let stack = seat.stack();
        let to_call = self.to_call();
        let fixed = self.config.fixed_bet(self.street);
        let mut ranges = Ranges::none();
        if self.raise_capped() {
            return ranges;
        }
        if to_call == 0 && stack > 0 {
            let (min, max) = match self.config.mode {
                Mode::Limit => (fixed, fixed),
                Mode::NoLimit => (self.config.big_blind, stack),
                Mode::PotLimit => (self.config.big_blind, self.pot()),
            };
            ranges.bet = Some(Span::new(min.min(stack), max.min(stack).max(min.min(stack))));
        }
        if to_call > 0 && stack > to_call && !seat.acted() {
            let (min, max) = match self.config.mode {
                Mode::Limit => (to_call + fixed, to_call + fixed),
                Mode::NoLimit => (to_call + self.last_raise.max(self.config.big_blind), stack),
                Mode::PotLimit => (
                    to_call + self.last_raise.max(self.config.big_blind),
                    to_call + self.pot() + to_call,
                ),
            };
            ranges.raise = Some(Span::new(min.min(stack), max.min(stack).max(min.min(stack))));
        }
        ranges
    }

    /// Check when possible, fold otherwise. The timeout action.
    pub fn passive(&self) -> Action {
        if self.to_call() == 0 {
            Action::Check
        } else {
            Action::Fold
        }
    }

    /// Validates an action for the player to act without applying it.
    pub fn allows(&self, action: Action) -> Result<(), GameError> {
        let pos = self.actor.ok_or(GameError::HandAlreadyComplete)?;
        let seat = self.seat(pos);
        let stack = seat.stack();
        let to_call = self.to_call();
        let fixed = self.config.fixed_bet(self.street);
        match action {
            Action::Fold => Ok(()),
            Action::Check if to_call == 0 => Ok(()),
            Action::Check => Err(GameError::InvalidAction("facing a wager".into())),
            Action::Call if to_call > 0 => Ok(()),
            Action::Call => Err(GameError::InvalidAction("nothing to call".into())),
            Action::Bet(_) if to_call > 0 => {
                Err(GameError::InvalidAction("facing a wager: raise instead".into()))
            }
            Action::Bet(_) | Action::Raise(_) if self.raise_capped() => {
                Err(GameError::RaiseCapReached)
            }
            Action::Bet(x) => {
                let min = match self.config.mode {
                    Mode::Limit => fixed,
                    _ => self.config.big_blind,
                };
                let max = match self.config.mode {
                    Mode::Limit => fixed.min(stack),
                    Mode::NoLimit => stack,
                    Mode::PotLimit => self.pot().min(stack),
                };
                if x > 0 && x <= max && (x >= min || x == stack) {
                    Ok(())
                } else {
                    Err(GameError::InvalidAction(format!("bet of {}", x)))
                }
            }
            Action::Raise(_) if to_call == 0 => {
                Err(GameError::InvalidAction("nothing to raise: bet instead".into()))
            }
            Action::Raise(_) if seat.acted() => Err(GameError::InvalidAction(
                "the last all-in did not reopen the action".into(),
            )),
            Action::Raise(_) if stack <= to_call => Err(GameError::InvalidAction(
                "not enough chips to raise: call all-in instead".into(),
            )),
            Action::Raise(x) => {
                let min = match self.config.mode {
                    Mode::Limit => to_call + fixed,
                    _ => to_call + self.last_raise.max(self.config.big_blind),
                };
                let max = match self.config.mode {
                    Mode::Limit => (to_call + fixed).min(stack),
                    Mode::NoLimit => stack,
                    Mode::PotLimit => (to_call + self.pot() + to_call).min(stack),
                };
                if x > to_call && x <= max && (x >= min || x == stack) {
                    Ok(())
                } else {
                    Err(GameError::InvalidAction(format!("raise of {}", x)))
                }
            }
        }
    }
}

/// Action application.
impl Game {
    /// Applies one action for `player`, returning the successor state and
    /// the events the transition produced. The receiver is untouched.
    pub fn apply(
        &self,
        player: ID<Agent>,
        action: Action,
    ) -> Result<(Game, Vec<Event>), GameError> {
        if self.complete {
            return Err(GameError::HandAlreadyComplete);
        }
        let pos = self.actor.ok_or(GameError::HandAlreadyComplete)?;
        if self.seat(pos).player() != player {
            return Err(GameError::NotYourTurn(player));
        }
        self.allows(action)?;
        let mut next = self.clone();
        let mut events = Vec::new();
        next.execute(pos, action);
        let pot = next.pot();
        next.emit(&mut events, |hand, seq| Event::PlayerAction {
            hand,
            seq,
            seat: pos,
            action,
            pot,
        });
        next.resolve(pos, &mut events);
        debug_assert_eq!(next.total(), self.total(), "chips must be conserved");
        Ok((next, events))
    }

    fn execute(&mut self, pos: Position, action: Action) {
        match action {
            Action::Fold => {
                let player = self.seat(pos).player();
                self.seat_mut(pos).fold();
                for pot in self.pots.iter_mut() {
                    pot.exclude(player);
                }
            }
            Action::Check => self.seat_mut(pos).set_acted(true),
            Action::Call => {
                let chips = self.to_call().min(self.seat(pos).stack());
                self.transfer(pos, chips);
                self.seat_mut(pos).set_acted(true);
            }
            Action::Bet(x) | Action::Raise(x) => {
                let prev_high = self.high_stake();
                self.transfer(pos, x);
                let delta = self.seat(pos).stake() - prev_high;
                debug_assert!(delta > 0);
                self.bets += 1;
                let required = match self.config.mode {
                    Mode::Limit => self.config.fixed_bet(self.street),
                    _ => self.last_raise.max(self.config.big_blind),
                };
                // a full raise reopens the action; a short all-in does not
                if delta >= required {
                    self.last_raise = delta;
                    for seat in self.seats.iter_mut() {
                        if seat.position() != pos && seat.can_act() {
                            seat.set_acted(false);
                        }
                    }
                }
                self.seat_mut(pos).set_acted(true);
            }
        }
    }

    fn transfer(&mut self, pos: Position, chips: Chips) {
        self.seat_mut(pos).pay(chips);
        self.pots
            .first_mut()
            .expect("live hand holds a pot")
            .add(chips);
    }

    /// Picks the next actor, advancing streets or finishing as needed.
    fn resolve(&mut self, pos: Position, events: &mut Vec<Event>) {
        if self.live() == 1 {
            return self.finish_folded(events);
        }
        let order = self.order();
        let next = position::next_active(&order, pos, |p| self.needs_action(p));
        match next {
            Some(p) => self.actor = Some(p),
            None => self.advance(events),
        }
    }

    /// A seat still owes a decision this street.
    fn needs_action(&self, pos: Position) -> bool {
        let seat = self.seat(pos);
        seat.can_act() && (seat.stake() < self.high_stake() || !seat.acted())
    }

    /// Deals out the next street(s); finishes at the river.
    fn advance(&mut self, events: &mut Vec<Event>) {
        loop {
            if self.street == Street::River {
                return self.finish_showdown(events);
            }
            self.street = self.street.next();
            let cards = self.deck.deal(self.street.revealed());
            self.board.extend(cards.iter().copied());
            for seat in self.seats.iter_mut() {
                seat.reset_street();
            }
            self.bets = 0;
            self.last_raise = self.config.big_blind;
            let street = self.street;
            self.emit(events, |hand, seq| Event::CommunityCardsDealt {
                hand,
                seq,
                street,
                cards,
            });
            self.emit(events, |hand, seq| Event::StreetChanged { hand, seq, street });
            // betting needs two seats that can still decide
            let order = self.order();
            if self.seats.iter().filter(|s| s.can_act()).count() >= 2 {
                let first = position::next_active(&order, self.dealer, |p| {
                    self.seat(p).can_act()
                });
                debug_assert!(first.is_some());
                self.actor = first;
                return;
            }
        }
    }

    fn finish_folded(&mut self, events: &mut Vec<Event>) {
        self.actor = None;
        self.complete = true;
        let winner = self
            .seats
            .iter()
            .find(|s| s.status() != Status::Folding)
            .map(|s| (s.player(), s.position()))
            .expect("one live seat remains");
        let amount = self.pot();
        self.seat_mut(winner.1).win(amount);
        self.pots.clear();
        let awards = vec![PotAward {
            amount,
            winners: vec![(winner.1, amount)],
        }];
        self.summary = Some(Summary {
            winners: vec![winner.0],
            awards: awards.clone(),
            rankings: Vec::new(),
        });
        self.emit(events, |hand, seq| Event::PotDistributed { hand, seq, awards });
        let stacks: Vec<(Position, Chips)> =
            self.seats.iter().map(|s| (s.position(), s.stack())).collect();
        self.emit(events, |hand, seq| Event::HandEnd {
            hand,
            seq,
            winners: vec![winner.1],
            stacks,
        });
        log::debug!("[game {}] folded out, seat {} wins {}", self.hand, winner.1, amount);
    }

    fn finish_showdown(&mut self, events: &mut Vec<Event>) {
        self.actor = None;
        self.street = Street::Showdown;
        self.complete = true;
        let (awards, rankings) = {
            let showdown = Showdown::from((&self.seats[..], &self.board[..], self.dealer));
            let (_, awards) = showdown.settle();
            let rankings: Vec<(Position, String)> = showdown
                .rankings()
                .into_iter()
                .map(|(pos, strength)| (pos, strength.to_string()))
                .collect();
            (awards, rankings)
        };
        for award in awards.iter() {
            for (pos, chips) in award.winners.iter() {
                self.seat_mut(*pos).win(*chips);
            }
        }
        self.pots.clear();
        let mut winners: Vec<ID<Agent>> = Vec::new();
        let mut winning_seats: Vec<Position> = Vec::new();
        for award in awards.iter() {
            for (pos, _) in award.winners.iter() {
                if !winning_seats.contains(pos) {
                    winning_seats.push(*pos);
                    winners.push(self.seat(*pos).player());
                }
            }
        }
        self.summary = Some(Summary {
            winners,
            awards: awards.clone(),
            rankings: rankings.clone(),
        });
        self.emit(events, |hand, seq| Event::Showdown {
            hand,
            seq,
            rankings,
        });
        self.emit(events, |hand, seq| Event::PotDistributed { hand, seq, awards });
        let stacks: Vec<(Position, Chips)> =
            self.seats.iter().map(|s| (s.position(), s.stack())).collect();
        self.emit(events, |hand, seq| Event::HandEnd {
            hand,
            seq,
            winners: winning_seats,
            stacks,
        });
        log::debug!("[game {}] showdown settled", self.hand);
    }

    /// Scans a full cycle beginning at `first` for a seat owing a decision.
    fn scan_from(&self, first: Position) -> Option<Position> {
        let order = self.order();
        std::iter::once(first)
            .chain(position::clockwise(&order, first).take(order.len() - 1))
            .find(|p| self.needs_action(*p))
    }

    fn emit(&mut self, events: &mut Vec<Event>, make: impl FnOnce(u64, Seq) -> Event) {
        let event = make(self.hand, self.seq);
        self.seq += 1;
        events.push(event);
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for seat in self.seats.iter() {
            writeln!(f, "{}", seat)?;
        }
        writeln!(f, "pot   {}", self.pot())?;
        write!(f, "board")?;
        for card in self.board.iter() {
            write!(f, " {}", card)?;
        }
        Ok(())
    }
}
