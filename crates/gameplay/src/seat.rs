use agp_cards::Hole;
use agp_core::Agent;
use agp_core::Chips;
use agp_core::ID;
use agp_core::Position;

/// Betting status within a hand.
///
/// - `Betting` — live and still able to make decisions
/// - `Shoving` — all-in, no further decisions but still contesting pots
/// - `Folding` — out of the hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Betting,
    Shoving,
    Folding,
}

impl Status {
    /// True if still competing for the pot.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Betting | Self::Shoving)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Status::Betting => write!(f, "P"),
            Status::Shoving => write!(f, "S"),
            Status::Folding => write!(f, "F"),
        }
    }
}

/// A player's state within one hand.
///
/// - `stack` — chips behind (not yet committed)
/// - `stake` — chips wagered this street (blinds and bets, never antes)
/// - `spent` — total chips committed this hand, antes included
/// - `acted` — has responded to the current wager this street
///
/// Invariant: `stake + stack` never exceeds the hand-starting stack, and
/// `stack` never goes negative; every transfer is clamped by the caller.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Seat {
    player: ID<Agent>,
    position: Position,
    stack: Chips,
    stake: Chips,
    spent: Chips,
    hole: Hole,
    status: Status,
    acted: bool,
}

impl Seat {
    pub fn new(player: ID<Agent>, position: Position, stack: Chips, hole: Hole) -> Self {
        Self {
            player,
            position,
            stack,
            stake: 0,
            spent: 0,
            hole,
            status: Status::Betting,
            acted: false,
        }
    }
    pub fn player(&self) -> ID<Agent> {
        self.player
    }
    pub fn position(&self) -> Position {
        self.position
    }
    pub fn stack(&self) -> Chips {
        self.stack
    }
    pub fn stake(&self) -> Chips {
        self.stake
    }
    pub fn spent(&self) -> Chips {
        self.spent
    }
    pub fn hole(&self) -> Hole {
        self.hole
    }
    pub fn status(&self) -> Status {
        self.status
    }
    pub fn acted(&self) -> bool {
        self.acted
    }
    /// True while this seat can still make decisions.
    pub fn can_act(&self) -> bool {
        self.status == Status::Betting
    }
    /// Commits chips from stack into the current street's wager.
    pub fn pay(&mut self, chips: Chips) {
        debug_assert!(chips >= 0 && chips <= self.stack);
        self.stack -= chips;
        self.stake += chips;
        self.spent += chips;
        if self.stack == 0 {
            self.status = Status::Shoving;
        }
    }
    /// Posts dead money: counts toward the hand, not toward the street.
    pub fn post(&mut self, chips: Chips) {
        debug_assert!(chips >= 0 && chips <= self.stack);
        self.stack -= chips;
        self.spent += chips;
        if self.stack == 0 {
            self.status = Status::Shoving;
        }
    }
    pub fn fold(&mut self) {
        self.status = Status::Folding;
    }
    pub fn win(&mut self, chips: Chips) {
        self.stack += chips;
    }
    pub fn set_acted(&mut self, acted: bool) {
        self.acted = acted;
    }
    /// Clears per-street state when a new street begins.
    pub fn reset_street(&mut self) {
        self.stake = 0;
        self.acted = false;
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} seat {} {}",
            self.status,
            self.position,
            format!("${:>5}", self.stack)
        )
    }
}
