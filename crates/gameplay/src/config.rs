use agp_cards::Street;
use agp_core::Chips;
use agp_core::MAX_PLAYERS;

/// Betting structure for a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Limit,
    NoLimit,
    PotLimit,
}

/// Immutable per-hand table stakes.
///
/// `small_bet`/`big_bet` only matter in Limit games; `max_raises` of zero
/// means the street's bet count is uncapped.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Config {
    pub mode: Mode,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub small_bet: Chips,
    pub big_bet: Chips,
    pub ante: Chips,
    pub max_raises: u32,
    pub max_players: usize,
}

impl Config {
    pub fn no_limit(small_blind: Chips, big_blind: Chips) -> Self {
        Self {
            mode: Mode::NoLimit,
            small_blind,
            big_blind,
            small_bet: big_blind,
            big_bet: big_blind * 2,
            ante: 0,
            max_raises: 0,
            max_players: MAX_PLAYERS,
        }
    }
    pub fn pot_limit(small_blind: Chips, big_blind: Chips) -> Self {
        Self {
            mode: Mode::PotLimit,
            ..Self::no_limit(small_blind, big_blind)
        }
    }
    /// Classic fixed-limit stakes: blinds are half and one small bet.
    pub fn limit(small_bet: Chips, big_bet: Chips) -> Self {
        Self {
            mode: Mode::Limit,
            small_blind: small_bet / 2,
            big_blind: small_bet,
            small_bet,
            big_bet,
            ante: 0,
            max_raises: 4,
            max_players: MAX_PLAYERS,
        }
    }
    pub fn with_ante(self, ante: Chips) -> Self {
        Self { ante, ..self }
    }
    pub fn with_raise_cap(self, max_raises: u32) -> Self {
        Self { max_raises, ..self }
    }
    pub fn with_seats(self, max_players: usize) -> Self {
        Self { max_players, ..self }
    }
    /// The fixed wager size for a Limit street.
    pub fn fixed_bet(&self, street: Street) -> Chips {
        match street {
            Street::Preflop | Street::Flop => self.small_bet,
            _ => self.big_bet,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::no_limit(1, 2)
    }
}
