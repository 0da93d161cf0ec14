use agp_core::Chips;

/// A player decision.
///
/// Bet and Raise carry the chips the player moves into the pot with this
/// action (for a raise: the call portion plus the raise increment). Blind
/// and ante posts are forced by the engine, not expressed as actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "amount", rename_all = "snake_case")]
pub enum Action {
    Fold,
    Check,
    Call,
    Bet(Chips),
    Raise(Chips),
}

impl Action {
    /// Chips moved by this action, if any are stated up front.
    pub fn amount(&self) -> Option<Chips> {
        match *self {
            Action::Bet(x) | Action::Raise(x) => Some(x),
            _ => None,
        }
    }
    /// True for wagers that (re)open the betting.
    pub fn is_aggressive(&self) -> bool {
        matches!(self, Action::Bet(_) | Action::Raise(_))
    }
    /// True for fold or check.
    pub fn is_passive(&self) -> bool {
        matches!(self, Action::Fold | Action::Check)
    }
}

impl TryFrom<&str> for Action {
    type Error = &'static str;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        match parts.first().map(|p| p.to_uppercase()).as_deref() {
            Some("FOLD") => Ok(Action::Fold),
            Some("CHECK") => Ok(Action::Check),
            Some("CALL") => Ok(Action::Call),
            Some("BET") => parts
                .get(1)
                .and_then(|n| n.parse().ok())
                .map(Action::Bet)
                .ok_or("invalid bet amount"),
            Some("RAISE") => parts
                .get(1)
                .and_then(|n| n.parse().ok())
                .map(Action::Raise)
                .ok_or("invalid raise amount"),
            _ => Err("invalid action type"),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Action::Fold => write!(f, "FOLD"),
            Action::Check => write!(f, "CHECK"),
            Action::Call => write!(f, "CALL"),
            Action::Bet(amount) => write!(f, "BET {}", amount),
            Action::Raise(amount) => write!(f, "RAISE {}", amount),
        }
    }
}
