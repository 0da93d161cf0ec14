/// A betting round, or the terminal showdown phase.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Street {
    Preflop = 0,
    Flop = 1,
    Turn = 2,
    River = 3,
    Showdown = 4,
}

impl Street {
    pub const fn all() -> &'static [Self] {
        &[
            Self::Preflop,
            Self::Flop,
            Self::Turn,
            Self::River,
            Self::Showdown,
        ]
    }
    pub const fn next(&self) -> Self {
        match self {
            Self::Preflop => Self::Flop,
            Self::Flop => Self::Turn,
            Self::Turn => Self::River,
            Self::River => Self::Showdown,
            Self::Showdown => panic!("terminal"),
        }
    }
    /// Community cards dealt on entry to this street.
    pub const fn revealed(&self) -> usize {
        match self {
            Self::Preflop => 0,
            Self::Flop => 3,
            Self::Turn => 1,
            Self::River => 1,
            Self::Showdown => 0,
        }
    }
    /// Community cards visible while this street is being bet.
    pub const fn observed(&self) -> usize {
        match self {
            Self::Preflop => 0,
            Self::Flop => 3,
            Self::Turn => 4,
            Self::River | Self::Showdown => 5,
        }
    }
    /// True once no further betting round can follow.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Showdown)
    }
}

impl std::fmt::Display for Street {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Preflop => write!(f, "preflop"),
            Self::Flop => write!(f, "flop"),
            Self::Turn => write!(f, "turn"),
            Self::River => write!(f, "river"),
            Self::Showdown => write!(f, "showdown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streets_progress_in_order() {
        assert_eq!(Street::Preflop.next(), Street::Flop);
        assert_eq!(Street::Flop.next(), Street::Turn);
        assert_eq!(Street::Turn.next(), Street::River);
        assert_eq!(Street::River.next(), Street::Showdown);
    }

    #[test]
    fn revealed_totals_to_board() {
        let total: usize = Street::all().iter().map(|s| s.revealed()).sum();
        assert_eq!(total, 5);
        assert_eq!(Street::River.observed(), 5);
    }
}
