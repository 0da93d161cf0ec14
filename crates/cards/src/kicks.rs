use super::rank::Rank;

/// Tie-breaking kicker cards as a 13-bit rank mask.
///
/// Comparison is numeric on the mask: for kicker sets of equal size this
/// matches poker's highest-card-first comparison. Suits never matter.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Kickers(u16);

/// u16 isomorphism
impl From<Kickers> for u16 {
    fn from(k: Kickers) -> Self {
        k.0
    }
}
impl From<u16> for Kickers {
    fn from(n: u16) -> Self {
        Self(n & Rank::mask())
    }
}

/// Vec<Rank> isomorphism
impl From<Kickers> for Vec<Rank> {
    fn from(k: Kickers) -> Self {
        (0..13u8)
            .filter(|i| k.0 & (1 << i) != 0)
            .map(Rank::from)
            .collect()
    }
}
impl From<Vec<Rank>> for Kickers {
    fn from(ranks: Vec<Rank>) -> Self {
        Self(ranks.iter().map(|r| u16::from(*r)).fold(0u16, |a, b| a | b))
    }
}

impl std::fmt::Display for Kickers {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for rank in Vec::<Rank>::from(*self) {
            write!(f, "{} ", rank)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_ranks() {
        let kickers = Kickers::from(vec![Rank::King, Rank::Nine, Rank::Two]);
        assert_eq!(kickers, Kickers::from(Vec::<Rank>::from(kickers)));
    }

    #[test]
    fn higher_kicker_wins() {
        let ace = Kickers::from(vec![Rank::Ace, Rank::Two, Rank::Three]);
        let kng = Kickers::from(vec![Rank::King, Rank::Queen, Rank::Jack]);
        assert!(ace > kng);
    }
}
