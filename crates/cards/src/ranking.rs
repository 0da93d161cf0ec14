use super::rank::Rank;

/// A poker hand's category, ordered weakest to strongest.
///
/// Carries the defining rank(s) but not the kickers; ties within a
/// category fall through to [`Kickers`](super::kicks::Kickers).
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Ranking {
    HighCard(Rank),        // 4 kickers
    OnePair(Rank),         // 3 kickers
    TwoPair(Rank, Rank),   // 1 kicker
    ThreeOAK(Rank),        // 2 kickers
    Straight(Rank),        // 0 kickers
    Flush(Rank),           // 0 kickers
    FullHouse(Rank, Rank), // 0 kickers
    FourOAK(Rank),         // 1 kicker
    StraightFlush(Rank),   // 0 kickers
}

impl Ranking {
    pub fn n_kickers(&self) -> usize {
        match self {
            Ranking::HighCard(_) => 4,
            Ranking::OnePair(_) => 3,
            Ranking::ThreeOAK(_) => 2,
            Ranking::FourOAK(_) | Ranking::TwoPair(_, _) => 1,
            _ => 0,
        }
    }

    /// Rank-mask excluding the ranks already consumed by the category.
    pub fn mask(&self) -> u16 {
        match *self {
            Ranking::TwoPair(hi, lo) => !(u16::from(hi) | u16::from(lo)),
            Ranking::HighCard(hi)
            | Ranking::OnePair(hi)
            | Ranking::FourOAK(hi)
            | Ranking::ThreeOAK(hi) => !(u16::from(hi)),
            Ranking::FullHouse(..)
            | Ranking::StraightFlush(..)
            | Ranking::Straight(..)
            | Ranking::Flush(..) => unreachable!("kickerless ranking"),
        }
    }
}

impl std::fmt::Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Ranking::HighCard(r) => write!(f, "high card {}", r),
            Ranking::OnePair(r) => write!(f, "pair of {}s", r),
            Ranking::TwoPair(r1, r2) => write!(f, "two pair {}s and {}s", r1, r2),
            Ranking::ThreeOAK(r) => write!(f, "three of a kind {}s", r),
            Ranking::Straight(r) => write!(f, "straight to the {}", r),
            Ranking::FullHouse(r1, r2) => write!(f, "full house {}s over {}s", r1, r2),
            Ranking::Flush(r) => write!(f, "flush, {} high", r),
            Ranking::FourOAK(r) => write!(f, "four of a kind {}s", r),
            Ranking::StraightFlush(r) => write!(f, "straight flush to the {}", r),
        }
    }
}
