use super::card::Card;
use super::evaluator::Evaluator;
use super::hand::Hand;
use super::hole::Hole;
use super::kicks::Kickers;
use super::ranking::Ranking;

/// A hand's evaluated strength.
///
/// Always constructed from an unordered set of cards; the derived `Ord`
/// gives the complete showdown comparison (category, then defining ranks,
/// then kickers). Equal strengths split the pot.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Strength {
    ranking: Ranking,
    kickers: Kickers,
}

impl Strength {
    /// Evaluates a player's best five cards from hole plus community.
    pub fn evaluate(hole: Hole, community: &[Card]) -> Self {
        let cards = Hand::or(Hand::from(hole), Hand::from(community.to_vec()));
        Self::from(cards)
    }
    pub fn ranking(&self) -> Ranking {
        self.ranking
    }
    pub fn kickers(&self) -> Kickers {
        self.kickers
    }
}

impl From<Hand> for Strength {
    fn from(hand: Hand) -> Self {
        let evaluator = Evaluator::from(hand);
        let ranking = evaluator.ranking();
        let kickers = evaluator.kickers(ranking);
        Self { ranking, kickers }
    }
}

impl From<(Ranking, Kickers)> for Strength {
    fn from((ranking, kickers): (Ranking, Kickers)) -> Self {
        Self { ranking, kickers }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.ranking)
    }
}
