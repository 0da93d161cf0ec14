use super::card::Card;
use super::hand::Hand;
use super::hole::Hole;
use super::rng::Rng;

/// An ordered deck for deterministic dealing.
///
/// Unlike a set-of-cards representation, order matters here: the deal is a
/// pure function of the injected [`Rng`] stream, so identical seeds produce
/// identical hole and community cards. Cards deal from the back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck(Vec<Card>);

impl Deck {
    /// A fresh 52-card deck in sorted order.
    pub fn ordered() -> Self {
        Self((0..52u8).map(Card::from).collect())
    }
    /// Fisher-Yates shuffle driven entirely by the injected generator.
    pub fn shuffled(rng: &mut dyn Rng) -> Self {
        let mut cards = Self::ordered().0;
        for i in (1..cards.len()).rev() {
            let j = (rng.next() * (i + 1) as f64) as usize;
            cards.swap(i, j.min(i));
        }
        Self(cards)
    }
    pub fn remaining(&self) -> usize {
        self.0.len()
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.0.contains(card)
    }
    /// Deals one card off the top.
    pub fn draw(&mut self) -> Card {
        self.0.pop().expect("deck holds 52 cards and a hand uses at most 23")
    }
    /// Deals n cards off the top, in order.
    pub fn deal(&mut self, n: usize) -> Vec<Card> {
        (0..n).map(|_| self.draw()).collect()
    }
    /// Deals two cards as a player's hole cards.
    pub fn hole(&mut self) -> Hole {
        let a = self.draw();
        let b = self.draw();
        Hole::from((a, b))
    }
}

impl From<&Deck> for Hand {
    fn from(deck: &Deck) -> Self {
        Hand::from(deck.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRng;

    #[test]
    fn ordered_deck_is_complete() {
        let deck = Deck::ordered();
        assert_eq!(deck.remaining(), 52);
        assert_eq!(Hand::from(&deck).size(), 52);
    }

    #[test]
    fn shuffle_preserves_cards() {
        let mut rng = SeededRng::new(7);
        let deck = Deck::shuffled(&mut rng);
        assert_eq!(deck.remaining(), 52);
        assert_eq!(Hand::from(&deck), Hand::from(&Deck::ordered()));
    }

    #[test]
    fn same_seed_same_deal() {
        let mut a = Deck::shuffled(&mut SeededRng::new(99));
        let mut b = Deck::shuffled(&mut SeededRng::new(99));
        assert_eq!(a.deal(52), b.deal(52));
    }

    #[test]
    fn different_seed_different_deal() {
        let mut a = Deck::shuffled(&mut SeededRng::new(1));
        let mut b = Deck::shuffled(&mut SeededRng::new(2));
        assert_ne!(a.deal(52), b.deal(52));
    }

    #[test]
    fn draws_are_distinct() {
        let mut deck = Deck::shuffled(&mut SeededRng::new(3));
        let cards = deck.deal(52);
        let hand = Hand::from(cards);
        assert_eq!(hand.size(), 52);
    }
}
