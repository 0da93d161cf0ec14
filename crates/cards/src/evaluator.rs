use super::hand::Hand;
use super::kicks::Kickers;
use super::rank::Rank;
use super::ranking::Ranking;
use super::suit::Suit;

const WHEEL: u16 = 0b_1000000001111;

/// Best-five evaluation over a set of up to seven cards.
///
/// Works directly on the [`Hand`] bitmask: each category probe is a handful
/// of word operations, so finding the best five-card combination never
/// enumerates the 21 explicit combinations.
pub struct Evaluator(Hand);

impl From<Hand> for Evaluator {
    fn from(h: Hand) -> Self {
        Self(h)
    }
}

impl Evaluator {
    /// The strongest category this hand makes.
    pub fn ranking(&self) -> Ranking {
        None.or_else(|| self.straight_flush())
            .or_else(|| self.quads())
            .or_else(|| self.full_house())
            .or_else(|| self.flush())
            .or_else(|| self.straight())
            .or_else(|| self.trips())
            .or_else(|| self.pairs())
            .or_else(|| self.high_card())
            .expect("at least one card in hand")
    }

    /// Kickers breaking ties within the given category.
    pub fn kickers(&self, ranking: Ranking) -> Kickers {
        match ranking.n_kickers() {
            0 => Kickers::default(),
            n => {
                let mut ranks = u16::from(self.0) & ranking.mask();
                while n < ranks.count_ones() as usize {
                    ranks &= ranks - 1; // drop lowest
                }
                Kickers::from(ranks)
            }
        }
    }

    fn high_card(&self) -> Option<Ranking> {
        self.rank_of_repeats(1, None).map(Ranking::HighCard)
    }
    fn trips(&self) -> Option<Ranking> {
        self.rank_of_repeats(3, None).map(Ranking::ThreeOAK)
    }
    fn quads(&self) -> Option<Ranking> {
        self.rank_of_repeats(4, None).map(Ranking::FourOAK)
    }
    /// Finds two pair, degrading gracefully to one pair.
    fn pairs(&self) -> Option<Ranking> {
        self.rank_of_repeats(2, None).map(|hi| {
            self.rank_of_repeats(2, Some(hi))
                .map(|lo| Ranking::TwoPair(hi, lo))
                .unwrap_or(Ranking::OnePair(hi))
        })
    }
    fn full_house(&self) -> Option<Ranking> {
        self.rank_of_repeats(3, None).and_then(|triple| {
            self.rank_of_repeats(2, Some(triple))
                .map(|paired| Ranking::FullHouse(triple, paired))
        })
    }
    fn straight(&self) -> Option<Ranking> {
        self.rank_of_straight(self.0).map(Ranking::Straight)
    }
    fn flush(&self) -> Option<Ranking> {
        self.suit_of_flush()
            .map(|suit| Ranking::Flush(Rank::from(u16::from(self.0.of(&suit)))))
    }
    fn straight_flush(&self) -> Option<Ranking> {
        self.suit_of_flush().and_then(|suit| {
            self.rank_of_straight(self.0.of(&suit))
                .map(Ranking::StraightFlush)
        })
    }

    /// Highest rank topping a five-card run, wheel included.
    fn rank_of_straight(&self, hand: Hand) -> Option<Rank> {
        let ranks = u16::from(hand);
        let mut bits = ranks;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        if bits > 0 {
            Some(Rank::from(bits))
        } else if WHEEL == (WHEEL & ranks) {
            Some(Rank::Five)
        } else {
            None
        }
    }
    fn suit_of_flush(&self) -> Option<Suit> {
        Suit::all()
            .into_iter()
            .find(|s| self.0.of(s).size() >= 5)
    }
    /// Highest rank appearing at least n times, optionally skipping one.
    fn rank_of_repeats(&self, n: usize, skip: Option<Rank>) -> Option<Rank> {
        let cards = u64::from(self.0);
        (0..13u8)
            .rev()
            .map(Rank::from)
            .filter(|r| Some(*r) != skip)
            .find(|r| (cards & u64::from(*r)).count_ones() as usize >= n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(s: &str) -> (Ranking, Kickers) {
        let e = Evaluator::from(Hand::try_from(s).unwrap());
        let r = e.ranking();
        (r, e.kickers(r))
    }

    #[test]
    fn high_card() {
        let (r, k) = eval("As Kh Qd Jc 9s");
        assert_eq!(r, Ranking::HighCard(Rank::Ace));
        assert_eq!(
            k,
            Kickers::from(vec![Rank::King, Rank::Queen, Rank::Jack, Rank::Nine])
        );
    }

    #[test]
    fn one_pair() {
        let (r, k) = eval("As Ah Kd Qc Js");
        assert_eq!(r, Ranking::OnePair(Rank::Ace));
        assert_eq!(k, Kickers::from(vec![Rank::King, Rank::Queen, Rank::Jack]));
    }

    #[test]
    fn two_pair() {
        let (r, k) = eval("As Ah Kd Kc Qs");
        assert_eq!(r, Ranking::TwoPair(Rank::Ace, Rank::King));
        assert_eq!(k, Kickers::from(vec![Rank::Queen]));
    }

    #[test]
    fn three_oak() {
        let (r, k) = eval("As Ah Ad Kc Qs");
        assert_eq!(r, Ranking::ThreeOAK(Rank::Ace));
        assert_eq!(k, Kickers::from(vec![Rank::King, Rank::Queen]));
    }

    #[test]
    fn straight() {
        let (r, k) = eval("Ts Jh Qd Kc As");
        assert_eq!(r, Ranking::Straight(Rank::Ace));
        assert_eq!(k, Kickers::default());
    }

    #[test]
    fn wheel_straight() {
        let (r, _) = eval("As 2h 3d 4c 5s");
        assert_eq!(r, Ranking::Straight(Rank::Five));
    }

    #[test]
    fn six_card_straight_takes_top() {
        let (r, _) = eval("As 2s 3h 4d 5c 6s");
        assert_eq!(r, Ranking::Straight(Rank::Six));
    }

    #[test]
    fn flush() {
        let (r, k) = eval("As Ks Qs Js 9s");
        assert_eq!(r, Ranking::Flush(Rank::Ace));
        assert_eq!(k, Kickers::default());
    }

    #[test]
    fn full_house() {
        let (r, _) = eval("2s 2h 2d 3c 3s");
        assert_eq!(r, Ranking::FullHouse(Rank::Two, Rank::Three));
    }

    #[test]
    fn four_oak() {
        let (r, k) = eval("As Ah Ad Ac Ks");
        assert_eq!(r, Ranking::FourOAK(Rank::Ace));
        assert_eq!(k, Kickers::from(vec![Rank::King]));
    }

    #[test]
    fn straight_flush() {
        let (r, _) = eval("Ts Js Qs Ks As");
        assert_eq!(r, Ranking::StraightFlush(Rank::Ace));
    }

    #[test]
    fn wheel_straight_flush() {
        let (r, _) = eval("As 2s 3s 4s 5s");
        assert_eq!(r, Ranking::StraightFlush(Rank::Five));
    }

    #[test]
    fn seven_card_two_pair() {
        let (r, k) = eval("As Ah Kd Kc Qs Jh 9d");
        assert_eq!(r, Ranking::TwoPair(Rank::Ace, Rank::King));
        assert_eq!(k, Kickers::from(vec![Rank::Queen]));
    }

    #[test]
    fn flush_beats_straight() {
        let (r, _) = eval("4h 6h 7h 8h 9h Ts");
        assert_eq!(r, Ranking::Flush(Rank::Nine));
    }

    #[test]
    fn full_house_beats_flush() {
        let (r, _) = eval("Kh Ah Ad As Ks Qs Js 9s");
        assert_eq!(r, Ranking::FullHouse(Rank::Ace, Rank::King));
    }

    #[test]
    fn three_pair_reduces_to_best_two() {
        let (r, k) = eval("As Ah Kd Kc Qs Qh Jd");
        assert_eq!(r, Ranking::TwoPair(Rank::Ace, Rank::King));
        assert_eq!(k, Kickers::from(vec![Rank::Queen]));
    }

    #[test]
    fn double_trips_is_full_house() {
        let (r, _) = eval("As Ah Ad Kc Ks Kh Qd");
        assert_eq!(r, Ranking::FullHouse(Rank::Ace, Rank::King));
    }
}
