use super::position;
use super::pot::Pot;
use super::pot::partition;
use super::seat::Seat;
use super::seat::Status;
use agp_cards::Card;
use agp_cards::Strength;
use agp_core::Agent;
use agp_core::Chips;
use agp_core::ID;
use agp_core::Position;

/// One pot layer's resolution: who won it and their exact shares.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PotAward {
    pub amount: Chips,
    pub winners: Vec<(Position, Chips)>,
}

/// Terminal result of a hand, folded into the actor's history.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Summary {
    pub winners: Vec<ID<Agent>>,
    pub awards: Vec<PotAward>,
    pub rankings: Vec<(Position, String)>,
}

/// Resolves a showdown: layers the pots, evaluates live hands, and splits
/// each layer among its best eligible hands.
///
/// Ties split evenly; remainder chips go to the tied winners seated
/// earliest clockwise of the dealer. Pots whose eligible players have all
/// (defensively) vanished fall to the best live hand overall.
pub struct Showdown<'a> {
    seats: &'a [Seat],
    board: &'a [Card],
    dealer: Position,
}

impl<'a> From<(&'a [Seat], &'a [Card], Position)> for Showdown<'a> {
    fn from((seats, board, dealer): (&'a [Seat], &'a [Card], Position)) -> Self {
        Self {
            seats,
            board,
            dealer,
        }
    }
}

impl Showdown<'_> {
    /// Evaluated strengths for every non-folded seat.
    pub fn rankings(&self) -> Vec<(Position, Strength)> {
        self.seats
            .iter()
            .filter(|s| s.status() != Status::Folding)
            .map(|s| (s.position(), Strength::evaluate(s.hole(), self.board)))
            .collect()
    }

    /// Layered pots and their awards, ascending from the main pot.
    pub fn settle(&self) -> (Vec<Pot>, Vec<PotAward>) {
        let pots = partition(self.seats);
        let rankings = self.rankings();
        let order: Vec<Position> = self.seats.iter().map(Seat::position).collect();
        let awards = pots
            .iter()
            .map(|pot| self.award(pot, &rankings, &order))
            .collect();
        (pots, awards)
    }

    fn award(
        &self,
        pot: &Pot,
        rankings: &[(Position, Strength)],
        order: &[Position],
    ) -> PotAward {
        let eligible: Vec<Position> = self
            .seats
            .iter()
            .filter(|s| pot.eligible().contains(&s.player()))
            .map(Seat::position)
            .collect();
        let contenders: Vec<Position> = if eligible.is_empty() {
            rankings.iter().map(|(p, _)| *p).collect()
        } else {
            eligible
        };
        let strength = |pos: Position| {
            rankings
                .iter()
                .find(|(p, _)| *p == pos)
                .map(|(_, s)| *s)
                .expect("contenders are live and evaluated")
        };
        let best = contenders
            .iter()
            .map(|p| strength(*p))
            .max()
            .expect("pot has at least one contender");
        let mut winners: Vec<Position> = contenders
            .into_iter()
            .filter(|p| strength(*p) == best)
            .collect();
        winners.sort_by_key(|p| position::rank_from(order, self.dealer, *p));
        let n = winners.len() as Chips;
        let share = pot.amount() / n;
        let bonus = pot.amount() % n;
        PotAward {
            amount: pot.amount(),
            winners: winners
                .into_iter()
                .enumerate()
                .map(|(i, p)| (p, share + if (i as Chips) < bonus { 1 } else { 0 }))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agp_cards::Hole;

    fn rigged(position: Position, spent: Chips, hole: &str, folded: bool) -> Seat {
        let cards: Vec<Card> = hole
            .split_whitespace()
            .map(|s| Card::try_from(s).unwrap())
            .collect();
        let mut seat = Seat::new(
            ID::default(),
            position,
            spent,
            Hole::from((cards[0], cards[1])),
        );
        seat.pay(spent);
        if folded {
            seat.fold();
        }
        seat
    }

    fn board(s: &str) -> Vec<Card> {
        s.split_whitespace()
            .map(|c| Card::try_from(c).unwrap())
            .collect()
    }

    #[test]
    fn best_hand_scoops() {
        let seats = [
            rigged(0, 100, "As Ah", false),
            rigged(1, 100, "2c 7d", false),
        ];
        let board = board("Ad Kc 9s 5h 2d");
        let (_, awards) = Showdown::from((&seats[..], &board[..], 0)).settle();
        assert_eq!(awards.len(), 1);
        assert_eq!(awards[0].winners, vec![(0, 200)]);
    }

    #[test]
    fn split_pot_with_odd_chip_clockwise_of_dealer() {
        // seats 0 and 1 both play the board straight and split 201 chips;
        // the odd chip goes to seat 0, nearest clockwise of dealer 2
        let seats = [
            rigged(0, 67, "2c 2d", false),
            rigged(1, 67, "3c 3d", false),
            rigged(2, 67, "4c 4d", true),
        ];
        let board = board("Ts Js Qh Kd Ah");
        let (_, awards) = Showdown::from((&seats[..], &board[..], 2)).settle();
        assert_eq!(awards.len(), 1);
        assert_eq!(awards[0].amount, 201);
        assert_eq!(awards[0].winners, vec![(0, 101), (1, 100)]);
    }

    #[test]
    fn short_all_in_wins_only_main_pot() {
        let seats = [
            rigged(0, 50, "As Ah", false),  // best hand, short stack
            rigged(1, 100, "Kc Kd", false), // second best, covers
            rigged(2, 100, "2c 7d", false),
        ];
        let board = board("3d 5c 9s Jh Qd");
        let (pots, awards) = Showdown::from((&seats[..], &board[..], 0)).settle();
        assert_eq!(pots.len(), 2);
        assert_eq!(awards[0].winners, vec![(0, 150)]);
        assert_eq!(awards[1].winners, vec![(1, 100)]);
    }

    #[test]
    fn folded_best_hand_wins_nothing() {
        let seats = [
            rigged(0, 100, "As Ah", true),
            rigged(1, 100, "Kc Kd", false),
            rigged(2, 100, "2c 7d", false),
        ];
        let board = board("3d 5c 9s Jh Qd");
        let (_, awards) = Showdown::from((&seats[..], &board[..], 0)).settle();
        assert_eq!(awards.len(), 1);
        assert_eq!(awards[0].winners, vec![(1, 300)]);
    }
}
