use agp_core::Position;

/// Table position labels anchored at the dealer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Button,
    SmallBlind,
    BigBlind,
    UnderTheGun,
    UnderTheGunPlusOne,
    Middle,
    Hijack,
    Cutoff,
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Label::Button => write!(f, "BTN"),
            Label::SmallBlind => write!(f, "SB"),
            Label::BigBlind => write!(f, "BB"),
            Label::UnderTheGun => write!(f, "UTG"),
            Label::UnderTheGunPlusOne => write!(f, "UTG+1"),
            Label::Middle => write!(f, "MP"),
            Label::Hijack => write!(f, "HJ"),
            Label::Cutoff => write!(f, "CO"),
        }
    }
}

/// One full clockwise cycle of `order`, starting at the seat after `from`.
///
/// Seat indices need not be contiguous, and `from` need not itself appear
/// in `order`; the ring is defined purely by ascending index with
/// wrap-around.
pub fn clockwise(order: &[Position], from: Position) -> impl Iterator<Item = Position> + '_ {
    let after = order.iter().copied().filter(move |p| *p > from);
    let until = order.iter().copied().filter(move |p| *p <= from);
    after.chain(until)
}

/// Clockwise distance from the dealer's left, for ordering seats.
pub fn rank_from(order: &[Position], dealer: Position, pos: Position) -> usize {
    clockwise(order, dealer)
        .position(|p| p == pos)
        .expect("position present in order")
}

/// Blind seats for a hand: `(small, big)`.
///
/// Heads-up the dealer posts the small blind; with three or more players
/// the blinds are the two seats clockwise from the dealer.
pub fn blinds(order: &[Position], dealer: Position) -> (Position, Position) {
    debug_assert!(order.len() >= 2);
    let mut ring = clockwise(order, dealer);
    if order.len() == 2 {
        (dealer, ring.find(|p| *p != dealer).expect("two seats"))
    } else {
        let small = ring.next().expect("three seats");
        let big = ring.next().expect("three seats");
        (small, big)
    }
}

/// First seat to speak preflop: the dealer heads-up, otherwise the seat
/// after the big blind.
pub fn first_preflop(order: &[Position], dealer: Position) -> Position {
    if order.len() == 2 {
        dealer
    } else {
        let (_, big) = blinds(order, dealer);
        clockwise(order, big).next().expect("non-empty ring")
    }
}

/// Next clockwise seat after `from` that can still act, scanning one full
/// cycle. `None` means nobody can: the street must advance.
pub fn next_active(
    order: &[Position],
    from: Position,
    can_act: impl Fn(Position) -> bool,
) -> Option<Position> {
    clockwise(order, from).find(|p| can_act(*p))
}

/// Rotates the button to the next seat still holding chips.
///
/// `eligible` is the ascending list of seats with chips > 0; busted and
/// vacated seats are simply absent. Returns `None` when nobody is left.
pub fn advance_dealer(eligible: &[Position], current: Position) -> Option<Position> {
    clockwise(eligible, current).next()
}

/// Position labels for 2-8 seats, anchored at the dealer.
pub fn labels(order: &[Position], dealer: Position) -> Vec<(Position, Label)> {
    use Label::*;
    let tail: &[Label] = match order.len() {
        2 => &[BigBlind],
        3 => &[SmallBlind, BigBlind],
        4 => &[SmallBlind, BigBlind, UnderTheGun],
        5 => &[SmallBlind, BigBlind, UnderTheGun, Cutoff],
        6 => &[SmallBlind, BigBlind, UnderTheGun, Hijack, Cutoff],
        7 => &[SmallBlind, BigBlind, UnderTheGun, Middle, Hijack, Cutoff],
        8 => &[
            SmallBlind,
            BigBlind,
            UnderTheGun,
            UnderTheGunPlusOne,
            Middle,
            Hijack,
            Cutoff,
        ],
        n => panic!("unsupported table size: {}", n),
    };
    std::iter::once((dealer, Button))
        .chain(clockwise(order, dealer).zip(tail.iter().copied()))
        .collect()
}
