use super::action::Action;
use super::position::Label;
use super::showdown::PotAward;
use agp_cards::Card;
use agp_cards::Hole;
use agp_cards::Street;
use agp_core::Chips;
use agp_core::Position;
use agp_core::Seq;

/// Events emitted by the engine, strictly ordered within a hand.
///
/// Every variant carries the hand number and a sequence number that
/// increases by one per event; downstream consumers (audit log, protocol
/// layer) rely on that ordering. Hole cards appear in the raw stream;
/// redacting them for non-owners is the protocol layer's concern.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    HandStart {
        hand: u64,
        seq: Seq,
        dealer: Position,
        stacks: Vec<(Position, Chips)>,
        labels: Vec<(Position, Label)>,
    },
    AntesPosted {
        hand: u64,
        seq: Seq,
        antes: Vec<(Position, Chips)>,
    },
    BlindsPosted {
        hand: u64,
        seq: Seq,
        small: (Position, Chips),
        big: (Position, Chips),
    },
    HoleCardsDealt {
        hand: u64,
        seq: Seq,
        holes: Vec<(Position, Hole)>,
    },
    PlayerAction {
        hand: u64,
        seq: Seq,
        seat: Position,
        action: Action,
        pot: Chips,
    },
    CommunityCardsDealt {
        hand: u64,
        seq: Seq,
        street: Street,
        cards: Vec<Card>,
    },
    StreetChanged {
        hand: u64,
        seq: Seq,
        street: Street,
    },
    Showdown {
        hand: u64,
        seq: Seq,
        rankings: Vec<(Position, String)>,
    },
    PotDistributed {
        hand: u64,
        seq: Seq,
        awards: Vec<PotAward>,
    },
    HandEnd {
        hand: u64,
        seq: Seq,
        winners: Vec<Position>,
        stacks: Vec<(Position, Chips)>,
    },
}

impl Event {
    pub fn hand(&self) -> u64 {
        match self {
            Event::HandStart { hand, .. }
            | Event::AntesPosted { hand, .. }
            | Event::BlindsPosted { hand, .. }
            | Event::HoleCardsDealt { hand, .. }
            | Event::PlayerAction { hand, .. }
            | Event::CommunityCardsDealt { hand, .. }
            | Event::StreetChanged { hand, .. }
            | Event::Showdown { hand, .. }
            | Event::PotDistributed { hand, .. }
            | Event::HandEnd { hand, .. } => *hand,
        }
    }
    pub fn seq(&self) -> Seq {
        match self {
            Event::HandStart { seq, .. }
            | Event::AntesPosted { seq, .. }
            | Event::BlindsPosted { seq, .. }
            | Event::HoleCardsDealt { seq, .. }
            | Event::PlayerAction { seq, .. }
            | Event::CommunityCardsDealt { seq, .. }
            | Event::StreetChanged { seq, .. }
            | Event::Showdown { seq, .. }
            | Event::PotDistributed { seq, .. }
            | Event::HandEnd { seq, .. } => *seq,
        }
    }
    /// Wire rendering for the audit log.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize event")
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Event::HandStart { hand, dealer, .. } => {
                write!(f, "hand #{} (dealer seat {})", hand, dealer)
            }
            Event::AntesPosted { antes, .. } => write!(f, "antes from {} seats", antes.len()),
            Event::BlindsPosted { small, big, .. } => {
                write!(f, "blinds {}/{}", small.1, big.1)
            }
            Event::HoleCardsDealt { holes, .. } => write!(f, "hole cards to {} seats", holes.len()),
            Event::PlayerAction {
                seat, action, pot, ..
            } => write!(f, "seat {}: {} (pot {})", seat, action, pot),
            Event::CommunityCardsDealt { street, cards, .. } => {
                write!(f, "{}:", street)?;
                for card in cards {
                    write!(f, " {}", card)?;
                }
                Ok(())
            }
            Event::StreetChanged { street, .. } => write!(f, "street: {}", street),
            Event::Showdown { rankings, .. } => write!(f, "showdown, {} hands", rankings.len()),
            Event::PotDistributed { awards, .. } => write!(f, "{} pots distributed", awards.len()),
            Event::HandEnd { winners, .. } => {
                write!(f, "hand over, winners:")?;
                for winner in winners {
                    write!(f, " seat {}", winner)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_is_tagged_snake_case() {
        let event = Event::StreetChanged {
            hand: 1,
            seq: 7,
            street: Street::Flop,
        };
        let json = event.to_json();
        assert!(json.contains("\"type\":\"street_changed\""));
        assert!(json.contains("\"street\":\"flop\""));
        assert!(json.contains("\"seq\":7"));
    }

    #[test]
    fn accessors_reach_every_variant() {
        let event = Event::HandEnd {
            hand: 3,
            seq: 21,
            winners: vec![0],
            stacks: vec![(0, 200)],
        };
        assert_eq!(event.hand(), 3);
        assert_eq!(event.seq(), 21);
    }
}
