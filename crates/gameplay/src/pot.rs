use super::seat::Seat;
use super::seat::Status;
use agp_core::Agent;
use agp_core::Chips;
use agp_core::ID;

/// A pot layer with its eligibility set.
///
/// Folded players never appear in `eligible`, though their chips still
/// fill the layers they contributed to (dead money). The sum of all pot
/// amounts always equals the sum of all players' hand contributions.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Pot {
    amount: Chips,
    eligible: Vec<ID<Agent>>,
}

impl Pot {
    pub fn new(amount: Chips, eligible: Vec<ID<Agent>>) -> Self {
        Self { amount, eligible }
    }
    pub fn amount(&self) -> Chips {
        self.amount
    }
    pub fn eligible(&self) -> &[ID<Agent>] {
        &self.eligible
    }
    pub fn add(&mut self, chips: Chips) {
        self.amount += chips;
    }
    /// Drops a folded player from contention.
    pub fn exclude(&mut self, player: ID<Agent>) {
        self.eligible.retain(|p| *p != player);
    }
}

/// Partitions hand contributions into eligibility-layered side pots.
///
/// Distinct nonzero contribution levels, ascending, each define a layer
/// worth `(level - previous) x |contributors at or above level|`. A layer
/// is eligible to every non-folded player who reached it; adjacent layers
/// with identical eligibility collapse into one.
pub fn partition(seats: &[Seat]) -> Vec<Pot> {
    let mut levels: Vec<Chips> = seats
        .iter()
        .map(Seat::spent)
        .filter(|spent| *spent > 0)
        .collect();
    levels.sort_unstable();
    levels.dedup();
    let mut pots: Vec<Pot> = Vec::new();
    let mut prev: Chips = 0;
    for level in levels {
        let amount = seats
            .iter()
            .map(|s| s.spent().min(level) - s.spent().min(prev))
            .sum();
        let eligible: Vec<ID<Agent>> = seats
            .iter()
            .filter(|s| s.spent() >= level && s.status() != Status::Folding)
            .map(Seat::player)
            .collect();
        match pots.last_mut() {
            Some(last) if last.eligible == eligible => last.add(amount),
            _ => pots.push(Pot::new(amount, eligible)),
        }
        prev = level;
    }
    pots
}
