use agp_cards::Card;
use agp_core::Agent;
use agp_core::Chips;
use agp_core::ID;
use agp_core::Position;
use std::collections::VecDeque;

/// One completed hand, compact enough to keep a window of them in memory.
///
/// The seed plus the recorded deltas are what the audit collaborator needs
/// to re-deal and verify the hand offline.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Record {
    pub hand: u64,
    pub seed: u64,
    pub dealer: Position,
    pub board: Vec<Card>,
    pub winners: Vec<ID<Agent>>,
    pub deltas: Vec<(ID<Agent>, Chips)>,
}

impl Record {
    /// Wire rendering for persistence collaborators.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize record")
    }
}

/// Bounded ring of completed hands, oldest evicted first.
#[derive(Debug)]
pub struct History {
    records: VecDeque<Record>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }
    pub fn push(&mut self, record: Record) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
    pub fn latest(&self) -> Option<&Record> {
        self.records.back()
    }
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }
    pub fn to_vec(&self) -> Vec<Record> {
        self.records.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hand: u64) -> Record {
        Record {
            hand,
            seed: hand,
            dealer: 0,
            board: Vec::new(),
            winners: Vec::new(),
            deltas: Vec::new(),
        }
    }

    #[test]
    fn record_serializes_for_handoff() {
        let json = record(9).to_json();
        assert!(json.contains("\"hand\":9"));
        assert!(json.contains("\"seed\":9"));
    }

    #[test]
    fn bounded_eviction() {
        let mut history = History::new(2);
        history.push(record(1));
        history.push(record(2));
        history.push(record(3));
        assert_eq!(history.len(), 2);
        let hands: Vec<u64> = history.records().map(|r| r.hand).collect();
        assert_eq!(hands, vec![2, 3]);
        assert_eq!(history.latest().unwrap().hand, 3);
    }
}
