use agp_core::Chips;

/// An inclusive chip interval for a wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Span {
    pub min: Chips,
    pub max: Chips,
}

impl Span {
    pub fn new(min: Chips, max: Chips) -> Self {
        debug_assert!(min <= max);
        Self { min, max }
    }
    pub fn contains(&self, chips: Chips) -> bool {
        self.min <= chips && chips <= self.max
    }
}

/// Legal wager intervals for the player to act, already clamped to their
/// stack. `None` means the corresponding action is not available at all.
/// A player may always move all-in below `min` (the all-in exception);
/// amounts above `max` are never legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Ranges {
    pub bet: Option<Span>,
    pub raise: Option<Span>,
}

impl Ranges {
    pub fn none() -> Self {
        Self {
            bet: None,
            raise: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_is_inclusive() {
        let span = Span::new(2, 10);
        assert!(span.contains(2));
        assert!(span.contains(10));
        assert!(!span.contains(1));
        assert!(!span.contains(11));
    }
}
