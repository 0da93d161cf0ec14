use agp_core::DECISION_TIMEOUT;
use std::time::Duration;
use tokio::time::Instant;

/// Configuration for the inactivity deadline.
#[derive(Debug, Clone, Copy)]
pub struct TimerConfig {
    pub decision: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            decision: Duration::from_secs(DECISION_TIMEOUT),
        }
    }
}

/// Cancellable, re-armable decision deadline for the seat to act.
#[derive(Debug)]
pub struct Timer {
    config: TimerConfig,
    deadline: Option<Instant>,
}

impl Timer {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            deadline: None,
        }
    }
    pub fn arm(&mut self) {
        self.deadline = Some(Instant::now() + self.config.decision);
    }
    pub fn clear(&mut self) {
        self.deadline = None;
    }
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
    pub fn expired(&self) -> bool {
        self.deadline.map(|d| Instant::now() >= d).unwrap_or(false)
    }
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_cleared() {
        let timer = Timer::new(TimerConfig::default());
        assert!(timer.deadline().is_none());
        assert!(!timer.expired());
    }

    #[test]
    fn arms_and_clears() {
        let mut timer = Timer::new(TimerConfig::default());
        timer.arm();
        assert!(timer.deadline().is_some());
        assert!(!timer.expired());
        assert!(timer.remaining().is_some());
        timer.clear();
        assert!(timer.deadline().is_none());
    }

    #[test]
    fn rearming_moves_the_deadline() {
        let mut timer = Timer::new(TimerConfig {
            decision: Duration::from_secs(10),
        });
        timer.arm();
        let first = timer.deadline().unwrap();
        timer.arm();
        assert!(timer.deadline().unwrap() >= first);
    }
}
