use super::error::TableError;
use agp_core::Agent;
use agp_core::Chips;
use agp_core::ID;
use agp_core::Position;
use std::collections::BTreeMap;

/// One occupied seat in the roster.
///
/// The token is the credential binding the agent to the seat; verifying it
/// belongs to the auth layer, the table only stores it. A chair marked
/// `away` survives until its seat is reused, so a hand in flight can still
/// settle chips back into it.
#[derive(Debug, Clone)]
pub struct Chair {
    agent: ID<Agent>,
    token: String,
    stack: Chips,
    away: bool,
}

impl Chair {
    pub fn agent(&self) -> ID<Agent> {
        self.agent
    }
    pub fn token(&self) -> &str {
        &self.token
    }
    pub fn stack(&self) -> Chips {
        self.stack
    }
    pub fn is_away(&self) -> bool {
        self.away
    }
}

/// Seat bookkeeping for one table, independent of any hand in progress.
#[derive(Debug)]
pub struct Roster {
    chairs: BTreeMap<Position, Chair>,
    capacity: usize,
}

impl Roster {
    pub fn new(capacity: usize) -> Self {
        Self {
            chairs: BTreeMap::new(),
            capacity,
        }
    }
    /// Seats an agent at the lowest free position.
    pub fn seat(
        &mut self,
        agent: ID<Agent>,
        token: &str,
        buy_in: Chips,
    ) -> Result<Position, TableError> {
        if self
            .chairs
            .values()
            .any(|c| !c.away && c.agent == agent)
        {
            return Err(TableError::AgentAlreadySeated(agent));
        }
        let position = (0..self.capacity)
            .find(|p| self.chairs.get(p).map(|c| c.away).unwrap_or(true))
            .ok_or(TableError::TableFull)?;
        self.chairs.insert(
            position,
            Chair {
                agent,
                token: token.to_string(),
                stack: buy_in,
                away: false,
            },
        );
        Ok(position)
    }
    /// Soft-removes an agent, returning the stack they leave with.
    pub fn unseat(&mut self, agent: ID<Agent>) -> Result<Chips, TableError> {
        self.chairs
            .values_mut()
            .find(|c| !c.away && c.agent == agent)
            .map(|c| {
                c.away = true;
                c.stack
            })
            .ok_or(TableError::AgentNotSeated(agent))
    }
    /// Players eligible for the next hand: present, with chips.
    pub fn players(&self) -> Vec<(ID<Agent>, Position, Chips)> {
        self.chairs
            .iter()
            .filter(|(_, c)| !c.away && c.stack > 0)
            .map(|(p, c)| (c.agent, *p, c.stack))
            .collect()
    }
    /// A hand needs at least two funded, present seats.
    pub fn can_start(&self) -> bool {
        self.players().len() >= 2
    }
    /// Writes a hand's final stack back to whoever holds the chips.
    pub fn settle(&mut self, agent: ID<Agent>, stack: Chips) {
        if let Some(chair) = self.chairs.values_mut().find(|c| c.agent == agent) {
            chair.stack = stack;
        }
    }
    pub fn chairs(&self) -> impl Iterator<Item = (&Position, &Chair)> {
        self.chairs.iter()
    }
}
