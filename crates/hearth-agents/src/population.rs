//! The id-keyed agent arena.
//!
//! Agents live in a `BTreeMap<AgentId, Agent>`, so iteration is always in
//! id (birth) order. During a tick the updating agent is checked out with
//! [`Population::check_out`], which removes it from the map and leaves the
//! rest freely mutable; [`Population::check_in`] puts it back.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;

use hearth_types::{AgentId, Cell};

use crate::agent::Agent;
use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::genome::Genome;

/// Every living agent plus the id counter.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    agents: BTreeMap<AgentId, Agent>,
    next_id: u64,
}

impl Default for Population {
    fn default() -> Self {
        Self::new()
    }
}

impl Population {
    /// An empty population whose first id will be 1.
    pub const fn new() -> Self {
        Self {
            agents: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Create and insert a new agent. Ids are never reused.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::IdOverflow`] if the id counter is exhausted.
    pub fn spawn(
        &mut self,
        cell: Cell,
        genome: Genome,
        config: &AgentConfig,
        rng: &mut impl Rng,
    ) -> Result<AgentId, AgentError> {
        let id = AgentId(self.next_id);
        self.next_id = self.next_id.checked_add(1).ok_or(AgentError::IdOverflow)?;
        self.agents.insert(id, Agent::new(id, cell, genome, config, rng));
        Ok(id)
    }

    /// Temporarily remove an agent so it can act on the others.
    pub fn check_out(&mut self, id: AgentId) -> Option<Agent> {
        self.agents.remove(&id)
    }

    /// Return a checked-out agent.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::DuplicateAgent`] if the id is already present.
    pub fn check_in(&mut self, agent: Agent) -> Result<(), AgentError> {
        if self.agents.contains_key(&agent.id) {
            return Err(AgentError::DuplicateAgent(agent.id));
        }
        self.agents.insert(agent.id, agent);
        Ok(())
    }

    /// Look up a living agent.
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    /// Look up a living agent mutably.
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    /// Living agents in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.agents.values()
    }

    /// Living agents in id order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> + '_ {
        self.agents.values_mut()
    }

    /// Ids of living agents in order.
    pub fn ids(&self) -> Vec<AgentId> {
        self.agents.keys().copied().collect()
    }

    /// Cells with at least one agent on them.
    pub fn occupied_cells(&self) -> BTreeSet<Cell> {
        self.agents.values().map(|a| a.cell).collect()
    }

    /// Number of agents in the arena.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
