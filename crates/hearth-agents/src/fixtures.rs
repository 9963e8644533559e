//! Deterministic agents and worlds for unit tests.

#![allow(clippy::unwrap_used, missing_docs)]

use rand::SeedableRng;
use rand::rngs::{SmallRng, StdRng};

use hearth_types::{AgentId, Cell};
use hearth_world::{KnowledgePool, Terrain, WorldConfig};

use crate::agent::{Agent, Inventory};
use crate::config::AgentConfig;
use crate::context::TickContext;
use crate::genome::Genome;
use crate::population::Population;

/// An adult with middling genes, no inventory, and comfortable needs.
pub fn test_agent(id: u64, cell: Cell) -> Agent {
    let mut rng = SmallRng::seed_from_u64(id);
    let genome = Genome {
        vision: 6.0,
        speed: 1.0,
        metabolism: 1.0,
        aggression: 0.0,
        builder: 0.0,
        mating_drive: 100.0,
        sociability: 0.0,
        farming: 0.0,
    };
    let mut agent = Agent::new(AgentId(id), cell, genome, &AgentConfig::default(), &mut rng);
    agent.age = 200;
    agent.social = 70.0;
    agent.inventory = Inventory::default();
    agent
}

/// Owned world state that can lend out a [`TickContext`].
pub struct TestWorld {
    pub terrain: Terrain,
    pub population: Population,
    pub knowledge: KnowledgePool,
    pub rng: StdRng,
    pub config: AgentConfig,
    pub world: WorldConfig,
}

impl TestWorld {
    /// A 30x30 empty world with default constants.
    pub fn new() -> Self {
        let world = WorldConfig::default();
        Self {
            terrain: Terrain::new(30, 30).unwrap(),
            population: Population::new(),
            knowledge: KnowledgePool::new(&world),
            rng: StdRng::seed_from_u64(1),
            config: AgentConfig::default(),
            world,
        }
    }

    /// Put an agent into the arena.
    pub fn add(&mut self, agent: Agent) {
        let _ = self.population.check_in(agent);
    }

    /// Borrow everything as a tick context.
    pub fn ctx(&mut self) -> TickContext<'_> {
        TickContext {
            tick: 1,
            terrain: &mut self.terrain,
            population: &mut self.population,
            knowledge: &mut self.knowledge,
            rng: &mut self.rng,
            config: &self.config,
            world: &self.world,
        }
    }
}
