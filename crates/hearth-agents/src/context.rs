//! Mutable world access for the agent whose turn it is.

use rand::rngs::StdRng;

use hearth_world::{KnowledgePool, Terrain, WorldConfig};

use crate::config::AgentConfig;
use crate::population::Population;

/// Everything an agent may read or change during its update.
///
/// The acting agent is not in `population` while this context is live; it
/// is passed separately as `&mut Agent`.
#[derive(Debug)]
pub struct TickContext<'a> {
    /// Current tick.
    pub tick: u64,
    /// Resource and structure layers.
    pub terrain: &'a mut Terrain,
    /// All other living agents.
    pub population: &'a mut Population,
    /// The library's knowledge pool.
    pub knowledge: &'a mut KnowledgePool,
    /// The simulation's random stream.
    pub rng: &'a mut StdRng,
    /// Agent constants.
    pub config: &'a AgentConfig,
    /// World constants.
    pub world: &'a WorldConfig,
}

impl TickContext<'_> {
    /// Living agents including the one currently checked out.
    pub fn census(&self) -> usize {
        self.population.len().saturating_add(1)
    }
}
