//! Death consequences.
//!
//! When an agent dies its carried food and wood drop on its cell, its id is
//! removed from every parent's children, and its home is left standing but
//! unowned so another agent can claim it.

use tracing::info;

use hearth_types::{AgentId, Cell, DeathCause};
use hearth_world::{Terrain, WorldConfig};

use crate::agent::{Agent, Inventory};
use crate::population::Population;

/// What a death changed in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeathConsequences {
    /// The agent who died.
    pub agent_id: AgentId,
    /// Why it died.
    pub cause: DeathCause,
    /// Age at death, in ticks.
    pub final_age: u32,
    /// Where it died and where its goods fell.
    pub cell: Cell,
    /// Food units dropped.
    pub dropped_food: u32,
    /// Wood units dropped.
    pub dropped_wood: u32,
    /// Home left without an owner.
    pub released_home: Option<Cell>,
}

/// Apply the consequences of `agent`'s death.
///
/// `agent` must already be out of `population`. Its inventory is drained
/// into the terrain; seeds are lost with it.
pub fn process_death(
    agent: &mut Agent,
    cause: DeathCause,
    terrain: &mut Terrain,
    population: &mut Population,
    world: &WorldConfig,
) -> DeathConsequences {
    let carried = std::mem::take(&mut agent.inventory);
    let Inventory { food, wood, .. } = carried;
    terrain.add_food(agent.cell, food, world.food_freshness);
    terrain.add_wood(agent.cell, wood);

    for other in population.iter_mut() {
        other.children.remove(&agent.id);
    }

    let released_home = agent
        .home
        .take()
        .filter(|home| terrain.release_home(*home, agent.id));

    info!(
        agent_id = %agent.id,
        cause = cause.label(),
        age = agent.age,
        x = agent.cell.x,
        y = agent.cell.y,
        "Agent died"
    );

    DeathConsequences {
        agent_id: agent.id,
        cause,
        final_age: agent.age,
        cell: agent.cell,
        dropped_food: food,
        dropped_wood: wood,
        released_home,
    }
}
