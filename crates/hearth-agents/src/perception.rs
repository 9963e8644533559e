//! What an agent can see at the start of its decision.
//!
//! [`perceive`] gathers every world fact the decision engine and action
//! execution read into one immutable [`Perception`], so [`crate::decision`]
//! never touches the terrain or the population directly.

use hearth_types::{AgentId, Cell};
use hearth_world::{Terrain, WorldConfig, spatial};

use crate::agent::Agent;
use crate::config::AgentConfig;
use crate::population::Population;

/// A read-only view of the agent's surroundings.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Perception {
    /// Sight radius in whole cells.
    pub vision: f64,
    /// Food cells within sight, in cell order.
    pub food_in_sight: Vec<Cell>,
    /// Wood cells within sight, in cell order.
    pub wood_in_sight: Vec<Cell>,
    /// Closest food among visible and remembered cells.
    pub food_target: Option<Cell>,
    /// Closest wood among visible and remembered cells.
    pub wood_target: Option<Cell>,
    /// Whether any food cell is remembered.
    pub remembers_food: bool,
    /// Nearest visible campfire and its remaining burn ticks.
    pub nearest_campfire: Option<(Cell, u32)>,
    /// The nearest visible campfire is burning low.
    pub campfire_needs_fuel: bool,
    /// Another campfire is within building spacing.
    pub campfire_nearby: bool,
    /// The agent owns its home and it is below full durability.
    pub home_needs_repair: bool,
    /// First abandoned home in cell order.
    pub unclaimed_home: Option<Cell>,
    /// Standing homes.
    pub home_count: usize,
    /// Nearest home anywhere on the map.
    pub nearest_home: Option<Cell>,
    /// A home stands within the community radius.
    pub home_in_community: bool,
    /// Living agents including this one.
    pub census: usize,
    /// The agent stands on a clear cell.
    pub on_clear_cell: bool,
    /// Wood is below its scarcity line.
    pub wood_scarce: bool,
    /// Other agents within sight, in id order.
    pub neighbors: Vec<AgentId>,
    /// First visible neighbor that is low on energy and has no food.
    pub needy_neighbor: Option<AgentId>,
    /// Other agents on the same cell, in id order.
    pub cellmates: Vec<AgentId>,
}

/// Survey the world around `agent`.
///
/// `agent` must be checked out of `population`; `census` counts it.
pub fn perceive(
    agent: &Agent,
    terrain: &Terrain,
    population: &Population,
    census: usize,
    config: &AgentConfig,
    world: &WorldConfig,
) -> Perception {
    let vision = agent.genome.vision_radius();
    let here = agent.cell;

    let food_in_sight = spatial::within(here, vision, terrain.food_cells());
    let wood_in_sight = spatial::within(here, vision, terrain.wood_cells());
    let food_target = closest_target(here, &food_in_sight, agent.memory.food.iter().copied());
    let wood_target = closest_target(here, &wood_in_sight, agent.memory.wood.iter().copied());

    let nearest_campfire = spatial::nearest(here, vision, terrain.campfire_cells())
        .and_then(|cell| terrain.campfire_remaining(cell).map(|left| (cell, left)));
    let campfire_needs_fuel =
        nearest_campfire.is_some_and(|(_, left)| left < world.campfire_refuel_threshold);
    let campfire_nearby = spatial::any_within(
        here,
        config.decision.campfire_spacing,
        terrain.campfire_cells(),
    );

    let home_needs_repair = agent
        .home
        .and_then(|cell| terrain.home_at(cell))
        .is_some_and(|home| home.owner == Some(agent.id) && home.durability < world.home_durability);
    let community_radius = vision + config.decision.community_radius_bonus;

    let neighbors: Vec<&Agent> = spatial::neighbors_within(here, vision, population.iter(), agent.id);
    let needy_neighbor = neighbors
        .iter()
        .find(|n| n.energy < config.decision.needy_energy && n.inventory.food < 1)
        .map(|n| n.id);
    let cellmates = population
        .iter()
        .filter(|other| other.cell == here)
        .map(|other| other.id)
        .collect();

    Perception {
        vision,
        remembers_food: !agent.memory.food.is_empty(),
        food_in_sight,
        wood_in_sight,
        food_target,
        wood_target,
        nearest_campfire,
        campfire_needs_fuel,
        campfire_nearby,
        home_needs_repair,
        unclaimed_home: terrain.first_unclaimed_home(),
        home_count: terrain.home_count(),
        nearest_home: spatial::nearest(here, f64::INFINITY, terrain.home_cells()),
        home_in_community: spatial::any_within(here, community_radius, terrain.home_cells()),
        census,
        on_clear_cell: terrain.is_clear(here),
        wood_scarce: terrain.wood_cell_count() < world.wood_scarcity_threshold,
        neighbors: neighbors.iter().map(|n| n.id).collect(),
        needy_neighbor,
        cellmates,
    }
}

/// Nearest cell among what is visible and what is remembered. Visible cells
/// win ties.
fn closest_target(
    origin: Cell,
    visible: &[Cell],
    remembered: impl Iterator<Item = Cell>,
) -> Option<Cell> {
    spatial::nearest(
        origin,
        f64::INFINITY,
        visible.iter().copied().chain(remembered),
    )
}

impl Perception {
    /// Whether any food is visible or remembered.
    pub fn knows_of_food(&self) -> bool {
        !self.food_in_sight.is_empty() || self.remembers_food
    }
}
