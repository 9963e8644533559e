//! Eating, collecting, and planting.

use rand::Rng;

use hearth_types::{Behavior, Skill};
use hearth_world::{Terrain, WorldConfig};

use crate::agent::Agent;
use crate::config::AgentConfig;

/// Eat one carried food.
///
/// Foraging improves first, so the meal already benefits from the new
/// level. A meal may also turn up a food seed.
pub fn consume_food(agent: &mut Agent, config: &AgentConfig, rng: &mut impl Rng) -> bool {
    if agent.inventory.food == 0 {
        return false;
    }
    let a = &config.actions;
    agent.inventory.food = agent.inventory.food.saturating_sub(1);
    let foraging = agent
        .skills
        .train(Skill::Foraging, a.foraging_gain, &config.skill_caps);
    agent.energy += a.food_energy + foraging * a.foraging_energy_bonus;
    agent.adjust_love(a.eat_love_gain, config);
    if rng.random::<f64>() < a.seed_chance_base + foraging * a.seed_chance_per_skill {
        agent.inventory.seeds = agent.inventory.seeds.saturating_add(1);
    }
    agent.behavior = Behavior::Wandering;
    true
}

/// Pick up one unit of food from the agent's cell.
pub fn pickup_food(agent: &mut Agent, terrain: &mut Terrain, config: &AgentConfig) -> bool {
    if agent.food_room(config) == 0 || !terrain.take_food(agent.cell) {
        return false;
    }
    agent.inventory.food = agent.inventory.food.saturating_add(1);
    agent.memory.forget_food(agent.cell);
    agent.behavior = Behavior::Wandering;
    true
}

/// Pick up one unit of wood from the agent's cell, sometimes finding a
/// wood seed with it.
pub fn take_wood(
    agent: &mut Agent,
    terrain: &mut Terrain,
    config: &AgentConfig,
    rng: &mut impl Rng,
) -> bool {
    if agent.wood_room(config) == 0 || !terrain.take_wood(agent.cell) {
        return false;
    }
    agent.inventory.wood = agent.inventory.wood.saturating_add(1);
    if rng.random::<f64>() < config.actions.wood_seed_chance {
        agent.inventory.wood_seeds = agent.inventory.wood_seeds.saturating_add(1);
    }
    agent.memory.forget_wood(agent.cell);
    agent.behavior = Behavior::Wandering;
    true
}

/// Sow a food seed on the agent's cell.
pub fn plant_seed(
    agent: &mut Agent,
    terrain: &mut Terrain,
    config: &AgentConfig,
    world: &WorldConfig,
) -> bool {
    if agent.inventory.seeds == 0 || !terrain.plant_food(agent.cell, world.plant_grow_ticks) {
        return false;
    }
    agent.inventory.seeds = agent.inventory.seeds.saturating_sub(1);
    after_planting(agent, config);
    true
}

/// Plant a wood seed on the agent's cell.
pub fn plant_tree(
    agent: &mut Agent,
    terrain: &mut Terrain,
    config: &AgentConfig,
    world: &WorldConfig,
) -> bool {
    if agent.inventory.wood_seeds == 0 || !terrain.plant_tree(agent.cell, world.tree_grow_ticks) {
        return false;
    }
    agent.inventory.wood_seeds = agent.inventory.wood_seeds.saturating_sub(1);
    after_planting(agent, config);
    true
}

fn after_planting(agent: &mut Agent, config: &AgentConfig) {
    agent.energy -= config.actions.plant_energy;
    agent
        .skills
        .train(Skill::Farming, config.actions.farming_gain, &config.skill_caps);
    agent.behavior = Behavior::Wandering;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use hearth_types::Cell;

    use super::*;
    use crate::fixtures::test_agent;

    #[test]
    fn eating_restores_energy_and_trains_foraging() {
        let config = AgentConfig::default();
        let mut rng = SmallRng::seed_from_u64(1);
        let mut a = test_agent(1, Cell::new(0, 0));
        a.energy = 50.0;
        a.love = 0.0;
        a.inventory.food = 1;
        a.behavior = Behavior::Foraging;
        assert!(consume_food(&mut a, &config, &mut rng));
        assert_eq!(a.inventory.food, 0);
        assert!((a.energy - 172.0).abs() < 1e-9);
        assert!((a.love - 2.5).abs() < 1e-12);
        assert_eq!(a.behavior, Behavior::Wandering);
        assert!(!consume_food(&mut a, &config, &mut rng));
    }

    #[test]
    fn pickup_respects_capacity() {
        let config = AgentConfig::default();
        let mut t = Terrain::new(10, 10).unwrap();
        let cell = Cell::new(2, 2);
        t.add_food(cell, 3, 100);
        let mut a = test_agent(1, cell);
        a.memory.remember_food([cell]);
        assert!(pickup_food(&mut a, &mut t, &config));
        assert!(pickup_food(&mut a, &mut t, &config));
        assert!(!pickup_food(&mut a, &mut t, &config));
        assert_eq!(a.inventory.food, 2);
        assert_eq!(t.food_at(cell).unwrap().units, 1);
        assert!(a.memory.food.is_empty());
    }

    #[test]
    fn wood_is_collected_up_to_three() {
        let config = AgentConfig::default();
        let mut rng = SmallRng::seed_from_u64(2);
        let mut t = Terrain::new(10, 10).unwrap();
        let cell = Cell::new(2, 2);
        t.add_wood(cell, 5);
        let mut a = test_agent(1, cell);
        for _ in 0..5 {
            take_wood(&mut a, &mut t, &config, &mut rng);
        }
        assert_eq!(a.inventory.wood, 3);
        assert_eq!(t.wood_units(), 2);
    }

    #[test]
    fn planting_needs_a_clear_cell_and_a_seed() {
        let config = AgentConfig::default();
        let world = WorldConfig::default();
        let mut t = Terrain::new(10, 10).unwrap();
        let mut a = test_agent(1, Cell::new(4, 4));
        assert!(!plant_seed(&mut a, &mut t, &config, &world));
        a.inventory.seeds = 2;
        a.energy = 100.0;
        assert!(plant_seed(&mut a, &mut t, &config, &world));
        assert_eq!(a.inventory.seeds, 1);
        assert!((a.energy - 90.0).abs() < 1e-12);
        assert!((a.skills.get(Skill::Farming) - 0.2).abs() < 1e-12);
        assert!(!plant_seed(&mut a, &mut t, &config, &world));

        a.inventory.wood_seeds = 1;
        a.cell = Cell::new(5, 5);
        assert!(plant_tree(&mut a, &mut t, &config, &world));
        assert_eq!(t.tree_cells().count(), 1);
    }

    #[test]
    fn refused_actions_leave_state_unchanged() {
        let config = AgentConfig::default();
        let world = WorldConfig::default();
        let mut rng = SmallRng::seed_from_u64(3);
        let mut t = Terrain::new(10, 10).unwrap();
        let bare = Cell::new(1, 1);
        let wooded = Cell::new(2, 2);
        t.add_wood(wooded, 2);
        t.add_food(Cell::new(3, 3), 1, 100);

        let mut a = test_agent(1, bare);
        a.energy = 100.0;
        let (agent_before, terrain_before) = (a.clone(), t.clone());

        // Nothing carried, nothing underfoot, no seeds.
        assert!(!consume_food(&mut a, &config, &mut rng));
        assert!(!pickup_food(&mut a, &mut t, &config));
        assert!(!take_wood(&mut a, &mut t, &config, &mut rng));
        assert!(!plant_seed(&mut a, &mut t, &config, &world));
        assert!(!plant_tree(&mut a, &mut t, &config, &world));
        assert_eq!(a, agent_before);
        assert_eq!(t, terrain_before);

        // Full wood load on a wood cell.
        a.cell = wooded;
        a.inventory.wood = 3;
        let (agent_before, terrain_before) = (a.clone(), t.clone());
        assert!(!take_wood(&mut a, &mut t, &config, &mut rng));
        assert_eq!(a, agent_before);
        assert_eq!(t, terrain_before);

        // Seeds in hand, but the cell is not clear.
        a.inventory.seeds = 1;
        a.inventory.wood_seeds = 1;
        let (agent_before, terrain_before) = (a.clone(), t.clone());
        assert!(!plant_seed(&mut a, &mut t, &config, &world));
        assert!(!plant_tree(&mut a, &mut t, &config, &world));
        assert_eq!(a, agent_before);
        assert_eq!(t, terrain_before);
    }

    #[test]
    fn full_hands_refuse_food() {
        let config = AgentConfig::default();
        let mut t = Terrain::new(10, 10).unwrap();
        let cell = Cell::new(4, 4);
        t.add_food(cell, 1, 100);
        let mut a = test_agent(1, cell);
        a.inventory.food = 2;
        a.memory.remember_food([cell]);
        let (agent_before, terrain_before) = (a.clone(), t.clone());
        assert!(!pickup_food(&mut a, &mut t, &config));
        assert_eq!(a, agent_before);
        assert_eq!(t, terrain_before);
    }
}
