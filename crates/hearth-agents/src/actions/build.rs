//! Structures: homes and campfires.
//!
//! Homes and campfires cost the same wood, discounted by building skill
//! (see [`AgentConfig::structure_cost`]). Repairs and refuels cost one wood
//! each and must be done from within interaction range.

use hearth_types::{Behavior, Cell, Skill};
use hearth_world::{Terrain, WorldConfig};

use crate::agent::Agent;
use crate::config::AgentConfig;

/// Build a home on the agent's cell and move in.
pub fn build_home(
    agent: &mut Agent,
    terrain: &mut Terrain,
    config: &AgentConfig,
    world: &WorldConfig,
) -> bool {
    let cost = config.structure_cost(agent.skills.get(Skill::Building));
    if agent.inventory.wood < cost
        || !terrain.build_home(agent.cell, agent.id, world.home_durability)
    {
        return false;
    }
    agent.inventory.wood = agent.inventory.wood.saturating_sub(cost);
    agent.home = Some(agent.cell);
    agent.skills.train(
        Skill::Building,
        config.actions.build_home_gain,
        &config.skill_caps,
    );
    agent.behavior = Behavior::Wandering;
    true
}

/// Light a campfire on the agent's cell.
pub fn build_campfire(
    agent: &mut Agent,
    terrain: &mut Terrain,
    config: &AgentConfig,
    world: &WorldConfig,
) -> bool {
    let cost = config.structure_cost(agent.skills.get(Skill::Building));
    if agent.inventory.wood < cost
        || !terrain.light_campfire(agent.cell, world.campfire_burn_ticks)
    {
        return false;
    }
    agent.inventory.wood = agent.inventory.wood.saturating_sub(cost);
    agent.campfire = Some(agent.cell);
    agent.skills.train(
        Skill::Building,
        config.actions.build_minor_gain,
        &config.skill_caps,
    );
    agent.behavior = Behavior::Wandering;
    true
}

/// Restore the agent's own home to full durability with one wood.
pub fn repair_home(
    agent: &mut Agent,
    terrain: &mut Terrain,
    config: &AgentConfig,
    world: &WorldConfig,
) -> bool {
    let Some(home) = agent.home else {
        return false;
    };
    if agent.inventory.wood < 1
        || agent.cell.distance_to(home) >= config.actions.interaction_range
        || !terrain.repair_home(home, agent.id, world.home_durability)
    {
        return false;
    }
    agent.inventory.wood = agent.inventory.wood.saturating_sub(1);
    agent.skills.train(
        Skill::Building,
        config.actions.build_minor_gain,
        &config.skill_caps,
    );
    agent.behavior = Behavior::Wandering;
    true
}

/// Reset a nearby campfire's burn timer with one wood.
pub fn refuel_campfire(
    agent: &mut Agent,
    fire: Cell,
    terrain: &mut Terrain,
    config: &AgentConfig,
    world: &WorldConfig,
) -> bool {
    if agent.inventory.wood < 1
        || agent.cell.distance_to(fire) >= config.actions.interaction_range
        || !terrain.refuel_campfire(fire, world.campfire_burn_ticks)
    {
        return false;
    }
    agent.inventory.wood = agent.inventory.wood.saturating_sub(1);
    agent.behavior = Behavior::Wandering;
    true
}

/// Take over an abandoned home within interaction range.
pub fn claim_home(
    agent: &mut Agent,
    cell: Cell,
    terrain: &mut Terrain,
    config: &AgentConfig,
) -> bool {
    if agent.cell.distance_to(cell) >= config.actions.interaction_range
        || !terrain.claim_home(cell, agent.id)
    {
        return false;
    }
    agent.home = Some(cell);
    agent.behavior = Behavior::Wandering;
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hearth_types::AgentId;

    use super::*;
    use crate::fixtures::test_agent;

    fn setup() -> (Terrain, AgentConfig, WorldConfig) {
        (
            Terrain::new(10, 10).unwrap(),
            AgentConfig::default(),
            WorldConfig::default(),
        )
    }

    #[test]
    fn building_a_home_spends_wood() {
        let (mut t, config, world) = setup();
        let mut a = test_agent(1, Cell::new(3, 3));
        a.inventory.wood = 2;
        assert!(!build_home(&mut a, &mut t, &config, &world));
        a.inventory.wood = 3;
        assert!(build_home(&mut a, &mut t, &config, &world));
        assert_eq!(a.inventory.wood, 0);
        assert_eq!(a.home, Some(Cell::new(3, 3)));
        let home = t.home_at(Cell::new(3, 3)).unwrap();
        assert_eq!(home.owner, Some(AgentId(1)));
        assert_eq!(home.durability, 3);
        assert!((a.skills.get(Skill::Building) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn skilled_builders_pay_less() {
        let (mut t, config, world) = setup();
        let mut a = test_agent(1, Cell::new(3, 3));
        a.skills.train(Skill::Building, 2.0, &config.skill_caps);
        a.inventory.wood = 3;
        assert!(build_campfire(&mut a, &mut t, &config, &world));
        assert_eq!(a.inventory.wood, 1);
        assert_eq!(t.campfire_remaining(Cell::new(3, 3)), Some(300));
        assert_eq!(a.campfire, Some(Cell::new(3, 3)));
    }

    #[test]
    fn repair_requires_proximity() {
        let (mut t, config, world) = setup();
        let home = Cell::new(3, 3);
        t.build_home(home, AgentId(1), 1);
        let mut a = test_agent(1, Cell::new(6, 3));
        a.home = Some(home);
        a.inventory.wood = 1;
        assert!(!repair_home(&mut a, &mut t, &config, &world));
        a.cell = Cell::new(4, 4);
        assert!(repair_home(&mut a, &mut t, &config, &world));
        assert_eq!(t.home_at(home).unwrap().durability, 3);
        assert_eq!(a.inventory.wood, 0);
        assert!((a.skills.get(Skill::Building) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn refuel_resets_the_timer() {
        let (mut t, config, world) = setup();
        let fire = Cell::new(3, 3);
        t.light_campfire(fire, 40);
        let mut a = test_agent(1, Cell::new(3, 4));
        a.inventory.wood = 2;
        assert!(refuel_campfire(&mut a, fire, &mut t, &config, &world));
        assert_eq!(t.campfire_remaining(fire), Some(300));
        assert_eq!(a.inventory.wood, 1);
    }

    #[test]
    fn claiming_an_abandoned_home() {
        let (mut t, config, _) = setup();
        let cell = Cell::new(3, 3);
        t.build_home(cell, AgentId(7), 3);
        t.release_home(cell, AgentId(7));
        let mut a = test_agent(1, cell);
        assert!(claim_home(&mut a, cell, &mut t, &config));
        assert_eq!(a.home, Some(cell));
        assert_eq!(t.home_at(cell).unwrap().owner, Some(AgentId(1)));

        let mut b = test_agent(2, cell);
        assert!(!claim_home(&mut b, cell, &mut t, &config));
    }
}
