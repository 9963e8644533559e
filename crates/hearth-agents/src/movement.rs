//! Grid movement.
//!
//! Every step moves at most one cell per axis, is clamped to the grid, and
//! costs energy that shrinks as navigation improves. Steps are charged even
//! when the agent is already on its target or pinned against an edge.

use rand::Rng;

use hearth_types::{Cell, Skill};
use hearth_world::Terrain;

use crate::agent::Agent;
use crate::config::AgentConfig;

/// Walk `speed` steps toward `target`. Clears the exploration heading.
pub fn move_towards(agent: &mut Agent, target: Cell, terrain: &Terrain, config: &AgentConfig) {
    agent.heading = (0, 0);
    for _ in 0..agent.genome.steps(1.0) {
        let next = agent.cell.step_toward(target);
        take_step(agent, next, terrain, config);
    }
}

/// Walk `speed * speed_factor` steps along the sticky heading.
///
/// A fresh non-zero heading is drawn when there is none, when the current
/// one points off the grid, or with probability `1 - persistence`.
pub fn move_randomly(
    agent: &mut Agent,
    speed_factor: f64,
    persistence: f64,
    terrain: &Terrain,
    config: &AgentConfig,
    rng: &mut impl Rng,
) {
    for _ in 0..agent.genome.steps(speed_factor) {
        let unset = agent.heading == (0, 0);
        let stuck = !unset && {
            let ahead = terrain.clamp(agent.cell.offset(agent.heading.0, agent.heading.1));
            ahead == agent.cell
        };
        if unset || stuck || rng.random::<f64>() > persistence {
            agent.heading = random_heading(rng);
        }
        let next = agent.cell.offset(agent.heading.0, agent.heading.1);
        take_step(agent, next, terrain, config);
    }
}

/// Long, mostly straight wandering.
pub fn explore(agent: &mut Agent, terrain: &Terrain, config: &AgentConfig, rng: &mut impl Rng) {
    move_randomly(
        agent,
        1.0,
        config.actions.explore_persistence,
        terrain,
        config,
        rng,
    );
}

/// Short, jittery searching for a clear cell nearby.
pub fn shuffle(
    agent: &mut Agent,
    speed_factor: f64,
    terrain: &Terrain,
    config: &AgentConfig,
    rng: &mut impl Rng,
) {
    move_randomly(agent, speed_factor, 0.0, terrain, config, rng);
}

/// Energy charged for one step at a given navigation level.
pub fn step_cost(navigation: f64, config: &AgentConfig) -> f64 {
    let a = &config.actions;
    let multiplier = (1.0 - navigation * a.navigation_discount).max(a.step_cost_floor);
    a.step_energy * multiplier
}

fn take_step(agent: &mut Agent, next: Cell, terrain: &Terrain, config: &AgentConfig) {
    agent.cell = terrain.clamp(next);
    let navigation = agent.skills.train(
        Skill::Navigation,
        config.actions.navigation_gain,
        &config.skill_caps,
    );
    agent.energy -= step_cost(navigation, config);
}

fn random_heading(rng: &mut impl Rng) -> (i32, i32) {
    loop {
        let heading = (rng.random_range(-1..=1), rng.random_range(-1..=1));
        if heading != (0, 0) {
            return heading;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::fixtures::test_agent;

    fn terrain() -> Terrain {
        Terrain::new(20, 10).unwrap()
    }

    #[test]
    fn moves_toward_target_one_cell_per_step() {
        let config = AgentConfig::default();
        let t = terrain();
        let mut a = test_agent(1, Cell::new(0, 0));
        a.genome.speed = 2.5;
        a.heading = (1, 1);
        move_towards(&mut a, Cell::new(5, 1), &t, &config);
        assert_eq!(a.cell, Cell::new(2, 1));
        assert_eq!(a.heading, (0, 0));
    }

    #[test]
    fn steps_cost_energy_and_train_navigation() {
        let config = AgentConfig::default();
        let t = terrain();
        let mut a = test_agent(1, Cell::new(0, 0));
        let before = a.energy;
        move_towards(&mut a, Cell::new(5, 0), &t, &config);
        assert!((a.skills.get(Skill::Navigation) - 0.01).abs() < 1e-12);
        let expected = 0.05 * (1.0 - 0.01 * 0.15);
        assert!((before - a.energy - expected).abs() < 1e-12);
    }

    #[test]
    fn step_cost_has_a_floor() {
        let config = AgentConfig::default();
        assert!((step_cost(0.0, &config) - 0.05).abs() < 1e-12);
        assert!((step_cost(5.0, &config) - 0.0125).abs() < 1e-12);
    }

    #[test]
    fn random_moves_stay_on_grid() {
        let config = AgentConfig::default();
        let t = terrain();
        let mut rng = SmallRng::seed_from_u64(9);
        let mut a = test_agent(1, Cell::new(0, 0));
        a.genome.speed = 3.0;
        for _ in 0..500 {
            explore(&mut a, &t, &config, &mut rng);
            assert!(t.contains(a.cell));
            assert_ne!(a.heading, (0, 0));
        }
    }

    #[test]
    fn full_persistence_keeps_an_open_heading() {
        let config = AgentConfig::default();
        let t = terrain();
        let mut rng = SmallRng::seed_from_u64(10);
        let mut a = test_agent(1, Cell::new(5, 5));
        a.heading = (1, 0);
        move_randomly(&mut a, 1.0, 1.0, &t, &config, &mut rng);
        assert_eq!(a.heading, (1, 0));
        assert_eq!(a.cell, Cell::new(6, 5));
    }

    #[test]
    fn unset_heading_is_drawn() {
        let config = AgentConfig::default();
        let t = terrain();
        let mut rng = SmallRng::seed_from_u64(11);
        let mut a = test_agent(1, Cell::new(5, 5));
        shuffle(&mut a, 0.5, &t, &config, &mut rng);
        assert_ne!(a.heading, (0, 0));
        assert_ne!(a.cell, Cell::new(5, 5));
    }
}
