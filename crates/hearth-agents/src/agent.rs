//! The agent entity.
//!
//! An [`Agent`] is plain data: needs, inventory, genome, skills, and the
//! few bits of state that carry over between ticks (buffs, cooldowns, the
//! exploration heading). Behavior lives in the vitals, decision, and action
//! modules, which all operate on `&mut Agent`.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use hearth_types::{AgentId, Behavior, Cell, LifeStage};
use hearth_world::{Located, Occupant};

use crate::config::AgentConfig;
use crate::genome::Genome;
use crate::memory::ResourceMemory;
use crate::skills::Skills;

/// What an agent is carrying.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// Food units, at most the food capacity.
    pub food: u32,
    /// Wood units, at most the wood capacity.
    pub wood: u32,
    /// Food seeds.
    pub seeds: u32,
    /// Wood seeds.
    pub wood_seeds: u32,
}

/// A single simulated creature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique identifier.
    pub id: AgentId,
    /// Current cell.
    pub cell: Cell,
    /// Energy; the agent dies when this reaches zero.
    pub energy: f64,
    /// Ticks lived.
    pub age: u32,
    /// Social meter, `0..=max_social`.
    pub social: f64,
    /// Love, `0..=starting_love`. An agent with no love left may attack.
    pub love: f64,
    /// Carried goods.
    pub inventory: Inventory,
    /// Heritable traits.
    pub genome: Genome,
    /// Learned proficiencies.
    pub skills: Skills,
    /// Owned home, if any.
    pub home: Option<Cell>,
    /// Campfire this agent lit, while it still burns.
    pub campfire: Option<Cell>,
    /// Remembered resource cells.
    pub memory: ResourceMemory,
    /// Offspring still below adult age.
    pub children: BTreeSet<AgentId>,
    /// Behavior chosen this tick.
    pub behavior: Behavior,
    /// Ticks of reduced metabolism left after a conversation.
    pub social_buff: u32,
    /// Ticks of suspended social drift left after mating.
    pub contentment_buff: u32,
    /// Ticks before this agent can mate again.
    pub mate_cooldown: u32,
    /// Consecutive ticks spent struggling.
    pub struggle_timer: u32,
    /// Last attacker not yet answered.
    pub was_attacked_by: Option<AgentId>,
    /// Sticky exploration direction, `(0, 0)` when unset.
    pub heading: (i32, i32),
}

impl Agent {
    /// A fresh agent with random starting social meter and seed stock.
    pub fn new(
        id: AgentId,
        cell: Cell,
        genome: Genome,
        config: &AgentConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let life = &config.life;
        Self {
            id,
            cell,
            energy: life.starting_energy,
            age: 0,
            social: rng.random_range(life.starting_social_min..=life.starting_social_max),
            love: life.starting_love,
            inventory: Inventory {
                food: 0,
                wood: 0,
                seeds: rng.random_range(0..=life.starting_seeds_max),
                wood_seeds: rng.random_range(0..=life.starting_wood_seeds_max),
            },
            genome,
            skills: Skills::default(),
            home: None,
            campfire: None,
            memory: ResourceMemory::default(),
            children: BTreeSet::new(),
            behavior: Behavior::Wandering,
            social_buff: 0,
            contentment_buff: 0,
            mate_cooldown: 0,
            struggle_timer: 0,
            was_attacked_by: None,
            heading: (0, 0),
        }
    }

    /// Life stage at the current age.
    pub const fn stage(&self, config: &AgentConfig) -> LifeStage {
        LifeStage::for_age(self.age, config.life.adult_age, config.life.old_age)
    }

    /// Whether the agent is still a child.
    pub const fn is_child(&self, config: &AgentConfig) -> bool {
        self.age < config.life.adult_age
    }

    /// Whether the agent stands on its own home.
    pub fn is_at_home(&self) -> bool {
        self.home == Some(self.cell)
    }

    /// Add social, clamped to `[0, max_social]`.
    pub fn adjust_social(&mut self, delta: f64, config: &AgentConfig) {
        self.social = (self.social + delta).clamp(0.0, config.life.max_social);
    }

    /// Add love, clamped to `[0, starting_love]`.
    pub fn adjust_love(&mut self, delta: f64, config: &AgentConfig) {
        self.love = (self.love + delta).clamp(0.0, config.life.starting_love);
    }

    /// Room left for food.
    pub const fn food_room(&self, config: &AgentConfig) -> u32 {
        config.life.food_capacity.saturating_sub(self.inventory.food)
    }

    /// Room left for wood.
    pub const fn wood_room(&self, config: &AgentConfig) -> u32 {
        config.life.wood_capacity.saturating_sub(self.inventory.wood)
    }
}

impl Located for Agent {
    fn cell(&self) -> Cell {
        self.cell
    }
}

impl Occupant for Agent {
    fn agent_id(&self) -> AgentId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::fixtures::test_agent;

    #[test]
    fn new_agent_starting_values() {
        let config = AgentConfig::default();
        let mut rng = SmallRng::seed_from_u64(5);
        let genome = Genome::founder(&mut rng);
        for i in 0..50 {
            let a = Agent::new(AgentId(i), Cell::new(1, 1), genome, &config, &mut rng);
            assert!((a.energy - 150.0).abs() < f64::EPSILON);
            assert!((a.love - 10.0).abs() < f64::EPSILON);
            assert!(a.social >= 30.0 && a.social <= 80.0);
            assert!(a.inventory.seeds <= 2);
            assert!(a.inventory.wood_seeds <= 1);
            assert_eq!(a.behavior, Behavior::Wandering);
            assert_eq!(a.stage(&config), LifeStage::Child);
        }
    }

    #[test]
    fn social_and_love_are_clamped() {
        let config = AgentConfig::default();
        let mut a = test_agent(1, Cell::new(0, 0));
        a.adjust_social(500.0, &config);
        assert!((a.social - 100.0).abs() < f64::EPSILON);
        a.adjust_social(-500.0, &config);
        assert!(a.social.abs() < f64::EPSILON);
        a.adjust_love(50.0, &config);
        assert!((a.love - 10.0).abs() < f64::EPSILON);
        a.adjust_love(-50.0, &config);
        assert!(a.love.abs() < f64::EPSILON);
    }

    #[test]
    fn inventory_room() {
        let config = AgentConfig::default();
        let mut a = test_agent(1, Cell::new(0, 0));
        assert_eq!(a.food_room(&config), 2);
        a.inventory.wood = 3;
        assert_eq!(a.wood_room(&config), 0);
    }
}
