//! The priority chain that picks one [`Behavior`] per tick.
//!
//! [`decide`] is pure: it reads the agent, a [`Perception`], and a set of
//! pre-drawn [`DecisionRolls`], and returns the first behavior whose
//! condition holds. Urgent needs come first, then upkeep, then building and
//! farming, then generosity, and finally wandering.

use rand::Rng;

use hearth_types::{Behavior, Skill};

use crate::agent::Agent;
use crate::config::AgentConfig;
use crate::perception::Perception;

/// Uniform draws in `[0, 1)` consumed by the gene-gated branches.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DecisionRolls {
    /// Compared against the builder gene when deciding to build a home.
    pub shelter: f64,
    /// Compared against the farming gene when deciding to plant food.
    pub farming: f64,
    /// Compared against the builder gene when deciding to plant a tree.
    pub tree: f64,
}

impl DecisionRolls {
    /// Draw a fresh set.
    pub fn draw(rng: &mut impl Rng) -> Self {
        Self {
            shelter: rng.random(),
            farming: rng.random(),
            tree: rng.random(),
        }
    }
}

/// Choose this tick's behavior.
pub fn decide(
    agent: &Agent,
    seen: &Perception,
    rolls: DecisionRolls,
    config: &AgentConfig,
) -> Behavior {
    let d = &config.decision;

    if agent.was_attacked_by.is_some() {
        return Behavior::Retaliating;
    }

    if (agent.energy < d.hopeless_energy || agent.social < d.hopeless_social)
        && !seen.knows_of_food()
    {
        return Behavior::Hopeless;
    }

    let forage_line = if agent.is_child(config) {
        d.forage_energy_child
    } else {
        d.forage_energy_adult
    };
    if agent.energy < forage_line
        || (agent.inventory.food > 0 && agent.energy < d.eat_energy_ceiling)
    {
        return Behavior::Foraging;
    }

    if seen.campfire_needs_fuel {
        return if agent.inventory.wood < 1 {
            Behavior::GettingWood
        } else {
            Behavior::RefuelingCampfire
        };
    }

    if seen.home_needs_repair {
        return if agent.inventory.wood < 1 {
            Behavior::GettingWood
        } else {
            Behavior::RepairingHome
        };
    }

    if agent.social < d.seek_social_below && agent.genome.sociability > d.seek_social_sociability
    {
        return Behavior::SeekingSocial;
    }

    if agent.home.is_none()
        && let Some(behavior) = shelter(agent, seen, rolls.shelter, config)
    {
        return behavior;
    }

    if agent.inventory.seeds > 0
        && agent.energy > d.planting_energy
        && agent.genome.farming > rolls.farming
    {
        return if far_from_home(agent, d.farm_home_radius) {
            Behavior::GoingHomeToFarm
        } else {
            Behavior::Planting
        };
    }

    if agent.inventory.wood_seeds > 0
        && agent.energy > d.planting_energy
        && seen.wood_scarce
        && agent.genome.builder > rolls.tree
    {
        return if far_from_home(agent, d.farm_home_radius) {
            Behavior::GoingHomeToPlantWood
        } else {
            Behavior::PlantingWood
        };
    }

    if !seen.campfire_nearby
        && agent.energy > d.campfire_energy
        && agent.social > d.campfire_social
        && agent.genome.builder > d.campfire_builder
    {
        if conserving(agent, config) {
            return Behavior::Foraging;
        }
        let cost = config.structure_cost(agent.skills.get(Skill::Building));
        return if agent.inventory.wood >= cost {
            Behavior::BuildingCampfire
        } else {
            Behavior::GettingWood
        };
    }

    if agent.energy > d.share_energy
        && agent.social > d.share_social
        && (agent.inventory.wood > d.share_wood_surplus || agent.inventory.food >= 1)
        && seen.needy_neighbor.is_some()
    {
        return Behavior::Sharing;
    }

    if agent.behavior == Behavior::SeekingLibrary {
        Behavior::SeekingLibrary
    } else {
        Behavior::Wandering
    }
}

/// Claim an abandoned home, or work toward building one.
///
/// Returns `None` when the agent neither claims nor feels like building,
/// so the chain continues.
fn shelter(agent: &Agent, seen: &Perception, roll: f64, config: &AgentConfig) -> Option<Behavior> {
    if seen.unclaimed_home.is_some() {
        return Some(Behavior::ClaimingHome);
    }
    if seen.home_count >= seen.census || agent.genome.builder <= roll {
        return None;
    }
    if conserving(agent, config) {
        return Some(Behavior::Foraging);
    }
    if agent.inventory.wood < config.structure_cost(agent.skills.get(Skill::Building)) {
        return Some(Behavior::GettingWood);
    }

    let build_here = if agent.genome.sociability > config.decision.communal_sociability {
        if seen.home_in_community || seen.home_count == 0 {
            None
        } else {
            Some(Behavior::SeekingCommunity)
        }
    } else if seen.home_in_community {
        Some(Behavior::SeekingRemoteSpot)
    } else {
        None
    };

    Some(build_here.unwrap_or(if seen.on_clear_cell {
        Behavior::Building
    } else {
        Behavior::WanderingToBuild
    }))
}

/// Low-metabolism genomes eat before spending energy on structures.
fn conserving(agent: &Agent, config: &AgentConfig) -> bool {
    agent.genome.metabolism < config.decision.conserve_metabolism
        && agent.energy < config.decision.conserve_energy
}

fn far_from_home(agent: &Agent, radius: f64) -> bool {
    agent
        .home
        .is_some_and(|home| agent.cell.distance_to(home) > radius)
}
