//! Conversation and everything that can follow it.
//!
//! A conversation always lifts both parties' social meters and love and
//! passes skill from the stronger to the weaker party. It may then end in
//! communal planting when food is scarce and both carry seeds, or in mating
//! when both are adult, energetic, and off cooldown.

use rand::Rng;
use tracing::debug;

use hearth_types::{AgentId, Behavior, Cell, Skill};
use hearth_world::KnowledgePool;

use crate::agent::Agent;
use crate::config::AgentConfig;
use crate::context::TickContext;
use crate::error::AgentError;
use crate::genome::Genome;

/// How a conversation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversation {
    /// Just talk.
    Talked,
    /// Both pooled their seeds into a food pile on `cell`.
    PlantedTogether {
        /// Where the food appeared.
        cell: Cell,
    },
    /// The pair had children.
    Mated {
        /// Ids of the newborns, in birth order.
        children: Vec<AgentId>,
    },
}

/// What one act of sharing handed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gift {
    /// One unit of food.
    Food,
    /// One unit of wood.
    Wood,
}

/// Talk with `partner`, then plant together or mate if conditions allow.
///
/// `partner` must be checked out of the population so newborns can be
/// inserted.
///
/// # Errors
///
/// Returns [`AgentError::IdOverflow`] if a newborn cannot be given an id.
pub fn communicate(
    initiator: &mut Agent,
    partner: &mut Agent,
    ctx: &mut TickContext<'_>,
) -> Result<Conversation, AgentError> {
    let config = ctx.config;
    let a = &config.actions;

    initiator.behavior = Behavior::Communicating;
    partner.behavior = Behavior::Communicating;
    initiator.energy -= a.talk_energy;
    partner.energy -= a.talk_energy;

    let initiator_skill =
        initiator
            .skills
            .train(Skill::Social, a.talk_skill_gain, &config.skill_caps);
    let partner_skill = partner
        .skills
        .train(Skill::Social, a.talk_skill_gain, &config.skill_caps);
    initiator.adjust_social(
        a.talk_initiator_gain + initiator_skill * a.talk_initiator_per_skill,
        config,
    );
    partner.adjust_social(
        a.talk_partner_gain + partner_skill * a.talk_partner_per_skill,
        config,
    );

    for agent in [&mut *initiator, &mut *partner] {
        agent.social_buff = a.talk_buff;
        agent.adjust_love(a.talk_love_gain, config);
    }

    share_skills(initiator, partner, ctx.knowledge, config);

    if let Some(cell) = plant_together(initiator, partner, ctx) {
        return Ok(Conversation::PlantedTogether { cell });
    }

    if ready_to_mate(initiator, config) && ready_to_mate(partner, config) {
        let children = mate(initiator, partner, ctx)?;
        return Ok(Conversation::Mated { children });
    }

    Ok(Conversation::Talked)
}

/// Teach across every teachable skill: the weaker party gains the teach
/// rate, and a teacher above the threshold also feeds the knowledge pool.
pub fn share_skills(
    a: &mut Agent,
    b: &mut Agent,
    knowledge: &mut KnowledgePool,
    config: &AgentConfig,
) {
    let rate = config.actions.teach_rate;
    let threshold = config.actions.teach_contribution_threshold;
    for skill in Skill::TEACHABLE {
        let (a_level, b_level) = (a.skills.get(skill), b.skills.get(skill));
        let teacher_level = if a_level > b_level {
            b.skills.train(skill, rate, &config.skill_caps);
            a_level
        } else if b_level > a_level {
            a.skills.train(skill, rate, &config.skill_caps);
            b_level
        } else {
            continue;
        };
        if teacher_level > threshold {
            knowledge.contribute(skill, config.actions.knowledge_contribution);
        }
    }
}

/// Pool seeds into a food pile when food is scarce. Returns where it landed.
fn plant_together(
    initiator: &mut Agent,
    partner: &mut Agent,
    ctx: &mut TickContext<'_>,
) -> Option<Cell> {
    let scarce = ctx.terrain.food_cell_count() < ctx.world.food_scarcity_threshold;
    let seeds = initiator
        .inventory
        .seeds
        .saturating_add(partner.inventory.seeds);
    if !scarce
        || initiator.inventory.seeds < 1
        || partner.inventory.seeds < 1
        || seeds < ctx.config.actions.communal_seed_total
    {
        return None;
    }

    initiator.inventory.seeds = 0;
    partner.inventory.seeds = 0;
    let library = ctx.terrain.library();
    let cell = if ctx.terrain.is_clear(library) {
        library
    } else {
        initiator.cell
    };
    ctx.terrain.add_food(cell, 1, ctx.world.food_freshness);
    initiator.behavior = Behavior::Foraging;
    partner.behavior = Behavior::Foraging;
    debug!(
        initiator = %initiator.id,
        partner = %partner.id,
        seeds,
        x = cell.x,
        y = cell.y,
        "Communal planting"
    );
    Some(cell)
}

fn ready_to_mate(agent: &Agent, config: &AgentConfig) -> bool {
    !agent.is_child(config) && agent.energy > agent.genome.mating_drive && agent.mate_cooldown == 0
}

/// Produce a litter at `a`'s cell.
///
/// Both parents pay energy, go on cooldown, max out their social meter,
/// and become content. Each child inherits a crossover genome.
///
/// # Errors
///
/// Returns [`AgentError::IdOverflow`] if a newborn cannot be given an id.
pub fn mate(
    a: &mut Agent,
    b: &mut Agent,
    ctx: &mut TickContext<'_>,
) -> Result<Vec<AgentId>, AgentError> {
    let config = ctx.config;
    let act = &config.actions;

    for parent in [&mut *a, &mut *b] {
        parent.behavior = Behavior::Mating;
        parent.energy -= act.mate_energy;
        parent.mate_cooldown = act.mate_cooldown;
    }

    let mut litter = ctx.rng.random_range(act.litter_min..=act.litter_max);
    if ctx.rng.random::<f64>() < act.litter_bonus_chance {
        litter = litter.saturating_add(1).min(act.litter_cap);
    }

    let mut children = Vec::new();
    for _ in 0..litter {
        let genome = Genome::crossover(&a.genome, &b.genome, ctx.rng);
        let child = ctx.population.spawn(a.cell, genome, config, ctx.rng)?;
        a.children.insert(child);
        b.children.insert(child);
        children.push(child);
    }

    for parent in [&mut *a, &mut *b] {
        parent.social = act.mate_social;
        parent.contentment_buff = act.mate_contentment;
    }

    debug!(
        parent_a = %a.id,
        parent_b = %b.id,
        litter = children.len(),
        tick = ctx.tick,
        "Agents mated"
    );
    Ok(children)
}

/// Hand one food, or failing that one wood, to `target`.
///
/// Wood is only given when the target has room for it.
pub fn give_resource(giver: &mut Agent, target: &mut Agent, config: &AgentConfig) -> Option<Gift> {
    giver.behavior = Behavior::Wandering;
    if giver.inventory.food >= 1 {
        giver.inventory.food = giver.inventory.food.saturating_sub(1);
        target.inventory.food = target.inventory.food.saturating_add(1);
        return Some(Gift::Food);
    }
    if giver.inventory.wood >= 1 && target.wood_room(config) > 0 {
        giver.inventory.wood = giver.inventory.wood.saturating_sub(1);
        target.inventory.wood = target.inventory.wood.saturating_add(1);
        return Some(Gift::Wood);
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fixtures::{TestWorld, test_agent};

    #[test]
    fn talking_lifts_both_parties() {
        let mut w = TestWorld::new();
        let mut a = test_agent(1, Cell::new(5, 5));
        let mut b = test_agent(2, Cell::new(5, 6));
        a.social = 20.0;
        b.social = 20.0;
        a.love = 0.0;
        a.energy = 50.0;
        b.energy = 50.0;
        let outcome = communicate(&mut a, &mut b, &mut w.ctx()).unwrap();
        assert_eq!(outcome, Conversation::Talked);
        assert!((a.energy - 49.0).abs() < 1e-12);
        assert!((a.skills.get(Skill::Social) - 0.2).abs() < 1e-12);
        assert!((a.social - 72.0).abs() < 1e-9);
        assert!((b.social - 41.0).abs() < 1e-9);
        assert_eq!(a.social_buff, 20);
        assert_eq!(b.social_buff, 20);
        assert!((a.love - 5.0).abs() < 1e-12);
        assert_eq!(a.behavior, Behavior::Communicating);
    }

    #[test]
    fn skilled_teachers_feed_the_pool() {
        let mut w = TestWorld::new();
        let mut a = test_agent(1, Cell::new(5, 5));
        let mut b = test_agent(2, Cell::new(5, 5));
        a.skills.train(Skill::Foraging, 3.0, &w.config.skill_caps);
        b.skills.train(Skill::Combat, 1.0, &w.config.skill_caps);
        share_skills(&mut a, &mut b, &mut w.knowledge, &w.config);
        assert!((b.skills.get(Skill::Foraging) - 0.1).abs() < 1e-12);
        assert!((a.skills.get(Skill::Combat) - 0.1).abs() < 1e-12);
        assert!((w.knowledge.level(Skill::Foraging) - 0.05).abs() < 1e-12);
        assert!(w.knowledge.level(Skill::Combat).abs() < f64::EPSILON);
    }

    #[test]
    fn social_skill_is_not_taught() {
        let mut w = TestWorld::new();
        let mut a = test_agent(1, Cell::new(5, 5));
        let mut b = test_agent(2, Cell::new(5, 5));
        a.skills.train(Skill::Social, 5.0, &w.config.skill_caps);
        share_skills(&mut a, &mut b, &mut w.knowledge, &w.config);
        assert!(b.skills.get(Skill::Social).abs() < f64::EPSILON);
    }

    #[test]
    fn scarce_food_and_seeds_lead_to_communal_planting() {
        let mut w = TestWorld::new();
        let mut a = test_agent(1, Cell::new(5, 5));
        let mut b = test_agent(2, Cell::new(5, 6));
        a.inventory.seeds = 2;
        b.inventory.seeds = 1;
        let outcome = communicate(&mut a, &mut b, &mut w.ctx()).unwrap();
        let library = w.terrain.library();
        assert_eq!(outcome, Conversation::PlantedTogether { cell: library });
        assert_eq!(a.inventory.seeds, 0);
        assert_eq!(b.inventory.seeds, 0);
        assert!(w.terrain.has_food(library));
        assert_eq!(a.behavior, Behavior::Foraging);
        assert_eq!(b.behavior, Behavior::Foraging);
    }

    #[test]
    fn blocked_library_plants_at_the_initiator() {
        let mut w = TestWorld::new();
        let library = w.terrain.library();
        w.terrain.add_wood(library, 1);
        let mut a = test_agent(1, Cell::new(5, 5));
        let mut b = test_agent(2, Cell::new(5, 6));
        a.inventory.seeds = 1;
        b.inventory.seeds = 2;
        let outcome = communicate(&mut a, &mut b, &mut w.ctx()).unwrap();
        assert_eq!(
            outcome,
            Conversation::PlantedTogether {
                cell: Cell::new(5, 5)
            }
        );
    }

    #[test]
    fn ready_adults_mate_after_talking() {
        let mut w = TestWorld::new();
        let mut a = test_agent(1, Cell::new(5, 5));
        let mut b = test_agent(2, Cell::new(5, 6));
        a.energy = 140.0;
        b.energy = 140.0;
        let outcome = communicate(&mut a, &mut b, &mut w.ctx()).unwrap();
        let Conversation::Mated { children } = outcome else {
            panic!("expected mating, got {outcome:?}");
        };
        assert!((1..=4).contains(&children.len()));
        assert_eq!(w.population.len(), children.len());
        for child in &children {
            let kid = w.population.get(*child).unwrap();
            assert_eq!(kid.cell, Cell::new(5, 5));
            assert_eq!(kid.age, 0);
            assert!(kid.genome.is_valid());
            assert!(a.children.contains(child));
            assert!(b.children.contains(child));
        }
        assert!((a.energy - 129.0).abs() < 1e-12);
        assert_eq!(a.mate_cooldown, 65);
        assert_eq!(b.mate_cooldown, 65);
        assert!((a.social - 100.0).abs() < f64::EPSILON);
        assert_eq!(b.contentment_buff, 25);
        assert_eq!(a.behavior, Behavior::Mating);
    }

    #[test]
    fn cooldown_or_childhood_prevents_mating() {
        let mut w = TestWorld::new();
        let mut a = test_agent(1, Cell::new(5, 5));
        let mut b = test_agent(2, Cell::new(5, 6));
        a.energy = 140.0;
        b.energy = 140.0;
        b.mate_cooldown = 3;
        let outcome = communicate(&mut a, &mut b, &mut w.ctx()).unwrap();
        assert_eq!(outcome, Conversation::Talked);

        b.mate_cooldown = 0;
        b.age = 50;
        let outcome = communicate(&mut a, &mut b, &mut w.ctx()).unwrap();
        assert_eq!(outcome, Conversation::Talked);
        assert!(w.population.is_empty());
    }

    #[test]
    fn sharing_prefers_food_and_respects_room() {
        let config = AgentConfig::default();
        let mut giver = test_agent(1, Cell::new(5, 5));
        let mut target = test_agent(2, Cell::new(5, 6));
        giver.inventory.food = 1;
        giver.inventory.wood = 4;
        assert_eq!(give_resource(&mut giver, &mut target, &config), Some(Gift::Food));
        assert_eq!(target.inventory.food, 1);
        assert_eq!(give_resource(&mut giver, &mut target, &config), Some(Gift::Wood));
        target.inventory.wood = 3;
        assert_eq!(give_resource(&mut giver, &mut target, &config), None);
        assert_eq!(giver.inventory.wood, 3);
    }
}
