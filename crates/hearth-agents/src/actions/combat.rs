//! Attacks between agents.
//!
//! An agent whose love has run out may turn on a cellmate. Its chance to
//! do so is the aggression gene plus a bonus that grows the longer it has
//! been struggling. Every attack marks the victim, which then retaliates.

use hearth_types::{Behavior, Skill};

use crate::agent::Agent;
use crate::config::AgentConfig;

/// Energy moved by one attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackReport {
    /// Energy the attacker spent before the rebate.
    pub cost: f64,
    /// Energy the target lost.
    pub damage: f64,
}

/// Attack chance for this tick: gene plus capped struggle bonus.
pub fn aggression(agent: &Agent, config: &AgentConfig) -> f64 {
    let a = &config.actions;
    let struggle = f64::from(agent.struggle_timer) * a.struggle_aggression;
    agent.genome.aggression + struggle.min(a.struggle_aggression_cap)
}

/// Whether `roll` provokes the agent into attacking a cellmate.
pub fn provoked(agent: &Agent, roll: f64, config: &AgentConfig) -> bool {
    agent.love <= 0.0
        && agent.energy > config.actions.aggression_energy
        && roll < aggression(agent, config)
}

/// Hit `target`. Damage uses the attacker's combat level before this
/// attack trains it.
pub fn attack(attacker: &mut Agent, target: &mut Agent, config: &AgentConfig) -> AttackReport {
    let a = &config.actions;
    let combat = attacker.skills.get(Skill::Combat);
    let cost = (a.attack_cost - combat).max(a.attack_cost_floor);
    let damage = a.attack_damage + combat * a.attack_damage_per_skill;

    attacker.behavior = Behavior::Attacking;
    attacker.energy = attacker.energy - cost + a.attack_rebate;
    target.energy -= damage;
    attacker
        .skills
        .train(Skill::Combat, a.combat_gain, &config.skill_caps);
    attacker.adjust_love(-a.attack_love_loss, config);
    target.was_attacked_by = Some(attacker.id);

    AttackReport { cost, damage }
}
