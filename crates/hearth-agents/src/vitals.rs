//! Per-tick needs: aging, metabolism, buffs, social drift, and struggle.
//!
//! Runs at the start of every agent's turn, before the agent decides what
//! to do. Any death found here ends the turn.

use tracing::trace;

use hearth_types::DeathCause;
use hearth_world::spatial;

use crate::agent::Agent;
use crate::context::TickContext;

/// Result of one vitals pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VitalsReport {
    /// Energy burned by metabolism this tick, after all multipliers.
    pub metabolism: f64,
    /// Set if the agent died.
    pub death: Option<DeathCause>,
}

impl VitalsReport {
    const fn died(cause: DeathCause) -> Self {
        Self {
            metabolism: 0.0,
            death: Some(cause),
        }
    }
}

/// Apply one tick of needs to `agent`.
///
/// # Order of operations
///
/// 1. Age; die at max age, or when old and below the frailty line
/// 2. Drop grown or dead children; each young child adds parental cost
/// 3. Children pay only parental cost and starve below their energy line
/// 4. Home buff on an own or family home
/// 5. Social buff
/// 6. Forget an owned campfire that burned out; warm up near any campfire
/// 7. Burn metabolism, tick the mate cooldown
/// 8. Contentment, or social drift by company
/// 9. Struggle: love erodes while energy or social is low
/// 10. Library learning
/// 11. Die if energy is gone
pub fn apply_vitals(agent: &mut Agent, ctx: &mut TickContext<'_>) -> VitalsReport {
    let life = &ctx.config.life;
    let needs = &ctx.config.needs;

    // 1. Aging
    agent.age = agent.age.saturating_add(1);
    if agent.age >= life.max_age {
        return VitalsReport::died(DeathCause::MaxAge);
    }
    if agent.age >= life.old_age && agent.energy < life.frailty_energy {
        return VitalsReport::died(DeathCause::Frailty);
    }

    // 2. Dependents
    let population = &*ctx.population;
    agent.children.retain(|child| {
        population
            .get(*child)
            .is_some_and(|c| c.age < life.adult_age)
    });
    let parental_cost = needs.parental_cost_per_child * count_as_f64(agent.children.len());

    // 3. Childhood
    let mut metabolism = if agent.is_child(ctx.config) {
        if agent.energy < life.child_starvation_energy {
            return VitalsReport::died(DeathCause::StarvationChild);
        }
        parental_cost
    } else {
        agent.genome.metabolism + parental_cost
    };

    // 4. Home
    if let Some(home) = ctx.terrain.home_at(agent.cell) {
        let is_owner = home.owner == Some(agent.id);
        let is_family = home
            .owner
            .and_then(|owner| ctx.population.get(owner))
            .is_some_and(|owner| owner.children.contains(&agent.id));
        if is_owner || is_family {
            metabolism *= needs.home_metabolism_factor;
            if agent.energy < needs.home_energy_ceiling {
                agent.energy = (agent.energy + needs.home_energy_regen)
                    .clamp(0.0, needs.home_energy_ceiling);
            }
            agent.adjust_social(needs.home_social_gain, ctx.config);
        }
    }

    // 5. Social buff
    if agent.social_buff > 0 {
        metabolism *= needs.social_buff_metabolism_factor;
        agent.social_buff = agent.social_buff.saturating_sub(1);
    }

    // 6. Campfires
    if let Some(fire) = agent.campfire
        && !ctx.terrain.has_campfire(fire)
    {
        agent.campfire = None;
    }
    let cozy = spatial::any_within(agent.cell, needs.cozy_radius, ctx.terrain.campfire_cells());
    if cozy {
        metabolism *= needs.campfire_metabolism_factor;
        agent.adjust_social(needs.campfire_social_gain, ctx.config);
    }

    // 7. Burn
    agent.energy -= metabolism;
    agent.mate_cooldown = agent.mate_cooldown.saturating_sub(1);

    // 8. Social drift
    if agent.contentment_buff > 0 {
        agent.contentment_buff = agent.contentment_buff.saturating_sub(1);
    } else {
        let company = ctx.population.iter().any(|other| {
            agent.cell.distance_to(other.cell) <= agent.genome.vision_radius()
        });
        if !company && !cozy {
            agent.adjust_social(
                -(agent.genome.sociability * needs.isolation_social_factor),
                ctx.config,
            );
        } else {
            agent.adjust_social(needs.company_social_gain, ctx.config);
        }
    }

    // 9. Struggle
    if agent.energy < needs.struggle_energy || agent.social < needs.struggle_social {
        agent.struggle_timer = agent.struggle_timer.saturating_add(1);
        agent.adjust_love(-needs.struggle_love_loss, ctx.config);
    } else {
        agent.struggle_timer = 0;
    }

    // 10. Library learning
    agent.skills.drift_toward(
        ctx.knowledge.levels(),
        needs.library_learning_rate,
        &ctx.config.skill_caps,
    );

    // 11. Exhaustion
    if agent.energy <= 0.0 {
        let cause = if agent.was_attacked_by.is_some() {
            DeathCause::Combat
        } else {
            DeathCause::StarvationAdult
        };
        return VitalsReport::died(cause);
    }

    trace!(
        agent_id = %agent.id,
        energy = agent.energy,
        social = agent.social,
        love = agent.love,
        metabolism,
        "Vitals applied"
    );
    VitalsReport {
        metabolism,
        death: None,
    }
}

#[allow(clippy::cast_precision_loss)]
fn count_as_f64(n: usize) -> f64 {
    n as f64
}
