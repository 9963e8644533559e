//! One agent's full turn.

use tracing::trace;

use hearth_types::{AgentId, Behavior};

use crate::agent::Agent;
use crate::context::TickContext;
use crate::death::{DeathConsequences, process_death};
use crate::decision::{DecisionRolls, decide};
use crate::error::AgentError;
use crate::execute::execute;
use crate::perception::perceive;
use crate::vitals::apply_vitals;

/// Everything that happened during one agent's turn.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReport {
    /// Behavior the agent ended the turn in.
    pub behavior: Behavior,
    /// Energy burned by metabolism.
    pub metabolism: f64,
    /// Newborns from this turn.
    pub births: Vec<AgentId>,
    /// Agent attacked this turn.
    pub attacked: Option<AgentId>,
    /// Set if the agent died; it must not be returned to the population.
    pub death: Option<DeathConsequences>,
}

impl UpdateReport {
    /// Whether the agent is still alive.
    pub const fn survived(&self) -> bool {
        self.death.is_none()
    }
}

/// Run vitals, then perceive, decide, and act.
///
/// `agent` must be checked out of `ctx.population`. If it dies during
/// vitals its goods are dropped and the report carries the consequences.
///
/// # Errors
///
/// Propagates [`AgentError`] from action execution.
pub fn update_agent(agent: &mut Agent, ctx: &mut TickContext<'_>) -> Result<UpdateReport, AgentError> {
    let vitals = apply_vitals(agent, ctx);
    if let Some(cause) = vitals.death {
        let consequences = process_death(agent, cause, ctx.terrain, ctx.population, ctx.world);
        return Ok(UpdateReport {
            behavior: agent.behavior,
            metabolism: vitals.metabolism,
            births: Vec::new(),
            attacked: None,
            death: Some(consequences),
        });
    }

    let seen = perceive(
        agent,
        ctx.terrain,
        ctx.population,
        ctx.census(),
        ctx.config,
        ctx.world,
    );
    let rolls = DecisionRolls::draw(ctx.rng);
    agent.behavior = decide(agent, &seen, rolls, ctx.config);
    let chosen = agent.behavior;
    let outcome = execute(agent, &seen, ctx)?;

    trace!(
        agent_id = %agent.id,
        chosen = chosen.label(),
        ended = agent.behavior.label(),
        x = agent.cell.x,
        y = agent.cell.y,
        "Agent acted"
    );

    Ok(UpdateReport {
        behavior: agent.behavior,
        metabolism: vitals.metabolism,
        births: outcome.births,
        attacked: outcome.attacked,
        death: None,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hearth_types::{Cell, DeathCause};

    use super::*;
    use crate::fixtures::{TestWorld, test_agent};

    #[test]
    fn hungry_agent_with_food_in_view_forages() {
        let mut w = TestWorld::new();
        w.terrain.add_food(Cell::new(8, 5), 1, 100);
        let mut a = test_agent(1, Cell::new(5, 5));
        a.energy = 60.0;
        let report = update_agent(&mut a, &mut w.ctx()).unwrap();
        assert!(report.survived());
        assert_eq!(report.behavior, Behavior::Foraging);
        assert_eq!(a.cell, Cell::new(6, 5));
    }

    #[test]
    fn hopeless_when_nothing_to_eat_anywhere() {
        let mut w = TestWorld::new();
        let mut a = test_agent(1, Cell::new(5, 5));
        a.energy = 15.0;
        a.love = 0.0;
        let report = update_agent(&mut a, &mut w.ctx()).unwrap();
        assert_eq!(report.behavior, Behavior::Hopeless);
        assert!((a.love - 0.5).abs() < 1e-12);
        assert_ne!(a.cell, Cell::new(5, 5));
    }

    #[test]
    fn death_in_vitals_ends_the_turn() {
        let mut w = TestWorld::new();
        let mut a = test_agent(1, Cell::new(5, 5));
        a.energy = 0.5;
        a.inventory.wood = 2;
        let report = update_agent(&mut a, &mut w.ctx()).unwrap();
        let death = report.death.unwrap();
        assert_eq!(death.cause, DeathCause::StarvationAdult);
        assert_eq!(w.terrain.wood_units(), 2);
        assert_eq!(a.cell, Cell::new(5, 5));
    }
}
