//! Carry out the behavior chosen by [`crate::decision::decide`].
//!
//! Before acting, an agent sharing its cell with others picks one of them
//! at random and may attack it instead (see [`combat::provoked`]). Otherwise
//! the behavior runs: usually one action or one movement. Several
//! behaviors hand off to another state without acting this tick, e.g. a
//! refuel attempt with no wood switches to gathering wood.

use rand::Rng;
use rand::seq::IndexedRandom;

use hearth_types::{AgentId, Behavior, Cell, Skill};

use crate::actions::social::{self, Conversation};
use crate::actions::{build, combat, gather};
use crate::agent::Agent;
use crate::context::TickContext;
use crate::error::AgentError;
use crate::movement::{explore, move_towards, shuffle};
use crate::perception::Perception;

/// Side effects of one execution that the tick loop reports on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Agents born to this agent this tick.
    pub births: Vec<AgentId>,
    /// Agent this one hit, if it attacked.
    pub attacked: Option<AgentId>,
}

/// Run the agent's current behavior.
///
/// # Errors
///
/// Returns an [`AgentError`] if a conversation partner cannot be returned
/// to the population or a newborn cannot be given an id.
pub fn execute(
    agent: &mut Agent,
    seen: &Perception,
    ctx: &mut TickContext<'_>,
) -> Result<ActionOutcome, AgentError> {
    let mut outcome = ActionOutcome::default();

    if let Some(victim) = lash_out(agent, seen, ctx) {
        outcome.attacked = Some(victim);
        return Ok(outcome);
    }

    let slow = ctx.config.actions.slow_speed_factor;
    let behavior = agent.behavior;
    match behavior {
        Behavior::Foraging => forage(agent, seen, ctx),
        Behavior::GettingWood => gather_wood(agent, seen, ctx),
        Behavior::Building => {
            build::build_home(agent, ctx.terrain, ctx.config, ctx.world);
        }
        Behavior::RepairingHome => repair(agent, ctx),
        Behavior::RefuelingCampfire => refuel(agent, seen, ctx),
        Behavior::ClaimingHome => claim(agent, seen, ctx),
        Behavior::WanderingToBuild => shuffle(agent, slow, ctx.terrain, ctx.config, ctx.rng),
        Behavior::SeekingCommunity => match seen.nearest_home {
            Some(home) => move_towards(agent, home, ctx.terrain, ctx.config),
            None => explore(agent, ctx.terrain, ctx.config, ctx.rng),
        },
        Behavior::SeekingRemoteSpot => explore(agent, ctx.terrain, ctx.config, ctx.rng),
        Behavior::GoingHomeToFarm => head_home(agent, Behavior::Planting, ctx),
        Behavior::GoingHomeToPlantWood => head_home(agent, Behavior::PlantingWood, ctx),
        Behavior::Planting => {
            if ctx.terrain.is_clear(agent.cell) {
                gather::plant_seed(agent, ctx.terrain, ctx.config, ctx.world);
            } else {
                shuffle(agent, 1.0, ctx.terrain, ctx.config, ctx.rng);
            }
        }
        Behavior::PlantingWood => {
            if ctx.terrain.is_clear(agent.cell) {
                gather::plant_tree(agent, ctx.terrain, ctx.config, ctx.world);
            } else {
                shuffle(agent, slow, ctx.terrain, ctx.config, ctx.rng);
            }
        }
        Behavior::BuildingCampfire => {
            if ctx.terrain.is_clear(agent.cell) {
                build::build_campfire(agent, ctx.terrain, ctx.config, ctx.world);
            } else {
                shuffle(agent, slow, ctx.terrain, ctx.config, ctx.rng);
            }
        }
        Behavior::Sharing => share(agent, seen, ctx),
        Behavior::Retaliating => outcome.attacked = retaliate(agent, ctx),
        Behavior::SeekingSocial => outcome.births = seek_company(agent, seen, ctx)?,
        Behavior::Hopeless => despair(agent, seen, ctx),
        Behavior::Wandering => wander(agent, seen, ctx),
        Behavior::SeekingLibrary => visit_library(agent, ctx),
        Behavior::Communicating | Behavior::Mating | Behavior::Attacking => {}
    }

    Ok(outcome)
}

/// Maybe attack a random cellmate. Returns the victim.
fn lash_out(agent: &mut Agent, seen: &Perception, ctx: &mut TickContext<'_>) -> Option<AgentId> {
    let target = *seen.cellmates.choose(ctx.rng)?;
    let roll: f64 = ctx.rng.random();
    if !combat::provoked(agent, roll, ctx.config) {
        return None;
    }
    let victim = ctx.population.get_mut(target)?;
    combat::attack(agent, victim, ctx.config);
    Some(target)
}

fn in_reach(agent: &Agent, target: Cell, ctx: &TickContext<'_>) -> bool {
    agent.cell.distance_to(target) < ctx.config.actions.interaction_range
}

fn forage(agent: &mut Agent, seen: &Perception, ctx: &mut TickContext<'_>) {
    if agent.inventory.food > 0 && agent.energy < ctx.config.decision.eat_energy_ceiling {
        gather::consume_food(agent, ctx.config, ctx.rng);
    } else if ctx.terrain.has_food(agent.cell) && agent.food_room(ctx.config) > 0 {
        gather::pickup_food(agent, ctx.terrain, ctx.config);
    } else if let Some(target) = seen.food_target {
        move_towards(agent, target, ctx.terrain, ctx.config);
        if in_reach(agent, target, ctx) && !ctx.terrain.has_food(agent.cell) {
            agent.memory.forget_food(target);
        }
    } else {
        explore(agent, ctx.terrain, ctx.config, ctx.rng);
    }
}

fn gather_wood(agent: &mut Agent, seen: &Perception, ctx: &mut TickContext<'_>) {
    if agent.wood_room(ctx.config) == 0 {
        agent.behavior = Behavior::Wandering;
    } else if ctx.terrain.has_wood(agent.cell) {
        gather::take_wood(agent, ctx.terrain, ctx.config, ctx.rng);
    } else if let Some(target) = seen.wood_target {
        move_towards(agent, target, ctx.terrain, ctx.config);
        if in_reach(agent, target, ctx) && !ctx.terrain.has_wood(agent.cell) {
            agent.memory.forget_wood(target);
        }
    } else {
        explore(agent, ctx.terrain, ctx.config, ctx.rng);
    }
}

fn repair(agent: &mut Agent, ctx: &mut TickContext<'_>) {
    let Some(home) = agent.home else {
        agent.behavior = Behavior::Wandering;
        return;
    };
    if !in_reach(agent, home, ctx) {
        move_towards(agent, home, ctx.terrain, ctx.config);
    } else if agent.inventory.wood > 0 {
        build::repair_home(agent, ctx.terrain, ctx.config, ctx.world);
        agent.behavior = Behavior::Wandering;
    } else {
        agent.behavior = Behavior::GettingWood;
    }
}

fn refuel(agent: &mut Agent, seen: &Perception, ctx: &mut TickContext<'_>) {
    let Some((fire, _)) = seen.nearest_campfire else {
        agent.behavior = Behavior::Wandering;
        return;
    };
    if !in_reach(agent, fire, ctx) {
        move_towards(agent, fire, ctx.terrain, ctx.config);
    } else if agent.inventory.wood > 0 {
        build::refuel_campfire(agent, fire, ctx.terrain, ctx.config, ctx.world);
        agent.behavior = Behavior::Wandering;
    } else {
        agent.behavior = Behavior::GettingWood;
    }
}

fn claim(agent: &mut Agent, seen: &Perception, ctx: &mut TickContext<'_>) {
    match seen.unclaimed_home {
        Some(home) if in_reach(agent, home, ctx) => {
            build::claim_home(agent, home, ctx.terrain, ctx.config);
        }
        Some(home) => move_towards(agent, home, ctx.terrain, ctx.config),
        None => agent.behavior = Behavior::Wandering,
    }
}

/// Walk home, switching to `then` once within farming range.
fn head_home(agent: &mut Agent, then: Behavior, ctx: &TickContext<'_>) {
    match agent.home {
        Some(home) if agent.cell.distance_to(home) > ctx.config.decision.farm_home_radius => {
            move_towards(agent, home, ctx.terrain, ctx.config);
        }
        _ => agent.behavior = then,
    }
}

fn share(agent: &mut Agent, seen: &Perception, ctx: &mut TickContext<'_>) {
    let Some((id, cell)) = seen
        .needy_neighbor
        .and_then(|id| ctx.population.get(id).map(|n| (id, n.cell)))
    else {
        agent.behavior = Behavior::Wandering;
        return;
    };
    if !in_reach(agent, cell, ctx) {
        move_towards(agent, cell, ctx.terrain, ctx.config);
        return;
    }
    if let Some(target) = ctx.population.get_mut(id) {
        social::give_resource(agent, target, ctx.config);
    }
}

/// Hit back at the last attacker, or let the grudge go if it is dead.
fn retaliate(agent: &mut Agent, ctx: &mut TickContext<'_>) -> Option<AgentId> {
    let attacker_id = agent.was_attacked_by?;
    let Some(attacker) = ctx.population.get_mut(attacker_id) else {
        agent.was_attacked_by = None;
        agent.behavior = Behavior::Wandering;
        return None;
    };
    if agent.cell.distance_to(attacker.cell) < ctx.config.actions.interaction_range {
        combat::attack(agent, attacker, ctx.config);
        agent.was_attacked_by = None;
        Some(attacker_id)
    } else {
        let target = attacker.cell;
        move_towards(agent, target, ctx.terrain, ctx.config);
        None
    }
}

/// Approach the first visible agent and talk; failing that, head for a
/// campfire or explore.
fn seek_company(
    agent: &mut Agent,
    seen: &Perception,
    ctx: &mut TickContext<'_>,
) -> Result<Vec<AgentId>, AgentError> {
    let partner = seen
        .neighbors
        .first()
        .and_then(|id| ctx.population.get(*id).map(|p| (*id, p.cell)));
    match (partner, seen.nearest_campfire) {
        (Some((id, cell)), _) if in_reach(agent, cell, ctx) => {
            let Some(mut partner) = ctx.population.check_out(id) else {
                return Ok(Vec::new());
            };
            let talk = social::communicate(agent, &mut partner, ctx);
            ctx.population.check_in(partner)?;
            Ok(match talk? {
                Conversation::Mated { children } => children,
                Conversation::Talked | Conversation::PlantedTogether { .. } => Vec::new(),
            })
        }
        (Some((_, cell)), _) | (None, Some((cell, _))) => {
            move_towards(agent, cell, ctx.terrain, ctx.config);
            Ok(Vec::new())
        }
        (None, None) => {
            explore(agent, ctx.terrain, ctx.config, ctx.rng);
            Ok(Vec::new())
        }
    }
}

/// Rest a little, then drag toward food, company, or warmth.
fn despair(agent: &mut Agent, seen: &Perception, ctx: &mut TickContext<'_>) {
    let d = &ctx.config.decision;
    agent.adjust_love(ctx.config.actions.hopeless_love_gain, ctx.config);

    let company = || {
        seen.neighbors
            .first()
            .and_then(|id| ctx.population.get(*id))
            .map(|other| other.cell)
    };
    let target = if agent.energy < d.hopeless_energy && seen.food_target.is_some() {
        seen.food_target
    } else if agent.social < d.hopeless_social {
        company().or_else(|| seen.nearest_campfire.map(|(cell, _)| cell))
    } else {
        None
    };

    match target {
        Some(cell) => move_towards(agent, cell, ctx.terrain, ctx.config),
        None => explore(agent, ctx.terrain, ctx.config, ctx.rng),
    }
}

/// Content agents linger or stroll to the library; everyone else logs the
/// resources they see and explores.
fn wander(agent: &mut Agent, seen: &Perception, ctx: &mut TickContext<'_>) {
    let a = &ctx.config.actions;
    if agent.energy > a.content_energy && agent.social > a.content_social {
        let library = ctx.terrain.library();
        if ctx.rng.random::<f64>() < a.library_visit_chance
            && agent.cell.distance_to(library) > a.library_visit_radius
        {
            move_towards(agent, library, ctx.terrain, ctx.config);
            agent.behavior = Behavior::SeekingLibrary;
        }
        return;
    }
    agent.memory.remember_food(seen.food_in_sight.iter().copied());
    agent.memory.remember_wood(seen.wood_in_sight.iter().copied());
    explore(agent, ctx.terrain, ctx.config, ctx.rng);
}

fn visit_library(agent: &mut Agent, ctx: &TickContext<'_>) {
    let library = ctx.terrain.library();
    if in_reach(agent, library, ctx) {
        agent.skills.train(
            Skill::Social,
            ctx.config.actions.library_social_gain,
            &ctx.config.skill_caps,
        );
        agent.behavior = Behavior::Wandering;
    } else {
        move_towards(agent, library, ctx.terrain, ctx.config);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fixtures::{TestWorld, test_agent};
    use crate::perception::perceive;

    fn run(w: &mut TestWorld, agent: &mut Agent, behavior: Behavior) -> ActionOutcome {
        agent.behavior = behavior;
        let census = w.population.len() + 1;
        let seen = perceive(agent, &w.terrain, &w.population, census, &w.config, &w.world);
        execute(agent, &seen, &mut w.ctx()).unwrap()
    }

    #[test]
    fn forager_walks_to_food_then_picks_it_up() {
        let mut w = TestWorld::new();
        let food = Cell::new(8, 5);
        w.terrain.add_food(food, 1, 100);
        let mut a = test_agent(1, Cell::new(5, 5));
        a.energy = 60.0;
        run(&mut w, &mut a, Behavior::Foraging);
        assert_eq!(a.cell, Cell::new(6, 5));
        run(&mut w, &mut a, Behavior::Foraging);
        run(&mut w, &mut a, Behavior::Foraging);
        assert_eq!(a.cell, food);
        run(&mut w, &mut a, Behavior::Foraging);
        assert_eq!(a.inventory.food, 1);
        assert!(!w.terrain.has_food(food));
        run(&mut w, &mut a, Behavior::Foraging);
        assert_eq!(a.inventory.food, 0);
        assert!(a.energy > 150.0);
    }

    #[test]
    fn stale_memory_is_forgotten_on_arrival() {
        let mut w = TestWorld::new();
        let mut a = test_agent(1, Cell::new(5, 5));
        a.energy = 60.0;
        a.memory.remember_food([Cell::new(6, 5)]);
        run(&mut w, &mut a, Behavior::Foraging);
        assert!(a.memory.food.is_empty());
    }

    #[test]
    fn full_wood_carrier_stops_gathering() {
        let mut w = TestWorld::new();
        let mut a = test_agent(1, Cell::new(5, 5));
        a.inventory.wood = 3;
        run(&mut w, &mut a, Behavior::GettingWood);
        assert_eq!(a.behavior, Behavior::Wandering);
        assert_eq!(a.cell, Cell::new(5, 5));
    }

    #[test]
    fn owner_repairs_home_from_next_door() {
        let mut w = TestWorld::new();
        let home = Cell::new(5, 5);
        w.terrain.build_home(home, AgentId(1), 1);
        let mut a = test_agent(1, Cell::new(9, 5));
        a.home = Some(home);
        a.inventory.wood = 1;
        run(&mut w, &mut a, Behavior::RepairingHome);
        run(&mut w, &mut a, Behavior::RepairingHome);
        run(&mut w, &mut a, Behavior::RepairingHome);
        assert_eq!(a.cell, Cell::new(6, 5));
        assert_eq!(w.terrain.home_at(home).unwrap().durability, 1);
        run(&mut w, &mut a, Behavior::RepairingHome);
        assert_eq!(w.terrain.home_at(home).unwrap().durability, 3);
        assert_eq!(a.inventory.wood, 0);
        assert_eq!(a.behavior, Behavior::Wandering);
    }

    #[test]
    fn refuel_without_wood_switches_to_gathering() {
        let mut w = TestWorld::new();
        let fire = Cell::new(5, 6);
        w.terrain.light_campfire(fire, 30);
        let mut a = test_agent(1, Cell::new(5, 5));
        run(&mut w, &mut a, Behavior::RefuelingCampfire);
        assert_eq!(a.behavior, Behavior::GettingWood);

        a.inventory.wood = 1;
        run(&mut w, &mut a, Behavior::RefuelingCampfire);
        assert_eq!(w.terrain.campfire_remaining(fire), Some(300));
        assert_eq!(a.inventory.wood, 0);
    }

    #[test]
    fn lonely_agents_talk_and_can_mate() {
        let mut w = TestWorld::new();
        let mut partner = test_agent(2, Cell::new(5, 6));
        partner.energy = 140.0;
        w.add(partner);
        let mut a = test_agent(1, Cell::new(5, 5));
        a.energy = 140.0;
        let outcome = run(&mut w, &mut a, Behavior::SeekingSocial);
        assert!(!outcome.births.is_empty());
        assert_eq!(w.population.len(), 1 + outcome.births.len());
        let partner = w.population.get(AgentId(2)).unwrap();
        assert_eq!(partner.behavior, Behavior::Mating);
        assert_eq!(partner.mate_cooldown, 65);
    }

    #[test]
    fn retaliation_hits_back_and_clears_grudge() {
        let mut w = TestWorld::new();
        let mut bully = test_agent(2, Cell::new(5, 6));
        bully.energy = 100.0;
        w.add(bully);
        let mut a = test_agent(1, Cell::new(5, 5));
        a.was_attacked_by = Some(AgentId(2));
        let outcome = run(&mut w, &mut a, Behavior::Retaliating);
        assert_eq!(outcome.attacked, Some(AgentId(2)));
        assert_eq!(a.was_attacked_by, None);
        let bully = w.population.get(AgentId(2)).unwrap();
        assert!((bully.energy - 85.0).abs() < 1e-12);
        assert_eq!(bully.was_attacked_by, Some(AgentId(1)));
    }

    #[test]
    fn grudge_against_the_dead_is_dropped() {
        let mut w = TestWorld::new();
        let mut a = test_agent(1, Cell::new(5, 5));
        a.was_attacked_by = Some(AgentId(40));
        let outcome = run(&mut w, &mut a, Behavior::Retaliating);
        assert_eq!(outcome.attacked, None);
        assert_eq!(a.was_attacked_by, None);
        assert_eq!(a.behavior, Behavior::Wandering);
    }

    #[test]
    fn loveless_cellmate_attacks_before_acting() {
        let mut w = TestWorld::new();
        w.add(test_agent(2, Cell::new(5, 5)));
        let mut a = test_agent(1, Cell::new(5, 5));
        a.love = 0.0;
        a.energy = 120.0;
        a.genome.aggression = 0.5;
        a.struggle_timer = 1000;
        let outcome = run(&mut w, &mut a, Behavior::Wandering);
        assert_eq!(outcome.attacked, Some(AgentId(2)));
        assert_eq!(a.behavior, Behavior::Attacking);
    }

    #[test]
    fn hopeless_agent_drifts_toward_company() {
        let mut w = TestWorld::new();
        w.add(test_agent(2, Cell::new(9, 5)));
        let mut a = test_agent(1, Cell::new(5, 5));
        a.energy = 50.0;
        a.social = 5.0;
        a.love = 0.0;
        run(&mut w, &mut a, Behavior::Hopeless);
        assert_eq!(a.cell, Cell::new(6, 5));
        assert!((a.love - 0.5).abs() < 1e-12);
    }

    #[test]
    fn hopeless_and_starving_heads_for_remembered_food() {
        let mut w = TestWorld::new();
        let mut a = test_agent(1, Cell::new(5, 5));
        a.energy = 10.0;
        a.memory.remember_food([Cell::new(5, 20)]);
        run(&mut w, &mut a, Behavior::Hopeless);
        assert_eq!(a.cell, Cell::new(5, 6));
    }

    #[test]
    fn wanderers_log_what_they_see() {
        let mut w = TestWorld::new();
        w.terrain.add_food(Cell::new(7, 7), 1, 100);
        w.terrain.add_wood(Cell::new(3, 3), 1);
        let mut a = test_agent(1, Cell::new(5, 5));
        a.energy = 90.0;
        run(&mut w, &mut a, Behavior::Wandering);
        assert!(a.memory.food.contains(&Cell::new(7, 7)));
        assert!(a.memory.wood.contains(&Cell::new(3, 3)));
    }

    #[test]
    fn content_agents_linger_or_visit_the_library() {
        let mut w = TestWorld::new();
        let mut a = test_agent(1, Cell::new(0, 0));
        a.energy = 140.0;
        a.social = 95.0;
        let mut visited = false;
        for _ in 0..200 {
            let before = a.cell;
            run(&mut w, &mut a, Behavior::Wandering);
            if a.behavior == Behavior::SeekingLibrary {
                visited = true;
                assert_eq!(a.cell, Cell::new(1, 1));
                break;
            }
            assert_eq!(a.cell, before);
        }
        assert!(visited);
    }

    #[test]
    fn library_visit_teaches_social_skill() {
        let mut w = TestWorld::new();
        let library = w.terrain.library();
        let mut a = test_agent(1, library.offset(1, 0));
        run(&mut w, &mut a, Behavior::SeekingLibrary);
        assert!((a.skills.get(Skill::Social) - 0.1).abs() < 1e-12);
        assert_eq!(a.behavior, Behavior::Wandering);
    }

    #[test]
    fn farmers_plant_once_home_is_near() {
        let mut w = TestWorld::new();
        let mut a = test_agent(1, Cell::new(5, 5));
        a.home = Some(Cell::new(12, 5));
        a.inventory.seeds = 1;
        run(&mut w, &mut a, Behavior::GoingHomeToFarm);
        assert_eq!(a.cell, Cell::new(6, 5));
        assert_eq!(a.behavior, Behavior::GoingHomeToFarm);
        a.cell = Cell::new(8, 5);
        run(&mut w, &mut a, Behavior::GoingHomeToFarm);
        assert_eq!(a.behavior, Behavior::Planting);
        run(&mut w, &mut a, Behavior::Planting);
        assert_eq!(w.terrain.plant_cells().collect::<Vec<_>>(), vec![Cell::new(8, 5)]);
    }

    #[test]
    fn sharing_hands_food_to_a_hungry_neighbor() {
        let mut w = TestWorld::new();
        let mut hungry = test_agent(2, Cell::new(6, 5));
        hungry.energy = 40.0;
        w.add(hungry);
        let mut a = test_agent(1, Cell::new(5, 5));
        a.inventory.food = 1;
        run(&mut w, &mut a, Behavior::Sharing);
        assert_eq!(a.inventory.food, 0);
        assert_eq!(w.population.get(AgentId(2)).unwrap().inventory.food, 1);
    }
}
