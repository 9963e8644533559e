//! The world tick: bootstrap, per-tick orchestration, snapshots, and
//! termination signals.
//!
//! Each tick runs these phases in a fixed order:
//!
//! 1. **Clock** -- advance the tick; the generation is derived from it.
//! 2. **Agents** -- every agent alive at the start of the tick takes one
//!    turn, in ascending id order. The acting agent is checked out of the
//!    population so it can mutate the others. Agents born this tick wait
//!    for the next one.
//! 3. **Spawning** -- periodic food and wood waves on clear, empty cells.
//! 4. **Lifecycle** -- growth, spoilage, campfire burn, and home decay.
//!    Owners of collapsed homes lose their reference.
//! 5. **Statistics** -- averages and counts for the snapshot.
//!
//! Given the same seed the whole sequence is deterministic.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use hearth_agents::{
    AgentConfig, AgentError, DeathConsequences, Genome, Population, TickContext, update_agent,
};
use hearth_types::{
    AgentId, AgentView, Cell, DeathTally, HomeView, PopulationStats, WorldSnapshot,
};
use hearth_world::spawning::{scatter_food, scatter_wood};
use hearth_world::{
    KnowledgePool, LifecycleReport, SpawnReport, Terrain, WorldConfig, WorldError,
    advance_timers, spawn_resources,
};

use crate::clock::{ClockError, SimClock};
use crate::config::{SimulationBoundsConfig, SimulationConfig};
use crate::stats::compute_stats;

/// Errors that can occur while building or advancing the simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// The grid could not be built.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// An agent's turn failed.
    #[error("agent error for {agent_id}: {source}")]
    Agent {
        /// The agent whose turn failed.
        agent_id: AgentId,
        /// The underlying agent error.
        source: AgentError,
    },

    /// Founders could not be placed.
    #[error("bootstrap error: {source}")]
    Bootstrap {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },
}

/// World-driven reasons for the run to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Termination {
    /// Every agent is dead and the grace period has passed.
    Extinction,
    /// The population outgrew its share of the map.
    Overpopulation,
}

/// What happened during one tick.
#[derive(Debug, Clone)]
pub struct TickSummary {
    /// The tick that was executed.
    pub tick: u64,
    /// Generation at this tick.
    pub generation: u64,
    /// Living agents at the end of the tick.
    pub population: u32,
    /// Agents born this tick.
    pub births: Vec<AgentId>,
    /// Agents who died this tick, in the order they died.
    pub deaths: Vec<DeathConsequences>,
    /// Resources placed by the spawn waves.
    pub spawned: SpawnReport,
    /// Growth, spoilage, campfire, and home decay results.
    pub lifecycle: LifecycleReport,
}

/// The whole simulation: world, agents, clock, and random stream.
#[derive(Debug)]
pub struct Simulation {
    clock: SimClock,
    terrain: Terrain,
    population: Population,
    knowledge: KnowledgePool,
    rng: StdRng,
    agent_config: AgentConfig,
    world_config: WorldConfig,
    bounds: SimulationBoundsConfig,
    stats: PopulationStats,
    deaths: DeathTally,
}

impl Simulation {
    /// Build and seed a world from run settings.
    ///
    /// Founders go to random cells first; food and wood are then scattered
    /// on clear cells that no founder occupies.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::World`] for invalid grid dimensions.
    pub fn new(config: &SimulationConfig) -> Result<Self, SimulationError> {
        let mut sim = Self::empty(config)?;
        let (width, height) = (sim.terrain.width(), sim.terrain.height());

        for _ in 0..config.population.initial_agents {
            let cell = Cell::new(
                sim.rng.random_range(0..width),
                sim.rng.random_range(0..height),
            );
            let genome = Genome::founder(&mut sim.rng);
            sim.population
                .spawn(cell, genome, &sim.agent_config, &mut sim.rng)?;
        }

        let occupied = sim.population.occupied_cells();
        let food = scatter_food(
            &mut sim.terrain,
            config.population.initial_food,
            &occupied,
            &sim.world_config,
            &mut sim.rng,
        );
        let wood = scatter_wood(
            &mut sim.terrain,
            config.population.initial_wood,
            &occupied,
            &sim.world_config,
            &mut sim.rng,
        );
        sim.refresh_stats();

        info!(
            width,
            height,
            agents = sim.population.len(),
            food,
            wood,
            seed = ?config.world.seed,
            "Simulation bootstrapped"
        );
        Ok(sim)
    }

    /// A world with the configured grid and seed but no agents or resources.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::World`] for invalid grid dimensions.
    pub fn empty(config: &SimulationConfig) -> Result<Self, SimulationError> {
        let terrain = Terrain::new(config.world.width, config.world.height)?;
        let agent_config = AgentConfig::default();
        let world_config = WorldConfig::default();
        let rng = config
            .world
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

        Ok(Self {
            clock: SimClock::new(u64::from(agent_config.life.max_age))?,
            terrain,
            population: Population::new(),
            knowledge: KnowledgePool::new(&world_config),
            rng,
            agent_config,
            world_config,
            bounds: config.simulation.clone(),
            stats: PopulationStats::default(),
            deaths: DeathTally::default(),
        })
    }

    /// Execute one complete tick.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Clock`] on tick overflow or
    /// [`SimulationError::Agent`] if an agent's turn corrupts the arena.
    pub fn run_tick(&mut self) -> Result<TickSummary, SimulationError> {
        // --- Phase 1: Clock ---
        let tick = self.clock.advance()?;

        // --- Phase 2: Agents ---
        let mut births = Vec::new();
        let mut deaths = Vec::new();
        for id in self.population.ids() {
            let Some(mut agent) = self.population.check_out(id) else {
                continue;
            };
            let mut ctx = TickContext {
                tick,
                terrain: &mut self.terrain,
                population: &mut self.population,
                knowledge: &mut self.knowledge,
                rng: &mut self.rng,
                config: &self.agent_config,
                world: &self.world_config,
            };
            let report = update_agent(&mut agent, &mut ctx)
                .map_err(|source| SimulationError::Agent { agent_id: id, source })?;

            births.extend(report.births);
            if let Some(death) = report.death {
                self.deaths.record(death.cause);
                deaths.push(death);
            } else {
                self.population
                    .check_in(agent)
                    .map_err(|source| SimulationError::Agent { agent_id: id, source })?;
            }
        }

        // --- Phase 3: Spawning ---
        let occupied = self.population.occupied_cells();
        let spawned = spawn_resources(
            &mut self.terrain,
            tick,
            &occupied,
            &self.world_config,
            &mut self.rng,
        );

        // --- Phase 4: Lifecycle ---
        let lifecycle = advance_timers(&mut self.terrain, tick, &self.world_config);
        forget_collapsed_homes(&mut self.population, &lifecycle.collapsed_homes);

        // --- Phase 5: Statistics ---
        self.refresh_stats();

        let summary = TickSummary {
            tick,
            generation: self.clock.generation(),
            population: self.stats.population,
            births,
            deaths,
            spawned,
            lifecycle,
        };
        debug!(
            tick,
            generation = summary.generation,
            population = summary.population,
            births = summary.births.len(),
            deaths = summary.deaths.len(),
            food_cells = self.terrain.food_cell_count(),
            wood_cells = self.terrain.wood_cell_count(),
            "Tick complete"
        );
        Ok(summary)
    }

    /// Whether the world itself has ended the run.
    pub fn termination(&self) -> Option<Termination> {
        let population = self.population.len();
        if population == 0 && self.clock.tick() > self.bounds.extinction_grace_ticks {
            return Some(Termination::Extinction);
        }
        let limit = self.terrain.area() * self.bounds.overpopulation_fraction;
        if f64::from(u32::try_from(population).unwrap_or(u32::MAX)) > limit {
            return Some(Termination::Overpopulation);
        }
        None
    }

    /// Owned, read-only copy of the world for presentation.
    pub fn snapshot(&self) -> WorldSnapshot {
        let agents = self
            .population
            .iter()
            .map(|a| AgentView {
                id: a.id,
                cell: a.cell,
                behavior: a.behavior,
                stage: a.stage(&self.agent_config),
                energy: a.energy,
                social: a.social,
                buffed: a.social_buff > 0,
                at_home: a.is_at_home(),
            })
            .collect();

        WorldSnapshot {
            tick: self.clock.tick(),
            generation: self.clock.generation(),
            width: self.terrain.width(),
            height: self.terrain.height(),
            library: self.terrain.library(),
            agents,
            food: self.terrain.food_cells().collect(),
            wood: self.terrain.wood_cells().collect(),
            plants: self.terrain.plant_cells().collect(),
            trees: self.terrain.tree_cells().collect(),
            campfires: self.terrain.campfires().collect(),
            homes: self
                .terrain
                .homes()
                .map(|(cell, home)| HomeView {
                    cell,
                    owner: home.owner,
                    durability: home.durability,
                })
                .collect(),
            knowledge: self.knowledge.levels().clone(),
            stats: self.stats.clone(),
            deaths: self.deaths.clone(),
        }
    }

    fn refresh_stats(&mut self) {
        self.stats = compute_stats(&self.population, &self.terrain, &self.agent_config);
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Current tick.
    pub const fn tick(&self) -> u64 {
        self.clock.tick()
    }

    /// Current generation.
    pub const fn generation(&self) -> u64 {
        self.clock.generation()
    }

    /// Resource and structure layers.
    pub const fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    /// Mutable terrain, for seeding scenarios.
    pub const fn terrain_mut(&mut self) -> &mut Terrain {
        &mut self.terrain
    }

    /// Living agents.
    pub const fn population(&self) -> &Population {
        &self.population
    }

    /// Mutable population, for seeding scenarios.
    pub const fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    /// The library's knowledge pool.
    pub const fn knowledge(&self) -> &KnowledgePool {
        &self.knowledge
    }

    /// Statistics from the last completed tick.
    pub const fn stats(&self) -> &PopulationStats {
        &self.stats
    }

    /// Deaths by cause since the start of the run.
    pub const fn deaths(&self) -> &DeathTally {
        &self.deaths
    }

    /// Agent constants.
    pub const fn agent_config(&self) -> &AgentConfig {
        &self.agent_config
    }

    /// World constants.
    pub const fn world_config(&self) -> &WorldConfig {
        &self.world_config
    }

    /// Spawn an agent on `cell` with a founder genome drawn from the
    /// simulation's random stream.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Bootstrap`] if the id space is exhausted.
    pub fn add_founder(&mut self, cell: Cell) -> Result<AgentId, SimulationError> {
        let cell = self.terrain.clamp(cell);
        let genome = Genome::founder(&mut self.rng);
        Ok(self
            .population
            .spawn(cell, genome, &self.agent_config, &mut self.rng)?)
    }
}

/// Clear the home reference of every owner whose home fell down.
fn forget_collapsed_homes(population: &mut Population, collapsed: &[(Cell, Option<AgentId>)]) {
    for (cell, owner) in collapsed {
        if let Some(owner) = owner
            && let Some(agent) = population.get_mut(*owner)
            && agent.home == Some(*cell)
        {
            agent.home = None;
        }
    }
}
