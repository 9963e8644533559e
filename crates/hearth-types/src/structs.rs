//! Aggregate statistics and the read-only world snapshot.
//!
//! These are the only structures the presentation layer sees. They are
//! owned copies, so nothing downstream can reach back into live state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{Behavior, DeathCause, Gene, LifeStage, Skill};
use crate::ids::{AgentId, Cell};

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Population-level aggregates recomputed at the end of every tick.
///
/// Gene and skill averages are taken over adults when any exist, otherwise
/// over everyone. An empty world reports zeros.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    /// Living agents.
    pub population: u32,
    /// Homes standing on the map, owned or not.
    pub homes_built: u32,
    /// Campfires still burning.
    pub active_campfires: u32,
    /// Mean value of each gene.
    pub gene_averages: BTreeMap<Gene, f64>,
    /// Mean value of each skill.
    pub skill_averages: BTreeMap<Skill, f64>,
}

impl PopulationStats {
    /// Average of one gene, zero if unknown.
    pub fn gene(&self, gene: Gene) -> f64 {
        self.gene_averages.get(&gene).copied().unwrap_or(0.0)
    }

    /// Average of one skill, zero if unknown.
    pub fn skill(&self, skill: Skill) -> f64 {
        self.skill_averages.get(&skill).copied().unwrap_or(0.0)
    }
}

/// Running count of deaths by cause.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathTally {
    counts: BTreeMap<DeathCause, u64>,
}

impl DeathTally {
    /// Record one death.
    pub fn record(&mut self, cause: DeathCause) {
        let entry = self.counts.entry(cause).or_insert(0);
        *entry = entry.saturating_add(1);
    }

    /// Deaths attributed to `cause`.
    pub fn count(&self, cause: DeathCause) -> u64 {
        self.counts.get(&cause).copied().unwrap_or(0)
    }

    /// All deaths so far.
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0_u64, |acc, n| acc.saturating_add(*n))
    }

    /// Non-zero tallies in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (DeathCause, u64)> + '_ {
        self.counts.iter().filter(|(_, n)| **n > 0).map(|(c, n)| (*c, *n))
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// What the renderer needs to know about one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    /// Agent identifier.
    pub id: AgentId,
    /// Current cell.
    pub cell: Cell,
    /// Behavior chosen this tick.
    pub behavior: Behavior,
    /// Age bracket.
    pub stage: LifeStage,
    /// Remaining energy.
    pub energy: f64,
    /// Current social meter.
    pub social: f64,
    /// Whether a social buff is active.
    pub buffed: bool,
    /// Whether the agent is standing on its own home.
    pub at_home: bool,
}

/// A home as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeView {
    /// Where the home stands.
    pub cell: Cell,
    /// Owner, if claimed.
    pub owner: Option<AgentId>,
    /// Remaining durability.
    pub durability: u32,
}

/// Owned, read-only copy of the world at the end of a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Tick the snapshot was taken after.
    pub tick: u64,
    /// Derived generation counter.
    pub generation: u64,
    /// Grid width.
    pub width: i32,
    /// Grid height.
    pub height: i32,
    /// The communal library.
    pub library: Cell,
    /// Living agents in id order.
    pub agents: Vec<AgentView>,
    /// Cells holding food.
    pub food: Vec<Cell>,
    /// Cells holding wood.
    pub wood: Vec<Cell>,
    /// Cells with a growing food plant.
    pub plants: Vec<Cell>,
    /// Cells with a growing tree.
    pub trees: Vec<Cell>,
    /// Burning campfires with their remaining ticks.
    pub campfires: Vec<(Cell, u32)>,
    /// Standing homes.
    pub homes: Vec<HomeView>,
    /// Global knowledge pool.
    pub knowledge: BTreeMap<Skill, f64>,
    /// Aggregates for this tick.
    pub stats: PopulationStats,
    /// Death tallies since the start of the run.
    pub deaths: DeathTally,
}
