//! Fixed parameters for world objects.
//!
//! [`WorldConfig`] bundles every constant that governs resources and
//! structures: spawn cadence, growth, spoilage, campfire burn, home decay,
//! and the communal knowledge pool. The core constructs it once with
//! [`Default`] and passes it by reference; there are no globals.

use serde::Serialize;

/// Constants for resources, structures, and the knowledge pool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldConfig {
    /// Ticks between food spawn waves (default: 25).
    pub food_spawn_period: u64,

    /// Food placement attempts per wave (default: 5).
    pub food_spawn_batch: u32,

    /// Food cells allowed as a fraction of map area (default: 0.1).
    pub food_cap_fraction: f64,

    /// Ticks between wood spawn waves (default: 80).
    pub wood_spawn_period: u64,

    /// Wood placement attempts per wave (default: 3).
    pub wood_spawn_batch: u32,

    /// Wood cells allowed as a fraction of map area (default: 0.05).
    pub wood_cap_fraction: f64,

    /// Ticks a food pile stays edible (default: 185).
    pub food_freshness: u32,

    /// Ticks for a planted seed to become food (default: 10).
    pub plant_grow_ticks: u32,

    /// Ticks for a planted tree to become wood (default: 10).
    pub tree_grow_ticks: u32,

    /// Ticks a campfire burns when lit or refueled (default: 300).
    pub campfire_burn_ticks: u32,

    /// Remaining burn below which a campfire wants fuel (default: 100).
    pub campfire_refuel_threshold: u32,

    /// Durability of a new or fully repaired home (default: 3).
    pub home_durability: u32,

    /// Ticks between home decay passes (default: 400).
    pub home_decay_period: u64,

    /// Wood left behind when a home collapses (default: 3).
    pub home_salvage_wood: u32,

    /// Tries to find a clear, unoccupied cell before giving up (default: 10).
    pub empty_cell_attempts: u32,

    /// Food cell count below which agents plant communally (default: 120).
    pub food_scarcity_threshold: usize,

    /// Wood cell count below which agents plant trees (default: 80).
    pub wood_scarcity_threshold: usize,

    /// Building knowledge the library starts with (default: 5.0).
    pub initial_building_knowledge: f64,

    /// Ceiling for any knowledge pool entry (default: 10.0).
    pub knowledge_cap: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            food_spawn_period: 25,
            food_spawn_batch: 5,
            food_cap_fraction: 0.1,
            wood_spawn_period: 80,
            wood_spawn_batch: 3,
            wood_cap_fraction: 0.05,
            food_freshness: 185,
            plant_grow_ticks: 10,
            tree_grow_ticks: 10,
            campfire_burn_ticks: 300,
            campfire_refuel_threshold: 100,
            home_durability: 3,
            home_decay_period: 400,
            home_salvage_wood: 3,
            empty_cell_attempts: 10,
            food_scarcity_threshold: 120,
            wood_scarcity_threshold: 80,
            initial_building_knowledge: 5.0,
            knowledge_cap: 10.0,
        }
    }
}
