//! Per-tick timers for world objects.
//!
//! Runs once per tick after agents have acted and resources have spawned.
//! Order matters and is fixed:
//!
//! 1. Growing plants count down and become food.
//! 2. Growing trees count down and become wood.
//! 3. Food piles spoil.
//! 4. Campfires burn down.
//! 5. On decay ticks, every home loses one durability; collapsed homes
//!    leave salvage wood behind.
//!
//! A maturing plant or tree is lost if its cell has meanwhile received
//! food, wood, or a home.

use std::collections::BTreeMap;

use tracing::{debug, info};

use hearth_types::{AgentId, Cell};

use crate::config::WorldConfig;
use crate::spawning::is_due;
use crate::terrain::Terrain;

/// What changed while advancing world timers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LifecycleReport {
    /// Plants that turned into food.
    pub plants_matured: u32,
    /// Trees that turned into wood.
    pub trees_matured: u32,
    /// Growths discarded because their cell was taken.
    pub growth_blocked: u32,
    /// Food piles that spoiled.
    pub food_spoiled: u32,
    /// Campfires that burned out.
    pub campfires_extinguished: u32,
    /// Homes that collapsed, with their last owner.
    pub collapsed_homes: Vec<(Cell, Option<AgentId>)>,
}

/// Advance every world-object timer by one tick.
pub fn advance_timers(terrain: &mut Terrain, tick: u64, config: &WorldConfig) -> LifecycleReport {
    let mut report = LifecycleReport::default();

    // 1-2. Growth
    for cell in count_down(&mut terrain.plants) {
        if growth_blocked(terrain, cell) {
            report.growth_blocked = report.growth_blocked.saturating_add(1);
        } else if terrain.add_food(cell, 1, config.food_freshness) {
            report.plants_matured = report.plants_matured.saturating_add(1);
        }
    }
    for cell in count_down(&mut terrain.trees) {
        if growth_blocked(terrain, cell) {
            report.growth_blocked = report.growth_blocked.saturating_add(1);
        } else if terrain.add_wood(cell, 1) {
            report.trees_matured = report.trees_matured.saturating_add(1);
        }
    }

    // 3. Spoilage
    let before = terrain.food.len();
    terrain.food.retain(|_, pile| {
        pile.freshness = pile.freshness.saturating_sub(1);
        pile.freshness > 0
    });
    report.food_spoiled = u32::try_from(before.saturating_sub(terrain.food.len())).unwrap_or(u32::MAX);

    // 4. Campfires
    let extinguished = count_down(&mut terrain.campfires);
    report.campfires_extinguished = u32::try_from(extinguished.len()).unwrap_or(u32::MAX);

    // 5. Home decay
    if is_due(tick, config.home_decay_period) {
        let mut collapsed = Vec::new();
        terrain.homes.retain(|cell, home| {
            home.durability = home.durability.saturating_sub(1);
            if home.durability == 0 {
                collapsed.push((*cell, home.owner));
                false
            } else {
                true
            }
        });
        for (cell, owner) in &collapsed {
            terrain.add_wood(*cell, config.home_salvage_wood);
            info!(tick, cell = %cell, owner = ?owner, "Home collapsed");
        }
        report.collapsed_homes = collapsed;
    }

    if report.plants_matured > 0 || report.trees_matured > 0 || report.food_spoiled > 0 {
        debug!(
            tick,
            plants = report.plants_matured,
            trees = report.trees_matured,
            blocked = report.growth_blocked,
            spoiled = report.food_spoiled,
            fires_out = report.campfires_extinguished,
            "World timers advanced"
        );
    }
    report
}

/// Decrement every timer and remove the ones that reach zero, returning
/// their cells in order.
fn count_down(timers: &mut BTreeMap<Cell, u32>) -> Vec<Cell> {
    let mut expired = Vec::new();
    timers.retain(|cell, remaining| {
        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            expired.push(*cell);
            false
        } else {
            true
        }
    });
    expired
}

fn growth_blocked(terrain: &Terrain, cell: Cell) -> bool {
    terrain.has_food(cell) || terrain.has_wood(cell) || terrain.home_at(cell).is_some()
}
