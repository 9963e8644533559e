//! Random placement of food and wood.
//!
//! Resources only ever appear on a clear cell that no agent is standing on.
//! Finding such a cell is a bounded number of random probes; a crowded map
//! simply yields fewer resources that wave.

use std::collections::BTreeSet;

use rand::Rng;
use tracing::debug;

use hearth_types::Cell;

use crate::config::WorldConfig;
use crate::terrain::Terrain;

/// Resources placed during one spawn pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnReport {
    /// Food piles created.
    pub food: u32,
    /// Wood piles created.
    pub wood: u32,
}

/// Probe up to `attempts` random cells for one that is clear and empty.
pub fn random_empty_cell(
    terrain: &Terrain,
    occupied: &BTreeSet<Cell>,
    attempts: u32,
    rng: &mut impl Rng,
) -> Option<Cell> {
    for _ in 0..attempts {
        let cell = Cell::new(
            rng.random_range(0..terrain.width()),
            rng.random_range(0..terrain.height()),
        );
        if terrain.is_clear(cell) && !occupied.contains(&cell) {
            return Some(cell);
        }
    }
    None
}

/// Place up to `count` fresh food piles. Returns how many landed.
pub fn scatter_food(
    terrain: &mut Terrain,
    count: u32,
    occupied: &BTreeSet<Cell>,
    config: &WorldConfig,
    rng: &mut impl Rng,
) -> u32 {
    let mut placed: u32 = 0;
    for _ in 0..count {
        if let Some(cell) = random_empty_cell(terrain, occupied, config.empty_cell_attempts, rng)
            && terrain.add_food(cell, 1, config.food_freshness)
        {
            placed = placed.saturating_add(1);
        }
    }
    placed
}

/// Place up to `count` wood piles. Returns how many landed.
pub fn scatter_wood(
    terrain: &mut Terrain,
    count: u32,
    occupied: &BTreeSet<Cell>,
    config: &WorldConfig,
    rng: &mut impl Rng,
) -> u32 {
    let mut placed: u32 = 0;
    for _ in 0..count {
        if let Some(cell) = random_empty_cell(terrain, occupied, config.empty_cell_attempts, rng)
            && terrain.add_wood(cell, 1)
        {
            placed = placed.saturating_add(1);
        }
    }
    placed
}

/// Run the periodic spawn waves for `tick`.
///
/// Food spawns on every `food_spawn_period`-th tick, one attempt at a time,
/// and each attempt is skipped once the map holds its cap of food cells.
/// Wood likewise on its own period.
pub fn spawn_resources(
    terrain: &mut Terrain,
    tick: u64,
    occupied: &BTreeSet<Cell>,
    config: &WorldConfig,
    rng: &mut impl Rng,
) -> SpawnReport {
    let mut report = SpawnReport::default();

    if is_due(tick, config.food_spawn_period) {
        for _ in 0..config.food_spawn_batch {
            if !below_cap(terrain.food_cell_count(), terrain.area(), config.food_cap_fraction) {
                break;
            }
            let placed = scatter_food(terrain, 1, occupied, config, rng);
            report.food = report.food.saturating_add(placed);
        }
    }

    if is_due(tick, config.wood_spawn_period) {
        for _ in 0..config.wood_spawn_batch {
            if !below_cap(terrain.wood_cell_count(), terrain.area(), config.wood_cap_fraction) {
                break;
            }
            let placed = scatter_wood(terrain, 1, occupied, config, rng);
            report.wood = report.wood.saturating_add(placed);
        }
    }

    if report.food > 0 || report.wood > 0 {
        debug!(tick, food = report.food, wood = report.wood, "Resources spawned");
    }
    report
}

/// Whether a periodic event fires on `tick`.
pub const fn is_due(tick: u64, period: u64) -> bool {
    matches!(tick.checked_rem(period), Some(0))
}

#[allow(clippy::cast_precision_loss)]
fn below_cap(count: usize, area: f64, fraction: f64) -> bool {
    (count as f64) < area * fraction
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::{SmallRng, StdRng};

    use super::*;

    #[test]
    fn empty_cell_avoids_agents_and_objects() {
        let mut terrain = Terrain::new(2, 1).unwrap();
        terrain.add_wood(Cell::new(0, 0), 1);
        let occupied = BTreeSet::new();
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..20 {
            if let Some(cell) = random_empty_cell(&terrain, &occupied, 10, &mut rng) {
                assert_eq!(cell, Cell::new(1, 0));
            }
        }

        let blocked: BTreeSet<Cell> = [Cell::new(1, 0)].into_iter().collect();
        assert_eq!(random_empty_cell(&terrain, &blocked, 50, &mut rng), None);
    }

    #[test]
    fn food_waves_follow_period() {
        let config = WorldConfig::default();
        let mut terrain = Terrain::new(70, 30).unwrap();
        let occupied = BTreeSet::new();
        let mut rng = SmallRng::seed_from_u64(1);

        let off = spawn_resources(&mut terrain, 24, &occupied, &config, &mut rng);
        assert_eq!(off, SpawnReport::default());

        let on = spawn_resources(&mut terrain, 25, &occupied, &config, &mut rng);
        assert!(on.food > 0);
        assert!(on.food <= config.food_spawn_batch);
        assert_eq!(on.wood, 0);
        assert_eq!(terrain.food_cell_count(), usize::try_from(on.food).unwrap());
    }

    #[test]
    fn wood_waves_follow_period() {
        let config = WorldConfig::default();
        let mut terrain = Terrain::new(70, 30).unwrap();
        let occupied = BTreeSet::new();
        let mut rng = SmallRng::seed_from_u64(2);

        let report = spawn_resources(&mut terrain, 80, &occupied, &config, &mut rng);
        assert!(report.wood > 0);
        assert_eq!(report.food, 0);
    }

    #[test]
    fn spawning_stops_at_cap() {
        let config = WorldConfig::default();
        let mut terrain = Terrain::new(10, 1).unwrap();
        terrain.add_food(Cell::new(0, 0), 1, 185);
        let occupied = BTreeSet::new();
        let mut rng = SmallRng::seed_from_u64(3);

        let report = spawn_resources(&mut terrain, 25, &occupied, &config, &mut rng);
        assert_eq!(report.food, 0);
    }

    #[test]
    fn wave_starting_one_below_cap_stops_at_cap() {
        let config = WorldConfig::default();
        let mut terrain = Terrain::new(70, 30).unwrap();
        // Caps on 70x30: 210 food cells, 105 wood cells.
        let mut cells = (0..30).flat_map(|y| (0..70).map(move |x| Cell::new(x, y)));
        for cell in cells.by_ref().take(209) {
            terrain.add_food(cell, 1, 185);
        }
        for cell in cells.by_ref().take(104) {
            terrain.add_wood(cell, 1);
        }
        let occupied = BTreeSet::new();
        let mut rng = StdRng::seed_from_u64(1);

        // Tick 400 is due for both waves.
        let report = spawn_resources(&mut terrain, 400, &occupied, &config, &mut rng);
        assert!(report.food <= 1);
        assert!(report.wood <= 1);
        assert!(terrain.food_cell_count() <= 210);
        assert!(terrain.wood_cell_count() <= 105);
    }

    #[test]
    fn repeated_waves_never_pass_the_cap() {
        let config = WorldConfig::default();
        let mut terrain = Terrain::new(20, 10).unwrap();
        let occupied = BTreeSet::new();
        let mut rng = SmallRng::seed_from_u64(4);
        for tick in (400..=40_000).step_by(400) {
            spawn_resources(&mut terrain, tick, &occupied, &config, &mut rng);
            assert!(terrain.food_cell_count() <= 20);
            assert!(terrain.wood_cell_count() <= 10);
        }
        assert_eq!(terrain.food_cell_count(), 20);
        assert_eq!(terrain.wood_cell_count(), 10);
    }

    #[test]
    fn periodic_check() {
        assert!(is_due(400, 400));
        assert!(!is_due(401, 400));
        assert!(!is_due(5, 0));
    }
}
