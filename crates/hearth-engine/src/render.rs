//! Plain-text presentation of a [`WorldSnapshot`].
//!
//! The grid is drawn in layers, each overwriting the last: agents (except
//! those resting at home), food, wood, growing plants and trees, campfires,
//! homes, and finally the library. Below it come the legend, population
//! statistics, gene and skill averages, the knowledge pool, and the death
//! analysis.

use std::io::Write;

use tracing::warn;

use hearth_core::config::PresentationConfig;
use hearth_core::{Simulation, SimulationEndReason, TickCallback, TickSummary};
use hearth_types::{Behavior, Cell, DeathTally, Gene, Skill, WorldSnapshot};

/// Move the cursor to the top-left without clearing, so frames overwrite.
const CURSOR_HOME: &str = "\x1b[H";

/// Clear the whole screen.
const CLEAR_SCREEN: &str = "\x1b[2J";

/// Homes below this durability are drawn as damaged.
const DAMAGED_BELOW: u32 = 2;

/// Render a full frame.
pub fn render(snapshot: &WorldSnapshot) -> String {
    let mut lines = vec![format!(
        "--- Hearth --- Tick: {} --- Generation: {} ---",
        snapshot.tick, snapshot.generation
    )];
    lines.extend(grid_rows(snapshot));
    lines.extend(legend());
    lines.extend(stats_section(snapshot));
    lines.extend(death_section(&snapshot.deaths));
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

fn grid_rows(snapshot: &WorldSnapshot) -> Vec<String> {
    let width = usize::try_from(snapshot.width).unwrap_or(0);
    let height = usize::try_from(snapshot.height).unwrap_or(0);
    let mut grid = vec![vec!['.'; width]; height];

    for agent in snapshot.agents.iter().filter(|a| !a.at_home) {
        put(&mut grid, agent.cell, agent.behavior.glyph());
    }
    for cell in &snapshot.food {
        put(&mut grid, *cell, 'F');
    }
    for cell in &snapshot.wood {
        put(&mut grid, *cell, 'W');
    }
    for cell in &snapshot.plants {
        put(&mut grid, *cell, 'P');
    }
    for cell in &snapshot.trees {
        put(&mut grid, *cell, 'T');
    }
    for (cell, _) in &snapshot.campfires {
        put(&mut grid, *cell, 'C');
    }
    for home in &snapshot.homes {
        let glyph = if home.durability < DAMAGED_BELOW { 'h' } else { 'H' };
        put(&mut grid, home.cell, glyph);
    }
    put(&mut grid, snapshot.library, 'L');

    grid.iter()
        .map(|row| {
            row.iter()
                .map(char::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn put(grid: &mut [Vec<char>], cell: Cell, glyph: char) {
    let (Ok(x), Ok(y)) = (usize::try_from(cell.x), usize::try_from(cell.y)) else {
        return;
    };
    if let Some(slot) = grid.get_mut(y).and_then(|row| row.get_mut(x)) {
        *slot = glyph;
    }
}

// ---------------------------------------------------------------------------
// Text sections
// ---------------------------------------------------------------------------

fn legend() -> Vec<String> {
    let entry = |b: Behavior, text: &str| format!(" {}: {text}", b.glyph());
    vec![
        String::new(),
        "--- LEGEND ---".to_owned(),
        [
            entry(Behavior::Wandering, "Wander"),
            entry(Behavior::Foraging, "Forage"),
            entry(Behavior::SeekingLibrary, "Library"),
            entry(Behavior::Hopeless, "Hopeless"),
        ]
        .join(" | "),
        [
            entry(Behavior::SeekingSocial, "Seek Social"),
            entry(Behavior::Communicating, "Communicate"),
            entry(Behavior::Sharing, "Share Wood/Food"),
        ]
        .join(" | "),
        [
            entry(Behavior::Attacking, "Attack"),
            entry(Behavior::Retaliating, "Retaliate"),
            entry(Behavior::Mating, "Mate"),
        ]
        .join(" | "),
        [
            entry(Behavior::GettingWood, "Get Wood"),
            entry(Behavior::Building, "Build Home"),
            entry(Behavior::RepairingHome, "Repair Home"),
        ]
        .join(" | "),
        [
            entry(Behavior::WanderingToBuild, "Seek Spot"),
            entry(Behavior::SeekingCommunity, "Seek Comm."),
            entry(Behavior::SeekingRemoteSpot, "Seek Remote"),
            entry(Behavior::ClaimingHome, "Claim Home"),
        ]
        .join(" | "),
        [
            entry(Behavior::BuildingCampfire, "Build Fire"),
            entry(Behavior::RefuelingCampfire, "Refuel Fire"),
            entry(Behavior::Planting, "Plant Food/Tree"),
            entry(Behavior::GoingHomeToFarm, "Go Home to Plant"),
        ]
        .join(" | "),
        " F: Food | P: Plant | T: Tree | W: Wood".to_owned(),
        " H: Home | h: Damaged Home | C: Campfire | L: Library".to_owned(),
    ]
}

fn stats_section(snapshot: &WorldSnapshot) -> Vec<String> {
    let stats = &snapshot.stats;
    let buffed = snapshot.agents.iter().filter(|a| a.buffed).count();
    let mut lines = vec![
        String::new(),
        "--- SIMULATION STATS ---".to_owned(),
        format!(
            "Population: {:<3}   |   Homes Built: {:<3}   |   Active Campfires: {:<3}   |   Wellbeing: {buffed}",
            stats.population, stats.homes_built, stats.active_campfires
        ),
        "--- AVERAGE GENES ---".to_owned(),
    ];
    for gene in Gene::ALL {
        let value = stats.gene(gene);
        let shown = if gene == Gene::MatingDrive {
            format!("{value:>6.0}")
        } else {
            format!("{value:>6.2}")
        };
        lines.push(format!("  {:<13}{shown} ({})", gene_title(gene), gene_hint(gene)));
    }
    lines.push("--- AVERAGE SKILLS ---".to_owned());
    for skill in Skill::ALL {
        lines.push(format!(
            "  {:<13}{:>6.2}",
            skill_title(skill),
            stats.skill(skill)
        ));
    }
    lines.push(String::new());
    lines.push("--- KNOWLEDGE LIBRARY ---".to_owned());
    let pool: Vec<String> = Skill::ALL
        .iter()
        .map(|skill| {
            let level = snapshot.knowledge.get(skill).copied().unwrap_or(0.0);
            format!("{}: {level:>5.2}", skill_title(*skill))
        })
        .collect();
    for pair in pool.chunks(3) {
        lines.push(format!("  {}", pair.join(" | ")));
    }
    lines
}

fn death_section(deaths: &DeathTally) -> Vec<String> {
    let mut lines = vec![String::new(), "--- DEATH ANALYSIS ---".to_owned()];
    let total = deaths.total();
    if total == 0 {
        lines.push("  No deaths recorded yet.".to_owned());
        return lines;
    }
    for (cause, count) in deaths.iter() {
        lines.push(format!(
            "  {:<20}: {count} ({:>5.1}%)",
            cause.label(),
            percent(count, total)
        ));
    }
    lines
}

#[allow(clippy::cast_precision_loss)]
fn percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

const fn gene_title(gene: Gene) -> &'static str {
    match gene {
        Gene::Vision => "Vision:",
        Gene::Speed => "Speed:",
        Gene::Metabolism => "Metabolism:",
        Gene::Aggression => "Aggression:",
        Gene::Builder => "Builder:",
        Gene::MatingDrive => "MatingDrive:",
        Gene::Sociability => "Sociability:",
        Gene::Farming => "Farming:",
    }
}

const fn gene_hint(gene: Gene) -> &'static str {
    match gene {
        Gene::Vision => "how far they see",
        Gene::Speed => "how fast they move",
        Gene::Metabolism => "energy burn, lower is better",
        Gene::Aggression => "chance to attack others",
        Gene::Builder => "tendency to build",
        Gene::MatingDrive => "energy needed to mate",
        Gene::Sociability => "need to be social",
        Gene::Farming => "tendency to plant seeds",
    }
}

const fn skill_title(skill: Skill) -> &'static str {
    match skill {
        Skill::Foraging => "Foraging:",
        Skill::Social => "Social:",
        Skill::Building => "Building:",
        Skill::Navigation => "Navigation:",
        Skill::Combat => "Combat:",
        Skill::Farming => "Farming:",
    }
}

// ---------------------------------------------------------------------------
// Terminal callback
// ---------------------------------------------------------------------------

/// Draws frames to stdout from the run loop.
pub struct TerminalRenderer {
    enabled: bool,
    every: u64,
}

impl TerminalRenderer {
    /// A renderer honoring the presentation settings.
    pub const fn new(config: &PresentationConfig) -> Self {
        Self {
            enabled: config.render,
            every: config.render_every,
        }
    }

    /// Clear the screen before the first frame.
    pub fn start(&self) -> std::io::Result<()> {
        if self.enabled {
            let mut out = std::io::stdout().lock();
            out.write_all(CLEAR_SCREEN.as_bytes())?;
            out.flush()?;
        }
        Ok(())
    }

    /// Draw the last frame and the end-of-run message.
    pub fn finish(&self, sim: &Simulation, reason: SimulationEndReason) -> std::io::Result<()> {
        let mut out = std::io::stdout().lock();
        if self.enabled {
            draw(&mut out, &render(&sim.snapshot()))?;
        }
        writeln!(out, "\n--- SIMULATION END: {} ---", reason.message())?;
        out.flush()
    }

    const fn due(&self, tick: u64) -> bool {
        self.enabled && matches!(tick.checked_rem(self.every), Some(0))
    }
}

impl TickCallback for TerminalRenderer {
    fn on_tick(&mut self, summary: &TickSummary, sim: &Simulation) {
        if !self.due(summary.tick) {
            return;
        }
        let frame = render(&sim.snapshot());
        if let Err(err) = draw(&mut std::io::stdout().lock(), &frame) {
            warn!(tick = summary.tick, error = %err, "Failed to draw frame");
        }
    }
}

fn draw(out: &mut impl Write, frame: &str) -> std::io::Result<()> {
    out.write_all(CURSOR_HOME.as_bytes())?;
    out.write_all(frame.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use hearth_types::{AgentId, AgentView, DeathCause, HomeView, LifeStage, PopulationStats};

    use super::*;

    fn empty_snapshot() -> WorldSnapshot {
        WorldSnapshot {
            tick: 7,
            generation: 0,
            width: 6,
            height: 4,
            library: Cell::new(3, 2),
            agents: Vec::new(),
            food: Vec::new(),
            wood: Vec::new(),
            plants: Vec::new(),
            trees: Vec::new(),
            campfires: Vec::new(),
            homes: Vec::new(),
            knowledge: BTreeMap::new(),
            stats: PopulationStats::default(),
            deaths: DeathTally::default(),
        }
    }

    fn agent(id: u64, cell: Cell, behavior: Behavior, at_home: bool) -> AgentView {
        AgentView {
            id: AgentId(id),
            cell,
            behavior,
            stage: LifeStage::Adult,
            energy: 100.0,
            social: 50.0,
            buffed: false,
            at_home,
        }
    }

    fn row(frame: &str, y: usize) -> String {
        frame.lines().nth(y + 1).unwrap().to_owned()
    }

    #[test]
    fn header_and_library() {
        let frame = render(&empty_snapshot());
        assert!(frame.starts_with("--- Hearth --- Tick: 7 --- Generation: 0 ---"));
        assert_eq!(row(&frame, 2), ". . . L . .");
        assert_eq!(row(&frame, 0), ". . . . . .");
    }

    #[test]
    fn layers_overwrite_in_order() {
        let mut snap = empty_snapshot();
        snap.agents.push(agent(1, Cell::new(0, 0), Behavior::Foraging, false));
        snap.agents.push(agent(2, Cell::new(1, 0), Behavior::Wandering, false));
        snap.food.push(Cell::new(1, 0));
        snap.trees.push(Cell::new(2, 0));
        snap.campfires.push((Cell::new(3, 0), 50));
        snap.homes.push(HomeView {
            cell: Cell::new(4, 0),
            owner: None,
            durability: 1,
        });
        snap.homes.push(HomeView {
            cell: Cell::new(5, 0),
            owner: Some(AgentId(3)),
            durability: 3,
        });
        let frame = render(&snap);
        assert_eq!(row(&frame, 0), "f F T C h H");
    }

    #[test]
    fn agents_at_home_are_hidden() {
        let mut snap = empty_snapshot();
        snap.agents.push(agent(1, Cell::new(0, 1), Behavior::Wandering, true));
        let frame = render(&snap);
        assert_eq!(row(&frame, 1), ". . . . . .");
    }

    #[test]
    fn death_analysis_percentages() {
        let mut deaths = DeathTally::default();
        deaths.record(DeathCause::MaxAge);
        deaths.record(DeathCause::MaxAge);
        deaths.record(DeathCause::MaxAge);
        deaths.record(DeathCause::Combat);
        let lines = death_section(&deaths);
        assert!(lines.iter().any(|l| l.contains("MAX_AGE") && l.contains("3 ( 75.0%)")));
        assert!(lines.iter().any(|l| l.contains("COMBAT") && l.contains("1 ( 25.0%)")));
    }

    #[test]
    fn no_deaths_message() {
        let frame = render(&empty_snapshot());
        assert!(frame.contains("No deaths recorded yet."));
    }

    #[test]
    fn render_cadence() {
        let renderer = TerminalRenderer {
            enabled: true,
            every: 5,
        };
        assert!(renderer.due(10));
        assert!(!renderer.due(11));
        let off = TerminalRenderer {
            enabled: false,
            every: 1,
        };
        assert!(!off.due(10));
    }
}
