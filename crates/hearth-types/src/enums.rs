//! Enumeration types for the Hearth simulation.
//!
//! Behaviors, life stages, death causes, skills, and genes. All of them are
//! closed sets; adding a variant is a deliberate change to the simulation.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Behavior
// ---------------------------------------------------------------------------

/// The behavior an agent committed to for the current tick.
///
/// Chosen fresh every tick by the decision engine. A handful of states
/// (`Mating`, `Attacking`, `Communicating`, `SeekingLibrary`) are only ever
/// set while an action is executing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Behavior {
    /// Exploring with no pressing need.
    #[default]
    Wandering,
    /// Looking for food, eating carried food, or picking it up.
    Foraging,
    /// Collecting wood for a structure.
    GettingWood,
    /// Constructing a home on the current cell.
    Building,
    /// Drifting slowly to find a clear cell to build on.
    WanderingToBuild,
    /// Heading toward existing homes to settle near them.
    SeekingCommunity,
    /// Heading away to settle somewhere quiet.
    SeekingRemoteSpot,
    /// Restoring the durability of an owned home.
    RepairingHome,
    /// Taking ownership of an abandoned home.
    ClaimingHome,
    /// Feeding wood into a dying campfire.
    RefuelingCampfire,
    /// Lighting a new campfire on the current cell.
    BuildingCampfire,
    /// Walking home before planting food seeds.
    GoingHomeToFarm,
    /// Planting a food seed on the current cell.
    Planting,
    /// Walking home before planting a tree.
    GoingHomeToPlantWood,
    /// Planting a wood seed on the current cell.
    PlantingWood,
    /// Carrying spare food or wood to a needy neighbor.
    Sharing,
    /// Producing offspring with a partner.
    Mating,
    /// Attacking another agent on the same cell.
    Attacking,
    /// Hunting down the last attacker.
    Retaliating,
    /// Looking for company.
    SeekingSocial,
    /// Talking with a neighbor.
    Communicating,
    /// Crisis state: starving or isolated with no food in view or memory.
    Hopeless,
    /// Walking to the communal library.
    SeekingLibrary,
}

impl Behavior {
    /// Every behavior, in declaration order.
    pub const ALL: [Self; 23] = [
        Self::Wandering,
        Self::Foraging,
        Self::GettingWood,
        Self::Building,
        Self::WanderingToBuild,
        Self::SeekingCommunity,
        Self::SeekingRemoteSpot,
        Self::RepairingHome,
        Self::ClaimingHome,
        Self::RefuelingCampfire,
        Self::BuildingCampfire,
        Self::GoingHomeToFarm,
        Self::Planting,
        Self::GoingHomeToPlantWood,
        Self::PlantingWood,
        Self::Sharing,
        Self::Mating,
        Self::Attacking,
        Self::Retaliating,
        Self::SeekingSocial,
        Self::Communicating,
        Self::Hopeless,
        Self::SeekingLibrary,
    ];

    /// Single-character map glyph.
    pub const fn glyph(self) -> char {
        match self {
            Self::Wandering => 'A',
            Self::Foraging => 'f',
            Self::Building => 'b',
            Self::WanderingToBuild => 'B',
            Self::SeekingCommunity => 'C',
            Self::SeekingRemoteSpot => 'S',
            Self::GettingWood => 'w',
            Self::Planting | Self::PlantingWood => 'p',
            Self::GoingHomeToFarm | Self::GoingHomeToPlantWood => 'G',
            Self::Sharing => 'g',
            Self::BuildingCampfire => 'c',
            Self::RepairingHome => 'E',
            Self::ClaimingHome => 'k',
            Self::RefuelingCampfire => 'R',
            Self::Mating => 'm',
            Self::Attacking => 'X',
            Self::Retaliating => 'r',
            Self::SeekingSocial => 't',
            Self::Communicating => 'T',
            Self::SeekingLibrary => 'L',
            Self::Hopeless => 's',
        }
    }

    /// Stable upper-case label used in logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wandering => "WANDERING",
            Self::Foraging => "FORAGING",
            Self::GettingWood => "GETTING_WOOD",
            Self::Building => "BUILDING",
            Self::WanderingToBuild => "WANDERING_TO_BUILD",
            Self::SeekingCommunity => "SEEKING_COMMUNITY",
            Self::SeekingRemoteSpot => "SEEKING_REMOTE_SPOT",
            Self::RepairingHome => "REPAIRING_HOME",
            Self::ClaimingHome => "CLAIMING_HOME",
            Self::RefuelingCampfire => "REFUELING_CAMPFIRE",
            Self::BuildingCampfire => "BUILDING_CAMPFIRE",
            Self::GoingHomeToFarm => "GOING_HOME_TO_FARM",
            Self::Planting => "PLANTING",
            Self::GoingHomeToPlantWood => "GOING_HOME_TO_PLANT_WOOD",
            Self::PlantingWood => "PLANTING_WOOD",
            Self::Sharing => "SHARING",
            Self::Mating => "MATING",
            Self::Attacking => "ATTACKING",
            Self::Retaliating => "RETALIATING",
            Self::SeekingSocial => "SEEKING_SOCIAL",
            Self::Communicating => "COMMUNICATING",
            Self::Hopeless => "HOPELESS",
            Self::SeekingLibrary => "SEEKING_LIBRARY",
        }
    }
}

impl core::fmt::Display for Behavior {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Life stage
// ---------------------------------------------------------------------------

/// Coarse age bracket of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LifeStage {
    /// Below adult age; depends on parents and cannot mate.
    Child,
    /// Fully capable.
    Adult,
    /// Past old age; frail when hungry.
    Old,
}

impl LifeStage {
    /// Classify an age given the adult and old-age thresholds.
    pub const fn for_age(age: u32, adult_age: u32, old_age: u32) -> Self {
        if age < adult_age {
            Self::Child
        } else if age < old_age {
            Self::Adult
        } else {
            Self::Old
        }
    }
}

// ---------------------------------------------------------------------------
// Death cause
// ---------------------------------------------------------------------------

/// Why an agent died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    /// Reached the maximum age.
    MaxAge,
    /// Old and too hungry to go on.
    Frailty,
    /// A child whose energy fell below the child starvation line.
    StarvationChild,
    /// An adult whose energy ran out.
    StarvationAdult,
    /// Energy ran out while carrying an unanswered attack.
    Combat,
}

impl DeathCause {
    /// Every cause, in reporting order.
    pub const ALL: [Self; 5] = [
        Self::MaxAge,
        Self::Frailty,
        Self::StarvationChild,
        Self::StarvationAdult,
        Self::Combat,
    ];

    /// Upper-case reporting label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::MaxAge => "MAX_AGE",
            Self::Frailty => "NATURAL_DEATH_OLD",
            Self::StarvationChild => "STARVATION_CHILD",
            Self::StarvationAdult => "STARVATION_ADULT",
            Self::Combat => "COMBAT",
        }
    }
}

impl core::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

/// A learned proficiency. Skills start at zero and grow through use,
/// teaching, and the communal library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Skill {
    /// More energy and seeds from eating.
    Foraging,
    /// Bigger social gains from conversation.
    Social,
    /// Cheaper homes and campfires.
    Building,
    /// Cheaper movement.
    Navigation,
    /// Cheaper, harder attacks.
    Combat,
    /// Planting practice.
    Farming,
}

impl Skill {
    /// Every skill.
    pub const ALL: [Self; 6] = [
        Self::Foraging,
        Self::Social,
        Self::Building,
        Self::Navigation,
        Self::Combat,
        Self::Farming,
    ];

    /// Skills exchanged during conversation. Social skill grows on its own
    /// from talking and is not taught.
    pub const TEACHABLE: [Self; 5] = [
        Self::Foraging,
        Self::Building,
        Self::Navigation,
        Self::Farming,
        Self::Combat,
    ];

    /// Lower-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Foraging => "foraging",
            Self::Social => "social",
            Self::Building => "building",
            Self::Navigation => "navigation",
            Self::Combat => "combat",
            Self::Farming => "farming",
        }
    }
}

impl core::fmt::Display for Skill {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Genes
// ---------------------------------------------------------------------------

/// A heritable trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gene {
    /// Sight radius in cells.
    Vision,
    /// Steps per move.
    Speed,
    /// Base energy burned per tick.
    Metabolism,
    /// Base chance of attacking a cellmate.
    Aggression,
    /// Tendency to build homes, trees, and campfires.
    Builder,
    /// Energy required before mating.
    MatingDrive,
    /// Need for company.
    Sociability,
    /// Tendency to plant food.
    Farming,
}

impl Gene {
    /// Every gene.
    pub const ALL: [Self; 8] = [
        Self::Vision,
        Self::Speed,
        Self::Metabolism,
        Self::Aggression,
        Self::Builder,
        Self::MatingDrive,
        Self::Sociability,
        Self::Farming,
    ];

    /// Lower-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vision => "vision",
            Self::Speed => "speed",
            Self::Metabolism => "metabolism",
            Self::Aggression => "aggression",
            Self::Builder => "builder",
            Self::MatingDrive => "mating_drive",
            Self::Sociability => "sociability",
            Self::Farming => "farming",
        }
    }
}

impl core::fmt::Display for Gene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
