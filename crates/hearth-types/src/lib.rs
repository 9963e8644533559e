//! Shared type definitions for the Hearth simulation.
//!
//! Every crate in the workspace speaks in these types. Nothing here owns
//! simulation logic.
//!
//! # Modules
//!
//! - [`ids`] -- Agent identifiers and grid cells
//! - [`enums`] -- Behaviors, life stages, death causes, skills, genes
//! - [`structs`] -- Statistics and the read-only world snapshot

pub mod enums;
pub mod ids;
pub mod structs;

pub use enums::{Behavior, DeathCause, Gene, LifeStage, Skill};
pub use ids::{AgentId, Cell};
pub use structs::{AgentView, DeathTally, HomeView, PopulationStats, WorldSnapshot};
