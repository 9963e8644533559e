//! Grid terrain, resources, and structures for the Hearth simulation.
//!
//! This crate models the physical world: a rectangular grid whose cells can
//! hold food, wood, growing plants and trees, campfires, and homes, plus
//! the communal library and its knowledge pool.
//!
//! # Modules
//!
//! - [`config`] -- [`WorldConfig`], the fixed world constants.
//! - [`error`] -- Error types for grid construction and bootstrap.
//! - [`knowledge`] -- The ratcheting communal knowledge pool.
//! - [`lifecycle`] -- Growth, spoilage, campfire, and home decay timers.
//! - [`spatial`] -- Radius queries (nearest, within, neighbors).
//! - [`spawning`] -- Random placement of food and wood on clear cells.
//! - [`terrain`] -- The resource and structure layers themselves.

pub mod config;
pub mod error;
pub mod knowledge;
pub mod lifecycle;
pub mod spatial;
pub mod spawning;
pub mod terrain;

pub use config::WorldConfig;
pub use error::WorldError;
pub use knowledge::KnowledgePool;
pub use lifecycle::{LifecycleReport, advance_timers};
pub use spatial::{Located, Occupant};
pub use spawning::{SpawnReport, spawn_resources};
pub use terrain::{FoodPile, Home, Terrain};
