//! Agent state, needs, decisions, and actions for the Hearth simulation.
//!
//! This crate is the logic layer for agents. It owns the [`Population`]
//! arena and everything that happens during one agent's turn; the tick
//! orchestrator in `hearth-core` decides whose turn it is.
//!
//! # Modules
//!
//! - [`actions`] -- Gathering, building, combat, and social actions.
//! - [`agent`] -- The [`Agent`] entity and its [`Inventory`].
//! - [`config`] -- Fixed agent constants ([`AgentConfig`]).
//! - [`context`] -- [`TickContext`], mutable world access during a turn.
//! - [`death`] -- Death consequences ([`DeathConsequences`]).
//! - [`decision`] -- The pure priority chain ([`decide`]).
//! - [`error`] -- Error types for arena operations ([`AgentError`]).
//! - [`execute`] -- Carrying out the chosen behavior.
//! - [`genome`] -- Heritable traits, ranges, and crossover.
//! - [`memory`] -- Remembered food and wood cells.
//! - [`movement`] -- Directed, random, and exploring movement.
//! - [`perception`] -- What an agent sees ([`Perception`]).
//! - [`population`] -- The id-keyed agent arena.
//! - [`skills`] -- Learned proficiencies with per-skill caps.
//! - [`update`] -- One agent's full turn ([`update_agent`]).
//! - [`vitals`] -- Per-tick needs: aging, metabolism, buffs, struggle.

pub mod actions;
pub mod agent;
pub mod config;
pub mod context;
pub mod death;
pub mod decision;
pub mod error;
pub mod execute;
pub mod genome;
pub mod memory;
pub mod movement;
pub mod perception;
pub mod population;
pub mod skills;
pub mod update;
pub mod vitals;

#[cfg(test)]
mod fixtures;

pub use agent::{Agent, Inventory};
pub use config::AgentConfig;
pub use context::TickContext;
pub use death::{DeathConsequences, process_death};
pub use decision::{DecisionRolls, decide};
pub use error::AgentError;
pub use genome::Genome;
pub use perception::{Perception, perceive};
pub use population::Population;
pub use update::{UpdateReport, update_agent};
