//! Core simulation engine for the Hearth artificial-life simulation.
//!
//! This crate owns the world tick: it seeds the grid, runs every agent's
//! turn in order, advances world timers, and reports statistics and
//! read-only snapshots. The async run loop around it paces ticks and
//! decides when the run is over.
//!
//! # Modules
//!
//! - [`clock`] -- Tick counter and derived generation.
//! - [`config`] -- Run settings loaded from YAML.
//! - [`operator`] -- Shared stop flag, pacing, and limits.
//! - [`runner`] -- The async run loop.
//! - [`simulation`] -- Bootstrap, the tick orchestrator, snapshots, and
//!   termination.
//! - [`stats`] -- End-of-tick population statistics.

pub mod clock;
pub mod config;
pub mod operator;
pub mod runner;
pub mod simulation;
pub mod stats;

pub use clock::{ClockError, SimClock};
pub use config::{ConfigError, SimulationConfig};
pub use operator::{OperatorState, SimulationEndReason};
pub use runner::{NoOpCallback, RunnerError, SimulationResult, TickCallback, run_simulation};
pub use simulation::{Simulation, SimulationError, Termination, TickSummary};
