//! Concrete actions an agent can perform on itself, the terrain, or a
//! partner.
//!
//! Each action checks its own preconditions and does nothing (returning
//! `false` or `None`) when they fail. Actions that finish a task set the
//! agent's behavior back to [`hearth_types::Behavior::Wandering`], so the
//! renderer shows what the agent ended the tick doing.
//!
//! # Submodules
//!
//! - [`gather`] -- Eating, picking up food and wood, planting.
//! - [`build`] -- Homes and campfires: building, repairing, refueling, claiming.
//! - [`combat`] -- Aggression checks and attacks.
//! - [`social`] -- Conversation, teaching, communal planting, mating, sharing.

pub mod build;
pub mod combat;
pub mod gather;
pub mod social;
