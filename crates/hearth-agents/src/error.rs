//! Error types for the `hearth-agents` crate.
//!
//! In-simulation refusals (no food to eat, target out of range) are not
//! errors; actions simply do nothing. These variants cover arena misuse.

use hearth_types::AgentId;

/// Errors raised by the population arena.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// An agent with this id is already in the arena.
    #[error("agent {0} is already in the population")]
    DuplicateAgent(AgentId),

    /// The id counter cannot advance further.
    #[error("agent id space exhausted")]
    IdOverflow,
}
