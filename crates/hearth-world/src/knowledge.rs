//! The communal knowledge pool kept at the library.
//!
//! Skilled agents deposit what they know while teaching, and every agent
//! slowly drifts toward the pool's level each tick. The pool only ratchets
//! upward: contributions raise an entry, nothing lowers it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use hearth_types::Skill;

use crate::config::WorldConfig;

/// Global per-skill knowledge levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgePool {
    levels: BTreeMap<Skill, f64>,
    cap: f64,
}

impl KnowledgePool {
    /// A pool seeded from the world constants: building starts ahead,
    /// everything else at zero.
    pub fn new(config: &WorldConfig) -> Self {
        let mut levels: BTreeMap<Skill, f64> = Skill::ALL.iter().map(|s| (*s, 0.0)).collect();
        levels.insert(
            Skill::Building,
            config.initial_building_knowledge.min(config.knowledge_cap),
        );
        Self {
            levels,
            cap: config.knowledge_cap,
        }
    }

    /// Current level of `skill`.
    pub fn level(&self, skill: Skill) -> f64 {
        self.levels.get(&skill).copied().unwrap_or(0.0)
    }

    /// Raise `skill` by `amount`, never past the cap and never downward.
    pub fn contribute(&mut self, skill: Skill, amount: f64) {
        let entry = self.levels.entry(skill).or_insert(0.0);
        let raised = (*entry + amount.max(0.0)).min(self.cap);
        *entry = entry.max(raised);
    }

    /// Every level, in skill order.
    pub const fn levels(&self) -> &BTreeMap<Skill, f64> {
        &self.levels
    }
}
