//! Learned proficiencies.
//!
//! Skills start at zero and only move through [`Skills::train`], which
//! clamps every result into `[0, cap]`. Sources of growth:
//!
//! - practice (eating, building, walking, fighting, planting, talking)
//! - lessons from a more skilled conversation partner
//! - slow drift toward the library's knowledge pool
//!
//! Skill effects are read directly by the actions that use them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use hearth_types::Skill;

use crate::config::SkillCaps;

/// One agent's skill levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    levels: BTreeMap<Skill, f64>,
}

impl Default for Skills {
    fn default() -> Self {
        Self {
            levels: Skill::ALL.iter().map(|s| (*s, 0.0)).collect(),
        }
    }
}

impl Skills {
    /// Current level of `skill`.
    pub fn get(&self, skill: Skill) -> f64 {
        self.levels.get(&skill).copied().unwrap_or(0.0)
    }

    /// Add `amount` to `skill`, clamped to `[0, cap]`. Returns the new level.
    pub fn train(&mut self, skill: Skill, amount: f64, caps: &SkillCaps) -> f64 {
        let cap = caps.cap(skill);
        let entry = self.levels.entry(skill).or_insert(0.0);
        *entry = (*entry + amount).clamp(0.0, cap);
        *entry
    }

    /// Nudge every skill that trails the pool up by `rate`.
    pub fn drift_toward(
        &mut self,
        pool: &BTreeMap<Skill, f64>,
        rate: f64,
        caps: &SkillCaps,
    ) {
        for skill in Skill::ALL {
            let global = pool.get(&skill).copied().unwrap_or(0.0);
            if self.get(skill) < global {
                self.train(skill, rate, caps);
            }
        }
    }

    /// Every level, in skill order.
    pub const fn levels(&self) -> &BTreeMap<Skill, f64> {
        &self.levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let skills = Skills::default();
        for skill in Skill::ALL {
            assert!(skills.get(skill).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn training_clamps_to_cap() {
        let caps = SkillCaps::default();
        let mut skills = Skills::default();
        for _ in 0..30 {
            skills.train(Skill::Building, 0.5, &caps);
        }
        assert!((skills.get(Skill::Building) - 4.0).abs() < f64::EPSILON);
        let level = skills.train(Skill::Combat, -1.0, &caps);
        assert!(level.abs() < f64::EPSILON);
    }

    #[test]
    fn drift_only_raises_trailing_skills() {
        let caps = SkillCaps::default();
        let mut skills = Skills::default();
        skills.train(Skill::Foraging, 3.0, &caps);
        let pool: BTreeMap<Skill, f64> = [(Skill::Foraging, 1.0), (Skill::Building, 5.0)]
            .into_iter()
            .collect();
        skills.drift_toward(&pool, 0.0001, &caps);
        assert!((skills.get(Skill::Foraging) - 3.0).abs() < f64::EPSILON);
        assert!((skills.get(Skill::Building) - 0.0001).abs() < 1e-12);
        assert!(skills.get(Skill::Combat).abs() < f64::EPSILON);
    }
}
