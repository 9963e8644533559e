//! Identifiers and grid coordinates.
//!
//! Agents are identified by a monotonically assigned [`AgentId`]; ids are
//! never reused within a run. Every positioned thing in the world lives on a
//! [`Cell`] of the rectangular grid.

use serde::{Deserialize, Serialize};

/// Unique identifier for an agent in the simulation.
///
/// Ids start at 1 and are handed out in creation order, so ordering by id
/// is ordering by birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u64);

impl AgentId {
    /// Return the inner numeric value.
    pub const fn into_inner(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for AgentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for AgentId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A grid coordinate. `(0, 0)` is the top-left corner.
///
/// Cells order by `x` then `y`, which makes them usable as `BTreeMap` keys
/// with a stable iteration order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Cell {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Cell {
    /// Create a cell from its column and row.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another cell.
    pub fn distance_to(self, other: Self) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy)
    }

    /// The cell one unit closer to `target` on each axis that differs.
    pub const fn step_toward(self, target: Self) -> Self {
        Self {
            x: self.x.saturating_add((target.x.saturating_sub(self.x)).signum()),
            y: self.y.saturating_add((target.y.saturating_sub(self.y)).signum()),
        }
    }

    /// The cell offset by `(dx, dy)`, saturating at the integer bounds.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl core::fmt::Display for Cell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
