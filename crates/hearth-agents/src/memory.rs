//! Remembered resource locations.
//!
//! Agents log food and wood they see while wandering and head back for it
//! when hungry or short of wood. Entries are forgotten once the agent picks
//! the resource up or arrives to find it gone.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use hearth_types::Cell;

/// Cells an agent believes hold food or wood.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMemory {
    /// Remembered food cells.
    pub food: BTreeSet<Cell>,
    /// Remembered wood cells.
    pub wood: BTreeSet<Cell>,
}

impl ResourceMemory {
    /// Record visible food cells.
    pub fn remember_food(&mut self, cells: impl IntoIterator<Item = Cell>) {
        self.food.extend(cells);
    }

    /// Record visible wood cells.
    pub fn remember_wood(&mut self, cells: impl IntoIterator<Item = Cell>) {
        self.wood.extend(cells);
    }

    /// Drop a food cell.
    pub fn forget_food(&mut self, cell: Cell) {
        self.food.remove(&cell);
    }

    /// Drop a wood cell.
    pub fn forget_wood(&mut self, cell: Cell) {
        self.wood.remove(&cell);
    }
}
