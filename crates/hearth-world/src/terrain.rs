//! The grid and everything lying on it.
//!
//! Each resource or structure kind is its own layer, a `BTreeMap` from
//! [`Cell`] to that kind's metadata. Using ordered maps keeps every scan in
//! a fixed order, which the simulation relies on for reproducible runs.
//!
//! Runtime operations never fail loudly. A refused placement or pickup
//! returns `false` and leaves the terrain untouched, so callers can treat
//! every action as a guarded no-op.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use hearth_types::{AgentId, Cell};

use crate::error::WorldError;

/// Edible food stacked on one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodPile {
    /// Units available for pickup.
    pub units: u32,
    /// Ticks until the pile spoils.
    pub freshness: u32,
}

/// A home standing on one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Home {
    /// Current owner, `None` when abandoned.
    pub owner: Option<AgentId>,
    /// Decay passes left before collapse.
    pub durability: u32,
}

/// The resource and structure layers of the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terrain {
    width: i32,
    height: i32,
    library: Cell,
    pub(crate) food: BTreeMap<Cell, FoodPile>,
    pub(crate) wood: BTreeMap<Cell, u32>,
    pub(crate) plants: BTreeMap<Cell, u32>,
    pub(crate) trees: BTreeMap<Cell, u32>,
    pub(crate) campfires: BTreeMap<Cell, u32>,
    pub(crate) homes: BTreeMap<Cell, Home>,
}

impl Terrain {
    /// Create an empty grid. The library sits at the center.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimensions`] if either side is below 1.
    pub fn new(width: i32, height: i32) -> Result<Self, WorldError> {
        if width < 1 || height < 1 {
            return Err(WorldError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            library: Cell::new(width / 2, height / 2),
            food: BTreeMap::new(),
            wood: BTreeMap::new(),
            plants: BTreeMap::new(),
            trees: BTreeMap::new(),
            campfires: BTreeMap::new(),
            homes: BTreeMap::new(),
        })
    }

    // -----------------------------------------------------------------------
    // Geometry
    // -----------------------------------------------------------------------

    /// Grid width in cells.
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells on the map.
    pub fn area(&self) -> f64 {
        f64::from(self.width) * f64::from(self.height)
    }

    /// The communal library cell.
    pub const fn library(&self) -> Cell {
        self.library
    }

    /// Whether `cell` lies on the grid.
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    /// Pull `cell` back onto the grid.
    pub fn clamp(&self, cell: Cell) -> Cell {
        Cell::new(
            cell.x.clamp(0, self.width.saturating_sub(1)),
            cell.y.clamp(0, self.height.saturating_sub(1)),
        )
    }

    /// Validate that `cell` lies on the grid.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] otherwise.
    pub const fn check(&self, cell: Cell) -> Result<Cell, WorldError> {
        if self.contains(cell) {
            Ok(cell)
        } else {
            Err(WorldError::OutOfBounds {
                cell,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// A cell is clear when no resource, growth, campfire, or home is on it.
    pub fn is_clear(&self, cell: Cell) -> bool {
        self.contains(cell)
            && !self.homes.contains_key(&cell)
            && !self.food.contains_key(&cell)
            && !self.wood.contains_key(&cell)
            && !self.plants.contains_key(&cell)
            && !self.trees.contains_key(&cell)
            && !self.campfires.contains_key(&cell)
    }

    // -----------------------------------------------------------------------
    // Food
    // -----------------------------------------------------------------------

    /// Whether any food lies on `cell`.
    pub fn has_food(&self, cell: Cell) -> bool {
        self.food.contains_key(&cell)
    }

    /// The food pile on `cell`, if any.
    pub fn food_at(&self, cell: Cell) -> Option<&FoodPile> {
        self.food.get(&cell)
    }

    /// Cells holding food, in cell order.
    pub fn food_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.food.keys().copied()
    }

    /// Number of cells holding food.
    pub fn food_cell_count(&self) -> usize {
        self.food.len()
    }

    /// Total food units on the map.
    pub fn food_units(&self) -> u64 {
        self.food
            .values()
            .fold(0_u64, |acc, pile| acc.saturating_add(u64::from(pile.units)))
    }

    /// Drop `units` of food on `cell`. Merging into an existing pile keeps
    /// the fresher of the two timers.
    pub fn add_food(&mut self, cell: Cell, units: u32, freshness: u32) -> bool {
        if units == 0 || freshness == 0 || !self.contains(cell) {
            return false;
        }
        let pile = self.food.entry(cell).or_insert(FoodPile {
            units: 0,
            freshness: 0,
        });
        pile.units = pile.units.saturating_add(units);
        pile.freshness = pile.freshness.max(freshness);
        true
    }

    /// Remove one unit of food from `cell`. The pile disappears when empty.
    pub fn take_food(&mut self, cell: Cell) -> bool {
        let Some(pile) = self.food.get_mut(&cell) else {
            return false;
        };
        pile.units = pile.units.saturating_sub(1);
        if pile.units == 0 {
            self.food.remove(&cell);
        }
        true
    }

    // -----------------------------------------------------------------------
    // Wood
    // -----------------------------------------------------------------------

    /// Whether any wood lies on `cell`.
    pub fn has_wood(&self, cell: Cell) -> bool {
        self.wood.contains_key(&cell)
    }

    /// Cells holding wood, in cell order.
    pub fn wood_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.wood.keys().copied()
    }

    /// Number of cells holding wood.
    pub fn wood_cell_count(&self) -> usize {
        self.wood.len()
    }

    /// Total wood units on the map.
    pub fn wood_units(&self) -> u64 {
        self.wood
            .values()
            .fold(0_u64, |acc, units| acc.saturating_add(u64::from(*units)))
    }

    /// Drop `units` of wood on `cell`, merging with any pile already there.
    pub fn add_wood(&mut self, cell: Cell, units: u32) -> bool {
        if units == 0 || !self.contains(cell) {
            return false;
        }
        let pile = self.wood.entry(cell).or_insert(0);
        *pile = pile.saturating_add(units);
        true
    }

    /// Remove one unit of wood from `cell`.
    pub fn take_wood(&mut self, cell: Cell) -> bool {
        let Some(units) = self.wood.get_mut(&cell) else {
            return false;
        };
        *units = units.saturating_sub(1);
        if *units == 0 {
            self.wood.remove(&cell);
        }
        true
    }

    // -----------------------------------------------------------------------
    // Growth
    // -----------------------------------------------------------------------

    /// Start a food plant on a clear cell.
    pub fn plant_food(&mut self, cell: Cell, grow_ticks: u32) -> bool {
        if !self.is_clear(cell) {
            return false;
        }
        self.plants.insert(cell, grow_ticks);
        true
    }

    /// Start a tree on a clear cell.
    pub fn plant_tree(&mut self, cell: Cell, grow_ticks: u32) -> bool {
        if !self.is_clear(cell) {
            return false;
        }
        self.trees.insert(cell, grow_ticks);
        true
    }

    /// Cells with a growing food plant.
    pub fn plant_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.plants.keys().copied()
    }

    /// Cells with a growing tree.
    pub fn tree_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.trees.keys().copied()
    }

    // -----------------------------------------------------------------------
    // Campfires
    // -----------------------------------------------------------------------

    /// Light a campfire on a clear cell.
    pub fn light_campfire(&mut self, cell: Cell, burn_ticks: u32) -> bool {
        if !self.is_clear(cell) {
            return false;
        }
        self.campfires.insert(cell, burn_ticks);
        true
    }

    /// Reset a burning campfire's timer.
    pub fn refuel_campfire(&mut self, cell: Cell, burn_ticks: u32) -> bool {
        match self.campfires.get_mut(&cell) {
            Some(remaining) => {
                *remaining = burn_ticks;
                true
            }
            None => false,
        }
    }

    /// Remaining burn of the campfire on `cell`.
    pub fn campfire_remaining(&self, cell: Cell) -> Option<u32> {
        self.campfires.get(&cell).copied()
    }

    /// Whether a campfire burns on `cell`.
    pub fn has_campfire(&self, cell: Cell) -> bool {
        self.campfires.contains_key(&cell)
    }

    /// Campfire cells, in cell order.
    pub fn campfire_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.campfires.keys().copied()
    }

    /// Campfires with their remaining burn.
    pub fn campfires(&self) -> impl Iterator<Item = (Cell, u32)> + '_ {
        self.campfires.iter().map(|(cell, ticks)| (*cell, *ticks))
    }

    /// Number of burning campfires.
    pub fn campfire_count(&self) -> usize {
        self.campfires.len()
    }

    // -----------------------------------------------------------------------
    // Homes
    // -----------------------------------------------------------------------

    /// Build an owned home on a clear cell.
    pub fn build_home(&mut self, cell: Cell, owner: AgentId, durability: u32) -> bool {
        if !self.is_clear(cell) {
            return false;
        }
        self.homes.insert(
            cell,
            Home {
                owner: Some(owner),
                durability,
            },
        );
        true
    }

    /// The home on `cell`, if any.
    pub fn home_at(&self, cell: Cell) -> Option<&Home> {
        self.homes.get(&cell)
    }

    /// Take ownership of an abandoned home.
    pub fn claim_home(&mut self, cell: Cell, owner: AgentId) -> bool {
        match self.homes.get_mut(&cell) {
            Some(home) if home.owner.is_none() => {
                home.owner = Some(owner);
                true
            }
            _ => false,
        }
    }

    /// Abandon a home held by `owner`. The structure stays standing.
    pub fn release_home(&mut self, cell: Cell, owner: AgentId) -> bool {
        match self.homes.get_mut(&cell) {
            Some(home) if home.owner == Some(owner) => {
                home.owner = None;
                true
            }
            _ => false,
        }
    }

    /// Restore a damaged home to `durability`. Only its owner may do this.
    pub fn repair_home(&mut self, cell: Cell, owner: AgentId, durability: u32) -> bool {
        match self.homes.get_mut(&cell) {
            Some(home) if home.owner == Some(owner) && home.durability < durability => {
                home.durability = durability;
                true
            }
            _ => false,
        }
    }

    /// The first abandoned home in cell order.
    pub fn first_unclaimed_home(&self) -> Option<Cell> {
        self.homes
            .iter()
            .find(|(_, home)| home.owner.is_none())
            .map(|(cell, _)| *cell)
    }

    /// Home cells, in cell order.
    pub fn home_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.homes.keys().copied()
    }

    /// Homes with their metadata.
    pub fn homes(&self) -> impl Iterator<Item = (Cell, &Home)> + '_ {
        self.homes.iter().map(|(cell, home)| (*cell, home))
    }

    /// Number of standing homes.
    pub fn home_count(&self) -> usize {
        self.homes.len()
    }
}
