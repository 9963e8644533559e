//! Radius queries over anything that sits on a cell.
//!
//! All queries are linear scans with a Euclidean metric and an inclusive
//! radius. They accept iterators rather than a concrete container, so a
//! spatial index can later feed them without touching callers.
//!
//! Ties in [`nearest`] go to the first item visited at the minimum
//! distance; callers iterate ordered maps, so the result is stable.

use hearth_types::{AgentId, Cell};

/// Something with a position on the grid.
pub trait Located {
    /// The cell this item occupies.
    fn cell(&self) -> Cell;
}

/// A located item that is an agent.
pub trait Occupant: Located {
    /// The agent's identifier.
    fn agent_id(&self) -> AgentId;
}

impl Located for Cell {
    fn cell(&self) -> Cell {
        *self
    }
}

impl<T: Located + ?Sized> Located for &T {
    fn cell(&self) -> Cell {
        (**self).cell()
    }
}

impl<T: Occupant + ?Sized> Occupant for &T {
    fn agent_id(&self) -> AgentId {
        (**self).agent_id()
    }
}

/// The single nearest item within `radius` of `origin`.
pub fn nearest<T, I>(origin: Cell, radius: f64, items: I) -> Option<T>
where
    T: Located,
    I: IntoIterator<Item = T>,
{
    let mut best: Option<(f64, T)> = None;
    for item in items {
        let dist = origin.distance_to(item.cell());
        if dist > radius {
            continue;
        }
        match &best {
            Some((best_dist, _)) if dist >= *best_dist => {}
            _ => best = Some((dist, item)),
        }
    }
    best.map(|(_, item)| item)
}

/// Every item within `radius` of `origin`, in iteration order.
pub fn within<T, I>(origin: Cell, radius: f64, items: I) -> Vec<T>
where
    T: Located,
    I: IntoIterator<Item = T>,
{
    items
        .into_iter()
        .filter(|item| origin.distance_to(item.cell()) <= radius)
        .collect()
}

/// Whether anything lies within `radius` of `origin`.
pub fn any_within<T, I>(origin: Cell, radius: f64, items: I) -> bool
where
    T: Located,
    I: IntoIterator<Item = T>,
{
    items
        .into_iter()
        .any(|item| origin.distance_to(item.cell()) <= radius)
}

/// Agents within `radius` of `origin`, leaving out `exclude`.
pub fn neighbors_within<T, I>(origin: Cell, radius: f64, agents: I, exclude: AgentId) -> Vec<T>
where
    T: Occupant,
    I: IntoIterator<Item = T>,
{
    agents
        .into_iter()
        .filter(|a| a.agent_id() != exclude && origin.distance_to(a.cell()) <= radius)
        .collect()
}
