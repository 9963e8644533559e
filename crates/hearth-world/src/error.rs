//! Error types for the `hearth-world` crate.
//!
//! Only construction and bootstrap placement can fail. Runtime terrain
//! operations report refusal through their return values instead.

use hearth_types::Cell;

/// Errors that can occur while building or seeding the terrain.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The grid must be at least one cell in each direction.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },

    /// A cell lies outside the grid.
    #[error("cell {cell} is outside the {width}x{height} grid")]
    OutOfBounds {
        /// The offending cell.
        cell: Cell,
        /// Grid width.
        width: i32,
        /// Grid height.
        height: i32,
    },
}
