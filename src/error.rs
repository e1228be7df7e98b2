//! Errors raised while validating cone sensor inputs

use crate::grid::IntLocation;
use thiserror::Error;

/// Why a cone could not be computed
///
/// All of these are detected before any cell is filled in.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConeError {
    /// The robot is not on the grid
    #[error("Robot position {location} is outside the {grid_size}x{grid_size} grid")]
    InvalidPosition {
        /// Where the robot was said to be
        location: IntLocation,
        /// Width and height of the grid
        grid_size: usize,
    },

    /// The sensor direction is not one of the four diagonals
    #[error("Unsupported sensor direction: {0}")]
    UnsupportedDirection(String),

    /// The sensor range is negative, or too far to address on an `i32` grid
    #[error("Invalid sensor range: {0}")]
    InvalidRange(i64),

    /// The grid has no cells
    #[error("Invalid grid size: {0}")]
    InvalidGridSize(usize),
}
