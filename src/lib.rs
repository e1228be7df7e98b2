#![warn(missing_docs)]
//! Utilities for visualizing the coverage of diagonal cone proximity sensors

pub mod constants;
pub mod error;
pub mod grid;
pub mod sensor;
pub mod settings;

pub use error::ConeError;
pub use grid::{CellState, Direction, IntLocation, SensorGrid};
pub use sensor::{compute_cone, render_cone, ConeRasterizer, CoveredSet};
