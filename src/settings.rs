//! Options for the cone sensor visualizer

use crate::constants::DEFAULT_SENSOR_RANGE;
use crate::grid::standard_grids::StandardGrid;
use crate::grid::{Direction, IntLocation, SensorGrid};
use crate::sensor::render_cone;
use anyhow::{Context, Error};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Everything needed to compute and render one sensor cone
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConeSettings {
    /// Width and height of the grid
    pub grid_size: usize,
    /// Where the robot is
    pub robot: IntLocation,
    /// Which way the sensor faces
    pub direction: Direction,
    /// How many ranks the cone extends
    pub sensor_range: i32,
}

impl Default for ConeSettings {
    fn default() -> Self {
        Self::from_standard_grid(StandardGrid::default())
    }
}

impl ConeSettings {
    /// Settings for a robot in the center of a [`StandardGrid`]
    pub fn from_standard_grid(grid: StandardGrid) -> Self {
        Self {
            grid_size: grid.size(),
            robot: grid.default_robot_location(),
            direction: Direction::NorthEast,
            sensor_range: DEFAULT_SENSOR_RANGE,
        }
    }

    /// Read settings from a JSON file; missing fields take their default values
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid settings in {}", path.display()))
    }

    /// Render the cone described by these settings
    pub fn render(&self) -> Result<SensorGrid, Error> {
        Ok(render_cone(
            self.robot,
            self.direction,
            self.sensor_range,
            self.grid_size,
        )?)
    }
}
