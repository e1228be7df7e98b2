//! Preset grid sizes used when visualizing sensor coverage

use crate::grid::IntLocation;
use serde::{Deserialize, Serialize};

/// A square grid size with a robot spawn point in its center
#[derive(Copy, Clone, Debug, Default, PartialOrd, PartialEq, Ord, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StandardGrid {
    /// 21x21, robot at (10, 10)
    #[default]
    Small,
    /// 25x25, robot at (12, 12)
    Large,
}

impl StandardGrid {
    /// Get a list of all available grids
    pub fn get_all() -> [Self; 2] {
        [Self::Small, Self::Large]
    }

    /// Width and height of the grid
    pub fn size(&self) -> usize {
        match self {
            Self::Small => 21,
            Self::Large => 25,
        }
    }

    /// The center cell, where the robot starts
    ///
    /// ```
    /// use cone_sensor::grid::IntLocation;
    /// use cone_sensor::grid::standard_grids::StandardGrid;
    ///
    /// assert_eq!(StandardGrid::Large.default_robot_location(), IntLocation::new(12, 12));
    /// ```
    pub fn default_robot_location(&self) -> IntLocation {
        IntLocation::center_of(self.size())
    }
}
