//! Rasterizing the triangular field of view of a diagonal proximity sensor.
//!
//! At forward distance `d` the cone covers a rank of `2d + 1` cells, centered on
//! the cell `d` steps ahead of the robot and spread along the direction's
//! [perpendicular](Direction::perpendicular). Ranks are clipped to the grid.

use crate::error::ConeError;
use crate::grid::{Direction, IntLocation, SensorGrid};
use log::{debug, trace};
use std::collections::HashSet;

/// The cells a sensor covers, always including the robot's own cell
pub type CoveredSet = HashSet<IntLocation>;

/// The unclipped rank of cells at forward distance `distance`
///
/// For `distance = 0` this is just the robot's cell. Fails with
/// [`ConeError::InvalidRange`] if any cell of the rank would not fit in an `i32`.
///
/// ```
/// use cone_sensor::grid::{Direction, IntLocation};
/// use cone_sensor::sensor::rank;
///
/// let cells: Vec<_> = rank(IntLocation::new(10, 10), Direction::NorthEast, 1)
///     .unwrap()
///     .collect();
/// assert_eq!(
///     cells,
///     [IntLocation::new(10, 8), IntLocation::new(11, 9), IntLocation::new(12, 10)]
/// );
/// ```
pub fn rank(
    robot: IntLocation,
    direction: Direction,
    distance: u32,
) -> Result<impl DoubleEndedIterator<Item = IntLocation>, ConeError> {
    let out_of_range = || ConeError::InvalidRange(distance.into());
    let d = i32::try_from(distance).map_err(|_| out_of_range())?;

    // the ends of a rank are 2d away from the robot on one axis
    let reach = d.checked_mul(2).ok_or_else(out_of_range)?;
    for c in [robot.x, robot.y] {
        c.checked_add(reach)
            .and(c.checked_sub(reach))
            .ok_or_else(out_of_range)?;
    }

    let front = robot + direction.step() * d;
    let perpendicular = direction.perpendicular();
    Ok((-d..=d).map(move |w| front + perpendicular * w))
}

fn validate(robot: IntLocation, sensor_range: i32, grid_size: usize) -> Result<u32, ConeError> {
    if grid_size == 0 {
        return Err(ConeError::InvalidGridSize(grid_size));
    }
    if !robot.in_bounds(grid_size) {
        return Err(ConeError::InvalidPosition {
            location: robot,
            grid_size,
        });
    }
    u32::try_from(sensor_range).map_err(|_| ConeError::InvalidRange(sensor_range.into()))
}

/// Compute every cell covered by a sensor cone
///
/// The result holds `robot` and, for each distance from 1 to `sensor_range`, the
/// cells of that [`rank`] that lie inside the `grid_size` square grid.
///
/// An in-bounds cell at distance `d` needs `2d < 2 * grid_size - 1`, so ranks
/// past `grid_size - 1` are never visited.
///
/// ```
/// use cone_sensor::grid::{Direction, IntLocation};
/// use cone_sensor::sensor::compute_cone;
///
/// let robot = IntLocation::new(0, 0);
/// let cone = compute_cone(robot, Direction::NorthWest, 5, 21).unwrap();
/// assert_eq!(cone.len(), 1);
/// assert!(cone.contains(&robot));
/// ```
pub fn compute_cone(
    robot: IntLocation,
    direction: Direction,
    sensor_range: i32,
    grid_size: usize,
) -> Result<CoveredSet, ConeError> {
    let range = validate(robot, sensor_range, grid_size)?;

    let last = range.min(u32::try_from(grid_size - 1).unwrap_or(u32::MAX));

    let mut covered = CoveredSet::from([robot]);
    let mut clipped = 0;
    for distance in 1..=last {
        for p in rank(robot, direction, distance)? {
            if p.in_bounds(grid_size) {
                covered.insert(p);
            } else {
                trace!("Clipped {p} at distance {distance}");
                clipped += 1;
            }
        }
    }

    debug!(
        "{direction} cone from {robot}, range {range} (ranks 1..={last}): \
         {} cells, {clipped} clipped",
        covered.len()
    );
    Ok(covered)
}

/// Compute a sensor cone and fill a fresh [`SensorGrid`] with it
///
/// Nothing is allocated for the grid unless every input is valid.
pub fn render_cone(
    robot: IntLocation,
    direction: Direction,
    sensor_range: i32,
    grid_size: usize,
) -> Result<SensorGrid, ConeError> {
    let covered = compute_cone(robot, direction, sensor_range, grid_size)?;
    SensorGrid::with_sensed(grid_size, robot, &covered)
}

/// A cone sensor bound to a single grid size
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConeRasterizer {
    grid_size: usize,
}

impl ConeRasterizer {
    /// Create a rasterizer for a `grid_size` by `grid_size` grid
    pub fn new(grid_size: usize) -> Result<Self, ConeError> {
        if grid_size == 0 {
            return Err(ConeError::InvalidGridSize(grid_size));
        }
        Ok(Self { grid_size })
    }

    /// Width and height of the grid
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// See [`compute_cone`]
    pub fn compute(
        &self,
        robot: IntLocation,
        direction: Direction,
        sensor_range: i32,
    ) -> Result<CoveredSet, ConeError> {
        compute_cone(robot, direction, sensor_range, self.grid_size)
    }

    /// See [`render_cone`]
    pub fn render(
        &self,
        robot: IntLocation,
        direction: Direction,
        sensor_range: i32,
    ) -> Result<SensorGrid, ConeError> {
        render_cone(robot, direction, sensor_range, self.grid_size)
    }
}
