//! Logical grid structs and utilities.

use crate::error::ConeError;
use anyhow::{anyhow, bail, ensure, Error};
use nalgebra::{Point2, Vector2};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::ops::Add;
use std::str::FromStr;

pub mod standard_grids;

/// An integer location on a [`SensorGrid`]
#[derive(
    Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct IntLocation {
    /// Column - increases to the right
    pub x: i32,
    /// Row - increases downwards
    pub y: i32,
}

impl IntLocation {
    /// Create a new IntLocation
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The middle cell of a square grid of side `grid_size`
    ///
    /// ```
    /// use cone_sensor::grid::IntLocation;
    ///
    /// assert_eq!(IntLocation::center_of(21), IntLocation::new(10, 10));
    /// assert_eq!(IntLocation::center_of(4), IntLocation::new(2, 2));
    /// ```
    pub fn center_of(grid_size: usize) -> Self {
        let center = i32::try_from(grid_size / 2).unwrap_or(i32::MAX);
        Self::new(center, center)
    }

    /// Whether this location lies inside a square grid of side `grid_size`
    ///
    /// ```
    /// use cone_sensor::grid::IntLocation;
    ///
    /// assert!(IntLocation::new(0, 20).in_bounds(21));
    /// assert!(!IntLocation::new(21, 0).in_bounds(21));
    /// assert!(!IntLocation::new(-1, 3).in_bounds(21));
    /// ```
    pub fn in_bounds(&self, grid_size: usize) -> bool {
        let inside = |v: i32| usize::try_from(v).map_or(false, |v| v < grid_size);
        inside(self.x) && inside(self.y)
    }

    /// Index into a row-major buffer for a grid of side `grid_size`, if in bounds
    fn index(&self, grid_size: usize) -> Option<usize> {
        self.in_bounds(grid_size)
            .then(|| self.y as usize * grid_size + self.x as usize)
    }
}

impl Display for IntLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add<Vector2<i32>> for IntLocation {
    type Output = IntLocation;

    fn add(self, rhs: Vector2<i32>) -> Self::Output {
        (Point2::from(self) + rhs).into()
    }
}

impl From<IntLocation> for Point2<i32> {
    fn from(val: IntLocation) -> Self {
        Point2::new(val.x, val.y)
    }
}

impl From<Point2<i32>> for IntLocation {
    fn from(p: Point2<i32>) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// The diagonal headings a cone sensor can face.
///
/// The `u8` value is the 8-way compass index (north = 0, counting clockwise),
/// so only the odd indices are valid. Use [`Direction::from_compass_index`]
/// to convert a raw index.
#[derive(
    Clone,
    Copy,
    Debug,
    Hash,
    Eq,
    PartialEq,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Direction {
    /// Up and to the right, or (+x, -y)
    NorthEast = 1,
    /// Down and to the right, or (+x, +y)
    SouthEast = 3,
    /// Down and to the left, or (-x, +y)
    SouthWest = 5,
    /// Up and to the left, or (-x, -y)
    NorthWest = 7,
}

impl Direction {
    /// Get a list of all diagonal directions, clockwise from [`Direction::NorthEast`]
    pub fn get_all() -> [Self; 4] {
        [
            Self::NorthEast,
            Self::SouthEast,
            Self::SouthWest,
            Self::NorthWest,
        ]
    }

    /// Look up a direction by its 8-way compass index
    ///
    /// ```
    /// use cone_sensor::grid::Direction;
    ///
    /// assert_eq!(Direction::from_compass_index(5).unwrap(), Direction::SouthWest);
    /// // orthogonal headings are not supported
    /// assert!(Direction::from_compass_index(2).is_err());
    /// ```
    pub fn from_compass_index(index: u8) -> Result<Self, ConeError> {
        Self::try_from(index)
            .map_err(|_| ConeError::UnsupportedDirection(format!("compass index {index}")))
    }

    /// The unit step taken when moving one cell in this direction
    pub fn step(&self) -> Vector2<i32> {
        match self {
            Self::NorthEast => Vector2::new(1, -1),
            Self::SouthEast => Vector2::new(1, 1),
            Self::SouthWest => Vector2::new(-1, 1),
            Self::NorthWest => Vector2::new(-1, -1),
        }
    }

    /// The step rotated a quarter turn clockwise (on screen, where y grows downwards)
    ///
    /// This is always the [`step`](Self::step) of [`rotate_clockwise`](Self::rotate_clockwise).
    pub fn perpendicular(&self) -> Vector2<i32> {
        let step = self.step();
        Vector2::new(-step.y, step.x)
    }

    /// The next diagonal a quarter turn clockwise
    pub fn rotate_clockwise(self) -> Self {
        match self {
            Self::NorthEast => Self::SouthEast,
            Self::SouthEast => Self::SouthWest,
            Self::SouthWest => Self::NorthWest,
            Self::NorthWest => Self::NorthEast,
        }
    }

    /// The next diagonal a quarter turn counterclockwise
    pub fn rotate_counterclockwise(self) -> Self {
        match self {
            Self::NorthEast => Self::NorthWest,
            Self::NorthWest => Self::SouthWest,
            Self::SouthWest => Self::SouthEast,
            Self::SouthEast => Self::NorthEast,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NorthEast => write!(f, "NORTHEAST"),
            Self::SouthEast => write!(f, "SOUTHEAST"),
            Self::SouthWest => write!(f, "SOUTHWEST"),
            Self::NorthWest => write!(f, "NORTHWEST"),
        }
    }
}

impl FromStr for Direction {
    type Err = ConeError;

    /// Accepts names in any case (`northeast`, `North_East`, `north-east`),
    /// abbreviations (`ne`) and compass indices (`1`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unsupported = || ConeError::UnsupportedDirection(s.to_string());
        if let Ok(index) = s.trim().parse::<i64>() {
            return u8::try_from(index)
                .map_err(|_| unsupported())
                .and_then(Self::from_compass_index);
        }

        let name: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match name.as_str() {
            "ne" | "northeast" => Ok(Self::NorthEast),
            "se" | "southeast" => Ok(Self::SouthEast),
            "sw" | "southwest" => Ok(Self::SouthWest),
            "nw" | "northwest" => Ok(Self::NorthWest),
            _ => Err(unsupported()),
        }
    }
}

/// What occupies a single cell of a [`SensorGrid`]
///
/// The `u8` value is the character used when rendering the grid as text.
#[derive(
    Clone,
    Copy,
    Debug,
    Hash,
    Eq,
    PartialEq,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u8)]
pub enum CellState {
    /// Not covered by the sensor
    Empty = b'.',
    /// The robot carrying the sensor
    Robot = b'R',
    /// Covered by the sensor cone
    Sensed = b'#',
}

impl CellState {
    /// The character this cell is rendered as
    pub fn symbol(&self) -> char {
        char::from(u8::from(*self))
    }
}

impl TryFrom<char> for CellState {
    type Error = Error;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        u8::try_from(c)
            .ok()
            .and_then(|b| CellState::try_from(b).ok())
            .ok_or_else(|| anyhow!("Unknown cell symbol {c:?}"))
    }
}

/// A square grid of [`CellState`]s with exactly one robot
///
/// The grid is indexed by [`IntLocation`], `x` across and `y` down. Every cell
/// that is not the robot is either [`CellState::Empty`] or [`CellState::Sensed`].
///
/// # Examples
///
/// ```
/// use cone_sensor::grid::{CellState, IntLocation, SensorGrid};
///
/// let grid = SensorGrid::new(3, IntLocation::new(1, 1)).unwrap();
/// assert_eq!(grid.get(&IntLocation::new(1, 1)), Some(CellState::Robot));
/// assert_eq!(grid.to_string(), "...\n.R.\n...\n");
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SensorGrid {
    size: usize,
    robot: IntLocation,
    /// row-major, `size * size` long
    cells: Vec<CellState>,
}

impl SensorGrid {
    /// Create an empty grid holding only the robot
    pub fn new(size: usize, robot: IntLocation) -> Result<Self, ConeError> {
        if size == 0 {
            return Err(ConeError::InvalidGridSize(size));
        }
        let robot_index = robot.index(size).ok_or(ConeError::InvalidPosition {
            location: robot,
            grid_size: size,
        })?;

        let mut cells = vec![CellState::Empty; size * size];
        cells[robot_index] = CellState::Robot;

        Ok(Self { size, robot, cells })
    }

    /// Create a grid with the robot and every location in `sensed` marked
    ///
    /// Locations outside the grid are ignored, and the robot's own cell stays
    /// [`CellState::Robot`] even if it is listed in `sensed`.
    pub fn with_sensed<'a>(
        size: usize,
        robot: IntLocation,
        sensed: impl IntoIterator<Item = &'a IntLocation>,
    ) -> Result<Self, ConeError> {
        let mut grid = Self::new(size, robot)?;
        for p in sensed {
            grid.mark_sensed(p);
        }
        Ok(grid)
    }

    /// Mark a cell as sensed, returning whether it changed
    fn mark_sensed(&mut self, p: &IntLocation) -> bool {
        match p.index(self.size) {
            Some(i) if self.cells[i] == CellState::Empty => {
                self.cells[i] = CellState::Sensed;
                true
            }
            _ => false,
        }
    }

    /// Width and height of the grid
    pub fn size(&self) -> usize {
        self.size
    }

    /// Where the robot is
    pub fn robot(&self) -> IntLocation {
        self.robot
    }

    /// The state at the given location, or `None` if it is out of bounds
    ///
    /// ```
    /// use cone_sensor::grid::{CellState, IntLocation, SensorGrid};
    ///
    /// let grid = SensorGrid::new(5, IntLocation::new(0, 0)).unwrap();
    /// assert_eq!(grid.get(&IntLocation::new(4, 4)), Some(CellState::Empty));
    /// assert_eq!(grid.get(&IntLocation::new(5, 0)), None);
    /// ```
    pub fn get(&self, p: &IntLocation) -> Option<CellState> {
        p.index(self.size).map(|i| self.cells[i])
    }

    /// Rows of the grid, from `y = 0` downwards
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks(self.size)
    }

    /// All locations holding the given state
    pub fn locations_of(&self, state: CellState) -> impl Iterator<Item = IntLocation> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(move |&(_, &c)| c == state)
            .map(move |(i, _)| IntLocation::new((i % size) as i32, (i / size) as i32))
    }

    /// The robot together with every sensed cell
    pub fn covered(&self) -> HashSet<IntLocation> {
        self.locations_of(CellState::Sensed)
            .chain([self.robot])
            .collect()
    }
}

impl Display for SensorGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(CellState::symbol).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl FromStr for SensorGrid {
    type Err = Error;

    /// Parse the text produced by [`Display`]
    ///
    /// Blank lines and surrounding whitespace on each line are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let size = rows.len();
        ensure!(size > 0, "Grid text is empty");

        let mut cells = Vec::with_capacity(size * size);
        let mut robot = None;
        for (y, row) in rows.iter().enumerate() {
            let width = row.chars().count();
            ensure!(
                width == size,
                "Row {y} has {width} cells but the grid has {size} rows"
            );
            for (x, c) in row.chars().enumerate() {
                let state = CellState::try_from(c)?;
                if state == CellState::Robot {
                    if let Some(first) = robot {
                        bail!("Second robot at ({x}, {y}), first was at {first}");
                    }
                    robot = Some(IntLocation::new(x as i32, y as i32));
                }
                cells.push(state);
            }
        }

        let robot = robot.ok_or_else(|| anyhow!("No robot in grid"))?;
        Ok(Self { size, robot, cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_bounds() {
        assert!(IntLocation::new(0, 0).in_bounds(1));
        assert!(!IntLocation::new(0, 0).in_bounds(0));
        assert!(IntLocation::new(24, 24).in_bounds(25));
        assert!(!IntLocation::new(24, 25).in_bounds(25));
        assert!(!IntLocation::new(-1, 0).in_bounds(25));
        assert!(!IntLocation::new(0, i32::MIN).in_bounds(25));
    }

    #[test]
    fn location_center() {
        for size in 1..=25 {
            assert!(IntLocation::center_of(size).in_bounds(size));
        }
        assert_eq!(IntLocation::center_of(1), IntLocation::new(0, 0));
        assert_eq!(IntLocation::center_of(usize::MAX).x, i32::MAX);
    }

    #[test]
    fn location_add_vector() {
        let p = IntLocation::new(10, 10) + Direction::NorthEast.step() * 3;
        assert_eq!(p, IntLocation::new(13, 7));
    }

    #[test]
    fn direction_compass_indices() {
        for d in Direction::get_all() {
            assert_eq!(Direction::from_compass_index(d.into()).unwrap(), d);
        }
        assert_eq!(u8::from(Direction::NorthEast), 1);
        assert_eq!(u8::from(Direction::NorthWest), 7);
        for index in [0, 2, 4, 6, 8, 255] {
            assert!(matches!(
                Direction::from_compass_index(index),
                Err(ConeError::UnsupportedDirection(_))
            ));
        }
    }

    #[test]
    fn direction_steps_are_diagonal() {
        for d in Direction::get_all() {
            let step = d.step();
            assert_eq!(step.x.abs(), 1);
            assert_eq!(step.y.abs(), 1);
        }
    }

    #[test]
    fn direction_perpendicular_is_clockwise_step() {
        for d in Direction::get_all() {
            assert_eq!(d.perpendicular(), d.rotate_clockwise().step());
            assert_eq!(d.step().dot(&d.perpendicular()), 0);
        }
    }

    #[test]
    fn direction_rotation() {
        for d in Direction::get_all() {
            let four_turns = d
                .rotate_clockwise()
                .rotate_clockwise()
                .rotate_clockwise()
                .rotate_clockwise();
            assert_eq!(four_turns, d);
            assert_eq!(d.rotate_clockwise().rotate_counterclockwise(), d);
        }
        assert_eq!(Direction::NorthWest.rotate_clockwise(), Direction::NorthEast);
    }

    #[test]
    fn direction_parse() {
        assert_eq!("NE".parse::<Direction>().unwrap(), Direction::NorthEast);
        assert_eq!("southeast".parse::<Direction>().unwrap(), Direction::SouthEast);
        assert_eq!("South_West".parse::<Direction>().unwrap(), Direction::SouthWest);
        assert_eq!("north-west".parse::<Direction>().unwrap(), Direction::NorthWest);
        assert_eq!("NORTHEAST".parse::<Direction>().unwrap(), Direction::NorthEast);
        assert_eq!("7".parse::<Direction>().unwrap(), Direction::NorthWest);
        for d in Direction::get_all() {
            assert_eq!(d.to_string().parse::<Direction>().unwrap(), d);
        }
    }

    #[test]
    fn direction_parse_unsupported() {
        for s in ["north", "E", "4", "", "up", "-1"] {
            assert!(
                matches!(s.parse::<Direction>(), Err(ConeError::UnsupportedDirection(_))),
                "{s:?} should not parse"
            );
        }
    }

    #[test]
    fn direction_serde_names() {
        let json = serde_json::to_string(&Direction::SouthWest).unwrap();
        assert_eq!(json, "\"southwest\"");
        let d: Direction = serde_json::from_str("\"northeast\"").unwrap();
        assert_eq!(d, Direction::NorthEast);
    }

    #[test]
    fn cell_symbols() {
        assert_eq!(CellState::Empty.symbol(), '.');
        assert_eq!(CellState::Robot.symbol(), 'R');
        assert_eq!(CellState::Sensed.symbol(), '#');
        assert_eq!(CellState::try_from('#').unwrap(), CellState::Sensed);
        assert!(CellState::try_from('x').is_err());
        assert!(CellState::try_from('é').is_err());
    }

    #[test]
    fn grid_new_invalid() {
        assert_eq!(
            SensorGrid::new(0, IntLocation::new(0, 0)),
            Err(ConeError::InvalidGridSize(0))
        );
        assert_eq!(
            SensorGrid::new(21, IntLocation::new(21, 3)),
            Err(ConeError::InvalidPosition {
                location: IntLocation::new(21, 3),
                grid_size: 21
            })
        );
    }

    #[test]
    fn grid_exactly_one_robot() {
        let robot = IntLocation::new(2, 1);
        let sensed = [robot, IntLocation::new(0, 0), IntLocation::new(9, 9)];
        let grid = SensorGrid::with_sensed(4, robot, &sensed).unwrap();
        assert_eq!(grid.locations_of(CellState::Robot).collect::<Vec<_>>(), [robot]);
        assert_eq!(
            grid.locations_of(CellState::Sensed).collect::<Vec<_>>(),
            [IntLocation::new(0, 0)]
        );
        assert_eq!(grid.covered(), HashSet::from([robot, IntLocation::new(0, 0)]));
    }

    #[test]
    fn grid_render() {
        let grid = SensorGrid::with_sensed(
            3,
            IntLocation::new(0, 2),
            &[IntLocation::new(1, 1), IntLocation::new(2, 0)],
        )
        .unwrap();
        assert_eq!(grid.to_string(), "..#\n.#.\nR..\n");
    }

    #[test]
    fn grid_parse() {
        let grid: SensorGrid = "
            ..#
            .#.
            R..
        "
        .parse()
        .unwrap();
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.robot(), IntLocation::new(0, 2));
        assert_eq!(grid.get(&IntLocation::new(2, 0)), Some(CellState::Sensed));
        assert_eq!(grid.to_string().parse::<SensorGrid>().unwrap(), grid);
    }

    #[test]
    fn grid_parse_invalid() {
        let v = "".parse::<SensorGrid>();
        assert_eq!(format!("{}", v.unwrap_err()), "Grid text is empty");

        let v = "R.\n...".parse::<SensorGrid>();
        assert_eq!(
            format!("{}", v.unwrap_err()),
            "Row 1 has 3 cells but the grid has 2 rows"
        );

        let v = "..\n..".parse::<SensorGrid>();
        assert_eq!(format!("{}", v.unwrap_err()), "No robot in grid");

        let v = "R.\n.R".parse::<SensorGrid>();
        assert_eq!(
            format!("{}", v.unwrap_err()),
            "Second robot at (1, 1), first was at (0, 0)"
        );

        let v = "R.\n.x".parse::<SensorGrid>();
        assert_eq!(format!("{}", v.unwrap_err()), "Unknown cell symbol 'x'");
    }
}
