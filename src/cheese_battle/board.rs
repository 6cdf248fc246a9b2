use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Dimension {
    Width(usize),
    Height(usize),
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Width(w) => write!(f, "width {}", w),
            Dimension::Height(h) => write!(f, "height {}", h),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum BoardError {
    #[error("Board with no rows given")]
    NoRows,
    #[error("Board contains empty rows")]
    EmptyRows,
    #[error("Not all board rows have the same length")]
    MismatchedRowLengths,
    #[error("Cheese grid does not match the {width}x{height} movement grid")]
    CheeseShapeMismatch { width: usize, height: usize },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Coordinate {
    X,
    Y,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::X => write!(f, "x"),
            Coordinate::Y => write!(f, "y"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum BoardPositionError {
    #[error("{0} coordinate {1} is outside board {2}")]
    OutOfBounds(Coordinate, i64, Dimension),
}

#[derive(Error, Debug, PartialEq)]
#[error("Unknown direction {0:?}")]
pub struct ParseDirectionError(pub String);

#[derive(Error, Debug, PartialEq)]
#[error("Unknown spot location {0:?}")]
pub struct ParseSpotError(pub String);

// Up moves towards higher rows. Row 0 is drawn at the bottom of the screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Win,
}

impl Direction {
    /// Directions a generated board may scatter across its non-winning cells.
    pub const MOVES: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
            Direction::Win => "Win",
        }
    }

    /// Displace `(x, y)` by `distance` cells. A winning cell never moves anyone.
    pub fn step(&self, x: i32, y: i32, distance: i32) -> (i32, i32) {
        match self {
            Direction::Up => (x, y.saturating_add(distance)),
            Direction::Down => (x, y.saturating_sub(distance)),
            Direction::Left => (x.saturating_sub(distance), y),
            Direction::Right => (x.saturating_add(distance), y),
            Direction::Win => (x, y),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Up" => Ok(Direction::Up),
            "Down" => Ok(Direction::Down),
            "Left" => Ok(Direction::Left),
            "Right" => Ok(Direction::Right),
            "Win" => Ok(Direction::Win),
            other => Err(ParseDirectionError(other.to_string())),
        }
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpotLocation {
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
    Random,
    Middle,
}

impl SpotLocation {
    // Random has no fixed cell; callers pick one with their RNG
    pub fn fixed_cell(&self, width: usize, height: usize) -> Option<(usize, usize)> {
        let right = width.saturating_sub(1);
        let bottom = height.saturating_sub(1);
        match self {
            SpotLocation::BottomRight => Some((right, bottom)),
            SpotLocation::BottomLeft => Some((0, bottom)),
            SpotLocation::TopRight => Some((right, 0)),
            SpotLocation::TopLeft => Some((0, 0)),
            SpotLocation::Middle => Some((right / 2, bottom / 2)),
            SpotLocation::Random => None,
        }
    }
}

impl fmt::Display for SpotLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpotLocation::BottomRight => "BottomRight",
            SpotLocation::BottomLeft => "BottomLeft",
            SpotLocation::TopRight => "TopRight",
            SpotLocation::TopLeft => "TopLeft",
            SpotLocation::Random => "Random",
            SpotLocation::Middle => "Middle",
        };
        f.write_str(name)
    }
}

impl FromStr for SpotLocation {
    type Err = ParseSpotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "BottomRight" => Ok(SpotLocation::BottomRight),
            "BottomLeft" => Ok(SpotLocation::BottomLeft),
            "TopRight" => Ok(SpotLocation::TopRight),
            "TopLeft" => Ok(SpotLocation::TopLeft),
            "Random" => Ok(SpotLocation::Random),
            "Middle" => Ok(SpotLocation::Middle),
            other => Err(ParseSpotError(other.to_string())),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoardPosition(usize, usize);

impl BoardPosition {
    pub fn new(board: &Board, x: usize, y: usize) -> Result<Self, BoardPositionError> {
        if x >= board.width() {
            return Err(BoardPositionError::OutOfBounds(
                Coordinate::X,
                x as i64,
                Dimension::Width(board.width()),
            ));
        }
        if y >= board.height() {
            return Err(BoardPositionError::OutOfBounds(
                Coordinate::Y,
                y as i64,
                Dimension::Height(board.height()),
            ));
        }
        Ok(BoardPosition(x, y))
    }

    // Candidate cells during movement may have wandered off either edge
    pub fn from_signed(board: &Board, x: i32, y: i32) -> Result<Self, BoardPositionError> {
        let ux = usize::try_from(x).map_err(|_| {
            BoardPositionError::OutOfBounds(Coordinate::X, x.into(), Dimension::Width(board.width()))
        })?;
        let uy = usize::try_from(y).map_err(|_| {
            BoardPositionError::OutOfBounds(
                Coordinate::Y,
                y.into(),
                Dimension::Height(board.height()),
            )
        })?;
        BoardPosition::new(board, ux, uy)
    }

    pub fn x(&self) -> usize {
        self.0
    }

    pub fn y(&self) -> usize {
        self.1
    }

    pub fn signed(&self) -> (i32, i32) {
        (self.0 as i32, self.1 as i32)
    }
}

impl fmt::Display for BoardPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// Movement grid plus the parallel cheese grid, indexed `[y][x]`.
///
/// Boards are built once per game and never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    cells: Vec<Vec<Direction>>,
    cheese: Vec<Vec<u32>>,
}

impl Board {
    // Ensure that the given grids meet the following criteria:
    // - the board contains at least one row
    // - rows contain at least one cell
    // - all rows are the same length
    // - the cheese grid has exactly the same shape
    pub fn new(cells: Vec<Vec<Direction>>, cheese: Vec<Vec<u32>>) -> Result<Self, BoardError> {
        if cells.is_empty() {
            return Err(BoardError::NoRows);
        }
        let row_len = cells[0].len();
        if row_len == 0 {
            return Err(BoardError::EmptyRows);
        }
        if cells.iter().any(|row| row.len() != row_len) {
            return Err(BoardError::MismatchedRowLengths);
        }
        if cheese.len() != cells.len() || cheese.iter().any(|row| row.len() != row_len) {
            return Err(BoardError::CheeseShapeMismatch {
                width: row_len,
                height: cells.len(),
            });
        }
        Ok(Board { cells, cheese })
    }

    /// A board with no cheese at all.
    pub fn without_cheese(cells: Vec<Vec<Direction>>) -> Result<Self, BoardError> {
        let cheese = cells.iter().map(|row| vec![0; row.len()]).collect();
        Board::new(cells, cheese)
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }

    pub fn width(&self) -> usize {
        self.cells[0].len()
    }

    pub fn rows(&self) -> &[Vec<Direction>] {
        &self.cells
    }

    pub fn cheese_rows(&self) -> &[Vec<u32>] {
        &self.cheese
    }

    pub fn cell_at(&self, x: i32, y: i32) -> Result<Direction, BoardPositionError> {
        let pos = BoardPosition::from_signed(self, x, y)?;
        Ok(self.cell(pos))
    }

    pub fn cheese_at(&self, x: i32, y: i32) -> Result<u32, BoardPositionError> {
        let pos = BoardPosition::from_signed(self, x, y)?;
        Ok(self.cheese(pos))
    }

    pub fn cell(&self, pos: BoardPosition) -> Direction {
        self.cells[pos.y()][pos.x()]
    }

    pub fn cheese(&self, pos: BoardPosition) -> u32 {
        self.cheese[pos.y()][pos.x()]
    }

    pub fn is_win(&self, pos: BoardPosition) -> bool {
        self.cell(pos) == Direction::Win
    }

    pub fn positions(&self) -> impl Iterator<Item = BoardPosition> + '_ {
        (0..self.height()).flat_map(move |y| (0..self.width()).map(move |x| BoardPosition(x, y)))
    }

    /// One row of positions at a time, highest `y` first.
    pub fn display_rows(&self) -> impl Iterator<Item = Vec<BoardPosition>> + '_ {
        (0..self.height())
            .rev()
            .map(move |y| (0..self.width()).map(|x| BoardPosition(x, y)).collect())
    }

    pub fn win_positions(&self) -> Vec<BoardPosition> {
        self.positions().filter(|pos| self.is_win(*pos)).collect()
    }

    pub fn cheese_cells(&self) -> usize {
        self.cheese
            .iter()
            .map(|row| row.iter().filter(|c| **c > 0).count())
            .sum()
    }
}
