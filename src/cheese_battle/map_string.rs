use crate::cheese_battle::board::{
    Board, BoardError, Direction, ParseDirectionError, ParseSpotError, SpotLocation,
};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const FIELD_COUNT: usize = 5;

/// Reasons a board string could not be loaded.
#[derive(Error, Debug, PartialEq)]
pub enum MapStringError {
    #[error("Expected 5 colon separated fields, found {0}")]
    FieldCount(usize),
    #[error("Invalid starting spot: {0}")]
    StartingSpot(#[from] ParseSpotError),
    #[error("Invalid board {0}: {1:?}")]
    Dimension(&'static str, String),
    #[error("Expected {expected} {field} entries, found {found}")]
    EntryCount {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Invalid cell: {0}")]
    Direction(#[from] ParseDirectionError),
    #[error("Invalid cheese count {0:?}")]
    Cheese(String),
    #[error("Invalid board: {0}")]
    Board(#[from] BoardError),
}

/// A board together with the spot players start from.
///
/// The text form is `StartingSpot:Width:Height:<directions>:<cheese>` where both
/// grids are comma separated, row-major, row 0 first.
#[derive(Clone, Debug, PartialEq)]
pub struct MapLayout {
    pub board: Board,
    pub starting_spot: SpotLocation,
}

impl MapLayout {
    pub fn new(board: Board, starting_spot: SpotLocation) -> Self {
        MapLayout {
            board,
            starting_spot,
        }
    }
}

fn join_rows<T: fmt::Display>(rows: &[Vec<T>]) -> String {
    rows.iter()
        .flat_map(|row| row.iter().map(|v| v.to_string()))
        .collect::<Vec<String>>()
        .join(",")
}

impl fmt::Display for MapLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}",
            self.starting_spot,
            self.board.width(),
            self.board.height(),
            join_rows(self.board.rows()),
            join_rows(self.board.cheese_rows()),
        )
    }
}

fn parse_dimension(name: &'static str, raw: &str) -> Result<usize, MapStringError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| MapStringError::Dimension(name, raw.to_string()))
}

fn split_entries<'a>(
    field: &'static str,
    raw: &'a str,
    expected: usize,
) -> Result<Vec<&'a str>, MapStringError> {
    let entries: Vec<&str> = raw.split(',').collect();
    if entries.len() != expected {
        return Err(MapStringError::EntryCount {
            field,
            expected,
            found: entries.len(),
        });
    }
    Ok(entries)
}

impl FromStr for MapLayout {
    type Err = MapStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim().split(':').collect();
        if fields.len() != FIELD_COUNT {
            return Err(MapStringError::FieldCount(fields.len()));
        }
        let starting_spot = fields[0].parse::<SpotLocation>()?;
        let width = parse_dimension("width", fields[1])?;
        let height = parse_dimension("height", fields[2])?;
        let expected = width
            .checked_mul(height)
            .ok_or_else(|| MapStringError::Dimension("size", fields[1..3].join(":")))?;

        let directions = split_entries("direction", fields[3], expected)?
            .into_iter()
            .map(Direction::from_str)
            .collect::<Result<Vec<Direction>, ParseDirectionError>>()?;
        let cheese = split_entries("cheese", fields[4], expected)?
            .into_iter()
            .map(|raw| {
                raw.trim()
                    .parse::<u32>()
                    .map_err(|_| MapStringError::Cheese(raw.to_string()))
            })
            .collect::<Result<Vec<u32>, MapStringError>>()?;

        let cells = directions
            .chunks(width.max(1))
            .map(|row| row.to_vec())
            .collect();
        let cheese = cheese.chunks(width.max(1)).map(|row| row.to_vec()).collect();
        let board = Board::new(cells, cheese)?;
        Ok(MapLayout::new(board, starting_spot))
    }
}

/// Map the game ships with when no map string is configured.
pub const DEFAULT_MAP: &str = "TopLeft:8:8:\
Up,Up,Up,Up,Up,Up,Up,Up,\
Right,Right,Up,Down,Up,Up,Left,Left,\
Right,Right,Up,Right,Left,Right,Left,Left,\
Right,Right,Up,Right,Up,Up,Left,Left,\
Right,Right,Right,Right,Up,Up,Left,Left,\
Right,Right,Right,Right,Up,Up,Left,Left,\
Right,Right,Up,Down,Up,Right,Left,Left,\
Down,Right,Right,Right,Right,Right,Down,Win:\
0,0,0,0,0,0,0,0,\
0,0,0,0,1,0,0,0,\
0,0,0,0,0,0,0,0,\
1,0,0,0,0,0,0,0,\
0,0,0,0,0,0,1,0,\
0,0,0,1,0,0,0,0,\
0,0,0,0,0,0,0,0,\
0,0,0,0,0,0,0,0";
