use crate::cheese_battle::board::{
    Board, BoardError, BoardPosition, BoardPositionError, Dimension, Direction, SpotLocation,
};
use crate::cheese_battle::map_string::MapLayout;
use crate::cheese_battle::rng::GameRng;
use crate::util::retry;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

// Resampling budget per cheese marker before switching to shuffle-and-take
const MAX_PLACEMENT_TRIES: u32 = 64;

#[derive(Error, Debug, PartialEq)]
pub enum GenerateError {
    #[error("Cannot generate a board with {0}")]
    EmptyDimension(Dimension),
    #[error("Generated board was invalid: {0}")]
    Board(#[from] BoardError),
    #[error("Winning cell fell outside the board: {0}")]
    Position(#[from] BoardPositionError),
}

/// How cheese markers are spread over a generated board.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum CheeseDistribution {
    /// Exactly this many markers on distinct cells.
    Count(usize),
    /// Every cell independently, with this percent chance.
    Chance(f64),
    /// This percent of the board, rounded, on distinct cells.
    Percentage(f64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapConfig {
    pub width: usize,
    pub height: usize,
    pub winning_spot: SpotLocation,
    pub starting_spot: SpotLocation,
    pub cheese: CheeseDistribution,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedMap {
    pub layout: MapLayout,
    pub winning_position: BoardPosition,
}

pub fn generate<R: GameRng>(config: &MapConfig, rng: &mut R) -> Result<GeneratedMap, GenerateError> {
    let (width, height) = (config.width, config.height);
    if width == 0 {
        return Err(GenerateError::EmptyDimension(Dimension::Width(width)));
    }
    if height == 0 {
        return Err(GenerateError::EmptyDimension(Dimension::Height(height)));
    }

    // The winning cell is chosen up front so cheese never lands under it
    let win = config
        .winning_spot
        .fixed_cell(width, height)
        .unwrap_or_else(|| (rng.below(width), rng.below(height)));

    let mut cells: Vec<Vec<Direction>> = (0..height)
        .map(|_| {
            (0..width)
                .map(|_| Direction::MOVES[rng.below(Direction::MOVES.len())])
                .collect()
        })
        .collect();

    let mut cheese = vec![vec![0u32; width]; height];
    let total = width * height;
    let free = total - 1;
    match config.cheese {
        CheeseDistribution::Count(n) => scatter_cheese(&mut cheese, n.min(free), win, rng),
        CheeseDistribution::Percentage(p) => {
            let goal = (p / 100.0 * total as f64).round().max(0.0) as usize;
            scatter_cheese(&mut cheese, goal.min(free), win, rng);
        }
        CheeseDistribution::Chance(p) => {
            for (y, row) in cheese.iter_mut().enumerate() {
                for (x, marker) in row.iter_mut().enumerate() {
                    if (x, y) != win && rng.percent() < p {
                        *marker = 1;
                    }
                }
            }
        }
    }

    cells[win.1][win.0] = Direction::Win;
    cheese[win.1][win.0] = 0;

    let board = Board::new(cells, cheese)?;
    let winning_position = BoardPosition::new(&board, win.0, win.1)?;
    debug!(
        "Generated {}x{} board, win at {}, {} cheese cells",
        width,
        height,
        winning_position,
        board.cheese_cells()
    );
    Ok(GeneratedMap {
        layout: MapLayout::new(board, config.starting_spot),
        winning_position,
    })
}

fn scatter_cheese<R: GameRng>(
    cheese: &mut [Vec<u32>],
    goal: usize,
    win: (usize, usize),
    rng: &mut R,
) {
    let height = cheese.len();
    let width = cheese[0].len();
    for placed in 0..goal {
        let sampled = retry(MAX_PLACEMENT_TRIES, || {
            let x = rng.below(width);
            let y = rng.below(height);
            (cheese[y][x] == 0 && (x, y) != win).then_some((x, y))
        });
        match sampled {
            Ok((x, y)) => cheese[y][x] = 1,
            Err(_) => {
                // Board is crowded; finish from a shuffled list of what is left
                let mut open: Vec<(usize, usize)> = (0..height)
                    .flat_map(|y| (0..width).map(move |x| (x, y)))
                    .filter(|&(x, y)| cheese[y][x] == 0 && (x, y) != win)
                    .collect();
                rng.shuffle(&mut open);
                for (x, y) in open.into_iter().take(goal - placed) {
                    cheese[y][x] = 1;
                }
                return;
            }
        }
    }
}
