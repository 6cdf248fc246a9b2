mod board;
mod dice;
mod game_state;
mod generator;
mod input;
mod map_string;
mod output;
mod player;
mod power;
mod render;
mod rng;
mod turn;

pub use board::{Board, BoardError, BoardPosition, BoardPositionError, Direction, SpotLocation};
pub use dice::{Dice, DiceMode, DEFAULT_SEQUENCE};
pub use game_state::{GameEnd, GameError, GameState, PlayOptions, RoundOutcome, Rules, StuckFix};
pub use generator::{generate, CheeseDistribution, GenerateError, GeneratedMap, MapConfig};
pub use input::{ChoiceError, ChoiceProvider, Io};
pub use map_string::{MapLayout, MapStringError, DEFAULT_MAP};
pub use output::{DisplaySink, NullDisplay, Transcript};
pub use player::{enlist, Player, PlayerColor, PlayerId, Players, Recruit};
pub use power::CheesePower;
pub use render::{board_lines, status_report, BoardStyle, DirectionChars};
pub use rng::{CheeseRng, GameRng};
pub use turn::TurnOutcome;

#[cfg(test)]
pub(crate) use input::mock::{Answer, ScriptedChoices};
