use crate::cheese_battle::board::{Board, BoardPosition, BoardPositionError, SpotLocation};
use crate::cheese_battle::dice::Dice;
use crate::cheese_battle::generator::{generate, GenerateError, MapConfig};
use crate::cheese_battle::input::{ChoiceError, Io};
use crate::cheese_battle::map_string::MapLayout;
use crate::cheese_battle::player::{Player, PlayerId, Players, Recruit};
use crate::cheese_battle::power::CheesePower;
use crate::cheese_battle::render::{status_report, BoardStyle};
use crate::cheese_battle::rng::GameRng;
use crate::util::retry;
use thiserror::Error;
use tracing::{debug, info, warn};

// Resampling budget when looking for a free cell to drop a ship on
const MAX_OPEN_CELL_TRIES: u32 = 100;

#[derive(Error, Debug, PartialEq)]
pub enum GameError {
    #[error("Game needs at least one player")]
    NoPlayers,
    #[error("Player input failed: {0}")]
    Choice(#[from] ChoiceError),
    #[error("Board position error: {0}")]
    Position(#[from] BoardPositionError),
    #[error("Map generation failed: {0}")]
    Generate(#[from] GenerateError),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StuckFix {
    pub max_stuck_time: i32,
    pub cool_down_turns: i32,
}

/// Knobs that stay fixed for the whole game.
#[derive(Clone, Debug, PartialEq)]
pub struct Rules {
    pub max_bounce: u32,
    pub stuck_fix: Option<StuckFix>,
    pub powers: Vec<CheesePower>,
    pub max_chained_jumps: u32,
    /// 0 means no limit.
    pub max_rounds: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            max_bounce: 5,
            stuck_fix: None,
            powers: CheesePower::ALL.to_vec(),
            max_chained_jumps: 8,
            max_rounds: 0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RoundOutcome {
    Won(PlayerId),
    AllStuck,
    Continue,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GameEnd {
    Won(PlayerId),
    Abandoned,
    RoundLimit,
}

#[derive(Clone, Debug)]
pub struct PlayOptions {
    pub auto_run: bool,
    /// Off means nobody is watching, so rounds run without pausing.
    pub output_game: bool,
    pub style: BoardStyle,
}

#[derive(Debug)]
pub struct GameState<R: GameRng> {
    pub(super) board: Board,
    pub(super) starting_spot: SpotLocation,
    pub(super) players: Players,
    pub(super) rules: Rules,
    pub(super) dice: Dice,
    pub(super) rng: R,
    pub(super) game_over: bool,
    pub(super) winner: Option<PlayerId>,
    pub(super) stuck_players: usize,
    pub(super) rounds: u32,
    map_generation: Option<MapConfig>,
}

impl<R: GameRng> GameState<R> {
    /// Build a game on `layout` and put everyone on the starting spot.
    pub fn new(
        layout: MapLayout,
        recruits: Vec<Recruit>,
        rules: Rules,
        dice: Dice,
        rng: R,
    ) -> Result<Self, GameError> {
        if recruits.is_empty() {
            return Err(GameError::NoPlayers);
        }
        let origin = BoardPosition::new(&layout.board, 0, 0)?;
        let mut state = GameState {
            players: Players::new(recruits, origin),
            board: layout.board,
            starting_spot: layout.starting_spot,
            rules,
            dice,
            rng,
            game_over: false,
            winner: None,
            stuck_players: 0,
            rounds: 0,
            map_generation: None,
        };
        state.place_players()?;
        Ok(state)
    }

    /// Generate a fresh board from `config` on every reset.
    pub fn with_map_generation(mut self, config: MapConfig) -> Self {
        self.map_generation = Some(config);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn starting_spot(&self) -> SpotLocation {
        self.starting_spot
    }

    pub fn layout(&self) -> MapLayout {
        MapLayout::new(self.board.clone(), self.starting_spot)
    }

    pub fn players(&self) -> &Players {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn stuck_players(&self) -> usize {
        self.stuck_players
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Start over with the same roster, on a new board if generation is on.
    pub fn reset(&mut self) -> Result<(), GameError> {
        if let Some(config) = &self.map_generation {
            let map = generate(config, &mut self.rng)?;
            info!("Generated new map: {}", map.layout);
            self.board = map.layout.board;
            self.starting_spot = map.layout.starting_spot;
        }
        self.game_over = false;
        self.winner = None;
        self.stuck_players = 0;
        self.rounds = 0;
        self.place_players()
    }

    fn place_players(&mut self) -> Result<(), GameError> {
        let mut taken: Vec<BoardPosition> = Vec::with_capacity(self.players.len());
        for player in self.players.iter_mut() {
            let pos = match self
                .starting_spot
                .fixed_cell(self.board.width(), self.board.height())
            {
                Some((x, y)) => BoardPosition::new(&self.board, x, y)?,
                None => random_open_cell(&self.board, &taken, &mut self.rng)
                    .unwrap_or(BoardPosition::new(&self.board, 0, 0)?),
            };
            player.set_position(pos);
            player.stuck_turns = 0;
            taken.push(pos);
        }
        Ok(())
    }

    pub(super) fn mark_stuck(&mut self, id: PlayerId) {
        self.players[id].stuck_turns += 1;
        self.stuck_players += 1;
    }

    /// Every player takes one turn, in roster order, until someone wins.
    pub fn run_round(&mut self, io: &mut Io<'_>) -> Result<RoundOutcome, GameError> {
        self.rounds += 1;
        debug!("Round {} begins", self.rounds);
        let ids: Vec<PlayerId> = self.players.ids().collect();
        for id in ids {
            let outcome = self.play_turn(id, io)?;
            debug!("{} turn outcome: {:?}", self.players[id].name(), outcome);
            if self.game_over {
                break;
            }
        }

        if self.game_over {
            if let Some(id) = self.winner {
                info!("{} won in round {}", self.players[id].name(), self.rounds);
                return Ok(RoundOutcome::Won(id));
            }
        }

        if let Some(fix) = self.rules.stuck_fix {
            let count = self.players.len();
            let threshold = count * (fix.max_stuck_time.max(0) as usize / 2);
            if self.stuck_players < count {
                self.stuck_players = 0;
            } else if self.stuck_players >= threshold {
                warn!(
                    "All players stuck: {} failed jumps in round {}",
                    self.stuck_players, self.rounds
                );
                return Ok(RoundOutcome::AllStuck);
            }
        }
        Ok(RoundOutcome::Continue)
    }

    /// Play rounds until somebody wins or the game is abandoned.
    pub fn play(&mut self, io: &mut Io<'_>, options: &PlayOptions) -> Result<GameEnd, GameError> {
        loop {
            let outcome = self.run_round(io)?;
            self.show_status(io, options)?;
            match outcome {
                RoundOutcome::Won(id) => return Ok(GameEnd::Won(id)),
                RoundOutcome::AllStuck => {
                    if options.auto_run || io.choices.confirm("Quit this game? y/n: ")? {
                        return Ok(GameEnd::Abandoned);
                    }
                }
                RoundOutcome::Continue => {}
            }
            if self.rules.max_rounds > 0 && self.rounds >= self.rules.max_rounds {
                warn!("Round limit of {} reached", self.rules.max_rounds);
                return Ok(GameEnd::RoundLimit);
            }
        }
    }

    fn show_status(&self, io: &mut Io<'_>, options: &PlayOptions) -> Result<(), GameError> {
        for line in status_report(self, &options.style) {
            io.say(line);
        }
        if options.output_game && !options.auto_run && !self.game_over {
            io.choices.pause("Press enter to continue.")?;
        }
        Ok(())
    }
}

/// A random cell that is neither a winning cell nor in `taken`.
///
/// Falls back to any non-winning cell once resampling gives up; `None` only
/// when the whole board is winning cells.
pub(super) fn random_open_cell<R: GameRng>(
    board: &Board,
    taken: &[BoardPosition],
    rng: &mut R,
) -> Option<BoardPosition> {
    let sampled = retry(MAX_OPEN_CELL_TRIES, || {
        let x = rng.below(board.width());
        let y = rng.below(board.height());
        let pos = BoardPosition::new(board, x, y).ok()?;
        (!board.is_win(pos) && !taken.contains(&pos)).then_some(pos)
    });
    match sampled {
        Ok(pos) => Some(pos),
        Err(_) => rng.draw(board.positions().filter(|pos| !board.is_win(*pos))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cheese_battle::board::Direction::{self, *};
    use crate::cheese_battle::dice::DiceMode;
    use crate::cheese_battle::generator::CheeseDistribution;
    use crate::cheese_battle::input::mock::{Answer, ScriptedChoices};
    use crate::cheese_battle::output::{NullDisplay, Transcript};
    use crate::cheese_battle::player::PlayerColor;
    use crate::cheese_battle::rng::mock::MockRng;
    use crate::cheese_battle::rng::CheeseRng;

    fn bots(count: usize) -> Vec<Recruit> {
        (0..count)
            .map(|i| Recruit {
                name: format!("Bot {}", i + 1),
                is_bot: true,
                color: PlayerColor::Blue,
            })
            .collect()
    }

    fn layout(cells: Vec<Vec<Direction>>, spot: SpotLocation) -> MapLayout {
        MapLayout::new(Board::without_cheese(cells).unwrap(), spot)
    }

    fn pos<R: GameRng>(state: &GameState<R>, x: usize, y: usize) -> BoardPosition {
        BoardPosition::new(state.board(), x, y).unwrap()
    }

    fn quiet() -> PlayOptions {
        PlayOptions {
            auto_run: true,
            output_game: true,
            style: BoardStyle::plain(),
        }
    }

    #[test]
    fn test_new_requires_players() {
        let result = GameState::new(
            layout(vec![vec![Up, Win]], SpotLocation::TopLeft),
            vec![],
            Rules::default(),
            Dice::new(DiceMode::Ones, &[]),
            MockRng::default(),
        );
        assert!(matches!(result, Err(GameError::NoPlayers)));
    }

    #[test]
    fn test_players_start_on_fixed_spot() {
        let state = GameState::new(
            layout(vec![vec![Right; 4]; 3], SpotLocation::BottomRight),
            bots(3),
            Rules::default(),
            Dice::new(DiceMode::Ones, &[]),
            MockRng::default(),
        )
        .unwrap();
        let corner = pos(&state, 3, 2);
        assert!(state.players().iter().all(|p| p.position() == corner));
        assert!(state.players().iter().all(|p| p.stuck_turns == 0));
    }

    #[test]
    fn test_random_start_spreads_players_off_the_winning_cell() {
        let state = GameState::new(
            layout(
                vec![vec![Up, Up, Up], vec![Up, Win, Up], vec![Up, Up, Up]],
                SpotLocation::Random,
            ),
            bots(4),
            Rules::default(),
            Dice::new(DiceMode::Ones, &[]),
            CheeseRng::seeded(4),
        )
        .unwrap();
        let mut positions = state.players().positions();
        assert!(positions.iter().all(|p| !state.board().is_win(*p)));
        positions.sort_by_key(|p| (p.x(), p.y()));
        positions.dedup();
        assert_eq!(positions.len(), 4);
    }

    #[test]
    fn test_random_open_cell_never_picks_win() {
        let board = Board::without_cheese(vec![vec![Win, Up], vec![Win, Win]]).unwrap();
        let only = BoardPosition::new(&board, 1, 0).unwrap();
        // Even with the only free cell taken, the fallback avoids winning cells
        let picked = random_open_cell(&board, &[only], &mut MockRng::default());
        assert_eq!(picked, Some(only));

        let all_win = Board::without_cheese(vec![vec![Win]]).unwrap();
        assert_eq!(random_open_cell(&all_win, &[], &mut MockRng::default()), None);
    }

    #[test]
    fn test_round_ends_on_win() {
        let mut state = GameState::new(
            layout(vec![vec![Up], vec![Up], vec![Win]], SpotLocation::TopLeft),
            bots(2),
            Rules::default(),
            Dice::new(DiceMode::Sequence, &[2, 1]),
            MockRng::default(),
        )
        .unwrap();
        let mut choices = ScriptedChoices::default();
        let mut display = NullDisplay;
        let mut io = Io::new(&mut choices, &mut display);
        let outcome = state.run_round(&mut io).unwrap();

        assert_eq!(outcome, RoundOutcome::Won(PlayerId::new(0)));
        assert!(state.is_over());
        // Bot 2 never got to roll
        assert_eq!(state.player(PlayerId::new(1)).position(), pos(&state, 0, 0));
    }

    #[test]
    fn test_all_stuck_after_threshold() {
        // Every roll leaves the board
        let rules = Rules {
            stuck_fix: Some(StuckFix {
                max_stuck_time: 4,
                cool_down_turns: 1,
            }),
            ..Rules::default()
        };
        let mut state = GameState::new(
            layout(vec![vec![Down, Down], vec![Up, Win]], SpotLocation::TopLeft),
            bots(1),
            rules,
            Dice::new(DiceMode::Ones, &[]),
            MockRng::default(),
        )
        .unwrap();
        let mut choices = ScriptedChoices::default();
        let mut display = NullDisplay;
        let mut io = Io::new(&mut choices, &mut display);

        // Threshold is players * (4 / 2) = 2 stuck jumps
        assert_eq!(state.run_round(&mut io).unwrap(), RoundOutcome::Continue);
        assert_eq!(state.stuck_players(), 1);
        assert_eq!(state.run_round(&mut io).unwrap(), RoundOutcome::AllStuck);
        assert_eq!(state.player(PlayerId::new(0)).stuck_turns, 2);
    }

    #[test]
    fn test_stuck_counter_resets_when_someone_moves() {
        let rules = Rules {
            stuck_fix: Some(StuckFix {
                max_stuck_time: 10,
                cool_down_turns: 1,
            }),
            ..Rules::default()
        };
        let mut state = GameState::new(
            layout(vec![vec![Down, Right, Right, Right, Win]], SpotLocation::TopLeft),
            bots(2),
            rules,
            Dice::new(DiceMode::Ones, &[]),
            MockRng::default(),
        )
        .unwrap();
        let mut choices = ScriptedChoices::default();
        let mut display = NullDisplay;
        let mut io = Io::new(&mut choices, &mut display);
        // Both ships sit on a Down cell in row 0, so both fall off
        assert_eq!(state.run_round(&mut io).unwrap(), RoundOutcome::Continue);
        assert_eq!(state.stuck_players(), 2);
        let ahead = pos(&state, 1, 0);
        state.players[PlayerId::new(0)].set_position(ahead);
        // Bot 1 moves on, Bot 2 fails again: 3 >= 2 players, threshold 10
        assert_eq!(state.run_round(&mut io).unwrap(), RoundOutcome::Continue);
        assert_eq!(state.stuck_players(), 3);
    }

    #[test]
    fn test_play_until_win_in_auto_run() {
        let mut state = GameState::new(
            layout(vec![vec![Right, Right, Right, Win]], SpotLocation::TopLeft),
            bots(2),
            Rules::default(),
            Dice::new(DiceMode::Ones, &[]),
            MockRng::default(),
        )
        .unwrap();
        let mut choices = ScriptedChoices::default();
        let mut display = Transcript::default();
        let mut io = Io::new(&mut choices, &mut display);
        let end = state.play(&mut io, &quiet()).unwrap();

        assert_eq!(end, GameEnd::Won(PlayerId::new(0)));
        assert_eq!(state.winner(), Some(PlayerId::new(0)));
        assert!(display.contains("Bot 1 has won!"));
        assert!(choices.prompts.is_empty());
    }

    #[test]
    fn test_play_pauses_between_rounds_and_asks_to_quit() {
        let rules = Rules {
            stuck_fix: Some(StuckFix {
                max_stuck_time: 2,
                cool_down_turns: 1,
            }),
            ..Rules::default()
        };
        let mut state = GameState::new(
            layout(vec![vec![Down, Win]], SpotLocation::TopLeft),
            bots(1),
            rules,
            Dice::new(DiceMode::Ones, &[]),
            MockRng::default(),
        )
        .unwrap();
        let mut choices = ScriptedChoices::new(vec![Answer::Yes]);
        let mut display = NullDisplay;
        let mut io = Io::new(&mut choices, &mut display);
        let options = PlayOptions {
            auto_run: false,
            output_game: true,
            style: BoardStyle::plain(),
        };
        let end = state.play(&mut io, &options).unwrap();

        assert_eq!(end, GameEnd::Abandoned);
        assert_eq!(
            choices.prompts,
            vec!["Press enter to continue.", "Quit this game? y/n: "]
        );
    }

    #[test]
    fn test_round_limit() {
        let rules = Rules {
            max_rounds: 3,
            ..Rules::default()
        };
        let mut state = GameState::new(
            layout(vec![vec![Left, Win]], SpotLocation::TopLeft),
            bots(1),
            rules,
            Dice::new(DiceMode::Ones, &[]),
            MockRng::default(),
        )
        .unwrap();
        let mut choices = ScriptedChoices::default();
        let mut display = NullDisplay;
        let mut io = Io::new(&mut choices, &mut display);
        assert_eq!(state.play(&mut io, &quiet()).unwrap(), GameEnd::RoundLimit);
        assert_eq!(state.rounds(), 3);
    }

    #[test]
    fn test_hidden_output_never_pauses() {
        let rules = Rules {
            max_rounds: 2,
            ..Rules::default()
        };
        let mut state = GameState::new(
            layout(vec![vec![Left, Win]], SpotLocation::TopLeft),
            bots(1),
            rules,
            Dice::new(DiceMode::Ones, &[]),
            MockRng::default(),
        )
        .unwrap();
        let mut choices = ScriptedChoices::default();
        let mut display = NullDisplay;
        let mut io = Io::new(&mut choices, &mut display);
        let options = PlayOptions {
            auto_run: false,
            output_game: false,
            style: BoardStyle::plain(),
        };
        assert_eq!(state.play(&mut io, &options).unwrap(), GameEnd::RoundLimit);
        assert!(choices.prompts.is_empty());
    }

    #[test]
    fn test_reset_regenerates_and_clears() {
        let config = MapConfig {
            width: 6,
            height: 5,
            winning_spot: SpotLocation::Middle,
            starting_spot: SpotLocation::BottomLeft,
            cheese: CheeseDistribution::Count(4),
        };
        let mut state = GameState::new(
            layout(vec![vec![Right, Win]], SpotLocation::TopLeft),
            bots(2),
            Rules::default(),
            Dice::new(DiceMode::Ones, &[]),
            CheeseRng::seeded(8),
        )
        .unwrap()
        .with_map_generation(config);
        state.game_over = true;
        state.stuck_players = 3;
        state.players[PlayerId::new(1)].stuck_turns = 5;

        state.reset().unwrap();
        assert!(!state.is_over());
        assert_eq!(state.stuck_players(), 0);
        assert_eq!(state.board().width(), 6);
        assert_eq!(state.board().height(), 5);
        assert_eq!(state.starting_spot(), SpotLocation::BottomLeft);
        assert_eq!(state.board().cheese_cells(), 4);
        let start = pos(&state, 0, 4);
        assert!(state
            .players()
            .iter()
            .all(|p| p.position() == start && p.stuck_turns == 0));
    }
}
