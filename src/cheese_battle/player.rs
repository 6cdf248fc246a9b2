use crate::cheese_battle::board::BoardPosition;
use crate::cheese_battle::input::{ChoiceError, Io};
use crate::cheese_battle::rng::GameRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use tracing::info;

const NAME_MIN_LEN: usize = 1;
const NAME_MAX_LEN: usize = 20;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlayerId(usize);

impl PlayerId {
    pub const fn new(idx: usize) -> Self {
        PlayerId(idx)
    }

    pub fn idx(&self) -> usize {
        self.0
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayerColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkCyan,
    DarkRed,
    DarkMagenta,
    DarkYellow,
    Gray,
    DarkGray,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}

impl PlayerColor {
    pub const DEFAULT_PALETTE: [PlayerColor; 8] = [
        PlayerColor::DarkBlue,
        PlayerColor::DarkGreen,
        PlayerColor::DarkCyan,
        PlayerColor::DarkRed,
        PlayerColor::DarkMagenta,
        PlayerColor::DarkGray,
        PlayerColor::Blue,
        PlayerColor::Red,
    ];
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Who is playing, before they have a place on a board.
#[derive(Clone, Debug, PartialEq)]
pub struct Recruit {
    pub name: String,
    pub is_bot: bool,
    pub color: PlayerColor,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    id: PlayerId,
    name: String,
    is_bot: bool,
    color: PlayerColor,
    position: BoardPosition,
    // Positive: turns in a row without moving. Negative: cooldown left after a rescue.
    pub stuck_turns: i32,
}

impl Player {
    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_bot(&self) -> bool {
        self.is_bot
    }

    pub fn color(&self) -> PlayerColor {
        self.color
    }

    pub fn position(&self) -> BoardPosition {
        self.position
    }

    pub fn set_position(&mut self, position: BoardPosition) {
        self.position = position;
    }
}

/// Every player in the game, in turn order.
#[derive(Clone, Debug)]
pub struct Players(Vec<Player>);

impl Index<PlayerId> for Players {
    type Output = Player;
    fn index(&self, index: PlayerId) -> &Self::Output {
        &self.0[index.0]
    }
}

impl IndexMut<PlayerId> for Players {
    fn index_mut(&mut self, index: PlayerId) -> &mut Self::Output {
        &mut self.0[index.0]
    }
}

impl Players {
    // Everyone starts on `start`; the game moves them to real starting cells on reset
    pub fn new(recruits: Vec<Recruit>, start: BoardPosition) -> Self {
        Players(
            recruits
                .into_iter()
                .enumerate()
                .map(|(idx, recruit)| Player {
                    id: PlayerId(idx),
                    name: recruit.name,
                    is_bot: recruit.is_bot,
                    color: recruit.color,
                    position: start,
                    stuck_turns: 0,
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.0.iter_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.0.len()).map(PlayerId)
    }

    pub fn positions(&self) -> Vec<BoardPosition> {
        self.0.iter().map(|p| p.position).collect()
    }

    pub fn is_occupied(&self, pos: BoardPosition) -> bool {
        self.0.iter().any(|p| p.position == pos)
    }

    pub fn is_occupied_by_other(&self, pos: BoardPosition, id: PlayerId) -> bool {
        self.0.iter().any(|p| p.id != id && p.position == pos)
    }

    pub fn at(&self, pos: BoardPosition) -> Option<&Player> {
        self.0.iter().find(|p| p.position == pos)
    }
}

/// Ask how many humans and bots will play, then collect names and colors.
///
/// Colors are taken out of the pool as they are handed out. Once the pool is
/// empty it is refilled from `palette`, so large rosters share colors.
pub fn enlist<R: GameRng>(
    max_players: usize,
    palette: &[PlayerColor],
    io: &mut Io<'_>,
    rng: &mut R,
) -> Result<Vec<Recruit>, ChoiceError> {
    let max_players = max_players.max(1);
    let palette: Vec<PlayerColor> = if palette.is_empty() {
        PlayerColor::DEFAULT_PALETTE.to_vec()
    } else {
        palette.to_vec()
    };

    let humans = io.choices.number(
        &format!(
            "Please enter the number of players who want to play [0-{}]: ",
            max_players
        ),
        0,
        max_players,
    )?;
    let bots = if humans < max_players {
        let min_bots = if humans == 0 { 1 } else { 0 };
        let max_bots = max_players - humans;
        io.choices.number(
            &format!(
                "Please enter the number of bots [{}-{}]: ",
                min_bots, max_bots
            ),
            min_bots,
            max_bots,
        )?
    } else {
        0
    };

    let mut pool = palette.clone();
    let mut recruits = Vec::with_capacity(humans + bots);
    for i in 0..humans + bots {
        if pool.is_empty() {
            pool = palette.clone();
        }
        let recruit = if i < humans {
            let name = io.choices.text(
                &format!("Please enter name for player {}: ", i + 1),
                NAME_MIN_LEN,
                NAME_MAX_LEN,
            )?;
            io.say("Color options:");
            let options: Vec<String> = pool.iter().map(|c| c.to_string()).collect();
            let choice = io.pick("Please select color choice", &options)?;
            Recruit {
                name,
                is_bot: false,
                color: pool.remove(choice),
            }
        } else {
            let choice = rng.below(pool.len());
            Recruit {
                name: format!("Bot {}", i - humans + 1),
                is_bot: true,
                color: pool.remove(choice),
            }
        };
        info!("Enlisted {} ({})", recruit.name, recruit.color);
        recruits.push(recruit);
    }
    Ok(recruits)
}
