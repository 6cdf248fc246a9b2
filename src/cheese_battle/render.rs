use crate::cheese_battle::board::Direction;
use crate::cheese_battle::game_state::GameState;
use crate::cheese_battle::player::PlayerColor;
use crate::cheese_battle::rng::GameRng;
use crossterm::style::{style, Color, Stylize};
use serde::{Deserialize, Serialize};

const CHEESE_MARK: char = '*';

/// Glyph drawn for each direction.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DirectionChars {
    pub up: char,
    pub down: char,
    pub left: char,
    pub right: char,
    pub win: char,
}

impl Default for DirectionChars {
    fn default() -> Self {
        DirectionChars {
            up: '↑',
            down: '↓',
            left: '←',
            right: '→',
            win: '♕',
        }
    }
}

impl DirectionChars {
    pub fn glyph(&self, direction: Direction) -> char {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Win => self.win,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoardStyle {
    pub line_char: char,
    /// Columns available for centering.
    pub width: usize,
    pub directions: DirectionChars,
    /// Plain boards mark ships with their turn number and cheese with `*`.
    pub colored: bool,
}

impl Default for BoardStyle {
    fn default() -> Self {
        BoardStyle {
            line_char: '=',
            width: 60,
            directions: DirectionChars::default(),
            colored: true,
        }
    }
}

impl BoardStyle {
    pub fn plain() -> Self {
        BoardStyle {
            colored: false,
            ..BoardStyle::default()
        }
    }

    fn rule(&self) -> String {
        self.line_char.to_string().repeat(self.width)
    }

    fn centered(&self, text: &str) -> String {
        format!("{:^width$}", text, width = self.width)
            .trim_end()
            .to_string()
    }
}

pub fn color_of(color: PlayerColor) -> Color {
    match color {
        PlayerColor::Black => Color::Black,
        PlayerColor::DarkBlue => Color::DarkBlue,
        PlayerColor::DarkGreen => Color::DarkGreen,
        PlayerColor::DarkCyan => Color::DarkCyan,
        PlayerColor::DarkRed => Color::DarkRed,
        PlayerColor::DarkMagenta => Color::DarkMagenta,
        PlayerColor::DarkYellow => Color::DarkYellow,
        PlayerColor::Gray => Color::Grey,
        PlayerColor::DarkGray => Color::DarkGrey,
        PlayerColor::Blue => Color::Blue,
        PlayerColor::Green => Color::Green,
        PlayerColor::Cyan => Color::Cyan,
        PlayerColor::Red => Color::Red,
        PlayerColor::Magenta => Color::Magenta,
        PlayerColor::Yellow => Color::Yellow,
        PlayerColor::White => Color::White,
    }
}

// Highest row first, so row 0 sits at the bottom
pub fn board_lines<R: GameRng>(state: &GameState<R>, style_opts: &BoardStyle) -> Vec<String> {
    let board = state.board();
    let width = board.width();
    let pad = " ".repeat(style_opts.width.saturating_sub(width + 2) / 2);
    let border = format!("{}{}", pad, "-".repeat(width + 2));

    let mut lines = Vec::with_capacity(board.height() + 2);
    lines.push(border.clone());
    for row in board.display_rows() {
        let mut line = format!("{}|", pad);
        for pos in row {
            let glyph = style_opts.directions.glyph(board.cell(pos));
            let occupant = state.players().at(pos);
            let has_cheese = board.cheese(pos) > 0;
            if style_opts.colored {
                let mut cell = style(glyph);
                if has_cheese {
                    cell = cell.with(Color::DarkYellow);
                }
                if let Some(player) = occupant {
                    cell = cell.on(color_of(player.color()));
                }
                line.push_str(&cell.to_string());
            } else {
                match occupant {
                    Some(player) => line.push_str(&(player.id().idx() + 1).to_string()),
                    None if has_cheese => line.push(CHEESE_MARK),
                    None => line.push(glyph),
                }
            }
        }
        line.push('|');
        lines.push(line);
    }
    lines.push(border);
    lines
}

pub fn status_report<R: GameRng>(state: &GameState<R>, style_opts: &BoardStyle) -> Vec<String> {
    let mut lines = vec![
        style_opts.rule(),
        style_opts.centered("Hyperspace Cheese Battle Status Report"),
        style_opts.rule(),
        style_opts.centered("Current Map"),
    ];
    lines.extend(board_lines(state, style_opts));
    lines.push(style_opts.rule());

    lines.push("Player position(s):".to_string());
    for player in state.players().iter() {
        let name = if style_opts.colored {
            style(player.name()).on(color_of(player.color())).to_string()
        } else {
            player.name().to_string()
        };
        lines.push(format!("{} is on square {}", name, player.position()));
    }
    lines.push(style_opts.rule());

    if let Some(id) = state.winner() {
        let crown = style_opts.directions.win;
        let player = state.player(id);
        let banner = style_opts.centered(&format!("{} {} has won! {}", crown, player.name(), crown));
        if style_opts.colored {
            lines.push(style(banner).on(color_of(player.color())).to_string());
        } else {
            lines.push(banner);
        }
        lines.push(style_opts.rule());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cheese_battle::board::Direction::*;
    use crate::cheese_battle::board::{Board, BoardPosition, SpotLocation};
    use crate::cheese_battle::dice::{Dice, DiceMode};
    use crate::cheese_battle::game_state::Rules;
    use crate::cheese_battle::map_string::MapLayout;
    use crate::cheese_battle::player::{PlayerId, Recruit};
    use crate::cheese_battle::rng::mock::MockRng;

    fn small_game() -> GameState<MockRng> {
        let board = Board::new(
            vec![vec![Up, Right, Down], vec![Left, Up, Win]],
            vec![vec![0, 0, 1], vec![0, 0, 0]],
        )
        .unwrap();
        let recruits = vec![
            Recruit {
                name: "Ada".to_string(),
                is_bot: false,
                color: PlayerColor::Red,
            },
            Recruit {
                name: "Bot 1".to_string(),
                is_bot: true,
                color: PlayerColor::Blue,
            },
        ];
        let mut state = GameState::new(
            MapLayout::new(board, SpotLocation::TopLeft),
            recruits,
            Rules::default(),
            Dice::new(DiceMode::Ones, &[]),
            MockRng::default(),
        )
        .unwrap();
        let pos = BoardPosition::new(state.board(), 1, 1).unwrap();
        state.players[PlayerId::new(1)].set_position(pos);
        state
    }

    #[test]
    fn test_plain_board_draws_top_row_first() {
        let state = small_game();
        let style_opts = BoardStyle {
            width: 5,
            ..BoardStyle::plain()
        };
        assert_eq!(
            board_lines(&state, &style_opts),
            vec!["-----", "|←2♕|", "|1→*|", "-----"]
        );
    }

    #[test]
    fn test_board_is_centered() {
        let state = small_game();
        let style_opts = BoardStyle {
            width: 11,
            ..BoardStyle::plain()
        };
        assert_eq!(board_lines(&state, &style_opts)[0], "   -----");
    }

    #[test]
    fn test_custom_glyphs() {
        let chars = DirectionChars {
            up: '^',
            down: 'v',
            left: '<',
            right: '>',
            win: 'W',
        };
        assert_eq!(chars.glyph(Up), '^');
        assert_eq!(chars.glyph(Win), 'W');
        assert_eq!(DirectionChars::default().glyph(Left), '←');
    }

    #[test]
    fn test_status_report_lists_players_and_winner() {
        let mut state = small_game();
        let style_opts = BoardStyle {
            width: 20,
            ..BoardStyle::plain()
        };
        let lines = status_report(&state, &style_opts);
        assert_eq!(lines[0], "=".repeat(20));
        assert!(lines.contains(&"Ada is on square (0, 0)".to_string()));
        assert!(lines.contains(&"Bot 1 is on square (1, 1)".to_string()));
        assert!(!lines.iter().any(|l| l.contains("has won")));

        state.winner = Some(PlayerId::new(0));
        state.game_over = true;
        let lines = status_report(&state, &style_opts);
        assert!(lines.iter().any(|l| l.trim() == "♕ Ada has won! ♕"));
    }

    #[test]
    fn test_colored_board_keeps_glyphs() {
        let state = small_game();
        let lines = board_lines(&state, &BoardStyle::default());
        assert!(lines[1].contains('←'));
        assert!(lines[1].contains('♕'));
        assert!(lines[2].contains('↓'));
    }
}
