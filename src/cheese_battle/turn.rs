use crate::cheese_battle::board::BoardPosition;
use crate::cheese_battle::game_state::{random_open_cell, GameError, GameState, StuckFix};
use crate::cheese_battle::input::Io;
use crate::cheese_battle::player::PlayerId;
use crate::cheese_battle::rng::GameRng;
use tracing::{debug, info};

/// How a single turn ended.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TurnOutcome {
    Moved {
        from: BoardPosition,
        to: BoardPosition,
        roll: u32,
        bounces: u32,
    },
    /// Emergency jump after being stuck too long. No roll was made.
    Rescued(BoardPosition),
    CoolingDown {
        remaining: i32,
    },
    /// The landing cell was still taken after `max_bounce` bounces. A bounce
    /// that finds a free cell on the last allowed step still lands there.
    BounceLimitExceeded {
        roll: u32,
    },
    OffMap {
        roll: u32,
    },
}

impl<R: GameRng> GameState<R> {
    pub fn play_turn(&mut self, id: PlayerId, io: &mut Io<'_>) -> Result<TurnOutcome, GameError> {
        self.resolve_turn(id, io, 0)
    }

    // `depth` counts how many second jumps led to this call
    pub(super) fn resolve_turn(
        &mut self,
        id: PlayerId,
        io: &mut Io<'_>,
        depth: u32,
    ) -> Result<TurnOutcome, GameError> {
        if let Some(fix) = self.rules.stuck_fix {
            if self.players[id].stuck_turns > fix.max_stuck_time {
                return Ok(self.rescue(id, fix, io));
            }
        }

        let stuck_turns = self.players[id].stuck_turns;
        if stuck_turns < 0 {
            io.say(format!("Ship on cooldown for {} turn(s)", -stuck_turns));
            self.players[id].stuck_turns += 1;
            return Ok(TurnOutcome::CoolingDown {
                remaining: -(stuck_turns + 1),
            });
        }

        let roll = self.dice.roll(&mut self.rng);
        io.say(format!("{} has rolled {}!", self.players[id].name(), roll));

        // Direction comes from the cell the ship leaves, distance from the roll
        let from = self.players[id].position();
        let (fx, fy) = from.signed();
        let (mut x, mut y) = self.board.cell(from).step(fx, fy, roll as i32);

        let mut bounces = 0;
        while let Some(blocked) = self.occupied_by_other(x, y, id) {
            if bounces >= self.rules.max_bounce {
                io.say("Recursion detected in the space time continuum!");
                io.say("Traveling to before recursion detected!");
                io.say("Jump Failed!");
                self.mark_stuck(id);
                info!(
                    "{} hit the bounce limit after rolling {}",
                    self.players[id].name(),
                    roll
                );
                return Ok(TurnOutcome::BounceLimitExceeded { roll });
            }
            bounces += 1;
            io.say("Jump space occupied! Recalculating!");
            (x, y) = self.board.cell(blocked).step(x, y, 1);
        }

        let to = match BoardPosition::from_signed(&self.board, x, y) {
            Ok(pos) => pos,
            Err(e) => {
                io.say("No existing jump lanes found!");
                io.say("Jump Failed!");
                self.mark_stuck(id);
                debug!("{} left the board: {}", self.players[id].name(), e);
                return Ok(TurnOutcome::OffMap { roll });
            }
        };

        let player = &mut self.players[id];
        player.set_position(to);
        player.stuck_turns = 0;
        io.say(format!("Jump Successful! Jumped to {}", to));

        if self.board.cheese(to) > 0 {
            self.trigger_cheese(id, io, depth)?;
        }

        // A power may have moved the ship again, so check where it is now
        if self.board.is_win(self.players[id].position()) {
            self.game_over = true;
            self.winner = Some(id);
        }

        Ok(TurnOutcome::Moved {
            from,
            to,
            roll,
            bounces,
        })
    }

    fn occupied_by_other(&self, x: i32, y: i32, id: PlayerId) -> Option<BoardPosition> {
        BoardPosition::from_signed(&self.board, x, y)
            .ok()
            .filter(|pos| self.players.is_occupied_by_other(*pos, id))
    }

    fn rescue(&mut self, id: PlayerId, fix: StuckFix, io: &mut Io<'_>) -> TurnOutcome {
        io.say("Warp tunnel anomaly detected!");
        io.say("Initiating emergency jump!");

        let taken = self.players.positions();
        let pos = random_open_cell(&self.board, &taken, &mut self.rng)
            .unwrap_or_else(|| self.players[id].position());
        let player = &mut self.players[id];
        player.set_position(pos);
        player.stuck_turns = -fix.cool_down_turns;

        io.say("Jump successful!");
        io.say(format!("Arrived at new coordinates {}.", pos));
        io.say(format!(
            "Ship on cooldown for {} turns.",
            fix.cool_down_turns
        ));
        info!("{} was rescued to {}", player.name(), pos);
        TurnOutcome::Rescued(pos)
    }
}
