use crate::cheese_battle::board::BoardPosition;
use crate::cheese_battle::game_state::{GameError, GameState};
use crate::cheese_battle::input::Io;
use crate::cheese_battle::player::PlayerId;
use crate::cheese_battle::rng::GameRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum CheesePower {
    Deathray,
    SecondJump,
}

impl CheesePower {
    pub const ALL: [CheesePower; 2] = [CheesePower::Deathray, CheesePower::SecondJump];

    pub fn description(&self) -> &'static str {
        match self {
            CheesePower::Deathray => "Charge the Cheese Death ray and fire at a competitor!",
            CheesePower::SecondJump => "Supercharge engines and perform a second jump!",
        }
    }
}

impl fmt::Display for CheesePower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl<R: GameRng> GameState<R> {
    /// Let `id` spend the cheese it just landed on.
    pub(super) fn trigger_cheese(
        &mut self,
        id: PlayerId,
        io: &mut Io<'_>,
        depth: u32,
    ) -> Result<(), GameError> {
        io.say("Scanners detect high concentration of Cheese Power!");
        io.say("Deploying Cheese Power Vacuum!");
        if self.rules.powers.is_empty() {
            io.say("Cheese Power Vacuum is offline. The cheese drifts away.");
            return Ok(());
        }
        io.say("Determine what to do with the excess Cheese Power:");

        let powers = self.rules.powers.clone();
        let choice = if self.players[id].is_bot() {
            for (i, power) in powers.iter().enumerate() {
                io.say(format!("{}) {}", i + 1, power.description()));
            }
            self.rng.below(powers.len())
        } else {
            let options: Vec<String> = powers.iter().map(|p| p.description().to_string()).collect();
            io.pick("Please enter choice", &options)?
        };
        let power = powers[choice];
        info!("{} used {}", self.players[id].name(), power);

        match power {
            CheesePower::Deathray => self.fire_deathray(id, io),
            CheesePower::SecondJump => {
                if depth >= self.rules.max_chained_jumps {
                    io.say("Engines overheated! Second jump aborted!");
                    info!("Second jump for {} capped at depth {}", self.players[id].name(), depth);
                    return Ok(());
                }
                io.say("Engines overcharged! Preparing for second jump!");
                self.resolve_turn(id, io, depth + 1).map(|_| ())
            }
        }
    }

    fn fire_deathray(&mut self, id: PlayerId, io: &mut Io<'_>) -> Result<(), GameError> {
        if self.players.len() == 1 {
            io.say("Error! No hostile ships detected!");
            io.say("Warning! Cheese Deathray already charged!");
            io.say("Firing at random to prevent self destruction!");
            io.say("Hopefully nothing important was hit...");
            return Ok(());
        }

        io.say("Target options:");
        let target = if self.players[id].is_bot() {
            for (i, player) in self.players.iter().enumerate() {
                io.say(format!("{}) {}", i + 1, player.name()));
            }
            PlayerId::new(self.rng.below(self.players.len()))
        } else {
            let names: Vec<String> = self.players.iter().map(|p| p.name().to_string()).collect();
            PlayerId::new(io.pick("Please select the target", &names)?)
        };

        let shooter = self.players[id].name().to_string();
        let victim = self.players[target].name().to_string();
        // Shooting yourself is allowed, the ship just complains about it
        if target == id {
            io.say(format!("Error! Selected target is {}!", shooter));
            io.say("Oh No! The computer accepted the target!");
        }
        io.say(format!("{} fires at {}!", shooter, victim));
        io.say(format!("{} was hit and forced out of the jump lanes!", victim));
        io.say(format!(
            "Under emergency power {}'s ship limps back to make repairs!",
            victim
        ));
        io.say(format!(
            "After quick repairs {}'s ship is back underway!",
            victim
        ));

        let width = self.board.width();
        let column = if self.players[target].is_bot() {
            self.rng.below(width)
        } else {
            io.choices.number(
                &format!(
                    "{} please select starting location [0-{}]: ",
                    victim,
                    width - 1
                ),
                0,
                width - 1,
            )?
        };
        let landing = BoardPosition::new(&self.board, column, 0)?;
        let player = &mut self.players[target];
        player.set_position(landing);
        player.stuck_turns = 0;
        io.say(format!("{} is now at sector {}", victim, landing));
        info!("{} shot {} back to {}", shooter, victim, landing);
        Ok(())
    }
}
