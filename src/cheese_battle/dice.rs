use crate::cheese_battle::rng::GameRng;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SEQUENCE: [u32; 4] = [2, 2, 3, 3];
const DIE_SIDES: u32 = 6;

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum DiceMode {
    Ones,
    Sequence,
    Standard,
}

/// The die every player in a game rolls.
///
/// `Sequence` advances once per roll no matter who rolled, so its position
/// carries across turns and players for the whole game.
#[derive(Clone, Debug)]
pub struct Dice {
    mode: DiceMode,
    sequence: Vec<u32>,
    position: usize,
}

impl Dice {
    pub fn new(mode: DiceMode, sequence: &[u32]) -> Self {
        let sequence = if sequence.is_empty() {
            DEFAULT_SEQUENCE.to_vec()
        } else {
            sequence.to_vec()
        };
        Dice {
            mode,
            sequence,
            position: 0,
        }
    }

    pub fn mode(&self) -> DiceMode {
        self.mode
    }

    pub fn roll<R: GameRng>(&mut self, rng: &mut R) -> u32 {
        match self.mode {
            DiceMode::Ones => 1,
            DiceMode::Sequence => {
                let spots = self.sequence[self.position];
                self.position = (self.position + 1) % self.sequence.len();
                spots
            }
            DiceMode::Standard => rng.roll(DIE_SIDES),
        }
    }
}
