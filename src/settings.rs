use crate::cheese_battle::{
    BoardStyle, CheeseDistribution, CheesePower, ChoiceError, Dice, DiceMode, DirectionChars, Io,
    MapConfig, MapLayout, PlayerColor, Rules, SpotLocation, StuckFix, DEFAULT_MAP,
    DEFAULT_SEQUENCE,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Could not access settings file: {0}")]
    Io(#[from] io::Error),
    #[error("Settings file is not valid: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    pub general: General,
    pub cheese: Cheese,
    pub map_generation: MapGeneration,
    pub display: Display,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct General {
    pub map_string: String,
    pub dice_mode: DiceMode,
    pub dice_sequence: Vec<u32>,
    pub max_players: usize,
    pub max_bounce: u32,
    pub stuck_fix: bool,
    pub max_stuck_time: i32,
    pub cool_down_turns: i32,
    pub max_chained_jumps: u32,
    /// 0 plays until someone wins.
    pub max_rounds: u32,
}

impl Default for General {
    fn default() -> Self {
        General {
            map_string: DEFAULT_MAP.to_string(),
            dice_mode: DiceMode::Standard,
            dice_sequence: DEFAULT_SEQUENCE.to_vec(),
            max_players: 4,
            max_bounce: 5,
            stuck_fix: false,
            max_stuck_time: 2,
            cool_down_turns: 1,
            max_chained_jumps: 8,
            max_rounds: 0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Cheese {
    pub deathray: bool,
    pub second_jump: bool,
}

impl Default for Cheese {
    fn default() -> Self {
        Cheese {
            deathray: true,
            second_jump: true,
        }
    }
}

impl Cheese {
    pub fn enabled_powers(&self) -> Vec<CheesePower> {
        CheesePower::ALL
            .into_iter()
            .filter(|power| match power {
                CheesePower::Deathray => self.deathray,
                CheesePower::SecondJump => self.second_jump,
            })
            .collect()
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum CheeseMode {
    Count,
    Chance,
    Percentage,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct MapGeneration {
    pub generate_map: bool,
    pub width: usize,
    pub height: usize,
    pub winning_spot: SpotLocation,
    pub starting_spot: SpotLocation,
    pub cheese_mode: CheeseMode,
    pub cheese_count: usize,
    pub cheese_chance: f64,
    pub cheese_percentage: f64,
}

impl Default for MapGeneration {
    fn default() -> Self {
        MapGeneration {
            generate_map: false,
            width: 10,
            height: 10,
            winning_spot: SpotLocation::BottomRight,
            starting_spot: SpotLocation::TopLeft,
            cheese_mode: CheeseMode::Count,
            cheese_count: 5,
            cheese_chance: 10.0,
            cheese_percentage: 10.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Display {
    pub output_game: bool,
    pub auto_run: bool,
    pub colored: bool,
    pub line_char: char,
    pub line_width: usize,
    pub directions: DirectionChars,
    pub colors: Vec<PlayerColor>,
}

impl Default for Display {
    fn default() -> Self {
        Display {
            output_game: true,
            auto_run: false,
            colored: true,
            line_char: '=',
            line_width: 60,
            directions: DirectionChars::default(),
            colors: PlayerColor::DEFAULT_PALETTE.to_vec(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Read `path`, writing the defaults there first if it does not exist yet.
    /// Anything unreadable is logged and replaced by the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            let settings = Settings::default();
            if let Err(e) = settings.save(path) {
                warn!("Could not write default settings: {}", e);
            }
            return settings;
        }
        match Settings::load(path) {
            Ok(settings) => {
                info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                warn!("Falling back to default settings: {}", e);
                Settings::default()
            }
        }
    }

    pub fn rules(&self) -> Rules {
        let general = &self.general;
        Rules {
            max_bounce: general.max_bounce,
            stuck_fix: general.stuck_fix.then_some(StuckFix {
                max_stuck_time: general.max_stuck_time,
                cool_down_turns: general.cool_down_turns,
            }),
            powers: self.cheese.enabled_powers(),
            max_chained_jumps: general.max_chained_jumps,
            max_rounds: general.max_rounds,
        }
    }

    pub fn dice(&self) -> Dice {
        Dice::new(self.general.dice_mode, &self.general.dice_sequence)
    }

    pub fn map_config(&self) -> MapConfig {
        let gen = &self.map_generation;
        let cheese = match gen.cheese_mode {
            CheeseMode::Count => CheeseDistribution::Count(gen.cheese_count),
            CheeseMode::Chance => CheeseDistribution::Chance(gen.cheese_chance),
            CheeseMode::Percentage => CheeseDistribution::Percentage(gen.cheese_percentage),
        };
        MapConfig {
            width: gen.width,
            height: gen.height,
            winning_spot: gen.winning_spot,
            starting_spot: gen.starting_spot,
            cheese,
        }
    }

    pub fn board_style(&self) -> BoardStyle {
        BoardStyle {
            line_char: self.display.line_char,
            width: self.display.line_width,
            directions: self.display.directions.clone(),
            colored: self.display.colored,
        }
    }
}

const SPOTS: [SpotLocation; 6] = [
    SpotLocation::BottomRight,
    SpotLocation::BottomLeft,
    SpotLocation::TopRight,
    SpotLocation::TopLeft,
    SpotLocation::Random,
    SpotLocation::Middle,
];
const SPOT_NAMES: [&str; 6] = [
    "BottomRight",
    "BottomLeft",
    "TopRight",
    "TopLeft",
    "Random",
    "Middle",
];

const DICE_MODES: [DiceMode; 3] = [DiceMode::Ones, DiceMode::Sequence, DiceMode::Standard];
const DICE_MODE_NAMES: [&str; 3] = ["Ones", "Sequence", "Standard"];

const CHEESE_MODES: [CheeseMode; 3] = [CheeseMode::Count, CheeseMode::Chance, CheeseMode::Percentage];
const CHEESE_MODE_NAMES: [&str; 3] = ["Count", "Chance", "Percentage"];

fn index_of<T: PartialEq>(all: &[T], value: &T) -> usize {
    all.iter().position(|v| v == value).unwrap_or(0)
}

fn percent(value: f64) -> usize {
    value.round().clamp(0.0, 100.0) as usize
}

/// How the settings menu changes one entry.
#[derive(Copy, Clone)]
pub enum Editor {
    /// Flipped in place, no prompt.
    Switch {
        read: fn(&Settings) -> bool,
        write: fn(&mut Settings, bool),
    },
    Number {
        read: fn(&Settings) -> usize,
        write: fn(&mut Settings, usize),
        min: usize,
        max: usize,
    },
    /// One of `variants`, stored by index.
    Variant {
        variants: &'static [&'static str],
        read: fn(&Settings) -> usize,
        write: fn(&mut Settings, usize),
    },
    /// Only accepted when it parses as a board.
    MapString,
}

/// A named line in the settings menu.
#[derive(Copy, Clone)]
pub struct Entry {
    pub name: &'static str,
    pub editor: Editor,
}

impl Entry {
    pub fn value(&self, settings: &Settings) -> String {
        match self.editor {
            Editor::Switch { read, .. } => {
                let state = if read(settings) { "on" } else { "off" };
                state.to_string()
            }
            Editor::Number { read, .. } => read(settings).to_string(),
            Editor::Variant { variants, read, .. } => variants
                .get(read(settings))
                .copied()
                .unwrap_or("?")
                .to_string(),
            Editor::MapString => settings.general.map_string.clone(),
        }
    }

    /// Ask for a new value and store it. Returns whether the value changed.
    pub fn edit(&self, settings: &mut Settings, io: &mut Io<'_>) -> Result<bool, ChoiceError> {
        let before = self.value(settings);
        match self.editor {
            Editor::Switch { read, write } => {
                let flipped = !read(settings);
                write(settings, flipped);
            }
            Editor::Number {
                write, min, max, ..
            } => {
                let prompt = format!("New value for {} [{}-{}]: ", self.name, min, max);
                let value = io.choices.number(&prompt, min, max)?;
                write(settings, value);
            }
            Editor::Variant {
                variants, write, ..
            } => {
                let options: Vec<String> = variants.iter().map(|v| v.to_string()).collect();
                let picked = io.pick(&format!("New value for {}", self.name), &options)?;
                write(settings, picked);
            }
            Editor::MapString => {
                let raw = io.choices.text("New map string: ", 1, usize::MAX)?;
                let raw = raw.trim();
                match raw.parse::<MapLayout>() {
                    Ok(_) => settings.general.map_string = raw.to_string(),
                    Err(e) => io.say(format!("Map string rejected: {}", e)),
                }
            }
        }
        let after = self.value(settings);
        io.say(format!("{} = {}", self.name, after));
        Ok(before != after)
    }
}

pub const ENTRIES: [Entry; 24] = [
    Entry {
        name: "Map string",
        editor: Editor::MapString,
    },
    Entry {
        name: "Dice mode",
        editor: Editor::Variant {
            variants: &DICE_MODE_NAMES,
            read: |s: &Settings| index_of(&DICE_MODES, &s.general.dice_mode),
            write: |s: &mut Settings, i: usize| {
                if let Some(mode) = DICE_MODES.get(i) {
                    s.general.dice_mode = *mode;
                }
            },
        },
    },
    Entry {
        name: "Max players",
        editor: Editor::Number {
            read: |s: &Settings| s.general.max_players,
            write: |s: &mut Settings, v: usize| s.general.max_players = v,
            min: 1,
            max: 16,
        },
    },
    Entry {
        name: "Max bounce",
        editor: Editor::Number {
            read: |s: &Settings| s.general.max_bounce as usize,
            write: |s: &mut Settings, v: usize| s.general.max_bounce = v as u32,
            min: 0,
            max: 50,
        },
    },
    Entry {
        name: "Stuck player fix",
        editor: Editor::Switch {
            read: |s: &Settings| s.general.stuck_fix,
            write: |s: &mut Settings, v: bool| s.general.stuck_fix = v,
        },
    },
    Entry {
        name: "Max stuck time",
        editor: Editor::Number {
            read: |s: &Settings| s.general.max_stuck_time.max(0) as usize,
            write: |s: &mut Settings, v: usize| s.general.max_stuck_time = v as i32,
            min: 0,
            max: 50,
        },
    },
    Entry {
        name: "Cool down turns",
        editor: Editor::Number {
            read: |s: &Settings| s.general.cool_down_turns.max(0) as usize,
            write: |s: &mut Settings, v: usize| s.general.cool_down_turns = v as i32,
            min: 0,
            max: 50,
        },
    },
    Entry {
        name: "Max chained jumps",
        editor: Editor::Number {
            read: |s: &Settings| s.general.max_chained_jumps as usize,
            write: |s: &mut Settings, v: usize| s.general.max_chained_jumps = v as u32,
            min: 0,
            max: 50,
        },
    },
    Entry {
        name: "Max rounds (0 for no limit)",
        editor: Editor::Number {
            read: |s: &Settings| s.general.max_rounds as usize,
            write: |s: &mut Settings, v: usize| s.general.max_rounds = v as u32,
            min: 0,
            max: 100_000,
        },
    },
    Entry {
        name: "Cheese deathray",
        editor: Editor::Switch {
            read: |s: &Settings| s.cheese.deathray,
            write: |s: &mut Settings, v: bool| s.cheese.deathray = v,
        },
    },
    Entry {
        name: "Cheese second jump",
        editor: Editor::Switch {
            read: |s: &Settings| s.cheese.second_jump,
            write: |s: &mut Settings, v: bool| s.cheese.second_jump = v,
        },
    },
    Entry {
        name: "Generate map",
        editor: Editor::Switch {
            read: |s: &Settings| s.map_generation.generate_map,
            write: |s: &mut Settings, v: bool| s.map_generation.generate_map = v,
        },
    },
    Entry {
        name: "Map width",
        editor: Editor::Number {
            read: |s: &Settings| s.map_generation.width,
            write: |s: &mut Settings, v: usize| s.map_generation.width = v,
            min: 2,
            max: 100,
        },
    },
    Entry {
        name: "Map height",
        editor: Editor::Number {
            read: |s: &Settings| s.map_generation.height,
            write: |s: &mut Settings, v: usize| s.map_generation.height = v,
            min: 2,
            max: 100,
        },
    },
    Entry {
        name: "Winning spot",
        editor: Editor::Variant {
            variants: &SPOT_NAMES,
            read: |s: &Settings| index_of(&SPOTS, &s.map_generation.winning_spot),
            write: |s: &mut Settings, i: usize| {
                if let Some(spot) = SPOTS.get(i) {
                    s.map_generation.winning_spot = *spot;
                }
            },
        },
    },
    Entry {
        name: "Starting spot",
        editor: Editor::Variant {
            variants: &SPOT_NAMES,
            read: |s: &Settings| index_of(&SPOTS, &s.map_generation.starting_spot),
            write: |s: &mut Settings, i: usize| {
                if let Some(spot) = SPOTS.get(i) {
                    s.map_generation.starting_spot = *spot;
                }
            },
        },
    },
    Entry {
        name: "Cheese mode",
        editor: Editor::Variant {
            variants: &CHEESE_MODE_NAMES,
            read: |s: &Settings| index_of(&CHEESE_MODES, &s.map_generation.cheese_mode),
            write: |s: &mut Settings, i: usize| {
                if let Some(mode) = CHEESE_MODES.get(i) {
                    s.map_generation.cheese_mode = *mode;
                }
            },
        },
    },
    Entry {
        name: "Cheese count",
        editor: Editor::Number {
            read: |s: &Settings| s.map_generation.cheese_count,
            write: |s: &mut Settings, v: usize| s.map_generation.cheese_count = v,
            min: 0,
            max: 10_000,
        },
    },
    Entry {
        name: "Cheese chance (%)",
        editor: Editor::Number {
            read: |s: &Settings| percent(s.map_generation.cheese_chance),
            write: |s: &mut Settings, v: usize| s.map_generation.cheese_chance = v as f64,
            min: 0,
            max: 100,
        },
    },
    Entry {
        name: "Cheese percentage (%)",
        editor: Editor::Number {
            read: |s: &Settings| percent(s.map_generation.cheese_percentage),
            write: |s: &mut Settings, v: usize| s.map_generation.cheese_percentage = v as f64,
            min: 0,
            max: 100,
        },
    },
    Entry {
        name: "Show game output",
        editor: Editor::Switch {
            read: |s: &Settings| s.display.output_game,
            write: |s: &mut Settings, v: bool| s.display.output_game = v,
        },
    },
    Entry {
        name: "Auto run",
        editor: Editor::Switch {
            read: |s: &Settings| s.display.auto_run,
            write: |s: &mut Settings, v: bool| s.display.auto_run = v,
        },
    },
    Entry {
        name: "Colored board",
        editor: Editor::Switch {
            read: |s: &Settings| s.display.colored,
            write: |s: &mut Settings, v: bool| s.display.colored = v,
        },
    },
    Entry {
        name: "Line width",
        editor: Editor::Number {
            read: |s: &Settings| s.display.line_width,
            write: |s: &mut Settings, v: usize| s.display.line_width = v,
            min: 10,
            max: 200,
        },
    },
];

/// Edit settings until the player goes back to the main menu.
///
/// Edits apply to `settings` right away. "Save changes" writes them to `path`
/// and is only offered while something is unsaved.
pub fn settings_menu(
    settings: &mut Settings,
    path: &Path,
    io: &mut Io<'_>,
) -> Result<(), ChoiceError> {
    let mut unsaved = false;
    loop {
        let mut options: Vec<String> = ENTRIES
            .iter()
            .map(|entry| format!("{} = {}", entry.name, entry.value(settings)))
            .collect();
        options.push("Return to main menu".to_string());
        options.push("Reset to default settings".to_string());
        if unsaved {
            options.push("Save changes".to_string());
        }

        let choice = io.pick("Select an option", &options)?;
        if let Some(entry) = ENTRIES.get(choice) {
            unsaved |= entry.edit(settings, io)?;
            continue;
        }
        match choice - ENTRIES.len() {
            0 => return Ok(()),
            1 => {
                *settings = Settings::default();
                unsaved = true;
                info!("Settings reset to defaults");
                io.say("Settings reset to defaults.");
            }
            _ => match settings.save(path) {
                Ok(()) => {
                    unsaved = false;
                    io.say("Settings saved.");
                }
                Err(e) => {
                    error!("Could not save settings: {}", e);
                    io.say(format!("Settings were not saved: {}", e));
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cheese_battle::{Answer, ScriptedChoices, Transcript};
    use std::path::PathBuf;

    fn scratch_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cheese-battle-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.general.max_players, 4);
        assert_eq!(settings.general.dice_mode, DiceMode::Standard);
        assert!(!settings.general.stuck_fix);
        assert_eq!(settings.map_generation.winning_spot, SpotLocation::BottomRight);
        assert_eq!(settings.display.directions, DirectionChars::default());
        assert!(settings.general.map_string.parse::<crate::cheese_battle::MapLayout>().is_ok());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let json = r#"{ "general": { "max_bounce": 2, "stuck_fix": true }, "cheese": { "deathray": false } }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.general.max_bounce, 2);
        assert_eq!(settings.general.max_players, 4);
        assert_eq!(settings.map_generation, MapGeneration::default());

        let rules = settings.rules();
        assert_eq!(rules.max_bounce, 2);
        assert_eq!(
            rules.stuck_fix,
            Some(StuckFix {
                max_stuck_time: 2,
                cool_down_turns: 1
            })
        );
        assert_eq!(rules.powers, vec![CheesePower::SecondJump]);
    }

    #[test]
    fn test_map_config_follows_cheese_mode() {
        let mut settings = Settings::default();
        assert_eq!(settings.map_config().cheese, CheeseDistribution::Count(5));
        settings.map_generation.cheese_mode = CheeseMode::Percentage;
        settings.map_generation.cheese_percentage = 25.0;
        assert_eq!(
            settings.map_config().cheese,
            CheeseDistribution::Percentage(25.0)
        );
        settings.map_generation.cheese_mode = CheeseMode::Chance;
        assert_eq!(settings.map_config().cheese, CheeseDistribution::Chance(10.0));
    }

    #[test]
    fn test_save_and_load() {
        let path = scratch_file("roundtrip.json");
        let mut settings = Settings::default();
        settings.general.dice_mode = DiceMode::Sequence;
        settings.display.colors = vec![PlayerColor::Magenta];
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_load_or_default_writes_missing_file() {
        let path = scratch_file("missing.json");
        let settings = Settings::load_or_default(&path);
        assert_eq!(settings, Settings::default());
        assert!(path.exists());
    }

    #[test]
    fn test_load_or_default_survives_garbage() {
        let path = scratch_file("garbage.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(Settings::load(&path), Err(SettingsError::Json(_))));
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }

    fn entry(name: &str) -> usize {
        ENTRIES.iter().position(|e| e.name == name).unwrap() + 1
    }

    const RETURN: usize = ENTRIES.len() + 1;
    const RESET: usize = ENTRIES.len() + 2;
    const SAVE: usize = ENTRIES.len() + 3;

    #[test]
    fn test_entries_read_defaults() {
        let settings = Settings::default();
        let value = |name: &str| ENTRIES[entry(name) - 1].value(&settings);
        assert_eq!(value("Dice mode"), "Standard");
        assert_eq!(value("Max bounce"), "5");
        assert_eq!(value("Winning spot"), "BottomRight");
        assert_eq!(value("Cheese mode"), "Count");
        assert_eq!(value("Cheese chance (%)"), "10");
        assert_eq!(value("Cheese deathray"), "on");
        assert_eq!(value("Auto run"), "off");
    }

    #[test]
    fn test_menu_edits_numbers_and_variants() {
        let path = scratch_file("edits.json");
        let mut settings = Settings::default();
        let mut choices = ScriptedChoices::new(vec![
            Answer::Number(entry("Max bounce")),
            Answer::Number(2),
            Answer::Number(entry("Dice mode")),
            Answer::Number(1),
            Answer::Number(entry("Winning spot")),
            Answer::Number(6),
            Answer::Number(entry("Cheese mode")),
            Answer::Number(3),
            Answer::Number(entry("Cheese percentage (%)")),
            Answer::Number(25),
            Answer::Number(entry("Stuck player fix")),
            Answer::Number(RETURN),
        ]);
        let mut display = Transcript::default();
        let mut io = Io::new(&mut choices, &mut display);
        settings_menu(&mut settings, &path, &mut io).unwrap();

        assert_eq!(settings.general.max_bounce, 2);
        assert_eq!(settings.general.dice_mode, DiceMode::Ones);
        assert_eq!(settings.map_generation.winning_spot, SpotLocation::Middle);
        assert_eq!(
            settings.map_config().cheese,
            CheeseDistribution::Percentage(25.0)
        );
        assert!(settings.general.stuck_fix);
        assert!(display.contains("Max bounce = 2"));
        assert!(!path.exists());
        assert_eq!(choices.remaining(), 0);
    }

    #[test]
    fn test_save_is_offered_only_after_a_change() {
        let path = scratch_file("menu-save.json");
        let mut settings = Settings::default();
        let mut choices = ScriptedChoices::new(vec![
            Answer::Number(entry("Auto run")),
            Answer::Number(SAVE),
            Answer::Number(RETURN),
        ]);
        let mut display = Transcript::default();
        let mut io = Io::new(&mut choices, &mut display);
        settings_menu(&mut settings, &path, &mut io).unwrap();

        let listed = display
            .lines
            .iter()
            .filter(|line| line.ends_with("Save changes"))
            .count();
        assert_eq!(listed, 1);
        assert!(Settings::load(&path).unwrap().display.auto_run);
        assert_eq!(
            choices.prompts[0],
            format!("Select an option [1-{}]: ", ENTRIES.len() + 2)
        );
        assert_eq!(
            choices.prompts[1],
            format!("Select an option [1-{}]: ", ENTRIES.len() + 3)
        );
    }

    #[test]
    fn test_reset_to_defaults() {
        let path = scratch_file("menu-reset.json");
        let mut settings = Settings::default();
        settings.general.max_players = 2;
        settings.map_generation.starting_spot = SpotLocation::Random;
        let mut choices =
            ScriptedChoices::new(vec![Answer::Number(RESET), Answer::Number(RETURN)]);
        let mut display = Transcript::default();
        let mut io = Io::new(&mut choices, &mut display);
        settings_menu(&mut settings, &path, &mut io).unwrap();

        assert_eq!(settings, Settings::default());
        assert!(display.contains("Settings reset to defaults."));
    }

    #[test]
    fn test_map_string_must_parse() {
        let path = scratch_file("menu-map.json");
        let mut settings = Settings::default();
        let mut choices = ScriptedChoices::new(vec![
            Answer::Number(entry("Map string")),
            Answer::Text("TopLeft:2:2:Up"),
            Answer::Number(entry("Map string")),
            Answer::Text(" TopLeft:2:1:Right,Win:0,0 "),
            Answer::Number(RETURN),
        ]);
        let mut display = Transcript::default();
        let mut io = Io::new(&mut choices, &mut display);
        settings_menu(&mut settings, &path, &mut io).unwrap();

        assert!(display.contains("Map string rejected"));
        assert_eq!(settings.general.map_string, "TopLeft:2:1:Right,Win:0,0");
    }
}
