use cheese_battle::cheese_battle::{ChoiceError, CheeseRng, Io};
use cheese_battle::console::{ConsoleChoices, ConsoleDisplay};
use cheese_battle::session::run_session;
use cheese_battle::settings::{settings_menu, Settings};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::{error, info};

/// Hyperspace Cheese Battle, a rocket race across a board of jump lanes
#[derive(Parser, Debug)]
#[command(name = "cheese-battle")]
#[command(about = "Hyperspace Cheese Battle in the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file, created with defaults when missing
    #[arg(short, long, default_value = "settings.json")]
    settings: PathBuf,

    /// Seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Do not wait for enter between rounds
    #[arg(long)]
    auto_run: bool,

    /// Hide the game narration and board
    #[arg(short, long)]
    quiet: bool,
}

enum MenuChoice {
    Play,
    Settings,
    Exit,
}

const TITLE: [&str; 3] = [
    "============================",
    "| Hyperspace Cheese Battle |",
    "============================",
];

fn main() {
    let cli = Cli::parse();

    let file_appender = tracing_appender::rolling::daily("./logs", "game.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_writer(non_blocking)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Could not install logger: {}", e);
    }

    let mut settings = Settings::load_or_default(&cli.settings);
    if cli.auto_run {
        settings.display.auto_run = true;
    }
    if cli.quiet {
        settings.display.output_game = false;
    }

    let mut choices = ConsoleChoices::new(io::stdin().lock(), io::stdout());
    let mut menu_display = ConsoleDisplay::new(io::stdout(), true);
    loop {
        let picked = {
            let mut menu = Io::new(&mut choices, &mut menu_display);
            main_menu(&mut menu)
        };
        let result = match picked {
            Ok(MenuChoice::Play) => {
                let rng = cli.seed.map(CheeseRng::seeded).unwrap_or_default();
                let mut game_display = ConsoleDisplay::new(io::stdout(), settings.display.output_game);
                let mut game = Io::new(&mut choices, &mut game_display);
                run_session(&settings, rng, &mut game).map(|results| {
                    info!("Session finished: {:?}", results);
                })
            }
            Ok(MenuChoice::Settings) => {
                let mut menu = Io::new(&mut choices, &mut menu_display);
                settings_menu(&mut settings, &cli.settings, &mut menu).map_err(Into::into)
            }
            Ok(MenuChoice::Exit) => break,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = result {
            error!("Leaving the game: {}", e);
            break;
        }
    }
}

fn main_menu(io: &mut Io<'_>) -> Result<MenuChoice, ChoiceError> {
    for line in TITLE {
        io.say(line);
    }
    let options = ["Play Game", "Settings", "Exit"].map(String::from);
    Ok(match io.pick("Please enter choice", &options)? {
        0 => MenuChoice::Play,
        1 => MenuChoice::Settings,
        _ => MenuChoice::Exit,
    })
}
