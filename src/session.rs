use crate::cheese_battle::{
    enlist, generate, GameEnd, GameError, GameRng, GameState, GenerateError, Io, MapLayout,
    PlayOptions,
};
use crate::settings::Settings;
use tracing::{error, info};

/// The board a new session starts on.
///
/// A configured map string that fails to parse is logged and replaced by a
/// board generated from the default generation settings.
pub fn starting_layout<R: GameRng>(
    settings: &Settings,
    rng: &mut R,
) -> Result<MapLayout, GenerateError> {
    if settings.map_generation.generate_map {
        return Ok(generate(&settings.map_config(), rng)?.layout);
    }
    match settings.general.map_string.parse::<MapLayout>() {
        Ok(layout) => Ok(layout),
        Err(e) => {
            error!("Could not load map string, generating a default board: {}", e);
            Ok(generate(&Settings::default().map_config(), rng)?.layout)
        }
    }
}

/// Enlist a roster, then keep playing games with it until nobody wants another.
pub fn run_session<R: GameRng>(
    settings: &Settings,
    mut rng: R,
    io: &mut Io<'_>,
) -> Result<Vec<GameEnd>, GameError> {
    let recruits = enlist(
        settings.general.max_players,
        &settings.display.colors,
        io,
        &mut rng,
    )?;
    let layout = starting_layout(settings, &mut rng)?;
    info!("Starting session on map {}", layout);

    let mut state = GameState::new(layout, recruits, settings.rules(), settings.dice(), rng)?;
    if settings.map_generation.generate_map {
        state = state.with_map_generation(settings.map_config());
    }
    let options = PlayOptions {
        auto_run: settings.display.auto_run,
        output_game: settings.display.output_game,
        style: settings.board_style(),
    };

    let mut results = Vec::new();
    loop {
        let end = state.play(io, &options)?;
        match end {
            GameEnd::Won(id) => info!(
                "{} won after {} rounds",
                state.player(id).name(),
                state.rounds()
            ),
            GameEnd::Abandoned => {
                io.say("All ships are stuck. Game abandoned.");
                info!("Game abandoned after {} rounds", state.rounds());
            }
            GameEnd::RoundLimit => {
                io.say(format!("No winner after {} rounds.", state.rounds()));
                info!("Round limit reached");
            }
        }
        results.push(end);

        if !io.choices.confirm("Play again? [y/n]: ")? {
            return Ok(results);
        }
        state.reset()?;
    }
}
