use log::{error, info, warn};
use macroquad::prelude::{Color, Conf, clear_background, next_frame};
use rand::SeedableRng;
use rand::rngs::StdRng;
use simplelog::WriteLogger;
use sprite_snake::audio::SoundBank;
use sprite_snake::config::{CONFIG_PATH, Config};
use sprite_snake::input::InputFrame;
use sprite_snake::render::{Renderer, SpriteAtlas};
use sprite_snake::session::{Flow, Screen, Session};
use sprite_snake::{Error, Result, ui};
use std::fs::File;
use std::path::Path;

const BACKGROUND: Color = Color::new(0.06, 0.09, 0.05, 1.0);

fn window_conf() -> Conf {
    // logging is not up yet; `run` reports config problems
    let config = Config::load(Path::new(CONFIG_PATH)).unwrap_or_default();
    let (width, height) = config.window_size();
    Conf {
        window_title: config.window_title,
        window_width: width,
        window_height: height,
        high_dpi: true,
        ..Default::default()
    }
}

/// The error followed by each of its causes.
fn describe(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        text.push_str(&format!(": {inner}"));
        cause = inner.source();
    }
    text
}

fn init_logging(config: &Config) -> Result<()> {
    let file = File::create(&config.log_file)
        .map_err(|source| Error::LogFile { path: config.log_file.clone(), source })?;
    WriteLogger::init(config.log_level(), simplelog::Config::default(), file)?;
    Ok(())
}

async fn run() -> Result<()> {
    let loaded = Config::load(Path::new(CONFIG_PATH));
    let config = loaded.as_ref().cloned().unwrap_or_default();
    init_logging(&config)?;
    info!("starting snake on a {} board", config.grid());
    if let Err(err) = &loaded {
        warn!("{}; using defaults", describe(err));
    }

    let atlas = SpriteAtlas::load(&config.assets_dir).await?;
    let renderer = Renderer::new(atlas);
    let mut audio = SoundBank::load(&config.assets_dir, config.volume).await;
    let mut session = Session::new(config.grid(), StdRng::from_entropy());

    loop {
        let input = InputFrame::poll();
        if session.update(&input, &mut audio) == Flow::Exit {
            break;
        }

        clear_background(BACKGROUND);
        let round = session.round();
        match session.screen() {
            Screen::Title { selected } => ui::draw_title(selected),
            Screen::Settings => ui::draw_settings(&config),
            Screen::Playing => {
                renderer.draw_round(round);
                ui::draw_hud(round.state().score(), round.state().level());
                if round.state().is_paused() {
                    ui::draw_pause_overlay();
                }
            }
            Screen::GameOver { selected } => {
                renderer.draw_round(round);
                ui::draw_game_over(selected, round.ending(), round.state().score());
            }
        }

        next_frame().await;
    }

    info!("bye");
    Ok(())
}

#[macroquad::main(window_conf)]
async fn main() {
    if let Err(err) = run().await {
        // the logger may be the thing that failed
        let text = describe(&err);
        error!("{text}");
        eprintln!("snake: {text}");
        std::process::exit(1);
    }
}
