//! Flappy entry point
//!
//! Loads settings, record and sprites, then runs the game loop headless against
//! the software canvas. Input comes from the demo source (autopilot does the flying).

use std::path::Path;

use flappy::consts::*;
use flappy::platform::{DemoInput, FrameClock};
use flappy::renderer::Framebuffer;
use flappy::settings::DEFAULT_SETTINGS_PATH;
use flappy::{AssetTable, Game, GameError, Settings};

fn main() {
    env_logger::init();
    log::info!("Flappy starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), GameError> {
    let settings = Settings::load(Path::new(DEFAULT_SETTINGS_PATH));

    let assets = match &settings.assets_dir {
        Some(dir) => AssetTable::load(dir)?,
        None => {
            log::info!("No asset directory configured, using placeholder art");
            AssetTable::placeholder()
        }
    };

    let screenshot = settings.screenshot_path.clone();
    let mut input = DemoInput::new(settings.demo_frames);
    let mut game = Game::new(settings, assets)?;

    let mut canvas = Framebuffer::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32);
    let mut clock = FrameClock::new();
    game.run(&mut input, &mut canvas, &mut clock)?;

    let state = game.state();
    log::info!(
        "Finished after {} sessions, last score {}, record {}",
        state.sessions() + 1,
        state.score,
        state.high_score
    );

    if let Some(path) = screenshot {
        canvas.save(&path)?;
        log::info!("Saved last frame to {}", path.display());
    }

    Ok(())
}
