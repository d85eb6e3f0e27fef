//! The game loop
//!
//! Single-threaded and fixed-rate: wait for the frame, poll input, step the
//! simulation, draw. A quit request is checked once per frame before any other work.

use std::io;

use crate::assets::AssetTable;
use crate::consts::*;
use crate::error::ConfigError;
use crate::highscores::HighScoreFile;
use crate::platform::{Clock, InputFrame, InputSource};
use crate::renderer::{Canvas, draw_scene};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, SessionParams, TickInput, tick};

/// Game instance holding all state
pub struct Game {
    state: GameState,
    assets: AssetTable,
    settings: Settings,
    record: HighScoreFile,
    accumulator: f32,
    /// Flap pressed but not yet seen by a tick
    pending_flap: bool,
    frames: u64,
}

impl Game {
    /// Load the record and set up the first session
    pub fn new(settings: Settings, assets: AssetTable) -> Result<Self, ConfigError> {
        let record = HighScoreFile::new(&settings.record_path);
        let high_score = record.load();
        let seed = settings.resolve_seed();

        let state = GameState::new(SessionParams {
            seed,
            bird_color: settings.bird_color,
            gap_tier: settings.gap_tier,
            bird_size: assets.bird_size(settings.bird_color),
            pipe_size: assets.pipe_size(settings.gap_tier.color()),
            high_score,
        })?;
        log::info!(
            "Game ready: seed {}, {:?} gaps, record {}",
            seed,
            settings.gap_tier,
            high_score
        );

        Ok(Self {
            state,
            assets,
            settings,
            record,
            accumulator: 0.0,
            pending_flap: false,
            frames: 0,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn assets(&self) -> &AssetTable {
        &self.assets
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn record(&self) -> &HighScoreFile {
        &self.record
    }

    /// Frames processed by `frame`
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run simulation ticks for one frame's worth of time
    pub fn update(&mut self, input: InputFrame, dt: f32) {
        self.pending_flap |= input.flap;
        self.accumulator += dt.min(MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let tick_input = TickInput {
                flap: self.pending_flap,
                idle_mode: self.settings.autopilot,
            };
            tick(&mut self.state, &tick_input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // One-shot input is consumed by the first substep
            self.pending_flap = false;

            self.handle_events();
        }
    }

    fn handle_events(&mut self) {
        for event in &self.state.events {
            match *event {
                GameEvent::Started => log::info!("Run started"),
                GameEvent::Scored { score } => log::debug!("Score {}", score),
                GameEvent::Died { score } => log::info!("Died with score {}", score),
                GameEvent::NewRecord { score } => {
                    log::info!("New record: {}", score);
                    if let Err(e) = self.record.save(score) {
                        log::warn!("Could not save record: {}", e);
                    }
                }
                GameEvent::Restarted => log::info!("Back to menu"),
                GameEvent::Flapped => log::trace!("Flap"),
            }
        }
    }

    /// One pass of the loop. Returns false once quit has been requested.
    pub fn frame(
        &mut self,
        input: &mut impl InputSource,
        canvas: &mut impl Canvas,
        clock: &mut impl Clock,
    ) -> bool {
        let dt = clock.tick(self.settings.fps);

        let frame = input.poll();
        if frame.quit {
            log::info!("Quit requested");
            self.state.end();
            return false;
        }

        self.update(frame, dt);
        draw_scene(&self.state, &self.assets, self.settings.backdrop, canvas);
        self.frames += 1;
        true
    }

    /// Loop until quit, then persist the record
    pub fn run(
        &mut self,
        input: &mut impl InputSource,
        canvas: &mut impl Canvas,
        clock: &mut impl Clock,
    ) -> io::Result<()> {
        while self.state.phase != GamePhase::End {
            if !self.frame(input, canvas, clock) {
                break;
            }
        }
        self.shutdown()
    }

    /// Enter End and write the record
    pub fn shutdown(&mut self) -> io::Result<()> {
        self.state.end();
        log::info!(
            "Shutting down after {} frames ({} ticks), record {}",
            self.frames,
            self.state.time_ticks,
            self.state.high_score
        );
        self.record.save(self.state.high_score)
    }
}
