//! Game state and session lifecycle
//!
//! The state owns the bird and the pipe stream for one session and replaces both
//! wholesale on restart.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bird::{Bird, BirdColor};
use super::pipe::GapTier;
use super::stream::PipeStream;
use crate::consts::*;
use crate::error::ConfigError;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first flap
    Menu,
    /// Active gameplay
    Run,
    /// Crashed; bird drops to the floor, waiting for restart
    Die,
    /// Quit requested (terminal)
    End,
}

/// World motion for the session. Death pauses the world instead of touching a
/// global speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Background scroll speed (pixels/s); pipes move at a multiple of this
    pub game_speed: f32,
    pub paused: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            game_speed: GAME_SPEED,
            paused: false,
        }
    }
}

impl SimulationConfig {
    /// Effective scroll speed (0 while paused)
    pub fn world_speed(&self) -> f32 {
        if self.paused { 0.0 } else { self.game_speed }
    }
}

/// Things that happened during a tick, for the loop to log or react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Flapped,
    Scored { score: u32 },
    Died { score: u32 },
    NewRecord { score: u32 },
    Restarted,
}

/// Everything needed to set up a session
#[derive(Debug, Clone)]
pub struct SessionParams {
    pub seed: u64,
    pub bird_color: BirdColor,
    pub gap_tier: GapTier,
    /// Sprite sizes from the asset table
    pub bird_size: Vec2,
    pub pipe_size: Vec2,
    /// Best score loaded from disk
    pub high_score: u32,
}

/// Derive the pipe seed for the n-th session of a run
fn session_seed(seed: u64, session: u64) -> u64 {
    seed.wrapping_add(session.wrapping_mul(2654435761))
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub phase: GamePhase,
    pub world: SimulationConfig,
    pub bird: Bird,
    pub stream: PipeStream,
    pub score: u32,
    /// Best score across sessions (includes the current one once it ends)
    pub high_score: u32,
    /// Background scroll offset, in `(-SCREEN_WIDTH, 0]`
    pub background_x: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulation time in seconds (drives spawning and the menu bob)
    pub elapsed: f32,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    bird_color: BirdColor,
    bird_size: Vec2,
    sessions: u64,
}

impl GameState {
    /// Validate the setup and build the initial Menu state
    pub fn new(params: SessionParams) -> Result<Self, ConfigError> {
        if params.bird_size.y > SCREEN_HEIGHT {
            return Err(ConfigError::SpriteTooLarge {
                height: params.bird_size.y,
                screen_height: SCREEN_HEIGHT,
            });
        }
        let stream = PipeStream::new(
            params.gap_tier,
            params.pipe_size,
            session_seed(params.seed, 0),
        )?;

        Ok(Self {
            seed: params.seed,
            phase: GamePhase::Menu,
            world: SimulationConfig::default(),
            bird: Bird::spawn(params.bird_color, params.bird_size),
            stream,
            score: 0,
            high_score: params.high_score,
            background_x: 0.0,
            time_ticks: 0,
            elapsed: 0.0,
            events: Vec::new(),
            bird_color: params.bird_color,
            bird_size: params.bird_size,
            sessions: 0,
        })
    }

    /// Menu → Run: spawn the first pipe
    pub fn start_run(&mut self) {
        debug_assert_eq!(self.phase, GamePhase::Menu);
        self.phase = GamePhase::Run;
        self.bird.pos.y = BIRD_START_Y;
        self.stream.spawn(self.elapsed);
        self.events.push(GameEvent::Started);
    }

    /// Run → Die: freeze the world and fold the score into the record
    pub fn die(&mut self) {
        debug_assert_eq!(self.phase, GamePhase::Run);
        self.phase = GamePhase::Die;
        self.world.paused = true;
        self.events.push(GameEvent::Died { score: self.score });
        if self.score > self.high_score {
            self.high_score = self.score;
            self.events.push(GameEvent::NewRecord { score: self.score });
        }
    }

    /// Die → Menu: fresh bird, fresh stream, score back to zero
    pub fn restart(&mut self) {
        self.sessions += 1;
        self.phase = GamePhase::Menu;
        self.world = SimulationConfig::default();
        self.bird = Bird::spawn(self.bird_color, self.bird_size);
        self.stream.reset(session_seed(self.seed, self.sessions));
        self.score = 0;
        self.background_x = 0.0;
        self.events.push(GameEvent::Restarted);
    }

    /// Any phase → End
    pub fn end(&mut self) {
        self.phase = GamePhase::End;
    }

    /// Number of completed restarts
    pub fn sessions(&self) -> u64 {
        self.sessions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(seed: u64) -> SessionParams {
        SessionParams {
            seed,
            bird_color: BirdColor::Yellow,
            gap_tier: GapTier::Easy,
            bird_size: Vec2::new(34.0, 24.0),
            pipe_size: Vec2::new(52.0, 320.0),
            high_score: 0,
        }
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(params(1)).unwrap();
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.score, 0);
        assert!(state.stream.is_empty());
        assert_eq!(state.bird.pos, Vec2::new(BIRD_START_X, BIRD_START_Y));
    }

    #[test]
    fn test_sprite_too_large() {
        let mut p = params(1);
        p.bird_size.y = SCREEN_HEIGHT + 1.0;
        assert!(matches!(
            GameState::new(p),
            Err(ConfigError::SpriteTooLarge { .. })
        ));
    }

    #[test]
    fn test_die_updates_record() {
        let mut p = params(1);
        p.high_score = 3;
        let mut state = GameState::new(p).unwrap();
        state.start_run();
        state.score = 5;
        state.die();
        assert_eq!(state.phase, GamePhase::Die);
        assert!(state.world.paused);
        assert_eq!(state.high_score, 5);
        assert!(state.events.contains(&GameEvent::NewRecord { score: 5 }));
    }

    #[test]
    fn test_die_keeps_higher_record() {
        let mut p = params(1);
        p.high_score = 10;
        let mut state = GameState::new(p).unwrap();
        state.start_run();
        state.score = 2;
        state.die();
        assert_eq!(state.high_score, 10);
        assert!(!state.events.iter().any(|e| matches!(e, GameEvent::NewRecord { .. })));
    }

    #[test]
    fn test_restart_resets_session() {
        let mut state = GameState::new(params(1)).unwrap();
        state.start_run();
        state.bird.advance(0.5);
        state.score = 4;
        state.background_x = -20.0;
        state.die();
        state.restart();

        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 4);
        assert!(!state.world.paused);
        assert!(state.stream.is_empty());
        assert_eq!(state.stream.next_index(), 0);
        assert_eq!(state.background_x, 0.0);
        assert_eq!(state.bird.velocity, 0.0);
        assert_eq!(state.sessions(), 1);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let mut a = GameState::new(params(9)).unwrap();
        let mut b = GameState::new(params(9)).unwrap();
        a.start_run();
        b.start_run();
        assert_eq!(
            a.stream.next_pipe().unwrap().gap_y,
            b.stream.next_pipe().unwrap().gap_y
        );
    }

    #[test]
    fn test_paused_world_does_not_move() {
        let world = SimulationConfig {
            paused: true,
            ..Default::default()
        };
        assert_eq!(world.world_speed(), 0.0);
        assert_eq!(SimulationConfig::default().world_speed(), GAME_SPEED);
    }
}
