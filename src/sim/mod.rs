//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Pipes kept in spawn order
//! - No rendering or platform dependencies

pub mod bird;
pub mod collision;
pub mod pipe;
pub mod rect;
pub mod state;
pub mod stream;
pub mod tick;

pub use bird::{Bird, BirdColor, WingPhase, tilt_for_velocity};
pub use collision::{check_collision, check_score};
pub use pipe::{GapTier, Pipe, PipeColor};
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, GameState, SessionParams, SimulationConfig};
pub use stream::{PipeStream, spawn_interval};
pub use tick::{TickInput, tick};
