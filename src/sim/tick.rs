//! Fixed timestep simulation tick
//!
//! One call advances the whole game by `dt`: background scroll, phase transitions,
//! bird physics, pipe stream, scoring, and collision.

use super::collision::{check_collision, check_score};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Distance above a gap's lower edge the autopilot tries to keep the bird's feet
const AUTOPILOT_MARGIN: f32 = 15.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap/confirm pressed this frame (edge-triggered by the caller)
    pub flap: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if state.phase == GamePhase::End {
        return;
    }

    state.time_ticks += 1;
    state.elapsed += dt;

    scroll_background(state, dt);

    let flap = input.flap || (input.idle_mode && autopilot_wants_flap(state));

    match state.phase {
        GamePhase::Menu => {
            state.bird.bob(BIRD_START_Y, state.elapsed);
            if flap {
                state.start_run();
                state.bird.flap();
                state.events.push(GameEvent::Flapped);
            }
        }

        GamePhase::Run => run_frame(state, flap, dt),

        GamePhase::Die => {
            // World is frozen, the bird finishes its drop
            state.bird.advance(dt);
            if flap {
                log::info!("Restarting (record {})", state.high_score);
                state.restart();
            }
        }

        GamePhase::End => {}
    }
}

fn scroll_background(state: &mut GameState, dt: f32) {
    state.background_x -= dt * state.world.world_speed();
    if state.background_x <= -SCREEN_WIDTH {
        state.background_x += SCREEN_WIDTH;
    }
}

fn run_frame(state: &mut GameState, flap: bool, dt: f32) {
    if flap {
        state.bird.flap();
        state.events.push(GameEvent::Flapped);
    }

    if state.bird.advance(dt) {
        log::info!("Hit the floor with score {}", state.score);
        state.die();
        return;
    }

    state.stream.maybe_spawn(state.elapsed);
    state.stream.recycle();

    if check_score(&state.bird, &mut state.stream, &mut state.score) {
        state.events.push(GameEvent::Scored { score: state.score });
    }

    if check_collision(&state.bird, &state.stream) {
        log::info!("Hit a pipe with score {}", state.score);
        state.die();
        return;
    }

    state.stream.advance_all(dt, &state.world);
}

/// Demo AI: start immediately, restart once landed, keep the bird's feet just above
/// the lower edge of the gap it is flying through (or heading for).
fn autopilot_wants_flap(state: &GameState) -> bool {
    match state.phase {
        GamePhase::Menu => true,
        GamePhase::Die => state.bird.is_grounded(),
        GamePhase::End => false,
        GamePhase::Run => {
            let bird = state.bird.rect();
            // Stay lined up with the pipe we are still inside of
            let pipe = state
                .stream
                .previous_pipe()
                .filter(|p| p.right() > bird.left())
                .or_else(|| state.stream.next_pipe());
            let target = pipe
                .map(|p| p.gap_y + p.gap() - AUTOPILOT_MARGIN)
                .unwrap_or(SCREEN_HEIGHT / 2.0);
            bird.bottom() > target && state.bird.velocity > -FLAP_FORCE / 2.0
        }
    }
}
