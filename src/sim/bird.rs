//! The player-controlled avatar
//!
//! Integration order is position first, then velocity, both scaled by `dt`:
//! a bird at rest moves 0 px on its first step and only picks up speed afterward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::remap_clamped;

/// Sprite color of the bird
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BirdColor {
    Red,
    Blue,
    #[default]
    Yellow,
}

impl BirdColor {
    pub const ALL: [BirdColor; 3] = [BirdColor::Red, BirdColor::Blue, BirdColor::Yellow];

    pub fn as_str(&self) -> &'static str {
        match self {
            BirdColor::Red => "red",
            BirdColor::Blue => "blue",
            BirdColor::Yellow => "yellow",
        }
    }
}

/// Wing animation phase. Ordered: only moves forward between flaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WingPhase {
    Down,
    Mid,
    Up,
}

impl WingPhase {
    pub const ALL: [WingPhase; 3] = [WingPhase::Down, WingPhase::Mid, WingPhase::Up];

    fn next(self) -> Self {
        match self {
            WingPhase::Down => WingPhase::Mid,
            WingPhase::Mid | WingPhase::Up => WingPhase::Up,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WingPhase::Down => "down",
            WingPhase::Mid => "mid",
            WingPhase::Up => "up",
        }
    }
}

/// Map vertical velocity onto a display tilt in degrees (positive = nose down)
pub fn tilt_for_velocity(velocity: f32) -> f32 {
    remap_clamped(velocity, TILT_VEL_MIN, TILT_VEL_MAX, TILT_MIN, TILT_MAX)
}

/// The avatar
#[derive(Debug, Clone)]
pub struct Bird {
    pub color: BirdColor,
    /// Top-left corner; x never changes after spawn
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (pixels/s, positive = downward)
    pub velocity: f32,
    /// Display-only rotation, recomputed each step from velocity
    pub tilt: f32,
    pub phase: WingPhase,
    anim_counter: u32,
    /// Resting on the floor since the last fall
    grounded: bool,
}

impl Bird {
    pub fn new(color: BirdColor, pos: Vec2, size: Vec2) -> Self {
        Self {
            color,
            pos,
            size,
            velocity: 0.0,
            tilt: 0.0,
            phase: WingPhase::Mid,
            anim_counter: 0,
            grounded: false,
        }
    }

    /// Bird at the standard spawn point
    pub fn spawn(color: BirdColor, size: Vec2) -> Self {
        Self::new(color, Vec2::new(BIRD_START_X, BIRD_START_Y), size)
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.rect().center_x()
    }

    pub fn anim_counter(&self) -> u32 {
        self.anim_counter
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Kick upward and restart the wing animation
    pub fn flap(&mut self) {
        self.velocity = -FLAP_FORCE;
        self.phase = WingPhase::Down;
        self.anim_counter = 0;
        self.grounded = false;
    }

    /// Advance one step. Returns true on the step the bird hits the floor.
    ///
    /// On impact the bird is clamped to the floor and velocity, tilt, and animation
    /// freeze. Further steps are no-ops until the next flap.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.grounded {
            return false;
        }

        self.pos.y += self.velocity * dt;

        if self.pos.y + self.size.y > SCREEN_HEIGHT {
            self.pos.y = SCREEN_HEIGHT - self.size.y;
            self.grounded = true;
            return true;
        }

        self.velocity += GRAVITY * dt;
        self.tilt = tilt_for_velocity(self.velocity);

        if self.phase != WingPhase::Up {
            self.anim_counter += 1;
            if self.anim_counter == ANIMATION_FRAMES {
                self.phase = self.phase.next();
                self.anim_counter = 0;
            }
        }

        false
    }

    /// Hover around `base_y` while waiting in the menu
    pub fn bob(&mut self, base_y: f32, time_secs: f32) {
        self.pos.y = base_y + (time_secs * MENU_BOB_SPEED).sin() * MENU_BOB_HEIGHT;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bird() -> Bird {
        Bird::new(BirdColor::Yellow, Vec2::new(94.0, 256.0), Vec2::new(34.0, 24.0))
    }

    #[test]
    fn test_position_before_velocity() {
        let mut b = bird();
        let fell = b.advance(0.1);
        assert!(!fell);
        assert_eq!(b.pos.y, 256.0);
        assert!((b.velocity - 100.0).abs() < 1e-4);

        // Second step uses the updated velocity
        b.advance(0.1);
        assert!((b.pos.y - 266.0).abs() < 1e-3);
        assert!((b.velocity - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_flap_resets_animation() {
        let mut b = bird();
        for _ in 0..10 {
            b.advance(0.01);
        }
        assert_eq!(b.phase, WingPhase::Up);

        b.flap();
        assert_eq!(b.phase, WingPhase::Down);
        assert_eq!(b.anim_counter(), 0);
        assert_eq!(b.velocity, -FLAP_FORCE);
    }

    #[test]
    fn test_animation_steps_every_three_frames() {
        let mut b = bird();
        b.flap();
        b.advance(0.001);
        b.advance(0.001);
        assert_eq!(b.phase, WingPhase::Down);
        assert_eq!(b.anim_counter(), 2);
        b.advance(0.001);
        assert_eq!(b.phase, WingPhase::Mid);
        assert_eq!(b.anim_counter(), 0);
        for _ in 0..3 {
            b.advance(0.001);
        }
        assert_eq!(b.phase, WingPhase::Up);
        // Holds at Up, counter stays put
        b.advance(0.001);
        assert_eq!(b.phase, WingPhase::Up);
        assert_eq!(b.anim_counter(), 0);
    }

    #[test]
    fn test_tilt_mapping() {
        assert_eq!(tilt_for_velocity(-250.0), TILT_MIN);
        assert_eq!(tilt_for_velocity(-100.0), -30.0);
        assert_eq!(tilt_for_velocity(400.0), 60.0);
        assert_eq!(tilt_for_velocity(1000.0), TILT_MAX);
        assert!((tilt_for_velocity(0.0) - -12.0).abs() < 1e-4);
    }

    #[test]
    fn test_fall_clamps_and_freezes() {
        let mut b = bird();
        b.pos.y = SCREEN_HEIGHT - b.size.y - 1.0;
        b.velocity = 300.0;
        let tilt = b.tilt;
        let phase = b.phase;

        assert!(b.advance(0.1));
        assert_eq!(b.pos.y, SCREEN_HEIGHT - b.size.y);
        assert_eq!(b.velocity, 300.0);
        assert_eq!(b.tilt, tilt);
        assert_eq!(b.phase, phase);
        assert!(b.is_grounded());

        // Reported once; stays on the floor
        assert!(!b.advance(0.1));
        assert_eq!(b.pos.y, SCREEN_HEIGHT - b.size.y);
    }

    #[test]
    fn test_flap_lifts_off_floor() {
        let mut b = bird();
        b.pos.y = SCREEN_HEIGHT - b.size.y;
        b.velocity = 10.0;
        assert!(b.advance(0.1));
        b.flap();
        assert!(!b.is_grounded());
        assert!(!b.advance(0.1));
        assert!(b.pos.y < SCREEN_HEIGHT - b.size.y);
    }

    #[test]
    fn test_bob_stays_near_base() {
        let mut b = bird();
        for i in 0..100 {
            b.bob(BIRD_START_Y, i as f32 * 0.05);
            assert!((b.pos.y - BIRD_START_Y).abs() <= MENU_BOB_HEIGHT + 1e-4);
        }
    }

    proptest! {
        #[test]
        fn prop_never_below_floor(
            steps in prop::collection::vec((0.0f32..0.2, any::<bool>()), 1..200)
        ) {
            let mut b = bird();
            let mut falls_since_flap = 0;
            for (dt, flap) in steps {
                if flap {
                    b.flap();
                    falls_since_flap = 0;
                }
                if b.advance(dt) {
                    falls_since_flap += 1;
                }
                prop_assert!(b.pos.y + b.size.y <= SCREEN_HEIGHT);
                prop_assert!(falls_since_flap <= 1);
            }
        }

        #[test]
        fn prop_wing_phase_monotonic_between_flaps(
            steps in prop::collection::vec((0.0f32..0.05, prop::bool::weighted(0.1)), 1..100)
        ) {
            let mut b = bird();
            let mut last = b.phase;
            for (dt, flap) in steps {
                if flap {
                    b.flap();
                    prop_assert_eq!(b.phase, WingPhase::Down);
                    prop_assert_eq!(b.anim_counter(), 0);
                    last = b.phase;
                    continue;
                }
                b.advance(dt);
                prop_assert!(b.phase >= last);
                last = b.phase;
            }
        }
    }
}
