//! Pipe obstacles: an upper and lower barrier with a fixed opening between them

use std::ops::RangeInclusive;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::SimulationConfig;
use crate::consts::*;
use crate::error::ConfigError;

/// Difficulty tier; each maps to a fixed gap height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapTier {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl GapTier {
    pub const ALL: [GapTier; 3] = [GapTier::Easy, GapTier::Medium, GapTier::Hard];

    /// Vertical opening in pixels
    pub fn gap(&self) -> f32 {
        match self {
            GapTier::Easy => 150.0,
            GapTier::Medium => 100.0,
            GapTier::Hard => 70.0,
        }
    }

    pub fn color(&self) -> PipeColor {
        match self {
            GapTier::Easy => PipeColor::Green,
            GapTier::Medium | GapTier::Hard => PipeColor::Red,
        }
    }

    /// Valid range for the upper edge of the opening
    pub fn spawn_range(&self, screen_height: f32) -> Result<RangeInclusive<i32>, ConfigError> {
        let lo = PIPE_EDGE_OFFSET as i32;
        let hi = (screen_height - self.gap() - PIPE_EDGE_OFFSET) as i32;
        if hi < lo {
            return Err(ConfigError::GapTooLarge {
                tier: *self,
                gap: self.gap(),
                screen_height,
            });
        }
        Ok(lo..=hi)
    }
}

/// Sprite color of a pipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipeColor {
    Green,
    Red,
}

impl PipeColor {
    pub const ALL: [PipeColor; 2] = [PipeColor::Green, PipeColor::Red];

    pub fn as_str(&self) -> &'static str {
        match self {
            PipeColor::Green => "green",
            PipeColor::Red => "red",
        }
    }
}

/// A pipe pair scrolling right to left
#[derive(Debug, Clone)]
pub struct Pipe {
    pub tier: GapTier,
    /// Left edge
    pub x: f32,
    /// Upper edge of the opening (bottom of the upper barrier)
    pub gap_y: f32,
    /// Size of one barrier sprite
    pub size: Vec2,
}

impl Pipe {
    pub fn with_gap(tier: GapTier, x: f32, gap_y: f32, size: Vec2) -> Self {
        Self { tier, x, gap_y, size }
    }

    /// Pipe with the opening placed uniformly at random
    pub fn random<R: Rng + ?Sized>(
        tier: GapTier,
        x: f32,
        size: Vec2,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        let range = tier.spawn_range(SCREEN_HEIGHT)?;
        Ok(Self::in_range(tier, x, size, range, rng))
    }

    /// Pipe with the opening drawn from an already validated `spawn_range`
    pub fn in_range<R: Rng + ?Sized>(
        tier: GapTier,
        x: f32,
        size: Vec2,
        range: RangeInclusive<i32>,
        rng: &mut R,
    ) -> Self {
        let gap_y = rng.random_range(range) as f32;
        Self::with_gap(tier, x, gap_y, size)
    }

    pub fn gap(&self) -> f32 {
        self.tier.gap()
    }

    pub fn upper_rect(&self) -> Rect {
        Rect::new(self.x, self.gap_y - self.size.y, self.size.x, self.size.y)
    }

    pub fn lower_rect(&self) -> Rect {
        Rect::new(self.x, self.gap_y + self.gap(), self.size.x, self.size.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.size.x
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.size.x / 2.0
    }

    /// Scroll left at parallax speed
    pub fn advance(&mut self, dt: f32, world: &SimulationConfig) {
        self.x -= dt * world.world_speed() * PIPE_PARALLAX;
    }

    pub fn is_off_screen(&self) -> bool {
        self.right() < -OFFSCREEN_MARGIN
    }

    /// True if `rect` overlaps either barrier
    pub fn overlaps(&self, rect: &Rect) -> bool {
        rect.overlaps(&self.upper_rect()) || rect.overlaps(&self.lower_rect())
    }
}
