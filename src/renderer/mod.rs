//! Rendering collaborator
//!
//! The game describes each frame as a sequence of sprite draws against a `Canvas`.
//! The canvas decides what a draw means: record it, blit pixels, or push to a GPU.

pub mod framebuffer;
pub mod scene;

pub use framebuffer::Framebuffer;
pub use scene::{NumberLayout, draw_scene, layout_number};

use glam::Vec2;

use crate::assets::{Sprite, SpriteId};

/// Something sprites can be drawn onto
pub trait Canvas {
    /// Start a new frame
    fn clear(&mut self);

    /// Draw `sprite` with its unrotated top-left corner at `pos`, rotated clockwise by
    /// `rotation` degrees around its center
    fn draw(&mut self, sprite: &Sprite, pos: Vec2, rotation: f32);

    /// Finish the frame
    fn present(&mut self) {}
}

/// One recorded draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub sprite: SpriteId,
    pub pos: Vec2,
    pub rotation: f32,
}

/// Canvas that records draws instead of producing pixels
#[derive(Debug, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
    pub frames: u64,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// All draws of the given sprite in the current frame
    pub fn find(&self, sprite: SpriteId) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(move |c| c.sprite == sprite)
    }
}

impl Canvas for DrawList {
    fn clear(&mut self) {
        self.commands.clear();
    }

    fn draw(&mut self, sprite: &Sprite, pos: Vec2, rotation: f32) {
        self.commands.push(DrawCommand {
            sprite: sprite.id,
            pos,
            rotation,
        });
    }

    fn present(&mut self) {
        self.frames += 1;
    }
}
