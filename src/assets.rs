//! Sprite table
//!
//! Sprites are loaded once at startup and handed around by reference. The
//! simulation only ever sees their sizes; the renderer gets the pixels.

use std::collections::HashMap;
use std::path::Path;

use glam::Vec2;
use image::{Rgba, RgbaImage, imageops};
use serde::{Deserialize, Serialize};

use crate::error::AssetError;
use crate::sim::{BirdColor, PipeColor, WingPhase};

/// Scale applied to the menu banner
const MENU_SCALE: f32 = 1.25;

/// Background variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backdrop {
    #[default]
    Day,
    Night,
}

impl Backdrop {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backdrop::Day => "day",
            Backdrop::Night => "night",
        }
    }
}

/// Opaque handle for one sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Bird(BirdColor, WingPhase),
    /// `flipped` is the upper barrier (opening faces down)
    Pipe { color: PipeColor, flipped: bool },
    Digit(u8),
    Background(Backdrop),
    Menu,
    GameOver,
}

impl SpriteId {
    /// Every sprite the game needs
    pub fn all() -> Vec<SpriteId> {
        let mut ids = Vec::new();
        for color in BirdColor::ALL {
            for phase in WingPhase::ALL {
                ids.push(SpriteId::Bird(color, phase));
            }
        }
        for color in PipeColor::ALL {
            ids.push(SpriteId::Pipe { color, flipped: false });
            ids.push(SpriteId::Pipe { color, flipped: true });
        }
        ids.extend((0..10).map(SpriteId::Digit));
        ids.push(SpriteId::Background(Backdrop::Day));
        ids.push(SpriteId::Background(Backdrop::Night));
        ids.push(SpriteId::Menu);
        ids.push(SpriteId::GameOver);
        ids
    }

    /// Source file name inside the sprites directory
    pub fn file_name(&self) -> String {
        match self {
            SpriteId::Bird(color, phase) => {
                format!("{}bird-{}flap.png", color.as_str(), phase.as_str())
            }
            SpriteId::Pipe { color, .. } => format!("pipe-{}.png", color.as_str()),
            SpriteId::Digit(d) => format!("{}.png", d),
            SpriteId::Background(b) => format!("background-{}.png", b.as_str()),
            SpriteId::Menu => "message.png".to_string(),
            SpriteId::GameOver => "gameover.png".to_string(),
        }
    }

    /// Size of the stock artwork, used for placeholders
    fn stock_size(&self) -> (u32, u32) {
        match self {
            SpriteId::Bird(..) => (34, 24),
            SpriteId::Pipe { .. } => (52, 320),
            SpriteId::Digit(1) => (16, 36),
            SpriteId::Digit(_) => (24, 36),
            SpriteId::Background(_) => (288, 512),
            SpriteId::Menu => (
                (184.0 * MENU_SCALE).round() as u32,
                (267.0 * MENU_SCALE).round() as u32,
            ),
            SpriteId::GameOver => (192, 42),
        }
    }

    fn placeholder_color(&self) -> Rgba<u8> {
        match self {
            SpriteId::Bird(color, phase) => {
                let shade = match phase {
                    WingPhase::Down => 0,
                    WingPhase::Mid => 30,
                    WingPhase::Up => 60,
                };
                match color {
                    BirdColor::Red => Rgba([220, 60 + shade, 50, 255]),
                    BirdColor::Blue => Rgba([60, 110 + shade, 220, 255]),
                    BirdColor::Yellow => Rgba([240, 200 + shade / 2, 40, 255]),
                }
            }
            SpriteId::Pipe { color: PipeColor::Green, .. } => Rgba([90, 170, 50, 255]),
            SpriteId::Pipe { color: PipeColor::Red, .. } => Rgba([200, 70, 40, 255]),
            SpriteId::Digit(_) => Rgba([255, 255, 255, 255]),
            SpriteId::Background(Backdrop::Day) => Rgba([78, 192, 202, 255]),
            SpriteId::Background(Backdrop::Night) => Rgba([0, 135, 147, 255]),
            SpriteId::Menu => Rgba([250, 250, 250, 200]),
            SpriteId::GameOver => Rgba([250, 120, 40, 230]),
        }
    }
}

/// A loaded sprite
#[derive(Debug, Clone)]
pub struct Sprite {
    pub id: SpriteId,
    pub image: RgbaImage,
}

impl Sprite {
    pub fn width(&self) -> f32 {
        self.image.width() as f32
    }

    pub fn height(&self) -> f32 {
        self.image.height() as f32
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }
}

/// All sprites, keyed by handle. Every `SpriteId::all()` entry is always present.
#[derive(Debug, Clone)]
pub struct AssetTable {
    sprites: HashMap<SpriteId, Sprite>,
}

impl AssetTable {
    /// Load every sprite from `dir`. Any missing or corrupt file is fatal.
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        let mut sprites = HashMap::new();
        for id in SpriteId::all() {
            let path = dir.join(id.file_name());
            if !path.is_file() {
                return Err(AssetError::Missing(path));
            }
            let mut image = image::open(&path)
                .map_err(|source| AssetError::Decode {
                    path: path.clone(),
                    source,
                })?
                .to_rgba8();

            match id {
                SpriteId::Pipe { flipped: true, .. } => {
                    image = imageops::flip_vertical(&image);
                }
                SpriteId::Menu => {
                    let w = (image.width() as f32 * MENU_SCALE).round() as u32;
                    let h = (image.height() as f32 * MENU_SCALE).round() as u32;
                    image = imageops::resize(&image, w, h, imageops::FilterType::Nearest);
                }
                _ => {}
            }
            sprites.insert(id, Sprite { id, image });
        }
        log::info!("Loaded {} sprites from {}", sprites.len(), dir.display());
        Ok(Self { sprites })
    }

    /// Flat-colored stand-ins with the stock sizes
    pub fn placeholder() -> Self {
        let sprites = SpriteId::all()
            .into_iter()
            .map(|id| {
                let (w, h) = id.stock_size();
                let image = RgbaImage::from_pixel(w, h, id.placeholder_color());
                (id, Sprite { id, image })
            })
            .collect();
        log::info!("Using placeholder sprites");
        Self { sprites }
    }

    pub fn get(&self, id: SpriteId) -> &Sprite {
        &self.sprites[&id]
    }

    pub fn size_of(&self, id: SpriteId) -> Vec2 {
        self.get(id).size()
    }

    /// Collision size of the bird (mid-flap frame)
    pub fn bird_size(&self, color: BirdColor) -> Vec2 {
        self.size_of(SpriteId::Bird(color, WingPhase::Mid))
    }

    /// Size of one barrier sprite
    pub fn pipe_size(&self, color: PipeColor) -> Vec2 {
        self.size_of(SpriteId::Pipe {
            color,
            flipped: false,
        })
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}
