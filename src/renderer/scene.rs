//! Frame composition: what gets drawn where for each game phase

use glam::Vec2;

use super::Canvas;
use crate::assets::{AssetTable, Backdrop, SpriteId};
use crate::consts::*;
use crate::sim::{GamePhase, GameState};

/// Vertical center of the record shown on the menu
const MENU_RECORD_CENTER_Y: f32 = 50.0;
/// How far above screen center the game-over banner sits
const GAME_OVER_RAISE: f32 = 20.0;
/// Where the in-game score is drawn
const SCORE_ORIGIN: Vec2 = Vec2::new(0.0, 5.0);

/// Digit placement for a number, relative to its own origin
#[derive(Debug, Clone, PartialEq)]
pub struct NumberLayout {
    pub digits: Vec<(SpriteId, f32)>,
    pub width: f32,
    pub height: f32,
}

/// Lay out the digits of `value` left to right. The "1" glyph is narrower than the
/// others and pulls the following digits left by the difference.
pub fn layout_number(value: u32, assets: &AssetTable) -> NumberLayout {
    let digit = assets.size_of(SpriteId::Digit(0));
    let narrow = digit.x - assets.size_of(SpriteId::Digit(1)).x;

    let mut x = SCORE_PADDING;
    let mut digits = Vec::new();
    for ch in value.to_string().chars() {
        let d = ch.to_digit(10).unwrap_or(0) as u8;
        digits.push((SpriteId::Digit(d), x));
        if d == 1 {
            x -= narrow;
        }
        x += digit.x + LETTER_SPACING;
    }

    NumberLayout {
        digits,
        width: x,
        height: digit.y,
    }
}

fn draw_number(value: u32, origin: Vec2, assets: &AssetTable, canvas: &mut impl Canvas) {
    for (id, x) in layout_number(value, assets).digits {
        canvas.draw(assets.get(id), origin + Vec2::new(x, 0.0), 0.0);
    }
}

/// Top-left position that centers `size` on `center`
fn centered(size: Vec2, center: Vec2) -> Vec2 {
    center - size / 2.0
}

/// Draw one full frame of `state`
pub fn draw_scene(
    state: &GameState,
    assets: &AssetTable,
    backdrop: Backdrop,
    canvas: &mut impl Canvas,
) {
    canvas.clear();

    // Two copies side by side so the scroll wraps seamlessly
    let bg = assets.get(SpriteId::Background(backdrop));
    canvas.draw(bg, Vec2::new(state.background_x, 0.0), 0.0);
    canvas.draw(bg, Vec2::new(state.background_x + SCREEN_WIDTH, 0.0), 0.0);

    let screen_center = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT) / 2.0;

    match state.phase {
        GamePhase::Menu => {
            draw_bird(state, assets, canvas);

            let menu = assets.get(SpriteId::Menu);
            canvas.draw(menu, centered(menu.size(), screen_center), 0.0);

            let record = layout_number(state.high_score, assets);
            let origin = centered(
                Vec2::new(record.width, record.height),
                Vec2::new(screen_center.x, MENU_RECORD_CENTER_Y),
            );
            draw_number(state.high_score, origin, assets, canvas);
        }

        GamePhase::Run | GamePhase::Die => {
            draw_bird(state, assets, canvas);

            for pipe in state.stream.pipes() {
                let color = pipe.tier.color();
                let lower = pipe.lower_rect();
                let upper = pipe.upper_rect();
                canvas.draw(
                    assets.get(SpriteId::Pipe { color, flipped: false }),
                    lower.pos,
                    0.0,
                );
                canvas.draw(
                    assets.get(SpriteId::Pipe { color, flipped: true }),
                    upper.pos,
                    0.0,
                );
            }

            draw_number(state.score, SCORE_ORIGIN, assets, canvas);

            if state.phase == GamePhase::Die {
                let banner = assets.get(SpriteId::GameOver);
                let center = screen_center - Vec2::new(0.0, GAME_OVER_RAISE);
                canvas.draw(banner, centered(banner.size(), center), 0.0);
            }
        }

        GamePhase::End => {}
    }

    canvas.present();
}

fn draw_bird(state: &GameState, assets: &AssetTable, canvas: &mut impl Canvas) {
    let bird = &state.bird;
    let sprite = assets.get(SpriteId::Bird(bird.color, bird.phase));
    canvas.draw(sprite, bird.pos, bird.tilt);
}
