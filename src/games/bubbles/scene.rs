//! The play field as canvas drawing commands: bubbles and the score readout.
//!
//! Everything here draws through [`Surface`], so the round controller can
//! render a frame without knowing what paints it.

use crate::canvas::{Rgba, Surface, TextAlign, TextStyle, Viewport};

use super::state::{Bubble, BubbleField};

const BUBBLE_FILL: (u8, u8, u8) = (173, 216, 230);
const SCORE_BOX_WIDTH: f64 = 200.0;
const SCORE_BOX_HEIGHT: f64 = 50.0;
const SCORE_BOX_TOP: f64 = 20.0;
const SCORE_TEXT_Y: f64 = 50.0;
const SCORE_FONT_PX: f64 = 24.0;

pub fn score_text(score: u32) -> String {
    format!("Puntuación: {}", score)
}

pub fn countdown_text(secs: u32) -> String {
    format!("Tiempo: {} s", secs)
}

pub fn final_score_text(score: u32) -> String {
    format!("Puntuación final: {}", score)
}

/// Draw one full frame: clear, score readout, then every bubble.
pub fn draw_frame<S: Surface>(surface: &mut S, viewport: Viewport, score: u32, field: &BubbleField) {
    surface.clear_rect(0.0, 0.0, viewport.width, viewport.height);
    draw_score_readout(surface, viewport, score);
    for bubble in field.iter() {
        draw_bubble(surface, bubble);
    }
}

/// Translucent circle, lighter outline, and a small highlight toward the upper left.
pub fn draw_bubble<S: Surface>(surface: &mut S, bubble: &Bubble) {
    let (r, g, b) = BUBBLE_FILL;
    let op = bubble.opacity;
    surface.fill_circle(bubble.x, bubble.y, bubble.radius, Rgba::new(r, g, b, op));
    surface.stroke_circle(bubble.x, bubble.y, bubble.radius, 2.0, Rgba::new(255, 255, 255, op + 0.1));
    surface.fill_circle(
        bubble.x - bubble.radius / 3.0,
        bubble.y - bubble.radius / 3.0,
        bubble.radius / 5.0,
        Rgba::new(255, 255, 255, op + 0.2),
    );
}

pub fn draw_score_readout<S: Surface>(surface: &mut S, viewport: Viewport, score: u32) {
    surface.fill_rect(
        (viewport.width - SCORE_BOX_WIDTH) / 2.0,
        SCORE_BOX_TOP,
        SCORE_BOX_WIDTH,
        SCORE_BOX_HEIGHT,
        Rgba::new(255, 255, 255, 0.8),
    );
    surface.fill_text(
        &score_text(score),
        viewport.width / 2.0,
        SCORE_TEXT_Y,
        TextStyle {
            size_px: SCORE_FONT_PX,
            align: TextAlign::Center,
            color: Rgba::opaque(0, 0, 0),
        },
    );
}
