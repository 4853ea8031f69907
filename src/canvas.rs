//! 2D drawing surface shared by the game core and the DOM shell.
//!
//! Game code issues canvas-style drawing commands (rectangles, circles, text)
//! in viewport pixel coordinates against the [`Surface`] trait. The shell
//! records them into a [`DrawList`] each frame and [`paint`]s the list onto a
//! ratatui `Canvas` widget, so the drawing logic stays testable without a
//! browser.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::symbols::Marker;
use ratzilla::ratatui::text::Span;
use ratzilla::ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine};
use ratzilla::ratatui::Frame;

/// Background colour the canvas is cleared to. Alpha blending is computed
/// against this colour since terminal cells have no transparency.
pub const BACKGROUND: (u8, u8, u8) = (12, 32, 64);

/// Size of the play area in CSS pixels (origin top-left, y grows downward).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An sRGB colour with straight alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Composite this colour over an opaque background.
    pub fn blend_over(&self, bg: (u8, u8, u8)) -> (u8, u8, u8) {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (fg as f64 * a + bg as f64 * (1.0 - a)).round() as u8;
        (mix(self.r, bg.0), mix(self.g, bg.1), mix(self.b, bg.2))
    }

    fn to_color(self) -> Color {
        let (r, g, b) = self.blend_over(BACKGROUND);
        Color::Rgb(r, g, b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size_px: f64,
    pub align: TextAlign,
    pub color: Rgba,
}

/// A canvas-like 2D drawing target. Coordinates are viewport pixels.
pub trait Surface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba);
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba);
    fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64, line_width: f64, color: Rgba);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Rgba,
    },
    FillCircle {
        cx: f64,
        cy: f64,
        radius: f64,
        color: Rgba,
    },
    StrokeCircle {
        cx: f64,
        cy: f64,
        radius: f64,
        line_width: f64,
        color: Rgba,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        style: TextStyle,
    },
}

/// A [`Surface`] that records commands for later painting.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text drawn so far, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for DrawList {
    /// A recording has no pixels to keep, so any clear discards the whole
    /// recording.
    fn clear_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) {
        self.commands.clear();
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { x, y, w, h, color });
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::FillCircle {
            cx,
            cy,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64, line_width: f64, color: Rgba) {
        self.commands.push(DrawCommand::StrokeCircle {
            cx,
            cy,
            radius,
            line_width,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            style,
        });
    }
}

/// Vertical distance in viewport pixels between two scan lines, so that every
/// Braille dot row of the area gets one line.
fn scan_step(viewport: Viewport, area: Rect) -> f64 {
    let dot_rows = (area.height.max(1) as f64) * 4.0;
    (viewport.height / dot_rows).max(0.5)
}

/// Left edge of a text run, in viewport pixels.
fn text_left(text: &str, x: f64, align: TextAlign, viewport: Viewport, area: Rect) -> f64 {
    match align {
        TextAlign::Left => x,
        TextAlign::Center => {
            let cell_w = viewport.width / area.width.max(1) as f64;
            x - text.chars().count() as f64 * cell_w / 2.0
        }
    }
}

/// Paint a recorded frame over `area`, mapping the viewport onto it.
pub fn paint(list: &DrawList, viewport: Viewport, f: &mut Frame, area: Rect) {
    let (r, g, b) = BACKGROUND;
    let step = scan_step(viewport, area);
    let canvas = Canvas::default()
        .background_color(Color::Rgb(r, g, b))
        .marker(Marker::Braille)
        .x_bounds([0.0, viewport.width.max(1.0)])
        .y_bounds([0.0, viewport.height.max(1.0)])
        .paint(|ctx| {
            for cmd in list.commands() {
                paint_command(ctx, cmd, viewport, area, step);
                ctx.layer();
            }
        });
    f.render_widget(canvas, area);
}

fn paint_command(ctx: &mut Context, cmd: &DrawCommand, viewport: Viewport, area: Rect, step: f64) {
    // Canvas y grows upward.
    let flip = |y: f64| viewport.height - y;
    match cmd {
        DrawCommand::FillRect { x, y, w, h, color } => {
            let color = color.to_color();
            let mut sy = *y;
            while sy <= y + h {
                ctx.draw(&CanvasLine::new(*x, flip(sy), x + w, flip(sy), color));
                sy += step;
            }
        }
        DrawCommand::FillCircle {
            cx,
            cy,
            radius,
            color,
        } => {
            let color = color.to_color();
            let mut dy = -radius;
            while dy <= *radius {
                let half = (radius * radius - dy * dy).max(0.0).sqrt();
                ctx.draw(&CanvasLine::new(cx - half, flip(cy + dy), cx + half, flip(cy + dy), color));
                dy += step;
            }
        }
        DrawCommand::StrokeCircle {
            cx,
            cy,
            radius,
            line_width,
            color,
        } => {
            let color = color.to_color();
            let mut r = radius - line_width / 2.0;
            while r <= radius + line_width / 2.0 {
                ctx.draw(&Circle {
                    x: *cx,
                    y: flip(*cy),
                    radius: r.max(0.0),
                    color,
                });
                r += step;
            }
        }
        DrawCommand::Text { text, x, y, style } => {
            let left = text_left(text, *x, style.align, viewport, area);
            let span = Span::styled(text.clone(), Style::default().fg(style.color.to_color()));
            ctx.print(left, flip(*y), span);
        }
    }
}
