/// Game trait shared by the shell and the games it hosts.

pub mod bubbles;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::canvas::Viewport;
use crate::input::{ClickState, InputEvent};

/// Trait that all games implement.
pub trait Game {
    /// Handle an input event. Returns true if the event was consumed.
    fn handle_input(&mut self, event: &InputEvent) -> bool;

    /// Advance game logic to the wall-clock timestamp `now_ms`, drawing into
    /// a play area of `viewport` pixels.
    fn tick(&mut self, now_ms: f64, viewport: Viewport);

    /// Render the game into the given area.
    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>);
}
