mod canvas;
mod games;
mod input;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use canvas::Viewport;
use games::bubbles::state::RoundConfig;
use games::bubbles::BubbleGame;
use games::Game;
use input::{ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

/// Nominal cell size used when the grid element cannot be measured.
const FALLBACK_CELL_WIDTH_PX: f64 = 10.0;
const FALLBACK_CELL_HEIGHT_PX: f64 = 15.0;

/// Bounding rect of the terminal grid as `(left, top, width, height)` in client pixels.
fn grid_rect() -> Option<(f64, f64, f64, f64)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();
    Some((rect.left(), rect.top(), rect.width(), rect.height()))
}

/// Pixel size of the play area: the whole terminal grid.
fn current_viewport(cols: u16, rows: u16) -> Viewport {
    match grid_rect() {
        Some((_, _, w, h)) if w > 0.0 && h > 0.0 => Viewport::new(w, h),
        _ => Viewport::new(
            cols as f64 * FALLBACK_CELL_WIDTH_PX,
            rows as f64 * FALLBACK_CELL_HEIGHT_PX,
        ),
    }
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

fn round_config() -> RoundConfig {
    let query = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    let config = RoundConfig::from_query(&query);
    log::info!(
        "config: {} bubbles, {}s rounds, spawn depth {}",
        config.bubble_count,
        config.duration_secs,
        config.spawn_depth
    );
    config
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).map_err(io::Error::other)?;

    let game = Rc::new(RefCell::new(BubbleGame::new(round_config())));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let Some((left, top, width, height)) = grid_rect() else {
                return;
            };
            let local_x = mouse_event.x as f64 - left;
            let local_y = mouse_event.y as f64 - top;

            let event = click_state
                .borrow()
                .resolve_click(local_x, local_y, width, height);
            if let Some(event) = event {
                log::debug!("click at ({:.0}, {:.0}) -> {:?}", local_x, local_y, event);
                game.borrow_mut().handle_input(&event);
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                game.borrow_mut().handle_input(&InputEvent::Key(c.to_ascii_lowercase()));
            }
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let size = f.area();

            // Update terminal dimensions and clear click targets
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            let viewport = current_viewport(size.width, size.height);
            let mut game = game.borrow_mut();
            game.tick(now_ms(), viewport);
            game.render(f, size, &click_state);
        }
    });

    Ok(())
}
