//! Bubble Pop rendering: the recorded play field painted onto the terminal,
//! with the HUD (instructions, countdown, end panel) as ratatui widgets on top.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::Paragraph;
use ratzilla::ratatui::Frame;

use crate::canvas::{self, DrawList, Viewport};
use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, Panel};

use super::actions::{RESTART_ROUND, START_ROUND};
use super::hud::Hud;
use super::scene::final_score_text;

/// Paint the last recorded frame and the HUD overlays.
pub fn render(
    frame: &DrawList,
    viewport: Viewport,
    hud: &Hud,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    canvas::paint(frame, viewport, f, area);

    if let Some(text) = &hud.countdown {
        render_countdown(text, f, area);
    }

    let mut cs = click_state.borrow_mut();
    let min_width = if is_narrow_layout(area.width) { 0 } else { 30 };

    if hud.instructions_visible {
        render_instructions(f, area, &mut cs, min_width);
    } else if hud.score_panel_visible {
        render_score_panel(hud.final_score.unwrap_or(0), f, area, &mut cs, min_width);
    }
}

fn render_countdown(text: &str, f: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let width = (text.chars().count() as u16 + 2).min(area.width);
    let rect = Rect::new(area.x + 1.min(area.width), area.y, width, 1);
    let p = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));
    f.render_widget(p, rect.intersection(area));
}

fn render_instructions(f: &mut Frame, area: Rect, cs: &mut ClickState, min_width: u16) {
    let mut cl = ClickableList::new();
    cl.push(Line::from("Revienta las burbujas antes"));
    cl.push(Line::from("de que se acabe el tiempo."));
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            "[S] Empezar",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        START_ROUND,
    );
    Panel::new(" Burbujas ").min_width(min_width).render(cl, f, area, cs);
}

fn render_score_panel(score: u32, f: &mut Frame, area: Rect, cs: &mut ClickState, min_width: u16) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        final_score_text(score),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            "[R] Reiniciar",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        RESTART_ROUND,
    );
    Panel::new(" Fin del juego ")
        .border(Color::Yellow)
        .min_width(min_width)
        .render(cl, f, area, cs);
}
