//! Reusable clickable UI components for the HUD overlays.
//!
//! Each component encapsulates both rendering and click target registration,
//! so visual output and interactive behaviour stay co-located.
//!
//! # Components
//!
//! - [`ClickableList`]: Vertical list of lines with per-row click targets.
//! - [`Panel`]: A bordered overlay centred on the screen that renders a
//!   [`ClickableList`] and registers its targets.

use ratzilla::ratatui::layout::{Alignment, Rect};
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::Line;
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── ClickableList ──────────────────────────────────────────────

/// A builder that pairs rendered [`Line`]s with click actions.
///
/// Instead of manually calculating row offsets for click targets, annotate
/// lines as clickable when you add them, then call
/// [`register_targets`](ClickableList::register_targets) once after layout.
///
/// # Example
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Header (not clickable)"));
/// cl.push_clickable(Line::from("[S] Empezar"), START_ROUND);
/// Panel::new(" Burbujas ").render(cl, f, area, &mut cs);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)` pairs, indexing into `lines`.
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Add a non-clickable line.
    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a clickable line with a semantic action ID.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        let idx = self.lines.len() as u16;
        self.actions.push((idx, action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Widest line, in terminal columns.
    pub fn max_width(&self) -> u16 {
        self.lines.iter().map(|l| l.width() as u16).max().unwrap_or(0)
    }

    /// Consume the builder, returning the lines for rendering.
    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register click targets for all clickable lines. Each logical line is
    /// assumed to occupy one row (panels never wrap).
    ///
    /// * `area`: the widget area (including borders).
    /// * `top_offset` / `bottom_offset`: rows taken by borders.
    pub fn register_targets(&self, area: Rect, cs: &mut ClickState, top_offset: u16, bottom_offset: u16) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        for &(line_idx, action_id) in &self.actions {
            let row = content_y + line_idx;
            if row >= content_end {
                continue;
            }
            cs.add_row_target(area, row, action_id);
        }
    }
}

// ── Panel ──────────────────────────────────────────────────────

/// A rect of `width`×`height` centred inside `area`, clipped to it.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

/// A centred, bordered overlay panel.
pub struct Panel<'a> {
    title: &'a str,
    border: Color,
    min_width: u16,
}

impl<'a> Panel<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            border: Color::Cyan,
            min_width: 0,
        }
    }

    pub fn border(mut self, color: Color) -> Self {
        self.border = color;
        self
    }

    pub fn min_width(mut self, width: u16) -> Self {
        self.min_width = width;
        self
    }

    /// Size (including borders) needed to show `list` without clipping.
    pub fn size_for(&self, list: &ClickableList) -> (u16, u16) {
        let title_w = Line::from(self.title).width() as u16;
        let w = list.max_width().max(title_w).max(self.min_width) + 4;
        let h = list.len() as u16 + 2;
        (w, h)
    }

    /// Render the panel centred in `area` and register its click targets.
    /// Returns the rect actually drawn.
    pub fn render(self, list: ClickableList, f: &mut Frame, area: Rect, cs: &mut ClickState) -> Rect {
        let (w, h) = self.size_for(&list);
        let rect = centered_rect(w, h, area);

        list.register_targets(rect, cs, 1, 1);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border))
            .title(self.title);
        let paragraph = Paragraph::new(list.into_lines())
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(Clear, rect);
        f.render_widget(paragraph, rect);
        rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ClickState;

    #[test]
    fn clickable_list_basic() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("header"));
        cl.push_clickable(Line::from("item 0"), 10);
        cl.push_clickable(Line::from("item 1"), 11);
        cl.push(Line::from("footer"));

        assert_eq!(cl.len(), 4);

        let area = Rect::new(0, 5, 80, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1);

        // "item 0" is line 1 → row = 5 + 1 + 1 = 7
        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(10, 7), Some(10));
        assert_eq!(cs.hit_test(10, 8), Some(11));
        assert_eq!(cs.hit_test(10, 6), None);
        assert_eq!(cs.hit_test(10, 9), None);
    }

    #[test]
    fn clickable_list_clipped_by_area() {
        let mut cl = ClickableList::new();
        for i in 0..20 {
            cl.push_clickable(Line::from(format!("item {}", i)), 50 + i as u16);
        }

        // height=5 with top+bottom border → 3 content rows
        let area = Rect::new(0, 0, 80, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(10, 3), Some(52));
        assert_eq!(cs.hit_test(10, 4), None);
    }

    #[test]
    fn clickable_list_empty() {
        let cl: ClickableList = ClickableList::new();
        assert_eq!(cl.len(), 0);
        assert_eq!(cl.max_width(), 0);

        let mut cs = ClickState::new();
        cl.register_targets(Rect::new(0, 0, 80, 10), &mut cs, 1, 1);
        assert_eq!(cs.targets.len(), 0);
    }

    #[test]
    fn max_width_is_widest_line() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("abc"));
        cl.push_clickable(Line::from("abcdefg"), 1);
        assert_eq!(cl.max_width(), 7);
    }

    #[test]
    fn centered_rect_centres_and_clips() {
        let area = Rect::new(0, 0, 80, 30);
        assert_eq!(centered_rect(20, 10, area), Rect::new(30, 10, 20, 10));
        assert_eq!(centered_rect(200, 50, area), area);

        let offset = Rect::new(10, 5, 20, 10);
        assert_eq!(centered_rect(10, 4, offset), Rect::new(15, 8, 10, 4));
    }

    #[test]
    fn panel_size_includes_borders_and_padding() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("0123456789"));
        cl.push_clickable(Line::from("[R] Reiniciar"), 1);

        let (w, h) = Panel::new(" Fin ").size_for(&cl);
        assert_eq!(w, 13 + 4);
        assert_eq!(h, 4);

        let (w, _) = Panel::new(" Fin ").min_width(30).size_for(&cl);
        assert_eq!(w, 34);
    }

    #[test]
    fn panel_targets_land_on_centred_rows() {
        // Simulate what Panel::render registers: panel of 4 rows centred in 30
        let mut cl = ClickableList::new();
        cl.push(Line::from("Puntuación final: 3"));
        cl.push_clickable(Line::from("[R] Reiniciar"), 1);
        let (w, h) = Panel::new(" Fin ").size_for(&cl);
        let rect = centered_rect(w, h, Rect::new(0, 0, 80, 30));

        let mut cs = ClickState::new();
        cl.register_targets(rect, &mut cs, 1, 1);

        // rect.y = 13 → border 13, line0 14, line1 15
        assert_eq!(rect.y, 13);
        assert_eq!(cs.hit_test(rect.x + 1, 15), Some(1));
        assert_eq!(cs.hit_test(rect.x + 1, 14), None);
    }
}
