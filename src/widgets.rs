//! Clickable UI components.
//!
//! Each component renders its lines and registers the matching click
//! targets in the same call, so what the player sees is what they can tap.
//!
//! - [`TabBar`]: one-row selector (rendering + click targets).
//! - [`ClickableList`]: vertical lines, some bound to action IDs.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// A horizontal selector, e.g. the reveal / flag tap mode.
///
/// ```ignore
/// TabBar::new(" │ ")
///     .tab("掘る", true, Color::Yellow, MODE_REVEAL)
///     .tab("旗", false, Color::Red, MODE_FLAG)
///     .render(f, area, &mut cs);
/// ```
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    /// Add a tab. The active tab is drawn inverted in `color`.
    pub fn tab(mut self, label: impl Into<String>, active: bool, color: Color, action_id: u16) -> Self {
        let style = if active {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        };
        self.tabs.push((label.into(), style, action_id));
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Render the bar and register one target per tab.
    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let mut spans: Vec<Span> = Vec::new();
        let sep_width = Line::from(self.separator).width() as u16;
        let mut tab_widths: Vec<(u16, u16)> = Vec::new();

        for (i, (label, style, action_id)) in self.tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.separator, Style::default().fg(Color::DarkGray)));
            }
            let padded = format!(" {} ", label);
            tab_widths.push((Line::from(padded.as_str()).width() as u16, *action_id));
            spans.push(Span::styled(padded, *style));
        }

        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };

        let line = Line::from(spans);
        let paragraph = match self.block {
            Some(block) => Paragraph::new(line).block(block),
            None => Paragraph::new(line),
        };
        f.render_widget(paragraph, area);

        // Full outer height for tap tolerance
        cs.register_tab_targets(&tab_widths, sep_width, inner.x, area.y, inner.width, area.height.max(1));
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines paired with optional click actions.
///
/// Targets follow their lines: inserting a header before a button moves the
/// button's target with it.
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Add a plain, non-interactive line.
    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a line bound to `action_id`.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        let idx = self.lines.len() as u16;
        self.actions.push((idx, action_id));
        self.lines.push(line);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register a row target for every clickable line, one line per row.
    ///
    /// `top_offset` / `bottom_offset` are the border rows of the enclosing
    /// block. Lines pushed past the visible area get no target.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clickable_lines_land_on_their_rows() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("energy: 12"));
        cl.push_clickable(Line::from("buy panel"), 100);
        cl.push_clickable(Line::from("buy battery"), 101);
        cl.push(Line::from("footer"));
        assert_eq!(cl.len(), 4);

        // Borders::ALL → 1 row above and below
        let area = Rect::new(0, 5, 40, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(3, 7), Some(100));
        assert_eq!(cs.hit_test(3, 8), Some(101));
        assert_eq!(cs.hit_test(3, 6), None);
        assert_eq!(cs.hit_test(3, 9), None);
    }

    #[test]
    fn clickable_list_clipped_by_area() {
        let mut cl = ClickableList::new();
        for i in 0..10u16 {
            cl.push_clickable(Line::from(format!("item {}", i)), 50 + i);
        }
        // height 5 with borders → 3 content rows
        let area = Rect::new(0, 0, 40, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(1, 3), Some(52));
        assert_eq!(cs.hit_test(1, 4), None);
    }

    #[test]
    fn clickable_list_into_lines_keeps_order() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("a"));
        cl.push_clickable(Line::from("b"), 1);
        let lines = cl.into_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].width(), 1);
    }
}
