//! Shadow Sweeper rendering.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::board::Tile;
use super::state::{SessionStatus, ShadowsState, TapMode};

/// Columns per tile on screen.
const CELL_WIDTH: u16 = 3;

pub fn render(state: &ShadowsState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let (main_area, log_area) = if area.width >= 80 {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(44), Constraint::Min(20)])
            .split(area);
        (h_chunks[0], Some(h_chunks[1]))
    } else {
        (area, None)
    };

    let board_rows = state.session.board.size() as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),          // counters
            Constraint::Length(3),          // tap mode
            Constraint::Length(board_rows), // board
            Constraint::Length(4),          // hints
            Constraint::Min(0),
        ])
        .split(main_area);

    render_header(state, f, chunks[0]);
    render_mode_tabs(state, f, chunks[1], click_state);
    render_board(state, f, chunks[2], click_state);
    render_hints(state, f, chunks[3], click_state);

    match log_area {
        Some(log_area) => render_log(state, f, log_area),
        None => render_log(state, f, chunks[4]),
    }
}

fn render_header(state: &ShadowsState, f: &mut Frame, area: Rect) {
    let session = &state.session;
    let (status_text, status_color) = match session.status {
        SessionStatus::InProgress => ("探索中", Color::White),
        SessionStatus::Won => ("★ クリア！", Color::Green),
        SessionStatus::Lost => ("✸ 失敗…", Color::Red),
    };
    let narrow = is_narrow_layout(area.width);
    let counters = if narrow {
        format!("影 {}  ⏱ {}s  ", session.shadows_left(), session.elapsed_seconds)
    } else {
        format!(
            "残りの影: {}    経過: {}秒    ",
            session.shadows_left(),
            session.elapsed_seconds
        )
    };
    let line = Line::from(vec![
        Span::styled(counters, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::styled(status_text, Style::default().fg(status_color).add_modifier(Modifier::BOLD)),
    ]);
    let widget = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(status_color))
                .title(" Shadow Sweeper "),
        )
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

fn render_mode_tabs(state: &ShadowsState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let mut cs = click_state.borrow_mut();
    TabBar::new(" │ ")
        .tab("⛏ 掘る", state.mode == TapMode::Reveal, Color::Yellow, MODE_REVEAL)
        .tab("⚑ 旗", state.mode == TapMode::Flag, Color::Red, MODE_FLAG)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" タップ "),
        )
        .render(f, area, &mut cs);
}

/// Glyph and style for one tile.
fn tile_cell(tile: &Tile, triggered: bool, terminal: bool) -> (String, Style) {
    if tile.is_revealed && tile.is_shadow {
        if triggered {
            return (
                " ✸ ".into(),
                Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD),
            );
        }
        return (" ● ".into(), Style::default().fg(Color::Magenta));
    }
    if tile.is_flagged {
        // Wrong flags show once the round is over
        let color = if terminal && !tile.is_shadow { Color::DarkGray } else { Color::Red };
        return (" ⚑ ".into(), Style::default().fg(color).add_modifier(Modifier::BOLD));
    }
    if !tile.is_revealed {
        return (" ░ ".into(), Style::default().fg(Color::Gray));
    }
    match tile.neighboring_shadows {
        0 => (" · ".into(), Style::default().fg(Color::DarkGray)),
        n => {
            let color = match n {
                1 => Color::Cyan,
                2 => Color::Green,
                3 => Color::Yellow,
                _ => Color::Red,
            };
            (format!(" {} ", n), Style::default().fg(color).add_modifier(Modifier::BOLD))
        }
    }
}

fn render_board(state: &ShadowsState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let session = &state.session;
    let board = &session.board;
    let size = board.size() as u16;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 盤面 ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let grid_width = size * CELL_WIDTH;
    let origin = (inner.x + inner.width.saturating_sub(grid_width) / 2, inner.y);

    let mut lines: Vec<Line> = Vec::with_capacity(board.size());
    for row in 0..board.size() {
        let mut spans = Vec::with_capacity(board.size());
        for col in 0..board.size() {
            let Some(tile) = board.tile(row, col) else {
                continue;
            };
            let triggered = session.triggered == Some((row, col));
            let (text, mut style) = tile_cell(tile, triggered, session.is_terminal());
            if !session.is_terminal() && (row, col) == (state.cursor_row, state.cursor_col) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(text, style));
        }
        lines.push(Line::from(spans));
    }

    let grid_area = Rect::new(
        origin.0,
        origin.1,
        grid_width.min(inner.width),
        size.min(inner.height),
    );
    f.render_widget(Paragraph::new(lines), grid_area);

    if !session.is_terminal() {
        let mut cs = click_state.borrow_mut();
        cs.add_grid_targets(inner, origin, CELL_WIDTH, size, size, TILE_BASE);
    }
}

fn render_hints(state: &ShadowsState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let mut cl = ClickableList::new();

    let reset_label = if state.session.is_terminal() {
        "もう一度遊ぶ"
    } else {
        "新しい盤面"
    };
    let reset = Line::from(vec![
        Span::styled(" [R] ", key_style),
        Span::styled(reset_label, Style::default().fg(Color::White)),
    ]);
    cl.push_clickable(reset, RESET);

    let keys = if is_narrow_layout(area.width) {
        " hjkl 移動  Space 掘る  f 旗"
    } else {
        " hjkl 移動  Space 掘る  f 旗  t タップ切替"
    };
    cl.push(Line::from(Span::styled(keys, Style::default().fg(Color::DarkGray))));

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1);
    }

    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(widget, area);
}

fn render_log(state: &ShadowsState, f: &mut Frame, area: Rect) {
    if area.height < 3 {
        return;
    }
    let visible_height = area.height.saturating_sub(2) as usize;
    let start = state.log.len().saturating_sub(visible_height);

    let log_lines: Vec<Line> = state.log[start..]
        .iter()
        .map(|text| Line::from(Span::styled(text.as_str(), Style::default().fg(Color::Gray))))
        .collect();

    let widget = Paragraph::new(log_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" ログ "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
