//! Solar Clicker rendering.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ClickableList;

use super::actions::*;
use super::logic::{can_afford, format_number};
use super::state::{EnergyState, UpgradeId};

/// Solar panel art, 3 lines. The second frame is the "pressed" look.
const PANEL_ART: &[&[&str]] = &[
    &["╔═╤═╤═╗", "╟─┼─┼─╢", "╚═╧═╧═╝"],
    &["╔━┯━┯━╗", "┣━┿━┿━┫", "╚━┷━┷━╝"],
];

pub fn render(state: &EnergyState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    // Log panel on the right when wide enough
    let (main_area, log_area) = if area.width >= 80 {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        (h_chunks[0], Some(h_chunks[1]))
    } else {
        (area, None)
    };

    let upgrade_rows = UpgradeId::all().len() as u16 * 2 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // energy header
            Constraint::Length(7),            // panel button
            Constraint::Length(upgrade_rows), // upgrades
            Constraint::Min(0),
        ])
        .split(main_area);

    render_header(state, f, chunks[0]);
    render_panel(state, f, chunks[1], click_state);
    render_upgrades(state, f, chunks[2], click_state);

    if let Some(log_area) = log_area {
        render_log(state, f, log_area);
    }
}

fn render_header(state: &EnergyState, f: &mut Frame, area: Rect) {
    let res = &state.resources;
    let narrow = is_narrow_layout(area.width);
    let text = if narrow {
        format!("⚡{}  +{}/s", format_number(res.energy), format_number(res.per_second))
    } else {
        format!(
            "⚡ Energy: {}    Per second: {}",
            format_number(res.energy),
            format_number(res.per_second)
        )
    };
    let style = if state.purchase_flash > 0 {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    };
    let widget = Paragraph::new(Line::from(Span::styled(text, style)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Solar Clicker "),
        )
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

fn render_panel(state: &EnergyState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let frame = PANEL_ART[(state.total_clicks % 2) as usize];
    let art_style = Style::default().fg(Color::Cyan);

    let mut cl = ClickableList::new();
    for row in frame {
        cl.push(Line::from(Span::styled(*row, art_style)));
    }
    let hint = Line::from(vec![
        Span::styled(" [C] ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("発電する (+{})", format_number(state.resources.per_click)),
            Style::default().fg(Color::White),
        ),
    ]);
    cl.push_clickable(hint, GENERATE);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" パネル ");

    {
        // The whole panel box is the button, not only the hint line
        let mut cs = click_state.borrow_mut();
        cs.add_click_target(area, GENERATE);
        cl.register_targets(area, &mut cs, 1, 1);
    }

    let widget = Paragraph::new(cl.into_lines())
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

fn render_upgrades(state: &EnergyState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let res = &state.resources;
    let mut cl = ClickableList::new();

    for (i, &id) in UpgradeId::all().iter().enumerate() {
        let Some(record) = res.upgrade(id) else {
            continue;
        };
        let affordable = can_afford(res, id);
        let (key_style, name_style) = if affordable {
            (
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )
        } else {
            (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::DarkGray),
            )
        };
        let title = Line::from(vec![
            Span::styled(format!(" [{}] ", id.key()), key_style),
            Span::styled(id.name().to_string(), name_style),
            Span::styled(format!("  x{}", record.owned), Style::default().fg(Color::White)),
        ]);
        let detail = Line::from(Span::styled(
            format!(
                "     コスト {}  +{}/s",
                format_number(record.cost),
                format_number(record.per_second_effect)
            ),
            Style::default().fg(if affordable { Color::White } else { Color::DarkGray }),
        ));
        let action = BUY_UPGRADE_BASE + i as u16;
        cl.push_clickable(title, action);
        cl.push_clickable(detail, action);
    }

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1);
    }

    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" アップグレード "),
    );
    f.render_widget(widget, area);
}

fn render_log(state: &EnergyState, f: &mut Frame, area: Rect) {
    let visible_height = area.height.saturating_sub(2) as usize;
    let start = state.log.len().saturating_sub(visible_height);

    let log_lines: Vec<Line> = state.log[start..]
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();

    let widget = Paragraph::new(log_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(format!(" ログ ({}秒) ", state.elapsed_seconds)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
