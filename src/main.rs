mod games;
mod input;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use games::{Arcade, GameChoice};
use input::{is_narrow_layout, pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::{Frame, Terminal};
use ratzilla::{DomBackend, WebRenderer};
use widgets::ClickableList;

/// App-level action IDs, kept clear of both games' ranges.
const BACK_TO_MENU: u16 = 9000;
const MENU_BASE: u16 = 9100;

/// Query the grid container's bounding rect and convert pixel coordinates to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let click_x = mouse_x as f64 - rect.left();
    let click_y = mouse_y as f64 - rect.top();

    let col = pixel_x_to_col(click_x, rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(click_y, rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

/// Milliseconds from the page's monotonic clock.
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

fn open_game(arcade: &mut Arcade, choice: GameChoice) {
    let seed = js_sys::Date::now() as u64;
    if let Err(e) = arcade.open(choice, seed) {
        log::error!("could not start {}: {}", choice.title(), e);
    }
}

#[cfg(target_arch = "wasm32")]
fn init_logging() -> io::Result<()> {
    console_log::init_with_level(log::Level::Debug).map_err(|e| io::Error::other(e.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() -> io::Result<()> {
    Ok(())
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    init_logging()?;

    let app = Rc::new(RefCell::new(Arcade::new()));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let app = app.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed || mouse_event.button != MouseButton::Left {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs) else {
                return;
            };
            let action = cs.hit_test(col, row);
            log::debug!("click: cell=({}, {}), action={:?}, targets={}", col, row, action, cs.targets.len());
            drop(cs);

            let Some(action) = action else {
                return;
            };
            let mut arcade = app.borrow_mut();
            if action == BACK_TO_MENU {
                arcade.back_to_menu();
                return;
            }
            if arcade.current().is_some() {
                arcade.handle_input(&InputEvent::Click(action));
                return;
            }
            let idx = action.checked_sub(MENU_BASE).map(usize::from);
            if let Some(&choice) = idx.and_then(|i| GameChoice::all().get(i)) {
                open_game(&mut arcade, choice);
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let app = app.clone();
        move |key_event| {
            let mut arcade = app.borrow_mut();
            if matches!(key_event.code, KeyCode::Esc) {
                arcade.back_to_menu();
                return;
            }
            let KeyCode::Char(c) = key_event.code else {
                return;
            };
            if arcade.current().is_some() {
                arcade.handle_input(&InputEvent::Key(c.to_ascii_lowercase()));
                return;
            }
            if let Some(choice) = GameChoice::from_key(c) {
                open_game(&mut arcade, choice);
            }
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let mut arcade = app.borrow_mut();
            let size = f.area();

            // Update terminal dimensions and clear click targets
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(10), Constraint::Length(3)])
                .split(size);

            // Every live game keeps its clock, including the hidden ones
            arcade.advance(now_ms());

            match arcade.active() {
                Some(game) => {
                    game.render(f, chunks[0], &click_state);
                    render_help(f, chunks[1], true, &click_state);
                }
                None => {
                    render_menu(f, chunks[0], &click_state);
                    render_help(f, chunks[1], false, &click_state);
                }
            }
        }
    });

    Ok(())
}

fn render_menu(f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let narrow = is_narrow_layout(area.width);
    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    for (i, &choice) in GameChoice::all().iter().enumerate() {
        let action = MENU_BASE + i as u16;
        cl.push_clickable(
            Line::from(vec![
                Span::styled(
                    format!(" [{}] ", choice.key()),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::styled(choice.title(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            ]),
            action,
        );
        if !narrow {
            cl.push_clickable(
                Line::from(Span::styled(
                    format!("     {}", choice.description()),
                    Style::default().fg(Color::Gray),
                )),
                action,
            );
        }
        cl.push(Line::from(""));
    }

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1);
    }

    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" ☀ Solar Arcade "),
    );
    f.render_widget(widget, area);
}

fn render_help(f: &mut Frame, area: Rect, playing: bool, click_state: &Rc<RefCell<ClickState>>) {
    let help_text = if playing {
        "[Esc] メニューに戻る"
    } else {
        "1 / 2 を押すか、タップしてゲームを選択"
    };
    let line = Line::from(Span::styled(help_text, Style::default().fg(Color::DarkGray)));
    let text_width = line.width() as u16;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    let help = Paragraph::new(line).block(block).alignment(Alignment::Center);
    f.render_widget(help, area);

    if playing {
        // Only the hint itself leads back, not the whole bar
        click_state
            .borrow_mut()
            .add_centered_text_target(inner, text_width, BACK_TO_MENU);
    }
}
