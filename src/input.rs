//! Input plumbing shared by both games: normalised events, click targets
//! registered during render, and pixel → terminal-cell conversion.
//!
//! Nothing here knows about energy or shadows; each game maps events to its
//! own operations.

use ratzilla::ratatui::layout::Rect;

/// Keyboard, mouse and touch input, normalised.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A character key press.
    Key(char),
    /// A tap on a registered target, identified by the game's action ID.
    Click(u16),
}

/// A screen region that dispatches an action when tapped.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    /// Hit region in terminal cell coordinates.
    pub rect: Rect,
    pub action_id: u16,
}

/// Targets registered by the last frame plus the terminal size they were laid
/// out for. Shared between the render loop and the mouse handler.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Register a full-width target on `row`, ignored if the row lies outside `area`.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.targets.push(ClickTarget {
                rect: Rect::new(area.x, row, area.width, 1),
                action_id,
            });
        }
    }

    /// Register one target per cell of a `rows × cols` grid drawn at `origin`
    /// with each cell `cell_width` columns wide and one row high.
    ///
    /// Cell `(r, c)` dispatches `base_id + r * cols + c`. Cells falling outside
    /// `bounds` are skipped so a clipped grid never produces phantom targets.
    pub fn add_grid_targets(
        &mut self,
        bounds: Rect,
        origin: (u16, u16),
        cell_width: u16,
        rows: u16,
        cols: u16,
        base_id: u16,
    ) {
        let (ox, oy) = origin;
        for r in 0..rows {
            let y = oy + r;
            if y < bounds.y || y >= bounds.y + bounds.height {
                continue;
            }
            for c in 0..cols {
                let x = ox + c * cell_width;
                if x < bounds.x || x + cell_width > bounds.x + bounds.width {
                    continue;
                }
                self.add_click_target(Rect::new(x, y, cell_width, 1), base_id + r * cols + c);
            }
        }
    }

    /// Register a target covering just a centred, one-row text of
    /// `text_width` columns on the first row of `inner`.
    pub fn add_centered_text_target(&mut self, inner: Rect, text_width: u16, action_id: u16) {
        if inner.width == 0 || inner.height == 0 || text_width == 0 {
            return;
        }
        let width = text_width.min(inner.width);
        let x = inner.x + (inner.width - width) / 2;
        self.add_click_target(Rect::new(x, inner.y, width, 1), action_id);
    }

    /// Register targets for a one-row tab bar from the rendered label widths.
    ///
    /// `tab_widths` holds `(display_width, action_id)` of each padded label.
    /// Each target covers its label plus half of the neighbouring separators;
    /// the first and last tabs stretch to the edges of the bar.
    pub fn register_tab_targets(
        &mut self,
        tab_widths: &[(u16, u16)],
        separator_width: u16,
        x: u16,
        y: u16,
        total_width: u16,
        height: u16,
    ) {
        let n = tab_widths.len();
        if n == 0 || total_width == 0 {
            return;
        }

        let mut starts: Vec<u16> = Vec::with_capacity(n);
        let mut cursor: u16 = 0;
        for (i, &(w, _)) in tab_widths.iter().enumerate() {
            if i > 0 {
                cursor += separator_width;
            }
            starts.push(cursor);
            cursor += w;
        }

        for (i, &(width, action_id)) in tab_widths.iter().enumerate() {
            let left = if i == 0 {
                0
            } else {
                let prev_end = starts[i - 1] + tab_widths[i - 1].0;
                prev_end + (starts[i] - prev_end) / 2
            };
            let right = if i == n - 1 {
                total_width
            } else {
                let cur_end = starts[i] + width;
                cur_end + (starts[i + 1] - cur_end) / 2
            };

            let w = right.saturating_sub(left);
            if w > 0 {
                self.add_click_target(Rect::new(x + left, y, w, height), action_id);
            }
        }
    }

    /// Action ID under the given cell. Later registrations sit on top and win.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            if col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height {
                Some(t.action_id)
            } else {
                None
            }
        })
    }
}

/// Narrow screens (phones) stack panels vertically.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Convert a pixel Y offset inside the terminal grid to a row index.
///
/// Returns `None` if the click is outside the grid or the grid has no size.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    if grid_height <= 0.0 || terminal_rows == 0 || click_y < 0.0 {
        return None;
    }
    let row = (click_y / (grid_height / terminal_rows as f64)) as u16;
    if row >= terminal_rows {
        None
    } else {
        Some(row)
    }
}

/// Convert a pixel X offset inside the terminal grid to a column index.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    if grid_width <= 0.0 || terminal_cols == 0 || click_x < 0.0 {
        return None;
    }
    let col = (click_x / (grid_width / terminal_cols as f64)) as u16;
    if col >= terminal_cols {
        None
    } else {
        Some(col)
    }
}
