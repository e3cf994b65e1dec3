/// Shadow Sweeper: find the solar panels, avoid the shadows.

pub mod actions;
pub mod board;
pub mod logic;
pub mod render;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::games::Game;
use crate::input::{ClickState, InputEvent};
use crate::time::{IntervalTimer, TICKS_PER_SECOND};

use actions::*;
use board::{BoardConfig, BoardError};
use logic::{FlagOutcome, RevealOutcome};
use state::{GameSession, ShadowsState, TapMode};

pub struct ShadowsGame {
    pub state: ShadowsState,
    /// Elapsed-time timer. Stopped the moment the round ends.
    clock: IntervalTimer,
}

impl ShadowsGame {
    pub fn new(config: BoardConfig, seed: u64) -> Result<Self, BoardError> {
        Ok(Self::with_session(GameSession::new(config, seed)?))
    }

    pub fn with_session(session: GameSession) -> Self {
        let mut clock = IntervalTimer::new(TICKS_PER_SECOND);
        clock.start();
        Self {
            state: ShadowsState::new(session),
            clock,
        }
    }

    #[cfg(test)]
    pub fn clock_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Tap a tile according to the current mode.
    fn tap(&mut self, row: usize, col: usize) {
        self.state.cursor_row = row;
        self.state.cursor_col = col;
        match self.state.mode {
            TapMode::Reveal => self.reveal(row, col),
            TapMode::Flag => self.flag(row, col),
        }
    }

    fn reveal(&mut self, row: usize, col: usize) {
        match logic::reveal(&mut self.state.session, row, col) {
            RevealOutcome::Ignored => {}
            RevealOutcome::Revealed { tiles } if tiles > 1 => {
                self.state.add_log(&format!("日なたが広がった！ ({}マス)", tiles));
            }
            RevealOutcome::Revealed { .. } => {}
            RevealOutcome::Won { .. } => {
                let secs = self.state.session.elapsed_seconds;
                self.state
                    .add_log(&format!("★ 全てのパネルを発見！ {}秒でクリア", secs));
            }
            RevealOutcome::Lost => {
                self.state.add_log("影を踏んでしまった… [R] でもう一度");
            }
        }
        self.stop_clock_if_over();
    }

    fn flag(&mut self, row: usize, col: usize) {
        if logic::toggle_flag(&mut self.state.session, row, col) == FlagOutcome::Ignored {
            log::debug!("flag ({}, {}) ignored", row, col);
        }
    }

    /// The tick stream ends exactly once, when the round turns terminal.
    fn stop_clock_if_over(&mut self) {
        if self.state.session.is_terminal() && self.clock.is_running() {
            self.clock.stop();
            log::debug!("round over, timer stopped");
        }
    }

    /// New board. The old timer is cancelled before the new one starts.
    fn reset(&mut self) {
        self.clock.stop();
        if let Err(e) = self.state.session.reset() {
            log::error!("could not generate a new board: {}", e);
            self.state.add_log("盤面を作れませんでした");
            if !self.state.session.is_terminal() {
                self.clock.start();
            }
            return;
        }
        self.state.cursor_row = 0;
        self.state.cursor_col = 0;
        self.state.add_log("新しい盤面を用意しました");
        self.clock.start();
    }

    fn tile_for_action(&self, id: u16) -> Option<(usize, usize)> {
        let idx = id.checked_sub(TILE_BASE)? as usize;
        let size = self.state.session.board.size();
        if idx >= size * size {
            return None;
        }
        Some((idx / size, idx % size))
    }
}

impl Game for ShadowsGame {
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::Key('h') => self.state.move_cursor(0, -1),
            InputEvent::Key('l') => self.state.move_cursor(0, 1),
            InputEvent::Key('k') => self.state.move_cursor(-1, 0),
            InputEvent::Key('j') => self.state.move_cursor(1, 0),
            InputEvent::Key(' ') => {
                let (r, c) = (self.state.cursor_row, self.state.cursor_col);
                self.reveal(r, c);
            }
            InputEvent::Key('f') => {
                let (r, c) = (self.state.cursor_row, self.state.cursor_col);
                self.flag(r, c);
            }
            InputEvent::Key('t') => {
                self.state.mode = match self.state.mode {
                    TapMode::Reveal => TapMode::Flag,
                    TapMode::Flag => TapMode::Reveal,
                };
            }
            InputEvent::Key('r') | InputEvent::Click(RESET) => self.reset(),
            InputEvent::Click(MODE_REVEAL) => self.state.mode = TapMode::Reveal,
            InputEvent::Click(MODE_FLAG) => self.state.mode = TapMode::Flag,
            InputEvent::Click(id) => match self.tile_for_action(id) {
                Some((r, c)) => self.tap(r, c),
                None => return false,
            },
            InputEvent::Key(_) => return false,
        }
        true
    }

    fn advance(&mut self, now_ms: f64) {
        let ticks = self.clock.update(now_ms);
        self.tick(ticks);
    }

    fn tick(&mut self, delta_ticks: u32) {
        for _ in 0..delta_ticks {
            logic::tick(&mut self.state.session);
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }
}
