/// Solar Clicker: an incremental energy game.

pub mod actions;
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
use state::{EnergyState, UpgradeId};

pub struct EnergyGame {
    pub state: EnergyState,
    /// Passive generation timer. Runs for the life of the game.
    clock: IntervalTimer,
}

impl EnergyGame {
    pub fn new() -> Self {
        let mut clock = IntervalTimer::new(TICKS_PER_SECOND);
        clock.start();
        Self {
            state: EnergyState::new(),
            clock,
        }
    }

    fn upgrade_for_action(id: u16) -> Option<UpgradeId> {
        let idx = id.checked_sub(BUY_UPGRADE_BASE)? as usize;
        UpgradeId::all().get(idx).copied()
    }
}

impl Game for EnergyGame {
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::Key('c') | InputEvent::Key(' ') | InputEvent::Click(GENERATE) => {
                logic::click(&mut self.state);
                true
            }
            InputEvent::Key(key) => match UpgradeId::from_key(key) {
                Some(id) => {
                    logic::buy_upgrade(&mut self.state, id);
                    true
                }
                None => false,
            },
            InputEvent::Click(id) => match Self::upgrade_for_action(id) {
                Some(upgrade) => {
                    logic::buy_upgrade(&mut self.state, upgrade);
                    true
                }
                None => false,
            },
        }
    }

    fn advance(&mut self, now_ms: f64) {
        let ticks = self.clock.update(now_ms);
        self.tick(ticks);
    }

    fn tick(&mut self, delta_ticks: u32) {
        if delta_ticks > 0 {
            logic::tick(&mut self.state, delta_ticks);
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }
}
