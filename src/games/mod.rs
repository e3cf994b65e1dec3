/// Game trait and game selection logic.

pub mod energy;
pub mod shadows;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};

use energy::EnergyGame;
use shadows::board::{BoardConfig, BoardError};
use shadows::ShadowsGame;

/// Trait that both games implement.
pub trait Game {
    /// Handle an input event. Returns true if the event was consumed.
    fn handle_input(&mut self, event: &InputEvent) -> bool;

    /// Feed the current frame timestamp (ms) to the game's own timer.
    fn advance(&mut self, now_ms: f64);

    /// Advance game logic by `delta_ticks` discrete ticks.
    fn tick(&mut self, delta_ticks: u32);

    /// Render the game into the given area.
    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>);
}

/// Which game the player has selected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameChoice {
    Energy,
    Shadows,
}

impl GameChoice {
    pub fn all() -> &'static [GameChoice] {
        &[GameChoice::Energy, GameChoice::Shadows]
    }

    pub fn title(self) -> &'static str {
        match self {
            GameChoice::Energy => "Solar Clicker",
            GameChoice::Shadows => "Shadow Sweeper",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GameChoice::Energy => "クリックで発電、パネルを買って自動発電",
            GameChoice::Shadows => "影を避けてソーラーパネルを探し出せ",
        }
    }

    pub fn key(self) -> char {
        match self {
            GameChoice::Energy => '1',
            GameChoice::Shadows => '2',
        }
    }

    pub fn from_key(key: char) -> Option<GameChoice> {
        Self::all().iter().copied().find(|c| c.key() == key)
    }
}

/// Top-level application state.
///
/// Each game is created the first time it is opened and then lives for the
/// page session. The menu only changes which one is shown; hidden games keep
/// receiving frame time so their timers never lapse.
pub struct Arcade {
    pub energy: Option<EnergyGame>,
    pub shadows: Option<ShadowsGame>,
    current: Option<GameChoice>,
}

impl Arcade {
    pub fn new() -> Self {
        Self {
            energy: None,
            shadows: None,
            current: None,
        }
    }

    /// The game on screen, or `None` while the menu is shown.
    pub fn current(&self) -> Option<GameChoice> {
        self.current
    }

    /// Show `choice`, creating it on first use. `seed` feeds board generation.
    pub fn open(&mut self, choice: GameChoice, seed: u64) -> Result<(), BoardError> {
        match choice {
            GameChoice::Energy if self.energy.is_none() => {
                self.energy = Some(EnergyGame::new());
                log::info!("starting {}", choice.title());
            }
            GameChoice::Shadows if self.shadows.is_none() => {
                self.shadows = Some(ShadowsGame::new(BoardConfig::standard()?, seed)?);
                log::info!("starting {}", choice.title());
            }
            _ => log::info!("resuming {}", choice.title()),
        }
        self.current = Some(choice);
        Ok(())
    }

    pub fn back_to_menu(&mut self) {
        self.current = None;
    }

    pub fn active(&self) -> Option<&dyn Game> {
        match self.current? {
            GameChoice::Energy => self.energy.as_ref().map(|g| g as &dyn Game),
            GameChoice::Shadows => self.shadows.as_ref().map(|g| g as &dyn Game),
        }
    }

    fn active_mut(&mut self) -> Option<&mut dyn Game> {
        match self.current? {
            GameChoice::Energy => self.energy.as_mut().map(|g| g as &mut dyn Game),
            GameChoice::Shadows => self.shadows.as_mut().map(|g| g as &mut dyn Game),
        }
    }

    /// Route input to the game on screen. Returns false on the menu.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        self.active_mut().is_some_and(|g| g.handle_input(event))
    }

    /// Feed the frame timestamp to every live game, shown or not.
    pub fn advance(&mut self, now_ms: f64) {
        if let Some(game) = self.energy.as_mut() {
            game.advance(now_ms);
        }
        if let Some(game) = self.shadows.as_mut() {
            game.advance(now_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::energy::state::UpgradeId;

    #[test]
    fn menu_keys_map_to_games() {
        assert_eq!(GameChoice::from_key('1'), Some(GameChoice::Energy));
        assert_eq!(GameChoice::from_key('2'), Some(GameChoice::Shadows));
        assert_eq!(GameChoice::from_key('3'), None);
    }

    #[test]
    fn menu_routes_no_input() {
        let mut arcade = Arcade::new();
        assert_eq!(arcade.current(), None);
        assert!(arcade.active().is_none());
        assert!(!arcade.handle_input(&InputEvent::Key('c')));
    }

    #[test]
    fn opened_games_accept_their_keys() {
        let mut arcade = Arcade::new();
        arcade.open(GameChoice::Energy, 0).unwrap();
        assert!(arcade.handle_input(&InputEvent::Key('c')));

        arcade.open(GameChoice::Shadows, 42).unwrap();
        assert_eq!(arcade.current(), Some(GameChoice::Shadows));
        assert!(arcade.handle_input(&InputEvent::Key('j')));
        assert!(!arcade.handle_input(&InputEvent::Key('z')));
    }

    #[test]
    fn energy_survives_menu_round_trip() {
        let mut arcade = Arcade::new();
        arcade.open(GameChoice::Energy, 0).unwrap();
        for _ in 0..12 {
            arcade.handle_input(&InputEvent::Key('c'));
        }
        arcade.handle_input(&InputEvent::Key('1'));

        arcade.back_to_menu();
        assert!(!arcade.handle_input(&InputEvent::Key('c')));
        arcade.open(GameChoice::Energy, 99).unwrap();

        let res = &arcade.energy.as_ref().unwrap().state.resources;
        assert_eq!(res.energy, 2.0);
        assert_eq!(res.per_second, 1.0);
        let panel = res.upgrade(UpgradeId::SmallPanel).unwrap();
        assert_eq!(panel.owned, 1);
        assert_eq!(panel.cost, 15.0);
    }

    #[test]
    fn hidden_energy_game_keeps_generating() {
        let mut arcade = Arcade::new();
        arcade.open(GameChoice::Energy, 0).unwrap();
        arcade.energy.as_mut().unwrap().state.resources.per_second = 2.0;
        arcade.advance(0.0);

        arcade.back_to_menu();
        arcade.advance(1000.0);
        arcade.advance(3000.0);

        let game = arcade.energy.as_ref().unwrap();
        assert_eq!(game.state.resources.energy, 6.0);
        assert_eq!(game.state.elapsed_seconds, 3);
    }

    #[test]
    fn puzzle_board_kept_across_visits() {
        let mut arcade = Arcade::new();
        arcade.open(GameChoice::Shadows, 7).unwrap();
        arcade.handle_input(&InputEvent::Key('f'));
        let board = arcade.shadows.as_ref().unwrap().state.session.board.clone();

        arcade.back_to_menu();
        arcade.open(GameChoice::Shadows, 8).unwrap();

        let session = &arcade.shadows.as_ref().unwrap().state.session;
        assert_eq!(session.board, board);
        assert_eq!(session.flags_placed, 1);
    }
}
