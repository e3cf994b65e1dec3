/// Shadow Sweeper session state.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::board::{Board, BoardConfig, BoardError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    InProgress,
    Won,
    Lost,
}

impl SessionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionStatus::Won | SessionStatus::Lost)
    }
}

/// One round of play on one board.
///
/// Won and Lost are terminal: reveals, flags and ticks are ignored until
/// `reset` replaces the board.
pub struct GameSession {
    pub board: Board,
    pub status: SessionStatus,
    pub revealed_safe: usize,
    pub flags_placed: usize,
    pub elapsed_seconds: u64,
    /// The shadow that ended the round, if any.
    pub triggered: Option<(usize, usize)>,
    rng: SmallRng,
}

impl GameSession {
    /// New session on a freshly generated board. Boards are reproducible
    /// from `seed` (the browser seeds from the current time).
    pub fn new(config: BoardConfig, seed: u64) -> Result<Self, BoardError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = Board::generate(config, &mut rng)?;
        log::info!(
            "new board {}x{} with {} shadows (seed {})",
            config.size(),
            config.size(),
            config.shadow_count(),
            seed
        );
        Ok(Self::with_board(board, rng))
    }

    /// Session on a prepared board. `reset` regenerates with that board's
    /// own size and shadow count.
    #[cfg(test)]
    pub fn from_board(board: Board, seed: u64) -> Self {
        Self::with_board(board, SmallRng::seed_from_u64(seed))
    }

    fn with_board(board: Board, rng: SmallRng) -> Self {
        Self {
            board,
            status: SessionStatus::InProgress,
            revealed_safe: 0,
            flags_placed: 0,
            elapsed_seconds: 0,
            triggered: None,
            rng,
        }
    }

    /// Replace the board and zero every counter. The only way out of a
    /// terminal state. On error the current round is left untouched.
    pub fn reset(&mut self) -> Result<(), BoardError> {
        let board = Board::generate(self.board.config(), &mut self.rng)?;
        let rng = self.rng.clone();
        *self = Self::with_board(board, rng);
        log::info!("session reset");
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Shadows minus flags. Goes negative when the player over-flags.
    pub fn shadows_left(&self) -> i64 {
        self.board.shadow_count() as i64 - self.flags_placed as i64
    }
}

/// What tapping a tile does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapMode {
    Reveal,
    Flag,
}

/// Shadow Sweeper state: the session plus cursor, tap mode and message log.
pub struct ShadowsState {
    pub session: GameSession,
    pub cursor_row: usize,
    pub cursor_col: usize,
    pub mode: TapMode,
    pub log: Vec<String>,
}

impl ShadowsState {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            cursor_row: 0,
            cursor_col: 0,
            mode: TapMode::Reveal,
            log: vec!["Shadow Sweeper へようこそ！ 影を避けてパネルを探そう。".into()],
        }
    }

    pub fn add_log(&mut self, text: &str) {
        self.log.push(text.to_string());
        if self.log.len() > 30 {
            self.log.remove(0);
        }
    }

    /// Move cursor, clamped to the board.
    pub fn move_cursor(&mut self, dr: i32, dc: i32) {
        let max = self.session.board.size() as i32 - 1;
        self.cursor_row = (self.cursor_row as i32 + dr).clamp(0, max) as usize;
        self.cursor_col = (self.cursor_col as i32 + dc).clamp(0, max) as usize;
    }
}
