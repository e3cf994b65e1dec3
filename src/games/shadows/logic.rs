/// Shadow Sweeper game logic, pure functions over a `GameSession`.

use super::state::{GameSession, SessionStatus};

/// What a reveal did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Out of bounds, already revealed, flagged, or the round is over.
    Ignored,
    /// `tiles` safe tiles were opened (more than one when the fill cascaded).
    Revealed { tiles: usize },
    /// The last safe tile was opened.
    Won { tiles: usize },
    /// A shadow was opened.
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    Ignored,
    Placed,
    Removed,
}

/// Reveal `(row, col)` and, from zero-count tiles, flood outward.
///
/// The fill uses an explicit stack. A tile is pushed only while hidden and
/// marked revealed when popped, so each tile is opened at most once and the
/// work is bounded by the board size. Flagged tiles stop the fill.
pub fn reveal(session: &mut GameSession, row: usize, col: usize) -> RevealOutcome {
    if session.is_terminal() {
        log::debug!("reveal ({}, {}) ignored: round is over", row, col);
        return RevealOutcome::Ignored;
    }
    let Some(&tile) = session.board.tile(row, col) else {
        return RevealOutcome::Ignored;
    };
    if tile.is_revealed || tile.is_flagged {
        return RevealOutcome::Ignored;
    }

    if tile.is_shadow {
        lose(session, row, col);
        return RevealOutcome::Lost;
    }

    let mut opened = 0;
    let mut stack = vec![(row, col)];
    while let Some((r, c)) = stack.pop() {
        let Some(tile) = session.board.tile_mut(r, c) else {
            continue;
        };
        if tile.is_revealed || tile.is_flagged || tile.is_shadow {
            continue;
        }
        tile.is_revealed = true;
        opened += 1;

        if tile.neighboring_shadows == 0 {
            let board = &session.board;
            stack.extend(board.neighbors(r, c).filter(|&(nr, nc)| {
                board
                    .tile(nr, nc)
                    .is_some_and(|t| !t.is_revealed && !t.is_flagged)
            }));
        }
    }
    session.revealed_safe += opened;
    log::debug!("reveal ({}, {}) opened {} tiles", row, col, opened);

    if session.revealed_safe == session.board.safe_tile_count() {
        session.status = SessionStatus::Won;
        log::info!("board cleared in {}s", session.elapsed_seconds);
        RevealOutcome::Won { tiles: opened }
    } else {
        RevealOutcome::Revealed { tiles: opened }
    }
}

/// Loss: mark the round over and expose every shadow.
fn lose(session: &mut GameSession, row: usize, col: usize) {
    session.status = SessionStatus::Lost;
    session.triggered = Some((row, col));
    let shadows: Vec<(usize, usize)> = session
        .board
        .iter()
        .filter(|(_, _, t)| t.is_shadow)
        .map(|(r, c, _)| (r, c))
        .collect();
    for (r, c) in shadows {
        if let Some(tile) = session.board.tile_mut(r, c) {
            tile.is_revealed = true;
        }
    }
    log::info!("shadow hit at ({}, {}) after {}s", row, col, session.elapsed_seconds);
}

/// Flag or unflag a hidden tile.
pub fn toggle_flag(session: &mut GameSession, row: usize, col: usize) -> FlagOutcome {
    if session.is_terminal() {
        return FlagOutcome::Ignored;
    }
    let Some(tile) = session.board.tile_mut(row, col) else {
        return FlagOutcome::Ignored;
    };
    if tile.is_revealed {
        return FlagOutcome::Ignored;
    }
    tile.is_flagged = !tile.is_flagged;
    if tile.is_flagged {
        session.flags_placed += 1;
        FlagOutcome::Placed
    } else {
        session.flags_placed -= 1;
        FlagOutcome::Removed
    }
}

/// One second of play time. Does nothing once the round is over.
pub fn tick(session: &mut GameSession) {
    if session.status == SessionStatus::InProgress {
        session.elapsed_seconds += 1;
    }
}
