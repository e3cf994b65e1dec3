//! Semantic action IDs for Shadow Sweeper click targets.

pub const RESET: u16 = 1;
pub const MODE_REVEAL: u16 = 2;
pub const MODE_FLAG: u16 = 3;

/// Tile tap (base + row * size + col).
pub const TILE_BASE: u16 = 1000;
