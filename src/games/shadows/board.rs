/// Board types for Shadow Sweeper.

use rand::Rng;
use thiserror::Error;

pub const BOARD_SIZE: usize = 10;
pub const SHADOWS_COUNT: usize = 15;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("board must have at least one tile")]
    EmptyBoard,
    #[error("{shadows} shadows leave no safe tile on a {size}x{size} board")]
    TooManyShadows { size: usize, shadows: usize },
    #[error("shadow at ({row}, {col}) is outside a {size}x{size} board")]
    ShadowOutOfBounds { row: usize, col: usize, size: usize },
}

/// Board dimensions. Always leaves at least one safe tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    size: usize,
    shadow_count: usize,
}

impl BoardConfig {
    pub fn new(size: usize, shadow_count: usize) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::EmptyBoard);
        }
        if shadow_count >= size * size {
            return Err(BoardError::TooManyShadows {
                size,
                shadows: shadow_count,
            });
        }
        Ok(Self { size, shadow_count })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn shadow_count(&self) -> usize {
        self.shadow_count
    }

    /// The stock 10x10 board with 15 shadows.
    pub fn standard() -> Result<Self, BoardError> {
        Self::new(BOARD_SIZE, SHADOWS_COUNT)
    }
}

/// One square of the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tile {
    pub is_shadow: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    /// Shadows among the 8 surrounding tiles. Meaningless on a shadow tile.
    pub neighboring_shadows: u8,
}

/// Square grid [row][col]. Shadow placement and counts are fixed at creation.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    tiles: Vec<Vec<Tile>>,
    config: BoardConfig,
}

impl Board {
    /// Place `config.shadow_count()` shadows uniformly at random, without
    /// replacement, then count neighbours.
    ///
    /// Rejection sampling: a pick that lands on an existing shadow is
    /// redrawn. `BoardConfig` guarantees a free tile always exists.
    pub fn generate<R: Rng>(config: BoardConfig, rng: &mut R) -> Result<Board, BoardError> {
        let size = config.size();
        let mut taken = vec![false; size * size];
        let mut shadows = Vec::with_capacity(config.shadow_count());
        while shadows.len() < config.shadow_count() {
            let row = rng.random_range(0..size);
            let col = rng.random_range(0..size);
            let slot = &mut taken[row * size + col];
            if *slot {
                continue;
            }
            *slot = true;
            shadows.push((row, col));
        }
        Board::from_shadows(size, &shadows)
    }

    /// Build a board with shadows at the given positions (duplicates collapse).
    pub fn from_shadows(size: usize, shadows: &[(usize, usize)]) -> Result<Board, BoardError> {
        let mut tiles = vec![vec![Tile::default(); size]; size];
        for &(row, col) in shadows {
            if row >= size || col >= size {
                return Err(BoardError::ShadowOutOfBounds { row, col, size });
            }
            tiles[row][col].is_shadow = true;
        }
        let count = tiles.iter().flatten().filter(|t| t.is_shadow).count();
        let mut board = Board {
            tiles,
            config: BoardConfig::new(size, count)?,
        };
        board.compute_counts();
        Ok(board)
    }

    fn compute_counts(&mut self) {
        for row in 0..self.size() {
            for col in 0..self.size() {
                if self.tiles[row][col].is_shadow {
                    continue;
                }
                let count = self
                    .neighbors(row, col)
                    .filter(|&(r, c)| self.tiles[r][c].is_shadow)
                    .count();
                self.tiles[row][col].neighboring_shadows = count as u8;
            }
        }
    }

    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    pub fn shadow_count(&self) -> usize {
        self.config.shadow_count()
    }

    /// Dimensions this board was built with, for regenerating a like board.
    pub fn config(&self) -> BoardConfig {
        self.config
    }

    /// Tiles that must be revealed to win.
    pub fn safe_tile_count(&self) -> usize {
        self.size() * self.size() - self.shadow_count()
    }

    pub fn tile(&self, row: usize, col: usize) -> Option<&Tile> {
        self.tiles.get(row)?.get(col)
    }

    pub(crate) fn tile_mut(&mut self, row: usize, col: usize) -> Option<&mut Tile> {
        self.tiles.get_mut(row)?.get_mut(col)
    }

    /// The up-to-8 Chebyshev neighbours of `(row, col)`, clipped to the board.
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
        let size = self.size();
        let rows = row.saturating_sub(1)..=(row + 1).min(size.saturating_sub(1));
        rows.flat_map(move |r| {
            let cols = col.saturating_sub(1)..=(col + 1).min(size.saturating_sub(1));
            cols.map(move |c| (r, c))
        })
        .filter(move |&pos| pos != (row, col))
    }

    /// Row-major iterator over `(row, col, tile)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Tile)> {
        self.tiles
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, t)| (r, c, t)))
    }
}
