use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::GameError;

pub const GRID_WIDTH: usize = 3;
pub const TILE_COUNT: usize = GRID_WIDTH * GRID_WIDTH;
/// The tile value that marks the blank.
pub const EMPTY_TILE: u8 = (TILE_COUNT - 1) as u8;

/// A 3x3 sliding puzzle board.
///
/// `tiles[pos]` is the tile currently sitting at `pos`; tile `i` belongs at
/// position `i`. The blank's position is carried alongside the tiles and
/// updated by every mutation, so it never has to be searched for.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; TILE_COUNT]", into = "[u8; TILE_COUNT]")]
pub struct TileGrid {
    tiles: [u8; TILE_COUNT],
    empty_position: usize,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::identity()
    }
}

impl TileGrid {
    /// The solved grid `[0, 1, ..., 8]` with the blank in the last cell.
    pub fn identity() -> Self {
        Self {
            tiles: std::array::from_fn(|i| i as u8),
            empty_position: TILE_COUNT - 1,
        }
    }

    pub fn from_tiles(tiles: [u8; TILE_COUNT]) -> Result<Self, GameError> {
        let mut seen = [false; TILE_COUNT];
        for &tile in tiles.iter() {
            match seen.get_mut(tile as usize) {
                Some(flag) if !*flag => *flag = true,
                _ => return Err(GameError::InvalidGrid(tiles.to_vec())),
            }
        }
        // every value is present exactly once, so the blank exists
        let empty_position = tiles
            .iter()
            .position(|&t| t == EMPTY_TILE)
            .ok_or_else(|| GameError::InvalidGrid(tiles.to_vec()))?;
        Ok(Self {
            tiles,
            empty_position,
        })
    }

    pub fn tiles(&self) -> &[u8; TILE_COUNT] {
        &self.tiles
    }

    pub fn tile_at(&self, position: usize) -> u8 {
        self.tiles[position]
    }

    pub fn empty_position(&self) -> usize {
        self.empty_position
    }

    pub fn row_col(position: usize) -> (usize, usize) {
        (position / GRID_WIDTH, position % GRID_WIDTH)
    }

    /// Returns a copy with the tiles at `a` and `b` exchanged. Callers
    /// guarantee both indices are in `0..9`.
    pub fn swap(&self, a: usize, b: usize) -> TileGrid {
        let mut next = *self;
        next.tiles.swap(a, b);
        if next.empty_position == a {
            next.empty_position = b;
        } else if next.empty_position == b {
            next.empty_position = a;
        }
        next
    }

    pub fn is_complete(&self) -> bool {
        self.tiles
            .iter()
            .enumerate()
            .all(|(position, &tile)| tile as usize == position)
    }

    /// Number of out-of-order pairs among the non-blank tiles. On an odd-width
    /// board a slide never changes its parity.
    pub fn inversions(&self) -> usize {
        self.tiles
            .iter()
            .filter(|&&t| t != EMPTY_TILE)
            .tuple_combinations()
            .filter(|(a, b)| a > b)
            .count()
    }

    /// True when the grid can be reached from [`TileGrid::identity`] by slides.
    pub fn is_solvable(&self) -> bool {
        self.inversions() % 2 == 0
    }
}

impl TryFrom<[u8; TILE_COUNT]> for TileGrid {
    type Error = GameError;

    fn try_from(tiles: [u8; TILE_COUNT]) -> Result<Self, Self::Error> {
        TileGrid::from_tiles(tiles)
    }
}

impl From<TileGrid> for [u8; TILE_COUNT] {
    fn from(grid: TileGrid) -> Self {
        grid.tiles
    }
}

impl Display for TileGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut rows = self.tiles.chunks(GRID_WIDTH).map(|row| {
            row.iter()
                .map(|&t| {
                    if t == EMPTY_TILE {
                        ".".to_string()
                    } else {
                        (t + 1).to_string()
                    }
                })
                .join(" ")
        });
        write!(f, "{}", rows.join("\n"))
    }
}

impl std::fmt::Debug for TileGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} (empty at {})", self.tiles, self.empty_position)
    }
}
