use crate::model::{TileGrid, GRID_WIDTH, TILE_COUNT};

/// Orthogonal neighbours of `position`, in the order up, down, left, right.
/// Corners have two, edges three, the centre four.
pub fn adjacent_positions(position: usize) -> Vec<usize> {
    let (row, col) = TileGrid::row_col(position);
    let mut adjacent = Vec::with_capacity(4);

    if row > 0 {
        adjacent.push(position - GRID_WIDTH);
    }
    if row < GRID_WIDTH - 1 {
        adjacent.push(position + GRID_WIDTH);
    }
    if col > 0 {
        adjacent.push(position - 1);
    }
    if col < GRID_WIDTH - 1 {
        adjacent.push(position + 1);
    }
    adjacent
}

/// True when `a` and `b` share a row and sit one column apart, or share a
/// column and sit one row apart.
pub fn are_adjacent(a: usize, b: usize) -> bool {
    if a >= TILE_COUNT || b >= TILE_COUNT {
        return false;
    }
    let (row_a, col_a) = TileGrid::row_col(a);
    let (row_b, col_b) = TileGrid::row_col(b);

    (row_a.abs_diff(row_b) == 1 && col_a == col_b) || (col_a.abs_diff(col_b) == 1 && row_a == row_b)
}

/// Whether the tile at `position` may slide into the blank.
pub fn is_adjacent_to_empty(grid: &TileGrid, position: usize) -> bool {
    are_adjacent(position, grid.empty_position())
}
