// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;

/// Side length of every level grid, in tiles.
pub const LEVEL_SIZE: u32 = 1024;

const CELL_COUNT: usize = (LEVEL_SIZE as usize) * (LEVEL_SIZE as usize);

/// An error returned when grid coordinates fall outside the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// `x` or `y` is not below [`LEVEL_SIZE`].
    OutOfRange {
        /// The requested column.
        x: u32,
        /// The requested row.
        y: u32,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfRange { x, y } => write!(
                f,
                "Tile coordinates ({x}, {y}) are outside the {LEVEL_SIZE}x{LEVEL_SIZE} level."
            ),
        }
    }
}

impl std::error::Error for GridError {}

/// A square grid of tile ids, one byte per cell.
///
/// Storage is a flat heap array in row-major order (`y * LEVEL_SIZE + x`).
/// Id `0` marks an empty cell.
#[derive(Clone, PartialEq, Eq)]
pub struct TileGrid {
    cells: Box<[u8]>,
}

impl TileGrid {
    /// Creates a grid with every cell empty.
    pub fn new() -> Self {
        Self {
            cells: vec![0u8; CELL_COUNT].into_boxed_slice(),
        }
    }

    #[inline(always)]
    fn index(x: u32, y: u32) -> Result<usize, GridError> {
        if !Self::in_bounds(x, y) {
            return Err(GridError::OutOfRange { x, y });
        }
        Ok((y as usize) * (LEVEL_SIZE as usize) + (x as usize))
    }

    /// Returns `true` if `(x, y)` addresses a cell.
    #[inline]
    pub fn in_bounds(x: u32, y: u32) -> bool {
        x < LEVEL_SIZE && y < LEVEL_SIZE
    }

    /// Reads the tile id at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> Result<u8, GridError> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Reads the tile id at signed coordinates, as produced by a view window
    /// that hangs over the level edge. Negative coordinates are out of range.
    pub fn get_signed(&self, x: i64, y: i64) -> Result<u8, GridError> {
        match (u32::try_from(x), u32::try_from(y)) {
            (Ok(x), Ok(y)) => self.get(x, y),
            _ => Err(GridError::OutOfRange {
                x: x.clamp(0, u32::MAX as i64) as u32,
                y: y.clamp(0, u32::MAX as i64) as u32,
            }),
        }
    }

    /// Writes the tile id at `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, tile: u8) -> Result<(), GridError> {
        let idx = Self::index(x, y)?;
        self.cells[idx] = tile;
        Ok(())
    }

    /// Iterates over every non-empty cell as `(x, y, tile)`, row by row.
    pub fn iter_occupied(&self) -> impl Iterator<Item = (u32, u32, u8)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, tile)| **tile != 0)
            .map(|(idx, &tile)| {
                let idx = idx as u32;
                (idx % LEVEL_SIZE, idx / LEVEL_SIZE, tile)
            })
    }

    /// Number of non-empty cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&tile| tile != 0).count()
    }
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileGrid")
            .field("size", &LEVEL_SIZE)
            .field("occupied", &self.occupied_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_empty() {
        let grid = TileGrid::new();
        assert_eq!(grid.get(0, 0), Ok(0));
        assert_eq!(grid.get(1023, 1023), Ok(0));
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn set_then_get() {
        let mut grid = TileGrid::new();
        grid.set(3, 7, 5).unwrap();
        grid.set(1023, 0, 190).unwrap();
        assert_eq!(grid.get(3, 7), Ok(5));
        assert_eq!(grid.get(7, 3), Ok(0));
        assert_eq!(grid.get(1023, 0), Ok(190));
    }

    #[test]
    fn out_of_range_access_fails() {
        let mut grid = TileGrid::new();
        assert_eq!(
            grid.get(1024, 0),
            Err(GridError::OutOfRange { x: 1024, y: 0 })
        );
        assert_eq!(
            grid.get(0, 4095),
            Err(GridError::OutOfRange { x: 0, y: 4095 })
        );
        assert_eq!(
            grid.set(2000, 2000, 1),
            Err(GridError::OutOfRange { x: 2000, y: 2000 })
        );
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn bounds_stop_at_level_edge() {
        assert!(TileGrid::in_bounds(0, 0));
        assert!(TileGrid::in_bounds(1023, 1023));
        assert!(!TileGrid::in_bounds(1024, 0));
        assert!(!TileGrid::in_bounds(0, 1024));

        let mut grid = TileGrid::new();
        assert_eq!(
            grid.set(1024, 3, 1),
            Err(GridError::OutOfRange { x: 1024, y: 3 })
        );
    }

    #[test]
    fn signed_access_rejects_negative_coordinates() {
        let mut grid = TileGrid::new();
        grid.set(0, 0, 9).unwrap();
        assert_eq!(grid.get_signed(0, 0), Ok(9));
        assert!(grid.get_signed(-1, 0).is_err());
        assert!(grid.get_signed(0, -1).is_err());
        assert!(grid.get_signed(1024, 0).is_err());
    }

    #[test]
    fn iter_occupied_is_row_major() {
        let mut grid = TileGrid::new();
        grid.set(5, 2, 1).unwrap();
        grid.set(1, 2, 2).unwrap();
        grid.set(9, 0, 3).unwrap();

        let cells: Vec<_> = grid.iter_occupied().collect();
        assert_eq!(cells, vec![(9, 0, 3), (1, 2, 2), (5, 2, 1)]);
    }

    #[test]
    fn out_of_range_display() {
        let err = GridError::OutOfRange { x: 1024, y: 3 };
        assert_eq!(
            format!("{err}"),
            "Tile coordinates (1024, 3) are outside the 1024x1024 level."
        );
    }
}
