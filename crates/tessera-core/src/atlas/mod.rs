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

//! Defines the fixed layout of the tile texture atlas.
//!
//! The atlas is a single `304x160` image cut into `16x16` cells, giving
//! 19 columns and 10 rows. Tile id `0` means "no tile" and has no cell;
//! ids `1..=190` map to cells in row-major order.

use crate::math::{Extent2D, Vec2};
use std::fmt;

/// Width of the atlas image in pixels.
pub const ATLAS_WIDTH: u32 = 304;
/// Height of the atlas image in pixels.
pub const ATLAS_HEIGHT: u32 = 160;
/// Side of a single atlas cell in pixels.
pub const TILE_SIZE: u32 = 16;
/// Width used to derive the horizontal UV extent of a cell.
///
/// Slightly wider than [`ATLAS_WIDTH`], which shrinks each sampled cell by a
/// fraction of a texel and keeps neighbouring cells from bleeding into seams.
pub const UV_PADDING_WIDTH: f32 = 306.0;

/// An error returned when a tile id has no cell in the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtlasError {
    /// The id is `0` (empty) or beyond the last atlas cell.
    InvalidTile(u8),
}

impl fmt::Display for AtlasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtlasError::InvalidTile(0) => {
                write!(f, "Tile id 0 is the empty tile and has no atlas cell.")
            }
            AtlasError::InvalidTile(id) => write!(
                f,
                "Tile id {id} is outside the atlas (valid ids are 1..={}).",
                AtlasLayout::SLOT_COUNT
            ),
        }
    }
}

impl std::error::Error for AtlasError {}

/// Maps tile ids to normalized texture coordinates inside the atlas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AtlasLayout;

impl AtlasLayout {
    /// Number of cell columns in the atlas.
    pub const COLS: u32 = ATLAS_WIDTH / TILE_SIZE;
    /// Number of cell rows in the atlas.
    pub const ROWS: u32 = ATLAS_HEIGHT / TILE_SIZE;
    /// Number of addressable cells; also the largest valid tile id.
    pub const SLOT_COUNT: u32 = Self::COLS * Self::ROWS;

    /// The pixel dimensions an atlas image must have.
    pub const fn extent(&self) -> Extent2D {
        Extent2D::new(ATLAS_WIDTH, ATLAS_HEIGHT)
    }

    /// Returns `true` if `tile` addresses an atlas cell.
    #[inline]
    pub fn contains(&self, tile: u8) -> bool {
        tile != 0 && u32::from(tile) <= Self::SLOT_COUNT
    }

    /// Returns the normalized `(u, v)` of the top-left corner of `tile`'s cell.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::InvalidTile`] for id `0` and for ids past
    /// [`AtlasLayout::SLOT_COUNT`].
    pub fn texel_origin(&self, tile: u8) -> Result<Vec2, AtlasError> {
        if !self.contains(tile) {
            return Err(AtlasError::InvalidTile(tile));
        }

        let idx = u32::from(tile) - 1;
        let row = idx / Self::COLS;
        let col = idx % Self::COLS;

        Ok(Vec2::new(
            col as f32 / Self::COLS as f32,
            row as f32 / Self::ROWS as f32,
        ))
    }

    /// The UV size of one quad drawn `tile_size_px` pixels wide:
    /// `(tile_size_px / UV_PADDING_WIDTH, tile_size_px / ATLAS_HEIGHT)`.
    ///
    /// At the native [`TILE_SIZE`] this covers one cell, narrowed horizontally
    /// by [`UV_PADDING_WIDTH`].
    #[inline]
    pub fn cell_uv_extent(&self, tile_size_px: u32) -> Vec2 {
        let ts = tile_size_px as f32;
        Vec2::new(ts / UV_PADDING_WIDTH, ts / ATLAS_HEIGHT as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn layout_has_190_slots() {
        assert_eq!(AtlasLayout::COLS, 19);
        assert_eq!(AtlasLayout::ROWS, 10);
        assert_eq!(AtlasLayout::SLOT_COUNT, 190);
    }

    #[test]
    fn texel_origin_of_corner_cells() {
        let atlas = AtlasLayout;

        assert_eq!(atlas.texel_origin(1).unwrap(), Vec2::ZERO);

        let last_in_row = atlas.texel_origin(19).unwrap();
        assert_relative_eq!(last_in_row.x, 18.0 / 19.0);
        assert_relative_eq!(last_in_row.y, 0.0);

        let second_row = atlas.texel_origin(20).unwrap();
        assert_relative_eq!(second_row.x, 0.0);
        assert_relative_eq!(second_row.y, 1.0 / 10.0);

        let last = atlas.texel_origin(190).unwrap();
        assert_relative_eq!(last.x, 18.0 / 19.0);
        assert_relative_eq!(last.y, 9.0 / 10.0);
    }

    #[test]
    fn texel_origin_rejects_empty_and_overflowing_ids() {
        let atlas = AtlasLayout;
        assert_eq!(atlas.texel_origin(0), Err(AtlasError::InvalidTile(0)));
        assert_eq!(atlas.texel_origin(191), Err(AtlasError::InvalidTile(191)));
        assert_eq!(atlas.texel_origin(255), Err(AtlasError::InvalidTile(255)));
    }

    #[test]
    fn every_valid_id_lands_inside_unit_square() {
        let atlas = AtlasLayout;
        for id in 1..=190u8 {
            let uv = atlas.texel_origin(id).unwrap();
            assert!((0.0..1.0).contains(&uv.x), "u out of range for {id}");
            assert!((0.0..1.0).contains(&uv.y), "v out of range for {id}");
        }
    }

    #[test]
    fn cell_uv_extent_keeps_padding_width() {
        let extent = AtlasLayout.cell_uv_extent(TILE_SIZE);
        assert_relative_eq!(extent.x, 16.0 / 306.0);
        assert_relative_eq!(extent.y, 16.0 / 160.0);
    }

    #[test]
    fn cell_uv_extent_scales_with_screen_tile_size() {
        let extent = AtlasLayout.cell_uv_extent(32);
        assert_relative_eq!(extent.x, 32.0 / 306.0);
        assert_relative_eq!(extent.y, 32.0 / 160.0);
        assert_eq!(AtlasLayout.cell_uv_extent(0), Vec2::ZERO);
    }

    #[test]
    fn invalid_tile_display() {
        assert_eq!(
            format!("{}", AtlasError::InvalidTile(0)),
            "Tile id 0 is the empty tile and has no atlas cell."
        );
        assert_eq!(
            format!("{}", AtlasError::InvalidTile(200)),
            "Tile id 200 is outside the atlas (valid ids are 1..=190)."
        );
    }
}
