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

//! Builds the textured quads for the part of a level around a viewpoint.

use super::{TileVertex, VertexBatch};
use tessera_core::{
    atlas::AtlasLayout,
    math::{floor_fract, Extent2D, Vec2},
};
use tessera_data::{TileGrid, LEVEL_SIZE};

/// Largest viewpoint coordinate, in tiles, that still yields a window.
const MAX_VIEWPOINT: f32 = i32::MAX as f32;

/// Most tiles reserved up front; larger batches grow on demand.
const MAX_RESERVED_TILES: u64 = 64 * 1024;

/// The range of grid cells visited for one frame.
///
/// Columns run from `left` to `right` inclusive; the extra column covers the
/// partial tile revealed by horizontal sub-tile scrolling. Rows run from `top`
/// up to, but excluding, `bottom`. Bounds may lie outside the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileWindow {
    /// First visited column.
    pub left: i64,
    /// Last visited column (inclusive).
    pub right: i64,
    /// First visited row.
    pub top: i64,
    /// Row past the last visited one.
    pub bottom: i64,
}

impl TileWindow {
    /// Number of visited columns.
    pub fn columns(&self) -> u64 {
        self.right
            .saturating_sub(self.left)
            .saturating_add(1)
            .max(0) as u64
    }

    /// Number of visited rows.
    pub fn rows(&self) -> u64 {
        self.bottom.saturating_sub(self.top).max(0) as u64
    }

    /// Number of visited cells.
    pub fn cell_count(&self) -> u64 {
        self.columns().saturating_mul(self.rows())
    }

    /// The part of the window that lies inside a level of `size` cells per
    /// side, or `None` if they do not overlap.
    pub fn clip_to_level(&self, size: u32) -> Option<TileWindow> {
        let size = i64::from(size);
        let clipped = TileWindow {
            left: self.left.max(0),
            right: self.right.min(size - 1),
            top: self.top.max(0),
            bottom: self.bottom.min(size),
        };
        (clipped.left <= clipped.right && clipped.top < clipped.bottom).then_some(clipped)
    }

    /// Every visited `(x, y)`, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (i64, i64)> {
        let (left, right) = (self.left, self.right);
        (self.top..self.bottom).flat_map(move |y| (left..=right).map(move |x| (x, y)))
    }
}

/// A lane that turns the visible window of a [`TileGrid`] into a [`VertexBatch`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TileMeshLane;

impl TileMeshLane {
    /// Creates the lane.
    pub fn new() -> Self {
        Self
    }

    /// Computes the cells visible in a `viewport` centred on `viewpoint`.
    ///
    /// Returns `None` when no window exists: a zero tile size, or a viewpoint
    /// that is not finite or lies more than `i32::MAX` tiles from the origin.
    pub fn visible_window(
        &self,
        viewpoint: Vec2,
        viewport: Extent2D,
        tile_size_px: u32,
    ) -> Option<TileWindow> {
        if tile_size_px == 0
            || !viewpoint.is_finite()
            || viewpoint.x.abs() > MAX_VIEWPOINT
            || viewpoint.y.abs() > MAX_VIEWPOINT
        {
            return None;
        }

        let (tiles_wide, tiles_high) = viewport.cells(tile_size_px);
        let half_wide = i64::from(tiles_wide / 2);
        let half_high = i64::from(tiles_high / 2);
        let anchor = viewpoint.floor();
        let (cx, cy) = (anchor.x as i64, anchor.y as i64);

        Some(TileWindow {
            left: cx - half_wide,
            right: cx + half_wide,
            top: cy - half_high,
            bottom: cy + half_high,
        })
    }

    /// Builds the frame's geometry.
    ///
    /// Each non-empty cell in the window becomes two triangles in the order
    /// top-left, top-right, bottom-right, bottom-right, bottom-left, top-left.
    /// Positions are screen pixels relative to the window's top-left cell,
    /// shifted right by the viewpoint's horizontal sub-tile offset. Rows
    /// snap to whole tiles.
    ///
    /// Cells outside the level and ids with no atlas cell are skipped and
    /// counted on the returned batch.
    pub fn build(
        &self,
        grid: &TileGrid,
        atlas: &AtlasLayout,
        viewpoint: Vec2,
        viewport: Extent2D,
        tile_size_px: u32,
    ) -> VertexBatch {
        let Some(window) = self.visible_window(viewpoint, viewport, tile_size_px) else {
            log::warn!(
                "TileMeshLane: no visible window for viewpoint {:?} at {}px tiles",
                viewpoint,
                tile_size_px
            );
            return VertexBatch::default();
        };

        let ts = tile_size_px as f32;
        let h_shift = floor_fract(viewpoint.x) * ts;
        let uv_size = atlas.cell_uv_extent(tile_size_px);

        // Only cells inside the level are visited; the rest are counted.
        let visible = window.clip_to_level(LEVEL_SIZE);
        let in_level = visible.map_or(0, |w| w.cell_count());
        let reserved = in_level.min(MAX_RESERVED_TILES) as usize;
        let mut batch = VertexBatch::with_tile_capacity(reserved);
        batch.skipped_out_of_range =
            u32::try_from(window.cell_count() - in_level).unwrap_or(u32::MAX);

        for (x, y) in visible.into_iter().flat_map(|w| w.cells()) {
            let tile = match grid.get_signed(x, y) {
                Ok(0) => continue,
                Ok(tile) => tile,
                Err(_) => {
                    batch.skipped_out_of_range = batch.skipped_out_of_range.saturating_add(1);
                    continue;
                }
            };

            let uv = match atlas.texel_origin(tile) {
                Ok(uv) => uv,
                Err(e) => {
                    log::trace!("TileMeshLane: skipping cell ({x}, {y}): {e}");
                    batch.skipped_invalid += 1;
                    continue;
                }
            };

            let x0 = (x - window.left) as f32 * ts + h_shift;
            let y0 = (y - window.top) as f32 * ts;
            let (x1, y1) = (x0 + ts, y0 + ts);
            let (u0, v0) = (uv.x, uv.y);
            let (u1, v1) = (uv.x + uv_size.x, uv.y + uv_size.y);

            let top_left = TileVertex::new(x0, y0, u0, v0);
            let top_right = TileVertex::new(x1, y0, u1, v0);
            let bottom_right = TileVertex::new(x1, y1, u1, v1);
            let bottom_left = TileVertex::new(x0, y1, u0, v1);

            batch.push_quad([
                top_left,
                top_right,
                bottom_right,
                bottom_right,
                bottom_left,
                top_left,
            ]);
        }

        if batch.skipped_invalid > 0 {
            log::debug!(
                "TileMeshLane: skipped {} cells with tile ids outside the atlas",
                batch.skipped_invalid
            );
        }
        log::trace!(
            "TileMeshLane: {} quads for window {:?}",
            batch.quad_count(),
            window
        );

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_centred_on_the_viewpoint_cell() {
        let window = TileMeshLane
            .visible_window(Vec2::new(100.7, 50.2), Extent2D::new(320, 160), 16)
            .unwrap();
        assert_eq!(
            window,
            TileWindow {
                left: 90,
                right: 110,
                top: 45,
                bottom: 55,
            }
        );
        assert_eq!(window.columns(), 21);
        assert_eq!(window.rows(), 10);
    }

    #[test]
    fn window_uses_floor_for_negative_positions() {
        let window = TileMeshLane
            .visible_window(Vec2::new(-0.5, -0.5), Extent2D::new(64, 64), 16)
            .unwrap();
        assert_eq!(window.left, -3);
        assert_eq!(window.top, -3);
    }

    #[test]
    fn no_window_for_degenerate_input() {
        let lane = TileMeshLane;
        let viewport = Extent2D::new(320, 160);
        assert!(lane.visible_window(Vec2::new(1.0, 1.0), viewport, 0).is_none());
        assert!(lane
            .visible_window(Vec2::new(f32::NAN, 1.0), viewport, 16)
            .is_none());
        assert!(lane
            .visible_window(Vec2::new(1.0, f32::INFINITY), viewport, 16)
            .is_none());
        assert!(lane
            .visible_window(Vec2::new(1.0e20, 5.0), viewport, 16)
            .is_none());
        assert!(lane
            .visible_window(Vec2::new(5.0, -1.0e20), viewport, 16)
            .is_none());
    }

    #[test]
    fn window_counts_saturate_instead_of_overflowing() {
        let window = TileWindow {
            left: i64::MIN,
            right: i64::MAX,
            top: i64::MIN,
            bottom: i64::MAX,
        };
        assert_eq!(window.columns(), i64::MAX as u64);
        assert_eq!(window.cell_count(), u64::MAX);
    }

    #[test]
    fn clipping_keeps_only_level_cells() {
        let window = TileWindow {
            left: -2,
            right: 2,
            top: 1020,
            bottom: 1030,
        };
        assert_eq!(
            window.clip_to_level(LEVEL_SIZE),
            Some(TileWindow {
                left: 0,
                right: 2,
                top: 1020,
                bottom: 1024,
            })
        );

        let outside = TileWindow {
            left: 2000,
            right: 2010,
            top: 0,
            bottom: 5,
        };
        assert_eq!(outside.clip_to_level(LEVEL_SIZE), None);
    }

    #[test]
    fn cells_cover_the_window_row_by_row() {
        let window = TileWindow {
            left: 0,
            right: 1,
            top: 5,
            bottom: 7,
        };
        let cells: Vec<_> = window.cells().collect();
        assert_eq!(cells, vec![(0, 5), (1, 5), (0, 6), (1, 6)]);
    }

    #[test]
    fn quad_vertex_order_and_uvs() {
        let mut grid = TileGrid::new();
        grid.set(10, 10, 20).unwrap();

        // 2x2 tile viewport centred on (10, 10): window is x 9..=11, y 9..11.
        let batch = TileMeshLane.build(
            &grid,
            &AtlasLayout,
            Vec2::new(10.0, 10.0),
            Extent2D::new(32, 32),
            16,
        );

        let v = batch.vertices();
        assert_eq!(v.len(), 6);
        let (u1, v1) = (16.0 / 306.0, 0.1 + 16.0 / 160.0);
        assert_eq!(v[0], TileVertex::new(16.0, 16.0, 0.0, 0.1));
        assert_eq!(v[1], TileVertex::new(32.0, 16.0, u1, 0.1));
        assert_eq!(v[2], TileVertex::new(32.0, 32.0, u1, v1));
        assert_eq!(v[3], v[2]);
        assert_eq!(v[4], TileVertex::new(16.0, 32.0, 0.0, v1));
        assert_eq!(v[5], v[0]);
    }

    #[test]
    fn invalid_ids_are_skipped_and_counted() {
        let mut grid = TileGrid::new();
        grid.set(5, 5, 191).unwrap();
        grid.set(6, 5, 1).unwrap();

        let batch = TileMeshLane.build(
            &grid,
            &AtlasLayout,
            Vec2::new(5.0, 5.0),
            Extent2D::new(64, 64),
            16,
        );
        assert_eq!(batch.quad_count(), 1);
        assert_eq!(batch.skipped_invalid, 1);
    }

    #[test]
    fn window_past_the_level_edge_is_clipped() {
        let mut grid = TileGrid::new();
        grid.set(0, 0, 1).unwrap();

        let batch = TileMeshLane.build(
            &grid,
            &AtlasLayout,
            Vec2::new(0.0, 0.0),
            Extent2D::new(64, 64),
            16,
        );
        // Window is x -2..=2, y -2..2: 5 columns by 4 rows, of which 3x2 lie in the level.
        assert_eq!(batch.quad_count(), 1);
        assert_eq!(batch.skipped_out_of_range, 20 - 6);
        assert_eq!(batch.vertices()[0].position, [32.0, 32.0]);
    }
}
