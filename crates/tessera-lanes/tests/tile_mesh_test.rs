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

use anyhow::Result;
use approx::assert_relative_eq;
use tessera_core::{
    atlas::{AtlasLayout, UV_PADDING_WIDTH},
    math::{Extent2D, Vec2},
};
use tessera_data::TileGrid;
use tessera_lanes::render_lane::{TileMeshLane, TileVertex};

const VIEWPORT: Extent2D = Extent2D {
    width: 320,
    height: 160,
};

fn filled_grid(tile: u8) -> Result<TileGrid> {
    let mut grid = TileGrid::new();
    for y in 0..200 {
        for x in 0..200 {
            grid.set(x, y, tile)?;
        }
    }
    Ok(grid)
}

#[test]
fn test_full_window_emits_one_quad_per_cell() -> Result<()> {
    let grid = filled_grid(1)?;

    let batch = TileMeshLane.build(&grid, &AtlasLayout, Vec2::new(100.7, 50.2), VIEWPORT, 16);

    assert_eq!(batch.quad_count(), 21 * 10);
    assert_eq!(batch.vertex_count() as usize, 21 * 10 * TileVertex::PER_TILE);
    assert_eq!(batch.skipped_out_of_range, 0);
    assert_eq!(batch.skipped_invalid, 0);
    Ok(())
}

#[test]
fn test_empty_cells_produce_no_geometry() -> Result<()> {
    let mut grid = TileGrid::new();
    grid.set(100, 50, 7)?;

    let batch = TileMeshLane.build(&grid, &AtlasLayout, Vec2::new(100.0, 50.0), VIEWPORT, 16);

    assert_eq!(batch.quad_count(), 1);
    // Window starts at (90, 45): the tile sits 10 columns and 5 rows in.
    assert_eq!(batch.vertices()[0].position, [160.0, 80.0]);
    Ok(())
}

#[test]
fn test_empty_level_builds_an_empty_batch() {
    let batch = TileMeshLane.build(
        &TileGrid::new(),
        &AtlasLayout,
        Vec2::new(512.0, 512.0),
        VIEWPORT,
        16,
    );
    assert!(batch.is_empty());
    assert!(batch.as_bytes().is_empty());
}

#[test]
fn test_horizontal_scroll_is_continuous_within_a_tile() -> Result<()> {
    let grid = filled_grid(3)?;
    let lane = TileMeshLane;
    let base = lane.build(&grid, &AtlasLayout, Vec2::new(100.0, 50.0), VIEWPORT, 16);

    for step in 1..100 {
        let fraction = step as f32 / 100.0;
        let viewpoint = Vec2::new(100.0 + fraction, 50.0);

        let window = lane.visible_window(viewpoint, VIEWPORT, 16).unwrap();
        assert_eq!(window.left, 90);

        let batch = lane.build(&grid, &AtlasLayout, viewpoint, VIEWPORT, 16);
        assert_eq!(batch.vertex_count(), base.vertex_count());

        let expected = (viewpoint.x - viewpoint.x.floor()) * 16.0;
        for (moved, still) in batch.vertices().iter().zip(base.vertices()) {
            assert_relative_eq!(moved.position[0], still.position[0] + expected, epsilon = 1e-3);
            assert_eq!(moved.position[1], still.position[1]);
            assert_eq!(moved.tex_coords, still.tex_coords);
        }
    }
    Ok(())
}

#[test]
fn test_whole_tile_scroll_moves_the_window() {
    let lane = TileMeshLane;
    let before = lane
        .visible_window(Vec2::new(100.99, 50.0), VIEWPORT, 16)
        .unwrap();
    let after = lane
        .visible_window(Vec2::new(101.0, 50.0), VIEWPORT, 16)
        .unwrap();

    assert_eq!(after.left, before.left + 1);
    assert_eq!(after.right, before.right + 1);
    assert_eq!(after.top, before.top);
}

#[test]
fn test_vertical_scroll_snaps_to_whole_tiles() -> Result<()> {
    let grid = filled_grid(2)?;
    let lane = TileMeshLane;

    let a = lane.build(&grid, &AtlasLayout, Vec2::new(100.0, 50.0), VIEWPORT, 16);
    let b = lane.build(&grid, &AtlasLayout, Vec2::new(100.0, 50.9), VIEWPORT, 16);

    assert_eq!(a, b);
    Ok(())
}

#[test]
fn test_uv_covers_one_atlas_cell() -> Result<()> {
    let mut grid = TileGrid::new();
    // Tile 21 is the second cell of the second atlas row.
    grid.set(100, 50, 21)?;

    let batch = TileMeshLane.build(&grid, &AtlasLayout, Vec2::new(100.0, 50.0), VIEWPORT, 16);
    let v = batch.vertices();

    assert_relative_eq!(v[0].tex_coords[0], 1.0 / 19.0);
    assert_relative_eq!(v[0].tex_coords[1], 1.0 / 10.0);
    assert_relative_eq!(v[2].tex_coords[0], 1.0 / 19.0 + 16.0 / UV_PADDING_WIDTH);
    assert_relative_eq!(v[2].tex_coords[1], 1.0 / 10.0 + 16.0 / 160.0);
    Ok(())
}

#[test]
fn test_larger_screen_tiles_scale_positions_and_uvs() -> Result<()> {
    let mut grid = TileGrid::new();
    grid.set(10, 10, 1)?;

    let batch = TileMeshLane.build(
        &grid,
        &AtlasLayout,
        Vec2::new(10.5, 10.0),
        Extent2D::new(128, 128),
        32,
    );
    let v = batch.vertices();

    // 4x4 tiles: window starts at (8, 8), shift is half a 32px tile.
    assert_eq!(v[0].position, [2.0 * 32.0 + 16.0, 64.0]);
    assert_eq!(v[2].position, [3.0 * 32.0 + 16.0, 96.0]);
    assert_relative_eq!(v[0].tex_coords[0], 0.0);
    assert_relative_eq!(v[0].tex_coords[1], 0.0);
    assert_relative_eq!(v[2].tex_coords[0], 32.0 / UV_PADDING_WIDTH);
    assert_relative_eq!(v[2].tex_coords[1], 32.0 / 160.0);
    Ok(())
}

#[test]
fn test_uv_extent_follows_screen_tile_size_vertically() -> Result<()> {
    let mut grid = TileGrid::new();
    // Tile 20 opens the second atlas row.
    grid.set(10, 10, 20)?;
    let lane = TileMeshLane;

    for tile_size in [8u32, 16, 24, 48] {
        let batch = lane.build(
            &grid,
            &AtlasLayout,
            Vec2::new(10.0, 10.0),
            Extent2D::new(tile_size * 4, tile_size * 4),
            tile_size,
        );
        let v = batch.vertices();
        assert_eq!(batch.quad_count(), 1);
        assert_relative_eq!(v[0].tex_coords[1], 0.1);
        assert_relative_eq!(v[4].tex_coords[1], 0.1 + tile_size as f32 / 160.0);
    }
    Ok(())
}

#[test]
fn test_far_or_non_finite_viewpoints_build_nothing() -> Result<()> {
    let grid = filled_grid(4)?;
    let lane = TileMeshLane;
    let viewpoints = [
        Vec2::new(1.0e20, 50.0),
        Vec2::new(50.0, -1.0e20),
        Vec2::new(f32::INFINITY, 50.0),
        Vec2::new(50.0, f32::NEG_INFINITY),
        Vec2::new(50.0, f32::NAN),
    ];

    for viewpoint in viewpoints {
        assert!(lane.visible_window(viewpoint, VIEWPORT, 16).is_none());
        let batch = lane.build(&grid, &AtlasLayout, viewpoint, VIEWPORT, 16);
        assert!(batch.is_empty());
        assert_eq!(batch.skipped_out_of_range, 0);
    }
    Ok(())
}

#[test]
fn test_window_far_outside_the_level_is_counted_not_walked() -> Result<()> {
    let grid = filled_grid(4)?;

    // Large but finite: every cell lies outside the level.
    let batch = TileMeshLane.build(
        &grid,
        &AtlasLayout,
        Vec2::new(1.0e9, -1.0e9),
        VIEWPORT,
        16,
    );

    assert!(batch.is_empty());
    assert_eq!(batch.skipped_out_of_range, 21 * 10);
    Ok(())
}

#[test]
fn test_huge_viewport_only_visits_level_cells() -> Result<()> {
    let mut grid = TileGrid::new();
    grid.set(0, 0, 1)?;
    grid.set(1023, 1023, 2)?;

    let batch = TileMeshLane.build(
        &grid,
        &AtlasLayout,
        Vec2::new(512.0, 512.0),
        Extent2D::new(u32::MAX, u32::MAX),
        1,
    );

    assert_eq!(batch.quad_count(), 2);
    assert_eq!(batch.skipped_out_of_range, u32::MAX);
    Ok(())
}
