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

//! A generated level used when no level file is configured.

use anyhow::Result;
use image::{Rgba, RgbaImage};
use tessera_core::atlas::{AtlasLayout, ATLAS_HEIGHT, ATLAS_WIDTH, TILE_SIZE};
use tessera_data::{TileGrid, LEVEL_SIZE};
use tessera_lanes::asset_lane::TileMapWriter;

/// Rows of terrain drawn below the starting row.
const GROUND_DEPTH: u32 = 6;

/// An atlas whose cells are flat colours with a darker one-pixel border.
fn demo_atlas() -> RgbaImage {
    RgbaImage::from_fn(ATLAS_WIDTH, ATLAS_HEIGHT, |x, y| {
        let (col, row) = (x / TILE_SIZE, y / TILE_SIZE);
        let border = x % TILE_SIZE == 0 || y % TILE_SIZE == 0;
        let shade = if border { 2 } else { 1 };
        Rgba([
            (col * 13 / shade) as u8,
            (row * 25 / shade) as u8,
            ((col + row) * 7 / shade) as u8,
            255,
        ])
    })
}

/// A rolling strip of terrain around `start_row`.
fn demo_grid(start_row: u32) -> Result<TileGrid> {
    let mut grid = TileGrid::new();
    let slots = AtlasLayout::SLOT_COUNT;
    for x in 0..LEVEL_SIZE {
        let surface = start_row + 2 + (x / 8) % 4;
        for y in surface..(surface + GROUND_DEPTH).min(LEVEL_SIZE) {
            let tile = 1 + (x + y * 3) % slots;
            grid.set(x, y, tile as u8)?;
        }
    }
    Ok(grid)
}

/// Encodes the demo level as a level file image.
pub fn demo_level(start_row: u32) -> Result<Vec<u8>> {
    let grid = demo_grid(start_row.min(LEVEL_SIZE - 1))?;
    let bytes = TileMapWriter::from_grid(&grid).encode(&demo_atlas())?;
    log::info!(
        "Generated demo level: {} tiles, {} bytes",
        grid.occupied_count(),
        bytes.len()
    );
    Ok(bytes)
}
