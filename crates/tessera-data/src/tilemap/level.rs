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

use super::TileGrid;
use tessera_core::renderer::TextureId;

/// A loaded level: its tile grid and the GPU atlas the tile ids refer to.
///
/// The grid is read-only once the level exists; loading another level
/// replaces the whole value.
#[derive(Debug)]
pub struct Level {
    tiles: TileGrid,
    texture: TextureId,
}

impl Level {
    /// Pairs a decoded grid with the texture created from its atlas.
    pub fn new(tiles: TileGrid, texture: TextureId) -> Self {
        log::debug!(
            "Level created with {} occupied tiles, atlas {:?}",
            tiles.occupied_count(),
            texture
        );
        Self { tiles, texture }
    }

    /// The tile grid.
    pub fn tiles(&self) -> &TileGrid {
        &self.tiles
    }

    /// Handle of the atlas texture.
    pub fn texture_id(&self) -> TextureId {
        self.texture
    }
}
