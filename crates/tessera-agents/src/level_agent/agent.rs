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

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tessera_core::renderer::TileRenderBackend;
use tessera_data::Level;
use tessera_lanes::asset_lane::{DecodeReport, DecodedTileMap, TileMapLoaderLane};

/// Loads level files and owns the resulting [`Level`] and its atlas texture.
///
/// A level is installed only once it has fully decoded and its atlas has
/// been uploaded; a failed load leaves the current level in place.
#[derive(Debug)]
pub struct LevelAgent {
    backend: Arc<dyn TileRenderBackend>,
    loader: TileMapLoaderLane,
    level: Option<Level>,
    last_report: Option<DecodeReport>,
}

impl LevelAgent {
    /// Creates an agent with no level, uploading atlases through `backend`.
    pub fn new(backend: Arc<dyn TileRenderBackend>) -> Self {
        Self {
            backend,
            loader: TileMapLoaderLane::new(),
            level: None,
            last_report: None,
        }
    }

    /// Loads the level file at `path`, replacing the current level.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<&Level> {
        let path = path.as_ref();
        log::info!("LevelAgent: Loading level from {}", path.display());

        let decoded = self
            .loader
            .decode_path(path)
            .with_context(|| format!("Failed to decode level file {}", path.display()))?;
        self.install(decoded)
    }

    /// Loads a level from an in-memory file image, replacing the current level.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<&Level> {
        let decoded = self
            .loader
            .decode(&mut Cursor::new(bytes))
            .context("Failed to decode level bytes")?;
        self.install(decoded)
    }

    fn install(&mut self, decoded: DecodedTileMap) -> Result<&Level> {
        let DecodedTileMap {
            atlas,
            grid,
            report,
        } = decoded;

        let texture = self
            .backend
            .create_texture(&atlas)
            .context("Failed to upload the level atlas")?;

        if let Some(previous) = self.level.take() {
            self.release(&previous);
        }

        log::info!(
            "LevelAgent: Level ready, {} tiles placed, atlas {:?}",
            report.placed,
            texture
        );
        self.last_report = Some(report);
        Ok(self.level.insert(Level::new(grid, texture)))
    }

    fn release(&self, level: &Level) {
        if let Err(e) = self.backend.destroy_texture(level.texture_id()) {
            log::warn!(
                "LevelAgent: Failed to release atlas {:?}: {}",
                level.texture_id(),
                e
            );
        }
    }

    /// Drops the current level and its atlas texture.
    pub fn unload(&mut self) {
        if let Some(level) = self.level.take() {
            self.release(&level);
            log::info!("LevelAgent: Level unloaded");
        }
        self.last_report = None;
    }

    /// The current level, if one is loaded.
    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    /// Counters from decoding the current level.
    pub fn last_report(&self) -> Option<DecodeReport> {
        self.last_report
    }
}

impl Drop for LevelAgent {
    fn drop(&mut self) {
        self.unload();
    }
}
