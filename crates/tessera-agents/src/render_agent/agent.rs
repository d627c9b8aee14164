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

//! Defines the TileMapRenderAgent, which draws the visible part of a level each frame.

use std::sync::Arc;

use tessera_core::{
    atlas::AtlasLayout,
    config::RendererConfig,
    math::{Extent2D, Vec2},
    renderer::{RenderError, TileRenderBackend},
};
use tessera_data::Level;
use tessera_lanes::render_lane::{TileMeshLane, VertexBatch};

/// Per-frame input supplied by whatever moves the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Position the view is centred on, in tile units.
    pub viewpoint: Vec2,
}

impl FrameContext {
    /// Creates a context for a frame centred on `viewpoint`.
    pub fn new(viewpoint: Vec2) -> Self {
        Self { viewpoint }
    }
}

/// What happened to a frame.
#[derive(Debug)]
pub enum FrameOutcome {
    /// The batch was uploaded and drawn.
    Rendered {
        /// Number of vertices drawn.
        vertices: u32,
    },
    /// Nothing was drawn this frame; the next frame starts afresh.
    Skipped(RenderError),
}

impl FrameOutcome {
    /// Returns `true` if the frame was drawn.
    pub fn is_rendered(&self) -> bool {
        matches!(self, FrameOutcome::Rendered { .. })
    }
}

/// Counters describing the batch built for one frame.
///
/// The batch itself is dropped once it has been uploaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Tiles emitted as quads.
    pub tiles: usize,
    /// Vertices uploaded and drawn.
    pub vertices: u32,
    /// Window cells outside the level.
    pub skipped_out_of_range: u32,
    /// Cells whose id has no atlas cell.
    pub skipped_invalid: u32,
}

impl FrameStats {
    fn of(batch: &VertexBatch) -> Self {
        Self {
            tiles: batch.quad_count(),
            vertices: batch.vertex_count(),
            skipped_out_of_range: batch.skipped_out_of_range,
            skipped_invalid: batch.skipped_invalid,
        }
    }
}

/// The agent responsible for turning a level and a viewpoint into a draw.
///
/// Every frame rebuilds the vertex batch from scratch, uploads it and issues a
/// single draw with the level's atlas. Backend failures skip the frame.
#[derive(Debug)]
pub struct TileMapRenderAgent {
    backend: Arc<dyn TileRenderBackend>,
    mesh_lane: TileMeshLane,
    atlas: AtlasLayout,
    viewport: Extent2D,
    tile_size_px: u32,
    // --- Frame statistics ---
    frames_rendered: u64,
    frames_skipped: u64,
    last_frame: FrameStats,
}

impl TileMapRenderAgent {
    /// Creates an agent drawing a `viewport` of `tile_size_px` tiles.
    pub fn new(
        backend: Arc<dyn TileRenderBackend>,
        viewport: Extent2D,
        tile_size_px: u32,
    ) -> Self {
        Self {
            backend,
            mesh_lane: TileMeshLane::new(),
            atlas: AtlasLayout,
            viewport,
            tile_size_px,
            frames_rendered: 0,
            frames_skipped: 0,
            last_frame: FrameStats::default(),
        }
    }

    /// Creates an agent sized from a renderer configuration.
    pub fn from_config(backend: Arc<dyn TileRenderBackend>, config: &RendererConfig) -> Self {
        Self::new(backend, config.screen.extent(), config.tile_size_px)
    }

    /// Changes the output size, e.g. after a window resize.
    pub fn resize(&mut self, viewport: Extent2D) {
        log::debug!(
            "TileMapRenderAgent: Viewport resized to {}x{}",
            viewport.width,
            viewport.height
        );
        self.viewport = viewport;
    }

    /// Builds, uploads and draws one frame.
    ///
    /// Returns [`FrameOutcome::Skipped`] with [`RenderError::NoLevel`] when
    /// no level is given, and with the backend's error when the upload or the
    /// draw fails.
    pub fn render_frame(
        &mut self,
        level: Option<&Level>,
        context: &FrameContext,
    ) -> FrameOutcome {
        let outcome = match level {
            Some(level) => self.draw_level(level, context),
            None => Err(RenderError::NoLevel),
        };

        match outcome {
            Ok(vertices) => {
                self.frames_rendered += 1;
                FrameOutcome::Rendered { vertices }
            }
            Err(e) => {
                self.frames_skipped += 1;
                log::warn!("TileMapRenderAgent: Skipping frame: {e}");
                FrameOutcome::Skipped(e)
            }
        }
    }

    fn draw_level(&mut self, level: &Level, context: &FrameContext) -> Result<u32, RenderError> {
        let batch = self.mesh_lane.build(
            level.tiles(),
            &self.atlas,
            context.viewpoint,
            self.viewport,
            self.tile_size_px,
        );
        self.last_frame = FrameStats::of(&batch);
        let vertices = self.last_frame.vertices;

        self.backend.upload_vertex_batch(batch.as_bytes())?;
        self.backend.draw(level.texture_id(), vertices)?;

        log::trace!(
            "TileMapRenderAgent: Drew {} tiles at {:?}",
            self.last_frame.tiles,
            context.viewpoint
        );
        Ok(vertices)
    }

    /// Counters of the batch built for the most recent frame with a level.
    pub fn last_frame(&self) -> FrameStats {
        self.last_frame
    }

    /// Number of frames drawn.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Number of frames skipped.
    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped
    }
}
