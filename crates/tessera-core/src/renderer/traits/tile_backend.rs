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

use crate::renderer::api::{CpuTexture, TextureId};
use crate::renderer::error::ResourceError;
use std::fmt::Debug;

/// Size in bytes of one vertex passed to [`TileRenderBackend::upload_vertex_batch`]:
/// position `(x, y)` then texture coordinates `(u, v)`, all `f32`.
pub const TILE_VERTEX_STRIDE: usize = 4 * std::mem::size_of::<f32>();

/// The capabilities the tile renderer needs from a graphics backend.
///
/// Shader programs, contexts and windows are owned by the implementation;
/// the tile renderer only creates the atlas texture, streams one vertex
/// batch per frame, and issues a single draw.
pub trait TileRenderBackend: Send + Sync + Debug + 'static {
    /// Uploads a decoded atlas and returns a handle to the GPU-resident texture.
    /// ## Arguments
    /// * `texture` - The CPU-side texel data, size, format and sampling filter.
    /// ## Errors
    /// * `ResourceError` - If the texel data is inconsistent or the backend fails.
    fn create_texture(&self, texture: &CpuTexture) -> Result<TextureId, ResourceError>;

    /// Releases a texture created by [`TileRenderBackend::create_texture`].
    /// ## Errors
    /// * `ResourceError::InvalidTexture` - If the handle is unknown.
    fn destroy_texture(&self, id: TextureId) -> Result<(), ResourceError>;

    /// Replaces the contents of the streaming vertex buffer.
    /// ## Arguments
    /// * `vertices` - Interleaved `(x, y, u, v)` `f32` vertices as raw bytes.
    fn upload_vertex_batch(&self, vertices: &[u8]) -> Result<(), ResourceError>;

    /// Draws the first `vertex_count` uploaded vertices as a triangle list
    /// sampling `texture`.
    fn draw(&self, texture: TextureId, vertex_count: u32) -> Result<(), ResourceError>;
}
