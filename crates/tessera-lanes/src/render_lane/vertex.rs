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

use std::mem;

/// A vertex of a tile quad: screen position in pixels and atlas UV.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TileVertex {
    /// Screen-space position in pixels, origin at the top-left.
    pub position: [f32; 2],
    /// Normalized atlas coordinates.
    pub tex_coords: [f32; 2],
}

impl TileVertex {
    /// Size of one vertex in bytes.
    pub const STRIDE: usize = mem::size_of::<TileVertex>();
    /// Vertices emitted per tile (two triangles).
    pub const PER_TILE: usize = 6;

    /// Creates a vertex.
    #[inline]
    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y],
            tex_coords: [u, v],
        }
    }
}

/// The geometry of one frame, as a triangle list of [`TileVertex`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexBatch {
    vertices: Vec<TileVertex>,
    /// Window cells that fell outside the level.
    pub skipped_out_of_range: u32,
    /// Cells holding a tile id with no atlas cell.
    pub skipped_invalid: u32,
}

impl VertexBatch {
    /// Creates an empty batch with room for `tiles` quads.
    pub fn with_tile_capacity(tiles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(tiles * TileVertex::PER_TILE),
            ..Default::default()
        }
    }

    /// Appends the six vertices of one quad.
    pub(crate) fn push_quad(&mut self, quad: [TileVertex; TileVertex::PER_TILE]) {
        self.vertices.extend_from_slice(&quad);
    }

    /// The vertices, in draw order.
    pub fn vertices(&self) -> &[TileVertex] {
        &self.vertices
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Number of tile quads.
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / TileVertex::PER_TILE
    }

    /// Returns `true` if nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The vertices as interleaved `x, y, u, v` floats.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The vertices as raw bytes for a GPU upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}
