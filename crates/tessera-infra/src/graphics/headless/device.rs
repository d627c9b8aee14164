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

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tessera_core::math::Extent2D;
use tessera_core::renderer::{
    CpuTexture, ResourceError, TextureId, TileRenderBackend, TILE_VERTEX_STRIDE,
};

/// A single recorded draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    /// Texture sampled by the draw.
    pub texture: TextureId,
    /// Number of vertices drawn.
    pub vertex_count: u32,
}

#[derive(Debug)]
struct HeadlessTextureEntry {
    size: Extent2D,
    bytes: usize,
}

/// The internal, non-clonable state of the [`HeadlessDevice`].
#[derive(Debug, Default)]
struct HeadlessDeviceInternal {
    textures: Mutex<HashMap<TextureId, HeadlessTextureEntry>>,
    vertex_buffer: Mutex<Vec<u8>>,
    draws: Mutex<Vec<DrawCall>>,

    next_texture_id: AtomicUsize,
    texture_bytes: AtomicUsize,
}

/// A clonable, thread-safe handle to an in-memory graphics device.
///
/// Clones share the same resources, so a test can keep one handle for
/// inspection while the renderer owns another.
#[derive(Clone, Debug, Default)]
pub struct HeadlessDevice {
    internal: Arc<HeadlessDeviceInternal>,
}

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>, ResourceError> {
    mutex.lock().map_err(|e| {
        ResourceError::BackendError(format!("HeadlessDevice: {what} lock poisoned: {e}"))
    })
}

impl HeadlessDevice {
    /// Creates a device with no resources.
    pub fn new() -> Self {
        Self::default()
    }

    fn generate_texture_id(&self) -> TextureId {
        TextureId(
            self.internal
                .next_texture_id
                .fetch_add(1, Ordering::Relaxed),
        )
    }

    /// Number of live textures.
    pub fn texture_count(&self) -> usize {
        lock(&self.internal.textures, "texture").map_or(0, |t| t.len())
    }

    /// Size of a live texture, or `None` if the handle is unknown.
    pub fn texture_size(&self, id: TextureId) -> Option<Extent2D> {
        lock(&self.internal.textures, "texture")
            .ok()?
            .get(&id)
            .map(|entry| entry.size)
    }

    /// Total texel bytes held by live textures.
    pub fn allocated_texture_bytes(&self) -> usize {
        self.internal.texture_bytes.load(Ordering::Relaxed)
    }

    /// The contents of the vertex buffer as `f32` values.
    pub fn uploaded_floats(&self) -> Vec<f32> {
        lock(&self.internal.vertex_buffer, "vertex buffer")
            .map(|bytes| bytemuck::pod_collect_to_vec::<u8, f32>(&bytes[..]))
            .unwrap_or_default()
    }

    /// Every draw issued so far, oldest first.
    pub fn draw_calls(&self) -> Vec<DrawCall> {
        lock(&self.internal.draws, "draw log")
            .map(|draws| draws.clone())
            .unwrap_or_default()
    }
}

impl TileRenderBackend for HeadlessDevice {
    fn create_texture(&self, texture: &CpuTexture) -> Result<TextureId, ResourceError> {
        if !texture.is_consistent() {
            let expected = texture.bytes_per_row() as usize * texture.size.height as usize;
            return Err(ResourceError::InvalidTextureData {
                expected,
                actual: texture.pixels.len(),
            });
        }

        let id = self.generate_texture_id();
        let bytes = texture.pixels.len();
        lock(&self.internal.textures, "texture")?.insert(
            id,
            HeadlessTextureEntry {
                size: texture.extent(),
                bytes,
            },
        );
        self.internal
            .texture_bytes
            .fetch_add(bytes, Ordering::Relaxed);

        log::info!(
            "HeadlessDevice: Created texture with ID: {:?}, size: {}x{}, {} bytes",
            id,
            texture.size.width,
            texture.size.height,
            bytes
        );
        Ok(id)
    }

    fn destroy_texture(&self, id: TextureId) -> Result<(), ResourceError> {
        let entry = lock(&self.internal.textures, "texture")?
            .remove(&id)
            .ok_or(ResourceError::InvalidTexture(id))?;
        self.internal
            .texture_bytes
            .fetch_sub(entry.bytes, Ordering::Relaxed);
        log::debug!("HeadlessDevice: Destroyed texture {id:?}");
        Ok(())
    }

    fn upload_vertex_batch(&self, vertices: &[u8]) -> Result<(), ResourceError> {
        if vertices.len() % TILE_VERTEX_STRIDE != 0 {
            return Err(ResourceError::MisalignedVertexData(vertices.len()));
        }
        let mut buffer = lock(&self.internal.vertex_buffer, "vertex buffer")?;
        buffer.clear();
        buffer.extend_from_slice(vertices);
        Ok(())
    }

    fn draw(&self, texture: TextureId, vertex_count: u32) -> Result<(), ResourceError> {
        if !lock(&self.internal.textures, "texture")?.contains_key(&texture) {
            return Err(ResourceError::InvalidTexture(texture));
        }

        let available = (lock(&self.internal.vertex_buffer, "vertex buffer")?.len()
            / TILE_VERTEX_STRIDE) as u32;
        if vertex_count > available {
            return Err(ResourceError::OutOfBounds {
                requested: vertex_count,
                available,
            });
        }

        lock(&self.internal.draws, "draw log")?.push(DrawCall {
            texture,
            vertex_count,
        });
        log::trace!("HeadlessDevice: Drew {vertex_count} vertices with {texture:?}");
        Ok(())
    }
}
