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

//! Defines data structures related to texture resources.

use crate::asset::Asset;
use crate::math::Extent2D;

/// The memory layout of texel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// Four 8-bit channels (red, green, blue, alpha), unsigned normalized.
    Rgba8Unorm,
    /// Four 8-bit channels in sRGB color space.
    Rgba8UnormSrgb,
}

impl TextureFormat {
    /// Number of bytes used by one texel.
    pub const fn bytes_per_texel(&self) -> u32 {
        match self {
            TextureFormat::Rgba8Unorm | TextureFormat::Rgba8UnormSrgb => 4,
        }
    }
}

/// Defines the filtering mode for texture sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    /// Point sampling. Returns the value of the nearest texel.
    Nearest,
    /// Linear interpolation. Returns a weighted average of the four nearest texels.
    Linear,
}

/// An opaque handle to a GPU texture resource.
///
/// This ID is returned by [`TileRenderBackend::create_texture`](crate::renderer::TileRenderBackend::create_texture)
/// and is used to reference the texture in all subsequent operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// A decoded image living in CPU memory, ready to be uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuTexture {
    /// Raw texel bytes, row-major, top row first.
    pub pixels: Vec<u8>,
    /// Dimensions of the image.
    pub size: Extent2D,
    /// Layout of each texel in `pixels`.
    pub format: TextureFormat,
    /// Filtering to apply when the texture is magnified or minified.
    pub filter: FilterMode,
}

impl Asset for CpuTexture {}

impl CpuTexture {
    /// Builds a 2D RGBA8 texture sampled with nearest filtering.
    pub fn rgba8(pixels: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            pixels,
            size: Extent2D::new(width, height),
            format: TextureFormat::Rgba8UnormSrgb,
            filter: FilterMode::Nearest,
        }
    }

    /// Width and height of the texture.
    pub fn extent(&self) -> Extent2D {
        self.size
    }

    /// Number of bytes in a single row of texels.
    pub fn bytes_per_row(&self) -> u32 {
        self.size.width * self.format.bytes_per_texel()
    }

    /// Returns `true` if `pixels` holds exactly one full image.
    pub fn is_consistent(&self) -> bool {
        let expected = self.bytes_per_row() as usize * self.size.height as usize;
        self.pixels.len() == expected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba8_texture_layout() {
        let tex = CpuTexture::rgba8(vec![0; 304 * 160 * 4], 304, 160);
        assert_eq!(tex.extent(), Extent2D::new(304, 160));
        assert_eq!(tex.bytes_per_row(), 1216);
        assert_eq!(tex.filter, FilterMode::Nearest);
        assert!(tex.is_consistent());
    }

    #[test]
    fn short_pixel_buffer_is_inconsistent() {
        let tex = CpuTexture::rgba8(vec![0; 10], 304, 160);
        assert!(!tex.is_consistent());
    }

    #[test]
    fn single_image_is_exactly_width_by_height_texels() {
        let tex = CpuTexture::rgba8(vec![0; 304 * 160 * 4 * 2], 304, 160);
        assert!(!tex.is_consistent());
        assert_eq!(tex.size, Extent2D::new(304, 160));
    }
}
