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

//! Decoding of the raster image embedded at the start of a level file.

use crate::asset_lane::TileMapError;
use image::{ImageFormat, ImageReader};
use std::io::{BufReader, Read, Seek};
use tessera_core::renderer::CpuTexture;

/// A byte source that can be both read and repositioned.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek> ReadSeek for T {}

/// Decodes the image container a level file starts with.
pub trait RasterCodec {
    /// Decodes the image container at the start of `reader` into RGBA8.
    ///
    /// The reader is positioned at offset 0 on entry; its position afterwards
    /// is unspecified.
    fn decode(&self, reader: &mut dyn ReadSeek) -> Result<CpuTexture, TileMapError>;
}

/// The BMP codec from the `image` crate.
///
/// Only the pixel data offset is taken from the BMP file header, so the
/// repurposed file-size field does not disturb it.
#[derive(Debug, Clone, Copy, Default)]
pub struct BmpCodec;

impl RasterCodec for BmpCodec {
    fn decode(&self, reader: &mut dyn ReadSeek) -> Result<CpuTexture, TileMapError> {
        let img = ImageReader::with_format(BufReader::new(reader), ImageFormat::Bmp).decode()?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        Ok(CpuTexture::rgba8(rgba_img.into_raw(), width, height))
    }
}
