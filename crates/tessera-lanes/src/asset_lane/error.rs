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

use thiserror::Error;

/// An error that aborts decoding of a level file.
#[derive(Debug, Error)]
pub enum TileMapError {
    /// The byte source could not be opened, read, or seeked.
    #[error("I/O error while reading tile map: {0}")]
    Io(#[from] std::io::Error),
    /// The bytes were readable but do not form a valid level.
    #[error("malformed tile map: {0}")]
    Format(#[from] FormatError),
}

/// The ways a level file can be structurally invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The embedded atlas does not have the fixed atlas dimensions.
    #[error("atlas image is {width}x{height}, expected {expected_width}x{expected_height}")]
    AtlasSize {
        /// Width found in the file.
        width: u32,
        /// Height found in the file.
        height: u32,
        /// Required width.
        expected_width: u32,
        /// Required height.
        expected_height: u32,
    },
    /// The raster codec rejected the embedded image.
    #[error("atlas image could not be decoded: {0}")]
    Image(String),
    /// The header's record-stream offset points outside the file.
    #[error("tile stream offset {offset} is outside {min}..={len}")]
    TileStreamOffset {
        /// Offset read from the header.
        offset: u64,
        /// Smallest accepted offset.
        min: u64,
        /// Length of the file.
        len: u64,
    },
    /// The encoded image is too long for the header's 32-bit offset field.
    #[error("encoded atlas is {0} bytes, larger than a 32-bit record offset can address")]
    TooLarge(usize),
}

impl From<image::ImageError> for TileMapError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => TileMapError::Io(io),
            other => TileMapError::Format(FormatError::Image(other.to_string())),
        }
    }
}
