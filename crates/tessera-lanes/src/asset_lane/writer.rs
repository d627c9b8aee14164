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

//! Level file encoding, the inverse of [`TileMapLoaderLane`](super::TileMapLoaderLane).

use super::{FormatError, TileMapError, TileRecord, TILE_STREAM_OFFSET_POS};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use tessera_data::TileGrid;

/// Encodes `atlas` as BMP, appends `records`, and points the header's
/// file-size field at the first record.
///
/// The atlas size is not checked here, so malformed levels can be produced
/// on purpose.
pub fn encode_tile_map(atlas: &RgbaImage, records: &[TileRecord]) -> Result<Vec<u8>, TileMapError> {
    let mut bytes = Vec::new();
    atlas.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Bmp)?;

    let offset = record_offset(bytes.len())?;
    let pos = TILE_STREAM_OFFSET_POS as usize;
    bytes[pos..pos + 4].copy_from_slice(&offset.to_le_bytes());

    bytes.reserve(records.len() * TileRecord::SIZE);
    for record in records {
        bytes.extend_from_slice(&record.to_le_bytes());
    }

    log::debug!(
        "Encoded level: {} byte image, {} tile records",
        offset,
        records.len()
    );
    Ok(bytes)
}

/// Converts the encoded image length into the header's record offset.
fn record_offset(image_len: usize) -> Result<u32, FormatError> {
    u32::try_from(image_len).map_err(|_| FormatError::TooLarge(image_len))
}

/// Collects tile records and writes them after an atlas image.
#[derive(Debug, Clone, Default)]
pub struct TileMapWriter {
    records: Vec<TileRecord>,
}

impl TileMapWriter {
    /// Creates a writer with no records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer holding one record per non-empty cell of `grid`.
    pub fn from_grid(grid: &TileGrid) -> Self {
        let records = grid
            .iter_occupied()
            .map(|(x, y, tile)| TileRecord::new(tile, x as u16, y as u16))
            .collect();
        Self { records }
    }

    /// Appends a record.
    pub fn push(&mut self, record: TileRecord) -> &mut Self {
        self.records.push(record);
        self
    }

    /// The records collected so far.
    pub fn records(&self) -> &[TileRecord] {
        &self.records
    }

    /// Encodes the level file.
    pub fn encode(&self, atlas: &RgbaImage) -> Result<Vec<u8>, TileMapError> {
        encode_tile_map(atlas, &self.records)
    }
}
