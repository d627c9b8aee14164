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

//! Level file decoding.

use super::{BmpCodec, RasterCodec, TileRecord};
use crate::asset_lane::{AssetLoaderLane, FormatError, TileMapError};
use std::{
    fs::File,
    io::{BufReader, Cursor, ErrorKind, Read, Seek, SeekFrom},
    path::Path,
};
use tessera_core::{asset::Asset, atlas::AtlasLayout, renderer::CpuTexture};
use tessera_data::TileGrid;

/// Absolute position of the little-endian `u32` holding the record-stream offset.
pub const TILE_STREAM_OFFSET_POS: u64 = 2;

/// Smallest accepted record-stream offset: the end of the 14-byte BMP file header.
pub const MIN_TILE_STREAM_OFFSET: u64 = 14;

/// Counters describing how a record stream was consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Whole records read from the stream.
    pub records: usize,
    /// Records written into the grid.
    pub placed: usize,
    /// Records dropped because their coordinates fall outside the level.
    pub discarded: usize,
    /// Bytes of an incomplete record at the end of the stream.
    pub trailing_bytes: usize,
}

/// The result of decoding a level file.
#[derive(Debug)]
pub struct DecodedTileMap {
    /// The atlas image, ready for texture upload.
    pub atlas: CpuTexture,
    /// Tile placements.
    pub grid: TileGrid,
    /// How the record stream was consumed.
    pub report: DecodeReport,
}

impl Asset for DecodedTileMap {}

/// A lane that decodes level files into an atlas image and a tile grid.
#[derive(Debug, Clone, Default)]
pub struct TileMapLoaderLane<C: RasterCodec = BmpCodec> {
    codec: C,
    atlas: AtlasLayout,
}

impl TileMapLoaderLane<BmpCodec> {
    /// Creates a lane decoding the embedded image as BMP.
    pub fn new() -> Self {
        Self::with_codec(BmpCodec)
    }
}

impl<C: RasterCodec> TileMapLoaderLane<C> {
    /// Creates a lane with a custom raster codec.
    pub fn with_codec(codec: C) -> Self {
        Self {
            codec,
            atlas: AtlasLayout,
        }
    }

    /// Opens and decodes the level file at `path`.
    pub fn decode_path(&self, path: impl AsRef<Path>) -> Result<DecodedTileMap, TileMapError> {
        let path = path.as_ref();
        log::debug!("Opening level file {}", path.display());
        let mut file = File::open(path)?;
        self.decode(&mut file)
    }

    /// Decodes a level from any seekable byte source.
    ///
    /// # Errors
    ///
    /// - [`TileMapError::Io`] if the source cannot be read or seeked.
    /// - [`TileMapError::Format`] if the image cannot be decoded, is not the
    ///   atlas size, or the record-stream offset lies outside the source.
    ///
    /// Records whose coordinates fall outside the level are skipped and
    /// counted in [`DecodeReport::discarded`]. An incomplete record at the end
    /// of the stream ends decoding without error.
    pub fn decode<R: Read + Seek>(&self, reader: &mut R) -> Result<DecodedTileMap, TileMapError> {
        reader.seek(SeekFrom::Start(0))?;
        let atlas = self.codec.decode(reader)?;
        self.validate_atlas(&atlas)?;

        let offset = read_tile_stream_offset(reader)?;
        let len = reader.seek(SeekFrom::End(0))?;
        if offset < MIN_TILE_STREAM_OFFSET || offset > len {
            return Err(FormatError::TileStreamOffset {
                offset,
                min: MIN_TILE_STREAM_OFFSET,
                len,
            }
            .into());
        }
        reader.seek(SeekFrom::Start(offset))?;

        let mut grid = TileGrid::new();
        let report = read_records(BufReader::new(reader), &mut grid)?;

        if report.discarded > 0 {
            log::warn!(
                "Discarded {} of {} tile records with coordinates outside the level",
                report.discarded,
                report.records
            );
        }
        if report.trailing_bytes > 0 {
            log::debug!(
                "Ignored {} trailing bytes after the last tile record",
                report.trailing_bytes
            );
        }
        log::info!(
            "Decoded level: {}x{} atlas, {} tiles placed from {} records",
            atlas.size.width,
            atlas.size.height,
            report.placed,
            report.records
        );

        Ok(DecodedTileMap {
            atlas,
            grid,
            report,
        })
    }

    fn validate_atlas(&self, atlas: &CpuTexture) -> Result<(), FormatError> {
        let expected = self.atlas.extent();
        let found = atlas.extent();
        if found != expected {
            return Err(FormatError::AtlasSize {
                width: found.width,
                height: found.height,
                expected_width: expected.width,
                expected_height: expected.height,
            });
        }
        Ok(())
    }
}

impl<C: RasterCodec> AssetLoaderLane<DecodedTileMap> for TileMapLoaderLane<C> {
    fn load(
        &self,
        bytes: &[u8],
    ) -> Result<DecodedTileMap, Box<dyn std::error::Error + Send + Sync + 'static>> {
        Ok(self.decode(&mut Cursor::new(bytes))?)
    }
}

fn read_tile_stream_offset<R: Read + Seek>(reader: &mut R) -> Result<u64, TileMapError> {
    reader.seek(SeekFrom::Start(TILE_STREAM_OFFSET_POS))?;
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u64::from(u32::from_le_bytes(buf)))
}

/// Fills `buf` as far as the reader allows, returning the number of bytes read.
fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

fn read_records<R: Read>(mut reader: R, grid: &mut TileGrid) -> Result<DecodeReport, TileMapError> {
    let mut report = DecodeReport::default();
    let mut buf = [0u8; TileRecord::SIZE];

    loop {
        let n = read_chunk(&mut reader, &mut buf)?;
        if n < TileRecord::SIZE {
            report.trailing_bytes = n;
            break;
        }
        report.records += 1;

        let record = TileRecord::from_le_bytes(buf);
        match grid.set(u32::from(record.x), u32::from(record.y), record.tile) {
            Ok(()) => report.placed += 1,
            Err(e) => {
                log::debug!("Skipping tile record {record:?}: {e}");
                report.discarded += 1;
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_records_stops_on_short_tail() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&TileRecord::new(5, 3, 7).to_le_bytes());
        bytes.extend_from_slice(&TileRecord::new(9, 0, 0).to_le_bytes());
        bytes.extend_from_slice(&[0xAA, 0xBB, 0xCC]);

        let mut grid = TileGrid::new();
        let report = read_records(Cursor::new(bytes), &mut grid).unwrap();

        assert_eq!(
            report,
            DecodeReport {
                records: 2,
                placed: 2,
                discarded: 0,
                trailing_bytes: 3,
            }
        );
        assert_eq!(grid.get(3, 7), Ok(5));
        assert_eq!(grid.get(0, 0), Ok(9));
    }

    #[test]
    fn read_records_discards_out_of_level_coordinates() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&TileRecord::new(1, 1024, 0).to_le_bytes());
        bytes.extend_from_slice(&TileRecord::new(2, 0, 1024).to_le_bytes());
        bytes.extend_from_slice(&TileRecord::new(3, 4095, 4095).to_le_bytes());
        bytes.extend_from_slice(&TileRecord::new(4, 1023, 1023).to_le_bytes());

        let mut grid = TileGrid::new();
        let report = read_records(Cursor::new(bytes), &mut grid).unwrap();

        assert_eq!(report.records, 4);
        assert_eq!(report.placed, 1);
        assert_eq!(report.discarded, 3);
        assert_eq!(grid.occupied_count(), 1);
        assert_eq!(grid.get(1023, 1023), Ok(4));
    }

    #[test]
    fn later_records_overwrite_earlier_ones() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&TileRecord::new(1, 10, 10).to_le_bytes());
        bytes.extend_from_slice(&TileRecord::new(2, 10, 10).to_le_bytes());

        let mut grid = TileGrid::new();
        read_records(Cursor::new(bytes), &mut grid).unwrap();
        assert_eq!(grid.get(10, 10), Ok(2));
    }

    #[test]
    fn empty_stream_is_not_an_error() {
        let mut grid = TileGrid::new();
        let report = read_records(Cursor::new(Vec::new()), &mut grid).unwrap();
        assert_eq!(report, DecodeReport::default());
    }
}
