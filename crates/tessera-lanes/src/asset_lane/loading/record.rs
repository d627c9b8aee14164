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

/// One tile placement from a level's record stream.
///
/// On disk a record is a little-endian `u32`:
///
/// ```text
/// 31      24 23            12 11             0
/// +---------+----------------+----------------+
/// |  tile   |       y        |       x        |
/// +---------+----------------+----------------+
/// ```
///
/// The 12-bit coordinate fields reach 4095, past the edge of a level; range
/// checks belong to whoever places the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileRecord {
    /// Tile id, `0` for empty.
    pub tile: u8,
    /// Column, 12 bits.
    pub x: u16,
    /// Row, 12 bits.
    pub y: u16,
}

impl TileRecord {
    /// Size of one encoded record in bytes.
    pub const SIZE: usize = 4;
    /// Largest value a coordinate field can hold.
    pub const MAX_COORD: u16 = 0x0FFF;

    /// Creates a record. Coordinates are truncated to 12 bits when packed.
    pub const fn new(tile: u8, x: u16, y: u16) -> Self {
        Self { tile, x, y }
    }

    /// Splits a packed record value into its fields.
    #[inline]
    pub const fn unpack(value: u32) -> Self {
        Self {
            tile: (value >> 24) as u8,
            y: ((value << 8) >> 20) as u16,
            x: ((value << 20) >> 20) as u16,
        }
    }

    /// Packs the record as `tile << 24 | y << 12 | x`.
    #[inline]
    pub const fn pack(&self) -> u32 {
        (self.tile as u32) << 24
            | ((self.y & Self::MAX_COORD) as u32) << 12
            | (self.x & Self::MAX_COORD) as u32
    }

    /// Decodes a record from its little-endian bytes.
    #[inline]
    pub const fn from_le_bytes(bytes: [u8; Self::SIZE]) -> Self {
        Self::unpack(u32::from_le_bytes(bytes))
    }

    /// Encodes the record as little-endian bytes.
    #[inline]
    pub const fn to_le_bytes(&self) -> [u8; Self::SIZE] {
        self.pack().to_le_bytes()
    }
}
