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

//! Asset lane: decoding and encoding of level files.
//!
//! A level file is a BMP image whose 4-byte file-size header field (bytes
//! `2..6`) holds, instead, the absolute offset of a stream of packed
//! little-endian tile records appended after the image.

mod error;
mod loader;
mod loading;
mod writer;

pub use error::{FormatError, TileMapError};
pub use loader::AssetLoaderLane;
pub use loading::*;
pub use writer::{encode_tile_map, TileMapWriter};
