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

//! # Tessera Lanes
//!
//! Hot-path workers of the tile renderer:
//! - [`asset_lane`] decodes level files into an atlas image and a tile grid,
//!   and writes them back for tooling.
//! - [`render_lane`] turns the visible part of a grid into a vertex batch
//!   every frame.

#![warn(missing_docs)]

pub mod asset_lane;
pub mod render_lane;
