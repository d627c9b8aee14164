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

//! Rendering lane - hot path producing the per-frame tile geometry.
//!
//! The lane is stateless: every call rebuilds the whole [`VertexBatch`] from
//! the grid and the current viewpoint, and the result replaces the previous
//! frame's batch.

mod tile_mesh_lane;
mod vertex;

pub use tile_mesh_lane::*;
pub use vertex::*;
