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

//! # Tessera Agents
//!
//! Agents own state across frames and drive the lanes: the [`LevelAgent`]
//! performs the one-time level load and atlas upload, and the
//! [`TileMapRenderAgent`] turns a viewpoint into a draw every frame.

pub mod level_agent;
pub mod render_agent;

pub use level_agent::LevelAgent;
pub use render_agent::{FrameContext, FrameOutcome, FrameStats, TileMapRenderAgent};
