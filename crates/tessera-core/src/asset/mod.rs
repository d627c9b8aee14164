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

//! Provides the foundational marker trait for loadable assets.
//!
//! This module has no knowledge of how assets are read or decoded; loader lanes
//! in other crates implement that work against the [`Asset`] contract.

/// A marker trait for types that can be produced by an asset loader lane.
///
/// The supertraits guarantee the asset can be handed across threads and stored
/// for the lifetime of the application, even though the tile renderer itself
/// loads synchronously.
///
/// # Examples
///
/// ```
/// use tessera_core::asset::Asset;
///
/// struct Palette {
///     colors: Vec<[u8; 4]>,
/// }
///
/// impl Asset for Palette {}
/// ```
pub trait Asset: Send + Sync + 'static {}
