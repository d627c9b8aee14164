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

//! Provides the small set of math primitives the tile renderer needs.
//!
//! Positions are expressed in floating-point tile units ([`Vec2`]), while
//! pixel sizes use integer extents ([`Extent2D`]).

// --- Declare Sub-Modules ---

pub mod dimension;
pub mod vector;

// --- Re-export Principal Types ---

pub use self::dimension::Extent2D;
pub use self::vector::Vec2;

// --- Utility Functions ---

/// Returns the fractional part of `value` relative to its floor, always in `[0, 1)`.
///
/// Unlike [`f32::fract`], negative inputs yield a non-negative result, which is
/// what a scroll offset measured from the left tile edge needs.
///
/// # Examples
///
/// ```
/// use tessera_core::math::floor_fract;
/// assert_eq!(floor_fract(2.25), 0.25);
/// assert_eq!(floor_fract(-0.25), 0.75);
/// ```
#[inline]
pub fn floor_fract(value: f32) -> f32 {
    value - value.floor()
}
