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

//! Renderer configuration.
//!
//! Every field has a default, so a configuration file only needs to name the
//! values it overrides.

use crate::atlas::TILE_SIZE;
use crate::math::{Extent2D, Vec2};
use serde::{Deserialize, Serialize};

/// Size of the output surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Horizontal resolution.
    pub width: u32,
    /// Vertical resolution.
    pub height: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 800,
        }
    }
}

impl ScreenConfig {
    /// The screen size as a viewport extent.
    pub fn extent(&self) -> Extent2D {
        Extent2D::new(self.width, self.height)
    }
}

/// Top-level configuration for the tile renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Output surface size.
    pub screen: ScreenConfig,
    /// On-screen size of one tile in pixels.
    pub tile_size_px: u32,
    /// Level file to load, if any.
    pub level_path: Option<String>,
    /// Scroll speed of a scripted viewpoint, in tiles per second.
    pub scroll_speed: f32,
    /// Initial viewpoint, in tile units.
    pub start: Vec2,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            tile_size_px: TILE_SIZE,
            level_path: None,
            scroll_speed: 16.0,
            start: Vec2::new(285.0, 265.0),
        }
    }
}

impl RendererConfig {
    /// Checks the values a renderer cannot work with.
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.tile_size_px == 0 {
            return Err("tile_size_px must be greater than zero".to_string());
        }
        if self.screen.width < self.tile_size_px || self.screen.height < self.tile_size_px {
            return Err(format!(
                "screen {}x{} is smaller than one {}px tile",
                self.screen.width, self.screen.height, self.tile_size_px
            ));
        }
        if !self.start.is_finite() || !self.scroll_speed.is_finite() {
            return Err("start and scroll_speed must be finite".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = RendererConfig::default();
        assert_eq!(config.screen.extent(), Extent2D::new(1024, 800));
        assert_eq!(config.tile_size_px, 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_ron_falls_back_to_defaults() {
        let config: RendererConfig =
            ron::from_str("(screen: (width: 320), level_path: Some(\"a.lvl\"))").unwrap();
        assert_eq!(config.screen.width, 320);
        assert_eq!(config.screen.height, 800);
        assert_eq!(config.level_path.as_deref(), Some("a.lvl"));
        assert_eq!(config.start, Vec2::new(285.0, 265.0));
    }

    #[test]
    fn zero_tile_size_is_rejected() {
        let config = RendererConfig {
            tile_size_px: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn tiny_screen_is_rejected() {
        let config = RendererConfig {
            screen: ScreenConfig {
                width: 8,
                height: 800,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
