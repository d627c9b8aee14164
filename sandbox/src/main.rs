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

//! Headless tile renderer demo.
//!
//! Loads a level (or generates one), then scrolls a viewpoint across it,
//! building and "drawing" every frame through the in-memory backend.

mod demo;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tessera_agents::{FrameContext, FrameOutcome, LevelAgent, TileMapRenderAgent};
use tessera_core::{math::Vec2, RendererConfig};
use tessera_infra::HeadlessDevice;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// RON file with renderer settings.
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 240)]
    frames: u32,
    /// Simulated frame rate.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,
}

fn load_config(path: Option<&PathBuf>) -> Result<RendererConfig> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            ron::from_str(&text)
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => RendererConfig::default(),
    };
    config
        .validate()
        .map_err(|e| anyhow!("Invalid renderer config: {e}"))?;
    Ok(config)
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    log::info!("Sandbox: {:?}", config);

    let device = HeadlessDevice::new();
    let backend = Arc::new(device.clone());

    let mut levels = LevelAgent::new(backend.clone());
    match &config.level_path {
        Some(path) => {
            levels.load_path(path)?;
        }
        None => {
            levels.load_bytes(&demo::demo_level(config.start.y.max(0.0) as u32)?)?;
        }
    }

    let mut renderer = TileMapRenderAgent::from_config(backend, &config);
    let step = config.scroll_speed / cli.fps as f32;
    let mut viewpoint = config.start;
    let mut vertices_drawn = 0u64;

    for frame in 0..cli.frames {
        let context = FrameContext::new(viewpoint);
        if let FrameOutcome::Rendered { vertices } = renderer.render_frame(levels.level(), &context)
        {
            vertices_drawn += u64::from(vertices);
        }

        if frame % cli.fps == 0 {
            let stats = renderer.last_frame();
            log::info!(
                "Frame {frame}: viewpoint ({:.2}, {:.2}), {} tiles, {} cells outside the level",
                viewpoint.x,
                viewpoint.y,
                stats.tiles,
                stats.skipped_out_of_range
            );
        }
        viewpoint = viewpoint + Vec2::new(step, 0.0);
    }

    log::info!(
        "Sandbox finished: {} frames rendered, {} skipped, {} vertices, {} draw calls",
        renderer.frames_rendered(),
        renderer.frames_skipped(),
        vertices_drawn,
        device.draw_calls().len()
    );
    Ok(())
}
