//! Gameplay tuning and command-line options.
//!
//! All distances are in virtual-screen pixels (320x200) and all rates are
//! per tick.

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Smallest screen that still fits the ground strip under the sky.
pub const MIN_SCREEN_HEIGHT: i32 = 4;

/// Every constant a fresh round is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // Virtual screen
    pub screen_width: i32,
    pub screen_height: i32,

    // Background
    pub background_speed: i32,
    pub background_width: i32,

    // Player
    pub player_x: i32,
    pub player_y: i32,
    pub player_width: i32,
    pub player_height: i32,
    /// Falling below this row re-enters the player from the top.
    pub wrap_y: i32,
    pub respawn_y: i32,

    // Jumping
    pub fall_rate: i32,
    pub jump_rate: i32,
    pub jump_height: i32,

    // Obstacles
    pub obstacle_count: usize,
    pub obstacle_start_x: i32,
    /// Spacing at startup and the recycle distance past the left edge.
    pub obstacle_gap: i32,
    pub obstacle_width: i32,
    pub obstacle_height: i32,
    pub obstacle_speed: i32,
    pub margin_top: i32,
    pub margin_bottom: i32,
    /// Offsets are drawn from `0..offset_range`.
    pub offset_range: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: 320,
            screen_height: 200,

            background_speed: 1,
            background_width: 320,

            player_x: 100,
            player_y: 41,
            player_width: 29,
            player_height: 23,
            wrap_y: 300,
            respawn_y: -50,

            fall_rate: 2,
            jump_rate: 7,
            jump_height: 60,

            obstacle_count: 4,
            obstacle_start_x: 350,
            obstacle_gap: 150,
            obstacle_width: 50,
            obstacle_height: 165,
            obstacle_speed: 2,
            margin_top: 170,
            margin_bottom: 80,
            offset_range: 100,
        }
    }
}

impl Tuning {
    /// Read a RON tuning file. Fields left out keep their default.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {}", path.display()))?;
        let tuning: Tuning = ron::from_str(&text)
            .with_context(|| format!("parsing tuning file {}", path.display()))?;
        tuning
            .validate()
            .with_context(|| format!("invalid tuning in {}", path.display()))?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<()> {
        if self.obstacle_count == 0 {
            bail!("obstacle_count must be at least 1");
        }
        if self.jump_rate <= 0 {
            bail!("jump_rate must be positive");
        }
        if self.offset_range <= 0 {
            bail!("offset_range must be positive");
        }
        if self.screen_height < MIN_SCREEN_HEIGHT {
            bail!(
                "screen_height must be at least {MIN_SCREEN_HEIGHT}, got {}",
                self.screen_height
            );
        }
        if self.background_width < self.screen_width {
            bail!(
                "background_width ({}) must cover screen_width ({})",
                self.background_width,
                self.screen_width
            );
        }
        let sizes = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
        ];
        for (name, value) in sizes {
            if value <= 0 {
                bail!("{name} must be positive, got {value}");
            }
        }
        Ok(())
    }
}

/// Command-line surface. Every flag is optional.
#[derive(Parser, Debug)]
#[command(name = "flappy-dos")]
#[command(about = "Flap through the pipes: space to jump, x to restart, q to quit")]
pub struct Options {
    /// Seed for obstacle gap placement (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// RON file overriding gameplay constants
    #[arg(long)]
    pub tuning: Option<PathBuf>,

    /// Directory holding back.png, pipe.png, bird.png and bird_u.png
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Milliseconds per gameplay tick
    #[arg(long, default_value_t = 16)]
    pub tick_ms: u64,

    /// Write tracing output to this file (filtered by RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
