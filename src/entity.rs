//! Plain game objects: the bird and the pipe pairs it flies through.

use crate::config::Tuning;

/// Which bird sprite the renderer should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Rising,
    Falling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub x: i32,
    /// Unbounded; leaving the bottom of the screen wraps back to the top.
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub pose: Pose,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.player_x,
            y: tuning.player_y,
            width: tuning.player_width,
            height: tuning.player_height,
            pose: Pose::Falling,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

/// One pipe pair occupying a single horizontal slot.
///
/// The upper barrier spans `offset - margin_top .. offset - margin_top + height`
/// and the lower barrier starts at `offset + margin_bottom`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Obstacle {
    pub x: i32,
    pub width: i32,
    pub height: i32,
    pub offset: i32,
    pub margin_top: i32,
    pub margin_bottom: i32,
    /// Already scored, or already hit, on this pass.
    pub touched: bool,
}

impl Obstacle {
    pub fn new(x: i32, offset: i32, tuning: &Tuning) -> Self {
        Self {
            x,
            width: tuning.obstacle_width,
            height: tuning.obstacle_height,
            offset,
            margin_top: tuning.margin_top,
            margin_bottom: tuning.margin_bottom,
            touched: false,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge of the upper barrier.
    pub fn upper_edge(&self) -> i32 {
        self.offset - self.margin_top + self.height
    }

    /// Top edge of the lower barrier.
    pub fn lower_edge(&self) -> i32 {
        self.offset + self.margin_bottom
    }

    /// Screen row where the upper barrier sprite is drawn.
    pub fn upper_top(&self) -> i32 {
        self.offset - self.margin_top
    }

    /// Reuse this slot for a new pass.
    pub fn recycle(&mut self, x: i32, offset: i32) {
        self.x = x;
        self.offset = offset;
        self.touched = false;
    }
}
