//! Bounding-box tests between the bird and the pipes, and scoring.

use crate::entity::{Obstacle, Player};
use crate::pool::ObstaclePool;

/// What one evaluation pass changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    NoChange,
    /// Points awarded this pass.
    Scored(u32),
    /// The player hit the obstacle in this slot. Points from slots earlier
    /// in the scan were still awarded.
    Collided { slot: usize, scored: u32 },
}

pub fn overlaps_horizontally(player: &Player, obstacle: &Obstacle) -> bool {
    player.right() > obstacle.x && player.x < obstacle.right()
}

/// True when the player is outside the gap between the two barriers.
/// Only meaningful while the boxes overlap horizontally.
pub fn hits_barrier(player: &Player, obstacle: &Obstacle) -> bool {
    player.y < obstacle.upper_edge() || player.bottom() > obstacle.lower_edge()
}

pub fn has_passed(player: &Player, obstacle: &Obstacle) -> bool {
    obstacle.right() < player.x
}

/// Scan the pool in slot order. The first collision ends the scan.
pub fn evaluate(player: &Player, pool: &mut ObstaclePool) -> Outcome {
    let mut scored = 0;
    for (slot, obstacle) in pool.iter_mut().enumerate() {
        if overlaps_horizontally(player, obstacle) && hits_barrier(player, obstacle) {
            obstacle.touched = true;
            return Outcome::Collided { slot, scored };
        }

        if has_passed(player, obstacle) && !obstacle.touched {
            obstacle.touched = true;
            scored += 1;
        }
    }

    if scored > 0 {
        Outcome::Scored(scored)
    } else {
        Outcome::NoChange
    }
}
