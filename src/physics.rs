//! Per-tick vertical motion of the player and the background scroll.

use crate::config::Tuning;
use crate::entity::{Player, Pose};

pub const JUMP_KEY: char = ' ';

/// Turns jump presses into a bounded upward displacement spent over
/// several ticks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Controller {
    /// Upward distance still owed by the last jump. Never negative.
    pub jump_buffer: i32,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the player one tick.
    ///
    /// A pending jump key is consumed here, so holding nothing after one
    /// press yields exactly one impulse. A press while still rising
    /// refills the buffer to the full jump height.
    pub fn step(&mut self, player: &mut Player, key: &mut Option<char>, tuning: &Tuning) {
        player.y += tuning.fall_rate;
        if player.y > tuning.wrap_y {
            player.y = tuning.respawn_y;
        }

        if *key == Some(JUMP_KEY) {
            self.jump_buffer = tuning.jump_height;
            *key = None;
        }

        if self.jump_buffer > 0 {
            let rise = tuning.jump_rate.min(self.jump_buffer);
            player.y -= rise;
            self.jump_buffer -= rise;
            player.pose = Pose::Rising;
        } else {
            player.pose = Pose::Falling;
        }
    }
}

/// Horizontal position of the repeating background tile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Backdrop {
    /// In `(-background_width, 0]`.
    pub pos: i32,
}

impl Backdrop {
    pub fn scroll(&mut self, tuning: &Tuning) {
        self.pos -= tuning.background_speed;
        if self.pos < -tuning.background_width {
            self.pos = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Controller, Player, Tuning) {
        let tuning = Tuning::default();
        (Controller::new(), Player::new(&tuning), tuning)
    }

    #[test]
    fn test_gravity_pulls_player_down() {
        let (mut c, mut p, t) = setup();
        let mut key = None;
        c.step(&mut p, &mut key, &t);
        assert_eq!(p.y, 43);
        assert_eq!(p.pose, Pose::Falling);
    }

    #[test]
    fn test_falls_off_bottom_and_reenters_top() {
        let (mut c, mut p, t) = setup();
        let mut key = None;
        p.y = 299;
        c.step(&mut p, &mut key, &t);
        assert_eq!(p.y, -50);
    }

    #[test]
    fn test_exactly_at_wrap_line_stays() {
        let (mut c, mut p, t) = setup();
        let mut key = None;
        p.y = 298;
        c.step(&mut p, &mut key, &t);
        assert_eq!(p.y, 300);
    }

    #[test]
    fn test_jump_consumes_key() {
        let (mut c, mut p, t) = setup();
        let mut key = Some(JUMP_KEY);
        c.step(&mut p, &mut key, &t);
        assert!(key.is_none());
        assert_eq!(p.pose, Pose::Rising);
        assert_eq!(p.y, 41 + 2 - 7);
        assert_eq!(c.jump_buffer, 53);
    }

    #[test]
    fn test_other_keys_are_left_alone() {
        let (mut c, mut p, t) = setup();
        let mut key = Some('k');
        c.step(&mut p, &mut key, &t);
        assert_eq!(key, Some('k'));
        assert_eq!(c.jump_buffer, 0);
    }

    #[test]
    fn test_one_jump_rises_exactly_jump_height() {
        let (mut c, mut p, t) = setup();
        let mut key = Some(JUMP_KEY);
        let mut rises = Vec::new();
        for _ in 0..40 {
            let y_before = p.y;
            c.step(&mut p, &mut key, &t);
            if p.pose == Pose::Rising {
                rises.push(y_before - p.y + t.fall_rate);
            }
            assert!(c.jump_buffer >= 0);
        }
        // 60 = 8 * 7 + 4: the last rising tick only spends what is left.
        assert_eq!(rises, vec![7, 7, 7, 7, 7, 7, 7, 7, 4]);
        assert_eq!(rises.iter().sum::<i32>(), t.jump_height);
        assert_eq!(p.pose, Pose::Falling);
    }

    #[test]
    fn test_press_mid_ascent_refills_buffer() {
        let (mut c, mut p, t) = setup();
        let mut key = Some(JUMP_KEY);
        c.step(&mut p, &mut key, &t);
        c.step(&mut p, &mut key, &t);
        assert_eq!(c.jump_buffer, 46);

        key = Some(JUMP_KEY);
        c.step(&mut p, &mut key, &t);
        assert_eq!(c.jump_buffer, 53);
    }

    #[test]
    fn test_backdrop_wraps_after_one_tile() {
        let t = Tuning::default();
        let mut b = Backdrop::default();
        for _ in 0..320 {
            b.scroll(&t);
        }
        assert_eq!(b.pos, -320);
        b.scroll(&t);
        assert_eq!(b.pos, 0);
    }
}
