//! One round of play: owns every piece of game state and runs the tick.

use crate::collision::{self, Outcome};
use crate::config::Tuning;
use crate::entity::Player;
use crate::physics::{Backdrop, Controller};
use crate::pool::ObstaclePool;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Playing,
    GameOver,
}

pub struct Session {
    tuning: Tuning,
    pub player: Player,
    pub pool: ObstaclePool,
    pub controller: Controller,
    pub backdrop: Backdrop,
    pub score: u32,
    /// Collisions this round. Anything above zero means game over.
    pub over: u32,
    /// Last key captured and not yet consumed.
    pub key: Option<char>,
    rng: StdRng,
}

impl Session {
    /// Start a round. A seed makes the obstacle layout reproducible.
    pub fn new(tuning: Tuning, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let pool = ObstaclePool::new(&tuning, &mut rng);
        Self {
            player: Player::new(&tuning),
            pool,
            controller: Controller::new(),
            backdrop: Backdrop::default(),
            score: 0,
            over: 0,
            key: None,
            rng,
            tuning,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn state(&self) -> State {
        if self.over > 0 {
            State::GameOver
        } else {
            State::Playing
        }
    }

    /// Put everything back to the start of a round. The pending key is
    /// dropped so the restart press doesn't fire again.
    pub fn reset(&mut self) {
        self.player = Player::new(&self.tuning);
        self.pool.initialize(&self.tuning, &mut self.rng);
        self.controller = Controller::new();
        self.backdrop = Backdrop::default();
        self.score = 0;
        self.over = 0;
        self.key = None;
        tracing::info!("session reset");
    }

    /// Remember a key press for the next tick.
    pub fn press(&mut self, key: char) {
        self.key = Some(key);
    }

    /// Run one gameplay step. Does nothing once the round is over.
    pub fn tick(&mut self) -> Outcome {
        if self.state() == State::GameOver {
            return Outcome::NoChange;
        }

        let t = &self.tuning;
        self.backdrop.scroll(t);
        self.controller.step(&mut self.player, &mut self.key, t);
        self.pool
            .advance(t.obstacle_speed, t.obstacle_gap, t.screen_width, &mut self.rng);

        let outcome = collision::evaluate(&self.player, &mut self.pool);
        match outcome {
            Outcome::NoChange => {}
            Outcome::Scored(points) => {
                self.score += points;
                tracing::debug!(score = self.score, "obstacle passed");
            }
            Outcome::Collided { slot, scored } => {
                self.score += scored;
                self.over += 1;
                tracing::info!(slot, score = self.score, "collision, game over");
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Pose;
    use crate::physics::JUMP_KEY;

    fn session() -> Session {
        Session::new(Tuning::default(), Some(3))
    }

    #[test]
    fn test_new_session_is_playing() {
        let s = session();
        assert_eq!(s.state(), State::Playing);
        assert_eq!(s.score, 0);
        assert_eq!(s.over, 0);
        assert_eq!(s.pool.len(), 4);
        assert!(s.key.is_none());
    }

    #[test]
    fn test_tick_moves_world() {
        let mut s = session();
        s.tick();
        assert_eq!(s.player.y, 43);
        assert_eq!(s.backdrop.pos, -1);
        assert_eq!(s.pool.get(0).unwrap().x, 348);
    }

    #[test]
    fn test_jump_key_is_consumed_by_tick() {
        let mut s = session();
        s.press(JUMP_KEY);
        s.tick();
        assert!(s.key.is_none());
        assert_eq!(s.player.pose, Pose::Rising);
    }

    #[test]
    fn test_collision_enters_game_over_and_freezes() {
        let mut s = session();
        let slot = s.pool.get_mut(0).unwrap();
        slot.x = 100;
        slot.offset = 99;

        let outcome = s.tick();
        assert!(matches!(outcome, Outcome::Collided { slot: 0, .. }));
        assert_eq!(s.state(), State::GameOver);
        assert_eq!(s.over, 1);

        let frozen_y = s.player.y;
        let frozen_x = s.pool.get(0).unwrap().x;
        for _ in 0..10 {
            assert_eq!(s.tick(), Outcome::NoChange);
        }
        assert_eq!(s.player.y, frozen_y);
        assert_eq!(s.pool.get(0).unwrap().x, frozen_x);
    }

    #[test]
    fn test_keys_pressed_during_game_over_are_dropped_on_reset() {
        let mut s = session();
        s.over = 1;
        s.press(JUMP_KEY);
        s.tick();
        assert_eq!(s.key, Some(JUMP_KEY));

        s.reset();
        assert!(s.key.is_none());
        assert_eq!(s.state(), State::Playing);
    }

    #[test]
    fn test_reset_restores_start_of_round() {
        let mut s = session();
        for _ in 0..40 {
            s.tick();
        }
        s.score = 7;
        s.over = 2;
        s.controller.jump_buffer = 30;

        s.reset();
        assert_eq!(s.over, 0);
        assert_eq!(s.score, 0);
        assert_eq!((s.player.x, s.player.y), (100, 41));
        assert_eq!(s.controller.jump_buffer, 0);
        assert_eq!(s.backdrop.pos, 0);
        let xs: Vec<i32> = s.pool.iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![350, 500, 650, 800]);
        assert!(s.pool.iter().all(|o| !o.touched));
    }
}
