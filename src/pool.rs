//! Fixed ring of reusable obstacle slots.

use crate::config::Tuning;
use crate::entity::Obstacle;
use rand::Rng;

/// Owns exactly `len()` obstacles for the whole session. Slots are
/// recycled in place and never added or removed.
#[derive(Debug, Clone)]
pub struct ObstaclePool {
    slots: Vec<Obstacle>,
    offset_range: i32,
}

impl ObstaclePool {
    pub fn new<R: Rng>(tuning: &Tuning, rng: &mut R) -> Self {
        let mut pool = Self {
            slots: Vec::with_capacity(tuning.obstacle_count),
            offset_range: tuning.offset_range,
        };
        pool.initialize(tuning, rng);
        pool
    }

    /// Lay out every slot again at its staggered starting position.
    pub fn initialize<R: Rng>(&mut self, tuning: &Tuning, rng: &mut R) {
        self.offset_range = tuning.offset_range;
        self.slots.clear();
        let mut x = tuning.obstacle_start_x;
        for _ in 0..tuning.obstacle_count {
            let offset = self.random_offset(rng);
            self.slots.push(Obstacle::new(x, offset, tuning));
            x += tuning.obstacle_gap;
        }
    }

    /// Scroll every slot left by `speed`. Slots further than `gap_distance`
    /// past the left edge move to `wrap_x + gap_distance` with a fresh
    /// offset. Returns how many slots were recycled.
    pub fn advance<R: Rng>(
        &mut self,
        speed: i32,
        gap_distance: i32,
        wrap_x: i32,
        rng: &mut R,
    ) -> usize {
        let mut recycled = 0;
        for i in 0..self.slots.len() {
            self.slots[i].x -= speed;
            if self.slots[i].x < -gap_distance {
                let offset = self.random_offset(rng);
                self.slots[i].recycle(wrap_x + gap_distance, offset);
                recycled += 1;
                tracing::trace!(slot = i, offset, "obstacle recycled");
            }
        }
        recycled
    }

    fn random_offset<R: Rng>(&self, rng: &mut R) -> i32 {
        rng.gen_range(0..self.offset_range)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Obstacle> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Obstacle> {
        self.slots.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Obstacle> {
        self.slots.iter_mut()
    }
}
