//! Fixed-timestep Flappy Bird: a bird falls, jumps on demand and threads a
//! ring of recycled pipe pairs scrolling in from the right.
//!
//! The game core (`entity`, `pool`, `physics`, `collision`, `session`) is
//! pure and deterministic given a seed. `render` and `input` adapt it to a
//! crossterm terminal.

pub mod collision;
pub mod config;
pub mod entity;
pub mod input;
pub mod physics;
pub mod pool;
pub mod render;
pub mod session;

pub use collision::Outcome;
pub use config::{Options, Tuning};
pub use session::{Session, State};
