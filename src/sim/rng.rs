//! Spawn-side randomness
//!
//! The only random decision in a run is which edge the next block enters from.
//! It goes through [`SpawnSource`] so tests and replays can script it.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::block::Direction;

/// Picks the travel direction for each new block
pub trait SpawnSource {
    fn next_direction(&mut self) -> Direction;
}

impl SpawnSource for Pcg32 {
    /// Uniform 50/50
    fn next_direction(&mut self) -> Direction {
        if self.random_bool(0.5) {
            Direction::Right
        } else {
            Direction::Left
        }
    }
}

/// Seeded default source
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed list of directions, then repeats the last one
#[derive(Debug, Clone)]
pub struct ScriptedSpawns {
    queue: VecDeque<Direction>,
    last: Direction,
}

impl ScriptedSpawns {
    pub fn new(directions: impl IntoIterator<Item = Direction>) -> Self {
        Self {
            queue: directions.into_iter().collect(),
            last: Direction::Right,
        }
    }

    /// Always the same direction
    pub fn constant(direction: Direction) -> Self {
        Self {
            queue: VecDeque::new(),
            last: direction,
        }
    }
}

impl SpawnSource for ScriptedSpawns {
    fn next_direction(&mut self) -> Direction {
        if let Some(d) = self.queue.pop_front() {
            self.last = d;
        }
        self.last
    }
}
