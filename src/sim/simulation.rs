//! Owned simulation object held by the host shell

use rand_pcg::Pcg32;

use super::rng::{SpawnSource, seeded};
use super::state::{GameEvent, GameState};
use super::tick::{TickInput, tick};
use crate::tuning::Tuning;

/// Game state plus the random source that drives spawning
#[derive(Debug, Clone)]
pub struct Simulation<R: SpawnSource = Pcg32> {
    state: GameState,
    rng: R,
}

impl Simulation<Pcg32> {
    /// Seeded simulation at the menu
    pub fn new(tuning: Tuning, width: f32, height: f32, seed: u64) -> Self {
        log::info!("Simulation created with seed {}", seed);
        Self::with_source(tuning, width, height, seeded(seed))
    }
}

impl<R: SpawnSource> Simulation<R> {
    /// Simulation using a caller-provided spawn source
    pub fn with_source(tuning: Tuning, width: f32, height: f32, rng: R) -> Self {
        Self {
            state: GameState::new(tuning, width, height),
            rng,
        }
    }

    /// Run one tick with the input latched since the last one
    pub fn step(&mut self, input: &TickInput) {
        tick(&mut self.state, input, &mut self.rng);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for hosts and tests that need to poke at entities
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}
