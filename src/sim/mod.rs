//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per tick, speeds in pixels per tick
//! - Injected spawn-side randomness only
//! - No rendering or platform dependencies

pub mod block;
pub mod debris;
pub mod placement;
pub mod rng;
pub mod scroll;
pub mod simulation;
pub mod stack;
pub mod state;
pub mod tick;

pub use block::{Block, Direction};
pub use debris::{Debris, update_debris};
pub use placement::{Placement, PlacementOutcome, SliceRegion, resolve};
pub use rng::{ScriptedSpawns, SpawnSource, seeded};
pub use scroll::ScrollCompensator;
pub use simulation::Simulation;
pub use stack::Stack;
pub use state::{GameEvent, GamePhase, GameState, SoundCue};
pub use tick::{TickInput, place_block, resize, start_run, tick};
