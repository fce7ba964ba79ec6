//! Placement policy for demo runs and smoke tests
//!
//! Presses when the moving block is within `tolerance` pixels of the top block.

use crate::sim::{GamePhase, GameState, Simulation, SpawnSource, TickInput};

/// Should the player press now?
pub fn should_place(state: &GameState, tolerance: f32) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    match (&state.current, state.stack.top()) {
        (Some(current), Some(top)) => (current.pos.x - top.pos.x).abs() <= tolerance,
        _ => false,
    }
}

/// Summary of an autoplay run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoplayReport {
    pub score: u32,
    pub ticks: u64,
    pub tower_height: usize,
    pub finished: bool,
}

/// Start a run and keep placing until game over or `max_ticks`.
///
/// `tolerance` is clamped to at least half the current speed so the policy
/// cannot step over the alignment window.
pub fn run<R: SpawnSource>(sim: &mut Simulation<R>, tolerance: f32, max_ticks: u64) -> AutoplayReport {
    sim.step(&TickInput {
        start: true,
        ..Default::default()
    });

    let mut ticks = 1;
    while ticks < max_ticks && sim.state().phase == GamePhase::Playing {
        let window = tolerance.max(sim.state().speed * 0.5);
        let input = TickInput {
            place: should_place(sim.state(), window),
            ..Default::default()
        };
        sim.step(&input);
        ticks += 1;
    }

    let state = sim.state();
    AutoplayReport {
        score: state.score,
        ticks,
        tower_height: state.tower_height(),
        finished: state.phase == GamePhase::GameOver,
    }
}
