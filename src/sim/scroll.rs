//! Camera-follow by shifting world coordinates
//!
//! Instead of moving a camera, pending scroll is stored as debt and paid off a
//! fraction at a time by adding the same delta to every entity's y.

use serde::{Deserialize, Serialize};

/// Below this the debt is considered settled
const SETTLE_EPSILON: f32 = 1e-3;

/// Outstanding downward shift
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollCompensator {
    debt: f32,
}

impl ScrollCompensator {
    pub fn debt(&self) -> f32 {
        self.debt
    }

    /// Queue one `step` of scroll if the top of the tower has climbed above
    /// the middle of the screen. Returns true when debt was added.
    pub fn note_placement(&mut self, top_y: f32, visible_height: f32, step: f32) -> bool {
        if top_y < visible_height / 2.0 {
            self.debt += step;
            true
        } else {
            false
        }
    }

    /// Take `ease` of the outstanding debt for this tick.
    ///
    /// Returns the delta every entity must move down by (0 when settled).
    pub fn step(&mut self, ease: f32) -> f32 {
        if self.debt <= 0.0 {
            return 0.0;
        }
        if self.debt < SETTLE_EPSILON {
            let rest = self.debt;
            self.debt = 0.0;
            return rest;
        }
        let delta = self.debt * ease;
        self.debt -= delta;
        delta
    }

    pub fn clear(&mut self) {
        self.debt = 0.0;
    }
}
