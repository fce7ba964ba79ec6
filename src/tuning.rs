//! Data-driven game balance
//!
//! Every number the simulation uses comes from a `Tuning`. The defaults match
//! the constants in [`crate::consts`]; a JSON document may override any subset.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading or validating a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub base_width: f32,
    pub block_depth: f32,
    pub base_margin: f32,
    pub initial_speed: f32,
    pub speed_increment: f32,
    pub min_block_width: f32,
    pub scroll_ease: f32,
    pub debris_gravity: f32,
    pub debris_fade: f32,
    pub game_over_overlay_delay_ticks: u32,
    pub palette: Vec<u32>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_width: BASE_WIDTH,
            block_depth: BLOCK_DEPTH,
            base_margin: BASE_MARGIN,
            initial_speed: INITIAL_SPEED,
            speed_increment: SPEED_INCREMENT,
            min_block_width: MIN_BLOCK_WIDTH,
            scroll_ease: SCROLL_EASE,
            debris_gravity: DEBRIS_GRAVITY,
            debris_fade: DEBRIS_FADE,
            game_over_overlay_delay_ticks: GAME_OVER_OVERLAY_DELAY_TICKS,
            palette: PALETTE.to_vec(),
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document over the defaults and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("base_width", self.base_width),
            ("block_depth", self.block_depth),
            ("initial_speed", self.initial_speed),
            ("min_block_width", self.min_block_width),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be greater than zero",
                });
            }
        }

        let non_negative = [
            ("base_margin", self.base_margin),
            ("speed_increment", self.speed_increment),
            ("debris_gravity", self.debris_gravity),
            ("debris_fade", self.debris_fade),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must not be negative",
                });
            }
        }

        if !(self.scroll_ease > 0.0 && self.scroll_ease <= 1.0) {
            return Err(TuningError::Invalid {
                field: "scroll_ease",
                reason: "must be in (0, 1]",
            });
        }
        if self.palette.is_empty() {
            return Err(TuningError::Invalid {
                field: "palette",
                reason: "needs at least one color",
            });
        }
        Ok(())
    }

    /// Palette color for the block spawned at the given score.
    ///
    /// Falls back to the first default color when the palette is empty.
    pub fn color_for_score(&self, score: u32) -> u32 {
        (score as usize)
            .checked_rem(self.palette.len())
            .and_then(|i| self.palette.get(i).copied())
            .unwrap_or(PALETTE[0])
    }
}
