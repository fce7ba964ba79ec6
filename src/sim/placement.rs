//! Placement resolution
//!
//! Compares the in-flight block against the top of the stack and decides what
//! survives. Pure: the caller applies the result to the game state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::block::Block;
use super::debris::Debris;

/// Result category of a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementOutcome {
    /// Overlapping part kept, run continues
    Hit,
    /// Overlapping part kept but too narrow to continue
    GameOver,
    /// No overlap at all
    Miss,
}

/// A horizontal strip `[x, x + width)` at a given height band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliceRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: u32,
}

impl SliceRegion {
    /// Turn the slice into a falling fragment
    pub fn into_debris(self) -> Debris {
        Debris::new(Vec2::new(self.x, self.y), self.width, self.height, self.color)
    }
}

/// Full result of [`resolve`]
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub outcome: PlacementOutcome,
    /// `top.width - |current.x - top.x|`, may be negative
    pub overlap: f32,
    /// Stopped, trimmed block to push (absent on a miss)
    pub placed: Option<Block>,
    /// The part that falls away (absent on a perfect placement)
    pub sliced: Option<SliceRegion>,
}

/// Resolve dropping `current` onto `top`.
///
/// When `current` hangs over the right edge it keeps its x and loses its right
/// end. Otherwise it snaps to `top.x` and the part left of `top.x` falls.
pub fn resolve(current: &Block, top: &Block, min_width: f32) -> Placement {
    let offset = current.pos.x - top.pos.x;
    let overlap = top.width - offset.abs();

    if overlap <= 0.0 {
        return Placement {
            outcome: PlacementOutcome::Miss,
            overlap,
            placed: None,
            sliced: Some(SliceRegion {
                x: current.pos.x,
                y: current.pos.y,
                width: current.width,
                height: current.depth,
                color: current.color,
            }),
        };
    }

    let mut placed = current.clone();
    placed.moving = false;
    placed.width = overlap;

    let (slice_x, slice_width) = if offset > 0.0 {
        (current.pos.x + overlap, current.width - overlap)
    } else {
        placed.pos.x = top.pos.x;
        (top.pos.x - offset.abs(), offset.abs())
    };

    let sliced = (slice_width > 0.0).then_some(SliceRegion {
        x: slice_x,
        y: current.pos.y,
        width: slice_width,
        height: current.depth,
        color: current.color,
    });

    let outcome = if overlap < min_width {
        PlacementOutcome::GameOver
    } else {
        PlacementOutcome::Hit
    };

    Placement {
        outcome,
        overlap,
        placed: Some(placed),
        sliced,
    }
}
