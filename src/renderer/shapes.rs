//! Shape generation for 2D primitives
//!
//! Everything is an axis-aligned rectangle in screen pixels (origin top-left).

use super::vertex::Vertex;
use crate::rgb_to_rgba;
use crate::sim::{Block, Debris, GameState};

/// Fraction of a block's depth used for the top highlight
const HIGHLIGHT_FRACTION: f32 = 0.2;
/// Width of the shadow strip on the right edge
const SHADOW_WIDTH: f32 = 5.0;

/// Clear color behind the tower
pub const BACKGROUND: [f32; 4] = [0.06, 0.05, 0.12, 1.0];
const HIGHLIGHT: [f32; 4] = [1.0, 1.0, 1.0, 0.2];
const SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.1];

/// A filled rectangle with a single color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: [f32; 4],
}

impl Rect {
    /// Two triangles covering the rectangle
    pub fn vertices(&self) -> [Vertex; 6] {
        let (x0, y0) = (self.x, self.y);
        let (x1, y1) = (self.x + self.width, self.y + self.height);
        let c = self.color;
        [
            Vertex::new(x0, y0, c),
            Vertex::new(x1, y0, c),
            Vertex::new(x0, y1, c),
            Vertex::new(x0, y1, c),
            Vertex::new(x1, y0, c),
            Vertex::new(x1, y1, c),
        ]
    }
}

/// Body, top highlight and side shadow of a block
pub fn block_rects(block: &Block) -> [Rect; 3] {
    let (x, y) = (block.pos.x, block.pos.y);
    [
        Rect {
            x,
            y,
            width: block.width,
            height: block.depth,
            color: rgb_to_rgba(block.color, 1.0),
        },
        Rect {
            x,
            y,
            width: block.width,
            height: block.depth * HIGHLIGHT_FRACTION,
            color: HIGHLIGHT,
        },
        Rect {
            x: x + block.width - SHADOW_WIDTH,
            y,
            width: SHADOW_WIDTH,
            height: block.depth,
            color: SHADOW,
        },
    ]
}

/// A fragment drawn at its current opacity (nothing once fully faded)
pub fn debris_rect(debris: &Debris) -> Option<Rect> {
    (debris.opacity > 0.0).then(|| Rect {
        x: debris.pos.x,
        y: debris.pos.y,
        width: debris.width,
        height: debris.height,
        color: rgb_to_rgba(debris.color, debris.opacity),
    })
}

/// Every rectangle of the scene in draw order: tower, moving block, debris
pub fn scene_rects(state: &GameState) -> Vec<Rect> {
    let mut rects = Vec::with_capacity((state.stack.len() + 1) * 3 + state.debris.len());
    for block in state.stack.iter() {
        rects.extend(block_rects(block));
    }
    if let Some(current) = &state.current {
        rects.extend(block_rects(current));
    }
    rects.extend(state.debris.iter().filter_map(debris_rect));
    rects
}

/// Triangle list for the whole scene
pub fn scene_vertices(state: &GameState) -> Vec<Vertex> {
    scene_rects(state).iter().flat_map(Rect::vertices).collect()
}
