//! Block motion model

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Horizontal travel direction of a moving block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1.0 for left, +1.0 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// A block, either in flight or placed on the stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Top-left corner in screen pixels (y grows downward)
    pub pos: Vec2,
    pub width: f32,
    /// Visual height
    pub depth: f32,
    /// Pixels per tick
    pub speed: f32,
    pub direction: Direction,
    pub moving: bool,
    /// 0xRRGGBB
    pub color: u32,
}

impl Block {
    /// A block sliding along the x axis
    pub fn moving(pos: Vec2, width: f32, depth: f32, speed: f32, direction: Direction, color: u32) -> Self {
        Self {
            pos,
            width,
            depth,
            speed,
            direction,
            moving: true,
            color,
        }
    }

    /// A block that never moves (the base of the tower)
    pub fn stationary(pos: Vec2, width: f32, depth: f32, color: u32) -> Self {
        Self {
            pos,
            width,
            depth,
            speed: 0.0,
            direction: Direction::Right,
            moving: false,
            color,
        }
    }

    /// Move one tick and bounce off `[0, boundary_width]`.
    ///
    /// Position is not clamped, so the block may overshoot an edge by up to
    /// one step; the reversed direction brings it back on the next tick.
    pub fn advance(&mut self, boundary_width: f32) {
        if !self.moving {
            return;
        }

        self.pos.x += self.speed * self.direction.sign();

        if self.right() > boundary_width {
            self.direction = Direction::Left;
        } else if self.pos.x < 0.0 {
            self.direction = Direction::Right;
        }
    }

    /// Freeze the block in place. Returns false if it was already stopped.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.moving, false)
    }

    /// x of the right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }
}
