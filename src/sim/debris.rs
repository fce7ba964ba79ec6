//! Falling fragments sliced off during placement

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A piece of a block that fell off the tower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debris {
    /// Top-left corner in screen pixels
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Downward velocity (pixels per tick)
    pub vel_y: f32,
    /// 1 when spawned, fades toward 0
    pub opacity: f32,
    /// 0xRRGGBB
    pub color: u32,
}

impl Debris {
    pub fn new(pos: Vec2, width: f32, height: f32, color: u32) -> Self {
        Self {
            pos,
            width,
            height,
            vel_y: 0.0,
            opacity: 1.0,
            color,
        }
    }

    /// Apply gravity and fade for one tick
    pub fn update(&mut self, gravity: f32, fade: f32) {
        self.vel_y += gravity;
        self.pos.y += self.vel_y;
        self.opacity = (self.opacity - fade).max(0.0);
    }

    /// Still on screen and visible
    pub fn is_alive(&self, visible_height: f32) -> bool {
        self.pos.y <= visible_height && self.opacity > 0.0
    }
}

/// Age every fragment by one tick and drop the ones that are gone
pub fn update_debris(debris: &mut Vec<Debris>, gravity: f32, fade: f32, visible_height: f32) {
    for piece in debris.iter_mut() {
        piece.update(gravity, fade);
    }
    debris.retain(|d| d.is_alive(visible_height));
}
