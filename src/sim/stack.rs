//! The tower of placed blocks

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::block::Block;

/// Placed blocks, oldest first. Never empty once reset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stack {
    blocks: Vec<Block>,
}

impl Stack {
    /// Clear and reseed with one stationary base block, centered horizontally
    /// `base_margin` pixels above the bottom of the viewport.
    pub fn reset(
        &mut self,
        view_width: f32,
        view_height: f32,
        base_width: f32,
        base_depth: f32,
        base_margin: f32,
        color: u32,
    ) {
        self.blocks.clear();
        let pos = Vec2::new((view_width - base_width) / 2.0, view_height - base_margin);
        self.blocks.push(Block::stationary(pos, base_width, base_depth, color));
    }

    /// The block the next drop is measured against
    pub fn top(&self) -> Option<&Block> {
        self.blocks.last()
    }

    pub fn push(&mut self, block: Block) {
        debug_assert!(!block.moving, "only stopped blocks belong on the stack");
        self.blocks.push(block);
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Block> {
        self.blocks.iter_mut()
    }
}
