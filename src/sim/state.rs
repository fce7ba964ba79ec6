//! Game state and core simulation types
//!
//! Everything the simulation mutates between ticks lives in [`GameState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::block::{Block, Direction};
use super::debris::Debris;
use super::scroll::ScrollCompensator;
use super::stack::Stack;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, base block shown, nothing moving
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended; debris and scroll keep animating
    GameOver,
}

/// One-shot audio cue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    Drop,
    Error,
    GameOver,
}

/// Something the host should react to (sound, HUD), recorded during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new run began
    Started,
    /// A block landed on the tower
    Placed {
        score: u32,
        width: f32,
        /// Width that fell off (0 for a perfect drop)
        sliced: f32,
    },
    /// The block missed the tower entirely
    Missed,
    /// The run is over
    GameOver { score: u32 },
}

impl GameEvent {
    /// Sound to play for this event, if any
    pub fn cue(&self) -> Option<SoundCue> {
        match self {
            GameEvent::Started => None,
            GameEvent::Placed { .. } => Some(SoundCue::Drop),
            GameEvent::Missed => Some(SoundCue::Error),
            GameEvent::GameOver { .. } => Some(SoundCue::GameOver),
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Balance knobs for this run
    pub tuning: Tuning,
    /// Visible area in pixels (width, height)
    pub viewport: Vec2,
    /// Current phase
    pub phase: GamePhase,
    /// Successful placements this run
    pub score: u32,
    /// Speed given to the next spawned block (pixels per tick)
    pub speed: f32,
    /// Placed blocks
    pub stack: Stack,
    /// Block in flight
    pub current: Option<Block>,
    /// Falling fragments
    pub debris: Vec<Debris>,
    /// Pending camera shift
    pub scroll: ScrollCompensator,
    /// Ticks spent in GameOver
    pub game_over_ticks: u32,
    /// Events since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// A game sitting at the menu with only the base block
    pub fn new(tuning: Tuning, width: f32, height: f32) -> Self {
        let mut state = Self {
            speed: tuning.initial_speed,
            tuning,
            viewport: Vec2::new(width, height),
            phase: GamePhase::Menu,
            score: 0,
            stack: Stack::default(),
            current: None,
            debris: Vec::new(),
            scroll: ScrollCompensator::default(),
            game_over_ticks: 0,
            events: Vec::new(),
        };
        state.reset_run();
        state
    }

    /// Discard the tower, debris and progress; reseed the base block
    pub fn reset_run(&mut self) {
        let base_color = self.tuning.color_for_score(0);
        self.stack.reset(
            self.viewport.x,
            self.viewport.y,
            self.tuning.base_width,
            self.tuning.block_depth,
            self.tuning.base_margin,
            base_color,
        );
        self.current = None;
        self.debris.clear();
        self.scroll.clear();
        self.score = 0;
        self.speed = self.tuning.initial_speed;
        self.game_over_ticks = 0;
    }

    /// Put a new moving block one layer above the top, entering from the
    /// edge opposite its travel direction.
    pub fn spawn_block(&mut self, direction: Direction) {
        let Some(prev) = self.stack.top() else {
            log::warn!("spawn_block called on an empty stack");
            return;
        };
        let depth = self.tuning.block_depth;
        let x = match direction {
            Direction::Right => -prev.width,
            Direction::Left => self.viewport.x,
        };
        let pos = Vec2::new(x, prev.pos.y - depth);
        let color = self.tuning.color_for_score(self.score);
        self.current = Some(Block::moving(pos, prev.width, depth, self.speed, direction, color));
    }

    /// Shift every live entity down by `delta`
    pub fn apply_scroll(&mut self, delta: f32) {
        if delta == 0.0 {
            return;
        }
        for block in self.stack.iter_mut() {
            block.pos.y += delta;
        }
        for piece in &mut self.debris {
            piece.pos.y += delta;
        }
        if let Some(current) = &mut self.current {
            current.pos.y += delta;
        }
    }

    /// Number of blocks placed on top of the base
    pub fn tower_height(&self) -> usize {
        self.stack.len().saturating_sub(1)
    }

    /// Whether the end overlay should be shown yet
    pub fn game_over_overlay_visible(&self) -> bool {
        self.phase == GamePhase::GameOver
            && self.game_over_ticks >= self.tuning.game_over_overlay_delay_ticks
    }

    /// Hand pending events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
