//! Tower Stack - A block stacking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, placement, debris, scroll, game state)
//! - `renderer`: Rectangle batching and the WebGPU pipeline
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences read from the page URL
//! - `autoplay`: Placement policy for demos and smoke tests

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod autoplay;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Width of the base block at the start of a run
    pub const BASE_WIDTH: f32 = 200.0;
    /// Visual height of every block (also the scroll step)
    pub const BLOCK_DEPTH: f32 = 30.0;
    /// Distance from the bottom of the viewport to the top of the base block
    pub const BASE_MARGIN: f32 = 100.0;

    /// Horizontal speed of the first moving block (pixels per tick)
    pub const INITIAL_SPEED: f32 = 3.0;
    /// Speed added after every successful placement
    pub const SPEED_INCREMENT: f32 = 0.1;
    /// Trimmed blocks narrower than this end the run
    pub const MIN_BLOCK_WIDTH: f32 = 10.0;

    /// Fraction of the outstanding scroll debt applied per tick
    pub const SCROLL_EASE: f32 = 0.1;

    /// Debris acceleration (pixels per tick²)
    pub const DEBRIS_GRAVITY: f32 = 0.5;
    /// Debris opacity lost per tick
    pub const DEBRIS_FADE: f32 = 0.02;

    /// Ticks between game over and the end overlay (~500 ms at 60 Hz)
    pub const GAME_OVER_OVERLAY_DELAY_TICKS: u32 = 30;

    /// Default viewport used before the host reports its size
    pub const DEFAULT_VIEWPORT: (f32, f32) = (800.0, 600.0);

    /// Block palette (0xRRGGBB), cycled by score
    pub const PALETTE: [u32; 6] = [0xff9a9e, 0xfecfef, 0xa18cd1, 0xfbc2eb, 0x8fd3f4, 0x84fab0];
}

/// Convert a 0xRRGGBB color and an alpha into linear-ish RGBA floats
#[inline]
pub fn rgb_to_rgba(rgb: u32, alpha: f32) -> [f32; 4] {
    let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
    let b = (rgb & 0xff) as f32 / 255.0;
    [r, g, b, alpha]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_rgba() {
        assert_eq!(rgb_to_rgba(0xff0000, 1.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgb_to_rgba(0x000000, 0.5), [0.0, 0.0, 0.0, 0.5]);
        let c = rgb_to_rgba(0x8080ff, 0.2);
        assert!((c[0] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c[2], 1.0);
    }
}
