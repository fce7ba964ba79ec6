//! Audio system using Web Audio API
//!
//! Procedurally generated cues - no external files needed!

use std::collections::HashMap;

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::Settings;
use crate::sim::SoundCue;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    /// Gain applied to every cue, fixed for the page load (0 when muted)
    volume: f32,
    /// Oscillators still sounding for each cue, stopped on re-trigger
    voices: HashMap<SoundCue, Vec<OscillatorNode>>,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: settings.effective_volume(),
            voices: HashMap::new(),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Play a cue, cutting off the previous instance of the same cue
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = self.ctx.clone() else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        if let Some(previous) = self.voices.remove(&cue) {
            for osc in previous {
                osc.stop_with_when(0.0).ok();
            }
        }

        let voices = match cue {
            SoundCue::Drop => self.play_drop(&ctx, vol),
            SoundCue::Error => self.play_error(&ctx, vol),
            SoundCue::GameOver => self.play_game_over(&ctx, vol),
        };
        self.voices.insert(cue, voices);
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Block lands - short wooden thump
    fn play_drop(&self, ctx: &AudioContext, vol: f32) -> Vec<OscillatorNode> {
        let mut voices = Vec::new();
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.6, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(220.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(90.0, t + 0.1)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
            voices.push(osc);
        }

        // Click on contact
        if let Some((osc, gain)) = self.create_osc(ctx, 1200.0, OscillatorType::Triangle) {
            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.03)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.04).ok();
            voices.push(osc);
        }

        voices
    }

    /// Miss - harsh descending buzz
    fn play_error(&self, ctx: &AudioContext, vol: f32) -> Vec<OscillatorNode> {
        let mut voices = Vec::new();
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.frequency().set_value_at_time(180.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(70.0, t + 0.3)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.32).ok();
            voices.push(osc);
        }

        voices
    }

    /// Game over - three falling notes
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) -> Vec<OscillatorNode> {
        let mut voices = Vec::new();
        let t = ctx.current_time();
        let notes = [392.0, 330.0, 262.0]; // G4, E4, C4

        for (i, freq) in notes.iter().enumerate() {
            let start = t + i as f64 * 0.18;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain().set_value_at_time(vol * 0.4, start).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + 0.35)
                    .ok();
                osc.start_with_when(start).ok();
                osc.stop_with_when(start + 0.4).ok();
                voices.push(osc);
            }
        }

        voices
    }
}
