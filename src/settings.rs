//! Player preferences
//!
//! Read from the page URL query string (`?volume=0.4&muted=1&seed=42`).
//! Nothing is written back; preferences last for one page load.

/// Player preferences
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all cues
    pub muted: bool,

    // === Debug ===
    /// Fixed seed for the spawn-side RNG (random when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.6,
            sfx_volume: 1.0,
            muted: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse preferences from a URL query string; unknown keys and bad values are ignored
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key.to_lowercase().as_str() {
                "volume" | "vol" => {
                    if let Ok(v) = value.parse::<f32>() {
                        settings.master_volume = v.clamp(0.0, 1.0);
                    }
                }
                "sfx" => {
                    if let Ok(v) = value.parse::<f32>() {
                        settings.sfx_volume = v.clamp(0.0, 1.0);
                    }
                }
                "muted" | "mute" => {
                    settings.muted = matches!(value, "" | "1" | "true" | "yes" | "on");
                }
                "seed" => {
                    settings.seed = value.parse().ok();
                }
                other => log::debug!("Ignoring unknown setting `{}`", other),
            }
        }

        settings
    }

    /// Effective cue volume (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Load settings from the current page URL (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let query = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let settings = Self::from_query(&query);
        log::info!("Settings: {:?}", settings);
        settings
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
