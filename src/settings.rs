//! Simulation settings
//!
//! Tunables a frontend may want to override. Missing JSON fields fall back
//! to the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{SimError, SimResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Longest elapsed time fed to a single tick (seconds). Large frame
    /// gaps are clamped to this so fireballs can't skip through walls.
    pub max_step: f32,
    /// Grace period after the level is decided (seconds)
    pub finish_delay: f32,
    /// Seed for coin phases
    pub coin_seed: u64,

    // === Headless demo ===
    /// Frame time used by the demo driver (seconds)
    pub frame_time: f32,
    /// Frames the demo runs per level before giving up
    pub frames_per_level: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_step: DEFAULT_MAX_STEP,
            finish_delay: crate::sim::DEFAULT_FINISH_DELAY,
            coin_seed: DEFAULT_COIN_SEED,
            frame_time: FRAME_DT,
            frames_per_level: 600,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> SimResult<Self> {
        let settings: Self = serde_json::from_str(json).map_err(SimError::Settings)?;
        log::info!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    pub fn to_json(&self) -> SimResult<String> {
        serde_json::to_string_pretty(self).map_err(SimError::Settings)
    }

    /// Elapsed time actually simulated for a frame of `dt` seconds
    pub fn clamp_step(&self, dt: f32) -> f32 {
        dt.max(0.0).min(self.max_step)
    }
}
