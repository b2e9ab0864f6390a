//! User configuration, read from `~/.dino-link/config.json`.

use super::constants::PLAYER_COUNT;
use crate::input::{INITIAL_HOLD_MS, REPEAT_HOLD_MS};
use crate::player::ControlBindings;
use crate::utils::persistence::{load_json_or_default, save_json};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;

pub const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_TITLE: &str = "->Dino Link<-";

/// Presentation and control settings. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Redraw rate; the simulation itself is fixed at 60 steps per second.
    pub present_fps: u32,
    pub controls: [ControlBindings; PLAYER_COUNT],
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub show_hitboxes: bool,
    pub title: String,
    /// Hold windows used when the terminal does not report key releases.
    pub key_hold_ms: KeyHold,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyHold {
    /// After the first press, long enough to cover the OS repeat delay.
    pub initial: f64,
    /// After each auto-repeat.
    pub repeat: f64,
}

impl Default for KeyHold {
    fn default() -> Self {
        Self {
            initial: INITIAL_HOLD_MS,
            repeat: REPEAT_HOLD_MS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            present_fps: 60,
            controls: ControlBindings::defaults(),
            seed: None,
            show_hitboxes: false,
            title: DEFAULT_TITLE.to_string(),
            key_hold_ms: KeyHold::default(),
        }
    }
}

impl Config {
    /// Load from the data directory; defaults when missing or invalid.
    pub fn load() -> Self {
        let config: Self = load_json_or_default(CONFIG_FILE);
        config.sanitized()
    }

    /// Write this config to the data directory.
    pub fn save(&self) -> io::Result<PathBuf> {
        save_json(CONFIG_FILE, self)
    }

    /// Clamp values that would stall or spin the host loop.
    pub fn sanitized(mut self) -> Self {
        self.present_fps = self.present_fps.clamp(10, 240);
        self.key_hold_ms.initial = positive_or(self.key_hold_ms.initial, INITIAL_HOLD_MS);
        self.key_hold_ms.repeat = positive_or(self.key_hold_ms.repeat, REPEAT_HOLD_MS);
        self
    }

    /// Milliseconds between presented frames.
    pub fn present_interval_ms(&self) -> f64 {
        1000.0 / self.present_fps as f64
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}
