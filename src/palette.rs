//! Sky/floor colour palette and the day/night transition between tiers.

use crate::core::constants::{GRADIENT_STEP, GRADIENT_STEP_MS, SCORE_PER_GRADIENT_TIER};

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn from_u32(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Per-channel linear blend, rounded to the nearest integer.
    pub fn lerp(self, other: Rgb, factor: f64) -> Rgb {
        let factor = factor.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| -> u8 {
            (a as f64 + factor * (b as f64 - a as f64)).round() as u8
        };
        Rgb {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }
}

/// One palette stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub sky: Rgb,
    pub floor: Rgb,
}

const fn stage(sky: u32, floor: u32) -> Gradient {
    Gradient {
        sky: Rgb::from_u32(sky),
        floor: Rgb::from_u32(floor),
    }
}

/// Dawn, day, dusk and night, then special skies, then fantasy worlds.
pub const PALETTE: [Gradient; 30] = [
    stage(0xb4b4b4, 0xffffff),
    // Day cycle
    stage(0xb7d6c7, 0xffe2d1),
    stage(0xffc4a3, 0xffd8be),
    stage(0x87ceeb, 0xe8e8e8),
    stage(0x4a98d3, 0xc9e4f5),
    stage(0xf9c5a8, 0xf5dfb5),
    stage(0xff7e5f, 0xffa270),
    stage(0xfd5e53, 0xf9ad6a),
    stage(0x414a6b, 0x32323c),
    stage(0x2c3e50, 0x1e272e),
    // Special conditions
    stage(0x614385, 0x516395),
    stage(0x23074d, 0xcc5333),
    stage(0x544a7d, 0xffd452),
    stage(0x5f2c82, 0x49a09d),
    stage(0x2980b9, 0x6dd5fa),
    stage(0x5d4157, 0xa8caba),
    stage(0x4ac29a, 0xbdfff3),
    stage(0x0f2027, 0x2c5364),
    stage(0xee9ca7, 0xffdde1),
    stage(0x614385, 0x516395),
    // Fantasy
    stage(0xc33764, 0x1d2671),
    stage(0xf12711, 0xf5af19),
    stage(0x59c173, 0x5d26c1),
    stage(0xf953c6, 0xb91d73),
    stage(0x3494e6, 0xec6ead),
    stage(0x7f00ff, 0xe100ff),
    stage(0x00b09b, 0x96c93d),
    stage(0xff416c, 0xff4b2b),
    stage(0x654ea3, 0xeaafc8),
    stage(0x283c86, 0x45a247),
];

/// Palette index for a score: one tier per 30 points, wrapping.
pub fn tier_for_score(score: u64) -> usize {
    (score / SCORE_PER_GRADIENT_TIER) as usize % PALETTE.len()
}

/// Sky and floor colour for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub sky: Rgb,
    pub floor: Rgb,
}

/// Fades from the current palette tier to a target tier in fixed 16 ms
/// steps of 0.02, then locks onto the target.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientTransition {
    current: usize,
    target: usize,
    /// `1.0` = settled on `current`.
    progress: f64,
    pending_ms: f64,
}

impl Default for GradientTransition {
    fn default() -> Self {
        Self::new()
    }
}

impl GradientTransition {
    pub fn new() -> Self {
        Self {
            current: 0,
            target: 0,
            progress: 1.0,
            pending_ms: 0.0,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_transitioning(&self) -> bool {
        self.progress < 1.0
    }

    /// Start fading toward `tier`. Returns true if a new transition began.
    pub fn retarget(&mut self, tier: usize) -> bool {
        if tier == self.target {
            return false;
        }
        self.target = tier % PALETTE.len();
        self.progress = 0.0;
        self.pending_ms = 0.0;
        true
    }

    /// Feed real elapsed time.
    pub fn advance(&mut self, elapsed_ms: f64) {
        if !self.is_transitioning() {
            return;
        }

        self.pending_ms += elapsed_ms.max(0.0);
        while self.pending_ms >= GRADIENT_STEP_MS {
            self.pending_ms -= GRADIENT_STEP_MS;
            self.progress += GRADIENT_STEP;
            if self.progress >= 1.0 - 1e-9 {
                self.progress = 1.0;
                self.current = self.target;
                self.pending_ms = 0.0;
                break;
            }
        }
    }

    /// Post-interpolation colours.
    pub fn colors(&self) -> ColorPair {
        let from = PALETTE[self.current];
        if !self.is_transitioning() {
            return ColorPair {
                sky: from.sky,
                floor: from.floor,
            };
        }

        let to = PALETTE[self.target];
        ColorPair {
            sky: from.sky.lerp(to.sky, self.progress),
            floor: from.floor.lerp(to.floor, self.progress),
        }
    }
}
