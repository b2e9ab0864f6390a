//! Player data structures.

use crate::assets::SpriteId;
use crate::core::constants::*;
use crate::input::KeyId;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A player's jump and crouch keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlBindings {
    pub up: KeyId,
    pub down: KeyId,
}

impl ControlBindings {
    /// W / S.
    pub fn player_one() -> Self {
        Self {
            up: KeyId::Char('w'),
            down: KeyId::Char('s'),
        }
    }

    /// Arrow Up / Arrow Down.
    pub fn player_two() -> Self {
        Self {
            up: KeyId::ArrowUp,
            down: KeyId::ArrowDown,
        }
    }

    pub fn defaults() -> [Self; PLAYER_COUNT] {
        [Self::player_one(), Self::player_two()]
    }

    pub fn uses(&self, key: KeyId) -> bool {
        self.up == key || self.down == key
    }

    /// "W/S" style label for the legend.
    pub fn label(&self) -> String {
        format!("{}/{}", self.up.label(), self.down.label())
    }
}

/// Observable state of a player. Derived from the flags; `Dead` wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Running,
    Jumping,
    Bending,
    Dead,
}

/// One runner.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f64,
    /// Top edge; always `PLAYER_BASELINE_Y + (STANDING_HEIGHT - height) - jump_height`.
    pub y: f64,
    pub width: f64,
    /// Either `STANDING_HEIGHT` or `CROUCHING_HEIGHT`.
    pub height: f64,
    pub sprite: SpriteId,
    pub controls: ControlBindings,

    // -- Animation --
    pub frame: usize,
    pub frame_tick: f64,

    // -- Flags --
    pub is_jumping: bool,
    pub is_bending: bool,
    pub is_dead: bool,
    pub fast_falling: bool,
    /// Crouch requested mid-air; applied on landing.
    pub wants_to_crouch: bool,

    // -- Jump progress --
    /// Phase along the arc in fixed-step units, `0..JUMP_PERIOD`.
    pub jump_frame: f64,
    pub jump_height: f64,
}

impl Player {
    /// A standing player at `x`, showing the idle sprite until the first update.
    pub fn new(x: f64, controls: ControlBindings) -> Self {
        Self {
            x,
            y: PLAYER_BASELINE_Y,
            width: PLAYER_WIDTH,
            height: STANDING_HEIGHT,
            sprite: SpriteId::PlayerIdle,
            controls,
            frame: 0,
            frame_tick: 0.0,
            is_jumping: false,
            is_bending: false,
            is_dead: false,
            fast_falling: false,
            wants_to_crouch: false,
            jump_frame: 0.0,
            jump_height: 0.0,
        }
    }

    /// The starting line-up, one player per binding at the fixed start columns.
    pub fn lineup(bindings: &[ControlBindings; PLAYER_COUNT]) -> Vec<Player> {
        PLAYER_START_X
            .iter()
            .zip(bindings.iter())
            .map(|(&x, &controls)| Player::new(x, controls))
            .collect()
    }

    pub fn state(&self) -> PlayerState {
        if self.is_dead {
            PlayerState::Dead
        } else if self.is_jumping {
            PlayerState::Jumping
        } else if self.is_bending {
            PlayerState::Bending
        } else {
            PlayerState::Running
        }
    }

    /// Mark dead and switch to the death sprite. Idempotent.
    pub fn kill(&mut self) {
        self.is_dead = true;
        self.sprite = SpriteId::PlayerDeath;
    }
}

/// Height of the jump arc at phase `jump_frame`.
///
/// `JUMP_PEAK * sin(pi * jump_frame / JUMP_PERIOD)`: zero at both ends,
/// peak at the half period.
pub fn jump_height_at(jump_frame: f64) -> f64 {
    JUMP_PEAK * (PI * jump_frame / JUMP_PERIOD).sin()
}
