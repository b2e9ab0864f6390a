//! Player controller: one update per frame, driven by held keys.

use super::types::*;
use crate::assets::SpriteId;
use crate::core::constants::*;
use crate::input::HeldKeys;

/// Advance one player by `delta` normalized frames.
///
/// Transitions run in a fixed order: start jump, advance jump (with
/// fast-fall and crouch latch), crouch/stand, animation, then derive the
/// box and sprite. Dead players are frozen.
pub fn update_player(player: &mut Player, keys: &HeldKeys, delta: f64) {
    if player.is_dead {
        return;
    }

    let up_held = keys.is_held(player.controls.up);
    let down_held = keys.is_held(player.controls.down);

    // 1. Start a jump
    if !player.is_jumping && up_held {
        player.is_jumping = true;
        player.fast_falling = false;
        player.jump_frame = 0.0;
    }

    // 2. Advance the jump arc
    if player.is_jumping {
        if down_held {
            player.fast_falling = true;
            player.wants_to_crouch = true;
        }

        let rate = if player.fast_falling {
            FAST_FALL_RATE
        } else {
            1.0
        };
        player.jump_frame += rate * delta;
        player.jump_height = jump_height_at(player.jump_frame);

        if player.jump_frame >= JUMP_PERIOD {
            player.is_jumping = false;
            player.jump_height = 0.0;

            if player.wants_to_crouch {
                player.is_bending = true;
            }
        }
    }

    // 3. Crouch / stand
    if !player.is_jumping && down_held {
        player.is_bending = true;
    } else if !down_held {
        player.is_bending = false;
        player.wants_to_crouch = false;
        player.fast_falling = false;
    }

    // 4. Two-frame run/crouch cycle
    player.frame_tick += delta;
    if player.frame_tick >= ANIM_TICKS_PER_FRAME {
        player.frame = (player.frame + 1) % RUN_ANIM_FRAMES;
        player.frame_tick = 0.0;
    }

    // 5. Box and sprite
    player.height = if player.is_bending {
        CROUCHING_HEIGHT
    } else {
        STANDING_HEIGHT
    };
    player.y = PLAYER_BASELINE_Y + (STANDING_HEIGHT - player.height) - player.jump_height;
    player.sprite = if player.is_bending {
        SpriteId::PlayerDown(player.frame)
    } else {
        SpriteId::PlayerRun(player.frame)
    };
}

/// Update every live player.
pub fn update_players(players: &mut [Player], keys: &HeldKeys, delta: f64) {
    for player in players.iter_mut().filter(|p| !p.is_dead) {
        update_player(player, keys, delta);
    }
}
