//! Grounded state, walking, and jumping.
//!
//! Jumps are honoured on the tick they are pressed or while the jump buffer
//! is still running, provided the player is grounded or left the ground no
//! more than `coyote_time` ago.

use ascent_core::collision::CollisionOracle;

use crate::config::MovementConfig;
use crate::input::PlayerInput;
use crate::physics::probe_grounded;
use crate::state::{Facing, PlayerState, WallSide};

/// Probe for ground and refill resources on contact. Returns the probe result.
///
/// Dash charges are not refilled while a dash is still in flight, so a
/// dash started on the ground keeps `dashes_left == 0` until it ends.
pub fn update_grounded(
    player: &mut PlayerState,
    config: &MovementConfig,
    walls: &impl CollisionOracle,
    dt: f32,
) -> bool {
    let grounded = probe_grounded(player, config, walls);
    player.grounded = grounded;

    if grounded {
        player.time_since_ground = 0.0;
        player.jumps_left = config.jump.max_jumps;
        if !player.is_dashing() {
            player.dashes_left = config.dash.max_dashes;
        }
        player.stamina = config.climb.max_stamina;
        player.on_wall = false;
        player.wall_side = WallSide::None;
    } else {
        player.time_since_ground += dt;
    }
    grounded
}

/// Set walking velocity from held input. Dashing and climbing both pin it to zero.
pub fn apply_walk(player: &mut PlayerState, input: &PlayerInput, config: &MovementConfig) {
    if player.is_dashing() || player.on_wall {
        player.vx = 0.0;
        return;
    }

    let dir = input.horizontal();
    player.vx = dir * config.physics.move_speed;
    if dir > 0.0 {
        player.facing = Facing::Right;
    } else if dir < 0.0 {
        player.facing = Facing::Left;
    }
}

/// Run the jump buffer and execute a jump if one is due. Returns `true` if
/// the player jumped this tick.
pub fn update_jump(
    player: &mut PlayerState,
    input: &PlayerInput,
    config: &MovementConfig,
    dt: f32,
) -> bool {
    let jump = &config.jump;

    // Variable height: letting go early cuts the rise short.
    if player.jump_was_held && !input.jump_held && player.vy > 0.0 {
        player.vy *= jump.release_damping;
    }
    player.jump_was_held = input.jump_held || input.jump_pressed;

    if input.jump_pressed {
        player.jump_buffer_timer = jump.buffer;
    }
    if player.jump_buffer_timer > 0.0 {
        player.jump_buffer_timer = (player.jump_buffer_timer - dt).max(0.0);
    }

    let requested = input.jump_pressed || player.jump_buffer_timer > 0.0;
    let in_reach = player.grounded || player.time_since_ground <= jump.coyote_time;
    if requested && in_reach && player.jumps_left > 0 {
        player.vy = jump.jump_speed;
        player.jumps_left -= 1;
        player.jump_buffer_timer = 0.0;
        return true;
    }
    false
}
