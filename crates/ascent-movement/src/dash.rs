//! Dash: a single-charge, fixed-duration burst that moves the player
//! directly, bypassing velocity integration, then hands control back with a
//! velocity kick along the dash direction.

use ascent_core::collision::CollisionOracle;

use crate::config::MovementConfig;
use crate::input::PlayerInput;
use crate::physics::blocked;
use crate::state::{Facing, PlayerState, WallSide};

/// How the dash progressed during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashStep {
    /// The dash stopped this tick.
    pub ended: bool,
    /// It stopped because no axis-preserving rollback could clear a collision.
    pub cornered: bool,
}

/// Resolve the dash direction from held input and facing.
///
/// Pure vertical input wins, then pure horizontal input; anything else is a
/// diagonal (or straight ahead along facing) normalised to unit length.
pub fn resolve_direction(input: &PlayerInput, facing: Facing) -> (f32, f32) {
    let horizontal_held = input.left || input.right;
    let vertical_held = input.up || input.down;

    if input.up && !horizontal_held {
        return (0.0, 1.0);
    }
    if input.down && !horizontal_held {
        return (0.0, -1.0);
    }
    if input.right && !vertical_held {
        return (1.0, 0.0);
    }
    if input.left && !vertical_held {
        return (-1.0, 0.0);
    }

    let h = if input.right {
        1.0
    } else if input.left {
        -1.0
    } else {
        facing.sign()
    };
    let v = if input.up {
        1.0
    } else if input.down {
        -1.0
    } else {
        0.0
    };
    let len = (h * h + v * v).sqrt();
    if len > 0.0 {
        (h / len, v / len)
    } else {
        (facing.sign(), 0.0)
    }
}

/// Kick-off vector when dashing from a wall: away from it, with a slight lift.
/// The pair is used as-is, not normalised.
pub fn wall_kick_direction(side: WallSide, config: &MovementConfig) -> (f32, f32) {
    (-side.sign(), config.dash.wall_lift)
}

/// Start a dash if one was requested and a charge is available. Returns the
/// chosen direction.
pub fn try_start_dash(
    player: &mut PlayerState,
    input: &PlayerInput,
    config: &MovementConfig,
) -> Option<(f32, f32)> {
    if !input.dash_requested || player.dashes_left == 0 || player.is_dead || player.is_dashing() {
        return None;
    }

    let (dx, dy) = if player.on_wall {
        player.stamina = (player.stamina - config.dash.wall_stamina_cost).max(0.0);
        wall_kick_direction(player.wall_side, config)
    } else {
        resolve_direction(input, player.facing)
    };

    player.dash_dx = dx;
    player.dash_dy = dy;
    player.dash_time_left = config.dash.duration;
    player.dashes_left = 0;
    player.on_wall = false;
    player.wall_side = WallSide::None;
    tracing::debug!(dx, dy, "dash started");
    Some((dx, dy))
}

/// Advance an in-flight dash and apply the exit impulse.
///
/// Collision rollback is axis-separated: undo the horizontal step first,
/// then the vertical one; if the player still overlaps geometry the dash is
/// cut short.
pub fn advance_dash(
    player: &mut PlayerState,
    config: &MovementConfig,
    walls: &impl CollisionOracle,
    dt: f32,
) -> DashStep {
    let mut step = DashStep::default();

    if player.is_dashing() {
        player.dash_time_left = (player.dash_time_left - dt).max(0.0);

        let dist = config.dash.speed * dt;
        let (orig_x, orig_y) = (player.x, player.y);
        player.x += player.dash_dx * dist;
        player.y += player.dash_dy * dist;

        if blocked(&player.shape(config), walls) {
            player.x = orig_x;
            if blocked(&player.shape(config), walls) {
                player.y = orig_y;
                if blocked(&player.shape(config), walls) {
                    player.dash_time_left = 0.0;
                    step.cornered = true;
                    tracing::debug!(x = player.x, y = player.y, "dash cornered");
                }
            }
        }
        step.ended = !player.is_dashing();
    }

    if !player.is_dashing() && player.was_dashing {
        let impulse = config.dash.post_impulse;
        player.vx = player.dash_dx * impulse;
        player.vy = player.dash_dy * impulse;
    }
    player.was_dashing = player.is_dashing();
    step
}
