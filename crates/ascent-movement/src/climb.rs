//! Wall grabbing and climbing.
//!
//! A player can hang on a wall while airborne, wall-adjacent, holding climb,
//! and with stamina left. Stamina drains while hanging and refills on the
//! ground.

use ascent_core::collision::{CollisionOracle, Layer};

use crate::config::MovementConfig;
use crate::input::PlayerInput;
use crate::physics::blocked;
use crate::state::{PlayerState, WallSide};

/// Which side, if any, has a wall within `wall_probe` of the player.
///
/// Grounded players are never wall-adjacent, and a player squeezed between
/// walls on both sides has no single wall to hang on.
pub fn wall_adjacency(
    player: &PlayerState,
    config: &MovementConfig,
    walls: &impl CollisionOracle,
) -> WallSide {
    if player.grounded {
        return WallSide::None;
    }
    let shape = player.shape(config);
    let reach = config.climb.wall_probe;
    let hit_left = blocked(&shape.offset(-reach, 0.0), walls);
    let hit_right = blocked(&shape.offset(reach, 0.0), walls);
    match (hit_left, hit_right) {
        (true, false) => WallSide::Left,
        (false, true) => WallSide::Right,
        _ => WallSide::None,
    }
}

/// Grab or release the wall for this tick. Returns `true` on the tick a
/// grab begins.
pub fn update_wall_grab(
    player: &mut PlayerState,
    input: &PlayerInput,
    config: &MovementConfig,
    walls: &impl CollisionOracle,
) -> bool {
    let side = wall_adjacency(player, config, walls);
    if input.climb_held && side != WallSide::None && player.stamina > 0.0 && !player.grounded {
        let started = !player.on_wall;
        player.on_wall = true;
        player.wall_side = side;
        snap_to_wall(player, config, walls);
        if started {
            tracing::trace!(?side, "wall grabbed");
        }
        started
    } else {
        player.on_wall = false;
        player.wall_side = WallSide::None;
        false
    }
}

/// Pull the player flush against the nearest wall face on `wall_side`,
/// leaving `snap_gap` so the adjacency probe keeps hitting next tick.
fn snap_to_wall(player: &mut PlayerState, config: &MovementConfig, walls: &impl CollisionOracle) {
    let climb = &config.climb;
    let mut shape = player.shape(config);
    let probe = shape.offset(player.wall_side.sign() * climb.wall_probe, 0.0);
    let hits = walls.colliding(&probe, Layer::Walls);

    match player.wall_side {
        WallSide::Left => {
            let face = hits
                .iter()
                .map(|c| c.bounds.right())
                .filter(|&r| r < shape.x && r > shape.left() - climb.snap_reach)
                .reduce(f32::max);
            if let Some(face) = face {
                shape.set_left(face + climb.snap_gap);
            }
        },
        WallSide::Right => {
            let face = hits
                .iter()
                .map(|c| c.bounds.left())
                .filter(|&l| l > shape.x && l < shape.right() + climb.snap_reach)
                .reduce(f32::min);
            if let Some(face) = face {
                shape.set_right(face - climb.snap_gap);
            }
        },
        WallSide::None => return,
    }
    player.set_shape(&shape);
}

/// Move along the wall, drain stamina, and push out of any ledge the move
/// ran into. Drops off the wall once stamina hits zero.
pub fn climb(
    player: &mut PlayerState,
    input: &PlayerInput,
    config: &MovementConfig,
    walls: &impl CollisionOracle,
    dt: f32,
) {
    let climb = &config.climb;
    player.vy = 0.0;

    let (dir, drain) = if input.up {
        (1.0, climb.up_drain)
    } else if input.down {
        (-1.0, climb.down_drain)
    } else {
        (0.0, climb.idle_drain)
    };

    player.y += dir * climb.climb_speed;
    player.stamina = (player.stamina - drain * dt).max(0.0);

    if dir != 0.0 {
        push_out_vertically(player, config, walls, -dir);
    }

    // Out of stamina: let go now rather than on the next grab check.
    if player.stamina <= 0.0 {
        player.on_wall = false;
        player.wall_side = WallSide::None;
    }
}

/// Step back along the vertical axis in `nudge_step` increments until clear,
/// giving up after `nudge_limit` steps.
fn push_out_vertically(
    player: &mut PlayerState,
    config: &MovementConfig,
    walls: &impl CollisionOracle,
    dir: f32,
) {
    let climb = &config.climb;
    let mut shape = player.shape(config);
    let mut steps = 0;
    while blocked(&shape, walls) {
        if steps == climb.nudge_limit {
            tracing::debug!(x = shape.x, y = shape.y, "climb push-out hit its step limit");
            break;
        }
        shape = shape.offset(0.0, dir * climb.nudge_step);
        steps += 1;
    }
    player.set_shape(&shape);
}

/// Refill stamina at the ground regen rate.
pub fn regenerate(player: &mut PlayerState, config: &MovementConfig, dt: f32) {
    let climb = &config.climb;
    player.stamina = (player.stamina + climb.ground_regen * dt).min(climb.max_stamina);
}
