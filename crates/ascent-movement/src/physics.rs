use ascent_core::collision::{CollisionOracle, Layer};
use ascent_core::geometry::Aabb;

use crate::config::MovementConfig;
use crate::state::PlayerState;

/// Apply gravity, then move by the current velocity.
///
/// Axes are resolved separately, vertical first: a blocked axis snaps the
/// player flush against the nearest face it hit and zeroes that velocity
/// component.
pub fn integrate(player: &mut PlayerState, config: &MovementConfig, walls: &impl CollisionOracle) {
    player.vy -= config.physics.gravity;

    let mut shape = player.shape(config);

    shape = shape.offset(0.0, player.vy);
    let hits = walls.colliding(&shape, Layer::Walls);
    if !hits.is_empty() {
        if player.vy > 0.0 {
            // Hit head on a ceiling
            let ceiling = hits
                .iter()
                .map(|c| c.bounds.bottom())
                .fold(f32::INFINITY, f32::min);
            shape.set_top(ceiling);
        } else {
            // Landed
            let floor = hits
                .iter()
                .map(|c| c.bounds.top())
                .fold(f32::NEG_INFINITY, f32::max);
            shape.set_bottom(floor);
        }
        player.vy = 0.0;
    }

    if player.vx != 0.0 {
        shape = shape.offset(player.vx, 0.0);
        let hits = walls.colliding(&shape, Layer::Walls);
        if !hits.is_empty() {
            if player.vx > 0.0 {
                let face = hits
                    .iter()
                    .map(|c| c.bounds.left())
                    .fold(f32::INFINITY, f32::min);
                shape.set_right(face);
            } else {
                let face = hits
                    .iter()
                    .map(|c| c.bounds.right())
                    .fold(f32::NEG_INFINITY, f32::max);
                shape.set_left(face);
            }
            player.vx = 0.0;
        }
    }

    player.set_shape(&shape);
}

/// Whether the player's box, shifted down by the ground probe, rests on a wall.
pub fn probe_grounded(
    player: &PlayerState,
    config: &MovementConfig,
    walls: &impl CollisionOracle,
) -> bool {
    let probe = player.shape(config).offset(0.0, -config.physics.ground_probe);
    walls.overlaps(&probe, Layer::Walls)
}

/// Whether `shape` intersects solid geometry.
pub fn blocked(shape: &Aabb, walls: &impl CollisionOracle) -> bool {
    walls.overlaps(shape, Layer::Walls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ascent_core::test_helpers::{TILE, flat_floor, level_from_rows};

    fn player_on_floor(cfg: &MovementConfig, x: f32) -> PlayerState {
        PlayerState::new(x, TILE + cfg.physics.player_height / 2.0, cfg)
    }

    #[test]
    fn gravity_pulls_down() {
        let cfg = MovementConfig::default();
        let level = flat_floor(10);
        let mut player = PlayerState::new(40.0, 80.0, &cfg);

        integrate(&mut player, &cfg, &level);

        assert_eq!(player.vy, -cfg.physics.gravity);
        assert!(player.y < 80.0);
    }

    #[test]
    fn landing_snaps_to_floor_and_stops_fall() {
        let cfg = MovementConfig::default();
        let level = flat_floor(10);
        let mut player = PlayerState::new(40.0, 30.0, &cfg);

        for _ in 0..60 {
            integrate(&mut player, &cfg, &level);
        }

        let bottom = player.shape(&cfg).bottom();
        assert!((bottom - TILE).abs() < 1e-3, "bottom={bottom}");
        assert!(player.vy.abs() < f32::EPSILON);
    }

    #[test]
    fn ceiling_stops_upward_velocity() {
        let cfg = MovementConfig::default();
        // Ceiling block bottom at y = 3 * TILE.
        let level = level_from_rows(&["######", "......", "......", "######"]);
        let mut player = player_on_floor(&cfg, 20.0);
        player.vy = 12.0;

        integrate(&mut player, &cfg, &level);

        assert_eq!(player.vy, 0.0);
        assert!((player.shape(&cfg).top() - 3.0 * TILE).abs() < 1e-3);
    }

    #[test]
    fn walking_into_a_wall_stops_flush() {
        let cfg = MovementConfig::default();
        let level = level_from_rows(&["......#", "......#", "#######"]);
        let mut player = player_on_floor(&cfg, 30.0);

        for _ in 0..40 {
            player.vx = cfg.physics.move_speed;
            integrate(&mut player, &cfg, &level);
        }

        assert!((player.shape(&cfg).right() - 6.0 * TILE).abs() < 1e-3);
        assert_eq!(player.vx, 0.0);
    }

    #[test]
    fn resting_player_walks_freely_across_tile_seams() {
        let cfg = MovementConfig::default();
        let level = flat_floor(40);
        let mut player = player_on_floor(&cfg, 20.0);

        for _ in 0..50 {
            player.vx = cfg.physics.move_speed;
            integrate(&mut player, &cfg, &level);
        }

        assert!((player.x - (20.0 + 50.0 * cfg.physics.move_speed)).abs() < 1e-2);
        assert!(probe_grounded(&player, &cfg, &level));
    }

    #[test]
    fn grounded_probe_reaches_below_feet() {
        let cfg = MovementConfig::default();
        let level = flat_floor(10);
        let mut player = player_on_floor(&cfg, 40.0);
        assert!(probe_grounded(&player, &cfg, &level));

        player.y += cfg.physics.ground_probe - 1.0;
        assert!(probe_grounded(&player, &cfg, &level));

        player.y += 2.0;
        assert!(!probe_grounded(&player, &cfg, &level));
    }
}
