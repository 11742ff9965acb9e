use ascent_core::collision::{ColliderId, CollisionOracle, Layer, LevelGeometry};

use crate::config::MovementConfig;
use crate::state::{PlayerState, WallSide};

/// Remove every collectible the player overlaps. Returns the removed ids.
pub fn collect_fruit(
    player: &PlayerState,
    config: &MovementConfig,
    level: &mut impl LevelGeometry,
) -> Vec<ColliderId> {
    let touched: Vec<ColliderId> = level
        .colliding(&player.shape(config), Layer::Collectibles)
        .iter()
        .map(|c| c.id)
        .collect();
    for &id in &touched {
        level.remove_collectible(id);
    }
    touched
}

/// Whether the player is touching a hazard or has fallen below the kill plane.
pub fn touching_hazard(
    player: &PlayerState,
    config: &MovementConfig,
    level: &impl CollisionOracle,
) -> bool {
    if let Some(kill_y) = config.physics.kill_plane_y
        && player.y < kill_y
    {
        return true;
    }
    level.overlaps(&player.shape(config), Layer::Hazards)
}

/// Alive -> Dead. The respawn timer starts from zero.
pub fn kill(player: &mut PlayerState) {
    player.is_dead = true;
    player.respawn_timer = 0.0;
    player.on_wall = false;
    player.wall_side = WallSide::None;
}

/// Run the respawn timer. Returns `true` on the tick the player respawns.
pub fn tick_respawn(
    player: &mut PlayerState,
    config: &MovementConfig,
    spawn: (f32, f32),
    dt: f32,
) -> bool {
    player.respawn_timer += dt;
    if player.respawn_timer >= config.respawn_delay {
        player.respawn(spawn.0, spawn.1, config);
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use ascent_core::collision::Level;
    use ascent_core::geometry::Aabb;

    #[test]
    fn fruit_is_removed_on_touch() {
        let cfg = MovementConfig::default();
        let mut level = Level::new(0.0, 0.0);
        let near = level.add(Layer::Collectibles, Aabb::from_center(2.0, 0.0, 8.0, 8.0));
        level.add(Layer::Collectibles, Aabb::from_center(200.0, 0.0, 8.0, 8.0));
        let p = PlayerState::new(0.0, 0.0, &cfg);

        assert_eq!(collect_fruit(&p, &cfg, &mut level), vec![near]);
        assert_eq!(level.count(Layer::Collectibles), 1);
        assert!(collect_fruit(&p, &cfg, &mut level).is_empty());
    }

    #[test]
    fn spikes_and_kill_plane_are_hazards() {
        let mut cfg = MovementConfig::default();
        let mut level = Level::new(0.0, 0.0);
        level.add(Layer::Hazards, Aabb::from_center(50.0, 0.0, 8.0, 8.0));

        let safe = PlayerState::new(0.0, 0.0, &cfg);
        assert!(!touching_hazard(&safe, &cfg, &level));

        let spiked = PlayerState::new(48.0, 0.0, &cfg);
        assert!(touching_hazard(&spiked, &cfg, &level));

        let fallen = PlayerState::new(0.0, -500.0, &cfg);
        assert!(!touching_hazard(&fallen, &cfg, &level));
        cfg.physics.kill_plane_y = Some(-100.0);
        assert!(touching_hazard(&fallen, &cfg, &level));
    }

    #[test]
    fn respawn_waits_for_delay() {
        let cfg = MovementConfig::default();
        let mut p = PlayerState::new(300.0, 40.0, &cfg);
        p.stamina = 0.0;
        p.dashes_left = 0;
        kill(&mut p);
        assert!(p.is_dead);

        assert!(!tick_respawn(&mut p, &cfg, (10.0, 20.0), cfg.respawn_delay / 2.0));
        assert!(p.is_dead);
        assert!(tick_respawn(&mut p, &cfg, (10.0, 20.0), cfg.respawn_delay / 2.0));

        assert!(!p.is_dead);
        assert_eq!((p.x, p.y), (10.0, 20.0));
        assert_eq!(p.respawn_timer, 0.0);
        assert_eq!(p.stamina, cfg.climb.max_stamina);
        assert_eq!(p.dashes_left, cfg.dash.max_dashes);
    }
}
