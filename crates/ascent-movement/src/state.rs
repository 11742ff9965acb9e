use serde::{Deserialize, Serialize};

use ascent_core::geometry::Aabb;

use crate::config::MovementConfig;

/// `time_since_ground` value for a player that has not touched ground yet.
const NEVER_GROUNDED: f32 = 999.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallSide {
    None,
    Left,
    Right,
}

impl WallSide {
    /// -1 for a wall on the left, +1 on the right, 0 for none.
    pub fn sign(self) -> f32 {
        match self {
            WallSide::None => 0.0,
            WallSide::Left => -1.0,
            WallSide::Right => 1.0,
        }
    }
}

/// Everything the movement core tracks for one player.
///
/// Velocities are per-tick displacements; timers are in seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerState {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub facing: Facing,
    /// Result of this tick's ground probe. Recomputed every tick.
    pub grounded: bool,
    pub on_wall: bool,
    pub wall_side: WallSide,
    pub stamina: f32,
    pub jumps_left: u8,
    pub dashes_left: u8,
    pub dash_time_left: f32,
    pub dash_dx: f32,
    pub dash_dy: f32,
    pub jump_buffer_timer: f32,
    pub time_since_ground: f32,
    pub is_dead: bool,
    pub respawn_timer: f32,
    /// Dash was in flight at the end of the previous tick.
    pub was_dashing: bool,
    /// Jump button was held on the previous tick.
    pub jump_was_held: bool,
}

impl PlayerState {
    pub fn new(spawn_x: f32, spawn_y: f32, config: &MovementConfig) -> Self {
        Self {
            x: spawn_x,
            y: spawn_y,
            vx: 0.0,
            vy: 0.0,
            facing: Facing::Right,
            grounded: false,
            on_wall: false,
            wall_side: WallSide::None,
            stamina: config.climb.max_stamina,
            jumps_left: config.jump.max_jumps,
            dashes_left: config.dash.max_dashes,
            dash_time_left: 0.0,
            dash_dx: 1.0,
            dash_dy: 0.0,
            jump_buffer_timer: 0.0,
            time_since_ground: NEVER_GROUNDED,
            is_dead: false,
            respawn_timer: 0.0,
            was_dashing: false,
            jump_was_held: false,
        }
    }

    /// Put the player back at the spawn point with every controller reset
    /// and all resources full.
    pub fn respawn(&mut self, spawn_x: f32, spawn_y: f32, config: &MovementConfig) {
        *self = Self::new(spawn_x, spawn_y, config);
    }

    pub fn is_dashing(&self) -> bool {
        self.dash_time_left > 0.0
    }

    /// Collision box at the current position.
    pub fn shape(&self, config: &MovementConfig) -> Aabb {
        Aabb::from_center(
            self.x,
            self.y,
            config.physics.player_width,
            config.physics.player_height,
        )
    }

    pub fn set_shape(&mut self, shape: &Aabb) {
        self.x = shape.x;
        self.y = shape.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_has_full_resources() {
        let cfg = MovementConfig::default();
        let p = PlayerState::new(48.0, 109.6, &cfg);
        assert_eq!(p.stamina, cfg.climb.max_stamina);
        assert_eq!(p.jumps_left, cfg.jump.max_jumps);
        assert_eq!(p.dashes_left, cfg.dash.max_dashes);
        assert!(!p.is_dead);
        assert!(!p.is_dashing());
        assert!(p.time_since_ground > cfg.jump.coyote_time);
    }

    #[test]
    fn respawn_resets_in_place() {
        let cfg = MovementConfig::default();
        let mut p = PlayerState::new(10.0, 20.0, &cfg);
        p.x = 300.0;
        p.vy = -4.0;
        p.stamina = 0.0;
        p.dashes_left = 0;
        p.dash_time_left = 0.05;
        p.on_wall = true;
        p.wall_side = WallSide::Left;
        p.is_dead = true;
        p.respawn_timer = 0.8;

        p.respawn(10.0, 20.0, &cfg);

        assert_eq!(p, PlayerState::new(10.0, 20.0, &cfg));
    }

    #[test]
    fn shape_is_centred_on_position() {
        let cfg = MovementConfig::default();
        let p = PlayerState::new(10.0, 20.0, &cfg);
        let s = p.shape(&cfg);
        assert_eq!(s.x, 10.0);
        assert!((s.bottom() - (20.0 - cfg.physics.player_height / 2.0)).abs() < 1e-5);
    }
}
