use serde::{Deserialize, Serialize};

/// Gravity, subtracted from vertical velocity once per tick.
pub const GRAVITY: f32 = 0.9;
/// Horizontal walk speed (units/tick).
pub const MOVE_SPEED: f32 = 1.6;
/// Vertical velocity set by a jump (units/tick).
pub const JUMP_SPEED: f32 = 5.8;
/// Grace period after leaving ground during which a jump is honoured (seconds).
pub const COYOTE_TIME: f32 = 0.08;
/// How long a jump press is remembered before landing (seconds).
pub const JUMP_BUFFER: f32 = 0.12;
pub const MAX_JUMPS: u8 = 1;
/// Dash length (seconds).
pub const DASH_DURATION: f32 = 0.12;
/// Dash displacement rate (units/s).
pub const DASH_SPEED: f32 = 300.0;
/// Velocity magnitude applied when a dash ends (units/tick).
pub const DASH_POST_IMPULSE: f32 = 6.0;
pub const MAX_DASHES: u8 = 1;
/// Seconds of idle-free climbing available from a full bar.
pub const MAX_STAMINA: f32 = 5.0;
/// Climb displacement (units/tick).
pub const CLIMB_SPEED: f32 = 0.85;
pub const WALL_DASH_STAMINA_COST: f32 = 2.0;
/// Delay between death and respawn (seconds).
pub const RESPAWN_DELAY: f32 = 0.8;

/// Base body physics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub move_speed: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Downward probe distance for the grounded test.
    pub ground_probe: f32,
    /// Falling below this y counts as hazard contact. `None` disables it.
    pub kill_plane_y: Option<f32>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            move_speed: MOVE_SPEED,
            player_width: 11.2,
            player_height: 11.2,
            ground_probe: 6.0,
            kill_plane_y: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpConfig {
    pub jump_speed: f32,
    /// Factor applied to rising velocity when jump is released early.
    pub release_damping: f32,
    pub coyote_time: f32,
    pub buffer: f32,
    pub max_jumps: u8,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            jump_speed: JUMP_SPEED,
            release_damping: 0.45,
            coyote_time: COYOTE_TIME,
            buffer: JUMP_BUFFER,
            max_jumps: MAX_JUMPS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    pub duration: f32,
    pub speed: f32,
    pub post_impulse: f32,
    pub max_dashes: u8,
    /// Vertical component of the dash vector when kicking off a wall.
    pub wall_lift: f32,
    pub wall_stamina_cost: f32,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            duration: DASH_DURATION,
            speed: DASH_SPEED,
            post_impulse: DASH_POST_IMPULSE,
            max_dashes: MAX_DASHES,
            wall_lift: 0.35,
            wall_stamina_cost: WALL_DASH_STAMINA_COST,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimbConfig {
    pub max_stamina: f32,
    pub climb_speed: f32,
    /// Stamina drained per second while climbing up.
    pub up_drain: f32,
    /// Stamina drained per second while climbing down.
    pub down_drain: f32,
    /// Stamina drained per second while hanging still.
    pub idle_drain: f32,
    /// Stamina regained per second while grounded.
    pub ground_regen: f32,
    /// Horizontal probe distance for the wall-adjacency test.
    pub wall_probe: f32,
    /// How far past the player's edge a wall face may sit and still be snapped to.
    pub snap_reach: f32,
    /// Gap left between the player and the wall after snapping.
    pub snap_gap: f32,
    /// Step size when pushing the player out of a ledge after a climb move.
    pub nudge_step: f32,
    /// Upper bound on push-out steps per tick.
    pub nudge_limit: u32,
}

impl Default for ClimbConfig {
    fn default() -> Self {
        Self {
            max_stamina: MAX_STAMINA,
            climb_speed: CLIMB_SPEED,
            up_drain: 1.0,
            down_drain: 0.7,
            idle_drain: 0.4,
            ground_regen: 2.5,
            wall_probe: 1.2,
            snap_reach: 5.0,
            snap_gap: 0.5,
            nudge_step: 0.5,
            nudge_limit: 64,
        }
    }
}

/// Top-level movement tuning, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub physics: PhysicsConfig,
    pub jump: JumpConfig,
    pub dash: DashConfig,
    pub climb: ClimbConfig,
    pub respawn_delay: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            jump: JumpConfig::default(),
            dash: DashConfig::default(),
            climb: ClimbConfig::default(),
            respawn_delay: RESPAWN_DELAY,
        }
    }
}

impl MovementConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is missing
    /// or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("ASCENT_MOVEMENT_CONFIG")
            .unwrap_or_else(|_| "config/movement.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    MovementConfig::default()
                },
            },
            Err(_) => MovementConfig::default(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
