pub mod climb;
pub mod config;
pub mod dash;
pub mod events;
pub mod ground;
pub mod input;
pub mod lifecycle;
pub mod physics;
pub mod state;

use serde::{Deserialize, Serialize};

use ascent_core::collision::LevelGeometry;
use ascent_core::player::PlayerId;
use ascent_core::stats::StatsSink;

use config::MovementConfig;
use events::MovementEvent;
use input::{InputGate, PlayerInput};
use state::PlayerState;

#[derive(Debug)]
pub enum SnapshotError {
    Encode(rmp_serde::encode::Error),
    Decode(rmp_serde::decode::Error),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(e) => write!(f, "failed to encode snapshot: {e}"),
            Self::Decode(e) => write!(f, "failed to decode snapshot: {e}"),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encode(e) => Some(e),
            Self::Decode(e) => Some(e),
        }
    }
}

impl From<rmp_serde::encode::Error> for SnapshotError {
    fn from(e: rmp_serde::encode::Error) -> Self {
        Self::Encode(e)
    }
}

impl From<rmp_serde::decode::Error> for SnapshotError {
    fn from(e: rmp_serde::decode::Error) -> Self {
        Self::Decode(e)
    }
}

/// Serializable simulation state: everything `advance` reads besides the
/// level, the config, and the incoming input.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Snapshot {
    state: PlayerState,
    gate: InputGate,
}

/// Drives one player through a level, one fixed-order tick per `advance` call.
pub struct Simulation {
    player_id: PlayerId,
    config: MovementConfig,
    spawn_x: f32,
    spawn_y: f32,
    state: PlayerState,
    gate: InputGate,
}

impl Simulation {
    pub fn new(player_id: PlayerId, spawn_x: f32, spawn_y: f32, config: MovementConfig) -> Self {
        Self {
            player_id,
            state: PlayerState::new(spawn_x, spawn_y, &config),
            config,
            spawn_x,
            spawn_y,
            gate: InputGate::default(),
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub fn spawn(&self) -> (f32, f32) {
        (self.spawn_x, self.spawn_y)
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Order within a tick:
    /// 1. dead: run the respawn timer and stop
    /// 2. collect touched fruit
    /// 3. hazard contact (may kill and stop)
    /// 4. ground probe, resource refill, wall grab
    /// 5. climb or regenerate, then walking velocity
    /// 6. jump buffer and jump
    /// 7. dash start
    /// 8. dash movement or exit impulse
    /// 9. gravity and velocity integration, unless climbing or dashing
    pub fn advance<L, S>(
        &mut self,
        dt: f32,
        input: &PlayerInput,
        level: &mut L,
        stats: &mut S,
    ) -> Vec<MovementEvent>
    where
        L: LevelGeometry,
        S: StatsSink + ?Sized,
    {
        let dt = sanitize_dt(dt);
        let cfg = &self.config;
        let player = &mut self.state;
        let mut events = Vec::new();

        if player.is_dead {
            self.gate.suppress_all();
            if lifecycle::tick_respawn(player, cfg, (self.spawn_x, self.spawn_y), dt) {
                tracing::debug!(player_id = self.player_id, "respawned");
                events.push(MovementEvent::Respawned);
            }
            return events;
        }

        let input = self.gate.filter(input);

        for id in lifecycle::collect_fruit(player, cfg, level) {
            stats.record_fruit_collected(self.player_id);
            events.push(MovementEvent::FruitCollected { id });
        }

        if lifecycle::touching_hazard(player, cfg, &*level) {
            lifecycle::kill(player);
            self.gate.suppress_all();
            stats.record_death(self.player_id);
            tracing::debug!(player_id = self.player_id, x = player.x, y = player.y, "died");
            events.push(MovementEvent::Died {
                x: player.x,
                y: player.y,
            });
            return events;
        }

        let grounded = ground::update_grounded(player, cfg, &*level, dt);
        if climb::update_wall_grab(player, &input, cfg, &*level) {
            events.push(MovementEvent::WallGrabbed {
                side: player.wall_side,
            });
        }

        let climbing = player.on_wall;
        if climbing {
            climb::climb(player, &input, cfg, &*level, dt);
        } else if grounded {
            climb::regenerate(player, cfg, dt);
        }
        ground::apply_walk(player, &input, cfg);

        if ground::update_jump(player, &input, cfg, dt) {
            events.push(MovementEvent::Jumped);
        }

        if let Some((dx, dy)) = dash::try_start_dash(player, &input, cfg) {
            events.push(MovementEvent::DashStarted { dx, dy });
        }

        let step = dash::advance_dash(player, cfg, &*level, dt);
        if step.ended {
            events.push(MovementEvent::DashEnded {
                cornered: step.cornered,
            });
        }

        if !climbing && !player.is_dashing() {
            physics::integrate(player, cfg, &*level);
        }

        events
    }

    /// Encode the mutable simulation state as MessagePack.
    pub fn snapshot(&self) -> Result<Vec<u8>, SnapshotError> {
        let snap = Snapshot {
            state: self.state.clone(),
            gate: self.gate.clone(),
        };
        Ok(rmp_serde::to_vec(&snap)?)
    }

    /// Restore state captured by [`Simulation::snapshot`]. On error the
    /// simulation is left untouched.
    pub fn restore(&mut self, bytes: &[u8]) -> Result<(), SnapshotError> {
        let snap: Snapshot = rmp_serde::from_slice(bytes)?;
        self.state = snap.state;
        self.gate = snap.gate;
        Ok(())
    }
}

/// Non-finite or negative frame times advance nothing.
fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}
