use serde::{Deserialize, Serialize};

use ascent_core::collision::ColliderId;

use crate::state::WallSide;

/// Things that happened during one `advance` call, for renderers, particle
/// emitters, and audio. Purely informational: nothing reads them back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MovementEvent {
    Jumped,
    WallGrabbed { side: WallSide },
    DashStarted { dx: f32, dy: f32 },
    DashEnded { cornered: bool },
    FruitCollected { id: ColliderId },
    /// Position at the moment of death, for the explosion effect.
    Died { x: f32, y: f32 },
    Respawned,
}
