use serde::{Deserialize, Serialize};

/// Input snapshot for one tick.
///
/// `jump_pressed` and `dash_requested` are edges: true only on the tick the
/// button went down. Everything else is held state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub dash_requested: bool,
    pub climb_held: bool,
}

impl PlayerInput {
    /// -1, 0 or +1. Opposing directions cancel.
    pub fn horizontal(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Raw button levels sampled from a device once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldButtons {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    pub dash: bool,
    pub climb: bool,
}

/// Turns consecutive [`HeldButtons`] samples into [`PlayerInput`] snapshots,
/// deriving the press edges for jump and dash.
#[derive(Debug, Clone, Default)]
pub struct InputEdges {
    previous: HeldButtons,
}

impl InputEdges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, held: HeldButtons) -> PlayerInput {
        let input = PlayerInput {
            left: held.left,
            right: held.right,
            up: held.up,
            down: held.down,
            jump_pressed: held.jump && !self.previous.jump,
            jump_held: held.jump,
            dash_requested: held.dash && !self.previous.dash,
            climb_held: held.climb,
        };
        self.previous = held;
        input
    }
}

/// Masks held buttons after a death so they read as released until the
/// player lets go and presses them again.
///
/// Dash is not tracked: `dash_requested` is already an edge, so every
/// request that reaches the gate is a fresh press.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputGate {
    suppressed: Suppressed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Suppressed {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    jump: bool,
    climb: bool,
}

impl InputGate {
    pub fn suppress_all(&mut self) {
        self.suppressed = Suppressed {
            left: true,
            right: true,
            up: true,
            down: true,
            jump: true,
            climb: true,
        };
    }

    pub fn is_suppressing(&self) -> bool {
        self.suppressed != Suppressed::default()
    }

    pub fn filter(&mut self, raw: &PlayerInput) -> PlayerInput {
        let s = &mut self.suppressed;
        // A press edge means the button went up and down again since the
        // last sample.
        if raw.jump_pressed {
            s.jump = false;
        }
        PlayerInput {
            left: gate(&mut s.left, raw.left),
            right: gate(&mut s.right, raw.right),
            up: gate(&mut s.up, raw.up),
            down: gate(&mut s.down, raw.down),
            jump_pressed: raw.jump_pressed,
            jump_held: gate(&mut s.jump, raw.jump_held),
            dash_requested: raw.dash_requested,
            climb_held: gate(&mut s.climb, raw.climb_held),
        }
    }
}

fn gate(suppressed: &mut bool, held: bool) -> bool {
    if *suppressed {
        if !held {
            *suppressed = false;
        }
        false
    } else {
        held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_cancels_opposites() {
        let both = PlayerInput {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(both.horizontal(), 0.0);
        let left = PlayerInput {
            left: true,
            ..Default::default()
        };
        assert_eq!(left.horizontal(), -1.0);
    }

    #[test]
    fn edges_fire_once_per_press() {
        let mut edges = InputEdges::new();
        let down = HeldButtons {
            jump: true,
            dash: true,
            ..Default::default()
        };

        let first = edges.next(down);
        assert!(first.jump_pressed && first.jump_held && first.dash_requested);

        let second = edges.next(down);
        assert!(!second.jump_pressed && second.jump_held && !second.dash_requested);

        edges.next(HeldButtons::default());
        assert!(edges.next(down).jump_pressed);
    }

    #[test]
    fn gate_holds_until_release() {
        let mut gate = InputGate::default();
        gate.suppress_all();
        let held = PlayerInput {
            right: true,
            climb_held: true,
            ..Default::default()
        };

        assert_eq!(gate.filter(&held), PlayerInput::default());
        assert_eq!(gate.filter(&held), PlayerInput::default());

        // Right released and pressed again, climb still held throughout.
        gate.filter(&PlayerInput {
            climb_held: true,
            ..Default::default()
        });
        let after = gate.filter(&held);
        assert!(after.right);
        assert!(!after.climb_held);
    }

    #[test]
    fn fresh_jump_press_lifts_suppression() {
        let mut gate = InputGate::default();
        gate.suppress_all();
        let press = PlayerInput {
            right: true,
            jump_pressed: true,
            jump_held: true,
            ..Default::default()
        };
        let out = gate.filter(&press);
        assert!(out.jump_pressed && out.jump_held);
        // Right was held straight through the death.
        assert!(!out.right);
        assert!(gate.is_suppressing());
    }

    #[test]
    fn dash_requests_pass_and_release_clears_everything() {
        let mut gate = InputGate::default();
        gate.suppress_all();
        let dash = PlayerInput {
            dash_requested: true,
            ..Default::default()
        };
        assert!(gate.filter(&dash).dash_requested);

        // Every tracked button was up on that sample.
        assert!(!gate.is_suppressing());
        assert_eq!(gate, InputGate::default());
    }
}
