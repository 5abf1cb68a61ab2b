//! Controller polling surface.
//!
//! Raw pad access lives outside the simulation; the core only sees the
//! [`InputSource`] trait and the per-frame [`PlayerInput`] snapshot built from it.

use serde::{Deserialize, Serialize};

use crate::{PlayerId, constants::MAX_PLAYERS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Jump,
}

/// Polled controller state, indexed by player slot.
pub trait InputSource {
    /// Horizontal stick axis in `[-1, 1]`.
    fn analog_x(&self, id: PlayerId) -> f32;
    /// Right (accelerate) trigger in `[0, 1]`.
    fn trigger_r(&self, id: PlayerId) -> f32;
    /// Left (decelerate) trigger in `[0, 1]`.
    fn trigger_l(&self, id: PlayerId) -> f32;
    fn button(&self, id: PlayerId, button: Button) -> bool;
    fn is_connected(&self, id: PlayerId) -> bool;
    /// Block until at least one controller is connected. Scene setup only.
    fn wait_for_controllers(&mut self) {}
}

/// One player's controls for one frame, clamped to their valid ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub turn: f32,
    pub accelerate: f32,
    pub decelerate: f32,
    pub jump: bool,
}

impl PlayerInput {
    pub fn poll<I: InputSource + ?Sized>(source: &I, id: PlayerId) -> Self {
        Self {
            turn: source.analog_x(id),
            accelerate: source.trigger_r(id),
            decelerate: source.trigger_l(id),
            jump: source.button(id, Button::Jump),
        }
        .clamped()
    }

    /// Clamp axes to their ranges; NaN axes read as centred.
    pub fn clamped(self) -> Self {
        let clamp = |v: f32, lo: f32, hi: f32| if v.is_nan() { 0.0 } else { v.clamp(lo, hi) };
        Self {
            turn: clamp(self.turn, -1.0, 1.0),
            accelerate: clamp(self.accelerate, 0.0, 1.0),
            decelerate: clamp(self.decelerate, 0.0, 1.0),
            jump: self.jump,
        }
    }
}

/// In-memory controllers: each slot is either disconnected or holds the
/// input it reports every frame until changed.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    pads: [Option<PlayerInput>; MAX_PLAYERS],
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect a controller in `id` with idle input.
    pub fn connect(&mut self, id: PlayerId) {
        self.pads[id] = Some(PlayerInput::default());
    }

    pub fn disconnect(&mut self, id: PlayerId) {
        self.pads[id] = None;
    }

    /// Set the input reported for `id`, connecting it if needed.
    pub fn set(&mut self, id: PlayerId, input: PlayerInput) {
        self.pads[id] = Some(input);
    }

    fn pad(&self, id: PlayerId) -> PlayerInput {
        self.pads[id].unwrap_or_default()
    }
}

impl InputSource for ScriptedInput {
    fn analog_x(&self, id: PlayerId) -> f32 {
        self.pad(id).turn
    }

    fn trigger_r(&self, id: PlayerId) -> f32 {
        self.pad(id).accelerate
    }

    fn trigger_l(&self, id: PlayerId) -> f32 {
        self.pad(id).decelerate
    }

    fn button(&self, id: PlayerId, button: Button) -> bool {
        match button {
            Button::Jump => self.pad(id).jump,
        }
    }

    fn is_connected(&self, id: PlayerId) -> bool {
        self.pads[id].is_some()
    }
}
