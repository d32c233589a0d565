mod movement;
mod tic;

use bitflags::bitflags;

pub use movement::update_viewer;
pub use tic::{FixedStep, MAX_SUBSTEPS, SIM_FPS};

/// Logical inputs queried every update tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    TurnLeft,
    TurnRight,
    MoveForward,
    MoveBackward,
    WidenFov,
    NarrowFov,
}

/// Source of the current held/released state of each [`Key`].
pub trait Controls {
    fn is_held(&self, key: Key) -> bool;
}

bitflags! {
    /// Snapshot of held keys, filled by the host from its window events.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct HeldKeys: u8 {
        const TURN_LEFT     = 0x01;
        const TURN_RIGHT    = 0x02;
        const MOVE_FORWARD  = 0x04;
        const MOVE_BACKWARD = 0x08;
        const WIDEN_FOV     = 0x10;
        const NARROW_FOV    = 0x20;
    }
}

impl From<Key> for HeldKeys {
    fn from(key: Key) -> Self {
        match key {
            Key::TurnLeft => HeldKeys::TURN_LEFT,
            Key::TurnRight => HeldKeys::TURN_RIGHT,
            Key::MoveForward => HeldKeys::MOVE_FORWARD,
            Key::MoveBackward => HeldKeys::MOVE_BACKWARD,
            Key::WidenFov => HeldKeys::WIDEN_FOV,
            Key::NarrowFov => HeldKeys::NARROW_FOV,
        }
    }
}

impl Controls for HeldKeys {
    #[inline]
    fn is_held(&self, key: Key) -> bool {
        self.contains(key.into())
    }
}
