//! Value types shared by packet definitions and the reflective wrappers.

use std::fmt;

/// Which hand performed an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Hand {
    #[default]
    MainHand,
    OffHand,
}

impl Hand {
    pub fn id(self) -> i32 {
        match self {
            Hand::MainHand => 0,
            Hand::OffHand => 1,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(Hand::MainHand),
            1 => Some(Hand::OffHand),
            _ => None,
        }
    }

    /// Constant name used by host runtimes.
    pub fn name(self) -> &'static str {
        match self {
            Hand::MainHand => "MAIN_HAND",
            Hand::OffHand => "OFF_HAND",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "MAIN_HAND" => Some(Hand::MainHand),
            "OFF_HAND" => Some(Hand::OffHand),
            _ => None,
        }
    }
}

/// Kind of entity interaction, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntityUseAction {
    #[default]
    Interact,
    Attack,
    InteractAt,
}

impl EntityUseAction {
    pub fn name(self) -> &'static str {
        match self {
            EntityUseAction::Interact => "INTERACT",
            EntityUseAction::Attack => "ATTACK",
            EntityUseAction::InteractAt => "INTERACT_AT",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "INTERACT" => Some(EntityUseAction::Interact),
            "ATTACK" => Some(EntityUseAction::Attack),
            "INTERACT_AT" => Some(EntityUseAction::InteractAt),
            _ => None,
        }
    }
}

impl fmt::Display for EntityUseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Single-precision position, as carried in packets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3f {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Double-precision position, as held by host objects.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3d {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Connection intent declared in the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NextState {
    Status,
    Login,
    Transfer,
}

impl NextState {
    pub fn id(self) -> i32 {
        match self {
            NextState::Status => 1,
            NextState::Login => 2,
            NextState::Transfer => 3,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(NextState::Status),
            2 => Some(NextState::Login),
            3 => Some(NextState::Transfer),
            _ => None,
        }
    }
}
