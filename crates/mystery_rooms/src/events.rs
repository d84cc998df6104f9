//! Room events.
//!
//! Requests ([`EnterRoom`], [`LeaveRoom`], [`MoveCharacter`]) are handled by
//! observers registered in `MysteryRoomsPlugin`; the remaining events report
//! what happened so rendering and gameplay can react.

use bevy::prelude::*;

/// Load the named room and move the character into it.
#[derive(Event, Debug, Clone)]
pub struct EnterRoom {
    pub room: String,
}

impl EnterRoom {
    pub fn new(room: impl Into<String>) -> Self {
        Self { room: room.into() }
    }
}

/// Unload the active room.
#[derive(Event, Debug, Clone, Default)]
pub struct LeaveRoom;

/// Move the character by `delta` world pixels if the destination is walkable.
#[derive(Event, Debug, Clone)]
pub struct MoveCharacter {
    pub delta: Vec2,
}

/// Fired after a room finished loading.
#[derive(Event, Debug, Clone)]
pub struct RoomEntered {
    pub room: String,
    /// Increments on every successful enter
    pub generation: u64,
}

/// Fired after the active room was unloaded.
#[derive(Event, Debug, Clone)]
pub struct RoomLeft {
    pub room: String,
}

/// Fired when entering a room failed. The previous room is still active.
#[derive(Event, Debug, Clone)]
pub struct RoomLoadFailed {
    pub room: String,
    pub error: String,
}
