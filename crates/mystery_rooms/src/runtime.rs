//! The room scene controller.

use bevy::prelude::*;
use mystery_assets::i18n::Localization;

use crate::camera::view_translation;
use crate::map::MapLoadError;
use crate::room::{Character, Room};
use crate::scene::{SceneContext, SceneLifecycle};

/// Owns the active room and the character.
///
/// The character is held by the active room, or parked here while no room
/// is active. Rooms are swapped only after the new one has loaded, so a
/// failed transition leaves the player where they were.
#[derive(Resource, Debug)]
pub struct RoomRuntime {
    active: Option<Room>,
    parked: Option<Character>,
    viewport: Vec2,
    generation: u64,
}

impl Default for RoomRuntime {
    fn default() -> Self {
        Self {
            active: None,
            parked: Some(Character::default()),
            viewport: Vec2::new(1280.0, 720.0),
            generation: 0,
        }
    }
}

impl RoomRuntime {
    /// Enter the room called `name`, returning the new generation.
    ///
    /// Entering the active room again reloads it in place.
    pub fn enter_room(&mut self, name: &str, ctx: &SceneContext<'_>) -> Result<u64, MapLoadError> {
        let reenter = self.active.as_ref().is_some_and(|room| room.name() == name);

        if reenter {
            if let Some(room) = self.active.as_mut() {
                room.on_enter(ctx)?;
            }
        } else {
            let mut room = Room::new(name);
            room.on_resize(self.viewport);
            room.on_enter(ctx)?;

            let character = match self.active.take() {
                Some(mut previous) => {
                    previous.on_leave();
                    previous.take_character()
                }
                None => self.parked.take(),
            };
            if let Some(character) = character {
                room.admit(character);
            }
            self.active = Some(room);
        }

        self.generation += 1;
        info!("Entered room '{}' (generation {})", name, self.generation);
        Ok(self.generation)
    }

    /// Unload the active room and park the character. Returns the room's
    /// name, if there was one.
    pub fn leave_room(&mut self) -> Option<String> {
        let mut room = self.active.take()?;
        room.on_leave();
        if let Some(character) = room.take_character() {
            self.parked = Some(character);
        }
        info!("Left room '{}'", room.name());
        Some(room.name().to_string())
    }

    pub fn allows_move(&self, position: Vec2) -> bool {
        self.active
            .as_ref()
            .is_some_and(|room| room.allows_move(position))
    }

    /// Move the character by `delta` if the active room allows it.
    pub fn try_move(&mut self, delta: Vec2) -> bool {
        self.active
            .as_mut()
            .is_some_and(|room| room.try_move(delta))
    }

    pub fn on_resize(&mut self, size: Vec2) {
        self.viewport = size;
        if let Some(room) = self.active.as_mut() {
            room.on_resize(size);
        }
    }

    pub fn on_language_change(&mut self, localization: &Localization) {
        if let Some(room) = self.active.as_mut() {
            room.on_language_change(localization);
        }
    }

    pub fn active(&self) -> Option<&Room> {
        self.active.as_ref()
    }

    /// The character, wherever it currently is.
    pub fn character(&self) -> Option<&Character> {
        self.active
            .as_ref()
            .and_then(Room::character)
            .or(self.parked.as_ref())
    }

    /// Number of successful enters so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Current view translation, or `None` without a loaded room holding
    /// the character.
    pub fn view_translation(&self, anchor: Vec2) -> Option<Vec2> {
        let room = self.active.as_ref().filter(|room| room.is_loaded())?;
        let character = room.character()?;
        Some(view_translation(self.viewport, character.position, anchor))
    }
}
