//! A single room: its loaded map, walkable area and the character in it.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use mystery_assets::resource::ResourceManager;

use crate::collision::{CollisionIndex, Polygon};
use crate::config::RoomConfig;
use crate::map::{Layer, MapLoadError, TileMap, load_tile_map};
use crate::scene::{SceneContext, SceneLifecycle};

/// The player-controlled character.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Character {
    /// Y-up world pixels
    pub position: Vec2,
    /// Name of the room the character is in
    pub room: Option<String>,
}

/// Everything a room needs while it is on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedRoom {
    layers: Vec<Layer>,
    collisions: CollisionIndex,
    spawn_points: HashMap<String, Vec2>,
    start: Vec2,
    pixel_size: UVec2,
}

impl LoadedRoom {
    /// Build from a parsed map.
    ///
    /// Fails if the map has no spawn point named `config.start_spawn`.
    pub fn build(room: &str, map: TileMap, config: &RoomConfig) -> Result<Self, MapLoadError> {
        let spawn_points = map.spawn_points();
        let Some(&start) = spawn_points.get(&config.start_spawn) else {
            return Err(MapLoadError::MissingSpawnPoint {
                room: room.to_string(),
                spawn: config.start_spawn.clone(),
            });
        };

        let collisions = CollisionIndex::with_polygons(
            config.footprint,
            map.collision_polygons().map(Polygon::new),
        );
        let pixel_size = map.pixel_size();

        Ok(Self {
            layers: map.into_draw_order(),
            collisions,
            spawn_points,
            start,
            pixel_size,
        })
    }

    /// Layers in draw order, bottom first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn collisions(&self) -> &CollisionIndex {
        &self.collisions
    }

    pub fn spawn_point(&self, name: &str) -> Option<Vec2> {
        self.spawn_points.get(name).copied()
    }

    pub fn spawn_points(&self) -> &HashMap<String, Vec2> {
        &self.spawn_points
    }

    /// Position of the start spawn point.
    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn pixel_size(&self) -> UVec2 {
        self.pixel_size
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RoomState {
    #[default]
    Unloaded,
    Loaded(LoadedRoom),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    name: String,
    state: RoomState,
    character: Option<Character>,
    viewport: Vec2,
}

impl Room {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: RoomState::Unloaded,
            character: None,
            viewport: Vec2::ZERO,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &RoomState {
        &self.state
    }

    pub fn loaded(&self) -> Option<&LoadedRoom> {
        match &self.state {
            RoomState::Loaded(loaded) => Some(loaded),
            RoomState::Unloaded => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded().is_some()
    }

    /// Load or reload the room's map and move the character to the start.
    ///
    /// On error the room keeps whatever state it had.
    pub fn enter(
        &mut self,
        resources: &ResourceManager,
        config: &RoomConfig,
    ) -> Result<(), MapLoadError> {
        let map = load_tile_map(resources, &self.name, &config.objects_layer)?;
        self.load_map(map, config)
    }

    /// Like [`enter`](Self::enter) with an already parsed map.
    pub fn load_map(&mut self, map: TileMap, config: &RoomConfig) -> Result<(), MapLoadError> {
        let loaded = LoadedRoom::build(&self.name, map, config)?;
        self.install(loaded);
        Ok(())
    }

    fn install(&mut self, loaded: LoadedRoom) {
        info!(
            "Room '{}' loaded: {} layers, {} collision polygons, {} spawn points",
            self.name,
            loaded.layers.len(),
            loaded.collisions.len(),
            loaded.spawn_points.len()
        );

        if let Some(character) = &mut self.character {
            character.position = loaded.start;
            character.room = Some(self.name.clone());
        }
        self.state = RoomState::Loaded(loaded);
    }

    /// Drop the loaded map. The character stays.
    pub fn leave(&mut self) {
        if self.is_loaded() {
            debug!("Room '{}' unloaded", self.name);
        }
        self.state = RoomState::Unloaded;
    }

    /// Put `character` into this room, at the start spawn if loaded.
    pub fn admit(&mut self, mut character: Character) {
        if let Some(loaded) = self.loaded() {
            character.position = loaded.start;
        }
        character.room = Some(self.name.clone());
        self.character = Some(character);
    }

    /// Remove the character from this room.
    pub fn take_character(&mut self) -> Option<Character> {
        self.character.take().map(|mut c| {
            c.room = None;
            c
        })
    }

    pub fn character(&self) -> Option<&Character> {
        self.character.as_ref()
    }

    /// Whether a character may stand at `position`. Always false while
    /// unloaded.
    pub fn allows_move(&self, position: Vec2) -> bool {
        self.loaded()
            .is_some_and(|loaded| loaded.collisions.allows_move(position))
    }

    /// Move the character by `delta` if the destination is walkable.
    pub fn try_move(&mut self, delta: Vec2) -> bool {
        let Some(candidate) = self.character.as_ref().map(|c| c.position + delta) else {
            return false;
        };
        if !self.allows_move(candidate) {
            return false;
        }
        if let Some(character) = &mut self.character {
            character.position = candidate;
        }
        true
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }
}

impl SceneLifecycle for Room {
    type Error = MapLoadError;

    fn on_enter(&mut self, ctx: &SceneContext<'_>) -> Result<(), Self::Error> {
        self.enter(ctx.resources, ctx.config)
    }

    fn on_leave(&mut self) {
        self.leave();
    }

    fn on_resize(&mut self, size: Vec2) {
        self.viewport = size;
    }
}
