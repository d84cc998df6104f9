//! Sprites for the active room.
//!
//! Each placed tile becomes one `Sprite` entity tagged [`RoomTile`]. Render
//! groups map onto `Transform.z`, so Bevy's sprite sorting reproduces the
//! back, char, fore stacking.

use bevy::prelude::*;
use bevy::sprite::Anchor;
use mystery_assets::image::TextureCache;
use mystery_assets::resource::ResourceManager;

use crate::config::RoomConfig;
use crate::events::{RoomEntered, RoomLeft};
use crate::map::LayerKey;
use crate::runtime::RoomRuntime;

/// A tile sprite belonging to the active room.
#[derive(Component, Debug, Clone, Copy)]
#[require(Transform, Visibility)]
pub struct RoomTile {
    pub key: LayerKey,
}

/// Marks the entity that follows the character's position.
#[derive(Component, Debug, Default)]
#[require(Transform, Visibility)]
pub struct PlayerCharacter;

/// Observer that replaces the previous room's sprites with the new room's.
pub fn on_room_entered(
    trigger: On<RoomEntered>,
    runtime: Res<RoomRuntime>,
    config: Res<RoomConfig>,
    resources: Res<ResourceManager>,
    asset_server: Res<AssetServer>,
    mut textures: ResMut<TextureCache>,
    tiles: Query<Entity, With<RoomTile>>,
    mut commands: Commands,
) {
    let event = trigger.event();

    for entity in &tiles {
        commands.entity(entity).despawn();
    }

    let Some(loaded) = runtime.active().and_then(|room| room.loaded()) else {
        warn!("RoomEntered for '{}' but no room is loaded", event.room);
        return;
    };

    let mut spawned = 0usize;
    for layer in loaded.layers() {
        let z = config.layer_z(layer.key);

        for tile in &layer.tiles {
            let asset_path = match resources.asset_path(tile.image.path()) {
                Ok(path) => path,
                Err(e) => {
                    warn!("Skipping tile in layer '{}': {}", layer.name, e);
                    continue;
                }
            };

            commands.spawn((
                RoomTile { key: layer.key },
                Sprite {
                    image: textures.get_or_load(&asset_path, &asset_server),
                    rect: Some(tile.image.texture_rect()),
                    flip_x: tile.flip_x,
                    flip_y: tile.flip_y,
                    ..default()
                },
                Anchor(Vec2::new(-0.5, -0.5)),
                Transform::from_xyz(tile.position.x, tile.position.y, z),
            ));
            spawned += 1;
        }
    }

    debug!(
        "Spawned {} tile sprites for room '{}' ({} textures cached)",
        spawned,
        event.room,
        textures.len()
    );
}

/// Observer that clears the sprites of a room that was left.
pub fn on_room_left(
    trigger: On<RoomLeft>,
    tiles: Query<Entity, With<RoomTile>>,
    mut commands: Commands,
) {
    for entity in &tiles {
        commands.entity(entity).despawn();
    }
    debug!("Cleared sprites of room '{}'", trigger.event().room);
}

/// Keeps [`PlayerCharacter`] entities on the character's position.
pub fn sync_character_transform(
    runtime: Res<RoomRuntime>,
    config: Res<RoomConfig>,
    mut players: Query<&mut Transform, With<PlayerCharacter>>,
) {
    let Some(character) = runtime.character() else {
        return;
    };

    for mut transform in &mut players {
        transform.translation = character.position.extend(config.character_z());
    }
}
