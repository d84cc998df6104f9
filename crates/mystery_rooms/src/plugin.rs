//! Plugin for `mystery_rooms`.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use mystery_assets::events::LanguageChanged;
use mystery_assets::i18n::Localization;
use mystery_assets::resource::ResourceManager;

use crate::camera::follow_character;
use crate::config::RoomConfig;
use crate::events::{EnterRoom, LeaveRoom, MoveCharacter, RoomEntered, RoomLeft, RoomLoadFailed};
use crate::render::{on_room_entered, on_room_left, sync_character_transform};
use crate::runtime::RoomRuntime;
use crate::scene::SceneContext;

/// Room loading, movement, sprites and camera.
///
/// Add after `MysteryAssetsPlugin`, which provides the `ResourceManager`,
/// `TextureCache` and `Localization` resources this plugin reads.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use mystery_assets::MysteryAssetsPlugin;
/// use mystery_rooms::{MysteryRoomsPlugin, RoomConfig};
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(MysteryAssetsPlugin::default())
///     .add_plugins(MysteryRoomsPlugin::new(
///         RoomConfig::default().with_initial_room("start_tent"),
///     ))
///     .run();
/// ```
#[derive(Default)]
pub struct MysteryRoomsPlugin {
    /// Configuration for rooms
    pub config: RoomConfig,
}

impl MysteryRoomsPlugin {
    /// Create plugin with custom configuration.
    pub fn new(config: RoomConfig) -> Self {
        Self { config }
    }
}

impl Plugin for MysteryRoomsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .init_resource::<RoomRuntime>();

        // Requests
        app.add_observer(on_enter_room)
            .add_observer(on_leave_room)
            .add_observer(on_move_character)
            .add_observer(on_language_changed);

        // Rendering
        app.add_observer(on_room_entered)
            .add_observer(on_room_left);

        app.add_systems(Startup, enter_initial_room)
            .add_systems(PreUpdate, track_viewport)
            .add_systems(
                Update,
                (sync_character_transform, follow_character).chain(),
            );

        info!("MysteryRoomsPlugin initialized");
    }
}

/// Observer that performs a room transition.
pub fn on_enter_room(
    trigger: On<EnterRoom>,
    resources: Res<ResourceManager>,
    config: Res<RoomConfig>,
    mut runtime: ResMut<RoomRuntime>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let ctx = SceneContext::new(&resources, &config);

    match runtime.enter_room(&event.room, &ctx) {
        Ok(generation) => {
            commands.trigger(RoomEntered {
                room: event.room.clone(),
                generation,
            });
        }
        Err(e) => {
            error!("Failed to enter room '{}': {}", event.room, e);
            commands.trigger(RoomLoadFailed {
                room: event.room.clone(),
                error: e.to_string(),
            });
        }
    }
}

pub fn on_leave_room(
    _trigger: On<LeaveRoom>,
    mut runtime: ResMut<RoomRuntime>,
    mut commands: Commands,
) {
    if let Some(room) = runtime.leave_room() {
        commands.trigger(RoomLeft { room });
    }
}

pub fn on_move_character(trigger: On<MoveCharacter>, mut runtime: ResMut<RoomRuntime>) {
    let delta = trigger.event().delta;
    if !runtime.try_move(delta) {
        debug!("Move by {:?} blocked", delta);
    }
}

pub fn on_language_changed(
    _trigger: On<LanguageChanged>,
    localization: Res<Localization>,
    mut runtime: ResMut<RoomRuntime>,
) {
    runtime.on_language_change(&localization);
}

fn enter_initial_room(config: Res<RoomConfig>, mut commands: Commands) {
    if let Some(room) = &config.initial_room {
        commands.trigger(EnterRoom::new(room.clone()));
    }
}

fn track_viewport(
    windows: Query<&Window, (With<PrimaryWindow>, Changed<Window>)>,
    mut runtime: ResMut<RoomRuntime>,
) {
    if let Ok(window) = windows.single() {
        runtime.on_resize(window.size());
    }
}
