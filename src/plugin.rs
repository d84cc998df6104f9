//! Unified plugin for mystery.

use bevy::prelude::*;

use mystery_assets::{AssetsConfig, MysteryAssetsPlugin};
use mystery_rooms::{MysteryRoomsPlugin, RoomConfig};

use crate::config::MysteryConfig;

/// Adds [`MysteryAssetsPlugin`] and [`MysteryRoomsPlugin`].
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use mystery::prelude::*;
///
/// let config = MysteryConfig::load("assets/mystery.json").unwrap_or_default();
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(MysteryPlugin::default().with_config(config))
///     .run();
/// ```
#[derive(Default)]
pub struct MysteryPlugin {
    /// Asset locations and startup language
    pub assets: AssetsConfig,

    /// Room loading, movement and camera configuration
    pub rooms: RoomConfig,
}

impl MysteryPlugin {
    /// Create with a loaded configuration file
    pub fn with_config(mut self, config: MysteryConfig) -> Self {
        self.assets = config.assets;
        self.rooms = config.rooms;
        self
    }

    /// Create with custom asset configuration
    pub fn with_assets(mut self, config: AssetsConfig) -> Self {
        self.assets = config;
        self
    }

    /// Create with custom room configuration
    pub fn with_rooms(mut self, config: RoomConfig) -> Self {
        self.rooms = config;
        self
    }
}

impl Plugin for MysteryPlugin {
    fn build(&self, app: &mut App) {
        // Layer 1: Assets
        app.add_plugins(MysteryAssetsPlugin::new(self.assets.clone()));

        // Layer 2: Rooms
        app.add_plugins(MysteryRoomsPlugin::new(self.rooms.clone()));

        info!("MysteryPlugin initialized");
    }
}
