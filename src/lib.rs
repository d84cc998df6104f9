//! # mystery
//!
//! Tiled rooms for a 2D mystery game, built on Bevy.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use mystery::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(MysteryPlugin::default())
//!         .add_systems(Startup, setup)
//!         .run();
//! }
//!
//! fn setup(mut commands: Commands) {
//!     commands.spawn(Camera2d);
//!     commands.spawn(PlayerCharacter);
//!     commands.trigger(EnterRoom::new("start_tent"));
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Layer 1** ([`assets`]): asset root, TMX documents, tileset image
//!   regions, textures, translations
//! - **Layer 2** ([`rooms`]): tile layers, collision polygons, spawn points,
//!   room transitions, sprites and camera
//!
//! [`MysteryPlugin`](plugin::MysteryPlugin) adds both. Configuration can be
//! read from a JSON file with [`MysteryConfig::load`](config::MysteryConfig::load).

pub mod config;
pub mod plugin;

// Re-export sub-crates for advanced usage
pub use mystery_assets as assets;
pub use mystery_rooms as rooms;

/// Unified prelude for mystery
pub mod prelude {
    pub use crate::config::{ConfigError, MysteryConfig};
    pub use crate::plugin::MysteryPlugin;
    pub use mystery_assets::prelude::*;
    pub use mystery_rooms::prelude::*;
}
