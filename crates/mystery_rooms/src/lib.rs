//! # `mystery_rooms`
//!
//! Layer 2 of the mystery room stack: rooms built from Tiled maps.
//!
//! - [`map`]: TMX document to layered [`map::TileMap`] plus room objects
//! - [`collision::CollisionIndex`]: point-in-polygon walkability checks
//! - [`room::Room`] / [`runtime::RoomRuntime`]: room lifecycle, spawn points,
//!   the character, and room-to-room transitions
//! - [`render`] / [`camera`]: one sprite per tile, character-following view
//!
//! Asset lookup goes through `mystery_assets`.
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use mystery_assets::prelude::*;
//! use mystery_rooms::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(MysteryAssetsPlugin::default())
//!         .add_plugins(MysteryRoomsPlugin::default())
//!         .add_systems(Startup, |mut commands: Commands| {
//!             commands.trigger(EnterRoom::new("start_tent"));
//!         })
//!         .run();
//! }
//! ```

pub mod camera;
pub mod collision;
pub mod config;
pub mod events;
pub mod map;
pub mod plugin;
pub mod render;
pub mod room;
pub mod runtime;
pub mod scene;

pub use config::{Footprint, RoomConfig};
pub use plugin::MysteryRoomsPlugin;

pub mod prelude {
    //! Common imports for `mystery_rooms` users.

    pub use crate::collision::{CollisionIndex, Polygon};
    pub use crate::config::{Footprint, RoomConfig};
    pub use crate::events::{
        EnterRoom, LeaveRoom, MoveCharacter, RoomEntered, RoomLeft, RoomLoadFailed,
    };
    pub use crate::map::{Layer, LayerKey, MapLoadError, PlacedTile, RenderGroup, TileMap};
    pub use crate::plugin::MysteryRoomsPlugin;
    pub use crate::render::{PlayerCharacter, RoomTile};
    pub use crate::room::{Character, LoadedRoom, Room, RoomState};
    pub use crate::runtime::RoomRuntime;
    pub use crate::scene::{SceneContext, SceneLifecycle};
}
