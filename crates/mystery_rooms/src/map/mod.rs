//! Room map parsing.
//!
//! A room map is a TMX document whose tile layers are named
//! `{group}_{order}` (`back_0`, `char_1`, `fore_2`, ...) and whose object
//! layer carries `CollisionPolygon` and `SpawnPoint` objects.

pub mod layer;
pub mod loader;
pub mod objects;

pub use layer::{Layer, LayerKey, PlacedTile, RenderGroup};
pub use loader::{MapLoadError, TileMap, load_tile_map};
pub use objects::{MapObject, MapObjectKind};
