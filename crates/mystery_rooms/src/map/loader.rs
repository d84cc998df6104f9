//! TMX document to [`TileMap`].

use std::path::PathBuf;

use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use mystery_assets::resource::{ResourceError, ResourceManager};
use thiserror::Error;
use tiled::LayerType;

use super::layer::{Layer, build_layer};
use super::objects::{MapObject, MapObjectKind, parse_object};

#[derive(Debug, Error)]
pub enum MapLoadError {
    #[error("No map for room '{name}' at {}", .path.display())]
    MissingMap { name: String, path: PathBuf },

    #[error("Failed to load map: {0}")]
    Tiled(#[from] tiled::Error),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error("Infinite maps are not supported: {0}")]
    InfiniteMap(String),

    #[error("Layer name '{name}' is not of the form <group>_<order>")]
    MalformedLayerName { name: String },

    #[error("Layer '{layer}' names unknown render group '{group}'")]
    UnknownRenderGroup { layer: String, group: String },

    #[error("Tile {tile_id} of tileset '{tileset}' has no image")]
    MissingTileImage { tileset: String, tile_id: u32 },

    #[error("{object_type} object {object_id} has no '{property}' property")]
    MissingProperty {
        object_id: u32,
        object_type: &'static str,
        property: &'static str,
    },

    #[error("{object_type} object {object_id} must be a {expected}")]
    InvalidObjectShape {
        object_id: u32,
        object_type: &'static str,
        expected: &'static str,
    },

    #[error("Room '{room}' has no '{spawn}' spawn point")]
    MissingSpawnPoint { room: String, spawn: String },
}

/// A parsed room map: tile layers in document order plus the recognized
/// objects of the object layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TileMap {
    pub layers: Vec<Layer>,
    pub objects: Vec<MapObject>,
    /// Size in tiles
    pub size: UVec2,
    /// Tile size in pixels
    pub tile_size: UVec2,
}

impl TileMap {
    /// Convert a parsed Tiled map.
    ///
    /// Group layers are flattened. Hidden tile layers are skipped, but the
    /// layer named `objects_layer` is read even when hidden, since collision
    /// geometry is usually kept out of sight in the editor.
    pub fn from_tiled(map: &tiled::Map, objects_layer: &str) -> Result<Self, MapLoadError> {
        let size = UVec2::new(map.width, map.height);
        let tile_size = UVec2::new(map.tile_width, map.tile_height);
        let pixel_height = (size.y * tile_size.y) as f32;

        let mut tile_map = TileMap {
            layers: Vec::new(),
            objects: Vec::new(),
            size,
            tile_size,
        };

        let mut collector = Collector {
            objects_layer,
            pixel_height,
            tile_map: &mut tile_map,
        };
        for layer in map.layers() {
            collector.collect(&layer, true)?;
        }

        Ok(tile_map)
    }

    /// Layers sorted by `(group, order)`. Ties keep document order.
    pub fn draw_order(&self) -> Vec<&Layer> {
        let mut layers: Vec<&Layer> = self.layers.iter().collect();
        layers.sort_by_key(|l| l.key);
        layers
    }

    /// Owned variant of [`draw_order`](Self::draw_order).
    pub fn into_draw_order(self) -> Vec<Layer> {
        let mut layers = self.layers;
        layers.sort_by_key(|l| l.key);
        layers
    }

    pub fn collision_polygons(&self) -> impl Iterator<Item = &[Vec2]> {
        self.objects.iter().filter_map(|o| match &o.kind {
            MapObjectKind::CollisionPolygon { points } => Some(points.as_slice()),
            MapObjectKind::SpawnPoint { .. } => None,
        })
    }

    /// Spawn points by name. A later object with the same name replaces an
    /// earlier one.
    pub fn spawn_points(&self) -> HashMap<String, Vec2> {
        let mut spawns = HashMap::default();
        for object in &self.objects {
            if let MapObjectKind::SpawnPoint { name, position } = &object.kind {
                spawns.insert(name.clone(), *position);
            }
        }
        spawns
    }

    pub fn pixel_size(&self) -> UVec2 {
        self.size * self.tile_size
    }
}

struct Collector<'a> {
    objects_layer: &'a str,
    pixel_height: f32,
    tile_map: &'a mut TileMap,
}

impl Collector<'_> {
    fn collect(&mut self, layer: &tiled::Layer, parent_visible: bool) -> Result<(), MapLoadError> {
        let visible = parent_visible && layer.visible;

        match layer.layer_type() {
            LayerType::Tiles(_) => {
                if !visible {
                    debug!("Skipping hidden layer '{}'", layer.name);
                    return Ok(());
                }
                let built = build_layer(layer, self.tile_map.size, self.tile_map.tile_size)?;
                self.tile_map.layers.extend(built);
            }
            LayerType::Objects(object_layer) => {
                if layer.name != self.objects_layer {
                    debug!("Skipping object layer '{}'", layer.name);
                    return Ok(());
                }
                for object in object_layer.objects() {
                    if let Some(parsed) = parse_object(&object, self.pixel_height)? {
                        self.tile_map.objects.push(parsed);
                    }
                }
            }
            LayerType::Group(group) => {
                for child in group.layers() {
                    self.collect(&child, visible)?;
                }
            }
            LayerType::Image(_) => {
                debug!("Skipping image layer '{}'", layer.name);
            }
        }

        Ok(())
    }
}

/// Load and parse the map for `room`.
///
/// The document is read fresh on every call.
pub fn load_tile_map(
    resources: &ResourceManager,
    room: &str,
    objects_layer: &str,
) -> Result<TileMap, MapLoadError> {
    let path = resources.map_path(room);
    resources.asset_path(&path)?;

    if !path.is_file() {
        return Err(MapLoadError::MissingMap {
            name: room.to_string(),
            path,
        });
    }

    let map = resources.load_tmx_map(&path)?;
    if map.infinite() {
        return Err(MapLoadError::InfiniteMap(room.to_string()));
    }

    let tile_map = TileMap::from_tiled(&map, objects_layer)?;
    debug!(
        "Parsed room '{}': {} layers, {} objects",
        room,
        tile_map.layers.len(),
        tile_map.objects.len()
    );
    Ok(tile_map)
}
