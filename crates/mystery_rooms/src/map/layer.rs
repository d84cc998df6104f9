//! Tile layers and their render groups.

use std::fmt;

use bevy::prelude::*;
use mystery_assets::image::{ImageRegion, SourceRect, TilesetImage};
use tiled::LayerType;

use super::loader::MapLoadError;

/// Coarse draw bucket encoded in a layer's name.
///
/// Everything in `Back` draws below everything in `Char`, which draws below
/// everything in `Fore`. The character sprite lives in `Char`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RenderGroup {
    Back,
    Char,
    Fore,
}

impl RenderGroup {
    pub fn z(self) -> i32 {
        match self {
            RenderGroup::Back => 1,
            RenderGroup::Char => 2,
            RenderGroup::Fore => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RenderGroup::Back => "back",
            RenderGroup::Char => "char",
            RenderGroup::Fore => "fore",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "back" => Some(RenderGroup::Back),
            "char" => Some(RenderGroup::Char),
            "fore" => Some(RenderGroup::Fore),
            _ => None,
        }
    }
}

/// `(group, order)` parsed from a layer name such as `char_1`.
///
/// Ordering compares the group first, then the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerKey {
    pub group: RenderGroup,
    pub order: i32,
}

impl LayerKey {
    pub const fn new(group: RenderGroup, order: i32) -> Self {
        Self { group, order }
    }

    /// Parse `{group}_{order}`.
    pub fn parse(name: &str) -> Result<Self, MapLoadError> {
        let malformed = || MapLoadError::MalformedLayerName {
            name: name.to_string(),
        };

        let mut parts = name.split('_');
        let (Some(group), Some(order), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };

        let order: i32 = order.parse().map_err(|_| malformed())?;
        let group = RenderGroup::from_name(group).ok_or_else(|| MapLoadError::UnknownRenderGroup {
            layer: name.to_string(),
            group: group.to_string(),
        })?;

        Ok(Self { group, order })
    }
}

impl fmt::Display for LayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.group.name(), self.order)
    }
}

/// One tile ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedTile {
    pub image: ImageRegion,
    /// Bottom-left corner in Y-up world pixels
    pub position: Vec2,
    pub flip_x: bool,
    pub flip_y: bool,
    /// Anti-diagonal flip from the map. Sprites cannot express it, so it is
    /// kept here but not drawn.
    pub flip_diagonal: bool,
}

/// A parsed tile layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Name as written in the map document
    pub name: String,
    pub key: LayerKey,
    /// Tiles in row-major document order
    pub tiles: Vec<PlacedTile>,
}

/// Build a [`Layer`] from a Tiled tile layer.
///
/// Returns `Ok(None)` for layers that are not tile layers. `map_size` is
/// in tiles, `tile_size` in pixels.
pub fn build_layer(
    layer: &tiled::Layer,
    map_size: UVec2,
    tile_size: UVec2,
) -> Result<Option<Layer>, MapLoadError> {
    let LayerType::Tiles(tile_layer) = layer.layer_type() else {
        return Ok(None);
    };

    let key = LayerKey::parse(&layer.name)?;
    let tile_size = tile_size.as_vec2();
    let map_height = map_size.y;

    let width = tile_layer.width().unwrap_or(map_size.x);
    let height = tile_layer.height().unwrap_or(map_size.y);

    let mut tiles = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let Some(tile) = tile_layer.get_tile(x as i32, y as i32) else {
                continue;
            };

            // Tiled rows grow downward
            let row = map_height.saturating_sub(1).saturating_sub(y);
            if tile.flip_d {
                debug!(
                    "Tile {} at ({}, {}) in '{}' is flipped diagonally; drawn without the flip",
                    tile.id(),
                    x,
                    y,
                    layer.name
                );
            }
            tiles.push(PlacedTile {
                image: tile_image(&tile)?,
                position: Vec2::new(x as f32, row as f32) * tile_size,
                flip_x: tile.flip_h,
                flip_y: tile.flip_v,
                flip_diagonal: tile.flip_d,
            });
        }
    }

    debug!("Layer '{}' ({}): {} tiles", layer.name, key, tiles.len());

    Ok(Some(Layer {
        name: layer.name.clone(),
        key,
        tiles,
    }))
}

fn tile_image(tile: &tiled::LayerTile) -> Result<ImageRegion, MapLoadError> {
    let tileset = tile.get_tileset();

    if let Some(image) = &tileset.image {
        let rect = atlas_rect(tileset, tile.id());
        return Ok(TilesetImage::from_tiled(image).region(Some(rect)));
    }

    tile.get_tile()
        .and_then(|data| data.image.as_ref().map(TilesetImage::from_tiled))
        .map(|image| image.region(None))
        .ok_or_else(|| MapLoadError::MissingTileImage {
            tileset: tileset.name.clone(),
            tile_id: tile.id(),
        })
}

/// Source rectangle of a tile in an atlas tileset, top-left origin.
pub fn atlas_rect(tileset: &tiled::Tileset, tile_id: u32) -> SourceRect {
    let columns = tileset.columns.max(1);
    let col = tile_id % columns;
    let row = tile_id / columns;

    SourceRect::new(
        tileset.margin + col * (tileset.tile_width + tileset.spacing),
        tileset.margin + row * (tileset.tile_height + tileset.spacing),
        tileset.tile_width,
        tileset.tile_height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layer_names() {
        assert_eq!(
            LayerKey::parse("back_0").unwrap(),
            LayerKey::new(RenderGroup::Back, 0)
        );
        assert_eq!(
            LayerKey::parse("fore_-2").unwrap(),
            LayerKey::new(RenderGroup::Fore, -2)
        );
    }

    #[test]
    fn test_malformed_layer_names() {
        for name in ["ground", "back_one", "char_1_extra", "back_"] {
            assert!(
                matches!(
                    LayerKey::parse(name),
                    Err(MapLoadError::MalformedLayerName { .. })
                ),
                "{name} should be malformed"
            );
        }
    }

    #[test]
    fn test_unknown_group() {
        let err = LayerKey::parse("sky_0").unwrap_err();
        assert!(matches!(
            err,
            MapLoadError::UnknownRenderGroup { ref group, .. } if group == "sky"
        ));
    }

    #[test]
    fn test_key_ordering() {
        let mut keys = vec![
            LayerKey::new(RenderGroup::Fore, 0),
            LayerKey::new(RenderGroup::Back, 9),
            LayerKey::new(RenderGroup::Char, 1),
            LayerKey::new(RenderGroup::Back, 0),
        ];
        keys.sort();
        let names: Vec<String> = keys.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["back_0", "back_9", "char_1", "fore_0"]);
    }
}
