//! Objects read from a room's object layer.

use bevy::prelude::*;
use tiled::{ObjectShape, PropertyValue};

use super::loader::MapLoadError;

/// Object type tag for walkable areas.
pub const COLLISION_POLYGON: &str = "CollisionPolygon";
/// Object type tag for named spawn locations.
pub const SPAWN_POINT: &str = "SpawnPoint";
/// Property holding a spawn point's name.
pub const SPAWN_NAME_PROPERTY: &str = "sp_name";

/// What a recognized object means to the room.
#[derive(Debug, Clone, PartialEq)]
pub enum MapObjectKind {
    /// Walkable area, absolute Y-up vertices in document order
    CollisionPolygon { points: Vec<Vec2> },
    /// Named location, Y-up world pixels
    SpawnPoint { name: String, position: Vec2 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapObject {
    pub id: u32,
    pub name: String,
    pub kind: MapObjectKind,
    pub properties: tiled::Properties,
}

/// Interpret one Tiled object.
///
/// Unrecognized type tags yield `Ok(None)` so maps can carry objects for
/// other systems. `map_pixel_height` is used to flip Tiled's Y-down object
/// coordinates.
pub fn parse_object(
    object: &tiled::ObjectData,
    map_pixel_height: f32,
) -> Result<Option<MapObject>, MapLoadError> {
    let kind = match object.user_type.as_str() {
        COLLISION_POLYGON => MapObjectKind::CollisionPolygon {
            points: polygon_points(object, map_pixel_height)?,
        },
        SPAWN_POINT => {
            let Some(PropertyValue::StringValue(name)) = object.properties.get(SPAWN_NAME_PROPERTY)
            else {
                return Err(MapLoadError::MissingProperty {
                    object_id: object.id(),
                    object_type: SPAWN_POINT,
                    property: SPAWN_NAME_PROPERTY,
                });
            };
            MapObjectKind::SpawnPoint {
                name: name.clone(),
                position: Vec2::new(object.x, map_pixel_height - object.y),
            }
        }
        other => {
            debug!(
                "Ignoring object {} '{}' of type '{}'",
                object.id(),
                object.name,
                other
            );
            return Ok(None);
        }
    };

    Ok(Some(MapObject {
        id: object.id(),
        name: object.name.clone(),
        kind,
        properties: object.properties.clone(),
    }))
}

fn polygon_points(
    object: &tiled::ObjectData,
    map_pixel_height: f32,
) -> Result<Vec<Vec2>, MapLoadError> {
    let local: Vec<Vec2> = match &object.shape {
        ObjectShape::Polygon { points } => points.iter().map(|&(x, y)| Vec2::new(x, y)).collect(),
        ObjectShape::Rect { width, height } => vec![
            Vec2::ZERO,
            Vec2::new(*width, 0.0),
            Vec2::new(*width, *height),
            Vec2::new(0.0, *height),
        ],
        _ => {
            return Err(MapLoadError::InvalidObjectShape {
                object_id: object.id(),
                object_type: COLLISION_POLYGON,
                expected: "polygon or rectangle",
            });
        }
    };

    // Tiled rotates clockwise about the object origin, in Y-down space
    let rotation = Vec2::from_angle(object.rotation.to_radians());
    let origin = Vec2::new(object.x, object.y);

    Ok(local
        .into_iter()
        .map(|p| {
            let p = origin + rotation.rotate(p);
            Vec2::new(p.x, map_pixel_height - p.y)
        })
        .collect())
}

