//! Room configuration.

use bevy::prelude::*;
use serde::Deserialize;

use crate::map::{LayerKey, RenderGroup};

/// The two points of a character that must stand on walkable ground.
///
/// The left probe sits at `probe_offset` from the character's position, the
/// right probe `width` pixels further along X.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Footprint {
    /// Offset of the left probe from the character position
    pub probe_offset: Vec2,
    /// Distance between the left and right probes
    pub width: f32,
}

impl Default for Footprint {
    fn default() -> Self {
        Self {
            probe_offset: Vec2::new(20.0, 3.0),
            width: 24.0,
        }
    }
}

impl Footprint {
    /// Left and right probe positions for a character standing at `candidate`.
    pub fn probes(&self, candidate: Vec2) -> [Vec2; 2] {
        let left = candidate + self.probe_offset;
        [left, left + Vec2::new(self.width, 0.0)]
    }
}

/// Configuration for `MysteryRoomsPlugin`.
///
/// Sprite Z for a layer is its group's base `group.z() * group_z_stride` plus
/// an offset from [`order_offset`](Self::order_offset). The offset grows with
/// the order number but never leaves `±GROUP_BAND * group_z_stride`, so every
/// `back_*` layer renders below every `char_*` layer whatever its order.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Name of the object layer holding collision polygons and spawn points
    pub objects_layer: String,
    /// Spawn point every room must define; entering a room places the
    /// character here
    pub start_spawn: String,
    /// Walkability probes
    pub footprint: Footprint,
    /// Screen offset subtracted from the viewport center when centering the
    /// view on the character
    pub camera_anchor: Vec2,
    /// Z distance between render groups
    pub group_z_stride: f32,
    /// Approximate Z distance between small layer orders within a group
    pub layer_z_stride: f32,
    /// Order of the character sprite within the `char` group
    pub character_order: f32,
    /// Room entered at startup, if any
    pub initial_room: Option<String>,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            objects_layer: "objects".to_string(),
            start_spawn: "start".to_string(),
            footprint: Footprint::default(),
            camera_anchor: Vec2::new(32.0, 32.0),
            group_z_stride: 100.0,
            layer_z_stride: 1.0,
            character_order: -0.5,
            initial_room: None,
        }
    }
}

/// Fraction of `group_z_stride` an order offset may reach on either side of
/// its group's base.
pub const GROUP_BAND: f32 = 0.4;

impl RoomConfig {
    pub fn layer_z(&self, key: LayerKey) -> f32 {
        self.group_base(key.group) + self.order_offset(key.order as f32)
    }

    pub fn character_z(&self) -> f32 {
        self.group_base(RenderGroup::Char) + self.order_offset(self.character_order)
    }

    fn group_base(&self, group: RenderGroup) -> f32 {
        group.z() as f32 * self.group_z_stride
    }

    /// Strictly increasing in `order` and bounded by the group band. Small
    /// orders sit roughly `layer_z_stride` apart.
    pub fn order_offset(&self, order: f32) -> f32 {
        let band = f64::from(GROUP_BAND * self.group_z_stride);
        if band <= 0.0 {
            return 0.0;
        }
        let scaled = f64::from(order) * f64::from(self.layer_z_stride);
        (band * scaled / (scaled.abs() + band)) as f32
    }

    pub fn with_initial_room(mut self, room: impl Into<String>) -> Self {
        self.initial_room = Some(room.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probes() {
        let [left, right] = Footprint::default().probes(Vec2::new(16.0, 16.0));
        assert_eq!(left, Vec2::new(36.0, 19.0));
        assert_eq!(right, Vec2::new(60.0, 19.0));
    }

    #[test]
    fn test_group_dominates_order() {
        let config = RoomConfig::default();
        let back = config.layer_z(LayerKey::new(RenderGroup::Back, 50));
        let char0 = config.layer_z(LayerKey::new(RenderGroup::Char, 0));
        let fore = config.layer_z(LayerKey::new(RenderGroup::Fore, -3));
        assert!(back < char0);
        assert!(char0 < fore);
        assert!(config.character_z() < char0);
        assert!(config.character_z() > back);
    }

    #[test]
    fn test_large_orders_stay_in_group() {
        let config = RoomConfig::default();
        let back_150 = config.layer_z(LayerKey::new(RenderGroup::Back, 150));
        let char_0 = config.layer_z(LayerKey::new(RenderGroup::Char, 0));
        let fore_neg = config.layer_z(LayerKey::new(RenderGroup::Fore, -150));
        assert!(back_150 < char_0, "back_150 z={back_150} char_0 z={char_0}");
        assert!(fore_neg > char_0, "fore_-150 z={fore_neg} char_0 z={char_0}");
        assert!(fore_neg > config.character_z());
        assert!(back_150 < config.character_z());

        let back_max = config.layer_z(LayerKey::new(RenderGroup::Back, i32::MAX));
        let char_min = config.layer_z(LayerKey::new(RenderGroup::Char, i32::MIN));
        let char_max = config.layer_z(LayerKey::new(RenderGroup::Char, i32::MAX));
        let fore_min = config.layer_z(LayerKey::new(RenderGroup::Fore, i32::MIN));
        assert!(back_max < char_min);
        assert!(char_max < fore_min);

        // inside Camera2d's default depth range
        for z in [back_max, char_min, fore_min] {
            assert!(z.abs() < 1000.0);
        }
        let fore_max = config.layer_z(LayerKey::new(RenderGroup::Fore, i32::MAX));
        assert!(fore_max < 1000.0);
    }

    #[test]
    fn test_order_still_sorts_within_group() {
        let config = RoomConfig::default();
        let orders = [-150, -2, -1, 0, 1, 2, 150];
        let zs: Vec<f32> = orders
            .iter()
            .map(|&o| config.layer_z(LayerKey::new(RenderGroup::Char, o)))
            .collect();
        assert!(zs.windows(2).all(|w| w[0] < w[1]), "{zs:?}");

        // the character sits between char_-1 and char_0
        assert!(config.character_z() > zs[2]);
        assert!(config.character_z() < zs[3]);
    }

    #[test]
    fn test_partial_json() {
        let config: RoomConfig = serde_json::from_str(
            r#"{ "initial_room": "start_tent", "footprint": { "width": 30.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.initial_room.as_deref(), Some("start_tent"));
        assert_eq!(config.footprint.width, 30.0);
        assert_eq!(config.footprint.probe_offset, Vec2::new(20.0, 3.0));
        assert_eq!(config.start_spawn, "start");
    }
}
