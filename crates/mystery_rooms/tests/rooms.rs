//! Room loading against the TMX fixtures in `tests/assets`.

use std::path::{Path, PathBuf};

use bevy::math::{URect, UVec2, Vec2};
use mystery_assets::config::AssetsConfig;
use mystery_assets::resource::ResourceManager;
use mystery_rooms::map::{MapLoadError, RenderGroup, load_tile_map};
use mystery_rooms::prelude::*;

fn resources() -> ResourceManager {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/assets");
    ResourceManager::new(&AssetsConfig::default().with_root(root))
}

fn load(room: &str) -> Result<TileMap, MapLoadError> {
    load_tile_map(&resources(), room, "objects")
}

#[test]
fn test_draw_order_follows_groups() {
    let map = load("start").unwrap();

    // document order, hidden layer skipped
    let names: Vec<&str> = map.layers.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["back_0", "fore_2", "char_1"]);

    let ordered: Vec<&str> = map.draw_order().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(ordered, ["back_0", "char_1", "fore_2"]);
    assert_eq!(map.draw_order()[1].key.group, RenderGroup::Char);
}

#[test]
fn test_tile_positions_are_y_up() {
    let map = load("start").unwrap();
    let back = &map.layers[0];
    assert_eq!(back.tiles.len(), 16);

    // first tile of the top row sits at the top of the map
    assert_eq!(back.tiles[0].position, Vec2::new(0.0, 48.0));
    assert_eq!(back.tiles[15].position, Vec2::new(48.0, 0.0));

    let chest = &map.layers[2].tiles[0];
    assert_eq!(chest.position, Vec2::new(32.0, 0.0));
}

#[test]
fn test_atlas_regions_flip_y() {
    let map = load("start").unwrap();
    let back = &map.layers[0];

    // tile 0 at (0, 0) in a 64px-high atlas
    assert_eq!(back.tiles[0].image.rect, URect::new(0, 48, 16, 64));
    // tile 5 at (16, 16)
    assert_eq!(back.tiles[5].image.rect, URect::new(16, 32, 32, 48));
    assert_eq!(back.tiles[5].image.image.size(), UVec2::new(64, 64));

    // every atlas tile shares one image path
    assert!(back.tiles.iter().all(|t| t.image.path() == back.tiles[0].image.path()));
}

#[test]
fn test_image_collection_uses_whole_image() {
    let map = load("start").unwrap();
    let chest = &map.layers[2].tiles[0];
    assert!(chest.image.is_whole());
    assert_eq!(chest.image.rect, URect::new(0, 0, 32, 32));
    assert!(chest.image.path().ends_with("chest.png"));
}

#[test]
fn test_texture_paths_are_relative_to_root() {
    let resources = resources();
    let map = load("start").unwrap();
    let path = resources
        .asset_path(map.layers[0].tiles[0].image.path())
        .unwrap();
    assert_eq!(path, Path::new("maps/tilesets/terrain.png"));
}

#[test]
fn test_objects_are_parsed() {
    let map = load("start").unwrap();

    // the Decoration object is dropped
    assert_eq!(map.objects.len(), 4);

    let polygons: Vec<&[Vec2]> = map.collision_polygons().collect();
    assert_eq!(polygons.len(), 1);
    assert_eq!(
        polygons[0],
        [
            Vec2::new(0.0, 64.0),
            Vec2::new(64.0, 64.0),
            Vec2::new(64.0, 0.0),
            Vec2::new(0.0, 0.0),
        ]
    );

    let spawns = map.spawn_points();
    assert_eq!(spawns.len(), 2);
    // the later "start" wins
    assert_eq!(spawns["start"], Vec2::new(16.0, 16.0));
    assert_eq!(spawns["door"], Vec2::new(48.0, 48.0));
}

#[test]
fn test_rectangle_collision_area() {
    let map = load("hall").unwrap();
    let polygons: Vec<&[Vec2]> = map.collision_polygons().collect();
    assert_eq!(polygons[0].len(), 4);
    assert_eq!(map.spawn_points()["start"], Vec2::new(8.0, 8.0));
}

#[test]
fn test_enter_places_character_and_gates_movement() {
    let resources = resources();
    let config = RoomConfig::default();
    let ctx = SceneContext::new(&resources, &config);

    let mut runtime = RoomRuntime::default();
    assert_eq!(runtime.enter_room("start", &ctx).unwrap(), 1);

    let room = runtime.active().unwrap();
    assert!(room.is_loaded());
    assert_eq!(room.loaded().unwrap().layers().len(), 3);

    let character = runtime.character().unwrap();
    assert_eq!(character.position, Vec2::new(16.0, 16.0));
    assert_eq!(character.room.as_deref(), Some("start"));

    // probes (36, 19) and (60, 19) are inside the floor
    assert!(runtime.allows_move(Vec2::new(16.0, 16.0)));
    // right probe would be at (70, 19)
    assert!(!runtime.try_move(Vec2::new(10.0, 0.0)));
    assert!(runtime.try_move(Vec2::new(2.0, 1.0)));
    assert_eq!(runtime.character().unwrap().position, Vec2::new(18.0, 17.0));
}

#[test]
fn test_missing_start_keeps_previous_room() {
    let resources = resources();
    let config = RoomConfig::default();
    let ctx = SceneContext::new(&resources, &config);

    let mut runtime = RoomRuntime::default();
    runtime.enter_room("start", &ctx).unwrap();
    runtime.try_move(Vec2::new(2.0, 0.0));

    let err = runtime.enter_room("no_start", &ctx).unwrap_err();
    assert!(matches!(
        err,
        MapLoadError::MissingSpawnPoint { ref room, ref spawn } if room == "no_start" && spawn == "start"
    ));

    assert_eq!(runtime.generation(), 1);
    assert_eq!(runtime.active().unwrap().name(), "start");
    assert!(runtime.active().unwrap().is_loaded());
    assert_eq!(runtime.character().unwrap().position, Vec2::new(18.0, 16.0));
}

#[test]
fn test_transition_moves_character() {
    let resources = resources();
    let config = RoomConfig::default();
    let ctx = SceneContext::new(&resources, &config);

    let mut runtime = RoomRuntime::default();
    runtime.enter_room("start", &ctx).unwrap();
    assert_eq!(runtime.enter_room("hall", &ctx).unwrap(), 2);

    let character = runtime.character().unwrap();
    assert_eq!(character.room.as_deref(), Some("hall"));
    assert_eq!(character.position, Vec2::new(8.0, 8.0));

    // re-entering reloads in place and returns to the start spawn
    runtime.try_move(Vec2::new(1.0, 0.0));
    assert_eq!(runtime.enter_room("hall", &ctx).unwrap(), 3);
    assert_eq!(runtime.character().unwrap().position, Vec2::new(8.0, 8.0));
}

#[test]
fn test_leave_unloads_room() {
    let resources = resources();
    let config = RoomConfig::default();
    let ctx = SceneContext::new(&resources, &config);

    let mut runtime = RoomRuntime::default();
    runtime.enter_room("start", &ctx).unwrap();
    assert_eq!(runtime.leave_room().as_deref(), Some("start"));

    assert!(runtime.active().is_none());
    assert!(!runtime.allows_move(Vec2::new(16.0, 16.0)));
    assert_eq!(runtime.character().unwrap().room, None);
    assert_eq!(runtime.view_translation(config.camera_anchor), None);
    assert_eq!(runtime.leave_room(), None);
}

#[test]
fn test_view_translation_tracks_character() {
    let resources = resources();
    let config = RoomConfig::default();
    let ctx = SceneContext::new(&resources, &config);

    let mut runtime = RoomRuntime::default();
    runtime.on_resize(Vec2::new(800.0, 600.0));
    runtime.enter_room("start", &ctx).unwrap();

    assert_eq!(runtime.active().unwrap().viewport(), Vec2::new(800.0, 600.0));
    assert_eq!(
        runtime.view_translation(config.camera_anchor),
        Some(Vec2::new(352.0, 252.0))
    );
}

#[test]
fn test_load_errors() {
    assert!(matches!(
        load("bad_layer"),
        Err(MapLoadError::MalformedLayerName { ref name }) if name == "ground"
    ));
    assert!(matches!(
        load("unknown_group"),
        Err(MapLoadError::UnknownRenderGroup { ref group, .. }) if group == "sky"
    ));
    assert!(matches!(
        load("missing_name"),
        Err(MapLoadError::MissingProperty { object_id: 1, property: "sp_name", .. })
    ));
    assert!(matches!(
        load("nowhere"),
        Err(MapLoadError::MissingMap { ref name, .. }) if name == "nowhere"
    ));
    assert!(matches!(
        load("../../src/lib"),
        Err(MapLoadError::Resource(_))
    ));
}

#[test]
fn test_infinite_map_is_rejected() {
    assert!(matches!(
        load("infinite"),
        Err(MapLoadError::InfiniteMap(ref name)) if name == "infinite"
    ));
}

#[test]
fn test_collision_area_must_be_polygon_or_rectangle() {
    for room in ["ellipse_floor", "point_floor"] {
        let err = load(room).unwrap_err();
        assert!(
            matches!(
                err,
                MapLoadError::InvalidObjectShape {
                    object_id: 3,
                    object_type: "CollisionPolygon",
                    ..
                }
            ),
            "{room}: {err}"
        );
    }
}

#[test]
fn test_tile_without_image() {
    assert!(matches!(
        load("missing_image"),
        Err(MapLoadError::MissingTileImage { ref tileset, tile_id: 0 }) if tileset == "bare"
    ));
}

#[test]
fn test_rotated_rectangle() {
    let map = load("rotated").unwrap();
    let polygons: Vec<&[Vec2]> = map.collision_polygons().collect();
    assert_eq!(polygons.len(), 1);

    // 10x20 at (50, 50) turned a quarter clockwise, in a 100px-high map
    let expected = [
        Vec2::new(50.0, 50.0),
        Vec2::new(50.0, 40.0),
        Vec2::new(30.0, 40.0),
        Vec2::new(30.0, 50.0),
    ];
    assert_eq!(polygons[0].len(), expected.len());
    for (actual, expected) in polygons[0].iter().zip(expected) {
        assert!(actual.abs_diff_eq(expected, 1e-4), "{actual} != {expected}");
    }

    let floor = Polygon::new(polygons[0].to_vec());
    assert!(floor.contains(Vec2::new(40.0, 45.0)));
    assert!(!floor.contains(Vec2::new(55.0, 45.0)));
}

#[test]
fn test_group_layers_are_flattened() {
    let map = load("groups").unwrap();

    // the hidden group holds a malformed name that is never parsed
    let names: Vec<&str> = map.layers.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["back_0", "fore_0"]);
    assert_eq!(map.layers[1].tiles.len(), 1);
    assert_eq!(map.layers[1].tiles[0].position, Vec2::new(16.0, 16.0));

    // objects nested in a visible group are still found
    assert_eq!(map.collision_polygons().count(), 1);
    assert_eq!(map.spawn_points()["start"], Vec2::new(8.0, 24.0));
}

#[test]
fn test_diagonal_flip_is_kept() {
    let map = load("start").unwrap();
    let fore = &map.layers[1];
    assert_eq!(fore.name, "fore_2");
    assert_eq!(fore.tiles.len(), 1);

    let tile = &fore.tiles[0];
    assert!(tile.flip_diagonal);
    assert!(!tile.flip_x && !tile.flip_y);
    assert_eq!(tile.position, Vec2::new(16.0, 32.0));
    // the flag bits do not leak into the tile id
    assert_eq!(tile.image.rect, URect::new(16, 32, 32, 48));

    assert!(map.layers[0].tiles.iter().all(|t| !t.flip_diagonal));
}
