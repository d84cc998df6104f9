//! Walk around a room with the arrow keys.
//!
//! Reads `assets/mystery.json` when present, otherwise enters the
//! `start_tent` room. Press `L` to cycle through the supported languages.
//!
//! ```sh
//! cargo run --example walkabout --features demo
//! ```

use bevy::prelude::*;
use bevy::sprite::Anchor;
use mystery::prelude::*;

const SPEED: f32 = 96.0;

fn main() {
    let config = match MysteryConfig::load("assets/mystery.json") {
        Ok(config) => config,
        Err(_) => MysteryConfig {
            rooms: RoomConfig::default().with_initial_room("start_tent"),
            ..default()
        },
    };

    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(MysteryPlugin::default().with_config(config))
        .add_observer(report_room)
        .add_observer(report_failure)
        .add_systems(Startup, setup)
        .add_systems(Update, (walk, cycle_language))
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
    commands.spawn((
        PlayerCharacter,
        Sprite::from_color(Color::srgb(0.9, 0.3, 0.3), Vec2::new(64.0, 64.0)),
        Anchor(Vec2::new(-0.5, -0.5)),
    ));
}

fn walk(keys: Res<ButtonInput<KeyCode>>, time: Res<Time>, mut commands: Commands) {
    let mut direction = Vec2::ZERO;
    if keys.pressed(KeyCode::ArrowLeft) {
        direction.x -= 1.0;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        direction.x += 1.0;
    }
    if keys.pressed(KeyCode::ArrowDown) {
        direction.y -= 1.0;
    }
    if keys.pressed(KeyCode::ArrowUp) {
        direction.y += 1.0;
    }
    if direction == Vec2::ZERO {
        return;
    }

    // one axis at a time, so the character slides along walls
    let step = direction.normalize() * SPEED * time.delta_secs();
    commands.trigger(MoveCharacter {
        delta: Vec2::new(step.x, 0.0),
    });
    commands.trigger(MoveCharacter {
        delta: Vec2::new(0.0, step.y),
    });
}

fn cycle_language(
    keys: Res<ButtonInput<KeyCode>>,
    localization: Res<Localization>,
    mut commands: Commands,
) {
    if !keys.just_pressed(KeyCode::KeyL) {
        return;
    }

    let current = localization.language();
    let index = Language::ALL
        .iter()
        .position(|&l| l == current)
        .unwrap_or(0);
    let next = Language::ALL[(index + 1) % Language::ALL.len()];
    commands.trigger(ChangeLanguage::new(next.code()));
}

fn report_room(trigger: On<RoomEntered>, localization: Res<Localization>) {
    let event = trigger.event();
    info!(
        "{}",
        localization.translate("room.entered", &[("room", event.room.as_str())])
    );
}

fn report_failure(trigger: On<RoomLoadFailed>) {
    let event = trigger.event();
    warn!("Could not enter '{}': {}", event.room, event.error);
}
