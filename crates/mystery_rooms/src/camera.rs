//! Character-following view.
//!
//! The view translation places the character at
//! `viewport / 2 - camera_anchor` on screen. Bevy centers `Camera2d` on its
//! own translation, so the camera sits at the world point that lands on the
//! screen center.

use bevy::prelude::*;

use crate::config::RoomConfig;
use crate::runtime::RoomRuntime;

/// Screen offset applied to world coordinates so the character appears at
/// `viewport / 2 - anchor`.
pub fn view_translation(viewport: Vec2, character: Vec2, anchor: Vec2) -> Vec2 {
    (viewport / 2.0 - anchor) - character
}

/// World position of the screen center under `translation`.
pub fn camera_position(viewport: Vec2, translation: Vec2) -> Vec2 {
    viewport / 2.0 - translation
}

/// Recenters every `Camera2d` on the character each frame.
pub fn follow_character(
    runtime: Res<RoomRuntime>,
    config: Res<RoomConfig>,
    mut cameras: Query<&mut Transform, With<Camera2d>>,
) {
    let Some(translation) = runtime.view_translation(config.camera_anchor) else {
        return;
    };
    let position = camera_position(runtime.viewport(), translation);

    for mut transform in &mut cameras {
        transform.translation.x = position.x;
        transform.translation.y = position.y;
    }
}
