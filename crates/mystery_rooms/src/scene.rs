//! Scene lifecycle hooks.

use bevy::prelude::*;
use mystery_assets::i18n::Localization;
use mystery_assets::resource::ResourceManager;

use crate::config::RoomConfig;

/// What a scene may read while entering.
#[derive(Clone, Copy)]
pub struct SceneContext<'a> {
    pub resources: &'a ResourceManager,
    pub config: &'a RoomConfig,
}

impl<'a> SceneContext<'a> {
    pub fn new(resources: &'a ResourceManager, config: &'a RoomConfig) -> Self {
        Self { resources, config }
    }
}

/// Hooks a scene controller calls as scenes come and go.
///
/// Only `on_enter` is required. It may fail, in which case the scene must be
/// left exactly as it was before the call.
pub trait SceneLifecycle {
    type Error;

    fn on_enter(&mut self, ctx: &SceneContext<'_>) -> Result<(), Self::Error>;

    fn on_leave(&mut self) {}

    /// The window was resized; `size` is in logical pixels.
    fn on_resize(&mut self, _size: Vec2) {}

    fn on_language_change(&mut self, _localization: &Localization) {}
}
