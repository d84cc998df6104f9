//! Main plugin for `mystery_assets`.

use bevy::prelude::*;

use crate::config::AssetsConfig;
use crate::events::{ChangeLanguage, LanguageChanged};
use crate::i18n::Localization;
use crate::image::TextureCache;
use crate::resource::ResourceManager;

/// Installs the asset root, texture cache and translation tables.
///
/// # Example
///
/// ```rust,no_run
/// # use bevy::prelude::*;
/// # use mystery_assets::{AssetsConfig, MysteryAssetsPlugin};
/// App::new()
///     .add_plugins(MysteryAssetsPlugin::new(AssetsConfig::default().with_root("game/assets")));
/// ```
#[derive(Default)]
pub struct MysteryAssetsPlugin {
    /// Configuration for asset locations
    pub config: AssetsConfig,
}

impl MysteryAssetsPlugin {
    /// Create plugin with custom configuration.
    pub fn new(config: AssetsConfig) -> Self {
        Self { config }
    }
}

impl Plugin for MysteryAssetsPlugin {
    fn build(&self, app: &mut App) {
        let resources = ResourceManager::new(&self.config);

        let localization = match Localization::load(&resources, self.config.language) {
            Ok(localization) => localization,
            Err(e) => {
                warn!("Starting without translations: {}", e);
                Localization::default()
            }
        };

        app.insert_resource(self.config.clone())
            .insert_resource(resources)
            .insert_resource(localization)
            .init_resource::<TextureCache>();

        app.add_observer(on_change_language);

        info!("MysteryAssetsPlugin initialized");
    }
}

/// Swap translation tables and announce the result.
pub fn on_change_language(
    trigger: On<ChangeLanguage>,
    resources: Res<ResourceManager>,
    mut localization: ResMut<Localization>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let language = localization.set_language(&resources, &event.code);

    info!("Language set to {}", language.code());
    commands.trigger(LanguageChanged { language });
}
