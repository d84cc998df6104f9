//! # `mystery_assets`
//!
//! Layer 1 of the mystery room stack: everything that turns a logical asset
//! name into something the room layer can use.
//!
//! - [`resource::ResourceManager`]: asset root, path resolution, TMX loading
//! - [`image::TilesetImage`]: source-rectangle to image-region resolution
//! - [`image::TextureCache`]: shared `Handle<Image>` per texture path
//! - [`i18n::Localization`]: translated strings with language fallback
//!
//! This crate does NOT parse room layers or objects; that is
//! `mystery_rooms`' job.
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use mystery_assets::prelude::*;
//!
//! App::new()
//!     .add_plugins(MinimalPlugins)
//!     .add_plugins(MysteryAssetsPlugin::default());
//! ```

pub mod config;
pub mod events;
pub mod i18n;
pub mod image;
pub mod plugin;
pub mod resource;

pub use config::AssetsConfig;
pub use plugin::MysteryAssetsPlugin;

pub mod prelude {
    //! Common imports for `mystery_assets` users.

    pub use crate::config::AssetsConfig;
    pub use crate::events::{ChangeLanguage, LanguageChanged};
    pub use crate::i18n::{Language, Localization};
    pub use crate::image::{ImageRegion, SourceRect, TextureCache, TilesetImage};
    pub use crate::plugin::MysteryAssetsPlugin;
    pub use crate::resource::{ResourceError, ResourceManager};
}
