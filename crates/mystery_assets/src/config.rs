//! Asset location configuration.

use std::path::PathBuf;

use bevy::prelude::*;
use serde::Deserialize;

use crate::i18n::Language;

/// Where the game's assets live and which language is selected at startup.
///
/// `root` must match Bevy's `AssetPlugin::file_path` so texture paths resolve
/// to the same files for both the map parser and the `AssetServer`.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Asset root directory
    pub root: PathBuf,
    /// Map documents, relative to `root`
    pub maps_dir: PathBuf,
    /// Translation tables, relative to `root`
    pub i18n_dir: PathBuf,
    /// UI font file, relative to `root`
    pub font_file: PathBuf,
    /// Language selected at startup
    pub language: Language,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
            maps_dir: PathBuf::from("maps"),
            i18n_dir: PathBuf::from("i18n"),
            font_file: PathBuf::from("unifont.otf"),
            language: Language::default(),
        }
    }
}

impl AssetsConfig {
    /// Same layout with a different asset root.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }
}
