//! Logical asset name resolution.
//!
//! Every file the game touches goes through [`ResourceManager`]: map
//! documents, translation tables, fonts and texture paths handed to the
//! `AssetServer`.

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use normalize_path::NormalizePath;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::AssetsConfig;
use crate::i18n::Language;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Resolves logical asset names against the asset root.
#[derive(Resource, Debug, Clone)]
pub struct ResourceManager {
    root: PathBuf,
    maps_dir: PathBuf,
    i18n_dir: PathBuf,
    font_file: PathBuf,
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::new(&AssetsConfig::default())
    }
}

impl ResourceManager {
    pub fn new(config: &AssetsConfig) -> Self {
        Self {
            root: config.root.normalize(),
            maps_dir: config.maps_dir.clone(),
            i18n_dir: config.i18n_dir.clone(),
            font_file: config.font_file.clone(),
        }
    }

    /// The normalized asset root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join a logical path onto the asset root.
    ///
    /// `.` and `..` components are resolved, so `maps/../i18n/en_us.json`
    /// and `i18n/en_us.json` name the same file.
    pub fn resolve(&self, logical: impl AsRef<Path>) -> PathBuf {
        self.root.join(logical).normalize()
    }

    /// Convert a filesystem path below the root into an `AssetServer` path.
    ///
    /// Tiled reports image sources joined onto the directory of the `.tsx`
    /// that references them; stripping the root gives the path Bevy expects.
    pub fn asset_path(&self, path: &Path) -> Result<PathBuf, ResourceError> {
        let normalized = path.normalize();
        normalized
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .map_err(|_| {
                ResourceError::InvalidPath(format!(
                    "{} is outside the asset root {}",
                    normalized.display(),
                    self.root.display()
                ))
            })
    }

    /// Read a whole asset file.
    pub fn read_bytes(&self, logical: impl AsRef<Path>) -> Result<Vec<u8>, ResourceError> {
        let path = self.resolve(logical);
        fs::read(&path).map_err(|source| ResourceError::Io { path, source })
    }

    /// Read a whole asset file as UTF-8 text.
    pub fn read_to_string(&self, logical: impl AsRef<Path>) -> Result<String, ResourceError> {
        let path = self.resolve(logical);
        fs::read_to_string(&path).map_err(|source| ResourceError::Io { path, source })
    }

    /// Read and deserialize a JSON asset file.
    pub fn read_json<T: DeserializeOwned>(
        &self,
        logical: impl AsRef<Path>,
    ) -> Result<T, ResourceError> {
        let logical = logical.as_ref();
        let text = self.read_to_string(logical)?;
        serde_json::from_str(&text).map_err(|source| ResourceError::Json {
            path: self.resolve(logical),
            source,
        })
    }

    /// Filesystem path of the map document for a room.
    pub fn map_path(&self, room: &str) -> PathBuf {
        self.resolve(self.maps_dir.join(format!("{room}.tmx")))
    }

    /// Logical path of the translation table for a language.
    pub fn translation_file(&self, language: Language) -> PathBuf {
        self.i18n_dir.join(format!("{}.json", language.code()))
    }

    /// Filesystem path of the translation table for a language.
    pub fn translation_path(&self, language: Language) -> PathBuf {
        self.resolve(self.translation_file(language))
    }

    /// Filesystem path of the UI font.
    pub fn font_path(&self) -> PathBuf {
        self.resolve(&self.font_file)
    }

    /// Raw bytes of the UI font, for engines that install fonts from memory.
    pub fn font_bytes(&self) -> Result<Vec<u8>, ResourceError> {
        self.read_bytes(&self.font_file)
    }

    /// Parse a TMX document and its external tilesets.
    ///
    /// A fresh `tiled::Loader` is used for every call, so edited maps are
    /// picked up on the next room enter.
    pub fn load_tmx_map(&self, path: &Path) -> Result<tiled::Map, tiled::Error> {
        debug!("Parsing map document {}", path.display());
        let mut loader = tiled::Loader::new();
        loader.load_tmx_map(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ResourceManager {
        ResourceManager::new(&AssetsConfig::default().with_root("./game/assets"))
    }

    #[test]
    fn test_resolve_normalizes_components() {
        let resources = manager();
        assert_eq!(
            resources.resolve("maps/../i18n/en_us.json"),
            PathBuf::from("game/assets/i18n/en_us.json")
        );
    }

    #[test]
    fn test_map_path() {
        assert_eq!(
            manager().map_path("start_tent"),
            PathBuf::from("game/assets/maps/start_tent.tmx")
        );
    }

    #[test]
    fn test_translation_path() {
        assert_eq!(
            manager().translation_path(Language::ZhHk),
            PathBuf::from("game/assets/i18n/zh_hk.json")
        );
    }

    #[test]
    fn test_asset_path_strips_root() {
        let resources = manager();
        let image = resources.resolve("maps/tilesets/../tilesets/terrain.png");
        assert_eq!(
            resources.asset_path(&image).unwrap(),
            PathBuf::from("maps/tilesets/terrain.png")
        );
    }

    #[test]
    fn test_asset_path_outside_root() {
        let result = manager().asset_path(Path::new("elsewhere/terrain.png"));
        assert!(matches!(result, Err(ResourceError::InvalidPath(_))));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = manager().read_bytes("nope.bin").unwrap_err();
        assert!(err.to_string().contains("nope.bin"));
    }

    fn fixtures() -> ResourceManager {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/assets");
        ResourceManager::new(&AssetsConfig::default().with_root(root))
    }

    #[test]
    fn test_read_json() {
        let resources = fixtures();
        let table: std::collections::HashMap<String, String> = resources
            .read_json(resources.translation_file(Language::EnUs))
            .unwrap();
        assert_eq!(table["greeting"], "Hello, {name}");
    }

    #[test]
    fn test_read_json_reports_parse_errors() {
        let err = fixtures()
            .read_json::<std::collections::HashMap<String, String>>("broken.json")
            .unwrap_err();
        match err {
            ResourceError::Json { path, .. } => assert!(path.ends_with("broken.json")),
            other => panic!("expected a parse error, got {other}"),
        }
    }

    #[test]
    fn test_read_json_missing_file() {
        let err = fixtures()
            .read_json::<std::collections::HashMap<String, String>>("i18n/zh_hk.json")
            .unwrap_err();
        assert!(matches!(err, ResourceError::Io { .. }));
    }
}
