//! Game configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use mystery_assets::AssetsConfig;
use mystery_rooms::RoomConfig;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Combined configuration for [`MysteryPlugin`](crate::plugin::MysteryPlugin).
///
/// Every field is optional in the file:
///
/// ```json
/// {
///   "assets": { "root": "assets", "language": "zh_cn" },
///   "rooms": { "initial_room": "start_tent", "footprint": { "width": 24.0 } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MysteryConfig {
    pub assets: AssetsConfig,
    pub rooms: RoomConfig,
}

impl MysteryConfig {
    /// Read a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
