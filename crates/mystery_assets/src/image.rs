//! Tileset images and the regions tiles are cut from.
//!
//! Tiled describes a tile's source rectangle with a top-left origin. Room
//! geometry is Y-up, so [`TilesetImage::region`] flips the rectangle into
//! bottom-left image space once, at load time. [`ImageRegion::texture_rect`]
//! flips it back for `Sprite::rect`, which samples with a top-left origin.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

/// A sub-rectangle of an image in top-left (Y-down) pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SourceRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A tileset image file and its pixel size.
///
/// Cloning shares the path, so every tile cut from the same atlas points
/// at one allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilesetImage {
    path: Arc<Path>,
    size: UVec2,
}

impl TilesetImage {
    pub fn new(path: impl Into<PathBuf>, size: UVec2) -> Self {
        Self {
            path: Arc::from(path.into()),
            size,
        }
    }

    /// Wrap an image reference from a parsed tileset.
    pub fn from_tiled(image: &tiled::Image) -> Self {
        let size = UVec2::new(image.width.max(0) as u32, image.height.max(0) as u32);
        Self::new(image.source.clone(), size)
    }

    /// Filesystem path of the image, as reported by the map parser.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// Resolve a source rectangle into a Y-up region of this image.
    ///
    /// `None` selects the whole image. Rectangles reaching past the image
    /// edge clamp at zero instead of wrapping.
    pub fn region(&self, rect: Option<SourceRect>) -> ImageRegion {
        let rect = match rect {
            Some(r) => {
                let y = self.size.y.saturating_sub(r.y).saturating_sub(r.height);
                URect::new(r.x, y, r.x + r.width, y + r.height)
            }
            None => URect::new(0, 0, self.size.x, self.size.y),
        };

        ImageRegion {
            image: self.clone(),
            rect,
        }
    }
}

/// A Y-up rectangle within a shared tileset image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRegion {
    pub image: TilesetImage,
    /// Bottom-left origin, in image pixels
    pub rect: URect,
}

impl ImageRegion {
    pub fn path(&self) -> &Path {
        self.image.path()
    }

    /// True when the region covers the full image.
    pub fn is_whole(&self) -> bool {
        self.rect.min == UVec2::ZERO && self.rect.max == self.image.size
    }

    /// The region in top-left texture space, as `Sprite::rect` expects.
    pub fn texture_rect(&self) -> Rect {
        let top = self.image.size.y.saturating_sub(self.rect.max.y);
        let size = self.rect.size();
        Rect::new(
            self.rect.min.x as f32,
            top as f32,
            (self.rect.min.x + size.x) as f32,
            (top + size.y) as f32,
        )
    }
}

/// One `Handle<Image>` per texture path.
///
/// Rooms sharing a tileset reuse the handle, so the texture stays resident
/// across room transitions instead of being reloaded per tile.
#[derive(Resource, Debug, Default)]
pub struct TextureCache {
    handles: HashMap<PathBuf, Handle<Image>>,
}

impl TextureCache {
    /// Return the cached handle for `asset_path`, loading it on first use.
    pub fn get_or_load(&mut self, asset_path: &Path, asset_server: &AssetServer) -> Handle<Image> {
        if let Some(handle) = self.handles.get(asset_path) {
            return handle.clone();
        }

        debug!("Loading texture {}", asset_path.display());
        let handle: Handle<Image> = asset_server.load(asset_path.to_path_buf());
        self.handles.insert(asset_path.to_path_buf(), handle.clone());
        handle
    }

    pub fn get(&self, asset_path: &Path) -> Option<&Handle<Image>> {
        self.handles.get(asset_path)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Drop every handle. Textures unload once nothing else holds them.
    pub fn clear(&mut self) {
        self.handles.clear();
    }
}
