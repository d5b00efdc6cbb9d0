//! Conversion of user-supplied images into shortcut icons.
//!
//! Shortcuts can only reference `.ico` files, so PNG/JPEG/BMP/GIF images are
//! re-encoded into a multi-resolution icon in the per-user icon cache. The
//! output is named after the source file stem, so two sources sharing a stem
//! (e.g. `a/logo.png` and `b/logo.jpg`) overwrite each other's icon.

use crate::config::{Config, IconConfig};
use crate::error::{Result, ShortcutError};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Converts images to `.ico` files in the icon cache.
pub struct IconConverter {
    /// Directory receiving converted icons.
    cache_dir: PathBuf,
    /// Extension that marks a file as already being an icon.
    icon_extension: String,
    /// Square frame sizes written into every icon.
    sizes: Vec<u32>,
}

impl IconConverter {
    /// Create a converter writing into `cache_dir`.
    pub fn new(cache_dir: impl AsRef<Path>) -> Self {
        Self {
            cache_dir: cache_dir.as_ref().to_path_buf(),
            icon_extension: IconConfig::EXTENSION.to_string(),
            sizes: IconConfig::SIZES.to_vec(),
        }
    }

    /// Create a converter from the runtime configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            cache_dir: config.icon_cache_dir.clone(),
            icon_extension: config.icon_extension.clone(),
            sizes: IconConfig::SIZES.to_vec(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Whether `path` already carries the icon extension.
    pub fn is_icon(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(&self.icon_extension))
            .unwrap_or(false)
    }

    /// Destination path for a source image.
    ///
    /// Named after the source stem, so images sharing a stem share one icon.
    pub fn cached_icon_path(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "icon".to_string());
        self.cache_dir
            .join(format!("{}.{}", stem, self.icon_extension))
    }

    /// Convert `source` into an icon, returning the path to use in shortcuts.
    ///
    /// Paths that are already icons are returned unchanged without touching
    /// the file.
    pub fn convert(&self, source: &Path) -> Result<PathBuf> {
        if self.is_icon(source) {
            return Ok(source.to_path_buf());
        }

        let conversion_error = |message: String| ShortcutError::IconConversion {
            path: source.to_path_buf(),
            message,
        };

        let image = image::open(source).map_err(|e| conversion_error(e.to_string()))?;
        let rgba = image.to_rgba8();

        let mut icon_dir = ico::IconDir::new(ico::ResourceType::Icon);
        for &size in &self.sizes {
            let frame = fit_to_square(&rgba, size);
            let icon_image = ico::IconImage::from_rgba_data(size, size, frame.into_raw());
            let entry = ico::IconDirEntry::encode(&icon_image)
                .map_err(|e| conversion_error(format!("encode {}x{} frame: {}", size, size, e)))?;
            icon_dir.add_entry(entry);
        }

        fs::create_dir_all(&self.cache_dir)
            .map_err(|e| ShortcutError::io_with_path(e, &self.cache_dir))?;

        let dest = self.cached_icon_path(source);
        let mut temp = NamedTempFile::new_in(&self.cache_dir)
            .map_err(|e| ShortcutError::io_with_path(e, &self.cache_dir))?;
        icon_dir
            .write(&mut temp)
            .map_err(|e| ShortcutError::io_with_path(e, temp.path()))?;
        temp.persist(&dest)
            .map_err(|e| ShortcutError::io_with_path(e.error, &dest))?;

        info!("Converted {} to {}", source.display(), dest.display());
        Ok(dest)
    }
}

/// Scale `image` to fit a `size`x`size` frame, centred on a transparent canvas.
fn fit_to_square(image: &RgbaImage, size: u32) -> RgbaImage {
    let (width, height) = image.dimensions();
    if width == size && height == size {
        return image.clone();
    }

    let scale = f64::from(size) / f64::from(width.max(height).max(1));
    let scaled_w = ((f64::from(width) * scale).round() as u32).clamp(1, size);
    let scaled_h = ((f64::from(height) * scale).round() as u32).clamp(1, size);
    let scaled = imageops::resize(image, scaled_w, scaled_h, FilterType::Lanczos3);

    let mut canvas = RgbaImage::new(size, size);
    let x = i64::from((size - scaled_w) / 2);
    let y = i64::from((size - scaled_h) / 2);
    imageops::overlay(&mut canvas, &scaled, x, y);
    debug!("Rendered {}x{} icon frame", size, size);
    canvas
}
