//! Filesystem image source.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use image::{ColorType, DynamicImage};
use img_triage_core::{ImageInfo, ImageSource};
use tracing::{debug, warn};

/// Raster extensions the decoder is built with, lowercase.
const RASTER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "tif", "webp", "bmp", "gif"];

/// Reads images named by file and directory paths.
///
/// Explicit files keep their argument order. Each directory argument expands
/// to its images sorted by path, so repeated runs produce identical reports.
/// The file list is resolved once and shared by [`ImageSource::count_hint`]
/// and [`ImageSource::images`].
pub struct FsImageSource {
    paths: Vec<PathBuf>,
    recursive: bool,
    files: OnceLock<Vec<PathBuf>>,
}

impl FsImageSource {
    /// Creates a source over `paths`, descending into subdirectories when
    /// `recursive` is set.
    #[must_use]
    pub const fn new(paths: Vec<PathBuf>, recursive: bool) -> Self {
        Self {
            paths,
            recursive,
            files: OnceLock::new(),
        }
    }

    /// Image files selected by the configured paths, in yield order.
    pub fn collect_files(&self) -> &[PathBuf] {
        self.files.get_or_init(|| {
            let mut files = Vec::new();
            for path in &self.paths {
                if path.is_dir() {
                    let mut found = self.walk(path);
                    found.sort();
                    files.append(&mut found);
                } else if !path.exists() {
                    warn!("Path does not exist: {}", path.display());
                } else if has_raster_extension(path) {
                    files.push(path.clone());
                } else {
                    warn!("Unsupported file type: {}", path.display());
                }
            }
            debug!("Selected {} image files", files.len());
            files
        })
    }

    /// Lists images under `root`, one level deep unless recursive.
    fn walk(&self, root: &Path) -> Vec<PathBuf> {
        let mut pending = vec![root.to_path_buf()];
        let mut found = Vec::new();

        while let Some(dir) = pending.pop() {
            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Failed to read directory {}: {e}", dir.display());
                    continue;
                }
            };
            for path in entries.flatten().map(|entry| entry.path()) {
                if path.is_dir() {
                    if self.recursive {
                        pending.push(path);
                    }
                } else if has_raster_extension(&path) {
                    found.push(path);
                }
            }
        }

        found
    }
}

impl ImageSource for FsImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = Result<ImageInfo>> + Send + '_> {
        Box::new(self.collect_files().iter().map(|path| load_image(path)))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.collect_files().len())
    }
}

fn has_raster_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            RASTER_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Loads an image from the filesystem and normalizes it to 8-bit RGB.
///
/// Grayscale sources are expanded to three equal channels and alpha is
/// dropped, matching what the analyzer expects.
///
/// # Errors
///
/// Returns an error naming the path if the file cannot be opened or decoded.
pub fn load_image(path: &Path) -> Result<ImageInfo> {
    let decoded =
        image::open(path).with_context(|| format!("Failed to open image: {}", path.display()))?;

    let decoded = match decoded.color() {
        ColorType::Rgb8 => decoded,
        other => {
            debug!("Converting {} from {other:?} to RGB8", path.display());
            DynamicImage::ImageRgb8(decoded.into_rgb8())
        }
    };

    Ok(ImageInfo::new(path.to_string_lossy(), decoded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_extensions_case_insensitive() {
        for name in ["a.jpg", "b.JPEG", "c.png", "d.TIF", "e.WebP", "f.gif"] {
            assert!(has_raster_extension(Path::new(name)), "{name}");
        }
        for name in ["raw.cr2", "notes.txt", "no_extension", ".png/"] {
            assert!(!has_raster_extension(Path::new(name)), "{name}");
        }
    }

    #[test]
    fn test_missing_path_yields_nothing() {
        let source = FsImageSource::new(vec![PathBuf::from("/definitely/not/here")], false);
        assert_eq!(source.count_hint(), Some(0));
        assert_eq!(source.images().count(), 0);
    }
}
