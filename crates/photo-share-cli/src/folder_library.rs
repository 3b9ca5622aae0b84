// SPDX-License-Identifier: AGPL-3.0
// Photo Share CLI - Folder backed photo library
//
// Every image file directly inside the folder is one photo. A photo's
// capture time is the file's modification time in local time.

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate};
use image::imageops::FilterType;
use image::ImageFormat;
use photo_share_core::{ImageQuality, LibraryError, PhotoItem, PhotoLibrary};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Edge length of generated thumbnails
const THUMBNAIL_SIZE: u32 = 200;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

pub struct FolderLibrary {
    root: PathBuf,
}

impl FolderLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn is_image(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
    }

    /// Resolve an asset id to a file directly inside the root
    fn asset_path(&self, asset_id: &str) -> Result<PathBuf, LibraryError> {
        let name = Path::new(asset_id);
        if name.file_name() != Some(name.as_os_str()) {
            return Err(LibraryError::NotFound(asset_id.to_string()));
        }
        Ok(self.root.join(name))
    }
}

fn render_thumbnail(bytes: &[u8]) -> Result<Vec<u8>, LibraryError> {
    let img = image::load_from_memory(bytes).map_err(|e| LibraryError::Load(e.to_string()))?;
    let thumbnail = img.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Triangle);

    let mut out = Cursor::new(Vec::new());
    thumbnail
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| LibraryError::Load(e.to_string()))?;
    Ok(out.into_inner())
}

#[async_trait]
impl PhotoLibrary for FolderLibrary {
    async fn request_permission(&self) -> bool {
        match tokio::fs::metadata(&self.root).await {
            Ok(meta) => meta.is_dir(),
            Err(e) => {
                tracing::warn!("Cannot open library {:?}: {}", self.root, e);
                false
            }
        }
    }

    async fn photos_on(&self, date: NaiveDate) -> Result<Vec<PhotoItem>, LibraryError> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|_| LibraryError::PermissionDenied)?;

        let mut photos = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| LibraryError::Load(e.to_string()))?
        {
            let path = entry.path();
            if !Self::is_image(&path) {
                continue;
            }
            let modified = match entry.metadata().await.and_then(|m| m.modified()) {
                Ok(modified) => modified,
                Err(e) => {
                    tracing::warn!("Skipping {:?}: {}", path, e);
                    continue;
                }
            };

            let captured_at = DateTime::<Local>::from(modified).naive_local();
            if captured_at.date() != date {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                photos.push(PhotoItem::library(name, captured_at));
            }
        }

        tracing::debug!("{} photos in {:?} for {}", photos.len(), self.root, date);
        Ok(photos)
    }

    async fn load_image(
        &self,
        asset_id: &str,
        quality: ImageQuality,
    ) -> Result<Arc<[u8]>, LibraryError> {
        let path = self.asset_path(asset_id)?;
        let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LibraryError::NotFound(asset_id.to_string()),
            _ => LibraryError::Load(e.to_string()),
        })?;

        match quality {
            ImageQuality::Full => Ok(Arc::from(bytes)),
            ImageQuality::Thumbnail => {
                let thumbnail = tokio::task::spawn_blocking(move || render_thumbnail(&bytes))
                    .await
                    .map_err(|e| LibraryError::Load(e.to_string()))??;
                Ok(Arc::from(thumbnail))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, RgbImage};

    fn library_with_png() -> (tempfile::TempDir, FolderLibrary) {
        let dir = tempfile::tempdir().unwrap();
        RgbImage::new(400, 300).save(dir.path().join("sunset.png")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a photo").unwrap();
        let library = FolderLibrary::new(dir.path());
        (dir, library)
    }

    #[tokio::test]
    async fn test_lists_images_modified_today() {
        let (_dir, library) = library_with_png();
        assert!(library.request_permission().await);

        let today = Local::now().date_naive();
        let photos = library.photos_on(today).await.unwrap();
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].asset_id(), Some("sunset.png"));

        let yesterday = today.pred_opt().unwrap();
        assert!(library.photos_on(yesterday).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_thumbnail_fits_bounds() {
        let (_dir, library) = library_with_png();
        let bytes = library
            .load_image("sunset.png", ImageQuality::Thumbnail)
            .await
            .unwrap();
        let thumbnail = image::load_from_memory(&bytes).unwrap();
        assert_eq!(thumbnail.dimensions(), (200, 150));
    }

    #[tokio::test]
    async fn test_rejects_paths_outside_root() {
        let (_dir, library) = library_with_png();
        let err = library
            .load_image("../sunset.png", ImageQuality::Full)
            .await
            .unwrap_err();
        assert_eq!(err, LibraryError::NotFound("../sunset.png".into()));
    }

    #[tokio::test]
    async fn test_missing_folder_denies_permission() {
        let library = FolderLibrary::new("/definitely/not/here");
        assert!(!library.request_permission().await);
    }
}
