// SPDX-License-Identifier: AGPL-3.0
// Photo Share Core - Photo source boundary
//
// The library itself is an async capability implemented by each frontend.
// PhotoService layers the session-only store of user-added photos on top.

use crate::photo::{PhotoId, PhotoItem, PhotoSource};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;

/// Rendition size requested from the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageQuality {
    Thumbnail,
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LibraryError {
    #[error("Photo library access is required to continue")]
    PermissionDenied,

    #[error("Photo not found: {0}")]
    NotFound(String),

    #[error("Failed to load image: {0}")]
    Load(String),
}

/// Asynchronous provider of photos captured on a given day
#[async_trait]
pub trait PhotoLibrary: Send + Sync {
    /// Ask for read access. Returns whether access is granted.
    async fn request_permission(&self) -> bool;

    /// Library photos captured on `date`, in any order
    async fn photos_on(&self, date: NaiveDate) -> Result<Vec<PhotoItem>, LibraryError>;

    /// Encoded image bytes for an asset at the requested quality
    async fn load_image(
        &self,
        asset_id: &str,
        quality: ImageQuality,
    ) -> Result<Arc<[u8]>, LibraryError>;
}

/// Which photos a date query returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhotoFilter {
    #[default]
    All,
    UserAddedOnly,
}

/// Library access plus user-added photos for the running session
pub struct PhotoService {
    library: Arc<dyn PhotoLibrary>,
    user_photos: Vec<PhotoItem>,
}

impl PhotoService {
    pub fn new(library: Arc<dyn PhotoLibrary>) -> Self {
        Self {
            library,
            user_photos: Vec::new(),
        }
    }

    pub async fn request_permission(&self) -> bool {
        let granted = self.library.request_permission().await;
        if granted {
            tracing::info!("Photo library access granted");
        } else {
            tracing::warn!("Photo library access denied");
        }
        granted
    }

    /// Photos captured on `date`, newest first
    pub async fn load_photos(
        &self,
        date: NaiveDate,
        filter: PhotoFilter,
    ) -> Result<Vec<PhotoItem>, LibraryError> {
        let mut photos = match filter {
            PhotoFilter::All => self.library.photos_on(date).await?,
            PhotoFilter::UserAddedOnly => Vec::new(),
        };
        let library_count = photos.len();

        photos.extend(
            self.user_photos
                .iter()
                .filter(|p| p.day() == date)
                .cloned(),
        );
        photos.sort_by(|a, b| b.captured_at.cmp(&a.captured_at));

        tracing::info!(
            "Loaded {} photos for {} ({} from library, {} user-added)",
            photos.len(),
            date,
            library_count,
            photos.len() - library_count
        );
        Ok(photos)
    }

    /// Resolve a photo to image bytes. User-added photos carry their own image.
    pub async fn image_for(
        &self,
        photo: &PhotoItem,
        quality: ImageQuality,
    ) -> Result<Arc<[u8]>, LibraryError> {
        match &photo.source {
            PhotoSource::UserAdded { image } => Ok(image.clone()),
            PhotoSource::Library { asset_id } => self.library.load_image(asset_id, quality).await,
        }
    }

    pub async fn load_image(
        &self,
        asset_id: &str,
        quality: ImageQuality,
    ) -> Result<Arc<[u8]>, LibraryError> {
        self.library.load_image(asset_id, quality).await
    }

    pub fn add_user_photo(&mut self, image: Arc<[u8]>, captured_at: NaiveDateTime) -> PhotoItem {
        let photo = PhotoItem::user_added(image, captured_at);
        tracing::info!("User photo added: {}", photo.id);
        self.user_photos.push(photo.clone());
        photo
    }

    pub fn remove_user_photo(&mut self, photo_id: PhotoId) -> bool {
        let before = self.user_photos.len();
        self.user_photos.retain(|p| p.id != photo_id);
        let removed = self.user_photos.len() != before;
        if !removed {
            tracing::warn!("User photo not found: {}", photo_id);
        }
        removed
    }

    pub fn clear_user_photos(&mut self) {
        tracing::info!("Cleared {} user photos", self.user_photos.len());
        self.user_photos.clear();
    }

    pub fn user_photos(&self) -> &[PhotoItem] {
        &self.user_photos
    }

    pub fn library(&self) -> Arc<dyn PhotoLibrary> {
        self.library.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryLibrary;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn service() -> PhotoService {
        let library = MemoryLibrary::new()
            .with_photo("morning", at(10, 8), vec![1])
            .with_photo("evening", at(10, 20), vec![2])
            .with_photo("next-day", at(11, 9), vec![3]);
        PhotoService::new(Arc::new(library))
    }

    #[tokio::test]
    async fn test_merges_user_photos_newest_first() {
        let mut service = service();
        service.add_user_photo(Arc::from(vec![9u8]), at(10, 12));
        service.add_user_photo(Arc::from(vec![8u8]), at(11, 12));

        let day = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let photos = service.load_photos(day, PhotoFilter::All).await.unwrap();
        let hours: Vec<_> = photos.iter().map(|p| p.captured_at).collect();
        assert_eq!(hours, vec![at(10, 20), at(10, 12), at(10, 8)]);

        let user_only = service
            .load_photos(day, PhotoFilter::UserAddedOnly)
            .await
            .unwrap();
        assert_eq!(user_only.len(), 1);
        assert!(user_only[0].is_user_added());
    }

    #[tokio::test]
    async fn test_image_for_resolves_both_sources() {
        let mut service = service();
        let user = service.add_user_photo(Arc::from(vec![7u8]), at(10, 1));
        assert_eq!(&*service.image_for(&user, ImageQuality::Full).await.unwrap(), &[7]);

        let day = NaiveDate::from_ymd_opt(2025, 6, 11).unwrap();
        let lib = service.load_photos(day, PhotoFilter::All).await.unwrap();
        let bytes = service.image_for(&lib[0], ImageQuality::Thumbnail).await.unwrap();
        assert_eq!(&*bytes, &[3]);
    }

    #[test]
    fn test_remove_and_clear_user_photos() {
        let mut service = service();
        let photo = service.add_user_photo(Arc::from(vec![1u8]), at(10, 1));
        assert!(service.remove_user_photo(photo.id));
        assert!(!service.remove_user_photo(photo.id));

        service.add_user_photo(Arc::from(vec![1u8]), at(10, 1));
        service.clear_user_photos();
        assert!(service.user_photos().is_empty());
    }
}
