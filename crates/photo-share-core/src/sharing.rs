// SPDX-License-Identifier: AGPL-3.0
// Photo Share Core - Share surface invocation
//
// Albums are handed to the share surface one at a time. Presentations never
// overlap, and a short pause separates consecutive ones.

use crate::library::{ImageQuality, PhotoService};
use crate::photo::PhotoItem;
use crate::session::TemporaryAlbum;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Pause between consecutive share presentations
pub const DEFAULT_SHARE_DELAY: Duration = Duration::from_millis(500);

/// What the share surface is asked to present
#[derive(Debug, Clone)]
pub struct ShareRequest {
    pub recipient_name: String,
    pub images: Vec<Arc<[u8]>>,
    pub caption: String,
}

/// Completion reported by the share surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Delivered,
    Cancelled,
    Failed(String),
}

/// Native share flow for a list of images and a caption
#[async_trait]
pub trait ShareSurface: Send + Sync {
    async fn present(&self, request: ShareRequest) -> ShareOutcome;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SharingError {
    #[error("There are no photos to share")]
    NoPhotos,

    #[error("Sharing was cancelled")]
    UserCancelled,

    #[error("Sharing failed: {0}")]
    Unknown(String),
}

/// Aggregate tally of a multi-album share
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharingResult {
    pub successful: usize,
    pub failed: usize,
    pub total: usize,
    pub errors: Vec<SharingError>,
}

impl SharingResult {
    pub fn is_success(&self) -> bool {
        self.successful > 0 && self.failed == 0
    }

    pub fn has_partial_success(&self) -> bool {
        self.successful > 0 && self.failed > 0
    }

    /// e.g. "3 of 4 albums shared"
    pub fn summary(&self) -> String {
        format!("{} of {} albums shared", self.successful, self.total)
    }
}

/// Caption attached to every share presentation
pub fn share_caption(recipient_name: &str, photo_count: usize) -> String {
    let noun = if photo_count == 1 { "photo" } else { "photos" };
    format!("📸 {} {} shared with {}", photo_count, noun, recipient_name)
}

pub struct SharingService {
    surface: Arc<dyn ShareSurface>,
    delay: Duration,
}

impl SharingService {
    pub fn new(surface: Arc<dyn ShareSurface>) -> Self {
        Self::with_delay(surface, DEFAULT_SHARE_DELAY)
    }

    pub fn with_delay(surface: Arc<dyn ShareSurface>, delay: Duration) -> Self {
        Self { surface, delay }
    }

    /// Present one recipient's photos. Photos whose image cannot be loaded are skipped.
    pub async fn share_photos(
        &self,
        photos: &[PhotoItem],
        recipient_name: &str,
        photo_service: &PhotoService,
    ) -> Result<(), SharingError> {
        let mut images = Vec::with_capacity(photos.len());
        for photo in photos {
            match photo_service.image_for(photo, ImageQuality::Full).await {
                Ok(image) => images.push(image),
                Err(e) => tracing::warn!("Skipping photo {}: {}", photo.id, e),
            }
        }

        if images.is_empty() {
            return Err(SharingError::NoPhotos);
        }

        tracing::info!("Sharing {} photos with {}", images.len(), recipient_name);
        let request = ShareRequest {
            recipient_name: recipient_name.to_string(),
            caption: share_caption(recipient_name, images.len()),
            images,
        };

        match self.surface.present(request).await {
            ShareOutcome::Delivered => {
                tracing::info!("Share delivered to {}", recipient_name);
                Ok(())
            }
            ShareOutcome::Cancelled => {
                tracing::info!("Share cancelled for {}", recipient_name);
                Err(SharingError::UserCancelled)
            }
            ShareOutcome::Failed(message) => {
                tracing::error!("Share failed for {}: {}", recipient_name, message);
                Err(SharingError::Unknown(message))
            }
        }
    }

    pub async fn share_album(
        &self,
        album: &TemporaryAlbum,
        photo_service: &PhotoService,
    ) -> Result<(), SharingError> {
        if album.is_empty() {
            return Err(SharingError::NoPhotos);
        }
        self.share_photos(album.photos(), &album.recipient.name, photo_service)
            .await
    }

    /// Share every non-empty album in order. A failure never stops the queue.
    pub async fn share_albums(
        &self,
        albums: &[TemporaryAlbum],
        photo_service: &PhotoService,
    ) -> SharingResult {
        let queue: Vec<&TemporaryAlbum> = albums.iter().filter(|a| !a.is_empty()).collect();
        let mut result = SharingResult {
            total: queue.len(),
            ..SharingResult::default()
        };

        tracing::info!("Sharing {} albums", queue.len());
        for (index, album) in queue.iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            match self.share_album(album, photo_service).await {
                Ok(()) => result.successful += 1,
                Err(e) => {
                    result.failed += 1;
                    result.errors.push(e);
                }
            }
        }

        tracing::info!("{}", result.summary());
        result
    }
}
