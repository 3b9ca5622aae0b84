// SPDX-License-Identifier: AGPL-3.0
// Photo Share Core - Recipients, albums and the sharing session
//
// Sessions live in memory only and are replaced wholesale on "start over".

use crate::direction::ShareDirection;
use crate::photo::{PhotoId, PhotoItem};
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use uuid::Uuid;

/// Maximum number of recipients, one per compass direction
pub const MAX_RECIPIENTS: usize = ShareDirection::ALL.len();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecipientId(Uuid);

impl RecipientId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RecipientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A share target sitting in one compass slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub id: RecipientId,
    pub name: String,
    pub direction: ShareDirection,
    /// Hex colour derived from the direction
    pub color: &'static str,
    pub created_at: DateTime<Utc>,
}

impl Recipient {
    pub fn new(name: impl Into<String>, direction: ShareDirection) -> Self {
        Self {
            id: RecipientId::new(),
            name: name.into(),
            direction,
            color: direction.recipient_color(),
            created_at: Utc::now(),
        }
    }
}

/// Photos queued for one recipient
#[derive(Debug, Clone)]
pub struct TemporaryAlbum {
    pub id: Uuid,
    pub recipient: Recipient,
    photos: Vec<PhotoItem>,
    pub created_at: DateTime<Utc>,
}

impl TemporaryAlbum {
    pub fn new(recipient: Recipient) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient,
            photos: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn photos(&self) -> &[PhotoItem] {
        &self.photos
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn photo_count(&self) -> usize {
        self.photos.len()
    }

    pub fn contains(&self, photo_id: PhotoId) -> bool {
        self.photos.iter().any(|p| p.id == photo_id)
    }

    /// Append a photo unless it is already queued. Returns whether it was added.
    pub fn add_photo(&mut self, photo: &PhotoItem) -> bool {
        if self.contains(photo.id) {
            return false;
        }
        self.photos.push(photo.clone());
        true
    }

    pub fn remove_photo(&mut self, photo_id: PhotoId) {
        self.photos.retain(|p| p.id != photo_id);
    }
}

/// Progress of the sharing workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Setup,
    Distributing,
    Ready,
    Sharing,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Distributing => "distributing",
            Self::Ready => "ready",
            Self::Sharing => "sharing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Recipient and distribution errors, displayed verbatim to the user
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("The {0} direction is already in use")]
    DirectionTaken(ShareDirection),

    #[error("You can add at most {} recipients", MAX_RECIPIENTS)]
    RecipientLimit,

    #[error("Recipient name cannot be empty")]
    EmptyName,

    #[error("No recipient in the {0} direction")]
    NoRecipientForDirection(ShareDirection),

    #[error("Add recipients before distributing photos")]
    NoRecipients,

    #[error("No active sharing session")]
    NoSession,

    #[error("Recipient not found")]
    RecipientNotFound,
}

/// The active sharing workflow for one calendar day
#[derive(Debug, Clone)]
pub struct ShareSession {
    pub id: Uuid,
    pub selected_date: NaiveDate,
    recipients: Vec<Recipient>,
    albums: Vec<TemporaryAlbum>,
    pub total_photos_shared: usize,
    pub created_at: DateTime<Utc>,
    pub status: SessionStatus,
}

impl ShareSession {
    pub fn new(selected_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            selected_date,
            recipients: Vec::new(),
            albums: Vec::new(),
            total_photos_shared: 0,
            created_at: Utc::now(),
            status: SessionStatus::Setup,
        }
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn albums(&self) -> &[TemporaryAlbum] {
        &self.albums
    }

    /// Add a recipient and its empty album.
    ///
    /// Leaves the session untouched on error.
    pub fn add_recipient(
        &mut self,
        name: &str,
        direction: ShareDirection,
    ) -> Result<&Recipient, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        if self.recipients.len() >= MAX_RECIPIENTS {
            return Err(SessionError::RecipientLimit);
        }
        if self.is_direction_taken(direction) {
            return Err(SessionError::DirectionTaken(direction));
        }

        let recipient = Recipient::new(name, direction);
        tracing::info!(
            "Recipient added: {} -> {}",
            recipient.name,
            direction.as_str()
        );
        self.albums.push(TemporaryAlbum::new(recipient.clone()));
        self.recipients.push(recipient);
        Ok(&self.recipients[self.recipients.len() - 1])
    }

    /// Remove a recipient together with its album
    pub fn remove_recipient(&mut self, recipient_id: RecipientId) -> Result<Recipient, SessionError> {
        let index = self
            .recipients
            .iter()
            .position(|r| r.id == recipient_id)
            .ok_or(SessionError::RecipientNotFound)?;

        let removed = self.recipients.remove(index);
        self.albums.retain(|a| a.recipient.id != recipient_id);
        tracing::info!("Recipient removed: {}", removed.name);
        Ok(removed)
    }

    pub fn recipient_at(&self, direction: ShareDirection) -> Option<&Recipient> {
        self.recipients.iter().find(|r| r.direction == direction)
    }

    pub fn is_direction_taken(&self, direction: ShareDirection) -> bool {
        self.recipient_at(direction).is_some()
    }

    /// Unassigned directions, in priority order
    pub fn available_directions(&self) -> Vec<ShareDirection> {
        ShareDirection::ALL
            .into_iter()
            .filter(|d| !self.is_direction_taken(*d))
            .collect()
    }

    pub fn album_for(&self, recipient_id: RecipientId) -> Option<&TemporaryAlbum> {
        self.albums.iter().find(|a| a.recipient.id == recipient_id)
    }

    pub fn album_for_direction(&self, direction: ShareDirection) -> Option<&TemporaryAlbum> {
        self.albums
            .iter()
            .find(|a| a.recipient.direction == direction)
    }

    fn album_mut(&mut self, recipient_id: RecipientId) -> Option<&mut TemporaryAlbum> {
        self.albums
            .iter_mut()
            .find(|a| a.recipient.id == recipient_id)
    }

    /// Idempotent add. Returns whether the album changed.
    pub fn add_photo_to_recipient(&mut self, photo: &PhotoItem, recipient_id: RecipientId) -> bool {
        self.album_mut(recipient_id)
            .map(|album| album.add_photo(photo))
            .unwrap_or(false)
    }

    pub fn remove_photo_from_recipient(&mut self, photo_id: PhotoId, recipient_id: RecipientId) {
        if let Some(album) = self.album_mut(recipient_id) {
            album.remove_photo(photo_id);
        }
    }

    /// Queue a photo for the recipient sitting at `direction`
    pub fn distribute_photo(
        &mut self,
        photo: &PhotoItem,
        direction: ShareDirection,
    ) -> Result<&Recipient, SessionError> {
        let recipient_id = self
            .recipient_at(direction)
            .map(|r| r.id)
            .ok_or(SessionError::NoRecipientForDirection(direction))?;

        self.add_photo_to_recipient(photo, recipient_id);
        tracing::debug!("Photo {} distributed to {}", photo.id, direction.as_str());

        self.recipients
            .iter()
            .find(|r| r.id == recipient_id)
            .ok_or(SessionError::RecipientNotFound)
    }

    /// Queue a photo for every recipient. Returns how many recipients received it.
    pub fn distribute_photo_to_all(&mut self, photo: &PhotoItem) -> Result<usize, SessionError> {
        if self.recipients.is_empty() {
            return Err(SessionError::NoRecipients);
        }

        for album in &mut self.albums {
            album.add_photo(photo);
        }
        tracing::debug!(
            "Photo {} distributed to all {} recipients",
            photo.id,
            self.recipients.len()
        );
        Ok(self.recipients.len())
    }

    pub fn total_distributed(&self) -> usize {
        self.albums.iter().map(|a| a.photo_count()).sum()
    }

    pub fn has_distributed_photos(&self) -> bool {
        self.total_distributed() > 0
    }

    /// At least one album has something to share
    pub fn is_ready_to_share(&self) -> bool {
        self.albums.iter().any(|a| !a.is_empty())
    }

    pub fn non_empty_albums(&self) -> Vec<TemporaryAlbum> {
        self.albums.iter().filter(|a| !a.is_empty()).cloned().collect()
    }
}
