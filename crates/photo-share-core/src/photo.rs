// SPDX-License-Identifier: AGPL-3.0
// Photo Share Core - Photo references

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Identity of a photo within the running app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhotoId(Uuid);

impl PhotoId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PhotoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Where a photo's pixels come from
#[derive(Clone)]
pub enum PhotoSource {
    /// Backed by the photo library; renditions are fetched on demand
    Library { asset_id: String },
    /// Added by the user during this app session; carries its own encoded image
    UserAdded { image: Arc<[u8]> },
}

impl fmt::Debug for PhotoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Library { asset_id } => f
                .debug_struct("Library")
                .field("asset_id", asset_id)
                .finish(),
            Self::UserAdded { image } => f
                .debug_struct("UserAdded")
                .field("bytes", &image.len())
                .finish(),
        }
    }
}

/// A photo that can be distributed to recipients
#[derive(Debug, Clone)]
pub struct PhotoItem {
    pub id: PhotoId,
    pub source: PhotoSource,
    pub captured_at: NaiveDateTime,
}

impl PhotoItem {
    pub fn library(asset_id: impl Into<String>, captured_at: NaiveDateTime) -> Self {
        Self {
            id: PhotoId::new(),
            source: PhotoSource::Library {
                asset_id: asset_id.into(),
            },
            captured_at,
        }
    }

    pub fn user_added(image: impl Into<Arc<[u8]>>, captured_at: NaiveDateTime) -> Self {
        Self {
            id: PhotoId::new(),
            source: PhotoSource::UserAdded {
                image: image.into(),
            },
            captured_at,
        }
    }

    pub fn asset_id(&self) -> Option<&str> {
        match &self.source {
            PhotoSource::Library { asset_id } => Some(asset_id),
            PhotoSource::UserAdded { .. } => None,
        }
    }

    pub fn is_user_added(&self) -> bool {
        matches!(self.source, PhotoSource::UserAdded { .. })
    }

    /// Calendar day the photo was captured on
    pub fn day(&self) -> NaiveDate {
        self.captured_at.date()
    }
}

/// Photos compare by identity only
impl PartialEq for PhotoItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PhotoItem {}
