// SPDX-License-Identifier: AGPL-3.0
// Photo Share Core - In-memory backends
//
// Used for previews and tests; frontends provide the real library and surface.

use crate::library::{ImageQuality, LibraryError, PhotoLibrary};
use crate::photo::PhotoItem;
use crate::sharing::{ShareOutcome, ShareRequest, ShareSurface};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Photo library backed by a fixed set of photos
pub struct MemoryLibrary {
    photos: Vec<PhotoItem>,
    images: HashMap<String, Arc<[u8]>>,
    permission: AtomicBool,
    load_count: AtomicUsize,
}

impl MemoryLibrary {
    pub fn new() -> Self {
        Self {
            photos: Vec::new(),
            images: HashMap::new(),
            permission: AtomicBool::new(true),
            load_count: AtomicUsize::new(0),
        }
    }

    pub fn with_photo(
        mut self,
        asset_id: &str,
        captured_at: NaiveDateTime,
        image: Vec<u8>,
    ) -> Self {
        self.photos.push(PhotoItem::library(asset_id, captured_at));
        self.images.insert(asset_id.to_string(), Arc::from(image));
        self
    }

    pub fn with_permission(self, granted: bool) -> Self {
        self.permission.store(granted, Ordering::SeqCst);
        self
    }

    /// Grants or revokes library access at runtime
    pub fn set_permission(&self, granted: bool) {
        self.permission.store(granted, Ordering::SeqCst);
    }

    /// Number of `load_image` calls served so far
    pub fn load_count(&self) -> usize {
        self.load_count.load(Ordering::SeqCst)
    }
}

impl Default for MemoryLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PhotoLibrary for MemoryLibrary {
    async fn request_permission(&self) -> bool {
        self.permission.load(Ordering::SeqCst)
    }

    async fn photos_on(&self, date: NaiveDate) -> Result<Vec<PhotoItem>, LibraryError> {
        if !self.permission.load(Ordering::SeqCst) {
            return Err(LibraryError::PermissionDenied);
        }
        Ok(self
            .photos
            .iter()
            .filter(|p| p.day() == date)
            .cloned()
            .collect())
    }

    async fn load_image(
        &self,
        asset_id: &str,
        _quality: ImageQuality,
    ) -> Result<Arc<[u8]>, LibraryError> {
        self.load_count.fetch_add(1, Ordering::SeqCst);
        self.images
            .get(asset_id)
            .cloned()
            .ok_or_else(|| LibraryError::NotFound(asset_id.to_string()))
    }
}

/// Share surface that replays scripted outcomes and records every request.
/// Once the script runs out, every presentation is delivered.
pub struct ScriptedShareSurface {
    outcomes: Mutex<VecDeque<ShareOutcome>>,
    requests: Mutex<Vec<ShareRequest>>,
}

impl ScriptedShareSurface {
    pub fn new(outcomes: Vec<ShareOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn delivering() -> Self {
        Self::new(Vec::new())
    }

    pub fn requests(&self) -> Vec<ShareRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ShareSurface for ScriptedShareSurface {
    async fn present(&self, request: ShareRequest) -> ShareOutcome {
        self.requests.lock().unwrap().push(request);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(ShareOutcome::Delivered)
    }
}
