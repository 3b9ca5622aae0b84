// SPDX-License-Identifier: AGPL-3.0
// Photo Share Core - Fullscreen photo viewer
//
// Full-resolution fetches run as background tasks and report back over a
// channel. Results always land in the cache, but only the photo currently on
// screen is swapped in. The chrome hides itself after a period of inactivity.

use crate::cache::{ImageCache, FULL_IMAGE_CACHE_CAPACITY};
use crate::library::{ImageQuality, PhotoLibrary};
use crate::photo::{PhotoItem, PhotoSource};
use async_channel::{Receiver, Sender};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Inactivity before the viewer chrome hides
pub const UI_HIDE_DELAY: Duration = Duration::from_secs(3);

/// Background completions delivered to the viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEvent {
    Loaded { asset_id: String },
    LoadFailed { asset_id: String, message: String },
    UiHidden { generation: u64 },
}

pub struct PhotoViewer {
    photos: Vec<PhotoItem>,
    index: usize,
    library: Arc<dyn PhotoLibrary>,
    cache: Arc<Mutex<ImageCache>>,
    in_flight: Arc<Mutex<HashSet<String>>>,
    displayed: Option<Arc<[u8]>>,
    ui_visible: bool,
    hide_timer: Option<JoinHandle<()>>,
    timer_generation: u64,
    event_tx: Sender<ViewerEvent>,
    event_rx: Receiver<ViewerEvent>,
}

impl PhotoViewer {
    /// Open the viewer on `start_index` (clamped). Must be called inside a tokio runtime.
    pub fn open(library: Arc<dyn PhotoLibrary>, photos: Vec<PhotoItem>, start_index: usize) -> Self {
        let (event_tx, event_rx) = async_channel::unbounded();
        let index = start_index.min(photos.len().saturating_sub(1));
        let mut viewer = Self {
            photos,
            index,
            library,
            cache: Arc::new(Mutex::new(ImageCache::new(FULL_IMAGE_CACHE_CAPACITY))),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            displayed: None,
            ui_visible: true,
            hide_timer: None,
            timer_generation: 0,
            event_tx,
            event_rx,
        };
        viewer.request_current();
        viewer.restart_hide_timer();
        viewer
    }

    pub fn current(&self) -> Option<&PhotoItem> {
        self.photos.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Full-resolution image for the current photo, if it has arrived
    pub fn displayed_image(&self) -> Option<Arc<[u8]>> {
        self.displayed.clone()
    }

    pub fn is_cached(&self, asset_id: &str) -> bool {
        self.cache.lock().unwrap().contains(asset_id)
    }

    pub fn cached_count(&self) -> usize {
        self.cache.lock().unwrap().len()
    }

    pub fn is_loading_full_quality(&self, asset_id: &str) -> bool {
        self.in_flight.lock().unwrap().contains(asset_id)
    }

    pub fn ui_visible(&self) -> bool {
        self.ui_visible
    }

    pub fn next(&mut self) -> bool {
        if self.index + 1 >= self.photos.len() {
            return false;
        }
        self.index += 1;
        self.on_page_changed();
        true
    }

    pub fn previous(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.on_page_changed();
        true
    }

    /// Any tap or swipe; shows the chrome and restarts the hide timer
    pub fn interact(&mut self) {
        self.ui_visible = true;
        self.restart_hide_timer();
    }

    pub fn toggle_ui(&mut self) {
        if self.ui_visible {
            self.ui_visible = false;
            self.cancel_hide_timer();
        } else {
            self.interact();
        }
    }

    /// Wait for the next background event and apply it
    pub async fn next_event(&mut self) -> Option<ViewerEvent> {
        let event = self.event_rx.recv().await.ok()?;
        self.apply(&event);
        Some(event)
    }

    /// Apply a background event. Returns whether visible state changed.
    pub fn apply(&mut self, event: &ViewerEvent) -> bool {
        match event {
            ViewerEvent::Loaded { asset_id } => {
                if self.current().and_then(|p| p.asset_id()) != Some(asset_id.as_str()) {
                    tracing::debug!("Stale full image for {} kept in cache only", asset_id);
                    return false;
                }
                self.displayed = self.cache.lock().unwrap().get(asset_id);
                self.displayed.is_some()
            }
            ViewerEvent::LoadFailed { asset_id, message } => {
                tracing::warn!("Full image for {} failed: {}", asset_id, message);
                false
            }
            ViewerEvent::UiHidden { generation } => {
                if *generation != self.timer_generation || !self.ui_visible {
                    return false;
                }
                self.ui_visible = false;
                self.hide_timer = None;
                true
            }
        }
    }

    fn on_page_changed(&mut self) {
        self.request_current();
        self.interact();
    }

    /// Show the current photo's full image from cache, or start fetching it
    fn request_current(&mut self) {
        self.displayed = None;
        let asset_id = match self.photos.get(self.index).map(|p| &p.source) {
            None => return,
            Some(PhotoSource::UserAdded { image }) => {
                self.displayed = Some(image.clone());
                return;
            }
            Some(PhotoSource::Library { asset_id }) => asset_id.clone(),
        };

        if let Some(image) = self.cache.lock().unwrap().get(&asset_id) {
            tracing::debug!("Full image cache hit: {}", asset_id);
            self.displayed = Some(image);
            return;
        }

        if !self.in_flight.lock().unwrap().insert(asset_id.clone()) {
            tracing::debug!("Full image already loading: {}", asset_id);
            return;
        }

        let library = self.library.clone();
        let cache = self.cache.clone();
        let in_flight = self.in_flight.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = library.load_image(&asset_id, ImageQuality::Full).await;
            let event = match result {
                Ok(image) => {
                    if let Some(evicted) = cache.lock().unwrap().insert(asset_id.clone(), image) {
                        tracing::debug!("Evicted {} from full image cache", evicted);
                    }
                    ViewerEvent::Loaded { asset_id: asset_id.clone() }
                }
                Err(e) => ViewerEvent::LoadFailed {
                    asset_id: asset_id.clone(),
                    message: e.to_string(),
                },
            };
            in_flight.lock().unwrap().remove(&asset_id);
            let _ = tx.send(event).await;
        });
    }

    fn restart_hide_timer(&mut self) {
        self.cancel_hide_timer();
        let generation = self.timer_generation;
        let tx = self.event_tx.clone();
        self.hide_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(UI_HIDE_DELAY).await;
            let _ = tx.send(ViewerEvent::UiHidden { generation }).await;
        }));
    }

    fn cancel_hide_timer(&mut self) {
        self.timer_generation += 1;
        if let Some(handle) = self.hide_timer.take() {
            handle.abort();
        }
    }
}

impl Drop for PhotoViewer {
    fn drop(&mut self) {
        if let Some(handle) = self.hide_timer.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryLibrary;
    use chrono::NaiveDate;

    fn at(hour: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, 9)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn library() -> Arc<MemoryLibrary> {
        Arc::new(
            MemoryLibrary::new()
                .with_photo("a", at(9), vec![0xA])
                .with_photo("b", at(10), vec![0xB]),
        )
    }

    fn photos() -> Vec<PhotoItem> {
        vec![PhotoItem::library("a", at(9)), PhotoItem::library("b", at(10))]
    }

    async fn drain_loads(viewer: &mut PhotoViewer, count: usize) -> Vec<(String, bool)> {
        let mut seen = Vec::new();
        while seen.len() < count {
            let event = viewer.event_rx.recv().await.unwrap();
            if let ViewerEvent::Loaded { asset_id } = &event {
                seen.push((asset_id.clone(), viewer.apply(&event)));
            }
        }
        seen
    }

    #[tokio::test]
    async fn test_loads_current_full_image() {
        let mut viewer = PhotoViewer::open(library(), photos(), 0);
        assert!(viewer.is_loading_full_quality("a") || viewer.is_cached("a"));

        let seen = drain_loads(&mut viewer, 1).await;
        assert_eq!(seen, vec![("a".to_string(), true)]);
        assert_eq!(viewer.displayed_image().as_deref(), Some(&[0xA][..]));
        assert!(!viewer.is_loading_full_quality("a"));
    }

    #[tokio::test]
    async fn test_stale_result_cached_but_not_displayed() {
        let mut viewer = PhotoViewer::open(library(), photos(), 0);
        assert!(viewer.next());

        let mut seen = drain_loads(&mut viewer, 2).await;
        seen.sort();
        assert_eq!(
            seen,
            vec![("a".to_string(), false), ("b".to_string(), true)]
        );
        assert!(viewer.is_cached("a"));
        assert_eq!(viewer.displayed_image().as_deref(), Some(&[0xB][..]));
    }

    #[tokio::test]
    async fn test_one_fetch_per_asset() {
        let library = library();
        let mut viewer = PhotoViewer::open(library.clone(), photos(), 0);
        viewer.next();
        viewer.previous();

        drain_loads(&mut viewer, 2).await;
        assert_eq!(library.load_count(), 2);
        assert_eq!(viewer.displayed_image().as_deref(), Some(&[0xA][..]));

        // Served from cache from now on
        viewer.next();
        assert_eq!(viewer.displayed_image().as_deref(), Some(&[0xB][..]));
        assert_eq!(library.load_count(), 2);
    }

    #[tokio::test]
    async fn test_user_added_photo_skips_fetch() {
        let library = library();
        let photo = PhotoItem::user_added(vec![1u8, 2], at(11));
        let viewer = PhotoViewer::open(library.clone(), vec![photo], 0);

        assert_eq!(viewer.displayed_image().as_deref(), Some(&[1u8, 2][..]));
        assert_eq!(library.load_count(), 0);
    }

    #[tokio::test]
    async fn test_navigation_is_clamped() {
        let mut viewer = PhotoViewer::open(library(), photos(), 10);
        assert_eq!(viewer.index(), 1);
        assert!(!viewer.next());
        assert!(viewer.previous());
        assert!(!viewer.previous());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ui_hides_after_inactivity() {
        let started = tokio::time::Instant::now();
        let mut viewer = PhotoViewer::open(Arc::new(MemoryLibrary::new()), Vec::new(), 0);
        assert!(viewer.ui_visible());

        tokio::time::sleep(Duration::from_secs(2)).await;
        viewer.interact();

        let event = viewer.next_event().await.unwrap();
        assert!(matches!(event, ViewerEvent::UiHidden { .. }));
        assert!(!viewer.ui_visible());
        assert!(started.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_off_cancels_timer() {
        let mut viewer = PhotoViewer::open(Arc::new(MemoryLibrary::new()), Vec::new(), 0);
        viewer.toggle_ui();
        assert!(!viewer.ui_visible());

        tokio::time::sleep(UI_HIDE_DELAY * 2).await;
        assert!(viewer.event_rx.try_recv().is_err());

        viewer.toggle_ui();
        assert!(viewer.ui_visible());
    }

    #[test]
    fn test_superseded_hide_event_ignored() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        rt.block_on(async {
            let mut viewer = PhotoViewer::open(Arc::new(MemoryLibrary::new()), Vec::new(), 0);
            let stale = ViewerEvent::UiHidden {
                generation: viewer.timer_generation,
            };
            viewer.interact();
            assert!(!viewer.apply(&stale));
            assert!(viewer.ui_visible());
        });
    }
}
