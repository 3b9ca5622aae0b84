// SPDX-License-Identifier: AGPL-3.0
// Photo Share Core - Photo list view model

use super::ErrorBanner;
use crate::library::{LibraryError, PhotoFilter, PhotoLibrary, PhotoService};
use crate::notify::StateNotifier;
use crate::photo::{PhotoId, PhotoItem};
use async_channel::Receiver;
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct PhotoState {
    pub photos: Vec<PhotoItem>,
    pub selected_date: NaiveDate,
    pub filter: PhotoFilter,
    pub is_loading: bool,
    pub is_sharing_mode: bool,
    /// None until permission has been requested
    pub permission_granted: Option<bool>,
    error: ErrorBanner,
}

impl PhotoState {
    fn new(selected_date: NaiveDate) -> Self {
        Self {
            photos: Vec::new(),
            selected_date,
            filter: PhotoFilter::default(),
            is_loading: false,
            is_sharing_mode: false,
            permission_granted: None,
            error: ErrorBanner::default(),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.message()
    }
}

#[derive(Debug, Clone)]
pub enum PhotoAction {
    RequestPermission,
    LoadPhotos(NaiveDate),
    ChangeDate(NaiveDate),
    SetFilter(PhotoFilter),
    AddUserPhoto {
        image: Arc<[u8]>,
        captured_at: NaiveDateTime,
    },
    RemoveUserPhoto(PhotoId),
    ClearUserPhotos,
    SetSharingMode(bool),
    ClearError,
}

pub struct PhotoViewModel {
    state: PhotoState,
    service: PhotoService,
    notifier: StateNotifier,
}

impl PhotoViewModel {
    pub fn new(library: Arc<dyn PhotoLibrary>, selected_date: NaiveDate) -> Self {
        Self {
            state: PhotoState::new(selected_date),
            service: PhotoService::new(library),
            notifier: StateNotifier::new(),
        }
    }

    pub fn state(&self) -> &PhotoState {
        &self.state
    }

    pub fn photos(&self) -> &[PhotoItem] {
        &self.state.photos
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.state.selected_date
    }

    pub fn service(&self) -> &PhotoService {
        &self.service
    }

    pub fn subscribe(&mut self) -> Receiver<u64> {
        self.notifier.subscribe()
    }

    pub fn tick(&mut self, now: Instant) {
        if self.state.error.expire(now) {
            self.notifier.notify();
        }
    }

    pub async fn send(&mut self, action: PhotoAction) {
        match action {
            PhotoAction::RequestPermission => self.request_permission().await,
            PhotoAction::LoadPhotos(date) => {
                self.load_photos(date, self.state.filter).await;
            }
            PhotoAction::ChangeDate(date) => {
                if self.load_photos(date, self.state.filter).await {
                    self.state.selected_date = date;
                }
            }
            PhotoAction::SetFilter(filter) => {
                if self.load_photos(self.state.selected_date, filter).await {
                    self.state.filter = filter;
                }
            }
            PhotoAction::AddUserPhoto { image, captured_at } => {
                let photo = self.service.add_user_photo(image, captured_at);
                if photo.day() == self.state.selected_date {
                    self.load_photos(self.state.selected_date, self.state.filter)
                        .await;
                }
            }
            PhotoAction::RemoveUserPhoto(id) => {
                if self.service.remove_user_photo(id) {
                    self.state.photos.retain(|p| p.id != id);
                }
            }
            PhotoAction::ClearUserPhotos => {
                self.service.clear_user_photos();
                self.state.photos.retain(|p| !p.is_user_added());
            }
            PhotoAction::SetSharingMode(enabled) => {
                tracing::info!("Sharing mode {}", if enabled { "on" } else { "off" });
                self.state.is_sharing_mode = enabled;
            }
            PhotoAction::ClearError => self.state.error.clear(),
        }
        self.notifier.notify();
    }

    async fn request_permission(&mut self) {
        let granted = self.service.request_permission().await;
        self.state.permission_granted = Some(granted);
        if granted {
            self.load_photos(self.state.selected_date, self.state.filter)
                .await;
        } else {
            self.state.error.show(LibraryError::PermissionDenied.to_string());
        }
    }

    /// Replaces the photo list only when the load succeeds
    async fn load_photos(&mut self, date: NaiveDate, filter: PhotoFilter) -> bool {
        self.state.is_loading = true;
        self.state.error.clear();
        self.notifier.notify();

        let loaded = self.service.load_photos(date, filter).await;
        self.state.is_loading = false;
        match loaded {
            Ok(photos) => {
                self.state.photos = photos;
                true
            }
            Err(e) => {
                self.state.error.show(e.to_string());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryLibrary;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
    }

    fn library() -> Arc<MemoryLibrary> {
        let other = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        Arc::new(
            MemoryLibrary::new()
                .with_photo("morning", day().and_hms_opt(8, 0, 0).unwrap(), vec![1])
                .with_photo("evening", day().and_hms_opt(20, 0, 0).unwrap(), vec![2])
                .with_photo("tomorrow", other.and_hms_opt(8, 0, 0).unwrap(), vec![3]),
        )
    }

    #[tokio::test]
    async fn test_permission_grant_loads_selected_day() {
        let mut vm = PhotoViewModel::new(library(), day());
        vm.send(PhotoAction::RequestPermission).await;

        let ids: Vec<_> = vm.photos().iter().filter_map(|p| p.asset_id()).collect();
        assert_eq!(ids, vec!["evening", "morning"]);
        assert_eq!(vm.state().permission_granted, Some(true));
        assert!(!vm.state().is_loading);
    }

    #[tokio::test]
    async fn test_permission_denied_sets_message() {
        let denied = Arc::new(MemoryLibrary::new().with_permission(false));
        let mut vm = PhotoViewModel::new(denied, day());
        vm.send(PhotoAction::RequestPermission).await;

        assert_eq!(vm.state().permission_granted, Some(false));
        assert_eq!(
            vm.state().error_message(),
            Some(LibraryError::PermissionDenied.to_string().as_str())
        );
        assert!(vm.photos().is_empty());
    }

    #[tokio::test]
    async fn test_user_photos_merge_and_filter() {
        let mut vm = PhotoViewModel::new(library(), day());
        vm.send(PhotoAction::LoadPhotos(day())).await;
        vm.send(PhotoAction::AddUserPhoto {
            image: Arc::from(vec![9u8]),
            captured_at: day().and_hms_opt(12, 0, 0).unwrap(),
        })
        .await;

        assert_eq!(vm.photos().len(), 3);
        assert!(vm.photos()[1].is_user_added());

        vm.send(PhotoAction::SetFilter(PhotoFilter::UserAddedOnly)).await;
        assert_eq!(vm.photos().len(), 1);

        let id = vm.photos()[0].id;
        vm.send(PhotoAction::RemoveUserPhoto(id)).await;
        assert!(vm.photos().is_empty());
        assert!(vm.service().user_photos().is_empty());
    }

    #[tokio::test]
    async fn test_change_date() {
        let mut vm = PhotoViewModel::new(library(), day());
        let next = day().succ_opt().unwrap();
        vm.send(PhotoAction::ChangeDate(next)).await;

        assert_eq!(vm.selected_date(), next);
        assert_eq!(vm.photos().len(), 1);
        assert_eq!(vm.photos()[0].asset_id(), Some("tomorrow"));
    }

    #[tokio::test]
    async fn test_failed_date_change_keeps_current_day() {
        let library = library();
        let mut vm = PhotoViewModel::new(library.clone(), day());
        vm.send(PhotoAction::LoadPhotos(day())).await;
        assert_eq!(vm.photos().len(), 2);

        library.set_permission(false);
        vm.send(PhotoAction::ChangeDate(day().succ_opt().unwrap()))
            .await;

        assert_eq!(vm.selected_date(), day());
        assert_eq!(vm.photos().len(), 2);
        assert!(!vm.state().is_loading);
        assert_eq!(
            vm.state().error_message(),
            Some(LibraryError::PermissionDenied.to_string().as_str())
        );
    }

    #[tokio::test]
    async fn test_clear_user_photos_keeps_library_photos() {
        let mut vm = PhotoViewModel::new(library(), day());
        vm.send(PhotoAction::LoadPhotos(day())).await;
        vm.send(PhotoAction::AddUserPhoto {
            image: Arc::from(vec![9u8]),
            captured_at: day().and_hms_opt(12, 0, 0).unwrap(),
        })
        .await;
        vm.send(PhotoAction::ClearUserPhotos).await;

        assert_eq!(vm.photos().len(), 2);
        assert!(vm.photos().iter().all(|p| !p.is_user_added()));
    }
}
