// SPDX-License-Identifier: AGPL-3.0
// Photo Share Core - Sharing view model

use super::ErrorBanner;
use crate::direction::ShareDirection;
use crate::drag::{classify, DragState, DragTarget, Vector2};
use crate::library::{PhotoLibrary, PhotoService};
use crate::notify::StateNotifier;
use crate::photo::PhotoItem;
use crate::session::{RecipientId, SessionError, SessionStatus, ShareSession};
use crate::sharing::{ShareSurface, SharingError, SharingResult, SharingService};
use async_channel::Receiver;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Observable state of the sharing workflow
#[derive(Debug, Clone, Default)]
pub struct SharingState {
    pub current_session: Option<ShareSession>,
    pub drag_state: DragState,
    pub is_loading: bool,
    pub last_result: Option<SharingResult>,
    error: ErrorBanner,
}

impl SharingState {
    pub fn error_message(&self) -> Option<&str> {
        self.error.message()
    }
}

#[derive(Debug, Clone)]
pub enum SharingAction {
    CreateSession(NaiveDate),
    AddRecipient { name: String, direction: ShareDirection },
    RemoveRecipient(RecipientId),
    StartDrag { photo: PhotoItem, position: Vector2 },
    UpdateDrag(Vector2),
    /// Release the drag; an explicit direction overrides the tracked target
    EndDrag(Option<ShareDirection>),
    DistributePhoto { photo: PhotoItem, direction: ShareDirection },
    DistributePhotoToAll(PhotoItem),
    ClearSession,
    ShareAlbums,
    ShareIndividualAlbum(RecipientId),
    ClearError,
}

pub struct SharingViewModel {
    state: SharingState,
    photos: PhotoService,
    sharing: SharingService,
    notifier: StateNotifier,
}

impl SharingViewModel {
    pub fn new(library: Arc<dyn PhotoLibrary>, surface: Arc<dyn ShareSurface>) -> Self {
        Self::with_sharing_service(library, SharingService::new(surface))
    }

    /// Use a custom pause between share presentations
    pub fn with_share_delay(
        library: Arc<dyn PhotoLibrary>,
        surface: Arc<dyn ShareSurface>,
        delay: Duration,
    ) -> Self {
        Self::with_sharing_service(library, SharingService::with_delay(surface, delay))
    }

    fn with_sharing_service(library: Arc<dyn PhotoLibrary>, sharing: SharingService) -> Self {
        Self {
            state: SharingState::default(),
            photos: PhotoService::new(library),
            sharing,
            notifier: StateNotifier::new(),
        }
    }

    pub fn state(&self) -> &SharingState {
        &self.state
    }

    pub fn session(&self) -> Option<&ShareSession> {
        self.state.current_session.as_ref()
    }

    /// Workflow status changes driven by the wizard
    pub(crate) fn set_session_status(&mut self, status: SessionStatus) {
        if let Some(session) = self.state.current_session.as_mut() {
            tracing::debug!("Session status: {}", status.as_str());
            session.status = status;
            self.notifier.notify();
        }
    }

    pub fn subscribe(&mut self) -> Receiver<u64> {
        self.notifier.subscribe()
    }

    pub fn can_start_sharing(&self) -> bool {
        self.session().is_some_and(|s| s.is_ready_to_share())
    }

    pub fn available_directions(&self) -> Vec<ShareDirection> {
        self.session()
            .map(|s| s.available_directions())
            .unwrap_or_else(|| ShareDirection::ALL.to_vec())
    }

    pub fn total_distributed(&self) -> usize {
        self.session().map_or(0, |s| s.total_distributed())
    }

    /// Expire a stale error message. Call periodically from the frontend loop.
    pub fn tick(&mut self, now: Instant) {
        if self.state.error.expire(now) {
            self.notifier.notify();
        }
    }

    pub async fn send(&mut self, action: SharingAction) {
        match action {
            SharingAction::CreateSession(date) => self.create_session(date),
            SharingAction::AddRecipient { name, direction } => self.add_recipient(&name, direction),
            SharingAction::RemoveRecipient(id) => self.remove_recipient(id),
            SharingAction::StartDrag { photo, position } => {
                tracing::debug!("Drag started: {}", photo.id);
                self.state.drag_state.start(photo, position);
            }
            SharingAction::UpdateDrag(offset) => self.update_drag(offset),
            SharingAction::EndDrag(direction) => self.end_drag(direction),
            SharingAction::DistributePhoto { photo, direction } => {
                self.distribute_photo(&photo, direction)
            }
            SharingAction::DistributePhotoToAll(photo) => self.distribute_photo_to_all(&photo),
            SharingAction::ClearSession => {
                tracing::info!("Sharing session cleared");
                self.state.current_session = None;
                self.state.drag_state.reset();
                self.state.last_result = None;
            }
            SharingAction::ShareAlbums => self.share_albums().await,
            SharingAction::ShareIndividualAlbum(id) => self.share_individual_album(id).await,
            SharingAction::ClearError => self.state.error.clear(),
        }
        self.notifier.notify();
    }

    fn create_session(&mut self, date: NaiveDate) {
        tracing::info!("Creating sharing session for {}", date);
        self.state.current_session = Some(ShareSession::new(date));
        self.state.drag_state.reset();
        self.state.last_result = None;
    }

    fn add_recipient(&mut self, name: &str, direction: ShareDirection) {
        let Some(session) = self.state.current_session.as_mut() else {
            self.state.error.show(SessionError::NoSession.to_string());
            return;
        };
        if let Err(e) = session.add_recipient(name, direction) {
            self.state.error.show(e.to_string());
        }
    }

    fn remove_recipient(&mut self, id: RecipientId) {
        let Some(session) = self.state.current_session.as_mut() else {
            self.state.error.show(SessionError::NoSession.to_string());
            return;
        };
        if let Err(e) = session.remove_recipient(id) {
            self.state.error.show(e.to_string());
        }
    }

    /// Classify the offset, then drop directional targets nobody sits in
    fn update_drag(&mut self, offset: Vector2) {
        let target = match classify(offset) {
            DragTarget::Direction(direction)
                if !self.session().is_some_and(|s| s.is_direction_taken(direction)) =>
            {
                DragTarget::None
            }
            target => target,
        };
        self.state.drag_state.update(offset, target);
    }

    fn end_drag(&mut self, direction: Option<ShareDirection>) {
        let drag = std::mem::take(&mut self.state.drag_state);
        let Some(photo) = drag.current_photo.as_ref() else {
            tracing::debug!("Drag released without a photo");
            return;
        };

        if drag.is_targeting_all() {
            self.distribute_photo_to_all(photo);
            return;
        }

        match direction.or(drag.target_direction()) {
            Some(direction) => self.distribute_photo(photo, direction),
            None => tracing::debug!("Drag released outside any target"),
        }
    }

    fn distribute_photo(&mut self, photo: &PhotoItem, direction: ShareDirection) {
        let result = match self.state.current_session.as_mut() {
            Some(session) => session.distribute_photo(photo, direction).map(|_| ()),
            None => Err(SessionError::NoSession),
        };
        if let Err(e) = result {
            self.state.error.show(e.to_string());
        }
    }

    fn distribute_photo_to_all(&mut self, photo: &PhotoItem) {
        let result = match self.state.current_session.as_mut() {
            Some(session) => session.distribute_photo_to_all(photo).map(|_| ()),
            None => Err(SessionError::NoSession),
        };
        if let Err(e) = result {
            self.state.error.show(e.to_string());
        }
    }

    async fn share_albums(&mut self) {
        let Some(session) = self.state.current_session.as_ref() else {
            self.state.error.show(SessionError::NoSession.to_string());
            return;
        };
        let albums = session.non_empty_albums();

        self.state.is_loading = true;
        self.state.error.clear();
        self.notifier.notify();

        let result = self.sharing.share_albums(&albums, &self.photos).await;
        self.state.is_loading = false;

        if result.is_success() {
            if let Some(session) = self.state.current_session.as_mut() {
                session.status = SessionStatus::Completed;
                session.total_photos_shared = result.successful;
            }
        } else if result.has_partial_success() {
            if let Some(session) = self.state.current_session.as_mut() {
                session.status = SessionStatus::Sharing;
                session.total_photos_shared = result.successful;
            }
            self.state
                .error
                .show(format!("Only some albums were shared ({})", result.summary()));
        } else {
            let message = result
                .errors
                .first()
                .cloned()
                .unwrap_or(SharingError::NoPhotos)
                .to_string();
            self.state.error.show(message);
        }

        self.state.last_result = Some(result);
    }

    async fn share_individual_album(&mut self, id: RecipientId) {
        let album = match self.session().and_then(|s| s.album_for(id)) {
            Some(album) => album.clone(),
            None => {
                self.state.error.show(SessionError::RecipientNotFound.to_string());
                return;
            }
        };
        if album.is_empty() {
            self.state.error.show(SharingError::NoPhotos.to_string());
            return;
        }

        self.state.is_loading = true;
        self.state.error.clear();
        self.notifier.notify();

        let result = self.sharing.share_album(&album, &self.photos).await;
        self.state.is_loading = false;

        match result {
            Ok(()) => tracing::info!("Album shared with {}", album.recipient.name),
            Err(e) => self.state.error.show(e.to_string()),
        }
    }
}
