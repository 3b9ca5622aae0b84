// SPDX-License-Identifier: AGPL-3.0
// Photo Share Core - Four step sharing wizard

use crate::session::SessionStatus;
use crate::viewmodel::{PhotoViewModel, SharingAction, SharingViewModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SharingStep {
    #[default]
    DateSelection,
    RecipientSetup,
    PhotoDistribution,
    AlbumPreview,
}

impl SharingStep {
    pub const ALL: [SharingStep; 4] = [
        SharingStep::DateSelection,
        SharingStep::RecipientSetup,
        SharingStep::PhotoDistribution,
        SharingStep::AlbumPreview,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::DateSelection => "Photos",
            Self::RecipientSetup => "Recipients",
            Self::PhotoDistribution => "Distribute",
            Self::AlbumPreview => "Share",
        }
    }

    pub fn next_button_title(&self) -> &'static str {
        match self {
            Self::DateSelection => "Next",
            Self::RecipientSetup => "Start distributing",
            Self::PhotoDistribution => "Review albums",
            Self::AlbumPreview => "Done",
        }
    }

    fn following(&self) -> Option<SharingStep> {
        Self::ALL.get(self.index() + 1).copied()
    }

    fn preceding(&self) -> Option<SharingStep> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }
}

/// Step navigation across the photo and sharing view models
#[derive(Debug, Default)]
pub struct Wizard {
    step: SharingStep,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> SharingStep {
        self.step
    }

    pub fn can_proceed(&self, photos: &PhotoViewModel, sharing: &SharingViewModel) -> bool {
        match self.step {
            SharingStep::DateSelection => !photos.photos().is_empty(),
            SharingStep::RecipientSetup => sharing
                .session()
                .is_some_and(|s| !s.recipients().is_empty()),
            SharingStep::PhotoDistribution => sharing.total_distributed() > 0,
            SharingStep::AlbumPreview => false,
        }
    }

    /// Advance one step if the current one is complete. Returns whether it moved.
    pub fn next(&mut self, photos: &PhotoViewModel, sharing: &mut SharingViewModel) -> bool {
        if !self.can_proceed(photos, sharing) {
            return false;
        }
        let Some(next) = self.step.following() else {
            return false;
        };

        match next {
            SharingStep::PhotoDistribution => sharing.set_session_status(SessionStatus::Distributing),
            SharingStep::AlbumPreview if sharing.can_start_sharing() => {
                sharing.set_session_status(SessionStatus::Ready)
            }
            _ => {}
        }

        tracing::info!("Wizard: {} -> {}", self.step.title(), next.title());
        self.step = next;
        true
    }

    pub fn previous(&mut self) -> bool {
        match self.step.preceding() {
            Some(prev) => {
                self.step = prev;
                true
            }
            None => false,
        }
    }

    /// Drop the current session and begin again on the selected date
    pub async fn start_over(&mut self, photos: &PhotoViewModel, sharing: &mut SharingViewModel) {
        tracing::info!("Wizard restarted");
        sharing.send(SharingAction::ClearSession).await;
        sharing
            .send(SharingAction::CreateSession(photos.selected_date()))
            .await;
        self.step = SharingStep::DateSelection;
    }

    /// Short progress text for the current step
    pub fn completion_info(&self, photos: &PhotoViewModel, sharing: &SharingViewModel) -> String {
        let recipients = sharing.session().map_or(0, |s| s.recipients().len());
        match self.step {
            SharingStep::DateSelection => {
                if photos.state().is_loading {
                    "Checking...".to_string()
                } else if photos.photos().is_empty() {
                    "No photos".to_string()
                } else {
                    format!("{} photos", photos.photos().len())
                }
            }
            SharingStep::RecipientSetup => match recipients {
                0 => "No recipients".to_string(),
                n => format!("{} recipients set", n),
            },
            SharingStep::PhotoDistribution => match sharing.total_distributed() {
                0 if recipients == 0 => "Add recipients first".to_string(),
                0 => "Drag to distribute".to_string(),
                n => format!("{} distributed", n),
            },
            SharingStep::AlbumPreview => {
                if sharing.can_start_sharing() {
                    "Ready".to_string()
                } else {
                    "Distribute photos first".to_string()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::ShareDirection;
    use crate::memory::{MemoryLibrary, ScriptedShareSurface};
    use crate::viewmodel::PhotoAction;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 4).unwrap()
    }

    async fn setup() -> (PhotoViewModel, SharingViewModel) {
        let library = Arc::new(MemoryLibrary::new().with_photo(
            "beach",
            day().and_hms_opt(15, 30, 0).unwrap(),
            vec![7],
        ));
        let mut photos = PhotoViewModel::new(library.clone(), day());
        photos.send(PhotoAction::LoadPhotos(day())).await;
        let mut sharing =
            SharingViewModel::new(library, Arc::new(ScriptedShareSurface::delivering()));
        sharing.send(SharingAction::CreateSession(day())).await;
        (photos, sharing)
    }

    #[tokio::test]
    async fn test_walkthrough() {
        let (photos, mut sharing) = setup().await;
        let mut wizard = Wizard::new();

        assert!(wizard.next(&photos, &mut sharing));
        assert_eq!(wizard.step(), SharingStep::RecipientSetup);
        assert_eq!(wizard.completion_info(&photos, &sharing), "No recipients");
        assert!(!wizard.next(&photos, &mut sharing));

        sharing
            .send(SharingAction::AddRecipient {
                name: "Jo".into(),
                direction: ShareDirection::Top,
            })
            .await;
        assert!(wizard.next(&photos, &mut sharing));
        assert_eq!(sharing.session().unwrap().status, SessionStatus::Distributing);
        assert!(!wizard.next(&photos, &mut sharing));

        sharing
            .send(SharingAction::DistributePhotoToAll(photos.photos()[0].clone()))
            .await;
        assert_eq!(wizard.completion_info(&photos, &sharing), "1 distributed");
        assert!(wizard.next(&photos, &mut sharing));
        assert_eq!(wizard.step(), SharingStep::AlbumPreview);
        assert_eq!(sharing.session().unwrap().status, SessionStatus::Ready);

        // Preview is terminal
        assert!(!wizard.next(&photos, &mut sharing));
        assert!(wizard.previous());
        assert_eq!(wizard.step(), SharingStep::PhotoDistribution);
    }

    #[test]
    fn test_step_titles() {
        let titles: Vec<_> = SharingStep::ALL.iter().map(|s| s.title()).collect();
        assert_eq!(titles, vec!["Photos", "Recipients", "Distribute", "Share"]);
        assert_eq!(SharingStep::RecipientSetup.next_button_title(), "Start distributing");
        assert_eq!(SharingStep::AlbumPreview.next_button_title(), "Done");
    }

    #[tokio::test]
    async fn test_start_over_resets_session() {
        let (photos, mut sharing) = setup().await;
        let mut wizard = Wizard::new();
        sharing
            .send(SharingAction::AddRecipient {
                name: "Jo".into(),
                direction: ShareDirection::Left,
            })
            .await;
        wizard.next(&photos, &mut sharing);
        let old_id = sharing.session().unwrap().id;

        wizard.start_over(&photos, &mut sharing).await;

        let session = sharing.session().unwrap();
        assert_ne!(session.id, old_id);
        assert!(session.recipients().is_empty());
        assert_eq!(session.selected_date, day());
        assert_eq!(wizard.step(), SharingStep::DateSelection);
        assert!(!wizard.previous());
    }
}
