// SPDX-License-Identifier: AGPL-3.0
// Photo Share Core - Shared logic for all frontends
//
// This crate provides:
// - Drag classification onto eight compass directions
// - ShareSession with recipients and their temporary albums
// - SharingService for sequential share presentations
// - View models, the step wizard and the fullscreen viewer
// - SettingsStore for the persisted theme
//
// Photo access and the share sheet are async traits implemented by each frontend.

pub mod cache;
pub mod direction;
pub mod drag;
pub mod library;
pub mod memory;
pub mod notify;
pub mod photo;
pub mod session;
pub mod settings;
pub mod sharing;
pub mod theme;
pub mod types;
pub mod viewer;
pub mod viewmodel;
pub mod wizard;

// Re-export commonly used items
pub use cache::ImageCache;
pub use direction::{ParseDirectionError, ShareDirection};
pub use drag::{classify, DragState, DragTarget, Vector2};
pub use library::{ImageQuality, LibraryError, PhotoFilter, PhotoLibrary, PhotoService};
pub use photo::{PhotoId, PhotoItem, PhotoSource};
pub use session::{
    Recipient, RecipientId, SessionError, SessionStatus, ShareSession, TemporaryAlbum,
    MAX_RECIPIENTS,
};
pub use settings::SettingsStore;
pub use sharing::{
    ShareOutcome, ShareRequest, ShareSurface, SharingError, SharingResult, SharingService,
};
pub use theme::{Rgba, ThemeColors};
pub use types::{AppError, AppSettings, AppTheme};
pub use viewer::{PhotoViewer, ViewerEvent};
pub use viewmodel::{
    PhotoAction, PhotoViewModel, SharingAction, SharingViewModel, ThemeViewModel,
};
pub use wizard::{SharingStep, Wizard};
