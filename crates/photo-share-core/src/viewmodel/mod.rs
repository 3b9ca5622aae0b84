// SPDX-License-Identifier: AGPL-3.0
// Photo Share Core - View models
//
// Each view model owns an explicit state struct and mutates it only through
// `send(action)`. Frontends subscribe for a revision number and re-read state.

mod photos;
mod sharing;
mod theme;

pub use photos::{PhotoAction, PhotoState, PhotoViewModel};
pub use sharing::{SharingAction, SharingState, SharingViewModel};
pub use theme::ThemeViewModel;

use std::time::{Duration, Instant};

/// How long an error message stays visible
pub const ERROR_DISPLAY_DURATION: Duration = Duration::from_secs(3);

/// A user-facing error message that expires on its own
#[derive(Debug, Clone, Default)]
pub struct ErrorBanner {
    message: Option<String>,
    shown_at: Option<Instant>,
}

impl ErrorBanner {
    pub fn show(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.message = Some(message);
        self.shown_at = Some(Instant::now());
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.shown_at = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Clear the message once it has been visible long enough.
    /// Returns true when something was cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.shown_at {
            Some(at) if now.saturating_duration_since(at) >= ERROR_DISPLAY_DURATION => {
                self.clear();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_expires_after_timeout() {
        let mut banner = ErrorBanner::default();
        banner.show("boom");
        let shown = Instant::now();

        assert!(!banner.expire(shown));
        assert_eq!(banner.message(), Some("boom"));

        assert!(banner.expire(shown + ERROR_DISPLAY_DURATION));
        assert_eq!(banner.message(), None);
        assert!(!banner.expire(shown + ERROR_DISPLAY_DURATION * 2));
    }
}
