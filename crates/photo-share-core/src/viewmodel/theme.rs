// SPDX-License-Identifier: AGPL-3.0
// Photo Share Core - Theme view model

use crate::notify::StateNotifier;
use crate::settings::SettingsStore;
use crate::theme::ThemeColors;
use crate::types::{AppError, AppTheme};
use async_channel::Receiver;
use std::sync::Arc;

pub struct ThemeViewModel {
    store: Arc<SettingsStore>,
    current: AppTheme,
    notifier: StateNotifier,
}

impl ThemeViewModel {
    /// Starts from the saved theme
    pub fn new(store: Arc<SettingsStore>) -> Self {
        let current = store.theme();
        tracing::info!("Loaded theme: {}", current);
        Self {
            store,
            current,
            notifier: StateNotifier::new(),
        }
    }

    pub fn current_theme(&self) -> AppTheme {
        self.current
    }

    pub fn available_themes(&self) -> &'static [AppTheme] {
        &AppTheme::ALL
    }

    pub fn colors(&self) -> &'static dyn ThemeColors {
        self.current.colors()
    }

    pub fn subscribe(&mut self) -> Receiver<u64> {
        self.notifier.subscribe()
    }

    /// Switch theme and persist the choice. The current theme only changes
    /// once the new value is on disk.
    pub fn set_theme(&mut self, theme: AppTheme) -> Result<(), AppError> {
        if theme == self.current {
            return Ok(());
        }
        self.store.set_theme(theme)?;
        self.current = theme;
        self.notifier.notify();
        Ok(())
    }
}
