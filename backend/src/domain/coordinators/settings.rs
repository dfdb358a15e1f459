//! Settings view state: the display currency and the observable dark-mode
//! flag. Each field persists independently; the currency is resolved once
//! at construction with the documented Euro fallback for unknown tags.

use crate::error::Result;
use crate::storage::traits::SettingsStorage;
use shared::{Currency, Settings};
use std::sync::{Arc, RwLock};
use tokio::sync::watch;
use tracing::warn;

#[derive(Clone)]
pub struct SettingsCoordinator {
    repository: Arc<dyn SettingsStorage>,
    currency: Arc<RwLock<Currency>>,
    dark_mode: Arc<watch::Sender<bool>>,
}

impl SettingsCoordinator {
    /// Reads the stored settings once. A failed read starts the session
    /// with defaults rather than blocking startup.
    pub fn new(repository: Arc<dyn SettingsStorage>) -> Self {
        let settings = repository.load().unwrap_or_else(|e| {
            warn!("failed to load settings, using defaults: {e}");
            Settings::default()
        });

        Self {
            repository,
            currency: Arc::new(RwLock::new(settings.currency)),
            dark_mode: Arc::new(watch::channel(settings.dark_mode).0),
        }
    }

    /// Currency chosen for rendering amounts.
    pub fn currency(&self) -> Currency {
        *self.currency.read().unwrap()
    }

    /// Observable dark-mode flag; consumers re-render on each emission.
    pub fn dark_mode(&self) -> watch::Receiver<bool> {
        self.dark_mode.subscribe()
    }

    /// Current values of both settings fields.
    pub fn settings(&self) -> Settings {
        Settings {
            currency: self.currency(),
            dark_mode: *self.dark_mode.borrow(),
        }
    }

    /// Persist a new currency choice.
    pub fn save_currency(&self, currency: Currency) -> Result<()> {
        self.persist(currency, *self.dark_mode.borrow())?;
        *self.currency.write().unwrap() = currency;
        Ok(())
    }

    /// Flip dark mode, persist the new value and emit it to subscribers.
    /// Returns the new value.
    pub fn toggle_dark_mode(&self) -> Result<bool> {
        let new_value = !*self.dark_mode.borrow();
        self.persist(self.currency(), new_value)?;
        self.dark_mode.send_replace(new_value);
        Ok(new_value)
    }

    fn persist(&self, currency: Currency, dark_mode: bool) -> Result<()> {
        self.repository.save(&Settings {
            currency,
            dark_mode,
        })
    }
}
