//! File-backed repository for the `settings` preference namespace.
//!
//! Currency is stored by its stable tag. A tag that no longer matches any
//! known case (for example after a schema change) falls back to the default
//! currency rather than failing the read.

use crate::error::{FinancesError, Result};
use crate::storage::prefs::connection::PreferencesConnection;
use crate::storage::traits::SettingsStorage;
use serde::{Deserialize, Serialize};
use shared::{Currency, Settings};
use std::fs;
use tracing::warn;

/// On-disk shape of the settings namespace.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SettingsFile {
    /// Stable currency tag.
    currency: String,
    dark_mode: bool,
}

/// Repository for settings preference operations
#[derive(Clone)]
pub struct SettingsRepository {
    connection: PreferencesConnection,
}

impl SettingsRepository {
    pub fn new(connection: PreferencesConnection) -> Self {
        Self { connection }
    }
}

impl SettingsStorage for SettingsRepository {
    fn load(&self) -> Result<Settings> {
        let path = self.connection.settings_path();
        if !path.exists() {
            return Ok(Settings::default());
        }

        let contents = fs::read_to_string(&path)?;
        let file: SettingsFile = match serde_yaml::from_str(&contents) {
            Ok(file) => file,
            Err(e) => {
                // An unreadable namespace must not block startup
                warn!("could not parse settings preferences, using defaults: {e}");
                return Ok(Settings::default());
            }
        };

        let currency = Currency::from_tag(&file.currency).unwrap_or_else(|| {
            let fault = FinancesError::PreferenceParse {
                field: "currency",
                value: file.currency.clone(),
            };
            warn!("{fault}, falling back to {}", Currency::default());
            Currency::default()
        });

        Ok(Settings {
            currency,
            dark_mode: file.dark_mode,
        })
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        let file = SettingsFile {
            currency: settings.currency.tag().to_string(),
            dark_mode: settings.dark_mode,
        };

        let contents = serde_yaml::to_string(&file)?;
        self.connection.write_atomic(&self.connection.settings_path(), &contents)
    }
}
