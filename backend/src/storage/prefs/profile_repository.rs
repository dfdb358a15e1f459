//! File-backed repository for the `profile` preference namespace.
//!
//! The on-disk format stores the employment status by its stable tag, so a
//! renamed Rust identifier can never invalidate persisted data. An
//! unrecognized tag degrades to "no status" with a logged warning.

use crate::error::{FinancesError, Result};
use crate::storage::prefs::connection::PreferencesConnection;
use crate::storage::traits::ProfileStorage;
use serde::{Deserialize, Serialize};
use shared::{EmploymentStatus, Profile};
use std::fs;
use tracing::warn;

/// On-disk shape of the profile namespace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ProfileFile {
    first_name: String,
    last_name: String,
    /// Stable employment-status tag; absent when no status was chosen.
    employment_status: Option<String>,
    photo: Option<String>,
}

/// Repository for profile preference operations
#[derive(Clone)]
pub struct ProfileRepository {
    connection: PreferencesConnection,
}

impl ProfileRepository {
    pub fn new(connection: PreferencesConnection) -> Self {
        Self { connection }
    }
}

impl ProfileStorage for ProfileRepository {
    fn load(&self) -> Result<Profile> {
        let path = self.connection.profile_path();
        if !path.exists() {
            return Ok(Profile::default());
        }

        let contents = fs::read_to_string(&path)?;
        let file: ProfileFile = match serde_yaml::from_str(&contents) {
            Ok(file) => file,
            Err(e) => {
                // An unreadable namespace must not block startup
                warn!("could not parse profile preferences, starting empty: {e}");
                return Ok(Profile::default());
            }
        };

        let employment_status = file.employment_status.as_deref().and_then(|tag| {
            let status = EmploymentStatus::from_tag(tag);
            if status.is_none() {
                let fault = FinancesError::PreferenceParse {
                    field: "employment_status",
                    value: tag.to_string(),
                };
                warn!("{fault}, falling back to none");
            }
            status
        });

        Ok(Profile {
            first_name: file.first_name,
            last_name: file.last_name,
            employment_status,
            photo: file.photo,
        })
    }

    fn save(&self, profile: &Profile) -> Result<()> {
        let file = ProfileFile {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            employment_status: profile.employment_status.map(|s| s.tag().to_string()),
            photo: profile.photo.clone(),
        };

        let contents = serde_yaml::to_string(&file)?;
        self.connection.write_atomic(&self.connection.profile_path(), &contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test() -> (TempDir, ProfileRepository) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let connection = PreferencesConnection::new(dir.path()).expect("Failed to create connection");
        (dir, ProfileRepository::new(connection))
    }

    #[test]
    fn test_load_without_file_returns_defaults() {
        let (_dir, repo) = setup_test();
        let profile = repo.load().expect("Load should not fail");
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn test_save_and_reload_round_trips() {
        let (_dir, repo) = setup_test();

        let profile = Profile {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            employment_status: Some(EmploymentStatus::SelfEmployed),
            photo: Some("file:///photos/ada.png".to_string()),
        };
        repo.save(&profile).expect("Save should succeed");

        let reloaded = repo.load().expect("Load should succeed");
        assert_eq!(reloaded, profile);
    }

    #[test]
    fn test_save_replaces_previous_profile_wholesale() {
        let (_dir, repo) = setup_test();

        repo.save(&Profile {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            employment_status: Some(EmploymentStatus::Student),
            photo: Some("file:///photos/ada.png".to_string()),
        })
        .unwrap();

        repo.save(&Profile {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            employment_status: None,
            photo: None,
        })
        .unwrap();

        let reloaded = repo.load().unwrap();
        assert_eq!(reloaded.first_name, "Grace");
        assert_eq!(reloaded.employment_status, None);
        assert_eq!(reloaded.photo, None);
    }

    #[test]
    fn test_unknown_employment_tag_falls_back_to_none() {
        let (dir, repo) = setup_test();

        fs::write(
            dir.path().join("profile.yaml"),
            "first_name: Ada\nlast_name: Lovelace\nemployment_status: astronaut\nphoto: null\n",
        )
        .unwrap();

        let profile = repo.load().expect("Unknown tag must not fail the read");
        assert_eq!(profile.first_name, "Ada");
        assert_eq!(profile.employment_status, None);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let (dir, repo) = setup_test();

        fs::write(dir.path().join("profile.yaml"), ": not yaml {{{").unwrap();

        let profile = repo.load().expect("Corrupt file must not fail the read");
        assert_eq!(profile, Profile::default());
    }
}
