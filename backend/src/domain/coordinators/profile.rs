//! Profile view state. The stored profile is read once at construction and
//! mutated wholesale on save.

use crate::error::Result;
use crate::storage::traits::ProfileStorage;
use shared::Profile;
use std::sync::{Arc, RwLock};
use tracing::warn;

#[derive(Clone)]
pub struct ProfileCoordinator {
    repository: Arc<dyn ProfileStorage>,
    profile: Arc<RwLock<Profile>>,
}

impl ProfileCoordinator {
    /// Reads the stored profile once. A failed read starts the session with
    /// an empty profile rather than blocking startup.
    pub fn new(repository: Arc<dyn ProfileStorage>) -> Self {
        let profile = repository.load().unwrap_or_else(|e| {
            warn!("failed to load profile, starting empty: {e}");
            Profile::default()
        });

        Self {
            repository,
            profile: Arc::new(RwLock::new(profile)),
        }
    }

    /// Current in-memory profile.
    pub fn profile(&self) -> Profile {
        self.profile.read().unwrap().clone()
    }

    /// Persist the whole profile and replace the in-memory copy. Write
    /// failures surface to the caller.
    pub fn save(&self, profile: Profile) -> Result<()> {
        self.repository.save(&profile)?;
        *self.profile.write().unwrap() = profile;
        Ok(())
    }
}
