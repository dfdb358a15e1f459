use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// PreferencesConnection manages the directory holding the preference files
#[derive(Clone)]
pub struct PreferencesConnection {
    base_directory: PathBuf,
}

impl PreferencesConnection {
    /// Create a connection rooted at the given directory, creating it if
    /// needed.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self { base_directory: base_path })
    }

    /// Create a connection in the default preferences location.
    pub fn new_default() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("finances-tracker");
        Self::new(config_dir)
    }

    /// Path of the `profile` namespace file.
    pub fn profile_path(&self) -> PathBuf {
        self.base_directory.join("profile.yaml")
    }

    /// Path of the `settings` namespace file.
    pub fn settings_path(&self) -> PathBuf {
        self.base_directory.join("settings.yaml")
    }

    /// Write a preference file atomically: serialize to a temp file in the
    /// same directory, then rename over the target.
    pub fn write_atomic(&self, path: &Path, contents: &str) -> Result<()> {
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }
}
