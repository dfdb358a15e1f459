//! # Preference Stores
//!
//! File-based key-value persistence for the two preference namespaces:
//! `profile` and `settings`. Each namespace is a single YAML file under the
//! preferences directory, read fully at coordinator construction and written
//! atomically (temp file + rename) on explicit save.

pub mod connection;
pub mod profile_repository;
pub mod settings_repository;

pub use connection::PreferencesConnection;
pub use profile_repository::ProfileRepository;
pub use settings_repository::SettingsRepository;
