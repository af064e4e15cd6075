//! Unified path management for catadmin files.
//!
//! ```text
//! ~/.config/catadmin/          # Config directory
//! ├── config.toml              # Backend URL, timeout, log level
//! └── session.json             # Persisted token + abilities
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot determine config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for catadmin_core::AdminError {
    fn from(e: PathError) -> Self {
        catadmin_core::AdminError::config(e.to_string())
    }
}

const APP_DIR: &str = "catadmin";

/// Resolves catadmin's files, optionally under an overridden base directory.
#[derive(Debug, Clone, Default)]
pub struct AdminPaths {
    base: Option<PathBuf>,
}

impl AdminPaths {
    /// Platform config directory (`~/.config/catadmin` on Linux).
    pub fn new() -> Self {
        Self { base: None }
    }

    /// Uses `base` instead of the platform config directory.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }

    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    /// Path to config.toml.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Path to the persisted session keys.
    ///
    /// # Security Note
    ///
    /// This file holds a bearer token; it is written with mode 600 on Unix.
    pub fn session_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("session.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_override() {
        let paths = AdminPaths::with_base("/tmp/catadmin-test");
        assert_eq!(
            paths.config_file().unwrap(),
            PathBuf::from("/tmp/catadmin-test/config.toml")
        );
        assert_eq!(
            paths.session_file().unwrap(),
            PathBuf::from("/tmp/catadmin-test/session.json")
        );
    }

    #[test]
    fn test_default_dir_ends_with_app_name() {
        if let Ok(dir) = AdminPaths::new().config_dir() {
            assert!(dir.ends_with(APP_DIR));
        }
    }
}
