//! Path resolution for configuration files

use std::path::PathBuf;

const APP_DIR: &str = "persona";

/// Resolves standard paths for the analyzer
#[derive(Debug, Clone)]
pub struct Paths {
    pub config_root: PathBuf,
}

impl Paths {
    /// Resolve paths under the platform configuration directory
    pub fn new() -> std::io::Result<Self> {
        let config_root = dirs::config_dir().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "configuration directory not found",
            )
        })?;

        Ok(Self { config_root })
    }

    /// Use an explicit root instead of the platform directory
    pub fn with_root(config_root: impl Into<PathBuf>) -> Self {
        Self {
            config_root: config_root.into(),
        }
    }

    /// Get the application configuration directory
    pub fn app_dir(&self) -> PathBuf {
        self.config_root.join(APP_DIR)
    }

    /// Get config.json path
    pub fn config_file(&self) -> PathBuf {
        self.app_dir().join("config.json")
    }
}
