use anyhow::Result;
use std::path::{Path, PathBuf};

/// Get the container base path from environment variable, defaulting to "/app"
pub fn container_base_path() -> PathBuf {
    std::env::var("DREADREEL_BASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/app"))
}

pub struct PathManager {
    config_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("dreadreel");

        Ok(Self {
            config_dir: base_dir.clone(),
            log_dir: base_dir.join("logs"),
        })
    }

    pub fn from_docker_env() -> Self {
        let base = container_base_path();
        Self {
            config_dir: base.clone(),
            log_dir: base.join("logs"),
        }
    }

    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            log_dir: base.join("logs"),
            config_dir: base,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn default_log_file(&self) -> PathBuf {
        self.log_dir.join("dreadreel.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // The container base directory only exists inside the image
        let base = container_base_path();
        if base.exists() {
            return Self::from_docker_env();
        }

        Self::new().unwrap_or_else(|_| Self::from_docker_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_layout() {
        let paths = PathManager::with_base("/tmp/dreadreel-test");
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/dreadreel-test/config.toml"));
        assert_eq!(paths.default_log_file(), PathBuf::from("/tmp/dreadreel-test/logs/dreadreel.log"));
    }

    #[test]
    fn test_ensure_directories() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::with_base(dir.path().join("nested"));
        paths.ensure_directories().unwrap();
        assert!(paths.config_dir().exists());
        assert!(paths.log_dir().exists());
    }
}
