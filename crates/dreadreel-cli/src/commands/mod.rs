pub mod browse;
pub mod config;
pub mod discover;
pub mod progress;
pub mod render;
pub mod reviews;
pub mod search;
pub mod trailer;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use reel_config::{Config, PathManager};
use reel_core::Pipeline;
use std::path::{Path, PathBuf};

pub fn config_file(config_path: Option<&Path>) -> PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathManager::default().config_file())
}

/// Load the config file and apply `DREADREEL_*_API_KEY` overrides.
///
/// A missing file is not an error when every key comes from the environment.
/// Validation happens when the sources are built.
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config_file = config_file(config_path);

    let mut config = if config_file.exists() {
        Config::load_from_file(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?
    } else {
        tracing::debug!(path = %config_file.display(), "No config file, using defaults and environment");
        Config::template()
    };
    config.apply_env_overrides();
    Ok(config)
}

pub fn build_pipeline(config_path: Option<&Path>) -> Result<Pipeline> {
    let config = load_config(config_path)?;
    Pipeline::from_config(&config)
        .map_err(|e| {
            eyre!(
                "{}. Check {} or run 'dreadreel config init'; keys can also come from DREADREEL_CATALOG_API_KEY and DREADREEL_RATINGS_API_KEY.",
                e,
                config_file(config_path).display()
            )
        })
        .wrap_err("Failed to create remote sources")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_keys_load_but_fail_when_building_sources() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Config::template().save_to_file(&path).unwrap();

        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.http.request_timeout_ms, Config::template().http.request_timeout_ms);

        let err = build_pipeline(Some(path.as_path())).err().unwrap();
        let report = format!("{:?}", err);
        assert!(report.contains("api_key is not configured"), "{}", report);
        assert!(report.contains("config init"), "{}", report);
    }
}
