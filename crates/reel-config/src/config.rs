use reel_models::Genre;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Value written into `config init` templates in place of real API keys
pub const PLACEHOLDER_KEY: &str = "YOUR_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub ratings: RatingsConfig,
    #[serde(default)]
    pub video: Option<VideoConfig>,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Movie catalog API (TMDB v3 shaped)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub api_key: String,
    #[serde(default = "default_catalog_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_genre_id")]
    pub genre_id: u32,
}

/// Secondary ratings API (OMDb shaped), looked up by exact title
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingsConfig {
    pub api_key: String,
    #[serde(default = "default_ratings_base_url")]
    pub base_url: String,
}

/// Video platform search, the alternate trailer path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    pub api_key: String,
    #[serde(default = "default_video_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_catalog_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_genre_id() -> u32 {
    Genre::Horror.catalog_id()
}

fn default_ratings_base_url() -> String {
    "https://www.omdbapi.com/".to_string()
}

fn default_video_base_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_debounce_ms() -> u64 {
    300
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl HttpConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl CatalogConfig {
    pub fn genre(&self) -> Genre {
        Genre::from_catalog_id(self.genre_id)
    }
}

fn is_key_set(key: &str) -> bool {
    !key.trim().is_empty() && key != PLACEHOLDER_KEY
}

impl Config {
    /// Starter configuration written by `dreadreel config init`
    pub fn template() -> Self {
        Self {
            catalog: CatalogConfig {
                api_key: PLACEHOLDER_KEY.to_string(),
                base_url: default_catalog_base_url(),
                image_base_url: default_image_base_url(),
                language: default_language(),
                genre_id: default_genre_id(),
            },
            ratings: RatingsConfig {
                api_key: PLACEHOLDER_KEY.to_string(),
                base_url: default_ratings_base_url(),
            },
            video: None,
            http: HttpConfig::default(),
            search: SearchConfig::default(),
        }
    }

    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Override API keys from `DREADREEL_*_API_KEY` environment variables
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("DREADREEL_CATALOG_API_KEY").filter(|k| !k.is_empty()) {
            self.catalog.api_key = key;
        }
        if let Some(key) = lookup("DREADREEL_RATINGS_API_KEY").filter(|k| !k.is_empty()) {
            self.ratings.api_key = key;
        }
        if let Some(key) = lookup("DREADREEL_VIDEO_API_KEY").filter(|k| !k.is_empty()) {
            match self.video.as_mut() {
                Some(video) => video.api_key = key,
                None => {
                    self.video = Some(VideoConfig {
                        api_key: key,
                        base_url: default_video_base_url(),
                    })
                }
            }
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !is_key_set(&self.catalog.api_key) {
            return Err(anyhow::anyhow!("catalog.api_key is not configured"));
        }
        if !is_key_set(&self.ratings.api_key) {
            return Err(anyhow::anyhow!("ratings.api_key is not configured"));
        }
        if let Some(video) = &self.video {
            if !is_key_set(&video.api_key) {
                return Err(anyhow::anyhow!("video section is present but video.api_key is not configured"));
            }
        }
        if self.http.request_timeout_ms == 0 {
            return Err(anyhow::anyhow!("http.request_timeout_ms must be greater than zero"));
        }
        let video_url = self.video.as_ref().map(|v| ("video.base_url", &v.base_url));
        for (name, url) in [
            ("catalog.base_url", &self.catalog.base_url),
            ("ratings.base_url", &self.ratings.base_url),
        ]
        .into_iter()
        .chain(video_url)
        {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(anyhow::anyhow!("{} must be an http(s) URL, got '{}'", name, url));
            }
        }
        Ok(())
    }

    pub fn is_video_configured(&self) -> bool {
        self.video.as_ref().map(|v| is_key_set(&v.api_key)).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::NamedTempFile;

    fn configured() -> Config {
        let mut config = Config::template();
        config.catalog.api_key = "catalog_key".to_string();
        config.ratings.api_key = "ratings_key".to_string();
        config
    }

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();
        configured().save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.catalog.api_key, "catalog_key");
        assert_eq!(loaded.ratings.api_key, "ratings_key");
        assert_eq!(loaded.catalog.genre(), Genre::Horror);
        assert_eq!(loaded.search.debounce_ms, 300);
        assert!(loaded.video.is_none());
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [catalog]
            api_key = "abc"

            [ratings]
            api_key = "def"
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.catalog.language, "en-US");
        assert_eq!(config.http.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.search.debounce(), Duration::from_millis(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::template();
        assert!(config.validate().is_err());

        config = configured();
        assert!(config.validate().is_ok());

        config.http.request_timeout_ms = 0;
        assert!(config.validate().is_err());

        config = configured();
        config.video = Some(VideoConfig {
            api_key: PLACEHOLDER_KEY.to_string(),
            base_url: default_video_base_url(),
        });
        assert!(config.validate().is_err());
        assert!(!config.is_video_configured());

        config = configured();
        config.ratings.base_url = "ftp://ratings".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_checks_video_base_url() {
        let mut config = configured();
        config.video = Some(VideoConfig {
            api_key: "video_key".to_string(),
            base_url: "youtube.googleapis.com/youtube/v3".to_string(),
        });
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("video.base_url"), "{}", err);

        config.video = Some(VideoConfig {
            api_key: "video_key".to_string(),
            base_url: default_video_base_url(),
        });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_replace_keys_and_add_video() {
        let env: HashMap<&str, &str> = [
            ("DREADREEL_CATALOG_API_KEY", "from_env"),
            ("DREADREEL_VIDEO_API_KEY", "video_env"),
            ("DREADREEL_RATINGS_API_KEY", ""),
        ]
        .into_iter()
        .collect();

        let mut config = configured();
        config.apply_overrides_from(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.catalog.api_key, "from_env");
        assert_eq!(config.ratings.api_key, "ratings_key");
        assert!(config.is_video_configured());
        assert_eq!(config.video.unwrap().base_url, "https://www.googleapis.com/youtube/v3");
    }
}
