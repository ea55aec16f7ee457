//! Builds every remote source from one configuration object.
//!
//! All clients share a single `reqwest::Client` so the request timeout and
//! connection pool are configured in one place.

use anyhow::Result;
use reel_config::Config;
use std::sync::Arc;
use tracing::debug;

use crate::http::build_client;
use crate::omdb::OmdbClient;
use crate::tmdb::TmdbClient;
use crate::traits::{MovieCatalog, PrimaryReviewSource, SecondaryRatingSource, VideoSearch};
use crate::youtube::YoutubeClient;

/// The set of remote sources the pipeline talks to
#[derive(Clone)]
pub struct SourceSet {
    pub catalog: Arc<dyn MovieCatalog>,
    pub primary_reviews: Arc<dyn PrimaryReviewSource>,
    pub secondary_ratings: Arc<dyn SecondaryRatingSource>,
    /// Alternate trailer path; absent when no video key is configured
    pub video: Option<Arc<dyn VideoSearch>>,
}

impl SourceSet {
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let http = build_client(config.http.request_timeout())?;

        // One client serves both the catalog and the reviews that share its ids
        let tmdb = Arc::new(TmdbClient::from_config(http.clone(), &config.catalog));
        let omdb = Arc::new(OmdbClient::from_config(http.clone(), &config.ratings));

        let video: Option<Arc<dyn VideoSearch>> = match &config.video {
            Some(video_config) if config.is_video_configured() => {
                Some(Arc::new(YoutubeClient::from_config(http, video_config)))
            }
            _ => None,
        };

        debug!(
            catalog = MovieCatalog::source_name(tmdb.as_ref()),
            ratings = omdb.source_name(),
            video = video.is_some(),
            timeout_ms = config.http.request_timeout_ms,
            "Created remote sources"
        );

        Ok(Self {
            catalog: tmdb.clone(),
            primary_reviews: tmdb,
            secondary_ratings: omdb,
            video,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        let mut config = Config::template();
        config.catalog.api_key = "catalog".to_string();
        config.ratings.api_key = "ratings".to_string();
        config
    }

    #[test]
    fn test_from_config_without_video() {
        let sources = SourceSet::from_config(&config()).unwrap();
        assert_eq!(sources.catalog.source_name(), "tmdb");
        assert_eq!(sources.primary_reviews.source_name(), "tmdb");
        assert_eq!(sources.secondary_ratings.source_name(), "omdb");
        assert!(sources.video.is_none());
    }

    #[test]
    fn test_from_config_with_video() {
        let mut config = config();
        config.apply_overrides_from(|name| (name == "DREADREEL_VIDEO_API_KEY").then(|| "yt".to_string()));
        let sources = SourceSet::from_config(&config).unwrap();
        assert_eq!(sources.video.unwrap().source_name(), "youtube");
    }

    #[test]
    fn test_from_config_rejects_placeholder_keys() {
        assert!(SourceSet::from_config(&Config::template()).is_err());
    }
}
