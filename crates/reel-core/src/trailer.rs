use reel_models::{Trailer, TrailerSite, Video};
use reel_sources::{MovieCatalog, SourceError, SourceSet, VideoSearch};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum TrailerError {
    #[error("no title given")]
    MissingTitle,
    #[error("no movie found for '{0}'")]
    NotFound(String),
    #[error("no trailer available for '{0}'")]
    NoTrailer(String),
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Finds a trailer for a title: the catalog's own videos first, then the
/// video platform's search when one is configured.
#[derive(Clone)]
pub struct TrailerFinder {
    catalog: Arc<dyn MovieCatalog>,
    video: Option<Arc<dyn VideoSearch>>,
}

impl TrailerFinder {
    pub fn new(catalog: Arc<dyn MovieCatalog>, video: Option<Arc<dyn VideoSearch>>) -> Self {
        Self { catalog, video }
    }

    pub fn from_sources(sources: &SourceSet) -> Self {
        Self::new(sources.catalog.clone(), sources.video.clone())
    }

    pub async fn find_trailer(&self, title: &str) -> Result<Trailer, TrailerError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TrailerError::MissingTitle);
        }

        let movie = self
            .catalog
            .lookup_by_title(title)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| TrailerError::NotFound(title.to_string()))?;
        debug!(id = movie.id, title = %movie.title, "Matched title for trailer lookup");

        match self.catalog.fetch_videos(movie.id).await {
            Ok(videos) => {
                if let Some(video) = videos.into_iter().find(Video::is_trailer) {
                    return Ok(Trailer {
                        key: video.key,
                        title: movie.title,
                        site: TrailerSite::Catalog,
                    });
                }
            }
            Err(e) if self.video.is_some() => {
                warn!("Failed to load catalog videos for '{}', trying video search: {}", movie.title, e);
            }
            Err(e) => return Err(e.into()),
        }

        if let Some(video) = &self.video {
            let query = format!("{} trailer", movie.title);
            if let Some(key) = video.search_videos(&query).await?.into_iter().next() {
                return Ok(Trailer {
                    key,
                    title: movie.title,
                    site: TrailerSite::VideoPlatform,
                });
            }
        }

        Err(TrailerError::NoTrailer(movie.title))
    }
}
