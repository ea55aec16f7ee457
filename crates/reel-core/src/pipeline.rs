use crate::discovery::load_discovery;
use crate::resolver::DetailResolver;
use crate::search::SearchController;
use crate::trailer::TrailerFinder;
use anyhow::Result;
use reel_config::Config;
use reel_models::{Genre, MovieSummary};
use reel_sources::SourceSet;
use std::time::Duration;

/// Entry point for front ends: one source set plus the tunables from config
#[derive(Clone)]
pub struct Pipeline {
    sources: SourceSet,
    genre: Genre,
    debounce: Duration,
    image_base_url: String,
}

impl Pipeline {
    pub fn from_config(config: &Config) -> Result<Self> {
        let sources = SourceSet::from_config(config)?;
        Ok(Self::new(
            sources,
            config.catalog.genre(),
            config.search.debounce(),
            config.catalog.image_base_url.clone(),
        ))
    }

    pub fn new(sources: SourceSet, genre: Genre, debounce: Duration, image_base_url: String) -> Self {
        Self {
            sources,
            genre,
            debounce,
            image_base_url,
        }
    }

    pub fn genre(&self) -> Genre {
        self.genre
    }

    pub fn image_base_url(&self) -> &str {
        &self.image_base_url
    }

    pub fn has_video_search(&self) -> bool {
        self.sources.video.is_some()
    }

    pub async fn discover(&self) -> Vec<MovieSummary> {
        load_discovery(self.sources.catalog.as_ref(), self.genre).await
    }

    pub fn search_controller(&self) -> SearchController {
        SearchController::new(self.sources.catalog.clone(), self.debounce)
    }

    pub fn resolver(&self) -> DetailResolver {
        DetailResolver::from_sources(&self.sources)
    }

    pub fn trailer_finder(&self) -> TrailerFinder {
        TrailerFinder::from_sources(&self.sources)
    }
}
