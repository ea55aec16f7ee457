use crate::error::SourceError;
use crate::tmdb::api::{self, TmdbEndpoint};
use crate::traits::{MovieCatalog, PrimaryReviewSource};
use async_trait::async_trait;
use reel_config::CatalogConfig;
use reel_models::{Credits, Genre, MovieDetails, MovieSummary, RawPrimaryReview, Video};
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;

/// Catalog client. Also serves the primary review source, which shares the catalog's ids.
#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    endpoint: TmdbEndpoint,
    search_genre: Genre,
}

impl TmdbClient {
    pub fn new(client: Client, endpoint: TmdbEndpoint, search_genre: Genre) -> Self {
        Self {
            client: Arc::new(client),
            endpoint,
            search_genre,
        }
    }

    pub fn from_config(client: Client, config: &CatalogConfig) -> Self {
        Self::new(
            client,
            TmdbEndpoint {
                base_url: config.base_url.clone(),
                api_key: config.api_key.clone(),
                language: config.language.clone(),
            },
            config.genre(),
        )
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    fn source_name(&self) -> &str {
        api::SOURCE
    }

    async fn discover_by_genre(&self, genre: Genre) -> Result<Vec<MovieSummary>, SourceError> {
        let movies = api::discover_movies(&self.client, &self.endpoint, genre.catalog_id()).await?;
        Ok(api::retain_with_poster(movies))
    }

    async fn search_by_title(&self, text: &str) -> Result<Vec<MovieSummary>, SourceError> {
        let query = text.trim();
        if query.is_empty() {
            debug!("Blank search text, skipping catalog request");
            return Ok(Vec::new());
        }
        let movies = api::search_movies(&self.client, &self.endpoint, query, Some(self.search_genre.catalog_id())).await?;
        Ok(api::retain_with_poster(movies))
    }

    async fn lookup_by_title(&self, text: &str) -> Result<Vec<MovieSummary>, SourceError> {
        let query = text.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        api::search_movies(&self.client, &self.endpoint, query, None).await
    }

    async fn fetch_details(&self, id: u64) -> Result<MovieDetails, SourceError> {
        api::get_movie_details(&self.client, &self.endpoint, id).await
    }

    async fn fetch_credits(&self, id: u64) -> Result<Credits, SourceError> {
        api::get_movie_credits(&self.client, &self.endpoint, id).await
    }

    async fn fetch_videos(&self, id: u64) -> Result<Vec<Video>, SourceError> {
        api::get_movie_videos(&self.client, &self.endpoint, id).await
    }
}

#[async_trait]
impl PrimaryReviewSource for TmdbClient {
    fn source_name(&self) -> &str {
        api::SOURCE
    }

    async fn fetch_primary_reviews(&self, movie_id: u64) -> Result<Vec<RawPrimaryReview>, SourceError> {
        api::get_movie_reviews(&self.client, &self.endpoint, movie_id).await
    }
}
