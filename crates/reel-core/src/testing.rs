//! In-memory sources for exercising the pipeline without a network.

use async_trait::async_trait;
use reel_models::{Credits, Genre, MovieDetails, MovieSummary, RawPrimaryReview, RawSecondaryRating, Video};
use reel_sources::{MovieCatalog, PrimaryReviewSource, SecondaryRatingSource, SourceError, VideoSearch};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::{sleep, Instant};

pub(crate) fn failure() -> SourceError {
    SourceError::Status {
        source_name: "fake",
        status: 500,
        body: "boom".to_string(),
    }
}

pub(crate) fn summary(id: u64, title: &str) -> MovieSummary {
    MovieSummary {
        id,
        title: title.to_string(),
        release_year: 1996,
        poster_ref: Some(format!("/{}.jpg", id)),
        overview: String::new(),
        rating: None,
    }
}

#[derive(Default)]
pub(crate) struct FakeCatalog {
    pub discover: Option<Vec<MovieSummary>>,
    pub search: HashMap<String, Vec<MovieSummary>>,
    pub search_delay: HashMap<String, Duration>,
    pub search_fails: bool,
    pub lookup: Vec<MovieSummary>,
    pub details: Option<MovieDetails>,
    pub details_delay: Duration,
    pub credits: Option<Credits>,
    pub credits_delay: Duration,
    pub videos: Option<Vec<Video>>,
    pub search_calls: Mutex<Vec<(String, Instant)>>,
    pub phase_two_started: Mutex<Vec<Instant>>,
}

impl FakeCatalog {
    pub fn searched(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().iter().map(|(query, _)| query.clone()).collect()
    }
}

#[async_trait]
impl MovieCatalog for FakeCatalog {
    fn source_name(&self) -> &str {
        "fake-catalog"
    }

    async fn discover_by_genre(&self, _genre: Genre) -> Result<Vec<MovieSummary>, SourceError> {
        self.discover.clone().ok_or_else(failure)
    }

    async fn search_by_title(&self, text: &str) -> Result<Vec<MovieSummary>, SourceError> {
        self.search_calls.lock().unwrap().push((text.to_string(), Instant::now()));
        if let Some(delay) = self.search_delay.get(text) {
            sleep(*delay).await;
        }
        if self.search_fails {
            return Err(failure());
        }
        Ok(self.search.get(text).cloned().unwrap_or_default())
    }

    async fn lookup_by_title(&self, _text: &str) -> Result<Vec<MovieSummary>, SourceError> {
        Ok(self.lookup.clone())
    }

    async fn fetch_details(&self, _id: u64) -> Result<MovieDetails, SourceError> {
        sleep(self.details_delay).await;
        self.details.clone().ok_or_else(failure)
    }

    async fn fetch_credits(&self, _id: u64) -> Result<Credits, SourceError> {
        self.phase_two_started.lock().unwrap().push(Instant::now());
        sleep(self.credits_delay).await;
        self.credits.clone().ok_or_else(failure)
    }

    async fn fetch_videos(&self, _id: u64) -> Result<Vec<Video>, SourceError> {
        self.videos.clone().ok_or_else(failure)
    }
}

#[derive(Default)]
pub(crate) struct FakePrimary {
    pub reviews: Option<Vec<RawPrimaryReview>>,
    pub delay: Duration,
}

#[async_trait]
impl PrimaryReviewSource for FakePrimary {
    fn source_name(&self) -> &str {
        "fake-primary"
    }

    async fn fetch_primary_reviews(&self, _movie_id: u64) -> Result<Vec<RawPrimaryReview>, SourceError> {
        sleep(self.delay).await;
        self.reviews.clone().ok_or_else(failure)
    }
}

#[derive(Default)]
pub(crate) struct FakeSecondary {
    pub ratings: Option<Vec<RawSecondaryRating>>,
    pub delay: Duration,
    pub titles: Mutex<Vec<String>>,
}

#[async_trait]
impl SecondaryRatingSource for FakeSecondary {
    fn source_name(&self) -> &str {
        "fake-secondary"
    }

    async fn fetch_secondary_ratings(&self, title: &str) -> Result<Vec<RawSecondaryRating>, SourceError> {
        self.titles.lock().unwrap().push(title.to_string());
        sleep(self.delay).await;
        self.ratings.clone().ok_or_else(failure)
    }
}

#[derive(Default)]
pub(crate) struct FakeVideoSearch {
    pub ids: Vec<String>,
    pub queries: Mutex<Vec<String>>,
}

#[async_trait]
impl VideoSearch for FakeVideoSearch {
    fn source_name(&self) -> &str {
        "fake-video"
    }

    async fn search_videos(&self, query: &str) -> Result<Vec<String>, SourceError> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.ids.clone())
    }
}
