use crate::error::SourceError;
use async_trait::async_trait;
use reel_models::{Credits, Genre, MovieDetails, MovieSummary, RawPrimaryReview, RawSecondaryRating, Video};

/// Movie catalog: discovery, search and per-movie lookups.
///
/// Every call returns an explicit `Result`; callers decide whether a failure
/// degrades to an empty result or is surfaced.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    fn source_name(&self) -> &str;

    /// Popularity-sorted discovery list for one genre. Records without a poster are dropped.
    async fn discover_by_genre(&self, genre: Genre) -> Result<Vec<MovieSummary>, SourceError>;

    /// Free-text title search with the same genre filter and poster filter as discovery.
    /// Blank text returns an empty list without a request.
    async fn search_by_title(&self, text: &str) -> Result<Vec<MovieSummary>, SourceError>;

    /// Title search without the poster filter, in catalog ranking order
    async fn lookup_by_title(&self, text: &str) -> Result<Vec<MovieSummary>, SourceError>;

    async fn fetch_details(&self, id: u64) -> Result<MovieDetails, SourceError>;
    async fn fetch_credits(&self, id: u64) -> Result<Credits, SourceError>;
    async fn fetch_videos(&self, id: u64) -> Result<Vec<Video>, SourceError>;
}

/// Structured reviews keyed by catalog id
#[async_trait]
pub trait PrimaryReviewSource: Send + Sync {
    fn source_name(&self) -> &str;

    async fn fetch_primary_reviews(&self, movie_id: u64) -> Result<Vec<RawPrimaryReview>, SourceError>;
}

/// Aggregate ratings keyed by exact title. The source shares no id space with the
/// catalog, so an unknown or mismatched title yields an empty list.
#[async_trait]
pub trait SecondaryRatingSource: Send + Sync {
    fn source_name(&self) -> &str;

    async fn fetch_secondary_ratings(&self, title: &str) -> Result<Vec<RawSecondaryRating>, SourceError>;
}

/// Free-text video search returning video ids in platform ranking order
#[async_trait]
pub trait VideoSearch: Send + Sync {
    fn source_name(&self) -> &str;

    async fn search_videos(&self, query: &str) -> Result<Vec<String>, SourceError>;
}
