use crate::aggregate::aggregate_reviews_now;
use reel_models::{AggregatedReviewSet, MovieDetail};
use reel_sources::{MovieCatalog, PrimaryReviewSource, SecondaryRatingSource, SourceError, SourceSet};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Phase-two lookups whose failure degrades the result instead of failing it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveStage {
    Credits,
    PrimaryReviews,
    SecondaryRatings,
}

impl fmt::Display for ResolveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResolveStage::Credits => "credits",
            ResolveStage::PrimaryReviews => "primary reviews",
            ResolveStage::SecondaryRatings => "secondary ratings",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFailure {
    pub stage: ResolveStage,
    pub message: String,
}

/// Everything the detail view needs for one movie
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedMovie {
    pub detail: MovieDetail,
    pub reviews: AggregatedReviewSet,
    /// Phase-two lookups that failed and were replaced by empty data
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<SourceFailure>,
}

impl ResolvedMovie {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("details for movie {id} could not be loaded: {source}")]
    Details {
        id: u64,
        #[source]
        source: SourceError,
    },
}

/// Loads a movie's details, credits and reviews in two phases.
///
/// Phase one fetches the details, because the secondary source is keyed by the
/// title they contain. Phase two runs credits, primary reviews and secondary
/// ratings concurrently. A phase-one failure fails the whole resolution; a
/// phase-two failure only empties its own part of the result.
#[derive(Clone)]
pub struct DetailResolver {
    catalog: Arc<dyn MovieCatalog>,
    primary_reviews: Arc<dyn PrimaryReviewSource>,
    secondary_ratings: Arc<dyn SecondaryRatingSource>,
}

impl DetailResolver {
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        primary_reviews: Arc<dyn PrimaryReviewSource>,
        secondary_ratings: Arc<dyn SecondaryRatingSource>,
    ) -> Self {
        Self {
            catalog,
            primary_reviews,
            secondary_ratings,
        }
    }

    pub fn from_sources(sources: &SourceSet) -> Self {
        Self::new(
            sources.catalog.clone(),
            sources.primary_reviews.clone(),
            sources.secondary_ratings.clone(),
        )
    }

    #[instrument(skip(self))]
    pub async fn resolve(&self, id: u64) -> Result<ResolvedMovie, ResolveError> {
        let start = Instant::now();

        let details = self
            .catalog
            .fetch_details(id)
            .await
            .map_err(|source| ResolveError::Details { id, source })?;
        let title = details.summary.title.clone();
        debug!(id, title = %title, "Loaded details, fetching credits and reviews");

        let (credits, primary, secondary) = futures::join!(
            self.catalog.fetch_credits(id),
            self.primary_reviews.fetch_primary_reviews(id),
            self.secondary_ratings.fetch_secondary_ratings(&title),
        );

        let mut failures = Vec::new();
        let credits = settle(ResolveStage::Credits, credits, &mut failures);
        let primary = settle(ResolveStage::PrimaryReviews, primary, &mut failures).unwrap_or_default();
        let secondary = settle(ResolveStage::SecondaryRatings, secondary, &mut failures).unwrap_or_default();

        let reviews = aggregate_reviews_now(&primary, &secondary);
        let detail = MovieDetail::new(details, credits);

        info!(
            id,
            title = %detail.summary.title,
            reviews = reviews.len(),
            failed_lookups = failures.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Resolved movie"
        );

        Ok(ResolvedMovie {
            detail,
            reviews,
            failures,
        })
    }
}

fn settle<T>(stage: ResolveStage, result: Result<T, SourceError>, failures: &mut Vec<SourceFailure>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            if e.is_timeout() {
                warn!("Timed out loading {}: {}", stage, e);
            } else {
                warn!("Failed to load {}: {}", stage, e);
            }
            failures.push(SourceFailure {
                stage,
                message: e.to_string(),
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{summary, FakeCatalog, FakePrimary, FakeSecondary};
    use reel_models::{Credits, MovieDetails, RawPrimaryReview, RawSecondaryRating, ReviewSource};
    use std::time::Duration;

    fn details(id: u64, title: &str) -> MovieDetails {
        MovieDetails {
            summary: summary(id, title),
            runtime_minutes: Some(139),
            tagline: None,
            genres: vec!["Horror".to_string()],
        }
    }

    fn credits() -> Credits {
        Credits {
            director: "David Fincher".to_string(),
            cast: (1..=8).map(|n| format!("Actor {}", n)).collect(),
        }
    }

    fn secondary_ratings() -> Vec<RawSecondaryRating> {
        vec![
            RawSecondaryRating {
                source: "Internet Movie Database".to_string(),
                value: "8.8/10".to_string(),
            },
            RawSecondaryRating {
                source: "Rotten Tomatoes".to_string(),
                value: "79%".to_string(),
            },
        ]
    }

    fn resolver(catalog: FakeCatalog, primary: FakePrimary, secondary: Arc<FakeSecondary>) -> DetailResolver {
        DetailResolver::new(Arc::new(catalog), Arc::new(primary), secondary)
    }

    #[tokio::test]
    async fn test_primary_failure_keeps_secondary_reviews() {
        let catalog = FakeCatalog {
            details: Some(details(550, "Fight Club")),
            credits: Some(credits()),
            ..Default::default()
        };
        let secondary = Arc::new(FakeSecondary {
            ratings: Some(secondary_ratings()),
            ..Default::default()
        });

        let resolved = resolver(catalog, FakePrimary::default(), secondary.clone())
            .resolve(550)
            .await
            .unwrap();

        assert_eq!(resolved.reviews.len(), 2);
        assert!(resolved.reviews.iter().all(|r| r.source == ReviewSource::Secondary));
        assert_eq!(resolved.failures.len(), 1);
        assert_eq!(resolved.failures[0].stage, ResolveStage::PrimaryReviews);
        assert!(!resolved.is_complete());
        // secondary lookup is keyed by the title from phase one
        assert_eq!(*secondary.titles.lock().unwrap(), vec!["Fight Club".to_string()]);
    }

    #[tokio::test]
    async fn test_credits_are_joined_and_cast_capped() {
        let catalog = FakeCatalog {
            details: Some(details(550, "Fight Club")),
            credits: Some(credits()),
            ..Default::default()
        };
        let primary = FakePrimary {
            reviews: Some(vec![RawPrimaryReview {
                id: "5b1c".to_string(),
                author: Some("Goddard".to_string()),
                content: "Pretty awesome movie.".to_string(),
                rating: Some(10.0),
                created_at: "2018-06-09T17:51:53.359Z".to_string(),
            }]),
            ..Default::default()
        };
        let secondary = Arc::new(FakeSecondary {
            ratings: Some(secondary_ratings()),
            ..Default::default()
        });

        let resolved = resolver(catalog, primary, secondary).resolve(550).await.unwrap();
        assert!(resolved.is_complete());
        assert_eq!(resolved.detail.director, "David Fincher");
        assert_eq!(resolved.detail.cast.len(), 5);
        assert_eq!(resolved.detail.runtime_minutes, Some(139));
        let sources: Vec<ReviewSource> = resolved.reviews.iter().map(|r| r.source).collect();
        assert_eq!(
            sources,
            vec![ReviewSource::Primary, ReviewSource::Secondary, ReviewSource::Secondary]
        );
    }

    #[tokio::test]
    async fn test_credits_failure_uses_unknown_director() {
        let catalog = FakeCatalog {
            details: Some(details(9552, "The Exorcist")),
            ..Default::default()
        };
        let primary = FakePrimary {
            reviews: Some(Vec::new()),
            ..Default::default()
        };
        let secondary = Arc::new(FakeSecondary {
            ratings: Some(Vec::new()),
            ..Default::default()
        });

        let resolved = resolver(catalog, primary, secondary).resolve(9552).await.unwrap();
        assert_eq!(resolved.detail.director, "Unknown");
        assert!(resolved.detail.cast.is_empty());
        assert!(!resolved.detail.credits_fetched);
        assert_eq!(resolved.failures[0].stage, ResolveStage::Credits);
    }

    #[tokio::test]
    async fn test_details_failure_fails_resolution() {
        let secondary = Arc::new(FakeSecondary::default());
        let err = resolver(FakeCatalog::default(), FakePrimary::default(), secondary.clone())
            .resolve(42)
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::Details { id: 42, .. }));
        // no phase-two lookup without a title
        assert!(secondary.titles.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_phase_two_lookups_run_concurrently() {
        let catalog = Arc::new(FakeCatalog {
            details: Some(details(550, "Fight Club")),
            details_delay: Duration::from_millis(50),
            credits: Some(credits()),
            credits_delay: Duration::from_millis(300),
            ..Default::default()
        });
        let primary = FakePrimary {
            reviews: Some(Vec::new()),
            delay: Duration::from_millis(200),
        };
        let secondary = Arc::new(FakeSecondary {
            ratings: Some(secondary_ratings()),
            delay: Duration::from_millis(100),
            ..Default::default()
        });

        let resolver = DetailResolver::new(catalog.clone(), Arc::new(primary), secondary);
        let start = tokio::time::Instant::now();
        resolver.resolve(550).await.unwrap();
        let elapsed = start.elapsed();

        // details, then the slowest of the three phase-two lookups
        assert!(elapsed >= Duration::from_millis(350), "{:?}", elapsed);
        assert!(elapsed < Duration::from_millis(600), "{:?}", elapsed);

        let phase_two = catalog.phase_two_started.lock().unwrap()[0];
        assert!(phase_two - start >= Duration::from_millis(50));
    }
}
