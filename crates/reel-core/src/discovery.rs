use reel_models::{Genre, MovieSummary};
use reel_sources::MovieCatalog;
use tracing::{info, warn};

/// Initial listing for a genre, popularity first.
///
/// A catalog failure yields an empty listing; the caller shows its empty state.
pub async fn load_discovery(catalog: &dyn MovieCatalog, genre: Genre) -> Vec<MovieSummary> {
    match catalog.discover_by_genre(genre).await {
        Ok(movies) => {
            info!(genre = genre.catalog_id(), count = movies.len(), "Loaded discovery listing");
            movies
        }
        Err(e) => {
            warn!("Failed to load discovery listing from {}: {}", catalog.source_name(), e);
            Vec::new()
        }
    }
}
