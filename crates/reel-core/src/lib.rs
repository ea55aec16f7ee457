pub mod aggregate;
pub mod discovery;
pub mod pipeline;
pub mod resolver;
pub mod search;
pub mod trailer;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregate::{aggregate_reviews, aggregate_reviews_now, normalize_secondary_rating};
pub use discovery::load_discovery;
pub use pipeline::Pipeline;
pub use resolver::{DetailResolver, ResolveError, ResolveStage, ResolvedMovie, SourceFailure};
pub use search::{SearchController, SearchPhase, SearchSession};
pub use trailer::{TrailerError, TrailerFinder};
