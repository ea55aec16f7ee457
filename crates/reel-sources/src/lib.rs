pub mod error;
pub mod factory;
pub mod http;
pub mod omdb;
pub mod tmdb;
pub mod traits;
pub mod youtube;

pub use error::SourceError;
pub use factory::SourceSet;
pub use http::build_client;
pub use omdb::OmdbClient;
pub use tmdb::{TmdbClient, TmdbEndpoint};
pub use traits::{MovieCatalog, PrimaryReviewSource, SecondaryRatingSource, VideoSearch};
pub use youtube::YoutubeClient;
