pub mod movie;
pub mod raw;
pub mod review;
pub mod trailer;

pub use movie::{parse_release_year, Credits, Genre, MovieDetail, MovieDetails, MovieSummary, CURATED_YEAR, MAX_CAST, UNKNOWN_DIRECTOR};
pub use raw::{RawPrimaryReview, RawSecondaryRating};
pub use review::{AggregatedReviewSet, Review, ReviewSource};
pub use trailer::{Trailer, TrailerSite, Video};
