use serde::{Deserialize, Serialize};

/// Release year used when the catalog has no usable release date
pub const CURATED_YEAR: u32 = 2024;

/// Director name used when credits have no crew member with the Director job
pub const UNKNOWN_DIRECTOR: &str = "Unknown";

/// Maximum number of top-billed performers kept on a `MovieDetail`
pub const MAX_CAST: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    pub release_year: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_ref: Option<String>,
    pub overview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>, // 0.0-10.0, catalog vote average
}

impl MovieSummary {
    /// Build an absolute poster URL, e.g. `poster_url("https://image.tmdb.org/t/p", "w500")`
    pub fn poster_url(&self, image_base_url: &str, size: &str) -> Option<String> {
        self.poster_ref
            .as_ref()
            .map(|path| format!("{}/{}{}", image_base_url.trim_end_matches('/'), size, path))
    }
}

/// Extract the 4-digit year from a catalog release date ("1978-10-25").
///
/// Missing, empty or unparseable dates fall back to [`CURATED_YEAR`].
pub fn parse_release_year(release_date: Option<&str>) -> u32 {
    release_date
        .and_then(|date| date.split('-').next())
        .filter(|year| year.len() == 4)
        .and_then(|year| year.parse::<u32>().ok())
        .unwrap_or(CURATED_YEAR)
}

/// Director and top-billed cast extracted from a credits response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Credits {
    pub director: String,
    pub cast: Vec<String>, // billing order, at most MAX_CAST
}

impl Default for Credits {
    fn default() -> Self {
        Self {
            director: UNKNOWN_DIRECTOR.to_string(),
            cast: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub summary: MovieSummary,
    pub director: String,
    pub cast: Vec<String>,
    pub credits_fetched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
}

impl MovieDetail {
    /// Join catalog details with credits. Passing `None` marks credits as not fetched
    /// and keeps the "Unknown" director sentinel.
    pub fn new(details: MovieDetails, credits: Option<Credits>) -> Self {
        let credits_fetched = credits.is_some();
        let Credits { director, mut cast } = credits.unwrap_or_default();
        cast.truncate(MAX_CAST);

        Self {
            summary: details.summary,
            director,
            cast,
            credits_fetched,
            runtime_minutes: details.runtime_minutes,
            tagline: details.tagline,
            genres: details.genres,
        }
    }
}

/// Catalog "details" record for one movie, before credits are joined
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub summary: MovieSummary,
    pub runtime_minutes: Option<u32>,
    pub tagline: Option<String>,
    pub genres: Vec<String>,
}

impl From<MovieSummary> for MovieDetails {
    fn from(summary: MovieSummary) -> Self {
        Self {
            summary,
            runtime_minutes: None,
            tagline: None,
            genres: Vec::new(),
        }
    }
}

/// Genre filter for catalog discovery and search
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Genre {
    Horror,
    Other(u32),
}

impl Genre {
    /// Catalog-native genre id
    pub fn catalog_id(&self) -> u32 {
        match self {
            Genre::Horror => 27,
            Genre::Other(id) => *id,
        }
    }

    pub fn from_catalog_id(id: u32) -> Self {
        match id {
            27 => Genre::Horror,
            other => Genre::Other(other),
        }
    }
}

impl Default for Genre {
    fn default() -> Self {
        Genre::Horror
    }
}
