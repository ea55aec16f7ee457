use serde::{Deserialize, Serialize};

/// A primary-source review as validated at the HTTP boundary, before aggregation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawPrimaryReview {
    pub id: String,
    pub author: Option<String>,
    pub content: String,
    pub rating: Option<f64>, // already 0-10
    pub created_at: String,  // ISO-8601 as sent by the source
}

/// A secondary-source rating pair, e.g. `{ source: "Internet Movie Database", value: "7.7/10" }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawSecondaryRating {
    pub source: String,
    pub value: String,
}
