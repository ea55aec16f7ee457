use crate::error::SourceError;
use crate::http::{decode_each, get_json};
use reel_models::RawSecondaryRating;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

pub(crate) const SOURCE: &str = "omdb";

#[derive(Debug, Deserialize)]
struct OmdbTitleResponse {
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Ratings", default)]
    ratings: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct OmdbRating {
    #[serde(rename = "Source")]
    source: String,
    #[serde(rename = "Value")]
    value: String,
}

fn is_not_found(message: &str) -> bool {
    message.to_lowercase().contains("not found")
}

/// Ratings for an exact title. Unknown titles yield an empty list.
pub async fn get_ratings_by_title(
    client: &Client,
    base_url: &str,
    api_key: &str,
    title: &str,
) -> Result<Vec<RawSecondaryRating>, SourceError> {
    let params = [("t", title.to_string()), ("apikey", api_key.to_string())];
    let response: OmdbTitleResponse = get_json(client, SOURCE, base_url, &params).await?;

    if response.response.as_deref() == Some("False") {
        let message = response.error.unwrap_or_else(|| "unknown error".to_string());
        if is_not_found(&message) {
            debug!(title, "No secondary ratings for title");
            return Ok(Vec::new());
        }
        return Err(SourceError::Rejected {
            source_name: SOURCE,
            message,
        });
    }

    Ok(decode_each::<OmdbRating>(SOURCE, "rating", response.ratings)
        .into_iter()
        .map(|rating| RawSecondaryRating {
            source: rating.source,
            value: rating.value,
        })
        .collect())
}
