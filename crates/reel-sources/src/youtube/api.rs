use crate::error::SourceError;
use crate::http::{decode_each, get_json};
use reqwest::Client;
use serde::Deserialize;

pub(crate) const SOURCE: &str = "youtube";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: String,
}

/// Video ids matching `query`, in platform ranking order
pub async fn search_videos(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<String>, SourceError> {
    let url = format!("{}/search", base_url.trim_end_matches('/'));
    let params = [
        ("part", "snippet".to_string()),
        ("type", "video".to_string()),
        ("maxResults", "1".to_string()),
        ("q", query.to_string()),
        ("key", api_key.to_string()),
    ];
    let response: SearchResponse = get_json(client, SOURCE, &url, &params).await?;

    Ok(decode_each::<SearchItem>(SOURCE, "search item", response.items)
        .into_iter()
        .map(|item| item.id.video_id)
        .collect())
}
