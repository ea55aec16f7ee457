use crate::error::SourceError;
use crate::omdb::api;
use crate::traits::SecondaryRatingSource;
use async_trait::async_trait;
use reel_config::RatingsConfig;
use reel_models::RawSecondaryRating;
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(client: Client, base_url: String, api_key: String) -> Self {
        Self {
            client: Arc::new(client),
            base_url,
            api_key,
        }
    }

    pub fn from_config(client: Client, config: &RatingsConfig) -> Self {
        Self::new(client, config.base_url.clone(), config.api_key.clone())
    }
}

#[async_trait]
impl SecondaryRatingSource for OmdbClient {
    fn source_name(&self) -> &str {
        api::SOURCE
    }

    async fn fetch_secondary_ratings(&self, title: &str) -> Result<Vec<RawSecondaryRating>, SourceError> {
        if title.trim().is_empty() {
            return Ok(Vec::new());
        }
        api::get_ratings_by_title(&self.client, &self.base_url, &self.api_key, title).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::build_client;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::{
        matchers::{method, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn client_for(server: &MockServer) -> OmdbClient {
        OmdbClient::new(
            build_client(Duration::from_secs(5)).unwrap(),
            format!("{}/", server.uri()),
            "omdb-key".to_string(),
        )
    }

    #[tokio::test]
    async fn test_ratings_looked_up_by_exact_title() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("t", "The Exorcist"))
            .and(query_param("apikey", "omdb-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Title": "The Exorcist",
                "Response": "True",
                "Ratings": [
                    {"Source": "Internet Movie Database", "Value": "8.1/10"},
                    {"Source": "Rotten Tomatoes", "Value": "78%"},
                    {"Source": 12}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ratings = client_for(&server).fetch_secondary_ratings("The Exorcist").await.unwrap();
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[0].source, "Internet Movie Database");
        assert_eq!(ratings[0].value, "8.1/10");
    }

    #[tokio::test]
    async fn test_unknown_title_is_empty_not_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Response": "False",
                "Error": "Movie not found!"
            })))
            .mount(&server)
            .await;

        let ratings = client_for(&server).fetch_secondary_ratings("Exorcist, The").await.unwrap();
        assert!(ratings.is_empty());
    }

    #[tokio::test]
    async fn test_payload_error_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Response": "False",
                "Error": "Request limit reached!"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_secondary_ratings("Scream").await.unwrap_err();
        assert!(matches!(err, SourceError::Rejected { .. }));
    }

    #[tokio::test]
    async fn test_blank_title_issues_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        assert!(client_for(&server).fetch_secondary_ratings(" ").await.unwrap().is_empty());
    }
}
