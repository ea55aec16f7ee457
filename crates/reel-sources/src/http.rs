use crate::error::SourceError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};

/// Shared HTTP client. The timeout applies to every outbound request.
pub fn build_client(timeout: Duration) -> Result<Client, SourceError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("dreadreel/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| SourceError::network("http", e))
}

/// GET `url` with `query` and decode the JSON body as `T`.
///
/// Query values are never logged since they carry API keys.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    source_name: &'static str,
    url: &str,
    query: &[(&str, String)],
) -> Result<T, SourceError> {
    debug!(source = source_name, url = %url, "Sending request");

    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| SourceError::network(source_name, e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(SourceError::Status {
            source_name,
            status: status.as_u16(),
            body,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| SourceError::network(source_name, e))?;
    trace!(source = source_name, bytes = body.len(), "Received response");

    serde_json::from_str(&body).map_err(|e| SourceError::decode(source_name, e.to_string()))
}

/// Decode each record on its own; records that do not match `T` are dropped.
pub(crate) fn decode_each<T: DeserializeOwned>(
    source_name: &'static str,
    kind: &str,
    records: Vec<serde_json::Value>,
) -> Vec<T> {
    let total = records.len();
    let decoded: Vec<T> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<T>(record) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(source = source_name, kind, index, error = %e, "Dropping malformed record");
                None
            }
        })
        .collect();

    if decoded.len() < total {
        debug!(
            source = source_name,
            kind,
            kept = decoded.len(),
            dropped = total - decoded.len(),
            "Decoded records"
        );
    }
    decoded
}
