use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// Request rejected or remote unreachable (includes timeouts)
    #[error("{source_name} request failed: {error}")]
    Network {
        source_name: &'static str,
        #[source]
        error: reqwest::Error,
    },

    #[error("{source_name} returned {status}: {body}")]
    Status {
        source_name: &'static str,
        status: u16,
        body: String,
    },

    /// Response body did not have the expected envelope shape
    #[error("failed to decode {source_name} response: {message}")]
    Decode {
        source_name: &'static str,
        message: String,
    },

    /// Remote answered successfully but reported an error in the payload
    #[error("{source_name} rejected the request: {message}")]
    Rejected {
        source_name: &'static str,
        message: String,
    },
}

impl SourceError {
    /// The request URL is stripped from `error` because its query carries API keys.
    pub fn network(source_name: &'static str, error: reqwest::Error) -> Self {
        SourceError::Network {
            source_name,
            error: error.without_url(),
        }
    }

    pub fn decode(source_name: &'static str, message: impl Into<String>) -> Self {
        SourceError::Decode {
            source_name,
            message: message.into(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, SourceError::Network { error, .. } if error.is_timeout())
    }
}
