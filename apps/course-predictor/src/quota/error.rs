use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("quota endpoint unreachable: {0}")]
    Network(String),

    #[error("quota request timed out")]
    Timeout,

    #[error("quota endpoint responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed quota response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return FetchError::Timeout;
        }

        if let Some(status) = err.status() {
            return FetchError::Status {
                status: status.as_u16(),
                body: err.to_string(),
            };
        }

        if err.is_decode() || err.is_body() {
            return FetchError::MalformedResponse(err.to_string());
        }

        FetchError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::MalformedResponse(err.to_string())
    }
}
