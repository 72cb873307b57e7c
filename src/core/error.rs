use reqwest::StatusCode;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response came back: timeout, DNS failure, connection reset.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("http error {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("unauthorized: {body}")]
    Unauthorized { body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("cannot read upload source {uri}: {source}")]
    LocalFile {
        uri: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid upload uri: {0}")]
    InvalidUri(String),

    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ApiError {
    pub(crate) fn from_status(status: StatusCode, body: String) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            ApiError::Unauthorized { body }
        } else {
            ApiError::Http { status, body }
        }
    }

    /// Status of the server response, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Http { body, .. } | ApiError::Unauthorized { body } => Some(body),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Network(e) if e.is_timeout())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => ApiError::from_status(status, error.to_string()),
            None => ApiError::Network(error),
        }
    }
}
