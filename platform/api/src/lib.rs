//! REST plumbing shared by the suite's HTTP clients: error taxonomy, endpoint
//! resolution and response decoding.

use std::sync::Arc;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

/// Shared client result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error("resource not found")]
    NotFound,
    #[error("server responded with {status}")]
    Status { status: StatusCode, body: String },
    #[error("malformed response body")]
    Decode(Arc<serde_json::Error>),
    #[error("transport failure")]
    Transport(Arc<reqwest::Error>),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidBaseUrl(_) => "INVALID_BASE_URL",
            ApiError::NotFound => "NOT_FOUND",
            ApiError::Status { .. } => "UPSTREAM_STATUS",
            ApiError::Decode(_) => "DECODE",
            ApiError::Transport(_) => "TRANSPORT",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }

    pub fn decode(err: serde_json::Error) -> Self {
        Self::Decode(Arc::new(err))
    }

    pub fn transport(err: reqwest::Error) -> Self {
        Self::Transport(Arc::new(err))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        Self::transport(value)
    }
}

/// Root of a REST collection, e.g. `http://host:8080/employeeapi`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    base: Url,
}

impl Endpoint {
    /// Resolve `root` and append the collection `prefix` segments to it.
    pub fn new(root: &str, prefix: &str) -> ApiResult<Self> {
        let mut base =
            Url::parse(root.trim()).map_err(|_| ApiError::InvalidBaseUrl(root.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl(root.to_string()));
        }
        base.set_query(None);
        base.set_fragment(None);
        {
            let mut segments = base
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidBaseUrl(root.to_string()))?;
            segments.pop_if_empty();
            segments.extend(prefix.split('/').filter(|segment| !segment.is_empty()));
        }
        Ok(Self { base })
    }

    pub fn as_str(&self) -> &str {
        self.base.as_str()
    }

    /// Build the URL of a resource below the collection root.
    pub fn url<I, S>(&self, segments: I) -> Url
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Map non-success statuses onto [`ApiError`]; 404 becomes [`ApiError::NotFound`].
pub async fn ensure_success(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status { status, body })
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ApiError::decode)
}

/// Decode a body that may legitimately be empty or carry a plain-text
/// acknowledgement instead of a JSON document.
pub async fn read_optional_json<T: DeserializeOwned>(response: Response) -> ApiResult<Option<T>> {
    let bytes = response.bytes().await?;
    Ok(decode_optional(&bytes))
}

fn decode_optional<T: DeserializeOwned>(bytes: &[u8]) -> Option<T> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice(bytes) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(error = %err, "response body is not a document; ignoring it");
            None
        }
    }
}
