//! NS API error types.

/// Errors from the NS travel API client.
#[derive(Debug, thiserror::Error)]
pub enum NsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status. Some decommissioned stations make the
    /// trip endpoint answer 500 permanently.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body did not deserialize. The trip endpoint is known to
    /// return a mistyped body instead of an empty trip list when there are
    /// no results, so the fetch loop treats this as "no trips".
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Invalid credentials
    #[error("unauthorized: check NS_USERNAME and NS_APIKEY")]
    Unauthorized,
}

impl NsError {
    /// Whether a per-destination fetch may recover from this error by
    /// skipping the destination and moving on.
    ///
    /// Authentication failures are fatal: every subsequent query would fail
    /// the same way, so there is no point continuing the run.
    pub fn is_recoverable(&self) -> bool {
        match self {
            NsError::Http(_) | NsError::Api { .. } | NsError::Json { .. } => true,
            NsError::Unauthorized => false,
        }
    }
}
