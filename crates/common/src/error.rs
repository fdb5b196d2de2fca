/// Chef Kos error types
#[derive(Debug, thiserror::Error)]
pub enum ChefError {
    /// Client request body is malformed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Every provider candidate failed
    #[error("All {attempts} provider candidates failed, last error: {last_error}")]
    AllProvidersFailed {
        /// Number of candidates attempted
        attempts: usize,
        /// Message of the last failure seen
        last_error: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChefError {
    /// Create invalid request error
    pub fn invalid_request<S: Into<String>>(msg: S) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create total provider failure error
    pub fn all_providers_failed<S: Into<String>>(attempts: usize, last_error: S) -> Self {
        Self::AllProvidersFailed {
            attempts,
            last_error: last_error.into(),
        }
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}

impl From<::config::ConfigError> for ChefError {
    fn from(err: ::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

// HTTP response conversion
impl ChefError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) => 400,
            Self::AllProvidersFailed { .. } => 503,
            Self::Config(_) => 500,
            Self::Io(_) => 500,
            Self::Json(_) => 400,
            Self::Other(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ChefError::invalid_request("bad").status_code(), 400);
        assert_eq!(ChefError::all_providers_failed(3, "boom").status_code(), 503);
        assert_eq!(ChefError::config("oops").status_code(), 500);
    }

    #[test]
    fn test_all_providers_failed_message() {
        let err = ChefError::all_providers_failed(2, "HTTP 500");
        assert_eq!(
            err.to_string(),
            "All 2 provider candidates failed, last error: HTTP 500"
        );
    }
}
