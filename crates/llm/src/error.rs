use thiserror::Error;

/// Failure of a single provider candidate.
///
/// Always recovered by the sequencer, which moves on to the next candidate.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("API returned error: {status} - {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Unexpected response shape: {0}")]
    UnexpectedResponseShape(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

impl ProviderError {
    /// HTTP status attached to the failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("timed out: {}", err))
        } else {
            Self::Transport(err.to_string())
        }
    }
}
