use crate::error::ChefError;
use crate::providers::{default_provider_chain, CandidateSpec, Dispatch, FailureMode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Providers file looked up when `PROVIDERS_FILE` is not set
pub const DEFAULT_PROVIDERS_FILE: &str = "chefkos.toml";

/// Inference credential, redacted in debug output
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Chef Kos application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,

    /// Global inference credential
    #[serde(skip)]
    pub api_key: Option<ApiKey>,

    /// Ordered provider candidates
    pub providers: Vec<CandidateSpec>,

    /// Whether provider calls are attempted at all
    pub providers_enabled: bool,

    /// Behaviour on total provider failure
    pub failure_mode: FailureMode,

    /// Candidate dispatch strategy
    pub dispatch: Dispatch,

    /// Per-call HTTP timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8888,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
            api_key: None,
            providers: default_provider_chain(),
            providers_enabled: true,
            failure_mode: FailureMode::Template,
            dispatch: Dispatch::Sequential,
            request_timeout_secs: 60,
        }
    }
}

/// On-disk layout of the providers file
#[derive(Debug, Deserialize)]
struct ProvidersFile {
    #[serde(default)]
    providers: Vec<CandidateSpec>,
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, ChefError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let providers = match std::env::var("PROVIDERS_FILE") {
            Ok(path) => load_provider_chain(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_PROVIDERS_FILE).exists() => {
                load_provider_chain(Path::new(DEFAULT_PROVIDERS_FILE))?
            }
            Err(_) => default_provider_chain(),
        };

        let config = Self {
            server_host: std::env::var("SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8888),
            log_dir: Self::get_env_path("LOG_DIR")
                .unwrap_or_else(|| PathBuf::from("./log")),
            log_level: std::env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "info".to_string()),
            api_key: std::env::var("INFERENCE_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty())
                .map(ApiKey::new),
            providers,
            providers_enabled: std::env::var("PROVIDERS_ENABLED")
                .ok()
                .map(|s| !matches!(s.trim().to_lowercase().as_str(), "false" | "0" | "no" | "off"))
                .unwrap_or(true),
            failure_mode: match std::env::var("FAILURE_MODE") {
                Ok(mode) => mode.parse()?,
                Err(_) => FailureMode::Template,
            },
            dispatch: match std::env::var("DISPATCH") {
                Ok(mode) => mode.parse()?,
                Err(_) => Dispatch::Sequential,
            },
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
        };

        config.validate()?;

        Ok(config)
    }

    /// Get PathBuf from environment variable
    fn get_env_path(key: &str) -> Option<PathBuf> {
        std::env::var(key).ok().map(PathBuf::from)
    }

    /// Credential for a candidate: its own variable first, then the global key
    pub fn credential_for(&self, candidate: &CandidateSpec) -> Option<ApiKey> {
        candidate
            .api_key_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|key| !key.trim().is_empty())
            .map(ApiKey::new)
            .or_else(|| self.api_key.clone())
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ChefError> {
        if self.server_host.trim().is_empty() {
            return Err(ChefError::config("Server host cannot be empty"));
        }

        if self.server_port == 0 {
            return Err(ChefError::config("Server port cannot be 0"));
        }

        if self.request_timeout_secs == 0 {
            return Err(ChefError::config("Request timeout must be positive"));
        }

        for candidate in &self.providers {
            candidate.validate()?;
        }

        Ok(())
    }
}

/// Read the `[[providers]]` tables of a TOML providers file
pub fn load_provider_chain(path: &Path) -> Result<Vec<CandidateSpec>, ChefError> {
    if !path.exists() {
        return Err(ChefError::config(format!(
            "Providers file not found: {}",
            path.display()
        )));
    }

    let settings = ::config::Config::builder()
        .add_source(::config::File::from(path))
        .build()?;

    let file: ProvidersFile = settings.try_deserialize()?;

    tracing::debug!(
        "Loaded {} provider candidates from {}",
        file.providers.len(),
        path.display()
    );

    Ok(file.providers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderKind;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server_port, 8888);
        assert_eq!(config.failure_mode, FailureMode::Template);
        assert_eq!(config.dispatch, Dispatch::Sequential);
        assert!(config.providers_enabled);
    }

    #[test]
    fn test_server_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.server_bind_address(), "0.0.0.0:8888");
    }

    #[test]
    fn test_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());

        let mut invalid_config = AppConfig::default();
        invalid_config.server_port = 0;
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = AppConfig::default();
        invalid_config.providers[0].parameters.temperature = -1.0;
        assert!(invalid_config.validate().is_err());
    }

    #[test]
    fn test_api_key_is_redacted() {
        let mut config = AppConfig::default();
        config.api_key = Some(ApiKey::new("hf_secret_token"));
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hf_secret_token"));
        assert!(rendered.contains("ApiKey(***)"));
    }

    #[test]
    fn test_credential_falls_back_to_global() {
        let mut config = AppConfig::default();
        config.api_key = Some(ApiKey::new("global"));

        let mut candidate = CandidateSpec::new(ProviderKind::Anthropic, "claude-3-haiku-20240307");
        candidate.api_key_env = Some("CHEFKOS_TEST_UNSET_KEY_VARIABLE".to_string());

        let key = config.credential_for(&candidate).unwrap();
        assert_eq!(key.expose(), "global");
    }

    #[test]
    fn test_load_provider_chain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("providers.toml");
        std::fs::write(
            &path,
            r#"
[[providers]]
kind = "anthropic"
model = "claude-3-haiku-20240307"
api_key_env = "ANTHROPIC_API_KEY"

[providers.parameters]
max_new_tokens = 500
temperature = 0.7

[[providers]]
kind = "hugging_face"
model = "HuggingFaceH4/zephyr-7b-beta"
endpoint = "http://localhost:9000"
"#,
        )
        .unwrap();

        let chain = load_provider_chain(&path).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].kind, ProviderKind::Anthropic);
        assert_eq!(chain[0].parameters.max_new_tokens, 500);
        assert!(chain[0].parameters.wait_for_model);
        assert_eq!(chain[1].model, "HuggingFaceH4/zephyr-7b-beta");
        assert_eq!(chain[1].base_url(), "http://localhost:9000");
    }

    #[test]
    fn test_load_missing_provider_file() {
        let result = load_provider_chain(Path::new("/nonexistent/chefkos.toml"));
        assert!(result.is_err());
    }
}
