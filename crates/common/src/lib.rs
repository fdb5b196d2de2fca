pub mod config;
pub mod error;
pub mod logger;
pub mod providers;

// Re-export commonly used types
pub use config::{ApiKey, AppConfig};
pub use error::ChefError;
pub use providers::{CandidateSpec, Dispatch, FailureMode, GenerationParameters, ProviderKind};
pub type Result<T> = std::result::Result<T, ChefError>;
