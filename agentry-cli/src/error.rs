use agentry::core::ConfigError;
use agentry::runtime::{DispatchError, RegistryError};
use agentry::tools::ToolError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read config file {path}: {source}")]
    ConfigFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("No agent matches '{0}'")]
    UnknownAgent(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn error_code(&self) -> &'static str {
        match self {
            CliError::Config(_) | CliError::ConfigFile { .. } => "CONFIG_ERROR",
            CliError::Registry(err) => err.error_code(),
            CliError::Dispatch(err) => err.error_code(),
            CliError::Tool(err) => err.error_code(),
            CliError::UnknownAgent(_) => "AGENT_NOT_FOUND",
            CliError::InvalidArgument(_) => "INVALID_ARGUMENT",
            CliError::Json(_) => "SERIALIZATION_ERROR",
        }
    }
}
