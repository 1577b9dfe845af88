//! Configuration management for the agent.
//!
//! Configuration can be set via environment variables:
//! - `OPENROUTER_API_KEY` - Required. Your OpenRouter API key.
//! - `DEFAULT_MODEL` - Optional. The default LLM model to use.
//! - `WORKSPACE_PATH` - Optional. The working directory all tool operations
//!   are confined to. Defaults to the current directory.
//! - `MAX_ITERATIONS` - Optional. Maximum agent loop iterations. Defaults to `20`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("Workspace path {0:?} is not usable: {1}")]
    BadWorkspace(PathBuf, String),
}

/// Agent configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenRouter API key
    pub api_key: String,

    /// Default LLM model identifier (OpenRouter format)
    pub default_model: String,

    /// The working directory all tool operations are confined to
    pub workspace_path: PathBuf,

    /// Maximum iterations for the agent loop
    pub max_iterations: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `OPENROUTER_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENROUTER_API_KEY".to_string()))?;

        let default_model = std::env::var("DEFAULT_MODEL")
            .unwrap_or_else(|_| "anthropic/claude-sonnet-4.5".to_string());

        let workspace_path = std::env::var("WORKSPACE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

        let max_iterations = std::env::var("MAX_ITERATIONS")
            .unwrap_or_else(|_| "20".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("MAX_ITERATIONS".to_string(), format!("{}", e)))?;

        Ok(Self {
            api_key,
            default_model,
            workspace_path,
            max_iterations,
        })
    }

    /// Canonicalize the workspace path so the sandbox root is absolute and
    /// normalized before any tool runs. The directory must exist.
    pub fn canonicalize_workspace(&mut self) -> Result<(), ConfigError> {
        self.workspace_path = self
            .workspace_path
            .canonicalize()
            .map_err(|e| ConfigError::BadWorkspace(self.workspace_path.clone(), e.to_string()))?;
        Ok(())
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, default_model: String, workspace_path: PathBuf) -> Self {
        Self {
            api_key,
            default_model,
            workspace_path,
            max_iterations: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults_to_twenty_iterations() {
        let config = Config::new(
            "key".to_string(),
            "some/model".to_string(),
            PathBuf::from("/tmp"),
        );
        assert_eq!(config.max_iterations, 20);
    }

    #[test]
    fn canonicalize_rejects_missing_workspace() {
        let mut config = Config::new(
            "key".to_string(),
            "some/model".to_string(),
            PathBuf::from("/definitely/not/a/real/path"),
        );
        assert!(matches!(
            config.canonicalize_workspace(),
            Err(ConfigError::BadWorkspace(_, _))
        ));
    }

    #[test]
    fn canonicalize_makes_the_workspace_absolute() {
        let ws = tempfile::tempdir().unwrap();
        let mut config = Config::new(
            "key".to_string(),
            "some/model".to_string(),
            ws.path().to_path_buf(),
        );
        config.canonicalize_workspace().unwrap();
        assert!(config.workspace_path.is_absolute());
    }
}
