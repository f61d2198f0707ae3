//! Configuration for the paper assistant

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Embedding configuration
    pub embeddings: EmbeddingConfig,
    /// LLM configuration
    pub llm: LlmConfig,
    /// Paper database configuration
    pub database: DatabaseConfig,
    /// Retrieval and generation tuning
    pub assistant: AssistantConfig,
}

impl AppConfig {
    /// Load configuration from an optional TOML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML configuration file; missing sections use defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| {
            Error::Config(format!("Invalid config file {}: {}", path.display(), e))
        })
    }

    /// Apply environment variable overrides
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.trim().is_empty() {
                self.llm.api_key = Some(key);
            }
        }
        if let Ok(path) = std::env::var("PAPER_ASSISTANT_DB") {
            self.database.path = PathBuf::from(path);
        }
        if let Ok(host) = std::env::var("PAPER_ASSISTANT_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PAPER_ASSISTANT_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PAPER_ASSISTANT_PORT: {}", port),
            }
        }
        if let Ok(url) = std::env::var("OLLAMA_BASE_URL") {
            self.embeddings.base_url = url.clone();
            self.llm.ollama_base_url = url;
        }
        if let Ok(backend) = std::env::var("PAPER_ASSISTANT_LLM_BACKEND") {
            match backend.to_lowercase().as_str() {
                "gemini" => self.llm.backend = LlmBackend::Gemini,
                "ollama" => self.llm.backend = LlmBackend::Ollama,
                other => tracing::warn!("Ignoring unknown LLM backend: {}", other),
            }
        }
    }

    /// Check settings that would make the service unusable
    pub fn validate(&self) -> Result<()> {
        if self.llm.backend == LlmBackend::Gemini && self.llm.api_key.is_none() {
            return Err(Error::Config(
                "Gemini backend selected but no API key set (GEMINI_API_KEY)".to_string(),
            ));
        }
        if self.assistant.top_k == 0 {
            return Err(Error::Config("assistant.top_k must be at least 1".to_string()));
        }
        if self.assistant.mcq_count == 0 {
            return Err(Error::Config("assistant.mcq_count must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS (the browser frontend runs on a different origin)
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 50MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            enable_cors: true,
            max_upload_size: 50 * 1024 * 1024,
        }
    }
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Ollama base URL serving the embedding model
    pub base_url: String,
    /// Embedding model name (all-minilm = all-MiniLM-L6-v2)
    pub model: String,
    /// Embedding dimensions (384 for MiniLM)
    pub dimensions: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "all-minilm".to_string(),
            dimensions: 384,
        }
    }
}

/// LLM backend selection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LlmBackend {
    /// Google Gemini via the Generative Language API
    #[default]
    Gemini,
    /// Local Ollama server
    Ollama,
}

/// LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Which backend generates text
    pub backend: LlmBackend,
    /// Gemini API key
    pub api_key: Option<String>,
    /// Gemini model name
    pub gemini_model: String,
    /// Gemini API base URL
    pub gemini_base_url: String,
    /// Ollama base URL
    pub ollama_base_url: String,
    /// Ollama generation model
    pub ollama_model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries for failed requests
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            backend: LlmBackend::Gemini,
            api_key: None,
            gemini_model: "gemini-1.5-pro".to_string(),
            gemini_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            ollama_base_url: "http://localhost:11434".to_string(),
            ollama_model: "llama3.2:3b".to_string(),
            temperature: 0.3,
            timeout_secs: 120,
            max_retries: 0,
        }
    }
}

/// Paper database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database file
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        let path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("paper-assistant")
            .join("papers.db");
        Self { path }
    }
}

/// Retrieval and generation tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Documents retrieved per chatbot query
    pub top_k: usize,
    /// Total retrieved characters needed before context counts as sufficient
    pub min_context_chars: usize,
    /// Questions requested per MCQ generation
    pub mcq_count: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            min_context_chars: 50,
            mcq_count: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.assistant.top_k, 5);
        assert_eq!(config.assistant.min_context_chars, 50);
        assert_eq!(config.assistant.mcq_count, 5);
        assert_eq!(config.llm.backend, LlmBackend::Gemini);
        assert_eq!(config.llm.max_retries, 0);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[llm]\nbackend = \"ollama\"\nollama_model = \"phi3\"\n\n[server]\nport = 8088"
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.llm.backend, LlmBackend::Ollama);
        assert_eq!(config.llm.ollama_model, "phi3");
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.embeddings.dimensions, 384);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validate() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_err());

        config.llm.api_key = Some("key".to_string());
        assert!(config.validate().is_ok());

        config.assistant.top_k = 0;
        assert!(config.validate().is_err());

        config.assistant.top_k = 5;
        config.llm.api_key = None;
        config.llm.backend = LlmBackend::Ollama;
        assert!(config.validate().is_ok());
    }
}
