//! Configuration for the compliance service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Environment variable naming an optional TOML config file
pub const CONFIG_PATH_ENV: &str = "COMPLIANCE_RAG_CONFIG";

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// PDF corpus configuration
    #[serde(default)]
    pub corpus: CorpusConfig,
    /// Embedding configuration
    #[serde(default)]
    pub embeddings: EmbeddingConfig,
    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,
}

impl RagConfig {
    /// Load configuration: defaults, then the optional TOML file named by
    /// `COMPLIANCE_RAG_CONFIG`, then environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_toml_file(path.trim())?,
            _ => Self::default(),
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse TOML config content
    ///
    /// Missing fields take their defaults. A non-default `llm.backend` also
    /// swaps in that backend's URL and models unless they are given.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(raw).map_err(|e| Error::Config(e.to_string()))?;
        config.llm.apply_backend_defaults(LlmBackend::default());
        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    fn apply_vars<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| var(name).filter(|v| !v.trim().is_empty());

        if let Some(host) = var("COMPLIANCE_RAG_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("COMPLIANCE_RAG_PORT") {
            self.server.port = parse_var("COMPLIANCE_RAG_PORT", &port)?;
        }
        if let Some(folder) = var("PDF_FOLDER") {
            self.corpus.pdf_folder = PathBuf::from(folder);
        }
        if let Some(top_k) = var("RETRIEVAL_TOP_K") {
            self.retrieval.top_k = parse_var("RETRIEVAL_TOP_K", &top_k)?;
        }
        if let Some(backend) = var("LLM_BACKEND") {
            let previous = self.llm.backend;
            self.llm.backend = backend.parse()?;
            self.llm.apply_backend_defaults(previous);
        }
        if let Some(url) = var("LLM_BASE_URL") {
            self.llm.base_url = url;
        }
        if let Some(model) = var("LLM_MODEL") {
            self.llm.generate_model = model;
        }
        if let Some(model) = var("EMBED_MODEL") {
            self.llm.embed_model = model;
        }
        if let Some(key) = var("OPENAI_API_KEY") {
            self.llm.api_key = Some(key);
        }

        Ok(())
    }

    /// Reject configurations the service cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.llm.backend == LlmBackend::OpenAi && self.llm.api_key.is_none() {
            return Err(Error::Config(
                "OPENAI_API_KEY must be set for the openai backend".to_string(),
            ));
        }
        if self.retrieval.top_k == 0 {
            return Err(Error::Config("retrieval.top_k must be at least 1".to_string()));
        }
        if self.embeddings.batch_size == 0 {
            return Err(Error::Config(
                "embeddings.batch_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("invalid value for {}: {}", name, value)))
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            enable_cors: true,
        }
    }
}

/// PDF corpus configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Folder scanned (non-recursively) for `*.pdf` files at startup
    pub pdf_folder: PathBuf,
    /// Sort file names before loading; otherwise directory listing order
    pub sort_filenames: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            pdf_folder: PathBuf::from("pdf_files"),
            sort_filenames: true,
        }
    }
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Pages sent per embedding request while building the index
    pub batch_size: usize,
    /// Embedding requests in flight while building the index
    pub parallel_batches: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            parallel_batches: 4,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Pages handed to the LLM as context per question
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 2 }
    }
}

/// Completion/embedding backend
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LlmBackend {
    /// OpenAI-compatible API (embeddings + chat completions)
    #[default]
    OpenAi,
    /// Local Ollama server
    Ollama,
}

impl LlmBackend {
    /// Base URL used when none is configured
    pub fn default_base_url(&self) -> &'static str {
        match self {
            LlmBackend::OpenAi => "https://api.openai.com",
            LlmBackend::Ollama => "http://localhost:11434",
        }
    }

    /// Embedding model used when none is configured
    pub fn default_embed_model(&self) -> &'static str {
        match self {
            LlmBackend::OpenAi => "text-embedding-ada-002",
            LlmBackend::Ollama => "nomic-embed-text",
        }
    }

    /// Generation model used when none is configured
    pub fn default_generate_model(&self) -> &'static str {
        match self {
            LlmBackend::OpenAi => "gpt-3.5-turbo",
            LlmBackend::Ollama => "llama3.2:3b",
        }
    }
}

impl FromStr for LlmBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(LlmBackend::OpenAi),
            "ollama" => Ok(LlmBackend::Ollama),
            other => Err(Error::Config(format!("unsupported LLM backend: {}", other))),
        }
    }
}

/// LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Backend provider
    pub backend: LlmBackend,
    /// API key (read from the environment, never written out)
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Base URL of the provider API
    pub base_url: String,
    /// Embedding model name
    pub embed_model: String,
    /// Generation model name
    pub generate_model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds (none by default)
    pub timeout_secs: Option<u64>,
    /// Number of retries for failed requests
    pub max_retries: u32,
}

impl LlmConfig {
    /// Replace URL and model names still at `previous` backend's defaults
    /// with the current backend's defaults
    pub fn apply_backend_defaults(&mut self, previous: LlmBackend) {
        if previous == self.backend {
            return;
        }
        if self.base_url == previous.default_base_url() {
            self.base_url = self.backend.default_base_url().to_string();
        }
        if self.embed_model == previous.default_embed_model() {
            self.embed_model = self.backend.default_embed_model().to_string();
        }
        if self.generate_model == previous.default_generate_model() {
            self.generate_model = self.backend.default_generate_model().to_string();
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            backend: LlmBackend::OpenAi,
            api_key: None,
            base_url: LlmBackend::OpenAi.default_base_url().to_string(),
            embed_model: LlmBackend::OpenAi.default_embed_model().to_string(),
            generate_model: LlmBackend::OpenAi.default_generate_model().to_string(),
            temperature: 0.1,
            timeout_secs: None,
            max_retries: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn apply(config: &mut RagConfig, vars: &[(&str, &str)]) -> Result<()> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config.apply_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = RagConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.corpus.pdf_folder, PathBuf::from("pdf_files"));
        assert_eq!(config.retrieval.top_k, 2);
        assert_eq!(config.llm.backend, LlmBackend::OpenAi);
        assert!(config.llm.timeout_secs.is_none());
        assert_eq!(config.llm.max_retries, 0);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = RagConfig::default();
        apply(
            &mut config,
            &[
                ("COMPLIANCE_RAG_PORT", "9090"),
                ("PDF_FOLDER", "/srv/regs"),
                ("OPENAI_API_KEY", "sk-test"),
                ("RETRIEVAL_TOP_K", "4"),
            ],
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.corpus.pdf_folder, PathBuf::from("/srv/regs"));
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.retrieval.top_k, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_backend_switch_picks_default_url() {
        let mut config = RagConfig::default();
        apply(&mut config, &[("LLM_BACKEND", "ollama")]).unwrap();

        assert_eq!(config.llm.backend, LlmBackend::Ollama);
        assert_eq!(config.llm.base_url, "http://localhost:11434");
        assert_eq!(config.llm.embed_model, "nomic-embed-text");
        assert_eq!(config.llm.generate_model, "llama3.2:3b");
        // Ollama needs no key.
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_backend_switch_keeps_explicit_models() {
        let mut config = RagConfig::default();
        apply(
            &mut config,
            &[
                ("LLM_BACKEND", "ollama"),
                ("LLM_MODEL", "mistral"),
                ("LLM_BASE_URL", "http://gpu-box:11434"),
            ],
        )
        .unwrap();

        assert_eq!(config.llm.base_url, "http://gpu-box:11434");
        assert_eq!(config.llm.generate_model, "mistral");
        assert_eq!(config.llm.embed_model, "nomic-embed-text");
    }

    #[test]
    fn test_invalid_port_rejected() {
        let mut config = RagConfig::default();
        let err = apply(&mut config, &[("COMPLIANCE_RAG_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_openai_requires_key() {
        let config = RagConfig::default();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_from_toml_partial() {
        let config = RagConfig::from_toml_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8123
            enable_cors = false

            [llm]
            backend = "ollama"
            base_url = "http://gpu-box:11434"
            embed_model = "nomic-embed-text"
            generate_model = "llama3.2:3b"
            temperature = 0.2
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8123);
        assert!(!config.server.enable_cors);
        assert_eq!(config.llm.backend, LlmBackend::Ollama);
        assert_eq!(config.llm.max_retries, 0);
        // Untouched sections fall back to defaults.
        assert_eq!(config.retrieval.top_k, 2);
        assert!(config.corpus.sort_filenames);
    }

    #[test]
    fn test_partial_sections_use_field_defaults() {
        let config = RagConfig::from_toml_str("[server]\nport = 9000").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.server.enable_cors);

        let config = RagConfig::from_toml_str("[embeddings]\nbatch_size = 32").unwrap();
        assert_eq!(config.embeddings.batch_size, 32);
        assert_eq!(config.embeddings.parallel_batches, 4);
    }

    #[test]
    fn test_toml_backend_only_uses_backend_defaults() {
        let config = RagConfig::from_toml_str("[llm]\nbackend = \"ollama\"").unwrap();
        assert_eq!(config.llm.backend, LlmBackend::Ollama);
        assert_eq!(config.llm.base_url, "http://localhost:11434");
        assert_eq!(config.llm.embed_model, "nomic-embed-text");
        assert_eq!(config.llm.generate_model, "llama3.2:3b");
        assert!((config.llm.temperature - 0.1).abs() < f32::EPSILON);
    }
}
