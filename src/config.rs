use std::env;

use crate::error::QaError;

const DEFAULT_MODEL: &str = "gpt-4.1-mini";
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_TOP_K: usize = 10;

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub max_connections: usize,
    pub fetch_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "password".to_string(),
            max_connections: 16,
            fetch_size: 256,
        }
    }
}

impl GraphConfig {
    /// Read the Neo4j connection settings from environment variables,
    /// falling back to defaults matching a local instance.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            uri: get("NEO4J_URI").unwrap_or(defaults.uri),
            user: get("NEO4J_USERNAME").unwrap_or(defaults.user),
            password: get("NEO4J_PASSWORD").unwrap_or(defaults.password),
            max_connections: defaults.max_connections,
            fetch_size: defaults.fetch_size,
        }
    }
}

/// Process-wide configuration, built once at startup and passed by reference
/// to the components that need it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Chat model used for both Cypher generation and answer synthesis.
    pub model: String,
    /// API key for the model provider.
    pub api_key: String,
    /// Base URL of an OpenAI-compatible chat-completions API.
    pub api_base: String,
    pub graph: GraphConfig,
    /// Maximum number of result rows passed to the model as context.
    pub top_k: usize,
}

impl AppConfig {
    /// Read configuration from environment variables.
    ///
    /// `OPENAI_API_KEY` is required; everything else falls back to defaults
    /// matching a local Neo4j instance.
    pub fn from_env() -> Result<Self, QaError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, QaError> {
        let api_key = get("OPENAI_API_KEY")
            .filter(|key| !key.is_empty())
            .ok_or_else(|| QaError::Config("OPENAI_API_KEY is not set".to_string()))?;

        let top_k = match get("GRAPHQA_TOP_K") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|k| *k > 0)
                .ok_or_else(|| {
                    QaError::Config(format!(
                        "GRAPHQA_TOP_K must be a positive integer, got '{raw}'"
                    ))
                })?,
            None => DEFAULT_TOP_K,
        };

        Ok(Self {
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key,
            api_base: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            graph: GraphConfig::from_lookup(&get),
            top_k,
        })
    }
}
