//! Neo4j connection management.

use async_trait::async_trait;
use neo4rs::{query, ConfigBuilder, Graph};
use serde_json::Value;

use crate::config::GraphConfig;
use crate::error::QaError;

/// Query-execution seam between the orchestrator and the live database.
///
/// Mirrors the `Completion` trait on the LLM side: the pipeline depends on
/// this rather than on the Bolt client so its failure routing can be tested
/// with a scripted backend.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn run_query(&self, cypher: &str) -> Result<Vec<Value>, QaError>;
}

/// Neo4j client with connection pooling.
///
/// One instance is shared across all questions in a run. Clone is cheap
/// (inner Arc).
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Connect to Neo4j with the given configuration.
    pub async fn connect(config: &GraphConfig) -> Result<Self, QaError> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .max_connections(config.max_connections)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| QaError::Connection(e.to_string()))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| QaError::Connection(e.to_string()))?;

        tracing::info!(uri = %config.uri, "Connected to Neo4j");
        Ok(Self { graph })
    }

    /// Execute an arbitrary Cypher string and collect every row as a JSON
    /// object keyed by return column.
    ///
    /// The string comes from a language model, so it may be malformed; a
    /// syntax error surfaces here as `QueryExecution`.
    pub async fn run_query(&self, cypher: &str) -> Result<Vec<Value>, QaError> {
        tracing::debug!(%cypher, "executing Cypher");
        let mut stream = self.graph.execute(query(cypher)).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            let value: Value = row
                .to()
                .map_err(|e| QaError::ResultDecode(e.to_string()))?;
            rows.push(value);
        }
        Ok(rows)
    }

    /// Execute a write statement, discarding any results.
    pub async fn run(&self, cypher: &str) -> Result<(), QaError> {
        self.graph.run(query(cypher)).await?;
        Ok(())
    }
}

#[async_trait]
impl QueryExecutor for GraphClient {
    async fn run_query(&self, cypher: &str) -> Result<Vec<Value>, QaError> {
        GraphClient::run_query(self, cypher).await
    }
}
