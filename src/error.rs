use thiserror::Error;

/// Error taxonomy for the question-answering pipeline.
///
/// Connection-class errors are fatal and abort a batch run; everything else
/// is recoverable per question.
#[derive(Debug, Error)]
pub enum QaError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("Neo4j connection error: {0}")]
    Connection(String),

    #[error("language model invocation failed: {0}")]
    ModelInvocation(String),

    #[error("Cypher execution failed: {0}")]
    QueryExecution(#[from] neo4rs::Error),

    #[error("failed to decode query result: {0}")]
    ResultDecode(String),

    #[error("query rejected by read-only guard ({clause} clause): {query}")]
    QueryRejected { clause: String, query: String },
}

impl QaError {
    /// Fatal errors terminate the whole run; recoverable ones skip the
    /// current question.
    pub fn is_fatal(&self) -> bool {
        matches!(self, QaError::Config(_) | QaError::Connection(_))
    }
}
