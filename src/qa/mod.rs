//! The question-answering pipeline.
//!
//! Each step of the pipeline is a named function so it can be tested in
//! isolation against a mock completion backend: generate a Cypher query from
//! the question and the live schema, optionally repair it with a second model
//! round-trip, guard it, execute it, and phrase the results as an answer.

pub mod sanitize;

use serde_json::Value;

use crate::config::AppConfig;
use crate::error::QaError;
use crate::graph::{GraphClient, QueryExecutor};
use crate::llm::{Completion, LlmClient};
use crate::prompt;

/// Per-run pipeline options.
#[derive(Debug, Clone)]
pub struct QaOptions {
    /// Review and possibly rewrite the generated query with a second model
    /// round-trip before executing it.
    pub repair: bool,
    /// Permit queries containing write clauses.
    pub allow_writes: bool,
    /// Maximum number of result rows passed to the model as context.
    pub top_k: usize,
}

impl Default for QaOptions {
    fn default() -> Self {
        Self {
            repair: true,
            allow_writes: false,
            top_k: 10,
        }
    }
}

/// Everything produced for one question. Created fresh per question, never
/// cached.
#[derive(Debug)]
pub struct QaOutcome {
    pub question: String,
    pub query: String,
    pub rows: Vec<Value>,
    pub answer: String,
}

/// Translate the question into Cypher grounded in the schema.
pub async fn generate_query(
    llm: &dyn Completion,
    schema: &str,
    question: &str,
) -> Result<String, QaError> {
    let rendered =
        prompt::CYPHER_GENERATION.render(&[("schema", schema), ("question", question)]);
    let raw = llm.complete(&rendered).await?;
    let query = sanitize::strip_code_fences(&raw);
    if query.is_empty() {
        return Err(QaError::ModelInvocation(
            "model returned an empty Cypher query".to_string(),
        ));
    }
    Ok(query)
}

/// Ask the model to review the query against the schema and fix it if needed.
///
/// Falls back to the original query if the model returns nothing usable.
pub async fn repair_query(
    llm: &dyn Completion,
    schema: &str,
    query: &str,
) -> Result<String, QaError> {
    let rendered = prompt::CYPHER_REPAIR.render(&[("schema", schema), ("query", query)]);
    let raw = llm.complete(&rendered).await?;
    let repaired = sanitize::strip_code_fences(&raw);
    if repaired.is_empty() {
        tracing::warn!("repair round-trip returned nothing, keeping original query");
        return Ok(query.to_string());
    }
    if repaired != query {
        tracing::info!(original = %query, %repaired, "query rewritten by repair round-trip");
    }
    Ok(repaired)
}

/// Phrase the query results as a natural-language answer.
///
/// The template tells the model to state that nothing was found when the
/// context does not contain the answer; that instruction is advisory.
pub async fn synthesize_answer(
    llm: &dyn Completion,
    rows: &[Value],
    question: &str,
) -> Result<String, QaError> {
    let context = Value::Array(rows.to_vec()).to_string();
    let rendered =
        prompt::ANSWER_SYNTHESIS.render(&[("context", &context), ("question", question)]);
    let answer = llm.complete(&rendered).await?;
    let answer = answer.trim().to_string();
    if answer.is_empty() {
        return Err(QaError::ModelInvocation(
            "model returned an empty answer".to_string(),
        ));
    }
    Ok(answer)
}

/// The orchestrator: one Neo4j connection and one completion backend shared
/// across a run, with the schema fetched once at construction.
pub struct QaChain {
    graph: Box<dyn QueryExecutor>,
    llm: Box<dyn Completion>,
    schema: String,
    options: QaOptions,
}

impl QaChain {
    /// Connect to Neo4j, fetch the schema, and build the LLM client.
    ///
    /// Failures here are fatal; there is no pipeline without a connection
    /// and a schema.
    pub async fn connect(config: &AppConfig, options: QaOptions) -> Result<Self, QaError> {
        let graph = GraphClient::connect(&config.graph).await?;
        let schema = graph.fetch_schema().await?;
        let llm = LlmClient::new(config)?;
        Ok(Self::new(
            Box::new(graph),
            Box::new(llm),
            schema.to_string(),
            options,
        ))
    }

    pub fn new(
        graph: Box<dyn QueryExecutor>,
        llm: Box<dyn Completion>,
        schema: String,
        options: QaOptions,
    ) -> Self {
        Self {
            graph,
            llm,
            schema,
            options,
        }
    }

    /// The rendered schema text substituted into every generation prompt.
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Run the full pipeline for one question.
    pub async fn ask(&self, question: &str) -> Result<QaOutcome, QaError> {
        tracing::info!(%question, "processing question");

        let mut query = generate_query(self.llm.as_ref(), &self.schema, question).await?;
        if self.options.repair {
            query = repair_query(self.llm.as_ref(), &self.schema, &query).await?;
        }

        if !self.options.allow_writes {
            if let Some(clause) = sanitize::write_clause(&query) {
                return Err(QaError::QueryRejected { clause, query });
            }
        }

        let mut rows = self.graph.run_query(&query).await?;
        if rows.len() > self.options.top_k {
            tracing::debug!(
                total = rows.len(),
                top_k = self.options.top_k,
                "truncating context rows"
            );
            rows.truncate(self.options.top_k);
        }

        let answer = synthesize_answer(self.llm.as_ref(), &rows, question).await?;

        Ok(QaOutcome {
            question: question.to_string(),
            query,
            rows,
            answer,
        })
    }
}
