use clap::{Parser, Subcommand};

/// Graphqa: natural-language question answering over a Neo4j graph
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Ask natural-language questions against a Neo4j knowledge graph"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask a single natural-language question
    Ask {
        /// Natural-language question (e.g., "Which movies has Keanu Reeves acted in?")
        question: String,

        /// Skip the model round-trip that reviews and repairs the generated Cypher
        #[arg(long)]
        no_repair: bool,

        /// Allow queries containing write clauses (CREATE, MERGE, DELETE, ...)
        #[arg(long)]
        allow_writes: bool,
    },

    /// Run a batch of questions sequentially, continuing past per-question failures
    Batch {
        /// File with one question per line (defaults to the built-in sample questions)
        #[arg(long, short)]
        file: Option<String>,

        /// Skip the model round-trip that reviews and repairs the generated Cypher
        #[arg(long)]
        no_repair: bool,

        /// Allow queries containing write clauses (CREATE, MERGE, DELETE, ...)
        #[arg(long)]
        allow_writes: bool,
    },

    /// Print the discovered graph schema
    Schema,

    /// Load the sample movie/company graph used by the built-in questions
    Seed,
}
