// Expose modules as public for use by other crates
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod graph;
pub mod llm;
pub mod prompt;
pub mod qa;

// Re-export core types for convenience
pub use config::{AppConfig, GraphConfig};
pub use error::QaError;
pub use graph::{GraphClient, GraphSchema};
pub use qa::{QaChain, QaOptions, QaOutcome};
