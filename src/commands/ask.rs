use anyhow::Result;

use crate::commands::print_outcome;
use crate::config::AppConfig;
use crate::qa::{QaChain, QaOptions};

/// Run the pipeline for a single question.
pub async fn run(question: &str, repair: bool, allow_writes: bool) -> Result<()> {
    let config = AppConfig::from_env()?;
    let options = QaOptions {
        repair,
        allow_writes,
        top_k: config.top_k,
    };

    let chain = QaChain::connect(&config, options).await?;
    let outcome = chain.ask(question).await?;

    println!("\n\nQuestion: {question}");
    print_outcome(&outcome);
    Ok(())
}
