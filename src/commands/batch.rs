use std::fs;

use anyhow::Result;

use crate::commands::print_outcome;
use crate::config::AppConfig;
use crate::qa::{QaChain, QaOptions};

/// Sample questions against the seeded graph. The last one deliberately
/// references a nonexistent movie.
const DEFAULT_QUESTIONS: &[&str] = &[
    "Quantas pessoas fizeram parte do filme Matrix?",
    "Com quantas pessoas Keanu Reeves atuou em seus filmes?",
    "Qual a idade de Demi?",
    "Em quais filmes Keanu Reeves já atuou?",
    "Qual a idade da Keanu Reeves?",
    "Existe algum filme chamado 'Innovate Ltd'?",
];

/// Run a batch of questions sequentially against one connection.
pub async fn run(file: Option<&str>, repair: bool, allow_writes: bool) -> Result<()> {
    let questions = match file {
        Some(path) => load_questions(path)?,
        None => DEFAULT_QUESTIONS.iter().map(|q| q.to_string()).collect(),
    };

    let config = AppConfig::from_env()?;
    let options = QaOptions {
        repair,
        allow_writes,
        top_k: config.top_k,
    };

    let chain = QaChain::connect(&config, options).await?;
    run_questions(&chain, &questions).await
}

/// Drive the pipeline over any question list.
///
/// Recoverable failures are logged and the loop moves on; fatal ones abort
/// the run.
pub async fn run_questions(chain: &QaChain, questions: &[String]) -> Result<()> {
    for question in questions {
        println!("\n\nQuestion: {question}");
        match chain.ask(question).await {
            Ok(outcome) => print_outcome(&outcome),
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => {
                tracing::error!(%question, error = %e, "question failed, continuing");
                eprintln!("Error processing question '{question}': {e}");
            }
        }
    }
    Ok(())
}

/// One question per line; blank lines and `#` comments are skipped.
fn load_questions(path: &str) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    let questions: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();
    anyhow::ensure!(!questions.is_empty(), "no questions found in {path}");
    Ok(questions)
}
