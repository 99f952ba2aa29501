pub mod ask;
pub mod batch;
pub mod schema;
pub mod seed;

use crate::qa::QaOutcome;

/// Print the generated query, the retrieved context, and the answer for one
/// question. Results go to stdout; diagnostics stay on stderr.
pub(crate) fn print_outcome(outcome: &QaOutcome) {
    println!("\n> Generated Cypher:\n{}", outcome.query);
    println!(
        "\n> Graph context:\n{}",
        serde_json::to_string_pretty(&outcome.rows).unwrap_or_else(|_| "[]".to_string())
    );
    println!("\n> Answer:\n{}", outcome.answer);
}
