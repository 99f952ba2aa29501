use anyhow::Result;
use indoc::indoc;

use crate::config::GraphConfig;
use crate::graph::GraphClient;

/// Sample graph backing the built-in batch questions. MERGE keeps the
/// command idempotent.
const SEED_CYPHER: &str = indoc! {r#"
    MERGE (p:Person {name: "Alice", age: 30})
    MERGE (c:Company {name: "Acme Corp"})
    MERGE (city:City {name: "Wonderland"})
    MERGE (p)-[:WORKS_AT {role: "Engineer"}]->(c)
    MERGE (c)-[:LOCATED_IN]->(city)
    MERGE (b:Person {name: "Bob", age: 25})
    MERGE (startup:Company {name: "StartupX"})
    MERGE (b)-[:WORKS_AT {role: "Designer"}]->(startup)
    MERGE (startup)-[:LOCATED_IN]->(city)
    MERGE (m:Movie {title: "The Matrix", released: 1999})
    MERGE (k:Person {name: "Keanu Reeves"})
    MERGE (k)-[:ACTED_IN {role: "Neo"}]->(m)
"#};

/// Load the sample graph into the configured database.
pub async fn run() -> Result<()> {
    let client = GraphClient::connect(&GraphConfig::from_env()).await?;
    client.run(SEED_CYPHER).await?;
    println!("Sample data loaded.");
    Ok(())
}
