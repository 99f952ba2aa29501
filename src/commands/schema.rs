use anyhow::Result;

use crate::config::GraphConfig;
use crate::graph::GraphClient;

/// Connect and print the discovered schema as the model sees it.
pub async fn run() -> Result<()> {
    let client = GraphClient::connect(&GraphConfig::from_env()).await?;
    let schema = client.fetch_schema().await?;
    println!("{schema}");
    Ok(())
}
