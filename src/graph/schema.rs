//! Schema discovery for grounding Cypher generation.
//!
//! The schema is fetched once at startup and rendered into every generation
//! prompt. Staleness is not detected; restart after changing the graph.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Deserialize;

use crate::error::QaError;
use crate::graph::client::GraphClient;

/// Node labels, relationship types, their typed properties, and the
/// connectivity patterns observed in the graph.
#[derive(Debug, Clone, Default)]
pub struct GraphSchema {
    /// label -> property name -> property type
    pub node_properties: BTreeMap<String, BTreeMap<String, String>>,
    /// relationship type -> property name -> property type
    pub relationship_properties: BTreeMap<String, BTreeMap<String, String>>,
    /// (source label, relationship type, target label)
    pub patterns: BTreeSet<(String, String, String)>,
}

impl GraphSchema {
    pub fn is_empty(&self) -> bool {
        self.node_properties.is_empty()
            && self.relationship_properties.is_empty()
            && self.patterns.is_empty()
    }
}

impl fmt::Display for GraphSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Node properties:")?;
        for (label, props) in &self.node_properties {
            writeln!(f, "{label} {{{}}}", format_props(props))?;
        }
        writeln!(f, "Relationship properties:")?;
        for (rel_type, props) in &self.relationship_properties {
            writeln!(f, "{rel_type} {{{}}}", format_props(props))?;
        }
        writeln!(f, "The relationships:")?;
        for (src, rel, dst) in &self.patterns {
            writeln!(f, "(:{src})-[:{rel}]->(:{dst})")?;
        }
        Ok(())
    }
}

fn format_props(props: &BTreeMap<String, String>) -> String {
    props
        .iter()
        .map(|(name, ty)| format!("{name}: {ty}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Deserialize)]
struct NodePropRow {
    #[serde(rename = "nodeLabels")]
    node_labels: Vec<String>,
    #[serde(rename = "propertyName")]
    property_name: Option<String>,
    #[serde(rename = "propertyTypes")]
    property_types: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RelPropRow {
    #[serde(rename = "relType")]
    rel_type: String,
    #[serde(rename = "propertyName")]
    property_name: Option<String>,
    #[serde(rename = "propertyTypes")]
    property_types: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct PatternRow {
    src: Vec<String>,
    rel: String,
    dst: Vec<String>,
}

const NODE_PROPS_QUERY: &str = "CALL db.schema.nodeTypeProperties() \
     YIELD nodeLabels, propertyName, propertyTypes \
     RETURN nodeLabels, propertyName, propertyTypes";

const REL_PROPS_QUERY: &str = "CALL db.schema.relTypeProperties() \
     YIELD relType, propertyName, propertyTypes \
     RETURN relType, propertyName, propertyTypes";

// Pattern discovery scans actual data rather than relying on APOC.
const PATTERNS_QUERY: &str = "MATCH (a)-[r]->(b) \
     WITH DISTINCT labels(a) AS src, type(r) AS rel, labels(b) AS dst \
     RETURN src, rel, dst LIMIT 500";

impl GraphClient {
    /// Discover the live schema of the connected database.
    ///
    /// Discovery failures are connection-class (fatal): without a schema no
    /// question can be answered.
    pub async fn fetch_schema(&self) -> Result<GraphSchema, QaError> {
        let mut schema = GraphSchema::default();

        for row in self.schema_rows(NODE_PROPS_QUERY).await? {
            let row: NodePropRow = decode(row)?;
            for label in row.node_labels {
                let props = schema.node_properties.entry(label).or_default();
                if let (Some(name), Some(types)) = (&row.property_name, &row.property_types) {
                    props.insert(name.clone(), types.join("|"));
                }
            }
        }

        for row in self.schema_rows(REL_PROPS_QUERY).await? {
            let row: RelPropRow = decode(row)?;
            let rel_type = strip_rel_type(&row.rel_type);
            let props = schema.relationship_properties.entry(rel_type).or_default();
            if let (Some(name), Some(types)) = (row.property_name, row.property_types) {
                props.insert(name, types.join("|"));
            }
        }

        for row in self.schema_rows(PATTERNS_QUERY).await? {
            let row: PatternRow = decode(row)?;
            for src in &row.src {
                for dst in &row.dst {
                    schema
                        .patterns
                        .insert((src.clone(), row.rel.clone(), dst.clone()));
                }
            }
        }

        if schema.is_empty() {
            tracing::warn!("graph schema is empty; is the database populated?");
        }
        Ok(schema)
    }

    async fn schema_rows(&self, cypher: &str) -> Result<Vec<serde_json::Value>, QaError> {
        self.run_query(cypher)
            .await
            .map_err(|e| QaError::Connection(format!("schema discovery failed: {e}")))
    }
}

fn decode<T: serde::de::DeserializeOwned>(row: serde_json::Value) -> Result<T, QaError> {
    serde_json::from_value(row)
        .map_err(|e| QaError::Connection(format!("schema discovery failed: {e}")))
}

/// `db.schema.relTypeProperties` wraps types as ``:`ACTED_IN` ``.
fn strip_rel_type(raw: &str) -> String {
    raw.trim_start_matches(':').trim_matches('`').to_string()
}
