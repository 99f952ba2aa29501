pub mod client;
pub mod schema;

pub use client::{GraphClient, QueryExecutor};
pub use schema::GraphSchema;
