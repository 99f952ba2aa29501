mod client;

pub use client::{Completion, LlmClient};
