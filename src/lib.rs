//! NEO data proxy and schema-constrained AI interception planner.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fallback;
pub mod http;
pub mod input;
pub mod log;
pub mod neo;
pub mod pipeline;
pub mod plan;
pub mod prompt;
pub mod provider;
pub mod wire;
