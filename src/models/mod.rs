//! Data models and structures for the load probe

pub mod config;
pub mod run;

// Re-export main model types
pub use config::Config;
pub use run::{ProbeOutcome, RunResult};
