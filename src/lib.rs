//! Benchmark trace tooling: diff two trace logs, and summarize a tree of run
//! artifacts into one CSV report.

pub mod compare;
pub mod diagnostics;
pub mod error;
pub mod reconcile;
pub mod render;
pub mod summary;
pub mod table;

pub use error::BenchError;

pub type Result<T> = anyhow::Result<T>;
