//! Configuration and orchestration of credential refresh runs.
pub mod config;
pub mod runtime;
