// vitals-core/src/infrastructure/mod.rs

pub mod adapters;
pub mod artifacts;
pub mod config;
pub mod error;

pub use adapters::DuckDBConnector;
pub use artifacts::ArtifactStore;
