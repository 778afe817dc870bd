// vitals-core/src/ports/mod.rs

pub mod artifact;
pub mod connector;
pub mod observer;

pub use artifact::ArtifactSink;
pub use connector::{ColumnSchema, Connector};
pub use observer::{NoopObserver, PipelineObserver, TracingObserver};
