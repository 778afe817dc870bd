// vitals-core/src/lib.rs

// 1. Mandatory documentation for production code
#![allow(missing_docs)]

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Ports (Interfaces / Traits)
// Contrats vers l'extérieur : Connector, ArtifactSink, PipelineObserver
pub mod ports;

// 2. Domain (Cœur du métier)
// Datasets, règles physiologiques, quality checks, cleaning.
// Fonctions pures, aucun I/O.
pub mod domain;

// 3. Infrastructure (Adapters)
// DuckDB, fichiers de configuration, artefacts JSON.
pub mod infrastructure;

// 4. Application (Use Cases)
// Orchestration Extract → Quality → Transform → Quality → Load.
pub mod application;

// --- GESTION DES ERREURS GLOBALE ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::{ErrorKind, VitalsError};
