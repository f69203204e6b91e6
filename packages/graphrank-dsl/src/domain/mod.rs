//! Domain layer: plain values and the connection port
//!
//! # Domain Models
//!
//! - `AlgorithmKind` / `ExecutionMode`: which procedure runs and how
//! - `Projection`, `ProjectionIdentity`, `ProjectionCollection`: the subgraph a query runs against
//! - `RankConfiguration`, `FilterPredicate`, `StreamShape`: resolved tuning and output shaping
//!
//! # Port Trait
//!
//! - `GraphConnection`: executes Cypher text, returns rows

pub mod algorithm;
pub mod configuration;
pub mod connection;
pub mod projection;

pub use algorithm::{AlgorithmKind, ExecutionMode};
pub use configuration::{
    FilterPredicate, OrderBy, RankConfiguration, RankParameters, StreamShape,
    DEFAULT_DAMPING_FACTOR, DEFAULT_MAX_ITERATIONS,
};
pub use connection::{GraphConnection, QueryOutcome, Row, WriteSummary};
pub use projection::{
    Projection, ProjectionCollection, ProjectionIdentity, ProjectionSelector, Selection, WILDCARD,
};
