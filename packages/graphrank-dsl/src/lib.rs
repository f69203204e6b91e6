//! graphrank-dsl - immutable query builder for graph ranking algorithms
//!
//! Turns a chain of declarative calls into a PageRank or ArticleRank query
//! against a graph database's analytics extension, in stream mode (rows) or
//! write mode (persisted node property), over a named projection.
//!
//! ## Core Principles
//!
//! 1. **Copy-on-write**: every configuration call returns a new snapshot; the
//!    receiver is never modified
//! 2. **Order independence**: the same calls in any order render the same query
//! 3. **Lazy resolution**: configuration and query are resolved once per
//!    snapshot, on the first terminal call
//! 4. **Rendering is offline**: `cypher()` never touches the database;
//!    `run()` ensures the projection exists and then executes
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use graphrank_dsl::{AlgorithmKind, MemoryConnection, ProjectionSelector, Query};
//!
//! let connection = Arc::new(MemoryConnection::new());
//! let query = Query::using(connection.clone(), None)
//!     .rank(AlgorithmKind::PageRank)
//!     .projected_by(ProjectionSelector::native(["Page"], ["LINKS"]))?
//!     .write("score");
//!
//! assert!(query.cypher()?.starts_with("CALL gds.pageRank.write("));
//! # Ok::<(), graphrank_dsl::QueryError>(())
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{ErrorKind, QueryError, Result};

pub use application::{Query, QueryBuilder};
pub use domain::{
    AlgorithmKind, ExecutionMode, FilterPredicate, GraphConnection, Projection,
    ProjectionCollection, ProjectionIdentity, ProjectionSelector, QueryOutcome,
    RankConfiguration, Row, Selection, WriteSummary,
};
pub use infrastructure::{MemoryConnection, PreparedQuery, ProjectionLifecycle, RemoveProperty};
