//! Application layer - the fluent DSL
//!
//! ```text
//! Query::* / QueryBuilder (copy-on-write snapshots)
//!           ↓ first terminal call
//! ConfigurationResolver → QueryResolver (memoized per snapshot)
//!           ↓ run() only
//! ProjectionLifecycle::ensure → PreparedQuery::run
//! ```

pub mod builder;
pub mod query;
pub mod resolver;
pub mod state;

pub use builder::QueryBuilder;
pub use query::Query;
pub use resolver::{ConfigurationResolver, QueryResolver};
pub use state::BuilderState;
