// QueryBuilder - immutable fluent builder for ranking queries
//
// Every configuration call copies the current state, applies one field
// change to the copy and returns it as a new snapshot. Snapshots never share
// mutable state, so the order of calls does not matter and a builder can be
// branched freely:
//
//   let base = Query::using(conn, None).rank(AlgorithmKind::PageRank);
//   let stream = base.projected_by(ProjectionSelector::all())?;
//   let write = stream.write("score");   // `stream` is unchanged
//
// Resolution is lazy and memoized per snapshot: the first terminal call
// (`cypher`, `run`, `prepared_query`) resolves, later calls reuse the result.

use once_cell::sync::OnceCell;
use std::sync::Arc;

use crate::config::Settings;
use crate::domain::configuration::validate_tuning;
use crate::domain::{
    AlgorithmKind, FilterPredicate, GraphConnection, OrderBy, Projection, ProjectionCollection,
    ProjectionSelector, QueryOutcome, RankConfiguration,
};
use crate::error::{QueryError, Result};
use crate::infrastructure::{PreparedQuery, ProjectionLifecycle, RemoveProperty};

use super::resolver::{ConfigurationResolver, QueryResolver};
use super::state::BuilderState;

/// One immutable snapshot of a ranking query under construction
#[derive(Debug, Default)]
pub struct QueryBuilder {
    state: BuilderState,
    configuration: OnceCell<RankConfiguration>,
    prepared: OnceCell<PreparedQuery>,
}

impl Clone for QueryBuilder {
    /// A clone is the same snapshot; resolution caches are not carried over.
    fn clone(&self) -> Self {
        Self::from_state(self.state.clone())
    }
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder seeded with the tuning defaults of `settings`
    pub fn with_settings(settings: &Settings) -> Self {
        Self::from_state(BuilderState {
            max_iterations: settings.defaults.max_iterations,
            damping_factor: settings.defaults.damping_factor,
            ..BuilderState::default()
        })
    }

    pub fn from_state(state: BuilderState) -> Self {
        Self {
            state,
            configuration: OnceCell::new(),
            prepared: OnceCell::new(),
        }
    }

    pub fn state(&self) -> &BuilderState {
        &self.state
    }

    /// New snapshot: a copy of this state with `apply` run on it
    fn fork(&self, apply: impl FnOnce(&mut BuilderState)) -> Self {
        let mut state = self.state.clone();
        apply(&mut state);
        Self::from_state(state)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Configuration calls
    // ═══════════════════════════════════════════════════════════════════════

    /// Set the connection and, optionally, the collection `projected_by`
    /// looks tags up in. Both are replaced.
    pub fn using(
        &self,
        connection: Arc<dyn GraphConnection>,
        collection: Option<Arc<ProjectionCollection>>,
    ) -> Self {
        self.fork(|state| {
            state.connection = Some(connection);
            state.collection = collection;
        })
    }

    pub fn rank(&self, algorithm: AlgorithmKind) -> Self {
        self.fork(|state| state.algorithm = Some(algorithm))
    }

    /// Pick the projection the query runs against
    ///
    /// # Errors
    ///
    /// Configuration error for a tag when no (or an empty) collection was
    /// supplied through `using`, or when the tag is unknown. This snapshot is
    /// left untouched either way.
    pub fn projected_by(&self, selector: ProjectionSelector) -> Result<Self> {
        let projection = match selector {
            ProjectionSelector::Native(identity) => Projection::native(identity),
            ProjectionSelector::Tag(tag) => {
                let collection = self
                    .state
                    .collection
                    .as_ref()
                    .filter(|collection| !collection.is_empty())
                    .ok_or_else(|| {
                        QueryError::configuration(format!(
                            "projection tag '{}' needs a non-empty collection in using(); \
                             otherwise select labels and relationships",
                            tag
                        ))
                    })?;
                collection.get_projection_by_tag(&tag)?.clone()
            }
        };
        Ok(self.fork(|state| state.projection = Some(projection)))
    }

    /// Overwrite iteration count and damping factor
    ///
    /// # Errors
    ///
    /// Configuration error when `max_iterations` is zero or `damping_factor`
    /// is outside `[0, 1]`
    pub fn set(&self, max_iterations: u32, damping_factor: f64) -> Result<Self> {
        validate_tuning(max_iterations, damping_factor)?;
        Ok(self.fork(|state| {
            state.max_iterations = max_iterations;
            state.damping_factor = damping_factor;
        }))
    }

    /// Node properties a stream query returns instead of the whole node.
    /// Ignored in write mode.
    pub fn select<I, S>(&self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let properties: Vec<String> = properties.into_iter().map(Into::into).collect();
        self.fork(|state| state.returned_properties = Some(properties))
    }

    /// Switch to write mode, persisting scores on `property_name`
    pub fn write(&self, property_name: impl Into<String>) -> Self {
        let property_name = property_name.into();
        self.fork(|state| state.write_property = Some(property_name))
    }

    /// Add a seed-node filter; any filter makes the configuration filtered
    pub fn filter(&self, predicate: FilterPredicate) -> Self {
        self.fork(|state| state.filters.push(predicate))
    }

    /// Sort stream rows by `property` (typically `score`)
    pub fn order_by(&self, property: impl Into<String>, descending: bool) -> Self {
        let order = OrderBy {
            property: property.into(),
            descending,
        };
        self.fork(|state| state.order_by = Some(order))
    }

    pub fn skip(&self, rows: u64) -> Self {
        self.fork(|state| state.skip = Some(rows))
    }

    pub fn limit(&self, rows: u64) -> Self {
        self.fork(|state| state.limit = Some(rows))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Resolution
    // ═══════════════════════════════════════════════════════════════════════

    /// Resolved configuration of this snapshot (computed once)
    pub fn configuration(&self) -> &RankConfiguration {
        self.configuration
            .get_or_init(|| ConfigurationResolver::resolve(&self.state))
    }

    /// Resolved query of this snapshot (computed once)
    ///
    /// # Errors
    ///
    /// Resolution error when the algorithm or projection is unset, or write
    /// mode was requested with an empty property name
    pub fn prepared_query(&self) -> Result<&PreparedQuery> {
        self.prepared.get_or_try_init(|| {
            QueryResolver::resolve(&self.state, self.configuration().clone())
        })
    }

    /// Generated query text. Never touches the database and does not need a
    /// connection.
    pub fn cypher(&self) -> Result<&str> {
        self.prepared_query().map(PreparedQuery::cypher)
    }

    /// Lifecycle handle for this snapshot's projection, e.g. to drop it after a run
    pub fn projection_lifecycle(&self) -> Result<ProjectionLifecycle<'_>> {
        let connection = self.connection()?;
        let projection = self
            .state
            .projection
            .as_ref()
            .ok_or_else(|| QueryError::missing("projection", "call projected_by() first"))?;
        Ok(ProjectionLifecycle::new(connection, projection))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Execution
    // ═══════════════════════════════════════════════════════════════════════

    /// Resolve, make sure the projection exists, then execute
    ///
    /// Stream queries return their rows, write queries a summary. A failure
    /// after the projection was created leaves it in place.
    pub fn run(&self, log: bool) -> Result<QueryOutcome> {
        let connection = self.connection()?;
        let prepared = self.prepared_query()?;

        ProjectionLifecycle::new(connection, prepared.projection())
            .with_logging(log)
            .ensure()?;

        prepared.run(connection, log)
    }

    /// Remove the property a write-mode run of this snapshot persisted
    ///
    /// Returns the number of nodes that carried it. Runs on the database
    /// without resolving the ranking query, so it also cleans up after a
    /// run that failed part way.
    pub fn remove_written_property(&self, log: bool) -> Result<u64> {
        let connection = self.connection()?;
        let property = self
            .state
            .write_property
            .as_deref()
            .ok_or_else(|| QueryError::missing("write property", "call write() first"))?;
        RemoveProperty::new(property)?.run(connection, log)
    }

    fn connection(&self) -> Result<&dyn GraphConnection> {
        self.state
            .connection
            .as_deref()
            .ok_or_else(|| QueryError::missing("connection", "call using() before running"))
    }
}
