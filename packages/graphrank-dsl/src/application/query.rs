//! `Query` - entry points of the DSL
//!
//! Each entry point starts a fresh `QueryBuilder` with one call already
//! applied, so a chain can begin with whichever call reads best.

use std::sync::Arc;

use crate::config::Settings;
use crate::domain::{
    AlgorithmKind, FilterPredicate, GraphConnection, ProjectionCollection, ProjectionSelector,
};
use crate::error::Result;

use super::builder::QueryBuilder;

pub struct Query;

impl Query {
    /// Start with a connection and an optional tag-addressed collection
    pub fn using(
        connection: Arc<dyn GraphConnection>,
        collection: Option<Arc<ProjectionCollection>>,
    ) -> QueryBuilder {
        QueryBuilder::new().using(connection, collection)
    }

    /// Start with the ranking algorithm
    pub fn rank(algorithm: AlgorithmKind) -> QueryBuilder {
        QueryBuilder::new().rank(algorithm)
    }

    /// Start with the projection. Tags fail here: no collection can have been
    /// supplied yet.
    pub fn projected_by(selector: ProjectionSelector) -> Result<QueryBuilder> {
        QueryBuilder::new().projected_by(selector)
    }

    /// Start with algorithm tuning
    pub fn set(max_iterations: u32, damping_factor: f64) -> Result<QueryBuilder> {
        QueryBuilder::new().set(max_iterations, damping_factor)
    }

    /// Start in write mode
    pub fn write(property_name: impl Into<String>) -> QueryBuilder {
        QueryBuilder::new().write(property_name)
    }

    /// Start with the returned node properties
    pub fn select<I, S>(properties: I) -> QueryBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        QueryBuilder::new().select(properties)
    }

    /// Start with a seed-node filter
    pub fn filter(predicate: FilterPredicate) -> QueryBuilder {
        QueryBuilder::new().filter(predicate)
    }

    /// Start from settings-file defaults
    pub fn with_settings(settings: &Settings) -> QueryBuilder {
        QueryBuilder::with_settings(settings)
    }
}
