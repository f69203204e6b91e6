//! Accumulated builder inputs

use std::sync::Arc;

use crate::domain::{
    AlgorithmKind, FilterPredicate, GraphConnection, OrderBy, Projection, ProjectionCollection,
    StreamShape, DEFAULT_DAMPING_FACTOR, DEFAULT_MAX_ITERATIONS,
};

/// Everything a builder snapshot has been told so far
///
/// The connection and the projection collection are shared handles owned by
/// the caller; every other field is owned by value, so cloning a state gives
/// a fully independent copy of everything the builder may change.
#[derive(Debug, Clone)]
pub struct BuilderState {
    pub connection: Option<Arc<dyn GraphConnection>>,
    pub collection: Option<Arc<ProjectionCollection>>,
    pub projection: Option<Projection>,
    pub algorithm: Option<AlgorithmKind>,
    pub write_property: Option<String>,
    pub max_iterations: u32,
    pub damping_factor: f64,
    pub filters: Vec<FilterPredicate>,
    pub returned_properties: Option<Vec<String>>,
    pub order_by: Option<OrderBy>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl Default for BuilderState {
    fn default() -> Self {
        Self {
            connection: None,
            collection: None,
            projection: None,
            algorithm: None,
            write_property: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            damping_factor: DEFAULT_DAMPING_FACTOR,
            filters: Vec::new(),
            returned_properties: None,
            order_by: None,
            skip: None,
            limit: None,
        }
    }
}

impl BuilderState {
    pub fn is_write(&self) -> bool {
        self.write_property.is_some()
    }

    pub fn stream_shape(&self) -> StreamShape {
        StreamShape {
            properties: self.returned_properties.clone(),
            order_by: self.order_by.clone(),
            skip: self.skip,
            limit: self.limit,
        }
    }
}

fn same_handle<T: ?Sized>(a: &Option<Arc<T>>, b: &Option<Arc<T>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        _ => false,
    }
}

// Shared handles compare by identity, everything else by value.
impl PartialEq for BuilderState {
    fn eq(&self, other: &Self) -> bool {
        same_handle(&self.connection, &other.connection)
            && same_handle(&self.collection, &other.collection)
            && self.projection == other.projection
            && self.algorithm == other.algorithm
            && self.write_property == other.write_property
            && self.max_iterations == other.max_iterations
            && self.damping_factor == other.damping_factor
            && self.filters == other.filters
            && self.returned_properties == other.returned_properties
            && self.order_by == other.order_by
            && self.skip == other.skip
            && self.limit == other.limit
    }
}
