//! Shared fixtures for integration tests

#![allow(dead_code)]

use graphrank_dsl::{
    GraphConnection, MemoryConnection, Projection, ProjectionIdentity, Row, Selection,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Layer collecting the `cypher` field of every statement event
#[derive(Clone, Default)]
pub struct StatementEvents {
    statements: Arc<Mutex<Vec<String>>>,
}

impl StatementEvents {
    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().clone()
    }

    /// Run `f` with only this layer installed on the current thread
    pub fn capture<T>(&self, f: impl FnOnce() -> T) -> T {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::with_default(subscriber, f)
    }
}

#[derive(Default)]
struct CypherField(Option<String>);

impl Visit for CypherField {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "cypher" {
            self.0 = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "cypher" {
            self.0 = Some(format!("{:?}", value));
        }
    }
}

impl<S: Subscriber> Layer<S> for StatementEvents {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut field = CypherField::default();
        event.record(&mut field);
        if let Some(cypher) = field.0 {
            self.statements.lock().push(cypher);
        }
    }
}

pub fn connection() -> Arc<MemoryConnection> {
    Arc::new(MemoryConnection::new())
}

pub fn as_dyn(connection: &Arc<MemoryConnection>) -> Arc<dyn GraphConnection> {
    connection.clone()
}

/// Projection over the Page/LINKS sample graph
pub fn pages_and_links() -> Projection {
    Projection::native(ProjectionIdentity::new(
        Selection::of(["Page"]),
        Selection::of(["LINKS"]),
    ))
}

pub fn row(value: Value) -> Row {
    value.as_object().cloned().unwrap_or_default()
}

/// Stream rows for the eight-page sample site, highest score first
pub fn ranked_pages() -> Vec<Row> {
    [
        ("Home", 3.23),
        ("About", 1.05),
        ("Links", 1.05),
        ("Product", 1.05),
        ("Site A", 0.32),
        ("Site B", 0.32),
        ("Site C", 0.32),
        ("Site D", 0.32),
    ]
    .into_iter()
    .map(|(name, score)| row(json!({"name": name, "score": score})))
    .collect()
}

pub fn write_summary() -> Vec<Row> {
    vec![row(json!({
        "nodePropertiesWritten": 8,
        "ranIterations": 20,
        "didConverge": false
    }))]
}
