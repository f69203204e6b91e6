//! Projection identities and tag-addressed projection collections
//!
//! A projection is a named, materialized subgraph view (selected labels and
//! relationship types) that the ranking procedures run against. Native
//! projections get a graph name derived from their identity, so two builders
//! asking for the same label/relationship sets share one database projection.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{QueryError, Result};

/// Wildcard accepted by the analytics extension for "every label" / "every type"
pub const WILDCARD: &str = "*";

/// Prefix of derived projection names
const NAME_PREFIX: &str = "rank_";

/// Label or relationship-type selection of a projection
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl Selection {
    pub fn all() -> Self {
        Selection::All
    }

    /// Explicit set of names. An empty set, or one containing `*`, selects everything.
    pub fn of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() || names.contains(WILDCARD) {
            Selection::All
        } else {
            Selection::Only(names)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn names(&self) -> Vec<&str> {
        match self {
            Selection::All => vec![WILDCARD],
            Selection::Only(names) => names.iter().map(String::as_str).collect(),
        }
    }

    /// Feed an unambiguous encoding into `hasher`: each name is
    /// length-prefixed, so no name can spill into its neighbour.
    fn digest_into(&self, hasher: &mut Sha256) {
        match self {
            Selection::All => hasher.update(b"*"),
            Selection::Only(names) => {
                hasher.update(b"=");
                hasher.update((names.len() as u64).to_le_bytes());
                for name in names {
                    hasher.update((name.len() as u64).to_le_bytes());
                    hasher.update(name.as_bytes());
                }
            }
        }
    }
}

/// Label set + relationship-type set identifying a native projection
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectionIdentity {
    pub labels: Selection,
    pub relationships: Selection,
}

impl ProjectionIdentity {
    pub fn new(labels: Selection, relationships: Selection) -> Self {
        Self {
            labels,
            relationships,
        }
    }

    /// Deterministic graph name for this identity
    ///
    /// # Examples
    ///
    /// ```rust
    /// use graphrank_dsl::domain::{ProjectionIdentity, Selection};
    ///
    /// let a = ProjectionIdentity::new(Selection::of(["Page", "Site"]), Selection::of(["LINKS"]));
    /// let b = ProjectionIdentity::new(Selection::of(["Site", "Page"]), Selection::of(["LINKS"]));
    /// assert_eq!(a.graph_name(), b.graph_name());
    /// assert!(a.graph_name().starts_with("rank_"));
    /// ```
    pub fn graph_name(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(b"labels");
        self.labels.digest_into(&mut hasher);
        hasher.update(b"relationships");
        self.relationships.digest_into(&mut hasher);
        let digest = hasher.finalize();

        let hex: String = digest.iter().take(8).map(|b| format!("{:02x}", b)).collect();
        format!("{}{}", NAME_PREFIX, hex)
    }
}

/// A projection the ranking queries can run against
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Projection {
    name: String,
    identity: ProjectionIdentity,
}

impl Projection {
    /// Ad-hoc projection named after its identity
    pub fn native(identity: ProjectionIdentity) -> Self {
        Self {
            name: identity.graph_name(),
            identity,
        }
    }

    /// Projection registered under an explicit graph name
    pub fn named(name: impl Into<String>, identity: ProjectionIdentity) -> Self {
        Self {
            name: name.into(),
            identity,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identity(&self) -> &ProjectionIdentity {
        &self.identity
    }
}

/// How `projected_by` picks its projection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionSelector {
    Native(ProjectionIdentity),
    Tag(String),
}

impl ProjectionSelector {
    /// Every label and every relationship type
    pub fn all() -> Self {
        ProjectionSelector::Native(ProjectionIdentity::default())
    }

    pub fn native<L, R, S, T>(labels: L, relationships: R) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
        R: IntoIterator<Item = T>,
        T: Into<String>,
    {
        ProjectionSelector::Native(ProjectionIdentity::new(
            Selection::of(labels),
            Selection::of(relationships),
        ))
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        ProjectionSelector::Tag(tag.into())
    }
}

/// Pre-declared projections addressable by tag
///
/// Supplied by the caller through `using`; builders only read from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectionCollection {
    projections: BTreeMap<String, Projection>,
}

impl ProjectionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a projection, returning the one previously held by `tag`
    pub fn insert(&mut self, tag: impl Into<String>, projection: Projection) -> Option<Projection> {
        self.projections.insert(tag.into(), projection)
    }

    pub fn with(mut self, tag: impl Into<String>, projection: Projection) -> Self {
        self.insert(tag, projection);
        self
    }

    /// # Errors
    ///
    /// Returns a configuration error if no projection is registered under `tag`
    pub fn get_projection_by_tag(&self, tag: &str) -> Result<&Projection> {
        self.projections.get(tag).ok_or_else(|| {
            QueryError::configuration(format!(
                "no projection tagged '{}' (known tags: {})",
                tag,
                self.tags().collect::<Vec<_>>().join(", ")
            ))
        })
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.projections.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.projections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projections.is_empty()
    }
}
