//! Ranking configuration values
//!
//! - `RankParameters`: iteration/damping tuning plus the optional write property
//! - `FilterPredicate`: a `(variable, label, properties)` node match
//! - `RankConfiguration`: plain or filtered, resolved once per builder snapshot
//! - `StreamShape`: which rows a stream query returns and in what order

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{QueryError, Result};

pub const DEFAULT_MAX_ITERATIONS: u32 = 20;
pub const DEFAULT_DAMPING_FACTOR: f64 = 0.80;

/// Numeric tuning of a ranking run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankParameters {
    pub max_iterations: u32,
    pub damping_factor: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_property: Option<String>,
}

impl Default for RankParameters {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            damping_factor: DEFAULT_DAMPING_FACTOR,
            write_property: None,
        }
    }
}

impl RankParameters {
    /// # Errors
    ///
    /// Configuration error when `max_iterations` is zero or `damping_factor`
    /// lies outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        validate_tuning(self.max_iterations, self.damping_factor)
    }
}

pub(crate) fn validate_tuning(max_iterations: u32, damping_factor: f64) -> Result<()> {
    if max_iterations == 0 {
        return Err(QueryError::configuration("max_iterations must be at least 1"));
    }
    if !(0.0..=1.0).contains(&damping_factor) {
        return Err(QueryError::configuration(format!(
            "damping_factor {} not in 0..=1",
            damping_factor
        )));
    }
    Ok(())
}

/// Node match narrowing which nodes seed a ranking run
///
/// # Examples
///
/// ```rust
/// use graphrank_dsl::domain::FilterPredicate;
///
/// let home = FilterPredicate::new("home", "Page").with_property("name", "Home");
/// assert_eq!(home.variable, "home");
/// assert_eq!(home.properties["name"], "Home");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPredicate {
    pub variable: String,
    pub label: String,
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
}

impl FilterPredicate {
    pub fn new(variable: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            label: label.into(),
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// Resolved ranking configuration
#[derive(Debug, Clone, PartialEq)]
pub enum RankConfiguration {
    Plain(RankParameters),
    /// Invariant: `filters` is non-empty
    Filtered {
        parameters: RankParameters,
        filters: Vec<FilterPredicate>,
    },
}

impl Default for RankConfiguration {
    fn default() -> Self {
        RankConfiguration::Plain(RankParameters::default())
    }
}

impl RankConfiguration {
    /// Plain configuration with default tuning
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain configuration with default tuning writing to `property`
    pub fn writing(property: impl Into<String>) -> Self {
        RankConfiguration::Plain(RankParameters {
            write_property: Some(property.into()),
            ..RankParameters::default()
        })
    }

    /// Picks the filtered variant iff `filters` is non-empty
    pub fn from_parts(parameters: RankParameters, filters: Vec<FilterPredicate>) -> Self {
        if filters.is_empty() {
            RankConfiguration::Plain(parameters)
        } else {
            RankConfiguration::Filtered {
                parameters,
                filters,
            }
        }
    }

    pub fn parameters(&self) -> &RankParameters {
        match self {
            RankConfiguration::Plain(parameters) => parameters,
            RankConfiguration::Filtered { parameters, .. } => parameters,
        }
    }

    pub fn filters(&self) -> &[FilterPredicate] {
        match self {
            RankConfiguration::Plain(_) => &[],
            RankConfiguration::Filtered { filters, .. } => filters,
        }
    }

    pub fn is_filtered(&self) -> bool {
        matches!(self, RankConfiguration::Filtered { .. })
    }

    pub fn write_property(&self) -> Option<&str> {
        self.parameters().write_property.as_deref()
    }
}

/// Sort key of a stream query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub property: String,
    pub descending: bool,
}

/// Returned columns and paging of a stream query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamShape {
    /// Node properties returned instead of the whole node
    pub properties: Option<Vec<String>>,
    pub order_by: Option<OrderBy>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl StreamShape {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
