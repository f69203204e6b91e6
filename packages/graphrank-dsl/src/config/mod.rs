//! Settings loading
//!
//! A versioned YAML file carrying builder defaults and the tag-addressable
//! projections handed to `using`.
//!
//! # Examples
//!
//! ```rust,ignore
//! use graphrank_dsl::config::Settings;
//! use graphrank_dsl::{AlgorithmKind, ProjectionSelector, Query};
//!
//! let settings = Settings::from_yaml("graphrank.yaml")?;
//! let query = Query::with_settings(&settings)
//!     .using(connection, Some(Arc::new(settings.collection())))
//!     .rank(AlgorithmKind::PageRank)
//!     .projected_by(ProjectionSelector::tag("pages"))?;
//! ```

pub mod error;
pub mod settings;

pub use error::{SettingsError, SettingsResult};
pub use settings::{ProjectionDeclaration, RankDefaults, Settings};
