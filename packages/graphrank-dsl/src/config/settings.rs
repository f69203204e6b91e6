//! Settings file (YAML schema v1)
//!
//! ```yaml
//! version: 1
//! defaults:
//!   max_iterations: 20
//!   damping_factor: 0.8
//! projections:
//!   - tag: pages
//!     labels: [Page]
//!     relationships: [LINKS]
//! ```
//!
//! Omitted `labels`/`relationships` select everything; omitted `name` derives
//! the graph name from the identity.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::domain::{
    Projection, ProjectionCollection, ProjectionIdentity, Selection, DEFAULT_DAMPING_FACTOR,
    DEFAULT_MAX_ITERATIONS,
};

use super::error::{SettingsError, SettingsResult};

const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Tuning defaults applied to new builders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RankDefaults {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    #[serde(default = "default_damping_factor")]
    pub damping_factor: f64,
}

fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}

fn default_damping_factor() -> f64 {
    DEFAULT_DAMPING_FACTOR
}

impl Default for RankDefaults {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            damping_factor: DEFAULT_DAMPING_FACTOR,
        }
    }
}

/// One tag-addressable projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectionDeclaration {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub relationships: Vec<String>,
}

impl ProjectionDeclaration {
    pub fn to_projection(&self) -> Projection {
        let identity = ProjectionIdentity::new(
            Selection::of(self.labels.iter().cloned()),
            Selection::of(self.relationships.iter().cloned()),
        );
        match &self.name {
            Some(name) => Projection::named(name.clone(), identity),
            None => Projection::native(identity),
        }
    }
}

/// On-disk form; `version` is optional here so its absence gets a clear error
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    version: Option<u32>,
    #[serde(default)]
    defaults: RankDefaults,
    #[serde(default)]
    projections: Vec<ProjectionDeclaration>,
}

/// Validated settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub version: u32,
    pub defaults: RankDefaults,
    pub projections: Vec<ProjectionDeclaration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: 1,
            defaults: RankDefaults::default(),
            projections: Vec::new(),
        }
    }
}

impl Settings {
    /// Load from a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> SettingsResult<Self> {
        let file: SettingsFile = serde_yaml::from_str(content)?;

        let version = file.version.ok_or(SettingsError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(SettingsError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let settings = Self {
            version,
            defaults: file.defaults,
            projections: file.projections,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_yaml(&self) -> SettingsResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> SettingsResult<()> {
        if self.defaults.max_iterations == 0 {
            return Err(SettingsError::range(
                "defaults.max_iterations",
                self.defaults.max_iterations,
                1,
                u32::MAX,
            ));
        }
        if !(0.0..=1.0).contains(&self.defaults.damping_factor) {
            return Err(SettingsError::range(
                "defaults.damping_factor",
                self.defaults.damping_factor,
                0.0,
                1.0,
            ));
        }

        let mut seen = BTreeSet::new();
        for declaration in &self.projections {
            if !seen.insert(declaration.tag.as_str()) {
                return Err(SettingsError::DuplicateTag(declaration.tag.clone()));
            }
        }
        Ok(())
    }

    /// Tag-addressable collection of the declared projections
    pub fn collection(&self) -> ProjectionCollection {
        self.projections
            .iter()
            .fold(ProjectionCollection::new(), |collection, declaration| {
                collection.with(declaration.tag.clone(), declaration.to_projection())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_yaml_loading() {
        let yaml_content = r#"
version: 1
defaults:
  max_iterations: 30
  damping_factor: 0.85
projections:
  - tag: pages
    labels: [Page]
    relationships: [LINKS]
  - tag: everything
    name: full_graph
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let settings = Settings::from_yaml(temp_file.path()).unwrap();
        assert_eq!(settings.defaults.max_iterations, 30);
        assert_eq!(settings.defaults.damping_factor, 0.85);

        let collection = settings.collection();
        assert_eq!(collection.len(), 2);

        let pages = collection.get_projection_by_tag("pages").unwrap();
        assert_eq!(pages.identity().labels, Selection::of(["Page"]));
        assert!(pages.name().starts_with("rank_"));

        let everything = collection.get_projection_by_tag("everything").unwrap();
        assert_eq!(everything.name(), "full_graph");
        assert!(everything.identity().labels.is_all());
        assert!(everything.identity().relationships.is_all());
    }

    #[test]
    fn test_defaults_when_sections_omitted() {
        let settings = Settings::from_yaml_str("version: 1\n").unwrap();
        assert_eq!(settings.defaults, RankDefaults::default());
        assert!(settings.collection().is_empty());
    }

    #[test]
    fn test_partial_defaults() {
        let settings =
            Settings::from_yaml_str("version: 1\ndefaults:\n  max_iterations: 5\n").unwrap();
        assert_eq!(settings.defaults.max_iterations, 5);
        assert_eq!(settings.defaults.damping_factor, DEFAULT_DAMPING_FACTOR);
    }

    #[test]
    fn test_missing_version() {
        let result = Settings::from_yaml_str("defaults:\n  max_iterations: 5\n");
        assert!(matches!(result, Err(SettingsError::MissingVersion)));
    }

    #[test]
    fn test_unsupported_version() {
        let result = Settings::from_yaml_str("version: 2\n");
        assert!(matches!(
            result,
            Err(SettingsError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn test_out_of_range_defaults() {
        let result = Settings::from_yaml_str("version: 1\ndefaults:\n  damping_factor: 1.5\n");
        assert!(matches!(result, Err(SettingsError::Range { .. })));

        let result = Settings::from_yaml_str("version: 1\ndefaults:\n  max_iterations: 0\n");
        assert!(matches!(result, Err(SettingsError::Range { .. })));
    }

    #[test]
    fn test_duplicate_tag() {
        let yaml = "version: 1\nprojections:\n  - tag: a\n  - tag: a\n";
        let result = Settings::from_yaml_str(yaml);
        assert!(matches!(result, Err(SettingsError::DuplicateTag(tag)) if tag == "a"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = Settings::from_yaml_str("version: 1\nretries: 3\n");
        assert!(matches!(result, Err(SettingsError::Yaml(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = Settings::from_yaml("/nonexistent/graphrank.yaml");
        assert!(matches!(result, Err(SettingsError::Io(_))));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let settings =
            Settings::from_yaml_str("version: 1\nprojections:\n  - tag: a\n    labels: [Page]\n")
                .unwrap();
        let yaml = settings.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert_eq!(Settings::from_yaml_str(&yaml).unwrap(), settings);
    }
}
