//! Explorer configuration.
//!
//! Every field has a default, so an empty file (or no file at all) gives the
//! stock behavior:
//!
//! ```yaml
//! default_page_size: 50
//! schema_mode: first_record   # or page_union
//! strict_object_types: false  # true rejects unknown object types
//! ```

use std::path::Path;

use crm_seeker::{SchemaMode, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Page size for requests that do not set one.
    pub default_page_size: usize,
    /// How response schemas are derived from a page.
    pub schema_mode: SchemaMode,
    /// Reject unknown object types instead of serving contacts.
    pub strict_object_types: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        ExplorerConfig {
            default_page_size: DEFAULT_PAGE_SIZE,
            schema_mode: SchemaMode::FirstRecord,
            strict_object_types: false,
        }
    }
}

impl ExplorerConfig {
    /// Parses a YAML document. Missing keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(ExplorerConfig::default());
        }
        let config: ExplorerConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a YAML config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_size == 0 {
            return Err(ConfigError::Invalid(
                "default_page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_default_page_size(mut self, page_size: usize) -> Self {
        self.default_page_size = page_size;
        self
    }

    pub fn with_schema_mode(mut self, mode: SchemaMode) -> Self {
        self.schema_mode = mode;
        self
    }

    pub fn with_strict_object_types(mut self, strict: bool) -> Self {
        self.strict_object_types = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = ExplorerConfig::default();
        assert_eq!(config.default_page_size, 50);
        assert_eq!(config.schema_mode, SchemaMode::FirstRecord);
        assert!(!config.strict_object_types);
        assert_eq!(ExplorerConfig::from_yaml_str("").unwrap(), config);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = ExplorerConfig::from_yaml_str("schema_mode: page_union\n").unwrap();
        assert_eq!(config.schema_mode, SchemaMode::PageUnion);
        assert_eq!(config.default_page_size, 50);
    }

    #[test]
    fn zero_page_size_is_invalid() {
        let err = ExplorerConfig::from_yaml_str("default_page_size: 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn bad_yaml_is_a_parse_error() {
        let err = ExplorerConfig::from_yaml_str("schema_mode: sideways").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_page_size: 25\nstrict_object_types: true").unwrap();

        let config = ExplorerConfig::from_path(file.path()).unwrap();
        assert_eq!(config.default_page_size, 25);
        assert!(config.strict_object_types);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ExplorerConfig::from_path("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
