// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Stream configuration.
//!
//! `StreamConfig::default()` snapshots the process-wide registry; explicit
//! configurations can be built in code or (feature `config-loaders`) loaded
//! from YAML:
//!
//! ```yaml
//! block_size: 1024
//! include_builtins: true
//! substitutable_types:
//!   - demo.Money
//!   - demo.Currency
//! ```

use std::fmt;

use crate::protocol::constants::DEFAULT_BLOCK_SIZE;
use crate::registry::{self, SubstitutableTypes};

/// Settings applied when a stream is constructed.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Types eligible for substitution
    pub substitutable: SubstitutableTypes,
    /// Primitive bytes staged before a block is emitted
    pub block_size: usize,
}

impl StreamConfig {
    pub fn new(substitutable: SubstitutableTypes) -> Self {
        Self {
            substitutable,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_substitutable(mut self, substitutable: SubstitutableTypes) -> Self {
        self.substitutable = substitutable;
        self
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self::new(registry::snapshot())
    }
}

/// Failure to load a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Could not read the configuration file.
    Io(std::io::Error),
    /// Malformed document.
    Parse(String),
    /// Well-formed document with an unusable value.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read config: {}", err),
            ConfigError::Parse(msg) => write!(f, "failed to parse config: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(feature = "config-loaders")]
mod yaml {
    use std::fs;
    use std::path::Path;

    use serde::Deserialize;

    use super::{ConfigError, StreamConfig};
    use crate::protocol::constants::{DEFAULT_BLOCK_SIZE, MAX_BLOCK_SIZE};
    use crate::registry::SubstitutableTypes;

    /// Root YAML document structure.
    #[derive(Debug, Deserialize)]
    #[serde(default, deny_unknown_fields)]
    pub struct YamlStreamConfig {
        pub block_size: usize,
        /// Seed the set with the boxed scalars and `String`.
        pub include_builtins: bool,
        /// Additional record class names.
        pub substitutable_types: Vec<String>,
    }

    impl Default for YamlStreamConfig {
        fn default() -> Self {
            Self {
                block_size: DEFAULT_BLOCK_SIZE,
                include_builtins: true,
                substitutable_types: Vec::new(),
            }
        }
    }

    impl StreamConfig {
        pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
            let doc: YamlStreamConfig =
                serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
            if doc.block_size == 0 {
                return Err(ConfigError::Invalid("block_size must be positive".into()));
            }
            if doc.block_size > MAX_BLOCK_SIZE {
                return Err(ConfigError::Invalid(format!(
                    "block_size {} exceeds {}",
                    doc.block_size, MAX_BLOCK_SIZE
                )));
            }
            let mut substitutable = if doc.include_builtins {
                SubstitutableTypes::builtin()
            } else {
                SubstitutableTypes::empty()
            };
            for name in doc.substitutable_types {
                if name.trim().is_empty() {
                    return Err(ConfigError::Invalid("empty type name".into()));
                }
                substitutable.register(name);
            }
            Ok(StreamConfig::new(substitutable).with_block_size(doc.block_size))
        }

        pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
            let yaml = fs::read_to_string(path).map_err(ConfigError::Io)?;
            Self::from_yaml_str(&yaml)
        }
    }
}

#[cfg(feature = "config-loaders")]
pub use yaml::YamlStreamConfig;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::TypeDescriptor;

    #[test]
    fn test_default_uses_builtins() {
        let config = StreamConfig::default();
        assert_eq!(config.block_size, DEFAULT_BLOCK_SIZE);
        assert!(config.substitutable.contains_type(&TypeDescriptor::STRING));
    }

    #[test]
    fn test_builder_setters() {
        let config = StreamConfig::new(SubstitutableTypes::empty()).with_block_size(64);
        assert_eq!(config.block_size, 64);
        assert!(config.substitutable.is_empty());
    }

    #[cfg(feature = "config-loaders")]
    #[test]
    fn test_yaml_adds_types_to_builtins() {
        let config = StreamConfig::from_yaml_str(
            "block_size: 256\nsubstitutable_types:\n  - demo.Money\n",
        )
        .expect("valid yaml");
        assert_eq!(config.block_size, 256);
        assert!(config
            .substitutable
            .contains_type(&TypeDescriptor::named("demo.Money")));
        assert!(config.substitutable.contains_type(&TypeDescriptor::INTEGER));
    }

    #[cfg(feature = "config-loaders")]
    #[test]
    fn test_yaml_without_builtins() {
        let config = StreamConfig::from_yaml_str("include_builtins: false\n").expect("valid yaml");
        assert!(config.substitutable.is_empty());
        assert_eq!(config.block_size, DEFAULT_BLOCK_SIZE);
    }

    #[cfg(feature = "config-loaders")]
    #[test]
    fn test_yaml_rejects_bad_values() {
        assert!(matches!(
            StreamConfig::from_yaml_str("block_size: 0\n"),
            Err(ConfigError::Invalid(_))
        ));
        let too_large = format!(
            "block_size: {}\n",
            crate::protocol::constants::MAX_BLOCK_SIZE as u64 + 1
        );
        assert!(matches!(
            StreamConfig::from_yaml_str(&too_large),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            StreamConfig::from_yaml_str("block_sise: 10\n"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            StreamConfig::from_yaml_str("substitutable_types: ['  ']\n"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[cfg(feature = "config-loaders")]
    #[test]
    fn test_yaml_file_loading() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "substitutable_types: [demo.Currency]").expect("write yaml");
        let config = StreamConfig::from_yaml_file(file.path()).expect("load yaml");
        assert!(config
            .substitutable
            .contains_type(&TypeDescriptor::named("demo.Currency")));

        assert!(matches!(
            StreamConfig::from_yaml_file("/nonexistent/soos.yaml"),
            Err(ConfigError::Io(_))
        ));
    }
}
