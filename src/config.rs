//! TOML configuration for the registry, command log and logging.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

use crate::registry::{is_valid_key, DuplicatePolicy};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for field '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BehaviorKitConfig {
    pub log_level: String,
    pub registry: RegistryConfig,
    pub command_log: CommandLogConfig,
}

impl Default for BehaviorKitConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            registry: RegistryConfig::default(),
            command_log: CommandLogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    pub duplicate_policy: DuplicatePolicy,
    pub default_behavior: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommandLogConfig {
    pub history_limit: Option<usize>,
}

impl BehaviorKitConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.level_filter()?;

        if self.command_log.history_limit == Some(0) {
            return Err(ConfigError::invalid(
                "command_log.history_limit",
                "must be at least 1",
            ));
        }

        if let Some(key) = &self.registry.default_behavior {
            if !is_valid_key(key) {
                return Err(ConfigError::invalid(
                    "registry.default_behavior",
                    format!("'{key}' must be non-empty and contain no whitespace"),
                ));
            }
        }
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level).map_err(|_| {
            ConfigError::invalid(
                "log_level",
                format!(
                    "'{}' is not one of off, error, warn, info, debug, trace",
                    self.log_level
                ),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = BehaviorKitConfig::from_toml_str("").unwrap();
        assert_eq!(config, BehaviorKitConfig::default());
        assert_eq!(config.registry.duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Info);
    }

    #[test]
    fn test_full_document() {
        let config = BehaviorKitConfig::from_toml_str(
            r#"
log_level = "debug"

[registry]
duplicate_policy = "overwrite"
default_behavior = "sms"

[command_log]
history_limit = 10
"#,
        )
        .unwrap();
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);
        assert_eq!(config.registry.duplicate_policy, DuplicatePolicy::Overwrite);
        assert_eq!(config.registry.default_behavior.as_deref(), Some("sms"));
        assert_eq!(config.command_log.history_limit, Some(10));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = BehaviorKitConfig::from_toml_str("[command_log]\nretries = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_bad_log_level() {
        let err = BehaviorKitConfig::from_toml_str("log_level = \"loud\"").unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn test_zero_history_limit() {
        let err = BehaviorKitConfig::from_toml_str("[command_log]\nhistory_limit = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "command_log.history_limit"));
    }

    #[test]
    fn test_default_behavior_follows_registry_key_rule() {
        for bad in ["", "   ", "e mail", "sms\t"] {
            let document = format!("[registry]\ndefault_behavior = {bad:?}\n");
            let err = BehaviorKitConfig::from_toml_str(&document).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { ref field, .. } if field == "registry.default_behavior"),
                "{bad:?} should be rejected, got {err:?}"
            );
        }
        assert!(BehaviorKitConfig::from_toml_str("[registry]\ndefault_behavior = \"push\"\n").is_ok());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[registry]\ndefault_behavior = \"email\"").unwrap();
        let config = BehaviorKitConfig::from_file(file.path()).unwrap();
        assert_eq!(config.registry.default_behavior.as_deref(), Some("email"));
    }

    #[test]
    fn test_missing_file() {
        let err = BehaviorKitConfig::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
