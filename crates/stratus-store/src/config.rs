use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stratus_types::Metadata;

use crate::error::ConfigError;

/// Settings used by [`AccountFactory`](crate::AccountFactory) to build an account.
///
/// ```toml
/// host = "http://localhost:8080/mock"
/// allow_reauthenticate = true
/// mock_millis_delay = 0
/// mock_on_file_object_store = "fixtures/store"
///
/// [metadata]
/// owner = "integration-tests"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    /// Public URL reported by the account.
    pub host: Option<String>,
    pub allow_reauthenticate: bool,
    /// Simulated latency per operation, in milliseconds.
    pub mock_millis_delay: u64,
    /// Directory tree to seed the account from.
    pub mock_on_file_object_store: Option<PathBuf>,
    /// Initial account metadata.
    pub metadata: Metadata,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            host: None,
            allow_reauthenticate: true,
            mock_millis_delay: 0,
            mock_on_file_object_store: None,
            metadata: Metadata::new(),
        }
    }
}

impl AccountConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml_str(&input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = AccountConfig::default();
        assert!(c.host.is_none());
        assert!(c.allow_reauthenticate);
        assert_eq!(c.mock_millis_delay, 0);
        assert!(c.mock_on_file_object_store.is_none());
        assert!(c.metadata.is_empty());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(
            AccountConfig::from_toml_str("").unwrap(),
            AccountConfig::default()
        );
    }

    #[test]
    fn full_toml() {
        let c = AccountConfig::from_toml_str(
            r#"
            host = "http://find.me"
            allow_reauthenticate = false
            mock_millis_delay = 5
            mock_on_file_object_store = "fixtures/store"

            [metadata]
            owner = "tests"
            "#,
        )
        .unwrap();
        assert_eq!(c.host.as_deref(), Some("http://find.me"));
        assert!(!c.allow_reauthenticate);
        assert_eq!(c.mock_millis_delay, 5);
        assert_eq!(
            c.mock_on_file_object_store,
            Some(PathBuf::from("fixtures/store"))
        );
        assert_eq!(c.metadata.get("owner"), Some("tests"));
    }

    #[test]
    fn metadata_scalars_become_text() {
        let c = AccountConfig::from_toml_str(
            r#"
            [metadata]
            year = 1969
            ratio = 0.5
            public = true
            "#,
        )
        .unwrap();
        assert_eq!(c.metadata.get("year"), Some("1969"));
        assert_eq!(c.metadata.get("ratio"), Some("0.5"));
        assert_eq!(c.metadata.get("public"), Some("true"));
    }

    #[test]
    fn bad_toml_is_parse_error() {
        let err = AccountConfig::from_toml_str("mock_millis_delay = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AccountConfig::load(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("account.toml");
        std::fs::write(&path, "host = \"http://localhost\"\n").unwrap();
        let c = AccountConfig::load(&path).unwrap();
        assert_eq!(c.host.as_deref(), Some("http://localhost"));
    }
}
