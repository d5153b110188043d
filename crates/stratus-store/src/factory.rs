use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::config::AccountConfig;
use crate::error::StoreResult;
use crate::loader::{OnFileLoader, SeedLoader};
use crate::mock::MockAccount;
use crate::traits::Account;

/// Builds accounts from an [`AccountConfig`].
///
/// Only the in-memory backend lives in this crate, so every account the
/// factory produces is a [`MockAccount`].
pub struct AccountFactory {
    config: AccountConfig,
    loader: Arc<dyn SeedLoader>,
}

impl AccountFactory {
    pub fn new(config: AccountConfig) -> Self {
        Self {
            config,
            loader: Arc::new(OnFileLoader),
        }
    }

    pub fn config(&self) -> &AccountConfig {
        &self.config
    }

    pub fn set_host(mut self, host: impl Into<String>) -> Self {
        self.config.host = Some(host.into());
        self
    }

    pub fn set_allow_reauthenticate(mut self, allow: bool) -> Self {
        self.config.allow_reauthenticate = allow;
        self
    }

    pub fn set_mock_millis_delay(mut self, millis: u64) -> Self {
        self.config.mock_millis_delay = millis;
        self
    }

    pub fn set_mock_on_file_object_store(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.mock_on_file_object_store = Some(root.into());
        self
    }

    /// Seed through `loader` instead of the filesystem.
    pub fn set_loader(mut self, loader: Arc<dyn SeedLoader>) -> Self {
        self.loader = loader;
        self
    }

    pub fn create_account(&self) -> StoreResult<MockAccount> {
        let account = MockAccount::with_loader(Arc::clone(&self.loader));
        account
            .set_public_url(self.config.host.clone().unwrap_or_default())
            .set_allow_reauthenticate(self.config.allow_reauthenticate);

        if !self.config.metadata.is_empty() {
            account.set_metadata(&self.config.metadata)?;
        }
        if let Some(root) = &self.config.mock_on_file_object_store {
            account.set_on_file_object_store(root)?;
        }
        // Applied last so seeding is not slowed down.
        account.set_millis_delay(self.config.mock_millis_delay);

        let containers = account.container_count()?;
        info!(public_url = %account.public_url(), containers, "mock account created");
        Ok(account)
    }
}

impl Default for AccountFactory {
    fn default() -> Self {
        Self::new(AccountConfig::default())
    }
}

impl std::fmt::Debug for AccountFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountFactory")
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::error::ErrorKind;
    use crate::traits::{Container, StoredObject};

    #[test]
    fn construct_mock() {
        let account = AccountFactory::default().create_account().unwrap();
        assert_eq!(account.public_url(), "");
        assert!(account.is_allow_reauthenticate());
    }

    #[test]
    fn public_url_from_host() {
        let account = AccountFactory::default()
            .set_host("http://find.me")
            .create_account()
            .unwrap();
        assert_eq!(account.public_url(), "http://find.me");
    }

    #[test]
    fn fluent_setters() {
        let factory = AccountFactory::default()
            .set_allow_reauthenticate(false)
            .set_host("http://h")
            .set_mock_millis_delay(0)
            .set_mock_on_file_object_store("somewhere");
        assert!(!factory.config().allow_reauthenticate);
        assert_eq!(
            factory.config().mock_on_file_object_store.as_deref(),
            Some(Path::new("somewhere"))
        );
    }

    #[test]
    fn initial_metadata_is_applied() {
        let mut config = AccountConfig::default();
        config.metadata.insert("year", 1969);
        let account = AccountFactory::new(config).create_account().unwrap();
        assert_eq!(account.metadata().unwrap().get("year"), Some("1969"));
    }

    #[test]
    fn seeds_from_file_store() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("bucket")).unwrap();
        std::fs::write(dir.path().join("bucket/a.txt"), b"abc").unwrap();

        let account = AccountFactory::default()
            .set_mock_on_file_object_store(dir.path())
            .create_account()
            .unwrap();
        let object = account.container("bucket").object("a.txt");
        assert_eq!(object.content_length().unwrap(), 3);
    }

    #[test]
    fn seed_failure_fails_creation() {
        let dir = tempfile::tempdir().unwrap();
        let err = AccountFactory::default()
            .set_mock_on_file_object_store(dir.path().join("absent"))
            .create_account()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GenericCommandFailure);
    }

    #[test]
    fn custom_loader_is_used() {
        struct OneContainer;
        impl SeedLoader for OneContainer {
            fn create_containers(&self, account: &MockAccount, _: &Path) -> anyhow::Result<()> {
                account.container("injected").create()?;
                Ok(())
            }
        }

        let account = AccountFactory::default()
            .set_loader(Arc::new(OneContainer))
            .set_mock_on_file_object_store("ignored")
            .create_account()
            .unwrap();
        assert!(account.container("injected").exists().unwrap());
    }
}
