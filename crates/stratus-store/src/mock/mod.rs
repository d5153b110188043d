//! In-memory mock of a Swift account.
//!
//! [`MockAccount`] reproduces the observable semantics of the storage API:
//! existence rules, the non-empty container guard, name-ordered paginated
//! listings, metadata coercion, usage accounting, and object copy. Nothing
//! leaves the process and nothing is persisted.
//!
//! All state of one account lives in a single [`AccountState`] behind a
//! `RwLock`. Container and object handles hold an `Arc` to the account and
//! take that lock for every call, so each operation is atomic with respect
//! to every other operation on the same account. Separate accounts share
//! nothing.

mod container;
mod object;
mod state;

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use stratus_types::{Metadata, PaginationMap};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::loader::{OnFileLoader, SeedLoader};
use crate::traits::Account;

pub use container::MockContainer;
pub use object::MockObject;

use state::AccountState;

/// State shared by an account and every handle obtained from it.
pub(crate) struct Shared {
    state: RwLock<AccountState>,
    public_url: RwLock<String>,
    allow_reauthenticate: AtomicBool,
    delay_millis: AtomicU64,
    loader: Arc<dyn SeedLoader>,
}

impl Shared {
    /// Simulated round-trip latency, applied before each operation.
    fn pause(&self) {
        let millis = self.delay_millis.load(Ordering::Relaxed);
        if millis > 0 {
            std::thread::sleep(Duration::from_millis(millis));
        }
    }

    pub(crate) fn read(&self) -> StoreResult<RwLockReadGuard<'_, AccountState>> {
        self.pause();
        self.state
            .read()
            .map_err(|e| StoreError::command_failed(format!("lock poisoned: {e}")))
    }

    pub(crate) fn write(&self) -> StoreResult<RwLockWriteGuard<'_, AccountState>> {
        self.pause();
        self.state
            .write()
            .map_err(|e| StoreError::command_failed(format!("lock poisoned: {e}")))
    }
}

/// In-memory account: the entry point of the mock engine.
///
/// Cloning yields another handle to the same account.
#[derive(Clone)]
pub struct MockAccount {
    shared: Arc<Shared>,
}

impl MockAccount {
    /// Create an empty account that seeds from disk with [`OnFileLoader`].
    pub fn new() -> Self {
        Self::with_loader(Arc::new(OnFileLoader))
    }

    /// Create an empty account that seeds through `loader`.
    pub fn with_loader(loader: Arc<dyn SeedLoader>) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: RwLock::new(AccountState::default()),
                public_url: RwLock::new(String::new()),
                allow_reauthenticate: AtomicBool::new(true),
                delay_millis: AtomicU64::new(0),
                loader,
            }),
        }
    }

    pub fn set_public_url(&self, url: impl Into<String>) -> &Self {
        *self
            .shared
            .public_url
            .write()
            .unwrap_or_else(PoisonError::into_inner) = url.into();
        self
    }

    pub fn set_allow_reauthenticate(&self, allow: bool) -> &Self {
        self.shared
            .allow_reauthenticate
            .store(allow, Ordering::Relaxed);
        self
    }

    /// Delay every subsequent operation by `millis` milliseconds.
    pub fn set_millis_delay(&self, millis: u64) -> &Self {
        self.shared.delay_millis.store(millis, Ordering::Relaxed);
        self
    }

    /// Populate the account from the directory tree at `root`.
    ///
    /// Any failure of the seed loader is reported as a generic command
    /// failure carrying the loader's error, and the account is rolled back
    /// to its state before seeding. Changes made by other callers while the
    /// loader ran are rolled back with it.
    pub fn set_on_file_object_store(&self, root: impl AsRef<Path>) -> StoreResult<&Self> {
        let root = root.as_ref();
        info!(root = %root.display(), "seeding mock account from file store");
        let snapshot = self.shared.read()?.clone();
        match self.shared.loader.create_containers(self, root) {
            Ok(()) => Ok(self),
            Err(err) => {
                warn!(root = %root.display(), error = %err, "seeding mock account failed");
                *self.shared.write()? = snapshot;
                Err(StoreError::command_failed_with(
                    format!("seeding from {}", root.display()),
                    err,
                ))
            }
        }
    }

    /// Returns `true` if both handles refer to the same account.
    pub fn same_account(&self, other: &MockAccount) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    pub(crate) fn shared(&self) -> &Shared {
        &self.shared
    }
}

impl Default for MockAccount {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for MockAccount {
    fn eq(&self, other: &Self) -> bool {
        self.same_account(other)
    }
}

impl Eq for MockAccount {}

impl std::fmt::Debug for MockAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let containers = self
            .shared
            .state
            .read()
            .map(|state| state.container_count())
            .unwrap_or_default();
        f.debug_struct("MockAccount")
            .field("container_count", &containers)
            .finish()
    }
}

impl Account for MockAccount {
    type Container = MockContainer;

    fn authenticate(&self) -> StoreResult<()> {
        debug!("mock account needs no authentication");
        Ok(())
    }

    fn container(&self, name: &str) -> MockContainer {
        MockContainer::new(self.clone(), name)
    }

    fn list_page(
        &self,
        prefix: Option<&str>,
        marker: Option<&str>,
        limit: usize,
    ) -> StoreResult<Vec<MockContainer>> {
        let names = self.shared.read()?.container_names(prefix, marker, limit);
        Ok(names
            .into_iter()
            .map(|name| MockContainer::new(self.clone(), name))
            .collect())
    }

    fn pagination_map(
        &self,
        prefix: Option<&str>,
        page_size: usize,
    ) -> StoreResult<PaginationMap> {
        Ok(self.shared.read()?.container_pages(prefix, page_size))
    }

    fn set_metadata(&self, metadata: &Metadata) -> StoreResult<()> {
        self.shared.write()?.metadata.merge(metadata);
        Ok(())
    }

    fn metadata(&self) -> StoreResult<Metadata> {
        Ok(self.shared.read()?.metadata.clone())
    }

    fn container_count(&self) -> StoreResult<usize> {
        Ok(self.shared.read()?.container_count())
    }

    fn object_count(&self) -> StoreResult<usize> {
        Ok(self.shared.read()?.object_count())
    }

    fn bytes_used(&self) -> StoreResult<u64> {
        Ok(self.shared.read()?.bytes_used())
    }

    fn public_url(&self) -> String {
        self.shared
            .public_url
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn is_allow_reauthenticate(&self) -> bool {
        self.shared.allow_reauthenticate.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::traits::{Container, StoredObject};

    fn towns(account: &MockAccount, count: usize) -> Vec<MockContainer> {
        (1..=count)
            .map(|i| {
                let town = account.container(&format!("town{i}"));
                town.create().unwrap();
                town
            })
            .collect()
    }

    #[test]
    fn metadata_values_are_coerced() {
        let account = MockAccount::new();
        account.authenticate().unwrap();
        account
            .set_metadata(&Metadata::new().with("name", "Alpha").with("year", 1969))
            .unwrap();
        let metadata = account.metadata().unwrap();
        assert_eq!(metadata.get("name"), Some("Alpha"));
        assert_eq!(metadata.get("year"), Some("1969"));
    }

    #[test]
    fn metadata_writes_merge() {
        let account = MockAccount::new();
        account.set_metadata(&Metadata::new().with("a", 1)).unwrap();
        account.set_metadata(&Metadata::new().with("b", 2)).unwrap();
        assert_eq!(account.metadata().unwrap().len(), 2);
    }

    #[test]
    fn list_containers() {
        let account = MockAccount::new();
        towns(&account, 3);
        assert_eq!(account.list().unwrap().len(), 3);
    }

    #[test]
    fn list_skips_deleted_containers() {
        let account = MockAccount::new();
        let created = towns(&account, 3);
        created[1].delete().unwrap();
        let names: Vec<String> = account
            .list()
            .unwrap()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["town1", "town3"]);
    }

    #[test]
    fn list_containers_paged_by_marker() {
        let account = MockAccount::new();
        let created = towns(&account, 5);
        let page = account.list_page(None, Some("town2"), 2).unwrap();
        assert_eq!(page, vec![created[2].clone(), created[3].clone()]);
    }

    #[test]
    fn list_containers_by_pagination_map() {
        let account = MockAccount::new();
        let created = towns(&account, 5);
        let map = account.pagination_map(None, 2).unwrap();
        assert_eq!(map.number_of_pages(), 3);
        assert_eq!(map.number_of_records(), 5);

        let page = account.list_paged(&map, 1).unwrap();
        assert_eq!(page, vec![created[2].clone(), created[3].clone()]);
        assert_eq!(page, account.list_page(None, Some("town2"), 2).unwrap());

        assert_eq!(account.list_paged(&map, 2).unwrap(), vec![created[4].clone()]);
        assert!(account.list_paged(&map, 3).unwrap().is_empty());
    }

    #[test]
    fn pages_cover_listing_exactly_once() {
        let account = MockAccount::new();
        towns(&account, 7);
        let map = account.pagination_map(None, 3).unwrap();
        let mut seen = Vec::new();
        for page in 0..map.number_of_pages() {
            seen.extend(account.list_paged(&map, page).unwrap());
        }
        assert_eq!(seen, account.list().unwrap());
    }

    #[test]
    fn pages_include_empty_container_name() {
        let account = MockAccount::new();
        for name in ["", "a", "b"] {
            account.container(name).create().unwrap();
        }
        let map = account.pagination_map(None, 1).unwrap();
        assert_eq!(map.number_of_pages(), 3);
        let mut seen = Vec::new();
        for page in 0..map.number_of_pages() {
            seen.extend(account.list_paged(&map, page).unwrap());
        }
        let names: Vec<&str> = seen.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["", "a", "b"]);
        assert_eq!(seen, account.list().unwrap());
    }

    #[test]
    fn pagination_map_is_a_snapshot() {
        let account = MockAccount::new();
        towns(&account, 4);
        let map = account.pagination_map(None, 2).unwrap();
        account.container("town9").create().unwrap();
        assert_eq!(map.number_of_records(), 4);
        assert_eq!(account.pagination_map(None, 2).unwrap().number_of_pages(), 3);
    }

    #[test]
    fn pagination_with_prefix() {
        let account = MockAccount::new();
        towns(&account, 3);
        for name in ["city1", "city2"] {
            account.container(name).create().unwrap();
        }
        let map = account.pagination_map(Some("city"), 1).unwrap();
        assert_eq!(map.number_of_pages(), 2);
        let second = account.list_paged(&map, 1).unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].name(), "city2");
    }

    #[test]
    fn usage_statistics() {
        let account = MockAccount::new();
        let container = account.container("alpha");
        container.create().unwrap();
        container.object("1").upload_object(&[0x01, 0x02, 0x03]).unwrap();
        assert_eq!(account.bytes_used().unwrap(), 3);
        assert_eq!(account.container_count().unwrap(), 1);
        assert_eq!(account.object_count().unwrap(), 1);
    }

    #[test]
    fn usage_statistics_follow_deletes() {
        let account = MockAccount::new();
        let container = account.container("alpha");
        container.create().unwrap();
        let object = container.object("1");
        object.upload_object(&[0; 8]).unwrap();
        object.delete().unwrap();
        container.delete().unwrap();
        assert_eq!(account.bytes_used().unwrap(), 0);
        assert_eq!(account.object_count().unwrap(), 0);
        assert_eq!(account.container_count().unwrap(), 0);
    }

    #[test]
    fn same_name_handles_are_equal() {
        let account = MockAccount::new();
        let first = account.container("Alpha");
        first.create().unwrap();
        let second = account.container("Alpha");
        assert_eq!(first, second);
    }

    #[test]
    fn handles_from_different_accounts_differ() {
        let left = MockAccount::new();
        let right = MockAccount::new();
        assert_ne!(left.container("x"), right.container("x"));
        assert_ne!(left, right);
        assert_eq!(left, left.clone());
    }

    #[test]
    fn accounts_are_independent() {
        let left = MockAccount::new();
        let right = MockAccount::new();
        left.container("shared-name").create().unwrap();
        assert!(!right.container("shared-name").exists().unwrap());
        right.container("shared-name").create().unwrap();
        assert_eq!(left.container_count().unwrap(), 1);
    }

    #[test]
    fn public_url_defaults_to_empty() {
        assert_eq!(MockAccount::new().public_url(), "");
        let account = MockAccount::new();
        account.set_public_url("http://localhost:8080/mock");
        assert_eq!(account.public_url(), "http://localhost:8080/mock");
    }

    #[test]
    fn reauthenticate_flag() {
        let account = MockAccount::new();
        assert!(account.is_allow_reauthenticate());
        account.set_allow_reauthenticate(false);
        assert!(!account.is_allow_reauthenticate());
    }

    #[test]
    fn seed_loader_failure_is_generic() {
        struct Failing;
        impl SeedLoader for Failing {
            fn create_containers(&self, _: &MockAccount, _: &Path) -> anyhow::Result<()> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone").into())
            }
        }

        let account = MockAccount::with_loader(Arc::new(Failing));
        let err = account.set_on_file_object_store("test").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GenericCommandFailure);
        assert_eq!(account.container_count().unwrap(), 0);
    }

    #[test]
    fn failed_seeding_rolls_back() {
        struct HalfDone;
        impl SeedLoader for HalfDone {
            fn create_containers(&self, account: &MockAccount, _: &Path) -> anyhow::Result<()> {
                let container = account.container("partial");
                container.create()?;
                container.object("first").upload_object(b"abc")?;
                anyhow::bail!("second file unreadable")
            }
        }

        let account = MockAccount::with_loader(Arc::new(HalfDone));
        account.container("before").create().unwrap();
        let err = account.set_on_file_object_store("seed").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GenericCommandFailure);
        assert!(!account.container("partial").exists().unwrap());
        assert!(account.container("before").exists().unwrap());
        assert_eq!(account.container_count().unwrap(), 1);
        assert_eq!(account.bytes_used().unwrap(), 0);
    }

    #[test]
    fn seed_loader_receives_account_and_root() {
        struct Recording;
        impl SeedLoader for Recording {
            fn create_containers(&self, account: &MockAccount, root: &Path) -> anyhow::Result<()> {
                let name = root.to_string_lossy();
                account.container(&name).create()?;
                Ok(())
            }
        }

        let account = MockAccount::with_loader(Arc::new(Recording));
        account.set_on_file_object_store("seeded").unwrap();
        assert!(account.container("seeded").exists().unwrap());
    }

    #[test]
    fn millis_delay_still_completes() {
        let account = MockAccount::new();
        account.set_millis_delay(1);
        let started = std::time::Instant::now();
        account.container("slow").create().unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1));
    }

    #[test]
    fn debug_format() {
        let account = MockAccount::new();
        towns(&account, 2);
        let debug = format!("{account:?}");
        assert!(debug.contains("MockAccount"));
        assert!(debug.contains("container_count: 2"));
    }
}
