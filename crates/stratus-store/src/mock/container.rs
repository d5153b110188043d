use stratus_types::{Metadata, PaginationMap};
use tracing::debug;

use super::{MockAccount, MockObject};
use crate::error::StoreResult;
use crate::traits::Container;

/// Handle to a container of a [`MockAccount`].
///
/// Holding a handle says nothing about existence; every call consults the
/// account's container map.
#[derive(Clone)]
pub struct MockContainer {
    account: MockAccount,
    name: String,
}

impl MockContainer {
    pub(crate) fn new(account: MockAccount, name: impl Into<String>) -> Self {
        Self {
            account,
            name: name.into(),
        }
    }

    /// The account this container belongs to.
    pub fn account(&self) -> &MockAccount {
        &self.account
    }
}

impl PartialEq for MockContainer {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.account.same_account(&other.account)
    }
}

impl Eq for MockContainer {}

impl std::fmt::Debug for MockContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockContainer")
            .field("name", &self.name)
            .finish()
    }
}

impl Container for MockContainer {
    type Object = MockObject;

    fn name(&self) -> &str {
        &self.name
    }

    fn create(&self) -> StoreResult<()> {
        self.account.shared().write()?.create_container(&self.name)?;
        debug!(container = %self.name, "container created");
        Ok(())
    }

    fn delete(&self) -> StoreResult<()> {
        self.account.shared().write()?.delete_container(&self.name)?;
        debug!(container = %self.name, "container deleted");
        Ok(())
    }

    fn exists(&self) -> StoreResult<bool> {
        Ok(self
            .account
            .shared()
            .read()?
            .containers
            .contains_key(&self.name))
    }

    fn object(&self, name: &str) -> MockObject {
        MockObject::new(self.account.clone(), self.name.clone(), name)
    }

    fn list_page(
        &self,
        prefix: Option<&str>,
        marker: Option<&str>,
        limit: usize,
    ) -> StoreResult<Vec<MockObject>> {
        let names = self
            .account
            .shared()
            .read()?
            .object_names(&self.name, prefix, marker, limit)?;
        Ok(names
            .into_iter()
            .map(|name| MockObject::new(self.account.clone(), self.name.clone(), name))
            .collect())
    }

    fn pagination_map(
        &self,
        prefix: Option<&str>,
        page_size: usize,
    ) -> StoreResult<PaginationMap> {
        self.account
            .shared()
            .read()?
            .object_pages(&self.name, prefix, page_size)
    }

    fn set_metadata(&self, metadata: &Metadata) -> StoreResult<()> {
        let mut state = self.account.shared().write()?;
        state.container_mut(&self.name)?.metadata.merge(metadata);
        Ok(())
    }

    fn metadata(&self) -> StoreResult<Metadata> {
        let state = self.account.shared().read()?;
        Ok(state.container(&self.name)?.metadata.clone())
    }

    fn object_count(&self) -> StoreResult<usize> {
        let state = self.account.shared().read()?;
        Ok(state.container(&self.name)?.object_count())
    }

    fn bytes_used(&self) -> StoreResult<u64> {
        let state = self.account.shared().read()?;
        Ok(state.container(&self.name)?.bytes_used())
    }
}
