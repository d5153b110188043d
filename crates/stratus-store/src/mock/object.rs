use chrono::{DateTime, Utc};
use stratus_types::{Etag, Metadata};
use tracing::debug;

use super::MockAccount;
use crate::error::StoreResult;
use crate::traits::StoredObject;

/// Handle to an object of a [`MockAccount`] container.
#[derive(Clone)]
pub struct MockObject {
    account: MockAccount,
    container: String,
    name: String,
}

impl MockObject {
    pub(crate) fn new(
        account: MockAccount,
        container: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            account,
            container: container.into(),
            name: name.into(),
        }
    }

    /// `container/name`, as Swift addresses the object.
    pub fn path(&self) -> String {
        format!("{}/{}", self.container, self.name)
    }
}

impl PartialEq for MockObject {
    fn eq(&self, other: &Self) -> bool {
        self.container == other.container
            && self.name == other.name
            && self.account.same_account(&other.account)
    }
}

impl Eq for MockObject {}

impl std::fmt::Debug for MockObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockObject")
            .field("container", &self.container)
            .field("name", &self.name)
            .finish()
    }
}

impl StoredObject for MockObject {
    fn name(&self) -> &str {
        &self.name
    }

    fn container_name(&self) -> &str {
        &self.container
    }

    fn upload_object(&self, content: &[u8]) -> StoreResult<()> {
        self.account
            .shared()
            .write()?
            .put_object(&self.container, &self.name, content.to_vec(), None)?;
        debug!(object = %self.path(), bytes = content.len(), "object uploaded");
        Ok(())
    }

    fn download_object(&self) -> StoreResult<Vec<u8>> {
        let state = self.account.shared().read()?;
        Ok(state.object(&self.container, &self.name)?.content.clone())
    }

    fn copy_object(&self, target: &MockObject) -> StoreResult<()> {
        if self.account.same_account(&target.account) {
            let mut state = self.account.shared().write()?;
            let source = state.object(&self.container, &self.name)?;
            let (content, metadata) = (source.content.clone(), source.metadata.clone());
            state.put_object(&target.container, &target.name, content, Some(metadata))?;
        } else {
            // Accounts never share a lock, so read the source and release it
            // before writing the target.
            let (content, metadata) = {
                let state = self.account.shared().read()?;
                let source = state.object(&self.container, &self.name)?;
                (source.content.clone(), source.metadata.clone())
            };
            target.account.shared().write()?.put_object(
                &target.container,
                &target.name,
                content,
                Some(metadata),
            )?;
        }
        debug!(source = %self.path(), target = %target.path(), "object copied");
        Ok(())
    }

    fn delete(&self) -> StoreResult<()> {
        self.account
            .shared()
            .write()?
            .delete_object(&self.container, &self.name)?;
        debug!(object = %self.path(), "object deleted");
        Ok(())
    }

    fn exists(&self) -> StoreResult<bool> {
        let state = self.account.shared().read()?;
        Ok(state
            .containers
            .get(&self.container)
            .is_some_and(|c| c.objects.contains_key(&self.name)))
    }

    fn etag(&self) -> StoreResult<Etag> {
        let state = self.account.shared().read()?;
        Ok(state.object(&self.container, &self.name)?.etag.clone())
    }

    fn content_length(&self) -> StoreResult<u64> {
        let state = self.account.shared().read()?;
        Ok(state.object(&self.container, &self.name)?.content_length())
    }

    fn last_modified(&self) -> StoreResult<DateTime<Utc>> {
        let state = self.account.shared().read()?;
        Ok(state.object(&self.container, &self.name)?.last_modified)
    }

    fn set_metadata(&self, metadata: &Metadata) -> StoreResult<()> {
        let mut state = self.account.shared().write()?;
        state
            .object_mut(&self.container, &self.name)?
            .metadata
            .merge(metadata);
        Ok(())
    }

    fn metadata(&self) -> StoreResult<Metadata> {
        let state = self.account.shared().read()?;
        Ok(state.object(&self.container, &self.name)?.metadata.clone())
    }
}
