//! Capability contracts shared by every store backend.
//!
//! Code written against [`Account`], [`Container`], and [`StoredObject`]
//! runs unchanged on the in-memory mock and on a network-backed client.
//! Each backend owns its own representation; the traits carry no state.

use chrono::{DateTime, Utc};
use stratus_types::{Etag, Metadata, PaginationMap};

use crate::error::StoreResult;

/// Top of the store hierarchy: owns containers, reports usage.
///
/// Listings are in name order. `list_page` returns at most `limit` entries
/// whose names start with `prefix` and sort strictly after `marker`; an
/// absent marker lists from the beginning.
pub trait Account: Send + Sync {
    type Container: Container;

    /// Acquire credentials for subsequent calls.
    fn authenticate(&self) -> StoreResult<()>;

    /// Handle to the container called `name`. Never fails and does not
    /// imply that the container exists.
    fn container(&self, name: &str) -> Self::Container;

    /// Every existing container.
    fn list(&self) -> StoreResult<Vec<Self::Container>> {
        self.list_page(None, None, usize::MAX)
    }

    fn list_page(
        &self,
        prefix: Option<&str>,
        marker: Option<&str>,
        limit: usize,
    ) -> StoreResult<Vec<Self::Container>>;

    /// Snapshot the container listing into pages of `page_size`.
    fn pagination_map(&self, prefix: Option<&str>, page_size: usize)
        -> StoreResult<PaginationMap>;

    /// Page `page` of a listing previously mapped with
    /// [`pagination_map`](Self::pagination_map). Out-of-range pages are empty.
    fn list_paged(&self, map: &PaginationMap, page: usize) -> StoreResult<Vec<Self::Container>> {
        match map.marker(page) {
            Some(marker) => self.list_page(map.prefix(), marker, map.page_size()),
            None => Ok(Vec::new()),
        }
    }

    /// Merge `metadata` into the account's metadata.
    fn set_metadata(&self, metadata: &Metadata) -> StoreResult<()>;

    fn metadata(&self) -> StoreResult<Metadata>;

    /// Number of existing containers.
    fn container_count(&self) -> StoreResult<usize>;

    /// Number of existing objects across all containers.
    fn object_count(&self) -> StoreResult<usize>;

    /// Total content length of all existing objects.
    fn bytes_used(&self) -> StoreResult<u64>;

    /// URL under which the account's public containers are served.
    fn public_url(&self) -> String;

    /// Whether an expired token may be renewed transparently.
    fn is_allow_reauthenticate(&self) -> bool;
}

/// A named container within an account.
pub trait Container: Send + Sync + Sized {
    type Object: StoredObject;

    fn name(&self) -> &str;

    /// Create the container. Fails with `EntityAlreadyExists` if it exists.
    fn create(&self) -> StoreResult<()>;

    /// Delete the container. Fails with `EntityDoesNotExist` if absent and
    /// `ContainerNotEmpty` while it still holds objects.
    fn delete(&self) -> StoreResult<()>;

    fn exists(&self) -> StoreResult<bool>;

    /// Handle to the object called `name`. Never fails and does not imply
    /// that the object exists.
    fn object(&self, name: &str) -> Self::Object;

    /// Every existing object in the container.
    fn list(&self) -> StoreResult<Vec<Self::Object>> {
        self.list_page(None, None, usize::MAX)
    }

    fn list_page(
        &self,
        prefix: Option<&str>,
        marker: Option<&str>,
        limit: usize,
    ) -> StoreResult<Vec<Self::Object>>;

    fn pagination_map(&self, prefix: Option<&str>, page_size: usize)
        -> StoreResult<PaginationMap>;

    fn list_paged(&self, map: &PaginationMap, page: usize) -> StoreResult<Vec<Self::Object>> {
        match map.marker(page) {
            Some(marker) => self.list_page(map.prefix(), marker, map.page_size()),
            None => Ok(Vec::new()),
        }
    }

    fn set_metadata(&self, metadata: &Metadata) -> StoreResult<()>;

    fn metadata(&self) -> StoreResult<Metadata>;

    fn object_count(&self) -> StoreResult<usize>;

    fn bytes_used(&self) -> StoreResult<u64>;
}

/// A named object within a container.
pub trait StoredObject: Send + Sync + Sized {
    fn name(&self) -> &str;

    /// Name of the container this handle is bound to.
    fn container_name(&self) -> &str;

    /// Store `content`, replacing any previous content.
    fn upload_object(&self, content: &[u8]) -> StoreResult<()>;

    fn download_object(&self) -> StoreResult<Vec<u8>>;

    /// Copy this object's content and metadata onto `target`, which may live
    /// in another container. The copy is independent of the source.
    fn copy_object(&self, target: &Self) -> StoreResult<()>;

    fn delete(&self) -> StoreResult<()>;

    fn exists(&self) -> StoreResult<bool>;

    fn etag(&self) -> StoreResult<Etag>;

    fn content_length(&self) -> StoreResult<u64>;

    fn last_modified(&self) -> StoreResult<DateTime<Utc>>;

    fn set_metadata(&self, metadata: &Metadata) -> StoreResult<()>;

    fn metadata(&self) -> StoreResult<Metadata>;
}
