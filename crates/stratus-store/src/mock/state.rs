//! Records held under a mock account's lock.
//!
//! Existence is presence in the owning map: a container exists while its
//! record is in [`AccountState::containers`], an object while its record is
//! in its container's map. Deleting removes the record, so a deleted
//! container takes its (necessarily empty) object map with it.

use std::collections::BTreeMap;
use std::ops::Bound;

use chrono::{DateTime, Utc};
use stratus_types::{EntityKind, Etag, Metadata, PaginationMap};

use crate::error::{StoreError, StoreResult};

#[derive(Clone, Debug)]
pub(crate) struct ObjectRecord {
    pub content: Vec<u8>,
    pub etag: Etag,
    pub last_modified: DateTime<Utc>,
    pub metadata: Metadata,
}

impl ObjectRecord {
    fn new(content: Vec<u8>, metadata: Metadata) -> Self {
        Self {
            etag: Etag::of(&content),
            content,
            last_modified: Utc::now(),
            metadata,
        }
    }

    pub fn content_length(&self) -> u64 {
        self.content.len() as u64
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct ContainerRecord {
    pub objects: BTreeMap<String, ObjectRecord>,
    pub metadata: Metadata,
}

impl ContainerRecord {
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn bytes_used(&self) -> u64 {
        self.objects.values().map(ObjectRecord::content_length).sum()
    }
}

/// Everything a mock account knows, guarded as a unit.
#[derive(Clone, Debug, Default)]
pub(crate) struct AccountState {
    pub containers: BTreeMap<String, ContainerRecord>,
    pub metadata: Metadata,
}

impl AccountState {
    // ---- Containers ----

    pub fn create_container(&mut self, name: &str) -> StoreResult<()> {
        if self.containers.contains_key(name) {
            return Err(StoreError::already_exists(EntityKind::Container, name));
        }
        self.containers
            .insert(name.to_string(), ContainerRecord::default());
        Ok(())
    }

    pub fn delete_container(&mut self, name: &str) -> StoreResult<()> {
        let record = self.container(name)?;
        if !record.objects.is_empty() {
            return Err(StoreError::ContainerNotEmpty {
                name: name.to_string(),
            });
        }
        self.containers.remove(name);
        Ok(())
    }

    pub fn container(&self, name: &str) -> StoreResult<&ContainerRecord> {
        self.containers
            .get(name)
            .ok_or_else(|| StoreError::does_not_exist(EntityKind::Container, name))
    }

    pub fn container_mut(&mut self, name: &str) -> StoreResult<&mut ContainerRecord> {
        self.containers
            .get_mut(name)
            .ok_or_else(|| StoreError::does_not_exist(EntityKind::Container, name))
    }

    pub fn container_names(
        &self,
        prefix: Option<&str>,
        marker: Option<&str>,
        limit: usize,
    ) -> Vec<String> {
        page_of(&self.containers, prefix, marker, limit)
    }

    pub fn container_pages(&self, prefix: Option<&str>, page_size: usize) -> PaginationMap {
        let names = page_of(&self.containers, prefix, None, usize::MAX);
        PaginationMap::from_keys(names, prefix, page_size)
    }

    // ---- Objects ----

    pub fn object(&self, container: &str, name: &str) -> StoreResult<&ObjectRecord> {
        self.container(container)?
            .objects
            .get(name)
            .ok_or_else(|| object_missing(container, name))
    }

    pub fn object_mut(&mut self, container: &str, name: &str) -> StoreResult<&mut ObjectRecord> {
        self.container_mut(container)?
            .objects
            .get_mut(name)
            .ok_or_else(|| object_missing(container, name))
    }

    /// Store `content` under `container/name`. An existing object keeps its
    /// metadata unless `metadata` replaces it.
    pub fn put_object(
        &mut self,
        container: &str,
        name: &str,
        content: Vec<u8>,
        metadata: Option<Metadata>,
    ) -> StoreResult<()> {
        let record = self.container_mut(container)?;
        let metadata = match (metadata, record.objects.get(name)) {
            (Some(metadata), _) => metadata,
            (None, Some(existing)) => existing.metadata.clone(),
            (None, None) => Metadata::new(),
        };
        record
            .objects
            .insert(name.to_string(), ObjectRecord::new(content, metadata));
        Ok(())
    }

    pub fn delete_object(&mut self, container: &str, name: &str) -> StoreResult<()> {
        self.container_mut(container)?
            .objects
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| object_missing(container, name))
    }

    pub fn object_names(
        &self,
        container: &str,
        prefix: Option<&str>,
        marker: Option<&str>,
        limit: usize,
    ) -> StoreResult<Vec<String>> {
        let record = self.container(container)?;
        Ok(page_of(&record.objects, prefix, marker, limit))
    }

    pub fn object_pages(
        &self,
        container: &str,
        prefix: Option<&str>,
        page_size: usize,
    ) -> StoreResult<PaginationMap> {
        let names = self.object_names(container, prefix, None, usize::MAX)?;
        Ok(PaginationMap::from_keys(names, prefix, page_size))
    }

    // ---- Aggregates ----

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    pub fn object_count(&self) -> usize {
        self.containers.values().map(ContainerRecord::object_count).sum()
    }

    pub fn bytes_used(&self) -> u64 {
        self.containers.values().map(ContainerRecord::bytes_used).sum()
    }
}

fn object_missing(container: &str, name: &str) -> StoreError {
    StoreError::does_not_exist(EntityKind::Object, format!("{container}/{name}"))
}

/// Names in `map` starting with `prefix` and sorting strictly after
/// `marker`, at most `limit` of them.
fn page_of<V>(
    map: &BTreeMap<String, V>,
    prefix: Option<&str>,
    marker: Option<&str>,
    limit: usize,
) -> Vec<String> {
    let start = match marker {
        Some(marker) => Bound::Excluded(marker),
        None => Bound::Unbounded,
    };
    let prefix = prefix.unwrap_or("");
    map.range::<str, _>((start, Bound::Unbounded))
        .map(|(name, _)| name)
        .skip_while(|name| name.as_str() < prefix)
        .take_while(|name| name.starts_with(prefix))
        .take(limit)
        .cloned()
        .collect()
}
