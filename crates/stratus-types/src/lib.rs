//! Foundation types for the Stratus object-store client.
//!
//! Every entity in a Swift-style object store (account, container, object)
//! carries metadata, and every listing can be paginated. The types in this
//! crate are pure values shared by all store implementations.
//!
//! # Key Types
//!
//! - [`Metadata`] -- String-valued metadata map, coercing values on write
//! - [`PaginationMap`] -- Snapshot of page boundaries over an ordered listing
//! - [`Etag`] -- Content hash reported for a stored object
//! - [`EntityKind`] -- Which level of the store hierarchy an entity lives at

pub mod entity;
pub mod etag;
pub mod metadata;
pub mod pagination;

pub use entity::EntityKind;
pub use etag::Etag;
pub use metadata::Metadata;
pub use pagination::PaginationMap;
