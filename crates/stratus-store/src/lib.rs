//! Account, container, and object contracts for Swift-style object stores.
//!
//! An account owns containers, a container owns objects, and every entity
//! carries metadata. Calling code is written against the traits in
//! [`traits`]; any backend that implements them can be swapped in without
//! changing that code.
//!
//! # Backends
//!
//! - [`MockAccount`] -- in-memory engine reproducing the storage API's
//!   observable semantics (lifecycle errors, paginated listings, usage
//!   accounting, copy) without a network round trip
//!
//! # Design Rules
//!
//! 1. Handles are cheap and never imply existence. `account.container("x")`
//!    always succeeds; whether `x` exists is a separate query.
//! 2. Every operation either completes or fails with exactly one
//!    [`ErrorKind`]. A failed operation leaves no partial mutation behind.
//! 3. All state of a mock account sits behind one lock, so aggregate reads
//!    never observe a half-applied mutation.
//! 4. Separate accounts share nothing.

pub mod config;
pub mod error;
pub mod factory;
pub mod loader;
pub mod mock;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use config::AccountConfig;
pub use error::{ConfigError, ErrorKind, StoreError, StoreResult};
pub use factory::AccountFactory;
pub use loader::{OnFileLoader, SeedLoader};
pub use mock::{MockAccount, MockContainer, MockObject};
pub use traits::{Account, Container, StoredObject};

pub use stratus_types::{EntityKind, Etag, Metadata, PaginationMap};
