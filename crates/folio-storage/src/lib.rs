//! Storage abstraction for folio content trees.
//!
//! This crate provides a [`Storage`] trait that hides where versioned content
//! comes from. The build pipeline only needs three things from a backend:
//!
//! - the list of content sources of one version (`scan()`)
//! - the raw text of one source, resolved against localized roots (`read()`)
//! - the per-directory category sidecar metadata (`category_metadata()`)
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait and the [`DocFile`] / [`LastUpdate`] records it returns
//! - [`CategoryMetadata`] and [`CategoryLink`], the sidecar data model
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! The filesystem backend lives in the `folio-storage-fs` crate.
//!
//! # Example
//!
//! ```ignore
//! use folio_storage::Storage;
//! use folio_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new("website/docs".into());
//! for source in storage.scan()? {
//!     let doc = storage.read(&source)?;
//!     println!("{}: {} bytes", doc.source, doc.content.len());
//! }
//! ```

mod metadata;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use metadata::{CategoryLink, CategoryMetadata, CategoryMetadataMap};
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{DocFile, LastUpdate, Storage, StorageError, StorageErrorKind};
