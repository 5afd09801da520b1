//! Storage abstractions for photo blobs.
//!
//! Place records only hold a blob name; the bytes live behind [`BlobStore`].

pub mod blob_store;
pub mod fs_blob_store;
pub mod memory_blob_store;

pub use blob_store::BlobStore;
pub use fs_blob_store::FsBlobStore;
pub use memory_blob_store::MemoryBlobStore;
