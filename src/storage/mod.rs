//! Storage backend abstraction and its local-filesystem implementation.
//!
//! The [`StorageBackend`] trait is the seam between the HTTP layer and the
//! storage medium: handlers hold an `Arc<dyn StorageBackend>` and never touch
//! the filesystem directly, so a network-backed store can replace
//! [`local::LocalBackend`] without any client-visible change.

pub mod integrity;
pub mod local;
pub mod paths;

use std::io;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use thiserror::Error;

use crate::models::{bucket::BucketInfo, object::ObjectMeta};

/// Chunked payload moving in or out of a backend. Memory use stays bounded
/// by the chunk size no matter how large the object is.
pub type ByteStream<'a> = Pin<Box<dyn Stream<Item = io::Result<Bytes>> + Send + 'a>>;

/// Backend shared across request handlers.
pub type SharedBackend = Arc<dyn StorageBackend>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("bucket `{0}` not found")]
    BucketNotFound(String),
    #[error("bucket `{0}` already exists")]
    BucketAlreadyExists(String),
    #[error("bucket `{0}` is not empty")]
    BucketNotEmpty(String),
    #[error("bucket name `{name}` invalid: {reason}")]
    InvalidBucketName { name: String, reason: String },
    #[error("object key `{key}` invalid: {reason}")]
    InvalidObjectKey { key: String, reason: String },
    #[error("object key `{0}` resolves outside its bucket")]
    PathTraversal(String),
    #[error("object `{key}` not found in bucket `{bucket}`")]
    ObjectNotFound { bucket: String, key: String },
    #[error("object exceeds the maximum allowed size of {max_bytes} bytes")]
    FileTooLarge { max_bytes: u64 },
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// The capability set every storage backend provides, independent of the
/// storage medium. All operations are safe to invoke concurrently from
/// independent callers; no call mutates another's state.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Create a bucket. Fails if one with the same name already exists.
    async fn create_bucket(&self, name: &str) -> StorageResult<BucketInfo>;

    /// All buckets, ordered by name.
    async fn list_buckets(&self) -> StorageResult<Vec<BucketInfo>>;

    /// Descriptor for one bucket.
    async fn stat_bucket(&self, name: &str) -> StorageResult<BucketInfo>;

    /// Delete a bucket. Refused unless the bucket is empty.
    async fn delete_bucket(&self, name: &str) -> StorageResult<()>;

    /// Store an object from a chunk stream, replacing any previous content
    /// at the same key. The object becomes visible all at once or not at
    /// all; a failed upload leaves nothing behind.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: Option<String>,
        body: ByteStream<'_>,
    ) -> StorageResult<ObjectMeta>;

    /// Open an object for reading, returning its metadata and a finite,
    /// non-restartable chunk stream over the content.
    async fn get_object(&self, bucket: &str, key: &str)
    -> StorageResult<(ObjectMeta, ByteStream<'static>)>;

    /// Metadata only, no content.
    async fn head_object(&self, bucket: &str, key: &str) -> StorageResult<ObjectMeta>;

    /// Metadata for every object in the bucket whose key starts with
    /// `prefix` (all objects when `None`), sorted by key.
    async fn list_objects(&self, bucket: &str, prefix: Option<&str>)
    -> StorageResult<Vec<ObjectMeta>>;

    /// Delete a single object.
    async fn delete_object(&self, bucket: &str, key: &str) -> StorageResult<()>;
}
