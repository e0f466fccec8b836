//! Represents an object (file) stored in a bucket.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for a single object (blob) within a bucket.
///
/// An object corresponds to a stored file addressed by its key. The record
/// holds metadata only, never the content bytes, and is derived from the
/// file and its stat data at read time.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ObjectMeta {
    /// Name of the bucket the object lives in.
    pub bucket: String,

    /// Object key (path-like identifier within the bucket).
    pub key: String,

    /// Size in bytes.
    pub size: u64,

    /// Content type (MIME type), explicit or guessed from the key.
    pub content_type: String,

    /// MD5 checksum for integrity verification, served as the ETag.
    pub etag: String,

    /// Timestamp when the object was last modified.
    pub last_modified: DateTime<Utc>,
}
