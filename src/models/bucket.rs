//! Represents a logical bucket — a top-level container for objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A storage bucket.
///
/// Buckets act as namespaces for objects. Each one is a single directory
/// directly under the storage root, and its attributes are read back from
/// that directory rather than stored anywhere else.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BucketInfo {
    /// Bucket name, folded to lowercase (must conform to DNS-like naming rules).
    pub name: String,

    /// When this bucket was created, from the directory's timestamps.
    pub created_at: DateTime<Utc>,

    /// Number of objects currently in the bucket.
    pub object_count: u64,

    /// Total payload bytes across all objects in the bucket.
    pub total_size: u64,
}
