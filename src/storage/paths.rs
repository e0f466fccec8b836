//! Path resolution for untrusted bucket names and object keys.
//!
//! Every filesystem location the backend touches is produced here. Bucket
//! names are folded to lowercase and checked against a DNS-like charset so
//! they can never contain a separator; object keys are normalized, split
//! into vetted segments, and the joined result is verified to sit inside
//! its bucket directory with a component-wise ancestor check. Resolution is
//! a pure function of the inputs and the configured root.

use std::path::{Path, PathBuf};

use super::{StorageError, StorageResult};

const BUCKET_NAME_MIN_LEN: usize = 3;
const BUCKET_NAME_MAX_LEN: usize = 63;
const MAX_OBJECT_KEY_LEN: usize = 1024;

/// Maps bucket names and object keys to locations under a fixed root.
#[derive(Clone, Debug)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// The root should already be canonicalized by the caller so ancestor
    /// checks compare resolved paths.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate a bucket name and return it lowercased together with its
    /// directory path under the root.
    pub fn bucket_path(&self, name: &str) -> StorageResult<(String, PathBuf)> {
        let name = validate_bucket_name(name)?;
        let path = self.root.join(&name);
        if !path.starts_with(&self.root) {
            return Err(StorageError::PathTraversal(name));
        }
        Ok((name, path))
    }

    /// Validate a bucket name and object key and return the normalized key
    /// together with the object's path inside that bucket.
    pub fn object_path(&self, bucket: &str, key: &str) -> StorageResult<(String, PathBuf)> {
        let (_, bucket_dir) = self.bucket_path(bucket)?;
        let key = normalize_key(key)?;

        let mut path = bucket_dir.clone();
        for segment in key.split('/') {
            path.push(segment);
        }
        // Component-wise, so `data` is never treated as an ancestor of
        // `database`.
        if !path.starts_with(&bucket_dir) {
            return Err(StorageError::PathTraversal(key));
        }
        Ok((key, path))
    }
}

/// Enforce S3-like naming: 3-63 characters of lowercase letters, digits,
/// hyphens, and underscores, starting and ending with a letter or digit.
/// Uppercase input is folded to lowercase first.
fn validate_bucket_name(name: &str) -> StorageResult<String> {
    let invalid = |reason: &str| StorageError::InvalidBucketName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let folded = name.to_ascii_lowercase();
    let len = folded.len();
    if len < BUCKET_NAME_MIN_LEN || len > BUCKET_NAME_MAX_LEN {
        return Err(invalid("must be between 3 and 63 characters"));
    }
    if !folded
        .chars()
        .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '-' | '_'))
    {
        return Err(invalid(
            "allowed characters are letters, digits, hyphens, and underscores",
        ));
    }
    let bytes = folded.as_bytes();
    if !bytes[0].is_ascii_alphanumeric() || !bytes[len - 1].is_ascii_alphanumeric() {
        return Err(invalid("must start and end with a letter or digit"));
    }
    Ok(folded)
}

/// Normalize an object key to `/`-separated segments, rejecting anything
/// that could point outside its bucket.
fn normalize_key(key: &str) -> StorageResult<String> {
    let invalid = |reason: &str| StorageError::InvalidObjectKey {
        key: key.to_string(),
        reason: reason.to_string(),
    };

    if key.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if key.len() > MAX_OBJECT_KEY_LEN {
        return Err(invalid("exceeds the maximum key length"));
    }
    if key.bytes().any(|b| b.is_ascii_control()) {
        return Err(invalid("must not contain control characters"));
    }

    let unified = key.replace('\\', "/");
    if unified.starts_with('/') {
        return Err(invalid("must not be an absolute path"));
    }

    let mut segments = Vec::new();
    for segment in unified.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment == ".." {
            return Err(StorageError::PathTraversal(key.to_string()));
        }
        segments.push(segment);
    }
    if segments.is_empty() {
        return Err(invalid("empty after normalization"));
    }
    Ok(segments.join("/"))
}
