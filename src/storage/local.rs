//! Local filesystem implementation of the storage backend.
//!
//! Buckets are directories directly under the storage root and objects are
//! files beneath their bucket, with `/`-separated key segments mapped to
//! subdirectories. Uploads stream into a hidden temp file in the destination
//! directory and are committed with a single atomic rename, so no partial
//! object is ever visible at the final path. All metadata (size, timestamps,
//! content type, checksum) is recomputed from the file on every read.

use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use tokio::fs::{self, File};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_util::io::ReaderStream;
use tracing::{debug, info};
use uuid::Uuid;

use super::integrity::ContentHasher;
use super::paths::PathResolver;
use super::{ByteStream, StorageBackend, StorageError, StorageResult};
use crate::models::{bucket::BucketInfo, object::ObjectMeta};

/// Storage backend that keeps every object as a plain file under a single
/// root directory. Holds no per-object state between calls; concurrent
/// requests coordinate only through the filesystem's atomic rename.
#[derive(Clone, Debug)]
pub struct LocalBackend {
    resolver: PathResolver,
    chunk_size: usize,
    max_object_size: u64,
}

impl LocalBackend {
    /// Open a backend rooted at `root`, creating the directory if needed.
    /// The root is canonicalized so every later containment check compares
    /// fully resolved paths.
    pub async fn open(
        root: impl AsRef<Path>,
        chunk_size: usize,
        max_object_size: u64,
    ) -> StorageResult<Self> {
        fs::create_dir_all(root.as_ref()).await?;
        let root = fs::canonicalize(root.as_ref()).await?;
        info!("storage root at {}", root.display());
        Ok(Self {
            resolver: PathResolver::new(root),
            chunk_size,
            max_object_size,
        })
    }

    pub fn root(&self) -> &Path {
        self.resolver.root()
    }

    /// Resolve a bucket name to its directory, requiring it to exist.
    async fn bucket_dir(&self, name: &str) -> StorageResult<(String, PathBuf)> {
        let (name, path) = self.resolver.bucket_path(name)?;
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_dir() => Ok((name, path)),
            Ok(_) => Err(StorageError::BucketNotFound(name)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(StorageError::BucketNotFound(name))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Every regular file under `dir`, walked iteratively. Hidden entries
    /// are skipped so in-flight temp files never surface as objects.
    async fn walk_files(&self, dir: &Path) -> StorageResult<Vec<(PathBuf, std::fs::Metadata)>> {
        let mut files = Vec::new();
        let mut pending = vec![dir.to_path_buf()];
        while let Some(current) = pending.pop() {
            let mut entries = fs::read_dir(&current).await?;
            while let Some(entry) = entries.next_entry().await? {
                if entry.file_name().to_string_lossy().starts_with('.') {
                    continue;
                }
                let meta = entry.metadata().await?;
                if meta.is_dir() {
                    pending.push(entry.path());
                } else if meta.is_file() {
                    files.push((entry.path(), meta));
                }
            }
        }
        Ok(files)
    }

    /// Descriptor for the bucket at `path`, with stats aggregated from a
    /// walk of its contents.
    async fn bucket_info(&self, name: &str, path: &Path) -> StorageResult<BucketInfo> {
        let meta = fs::metadata(path).await?;
        let created = meta.created().or_else(|_| meta.modified())?;
        let files = self.walk_files(path).await?;
        let total_size = files.iter().map(|(_, meta)| meta.len()).sum();
        Ok(BucketInfo {
            name: name.to_string(),
            created_at: created.into(),
            object_count: files.len() as u64,
            total_size,
        })
    }

    /// Stream the file at `path` through the integrity computer in
    /// configured-size chunks and return its hex digest.
    async fn file_checksum(&self, path: &Path) -> io::Result<String> {
        let mut file = File::open(path).await?;
        let mut hasher = ContentHasher::new();
        let mut buf = vec![0u8; self.chunk_size];
        loop {
            let read = file.read(&mut buf).await?;
            if read == 0 {
                break;
            }
            hasher.update(&buf[..read]);
        }
        Ok(hasher.finalize().0)
    }

    /// Metadata record for the object file at `path`, recomputed from the
    /// authoritative file. Paths that are not regular files do not name
    /// objects.
    async fn object_meta(&self, bucket: &str, key: &str, path: &Path) -> StorageResult<ObjectMeta> {
        let not_found = || StorageError::ObjectNotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        };
        let meta = match fs::metadata(path).await {
            Ok(meta) if meta.is_file() => meta,
            Ok(_) => return Err(not_found()),
            Err(err) if err.kind() == ErrorKind::NotFound => return Err(not_found()),
            Err(err) => return Err(err.into()),
        };
        let etag = self.file_checksum(path).await?;
        Ok(ObjectMeta {
            bucket: bucket.to_string(),
            key: key.to_string(),
            size: meta.len(),
            content_type: guess_content_type(key),
            etag,
            last_modified: modified_at(&meta)?,
        })
    }

    /// Remove empty directories from `start` up to (but excluding) `stop`.
    /// Stops at the first non-empty or missing directory.
    async fn prune_empty_dirs(&self, start: &Path, stop: &Path) {
        let mut current = start.to_path_buf();
        while current.starts_with(stop) && current != stop {
            match fs::remove_dir(&current).await {
                Ok(()) => {
                    if let Some(parent) = current.parent() {
                        current = parent.to_path_buf();
                    } else {
                        break;
                    }
                }
                Err(err) if err.kind() == ErrorKind::NotFound => break,
                Err(err) if err.kind() == ErrorKind::DirectoryNotEmpty => break,
                Err(err) => {
                    debug!("failed to prune directory {}: {}", current.display(), err);
                    break;
                }
            }
        }
    }
}

#[async_trait]
impl StorageBackend for LocalBackend {
    async fn create_bucket(&self, name: &str) -> StorageResult<BucketInfo> {
        let (name, path) = self.resolver.bucket_path(name)?;
        match fs::create_dir(&path).await {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                return Err(StorageError::BucketAlreadyExists(name));
            }
            Err(err) => return Err(err.into()),
        }
        info!("created bucket `{}`", name);
        self.bucket_info(&name, &path).await
    }

    async fn list_buckets(&self) -> StorageResult<Vec<BucketInfo>> {
        let mut buckets = Vec::new();
        let mut entries = fs::read_dir(self.root()).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            let meta = entry.metadata().await?;
            if !meta.is_dir() {
                continue;
            }
            buckets.push(self.bucket_info(&name, &entry.path()).await?);
        }
        buckets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(buckets)
    }

    async fn stat_bucket(&self, name: &str) -> StorageResult<BucketInfo> {
        let (name, path) = self.bucket_dir(name).await?;
        self.bucket_info(&name, &path).await
    }

    async fn delete_bucket(&self, name: &str) -> StorageResult<()> {
        let (name, path) = self.bucket_dir(name).await?;
        // All-or-nothing: refuse before touching anything if the bucket
        // holds any entry at all.
        let mut entries = fs::read_dir(&path).await?;
        if entries.next_entry().await?.is_some() {
            return Err(StorageError::BucketNotEmpty(name));
        }
        fs::remove_dir(&path).await?;
        info!("deleted bucket `{}`", name);
        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: Option<String>,
        mut body: ByteStream<'_>,
    ) -> StorageResult<ObjectMeta> {
        let (bucket, _) = self.bucket_dir(bucket).await?;
        let (key, dest) = self.resolver.object_path(&bucket, key)?;

        let parent = dest.parent().map(Path::to_path_buf).ok_or_else(|| {
            StorageError::Io(io::Error::new(
                ErrorKind::Other,
                "object path missing parent directory",
            ))
        })?;
        fs::create_dir_all(&parent).await?;

        // Same directory as the destination, so the commit rename below is
        // atomic and never crosses a filesystem boundary.
        let tmp_path = parent.join(format!(".tmp-{}", Uuid::new_v4()));
        let mut file = File::create(&tmp_path).await?;

        let mut hasher = ContentHasher::new();
        while let Some(chunk_res) = body.next().await {
            let chunk = match chunk_res {
                Ok(chunk) => chunk,
                Err(err) => {
                    let _ = fs::remove_file(&tmp_path).await;
                    return Err(StorageError::Io(err));
                }
            };
            hasher.update(&chunk);
            if hasher.bytes_seen() > self.max_object_size {
                let _ = fs::remove_file(&tmp_path).await;
                return Err(StorageError::FileTooLarge {
                    max_bytes: self.max_object_size,
                });
            }
            if let Err(err) = file.write_all(&chunk).await {
                let _ = fs::remove_file(&tmp_path).await;
                return Err(StorageError::Io(err));
            }
        }
        if let Err(err) = file.flush().await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StorageError::Io(err));
        }
        if let Err(err) = file.sync_all().await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StorageError::Io(err));
        }
        drop(file);

        let (etag, size) = hasher.finalize();
        if let Err(err) = rename_into_place(&tmp_path, &dest).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StorageError::Io(err));
        }

        let meta = fs::metadata(&dest).await?;
        let content_type = content_type.unwrap_or_else(|| guess_content_type(&key));
        debug!("stored object `{}/{}` ({} bytes)", bucket, key, size);
        Ok(ObjectMeta {
            bucket,
            key,
            size,
            content_type,
            etag,
            last_modified: modified_at(&meta)?,
        })
    }

    async fn get_object(
        &self,
        bucket: &str,
        key: &str,
    ) -> StorageResult<(ObjectMeta, ByteStream<'static>)> {
        let (bucket, _) = self.bucket_dir(bucket).await?;
        let (key, path) = self.resolver.object_path(&bucket, key)?;
        let meta = self.object_meta(&bucket, &key, &path).await?;

        let file = File::open(&path).await.map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                StorageError::ObjectNotFound {
                    bucket: bucket.clone(),
                    key: key.clone(),
                }
            } else {
                StorageError::Io(err)
            }
        })?;
        let stream = ReaderStream::with_capacity(file, self.chunk_size);
        Ok((meta, Box::pin(stream)))
    }

    async fn head_object(&self, bucket: &str, key: &str) -> StorageResult<ObjectMeta> {
        let (bucket, _) = self.bucket_dir(bucket).await?;
        let (key, path) = self.resolver.object_path(&bucket, key)?;
        self.object_meta(&bucket, &key, &path).await
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
    ) -> StorageResult<Vec<ObjectMeta>> {
        let (bucket, dir) = self.bucket_dir(bucket).await?;
        let mut objects = Vec::new();
        for (path, meta) in self.walk_files(&dir).await? {
            let rel = path.strip_prefix(&dir).map_err(|_| {
                StorageError::Io(io::Error::new(
                    ErrorKind::Other,
                    "listed file escaped the bucket directory",
                ))
            })?;
            let key = rel
                .to_string_lossy()
                .replace(std::path::MAIN_SEPARATOR, "/");
            if let Some(prefix) = prefix {
                if !key.starts_with(prefix) {
                    continue;
                }
            }
            let etag = self.file_checksum(&path).await?;
            objects.push(ObjectMeta {
                bucket: bucket.clone(),
                content_type: guess_content_type(&key),
                etag,
                size: meta.len(),
                last_modified: modified_at(&meta)?,
                key,
            });
        }
        objects.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(objects)
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> StorageResult<()> {
        let (bucket, bucket_dir) = self.bucket_dir(bucket).await?;
        let (key, path) = self.resolver.object_path(&bucket, key)?;

        let not_found = || StorageError::ObjectNotFound {
            bucket: bucket.clone(),
            key: key.clone(),
        };
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Err(not_found()),
            Err(err) if err.kind() == ErrorKind::NotFound => return Err(not_found()),
            Err(err) => return Err(err.into()),
        }
        match fs::remove_file(&path).await {
            Ok(()) => debug!("deleted object `{}/{}`", bucket, key),
            Err(err) if err.kind() == ErrorKind::NotFound => return Err(not_found()),
            Err(err) => return Err(err.into()),
        }

        if let Some(parent) = path.parent() {
            self.prune_empty_dirs(parent, &bucket_dir).await;
        }
        Ok(())
    }
}

/// Commit a finished temp file onto its destination. Windows refuses to
/// rename over an existing file, so retry once after removing the target.
async fn rename_into_place(tmp: &Path, dest: &Path) -> io::Result<()> {
    match fs::rename(tmp, dest).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            fs::remove_file(dest).await?;
            fs::rename(tmp, dest).await
        }
        Err(err) => Err(err),
    }
}

fn guess_content_type(key: &str) -> String {
    mime_guess::from_path(key)
        .first_or_octet_stream()
        .to_string()
}

fn modified_at(meta: &std::fs::Metadata) -> io::Result<DateTime<Utc>> {
    Ok(meta.modified()?.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use tempfile::TempDir;

    const CHUNK_SIZE: usize = 64 * 1024;
    const MAX_OBJECT_SIZE: u64 = 1024 * 1024;

    async fn open_backend() -> (TempDir, LocalBackend) {
        let dir = tempfile::tempdir().expect("tempdir");
        let backend = LocalBackend::open(dir.path(), CHUNK_SIZE, MAX_OBJECT_SIZE)
            .await
            .expect("open backend");
        (dir, backend)
    }

    fn body(chunks: Vec<&'static [u8]>) -> ByteStream<'static> {
        Box::pin(stream::iter(
            chunks
                .into_iter()
                .map(|chunk| Ok::<_, io::Error>(bytes::Bytes::from_static(chunk))),
        ))
    }

    async fn collect(mut stream: ByteStream<'static>) -> Vec<u8> {
        let mut data = Vec::new();
        while let Some(chunk) = stream.next().await {
            data.extend_from_slice(&chunk.expect("chunk"));
        }
        data
    }

    #[tokio::test]
    async fn create_then_stat_returns_the_lowercased_name() {
        let (_dir, backend) = open_backend().await;
        let created = backend.create_bucket("My-Docs").await.unwrap();
        assert_eq!(created.name, "my-docs");
        let stat = backend.stat_bucket("MY-DOCS").await.unwrap();
        assert_eq!(stat.name, "my-docs");
        assert_eq!(stat.object_count, 0);
        assert_eq!(stat.total_size, 0);
    }

    #[tokio::test]
    async fn creating_an_existing_bucket_fails() {
        let (_dir, backend) = open_backend().await;
        backend.create_bucket("docs").await.unwrap();
        assert!(matches!(
            backend.create_bucket("docs").await,
            Err(StorageError::BucketAlreadyExists(name)) if name == "docs"
        ));
    }

    #[tokio::test]
    async fn buckets_list_sorted_by_name() {
        let (_dir, backend) = open_backend().await;
        backend.create_bucket("zeta").await.unwrap();
        backend.create_bucket("alpha").await.unwrap();
        backend.create_bucket("mid").await.unwrap();
        let names: Vec<_> = backend
            .list_buckets()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);
    }

    #[tokio::test]
    async fn put_into_a_missing_bucket_fails() {
        let (_dir, backend) = open_backend().await;
        let err = backend
            .put_object("nope", "key.txt", None, body(vec![b"data"]))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::BucketNotFound(name) if name == "nope"));
    }

    #[tokio::test]
    async fn traversal_keys_are_rejected_without_touching_the_filesystem() {
        let (dir, backend) = open_backend().await;
        backend.create_bucket("docs").await.unwrap();
        for key in ["../escape.txt", "a/../../b.txt", "/etc/passwd"] {
            let err = backend
                .put_object("docs", key, None, body(vec![b"x"]))
                .await
                .unwrap_err();
            assert!(
                matches!(
                    err,
                    StorageError::PathTraversal(_) | StorageError::InvalidObjectKey { .. }
                ),
                "accepted {key:?}"
            );
        }
        // Nothing escaped the bucket and nothing was written next to it.
        let mut entries = std::fs::read_dir(dir.path()).unwrap();
        let only = entries.next().unwrap().unwrap();
        assert_eq!(only.file_name(), "docs");
        assert!(entries.next().is_none());
        assert_eq!(std::fs::read_dir(dir.path().join("docs")).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn round_trip_preserves_bytes_and_checksum() {
        let (_dir, backend) = open_backend().await;
        backend.create_bucket("docs").await.unwrap();
        let put = backend
            .put_object("docs", "notes/today.txt", None, body(vec![b"alpha ", b"beta"]))
            .await
            .unwrap();
        assert_eq!(put.size, 10);

        let mut expected = ContentHasher::new();
        expected.update(b"alpha beta");
        assert_eq!(put.etag, expected.finalize().0);

        let (meta, stream) = backend.get_object("docs", "notes/today.txt").await.unwrap();
        assert_eq!(meta.etag, put.etag);
        assert_eq!(meta.size, 10);
        assert_eq!(collect(stream).await, b"alpha beta");
    }

    #[tokio::test]
    async fn overwrite_leaves_exactly_one_object_with_the_new_content() {
        let (_dir, backend) = open_backend().await;
        backend.create_bucket("docs").await.unwrap();
        backend
            .put_object("docs", "a.txt", None, body(vec![b"first version"]))
            .await
            .unwrap();
        let second = backend
            .put_object("docs", "a.txt", None, body(vec![b"second"]))
            .await
            .unwrap();

        let listed = backend.list_objects("docs", None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].size, 6);
        assert_eq!(listed[0].etag, second.etag);

        let (_, stream) = backend.get_object("docs", "a.txt").await.unwrap();
        assert_eq!(collect(stream).await, b"second");
    }

    #[tokio::test]
    async fn oversized_uploads_abort_and_leave_nothing_behind() {
        let (dir, backend) = open_backend().await;
        backend.create_bucket("docs").await.unwrap();

        static BIG: [u8; 512 * 1024] = [7u8; 512 * 1024];
        let chunks: Vec<&'static [u8]> = vec![&BIG, &BIG, &BIG];
        let err = backend
            .put_object("docs", "huge.bin", None, body(chunks))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::FileTooLarge { .. }));

        assert!(matches!(
            backend.head_object("docs", "huge.bin").await,
            Err(StorageError::ObjectNotFound { .. })
        ));
        // No destination file and no orphaned temp file.
        assert_eq!(std::fs::read_dir(dir.path().join("docs")).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn truncated_input_stream_aborts_and_cleans_up() {
        let (dir, backend) = open_backend().await;
        backend.create_bucket("docs").await.unwrap();

        let broken: ByteStream<'static> = Box::pin(stream::iter(vec![
            Ok(bytes::Bytes::from_static(b"partial")),
            Err(io::Error::new(ErrorKind::ConnectionReset, "client went away")),
        ]));
        let err = backend
            .put_object("docs", "upload.bin", None, broken)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
        assert_eq!(std::fs::read_dir(dir.path().join("docs")).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn delete_bucket_requires_emptiness() {
        let (_dir, backend) = open_backend().await;
        backend.create_bucket("docs").await.unwrap();
        backend
            .put_object("docs", "keep.txt", None, body(vec![b"x"]))
            .await
            .unwrap();

        assert!(matches!(
            backend.delete_bucket("docs").await,
            Err(StorageError::BucketNotEmpty(name)) if name == "docs"
        ));

        backend.delete_object("docs", "keep.txt").await.unwrap();
        backend.delete_bucket("docs").await.unwrap();
        assert!(matches!(
            backend.stat_bucket("docs").await,
            Err(StorageError::BucketNotFound(_))
        ));
    }

    #[tokio::test]
    async fn prefix_listing_filters_and_sorts() {
        let (_dir, backend) = open_backend().await;
        backend.create_bucket("docs").await.unwrap();
        for key in ["b/1.txt", "a/2.txt", "a/1.txt"] {
            backend
                .put_object("docs", key, None, body(vec![b"x"]))
                .await
                .unwrap();
        }

        let keys: Vec<_> = backend
            .list_objects("docs", Some("a/"))
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.key)
            .collect();
        assert_eq!(keys, ["a/1.txt", "a/2.txt"]);

        let all: Vec<_> = backend
            .list_objects("docs", None)
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.key)
            .collect();
        assert_eq!(all, ["a/1.txt", "a/2.txt", "b/1.txt"]);
    }

    #[tokio::test]
    async fn deleting_a_nested_object_prunes_empty_directories() {
        let (dir, backend) = open_backend().await;
        backend.create_bucket("docs").await.unwrap();
        backend
            .put_object("docs", "a/b/c.txt", None, body(vec![b"x"]))
            .await
            .unwrap();
        backend.delete_object("docs", "a/b/c.txt").await.unwrap();
        assert!(!dir.path().join("docs/a").exists());
        assert!(dir.path().join("docs").exists());
    }

    #[tokio::test]
    async fn explicit_content_type_wins_over_the_guess() {
        let (_dir, backend) = open_backend().await;
        backend.create_bucket("docs").await.unwrap();

        let guessed = backend
            .put_object("docs", "readme.txt", None, body(vec![b"hi"]))
            .await
            .unwrap();
        assert_eq!(guessed.content_type, "text/plain");

        let explicit = backend
            .put_object(
                "docs",
                "data.bin",
                Some("application/x-custom".to_string()),
                body(vec![b"hi"]),
            )
            .await
            .unwrap();
        assert_eq!(explicit.content_type, "application/x-custom");

        let fallback = backend
            .put_object("docs", "no-extension", None, body(vec![b"hi"]))
            .await
            .unwrap();
        assert_eq!(fallback.content_type, "application/octet-stream");
    }

    #[tokio::test]
    async fn store_and_retrieve_end_to_end() {
        let (_dir, backend) = open_backend().await;
        backend.create_bucket("docs").await.unwrap();

        let put = backend
            .put_object(
                "docs",
                "readme.txt",
                Some("text/plain".to_string()),
                body(vec![b"hello"]),
            )
            .await
            .unwrap();
        assert_eq!(put.size, 5);
        assert_eq!(put.etag, "5d41402abc4b2a76b9719d911017c592");
        assert_eq!(put.content_type, "text/plain");

        let (meta, stream) = backend.get_object("docs", "readme.txt").await.unwrap();
        assert_eq!(collect(stream).await, b"hello");
        assert_eq!(meta.bucket, "docs");
        assert_eq!(meta.key, "readme.txt");

        let head = backend.head_object("docs", "readme.txt").await.unwrap();
        assert_eq!(head.size, 5);
        assert_eq!(head.etag, put.etag);

        backend.delete_object("docs", "readme.txt").await.unwrap();
        assert!(matches!(
            backend.get_object("docs", "readme.txt").await,
            Err(StorageError::ObjectNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn backends_with_different_roots_are_independent() {
        let (_dir_a, backend_a) = open_backend().await;
        let (_dir_b, backend_b) = open_backend().await;
        backend_a.create_bucket("docs").await.unwrap();
        assert!(matches!(
            backend_b.stat_bucket("docs").await,
            Err(StorageError::BucketNotFound(_))
        ));
    }
}
