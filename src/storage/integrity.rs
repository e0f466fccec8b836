//! Incremental content fingerprinting for streamed payloads.
//!
//! Uploads and metadata reads never hold a whole object in memory, so the
//! digest and byte count are accumulated chunk by chunk as data flows past.

use md5::Context;

/// Accumulates an MD5 digest and a byte count over a sequence of chunks.
///
/// One accumulator belongs to exactly one streaming operation. Feeding the
/// same bytes in different chunkings always produces the same digest.
pub struct ContentHasher {
    digest: Context,
    bytes: u64,
}

impl ContentHasher {
    pub fn new() -> Self {
        Self {
            digest: Context::new(),
            bytes: 0,
        }
    }

    /// Feed one chunk into the accumulator.
    pub fn update(&mut self, chunk: &[u8]) {
        self.digest.consume(chunk);
        self.bytes += chunk.len() as u64;
    }

    /// Bytes consumed so far.
    pub fn bytes_seen(&self) -> u64 {
        self.bytes
    }

    /// Consume the accumulator, returning the lowercase hex digest and the
    /// total byte count.
    pub fn finalize(self) -> (String, u64) {
        (format!("{:x}", self.digest.compute()), self.bytes)
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_of_known_input() {
        let mut hasher = ContentHasher::new();
        hasher.update(b"hello");
        let (digest, bytes) = hasher.finalize();
        assert_eq!(digest, "5d41402abc4b2a76b9719d911017c592");
        assert_eq!(bytes, 5);
    }

    #[test]
    fn digest_of_empty_input() {
        let (digest, bytes) = ContentHasher::new().finalize();
        assert_eq!(digest, "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(bytes, 0);
    }

    #[test]
    fn chunking_does_not_change_the_digest() {
        let mut whole = ContentHasher::new();
        whole.update(b"the quick brown fox");

        let mut pieces = ContentHasher::new();
        pieces.update(b"the quick");
        pieces.update(b" brown");
        pieces.update(b" fox");

        assert_eq!(whole.finalize(), pieces.finalize());
    }

    #[test]
    fn byte_count_tracks_every_chunk() {
        let mut hasher = ContentHasher::new();
        hasher.update(&[0u8; 1024]);
        assert_eq!(hasher.bytes_seen(), 1024);
        hasher.update(&[0u8; 512]);
        assert_eq!(hasher.bytes_seen(), 1536);
    }
}
