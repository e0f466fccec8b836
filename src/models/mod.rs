//! Core data models for the object storage service.
//!
//! These descriptors are recomputed from the filesystem on every read;
//! nothing here is persisted separately. They serialize naturally as JSON
//! via `serde`.

pub mod bucket;
pub mod object;
