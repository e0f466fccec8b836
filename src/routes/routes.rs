//! Defines routes for all bucket and object operations.
//!
//! ## Structure
//! - **Bucket endpoints**
//!   - `POST   /api/v1/buckets` — create bucket
//!   - `GET    /api/v1/buckets` — list buckets
//!   - `GET    /api/v1/buckets/{bucket}` — bucket descriptor
//!   - `DELETE /api/v1/buckets/{bucket}` — delete empty bucket
//!
//! - **Object endpoints**
//!   - `POST   /api/v1/objects/{bucket}` — upload object (multipart form)
//!   - `GET    /api/v1/objects/{bucket}` — list objects (supports prefix)
//!   - `PUT    /api/v1/objects/{bucket}/{*key}` — upload object (raw body)
//!   - `GET    /api/v1/objects/{bucket}/{*key}` — download object
//!   - `HEAD   /api/v1/objects/{bucket}/{*key}` — retrieve metadata only
//!   - `DELETE /api/v1/objects/{bucket}/{*key}` — delete object
//!
//! The wildcard `*key` allows nested keys like `photos/2025/img.jpg`.
//! The framework's default body limit is disabled; the backend enforces
//! the configured maximum object size while streaming.

use crate::{
    AppState,
    handlers::{
        bucket_handlers::{create_bucket, delete_bucket, list_buckets, stat_bucket},
        health_handlers::{healthz, readyz},
        object_handlers::{
            delete_object, download_object, head_object, list_objects, upload_object,
            upload_object_form,
        },
    },
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};

/// Build and return the router for all routes.
///
/// The router carries shared state ([`AppState`]) to all handlers.
pub fn routes() -> Router<AppState> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Bucket-level routes
        .route("/api/v1/buckets", post(create_bucket).get(list_buckets))
        .route(
            "/api/v1/buckets/{bucket}",
            get(stat_bucket).delete(delete_bucket),
        )
        // Object-level routes
        .route(
            "/api/v1/objects/{bucket}",
            post(upload_object_form).get(list_objects),
        )
        .route(
            "/api/v1/objects/{bucket}/{*key}",
            put(upload_object)
                .get(download_object)
                .head(head_object)
                .delete(delete_object),
        )
        .layer(DefaultBodyLimit::disable())
}
