//! HTTP handlers for bucket lifecycle operations.

use crate::{AppState, errors::AppError, models::bucket::BucketInfo};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

/// Request body for `POST /api/v1/buckets`.
#[derive(Debug, Deserialize)]
pub struct CreateBucketReq {
    pub name: String,
}

/// Response body for `GET /api/v1/buckets`.
#[derive(Debug, Serialize)]
pub struct BucketList {
    pub buckets: Vec<BucketInfo>,
    pub total: usize,
}

/// POST `/api/v1/buckets` — create a bucket.
pub async fn create_bucket(
    State(state): State<AppState>,
    Json(req): Json<CreateBucketReq>,
) -> Result<impl IntoResponse, AppError> {
    let info = state.storage.create_bucket(&req.name).await?;
    Ok((StatusCode::CREATED, Json(info)))
}

/// GET `/api/v1/buckets` — list all buckets.
pub async fn list_buckets(State(state): State<AppState>) -> Result<Json<BucketList>, AppError> {
    let buckets = state.storage.list_buckets().await?;
    Ok(Json(BucketList {
        total: buckets.len(),
        buckets,
    }))
}

/// GET `/api/v1/buckets/{bucket}` — bucket descriptor and stats.
pub async fn stat_bucket(
    State(state): State<AppState>,
    Path(bucket): Path<String>,
) -> Result<Json<BucketInfo>, AppError> {
    Ok(Json(state.storage.stat_bucket(&bucket).await?))
}

/// DELETE `/api/v1/buckets/{bucket}` — delete an empty bucket.
pub async fn delete_bucket(
    State(state): State<AppState>,
    Path(bucket): Path<String>,
) -> Result<StatusCode, AppError> {
    state.storage.delete_bucket(&bucket).await?;
    Ok(StatusCode::NO_CONTENT)
}
