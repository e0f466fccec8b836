//! HTTP handlers for object operations.
//! Streams bodies in both directions to keep memory bounded by the chunk
//! size and delegates storage concerns to the backend trait.

use crate::{AppState, errors::AppError, models::object::ObjectMeta};
use axum::{
    Json,
    body::Body,
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::io;

/// Query params accepted when listing objects.
#[derive(Debug, Deserialize)]
pub struct ListObjectsQuery {
    pub prefix: Option<String>,
}

/// Response body for `GET /api/v1/objects/{bucket}`.
#[derive(Debug, Serialize)]
pub struct ObjectList {
    pub bucket: String,
    pub objects: Vec<ObjectMeta>,
    pub total: usize,
    pub prefix: Option<String>,
}

/// PUT `/api/v1/objects/{bucket}/{*key}` — upload an object from the raw
/// request body. Content type comes from the request header when present.
pub async fn upload_object(
    State(state): State<AppState>,
    Path((bucket, key)): Path<(String, String)>,
    headers: HeaderMap,
    body: Body,
) -> Result<impl IntoResponse, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    let stream = body
        .into_data_stream()
        .map(|chunk| chunk.map_err(|err| io::Error::new(io::ErrorKind::Other, err)));

    let meta = state
        .storage
        .put_object(&bucket, &key, content_type, Box::pin(stream))
        .await?;
    Ok((StatusCode::CREATED, Json(meta)))
}

/// POST `/api/v1/objects/{bucket}` — upload an object from a multipart
/// form. Text fields `key` and `content_type` override the file part's
/// filename and declared type; they must precede the `file` part, which is
/// streamed to the backend as it arrives.
pub async fn upload_object_form(
    State(state): State<AppState>,
    Path(bucket): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut key_override: Option<String> = None;
    let mut content_type_override: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::bad_request(format!("malformed multipart body: {err}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("key") => {
                let value = field
                    .text()
                    .await
                    .map_err(|err| AppError::bad_request(format!("invalid `key` field: {err}")))?;
                key_override = Some(value);
            }
            Some("content_type") => {
                let value = field.text().await.map_err(|err| {
                    AppError::bad_request(format!("invalid `content_type` field: {err}"))
                })?;
                content_type_override = Some(value);
            }
            Some("file") => {
                let filename = field.file_name().map(str::to_string);
                let declared_type = field.content_type().map(str::to_string);
                let key = key_override.clone().or(filename).ok_or_else(|| {
                    AppError::bad_request("either a `key` field or a filename is required")
                })?;
                let content_type = content_type_override.clone().or(declared_type);

                let stream = futures::stream::try_unfold(field, |mut field| async move {
                    match field.chunk().await {
                        Ok(Some(chunk)) => Ok(Some((chunk, field))),
                        Ok(None) => Ok(None),
                        Err(err) => Err(io::Error::new(io::ErrorKind::Other, err)),
                    }
                });

                let meta = state
                    .storage
                    .put_object(&bucket, &key, content_type, Box::pin(stream))
                    .await?;
                return Ok((StatusCode::CREATED, Json(meta)));
            }
            _ => continue,
        }
    }

    Err(AppError::bad_request("multipart body is missing a `file` field"))
}

/// GET `/api/v1/objects/{bucket}/{*key}` — download an object as a
/// streaming response.
pub async fn download_object(
    State(state): State<AppState>,
    Path((bucket, key)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let (meta, stream) = state.storage.get_object(&bucket, &key).await?;
    let body = Body::from_stream(stream);

    let mut response = Response::new(body);
    *response.status_mut() = StatusCode::OK;
    set_object_headers(response.headers_mut(), &meta);
    Ok(response)
}

/// HEAD `/api/v1/objects/{bucket}/{*key}` — same headers as GET but no body.
pub async fn head_object(
    State(state): State<AppState>,
    Path((bucket, key)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let meta = state.storage.head_object(&bucket, &key).await?;
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::OK;
    set_object_headers(response.headers_mut(), &meta);
    Ok(response)
}

/// DELETE `/api/v1/objects/{bucket}/{*key}` — delete an object.
pub async fn delete_object(
    State(state): State<AppState>,
    Path((bucket, key)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    state.storage.delete_object(&bucket, &key).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET `/api/v1/objects/{bucket}` — list objects, supports `?prefix=`.
pub async fn list_objects(
    State(state): State<AppState>,
    Path(bucket): Path<String>,
    Query(q): Query<ListObjectsQuery>,
) -> Result<Json<ObjectList>, AppError> {
    let objects = state
        .storage
        .list_objects(&bucket, q.prefix.as_deref())
        .await?;
    Ok(Json(ObjectList {
        total: objects.len(),
        bucket,
        objects,
        prefix: q.prefix,
    }))
}

fn set_object_headers(headers: &mut HeaderMap, meta: &ObjectMeta) {
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&meta.content_type)
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );
    headers.insert(
        header::CONTENT_LENGTH,
        HeaderValue::from_str(&meta.size.to_string())
            .unwrap_or_else(|_| HeaderValue::from_static("0")),
    );
    let quoted = format!("\"{}\"", meta.etag);
    if let Ok(value) = HeaderValue::from_str(&quoted) {
        headers.insert(header::ETAG, value);
    }
    headers.insert(
        header::LAST_MODIFIED,
        HeaderValue::from_str(&meta.last_modified.to_rfc2822())
            .unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    let filename = meta.key.rsplit('/').next().unwrap_or(meta.key.as_str());
    if let Ok(value) = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename)) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
}
