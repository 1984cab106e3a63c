use axum::Json;
use axum::body::Body;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::file::{FileResponse, UploadFileRequest};
use crate::repo;
use crate::state::AppState;

/// Body limit for the upload route, slightly above the configured maximum so
/// an oversize file reaches the repository's typed capacity error instead of
/// a bare transport rejection.
pub fn upload_body_limit(max_file_size: u64) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_file_size as usize + 1024 * 1024)
}

#[utoipa::path(
    get,
    path = "/customers/{id}/files",
    tag = "Files",
    operation_id = "listFiles",
    summary = "List a customer's files",
    description = "Returns the customer's uploaded files, most recent first.",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "File list", body = Vec<FileResponse>),
        (status = 404, description = "Customer not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(customer_id))]
pub async fn list_files(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
) -> Result<Json<Vec<FileResponse>>, AppError> {
    let rows = repo::file::list(&state.db, customer_id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/customers/{id}/files",
    tag = "Files",
    operation_id = "uploadFile",
    summary = "Upload a file for a customer",
    description = "Uploads a file as multipart form data. The `file` field is required; an optional `description` field annotates the upload. Only allow-listed extensions are accepted and content is capped at the configured maximum size.",
    params(("id" = i32, Path, description = "Customer ID")),
    request_body(content_type = "multipart/form-data", description = "File upload with optional description"),
    responses(
        (status = 201, description = "File stored", body = FileResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Customer not found (NOT_FOUND)", body = ErrorBody),
        (status = 413, description = "File exceeds size limit (FILE_TOO_LARGE)", body = ErrorBody),
        (status = 500, description = "Storage failure (STORAGE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart), fields(customer_id))]
pub async fn upload_file(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut filename: Option<String> = None;
    let mut content: Option<Vec<u8>> = None;
    let mut description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("file") => {
                filename = field.file_name().map(|s| s.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
                content = Some(data.to_vec());
            }
            Some("description") => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read description: {e}"))
                })?;
                description = Some(text);
            }
            _ => {} // Ignore unknown fields.
        }
    }

    let content = content.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;
    let filename =
        filename.ok_or_else(|| AppError::Validation("File field must have a filename".into()))?;

    let model = repo::file::store(
        &state.db,
        &*state.files,
        &state.config.storage,
        customer_id,
        UploadFileRequest {
            filename,
            content,
            description,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(FileResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/customers/{id}/files/{file_id}",
    tag = "Files",
    operation_id = "downloadFile",
    summary = "Download a file",
    description = "Streams the stored content as an attachment under its original filename. A file record whose content is missing from disk reports a storage failure rather than crashing.",
    params(
        ("id" = i32, Path, description = "Customer ID"),
        ("file_id" = i32, Path, description = "File ID"),
    ),
    responses(
        (status = 200, description = "File content"),
        (status = 404, description = "File not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Stored content missing or unreadable (STORAGE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(customer_id, file_id))]
pub async fn download_file(
    State(state): State<AppState>,
    Path((customer_id, file_id)): Path<(i32, i32)>,
) -> Result<Response, AppError> {
    let (file, reader) = repo::file::open(&state.db, &*state.files, customer_id, file_id).await?;

    let stream = ReaderStream::new(reader);
    let body = Body::from_stream(stream);

    let content_type = mime_guess::from_path(&file.original_name)
        .first()
        .map(|m| m.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, file.size_bytes.to_string())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_value(&file.original_name),
        )
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))?;

    Ok(response)
}

#[utoipa::path(
    delete,
    path = "/customers/{id}/files/{file_id}",
    tag = "Files",
    operation_id = "deleteFile",
    summary = "Delete a file",
    description = "Removes the stored content and the file record. Success is determined by the record deletion; an unremovable blob is logged and left behind.",
    params(
        ("id" = i32, Path, description = "Customer ID"),
        ("file_id" = i32, Path, description = "File ID"),
    ),
    responses(
        (status = 204, description = "File deleted"),
        (status = 404, description = "File not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(customer_id, file_id))]
pub async fn delete_file(
    State(state): State<AppState>,
    Path((customer_id, file_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    repo::file::delete(&state.db, &*state.files, customer_id, file_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Build a safe `Content-Disposition` header value.
fn content_disposition_value(filename: &str) -> String {
    let ascii_safe: String = filename
        .chars()
        .filter(|c| c.is_ascii_graphic() && !matches!(c, '"' | ';' | '\\'))
        .collect();
    let ascii_name = if ascii_safe.is_empty() {
        "download".to_string()
    } else {
        ascii_safe
    };

    // RFC 5987 percent-encoding for filename*.
    let encoded: String = filename
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'!'
            | b'#'
            | b'$'
            | b'&'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~' => String::from(b as char),
            _ => format!("%{b:02X}"),
        })
        .collect();

    format!("attachment; filename=\"{ascii_name}\"; filename*=UTF-8''{encoded}")
}
