use common::storage::{BoxReader, FileStore};
use sea_orm::*;

use crate::config::StorageConfig;
use crate::entity::customer_file;
use crate::error::AppError;
use crate::models::file::UploadFileRequest;
use crate::models::shared::normalize_optional;
use crate::utils::filename::{extension_allowed, sanitize_filename, storage_name};

/// Store an uploaded file for a customer.
///
/// The blob is written before the row is inserted, so a failure leaves at
/// worst a stray blob, never a row without content. A crash between the two
/// steps still produces a row-less blob; the reverse (row without blob) can
/// only arise from outside interference and is tolerated at read time.
pub async fn store(
    db: &DatabaseConnection,
    files: &dyn FileStore,
    storage_cfg: &StorageConfig,
    customer_id: i32,
    req: UploadFileRequest,
) -> Result<customer_file::Model, AppError> {
    super::customer::find(db, customer_id).await?;

    let filename = req.filename.trim();
    if filename.is_empty() {
        return Err(AppError::Validation("Filename is required".into()));
    }
    if !extension_allowed(filename, &storage_cfg.allowed_extensions) {
        return Err(AppError::Validation(format!(
            "File type not allowed. Allowed types: {}",
            storage_cfg.allowed_extensions.join(", ")
        )));
    }

    let original_name =
        sanitize_filename(filename).map_err(|e| AppError::Validation(e.message().into()))?;

    let now = chrono::Utc::now();
    let name = storage_name(customer_id, &original_name, now);

    // Same customer, same filename, same second: the generated names
    // collide and the later write wins.
    match files.exists(&name).await {
        Ok(true) => {
            tracing::warn!(storage_name = %name, "storage name collision, replacing existing content");
        }
        Ok(false) => {}
        Err(e) => return Err(e.into()),
    }

    let written = files.put(&name, &req.content).await?;

    let model = customer_file::ActiveModel {
        customer_id: Set(customer_id),
        storage_name: Set(name),
        original_name: Set(original_name),
        description: Set(normalize_optional(req.description)),
        size_bytes: Set(written as i64),
        uploaded_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(model)
}

/// Look up a file row and open its blob for streaming.
///
/// A row whose blob has gone missing is reported as a storage failure, not a
/// crash; the row-to-blob link is only weakly guaranteed.
pub async fn open(
    db: &DatabaseConnection,
    files: &dyn FileStore,
    customer_id: i32,
    file_id: i32,
) -> Result<(customer_file::Model, BoxReader), AppError> {
    let row = find_for_customer(db, customer_id, file_id).await?;
    let reader = files.get_stream(&row.storage_name).await?;
    Ok((row, reader))
}

/// Delete a stored file.
///
/// Blob removal is attempted first; an already-absent blob counts as
/// removed, and a hard I/O error is logged but does not block the delete.
/// The row deletion is the operation's source of truth.
pub async fn delete(
    db: &DatabaseConnection,
    files: &dyn FileStore,
    customer_id: i32,
    file_id: i32,
) -> Result<(), AppError> {
    let row = find_for_customer(db, customer_id, file_id).await?;

    if let Err(e) = files.delete(&row.storage_name).await {
        tracing::warn!(
            storage_name = %row.storage_name,
            error = %e,
            "failed to remove stored file, leaving stray blob"
        );
    }

    customer_file::Entity::delete_by_id(row.id).exec(db).await?;

    Ok(())
}

/// A customer's files, most recently uploaded first.
pub async fn list(
    db: &DatabaseConnection,
    customer_id: i32,
) -> Result<Vec<customer_file::Model>, AppError> {
    super::customer::find(db, customer_id).await?;

    customer_file::Entity::find()
        .filter(customer_file::Column::CustomerId.eq(customer_id))
        .order_by_desc(customer_file::Column::UploadedAt)
        .order_by_desc(customer_file::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

async fn find_for_customer<C: ConnectionTrait>(
    db: &C,
    customer_id: i32,
    file_id: i32,
) -> Result<customer_file::Model, AppError> {
    let row = customer_file::Entity::find_by_id(file_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("File not found".into()))?;

    if row.customer_id != customer_id {
        return Err(AppError::NotFound("File not found".into()));
    }

    Ok(row)
}
