use sea_orm::*;

use crate::entity::{communication_log, customer};
use crate::error::AppError;
use crate::models::communication::AddCommunicationRequest;

/// Record a communication for a customer.
///
/// The log insert and the parent's `last_updated_at` bump happen in one
/// transaction; neither effect is ever applied without the other.
pub async fn add(
    db: &DatabaseConnection,
    customer_id: i32,
    req: AddCommunicationRequest,
) -> Result<communication_log::Model, AppError> {
    let details = req.details.trim();
    if details.is_empty() {
        return Err(AppError::Validation(
            "Communication details are required".into(),
        ));
    }

    let txn = db.begin().await?;

    let parent = super::customer::find(&txn, customer_id).await?;
    let now = chrono::Utc::now();

    let log = communication_log::ActiveModel {
        customer_id: Set(customer_id),
        details: Set(details.to_string()),
        logged_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut active: customer::ActiveModel = parent.into();
    active.last_updated_at = Set(now);
    active.update(&txn).await?;

    txn.commit().await?;

    Ok(log)
}

/// A customer's communication history, newest first. Same-timestamp entries
/// fall back to insertion order.
pub async fn list(
    db: &DatabaseConnection,
    customer_id: i32,
) -> Result<Vec<communication_log::Model>, AppError> {
    super::customer::find(db, customer_id).await?;

    communication_log::Entity::find()
        .filter(communication_log::Column::CustomerId.eq(customer_id))
        .order_by_desc(communication_log::Column::LoggedAt)
        .order_by_desc(communication_log::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
