use sea_orm::prelude::Expr;
use sea_orm::sea_query::Alias;
use sea_orm::*;

use crate::entity::{communication_log, customer};
use crate::error::AppError;
use crate::models::statistics::{ActiveCustomer, RecentCommunication, StatisticsResponse};

/// How many entries each leaderboard carries.
const LEADERBOARD_LIMIT: u64 = 10;

/// Aggregate dashboard data: totals, per-region counts, the latest
/// communications, and the most-communicated-with customers.
pub async fn statistics(db: &DatabaseConnection) -> Result<StatisticsResponse, AppError> {
    let total_customers = customer::Entity::find().count(db).await?;

    let per_region = super::customer::count_by_region(db).await?;

    let recent_communications = communication_log::Entity::find()
        .join(JoinType::InnerJoin, super::customer::log_to_customer())
        .select_only()
        .column(customer::Column::CompanyName)
        .column(customer::Column::Region)
        .column(communication_log::Column::Details)
        .column(communication_log::Column::LoggedAt)
        .order_by_desc(communication_log::Column::LoggedAt)
        .order_by_desc(communication_log::Column::Id)
        .limit(LEADERBOARD_LIMIT)
        .into_model::<RecentCommunication>()
        .all(db)
        .await?;

    // Customers without logs still rank, with a zero count. Ties break by id.
    let most_active_customers = customer::Entity::find()
        .join_rev(JoinType::LeftJoin, super::customer::log_to_customer())
        .select_only()
        .column(customer::Column::Id)
        .column(customer::Column::CompanyName)
        .column(customer::Column::Region)
        .column_as(communication_log::Column::Id.count(), "communication_count")
        .group_by(customer::Column::Id)
        .order_by(Expr::col(Alias::new("communication_count")), Order::Desc)
        .order_by_asc(customer::Column::Id)
        .limit(LEADERBOARD_LIMIT)
        .into_model::<ActiveCustomer>()
        .all(db)
        .await?;

    Ok(StatisticsResponse {
        total_customers,
        per_region,
        recent_communications,
        most_active_customers,
    })
}
