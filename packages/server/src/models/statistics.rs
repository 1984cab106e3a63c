use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::Serialize;

use super::customer::RegionCount;

/// Dashboard payload: overall totals plus the two activity leaderboards.
#[derive(Serialize, utoipa::ToSchema)]
pub struct StatisticsResponse {
    pub total_customers: u64,
    /// One entry per enumerated region, zero-filled.
    pub per_region: Vec<RegionCount>,
    /// Up to ten most recent communications, newest first.
    pub recent_communications: Vec<RecentCommunication>,
    /// Up to ten customers ranked by communication count, descending.
    pub most_active_customers: Vec<ActiveCustomer>,
}

#[derive(Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct RecentCommunication {
    pub company_name: String,
    pub region: String,
    pub details: String,
    pub logged_at: DateTime<Utc>,
}

#[derive(Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct ActiveCustomer {
    pub id: i32,
    pub company_name: String,
    pub region: String,
    pub communication_count: i64,
}
