use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::communication_log;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct AddCommunicationRequest {
    #[schema(example = "Called, agreed on a follow-up next week")]
    pub details: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CommunicationResponse {
    pub id: i32,
    pub customer_id: i32,
    pub details: String,
    pub logged_at: DateTime<Utc>,
}

impl From<communication_log::Model> for CommunicationResponse {
    fn from(m: communication_log::Model) -> Self {
        Self {
            id: m.id,
            customer_id: m.customer_id,
            details: m.details,
            logged_at: m.logged_at,
        }
    }
}
