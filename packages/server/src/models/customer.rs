use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::entity::customer;

/// Request payload for creating a customer within a region.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateCustomerRequest {
    #[schema(example = "Acme Trading Co.")]
    pub company_name: String,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub mobile1: Option<String>,
    pub mobile2: Option<String>,
    pub phone: Option<String>,
    /// When present and non-blank, a first communication log is recorded
    /// together with the customer.
    pub initial_communication: Option<String>,
}

/// Request payload for editing a customer. Replaces all mutable fields;
/// `region` and `created_at` cannot be changed after creation.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateCustomerRequest {
    pub company_name: String,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub mobile1: Option<String>,
    pub mobile2: Option<String>,
    pub phone: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CustomerResponse {
    pub id: i32,
    pub region: String,
    pub company_name: String,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub mobile1: Option<String>,
    pub mobile2: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
}

/// A customer annotated with its communication activity, as returned by the
/// region listing and search.
#[derive(Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct CustomerActivityItem {
    pub id: i32,
    pub region: String,
    pub company_name: String,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub mobile1: Option<String>,
    pub mobile2: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
    /// Number of communication logs recorded for this customer.
    pub communication_count: i64,
    /// Timestamp of the most recent communication, if any.
    pub last_communication_at: Option<DateTime<Utc>>,
}

/// Per-region customer tally. Every enumerated region appears exactly once,
/// zero-filled.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RegionCount {
    #[schema(example = "Nablus")]
    pub region: String,
    pub customer_count: i64,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct SearchQuery {
    /// Substring matched case-insensitively against company name, contact
    /// person, and address. Blank yields no results.
    pub q: Option<String>,
}

impl From<customer::Model> for CustomerResponse {
    fn from(m: customer::Model) -> Self {
        Self {
            id: m.id,
            region: m.region,
            company_name: m.company_name,
            address: m.address,
            contact_person: m.contact_person,
            mobile1: m.mobile1,
            mobile2: m.mobile2,
            phone: m.phone,
            created_at: m.created_at,
            last_updated_at: m.last_updated_at,
        }
    }
}
