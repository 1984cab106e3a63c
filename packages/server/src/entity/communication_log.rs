use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only record of an interaction with a customer. Rows are inserted,
/// never updated or deleted.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "communication_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub customer_id: i32,

    #[sea_orm(belongs_to, from = "customer_id", to = "id")]
    pub customer: HasOne<super::customer::Entity>,

    pub details: String,

    pub logged_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
