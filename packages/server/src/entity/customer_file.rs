use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer_file")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub customer_id: i32,

    #[sea_orm(belongs_to, from = "customer_id", to = "id")]
    pub customer: HasOne<super::customer::Entity>,

    /// On-disk name: `{customer_id}_{timestamp}_{sanitized original name}`.
    /// A row may outlive its blob (crash between write and insert, manual
    /// disk deletion); downloads surface that as a storage failure.
    pub storage_name: String,

    /// Sanitized user-supplied filename, used for downloads.
    pub original_name: String,

    pub description: Option<String>,

    /// Byte length actually written at upload time.
    pub size_bytes: i64,

    pub uploaded_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
