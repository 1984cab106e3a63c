use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// One of the ten fixed administrative regions. Immutable after creation.
    pub region: String,

    pub company_name: String,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub mobile1: Option<String>,
    pub mobile2: Option<String>,
    pub phone: Option<String>,

    #[sea_orm(has_many)]
    pub communication_logs: HasMany<super::communication_log::Entity>,

    #[sea_orm(has_many)]
    pub files: HasMany<super::customer_file::Entity>,

    pub created_at: DateTimeUtc,

    /// Bumped on every customer edit and on every new communication log.
    pub last_updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
