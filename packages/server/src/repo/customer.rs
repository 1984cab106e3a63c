use std::collections::HashMap;

use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;

use crate::entity::{communication_log, customer};
use crate::error::AppError;
use crate::models::customer::{
    CreateCustomerRequest, CustomerActivityItem, RegionCount, UpdateCustomerRequest,
};
use crate::models::shared::{escape_like, normalize_optional};
use crate::utils::region::{REGIONS, is_valid_region};

/// Create a customer in `region`, with an optional first communication log.
///
/// Customer and initial log are inserted in one transaction: a requested log
/// is never lost and a failed log insert never leaves a bare customer.
pub async fn create(
    db: &DatabaseConnection,
    region: &str,
    req: CreateCustomerRequest,
) -> Result<customer::Model, AppError> {
    if !is_valid_region(region) {
        return Err(AppError::Validation(format!("Unknown region '{region}'")));
    }

    let company_name = req.company_name.trim();
    if company_name.is_empty() {
        return Err(AppError::Validation("Company name is required".into()));
    }

    let initial = normalize_optional(req.initial_communication);
    let now = chrono::Utc::now();

    let txn = db.begin().await?;

    let model = customer::ActiveModel {
        region: Set(region.to_string()),
        company_name: Set(company_name.to_string()),
        address: Set(normalize_optional(req.address)),
        contact_person: Set(normalize_optional(req.contact_person)),
        mobile1: Set(normalize_optional(req.mobile1)),
        mobile2: Set(normalize_optional(req.mobile2)),
        phone: Set(normalize_optional(req.phone)),
        created_at: Set(now),
        last_updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    if let Some(details) = initial {
        communication_log::ActiveModel {
            customer_id: Set(model.id),
            details: Set(details),
            logged_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    Ok(model)
}

/// Replace a customer's mutable fields and bump `last_updated_at`.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    req: UpdateCustomerRequest,
) -> Result<customer::Model, AppError> {
    let company_name = req.company_name.trim();
    if company_name.is_empty() {
        return Err(AppError::Validation("Company name is required".into()));
    }

    let txn = db.begin().await?;

    let existing = find(&txn, id).await?;
    let mut active: customer::ActiveModel = existing.into();
    active.company_name = Set(company_name.to_string());
    active.address = Set(normalize_optional(req.address));
    active.contact_person = Set(normalize_optional(req.contact_person));
    active.mobile1 = Set(normalize_optional(req.mobile1));
    active.mobile2 = Set(normalize_optional(req.mobile2));
    active.phone = Set(normalize_optional(req.phone));
    active.last_updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(model)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<customer::Model, AppError> {
    find(db, id).await
}

/// Customers in `region`, annotated with communication activity, most
/// recently updated first.
pub async fn list_by_region(
    db: &DatabaseConnection,
    region: &str,
) -> Result<Vec<CustomerActivityItem>, AppError> {
    if !is_valid_region(region) {
        return Err(AppError::Validation(format!("Unknown region '{region}'")));
    }

    activity_select()
        .filter(customer::Column::Region.eq(region))
        .into_model::<CustomerActivityItem>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Case-insensitive substring search over company name, contact person, and
/// address. A blank query matches nothing rather than everything.
pub async fn search(
    db: &DatabaseConnection,
    query: &str,
) -> Result<Vec<CustomerActivityItem>, AppError> {
    let term = query.trim();
    if term.is_empty() {
        return Ok(Vec::new());
    }

    let pattern = format!("%{}%", escape_like(term).to_lowercase());
    let matches = |col: customer::Column| {
        Expr::expr(Func::lower(Expr::col((customer::Entity, col))))
            .like(LikeExpr::new(pattern.clone()).escape('\\'))
    };

    activity_select()
        .filter(
            Condition::any()
                .add(matches(customer::Column::CompanyName))
                .add(matches(customer::Column::ContactPerson))
                .add(matches(customer::Column::Address)),
        )
        .into_model::<CustomerActivityItem>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Customer count for every enumerated region, in enumeration order,
/// zero-filled for regions with no customers.
pub async fn count_by_region(db: &DatabaseConnection) -> Result<Vec<RegionCount>, AppError> {
    let counts: Vec<(String, i64)> = customer::Entity::find()
        .select_only()
        .column(customer::Column::Region)
        .column_as(customer::Column::Id.count(), "customer_count")
        .group_by(customer::Column::Region)
        .into_tuple()
        .all(db)
        .await?;

    let by_region: HashMap<String, i64> = counts.into_iter().collect();

    Ok(REGIONS
        .iter()
        .map(|region| RegionCount {
            region: ToString::to_string(region),
            customer_count: by_region.get(*region).copied().unwrap_or(0),
        })
        .collect())
}

pub(crate) async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<customer::Model, AppError> {
    customer::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer not found".into()))
}

/// Join definition from a communication log up to its customer.
pub(crate) fn log_to_customer() -> RelationDef {
    communication_log::Entity::belongs_to(customer::Entity)
        .from(communication_log::Column::CustomerId)
        .to(customer::Column::Id)
        .into()
}

/// Base projection for listings: customer columns plus log count and latest
/// log timestamp, grouped per customer, most recently updated first.
fn activity_select() -> Select<customer::Entity> {
    customer::Entity::find()
        .join_rev(JoinType::LeftJoin, log_to_customer())
        .select_only()
        .column(customer::Column::Id)
        .column(customer::Column::Region)
        .column(customer::Column::CompanyName)
        .column(customer::Column::Address)
        .column(customer::Column::ContactPerson)
        .column(customer::Column::Mobile1)
        .column(customer::Column::Mobile2)
        .column(customer::Column::Phone)
        .column(customer::Column::CreatedAt)
        .column(customer::Column::LastUpdatedAt)
        .column_as(communication_log::Column::Id.count(), "communication_count")
        .column_as(
            communication_log::Column::LoggedAt.max(),
            "last_communication_at",
        )
        .group_by(customer::Column::Id)
        .order_by_desc(customer::Column::LastUpdatedAt)
}
