use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::plans;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = plans)]
pub struct PlanEntity {
    pub id: Uuid,
    pub trainer_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: i32,
    pub duration_days: i32,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub difficulty: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = plans)]
pub struct InsertPlanEntity {
    pub trainer_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: i32,
    pub duration_days: i32,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub difficulty: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update; `None` fields keep their stored value. `updated_at` is
/// always refreshed by the use case.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = plans)]
pub struct EditPlanEntity {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<i32>,
    pub duration_days: Option<i32>,
    pub image_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub difficulty: Option<String>,
    pub updated_at: DateTime<Utc>,
}
