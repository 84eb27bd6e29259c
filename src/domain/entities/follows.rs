use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::follows;

/// Directed follower -> trainer edge. The composite primary key doubles as
/// the uniqueness constraint: at most one edge per ordered pair.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(primary_key(follower_id, trainer_id))]
#[diesel(table_name = follows)]
pub struct FollowEntity {
    pub follower_id: Uuid,
    pub trainer_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = follows)]
pub struct InsertFollowEntity {
    pub follower_id: Uuid,
    pub trainer_id: Uuid,
    pub created_at: DateTime<Utc>,
}
