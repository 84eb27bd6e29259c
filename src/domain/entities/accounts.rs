use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::accounts;

/// Identity row. Accounts are provisioned by the external authenticator;
/// this crate only reads them, so there is no insert entity.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = accounts)]
pub struct AccountEntity {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub certification: Option<String>,
    pub created_at: DateTime<Utc>,
}
