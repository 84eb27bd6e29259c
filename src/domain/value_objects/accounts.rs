use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::accounts::AccountEntity, value_objects::enums::account_roles::AccountRole,
};

/// The authenticated principal, passed explicitly into every use case that
/// needs identity or role. Never ambient state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewer {
    pub account_id: Uuid,
    pub role: AccountRole,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountModel {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: AccountRole,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub certification: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<AccountEntity> for AccountModel {
    fn from(entity: AccountEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.display_name,
            email: entity.email,
            role: AccountRole::from_str(&entity.role),
            avatar: entity.avatar_url,
            bio: entity.bio,
            certification: entity.certification,
            created_at: entity.created_at,
        }
    }
}

/// Trainer fields embedded in plan and subscription responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainerSummaryModel {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub certification: Option<String>,
}

impl From<AccountEntity> for TrainerSummaryModel {
    fn from(entity: AccountEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.display_name,
            email: entity.email,
            avatar: entity.avatar_url,
            bio: entity.bio,
            certification: entity.certification,
        }
    }
}
