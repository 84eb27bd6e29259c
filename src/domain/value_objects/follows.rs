use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::follows::FollowEntity;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FollowModel {
    pub follower: Uuid,
    pub following: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<FollowEntity> for FollowModel {
    fn from(entity: FollowEntity) -> Self {
        Self {
            follower: entity.follower_id,
            following: entity.trainer_id,
            created_at: entity.created_at,
        }
    }
}
