use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::{accounts::AccountEntity, plans::PlanEntity, subscriptions::SubscriptionEntity},
    value_objects::{enums::subscription_statuses::SubscriptionStatus, plans::PlanDetailModel},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeModel {
    pub plan_id: Uuid,
}

/// A subscription joined with its plan and the plan's trainer. The owner
/// always sees the full plan description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionViewModel {
    pub id: Uuid,
    pub user: Uuid,
    pub plan: PlanDetailModel,
    pub purchase_date: DateTime<Utc>,
    pub status: SubscriptionStatus,
    pub expires_at: DateTime<Utc>,
}

impl SubscriptionViewModel {
    pub fn from_joined(
        subscription: SubscriptionEntity,
        plan: PlanEntity,
        trainer: AccountEntity,
    ) -> Self {
        Self {
            id: subscription.id,
            user: subscription.user_id,
            plan: PlanDetailModel::from_joined(plan, trainer),
            purchase_date: subscription.purchased_at,
            status: SubscriptionStatus::from_str(&subscription.status),
            expires_at: subscription.expires_at,
        }
    }
}
