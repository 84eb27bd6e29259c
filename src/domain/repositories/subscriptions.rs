use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{
    accounts::AccountEntity,
    plans::PlanEntity,
    subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository {
    /// Inserts the subscription. A second row for the same (user, plan)
    /// pair, whatever its status, hits the unique index and surfaces as the
    /// underlying diesel error for the use case to translate.
    async fn insert(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
    ) -> Result<SubscriptionEntity>;
    /// Subscription joined with its plan and that plan's trainer.
    async fn find_with_plan_and_trainer(
        &self,
        subscription_id: Uuid,
    ) -> Result<Option<(SubscriptionEntity, PlanEntity, AccountEntity)>>;
    /// All of a user's subscriptions, newest purchase first, joined.
    async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<(SubscriptionEntity, PlanEntity, AccountEntity)>>;
    /// Status check only; `expires_at` is deliberately not consulted.
    async fn has_active(&self, user_id: Uuid, plan_id: Uuid) -> Result<bool>;
    /// Plan ids the user holds an active subscription to.
    async fn list_active_plan_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>>;
    /// Active-subscription counts per plan, for trainer engagement metrics.
    async fn count_active_by_plans(&self, plan_ids: Vec<Uuid>) -> Result<Vec<(Uuid, i64)>>;
}
