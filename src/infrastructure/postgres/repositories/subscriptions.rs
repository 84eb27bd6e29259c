use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{dsl::count_star, insert_into, prelude::*};
use uuid::Uuid;

use crate::{
    domain::{
        entities::{
            accounts::AccountEntity,
            plans::PlanEntity,
            subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
        },
        repositories::subscriptions::SubscriptionRepository,
        value_objects::enums::subscription_statuses::SubscriptionStatus,
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{accounts, plans, subscriptions},
    },
};

pub struct SubscriptionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl SubscriptionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionPostgres {
    async fn insert(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
    ) -> Result<SubscriptionEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // The unique index on (user_id, plan_id) rejects re-subscription in
        // any status; the violation bubbles up for translation.
        let result = insert_into(subscriptions::table)
            .values(&insert_subscription_entity)
            .returning(SubscriptionEntity::as_returning())
            .get_result::<SubscriptionEntity>(&mut conn)?;

        Ok(result)
    }

    async fn find_with_plan_and_trainer(
        &self,
        subscription_id: Uuid,
    ) -> Result<Option<(SubscriptionEntity, PlanEntity, AccountEntity)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = subscriptions::table
            .inner_join(plans::table.inner_join(accounts::table))
            .filter(subscriptions::id.eq(subscription_id))
            .select((
                SubscriptionEntity::as_select(),
                PlanEntity::as_select(),
                AccountEntity::as_select(),
            ))
            .first::<(SubscriptionEntity, PlanEntity, AccountEntity)>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<(SubscriptionEntity, PlanEntity, AccountEntity)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = subscriptions::table
            .inner_join(plans::table.inner_join(accounts::table))
            .filter(subscriptions::user_id.eq(user_id))
            .order(subscriptions::purchased_at.desc())
            .select((
                SubscriptionEntity::as_select(),
                PlanEntity::as_select(),
                AccountEntity::as_select(),
            ))
            .load::<(SubscriptionEntity, PlanEntity, AccountEntity)>(&mut conn)?;

        Ok(results)
    }

    async fn has_active(&self, user_id: Uuid, plan_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // Status is authoritative; expires_at is deliberately not compared
        // against the clock here.
        let current = subscriptions::table
            .filter(subscriptions::user_id.eq(user_id))
            .filter(subscriptions::plan_id.eq(plan_id))
            .filter(subscriptions::status.eq(SubscriptionStatus::Active.to_string()))
            .select(subscriptions::id)
            .first::<Uuid>(&mut conn)
            .optional()?;

        Ok(current.is_some())
    }

    async fn list_active_plan_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = subscriptions::table
            .filter(subscriptions::user_id.eq(user_id))
            .filter(subscriptions::status.eq(SubscriptionStatus::Active.to_string()))
            .select(subscriptions::plan_id)
            .load::<Uuid>(&mut conn)?;

        Ok(results)
    }

    async fn count_active_by_plans(&self, plan_ids: Vec<Uuid>) -> Result<Vec<(Uuid, i64)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = subscriptions::table
            .filter(subscriptions::plan_id.eq_any(plan_ids))
            .filter(subscriptions::status.eq(SubscriptionStatus::Active.to_string()))
            .group_by(subscriptions::plan_id)
            .select((subscriptions::plan_id, count_star()))
            .load::<(Uuid, i64)>(&mut conn)?;

        Ok(results)
    }
}
