use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{
    accounts::AccountEntity,
    plans::{EditPlanEntity, InsertPlanEntity, PlanEntity},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlanRepository {
    async fn create(&self, insert_plan_entity: InsertPlanEntity) -> Result<Uuid>;
    async fn find_by_id(&self, plan_id: Uuid) -> Result<Option<PlanEntity>>;
    /// Read-time join with the owning trainer.
    async fn find_with_trainer(&self, plan_id: Uuid)
    -> Result<Option<(PlanEntity, AccountEntity)>>;
    /// All plans joined with their trainers, newest first.
    async fn list_with_trainers(&self) -> Result<Vec<(PlanEntity, AccountEntity)>>;
    /// Plans authored by any of the given trainers, newest first.
    async fn list_by_trainers(
        &self,
        trainer_ids: Vec<Uuid>,
    ) -> Result<Vec<(PlanEntity, AccountEntity)>>;
    /// One trainer's own plans, newest first.
    async fn list_by_trainer(&self, trainer_id: Uuid)
    -> Result<Vec<(PlanEntity, AccountEntity)>>;
    async fn update(&self, plan_id: Uuid, edit_plan_entity: EditPlanEntity) -> Result<()>;
    /// Deletes the plan row only; subscriptions referencing it stay as-is.
    async fn delete(&self, plan_id: Uuid) -> Result<()>;
}
